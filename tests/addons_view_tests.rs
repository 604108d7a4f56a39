//! Integration tests for the addons screen.
//!
//! Renders the widget into a buffer for each content state and checks the
//! search filter, navigation targets and state reset through the public API.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use addondeck::addons::{
    Addon, AddonsModel, AddonsSource, CatalogResource, CatalogSource, Manifest, ResourceContent,
    ResourceRequest, SelectInput, build_selectable, selectable_inputs,
};
use addondeck::app::App;
use addondeck::route::{UrlParams, addon_details_hash};
use addondeck::ui::addons_view::{AddonsScreen, AddonsWidget, ViewState};

const CATALOG: &str = "https://addons.example.com/manifest.json";
const SUBTITLES: &str = "https://sub.example.com/manifest.json";

// ============================================================================
// Helpers
// ============================================================================

fn manifest(name: &str, description: Option<&str>) -> Manifest {
    Manifest {
        id: format!("org.example.{}", name.to_lowercase().replace(' ', "-")),
        name: name.to_string(),
        version: "1.2.0".to_string(),
        description: description.map(str::to_string),
        types: vec!["movie".to_string()],
        ..Manifest::default()
    }
}

fn request() -> ResourceRequest {
    ResourceRequest::addon_catalog(CATALOG, "all", "movie")
}

fn sources() -> Vec<CatalogSource> {
    vec![CatalogSource {
        name: "Community".to_string(),
        base: CATALOG.to_string(),
        id: "all".to_string(),
        types: vec!["movie".to_string(), "series".to_string()],
    }]
}

fn model_with(content: Option<ResourceContent>) -> AddonsModel {
    let request = request();
    AddonsModel {
        selectable: build_selectable(&sources(), Some(&request)),
        catalog_resource: content.map(|content| CatalogResource { request, content }),
    }
}

fn sample_addons() -> Vec<Addon> {
    vec![
        Addon::new(
            manifest("OpenSubtitles", Some("Subtitles in every language")),
            SUBTITLES,
        )
        .with_installed(true),
        Addon::new(
            manifest("Public Domain", Some("Free classic movies")),
            "https://pd.example.com/manifest.json",
        ),
        Addon::new(manifest("Trailers", None), "https://tr.example.com/manifest.json"),
    ]
}

fn numbered_addons(count: usize) -> Vec<Addon> {
    (0..count)
        .map(|i| {
            Addon::new(
                manifest(&format!("Addon{}", i), Some("Numbered addon")),
                format!("https://a{}.example.com/manifest.json", i),
            )
        })
        .collect()
}

/// Renders the screen and returns each buffer row as a string.
fn render_to_rows(screen: &AddonsScreen, model: &AddonsModel) -> Vec<String> {
    render_sized(screen, model, 100, 30).0
}

/// Renders into a `width` x `height` buffer, returning the rows and the buffer.
fn render_sized(
    screen: &AddonsScreen,
    model: &AddonsModel,
    width: u16,
    height: u16,
) -> (Vec<String>, Buffer) {
    let inputs: Vec<SelectInput> = selectable_inputs(model);
    let area = Rect::new(0, 0, width, height);
    let mut buf = Buffer::empty(area);
    AddonsWidget::new(screen, model, &inputs).render(area, &mut buf);

    let rows = (0..area.height)
        .map(|y| {
            (0..area.width)
                .map(|x| buf.cell((x, y)).map_or(" ", |c| c.symbol()))
                .collect::<String>()
        })
        .collect();
    (rows, buf)
}

fn screen_contains(rows: &[String], needle: &str) -> bool {
    rows.iter().any(|row| row.contains(needle))
}

// ============================================================================
// Render States
// ============================================================================

#[test]
fn test_error_content_shows_load_failure() {
    let model = model_with(Some(ResourceContent::Err("HTTP 500".to_string())));
    let rows = render_to_rows(&AddonsScreen::new(), &model);
    assert!(screen_contains(&rows, "Addons could not be loaded"));
    assert!(!screen_contains(&rows, "HTTP 500"), "cause must not be rendered");
}

#[test]
fn test_no_catalogs_and_no_resource_shows_no_addons() {
    let model = AddonsModel::default();
    assert_eq!(ViewState::of(&model), ViewState::NoAddons);
    let rows = render_to_rows(&AddonsScreen::new(), &model);
    assert!(screen_contains(&rows, "No addons"));
}

#[test]
fn test_catalogs_without_resource_shows_no_select() {
    let model = AddonsModel {
        selectable: build_selectable(&sources(), None),
        catalog_resource: None,
    };
    let rows = render_to_rows(&AddonsScreen::new(), &model);
    assert!(screen_contains(&rows, "No select"));
}

#[test]
fn test_loading_content() {
    let model = model_with(Some(ResourceContent::Loading));
    let rows = render_to_rows(&AddonsScreen::new(), &model);
    assert!(screen_contains(&rows, "Loading"));
}

#[test]
fn test_ready_renders_cards_and_chrome() {
    let model = model_with(Some(ResourceContent::Ready(sample_addons())));
    let rows = render_to_rows(&AddonsScreen::new(), &model);

    assert!(screen_contains(&rows, "Addons"));
    assert!(screen_contains(&rows, "Add addon"));
    assert!(screen_contains(&rows, "Search addons..."));
    assert!(screen_contains(&rows, "OpenSubtitles"));
    assert!(screen_contains(&rows, "Trailers"));
    assert!(screen_contains(&rows, "Uninstall"));
    assert!(screen_contains(&rows, "Install"));
    assert!(screen_contains(&rows, "Community"));
}

#[test]
fn test_search_hides_non_matching_cards() {
    let model = model_with(Some(ResourceContent::Ready(sample_addons())));
    let mut screen = AddonsScreen::new();
    screen.set_search("CLASSIC");
    let rows = render_to_rows(&screen, &model);
    assert!(screen_contains(&rows, "Public Domain"));
    assert!(!screen_contains(&rows, "OpenSubtitles"));
}

#[test]
fn test_modals_render_over_content() {
    let model = model_with(Some(ResourceContent::Ready(sample_addons())));
    let mut screen = AddonsScreen::new();

    screen.open_add_addon();
    let rows = render_to_rows(&screen, &model);
    assert!(screen_contains(&rows, "Paste url..."));
    assert!(screen_contains(&rows, "Cancel"));

    screen.close_add_addon();
    screen.share(SUBTITLES);
    let rows = render_to_rows(&screen, &model);
    assert!(screen_contains(&rows, "Share addon"));
    assert!(screen_contains(&rows, "sub.example.com"));
}

#[test]
fn test_highlight_stays_visible_on_short_terminal() {
    let model = model_with(Some(ResourceContent::Ready(numbered_addons(10))));
    let mut screen = AddonsScreen::new();
    for _ in 0..5 {
        screen.select_next(&model);
    }

    for height in [16, 12, 9] {
        let (rows, buf) = render_sized(&screen, &model, 80, height);
        let row = rows
            .iter()
            .position(|row| row.contains("Addon5"))
            .unwrap_or_else(|| panic!("highlighted Addon5 not rendered at height {}", height));
        let bg = buf.cell((2, row as u16)).map(|c| c.bg);
        assert_eq!(bg, Some(ratatui::style::Color::Blue), "height {}", height);
    }
}

// ============================================================================
// Search Filter
// ============================================================================

#[test]
fn test_filter_missing_description_never_matches() {
    let model = model_with(Some(ResourceContent::Ready(sample_addons())));
    let mut screen = AddonsScreen::new();
    screen.set_search("subtitles in");
    let names: Vec<&str> = screen
        .filtered_addons(&model)
        .iter()
        .map(|a| a.name())
        .collect();
    assert_eq!(names, vec!["OpenSubtitles"]);
}

proptest! {
    #[test]
    fn prop_filter_matches_name_or_description(
        name in "[a-zA-Z ]{1,12}",
        description in proptest::option::of("[a-zA-Z ]{0,20}"),
        query in "[a-zA-Z]{0,4}",
    ) {
        let addon = Addon::new(manifest(&name, description.as_deref()), SUBTITLES);
        let model = model_with(Some(ResourceContent::Ready(vec![addon])));
        let mut screen = AddonsScreen::new();
        screen.set_search(query.clone());

        let q = query.to_lowercase();
        let expected = q.is_empty()
            || name.to_lowercase().contains(&q)
            || description.is_some_and(|d| d.to_lowercase().contains(&q));
        prop_assert_eq!(screen.filtered_addons(&model).len() == 1, expected);
    }

    #[test]
    fn prop_empty_query_keeps_everything(count in 0usize..20) {
        let addons = (0..count)
            .map(|i| Addon::new(manifest(&format!("Addon {}", i), None), format!("https://{}.example.com/manifest.json", i)))
            .collect();
        let model = model_with(Some(ResourceContent::Ready(addons)));
        prop_assert_eq!(AddonsScreen::new().filtered_addons(&model).len(), count);
    }
}

// ============================================================================
// Navigation Targets
// ============================================================================

#[test]
fn test_submit_with_catalog_keeps_catalog_path() {
    let model = model_with(Some(ResourceContent::Loading));
    let mut screen = AddonsScreen::new();
    screen.open_add_addon();
    screen.add_addon_url_mut().set_value(SUBTITLES);

    assert_eq!(
        screen.submit_add_addon(&model).as_deref(),
        Some(
            "#/addons/https%3A%2F%2Faddons.example.com%2Fmanifest.json/all/movie\
             ?addon=https%3A%2F%2Fsub.example.com%2Fmanifest.json"
        )
    );
}

#[test]
fn test_submit_without_catalog_uses_bare_route() {
    let model = AddonsModel::default();
    let mut screen = AddonsScreen::new();
    screen.open_add_addon();
    screen.add_addon_url_mut().set_value(SUBTITLES);

    assert_eq!(
        screen.submit_add_addon(&model).as_deref(),
        Some("#/addons?addon=https%3A%2F%2Fsub.example.com%2Fmanifest.json")
    );
}

#[test]
fn test_toggle_uses_addon_transport_url() {
    let model = model_with(Some(ResourceContent::Ready(sample_addons())));
    let screen = AddonsScreen::new();
    assert_eq!(
        screen.toggle_selected(&model),
        Some(addon_details_hash(model.request(), SUBTITLES))
    );
}

// ============================================================================
// Reset On Navigation
// ============================================================================

/// Source serving a fixed ready catalog for whatever route is loaded.
struct ReadySource {
    model: AddonsModel,
}

impl AddonsSource for ReadySource {
    fn load(&mut self, params: &UrlParams) {
        self.model.catalog_resource = params.request().map(|request| CatalogResource {
            request,
            content: ResourceContent::Ready(sample_addons()),
        });
    }

    fn poll(&mut self) -> bool {
        false
    }

    fn reload(&mut self) {}

    fn model(&self) -> &AddonsModel {
        &self.model
    }
}

#[test]
fn test_route_change_resets_search_and_modals() {
    let start = addondeck::route::catalog_hash(&request());
    let mut app = App::with_source(
        Box::new(ReadySource {
            model: AddonsModel::default(),
        }),
        &start,
    );

    // Type a search, then open and close the share prompt
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    let press = |code| KeyEvent::new(code, KeyModifiers::NONE);
    app.handle_key(press(KeyCode::Char('/')));
    app.handle_key(press(KeyCode::Char('o')));
    app.handle_key(press(KeyCode::Enter));
    app.handle_key(press(KeyCode::Char('s')));
    assert_eq!(app.screen().search(), "o");
    assert!(app.screen().shared_transport_url().is_some());

    app.navigate(&addon_details_hash(None, SUBTITLES));

    assert_eq!(app.screen().search(), "");
    assert!(app.screen().shared_transport_url().is_none());
    assert!(!app.screen().is_add_addon_open());
    assert_eq!(app.route().addon(), Some(SUBTITLES));
    assert!(app.source().model().catalog_resource.is_none());
}
