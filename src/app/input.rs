//! Key handling for the addons screen.
//!
//! Modals take precedence over the screen: the share prompt first, then the
//! add-addon form, then whichever region has focus.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::{info, warn};

use crate::ui::addons_view::{AddAddonFocus, AddonsFocus};
use crate::ui::text_input::MAX_INPUT_LEN;

use super::App;

impl App {
    /// Handles a key event.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit();
            return;
        }

        if self.screen.shared_transport_url().is_some() {
            self.handle_share_key(key);
        } else if self.screen.is_add_addon_open() {
            self.handle_add_addon_key(key);
        } else {
            match self.screen.focus() {
                AddonsFocus::List => self.handle_list_key(key),
                AddonsFocus::Search => self.handle_search_key(key),
                AddonsFocus::Select(index) => self.handle_select_key(key, index),
            }
        }
    }

    /// Handles keys in the share prompt.
    fn handle_share_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.screen.clear_shared(),
            KeyCode::Char('c') | KeyCode::Enter => self.copy_shared_url(),
            _ => {}
        }
    }

    /// Copies the shared transport URL to the clipboard.
    fn copy_shared_url(&mut self) {
        let Some(url) = self.screen.shared_transport_url().map(str::to_string) else {
            return;
        };

        match self.clipboard.copy(&url) {
            Ok(()) => {
                info!("[APP] Copied share URL: {}", url);
                self.set_status(format!("Copied {}", url));
            }
            Err(e) => {
                warn!("[APP] Copy failed: {}", e);
                self.set_status(format!("Copy failed: {}", e));
            }
        }
    }

    /// Handles keys in the add-addon form.
    fn handle_add_addon_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.screen.close_add_addon();
                return;
            }
            KeyCode::Tab => {
                self.screen.add_addon_focus_next();
                return;
            }
            KeyCode::BackTab => {
                self.screen.add_addon_focus_prev();
                return;
            }
            _ => {}
        }

        match self.screen.add_addon_focus() {
            AddAddonFocus::Url => self.handle_add_addon_url_key(key),
            AddAddonFocus::Cancel => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => self.screen.close_add_addon(),
                KeyCode::Left | KeyCode::Right => self.screen.add_addon_focus_next(),
                _ => {}
            },
            AddAddonFocus::Add => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => self.submit_add_addon(),
                KeyCode::Left | KeyCode::Right => self.screen.add_addon_focus_prev(),
                _ => {}
            },
        }
    }

    /// Handles keys in the add-addon URL field.
    fn handle_add_addon_url_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if key.code == KeyCode::Char('v') {
                match self.clipboard.paste() {
                    Ok(text) => {
                        if !self.screen.add_addon_url_mut().insert_str(&text) {
                            warn!("[APP] Pasted text clipped to {} bytes", MAX_INPUT_LEN);
                            self.set_status(format!(
                                "Pasted text clipped to {} bytes",
                                MAX_INPUT_LEN
                            ));
                        }
                    }
                    Err(e) => warn!("[APP] Paste failed: {}", e),
                }
            }
            return;
        }

        if key.code == KeyCode::Enter {
            self.submit_add_addon();
            return;
        }

        let field = self.screen.add_addon_url_mut();
        match key.code {
            KeyCode::Char(c) => field.insert_char(c),
            KeyCode::Backspace => field.backspace(),
            KeyCode::Delete => field.delete(),
            KeyCode::Left => field.move_left(),
            KeyCode::Right => field.move_right(),
            KeyCode::Home => field.move_to_start(),
            KeyCode::End => field.move_to_end(),
            _ => {}
        }
    }

    /// Navigates to the details of the pasted addon URL.
    fn submit_add_addon(&mut self) {
        if let Some(hash) = self.screen.submit_add_addon(self.source.model()) {
            info!("[APP] Add addon: {}", self.screen.add_addon_url().value());
            self.navigate(&hash);
        }
    }

    /// Handles keys while the addon list has focus.
    fn handle_list_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.quit(),

            KeyCode::Up | KeyCode::Char('k') => self.screen.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => self.screen.select_next(self.source.model()),
            KeyCode::Home => self.screen.select_first(),
            KeyCode::End => self.screen.select_last(self.source.model()),

            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(hash) = self.screen.toggle_selected(self.source.model()) {
                    self.navigate(&hash);
                }
            }
            KeyCode::Char('s') => self.screen.share_selected(self.source.model()),
            KeyCode::Char('+' | 'a') => self.screen.open_add_addon(),
            KeyCode::Char('/') => self.screen.set_focus(AddonsFocus::Search),

            KeyCode::Tab => self.screen.focus_next(&self.inputs),
            KeyCode::BackTab => self.screen.focus_prev(&self.inputs),

            KeyCode::F(5) => {
                self.source.reload();
                self.set_status("Reloading catalog...");
            }

            _ => {}
        }
    }

    /// Handles keys while the search bar has focus.
    fn handle_search_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return;
        }

        match key.code {
            KeyCode::Esc => {
                if self.screen.search().is_empty() {
                    self.screen.set_focus(AddonsFocus::List);
                } else {
                    self.screen.search_clear();
                }
            }
            KeyCode::Enter | KeyCode::Down => self.screen.set_focus(AddonsFocus::List),
            KeyCode::Tab => self.screen.focus_next(&self.inputs),
            KeyCode::BackTab => self.screen.focus_prev(&self.inputs),
            KeyCode::Backspace => self.screen.search_backspace(),
            KeyCode::Char(c) => self.screen.search_insert_char(c),
            _ => {}
        }
    }

    /// Handles keys while a select input has focus.
    fn handle_select_key(&mut self, key: KeyEvent, index: usize) {
        let option_count = self.inputs.get(index).map_or(0, |input| input.options.len());

        match key.code {
            KeyCode::Left | KeyCode::Up | KeyCode::Char('h' | 'k') => {
                self.screen.select_cursor_prev(option_count);
            }
            KeyCode::Right | KeyCode::Down | KeyCode::Char('l' | 'j') => {
                self.screen.select_cursor_next(option_count);
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(hash) = self.screen.apply_select(&self.inputs) {
                    self.navigate(&hash);
                }
            }
            KeyCode::Esc => self.screen.set_focus(AddonsFocus::List),
            KeyCode::Tab => self.screen.focus_next(&self.inputs),
            KeyCode::BackTab => self.screen.focus_prev(&self.inputs),
            KeyCode::Char('q') => self.quit(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::addons::{
        Addon, AddonsModel, AddonsSource, CatalogResource, Manifest, ResourceContent,
        ResourceRequest,
    };
    use crate::route::UrlParams;

    const CATALOG: &str = "https://cat.example.com/manifest.json";

    struct FixedSource {
        model: AddonsModel,
    }

    impl AddonsSource for FixedSource {
        fn load(&mut self, params: &UrlParams) {
            if let Some(resource) = self.model.catalog_resource.as_mut() {
                if let Some(request) = params.request() {
                    resource.request = request;
                }
            }
        }
        fn poll(&mut self) -> bool {
            false
        }
        fn reload(&mut self) {}
        fn model(&self) -> &AddonsModel {
            &self.model
        }
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app_with_addons() -> App {
        let request = ResourceRequest::addon_catalog(CATALOG, "all", "movie");
        let hash = crate::route::catalog_hash(&request);
        let addons = ["Alpha", "Beta"]
            .iter()
            .map(|name| {
                Addon::new(
                    Manifest {
                        name: (*name).to_string(),
                        ..Manifest::default()
                    },
                    format!("https://{}.example.com/manifest.json", name.to_lowercase()),
                )
            })
            .collect();
        let source = FixedSource {
            model: AddonsModel {
                catalog_resource: Some(CatalogResource {
                    request,
                    content: ResourceContent::Ready(addons),
                }),
                ..AddonsModel::default()
            },
        };
        App::with_source(Box::new(source), &hash)
    }

    #[test]
    fn test_toggle_navigates_to_details() {
        let mut app = app_with_addons();
        app.handle_key(press(KeyCode::Char('j')));
        app.handle_key(press(KeyCode::Enter));
        assert_eq!(
            app.route().addon(),
            Some("https://beta.example.com/manifest.json")
        );
        assert_eq!(app.route().url_params.catalog_id.as_deref(), Some("all"));
    }

    #[test]
    fn test_add_addon_submit() {
        let mut app = app_with_addons();
        app.handle_key(press(KeyCode::Char('+')));
        assert!(app.screen().is_add_addon_open());

        for c in "https://new.example.com/manifest.json".chars() {
            app.handle_key(press(KeyCode::Char(c)));
        }
        app.handle_key(press(KeyCode::Enter));

        assert!(!app.screen().is_add_addon_open());
        assert_eq!(
            app.route().addon(),
            Some("https://new.example.com/manifest.json")
        );
    }

    #[test]
    fn test_paste_long_url_into_add_addon() {
        let mut app = app_with_addons();
        let url = format!("https://cfg.example.com/{}/manifest.json", "k".repeat(4000));
        app.clipboard().copy(&url).expect("copy");

        app.handle_key(press(KeyCode::Char('+')));
        app.handle_key(KeyEvent::new(KeyCode::Char('v'), KeyModifiers::CONTROL));
        assert_eq!(app.screen().add_addon_url().value(), url);
        assert!(app.status().is_empty());

        app.handle_key(press(KeyCode::Enter));
        assert_eq!(app.route().addon(), Some(url.as_str()));
    }

    #[test]
    fn test_oversized_paste_sets_status() {
        let mut app = app_with_addons();
        app.clipboard().copy(&"z".repeat(MAX_INPUT_LEN + 1)).expect("copy");

        app.handle_key(press(KeyCode::Char('+')));
        app.handle_key(KeyEvent::new(KeyCode::Char('v'), KeyModifiers::CONTROL));
        assert_eq!(app.screen().add_addon_url().value().len(), MAX_INPUT_LEN);
        assert!(app.status().contains("clipped"));
    }

    #[test]
    fn test_add_addon_cancel_button() {
        let mut app = app_with_addons();
        app.handle_key(press(KeyCode::Char('a')));
        app.handle_key(press(KeyCode::Tab));
        app.handle_key(press(KeyCode::Enter));
        assert!(!app.screen().is_add_addon_open());
        assert!(app.route().addon().is_none());
    }

    #[test]
    fn test_share_and_copy() {
        let mut app = app_with_addons();
        app.handle_key(press(KeyCode::Char('s')));
        assert_eq!(
            app.screen().shared_transport_url(),
            Some("https://alpha.example.com/manifest.json")
        );

        app.handle_key(press(KeyCode::Char('c')));
        assert!(app.status().starts_with("Copied"));
        assert!(app.clipboard().has_content());

        app.handle_key(press(KeyCode::Esc));
        assert!(app.screen().shared_transport_url().is_none());
        assert!(app.is_running());
    }

    #[test]
    fn test_search_typing_filters() {
        let mut app = app_with_addons();
        app.handle_key(press(KeyCode::Char('/')));
        app.handle_key(press(KeyCode::Char('b')));
        assert_eq!(app.screen().search(), "b");
        assert_eq!(app.screen().filtered_addons(app.source().model()).len(), 1);

        app.handle_key(press(KeyCode::Esc));
        assert_eq!(app.screen().search(), "");
        app.handle_key(press(KeyCode::Esc));
        assert_eq!(app.screen().focus(), AddonsFocus::List);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app_with_addons();
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!app.is_running());

        let mut app = app_with_addons();
        app.handle_key(press(KeyCode::Char('q')));
        assert!(!app.is_running());
    }
}
