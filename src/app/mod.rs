//! Main application state and event handling.
//!
//! Owns the location hash, the addons source and the screen state, and
//! wires crossterm events to them.

mod input;

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event};
use ratatui::widgets::Clear;
use tracing::{info, warn};

use crate::addons::{AddonsEngine, AddonsSource, SelectInput, selectable_inputs};
use crate::clipboard::Clipboard;
use crate::config::Config;
use crate::route::{ADDONS_HASH, Route};
use crate::ui::addons_view::{AddonsScreen, AddonsWidget};

/// Event poll timeout in milliseconds.
const POLL_TIMEOUT_MS: u64 = 50;

/// Main application.
pub struct App {
    /// Provider of the addons model.
    source: Box<dyn AddonsSource>,
    /// Local screen state.
    screen: AddonsScreen,
    /// Current parsed route.
    route: Route,
    /// Current location hash.
    hash: String,
    /// Select inputs derived from the current model.
    inputs: Vec<SelectInput>,
    /// Clipboard for the share prompt.
    clipboard: Clipboard,
    /// Status line text.
    status: String,
    /// Whether the app should keep running.
    running: bool,
}

impl App {
    /// Creates the application backed by the configured catalogs.
    #[must_use]
    pub fn new(config: &Config, initial_hash: &str) -> Self {
        let engine = AddonsEngine::new(
            config.catalogs.clone(),
            config.installed.iter().cloned(),
            config.request_timeout,
        );
        info!(
            "[APP] Starting with {} catalog(s), {} installed addon(s)",
            config.catalogs.len(),
            config.installed.len()
        );
        Self::with_source(Box::new(engine), initial_hash)
    }

    /// Creates the application with a custom addons source.
    #[must_use]
    pub fn with_source(source: Box<dyn AddonsSource>, initial_hash: &str) -> Self {
        let mut app = Self {
            source,
            screen: AddonsScreen::new(),
            route: Route::default(),
            hash: ADDONS_HASH.to_string(),
            inputs: Vec::new(),
            clipboard: Clipboard::new(),
            status: String::new(),
            running: true,
        };

        let route = app.parse_route(initial_hash);
        app.commit(route);
        app.source.load(&app.route.url_params);
        app.refresh_inputs();
        app
    }

    /// Returns true if the app is still running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Stops the main loop.
    pub fn quit(&mut self) {
        info!("[APP] Quit requested");
        self.running = false;
    }

    /// Returns the current location hash.
    #[must_use]
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Returns the current route.
    #[must_use]
    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Returns the screen state.
    #[must_use]
    pub fn screen(&self) -> &AddonsScreen {
        &self.screen
    }

    /// Returns the addons source.
    #[must_use]
    pub fn source(&self) -> &dyn AddonsSource {
        self.source.as_ref()
    }

    /// Returns the current select inputs.
    #[must_use]
    pub fn inputs(&self) -> &[SelectInput] {
        &self.inputs
    }

    /// Returns the clipboard.
    #[must_use]
    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    /// Returns the status line text.
    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Sets the status line text.
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status = msg.into();
    }

    /// Replaces the location hash.
    ///
    /// When the path or query parameters change, the screen state is reset
    /// and the source is pointed at the new catalog before the next draw.
    pub fn navigate(&mut self, hash: &str) {
        let route = self.parse_route(hash);
        let params_changed = route.url_params != self.route.url_params
            || route.query_params != self.route.query_params;

        info!("[APP] Navigate: {}", route);
        self.commit(route);

        if params_changed {
            self.screen.reset();
            self.source.load(&self.route.url_params);
            self.refresh_inputs();
        }
    }

    /// Parses a hash, falling back to the bare addons route.
    fn parse_route(&self, hash: &str) -> Route {
        Route::parse(hash).unwrap_or_else(|e| {
            warn!("[APP] {}; falling back to {}", e, ADDONS_HASH);
            Route::default()
        })
    }

    /// Stores a route as the current location.
    fn commit(&mut self, route: Route) {
        self.hash = route.to_hash();
        self.status = match route.addon() {
            Some(url) => format!("Addon details: {}", url),
            None => String::new(),
        };
        self.route = route;
    }

    /// Recomputes the select inputs from the model.
    fn refresh_inputs(&mut self) {
        self.inputs = selectable_inputs(self.source.model());
    }

    /// Applies pending source results. Returns true if the model changed.
    pub fn poll_source(&mut self) -> bool {
        let changed = self.source.poll();
        if changed {
            self.screen.clamp_selection(self.source.model());
            self.refresh_inputs();
        }
        changed
    }

    /// Processes pending events and background results.
    ///
    /// # Errors
    /// Returns error if reading terminal events fails.
    pub fn update(&mut self) -> io::Result<()> {
        self.poll_source();

        if event::poll(Duration::from_millis(POLL_TIMEOUT_MS))? {
            if let Event::Key(key) = event::read()? {
                self.handle_key(key);
            }
        }

        Ok(())
    }

    /// Renders the application.
    pub fn render(&self, frame: &mut ratatui::Frame) {
        let area = frame.area();
        frame.render_widget(Clear, area);

        let widget = AddonsWidget::new(&self.screen, self.source.model(), &self.inputs)
            .status(&self.status);
        frame.render_widget(widget, area);
    }

    /// Shuts down the application.
    pub fn shutdown(&mut self) {
        info!("[APP] Shutdown at {}", self.hash);
        self.running = false;
    }
}
