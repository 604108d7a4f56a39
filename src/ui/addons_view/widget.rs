//! Addons screen widget.
//!
//! Main widget for rendering the addons screen and its modals.

use super::state::AddonsScreen;
use super::types::{AddonsFocus, ViewState};
use super::widget_render::{
    render_add_addon_modal, render_addon_list, render_message, render_nav_bar,
    render_share_modal, render_toolbar,
};
use crate::addons::{AddonsModel, SelectInput};
use crate::ui::key_hint_bar::{KeyHint, KeyHintBar, KeyHintStyle};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Paragraph, Widget},
};

/// Background color of the screen.
pub const BG_COLOR: Color = Color::Rgb(30, 30, 30);

/// Widget for rendering the addons screen.
pub struct AddonsWidget<'a> {
    /// Local screen state.
    screen: &'a AddonsScreen,
    /// Model from the addons source.
    model: &'a AddonsModel,
    /// Toolbar select inputs.
    inputs: &'a [SelectInput],
    /// Status line text.
    status: &'a str,
}

impl<'a> AddonsWidget<'a> {
    /// Creates a new addons widget.
    #[must_use]
    pub fn new(screen: &'a AddonsScreen, model: &'a AddonsModel, inputs: &'a [SelectInput]) -> Self {
        Self {
            screen,
            model,
            inputs,
            status: "",
        }
    }

    /// Sets the status line text.
    #[must_use]
    pub fn status(mut self, status: &'a str) -> Self {
        self.status = status;
        self
    }

    /// Returns the key hints for the current context.
    fn hints(&self) -> Vec<KeyHint<'static>> {
        if self.screen.shared_transport_url().is_some() {
            return vec![
                KeyHint::styled("c", "Copy", KeyHintStyle::Highlighted),
                KeyHint::new("Esc", "Close"),
            ];
        }
        if self.screen.is_add_addon_open() {
            return vec![
                KeyHint::styled("Enter", "Add", KeyHintStyle::Success),
                KeyHint::new("Tab", "Next"),
                KeyHint::new("Esc", "Cancel"),
            ];
        }

        match self.screen.focus() {
            AddonsFocus::List => vec![
                KeyHint::styled("Enter", "Install/Uninstall", KeyHintStyle::Highlighted),
                KeyHint::new("s", "Share"),
                KeyHint::new("+", "Add addon"),
                KeyHint::new("/", "Search"),
                KeyHint::new("Tab", "Filters"),
                KeyHint::new("F5", "Reload"),
                KeyHint::styled("q", "Quit", KeyHintStyle::Danger),
            ],
            AddonsFocus::Search => vec![
                KeyHint::new("Type", "Search"),
                KeyHint::new("Enter", "Done"),
                KeyHint::new("Esc", "Clear"),
                KeyHint::new("Tab", "Next"),
            ],
            AddonsFocus::Select(_) => vec![
                KeyHint::new("\u{2190}/\u{2192}", "Option"),
                KeyHint::styled("Enter", "Apply", KeyHintStyle::Highlighted),
                KeyHint::new("Tab", "Next"),
                KeyHint::new("Esc", "Back"),
            ],
        }
    }
}

impl Widget for AddonsWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Fill background
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_char(' ');
                    cell.set_bg(BG_COLOR);
                }
            }
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Navigation bar
                Constraint::Length(3), // Toolbar
                Constraint::Min(2),    // Content
                Constraint::Length(1), // Status
                Constraint::Length(1), // Key hints
            ])
            .split(area);

        render_nav_bar(chunks[0], buf, BG_COLOR);
        render_toolbar(self.screen, self.inputs, chunks[1], buf, BG_COLOR);

        let view_state = self.screen.view_state(self.model);
        match view_state.message() {
            Some(message) => render_message(message, chunks[2], buf, BG_COLOR),
            None => render_addon_list(self.screen, self.model, chunks[2], buf, BG_COLOR),
        }

        if !self.status.is_empty() {
            Paragraph::new(format!(" {}", self.status))
                .style(Style::default().fg(Color::Gray).bg(BG_COLOR))
                .render(chunks[3], buf);
        }

        KeyHintBar::new(self.hints()).render(chunks[4], buf);

        if self.screen.is_add_addon_open() {
            render_add_addon_modal(self.screen, area, buf, BG_COLOR);
        }
        if let Some(url) = self.screen.shared_transport_url() {
            render_share_modal(url, area, buf, BG_COLOR);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hints_follow_modal() {
        let model = AddonsModel::default();
        let mut screen = AddonsScreen::new();
        screen.open_add_addon();
        let widget = AddonsWidget::new(&screen, &model, &[]);
        assert!(widget.hints().iter().any(|h| h.description == "Add"));

        let mut screen = AddonsScreen::new();
        screen.share("https://x/manifest.json");
        let widget = AddonsWidget::new(&screen, &model, &[]);
        assert!(widget.hints().iter().any(|h| h.description == "Copy"));
    }

    #[test]
    fn test_hints_list_focus() {
        let model = AddonsModel::default();
        let screen = AddonsScreen::new();
        let widget = AddonsWidget::new(&screen, &model, &[]);
        assert!(widget.hints().iter().any(|h| h.key == "/"));
    }
}
