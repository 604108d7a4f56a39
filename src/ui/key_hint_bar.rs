//! Key hint bar widget.
//!
//! Renders styled key badges with descriptions at the bottom of the addons
//! screen. Hints that do not fit are dropped behind a `…+N` indicator.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

/// Divider between hints.
const DIVIDER: &str = " \u{2502} ";

/// Bar background.
const BAR_BG: Color = Color::Black;

/// Style variant for a key hint badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyHintStyle {
    /// Default gray badge.
    #[default]
    Normal,
    /// Cyan badge for primary actions.
    Highlighted,
    /// Red badge for leaving the screen.
    Danger,
    /// Green badge for confirmation.
    Success,
}

impl KeyHintStyle {
    /// Returns the background color for the key badge.
    #[must_use]
    pub const fn badge_bg(&self) -> Color {
        match self {
            Self::Normal => Color::DarkGray,
            Self::Highlighted => Color::Cyan,
            Self::Danger => Color::Red,
            Self::Success => Color::Green,
        }
    }

    /// Returns the foreground color for the key badge text.
    #[must_use]
    pub const fn badge_fg(&self) -> Color {
        match self {
            Self::Normal | Self::Highlighted | Self::Danger => Color::White,
            Self::Success => Color::Black,
        }
    }
}

/// A single key hint.
#[derive(Debug, Clone)]
pub struct KeyHint<'a> {
    /// Key text (e.g., "Enter").
    pub key: &'a str,
    /// Action description (e.g., "Share").
    pub description: &'a str,
    /// Badge style.
    pub style: KeyHintStyle,
}

impl<'a> KeyHint<'a> {
    /// Creates a new key hint with Normal style.
    #[must_use]
    pub const fn new(key: &'a str, description: &'a str) -> Self {
        Self {
            key,
            description,
            style: KeyHintStyle::Normal,
        }
    }

    /// Creates a new key hint with a specific style.
    #[must_use]
    pub const fn styled(key: &'a str, description: &'a str, style: KeyHintStyle) -> Self {
        Self {
            key,
            description,
            style,
        }
    }

    /// Display width: " key " + " desc".
    fn display_width(&self) -> usize {
        self.key.width() + 2 + self.description.width() + 1
    }

    /// Spans for this hint.
    fn spans(&self) -> [Span<'a>; 3] {
        let badge = Style::default()
            .bg(self.style.badge_bg())
            .fg(self.style.badge_fg())
            .add_modifier(Modifier::BOLD);
        [
            Span::styled(format!(" {} ", self.key), badge),
            Span::styled(" ", Style::default().bg(BAR_BG)),
            Span::styled(self.description, Style::default().fg(Color::Gray).bg(BAR_BG)),
        ]
    }
}

/// Key hint bar widget.
pub struct KeyHintBar<'a> {
    /// Hints to display.
    hints: Vec<KeyHint<'a>>,
}

impl<'a> KeyHintBar<'a> {
    /// Creates a new key hint bar with the given hints.
    #[must_use]
    pub fn new(hints: Vec<KeyHint<'a>>) -> Self {
        Self { hints }
    }

    /// Returns how many hints fit in `available` columns, leaving room for
    /// the overflow indicator when some are dropped.
    fn fitting_count(&self, available: usize) -> usize {
        let widths: Vec<usize> = self
            .hints
            .iter()
            .enumerate()
            .map(|(i, h)| h.display_width() + if i > 0 { DIVIDER.width() } else { 1 })
            .collect();

        let mut total = 0;
        let mut count = 0;
        for w in &widths {
            if total + w > available {
                break;
            }
            total += w;
            count += 1;
        }

        while count > 0 && count < self.hints.len() {
            let indicator = format!(" \u{2026}+{}", self.hints.len() - count);
            if total + indicator.width() <= available {
                break;
            }
            count -= 1;
            total -= widths[count];
        }

        count
    }
}

impl Widget for KeyHintBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let bar_style = Style::default().bg(BAR_BG).fg(Color::DarkGray);
        let count = self.fitting_count(area.width as usize);

        let mut spans = vec![Span::styled(" ", bar_style)];
        for (i, hint) in self.hints.iter().take(count).enumerate() {
            if i > 0 {
                spans.push(Span::styled(DIVIDER, bar_style));
            }
            spans.extend(hint.spans());
        }

        let remaining = self.hints.len() - count;
        if remaining > 0 {
            spans.push(Span::styled(format!(" \u{2026}+{}", remaining), bar_style));
        }

        Paragraph::new(Line::from(spans))
            .style(bar_style)
            .render(Rect::new(area.x, area.y, area.width, 1), buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper: render a KeyHintBar to a buffer and return the text content.
    fn render_to_string(hints: Vec<KeyHint>, width: u16) -> String {
        let area = Rect::new(0, 0, width, 1);
        let mut buf = Buffer::empty(area);
        KeyHintBar::new(hints).render(area, &mut buf);

        (0..width)
            .map(|x| {
                buf.cell((x, 0))
                    .map(|c| c.symbol().chars().next().unwrap_or(' '))
                    .unwrap_or(' ')
            })
            .collect::<String>()
    }

    #[test]
    fn test_key_hint_bar_renders_empty() {
        let content = render_to_string(vec![], 80);
        assert_eq!(content.trim(), "");
    }

    #[test]
    fn test_key_hint_bar_renders_hints() {
        let hints = vec![
            KeyHint::styled("Enter", "Install/Uninstall", KeyHintStyle::Highlighted),
            KeyHint::new("s", "Share"),
        ];
        let content = render_to_string(hints, 80);
        assert!(content.contains("Enter"), "Missing key: '{}'", content);
        assert!(content.contains("Share"), "Missing desc: '{}'", content);
        assert!(content.contains('\u{2502}'), "Missing divider: '{}'", content);
    }

    #[test]
    fn test_key_hint_bar_truncation() {
        let hints = vec![
            KeyHint::new("Enter", "Install/Uninstall"),
            KeyHint::new("s", "Share"),
            KeyHint::new("+", "Add addon"),
            KeyHint::new("/", "Search"),
            KeyHint::new("Tab", "Filters"),
            KeyHint::new("q", "Quit"),
        ];
        let content = render_to_string(hints, 40);
        assert!(
            content.contains('\u{2026}'),
            "Should show truncation indicator: '{}'",
            content
        );
    }

    #[test]
    fn test_key_hint_style_colors() {
        let bgs = [
            KeyHintStyle::Normal.badge_bg(),
            KeyHintStyle::Highlighted.badge_bg(),
            KeyHintStyle::Danger.badge_bg(),
            KeyHintStyle::Success.badge_bg(),
        ];
        for i in 0..bgs.len() {
            for j in (i + 1)..bgs.len() {
                assert_ne!(bgs[i], bgs[j], "Styles {} and {} share bg color", i, j);
            }
        }
    }
}
