//! Addons screen render helpers.
//!
//! Rendering functions for the navigation bar, toolbar, addon list and
//! the two modal dialogs.

use super::state::AddonsScreen;
use super::types::{AddAddonFocus, AddonCard, AddonsFocus, CARD_HEIGHT};
use crate::addons::{AddonsModel, SelectInput};
use crate::ui::text_input::TextInput;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Width of the "Add addon" button.
const ADD_BUTTON_WIDTH: u16 = 15;

/// Width of a select control.
const SELECT_WIDTH: u16 = 24;

/// Renders the navigation bar.
pub fn render_nav_bar(area: Rect, buf: &mut Buffer, bg_color: Color) {
    let line = Line::from(vec![
        Span::styled(" \u{2190} ", Style::default().fg(Color::DarkGray).bg(bg_color)),
        Span::styled(
            "Addons",
            Style::default()
                .fg(Color::Cyan)
                .bg(bg_color)
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    Paragraph::new(line)
        .style(Style::default().bg(bg_color))
        .render(area, buf);
}

/// Renders the toolbar: add button, select inputs and search bar.
pub fn render_toolbar(
    screen: &AddonsScreen,
    inputs: &[SelectInput],
    area: Rect,
    buf: &mut Buffer,
    bg_color: Color,
) {
    let mut constraints = vec![Constraint::Length(ADD_BUTTON_WIDTH)];
    constraints.extend(inputs.iter().map(|_| Constraint::Length(SELECT_WIDTH)));
    constraints.push(Constraint::Min(10));

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    render_add_button(chunks[0], buf, bg_color);

    for (i, input) in inputs.iter().enumerate() {
        let focused = screen.focus() == AddonsFocus::Select(i);
        render_select_input(input, focused, screen.select_cursor(), chunks[i + 1], buf, bg_color);
    }

    let focused = screen.focus() == AddonsFocus::Search;
    render_search_bar(screen.search_input(), focused, chunks[inputs.len() + 1], buf, bg_color);
}

/// Renders the "Add addon" button.
fn render_add_button(area: Rect, buf: &mut Buffer, bg_color: Color) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green).bg(bg_color));
    let inner = block.inner(area);
    block.render(area, buf);

    Paragraph::new(Span::styled(
        "+ Add addon",
        Style::default().fg(Color::Green).bg(bg_color),
    ))
    .render(inner, buf);
}

/// Renders a collapsed select control, or its option picker when focused.
fn render_select_input(
    input: &SelectInput,
    focused: bool,
    cursor: usize,
    area: Rect,
    buf: &mut Buffer,
    bg_color: Color,
) {
    let border_color = if focused { Color::Cyan } else { Color::DarkGray };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(input.title)
        .border_style(Style::default().fg(border_color).bg(bg_color));
    let inner = block.inner(area);
    block.render(area, buf);

    let max_width = inner.width.saturating_sub(4) as usize;
    let line = if focused && !input.options.is_empty() {
        let label = input
            .options
            .get(cursor)
            .map_or(input.title, |o| o.label.as_str());
        Line::from(vec![
            Span::styled("\u{25c2} ", Style::default().fg(Color::Cyan).bg(bg_color)),
            Span::styled(
                truncate_to_width(label, max_width),
                Style::default()
                    .fg(Color::White)
                    .bg(bg_color)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" \u{25b8}", Style::default().fg(Color::Cyan).bg(bg_color)),
        ])
    } else {
        let fg = if input.selected.is_empty() {
            Color::DarkGray
        } else {
            Color::White
        };
        Line::from(vec![
            Span::styled("\u{25be} ", Style::default().fg(Color::DarkGray).bg(bg_color)),
            Span::styled(
                truncate_to_width(input.label(), max_width),
                Style::default().fg(fg).bg(bg_color),
            ),
        ])
    };

    Paragraph::new(line).render(inner, buf);
}

/// Renders the search bar.
fn render_search_bar(
    input: &TextInput,
    focused: bool,
    area: Rect,
    buf: &mut Buffer,
    bg_color: Color,
) {
    let border_color = if focused { Color::Yellow } else { Color::DarkGray };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color).bg(bg_color));
    let inner = block.inner(area);
    block.render(area, buf);

    let max_width = inner.width.saturating_sub(4) as usize;
    let line = text_input_line(input, focused, max_width, bg_color, "/ ");
    Paragraph::new(line).render(inner, buf);
}

/// Builds a one-line rendering of a text input.
fn text_input_line<'a>(
    input: &'a TextInput,
    focused: bool,
    max_width: usize,
    bg_color: Color,
    prefix: &'a str,
) -> Line<'a> {
    let mut spans = vec![Span::styled(
        prefix,
        Style::default().fg(Color::Yellow).bg(bg_color),
    )];

    if input.is_empty() {
        if focused {
            spans.push(Span::styled("_", Style::default().fg(Color::Yellow).bg(bg_color)));
        }
        spans.push(Span::styled(
            input.placeholder(),
            Style::default().fg(Color::DarkGray).bg(bg_color),
        ));
    } else if !focused {
        spans.push(Span::styled(
            truncate_tail_to_width(input.value(), max_width),
            Style::default().fg(Color::White).bg(bg_color),
        ));
    } else {
        let text_style = Style::default().fg(Color::White).bg(bg_color);
        let cursor_style = Style::default().fg(Color::Black).bg(Color::Yellow);
        let (before, rest) = input.value().split_at(input.cursor());
        let mut after = rest.chars();
        let under_cursor = after
            .next()
            .map_or_else(|| "_".to_string(), |c| c.to_string());

        // Keep the cursor visible; text before it gives way first
        let room = max_width.saturating_sub(under_cursor.width());
        let head = if room == 0 {
            String::new()
        } else {
            truncate_tail_to_width(before, room)
        };
        let tail_room = room.saturating_sub(head.width());

        spans.push(Span::styled(head, text_style));
        spans.push(Span::styled(under_cursor, cursor_style));
        if tail_room > 0 && !after.as_str().is_empty() {
            spans.push(Span::styled(
                truncate_to_width(after.as_str(), tail_room),
                text_style,
            ));
        }
    }

    Line::from(spans)
}

/// Renders a centered status message in the content area.
pub fn render_message(message: &str, area: Rect, buf: &mut Buffer, bg_color: Color) {
    let y = area.y + area.height / 2;
    let width = message.width() as u16;
    let x = area.x + area.width.saturating_sub(width) / 2;
    let message_area = Rect::new(x, y, width.min(area.width), 1);

    Paragraph::new(message)
        .style(Style::default().fg(Color::Gray).bg(bg_color))
        .render(message_area, buf);
}

/// Renders the filtered addon list.
pub fn render_addon_list(
    screen: &AddonsScreen,
    model: &AddonsModel,
    area: Rect,
    buf: &mut Buffer,
    bg_color: Color,
) {
    let filtered_count = screen.filtered_addons(model).len();
    let list_focused = screen.focus() == AddonsFocus::List;
    screen.fit_to_rows((area.height / CARD_HEIGHT) as usize);

    let mut y = area.y;
    for (idx, addon) in screen.visible_addons(model) {
        if y + CARD_HEIGHT > area.bottom() {
            break;
        }

        let card = AddonCard::new(addon);
        let highlighted = list_focused && screen.is_selected(idx);

        let style = if highlighted {
            Style::default().bg(Color::Blue).fg(Color::White)
        } else {
            Style::default().fg(Color::White).bg(bg_color)
        };
        let dim = if highlighted {
            style
        } else {
            Style::default().fg(Color::DarkGray).bg(bg_color)
        };
        let indicator_color = if addon.installed { Color::Green } else { Color::Gray };

        // Actions are right-aligned
        let actions = format!(" [{}] [Share] ", card.toggle_label());
        let actions_width = actions.width();
        let left_width = (area.width as usize).saturating_sub(actions_width + 1);

        let header = format!(
            " {} {}  {}  {}",
            card.status_indicator(),
            addon.name(),
            card.version_label(),
            card.types_label()
        );
        let header = pad_to_width(&truncate_to_width(&header, left_width), left_width);

        let line1 = Line::from(vec![
            Span::styled(header, style.fg(indicator_color).add_modifier(Modifier::BOLD)),
            Span::styled(
                actions,
                if addon.installed {
                    style.fg(Color::Red)
                } else {
                    style.fg(Color::Green)
                },
            ),
        ]);
        let description = format!("     {}", card.description());
        let line2 = Line::from(Span::styled(
            pad_to_width(
                &truncate_to_width(&description, area.width.saturating_sub(1) as usize),
                area.width.saturating_sub(1) as usize,
            ),
            dim,
        ));

        Paragraph::new(vec![line1, line2]).render(Rect::new(area.x, y, area.width, CARD_HEIGHT), buf);
        y += CARD_HEIGHT;
    }

    if filtered_count > screen.page_size() {
        render_scrollbar(screen.selected_index(), filtered_count, area, buf);
    }
}

/// Renders a simple scrollbar indicator.
fn render_scrollbar(selected: usize, total: usize, area: Rect, buf: &mut Buffer) {
    let scroll_height = area.height as usize;
    if scroll_height == 0 || total == 0 {
        return;
    }
    let thumb_pos = ((selected * scroll_height) / total).min(scroll_height - 1);

    let x = area.right().saturating_sub(1);

    for (i, y) in (area.y..area.bottom()).enumerate() {
        if let Some(cell) = buf.cell_mut((x, y)) {
            let symbol = if i == thumb_pos { "\u{2588}" } else { "\u{2502}" };
            cell.set_symbol(symbol);
            cell.set_fg(Color::DarkGray);
        }
    }
}

/// Calculates a centered modal area.
pub fn modal_area(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// Clears an area and draws a titled modal frame. Returns the inner area.
fn render_modal_frame(
    title: &str,
    border_color: Color,
    area: Rect,
    buf: &mut Buffer,
    bg_color: Color,
) -> Rect {
    Clear.render(area, buf);
    for y in area.y..area.bottom() {
        for x in area.x..area.right() {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_bg(bg_color);
            }
        }
    }

    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color).bg(bg_color));
    let inner = block.inner(area);
    block.render(area, buf);
    inner
}

/// Renders the add-addon modal.
pub fn render_add_addon_modal(screen: &AddonsScreen, area: Rect, buf: &mut Buffer, bg_color: Color) {
    let popup = modal_area(area, (area.width / 10 * 6).clamp(40, 80), 8);
    let inner = render_modal_frame("Add addon", Color::Cyan, popup, buf, bg_color);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // URL field
            Constraint::Min(0),    // Spacer
            Constraint::Length(1), // Buttons
        ])
        .split(inner);

    let focus = screen.add_addon_focus();
    let field_color = if focus == AddAddonFocus::Url {
        Color::Yellow
    } else {
        Color::DarkGray
    };
    let field = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(field_color).bg(bg_color));
    let field_inner = field.inner(chunks[0]);
    field.render(chunks[0], buf);

    let max_width = field_inner.width.saturating_sub(2) as usize;
    let line = text_input_line(
        screen.add_addon_url(),
        focus == AddAddonFocus::Url,
        max_width,
        bg_color,
        "",
    );
    Paragraph::new(line).render(field_inner, buf);

    let button = |label: &'static str, focused: bool, color: Color| {
        let style = if focused {
            Style::default()
                .fg(Color::Black)
                .bg(color)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(color).bg(bg_color)
        };
        Span::styled(format!(" {} ", label), style)
    };

    let buttons = Line::from(vec![
        button("Cancel", focus == AddAddonFocus::Cancel, Color::Gray),
        Span::styled("  ", Style::default().bg(bg_color)),
        button("Add", focus == AddAddonFocus::Add, Color::Green),
    ]);
    Paragraph::new(buttons)
        .alignment(ratatui::layout::Alignment::Right)
        .render(chunks[2], buf);
}

/// Renders the share modal.
pub fn render_share_modal(url: &str, area: Rect, buf: &mut Buffer, bg_color: Color) {
    let popup = modal_area(area, (area.width / 10 * 7).clamp(40, 100), 8);
    let inner = render_modal_frame("Share addon", Color::Magenta, popup, buf, bg_color);

    let max_width = inner.width.saturating_sub(2) as usize;
    let lines = vec![
        Line::from(Span::styled(
            "Share this addon with your friends:",
            Style::default().fg(Color::Gray).bg(bg_color),
        )),
        Line::from(""),
        Line::from(Span::styled(
            truncate_to_width(url, max_width),
            Style::default()
                .fg(Color::White)
                .bg(bg_color)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "[c] Copy  [Esc] Close",
            Style::default().fg(Color::DarkGray).bg(bg_color),
        )),
    ];

    Paragraph::new(lines)
        .style(Style::default().bg(bg_color))
        .render(
            Rect::new(
                inner.x + 1,
                inner.y,
                inner.width.saturating_sub(2),
                inner.height,
            ),
            buf,
        );
}

/// Truncates text to a display width, adding an ellipsis when cut.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut width = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > max_width - 1 {
            break;
        }
        out.push(c);
        width += w;
    }
    out.push('\u{2026}');
    out
}

/// Keeps the end of the text within a display width (for inputs being typed).
fn truncate_tail_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width || max_width == 0 {
        return text.to_string();
    }

    let mut kept: Vec<char> = Vec::new();
    let mut width = 0;
    for c in text.chars().rev() {
        let w = c.width().unwrap_or(0);
        if width + w > max_width - 1 {
            break;
        }
        kept.push(c);
        width += w;
    }
    std::iter::once('\u{2026}').chain(kept.into_iter().rev()).collect()
}

/// Pads text with spaces up to a display width.
fn pad_to_width(text: &str, width: usize) -> String {
    let current = text.width();
    if current >= width {
        return text.to_string();
    }
    format!("{}{}", text, " ".repeat(width - current))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("Short", 20), "Short");
        assert_eq!(truncate_to_width("OpenSubtitles", 5), "Open\u{2026}");
        assert_eq!(truncate_to_width("anything", 0), "");
    }

    #[test]
    fn test_truncate_wide_chars() {
        let out = truncate_to_width("日本語の字幕", 5);
        assert!(out.width() <= 5);
        assert!(out.ends_with('\u{2026}'));
    }

    #[test]
    fn test_truncate_tail() {
        assert_eq!(truncate_tail_to_width("abcdef", 4), "\u{2026}def");
        assert_eq!(truncate_tail_to_width("abc", 4), "abc");
    }

    #[test]
    fn test_modal_area_centered() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = modal_area(area, 50, 10);
        assert_eq!(popup, Rect::new(25, 15, 50, 10));

        let small = modal_area(Rect::new(0, 0, 30, 5), 50, 10);
        assert_eq!(small, Rect::new(0, 0, 30, 5));
    }

    fn span_texts(line: &Line<'_>) -> Vec<String> {
        line.spans.iter().map(|s| s.content.to_string()).collect()
    }

    #[test]
    fn test_cursor_drawn_at_cursor_position() {
        let mut input = TextInput::default();
        input.set_value("abcdef");
        input.move_left();
        input.move_left();

        let line = text_input_line(&input, true, 40, Color::Black, "");
        assert_eq!(span_texts(&line), vec!["", "abcd", "e", "f"]);
        assert_eq!(line.spans[2].style.bg, Some(Color::Yellow));

        input.move_to_end();
        let line = text_input_line(&input, true, 40, Color::Black, "");
        assert_eq!(span_texts(&line), vec!["", "abcdef", "_"]);

        let line = text_input_line(&input, false, 40, Color::Black, "");
        assert_eq!(span_texts(&line), vec!["", "abcdef"]);
    }

    #[test]
    fn test_cursor_stays_visible_in_long_value() {
        let mut input = TextInput::default();
        input.set_value("x".repeat(50));
        input.move_to_start();
        input.move_right();

        let line = text_input_line(&input, true, 10, Color::Black, "");
        let total: usize = line.spans.iter().map(|s| s.content.width()).sum();
        assert!(total <= 10, "line is {} cells wide", total);
        assert_eq!(line.spans[1].content, "x");
        assert_eq!(line.spans[2].content, "x");
        assert_eq!(line.spans[2].style.bg, Some(Color::Yellow));
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf.cell((x, y)).map_or(" ", |c| c.symbol()))
            .collect()
    }

    #[test]
    fn test_modals_on_very_wide_terminal() {
        let area = Rect::new(0, 0, 2000, 12);

        let mut buf = Buffer::empty(area);
        let mut screen = AddonsScreen::new();
        screen.open_add_addon();
        render_add_addon_modal(&screen, area, &mut buf, Color::Black);
        let popup = modal_area(area, 80, 8);
        assert!(row_text(&buf, popup.y).contains("Add addon"));
        assert_eq!(buf.cell((popup.x, popup.y)).map(|c| c.symbol()), Some("┌"));

        let mut buf = Buffer::empty(area);
        render_share_modal("https://sub.example.com/manifest.json", area, &mut buf, Color::Black);
        let popup = modal_area(area, 100, 8);
        assert!(row_text(&buf, popup.y).contains("Share addon"));
        assert_eq!(buf.cell((popup.x, popup.y)).map(|c| c.symbol()), Some("┌"));
    }
}
