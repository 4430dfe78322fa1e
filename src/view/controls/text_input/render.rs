//! Text input rendering

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::{FocusState, TextInputColors, TextInputState};

/// Render a text input into `area` (one row).
///
/// When the input is focused the terminal cursor is placed at the edit
/// position. Returns the area of the editable text between the brackets.
pub fn render_text_input(
    frame: &mut Frame,
    area: Rect,
    state: &TextInputState,
    colors: &TextInputColors,
) -> Rect {
    if area.width < 3 || area.height == 0 {
        return Rect::default();
    }

    let inner_width = (area.width - 2) as usize;
    let text_area = Rect::new(area.x + 1, area.y, area.width - 2, 1);

    let bracket_style = match state.focus {
        FocusState::Focused => Style::default().fg(colors.focused),
        FocusState::Disabled => Style::default().fg(colors.disabled),
        _ => Style::default().fg(colors.border),
    };

    let (body, cursor_col) = if state.value.is_empty() {
        let placeholder: String = fit_to_width(&state.placeholder, inner_width);
        (
            Span::styled(
                pad_to_width(&placeholder, inner_width),
                Style::default()
                    .fg(colors.placeholder)
                    .add_modifier(Modifier::ITALIC),
            ),
            0,
        )
    } else {
        let (visible, cursor_col) = visible_window(&state.value, state.cursor, inner_width);
        let text_style = if state.is_enabled() {
            Style::default().fg(colors.text)
        } else {
            Style::default().fg(colors.disabled)
        };
        (
            Span::styled(pad_to_width(&visible, inner_width), text_style),
            cursor_col,
        )
    };

    let line = Line::from(vec![
        Span::styled("[", bracket_style),
        body,
        Span::styled("]", bracket_style),
    ]);
    frame.render_widget(Paragraph::new(line), Rect::new(area.x, area.y, area.width, 1));

    if state.focus == FocusState::Focused {
        let x = text_area.x + (cursor_col as u16).min(text_area.width.saturating_sub(1));
        frame.set_cursor_position((x, text_area.y));
    }

    text_area
}

/// Slice of `value` that keeps the cursor visible, plus the cursor column
fn visible_window(value: &str, cursor: usize, width: usize) -> (String, usize) {
    let before = &value[..cursor];
    let mut cursor_col = before.width();
    let mut start = 0;

    // Drop leading characters until the cursor fits (leaving a cell for it)
    let mut chars = value.char_indices();
    while cursor_col >= width && width > 0 {
        match chars.next() {
            Some((_, c)) => {
                cursor_col -= c.width().unwrap_or(0);
                start += c.len_utf8();
            }
            None => break,
        }
    }

    (fit_to_width(&value[start..], width), cursor_col)
}

fn fit_to_width(text: &str, width: usize) -> String {
    let mut used = 0;
    text.chars()
        .take_while(|c| {
            used += c.width().unwrap_or(0);
            used <= width
        })
        .collect()
}

fn pad_to_width(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(pad))
}
