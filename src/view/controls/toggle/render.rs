//! Toggle rendering

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use super::{FocusState, ToggleColors, ToggleLayout, ToggleState};

/// Render a toggle control
///
/// # Arguments
/// * `frame` - The ratatui frame to render to
/// * `area` - Rectangle where the toggle should be rendered
/// * `state` - The toggle state
/// * `colors` - Colors for rendering
///
/// # Returns
/// Layout information for hit testing
pub fn render_toggle(
    frame: &mut Frame,
    area: Rect,
    state: &ToggleState,
    colors: &ToggleColors,
) -> ToggleLayout {
    if area.height == 0 || area.width < 4 {
        return ToggleLayout {
            checkbox_area: Rect::default(),
            full_area: area,
        };
    }

    let (bracket_color, check_color, label_color) = match state.focus {
        FocusState::Normal => (colors.bracket, colors.checkmark, colors.label),
        FocusState::Focused | FocusState::Hovered => {
            (colors.focused, colors.checkmark, colors.focused)
        }
        FocusState::Disabled => (colors.disabled, colors.disabled, colors.disabled),
    };
    let mut label_style = Style::default().fg(label_color);
    if state.focus == FocusState::Focused {
        label_style = label_style.add_modifier(Modifier::BOLD);
    }

    let mark = if state.checked { "x" } else { " " };
    let line = Line::from(vec![
        Span::styled(state.label.as_str(), label_style),
        Span::styled(": ", label_style),
        Span::styled("[", Style::default().fg(bracket_color)),
        Span::styled(mark, Style::default().fg(check_color)),
        Span::styled("]", Style::default().fg(bracket_color)),
    ]);
    frame.render_widget(Paragraph::new(line), area);

    // Checkbox follows "label: "
    let label_width = state.label.width() as u16;
    let checkbox_x = area.x + (label_width + 2).min(area.width);
    let checkbox_area = Rect::new(
        checkbox_x,
        area.y,
        3.min((area.x + area.width).saturating_sub(checkbox_x)),
        1,
    );
    let full_area = Rect::new(area.x, area.y, (label_width + 5).min(area.width), 1);

    ToggleLayout {
        checkbox_area,
        full_area,
    }
}
