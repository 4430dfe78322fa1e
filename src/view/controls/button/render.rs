//! Button rendering

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::{ButtonColors, ButtonLayout, ButtonState, FocusState};

/// Render a button at the left edge of `area`
///
/// # Arguments
/// * `frame` - The ratatui frame to render to
/// * `area` - Rectangle where the button should be rendered
/// * `state` - The button state
/// * `colors` - Colors for rendering
///
/// # Returns
/// Layout information for hit testing
pub fn render_button(
    frame: &mut Frame,
    area: Rect,
    state: &ButtonState,
    colors: &ButtonColors,
) -> ButtonLayout {
    if area.height == 0 || area.width < 4 {
        return ButtonLayout::default();
    }

    let (text_color, border_color) = match state.focus {
        FocusState::Normal => (colors.text, colors.border),
        FocusState::Focused => (colors.focused, colors.focused),
        FocusState::Hovered => (colors.hovered, colors.hovered),
        FocusState::Disabled => (colors.disabled, colors.disabled),
    };

    // "[ " + label + " ]"
    let width = (state.label.chars().count() + 4) as u16;
    let width = width.min(area.width);
    let label: String = state.label.chars().take(width as usize - 4).collect();

    let mut style = Style::default().fg(text_color);
    if state.pressed {
        style = style.bg(colors.pressed_bg);
    }
    if state.is_enabled() {
        style = style.add_modifier(Modifier::BOLD);
    }

    let line = Line::from(vec![
        Span::styled("[ ", Style::default().fg(border_color)),
        Span::styled(label, style),
        Span::styled(" ]", Style::default().fg(border_color)),
    ]);

    let button_area = Rect::new(area.x, area.y, width, 1);
    frame.render_widget(Paragraph::new(line), button_area);

    ButtonLayout { button_area }
}
