//! Modal message dialog
//!
//! A centred box with a message and a single OK button. While open it
//! swallows all input of the view that owns it.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

const OK_LABEL: &str = "[ OK ]";

/// State of the message dialog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageDialogState {
    message: Option<String>,
}

impl MessageDialogState {
    /// Open the dialog with `text`, replacing any message already shown
    pub fn show(&mut self, text: impl Into<String>) {
        self.message = Some(text.into());
    }

    pub fn dismiss(&mut self) {
        self.message = None;
    }

    pub fn is_open(&self) -> bool {
        self.message.is_some()
    }

    pub fn text(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// Colors for the message dialog
#[derive(Debug, Clone, Copy)]
pub struct MessageDialogColors {
    pub border: Color,
    pub text: Color,
    pub background: Color,
    pub button: Color,
}

impl Default for MessageDialogColors {
    fn default() -> Self {
        Self {
            border: Color::Yellow,
            text: Color::White,
            background: Color::Black,
            button: Color::Cyan,
        }
    }
}

/// Clamp a rectangle to fit within bounds
fn clamp_rect_to_bounds(rect: Rect, bounds: Rect) -> Rect {
    let x = rect.x.min(bounds.x + bounds.width.saturating_sub(1));
    let y = rect.y.min(bounds.y + bounds.height.saturating_sub(1));
    let max_width = (bounds.x + bounds.width).saturating_sub(x);
    let max_height = (bounds.y + bounds.height).saturating_sub(y);

    Rect {
        x,
        y,
        width: rect.width.min(max_width),
        height: rect.height.min(max_height),
    }
}

/// Render the dialog centred in `area` if it is open.
///
/// Returns the hit area of the OK button.
pub fn render_message_dialog(
    frame: &mut Frame,
    area: Rect,
    state: &MessageDialogState,
    colors: &MessageDialogColors,
) -> Option<Rect> {
    let text = state.text()?;

    let longest = text.lines().map(|l| l.width()).max().unwrap_or(0) as u16;
    let width = (longest + 4)
        .max(OK_LABEL.len() as u16 + 4)
        .min(area.width.saturating_sub(4).max(OK_LABEL.len() as u16 + 4))
        .min(area.width);
    let inner_width = width.saturating_sub(2).max(1) as usize;

    let wrapped_lines: usize = text
        .lines()
        .map(|line| line.width().max(1).div_ceil(inner_width))
        .sum::<usize>()
        .max(1);
    // Borders, message, blank line, button
    let height = (wrapped_lines as u16 + 4).min(area.height);

    let popup = clamp_rect_to_bounds(
        Rect {
            x: area.x + area.width.saturating_sub(width) / 2,
            y: area.y + area.height.saturating_sub(height) / 2,
            width,
            height,
        },
        area,
    );

    frame.render_widget(Clear, popup);
    let block = Block::default()
        .title(" Message ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border))
        .style(Style::default().bg(colors.background));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    if inner.height == 0 {
        return None;
    }

    let message_area = Rect {
        height: inner.height.saturating_sub(2).max(1),
        ..inner
    };
    frame.render_widget(
        Paragraph::new(text)
            .style(Style::default().fg(colors.text))
            .wrap(Wrap { trim: true }),
        message_area,
    );

    let button_width = (OK_LABEL.len() as u16).min(inner.width);
    let button = Rect {
        x: inner.x + inner.width.saturating_sub(button_width) / 2,
        y: inner.y + inner.height - 1,
        width: button_width,
        height: 1,
    };
    frame.render_widget(
        Paragraph::new(Line::from(OK_LABEL))
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(colors.button)
                    .add_modifier(Modifier::BOLD),
            ),
        button,
    );

    Some(button)
}
