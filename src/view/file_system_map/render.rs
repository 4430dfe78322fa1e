//! File system map rendering

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use super::drag::DropSection;
use super::tree::{ItemButton, RowKind, TreeRow};
use super::{
    FileSystemMapColors, FileSystemMapLayout, FileSystemMapState, FocusArea, TreeColumn,
    TreeRowLayout,
};
use crate::view::controls::{
    render_button, render_text_input, render_toggle, ButtonState, FocusState,
};
use crate::view::message_dialog::render_message_dialog;

const BUTTON_WIDTH: u16 = 3;

/// Render the file system map editor
///
/// # Arguments
/// * `frame` - The ratatui frame to render to
/// * `area` - Rectangle where the editor should be rendered
/// * `state` - The editor state
/// * `colors` - Colors for rendering
///
/// # Returns
/// Layout information for hit testing
pub fn render_file_system_map(
    frame: &mut Frame,
    area: Rect,
    state: &FileSystemMapState,
    colors: &FileSystemMapColors,
) -> FileSystemMapLayout {
    let mut layout = FileSystemMapLayout {
        full_area: area,
        ..Default::default()
    };
    if area.height == 0 || area.width < 10 {
        return layout;
    }

    let modal = state.message.is_open();
    let search_height = if state.external_search { 0 } else { 1 };
    let [search_row, add_row, hint_row, header_row, tree_area] = Layout::vertical([
        Constraint::Length(search_height),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(area);

    if !state.external_search {
        render_search_row(frame, search_row, state, colors, modal, &mut layout);
    }
    render_add_row(frame, add_row, state, colors, modal, &mut layout);
    render_hint(frame, hint_row, state, colors);

    let [name_header, path_header, _] = column_areas(header_row);
    let header_style = Style::default()
        .fg(colors.header)
        .add_modifier(Modifier::BOLD);
    frame.render_widget(
        Paragraph::new(" File System").style(header_style),
        name_header,
    );
    frame.render_widget(Paragraph::new("Path").style(header_style), path_header);

    layout.tree_area = tree_area;
    render_tree(frame, tree_area, state, colors, modal, &mut layout);

    if let Some(drag) = &state.drag {
        render_drag_preview(frame, area, &drag.data.preview, drag.position, colors);
    }

    layout.dialog_ok_area = render_message_dialog(frame, area, &state.message, &colors.dialog);
    layout
}

/// Name, path and button column areas of a one-row strip
fn column_areas(row: Rect) -> [Rect; 3] {
    Layout::horizontal([
        Constraint::Percentage(40),
        Constraint::Min(0),
        Constraint::Length(BUTTON_WIDTH * 2 + 1),
    ])
    .areas(row)
}

fn render_search_row(
    frame: &mut Frame,
    area: Rect,
    state: &FileSystemMapState,
    colors: &FileSystemMapColors,
    modal: bool,
    layout: &mut FileSystemMapLayout,
) {
    let [field, _, clear] = Layout::horizontal([
        Constraint::Min(10),
        Constraint::Length(1),
        Constraint::Length(button_width(&state.clear_button)),
    ])
    .areas(area);

    let mut search = state.search.snapshot();
    if modal || state.editing.is_some() {
        search.focus = FocusState::Normal;
    }
    render_text_input(frame, field, &search, &colors.input);

    let clear_button = inert_while(modal, &state.clear_button);
    layout.search_area = Some(field);
    layout.clear_button = Some(render_button(frame, clear, &clear_button, &colors.button));
}

fn render_add_row(
    frame: &mut Frame,
    area: Rect,
    state: &FileSystemMapState,
    colors: &FileSystemMapColors,
    modal: bool,
    layout: &mut FileSystemMapLayout,
) {
    // "label: [x]"
    let toggle_width = (state.builtin_toggle.label.width() + 5) as u16;
    let [field, _, button, _, toggle] = Layout::horizontal([
        Constraint::Min(10),
        Constraint::Length(1),
        Constraint::Length(button_width(&state.add_button)),
        Constraint::Length(1),
        Constraint::Length(toggle_width),
    ])
    .areas(area);

    let mut input = state.add_input.clone();
    input.focus = if state.focus == FocusArea::AddField && !modal && state.editing.is_none() {
        FocusState::Focused
    } else {
        FocusState::Normal
    };
    render_text_input(frame, field, &input, &colors.input);

    let add_button = inert_while(modal, &state.add_button);
    let mut builtin_toggle = state.builtin_toggle.clone();
    if modal {
        builtin_toggle.focus = FocusState::Normal;
    }

    layout.add_field_area = field;
    layout.add_button = render_button(frame, button, &add_button, &colors.button);
    layout.toggle = render_toggle(frame, toggle, &builtin_toggle, &colors.toggle);
}

/// Width of a rendered button: "[ " + label + " ]"
fn button_width(button: &ButtonState) -> u16 {
    (button.label.chars().count() + 4) as u16
}

/// Drop hover and press highlights while the dialog is open
fn inert_while(modal: bool, button: &ButtonState) -> ButtonState {
    let mut button = button.clone();
    if modal {
        button.pressed = false;
        if button.focus == FocusState::Hovered {
            button.focus = FocusState::Normal;
        }
    }
    button
}

/// Why the add action is disabled, or tooltips of the selected row's
/// buttons
fn render_hint(
    frame: &mut Frame,
    area: Rect,
    state: &FileSystemMapState,
    colors: &FileSystemMapColors,
) {
    let tooltip = state.add_button_tooltip();
    let add_active = state.focus == FocusArea::AddField || !state.add_input.value().is_empty();
    if add_active && !tooltip.is_empty() {
        frame.render_widget(
            Paragraph::new(format!(" {tooltip}")).style(Style::default().fg(colors.error)),
            area,
        );
        return;
    }

    if state.focus != FocusArea::Tree || state.selected_column != TreeColumn::Buttons {
        return;
    }
    let Some(row) = state.selected_row() else {
        return;
    };
    let hint = row
        .buttons
        .iter()
        .map(|b| b.tooltip)
        .collect::<Vec<_>>()
        .join(" / ");
    frame.render_widget(
        Paragraph::new(format!(" {hint}")).style(Style::default().fg(colors.disabled)),
        area,
    );
}

fn render_tree(
    frame: &mut Frame,
    area: Rect,
    state: &FileSystemMapState,
    colors: &FileSystemMapColors,
    modal: bool,
    layout: &mut FileSystemMapLayout,
) {
    if area.height == 0 {
        return;
    }

    let visible = area.height as usize;
    let scroll = state
        .selected
        .map(|selected| selected.saturating_sub(visible - 1))
        .unwrap_or(0);
    let drop_target = state.drag.as_ref().and_then(|drag| {
        drag.drop_target()
            .filter(|&(target, _)| state.can_drop_data(&drag.data, Some(target)))
    });

    for (index, row) in state.tree.rows().iter().enumerate().skip(scroll).take(visible) {
        let row_area = Rect::new(area.x, area.y + (index - scroll) as u16, area.width, 1);
        let [name_area, path_area, buttons_area] = column_areas(row_area);

        let selected = state.selected == Some(index);
        let base = if selected {
            Style::default().bg(colors.selected_bg)
        } else {
            Style::default()
        };
        frame.render_widget(Paragraph::new("").style(base), row_area);

        let marker = match drop_target {
            Some((target, DropSection::Above)) if target == index => "▲",
            Some((target, DropSection::Below)) if target == index => "▼",
            _ => " ",
        };
        let cell_style = |column: TreeColumn, editable: bool| {
            let mut style = base.fg(if editable { colors.text } else { colors.disabled });
            if selected && state.focus == FocusArea::Tree && state.selected_column == column {
                style = style.bg(colors.focused_cell_bg);
            }
            style
        };

        let editing = state
            .editing
            .as_ref()
            .filter(|edit| edit.row == index);

        // Name column, with a gutter for the drop marker
        let indent = if row.kind == RowKind::Event { "  " } else { "" };
        if let Some(edit) = editing.filter(|edit| edit.column == TreeColumn::Name) {
            let field = Rect {
                x: name_area.x + 1,
                width: name_area.width.saturating_sub(1),
                ..name_area
            };
            let mut input = edit.input.clone();
            input.focus = if modal {
                FocusState::Normal
            } else {
                FocusState::Focused
            };
            render_text_input(frame, field, &input, &colors.input);
        } else {
            frame.render_widget(
                Paragraph::new(Line::from(vec![
                    Span::styled(marker, base.fg(colors.drop_target)),
                    Span::styled(
                        format!("{indent}{}", row.name_text),
                        cell_style(TreeColumn::Name, row.name_editable),
                    ),
                ]))
                .style(base),
                name_area,
            );
        }

        if let Some(edit) = editing.filter(|edit| edit.column == TreeColumn::Path) {
            let mut input = edit.input.clone();
            input.focus = if modal {
                FocusState::Normal
            } else {
                FocusState::Focused
            };
            render_text_input(frame, path_area, &input, &colors.input);
        } else {
            frame.render_widget(
                Paragraph::new(row.path_text.as_str())
                    .style(cell_style(TreeColumn::Path, row.path_editable)),
                path_area,
            );
        }

        let buttons = render_row_buttons(frame, buttons_area, row, base, colors);
        layout.rows.push(TreeRowLayout {
            index,
            area: row_area,
            name_area,
            path_area,
            buttons,
        });
    }
}

/// Draw a row's buttons right-aligned in `area`
fn render_row_buttons(
    frame: &mut Frame,
    area: Rect,
    row: &TreeRow,
    base: Style,
    colors: &FileSystemMapColors,
) -> Vec<(ItemButton, Rect)> {
    let needed = BUTTON_WIDTH * row.buttons.len() as u16;
    let mut x = area.x + area.width.saturating_sub(needed);
    let mut areas = Vec::with_capacity(row.buttons.len());

    for button in &row.buttons {
        if x + BUTTON_WIDTH > area.x + area.width {
            break;
        }
        let (label, color) = match button.kind {
            ItemButton::Revert => ("[r]", colors.revert_button),
            ItemButton::Remove => ("[x]", colors.remove_button),
        };
        let style = if button.disabled {
            base.fg(colors.disabled)
        } else {
            base.fg(color)
        };
        let button_area = Rect::new(x, area.y, BUTTON_WIDTH, 1);
        frame.render_widget(Paragraph::new(label).style(style), button_area);
        areas.push((button.kind, button_area));
        x += BUTTON_WIDTH;
    }

    areas
}

fn render_drag_preview(
    frame: &mut Frame,
    bounds: Rect,
    label: &str,
    position: (u16, u16),
    colors: &FileSystemMapColors,
) {
    let text = format!(" {label} ");
    let width = (text.width() as u16).min(bounds.width);
    let max_x = (bounds.x + bounds.width).saturating_sub(width);
    let x = (position.0 + 1).clamp(bounds.x, max_x.max(bounds.x));
    let y = position.1.clamp(bounds.y, bounds.y + bounds.height.saturating_sub(1));

    frame.render_widget(
        Paragraph::new(text).style(
            Style::default()
                .fg(colors.drop_target)
                .add_modifier(Modifier::REVERSED),
        ),
        Rect::new(x, y, width, 1),
    );
}
