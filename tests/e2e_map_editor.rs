// End-to-end tests driving the editor through terminal events

mod common;

use common::harness::MapTestHarness;
use crossterm::event::{KeyCode, KeyModifiers};
use fsmap::config::Config;
use fsmap::model::record::FileSystemRecord;
use fsmap::view::file_system_map::{FocusArea, ItemButton};

/// Tree rows start below the search, add, hint and header rows
const FIRST_ROW_Y: u16 = 4;

fn three_entries() -> Config {
    Config {
        show_builtins: false,
        file_systems: vec![
            FileSystemRecord::with_path("alpha", "/a"),
            FileSystemRecord::with_path("beta", "/b"),
            FileSystemRecord::with_path("gamma", "/c"),
        ],
    }
}

fn harness() -> MapTestHarness {
    MapTestHarness::with_config(three_entries(), 80, 20).unwrap()
}

fn button_center(harness: &MapTestHarness, row: usize, button: ItemButton) -> (u16, u16) {
    let (_, area) = harness.app().layout().rows[row]
        .buttons
        .iter()
        .copied()
        .find(|(kind, _)| *kind == button)
        .unwrap();
    (area.x + 1, area.y)
}

#[test]
fn test_initial_render_lists_entries() {
    let harness = harness();

    harness.assert_screen_contains("File System");
    harness.assert_screen_contains("alpha");
    harness.assert_screen_contains("/b");
    harness.assert_screen_contains("3 file systems");
    assert_eq!(harness.find_text("alpha").map(|(_, y)| y), Some(FIRST_ROW_Y));
}

#[test]
fn test_add_via_keyboard() {
    let mut harness = harness();

    harness.type_text("delta").unwrap();
    harness.send_key(KeyCode::Enter, KeyModifiers::NONE).unwrap();

    assert_eq!(harness.store_names(), vec!["alpha", "beta", "gamma", "delta"]);
    assert_eq!(harness.store_path("delta").as_deref(), Some(""));
    assert!(harness.app().editor().add_input().value().is_empty());
    harness.assert_screen_contains("delta");
    harness.assert_screen_contains("Applied file_system_added");
}

#[test]
fn test_duplicate_name_shows_hint_and_blocks_add() {
    let mut harness = harness();
    harness.assert_screen_contains("Invalid file system name");

    harness.type_text("alpha").unwrap();
    harness.assert_screen_contains("A file system with the name 'alpha' already exists.");
    assert!(!harness.app().editor().add_button_enabled());

    // Enter reports the problem instead of adding
    harness.send_key(KeyCode::Enter, KeyModifiers::NONE).unwrap();
    assert_eq!(harness.app().store().len(), 3);
    assert_eq!(
        harness.app().editor().message().text(),
        Some("A file system with the name 'alpha' already exists.")
    );
    harness.assert_screen_contains("[ OK ]");

    // Clicking the disabled button does nothing
    harness.send_key(KeyCode::Enter, KeyModifiers::NONE).unwrap();
    let (x, y) = harness.find_text("[ Add ]").unwrap();
    harness.mouse_click(x + 2, y).unwrap();
    assert!(!harness.app().editor().message().is_open());
    assert_eq!(harness.app().store().len(), 3);

    // Fixing the name clears the hint
    harness.type_text("2").unwrap();
    harness.assert_screen_not_contains("already exists");
    assert!(harness.app().editor().add_button_enabled());
}

#[test]
fn test_add_button_click() {
    let mut harness = harness();

    harness.type_text("delta").unwrap();
    let (x, y) = harness.find_text("[ Add ]").unwrap();
    harness.mouse_click(x + 2, y).unwrap();

    assert_eq!(harness.app().store().len(), 4);
}

#[test]
fn test_paste_into_add_field() {
    let mut harness = harness();

    harness.paste("pa\nste").unwrap();
    assert_eq!(harness.app().editor().add_input().value(), "paste");

    harness.send_key(KeyCode::Enter, KeyModifiers::NONE).unwrap();
    assert!(harness.store_names().contains(&"paste".to_string()));
}

#[test]
fn test_rename_via_double_click() {
    let mut harness = harness();

    harness.mouse_click(3, FIRST_ROW_Y).unwrap();
    assert!(harness.app().editor().editing().is_none());
    harness.mouse_click(3, FIRST_ROW_Y).unwrap();
    assert!(harness.app().editor().editing().is_some());

    harness.send_key(KeyCode::Char('u'), KeyModifiers::CONTROL).unwrap();
    harness.type_text("omega").unwrap();
    harness.send_key(KeyCode::Enter, KeyModifiers::NONE).unwrap();

    assert_eq!(harness.store_names(), vec!["omega", "beta", "gamma"]);
    assert_eq!(harness.store_path("omega").as_deref(), Some("/a"));
    harness.assert_screen_contains("omega");
    harness.assert_screen_not_contains("alpha");
}

#[test]
fn test_invalid_rename_shows_dialog_and_reverts() {
    let mut harness = harness();

    harness.mouse_click(3, FIRST_ROW_Y).unwrap();
    harness.send_key(KeyCode::Enter, KeyModifiers::NONE).unwrap();
    harness.send_key(KeyCode::Char('u'), KeyModifiers::CONTROL).unwrap();
    harness.type_text("bad/name").unwrap();
    harness.send_key(KeyCode::Enter, KeyModifiers::NONE).unwrap();

    assert!(harness.app().editor().message().is_open());
    harness.assert_screen_contains("[ OK ]");
    assert_eq!(harness.store_names(), vec!["alpha", "beta", "gamma"]);
    assert_eq!(harness.app().editor().tree().row(0).unwrap().name_text, "alpha");

    // Modal: typing goes nowhere until dismissed
    harness.type_text("x").unwrap();
    assert!(harness.app().editor().message().is_open());

    harness.send_key(KeyCode::Enter, KeyModifiers::NONE).unwrap();
    assert!(!harness.app().editor().message().is_open());
    harness.assert_screen_not_contains("[ OK ]");
}

#[test]
fn test_rename_to_existing_name_rejected() {
    let mut harness = harness();

    harness.mouse_click(3, FIRST_ROW_Y).unwrap();
    harness.send_key(KeyCode::Enter, KeyModifiers::NONE).unwrap();
    harness.send_key(KeyCode::Char('u'), KeyModifiers::CONTROL).unwrap();
    harness.type_text("beta").unwrap();
    harness.send_key(KeyCode::Enter, KeyModifiers::NONE).unwrap();

    assert!(harness.app().editor().message().is_open());
    assert_eq!(
        harness.app().editor().message().text(),
        Some("A file system with the name 'beta' already exists.")
    );

    let ok = harness.app().layout().dialog_ok_area.unwrap();
    harness.mouse_click(ok.x + 1, ok.y).unwrap();
    assert!(!harness.app().editor().message().is_open());
}

#[test]
fn test_edit_path_then_revert() {
    let mut harness = harness();
    let path_x = harness.app().layout().rows[1].path_area.x + 1;

    harness.mouse_click(path_x, FIRST_ROW_Y + 1).unwrap();
    harness.mouse_click(path_x, FIRST_ROW_Y + 1).unwrap();
    harness.send_key(KeyCode::Char('u'), KeyModifiers::CONTROL).unwrap();
    harness.type_text("/srv").unwrap();
    harness.send_key(KeyCode::Enter, KeyModifiers::NONE).unwrap();

    assert_eq!(harness.store_path("beta").as_deref(), Some("/srv"));
    harness.assert_screen_contains("/srv");
    assert!(
        !harness.app().editor().tree().row(1).unwrap().button(ItemButton::Revert).unwrap().disabled
    );

    let (x, y) = button_center(&harness, 1, ItemButton::Revert);
    harness.mouse_click(x, y).unwrap();

    assert_eq!(harness.store_path("beta").as_deref(), Some("/b"));
    assert!(
        harness.app().editor().tree().row(1).unwrap().button(ItemButton::Revert).unwrap().disabled
    );
}

#[test]
fn test_revert_from_keyboard() {
    let mut harness = harness();

    harness.app_mut().editor_mut().set_focus(FocusArea::Tree);
    harness.send_key(KeyCode::Right, KeyModifiers::NONE).unwrap();
    harness.send_key(KeyCode::Enter, KeyModifiers::NONE).unwrap();
    harness.send_key(KeyCode::Char('u'), KeyModifiers::CONTROL).unwrap();
    harness.type_text("/mnt").unwrap();
    harness.send_key(KeyCode::Enter, KeyModifiers::NONE).unwrap();
    assert_eq!(harness.store_path("alpha").as_deref(), Some("/mnt"));

    // Buttons column: Space presses the first enabled button (revert)
    harness.send_key(KeyCode::Right, KeyModifiers::NONE).unwrap();
    harness.assert_screen_contains("Revert file system / Remove file system");
    harness.send_key(KeyCode::Char(' '), KeyModifiers::NONE).unwrap();

    assert_eq!(harness.store_path("alpha").as_deref(), Some("/a"));
    assert_eq!(harness.app().store().len(), 3);
}

#[test]
fn test_remove_via_button_click() {
    let mut harness = harness();

    let (x, y) = button_center(&harness, 0, ItemButton::Remove);
    harness.mouse_click(x, y).unwrap();

    assert_eq!(harness.store_names(), vec!["beta", "gamma"]);
    harness.assert_screen_not_contains("alpha");
    harness.assert_screen_contains("2 file systems");
}

#[test]
fn test_right_click_on_remove_ignored() {
    let mut harness = harness();

    let (x, y) = button_center(&harness, 0, ItemButton::Remove);
    harness.mouse_right_click(x, y).unwrap();

    assert_eq!(harness.app().store().len(), 3);
}

#[test]
fn test_toggle_builtins_shows_default() {
    let mut harness = MapTestHarness::new(80, 20).unwrap();
    harness.assert_screen_contains("Show built-in file systems: [ ]");
    harness.assert_screen_not_contains("default");

    let toggle = harness.app().layout().toggle.checkbox_area;
    harness.mouse_click(toggle.x + 1, toggle.y).unwrap();

    harness.assert_screen_contains("Show built-in file systems: [x]");
    harness.assert_screen_contains("default");

    // Built-ins cannot be removed
    harness.app_mut().editor_mut().set_focus(FocusArea::Tree);
    harness.send_key(KeyCode::Delete, KeyModifiers::NONE).unwrap();
    assert_eq!(harness.store_names(), vec!["default"]);
}

#[test]
fn test_drag_reorders_entries() {
    let mut harness = harness();

    harness
        .mouse_drag((3, FIRST_ROW_Y + 2), (3, FIRST_ROW_Y))
        .unwrap();

    assert_eq!(harness.store_names(), vec!["gamma", "alpha", "beta"]);
    assert_eq!(harness.find_text("gamma").map(|(_, y)| y), Some(FIRST_ROW_Y));
    assert!(harness.app().editor().drag().is_none());
}

#[test]
fn test_keyboard_reorder() {
    let mut harness = harness();

    harness.app_mut().editor_mut().set_focus(FocusArea::Tree);
    harness.send_key(KeyCode::Down, KeyModifiers::ALT).unwrap();

    assert_eq!(harness.store_names(), vec!["beta", "alpha", "gamma"]);
}

#[test]
fn test_search_text_does_not_hide_rows() {
    let mut harness = harness();

    harness.send_key(KeyCode::BackTab, KeyModifiers::SHIFT).unwrap();
    assert_eq!(harness.app().editor().focus(), FocusArea::Search);
    harness.type_text("zzz").unwrap();

    assert_eq!(harness.app().editor().search_box().text(), "zzz");
    harness.assert_screen_contains("alpha");
    harness.assert_screen_contains("gamma");

    let (x, y) = harness.find_text("[ Clear All ]").unwrap();
    harness.mouse_click(x + 2, y).unwrap();
    assert_eq!(harness.app().editor().search_box().text(), "");
}

#[test]
fn test_ctrl_q_quits() {
    let mut harness = harness();
    assert!(!harness.app().should_quit());

    harness.send_key(KeyCode::Char('q'), KeyModifiers::CONTROL).unwrap();
    assert!(harness.app().should_quit());
}
