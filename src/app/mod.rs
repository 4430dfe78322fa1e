//! Standalone host for the file system map editor
//!
//! Owns the mapping (`MapStore`) and the editor, feeds terminal events to
//! the editor and answers its intent events with refreshed snapshots.

mod store;

pub use store::{MapError, MapStore};

use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::backend::Backend;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::widgets::Paragraph;
use ratatui::{Frame, Terminal};

use crate::config::Config;
use crate::view::file_system_map::{
    render_file_system_map, FileSystemMapColors, FileSystemMapLayout, FileSystemMapState,
};

/// The application: a map editor over an in-memory store
pub struct App {
    store: MapStore,
    editor: FileSystemMapState,
    colors: FileSystemMapColors,
    /// Layout from the last draw, for mouse hit testing
    layout: FileSystemMapLayout,
    status: String,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config) -> Self {
        let store = MapStore::new(config.file_systems);
        let mut editor = FileSystemMapState::new();
        editor.set_show_builtins(config.show_builtins);
        editor.update_file_system_list(store.snapshot());

        tracing::info!(file_systems = store.len(), "map editor ready");

        Self {
            store,
            editor,
            colors: FileSystemMapColors::default(),
            layout: FileSystemMapLayout::default(),
            status: String::new(),
            should_quit: false,
        }
    }

    pub fn store(&self) -> &MapStore {
        &self.store
    }

    pub fn editor(&self) -> &FileSystemMapState {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut FileSystemMapState {
        &mut self.editor
    }

    pub fn layout(&self) -> &FileSystemMapLayout {
        &self.layout
    }

    /// Text of the last applied change
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Handle one terminal event. Returns true if it was consumed.
    pub fn handle_event(&mut self, event: Event) -> bool {
        let handled = match event {
            Event::Key(key) if key.kind == KeyEventKind::Release => false,
            Event::Key(key) if is_quit(&key) => {
                tracing::info!("quit requested");
                self.should_quit = true;
                true
            }
            Event::Key(key) => self.editor.handle_key(key),
            Event::Mouse(mouse) => self.editor.handle_mouse(mouse, &self.layout),
            Event::Paste(text) => self.editor.handle_paste(&text),
            Event::Resize(_, _) => true,
            _ => false,
        };

        self.apply_editor_events();
        handled
    }

    /// Apply every pending editor event to the store, then refresh the editor
    fn apply_editor_events(&mut self) {
        let events = self.editor.take_events();
        if events.is_empty() {
            return;
        }

        let mut changed = false;
        for event in events {
            match self.store.apply(&event) {
                Ok(true) => {
                    changed = true;
                    self.status = format!("Applied {}", event.signal_name());
                }
                Ok(false) => {}
                Err(e) => {
                    tracing::warn!("rejected {}: {}", event.signal_name(), e);
                    self.editor.show_message(e.to_string());
                }
            }
        }

        if changed {
            let snapshot = self.store.snapshot();
            if snapshot.is_empty() {
                self.editor.clear_file_system_list();
            } else {
                self.editor.update_file_system_list(snapshot);
            }
        }
    }

    /// Draw the editor and a status line
    pub fn draw(&mut self, frame: &mut Frame) {
        let [main, status] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());

        self.layout = render_file_system_map(frame, main, &self.editor, &self.colors);

        let text = if self.status.is_empty() {
            format!(" {} file systems | Ctrl+Q quit", self.store.len())
        } else {
            format!(
                " {} file systems | {} | Ctrl+Q quit",
                self.store.len(),
                self.status
            )
        };
        frame.render_widget(
            Paragraph::new(text).style(Style::default().fg(Color::Black).bg(Color::Gray)),
            status,
        );
    }

    /// Draw and handle events until quit
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|frame| self.draw(frame))?;
            if self.should_quit {
                return Ok(());
            }
            let event = event::read()?;
            self.handle_event(event);
        }
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('c'))
}
