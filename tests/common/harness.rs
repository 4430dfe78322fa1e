// Test harness driving the application through a virtual terminal

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::backend::TestBackend;
use ratatui::Terminal;

use fsmap::app::App;
use fsmap::config::Config;

use super::tracing::init_tracing_from_env;

/// Runs an [`App`] against a `TestBackend` and inspects the rendered screen
pub struct MapTestHarness {
    app: App,
    terminal: Terminal<TestBackend>,
}

impl MapTestHarness {
    /// Create a harness with the default config
    pub fn new(width: u16, height: u16) -> anyhow::Result<Self> {
        Self::with_config(Config::default(), width, height)
    }

    pub fn with_config(config: Config, width: u16, height: u16) -> anyhow::Result<Self> {
        init_tracing_from_env();

        let terminal = Terminal::new(TestBackend::new(width, height))?;
        let mut harness = Self {
            app: App::new(config),
            terminal,
        };
        harness.render()?;
        Ok(harness)
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }

    /// Names in the store, in order
    pub fn store_names(&self) -> Vec<String> {
        self.app
            .store()
            .records()
            .iter()
            .map(|record| record.name.clone())
            .collect()
    }

    /// Path value of a stored record
    pub fn store_path(&self, name: &str) -> Option<String> {
        self.app
            .store()
            .get(name)
            .and_then(|record| record.config.get("path"))
            .and_then(|path| path.as_str())
            .map(str::to_string)
    }

    pub fn render(&mut self) -> anyhow::Result<()> {
        let app = &mut self.app;
        self.terminal.draw(|frame| app.draw(frame))?;
        Ok(())
    }

    fn send(&mut self, event: Event) -> anyhow::Result<()> {
        self.app.handle_event(event);
        self.render()
    }

    pub fn send_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> anyhow::Result<()> {
        self.send(Event::Key(KeyEvent::new(code, modifiers)))
    }

    pub fn type_text(&mut self, text: &str) -> anyhow::Result<()> {
        for c in text.chars() {
            self.send_key(KeyCode::Char(c), KeyModifiers::NONE)?;
        }
        Ok(())
    }

    pub fn paste(&mut self, text: &str) -> anyhow::Result<()> {
        self.send(Event::Paste(text.to_string()))
    }

    fn mouse(&mut self, kind: MouseEventKind, x: u16, y: u16) -> anyhow::Result<()> {
        self.send(Event::Mouse(MouseEvent {
            kind,
            column: x,
            row: y,
            modifiers: KeyModifiers::NONE,
        }))
    }

    /// Left press and release at one position
    pub fn mouse_click(&mut self, x: u16, y: u16) -> anyhow::Result<()> {
        self.mouse(MouseEventKind::Down(MouseButton::Left), x, y)?;
        self.mouse(MouseEventKind::Up(MouseButton::Left), x, y)
    }

    pub fn mouse_right_click(&mut self, x: u16, y: u16) -> anyhow::Result<()> {
        self.mouse(MouseEventKind::Down(MouseButton::Right), x, y)?;
        self.mouse(MouseEventKind::Up(MouseButton::Right), x, y)
    }

    /// Press at `from`, drag through each row to `to`, release
    pub fn mouse_drag(&mut self, from: (u16, u16), to: (u16, u16)) -> anyhow::Result<()> {
        self.mouse(MouseEventKind::Down(MouseButton::Left), from.0, from.1)?;
        let mut y = from.1;
        while y != to.1 {
            y = if to.1 > y { y + 1 } else { y - 1 };
            self.mouse(MouseEventKind::Drag(MouseButton::Left), to.0, y)?;
        }
        self.mouse(MouseEventKind::Up(MouseButton::Left), to.0, to.1)
    }

    /// Text of one screen row
    pub fn screen_row(&self, y: u16) -> String {
        let buffer = self.terminal.backend().buffer();
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol().to_string())
            .collect()
    }

    pub fn screen_to_string(&self) -> String {
        let height = self.terminal.backend().buffer().area.height;
        (0..height)
            .map(|y| self.screen_row(y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Screen position of the first occurrence of `text`
    pub fn find_text(&self, text: &str) -> Option<(u16, u16)> {
        let height = self.terminal.backend().buffer().area.height;
        (0..height).find_map(|y| {
            let row: Vec<char> = self
                .screen_row(y)
                .chars()
                .collect();
            let needle: Vec<char> = text.chars().collect();
            row.windows(needle.len())
                .position(|window| window == needle.as_slice())
                .map(|x| (x as u16, y))
        })
    }

    pub fn assert_screen_contains(&self, text: &str) {
        let screen = self.screen_to_string();
        assert!(
            screen.contains(text),
            "Expected screen to contain '{}'\nScreen:\n{}",
            text,
            screen
        );
    }

    pub fn assert_screen_not_contains(&self, text: &str) {
        let screen = self.screen_to_string();
        assert!(
            !screen.contains(text),
            "Expected screen not to contain '{}'\nScreen:\n{}",
            text,
            screen
        );
    }
}
