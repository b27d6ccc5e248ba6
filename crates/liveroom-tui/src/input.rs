//! Line editing for the chat input.
//!
//! Keystrokes edit a single-line buffer; Enter hands the finished line to
//! the command parser. The cursor is a byte offset that always sits on a
//! char boundary, so multi-byte input edits cleanly.

use liveroom_app::{App, AppAction, KeyInput};

use crate::commands::{self, Command};

/// Edit buffer and cursor for the input line.
#[derive(Debug, Default)]
pub struct InputState {
    buffer: String,
    cursor: usize,
}

impl InputState {
    /// Empty buffer with the cursor at the start.
    pub fn new() -> Self {
        Self::default()
    }

    /// Text typed so far.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Cursor byte offset within the buffer.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Cursor position in characters, for placing the terminal cursor.
    pub fn cursor_column(&self) -> usize {
        self.buffer[..self.cursor].chars().count()
    }

    /// Route a key to the editor or to the app.
    ///
    /// Editing keys mutate the buffer and request a render; Enter submits
    /// the line, and the remaining keys act on the room directly.
    pub fn handle_key(&mut self, key: KeyInput, app: &mut App) -> Vec<AppAction> {
        match key {
            KeyInput::Enter => return self.submit(app),
            // Esc leaves the room; the runtime closes the screen once
            // teardown finishes.
            KeyInput::Esc => return app.leave_room(),
            KeyInput::Up => return app.scroll_up(),
            KeyInput::Down => return app.scroll_down(),
            KeyInput::PageUp => return app.scroll_page_up(),
            KeyInput::PageDown => return app.scroll_page_down(),
            KeyInput::Char(c) => {
                self.buffer.insert(self.cursor, c);
                self.cursor += c.len_utf8();
            },
            KeyInput::Backspace => {
                if self.cursor > 0 {
                    self.cursor = self.prev_boundary();
                    self.buffer.remove(self.cursor);
                }
            },
            KeyInput::Delete => {
                if self.cursor < self.buffer.len() {
                    self.buffer.remove(self.cursor);
                }
            },
            KeyInput::Left => self.cursor = self.prev_boundary(),
            KeyInput::Right => self.cursor = self.next_boundary(),
            KeyInput::Home => self.cursor = 0,
            KeyInput::End => self.cursor = self.buffer.len(),
        }
        vec![AppAction::Render]
    }

    /// Byte offset of the char boundary before the cursor.
    fn prev_boundary(&self) -> usize {
        self.buffer[..self.cursor]
            .chars()
            .next_back()
            .map_or(0, |c| self.cursor - c.len_utf8())
    }

    /// Byte offset of the char boundary after the cursor.
    fn next_boundary(&self) -> usize {
        self.buffer[self.cursor..]
            .chars()
            .next()
            .map_or(self.cursor, |c| self.cursor + c.len_utf8())
    }

    /// Parse the finished line and route it to the app.
    fn submit(&mut self, app: &mut App) -> Vec<AppAction> {
        let line = std::mem::take(&mut self.buffer);
        self.cursor = 0;
        if line.is_empty() {
            return vec![];
        }

        match commands::parse(&line) {
            Command::Message { text } => app.send_chat(text),
            Command::SwitchCamera => app.switch_camera(),
            Command::Capture { enabled: true } => app.start_capture(),
            Command::Capture { enabled: false } => app.stop_capture(),
            Command::Beauty { enabled } => app.set_beauty(enabled),
            Command::Leave => app.leave_room(),
            Command::Quit => app.quit(),
            Command::Unknown { input } => {
                app.set_status(format!("Unknown command: {input}"));
                vec![AppAction::Render]
            },
            Command::InvalidArgs { command, error } => {
                app.set_status(format!("/{command}: {error}"));
                vec![AppAction::Render]
            },
        }
    }
}
