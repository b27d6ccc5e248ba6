//! Crossterm-backed driver.
//!
//! Implements the [`Driver`] trait over crossterm events (keyboard, mouse
//! wheel, resize) and ratatui rendering. SDK callbacks arrive from the
//! in-process simulated engines in [`crate::sdk`].

use std::io::{self, Stdout, stdout};
use std::time::Duration;

use crossterm::{
    ExecutableCommand,
    event::{
        DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyCode, KeyEventKind,
        MouseEventKind,
    },
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use liveroom_app::{App, AppAction, AppEvent, Driver, KeyInput};
use liveroom_session::{PermissionSet, SdkCommand, SdkEvent};
use ratatui::{Terminal, backend::CrosstermBackend};
use thiserror::Error;

use crate::{InputState, sdk::SdkHandle, ui};

/// Idle redraw interval while no terminal event is pending.
const TICK: Duration = Duration::from_millis(100);

/// Failures raised by the terminal driver.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// Underlying terminal I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The simulated SDK went away.
    #[error("SDK channel closed")]
    ChannelSend,
}

/// Terminal-backed [`Driver`].
///
/// Owns the ratatui terminal, the crossterm event stream, the input line
/// state, and the channel pair into the simulated SDK.
pub struct TerminalDriver {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_stream: EventStream,
    sdk: SdkHandle,
    input_state: InputState,
}

impl TerminalDriver {
    /// Create a new terminal driver over a running SDK.
    ///
    /// Puts the terminal into raw mode on the alternate screen and turns
    /// on mouse capture so the wheel can scroll the feed.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be configured.
    pub fn new(sdk: SdkHandle) -> Result<Self, TerminalError> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?.execute(EnableMouseCapture)?;

        Ok(Self {
            terminal: Terminal::new(CrosstermBackend::new(stdout()))?,
            event_stream: EventStream::new(),
            sdk,
            input_state: InputState::new(),
        })
    }

    /// Translate one crossterm event into app actions.
    fn apply_terminal_event(&mut self, event: Event, app: &mut App) -> Vec<AppAction> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => match map_key(key.code) {
                Some(input) => self.input_state.handle_key(input, app),
                None => vec![],
            },
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollUp => app.scroll_up(),
                MouseEventKind::ScrollDown => app.scroll_down(),
                _ => vec![],
            },
            Event::Resize(cols, rows) => app.handle(AppEvent::Resize(cols, rows)),
            _ => vec![],
        }
    }
}

/// Map a crossterm key code onto the app's key vocabulary.
fn map_key(code: KeyCode) -> Option<KeyInput> {
    match code {
        KeyCode::Char(c) => Some(KeyInput::Char(c)),
        KeyCode::Enter => Some(KeyInput::Enter),
        KeyCode::Backspace => Some(KeyInput::Backspace),
        KeyCode::Delete => Some(KeyInput::Delete),
        KeyCode::Esc => Some(KeyInput::Esc),
        KeyCode::Left => Some(KeyInput::Left),
        KeyCode::Right => Some(KeyInput::Right),
        KeyCode::Up => Some(KeyInput::Up),
        KeyCode::Down => Some(KeyInput::Down),
        KeyCode::PageUp => Some(KeyInput::PageUp),
        KeyCode::PageDown => Some(KeyInput::PageDown),
        KeyCode::Home => Some(KeyInput::Home),
        KeyCode::End => Some(KeyInput::End),
        _ => None,
    }
}

impl Driver for TerminalDriver {
    type Error = TerminalError;

    async fn poll_event(&mut self, app: &mut App) -> Result<Vec<AppAction>, Self::Error> {
        tokio::select! {
            biased;

            maybe_event = self.event_stream.next() => match maybe_event {
                Some(Ok(event)) => Ok(self.apply_terminal_event(event, app)),
                Some(Err(e)) => Err(TerminalError::Io(e)),
                None => Ok(vec![]),
            },

            () = tokio::time::sleep(TICK) => Ok(app.handle(AppEvent::Tick)),
        }
    }

    async fn run_command(&mut self, command: SdkCommand) -> Result<(), Self::Error> {
        self.sdk.commands.send(command).await.map_err(|_| TerminalError::ChannelSend)
    }

    async fn next_sdk_event(&mut self) -> Option<SdkEvent> {
        self.sdk.events.try_recv().ok()
    }

    fn granted_permissions(&self) -> PermissionSet {
        // Nothing is pre-granted; the bootstrap requests everything and the
        // simulated platform answers per its configuration.
        PermissionSet::empty()
    }

    fn render(&mut self, app: &App) -> Result<(), Self::Error> {
        self.terminal.draw(|frame| ui::render(frame, app, &self.input_state))?;
        Ok(())
    }

    fn stop(&mut self) {
        self.sdk.stop();
    }
}

impl Drop for TerminalDriver {
    fn drop(&mut self) {
        self.stop();
        let _ = stdout().execute(DisableMouseCapture);
        let _ = stdout().execute(LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}
