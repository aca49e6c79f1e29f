use crate::application::state::UiState;
use crate::core::events::UiEvent;
use crate::core::traits::UiRenderer;
use crate::modules::label::time_format::format_position;
use anyhow::Result;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseEvent, MouseEventKind,
    },
    terminal::{self, ClearType},
    ExecutableCommand,
};
use std::io::{stdout, Write};
use std::time::Duration;

const SEEK_STEP_SECS: f64 = 10.0;

pub struct TerminalRenderer {
    initialized: bool,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self { initialized: false }
    }

    pub fn print_message(&self, message: &str) {
        println!("{}", message);
    }

    pub fn print_error(&self, message: &str) {
        eprintln!("Error: {}", message);
    }
}

/// One-line readout: "1:02 / 10:00 • 8:58 (endsIn)  [1.5x] | status"
pub fn readout_line(state: &UiState) -> String {
    let mut line = format_position(state.elapsed, state.duration);

    // No label for live content.
    if let Some(label) = state.label.as_deref().filter(|l| !l.is_empty()) {
        line.push_str(&format!(" • {} ({})", label, state.mode.key()));
    }

    line.push_str(&format!("  [{}x", state.playback_rate));
    if state.is_paused {
        line.push_str(" paused");
    }
    line.push(']');

    if let Some(id) = &state.content_id {
        line.push_str(&format!(" {}", id));
        if state.segments_ready {
            line.push_str(" (segments)");
        }
    }

    line.push_str(&format!(" | {}", state.status_message));
    if let Some(error) = &state.error_message {
        line.push_str(&format!(" | ERROR: {}", error));
    }

    line
}

fn key_event(code: KeyCode) -> Option<UiEvent> {
    match code {
        KeyCode::Char('m') | KeyCode::Char('M') | KeyCode::Enter => {
            Some(UiEvent::CycleModeRequested)
        }
        KeyCode::Char(' ') | KeyCode::Char('p') | KeyCode::Char('P') => {
            Some(UiEvent::TogglePauseRequested)
        }
        KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Up => Some(UiEvent::SpeedUpRequested),
        KeyCode::Char('-') | KeyCode::Char('_') | KeyCode::Down => {
            Some(UiEvent::SlowDownRequested)
        }
        KeyCode::Right => Some(UiEvent::SeekRequested {
            seconds: SEEK_STEP_SECS,
        }),
        KeyCode::Left => Some(UiEvent::SeekRequested {
            seconds: -SEEK_STEP_SECS,
        }),
        KeyCode::Char('n') | KeyCode::Char('N') => Some(UiEvent::NextContentRequested),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(UiEvent::QuitRequested),
        _ => None,
    }
}

impl UiRenderer for TerminalRenderer {
    fn init(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        stdout().execute(EnableMouseCapture)?;
        self.initialized = true;
        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        if self.initialized {
            let mut stdout = stdout();
            stdout.execute(DisableMouseCapture)?;
            terminal::disable_raw_mode()?;
            println!();
            self.initialized = false;
        }
        Ok(())
    }

    fn render(&mut self, state: &UiState) -> Result<()> {
        let mut stdout = stdout();

        stdout.execute(cursor::MoveToColumn(0))?;
        stdout.execute(terminal::Clear(ClearType::CurrentLine))?;

        print!("{}", readout_line(state));
        print!(" | [M/click: Mode | Space: Pause | +/-: Speed | ←/→: Seek | N: Next | Q: Quit]");

        stdout.flush()?;
        Ok(())
    }

    fn poll_input(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(KeyEvent {
                    code,
                    kind: KeyEventKind::Press,
                    ..
                }) => events.extend(key_event(code)),
                Event::Mouse(MouseEvent {
                    kind: MouseEventKind::Down(_),
                    ..
                }) => events.push(UiEvent::CycleModeRequested),
                _ => {}
            }
        }

        Ok(events)
    }
}

// To avoid leaving the terminal in raw mode on early returns
impl Drop for TerminalRenderer {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
