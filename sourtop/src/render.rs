//! Renderer capability and the ratatui/crossterm terminal implementation.

use std::io::{self, Stdout};

use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::error::{RenderError, StartupError};
use crate::frame::Frame;

pub trait Renderer {
    /// Draw one frame, replacing whatever is on screen.
    fn render(&mut self, frame: &Frame) -> Result<(), RenderError>;

    /// Put the terminal back the way it was. Called once on every exit path.
    fn restore(&mut self) -> Result<(), RenderError>;
}

/// Full-screen dashboard on the alternate screen, raw mode, hidden cursor.
pub struct TerminalRenderer {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    restored: bool,
}

impl TerminalRenderer {
    pub fn new() -> Result<Self, StartupError> {
        enable_raw_mode().map_err(StartupError::Terminal)?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(StartupError::Terminal(e));
        }
        let backend = CrosstermBackend::new(stdout);
        let mut renderer = match Terminal::new(backend) {
            Ok(terminal) => Self {
                terminal,
                restored: false,
            },
            Err(e) => {
                let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
                let _ = disable_raw_mode();
                return Err(StartupError::Terminal(e));
            }
        };
        // From here on Drop takes care of teardown.
        renderer.terminal.clear().map_err(StartupError::Terminal)?;
        Ok(renderer)
    }
}

impl Renderer for TerminalRenderer {
    fn render(&mut self, frame: &Frame) -> Result<(), RenderError> {
        self.terminal.draw(|f| crate::ui::draw(f, frame))?;
        Ok(())
    }

    fn restore(&mut self) -> Result<(), RenderError> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        // Attempt every step even if an earlier one fails.
        let raw = disable_raw_mode();
        let screen = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let cursor = self.terminal.show_cursor();
        raw.and(screen).and(cursor).map_err(RenderError::from)
    }
}

impl Drop for TerminalRenderer {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}
