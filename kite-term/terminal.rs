//! The raw-mode screen kite draws on.
//!
//! Raw mode and the alternate screen are entered once and left exactly once:
//! through [`Terminal::leave_raw_mode`] on a clean exit, through `Drop` when
//! an error unwinds `main`, and through the panic hook otherwise.

use std::io::{
  self,
  Stdout,
};

use crossterm::{
  cursor::Show,
  execute,
  terminal::{
    EnterAlternateScreen,
    LeaveAlternateScreen,
    disable_raw_mode,
    enable_raw_mode,
  },
};
use eyre::Result;
use ratatui::{
  Frame,
  Terminal as RatatuiTerminal,
  backend::CrosstermBackend,
  layout::Size,
};

pub struct Terminal {
  terminal: RatatuiTerminal<CrosstermBackend<Stdout>>,
  raw:      bool,
}

impl Terminal {
  pub fn new() -> Result<Self> {
    let backend = CrosstermBackend::new(io::stdout());
    let terminal = RatatuiTerminal::new(backend)?;
    Ok(Self {
      terminal,
      raw: false,
    })
  }

  /// Switch to raw mode on the alternate screen, and make sure a panic puts
  /// the terminal back before the panic message is printed.
  pub fn enter_raw_mode(&mut self) -> Result<()> {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
      restore();
      default_hook(info);
    }));

    enable_raw_mode()?;
    self.raw = true;
    execute!(self.terminal.backend_mut(), EnterAlternateScreen)?;
    Ok(())
  }

  pub fn leave_raw_mode(&mut self) -> Result<()> {
    if !self.raw {
      return Ok(());
    }
    self.raw = false;
    execute!(self.terminal.backend_mut(), LeaveAlternateScreen, Show)?;
    disable_raw_mode()?;
    Ok(())
  }

  pub fn draw(&mut self, f: impl FnOnce(&mut Frame<'_>)) -> Result<()> {
    self.terminal.draw(f)?;
    Ok(())
  }

  pub fn size(&self) -> Result<Size> {
    Ok(self.terminal.size()?)
  }
}

impl Drop for Terminal {
  fn drop(&mut self) {
    if self.raw {
      self.raw = false;
      restore();
    }
  }
}

/// Leave the alternate screen and raw mode, ignoring failures.
fn restore() {
  let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
  let _ = disable_raw_mode();
}
