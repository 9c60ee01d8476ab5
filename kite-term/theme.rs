//! Terminal colors for highlight classes.

use kite_lib::syntax::Highlight;
use ratatui::style::Color;

/// Foreground color for `highlight`, following its ANSI SGR code.
pub fn highlight_to_color(highlight: Highlight) -> Color {
  match highlight.ansi_fg() {
    30 => Color::Black,
    31 => Color::Red,
    32 => Color::Green,
    33 => Color::Yellow,
    34 => Color::Blue,
    35 => Color::Magenta,
    36 => Color::Cyan,
    37 => Color::Gray,
    _ => Color::Reset,
  }
}
