//! Color constants for the terminal user interface.

use ratatui::style::Color;

/// Table header row and the status bar.
pub const ACCENT: Color = Color::Rgb(0, 80, 0);
/// Complete control and focused borders.
pub const GOLD: Color = Color::Rgb(255, 215, 0);
/// Tag labels.
pub const DARK_PURPLE: Color = Color::Rgb(86, 60, 92);
/// Errors in the status bar.
pub const DARK_RED: Color = Color::Rgb(114, 0, 0);
