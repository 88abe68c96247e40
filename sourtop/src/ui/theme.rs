//! Shared UI theme constants.

use ratatui::style::Color;

use crate::frame::Level;

pub const CPU_LABEL: Color = Color::Blue;
pub const MEM_LABEL: Color = Color::Magenta;
pub const DISK_LABEL: Color = Color::Yellow;
pub const TITLE: Color = Color::Green;
pub const TABLE_HEADER: Color = Color::Cyan;
pub const DIMMED: Color = Color::DarkGray;

pub fn level_color(level: Level) -> Color {
    match level {
        Level::Normal => Color::Green,
        Level::Elevated => Color::Yellow,
        Level::Critical => Color::Red,
    }
}
