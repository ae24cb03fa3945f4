use ratatui::style::Color;

use crate::model::task::Status;

/// Color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub red: Color,
    pub green: Color,
    pub yellow: Color,
    pub cyan: Color,
    pub selection_bg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x0C, 0x00, 0x1B),
            text: Color::Rgb(0xB0, 0xAA, 0xFF),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0xFB, 0x41, 0x96),
            dim: Color::Rgb(0x7D, 0x78, 0xBF),
            red: Color::Rgb(0xFF, 0x44, 0x44),
            green: Color::Rgb(0x44, 0xFF, 0x88),
            yellow: Color::Rgb(0xFF, 0xD7, 0x00),
            cyan: Color::Rgb(0x44, 0xDD, 0xFF),
            selection_bg: Color::Rgb(0x3D, 0x14, 0x38),
        }
    }
}

impl Theme {
    /// Color for a task status
    pub fn status_color(&self, status: Status) -> Color {
        match status {
            Status::Todo => self.text,
            Status::InProgress => self.yellow,
            Status::Done => self.green,
        }
    }
}
