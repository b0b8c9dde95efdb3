use inksac::prelude::*;
use std::path::Path;

/// Prompt and diagnostic styling. Falls back to plain text when the
/// terminal has no colour support or output is not a terminal.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    color_support: ColorSupport,
}

impl Default for Palette {
    fn default() -> Self {
        Self::new()
    }
}

impl Palette {
    pub fn new() -> Self {
        let support = check_color_support().unwrap_or(ColorSupport::NoColor);
        Self {
            color_support: support,
        }
    }

    pub fn plain() -> Self {
        Self {
            color_support: ColorSupport::NoColor,
        }
    }

    fn enabled(&self) -> bool {
        !matches!(self.color_support, ColorSupport::NoColor)
    }

    /// `[cwd]> `, with the directory in bold blue.
    pub fn prompt(&self, cwd: Option<&Path>) -> String {
        let dir = cwd.map_or_else(|| "?".to_string(), |p| p.display().to_string());
        if !self.enabled() {
            return format!("[{}]> ", dir);
        }

        let dir_style = Style::builder().foreground(Color::Blue).bold().build();
        format!("[{}]> ", dir.style(dir_style))
    }

    pub fn error(&self, message: &str) -> String {
        if !self.enabled() {
            return message.to_string();
        }

        let error_style = Style::builder().foreground(Color::Red).build();
        message.style(error_style).to_string()
    }
}
