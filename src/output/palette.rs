//! Terminal coloring strategy
//!
//! Formatters never call `colored` directly; they ask a `Palette`, which
//! either decorates text or passes it through untouched.

use colored::Colorize;

/// Color roles used across report and update output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    color: bool,
}

impl Palette {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Palette that emits ANSI colors
    pub fn colored() -> Self {
        Self::new(true)
    }

    /// Palette that returns text unchanged
    pub fn plain() -> Self {
        Self::new(false)
    }

    pub fn is_colored(&self) -> bool {
        self.color
    }

    pub fn package(&self, text: &str) -> String {
        self.paint(text, |t| t.blue().to_string())
    }

    pub fn current(&self, text: &str) -> String {
        self.paint(text, |t| t.yellow().to_string())
    }

    pub fn latest(&self, text: &str) -> String {
        self.paint(text, |t| t.green().to_string())
    }

    pub fn heading(&self, text: &str) -> String {
        self.paint(text, |t| t.blue().bold().to_string())
    }

    pub fn notice(&self, text: &str) -> String {
        self.paint(text, |t| t.yellow().to_string())
    }

    pub fn success(&self, text: &str) -> String {
        self.paint(text, |t| t.green().to_string())
    }

    /// Major version bumps
    pub fn breaking(&self, text: &str) -> String {
        self.paint(text, |t| t.red().bold().to_string())
    }

    pub fn failure(&self, text: &str) -> String {
        self.paint(text, |t| t.red().to_string())
    }

    pub fn dimmed(&self, text: &str) -> String {
        self.paint(text, |t| t.dimmed().to_string())
    }

    fn paint(&self, text: &str, style: impl FnOnce(&str) -> String) -> String {
        if self.color {
            style(text)
        } else {
            text.to_string()
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::colored()
    }
}
