//! Console output formatting with ANSI color support.
//!
//! Provides styled terminal output with automatic TTY detection
//! and respect for the NO_COLOR environment variable.

use std::io::{self, IsTerminal};

/// ANSI style codes for terminal formatting.
#[derive(Debug, Clone, Copy)]
pub enum Style {
    Bold,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    Gray,
}

impl Style {
    /// Returns the ANSI escape code for this style.
    fn code(self) -> &'static str {
        match self {
            Style::Bold => "1",
            Style::Red => "31",
            Style::Green => "32",
            Style::Yellow => "33",
            Style::Blue => "34",
            Style::Magenta => "35",
            Style::Cyan => "36",
            Style::Gray => "90",
        }
    }
}

const RESET: &str = "\x1b[0m";

/// Console output handler with color support detection.
#[derive(Debug, Clone, Copy)]
pub struct Console {
    colors_enabled: bool,
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

impl Console {
    /// Creates a new Console instance, detecting color support.
    ///
    /// Colors are disabled if:
    /// - The `NO_COLOR` environment variable is set
    /// - stdout is not a terminal (TTY)
    pub fn new() -> Self {
        let colors_enabled = std::env::var("NO_COLOR").is_err() && io::stdout().is_terminal();

        Self { colors_enabled }
    }

    /// Creates a Console with colors explicitly enabled or disabled.
    pub fn with_colors(enabled: bool) -> Self {
        Self {
            colors_enabled: enabled,
        }
    }

    /// Applies ANSI styles to text if colors are enabled.
    pub fn style(&self, text: &str, styles: &[Style]) -> String {
        if !self.colors_enabled || styles.is_empty() {
            return text.to_string();
        }

        let codes: Vec<&str> = styles.iter().map(|s| s.code()).collect();
        format!("\x1b[{}m{}{}", codes.join(";"), text, RESET)
    }

    /// Creates a bracketed tag like `[SONARR]`, styled as a whole.
    pub fn tag(&self, tag: &str, styles: &[Style]) -> String {
        self.style(&format!("[{}]", tag), styles)
    }

    /// Formats a count in bold green.
    pub fn count(&self, n: usize) -> String {
        self.style(&n.to_string(), &[Style::Green, Style::Bold])
    }

    /// Returns text styled as muted gray.
    pub fn muted(&self, text: &str) -> String {
        self.style(text, &[Style::Gray])
    }

    /// Prints an info message with a green `[INFO]` tag.
    pub fn info(&self, message: &str) {
        println!("{} {}", self.tag("INFO", &[Style::Green]), message);
    }

    /// Prints a warning message with a yellow `[WARN]` tag.
    pub fn warning(&self, message: &str) {
        println!("{} {}", self.tag("WARN", &[Style::Yellow, Style::Bold]), message);
    }

    /// Prints an error message with a red `!!! FATAL` marker.
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", self.style("!!! FATAL", &[Style::Red, Style::Bold]), message);
    }

    /// Prints a section header in blue bold.
    pub fn section(&self, message: &str) {
        println!("{}", self.style(message, &[Style::Blue, Style::Bold]));
    }

    /// Prints pre-rendered lines.
    pub fn print_lines(&self, lines: &[String]) {
        for line in lines {
            println!("{}", line);
        }
    }
}
