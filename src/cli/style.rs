//! Terminal styling for run summaries

use owo_colors::OwoColorize;
use std::fmt::Display;

/// Success marker
pub const CHECK: &str = "✓";

/// Failure or conflict marker
pub const CROSS: &str = "✗";

/// Semantic styles for any displayable value
pub trait Stylize: Display + Sized {
    /// Secondary text
    fn muted(&self) -> String {
        self.dimmed().to_string()
    }

    /// Headings and labels
    fn emphasis(&self) -> String {
        self.bold().to_string()
    }

    /// Branch names and counts
    fn accent(&self) -> String {
        self.cyan().to_string()
    }

    /// Completed work
    fn success(&self) -> String {
        self.green().to_string()
    }

    /// Conflicts that need a human
    fn warn(&self) -> String {
        self.yellow().to_string()
    }
}

impl<T: Display> Stylize for T {}

/// Step arrow used in plan listings
pub fn arrow() -> String {
    "→".muted()
}
