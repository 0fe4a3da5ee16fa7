//! Terminal styling and color utilities.
//!
//! ANSI escape code definitions and color detection for the enhanced output
//! format. Everything collapses to empty strings when color is disabled, so
//! renderers never need to branch on terminal capabilities themselves.

use wayfarer_lib::BadgeTone;

/// ANSI escape codes for text styling and colors.
pub mod colors {
    /// Reset all styling.
    pub const RESET: &str = "\x1b[0m";

    // Route badges (bold reverse video so the label reads as a sign)
    /// Highways.
    pub const BADGE_GREEN: &str = "\x1b[1;7;32m";
    /// Secondary roads.
    pub const BADGE_RED: &str = "\x1b[1;7;31m";
    /// Tertiary roads.
    pub const BADGE_YELLOW: &str = "\x1b[1;7;33m";
    /// Everything else.
    pub const BADGE_GRAY: &str = "\x1b[1;7;90m";

    /// Bright bold white for settlement names.
    pub const WHITE_BOLD: &str = "\x1b[1;97m";
    /// Gray for secondary details.
    pub const GRAY: &str = "\x1b[90m";
    /// Cyan for totals.
    pub const CYAN: &str = "\x1b[36m";
}

/// A collection of resolved color codes, either actual ANSI sequences
/// or empty strings when color is disabled.
#[derive(Debug, Clone, Copy)]
pub struct ColorPalette {
    pub reset: &'static str,
    pub badge_green: &'static str,
    pub badge_red: &'static str,
    pub badge_yellow: &'static str,
    pub badge_gray: &'static str,
    pub white_bold: &'static str,
    pub gray: &'static str,
    pub cyan: &'static str,
}

impl ColorPalette {
    /// Create a palette with actual ANSI color codes.
    #[must_use]
    pub const fn colored() -> Self {
        Self {
            reset: colors::RESET,
            badge_green: colors::BADGE_GREEN,
            badge_red: colors::BADGE_RED,
            badge_yellow: colors::BADGE_YELLOW,
            badge_gray: colors::BADGE_GRAY,
            white_bold: colors::WHITE_BOLD,
            gray: colors::GRAY,
            cyan: colors::CYAN,
        }
    }

    /// Create a palette with no colors (empty strings).
    #[must_use]
    pub const fn plain() -> Self {
        Self {
            reset: "",
            badge_green: "",
            badge_red: "",
            badge_yellow: "",
            badge_gray: "",
            white_bold: "",
            gray: "",
            cyan: "",
        }
    }

    /// Create a palette based on terminal capabilities.
    #[must_use]
    pub fn detect() -> Self {
        if supports_color() {
            Self::colored()
        } else {
            Self::plain()
        }
    }

    /// Escape sequence for a route badge of the given tone.
    #[must_use]
    pub const fn badge(&self, tone: BadgeTone) -> &'static str {
        match tone {
            BadgeTone::Green => self.badge_green,
            BadgeTone::Red => self.badge_red,
            BadgeTone::Yellow => self.badge_yellow,
            BadgeTone::Gray => self.badge_gray,
        }
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::detect()
    }
}

/// Check if the terminal supports ANSI color codes.
///
/// This function respects:
/// - The `NO_COLOR` environment variable (https://no-color.org/)
/// - The `TERM=dumb` convention for non-capable terminals
#[must_use]
pub fn supports_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if let Ok(term) = std::env::var("TERM") {
        if term.eq_ignore_ascii_case("dumb") {
            return false;
        }
    }
    true
}
