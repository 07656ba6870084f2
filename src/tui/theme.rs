//! Theme support for the TUI.

use ratatui::style::Color;

/// A complete color theme for the TUI.
///
/// Themes are runtime-only; the config file selects one by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Theme name for display and configuration
    pub name: String,
    /// Primary accent color (headers, active tab)
    pub primary: Color,
    /// Secondary accent color (labels, focused form field)
    pub secondary: Color,
    /// Main text color
    pub text: Color,
    /// Dimmed text color (guidance, placeholders)
    pub text_dim: Color,
    /// Border color
    pub border: Color,
    /// Success indicator color
    pub success: Color,
    /// Warning indicator color
    pub warning: Color,
    /// Error indicator color
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_theme()
    }
}

impl Theme {
    /// Default theme - works well on both light and dark terminals.
    pub fn default_theme() -> Self {
        Self {
            name: "default".to_string(),
            primary: Color::Rgb(99, 102, 241),     // Indigo
            secondary: Color::Rgb(16, 185, 129),   // Emerald
            text: Color::White,
            text_dim: Color::Rgb(156, 163, 175),   // Gray-400
            border: Color::Rgb(75, 85, 99),        // Gray-600
            success: Color::Rgb(34, 197, 94),      // Green
            warning: Color::Rgb(234, 179, 8),      // Yellow
            error: Color::Rgb(239, 68, 68),        // Red
        }
    }

    /// Dracula theme - dark purple and pink.
    pub fn dracula() -> Self {
        Self {
            name: "dracula".to_string(),
            primary: Color::Rgb(189, 147, 249),    // Purple
            secondary: Color::Rgb(80, 250, 123),   // Green
            text: Color::Rgb(248, 248, 242),       // Foreground
            text_dim: Color::Rgb(98, 114, 164),    // Comment
            border: Color::Rgb(68, 71, 90),        // Selection
            success: Color::Rgb(80, 250, 123),     // Green
            warning: Color::Rgb(255, 184, 108),    // Orange
            error: Color::Rgb(255, 85, 85),        // Red
        }
    }

    /// Look up a built-in theme by name.
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" => Some(Self::default_theme()),
            "dracula" => Some(Self::dracula()),
            _ => None,
        }
    }
}
