use huddle_types::Theme;
use ratatui::style::Color;

use crate::app::App;

pub struct ThemeColors {
    pub primary: Color,
    pub secondary: Color,
    pub accent: Color,
    pub text: Color,
    pub text_dim: Color,
    pub background: Color,
    pub border: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub highlight_bg: Color,
}

/// Colors for the app's current theme
pub fn get_theme_colors(app: &App) -> ThemeColors {
    colors_for(app.theme)
}

pub fn colors_for(theme: Theme) -> ThemeColors {
    match theme {
        Theme::Light => ThemeColors {
            primary: Color::Rgb(0, 100, 200),        // Dark blue
            secondary: Color::Rgb(100, 50, 200),     // Purple
            accent: Color::Rgb(200, 0, 100),         // Magenta
            text: Color::Rgb(30, 30, 30),            // Almost black
            text_dim: Color::Rgb(100, 100, 100),     // Medium gray
            background: Color::Rgb(250, 250, 250),   // Off-white
            border: Color::Rgb(180, 180, 180),       // Light gray
            success: Color::Rgb(0, 150, 50),         // Dark green
            warning: Color::Rgb(200, 150, 0),        // Dark yellow
            error: Color::Rgb(200, 0, 0),            // Dark red
            highlight_bg: Color::Rgb(230, 240, 255), // Light blue tint
        },

        Theme::Dark => ThemeColors {
            primary: Color::Rgb(100, 200, 255),   // Light blue
            secondary: Color::Rgb(150, 150, 255), // Purple-blue
            accent: Color::Rgb(255, 100, 200),    // Pink
            text: Color::Rgb(220, 220, 220),      // Light gray
            text_dim: Color::Rgb(120, 120, 120),  // Medium gray
            background: Color::Rgb(20, 20, 25),   // Very dark blue-gray
            border: Color::Rgb(60, 60, 70),
            success: Color::Rgb(100, 255, 150),
            warning: Color::Rgb(255, 200, 100),
            error: Color::Rgb(255, 100, 100),
            highlight_bg: Color::Rgb(40, 40, 50),
        },
    }
}
