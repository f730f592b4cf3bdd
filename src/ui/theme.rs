use std::fs;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThemeColors {
    pub bg: String,
    pub fg: String,
    pub muted: String,
    pub accent: String,
    pub accent_dim: String,
    pub border: String,
    pub border_focused: String,
    pub header_bg: String,
    pub header_fg: String,
    pub bar_filled: String,
    pub bar_empty: String,
    pub answer_correct: String,
    pub answer_wrong: String,
    pub answer_selected: String,
    pub error: String,
    pub warning: String,
    pub success: String,
}

impl Theme {
    /// User theme files live in the config dir. Unknown names fall back to
    /// the built-in palettes.
    pub fn load(name: &str) -> Option<Self> {
        if let Some(config_dir) = dirs::config_dir() {
            let user_theme_path = config_dir
                .join("studyr")
                .join("themes")
                .join(format!("{name}.toml"));
            if let Ok(content) = fs::read_to_string(&user_theme_path) {
                if let Ok(theme) = toml::from_str::<Theme>(&content) {
                    return Some(theme);
                }
            }
        }

        match name {
            "midnight" => Some(Self::midnight()),
            "parchment" => Some(Self::parchment()),
            _ => None,
        }
    }

    pub fn available_themes() -> Vec<String> {
        vec!["midnight".to_string(), "parchment".to_string()]
    }

    fn midnight() -> Self {
        Self {
            name: "midnight".to_string(),
            colors: ThemeColors::default(),
        }
    }

    fn parchment() -> Self {
        Self {
            name: "parchment".to_string(),
            colors: ThemeColors {
                bg: "#f5f0e1".to_string(),
                fg: "#3b3228".to_string(),
                muted: "#8a7e6d".to_string(),
                accent: "#0d7a5f".to_string(),
                accent_dim: "#c9bfa8".to_string(),
                border: "#c9bfa8".to_string(),
                border_focused: "#0d7a5f".to_string(),
                header_bg: "#e7dfc9".to_string(),
                header_fg: "#3b3228".to_string(),
                bar_filled: "#0d7a5f".to_string(),
                bar_empty: "#ddd3bc".to_string(),
                answer_correct: "#0d7a5f".to_string(),
                answer_wrong: "#b3392f".to_string(),
                answer_selected: "#1a5fb4".to_string(),
                error: "#b3392f".to_string(),
                warning: "#b07d1a".to_string(),
                success: "#0d7a5f".to_string(),
            },
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::midnight()
    }
}

// Slate and emerald, after the web dashboards the layout imitates.
impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            bg: "#0f172a".to_string(),
            fg: "#e2e8f0".to_string(),
            muted: "#64748b".to_string(),
            accent: "#10b981".to_string(),
            accent_dim: "#1e293b".to_string(),
            border: "#334155".to_string(),
            border_focused: "#10b981".to_string(),
            header_bg: "#1e293b".to_string(),
            header_fg: "#e2e8f0".to_string(),
            bar_filled: "#10b981".to_string(),
            bar_empty: "#1e293b".to_string(),
            answer_correct: "#34d399".to_string(),
            answer_wrong: "#f87171".to_string(),
            answer_selected: "#60a5fa".to_string(),
            error: "#f87171".to_string(),
            warning: "#fbbf24".to_string(),
            success: "#34d399".to_string(),
        }
    }
}

impl ThemeColors {
    pub fn parse_color(hex: &str) -> Color {
        let hex = hex.trim_start_matches('#');
        if hex.len() == 6 {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return Color::Rgb(r, g, b);
            }
        }
        Color::White
    }

    pub fn bg(&self) -> Color { Self::parse_color(&self.bg) }
    pub fn fg(&self) -> Color { Self::parse_color(&self.fg) }
    pub fn muted(&self) -> Color { Self::parse_color(&self.muted) }
    pub fn accent(&self) -> Color { Self::parse_color(&self.accent) }
    pub fn accent_dim(&self) -> Color { Self::parse_color(&self.accent_dim) }
    pub fn border(&self) -> Color { Self::parse_color(&self.border) }
    pub fn border_focused(&self) -> Color { Self::parse_color(&self.border_focused) }
    pub fn header_bg(&self) -> Color { Self::parse_color(&self.header_bg) }
    pub fn header_fg(&self) -> Color { Self::parse_color(&self.header_fg) }
    pub fn bar_filled(&self) -> Color { Self::parse_color(&self.bar_filled) }
    pub fn bar_empty(&self) -> Color { Self::parse_color(&self.bar_empty) }
    pub fn answer_correct(&self) -> Color { Self::parse_color(&self.answer_correct) }
    pub fn answer_wrong(&self) -> Color { Self::parse_color(&self.answer_wrong) }
    pub fn answer_selected(&self) -> Color { Self::parse_color(&self.answer_selected) }
    pub fn error(&self) -> Color { Self::parse_color(&self.error) }
    pub fn warning(&self) -> Color { Self::parse_color(&self.warning) }
    pub fn success(&self) -> Color { Self::parse_color(&self.success) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color_valid_hex() {
        assert_eq!(ThemeColors::parse_color("#10b981"), Color::Rgb(16, 185, 129));
        assert_eq!(ThemeColors::parse_color("0f172a"), Color::Rgb(15, 23, 42));
    }

    #[test]
    fn test_parse_color_invalid_falls_back() {
        assert_eq!(ThemeColors::parse_color("nope"), Color::White);
        assert_eq!(ThemeColors::parse_color("#ff"), Color::White);
    }

    #[test]
    fn test_builtin_themes_loadable() {
        for name in Theme::available_themes() {
            assert!(Theme::load(&name).is_some(), "theme {name} should load");
        }
    }

    #[test]
    fn test_unknown_theme_is_none() {
        assert!(Theme::load("no-such-theme").is_none());
    }
}
