use std::collections::HashMap;

use ratatui::style::Color;

use crate::model::{Priority, ThemeName};

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: ThemeName,
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    /// Accent of the selected palette: borders, active filter, cursor
    pub highlight: Color,
    pub dim: Color,
    pub red: Color,
    pub yellow: Color,
    pub green: Color,
    pub orange: Color,
    pub selection_bg: Color,
    pub search_match_bg: Color,
    pub search_match_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::palette(ThemeName::default())
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// The built-in palette for `name`
    pub fn palette(name: ThemeName) -> Self {
        let (highlight, selection_bg) = match name {
            ThemeName::Indigo => (Color::Rgb(0x81, 0x8C, 0xF8), Color::Rgb(0x1E, 0x1B, 0x4B)),
            ThemeName::Purple => (Color::Rgb(0xC0, 0x84, 0xFC), Color::Rgb(0x3B, 0x07, 0x64)),
            ThemeName::Teal => (Color::Rgb(0x2D, 0xD4, 0xBF), Color::Rgb(0x04, 0x2F, 0x2E)),
            ThemeName::Rose => (Color::Rgb(0xFB, 0x71, 0x85), Color::Rgb(0x4C, 0x05, 0x19)),
        };
        Theme {
            name,
            background: Color::Rgb(0x0F, 0x11, 0x1A),
            text: Color::Rgb(0xCB, 0xD5, 0xE1),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight,
            dim: Color::Rgb(0x64, 0x74, 0x8B),
            red: Color::Rgb(0xFF, 0x44, 0x44),
            yellow: Color::Rgb(0xFF, 0xD7, 0x00),
            green: Color::Rgb(0x44, 0xFF, 0x88),
            orange: Color::Rgb(0xFF, 0x9F, 0x43),
            selection_bg,
            search_match_bg: highlight,
            search_match_fg: Color::Rgb(0x0F, 0x11, 0x1A),
        }
    }

    /// Palette for `name` with `[ui.colors]` overrides applied
    pub fn with_overrides(name: ThemeName, colors: &HashMap<String, String>) -> Self {
        let mut theme = Theme::palette(name);

        for (key, value) in colors {
            let Some(color) = parse_hex_color(value) else {
                tracing::warn!(key, value, "ignoring color override that is not #RRGGBB");
                continue;
            };
            match key.as_str() {
                "background" => theme.background = color,
                "text" => theme.text = color,
                "text_bright" => theme.text_bright = color,
                "highlight" => theme.highlight = color,
                "dim" => theme.dim = color,
                "red" => theme.red = color,
                "yellow" => theme.yellow = color,
                "green" => theme.green = color,
                "orange" => theme.orange = color,
                "selection_bg" => theme.selection_bg = color,
                "search_match_bg" => theme.search_match_bg = color,
                "search_match_fg" => theme.search_match_fg = color,
                _ => tracing::warn!(key, "unknown color override"),
            }
        }

        theme
    }

    /// Badge color for a priority
    pub fn priority_color(&self, priority: Priority) -> Color {
        match priority {
            Priority::Low => self.green,
            Priority::Medium => self.yellow,
            Priority::High => self.red,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(
            parse_hex_color("#FF4444"),
            Some(Color::Rgb(0xFF, 0x44, 0x44))
        );
        assert_eq!(parse_hex_color("FF4444"), None); // missing #
        assert_eq!(parse_hex_color("#FF44"), None); // too short
        assert_eq!(parse_hex_color("#ZZZZZZ"), None); // invalid hex
        assert_eq!(parse_hex_color("#a\u{e9}\u{e9}b"), None); // six bytes, not six digits
        assert_eq!(parse_hex_color("#+1+1+1"), None);
    }

    #[test]
    fn non_ascii_override_is_ignored() {
        let overrides = HashMap::from([("red".to_string(), "#a\u{e9}\u{e9}b".to_string())]);
        let theme = Theme::with_overrides(ThemeName::Indigo, &overrides);
        assert_eq!(theme.red, Theme::palette(ThemeName::Indigo).red);
    }

    #[test]
    fn palettes_differ_only_in_accent() {
        let indigo = Theme::palette(ThemeName::Indigo);
        let rose = Theme::palette(ThemeName::Rose);
        assert_ne!(indigo.highlight, rose.highlight);
        assert_ne!(indigo.selection_bg, rose.selection_bg);
        assert_eq!(indigo.background, rose.background);
        assert_eq!(indigo.red, rose.red);
        assert_eq!(rose.name, ThemeName::Rose);
    }

    #[test]
    fn overrides_apply_on_top_of_palette() {
        let mut colors = HashMap::new();
        colors.insert("background".to_string(), "#000000".to_string());
        colors.insert("red".to_string(), "not-a-color".to_string());

        let theme = Theme::with_overrides(ThemeName::Teal, &colors);
        assert_eq!(theme.background, Color::Rgb(0, 0, 0));
        // Invalid value leaves the default alone
        assert_eq!(theme.red, Color::Rgb(0xFF, 0x44, 0x44));
        assert_eq!(theme.highlight, Theme::palette(ThemeName::Teal).highlight);
    }

    #[test]
    fn priority_colors() {
        let theme = Theme::default();
        assert_eq!(theme.priority_color(Priority::High), theme.red);
        assert_eq!(theme.priority_color(Priority::Medium), theme.yellow);
        assert_eq!(theme.priority_color(Priority::Low), theme.green);
    }
}
