//! Theme colors, optionally overridden from the `[theme]` config table

use ratatui::style::Color;

use crate::config::ThemeOverrides;
use crate::inventory::StockStatus;
use crate::notify::Severity;

/// Theme colors for the UI
#[derive(Debug, Clone)]
pub struct Theme {
    pub accent: Color,      // Active borders, key hints
    pub success: Color,     // In stock, success toasts
    pub warning: Color,     // Low stock, warnings
    pub danger: Color,      // Out of stock, errors
    pub info: Color,        // Info toasts
    pub text: Color,        // Primary text
    pub text_dim: Color,    // Secondary text
    pub bg_selected: Color, // Selected row background
    pub inactive: Color,    // Unfocused borders
    pub header: Color,      // Table headers
}

impl Default for Theme {
    fn default() -> Self {
        // Catppuccin-inspired
        Self {
            accent: Color::Rgb(250, 179, 135),
            success: Color::Rgb(166, 218, 149),
            warning: Color::Rgb(238, 212, 159),
            danger: Color::Rgb(243, 139, 168),
            info: Color::Rgb(137, 180, 250),
            text: Color::Rgb(205, 214, 244),
            text_dim: Color::Rgb(147, 153, 178),
            bg_selected: Color::Rgb(69, 71, 90),
            inactive: Color::Rgb(88, 91, 112),
            header: Color::Rgb(180, 190, 254),
        }
    }
}

impl Theme {
    /// Default palette with any valid overrides applied; invalid ones are logged and ignored
    pub fn from_overrides(overrides: &ThemeOverrides) -> Self {
        let mut theme = Self::default();

        let slots: [(&str, &Option<String>, &mut Color); 6] = [
            ("accent", &overrides.accent, &mut theme.accent),
            ("success", &overrides.success, &mut theme.success),
            ("warning", &overrides.warning, &mut theme.warning),
            ("danger", &overrides.danger, &mut theme.danger),
            ("info", &overrides.info, &mut theme.info),
            ("text", &overrides.text, &mut theme.text),
        ];

        for (key, value, slot) in slots {
            if let Some(value) = value {
                match Self::parse_hex_color(value) {
                    Some(color) => *slot = color,
                    None => tracing::warn!("Ignoring invalid theme color {} = {:?}", key, value),
                }
            }
        }

        theme
    }

    pub fn severity_color(&self, severity: Severity) -> Color {
        match severity {
            Severity::Success => self.success,
            Severity::Error => self.danger,
            Severity::Warning => self.warning,
            Severity::Info => self.info,
        }
    }

    pub fn status_color(&self, status: StockStatus) -> Color {
        match status {
            StockStatus::OutOfStock => self.danger,
            StockStatus::LowStock => self.warning,
            StockStatus::InStock => self.success,
        }
    }

    /// Parse a hex color string (#RRGGBB or #RGB)
    fn parse_hex_color(s: &str) -> Option<Color> {
        let s = s.trim().trim_start_matches('#');
        if !s.is_ascii() {
            return None;
        }

        if s.len() == 6 {
            let r = u8::from_str_radix(&s[0..2], 16).ok()?;
            let g = u8::from_str_radix(&s[2..4], 16).ok()?;
            let b = u8::from_str_radix(&s[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        } else if s.len() == 3 {
            let r = u8::from_str_radix(&s[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&s[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&s[2..3], 16).ok()? * 17;
            Some(Color::Rgb(r, g, b))
        } else {
            None
        }
    }
}
