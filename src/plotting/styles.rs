use egui::{Color32, Visuals};
use plotters::style::RGBColor;
use std::collections::HashMap;
use std::str::FromStr;

/// Theme options recognised in configuration and resolved at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeOption {
    Accent,
    AccentActive,
    Border,
    Text,
    Popover,
    Grid,
    Background,
}

impl ThemeOption {
    pub const ALL: [ThemeOption; 7] = [
        ThemeOption::Accent,
        ThemeOption::AccentActive,
        ThemeOption::Border,
        ThemeOption::Text,
        ThemeOption::Popover,
        ThemeOption::Grid,
        ThemeOption::Background,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ThemeOption::Accent => "accent-color",
            ThemeOption::AccentActive => "accent-active-color",
            ThemeOption::Border => "border-color",
            ThemeOption::Text => "text-color",
            ThemeOption::Popover => "popover-color",
            ThemeOption::Grid => "grid-color",
            ThemeOption::Background => "background-color",
        }
    }
}

impl FromStr for ThemeOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ThemeOption::ALL
            .into_iter()
            .find(|option| option.name() == s)
            .ok_or_else(|| format!("unknown theme option `{}`", s))
    }
}

/// Chart theme configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ChartTheme {
    pub accent: Color32,
    pub accent_active: Color32,
    pub border: Color32,
    pub text: Color32,
    pub popover: Color32,
    pub grid: Color32,
    pub background: Color32,
}

impl ChartTheme {
    /// Derive the neutral colours from the host UI's visuals, keeping the teal accent
    pub fn from_visuals(visuals: &Visuals) -> Self {
        Self {
            border: visuals.widgets.noninteractive.bg_stroke.color,
            text: visuals.text_color(),
            popover: visuals.window_fill,
            grid: visuals.widgets.noninteractive.bg_stroke.color.gamma_multiply(0.6),
            background: visuals.panel_fill,
            ..Self::default()
        }
    }

    pub fn resolve(&self, option: ThemeOption) -> Color32 {
        match option {
            ThemeOption::Accent => self.accent,
            ThemeOption::AccentActive => self.accent_active,
            ThemeOption::Border => self.border,
            ThemeOption::Text => self.text,
            ThemeOption::Popover => self.popover,
            ThemeOption::Grid => self.grid,
            ThemeOption::Background => self.background,
        }
    }

    pub fn set(&mut self, option: ThemeOption, color: Color32) {
        let slot = match option {
            ThemeOption::Accent => &mut self.accent,
            ThemeOption::AccentActive => &mut self.accent_active,
            ThemeOption::Border => &mut self.border,
            ThemeOption::Text => &mut self.text,
            ThemeOption::Popover => &mut self.popover,
            ThemeOption::Grid => &mut self.grid,
            ThemeOption::Background => &mut self.background,
        };
        *slot = color;
    }

    /// Parse `option name -> #rrggbb` entries; bad entries are logged and skipped
    pub fn parse_overrides(overrides: &HashMap<String, String>) -> Vec<(ThemeOption, Color32)> {
        let mut parsed = Vec::with_capacity(overrides.len());
        for (name, value) in overrides {
            let option = match name.parse::<ThemeOption>() {
                Ok(option) => option,
                Err(e) => {
                    log::warn!("Ignoring theme override: {}", e);
                    continue;
                }
            };
            match parse_hex_color(value) {
                Some(color) => parsed.push((option, color)),
                None => log::warn!("Ignoring theme override {}: bad colour {:?}", name, value),
            }
        }
        parsed
    }

    pub fn with_overrides(mut self, overrides: &[(ThemeOption, Color32)]) -> Self {
        for &(option, color) in overrides {
            self.set(option, color);
        }
        self
    }

    pub fn apply_overrides(self, overrides: &HashMap<String, String>) -> Self {
        self.with_overrides(&Self::parse_overrides(overrides))
    }
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            accent: Color32::from_rgb(0x2d, 0xd4, 0xbf),
            accent_active: Color32::from_rgb(0x14, 0xb8, 0xa6),
            border: Color32::from_gray(60),
            text: Color32::from_gray(210),
            popover: Color32::from_gray(27),
            grid: Color32::from_gray(48),
            background: Color32::from_gray(20),
        }
    }
}

/// Chart style configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    pub line_width: u32,
    pub marker_radius: u32,
    pub active_marker_radius: f32,
    pub font_size: u32,
    pub margin: u32,
    pub label_area_size: u32,
    pub chart_height: f32,
    pub skeleton_height: f32,
    pub max_x_labels: usize,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            line_width: 2,
            marker_radius: 4,
            active_marker_radius: 6.0,
            font_size: 13,
            margin: 10,
            label_area_size: 36,
            chart_height: 300.0,
            skeleton_height: 256.0,
            max_x_labels: 8,
        }
    }
}

/// Parse `#rrggbb` (the leading `#` is optional)
pub fn parse_hex_color(value: &str) -> Option<Color32> {
    let hex = value.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Color32::from_rgb(channel(0)?, channel(2)?, channel(4)?))
}

pub(crate) fn to_rgb(color: Color32) -> RGBColor {
    RGBColor(color.r(), color.g(), color.b())
}
