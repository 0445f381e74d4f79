use egui::{Color32, Stroke, Visuals};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
    Dark,
    Light,
}

/// Colours for every widget role, applied through egui's `Visuals`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemePalette {
    pub app_bg: Color32,
    /// Background of the input and output text areas.
    pub entry_bg: Color32,
    pub fg: Color32,
    pub button: Color32,
    pub border: Color32,
    pub deselected_bg: Color32,
    pub deselected_fg: Color32,
}

const DARK: ThemePalette = ThemePalette {
    app_bg: Color32::from_rgb(0x1a, 0x1a, 0x1a),
    entry_bg: Color32::from_rgb(0x3b, 0x3b, 0x3b),
    fg: Color32::WHITE,
    button: Color32::from_rgb(0x33, 0x33, 0x33),
    border: Color32::from_rgb(0x66, 0x65, 0x65),
    deselected_bg: Color32::from_rgb(0x2a, 0x2a, 0x2a),
    deselected_fg: Color32::from_rgb(0xaa, 0xaa, 0xaa),
};

const LIGHT: ThemePalette = ThemePalette {
    app_bg: Color32::from_rgb(0xf0, 0xf0, 0xf0),
    entry_bg: Color32::WHITE,
    fg: Color32::BLACK,
    button: Color32::WHITE,
    border: Color32::from_rgb(0xc9, 0xc7, 0xc7),
    deselected_bg: Color32::from_rgb(0xe0, 0xe0, 0xe0),
    deselected_fg: Color32::from_rgb(0x7a, 0x7a, 0x7a),
};

impl Theme {
    pub const ALL: [Theme; 2] = [Theme::Light, Theme::Dark];

    pub fn palette(&self) -> ThemePalette {
        match self {
            Theme::Dark => DARK,
            Theme::Light => LIGHT,
        }
    }

    pub fn visuals(&self) -> Visuals {
        let palette = self.palette();
        let mut vis = match self {
            Theme::Dark => Visuals::dark(),
            Theme::Light => Visuals::light(),
        };

        vis.override_text_color = Some(palette.fg);
        vis.panel_fill = palette.app_bg;
        vis.window_fill = palette.app_bg;
        vis.extreme_bg_color = palette.entry_bg;
        vis.faint_bg_color = palette.deselected_bg;

        vis.widgets.noninteractive.bg_stroke = Stroke::new(1.0, palette.border);
        vis.widgets.inactive.bg_fill = palette.button;
        vis.widgets.inactive.weak_bg_fill = palette.button;
        vis.widgets.inactive.fg_stroke = Stroke::new(1.0, palette.fg);
        vis.widgets.hovered.weak_bg_fill = palette.border;
        vis.widgets.hovered.bg_stroke = Stroke::new(1.5, palette.border);
        vis.widgets.active.bg_stroke = Stroke::new(2.0, palette.fg);
        vis
    }

    pub fn label(&self) -> &'static str {
        match self {
            Theme::Dark => "Dark",
            Theme::Light => "Light",
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Light
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_light() {
        assert_eq!(Theme::default(), Theme::Light);
    }

    #[test]
    fn visuals_follow_palette() {
        for theme in Theme::ALL {
            let palette = theme.palette();
            let vis = theme.visuals();
            assert_eq!(vis.panel_fill, palette.app_bg);
            assert_eq!(vis.extreme_bg_color, palette.entry_bg);
            assert_eq!(vis.override_text_color, Some(palette.fg));
        }
        assert!(Theme::Dark.visuals().dark_mode);
        assert!(!Theme::Light.visuals().dark_mode);
    }
}
