//! UI theme definitions.

use egui::{Color32, Visuals};

use crate::workouts::WorkoutKind;

/// Running accent (green)
pub const RUNNING: Color32 = Color32::from_rgb(0, 196, 106);
/// Cycling accent (orange)
pub const CYCLING: Color32 = Color32::from_rgb(255, 181, 69);
/// Validation banner and destructive actions
pub const ERROR: Color32 = Color32::from_rgb(234, 67, 53);
/// Location alert
pub const WARNING: Color32 = Color32::from_rgb(251, 188, 4);

/// Light/dark mode of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    fn palette(&self) -> &'static Palette {
        match self {
            Theme::Dark => &Palette::DARK,
            Theme::Light => &Palette::LIGHT,
        }
    }

    /// egui visuals with the palette applied.
    pub fn visuals(&self) -> Visuals {
        let base = match self {
            Theme::Dark => Visuals::dark(),
            Theme::Light => Visuals::light(),
        };
        self.palette().apply(base)
    }

    /// The other theme.
    pub fn toggled(&self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

/// Surface and text colours shared by the sidebar, the cards and the map.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Palette {
    /// Map plot background
    map_bg: Color32,
    /// Sidebar and window fill
    panel: Color32,
    /// Workout card fill
    card: Color32,
    /// Card values and headings
    text: Color32,
    /// Units and hints
    muted: Color32,
    /// Widget outlines
    border: Color32,
    /// Opacity of the accent behind selections
    selection_alpha: f32,
}

impl Palette {
    const DARK: Palette = Palette {
        map_bg: Color32::from_rgb(45, 52, 57),
        panel: Color32::from_rgb(45, 52, 57),
        card: Color32::from_rgb(66, 72, 77),
        text: Color32::from_rgb(236, 239, 241),
        muted: Color32::from_rgb(170, 170, 170),
        border: Color32::from_rgb(80, 86, 92),
        selection_alpha: 0.4,
    };

    const LIGHT: Palette = Palette {
        map_bg: Color32::from_rgb(232, 236, 230),
        panel: Color32::from_rgb(255, 255, 255),
        card: Color32::from_rgb(240, 242, 244),
        text: Color32::from_rgb(32, 32, 40),
        muted: Color32::from_rgb(96, 96, 104),
        border: Color32::from_rgb(218, 218, 224),
        selection_alpha: 0.2,
    };

    fn apply(&self, mut visuals: Visuals) -> Visuals {
        visuals.window_fill = self.panel;
        visuals.panel_fill = self.panel;
        visuals.faint_bg_color = self.card;
        visuals.extreme_bg_color = self.map_bg;

        let widgets = &mut visuals.widgets;
        widgets.noninteractive.bg_fill = self.card;
        widgets.noninteractive.bg_stroke.color = self.border;
        widgets.noninteractive.fg_stroke.color = self.text;
        widgets.inactive.bg_fill = self.card;
        widgets.inactive.bg_stroke.color = self.border;
        widgets.inactive.fg_stroke.color = self.muted;
        widgets.hovered.fg_stroke.color = self.text;

        visuals.selection.bg_fill = RUNNING.linear_multiply(self.selection_alpha);
        visuals.selection.stroke.color = RUNNING;
        visuals
    }
}

/// Accent color for a workout kind, used for markers, popups and card borders.
pub fn kind_color(kind: WorkoutKind) -> Color32 {
    match kind {
        WorkoutKind::Running => RUNNING,
        WorkoutKind::Cycling => CYCLING,
    }
}
