//! Presentational chart settings, the color palette and the pattern catalog.

use serde::{Deserialize, Serialize};

/// Number of series drawn per row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    /// One bar per row (value1).
    Single,
    /// Two side-by-side bars per row (value1 and value2).
    Double,
}

impl ChartType {
    /// Number of active series.
    #[must_use]
    pub fn series_count(self) -> usize {
        match self {
            Self::Single => 1,
            Self::Double => 2,
        }
    }
}

/// A color from the fixed palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Swatch {
    /// Blue.
    Blue,
    /// Red.
    Red,
    /// Emerald.
    Emerald,
    /// Amber.
    Amber,
    /// Violet.
    Violet,
    /// Pink.
    Pink,
    /// White.
    White,
}

impl Swatch {
    /// The palette in display order.
    pub const ALL: [Swatch; 7] = [
        Swatch::Blue,
        Swatch::Red,
        Swatch::Emerald,
        Swatch::Amber,
        Swatch::Violet,
        Swatch::Pink,
        Swatch::White,
    ];

    /// Hex color code (lowercase, `#rrggbb`).
    #[must_use]
    pub fn hex(self) -> &'static str {
        match self {
            Self::Blue => "#3b82f6",
            Self::Red => "#ef4444",
            Self::Emerald => "#10b981",
            Self::Amber => "#f59e0b",
            Self::Violet => "#8b5cf6",
            Self::Pink => "#ec4899",
            Self::White => "#ffffff",
        }
    }

    /// RGB components.
    #[must_use]
    pub fn rgb(self) -> [u8; 3] {
        match self {
            Self::Blue => [0x3b, 0x82, 0xf6],
            Self::Red => [0xef, 0x44, 0x44],
            Self::Emerald => [0x10, 0xb9, 0x81],
            Self::Amber => [0xf5, 0x9e, 0x0b],
            Self::Violet => [0x8b, 0x5c, 0xf6],
            Self::Pink => [0xec, 0x48, 0x99],
            Self::White => [0xff, 0xff, 0xff],
        }
    }

    /// Whether this is pure white.
    #[must_use]
    pub fn is_white(self) -> bool {
        self == Self::White
    }
}

/// Overlay fill pattern for a bar series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pattern {
    /// Solid color, no overlay.
    #[serde(rename = "none")]
    None,
    /// Diagonal stripes leaning forward (`/`).
    #[serde(rename = "stripe-45")]
    StripeForward,
    /// Diagonal stripes leaning backward (`\`).
    #[serde(rename = "stripe-135")]
    StripeBackward,
    /// Dot grid.
    #[serde(rename = "dots")]
    Dots,
    /// Square grid lines.
    #[serde(rename = "grid")]
    Grid,
}

impl Pattern {
    /// The catalog in display order.
    pub const ALL: [Pattern; 5] = [
        Pattern::None,
        Pattern::StripeForward,
        Pattern::StripeBackward,
        Pattern::Dots,
        Pattern::Grid,
    ];

    /// Stable identifier, also used as the SVG pattern id.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::StripeForward => "stripe-45",
            Self::StripeBackward => "stripe-135",
            Self::Dots => "dots",
            Self::Grid => "grid",
        }
    }

    /// Human-readable caption.
    #[must_use]
    pub fn caption(self) -> &'static str {
        match self {
            Self::None => "Màu trơn",
            Self::StripeForward => "Sọc chéo /",
            Self::StripeBackward => "Sọc chéo \\",
            Self::Dots => "Chấm bi",
            Self::Grid => "Kẻ ô",
        }
    }

    /// Single-character glyph for compact pickers.
    #[must_use]
    pub fn glyph(self) -> &'static str {
        match self {
            Self::None => "■",
            Self::StripeForward => "▧",
            Self::StripeBackward => "▨",
            Self::Dots => "⠿",
            Self::Grid => "▦",
        }
    }

    /// Whether the pattern draws an overlay at all.
    #[must_use]
    pub fn is_visible(self) -> bool {
        self != Self::None
    }
}

/// Contrast rendering of a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternVariant {
    /// Near-white translucent strokes, for colored bars.
    Light,
    /// Near-slate translucent strokes, for white bars.
    Dark,
}

impl PatternVariant {
    /// Pick the variant that stays visible on the given fill.
    #[must_use]
    pub fn for_fill(fill: Swatch) -> Self {
        if fill.is_white() {
            Self::Dark
        } else {
            Self::Light
        }
    }
}

/// Presentational options for the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSettings {
    /// Chart title.
    pub title: String,
    /// Category (horizontal) axis name.
    pub x_axis_name: String,
    /// Value (vertical) axis name.
    pub y_axis_name: String,
    /// Single or dual series.
    pub chart_type: ChartType,
    /// Fill color of series 1.
    pub color1: Swatch,
    /// Fill color of series 2.
    pub color2: Swatch,
    /// Overlay pattern of series 1.
    pub pattern1: Pattern,
    /// Overlay pattern of series 2.
    pub pattern2: Pattern,
    /// Whether value labels are drawn above the bars.
    pub show_labels: bool,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            title: "Biểu đồ số lượng học sinh".to_string(),
            x_axis_name: "Khối lớp".to_string(),
            y_axis_name: "Số học sinh".to_string(),
            chart_type: ChartType::Double,
            color1: Swatch::ALL[0],
            color2: Swatch::ALL[1],
            pattern1: Pattern::None,
            pattern2: Pattern::StripeForward,
            show_labels: true,
        }
    }
}

impl ChartSettings {
    /// Fill color of a series (0 or 1).
    #[must_use]
    pub fn color(&self, series: usize) -> Swatch {
        if series == 0 {
            self.color1
        } else {
            self.color2
        }
    }

    /// Overlay pattern of a series (0 or 1).
    #[must_use]
    pub fn pattern(&self, series: usize) -> Pattern {
        if series == 0 {
            self.pattern1
        } else {
            self.pattern2
        }
    }

    /// Merge a partial change. Returns whether anything changed.
    pub fn apply(&mut self, patch: SettingsPatch) -> bool {
        let before = self.clone();
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(name) = patch.x_axis_name {
            self.x_axis_name = name;
        }
        if let Some(name) = patch.y_axis_name {
            self.y_axis_name = name;
        }
        if let Some(chart_type) = patch.chart_type {
            self.chart_type = chart_type;
        }
        if let Some(color) = patch.color1 {
            self.color1 = color;
        }
        if let Some(color) = patch.color2 {
            self.color2 = color;
        }
        if let Some(pattern) = patch.pattern1 {
            self.pattern1 = pattern;
        }
        if let Some(pattern) = patch.pattern2 {
            self.pattern2 = pattern;
        }
        if let Some(show) = patch.show_labels {
            self.show_labels = show;
        }
        *self != before
    }
}

/// A partial settings change; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsPatch {
    /// New chart title.
    pub title: Option<String>,
    /// New category axis name.
    pub x_axis_name: Option<String>,
    /// New value axis name.
    pub y_axis_name: Option<String>,
    /// New chart type.
    pub chart_type: Option<ChartType>,
    /// New fill color of series 1.
    pub color1: Option<Swatch>,
    /// New fill color of series 2.
    pub color2: Option<Swatch>,
    /// New overlay pattern of series 1.
    pub pattern1: Option<Pattern>,
    /// New overlay pattern of series 2.
    pub pattern2: Option<Pattern>,
    /// Show or hide value labels.
    pub show_labels: Option<bool>,
}

impl SettingsPatch {
    /// Patch that only changes the chart type.
    #[must_use]
    pub fn chart_type(chart_type: ChartType) -> Self {
        Self {
            chart_type: Some(chart_type),
            ..Self::default()
        }
    }

    /// Patch that sets the color of one series.
    #[must_use]
    pub fn color(series: usize, swatch: Swatch) -> Self {
        if series == 0 {
            Self {
                color1: Some(swatch),
                ..Self::default()
            }
        } else {
            Self {
                color2: Some(swatch),
                ..Self::default()
            }
        }
    }

    /// Patch that sets the pattern of one series.
    #[must_use]
    pub fn pattern(series: usize, pattern: Pattern) -> Self {
        if series == 0 {
            Self {
                pattern1: Some(pattern),
                ..Self::default()
            }
        } else {
            Self {
                pattern2: Some(pattern),
                ..Self::default()
            }
        }
    }
}
