//! Vector drawing description.
//!
//! A [`Drawing`] is a flat, ordered list of primitives in absolute canvas
//! units. Each primitive carries a [`Role`] so hosts and tests can pick out
//! bars, labels or legend entries without parsing SVG.

use educhart_core::{Pattern, PatternVariant, Swatch};

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Create a color from its channels.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Hex notation (`#rrggbb`).
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<Swatch> for Color {
    fn from(swatch: Swatch) -> Self {
        let [r, g, b] = swatch.rgb();
        Self::rgb(r, g, b)
    }
}

/// How a shape's interior is filled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    /// Solid color.
    Solid(Color),
    /// A catalog pattern in one of its contrast variants.
    Pattern {
        /// Pattern style.
        pattern: Pattern,
        /// Light or dark rendering.
        variant: PatternVariant,
    },
}

impl Paint {
    /// Pattern overlay for a bar of the given fill color, or `None` for
    /// [`Pattern::None`].
    #[must_use]
    pub fn overlay(pattern: Pattern, fill: Swatch) -> Option<Self> {
        pattern.is_visible().then(|| Self::Pattern {
            pattern,
            variant: PatternVariant::for_fill(fill),
        })
    }
}

/// A stroke outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in canvas units.
    pub width: f64,
}

/// Horizontal text alignment relative to the anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    /// Text starts at the anchor.
    Start,
    /// Text is centered on the anchor.
    Middle,
    /// Text ends at the anchor.
    End,
}

/// What a shape represents in the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Chart title.
    Title,
    /// Horizontal gridline at a tick.
    Gridline,
    /// Numeric tick label on the value axis.
    TickLabel,
    /// Value or category axis line.
    Axis,
    /// Axis name label.
    AxisName,
    /// Solid bar body.
    Bar,
    /// Pattern overlay on a bar.
    BarPattern,
    /// Numeric label above a bar.
    ValueLabel,
    /// Category label below the axis.
    CategoryLabel,
    /// Legend color swatch.
    LegendSwatch,
    /// Pattern preview over a legend swatch.
    LegendPattern,
    /// Legend caption text.
    LegendCaption,
}

/// A filled, optionally rounded and outlined rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
    /// Corner radius.
    pub corner_radius: f64,
    /// Interior fill.
    pub fill: Paint,
    /// Optional outline.
    pub stroke: Option<Stroke>,
}

/// A straight line, optionally ending in an arrowhead.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// Start x.
    pub x1: f64,
    /// Start y.
    pub y1: f64,
    /// End x.
    pub x2: f64,
    /// End y.
    pub y2: f64,
    /// Line stroke.
    pub stroke: Stroke,
    /// Whether an arrowhead is drawn at the end point.
    pub arrow: bool,
}

/// A single line of text.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    /// Anchor x.
    pub x: f64,
    /// Baseline y.
    pub y: f64,
    /// Text content, unescaped.
    pub content: String,
    /// Font size in canvas units.
    pub font_size: f64,
    /// Alignment relative to `x`.
    pub anchor: TextAnchor,
    /// CSS font weight (400 normal, 700 bold).
    pub weight: u16,
    /// Italic style.
    pub italic: bool,
    /// Text color.
    pub fill: Color,
}

/// Geometry of a shape.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    /// Rectangle.
    Rect(Rect),
    /// Line.
    Line(Line),
    /// Text.
    Text(Text),
}

/// A primitive tagged with its chart role.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    /// What the shape represents.
    pub role: Role,
    /// Series index (0 or 1) for bars, value labels and legend entries.
    pub series: Option<usize>,
    /// Geometry.
    pub kind: ShapeKind,
}

impl Shape {
    /// The rectangle geometry, if this is a rectangle.
    #[must_use]
    pub fn as_rect(&self) -> Option<&Rect> {
        match &self.kind {
            ShapeKind::Rect(rect) => Some(rect),
            _ => None,
        }
    }

    /// The text geometry, if this is text.
    #[must_use]
    pub fn as_text(&self) -> Option<&Text> {
        match &self.kind {
            ShapeKind::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// A complete chart drawing on a fixed logical canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Drawing {
    /// Logical canvas width.
    pub width: f64,
    /// Logical canvas height.
    pub height: f64,
    shapes: Vec<Shape>,
}

impl Drawing {
    /// Create an empty drawing.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            shapes: Vec::new(),
        }
    }

    /// Append a shape. Later shapes paint over earlier ones.
    pub fn push(&mut self, role: Role, series: Option<usize>, kind: ShapeKind) {
        self.shapes.push(Shape { role, series, kind });
    }

    /// All shapes in paint order.
    #[must_use]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Shapes with the given role, in paint order.
    pub fn with_role(&self, role: Role) -> impl Iterator<Item = &Shape> {
        self.shapes.iter().filter(move |s| s.role == role)
    }

    /// Bar bodies of one series, in row order.
    pub fn bars(&self, series: usize) -> impl Iterator<Item = &Rect> {
        self.with_role(Role::Bar)
            .filter(move |s| s.series == Some(series))
            .filter_map(Shape::as_rect)
    }

    /// Text content of every shape with the given role.
    #[must_use]
    pub fn texts(&self, role: Role) -> Vec<&str> {
        self.with_role(role)
            .filter_map(Shape::as_text)
            .map(|t| t.content.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_hex() {
        assert_eq!(Color::rgb(0x47, 0x55, 0x69).to_hex(), "#475569");
        assert_eq!(Color::from(Swatch::Emerald).to_hex(), Swatch::Emerald.hex());
    }

    #[test]
    fn test_overlay_variant_follows_fill() {
        assert_eq!(Paint::overlay(Pattern::None, Swatch::Blue), None);
        assert_eq!(
            Paint::overlay(Pattern::Dots, Swatch::White),
            Some(Paint::Pattern {
                pattern: Pattern::Dots,
                variant: PatternVariant::Dark
            })
        );
        assert_eq!(
            Paint::overlay(Pattern::Grid, Swatch::Pink),
            Some(Paint::Pattern {
                pattern: Pattern::Grid,
                variant: PatternVariant::Light
            })
        );
    }

    #[test]
    fn test_role_queries() {
        let mut drawing = Drawing::new(100.0, 100.0);
        let text = Text {
            x: 0.0,
            y: 0.0,
            content: "A".to_string(),
            font_size: 10.0,
            anchor: TextAnchor::Middle,
            weight: 400,
            italic: false,
            fill: Color::rgb(0, 0, 0),
        };
        drawing.push(Role::CategoryLabel, None, ShapeKind::Text(text));
        drawing.push(
            Role::Bar,
            Some(1),
            ShapeKind::Rect(Rect {
                x: 0.0,
                y: 0.0,
                width: 5.0,
                height: 5.0,
                corner_radius: 0.0,
                fill: Paint::Solid(Color::rgb(1, 2, 3)),
                stroke: None,
            }),
        );
        assert_eq!(drawing.texts(Role::CategoryLabel), ["A"]);
        assert_eq!(drawing.bars(0).count(), 0);
        assert_eq!(drawing.bars(1).count(), 1);
    }
}
