//! SVG serialization of a [`Drawing`].

use std::fmt::Write;

use educhart_core::{Pattern, PatternVariant};

use crate::drawing::{Color, Drawing, Line, Paint, Rect, ShapeKind, Text, TextAnchor};

const ARROW_MARKER_ID: &str = "arrow";
const MARKER_COLOR: Color = Color::rgb(0x47, 0x55, 0x69);

/// SVG element id of a pattern variant, e.g. `stripe-45` or `dots-dark`.
#[must_use]
pub fn pattern_element_id(pattern: Pattern, variant: PatternVariant) -> String {
    match variant {
        PatternVariant::Light => pattern.id().to_string(),
        PatternVariant::Dark => format!("{}-dark", pattern.id()),
    }
}

/// Serialize a drawing to an SVG document.
///
/// The document is `scale` times the logical size in pixels; the `viewBox`
/// stays at the logical size so all shapes scale uniformly.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn render_to_svg(drawing: &Drawing, scale: f32) -> String {
    let scale = f64::from(scale.max(f32::MIN_POSITIVE));
    let out_w = (drawing.width * scale).round().max(1.0) as u32;
    let out_h = (drawing.height * scale).round().max(1.0) as u32;

    let mut svg = String::with_capacity(8192);
    let _ = write!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{out_w}\" height=\"{out_h}\" viewBox=\"0 0 {} {}\">",
        drawing.width, drawing.height,
    );

    write_defs(&mut svg);

    let _ = write!(
        svg,
        "<rect width=\"{}\" height=\"{}\" fill=\"#ffffff\"/>",
        drawing.width, drawing.height,
    );

    for shape in drawing.shapes() {
        match &shape.kind {
            ShapeKind::Rect(rect) => write_rect(&mut svg, rect),
            ShapeKind::Line(line) => write_line(&mut svg, line),
            ShapeKind::Text(text) => write_text(&mut svg, text),
        }
    }

    svg.push_str("</svg>");
    svg
}

fn write_defs(svg: &mut String) {
    svg.push_str("<defs>");
    for variant in [PatternVariant::Light, PatternVariant::Dark] {
        for pattern in Pattern::ALL.into_iter().filter(|p| p.is_visible()) {
            write_pattern(svg, pattern, variant);
        }
    }
    let _ = write!(
        svg,
        "<marker id=\"{ARROW_MARKER_ID}\" viewBox=\"0 0 10 10\" refX=\"5\" refY=\"5\" markerWidth=\"6\" markerHeight=\"6\" orient=\"auto\"><path d=\"M 0 0 L 10 5 L 0 10 z\" fill=\"{}\"/></marker>",
        MARKER_COLOR.to_hex(),
    );
    svg.push_str("</defs>");
}

fn write_pattern(svg: &mut String, pattern: Pattern, variant: PatternVariant) {
    let (ink, opacity) = match variant {
        PatternVariant::Light => ("#ffffff", 0.4),
        PatternVariant::Dark => ("#475569", 0.2),
    };
    let id = pattern_element_id(pattern, variant);

    match pattern {
        Pattern::StripeForward | Pattern::StripeBackward => {
            let angle = if pattern == Pattern::StripeForward { 45 } else { -45 };
            let _ = write!(
                svg,
                "<pattern id=\"{id}\" patternUnits=\"userSpaceOnUse\" width=\"40\" height=\"40\" patternTransform=\"rotate({angle})\"><line x1=\"0\" y1=\"0\" x2=\"0\" y2=\"40\" stroke=\"{ink}\" stroke-width=\"15\" opacity=\"{opacity}\"/></pattern>",
            );
        }
        Pattern::Dots => {
            let _ = write!(
                svg,
                "<pattern id=\"{id}\" patternUnits=\"userSpaceOnUse\" width=\"30\" height=\"30\"><circle cx=\"15\" cy=\"15\" r=\"7\" fill=\"{ink}\" opacity=\"{opacity}\"/></pattern>",
            );
        }
        Pattern::Grid => {
            let _ = write!(
                svg,
                "<pattern id=\"{id}\" patternUnits=\"userSpaceOnUse\" width=\"40\" height=\"40\"><line x1=\"0\" y1=\"0\" x2=\"40\" y2=\"0\" stroke=\"{ink}\" stroke-width=\"8\" opacity=\"{opacity}\"/><line x1=\"0\" y1=\"0\" x2=\"0\" y2=\"40\" stroke=\"{ink}\" stroke-width=\"8\" opacity=\"{opacity}\"/></pattern>",
            );
        }
        Pattern::None => {}
    }
}

fn paint_value(paint: Paint) -> String {
    match paint {
        Paint::Solid(color) => color.to_hex(),
        Paint::Pattern { pattern, variant } => {
            format!("url(#{})", pattern_element_id(pattern, variant))
        }
    }
}

fn write_rect(svg: &mut String, rect: &Rect) {
    // Zero-height bars are part of the drawing but have nothing to paint.
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return;
    }
    let _ = write!(
        svg,
        "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" rx=\"{}\" fill=\"{}\"",
        rect.x,
        rect.y,
        rect.width,
        rect.height,
        rect.corner_radius,
        paint_value(rect.fill),
    );
    if let Some(stroke) = rect.stroke {
        let _ = write!(
            svg,
            " stroke=\"{}\" stroke-width=\"{}\"",
            stroke.color.to_hex(),
            stroke.width,
        );
    }
    svg.push_str("/>");
}

fn write_line(svg: &mut String, line: &Line) {
    let _ = write!(
        svg,
        "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\" stroke-width=\"{}\"",
        line.x1,
        line.y1,
        line.x2,
        line.y2,
        line.stroke.color.to_hex(),
        line.stroke.width,
    );
    if line.arrow {
        let _ = write!(svg, " marker-end=\"url(#{ARROW_MARKER_ID})\"");
    }
    svg.push_str("/>");
}

fn write_text(svg: &mut String, text: &Text) {
    if text.content.is_empty() {
        return;
    }
    let anchor = match text.anchor {
        TextAnchor::Start => "start",
        TextAnchor::Middle => "middle",
        TextAnchor::End => "end",
    };
    let _ = write!(
        svg,
        "<text x=\"{}\" y=\"{}\" font-size=\"{}\" font-family=\"sans-serif\" font-weight=\"{}\" text-anchor=\"{anchor}\" fill=\"{}\"",
        text.x,
        text.y,
        text.font_size,
        text.weight,
        text.fill.to_hex(),
    );
    if text.italic {
        svg.push_str(" font-style=\"italic\"");
    }
    let _ = write!(svg, ">{}</text>", escape_xml(&text.content));
}

/// Escape special XML characters.
fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
