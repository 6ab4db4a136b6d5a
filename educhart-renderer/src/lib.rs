//! # EduChart Renderer
//!
//! Turns a [`ChartSession`] into a vector drawing and, on demand, a PNG.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────────┐   ┌────────────┐   ┌─────────┐   ┌──────────────┐
//! │ rows+settings│──▶│ ChartLayout│──▶│ Drawing │──▶│ SVG ─▶ PNG   │
//! │ (session)    │   │ (scaling)  │   │ (shapes)│   │ resvg/skia   │
//! └──────────────┘   └────────────┘   └─────────┘   └──────────────┘
//! ```
//!
//! Every stage up to the SVG string is infallible: malformed or empty input
//! degrades to a sparse chart instead of an error.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod chart;
pub mod drawing;
pub mod error;
pub mod export;
pub mod layout;
pub mod svg;

pub use chart::render_chart;
pub use drawing::{Color, Drawing, Paint, Role, Shape, ShapeKind};
pub use error::{RenderError, RenderResult};
pub use export::{export_filename, ChartExporter, ExportConfig};
pub use layout::ChartLayout;
pub use svg::render_to_svg;

use educhart_core::ChartSession;

/// Render the full drawing for a session.
#[must_use]
pub fn render_session(session: &ChartSession) -> Drawing {
    render_chart(session.rows(), session.settings())
}
