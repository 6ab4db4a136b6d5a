//! Raster export of a rendered chart.
//!
//! Rasterizes a [`Drawing`] to PNG through its SVG representation and the
//! resvg/tiny-skia pipeline. The same path backs the desktop live preview
//! at a lower scale.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::drawing::Drawing;
use crate::error::{RenderError, RenderResult};
use crate::svg::render_to_svg;

/// Prefix of exported file names.
pub const EXPORT_PREFIX: &str = "EduChart";

/// Preferred faces for the generic `sans-serif` family, in order.
const SANS_SERIF_CANDIDATES: [&str; 7] = [
    "Arial",
    "Helvetica",
    "Liberation Sans",
    "DejaVu Sans",
    "Noto Sans",
    "Roboto",
    "Segoe UI",
];

/// Configuration for chart export.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Pixel density relative to the logical canvas (default: 2.0).
    pub scale: f32,
    /// Background color as RGBA bytes (default: opaque white).
    pub background: [u8; 4],
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            scale: 2.0,
            background: [255, 255, 255, 255],
        }
    }
}

/// Rasterizes drawings to pixmaps and PNG files.
///
/// Cloning is cheap: the font database is shared.
#[derive(Clone)]
pub struct ChartExporter {
    config: ExportConfig,
    fontdb: Arc<usvg::fontdb::Database>,
    font_family: Option<String>,
}

impl std::fmt::Debug for ChartExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChartExporter")
            .field("config", &self.config)
            .field("fonts", &self.fontdb.len())
            .field("font_family", &self.font_family)
            .finish()
    }
}

impl ChartExporter {
    /// Create an exporter, loading the system fonts once.
    ///
    /// The generic `sans-serif` family is pointed at an installed face so
    /// chart text renders on hosts without Arial.
    #[must_use]
    pub fn new(config: ExportConfig) -> Self {
        let mut fontdb = usvg::fontdb::Database::new();
        fontdb.load_system_fonts();
        tracing::debug!("Loaded {} font faces for export", fontdb.len());

        let font_family = resolve_sans_serif(&fontdb);
        match &font_family {
            Some(family) => {
                tracing::debug!("Using \"{family}\" for sans-serif text");
                fontdb.set_sans_serif_family(family.clone());
            }
            None => tracing::warn!("No usable font faces found, chart text will not render"),
        }

        Self {
            config,
            fontdb: Arc::new(fontdb),
            font_family,
        }
    }

    /// Create an exporter with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(ExportConfig::default())
    }

    /// Font family chart text is rendered with, if any face is installed.
    #[must_use]
    pub fn font_family(&self) -> Option<&str> {
        self.font_family.as_deref()
    }

    /// Rasterize a drawing at the given scale onto the configured background.
    ///
    /// # Errors
    ///
    /// Returns an error if the SVG cannot be parsed or the pixmap cannot be
    /// allocated.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn rasterize(&self, drawing: &Drawing, scale: f32) -> RenderResult<tiny_skia::Pixmap> {
        let svg = render_to_svg(drawing, scale);

        let mut opt = usvg::Options::default();
        opt.fontdb = Arc::clone(&self.fontdb);
        if let Some(family) = &self.font_family {
            opt.font_family.clone_from(family);
        }
        let tree =
            usvg::Tree::from_str(&svg, &opt).map_err(|e| RenderError::Svg(e.to_string()))?;

        let size = tree.size().to_int_size();
        let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height()).ok_or_else(|| {
            RenderError::Pixmap(format!("{}x{}", size.width(), size.height()))
        })?;

        let [r, g, b, a] = self.config.background;
        pixmap.fill(tiny_skia::Color::from_rgba8(r, g, b, a));
        resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

        Ok(pixmap)
    }

    /// Rasterize a drawing at the configured scale and encode it as PNG.
    ///
    /// # Errors
    ///
    /// Returns an error if rasterization or encoding fails.
    pub fn render_to_png(&self, drawing: &Drawing) -> RenderResult<Vec<u8>> {
        let pixmap = self.rasterize(drawing, self.config.scale)?;
        pixmap
            .encode_png()
            .map_err(|e| RenderError::Encode(e.to_string()))
    }

    /// Export a drawing as `EduChart-<millis>.png` into `dir`.
    ///
    /// Nothing is written if rendering fails.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering, encoding or writing fails.
    pub fn export_to_dir(
        &self,
        drawing: &Drawing,
        dir: &Path,
        now: SystemTime,
    ) -> RenderResult<PathBuf> {
        let png = self.render_to_png(drawing)?;
        let path = dir.join(export_filename(now));
        std::fs::write(&path, &png)?;
        tracing::info!("Exported chart to {} ({} bytes)", path.display(), png.len());
        Ok(path)
    }
}

fn has_family(fontdb: &usvg::fontdb::Database, name: &str) -> bool {
    let families = [usvg::fontdb::Family::Name(name)];
    let query = usvg::fontdb::Query {
        families: &families,
        ..usvg::fontdb::Query::default()
    };
    fontdb.query(&query).is_some()
}

/// First installed candidate face, else the family of any installed face.
fn resolve_sans_serif(fontdb: &usvg::fontdb::Database) -> Option<String> {
    SANS_SERIF_CANDIDATES
        .iter()
        .find(|name| has_family(fontdb, name))
        .map(|name| (*name).to_string())
        .or_else(|| {
            fontdb
                .faces()
                .find_map(|face| face.families.first().map(|(name, _)| name.clone()))
        })
}

/// File name for an export taken at `now`: `EduChart-<unix-epoch-millis>.png`.
#[must_use]
pub fn export_filename(now: SystemTime) -> String {
    let millis = now
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    format!("{EXPORT_PREFIX}-{millis}.png")
}
