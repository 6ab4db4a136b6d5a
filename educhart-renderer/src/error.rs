//! Renderer error types.

use thiserror::Error;

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while turning a drawing into an image.
///
/// Layout and drawing emission never fail; only rasterization and file
/// output do.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The generated SVG could not be parsed.
    #[error("SVG parsing failed: {0}")]
    Svg(String),

    /// The target pixmap could not be allocated.
    #[error("Failed to create pixmap: {0}")]
    Pixmap(String),

    /// PNG encoding failed.
    #[error("PNG encoding failed: {0}")]
    Encode(String),

    /// Writing the exported file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
