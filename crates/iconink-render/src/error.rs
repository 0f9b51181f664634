//! Render-side errors.

use iconink_core::parser::PathError;
use thiserror::Error;

/// Errors from the rasterizing side of the pipeline.
///
/// A failed render is fatal to the single request only; callers fall back
/// to a placeholder rather than receiving silently corrupt pixels.
#[derive(Debug, Error)]
pub enum RenderError {
    /// No drawing surface could be allocated (headless context or a
    /// degenerate canvas size).
    #[error("no drawing surface available for {width}x{height}")]
    Surface { width: u32, height: u32 },
    #[error("path error: {0}")]
    Path(#[from] PathError),
    #[error("payload decode failed: {0}")]
    Decode(String),
    /// A cache entry's dimensions do not match its key. Should be
    /// unreachable if key derivation is correct; checked defensively.
    #[error("cache entry is {found_width}x{found_height}, key expects {width}x{height}")]
    CacheCorruption {
        width: u32,
        height: u32,
        found_width: u32,
        found_height: u32,
    },
    #[error("cache lock poisoned: {0}")]
    Cache(String),
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
