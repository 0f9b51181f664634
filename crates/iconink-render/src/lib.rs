//! IconInk rendering: drives a CPU drawing surface over parsed icon
//! geometry or embedded raster payloads, and memoizes the resulting
//! bitmaps process-wide.
//!
//! The entry point is [`IconRenderContext::render`]; everything else is
//! plumbing it orchestrates.

pub mod bitmap;
pub mod cache;
pub mod context;
pub mod error;
pub mod raster_image;
pub mod raster_vector;

pub use bitmap::RenderedBitmap;
pub use cache::IconCache;
pub use context::IconRenderContext;
pub use error::{RenderError, RenderResult};
pub use raster_image::ResizeFilter;
