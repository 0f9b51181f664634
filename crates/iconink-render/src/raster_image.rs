//! Embedded raster payload pipeline.
//!
//! The parallel code path to vector rendering: a pre-encoded image is
//! decoded, rotated, resized to the (already UI-scaled) target size, and
//! handed back through the same [`RenderedBitmap`] contract. The alpha
//! flatten pass is applied by the caller, exactly as for vector output.

use image::imageops::{self, FilterType};
use image::RgbaImage;
use iconink_core::asset::Quadrant;

use crate::bitmap::RenderedBitmap;
use crate::error::{RenderError, RenderResult};

/// Resampling filter for payload resizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizeFilter {
    Nearest,
    #[default]
    Linear,
}

impl ResizeFilter {
    fn as_image_filter(self) -> FilterType {
        match self {
            ResizeFilter::Nearest => FilterType::Nearest,
            ResizeFilter::Linear => FilterType::Triangle,
        }
    }
}

/// Detected payload container format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadFormat {
    Png,
    Jpeg,
    WebP,
}

/// Detect the payload format from magic bytes.
pub fn sniff_format(data: &[u8]) -> Option<PayloadFormat> {
    if data.len() < 4 {
        return None;
    }
    if data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
        return Some(PayloadFormat::Png);
    }
    if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return Some(PayloadFormat::Jpeg);
    }
    if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
        return Some(PayloadFormat::WebP);
    }
    None
}

/// Decode, rotate and resize a raster payload to `width` x `height`.
///
/// Rotation happens on the source image before resampling, matching the
/// vector path where geometry is rotated before fitting.
pub fn render_raster(
    payload: &[u8],
    quadrant: Quadrant,
    width: u32,
    height: u32,
    filter: ResizeFilter,
) -> RenderResult<RenderedBitmap> {
    if width == 0 || height == 0 {
        return Err(RenderError::Surface { width, height });
    }
    if sniff_format(payload).is_none() {
        log::debug!("raster payload without a recognized magic prefix ({} bytes)", payload.len());
    }
    let decoded = image::load_from_memory(payload)
        .map_err(|e| RenderError::Decode(e.to_string()))?
        .to_rgba8();

    let rotated: RgbaImage = match quadrant {
        Quadrant::R0 => decoded,
        Quadrant::R90 => imageops::rotate90(&decoded),
        Quadrant::R180 => imageops::rotate180(&decoded),
        Quadrant::R270 => imageops::rotate270(&decoded),
    };

    let resized = if (rotated.width(), rotated.height()) == (width, height) {
        rotated
    } else {
        imageops::resize(&rotated, width, height, filter.as_image_filter())
    };

    Ok(RenderedBitmap::new(width, height, resized.into_raw()))
}
