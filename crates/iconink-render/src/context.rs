//! The single render entry point.
//!
//! `IconRenderContext` owns the bitmap cache and the process-wide UI scale
//! config as explicit state, constructed once at application start and
//! passed by reference to render call sites. It orchestrates the full
//! pipeline: cache check, theme resolution, vector or raster rasterization,
//! contrast flattening, cache populate.

use std::sync::Arc;

use iconink_core::asset::{CacheKey, IconAsset, IconKind, RenderRequest, ScaleConfig};
use iconink_core::theme::{self, contrast_plate};

use crate::bitmap::RenderedBitmap;
use crate::cache::IconCache;
use crate::error::RenderResult;
use crate::raster_image::{self, ResizeFilter};
use crate::raster_vector;

/// Owns the cache and display configuration for icon rendering.
#[derive(Debug, Default)]
pub struct IconRenderContext {
    cache: IconCache,
    scale: ScaleConfig,
    filter: ResizeFilter,
}

impl IconRenderContext {
    pub fn new(scale: ScaleConfig) -> Self {
        IconRenderContext {
            cache: IconCache::new(),
            scale,
            filter: ResizeFilter::default(),
        }
    }

    /// Use a specific resampling filter for raster payloads.
    pub fn with_resize_filter(mut self, filter: ResizeFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn cache(&self) -> &IconCache {
        &self.cache
    }

    pub fn scale_config(&self) -> ScaleConfig {
        self.scale
    }

    /// Render (or fetch from cache) the bitmap for an asset and request.
    ///
    /// The requested size is UI-scaled and min-clamped first; the cache key
    /// is derived from the final pixel size, so the same logical request
    /// always maps to the same entry.
    pub fn render(&self, asset: &IconAsset, request: &RenderRequest) -> RenderResult<Arc<RenderedBitmap>> {
        let (width, height) = self.scale.apply(request.size);
        let key = CacheKey::new(asset.identity, request, width, height);
        if let Some(hit) = self.cache.get(&key)? {
            log::debug!("icon cache hit for {:016x} at {width}x{height}", asset.identity.raw());
            return Ok(hit);
        }
        log::debug!("icon cache miss for {:016x} at {width}x{height}", asset.identity.raw());

        let resolved = theme::resolve(request.color, request.mode);
        let mut bitmap = match &asset.kind {
            IconKind::Vector { fill, stroke } => raster_vector::render_vector(
                fill,
                stroke,
                &resolved,
                request.quadrant,
                width,
                height,
                f64::from(request.padding),
            )?,
            IconKind::Raster { payload } => {
                raster_image::render_raster(payload, request.quadrant, width, height, self.filter)?
            }
        };
        if resolved.needs_alpha_flatten {
            bitmap.flatten_alpha(contrast_plate(request.mode));
        }
        self.cache.insert(key, bitmap)
    }
}
