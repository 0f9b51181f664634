//! Named icon catalog with lazy parsing.
//!
//! Host applications declare their icon corpus once (path strings or
//! embedded payloads) and look assets up by name. Parsing happens on first
//! use and the parsed asset is kept, so the geometry cost is paid once per
//! icon regardless of how many sizes and colors it is rendered at.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::asset::IconAsset;
use crate::parser::PathError;

/// One declarative icon definition.
#[derive(Debug, Clone)]
enum IconDef {
    Vector { fill: String, stroke: String },
    RasterBase64(String),
}

/// Registry of named icon definitions, parsed on first use.
#[derive(Debug, Default)]
pub struct IconCatalog {
    defs: HashMap<String, IconDef>,
    parsed: RwLock<HashMap<String, Arc<IconAsset>>>,
}

impl IconCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a vector icon by its fill and stroke path strings. Either
    /// may be empty; validity is checked lazily at first lookup.
    pub fn register_vector(&mut self, name: impl Into<String>, fill: impl Into<String>, stroke: impl Into<String>) {
        self.defs.insert(
            name.into(),
            IconDef::Vector {
                fill: fill.into(),
                stroke: stroke.into(),
            },
        );
    }

    /// Register a raster icon from a base64-encoded payload.
    pub fn register_raster_base64(&mut self, name: impl Into<String>, encoded: impl Into<String>) {
        self.defs.insert(name.into(), IconDef::RasterBase64(encoded.into()));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.defs.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Look up an icon by name, parsing it on first use.
    ///
    /// Returns `None` for unknown names; parse failures surface as
    /// `Some(Err(..))` and are retried on the next lookup.
    pub fn get(&self, name: &str) -> Option<Result<Arc<IconAsset>, PathError>> {
        if let Some(asset) = self
            .parsed
            .read()
            .ok()
            .and_then(|cache| cache.get(name).cloned())
        {
            return Some(Ok(asset));
        }
        let def = self.defs.get(name)?;
        let asset = match def {
            IconDef::Vector { fill, stroke } => IconAsset::from_paths(fill, stroke),
            IconDef::RasterBase64(encoded) => IconAsset::from_payload_base64(encoded),
        };
        Some(asset.map(|asset| {
            let asset = Arc::new(asset);
            if let Ok(mut cache) = self.parsed.write() {
                cache.insert(name.to_string(), Arc::clone(&asset));
            }
            asset
        }))
    }
}
