//! Process-wide bitmap cache.
//!
//! Memoizes rendered bitmaps by [`CacheKey`] with no eviction: the owning
//! application's icon/size/color/mode combinations are small and bounded,
//! so entries simply live for the process. Reuse in a context with
//! unbounded distinct keys would need an LRU bound instead.
//!
//! There is no single-flight de-duplication: two threads missing on the
//! same key may both render, and the later insert wins. Both writers
//! produce identical pixels for identical keys, so this race is benign and
//! accepted.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use iconink_core::asset::CacheKey;

use crate::bitmap::RenderedBitmap;
use crate::error::{RenderError, RenderResult};

/// Shared, append-only bitmap cache.
#[derive(Debug, Default)]
pub struct IconCache {
    entries: RwLock<HashMap<CacheKey, Arc<RenderedBitmap>>>,
}

impl IconCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a cached bitmap.
    ///
    /// Verifies that the entry's dimensions match the key; a mismatch is
    /// reported as [`RenderError::CacheCorruption`] rather than handing
    /// back wrong-sized pixels.
    pub fn get(&self, key: &CacheKey) -> RenderResult<Option<Arc<RenderedBitmap>>> {
        let entries = self
            .entries
            .read()
            .map_err(|e| RenderError::Cache(e.to_string()))?;
        match entries.get(key) {
            None => Ok(None),
            Some(bitmap) => {
                if bitmap.width() != key.width || bitmap.height() != key.height {
                    return Err(RenderError::CacheCorruption {
                        width: key.width,
                        height: key.height,
                        found_width: bitmap.width(),
                        found_height: bitmap.height(),
                    });
                }
                Ok(Some(Arc::clone(bitmap)))
            }
        }
    }

    /// Store a freshly rendered bitmap, returning the shared handle.
    /// Overwrites any entry racing writers left behind.
    pub fn insert(&self, key: CacheKey, bitmap: RenderedBitmap) -> RenderResult<Arc<RenderedBitmap>> {
        let bitmap = Arc::new(bitmap);
        let mut entries = self
            .entries
            .write()
            .map_err(|e| RenderError::Cache(e.to_string()))?;
        entries.insert(key, Arc::clone(&bitmap));
        Ok(bitmap)
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iconink_core::asset::{IconIdentity, RenderRequest};

    fn key(size: u32) -> CacheKey {
        let identity = IconIdentity::of_paths("M 0,0 L 1,1", "");
        CacheKey::new(identity, &RenderRequest::new(size), size, size)
    }

    fn bitmap(size: u32) -> RenderedBitmap {
        RenderedBitmap::new(size, size, vec![0u8; size as usize * size as usize * 4])
    }

    #[test]
    fn test_miss_then_hit() {
        let cache = IconCache::new();
        assert!(cache.get(&key(8)).unwrap().is_none());
        let stored = cache.insert(key(8), bitmap(8)).unwrap();
        let hit = cache.get(&key(8)).unwrap().unwrap();
        assert!(Arc::ptr_eq(&stored, &hit));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_distinct_keys_distinct_entries() {
        let cache = IconCache::new();
        cache.insert(key(8), bitmap(8)).unwrap();
        cache.insert(key(16), bitmap(16)).unwrap();
        assert_eq!(cache.len(), 2);
        assert!(cache.get(&key(8)).unwrap().is_some());
    }

    #[test]
    fn test_dimension_mismatch_is_corruption() {
        let cache = IconCache::new();
        // Force a wrong-sized entry in behind the key's back.
        cache.insert(key(8), bitmap(4)).unwrap();
        let err = cache.get(&key(8));
        assert!(matches!(err, Err(RenderError::CacheCorruption { width: 8, found_width: 4, .. })));
    }

    #[test]
    fn test_later_write_wins() {
        let cache = IconCache::new();
        cache.insert(key(8), bitmap(8)).unwrap();
        let mut second = bitmap(8);
        second.flatten_alpha(peniko::Color::WHITE);
        let stored = cache.insert(key(8), second).unwrap();
        let hit = cache.get(&key(8)).unwrap().unwrap();
        assert!(Arc::ptr_eq(&stored, &hit));
        assert!(hit.is_opaque());
        assert_eq!(cache.len(), 1);
    }
}
