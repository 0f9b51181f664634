//! Icon assets, render requests and cache identity.

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use peniko::Color;
use serde::{Deserialize, Serialize};

use crate::geometry::IconGeometry;
use crate::parser::{self, PathError};
use crate::theme::ThemeMode;

/// Stable content hash identifying a named icon. Derived from the declared
/// path strings (vector icons) or the payload bytes (raster icons); never
/// mutated after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IconIdentity(u64);

impl IconIdentity {
    pub fn of_paths(fill: &str, stroke: &str) -> Self {
        let mut hasher = std::hash::DefaultHasher::new();
        fill.hash(&mut hasher);
        stroke.hash(&mut hasher);
        IconIdentity(hasher.finish())
    }

    pub fn of_payload(data: &[u8]) -> Self {
        let mut hasher = std::hash::DefaultHasher::new();
        data.hash(&mut hasher);
        IconIdentity(hasher.finish())
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// The two kinds of icon source material.
#[derive(Debug, Clone)]
pub enum IconKind {
    /// Declarative vector geometry: fill subpaths and stroke subpaths.
    /// Either set may be empty, but not both.
    Vector {
        fill: IconGeometry,
        stroke: IconGeometry,
    },
    /// A pre-encoded raster payload (PNG/JPEG/WebP bytes).
    Raster { payload: Arc<Vec<u8>> },
}

/// An icon asset: its stable identity plus its source material.
#[derive(Debug, Clone)]
pub struct IconAsset {
    pub identity: IconIdentity,
    pub kind: IconKind,
}

impl IconAsset {
    /// Build a vector asset from fill and stroke path strings. An empty
    /// string yields empty geometry for that role; both empty is an error.
    pub fn from_paths(fill: &str, stroke: &str) -> Result<Self, PathError> {
        let parse_optional = |s: &str| -> Result<IconGeometry, PathError> {
            if s.trim().is_empty() {
                Ok(IconGeometry::default())
            } else {
                parser::parse(s)
            }
        };
        let fill_geo = parse_optional(fill)?;
        let stroke_geo = parse_optional(stroke)?;
        if fill_geo.is_empty() && stroke_geo.is_empty() {
            return Err(PathError::Empty);
        }
        Ok(IconAsset {
            identity: IconIdentity::of_paths(fill, stroke),
            kind: IconKind::Vector {
                fill: fill_geo,
                stroke: stroke_geo,
            },
        })
    }

    /// Build a raster asset from encoded image bytes.
    pub fn from_payload(data: Vec<u8>) -> Self {
        IconAsset {
            identity: IconIdentity::of_payload(&data),
            kind: IconKind::Raster {
                payload: Arc::new(data),
            },
        }
    }

    /// Build a raster asset from a base64-encoded payload, the form icon
    /// corpora embed bitmaps in source.
    pub fn from_payload_base64(encoded: &str) -> Result<Self, PathError> {
        use base64::{engine::general_purpose::STANDARD, Engine};
        let data = STANDARD
            .decode(encoded.trim())
            .map_err(|e| PathError::Payload(e.to_string()))?;
        Ok(Self::from_payload(data))
    }
}

/// Quadrant rotation applied to the source geometry or image before fitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Quadrant {
    #[default]
    R0,
    R90,
    R180,
    R270,
}

impl Quadrant {
    /// Number of quarter turns, 0..=3.
    pub fn turns(self) -> u8 {
        match self {
            Quadrant::R0 => 0,
            Quadrant::R90 => 1,
            Quadrant::R180 => 2,
            Quadrant::R270 => 3,
        }
    }

    pub fn from_turns(turns: u8) -> Self {
        match turns % 4 {
            0 => Quadrant::R0,
            1 => Quadrant::R90,
            2 => Quadrant::R180,
            _ => Quadrant::R270,
        }
    }

    /// Rotation angle in radians.
    pub fn radians(self) -> f64 {
        f64::from(self.turns()) * std::f64::consts::FRAC_PI_2
    }
}

/// Everything a caller specifies for one bitmap. Plain value type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderRequest {
    /// Target canvas size in pixels, before UI scaling.
    pub size: (u32, u32),
    /// Explicit foreground color; `None` uses the theme default.
    pub color: Option<Color>,
    pub quadrant: Quadrant,
    pub mode: ThemeMode,
    /// Padding in pixels on each canvas side.
    pub padding: u32,
}

impl RenderRequest {
    /// Square request with theme defaults and no rotation.
    pub fn new(size: u32) -> Self {
        RenderRequest {
            size: (size, size),
            color: None,
            quadrant: Quadrant::R0,
            mode: ThemeMode::Light,
            padding: 0,
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_mode(mut self, mode: ThemeMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_quadrant(mut self, quadrant: Quadrant) -> Self {
        self.quadrant = quadrant;
        self
    }

    pub fn with_padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }
}

/// Process-wide UI scale applied to every requested size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleConfig {
    /// Global scale factor (DPI / theme driven).
    pub factor: f64,
    /// Minimum pixel size after scaling.
    pub min_px: u32,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        ScaleConfig {
            factor: 1.0,
            min_px: 8,
        }
    }
}

impl ScaleConfig {
    /// Scale a requested size, clamping each axis to the minimum.
    pub fn apply(&self, (w, h): (u32, u32)) -> (u32, u32) {
        let scale = |v: u32| {
            let scaled = (f64::from(v) * self.factor).round();
            let scaled = if scaled.is_finite() && scaled > 0.0 { scaled as u32 } else { 0 };
            scaled.max(self.min_px)
        };
        (scale(w), scale(h))
    }
}

/// Deterministic memoization key: two requests producing the same key must
/// be visually identical, so the key covers identity, color, final pixel
/// size, theme mode, rotation and padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub identity: IconIdentity,
    /// Requested RGB, or `None` for the theme default.
    pub color: Option<[u8; 3]>,
    pub width: u32,
    pub height: u32,
    pub mode: ThemeMode,
    pub quadrant: Quadrant,
    pub padding: u32,
}

impl CacheKey {
    /// Derive the key for a request whose size has already been UI-scaled.
    pub fn new(identity: IconIdentity, request: &RenderRequest, width: u32, height: u32) -> Self {
        CacheKey {
            identity,
            color: request.color.map(|c| {
                let rgba = c.to_rgba8();
                [rgba.r, rgba.g, rgba.b]
            }),
            width,
            height,
            mode: request.mode,
            quadrant: request.quadrant,
            padding: request.padding,
        }
    }
}
