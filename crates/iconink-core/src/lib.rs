//! IconInk Core Library
//!
//! Platform-agnostic data model and algorithms for the IconInk icon pipeline:
//! the path DSL parser, geometry and bounding boxes, the canvas fit transform,
//! and theme-aware color resolution. Nothing in this crate touches a native
//! drawing surface; that coupling lives behind [`builder::PathBuilder`].

pub mod asset;
pub mod builder;
pub mod catalog;
pub mod fit;
pub mod geometry;
pub mod parser;
pub mod theme;

pub use asset::{CacheKey, IconAsset, IconIdentity, IconKind, Quadrant, RenderRequest, ScaleConfig};
pub use builder::PathBuilder;
pub use catalog::IconCatalog;
pub use fit::fit;
pub use geometry::{IconGeometry, PathSegment, Subpath};
pub use parser::{parse, PathError};
pub use theme::{resolve, ResolvedTheme, ThemeMode};
