//! Parsed icon geometry: typed path segments grouped into subpaths.

use kurbo::{Point, Rect};

/// A single path segment in the normalized icon coordinate space.
///
/// Arcs keep the raw three-point form from the DSL (`thru` is a point on the
/// arc between the current point and `end`); they are lowered to cubic
/// Béziers by [`crate::builder::emit`] so backends never see them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    MoveTo(Point),
    LineTo(Point),
    QuadTo(Point, Point),
    CubicTo(Point, Point, Point),
    ArcTo { thru: Point, end: Point },
}

impl PathSegment {
    /// The endpoint this segment leaves the pen at.
    pub fn endpoint(&self) -> Point {
        match *self {
            PathSegment::MoveTo(p) => p,
            PathSegment::LineTo(p) => p,
            PathSegment::QuadTo(_, p) => p,
            PathSegment::CubicTo(_, _, p) => p,
            PathSegment::ArcTo { end, .. } => end,
        }
    }
}

/// An ordered run of segments starting with a `MoveTo`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Subpath {
    pub segments: Vec<PathSegment>,
    /// Explicitly closed with `Z`, or implicitly closed because the last
    /// endpoint returned to the starting point.
    pub closed: bool,
}

impl Subpath {
    /// Starting point of the subpath, if it has one.
    pub fn start(&self) -> Option<Point> {
        match self.segments.first() {
            Some(PathSegment::MoveTo(p)) => Some(*p),
            _ => None,
        }
    }

    /// True if the subpath contains nothing beyond its initial move.
    pub fn is_degenerate(&self) -> bool {
        self.segments.len() <= 1
    }
}

/// An ordered sequence of subpaths; one of the two geometry sets (fill or
/// stroke) associated with an icon. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IconGeometry {
    pub subpaths: Vec<Subpath>,
}

impl IconGeometry {
    pub fn is_empty(&self) -> bool {
        self.subpaths.iter().all(|s| s.segments.is_empty())
    }

    /// Axis-aligned bounding box over every vertex and control point.
    ///
    /// A safe superset of the rendered ink, not a tight hull. Empty geometry
    /// yields a zero rect at the origin.
    pub fn bounds(&self) -> Rect {
        let mut sink = crate::builder::NullBuilder;
        crate::builder::emit(self, &mut sink)
    }
}

/// Running min/max accumulator for bounding boxes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bounds(Option<Rect>);

impl Bounds {
    pub fn new() -> Self {
        Bounds(None)
    }

    pub fn add(&mut self, p: Point) {
        self.0 = Some(match self.0 {
            None => Rect::new(p.x, p.y, p.x, p.y),
            Some(r) => Rect::new(r.x0.min(p.x), r.y0.min(p.y), r.x1.max(p.x), r.y1.max(p.y)),
        });
    }

    pub fn union(&mut self, r: Rect) {
        self.add(Point::new(r.x0, r.y0));
        self.add(Point::new(r.x1, r.y1));
    }

    pub fn rect(self) -> Rect {
        self.0.unwrap_or(Rect::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint() {
        let seg = PathSegment::QuadTo(Point::new(5.0, 0.0), Point::new(10.0, 10.0));
        assert_eq!(seg.endpoint(), Point::new(10.0, 10.0));
        let arc = PathSegment::ArcTo {
            thru: Point::new(5.0, 5.0),
            end: Point::new(10.0, 0.0),
        };
        assert_eq!(arc.endpoint(), Point::new(10.0, 0.0));
    }

    #[test]
    fn test_bounds_accumulator() {
        let mut b = Bounds::new();
        assert_eq!(b.rect(), Rect::ZERO);
        b.add(Point::new(3.0, -1.0));
        b.add(Point::new(-2.0, 7.0));
        assert_eq!(b.rect(), Rect::new(-2.0, -1.0, 3.0, 7.0));
    }

    #[test]
    fn test_empty_geometry() {
        let geo = IconGeometry::default();
        assert!(geo.is_empty());
        assert_eq!(geo.bounds(), Rect::ZERO);
    }
}
