//! Path emission through the `PathBuilder` capability.
//!
//! [`PathBuilder`] is the only seam where a native 2D graphics library is
//! allowed to couple to the pipeline. [`emit`] walks parsed geometry, lowers
//! three-point arcs to cubic Béziers and feeds the builder, while
//! accumulating a bounding box over every control point visited.

use kurbo::{Arc, Point, Vec2};

use crate::geometry::{Bounds, IconGeometry, PathSegment, Subpath};

/// Abstraction over a native path object. Arcs are lowered before reaching
/// the builder, so implementations only need the Bézier primitives.
pub trait PathBuilder {
    fn move_to(&mut self, p: Point);
    fn line_to(&mut self, p: Point);
    fn quad_to(&mut self, c: Point, p: Point);
    fn curve_to(&mut self, c1: Point, c2: Point, p: Point);
    fn close(&mut self);
}

/// Builder that discards all output; used for bounds-only passes.
pub struct NullBuilder;

impl PathBuilder for NullBuilder {
    fn move_to(&mut self, _: Point) {}
    fn line_to(&mut self, _: Point) {}
    fn quad_to(&mut self, _: Point, _: Point) {}
    fn curve_to(&mut self, _: Point, _: Point, _: Point) {}
    fn close(&mut self) {}
}

/// Flattening tolerance for arc-to-cubic lowering, in source units.
const ARC_TOLERANCE: f64 = 0.1;

/// A computed radius beyond this is treated as a collinear (infinite-radius)
/// arc and degraded to a straight line.
const ARC_RADIUS_LIMIT: f64 = 1.0e6;

/// Walk the geometry into `builder` and return its bounding box.
///
/// The box tracks every vertex and control point (including arc-lowered
/// cubic control points), so it is a safe superset of the rendered ink.
pub fn emit(geometry: &IconGeometry, builder: &mut impl PathBuilder) -> kurbo::Rect {
    let mut bounds = Bounds::new();
    for subpath in &geometry.subpaths {
        emit_subpath(subpath, builder, &mut bounds);
    }
    bounds.rect()
}

fn emit_subpath(subpath: &Subpath, builder: &mut impl PathBuilder, bounds: &mut Bounds) {
    let mut pen = Point::ZERO;
    for seg in &subpath.segments {
        match *seg {
            PathSegment::MoveTo(p) => {
                bounds.add(p);
                builder.move_to(p);
                pen = p;
            }
            PathSegment::LineTo(p) => {
                bounds.add(p);
                builder.line_to(p);
                pen = p;
            }
            PathSegment::QuadTo(c, p) => {
                bounds.add(c);
                bounds.add(p);
                builder.quad_to(c, p);
                pen = p;
            }
            PathSegment::CubicTo(c1, c2, p) => {
                bounds.add(c1);
                bounds.add(c2);
                bounds.add(p);
                builder.curve_to(c1, c2, p);
                pen = p;
            }
            PathSegment::ArcTo { thru, end } => {
                emit_arc(pen, thru, end, builder, bounds);
                pen = end;
            }
        }
    }
    if subpath.closed && !subpath.segments.is_empty() {
        builder.close();
    }
}

/// Lower a circular arc through three points into cubic Béziers.
///
/// The center is the perpendicular-bisector intersection of the two chords,
/// the radius the center-to-start distance, and the sweep direction is
/// chosen so the arc passes through `thru`. Collinear points (no finite
/// circle) degrade to a straight line.
fn emit_arc(start: Point, thru: Point, end: Point, builder: &mut impl PathBuilder, bounds: &mut Bounds) {
    bounds.add(thru);
    bounds.add(end);
    match solve_circle(start, thru, end) {
        Some((center, radius)) if radius <= ARC_RADIUS_LIMIT => {
            let a0 = (start - center).atan2();
            let a1 = (thru - center).atan2();
            let a2 = (end - center).atan2();
            let sweep = sweep_through(a0, a1, a2);
            let arc = Arc {
                center,
                radii: Vec2::new(radius, radius),
                start_angle: a0,
                sweep_angle: sweep,
                x_rotation: 0.0,
            };
            arc.to_cubic_beziers(ARC_TOLERANCE, |c1, c2, p| {
                bounds.add(c1);
                bounds.add(c2);
                bounds.add(p);
                builder.curve_to(c1, c2, p);
            });
        }
        _ => {
            // Infinite radius: the three points are (nearly) collinear.
            builder.line_to(end);
        }
    }
}

/// Center and radius of the circle through three points, or `None` when
/// they are collinear.
fn solve_circle(a: Point, b: Point, c: Point) -> Option<(Point, f64)> {
    let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
    if d.abs() < 1.0e-12 {
        return None;
    }
    let a2 = a.x * a.x + a.y * a.y;
    let b2 = b.x * b.x + b.y * b.y;
    let c2 = c.x * c.x + c.y * c.y;
    let ux = (a2 * (b.y - c.y) + b2 * (c.y - a.y) + c2 * (a.y - b.y)) / d;
    let uy = (a2 * (c.x - b.x) + b2 * (a.x - c.x) + c2 * (b.x - a.x)) / d;
    let center = Point::new(ux, uy);
    Some((center, (a - center).hypot()))
}

/// Signed sweep from `a0` to `a2` that passes through `a1`.
fn sweep_through(a0: f64, a1: f64, a2: f64) -> f64 {
    const TAU: f64 = std::f64::consts::TAU;
    let norm = |a: f64| {
        let mut a = a % TAU;
        if a < 0.0 {
            a += TAU;
        }
        a
    };
    let d_mid = norm(a1 - a0);
    let d_end = norm(a2 - a0);
    if d_mid <= d_end {
        d_end
    } else {
        d_end - TAU
    }
}
