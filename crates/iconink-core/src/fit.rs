//! Canvas fitting: the uniform scale + translation that places icon
//! geometry inside a target canvas with padding.

use kurbo::{Affine, Rect};

/// Extra margin added around the bounding box when stroke geometry is
/// present, so stroke caps are not clipped at the canvas edge.
pub const STROKE_MARGIN: f64 = 2.0;

/// Floor for the computed scale; keeps the transform invertible even for a
/// degenerate (zero or negative sized) canvas.
pub const MIN_SCALE: f64 = 1.0e-6;

/// Compute the transform fitting `bbox` into a `canvas_w` x `canvas_h`
/// canvas with `padding` pixels on each side.
///
/// `margin` inflates the box in source units before fitting (pass
/// [`STROKE_MARGIN`] when stroked geometry is drawn, 0.0 otherwise). The
/// composition is translate-then-scale: source points are shifted so the
/// padded box lands centered, then scaled into canvas units. With
/// `keep_aspect`, both axes share the smaller scale.
///
/// Degenerate inputs never produce a singular transform: a point-sized box
/// maps with scale 1 to the canvas center, a flat box fits by its finite
/// axis alone, and a zero-sized canvas clamps the scale to [`MIN_SCALE`].
pub fn fit(bbox: Rect, canvas_w: f64, canvas_h: f64, padding: f64, margin: f64, keep_aspect: bool) -> Affine {
    let padded = bbox.inflate(margin, margin);
    let clamp = |s: f64| if s.is_finite() && s > MIN_SCALE { s } else { MIN_SCALE };
    let axis_scale = |extent: f64, canvas: f64| {
        (extent > 0.0).then(|| clamp((canvas - 2.0 * padding) / extent))
    };

    // A flat axis contributes no extent; it borrows the finite axis's
    // scale, and fully degenerate (point) geometry keeps scale 1.
    let (mut sx, mut sy) = match (
        axis_scale(padded.width(), canvas_w),
        axis_scale(padded.height(), canvas_h),
    ) {
        (Some(sx), Some(sy)) => (sx, sy),
        (Some(sx), None) => (sx, sx),
        (None, Some(sy)) => (sy, sy),
        (None, None) => (1.0, 1.0),
    };
    if keep_aspect {
        sx = sx.min(sy);
        sy = sx;
    }

    // Post-scale centering, expressed as a pre-scale translation.
    let tx = -padded.x0 + (canvas_w - padded.width() * sx) / (2.0 * sx);
    let ty = -padded.y0 + (canvas_h - padded.height() * sy) / (2.0 * sy);
    Affine::scale_non_uniform(sx, sy) * Affine::translate((tx, ty))
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    fn scale_of(t: Affine) -> f64 {
        t.as_coeffs()[0]
    }

    #[test]
    fn test_square_fit_scale() {
        // 10x10 box into a 20x20 canvas with padding 2: (20 - 4) / 10 = 1.6.
        let t = fit(Rect::new(0.0, 0.0, 10.0, 10.0), 20.0, 20.0, 2.0, 0.0, true);
        assert!((scale_of(t) - 1.6).abs() < 1e-9);
        // Content is centered: box corners land at 2 and 18.
        let p0 = t * Point::new(0.0, 0.0);
        let p1 = t * Point::new(10.0, 10.0);
        assert!((p0.x - 2.0).abs() < 1e-9 && (p0.y - 2.0).abs() < 1e-9);
        assert!((p1.x - 18.0).abs() < 1e-9 && (p1.y - 18.0).abs() < 1e-9);
    }

    #[test]
    fn test_keep_aspect_uses_min_scale() {
        let t = fit(Rect::new(0.0, 0.0, 10.0, 5.0), 40.0, 40.0, 0.0, 0.0, true);
        let c = t.as_coeffs();
        assert!((c[0] - 4.0).abs() < 1e-9);
        assert!((c[3] - 4.0).abs() < 1e-9);
        // The short axis is centered: y spans 10..30.
        let p = t * Point::new(0.0, 0.0);
        assert!((p.y - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_stroke_margin_shrinks_scale() {
        let t = fit(Rect::new(0.0, 0.0, 10.0, 10.0), 20.0, 20.0, 2.0, STROKE_MARGIN, true);
        assert!((scale_of(t) - 16.0 / 14.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_canvas_clamps_scale() {
        let t = fit(Rect::new(0.0, 0.0, 10.0, 10.0), 0.0, 0.0, 2.0, 0.0, true);
        let s = scale_of(t);
        assert!(s > 0.0);
        assert!((s - MIN_SCALE).abs() < 1e-12);
        // Still invertible.
        assert!(t.determinant().abs() > 0.0);
    }

    #[test]
    fn test_flat_bbox_uses_finite_axis_scale() {
        // A zero-height box still scales by its width; a zero-width box by
        // its height. Neither collapses to the epsilon floor.
        let wide = fit(Rect::new(0.0, 0.0, 10.0, 0.0), 20.0, 20.0, 2.0, 0.0, true);
        assert!((scale_of(wide) - 1.6).abs() < 1e-9);
        let p = wide * Point::new(5.0, 0.0);
        assert!((p.x - 10.0).abs() < 1e-9 && (p.y - 10.0).abs() < 1e-9);

        let tall = fit(Rect::new(0.0, 0.0, 0.0, 8.0), 20.0, 20.0, 2.0, 0.0, true);
        assert!((scale_of(tall) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_point_geometry_identity_scale() {
        let t = fit(Rect::new(3.0, 4.0, 3.0, 4.0), 20.0, 20.0, 0.0, 0.0, true);
        assert!((scale_of(t) - 1.0).abs() < 1e-9);
        let p = t * Point::new(3.0, 4.0);
        assert!((p.x - 10.0).abs() < 1e-9 && (p.y - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_scale_invariant_aspect() {
        // Doubling the canvas doubles the scale; the fitted aspect is
        // unchanged.
        let bbox = Rect::new(0.0, 0.0, 12.0, 7.0);
        let t1 = fit(bbox, 24.0, 24.0, 2.0, 0.0, true);
        let t2 = fit(bbox, 48.0, 48.0, 4.0, 0.0, true);
        let fitted = |t: Affine| {
            let a = t * Point::new(0.0, 0.0);
            let b = t * Point::new(12.0, 7.0);
            (b.x - a.x) / (b.y - a.y)
        };
        assert!((fitted(t1) - fitted(t2)).abs() < 1e-9);
        assert!((scale_of(t2) / scale_of(t1) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_transformed_content_intersects_canvas() {
        for &(w, h) in &[(8.0, 8.0), (64.0, 16.0), (5.0, 300.0)] {
            let t = fit(Rect::new(-3.0, -3.0, 9.0, 21.0), w, h, 1.0, 0.0, true);
            let moved = t.transform_rect_bbox(Rect::new(-3.0, -3.0, 9.0, 21.0));
            let canvas = Rect::new(0.0, 0.0, w, h);
            let overlap = moved.intersect(canvas);
            assert!(overlap.area() > 0.0, "no visible content for {w}x{h}");
        }
    }
}
