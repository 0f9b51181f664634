//! Vector rasterization over a tiny-skia surface.
//!
//! One surface is allocated per call; nothing here is shared state. Draw
//! order is fixed: all fill subpaths with the brush, then all stroke
//! subpaths with the pen.

use iconink_core::asset::Quadrant;
use iconink_core::builder::{emit, PathBuilder};
use iconink_core::fit::{fit, STROKE_MARGIN};
use iconink_core::geometry::IconGeometry;
use iconink_core::theme::ResolvedTheme;
use kurbo::{Affine, Point, Rect};
use peniko::Color;
use tiny_skia::{FillRule, Paint, Pixmap, Stroke, Transform};

use crate::bitmap::RenderedBitmap;
use crate::error::{RenderError, RenderResult};

/// Stroke width in source units; scales with the fit transform.
pub const STROKE_WIDTH: f32 = 2.0;

/// [`PathBuilder`] implementation over the tiny-skia path builder.
pub struct SkiaPathBuilder {
    inner: tiny_skia::PathBuilder,
}

impl SkiaPathBuilder {
    pub fn new() -> Self {
        SkiaPathBuilder {
            inner: tiny_skia::PathBuilder::new(),
        }
    }

    /// Finish the native path; `None` when no segment was emitted.
    pub fn finish(self) -> Option<tiny_skia::Path> {
        self.inner.finish()
    }
}

impl Default for SkiaPathBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PathBuilder for SkiaPathBuilder {
    fn move_to(&mut self, p: Point) {
        self.inner.move_to(p.x as f32, p.y as f32);
    }

    fn line_to(&mut self, p: Point) {
        self.inner.line_to(p.x as f32, p.y as f32);
    }

    fn quad_to(&mut self, c: Point, p: Point) {
        self.inner.quad_to(c.x as f32, c.y as f32, p.x as f32, p.y as f32);
    }

    fn curve_to(&mut self, c1: Point, c2: Point, p: Point) {
        self.inner.cubic_to(
            c1.x as f32,
            c1.y as f32,
            c2.x as f32,
            c2.y as f32,
            p.x as f32,
            p.y as f32,
        );
    }

    fn close(&mut self) {
        self.inner.close();
    }
}

fn to_skia_transform(affine: Affine) -> Transform {
    let c = affine.as_coeffs();
    Transform::from_row(c[0] as f32, c[1] as f32, c[2] as f32, c[3] as f32, c[4] as f32, c[5] as f32)
}

fn to_skia_color(color: Color) -> tiny_skia::Color {
    let rgba = color.to_rgba8();
    tiny_skia::Color::from_rgba8(rgba.r, rgba.g, rgba.b, rgba.a)
}

fn solid_paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(to_skia_color(color));
    paint.anti_alias = true;
    paint
}

/// Rasterize vector geometry onto a transparent canvas.
///
/// The quadrant rotation is applied to the source geometry before fitting,
/// so a rotated icon fits the canvas by its rotated extents. Fails with
/// [`RenderError::Surface`] when no surface can be allocated for the
/// requested size.
pub fn render_vector(
    fill: &IconGeometry,
    stroke: &IconGeometry,
    theme: &ResolvedTheme,
    quadrant: Quadrant,
    width: u32,
    height: u32,
    padding: f64,
) -> RenderResult<RenderedBitmap> {
    let mut fill_builder = SkiaPathBuilder::new();
    let fill_bounds = (!fill.is_empty()).then(|| emit(fill, &mut fill_builder));
    let mut stroke_builder = SkiaPathBuilder::new();
    let stroke_bounds = (!stroke.is_empty()).then(|| emit(stroke, &mut stroke_builder));

    let bbox = match (fill_bounds, stroke_bounds) {
        (Some(a), Some(b)) => a.union(b),
        (Some(a), None) => a,
        (None, Some(b)) => b,
        (None, None) => Rect::ZERO,
    };

    let rotation = Affine::rotate_about(quadrant.radians(), bbox.center());
    let rotated_bbox = rotation.transform_rect_bbox(bbox);
    let margin = if stroke_bounds.is_some() { STROKE_MARGIN } else { 0.0 };
    let transform = fit(rotated_bbox, f64::from(width), f64::from(height), padding, margin, true) * rotation;
    let skia_transform = to_skia_transform(transform);

    let mut pixmap = Pixmap::new(width, height).ok_or(RenderError::Surface { width, height })?;

    if let Some(path) = fill_builder.finish() {
        pixmap.fill_path(&path, &solid_paint(theme.brush), FillRule::Winding, skia_transform, None);
    }
    if let Some(path) = stroke_builder.finish() {
        let pen_stroke = Stroke {
            width: STROKE_WIDTH,
            ..Stroke::default()
        };
        pixmap.stroke_path(&path, &solid_paint(theme.pen), &pen_stroke, skia_transform, None);
    }

    // tiny-skia stores premultiplied pixels; the bitmap contract is
    // straight RGBA.
    let mut pixels = Vec::with_capacity(pixmap.pixels().len() * 4);
    for px in pixmap.pixels() {
        let c = px.demultiply();
        pixels.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    Ok(RenderedBitmap::new(width, height, pixels))
}

#[cfg(test)]
mod tests {
    use super::*;
    use iconink_core::parser::parse;
    use iconink_core::theme::{resolve, ThemeMode};

    const SQUARE: &str = "M 0,0 L 10,0 L 10,10 L 0,10 Z";

    fn light() -> ResolvedTheme {
        resolve(None, ThemeMode::Light)
    }

    #[test]
    fn test_square_fill_centered() {
        let fill = parse(SQUARE).unwrap();
        let stroke = IconGeometry::default();
        let bitmap = render_vector(&fill, &stroke, &light(), Quadrant::R0, 20, 20, 2.0).unwrap();
        assert_eq!((bitmap.width(), bitmap.height()), (20, 20));
        // Scale (20-4)/10 = 1.6: ink occupies the centered 16x16 region.
        assert_eq!(bitmap.pixel(10, 10), [0, 0, 0, 255]);
        assert_eq!(bitmap.pixel(4, 4), [0, 0, 0, 255]);
        assert_eq!(bitmap.pixel(0, 0)[3], 0);
        assert_eq!(bitmap.pixel(1, 10)[3], 0);
        assert_eq!(bitmap.pixel(19, 19)[3], 0);
    }

    #[test]
    fn test_zero_canvas_fails_surface() {
        let fill = parse(SQUARE).unwrap();
        let err = render_vector(&fill, &IconGeometry::default(), &light(), Quadrant::R0, 0, 0, 0.0);
        assert!(matches!(err, Err(RenderError::Surface { .. })));
    }

    #[test]
    fn test_stroke_only_geometry() {
        let stroke = parse("M 2,2 L 18,2").unwrap();
        let bitmap =
            render_vector(&IconGeometry::default(), &stroke, &light(), Quadrant::R0, 24, 24, 2.0).unwrap();
        // Some ink was laid down.
        assert!(bitmap.pixels().chunks_exact(4).any(|px| px[3] > 0));
    }

    #[test]
    fn test_rotation_swaps_extents() {
        // A wide bar becomes a tall bar under a quarter turn.
        let fill = parse("M 0,0 L 12,0 L 12,4 L 0,4 Z").unwrap();
        let stroke = IconGeometry::default();
        let flat = render_vector(&fill, &stroke, &light(), Quadrant::R0, 30, 30, 0.0).unwrap();
        let turned = render_vector(&fill, &stroke, &light(), Quadrant::R90, 30, 30, 0.0).unwrap();

        let ink_extent = |bitmap: &RenderedBitmap| {
            let mut min_x = u32::MAX;
            let mut max_x = 0;
            let mut min_y = u32::MAX;
            let mut max_y = 0;
            for y in 0..bitmap.height() {
                for x in 0..bitmap.width() {
                    if bitmap.pixel(x, y)[3] > 128 {
                        min_x = min_x.min(x);
                        max_x = max_x.max(x);
                        min_y = min_y.min(y);
                        max_y = max_y.max(y);
                    }
                }
            }
            (max_x - min_x, max_y - min_y)
        };

        let (fw, fh) = ink_extent(&flat);
        let (tw, th) = ink_extent(&turned);
        assert!(fw > fh);
        assert!(th > tw);
        // Both fill the 30px canvas along their long axis.
        assert!(fw >= 28);
        assert!(th >= 28);
    }

    #[test]
    fn test_dark_mode_ink_is_white() {
        let fill = parse(SQUARE).unwrap();
        let theme = resolve(None, ThemeMode::Dark);
        let bitmap = render_vector(&fill, &IconGeometry::default(), &theme, Quadrant::R0, 16, 16, 0.0).unwrap();
        assert_eq!(bitmap.pixel(8, 8), [255, 255, 255, 255]);
    }

    #[test]
    fn test_idempotent_pixels() {
        let fill = parse(SQUARE).unwrap();
        let stroke = parse("M 0,0 L 10,10").unwrap();
        let a = render_vector(&fill, &stroke, &light(), Quadrant::R0, 20, 20, 2.0).unwrap();
        let b = render_vector(&fill, &stroke, &light(), Quadrant::R0, 20, 20, 2.0).unwrap();
        assert_eq!(a.pixels(), b.pixels());
    }
}
