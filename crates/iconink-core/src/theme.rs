//! Theme-aware color resolution.
//!
//! Decides pen/brush/background colors for a render and whether the result
//! needs its alpha channel flattened to stay visible: an icon whose color
//! sits too close to the theme's background extreme (a near-white icon on a
//! light background, a near-black one on a dark background) would otherwise
//! disappear.

use peniko::Color;
use serde::{Deserialize, Serialize};

/// Light or dark UI theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    /// The theme's natural background extreme.
    pub fn background(self) -> Color {
        match self {
            ThemeMode::Light => Color::WHITE,
            ThemeMode::Dark => Color::BLACK,
        }
    }

    /// The theme's default foreground extreme.
    pub fn foreground(self) -> Color {
        match self {
            ThemeMode::Light => Color::BLACK,
            ThemeMode::Dark => Color::WHITE,
        }
    }
}

/// Colors chosen for one render, plus the contrast-repair decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedTheme {
    /// Stroke color.
    pub pen: Color,
    /// Fill color.
    pub brush: Color,
    /// The theme's natural background (what the icon will sit on).
    pub background: Color,
    /// True when the foreground is too close to the background extreme and
    /// the bitmap must be alpha-flattened onto a contrasting plate.
    pub needs_alpha_flatten: bool,
}

/// Distance at or below which a requested color is judged too close to the
/// background extreme to stay visible.
pub const CONTRAST_THRESHOLD: f64 = 200.0;

/// Weighted RGB distance biased by mean red luminance (the "redmean"
/// low-cost approximation of perceptual distance).
pub fn color_distance(a: Color, b: Color) -> f64 {
    let a = a.to_rgba8();
    let b = b.to_rgba8();
    let rmean = (i64::from(a.r) + i64::from(b.r)) / 2;
    let dr = i64::from(a.r) - i64::from(b.r);
    let dg = i64::from(a.g) - i64::from(b.g);
    let db = i64::from(a.b) - i64::from(b.b);
    let dsq = (((512 + rmean) * dr * dr) >> 8) + 4 * dg * dg + (((767 - rmean) * db * db) >> 8);
    (dsq as f64).sqrt()
}

/// Resolve drawing colors for a request.
///
/// Without a requested color the theme's default foreground is used, which
/// always contrasts; with one, the redmean distance to the background
/// extreme decides whether alpha flattening is required.
pub fn resolve(requested: Option<Color>, mode: ThemeMode) -> ResolvedTheme {
    let background = mode.background();
    let (foreground, needs_alpha_flatten) = match requested {
        None => (mode.foreground(), false),
        Some(color) => {
            // Requested colors are RGB; a caller-supplied alpha is not part
            // of the icon's identity and must not leak into the paint.
            let color = color.with_alpha(1.0);
            (color, color_distance(color, background) <= CONTRAST_THRESHOLD)
        }
    };
    ResolvedTheme {
        pen: foreground,
        brush: foreground,
        background,
        needs_alpha_flatten,
    }
}

/// The opaque plate color used when flattening: the extreme opposite the
/// theme's background, so a wrong-polarity icon becomes visible on it.
pub fn contrast_plate(mode: ThemeMode) -> Color {
    mode.foreground()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_per_mode() {
        let light = resolve(None, ThemeMode::Light);
        assert_eq!(light.pen, Color::BLACK);
        assert_eq!(light.background, Color::WHITE);
        assert!(!light.needs_alpha_flatten);

        let dark = resolve(None, ThemeMode::Dark);
        assert_eq!(dark.pen, Color::WHITE);
        assert_eq!(dark.background, Color::BLACK);
        assert!(!dark.needs_alpha_flatten);
    }

    #[test]
    fn test_distance_extremes() {
        assert_eq!(color_distance(Color::WHITE, Color::WHITE), 0.0);
        let d = color_distance(Color::BLACK, Color::WHITE);
        assert!(d > 700.0, "black/white distance was {d}");
    }

    #[test]
    fn test_white_in_light_mode_flattens() {
        let resolved = resolve(Some(Color::from_rgba8(255, 255, 255, 255)), ThemeMode::Light);
        assert!(resolved.needs_alpha_flatten);
        assert_eq!(resolved.brush, Color::from_rgba8(255, 255, 255, 255));
    }

    #[test]
    fn test_near_white_in_light_mode_flattens() {
        let resolved = resolve(Some(Color::from_rgba8(240, 240, 235, 255)), ThemeMode::Light);
        assert!(resolved.needs_alpha_flatten);
    }

    #[test]
    fn test_requested_alpha_is_discarded() {
        let resolved = resolve(Some(Color::from_rgba8(200, 30, 30, 64)), ThemeMode::Light);
        assert_eq!(resolved.brush, Color::from_rgba8(200, 30, 30, 255));
        assert_eq!(resolved.pen, resolved.brush);
    }

    #[test]
    fn test_saturated_color_keeps_alpha() {
        let red = Color::from_rgba8(220, 30, 30, 255);
        assert!(!resolve(Some(red), ThemeMode::Light).needs_alpha_flatten);
        assert!(!resolve(Some(red), ThemeMode::Dark).needs_alpha_flatten);
    }

    #[test]
    fn test_black_in_dark_mode_flattens() {
        let resolved = resolve(Some(Color::from_rgba8(10, 10, 10, 255)), ThemeMode::Dark);
        assert!(resolved.needs_alpha_flatten);
    }

    #[test]
    fn test_contrast_plate_opposes_background() {
        assert_eq!(contrast_plate(ThemeMode::Light), Color::BLACK);
        assert_eq!(contrast_plate(ThemeMode::Dark), Color::WHITE);
    }
}
