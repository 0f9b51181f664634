//! Owned raster results.

use peniko::Color;

/// A rendered bitmap: straight (non-premultiplied) RGBA8 pixels plus
/// dimensions. Cached entries are shared via `Arc`; callers never own the
/// buffer exclusively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedBitmap {
    width: u32,
    height: u32,
    /// Row-major RGBA8, `width * height * 4` bytes.
    pixels: Vec<u8>,
    /// True once the alpha channel has been flattened away.
    opaque: bool,
}

impl RenderedBitmap {
    /// Wrap a straight-RGBA8 buffer. Panics in debug builds if the buffer
    /// length does not match the dimensions.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize * 4);
        RenderedBitmap {
            width,
            height,
            pixels,
            opaque: false,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// True if the alpha channel has been flattened to fully opaque.
    pub fn is_opaque(&self) -> bool {
        self.opaque
    }

    /// RGBA of one pixel. Panics when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        assert!(x < self.width && y < self.height);
        let i = (y as usize * self.width as usize + x as usize) * 4;
        [self.pixels[i], self.pixels[i + 1], self.pixels[i + 2], self.pixels[i + 3]]
    }

    /// Composite every pixel against an opaque `plate` color and discard
    /// the alpha channel. Guarantees no fully-transparent pixel remains.
    pub fn flatten_alpha(&mut self, plate: Color) {
        let plate = plate.to_rgba8();
        for px in self.pixels.chunks_exact_mut(4) {
            let a = u32::from(px[3]);
            px[0] = composite(px[0], plate.r, a);
            px[1] = composite(px[1], plate.g, a);
            px[2] = composite(px[2], plate.b, a);
            px[3] = 255;
        }
        self.opaque = true;
    }
}

/// `a*c + (1-a)*plate` over u8 channels, rounded.
fn composite(c: u8, plate: u8, a: u32) -> u8 {
    ((u32::from(c) * a + u32::from(plate) * (255 - a) + 127) / 255) as u8
}
