//! RGBA pixel buffers.

use std::io::{self, Write};

use crate::grid::Coord;
use crate::sim::Color;

/// Row-major pixels packed as `0xAABBGGRR`, top-left origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl PixelBuffer {
    /// Create a buffer with every pixel set to `fill`.
    #[must_use]
    pub fn new(width: u32, height: u32, fill: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill.packed(); width as usize * height as usize],
        }
    }

    pub(crate) fn from_pixels(width: u32, height: u32, pixels: Vec<u32>) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize);
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Get the width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Get the height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Packed pixels in row-major order.
    #[must_use]
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Pixel at `coord`, `None` when out of bounds.
    #[must_use]
    pub fn pixel(&self, coord: Coord) -> Option<Color> {
        self.index(coord)
            .map(|idx| Color::from_packed(self.pixels[idx]))
    }

    /// Overwrite the pixel at `coord`. Out-of-bounds writes are ignored.
    pub fn set_pixel(&mut self, coord: Coord, color: Color) {
        if let Some(idx) = self.index(coord) {
            self.pixels[idx] = color.packed();
        }
    }

    /// Draw `top` over this buffer wherever `top` is not fully
    /// transparent. Buffers of different shapes are left untouched.
    pub fn overlay(&mut self, top: &PixelBuffer) {
        if self.width != top.width || self.height != top.height {
            return;
        }
        for (below, &above) in self.pixels.iter_mut().zip(&top.pixels) {
            if above >> 24 != 0 {
                *below = above;
            }
        }
    }

    /// `width * height * 4` bytes in R, G, B, A order.
    #[must_use]
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|pixel| pixel.to_le_bytes())
            .collect()
    }

    /// Write as a binary PAM (`P7`, `RGB_ALPHA`) image.
    ///
    /// # Errors
    ///
    /// Propagates any error from the writer.
    pub fn write_pam<W: Write>(&self, mut out: W) -> io::Result<()> {
        write!(
            out,
            "P7\nWIDTH {}\nHEIGHT {}\nDEPTH 4\nMAXVAL 255\nTUPLTYPE RGB_ALPHA\nENDHDR\n",
            self.width, self.height
        )?;
        out.write_all(&self.to_rgba_bytes())?;
        out.flush()
    }

    fn index(&self, coord: Coord) -> Option<usize> {
        (coord.x < self.width && coord.y < self.height)
            .then(|| coord.y as usize * self.width as usize + coord.x as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_byte_order() {
        let mut buffer = PixelBuffer::new(2, 1, Color::TRANSPARENT);
        buffer.set_pixel(Coord::new(1, 0), Color::from_rgba(1, 2, 3, 4));
        assert_eq!(buffer.to_rgba_bytes(), vec![0, 0, 0, 0, 1, 2, 3, 4]);
        assert_eq!(buffer.pixel(Coord::new(1, 0)), Some(Color::from_rgba(1, 2, 3, 4)));
        assert_eq!(buffer.pixel(Coord::new(2, 0)), None);
    }

    #[test]
    fn test_overlay_skips_transparent() {
        let mut base = PixelBuffer::new(2, 1, Color::WHITE);
        let mut top = PixelBuffer::new(2, 1, Color::TRANSPARENT);
        let red = Color::from_rgba(0xFF, 0, 0, 0xFF);
        top.set_pixel(Coord::new(0, 0), red);

        base.overlay(&top);
        assert_eq!(base.pixel(Coord::new(0, 0)), Some(red));
        assert_eq!(base.pixel(Coord::new(1, 0)), Some(Color::WHITE));

        base.overlay(&PixelBuffer::new(1, 1, red));
        assert_eq!(base.pixel(Coord::new(1, 0)), Some(Color::WHITE));
    }

    #[test]
    fn test_write_pam() {
        let buffer = PixelBuffer::new(1, 2, Color::WHITE);
        let mut out = Vec::new();
        buffer.write_pam(&mut out).unwrap();

        let header = b"P7\nWIDTH 1\nHEIGHT 2\nDEPTH 4\nMAXVAL 255\nTUPLTYPE RGB_ALPHA\nENDHDR\n";
        assert!(out.starts_with(header));
        assert_eq!(out.len(), header.len() + 8);
        assert!(out[header.len()..].iter().all(|&b| b == 0xFF));
    }
}
