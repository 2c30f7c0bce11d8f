//! RGBA raster buffer for software-rendered chart output.

use crate::color::Rgba;
use crate::error::{Error, Result};

/// A packed RGBA pixel buffer, row-major, origin at the top left.
#[derive(Debug, Clone)]
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl Raster {
    /// Create a raster filled with transparent black.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        let pixels = vec![Rgba::new(0, 0, 0, 0); (width as usize) * (height as usize)];
        Ok(Self { width, height, pixels })
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Fill the whole buffer with one color.
    pub fn clear(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }

    /// Set one pixel. Out-of-bounds coordinates are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        if x < self.width && y < self.height {
            self.pixels[(y as usize) * (self.width as usize) + (x as usize)] = color;
        }
    }

    /// Read one pixel, or `None` out of bounds.
    #[must_use]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x < self.width && y < self.height {
            Some(self.pixels[(y as usize) * (self.width as usize) + (x as usize)])
        } else {
            None
        }
    }

    /// Alpha-blend one pixel over the existing value.
    pub fn blend_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        let Some(under) = self.get_pixel(x, y) else { return };
        self.set_pixel(x, y, under.lerp(color.with_alpha(255), f32::from(color.a) / 255.0));
    }

    /// Fill an axis-aligned rectangle, clipped to the buffer.
    pub fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, color: Rgba) {
        let x_end = x.saturating_add(width).min(self.width);
        let y_end = y.saturating_add(height).min(self.height);
        for py in y..y_end {
            for px in x..x_end {
                self.set_pixel(px, py, color);
            }
        }
    }

    /// The buffer as packed RGBA bytes, for PNG encoding.
    #[must_use]
    pub fn rgba_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for p in &self.pixels {
            bytes.extend_from_slice(&[p.r, p.g, p.b, p.a]);
        }
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_zero_dimensions() {
        assert!(matches!(Raster::new(0, 100), Err(Error::InvalidDimensions { .. })));
        assert!(matches!(Raster::new(100, 0), Err(Error::InvalidDimensions { .. })));
    }

    #[test]
    fn test_set_get_pixel() {
        let mut raster = Raster::new(10, 10).expect("valid dimensions");
        raster.set_pixel(3, 4, Rgba::BLACK);
        assert_eq!(raster.get_pixel(3, 4), Some(Rgba::BLACK));
        assert_eq!(raster.get_pixel(10, 4), None);
    }

    #[test]
    fn test_out_of_bounds_set_ignored() {
        let mut raster = Raster::new(10, 10).expect("valid dimensions");
        raster.set_pixel(100, 100, Rgba::BLACK);
        assert_eq!(raster.get_pixel(9, 9), Some(Rgba::new(0, 0, 0, 0)));
    }

    #[test]
    fn test_clear() {
        let mut raster = Raster::new(4, 4).expect("valid dimensions");
        raster.clear(Rgba::WHITE);
        assert_eq!(raster.get_pixel(0, 0), Some(Rgba::WHITE));
        assert_eq!(raster.get_pixel(3, 3), Some(Rgba::WHITE));
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut raster = Raster::new(10, 10).expect("valid dimensions");
        raster.clear(Rgba::WHITE);
        raster.fill_rect(8, 8, 5, 5, Rgba::BLACK);
        assert_eq!(raster.get_pixel(9, 9), Some(Rgba::BLACK));
        assert_eq!(raster.get_pixel(7, 7), Some(Rgba::WHITE));
    }

    #[test]
    fn test_rgba_bytes_layout() {
        let mut raster = Raster::new(2, 1).expect("valid dimensions");
        raster.set_pixel(0, 0, Rgba::new(1, 2, 3, 4));
        raster.set_pixel(1, 0, Rgba::new(5, 6, 7, 8));
        assert_eq!(raster.rgba_bytes(), vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }
}
