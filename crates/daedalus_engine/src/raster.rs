//! Lossless conversion between a [`ProgramGrid`] and an RGBA raster.
//!
//! One pixel per cell. The image covers the bounding box of the program and
//! every cell outside the program carries the background color, so decoding
//! the raster reproduces the program exactly. The grid coordinate of the top
//! left pixel travels with the raster as its `origin`.

use crate::{Bounds, Color, EngineError, PaletteIndex, Position, ProgramGrid, Result, nearest_index};

const BYTES_PER_PIXEL: usize = 4;

/// Largest raster `export_to_image` builds, 64 MiB of RGBA like the `png`
/// crate's default decode limit.
pub const MAX_RASTER_PIXELS: u64 = 16 * 1024 * 1024;

/// RGBA8 pixel buffer, row major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    origin: Position,
    pixels: Vec<u8>,
}

impl RasterImage {
    /// # Panics
    ///
    /// Panics if `width * height * 4` does not fit in memory.
    pub fn new(width: u32, height: u32, fill: Color) -> Self {
        let (r, g, b) = fill.rgb();
        let pixels = [r, g, b, 0xFF].repeat(width as usize * height as usize);
        Self {
            width,
            height,
            origin: Position::ORIGIN,
            pixels,
        }
    }

    /// Wraps an existing RGBA8 buffer.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let Some(expected) = (width as usize).checked_mul(height as usize).and_then(|n| n.checked_mul(BYTES_PER_PIXEL)) else {
            return Err(EngineError::InvalidRasterSize {
                width,
                height,
                expected: usize::MAX,
                actual: pixels.len(),
            });
        };
        if pixels.len() != expected {
            return Err(EngineError::InvalidRasterSize {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            origin: Position::ORIGIN,
            pixels,
        })
    }

    pub fn with_origin(mut self, origin: Position) -> Self {
        self.origin = origin;
        self
    }

    /// Grid coordinate of pixel `(0, 0)`.
    pub fn origin(&self) -> Position {
        self.origin
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

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL
    }

    /// Color of a pixel, alpha is ignored.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` lies outside the raster.
    pub fn get_rgb(&self, x: u32, y: u32) -> Color {
        let o = self.offset(x, y);
        Color::new(self.pixels[o], self.pixels[o + 1], self.pixels[o + 2])
    }

    /// Writes an opaque pixel.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` lies outside the raster.
    pub fn put_rgb(&mut self, x: u32, y: u32, color: Color) {
        let o = self.offset(x, y);
        let (r, g, b) = color.rgb();
        self.pixels[o..o + BYTES_PER_PIXEL].copy_from_slice(&[r, g, b, 0xFF]);
    }
}

/// Renders the program into the smallest raster that holds all cells.
///
/// An empty program becomes a single background pixel at the origin.
/// Programs spanning more than [`MAX_RASTER_PIXELS`] cells are rejected.
pub fn export_to_image(grid: &ProgramGrid) -> Result<RasterImage> {
    let bounds = grid.bounding_box().unwrap_or_else(|| Bounds::single(Position::ORIGIN));
    let too_large = || EngineError::ImageTooLarge {
        width: bounds.width(),
        height: bounds.height(),
    };
    let pixel_count = bounds.width().checked_mul(bounds.height()).ok_or_else(too_large)?;
    if pixel_count > MAX_RASTER_PIXELS {
        return Err(too_large());
    }
    let (Ok(width), Ok(height)) = (u32::try_from(bounds.width()), u32::try_from(bounds.height())) else {
        return Err(too_large());
    };

    let mut image = RasterImage::new(width, height, PaletteIndex::BACKGROUND.color()).with_origin(bounds.min);
    for (pos, index) in grid.iter() {
        let x = (i64::from(pos.x) - i64::from(bounds.min.x)) as u32;
        let y = (i64::from(pos.y) - i64::from(bounds.min.y)) as u32;
        image.put_rgb(x, y, index.color());
    }
    log::debug!("export_to_image: {} cells into {}x{} raster at {}", grid.len(), width, height, bounds.min);
    Ok(image)
}

/// Reads a program back from a raster.
///
/// Every pixel must be an exact palette color. The first one that is not
/// aborts the import; no partial program is returned.
pub fn import_from_image(image: &RasterImage) -> Result<ProgramGrid> {
    let mut grid = ProgramGrid::new();
    for y in 0..image.height() {
        for x in 0..image.width() {
            let color = image.get_rgb(x, y);
            let Some(index) = nearest_index(color) else {
                log::warn!("import_from_image: pixel ({x}, {y}) has non palette color {}", color.to_hex());
                return Err(EngineError::NonPaletteColor { x, y, color });
            };
            if index.is_background() {
                continue;
            }
            let cx = i64::from(image.origin.x) + i64::from(x);
            let cy = i64::from(image.origin.y) + i64::from(y);
            let (Ok(cx), Ok(cy)) = (i32::try_from(cx), i32::try_from(cy)) else {
                return Err(EngineError::ImageTooLarge {
                    width: u64::from(image.width()),
                    height: u64::from(image.height()),
                });
            };
            grid.set_pixel(cx, cy, index);
        }
    }
    log::debug!("import_from_image: {} cells from {}x{} raster", grid.len(), image.width(), image.height());
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_mismatched_buffer() {
        assert!(RasterImage::from_rgba(2, 2, vec![0; 15]).is_err());
        assert!(RasterImage::from_rgba(2, 2, vec![0; 16]).is_ok());
    }

    #[test]
    fn rejects_overflowing_dimensions() {
        assert!(matches!(
            RasterImage::from_rgba(u32::MAX, u32::MAX, vec![0; 4]),
            Err(EngineError::InvalidRasterSize { .. })
        ));
    }

    #[test]
    #[should_panic]
    fn get_rgb_outside_raster_panics() {
        let image = RasterImage::new(2, 2, PaletteIndex::BACKGROUND.color());
        image.get_rgb(2, 0);
    }

    #[test]
    fn export_rejects_huge_bounds() {
        let one = PaletteIndex::new(1).unwrap();
        for far in [Position::new(i32::MAX, i32::MAX), Position::new(100_000, 100_000), Position::new(i32::MIN, 0)] {
            let mut grid = ProgramGrid::new();
            grid.set_pixel(0, 0, one);
            grid.set(far, one);
            assert!(matches!(export_to_image(&grid), Err(EngineError::ImageTooLarge { .. })), "{far}");
        }
    }

    #[test]
    fn export_accepts_long_thin_program() {
        let mut grid = ProgramGrid::new();
        grid.set_pixel(0, 0, PaletteIndex::new(1).unwrap());
        grid.set_pixel(99_999, 0, PaletteIndex::new(2).unwrap());
        let image = export_to_image(&grid).unwrap();
        assert_eq!((image.width(), image.height()), (100_000, 1));
    }

    #[test]
    fn import_without_origin_starts_at_zero() {
        let mut image = RasterImage::new(2, 1, PaletteIndex::BACKGROUND.color());
        image.put_rgb(1, 0, PaletteIndex::new(6).unwrap().color());
        let grid = import_from_image(&image).unwrap();
        assert_eq!(grid.len(), 1);
        assert_eq!(grid.get_pixel(1, 0), PaletteIndex::new(6).unwrap());
    }

    #[test]
    fn export_translates_to_origin() {
        let mut grid = ProgramGrid::new();
        let one = PaletteIndex::new(1).unwrap();
        grid.set_pixel(-3, 7, one);
        grid.set_pixel(-1, 8, one);
        let image = export_to_image(&grid).unwrap();
        assert_eq!((image.width(), image.height()), (3, 2));
        assert_eq!(image.origin(), Position::new(-3, 7));
        assert_eq!(image.get_rgb(0, 0), one.color());
        assert_eq!(image.get_rgb(2, 1), one.color());
        assert_eq!(image.get_rgb(1, 0), PaletteIndex::BACKGROUND.color());
    }
}
