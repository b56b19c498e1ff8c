//! Image file formats a Daedalus program can be stored in.
//!
//! PNG is the native format. BMP is accepted as a second lossless container.
//!
//! # Example
//!
//! ```no_run
//! use daedalus_engine::formats::ImageFormat;
//! use daedalus_engine::ProgramGrid;
//! use std::path::Path;
//!
//! let grid = ProgramGrid::with_default_program();
//! ImageFormat::Png.save_program(&grid, Path::new("hello.png")).unwrap();
//! let loaded = ImageFormat::Png.load_program(Path::new("hello.png")).unwrap();
//! assert_eq!(grid, loaded);
//! ```

use std::{io::Cursor, path::Path};

use crate::{EngineError, Position, ProgramGrid, RasterImage, Result, export_to_image, import_from_image};

/// tEXt keyword holding the grid coordinate of the top left pixel.
pub const ORIGIN_KEYWORD: &str = "Daedalus-Origin";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    /// PNG, 8 bit RGBA. Carries the program origin in a text chunk.
    Png,
    /// Uncompressed BMP. Programs always load at the origin.
    Bmp,
}

impl ImageFormat {
    /// All available image formats
    pub const ALL: &'static [ImageFormat] = &[ImageFormat::Png, ImageFormat::Bmp];

    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Bmp => "bmp",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ImageFormat::Png => "PNG Image",
            ImageFormat::Bmp => "BMP Image",
        }
    }

    /// Detect image format from file extension.
    pub fn from_extension(ext: &str) -> Option<ImageFormat> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(ImageFormat::Png),
            "bmp" => Some(ImageFormat::Bmp),
            _ => None,
        }
    }

    /// Detect image format from file path.
    pub fn from_path(path: &Path) -> Option<ImageFormat> {
        path.extension().and_then(|ext| ext.to_str()).and_then(ImageFormat::from_extension)
    }

    /// Detect image format from the leading bytes of a file.
    pub fn from_bytes(data: &[u8]) -> Result<ImageFormat> {
        match image::guess_format(data)? {
            image::ImageFormat::Png => Ok(ImageFormat::Png),
            image::ImageFormat::Bmp => Ok(ImageFormat::Bmp),
            other => Err(EngineError::UnsupportedFormat {
                description: format!("{other:?} images can't hold Daedalus programs"),
            }),
        }
    }

    pub fn encode_raster(&self, raster: &RasterImage) -> Result<Vec<u8>> {
        match self {
            ImageFormat::Png => encode_png_raster(raster),
            ImageFormat::Bmp => encode_bmp_raster(raster),
        }
    }

    pub fn decode_raster(&self, data: &[u8]) -> Result<RasterImage> {
        match self {
            ImageFormat::Png => decode_png_raster(data),
            ImageFormat::Bmp => decode_bmp_raster(data),
        }
    }

    pub fn encode_program(&self, grid: &ProgramGrid) -> Result<Vec<u8>> {
        self.encode_raster(&export_to_image(grid)?)
    }

    pub fn decode_program(&self, data: &[u8]) -> Result<ProgramGrid> {
        import_from_image(&self.decode_raster(data)?)
    }

    /// Save a program to an image file.
    pub fn save_program(&self, grid: &ProgramGrid, path: &Path) -> Result<()> {
        let data = self.encode_program(grid)?;
        std::fs::write(path, data).map_err(|e| EngineError::open_file(path, e.to_string()))?;
        log::info!("Saved {} cells to {}", grid.len(), path.display());
        Ok(())
    }

    /// Load a program from an image file.
    pub fn load_program(&self, path: &Path) -> Result<ProgramGrid> {
        let data = std::fs::read(path).map_err(|e| EngineError::open_file(path, e.to_string()))?;
        let grid = self.decode_program(&data)?;
        log::info!("Loaded {} cells from {}", grid.len(), path.display());
        Ok(grid)
    }
}

/// Decodes a program, picking the format from the file contents.
pub fn decode_program(data: &[u8]) -> Result<ProgramGrid> {
    ImageFormat::from_bytes(data)?.decode_program(data)
}

/// Loads a program from disk, picking the format from the file contents.
pub fn load_program(path: &Path) -> Result<ProgramGrid> {
    let data = std::fs::read(path).map_err(|e| EngineError::open_file(path, e.to_string()))?;
    decode_program(&data)
}

pub fn encode_png(grid: &ProgramGrid) -> Result<Vec<u8>> {
    ImageFormat::Png.encode_program(grid)
}

pub fn decode_png(data: &[u8]) -> Result<ProgramGrid> {
    ImageFormat::Png.decode_program(data)
}

pub fn save_png(grid: &ProgramGrid, path: &Path) -> Result<()> {
    ImageFormat::Png.save_program(grid, path)
}

pub fn load_png(path: &Path) -> Result<ProgramGrid> {
    ImageFormat::Png.load_program(path)
}

fn encode_png_raster(raster: &RasterImage) -> Result<Vec<u8>> {
    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, raster.width(), raster.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let origin = raster.origin();
        if origin != Position::ORIGIN {
            encoder.add_text_chunk(ORIGIN_KEYWORD.to_string(), format!("{},{}", origin.x, origin.y))?;
        }

        let mut writer = encoder.write_header()?;
        writer.write_image_data(raster.pixels())?;
        writer.finish()?;
    }
    Ok(png_data)
}

fn decode_png_raster(png_data: &[u8]) -> Result<RasterImage> {
    let mut decoder = png::Decoder::new(Cursor::new(png_data));
    decoder.set_transformations(png::Transformations::normalize_to_color8());
    let mut reader = decoder.read_info()?;

    let buf_size = reader.output_buffer_size().ok_or_else(|| EngineError::InvalidPng {
        message: "output buffer size unknown".to_string(),
    })?;
    let mut buf = vec![0; buf_size];
    let info = reader.next_frame(&mut buf)?;
    buf.truncate(info.buffer_size());

    let rgba = match info.color_type {
        png::ColorType::Rgba => buf,
        png::ColorType::Rgb => buf.chunks_exact(3).flat_map(|c| [c[0], c[1], c[2], 0xFF]).collect(),
        png::ColorType::Grayscale => buf.iter().flat_map(|v| [*v, *v, *v, 0xFF]).collect(),
        png::ColorType::GrayscaleAlpha => buf.chunks_exact(2).flat_map(|c| [c[0], c[0], c[0], c[1]]).collect(),
        png::ColorType::Indexed => {
            return Err(EngineError::InvalidPng {
                message: "palette was not expanded".to_string(),
            });
        }
    };

    let mut origin = Position::ORIGIN;
    for chunk in &reader.info().uncompressed_latin1_text {
        if chunk.keyword == ORIGIN_KEYWORD {
            origin = parse_origin(&chunk.text)?;
        }
    }

    Ok(RasterImage::from_rgba(info.width, info.height, rgba)?.with_origin(origin))
}

fn parse_origin(text: &str) -> Result<Position> {
    let Some((x, y)) = text.split_once(',') else {
        return Err(EngineError::InvalidPng {
            message: format!("malformed {ORIGIN_KEYWORD} '{text}'"),
        });
    };
    Ok(Position::new(x.trim().parse()?, y.trim().parse()?))
}

fn encode_bmp_raster(raster: &RasterImage) -> Result<Vec<u8>> {
    if raster.origin() != Position::ORIGIN {
        log::warn!("BMP can't store the program origin {}, it will load at (0, 0)", raster.origin());
    }
    let img = image::RgbaImage::from_raw(raster.width(), raster.height(), raster.pixels().to_vec()).ok_or(EngineError::ImageBufferCreationFailed)?;
    let mut data = Vec::new();
    img.write_to(&mut Cursor::new(&mut data), image::ImageFormat::Bmp)?;
    Ok(data)
}

fn decode_bmp_raster(data: &[u8]) -> Result<RasterImage> {
    let img = image::load_from_memory_with_format(data, image::ImageFormat::Bmp)?.to_rgba8();
    let (width, height) = img.dimensions();
    RasterImage::from_rgba(width, height, img.into_raw())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_text_parsing() {
        assert_eq!(parse_origin("-4, 12").unwrap(), Position::new(-4, 12));
        assert!(parse_origin("4").is_err());
        assert!(parse_origin("a,b").is_err());
    }
}
