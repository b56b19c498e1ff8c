mod image_format;
pub use image_format::*;
