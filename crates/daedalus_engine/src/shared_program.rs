use std::sync::Arc;

use parking_lot::RwLock;

use crate::{ProgramGrid, RasterImage, Result, export_to_image, formats::ImageFormat};

/// Program grid shared between threads.
///
/// One writer at a time; exports always work from a snapshot and imports are
/// decoded completely before they replace the current program.
#[derive(Debug, Clone, Default)]
pub struct SharedProgram {
    grid: Arc<RwLock<ProgramGrid>>,
}

impl SharedProgram {
    pub fn new(grid: ProgramGrid) -> Self {
        Self {
            grid: Arc::new(RwLock::new(grid)),
        }
    }

    pub fn snapshot(&self) -> ProgramGrid {
        self.grid.read().clone()
    }

    pub fn with_mut<R>(&self, f: impl FnOnce(&mut ProgramGrid) -> R) -> R {
        f(&mut self.grid.write())
    }

    /// Swaps in a new program and returns the previous one.
    pub fn replace(&self, grid: ProgramGrid) -> ProgramGrid {
        std::mem::replace(&mut *self.grid.write(), grid)
    }

    pub fn export_image(&self) -> Result<RasterImage> {
        export_to_image(&self.snapshot())
    }

    pub fn export_as(&self, format: ImageFormat) -> Result<Vec<u8>> {
        format.encode_program(&self.snapshot())
    }

    /// Decodes `data` and installs it. On failure the current program stays.
    pub fn import_from(&self, format: ImageFormat, data: &[u8]) -> Result<()> {
        let grid = format.decode_program(data)?;
        self.replace(grid);
        Ok(())
    }
}
