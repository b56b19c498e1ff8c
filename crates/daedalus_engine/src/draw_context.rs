use std::collections::HashMap;

use crate::{DrawMode, PaletteIndex, Position, ProgramGrid};

/// Hover cells the user has not committed yet.
///
/// Kept apart from [`ProgramGrid`] so that nothing transient is ever exported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviewOverlay {
    cells: HashMap<Position, PaletteIndex>,
}

impl PreviewOverlay {
    /// Shows `index` at `pos` unless it is the background or the grid already
    /// has a cell there. Returns whether the preview was placed.
    pub fn set_preview(&mut self, grid: &ProgramGrid, pos: Position, index: PaletteIndex) -> bool {
        if index.is_background() || grid.is_occupied(pos) {
            return false;
        }
        self.cells.insert(pos, index);
        true
    }

    pub fn get(&self, pos: Position) -> Option<PaletteIndex> {
        self.cells.get(&pos).copied()
    }

    pub fn remove(&mut self, pos: Position) -> Option<PaletteIndex> {
        self.cells.remove(&pos)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Writes every preview cell into `grid` and empties the overlay.
    pub fn commit_into(&mut self, grid: &mut ProgramGrid) {
        for (pos, index) in self.cells.drain() {
            grid.set(pos, index);
        }
    }
}

/// Editing state the UI works against: the program, its preview overlay and
/// the active draw mode.
#[derive(Debug, Clone, Default)]
pub struct DrawContext {
    pub draw_mode: DrawMode,
    pub grid: ProgramGrid,
    pub preview: PreviewOverlay,
}

impl DrawContext {
    pub fn new(draw_mode: DrawMode) -> Self {
        Self {
            draw_mode,
            ..Default::default()
        }
    }

    pub fn with_default_program(mut self) -> Self {
        self.grid = ProgramGrid::with_default_program();
        self
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, index: PaletteIndex) {
        let pos = Position::new(x, y);
        self.preview.remove(pos);
        self.grid.set(pos, index);
    }

    pub fn set_preview(&mut self, x: i32, y: i32, index: PaletteIndex) -> bool {
        self.preview.set_preview(&self.grid, Position::new(x, y), index)
    }

    /// Committed value of the cell, previews read as background.
    pub fn get_pixel(&self, x: i32, y: i32) -> PaletteIndex {
        self.grid.get_pixel(x, y)
    }

    /// What the canvas shows: a preview if there is one, the program otherwise.
    pub fn visible_pixel(&self, x: i32, y: i32) -> PaletteIndex {
        let pos = Position::new(x, y);
        self.preview.get(pos).unwrap_or_else(|| self.grid.get(pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_never_reaches_grid() {
        let mut ctx = DrawContext::new(DrawMode::Free);
        let four = PaletteIndex::new(4).unwrap();
        assert!(ctx.set_preview(2, 2, four));
        assert_eq!(ctx.get_pixel(2, 2), PaletteIndex::BACKGROUND);
        assert_eq!(ctx.visible_pixel(2, 2), four);
        assert!(ctx.grid.is_empty());
    }

    #[test]
    fn preview_skips_occupied_and_background() {
        let mut ctx = DrawContext::new(DrawMode::Assisted).with_default_program();
        assert!(!ctx.set_preview(0, 0, PaletteIndex::new(3).unwrap()));
        assert!(!ctx.set_preview(5, 5, PaletteIndex::BACKGROUND));
        assert!(ctx.preview.is_empty());
    }

    #[test]
    fn commit_moves_preview_into_grid() {
        let mut ctx = DrawContext::default();
        let seven = PaletteIndex::new(7).unwrap();
        ctx.set_preview(-1, 3, seven);
        ctx.preview.commit_into(&mut ctx.grid);
        assert_eq!(ctx.get_pixel(-1, 3), seven);
        assert!(ctx.preview.is_empty());
    }
}
