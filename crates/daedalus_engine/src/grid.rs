use std::collections::{HashMap, hash_map};

use crate::{Bounds, Opcode, PaletteIndex, Position};

/// Sparse Daedalus program: every occupied cell maps to its palette slot.
///
/// The background slot is never stored, writing it clears the cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgramGrid {
    cells: HashMap<Position, PaletteIndex>,
}

impl ProgramGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// The program a fresh editor starts with: an `Sbr` marker followed by a
    /// single zero digit.
    pub fn with_default_program() -> Self {
        let mut grid = Self::new();
        grid.set_pixel(0, 0, Opcode::Sbr.index());
        if let Some(zero) = PaletteIndex::new(0) {
            grid.set_pixel(1, 0, zero);
        }
        grid
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, index: PaletteIndex) {
        self.set(Position::new(x, y), index);
    }

    pub fn set(&mut self, pos: Position, index: PaletteIndex) {
        if index.is_background() {
            self.cells.remove(&pos);
        } else {
            self.cells.insert(pos, index);
        }
    }

    pub fn get_pixel(&self, x: i32, y: i32) -> PaletteIndex {
        self.get(Position::new(x, y))
    }

    pub fn get(&self, pos: Position) -> PaletteIndex {
        self.cells.get(&pos).copied().unwrap_or(PaletteIndex::BACKGROUND)
    }

    pub fn delete_pixel(&mut self, x: i32, y: i32) {
        self.set_pixel(x, y, PaletteIndex::BACKGROUND);
    }

    pub fn is_occupied(&self, pos: Position) -> bool {
        self.cells.contains_key(&pos)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Occupied cells in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, PaletteIndex)> + '_ {
        self.cells.iter().map(|(pos, index)| (*pos, *index))
    }

    /// Occupied cells in row major order.
    pub fn sorted_cells(&self) -> Vec<(Position, PaletteIndex)> {
        let mut cells: Vec<_> = self.iter().collect();
        cells.sort_by_key(|(pos, _)| *pos);
        cells
    }

    /// Inclusive bounds of all occupied cells, `None` for an empty program.
    pub fn bounding_box(&self) -> Option<Bounds> {
        let mut positions = self.cells.keys();
        let first = Bounds::single(*positions.next()?);
        Some(positions.fold(first, |bounds, pos| bounds.include(*pos)))
    }
}

impl<'a> IntoIterator for &'a ProgramGrid {
    type Item = (&'a Position, &'a PaletteIndex);
    type IntoIter = hash_map::Iter<'a, Position, PaletteIndex>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

impl FromIterator<(Position, PaletteIndex)> for ProgramGrid {
    fn from_iter<T: IntoIterator<Item = (Position, PaletteIndex)>>(iter: T) -> Self {
        let mut grid = ProgramGrid::new();
        for (pos, index) in iter {
            grid.set(pos, index);
        }
        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idx(v: u8) -> PaletteIndex {
        PaletteIndex::new(v).unwrap()
    }

    #[test]
    fn background_clears_cell() {
        let mut grid = ProgramGrid::new();
        grid.set_pixel(3, 4, idx(2));
        assert_eq!(grid.get_pixel(3, 4), idx(2));
        grid.set_pixel(3, 4, PaletteIndex::BACKGROUND);
        assert!(grid.is_empty());
        assert_eq!(grid.get_pixel(3, 4), PaletteIndex::BACKGROUND);
    }

    #[test]
    fn bounding_box_spans_negative_cells() {
        let grid: ProgramGrid = [(Position::new(-2, 5), idx(1)), (Position::new(4, -1), idx(9))].into_iter().collect();
        let bounds = grid.bounding_box().unwrap();
        assert_eq!(bounds.min, Position::new(-2, -1));
        assert_eq!(bounds.max, Position::new(4, 5));
        assert_eq!((bounds.width(), bounds.height()), (7, 7));
        assert_eq!(ProgramGrid::new().bounding_box(), None);
    }
}
