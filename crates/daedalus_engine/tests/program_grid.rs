use daedalus_engine::{Opcode, PaletteIndex, Position, ProgramGrid};
use pretty_assertions::assert_eq;

fn idx(v: u8) -> PaletteIndex {
    PaletteIndex::new(v).unwrap()
}

#[test]
fn default_program() {
    let grid = ProgramGrid::with_default_program();
    assert_eq!(grid.len(), 2);
    assert_eq!(grid.get_pixel(0, 0), Opcode::Sbr.index());
    assert_eq!(grid.get_pixel(1, 0), idx(0));
    assert_eq!(grid.get_pixel(2, 0), PaletteIndex::BACKGROUND);
}

#[test]
fn setting_background_removes_cell() {
    for prior in PaletteIndex::all() {
        let mut grid = ProgramGrid::with_default_program();
        grid.set_pixel(3, 4, prior);
        grid.set_pixel(3, 4, PaletteIndex::BACKGROUND);
        assert!(!grid.is_occupied(Position::new(3, 4)));
        assert_eq!(grid.len(), 2);
    }
}

#[test]
fn delete_pixel() {
    let mut grid = ProgramGrid::new();
    grid.set_pixel(-7, 2, idx(11));
    grid.delete_pixel(-7, 2);
    assert!(grid.is_empty());
    grid.delete_pixel(100, 100);
    assert!(grid.is_empty());
}

#[test]
fn no_background_entries_after_edits() {
    let mut grid = ProgramGrid::new();
    let indices: Vec<_> = PaletteIndex::all().collect();
    for (i, index) in indices.iter().copied().cycle().take(100).enumerate() {
        let i = i as i32;
        grid.set_pixel(i % 7, i % 5, index);
    }
    assert!(grid.iter().all(|(_, index)| !index.is_background()));
}

#[test]
fn sorted_cells_are_row_major() {
    let mut grid = ProgramGrid::new();
    grid.set_pixel(5, 1, idx(1));
    grid.set_pixel(0, 1, idx(2));
    grid.set_pixel(9, 0, idx(3));
    let positions: Vec<_> = grid.sorted_cells().into_iter().map(|(pos, _)| pos).collect();
    assert_eq!(positions, vec![Position::new(9, 0), Position::new(0, 1), Position::new(5, 1)]);
}
