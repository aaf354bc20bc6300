//! Toroidal 2D grid of cell slots.

use serde::{Deserialize, Serialize};
use wator_core::{DenizenId, Position};

/// What a grid slot currently holds: nothing, or a reference to a denizen
/// record owned by the engine's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Slot {
    Empty,
    Occupied(DenizenId),
}

impl Slot {
    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }
}

/// A 2D toroidal grid. Every slot always holds exactly one [`Slot`] value.
///
/// Addressing wraps on both axes; a zero-sized grid is valid and holds no
/// slots (and must not be addressed).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
    slots: Vec<Slot>,
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Self {
        let size = (width * height) as usize;
        Self {
            width,
            height,
            slots: vec![Slot::Empty; size],
        }
    }

    /// Get the slot at a position (with toroidal wrapping)
    pub fn get(&self, pos: Position) -> Slot {
        let wrapped = pos.wrap(self.width, self.height);
        self.slots[self.pos_to_index(wrapped)]
    }

    /// Set the slot at a position (with toroidal wrapping)
    pub fn set(&mut self, pos: Position, slot: Slot) {
        let wrapped = pos.wrap(self.width, self.height);
        let index = self.pos_to_index(wrapped);
        self.slots[index] = slot;
    }

    /// The four orthogonal neighbor positions (north, south, west, east),
    /// each wrapped toroidally.
    ///
    /// Entries are not deduplicated: on degenerate grids (1x1, 1xN) they may
    /// coincide with each other or with `pos` itself.
    pub fn neighbors(&self, pos: Position) -> [Position; 4] {
        [
            pos.add(0, -1).wrap(self.width, self.height),
            pos.add(0, 1).wrap(self.width, self.height),
            pos.add(-1, 0).wrap(self.width, self.height),
            pos.add(1, 0).wrap(self.width, self.height),
        ]
    }

    /// All currently-empty positions, in row-major order.
    pub fn empty_positions(&self) -> Vec<Position> {
        self.iter()
            .filter(|(_, slot)| slot.is_empty())
            .map(|(pos, _)| pos)
            .collect()
    }

    fn pos_to_index(&self, pos: Position) -> usize {
        (pos.y * self.width + pos.x) as usize
    }

    /// Get position from index
    pub fn index_to_pos(&self, index: usize) -> Position {
        let x = (index as i32) % self.width;
        let y = (index as i32) / self.width;
        Position::new(x, y)
    }

    /// Iterator over all slots with their positions
    pub fn iter(&self) -> impl Iterator<Item = (Position, Slot)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .map(move |(i, slot)| (self.index_to_pos(i), *slot))
    }

    /// Number of slots in the grid
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_creation() {
        let grid = Grid::new(10, 10);
        assert_eq!(grid.width, 10);
        assert_eq!(grid.height, 10);
        assert_eq!(grid.len(), 100);
        assert!(grid.iter().all(|(_, slot)| slot.is_empty()));
    }

    #[test]
    fn test_zero_sized_grid() {
        let grid = Grid::new(0, 0);
        assert!(grid.is_empty());
        assert_eq!(grid.iter().count(), 0);
        assert!(grid.empty_positions().is_empty());
    }

    #[test]
    fn test_toroidal_addressing() {
        let mut grid = Grid::new(10, 10);
        let id = DenizenId::new();

        grid.set(Position::new(10, 10), Slot::Occupied(id));
        assert_eq!(grid.get(Position::new(0, 0)), Slot::Occupied(id));

        assert_eq!(grid.get(Position::new(-1, -1)), Slot::Empty);
    }

    #[test]
    fn test_neighbors_wrap_at_origin() {
        let grid = Grid::new(10, 10);
        let neighbors = grid.neighbors(Position::new(0, 0));

        assert_eq!(
            neighbors,
            [
                Position::new(0, 9),
                Position::new(0, 1),
                Position::new(9, 0),
                Position::new(1, 0),
            ]
        );
    }

    #[test]
    fn test_neighbors_on_one_by_one_grid() {
        let grid = Grid::new(1, 1);
        let neighbors = grid.neighbors(Position::new(0, 0));

        // All four neighbors coincide with the cell itself
        assert!(neighbors.iter().all(|&p| p == Position::new(0, 0)));
    }

    #[test]
    fn test_neighbors_on_two_by_one_grid() {
        let grid = Grid::new(2, 1);
        let neighbors = grid.neighbors(Position::new(0, 0));

        // North/south coincide with self, west/east with the other slot
        assert_eq!(
            neighbors,
            [
                Position::new(0, 0),
                Position::new(0, 0),
                Position::new(1, 0),
                Position::new(1, 0),
            ]
        );
    }

    #[test]
    fn test_empty_positions() {
        let mut grid = Grid::new(2, 2);
        grid.set(Position::new(1, 0), Slot::Occupied(DenizenId::new()));

        let empty = grid.empty_positions();
        assert_eq!(empty.len(), 3);
        assert!(!empty.contains(&Position::new(1, 0)));
    }
}
