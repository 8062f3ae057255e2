use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Occupancy grid the horse walks on.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<BoardCell>,
    visited_count: CellCount,
}

impl Board {
    pub fn new(size: Coord2) -> Self {
        Self {
            cells: Array2::default(size.to_nd_index()),
            visited_count: 0,
        }
    }

    /// Board with the layout's prefilled cells already visited. The start cell is left alone.
    pub fn from_layout(layout: &Layout) -> Self {
        let mut board = Self::new(layout.size());
        for coords in layout.prefilled_cells() {
            board.set(coords, BoardCell::Visited);
        }
        board
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.cells.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    pub fn total_cells(&self) -> CellCount {
        self.cells.len().try_into().unwrap()
    }

    pub fn visited_count(&self) -> CellCount {
        self.visited_count
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> BoardCell {
        self.cells[coords.to_nd_index()]
    }

    pub fn is_visited(&self, coords: Coord2) -> bool {
        self[coords] == BoardCell::Visited
    }

    pub fn is_empty(&self, coords: Coord2) -> bool {
        self[coords] == BoardCell::Empty
    }

    pub fn is_bonus(&self, coords: Coord2) -> bool {
        self[coords] == BoardCell::Bonus
    }

    /// Every cell has been visited.
    pub fn is_complete(&self) -> bool {
        self.visited_count == self.total_cells()
    }

    /// Overwrites a cell, keeping the visited count in sync.
    pub fn set(&mut self, coords: Coord2, cell: BoardCell) {
        let slot = &mut self.cells[coords.to_nd_index()];
        match (*slot == BoardCell::Visited, cell == BoardCell::Visited) {
            (false, true) => self.visited_count += 1,
            (true, false) => self.visited_count -= 1,
            _ => {}
        }
        *slot = cell;
    }

    /// Cells holding neither a visit nor a bonus, in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.coords().filter(|&pos| self.is_empty(pos))
    }

    /// Cells the horse could still land on, in row-major order.
    pub fn open_cells(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.coords().filter(|&pos| self[pos].is_open())
    }

    pub fn neighbors(&self, coords: Coord2) -> OrthogonalIter {
        OrthogonalIter::new(coords, self.size())
    }

    /// Orthogonal neighbors that have not been visited, bonus cells included.
    pub fn unvisited_neighbors(&self, coords: Coord2) -> impl Iterator<Item = Coord2> + '_ {
        self.neighbors(coords).filter(|&pos| self[pos].is_open())
    }

    fn coords(&self) -> impl Iterator<Item = Coord2> + use<> {
        let (rows, cols) = self.size();
        (0..rows).flat_map(move |row| (0..cols).map(move |col| (row, col)))
    }
}

impl Index<Coord2> for Board {
    type Output = BoardCell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}
