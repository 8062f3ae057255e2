#![no_std]

extern crate alloc;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use autoplay::*;
pub use board::*;
pub use cell::*;
pub use clock::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use level::*;
pub use report::*;
pub use session::*;
pub use types::*;

mod autoplay;
mod board;
mod cell;
mod clock;
mod engine;
mod error;
mod generator;
mod level;
mod report;
mod session;
mod types;

/// Starting arrangement of a game: which cells are visited up front and where the horse is placed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    prefilled: Array2<bool>,
    start: Coord2,
}

impl Layout {
    pub fn new(size: Coord2, prefilled: &[Coord2], start: Coord2) -> Result<Self> {
        let mut mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in prefilled {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoords);
            }
            mask[coords.to_nd_index()] = true;
        }

        Self::from_mask(mask, start)
    }

    pub fn from_mask(prefilled: Array2<bool>, start: Coord2) -> Result<Self> {
        let dim = prefilled.dim();
        if start.0 as usize >= dim.0 || start.1 as usize >= dim.1 {
            return Err(GameError::InvalidCoords);
        }
        Ok(Self { prefilled, start })
    }

    /// Layout with nothing prefilled.
    pub fn open(size: Coord2, start: Coord2) -> Result<Self> {
        Self::new(size, &[], start)
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.prefilled.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    pub fn start(&self) -> Coord2 {
        self.start
    }

    pub fn is_prefilled(&self, coords: Coord2) -> bool {
        self.prefilled[coords.to_nd_index()]
    }

    pub fn prefilled_cells(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.prefilled
            .indexed_iter()
            .filter(|&(_, &filled)| filled)
            .map(|((row, col), _)| (row as Coord, col as Coord))
    }
}

/// Outcome of moving the horse
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    NoChange,
    Moved,
    Won,
    Lost,
}

impl MoveOutcome {
    pub const fn has_update(self) -> bool {
        use MoveOutcome::*;
        match self {
            NoChange => false,
            Moved => true,
            Won => true,
            Lost => true,
        }
    }
}
