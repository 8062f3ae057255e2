use alloc::vec::Vec;
use ndarray::Array2;
use rand::prelude::*;
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;

use super::*;

/// Applies the level's prefill pattern at random and starts the horse on a random empty cell.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomLayoutGenerator {
    seed: u64,
}

impl RandomLayoutGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl LayoutGenerator for RandomLayoutGenerator {
    fn generate(self, size: Coord2, config: &LevelConfig) -> Layout {
        let size = (size.0.max(1), size.1.max(1));
        let (rows, cols) = size;
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut prefilled: Array2<bool> = Array2::default(size.to_nd_index());

        match config.prefill {
            Prefill::None => {}
            Prefill::Column => {
                let col = rng.random_range(0..cols);
                for row in 0..rows {
                    prefilled[(row, col).to_nd_index()] = true;
                }
            }
            Prefill::Row => {
                let row = rng.random_range(0..rows);
                for col in 0..cols {
                    prefilled[(row, col).to_nd_index()] = true;
                }
            }
            Prefill::Scattered(count) => {
                for _ in 0..count {
                    let coords = (rng.random_range(0..rows), rng.random_range(0..cols));
                    prefilled[coords.to_nd_index()] = true;
                }
            }
        }

        let free: Vec<Coord2> = prefilled
            .indexed_iter()
            .filter(|&(_, &filled)| !filled)
            .map(|((row, col), _)| (row as Coord, col as Coord))
            .collect();

        let start = match free.choose(&mut rng) {
            Some(&start) => start,
            None => {
                log::warn!("Prefill covers the whole board, starting on a visited cell");
                (rng.random_range(0..rows), rng.random_range(0..cols))
            }
        };
        log::debug!(
            "Generated layout with {} prefilled cells, start at {:?}",
            usize::from(mult(rows, cols)) - free.len(),
            start
        );

        Layout { prefilled, start }
    }
}
