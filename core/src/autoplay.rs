use alloc::vec::Vec;
use rand::prelude::*;
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;

use crate::*;

/// Picks the next cell for a computer-driven horse.
pub trait Strategy {
    fn choose(&mut self, engine: &PlayEngine) -> Option<Coord2>;
}

/// Grabs bonus cells when reachable, otherwise heads for the option with the fewest ways onward.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct WarnsdorffStrategy;

impl Strategy for WarnsdorffStrategy {
    fn choose(&mut self, engine: &PlayEngine) -> Option<Coord2> {
        let board = engine.board();
        let options: Vec<Coord2> = engine.options().collect();

        if let Some(&bonus) = options.iter().find(|&&pos| board.is_bonus(pos)) {
            return Some(bonus);
        }

        // dead ends only when nothing else is left
        options.into_iter().min_by_key(|&pos| {
            let onward = board.unvisited_neighbors(pos).count();
            (onward == 0, onward)
        })
    }
}

/// Uniform pick among the legal options.
#[derive(Clone, Debug)]
pub struct RandomStrategy {
    rng: SmallRng,
}

impl RandomStrategy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Strategy for RandomStrategy {
    fn choose(&mut self, engine: &PlayEngine) -> Option<Coord2> {
        let options: Vec<Coord2> = engine.options().collect();
        options.choose(&mut self.rng).copied()
    }
}

/// Lets `strategy` play until the game ends or it has nothing legal to offer.
pub fn play_out<S: Strategy + ?Sized>(engine: &mut PlayEngine, strategy: &mut S) -> Result<EngineState> {
    while !engine.is_finished() {
        let Some(coords) = strategy.choose(engine) else {
            log::warn!("Strategy gave up at {:?} with the game still active", engine.cursor());
            break;
        };

        if !engine.move_to(coords)?.has_update() {
            log::warn!("Strategy chose illegal move to {:?}", coords);
            break;
        }
    }
    Ok(engine.state())
}
