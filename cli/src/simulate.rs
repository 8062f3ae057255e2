use std::fmt;

use anyhow::Result;
use horse_core::*;
use serde::Serialize;

use crate::StrategyKind;

/// Aggregate results of a batch of computer-played games.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub(crate) struct Summary {
    pub level: Level,
    pub games: u32,
    pub won: u32,
    pub lost: u32,
    pub board_complete: u32,
    pub budget_spent: u32,
    pub stuck: u32,
    pub bonuses_collected: u32,
    pub mean_score: f64,
    pub mean_moves: f64,
    pub best_score: CellCount,
}

impl Summary {
    fn record(&mut self, engine: &PlayEngine) {
        self.games += 1;
        match engine.state() {
            EngineState::Won => self.won += 1,
            EngineState::Lost => self.lost += 1,
            EngineState::Active => {}
        }
        match engine.finish_reason() {
            Some(FinishReason::BoardComplete) => self.board_complete += 1,
            Some(FinishReason::BudgetSpent) => self.budget_spent += 1,
            Some(FinishReason::Stuck) => self.stuck += 1,
            None => {}
        }
        self.bonuses_collected += u32::from(engine.bonuses_collected());
        self.mean_score += f64::from(engine.score());
        self.mean_moves += f64::from(engine.moves_made());
        self.best_score = self.best_score.max(engine.score());
    }

    fn finish(&mut self) {
        if self.games > 0 {
            self.mean_score /= f64::from(self.games);
            self.mean_moves /= f64::from(self.games);
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "level {}: {} games", self.level, self.games)?;
        writeln!(
            f,
            "  won   {:>5} (board complete {}, budget spent {})",
            self.won, self.board_complete, self.budget_spent
        )?;
        writeln!(f, "  lost  {:>5} (stuck {})", self.lost, self.stuck)?;
        writeln!(f, "  bonuses collected {}", self.bonuses_collected)?;
        writeln!(
            f,
            "  score mean {:.1}, best {}",
            self.mean_score, self.best_score
        )?;
        writeln!(f, "  moves mean {:.1}", self.mean_moves)
    }
}

fn strategy_for(kind: StrategyKind, seed: u64) -> Box<dyn Strategy> {
    match kind {
        StrategyKind::Warnsdorff => Box::new(WarnsdorffStrategy),
        StrategyKind::Random => Box::new(RandomStrategy::new(seed)),
    }
}

pub(crate) fn run(
    table: &LevelTable,
    level: Level,
    games: u32,
    seed: u64,
    kind: StrategyKind,
) -> Result<Summary> {
    let config = *table.get(level)?;
    let mut summary = Summary {
        level,
        ..Default::default()
    };

    for game in 0..games {
        let game_seed = seed.wrapping_add(u64::from(game));
        let mut engine = PlayEngine::generate(level, config, game_seed);
        let mut strategy = strategy_for(kind, game_seed);

        play_out(&mut engine, strategy.as_mut())?;
        if let Some(report) = engine.report() {
            log::debug!("game {} (seed {}): {}", game, game_seed, report);
        }
        summary.record(&engine);
    }

    summary.finish();
    Ok(summary)
}
