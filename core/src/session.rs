use serde::{Deserialize, Serialize};

use crate::*;

/// Premium unlock record kept by the host between launches.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    #[serde(rename = "PREMIUM")]
    pub premium: bool,
    #[serde(rename = "LEVEL")]
    pub level: Level,
}

impl Progress {
    /// Marks the player premium after a completed checkout for `level`.
    pub fn unlock(&mut self, level: Level) {
        self.premium = true;
        self.level = level.max(1);
        log::debug!("Premium unlocked at level {}", self.level);
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            premium: false,
            level: 1,
        }
    }
}

/// Carries the current level from one game to the next.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    table: LevelTable,
    level: Level,
}

impl Session {
    pub fn new(table: LevelTable) -> Self {
        Self { table, level: 1 }
    }

    /// Premium players pick up at their unlocked level, everyone else at level 1.
    pub fn resume(table: LevelTable, progress: &Progress) -> Self {
        let level = if progress.premium {
            progress.level.max(1)
        } else {
            1
        };
        Self { table, level }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn table(&self) -> &LevelTable {
        &self.table
    }

    pub fn new_game(&self, seed: u64) -> Result<PlayEngine> {
        let config = *self.table.get(self.level)?;
        Ok(PlayEngine::generate(self.level, config, seed))
    }

    /// Winning moves on to the next level, losing starts over from level 1.
    pub fn record(&mut self, engine: &PlayEngine) -> Level {
        match engine.state() {
            EngineState::Active => {}
            EngineState::Won => self.level = self.level.saturating_add(1),
            EngineState::Lost => self.level = 1,
        }
        self.level
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(LevelTable::default())
    }
}
