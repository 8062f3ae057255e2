use alloc::vec;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Level number as shown to the player, starting at 1.
pub type Level = u8;

/// Cells that are already visited when a level starts.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Prefill {
    None,
    /// One whole column picked at random.
    Column,
    /// One whole row picked at random.
    Row,
    /// That many random picks, repeats allowed.
    Scattered(CellCount),
}

impl Default for Prefill {
    fn default() -> Self {
        Self::None
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Move budget, the opening placement included.
    pub moves: CellCount,
    /// A bonus cell appears every this many accepted moves.
    pub bonus_interval: CellCount,
    #[serde(default)]
    pub prefill: Prefill,
}

impl LevelConfig {
    pub const fn new_unchecked(moves: CellCount, bonus_interval: CellCount, prefill: Prefill) -> Self {
        Self {
            moves,
            bonus_interval,
            prefill,
        }
    }

    pub fn new(moves: CellCount, bonus_interval: CellCount, prefill: Prefill) -> Self {
        let moves = moves.max(1);
        let bonus_interval = bonus_interval.max(1);
        Self::new_unchecked(moves, bonus_interval, prefill)
    }

    /// Whether a bonus cell is due after `moves_made` accepted moves.
    pub const fn is_bonus_move(&self, moves_made: CellCount) -> bool {
        moves_made > 0 && moves_made % self.bonus_interval == 0
    }

    fn sanitized(self) -> Self {
        Self::new(self.moves, self.bonus_interval, self.prefill)
    }
}

/// Ordered level configurations, level 1 first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLevelTable")]
pub struct LevelTable {
    #[serde(rename = "level")]
    levels: Vec<LevelConfig>,
}

/// Unchecked shape of a level table as written in config files.
#[derive(Deserialize)]
struct RawLevelTable {
    level: Vec<LevelConfig>,
}

impl TryFrom<RawLevelTable> for LevelTable {
    type Error = GameError;

    fn try_from(raw: RawLevelTable) -> Result<Self> {
        Self::new(raw.level)
    }
}

impl LevelTable {
    pub fn new(levels: Vec<LevelConfig>) -> Result<Self> {
        if levels.is_empty() {
            return Err(GameError::EmptyLevelTable);
        }
        Ok(Self {
            levels: levels.into_iter().map(LevelConfig::sanitized).collect(),
        })
    }

    /// Parses a table written as a `[[level]]` array of tables.
    #[cfg(feature = "toml")]
    pub fn from_toml(text: &str) -> Result<Self> {
        let raw: RawLevelTable = toml::from_str(text).map_err(|err| {
            log::warn!("Rejected level table: {}", err);
            GameError::InvalidLevelTable
        })?;
        Self::new(raw.level)
    }

    pub fn max_level(&self) -> Level {
        self.levels.len().try_into().unwrap_or(Level::MAX)
    }

    /// Config for `level`, levels past the end of the table replay the last one.
    pub fn get(&self, level: Level) -> Result<&LevelConfig> {
        if level == 0 {
            return Err(GameError::InvalidLevel);
        }
        self.levels
            .get(usize::from(level - 1))
            .or_else(|| self.levels.last())
            .ok_or(GameError::EmptyLevelTable)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Level, &LevelConfig)> {
        (1..=Level::MAX).zip(self.levels.iter())
    }
}

impl Default for LevelTable {
    fn default() -> Self {
        Self {
            levels: vec![
                LevelConfig::new_unchecked(64, 4, Prefill::Column),
                LevelConfig::new_unchecked(50, 6, Prefill::Row),
                LevelConfig::new_unchecked(40, 10, Prefill::Scattered(8)),
            ],
        }
    }
}
