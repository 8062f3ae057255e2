use serde::{Deserialize, Serialize};

/// Occupancy of a single board cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardCell {
    Empty,
    Visited,
    Bonus,
}

impl BoardCell {
    /// Whether the horse may still land here.
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Empty | Self::Bonus)
    }
}

impl Default for BoardCell {
    fn default() -> Self {
        Self::Empty
    }
}
