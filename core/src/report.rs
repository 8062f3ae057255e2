use alloc::format;
use alloc::string::String;
use core::fmt;

use crate::*;

/// Text attached when the player shares a screenshot of their board.
pub const SHARE_MESSAGE: &str = "I challenge you to beat me!";

/// End-of-game message shown over the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Report {
    pub title: &'static str,
    pub action: &'static str,
    pub score: String,
}

impl Report {
    /// `None` while the game is still being played.
    pub fn from_engine(engine: &PlayEngine) -> Option<Self> {
        match engine.state() {
            EngineState::Active => None,
            EngineState::Won => Some(Self {
                title: "You Win!!",
                action: "Next Level",
                score: format_elapsed(engine.elapsed_secs()),
            }),
            EngineState::Lost => Some(Self {
                title: "Game Over",
                action: "Start Again",
                score: format!(
                    "Score: {}/{}",
                    engine.score(),
                    engine.board().total_cells()
                ),
            }),
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) [{}]", self.title, self.score, self.action)
    }
}
