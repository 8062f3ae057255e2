use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Invalid level, levels start at 1")]
    InvalidLevel,
    #[error("Level table has no levels")]
    EmptyLevelTable,
    #[error("Level table could not be parsed")]
    InvalidLevelTable,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;
