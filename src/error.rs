use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board dimensions must be nonzero")]
    InvalidSize,
    #[error("Too many mines")]
    TooManyMines,
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Unknown difficulty preset")]
    UnknownPreset,
}

pub type Result<T> = std::result::Result<T, GameError>;
