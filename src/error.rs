use thiserror::Error;

/// Errors raised while parsing a map description or placing entities on it.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum MapError {
    #[error("invalid line code: {0}")]
    InvalidLineCode(String),
    #[error("invalid dimension: {0}")]
    InvalidDimension(String),
    #[error("invalid mountain coordinates: {0}")]
    InvalidMountain(String),
    #[error("invalid treasure coordinates or amount: {0}")]
    InvalidTreasure(String),
    #[error("invalid adventurer coordinates: {0}")]
    InvalidAdventurer(String),
    #[error("invalid orientation code: {0}")]
    InvalidOrientation(String),
    #[error("invalid movement code: {0}")]
    InvalidMovement(char),
    #[error("missing dimension line")]
    MissingDimension,
    #[error("duplicate dimension line: {0}")]
    DuplicateDimension(String),
    #[error("{kind} coordinates out of bounds: {x},{y}")]
    OutOfBounds { kind: &'static str, x: usize, y: usize },
}
