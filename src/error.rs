//! Setup errors
//!
//! The simulation itself never fails; only bringing up the page can.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("could not load sprite sheet '{url}'")]
    SpriteSheet { url: String },
    #[error("element #{0} not found")]
    MissingElement(String),
    #[error("canvas context unavailable: {0}")]
    Context(String),
}
