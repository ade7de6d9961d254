pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum InvalidSelectionError {
    #[display("selection must cover at least 2 tiles, got {len}")]
    TooShort { len: usize },
    #[display("position {position} is outside the board")]
    OutOfBounds { position: usize },
    #[display("position {position} is selected more than once")]
    RepeatedPosition { position: usize },
    #[display("positions {from} and {to} are not adjacent")]
    NotAdjacent { from: usize, to: usize },
}
