pub use self::{board::*, dictionary::*, grid::*};

pub(crate) mod board;
pub(crate) mod dictionary;
pub(crate) mod grid;
