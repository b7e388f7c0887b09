pub use self::{board::*, lines::*, person::*, slot_set::*};

pub(crate) mod board;
pub(crate) mod lines;
pub(crate) mod person;
pub(crate) mod slot_set;

/// Side length of the board.
pub const BOARD_SIDE: usize = 5;

/// Number of slots on the board.
pub const SLOT_COUNT: usize = BOARD_SIDE * BOARD_SIDE;
