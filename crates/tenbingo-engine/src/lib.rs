pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

use self::core::PersonId;

/// Rejection reasons for placement commands. A rejected command leaves the
/// board unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PlaceError {
    #[display("slot index {index} is outside the 5x5 board")]
    InvalidSlot { index: usize },
    #[display("board is locked")]
    BoardLocked,
    #[display("person id {id} is not in the catalog")]
    UnknownPerson { id: PersonId },
    #[display("person id {id} is already placed on the opposing board")]
    PersonTaken { id: PersonId },
}
