use super::{BOARD_SIDE, LineScan, PersonId, SLOT_COUNT, SlotSet};
use crate::PlaceError;

/// Flat slot index for a `(row, col)` pair, row-major.
#[must_use]
pub const fn slot_index(row: usize, col: usize) -> usize {
    debug_assert!(row < BOARD_SIDE && col < BOARD_SIDE);
    row * BOARD_SIDE + col
}

/// `(row, col)` pair for a flat slot index.
#[must_use]
pub const fn slot_coords(slot: usize) -> (usize, usize) {
    debug_assert!(slot < SLOT_COUNT);
    (slot / BOARD_SIDE, slot % BOARD_SIDE)
}

/// Lifecycle of a board.
///
/// Placement is only allowed while editable. Locking is one-way: a locked
/// board never becomes editable again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, derive_more::IsVariant)]
pub enum BoardPhase {
    #[default]
    Editable,
    Locked,
}

/// Snapshot of one board cell: who sits there and whether a draw has hit it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    occupant: Option<PersonId>,
    hit: bool,
}

impl Slot {
    #[must_use]
    pub const fn occupant(&self) -> Option<PersonId> {
        self.occupant
    }

    #[must_use]
    pub const fn is_hit(&self) -> bool {
        self.hit
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }
}

/// What a successful placement did to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// The target slot was empty; the person came from off the board.
    Placed,
    /// The person came from off the board and pushed `displaced` off it.
    Replaced { displaced: PersonId },
    /// The person was already on the board at `from` and the target was
    /// empty. `from == target` when the placement was a no-op.
    Moved { from: usize },
    /// The person was already on the board at `from`; it traded places with
    /// `with`, which stays on the board.
    Swapped { from: usize, with: PersonId },
}

/// A 5x5 arrangement of unique persons with sticky hit state.
///
/// The board stores only [`PersonId`]s and slot state. Which persons exist
/// and whether a date hits them is the catalog's business; callers resolve a
/// draw to hit ids and apply them with [`Board::mark_hits`].
///
/// Invariant: a person occupies at most one slot. Every mutation preserves
/// this, so placements swap or displace instead of duplicating.
#[derive(Debug, Clone, Default)]
pub struct Board {
    occupants: [Option<PersonId>; SLOT_COUNT],
    marked: SlotSet,
    phase: BoardPhase,
}

impl Board {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn phase(&self) -> BoardPhase {
        self.phase
    }

    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.phase.is_locked()
    }

    /// Snapshot of one cell.
    ///
    /// # Panics
    ///
    /// Panics if `slot` is not below [`SLOT_COUNT`].
    #[must_use]
    pub fn slot(&self, slot: usize) -> Slot {
        Slot {
            occupant: self.occupants[slot],
            hit: self.marked.contains(slot),
        }
    }

    /// Snapshots of all 25 cells in slot order.
    pub fn slots(&self) -> impl Iterator<Item = Slot> + '_ {
        (0..SLOT_COUNT).map(|slot| self.slot(slot))
    }

    /// All occupants in slot order, skipping empty slots.
    pub fn occupants(&self) -> impl Iterator<Item = PersonId> + '_ {
        self.occupants.iter().flatten().copied()
    }

    /// Slot currently holding `person`, if it is on the board.
    #[must_use]
    pub fn position_of(&self, person: PersonId) -> Option<usize> {
        self.occupants.iter().position(|&slot| slot == Some(person))
    }

    #[must_use]
    pub fn is_placed(&self, person: PersonId) -> bool {
        self.position_of(person).is_some()
    }

    #[must_use]
    pub fn placed_count(&self) -> usize {
        self.occupants.iter().flatten().count()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.occupants.iter().all(Option::is_some)
    }

    const fn check_editable(&self) -> Result<(), PlaceError> {
        if self.phase.is_locked() {
            return Err(PlaceError::BoardLocked);
        }
        Ok(())
    }

    /// Puts `person` into `slot`.
    ///
    /// If the person is already on the board it moves, trading places with
    /// any occupant of the target slot. Otherwise a displaced occupant
    /// leaves the board and is reported in the returned [`Placement`] so the
    /// caller can return it to its pool.
    pub fn place(&mut self, person: PersonId, slot: usize) -> Result<Placement, PlaceError> {
        if slot >= SLOT_COUNT {
            return Err(PlaceError::InvalidSlot { index: slot });
        }
        self.check_editable()?;
        let from = self.position_of(person);
        if from == Some(slot) {
            return Ok(Placement::Moved { from: slot });
        }
        let placement = match (from, self.occupants[slot]) {
            (None, None) => Placement::Placed,
            (None, Some(displaced)) => Placement::Replaced { displaced },
            (Some(from), None) => {
                self.occupants[from] = None;
                Placement::Moved { from }
            }
            (Some(from), Some(with)) => {
                self.occupants[from] = Some(with);
                Placement::Swapped { from, with }
            }
        };
        self.occupants[slot] = Some(person);
        Ok(placement)
    }

    /// Takes `person` off the board. Returns whether a slot was cleared;
    /// removing someone who is not placed is a successful no-op.
    pub fn remove(&mut self, person: PersonId) -> Result<bool, PlaceError> {
        self.check_editable()?;
        match self.position_of(person) {
            Some(slot) => {
                self.occupants[slot] = None;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Clears the board and assigns the first `min(25, n)` of `persons` to
    /// slots `0..25` in order. Returns how many slots were filled.
    ///
    /// Callers are responsible for feeding distinct persons; any shuffling
    /// happens upstream so all randomness stays with the session RNG.
    pub fn fill_in_order<I>(&mut self, persons: I) -> Result<usize, PlaceError>
    where
        I: IntoIterator<Item = PersonId>,
    {
        self.check_editable()?;
        self.occupants = [None; SLOT_COUNT];
        let mut filled = 0;
        for (slot, person) in self.occupants.iter_mut().zip(persons) {
            *slot = Some(person);
            filled += 1;
        }
        Ok(filled)
    }

    /// Freezes the arrangement. Idempotent.
    pub const fn lock(&mut self) {
        self.phase = BoardPhase::Locked;
    }

    /// Marks every occupied, not-yet-hit slot whose occupant is in `hits`.
    /// Returns the newly hit slots. Hits are sticky and never cleared.
    pub fn mark_hits(&mut self, hits: &[PersonId]) -> SlotSet {
        let newly: SlotSet = self
            .occupants
            .iter()
            .enumerate()
            .filter(|(slot, occupant)| {
                !self.marked.contains(*slot)
                    && occupant.is_some_and(|person| hits.contains(&person))
            })
            .map(|(slot, _)| slot)
            .collect();
        self.marked = self.marked.union(newly);
        newly
    }

    /// All hit slots so far.
    #[must_use]
    pub const fn marked(&self) -> SlotSet {
        self.marked
    }

    /// Scans the current hits against all 12 lines.
    #[must_use]
    pub fn scan(&self) -> LineScan {
        LineScan::of(self.marked)
    }
}
