use super::SLOT_COUNT;

/// Set of board slot indices packed into the low 25 bits of a `u32`.
///
/// Marking state and per-draw hit sets are all slot sets, so the type stays
/// `Copy` and set algebra is single bit ops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SlotSet(u32);

impl SlotSet {
    const FULL_MASK: u32 = (1 << SLOT_COUNT) - 1;

    pub const EMPTY: Self = Self(0);

    #[must_use]
    pub const fn contains(self, slot: usize) -> bool {
        debug_assert!(slot < SLOT_COUNT);
        self.0 & (1 << slot) != 0
    }

    pub const fn insert(&mut self, slot: usize) {
        debug_assert!(slot < SLOT_COUNT);
        self.0 |= 1 << slot;
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Whether every slot in `other` is also in `self`.
    #[must_use]
    pub const fn contains_all(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn is_full(self) -> bool {
        self.0 == Self::FULL_MASK
    }

    /// Slot indices in ascending order.
    pub fn iter(self) -> impl Iterator<Item = usize> {
        (0..SLOT_COUNT).filter(move |&slot| self.contains(slot))
    }
}

impl FromIterator<usize> for SlotSet {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let mut set = Self::EMPTY;
        for slot in iter {
            set.insert(slot);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let set = SlotSet::EMPTY;
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert!(!set.contains(0));
        assert!(!set.contains(24));
    }

    #[test]
    fn test_insert_and_contains() {
        let mut set = SlotSet::EMPTY;
        set.insert(0);
        set.insert(12);
        set.insert(24);

        assert!(set.contains(0));
        assert!(set.contains(12));
        assert!(set.contains(24));
        assert!(!set.contains(1));
        assert_eq!(set.len(), 3);
        assert!(!set.is_empty());
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut set = SlotSet::EMPTY;
        set.insert(7);
        set.insert(7);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_iter_ascending() {
        let set: SlotSet = [24, 3, 15, 0].into_iter().collect();
        let slots: Vec<_> = set.iter().collect();
        assert_eq!(slots, [0, 3, 15, 24]);
    }

    #[test]
    fn test_union_and_contains_all() {
        let row: SlotSet = [0, 1, 2, 3, 4].into_iter().collect();
        let partial: SlotSet = [0, 1, 2].into_iter().collect();

        assert!(row.contains_all(partial));
        assert!(!partial.contains_all(row));
        assert_eq!(partial.union(row), row);
        assert!(row.contains_all(SlotSet::EMPTY));
    }

    #[test]
    fn test_is_full() {
        let all: SlotSet = (0..SLOT_COUNT).collect();
        assert!(all.is_full());
        assert_eq!(all.len(), SLOT_COUNT);

        let almost: SlotSet = (0..SLOT_COUNT - 1).collect();
        assert!(!almost.is_full());
    }
}
