use arrayvec::ArrayVec;

use super::{BOARD_SIDE, SLOT_COUNT, SlotSet};

/// Number of scorable lines on a 5x5 board: 5 rows, 5 columns, 2 diagonals.
pub const LINE_COUNT: usize = 12;

/// Slot indices of every scorable line, in fixed order: rows top to bottom,
/// then columns left to right, then the main diagonal and the anti-diagonal.
///
/// Line indices into this table are stable and used in reports.
const LINES: [[usize; BOARD_SIDE]; LINE_COUNT] = [
    [0, 1, 2, 3, 4],
    [5, 6, 7, 8, 9],
    [10, 11, 12, 13, 14],
    [15, 16, 17, 18, 19],
    [20, 21, 22, 23, 24],
    [0, 5, 10, 15, 20],
    [1, 6, 11, 16, 21],
    [2, 7, 12, 17, 22],
    [3, 8, 13, 18, 23],
    [4, 9, 14, 19, 24],
    [0, 6, 12, 18, 24],
    [4, 8, 12, 16, 20],
];

const fn mask_of(line: &[usize; BOARD_SIDE]) -> SlotSet {
    let mut set = SlotSet::EMPTY;
    let mut i = 0;
    while i < BOARD_SIDE {
        set.insert(line[i]);
        i += 1;
    }
    set
}

const fn build_line_masks() -> [SlotSet; LINE_COUNT] {
    let mut masks = [SlotSet::EMPTY; LINE_COUNT];
    let mut i = 0;
    while i < LINE_COUNT {
        masks[i] = mask_of(&LINES[i]);
        i += 1;
    }
    masks
}

const LINE_MASKS: [SlotSet; LINE_COUNT] = build_line_masks();

/// What kind of line a line index denotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Horizontal line, `0` is the top row.
    Row(usize),
    /// Vertical line, `0` is the leftmost column.
    Column(usize),
    /// Top-left to bottom-right.
    MainDiagonal,
    /// Top-right to bottom-left.
    AntiDiagonal,
}

/// Classifies a line index from the fixed line table.
///
/// # Panics
///
/// Panics if `line` is not below [`LINE_COUNT`].
#[must_use]
pub const fn line_kind(line: usize) -> LineKind {
    match line {
        0..BOARD_SIDE => LineKind::Row(line),
        BOARD_SIDE..10 => LineKind::Column(line - BOARD_SIDE),
        10 => LineKind::MainDiagonal,
        11 => LineKind::AntiDiagonal,
        _ => panic!("line index out of range"),
    }
}

/// Slot indices making up a line, for rendering.
///
/// # Panics
///
/// Panics if `line` is not below [`LINE_COUNT`].
#[must_use]
pub const fn line_slots(line: usize) -> [usize; BOARD_SIDE] {
    LINES[line]
}

/// Result of scanning a marked set against all 12 lines.
///
/// `winning_slots` is the union of the complete lines' slots; a slot shared
/// by several lines appears once, so its length can be smaller than
/// `count() * 5`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineScan {
    complete: ArrayVec<usize, LINE_COUNT>,
    winning: SlotSet,
}

impl LineScan {
    /// Scans `marked` and collects the fully marked lines in table order.
    #[must_use]
    pub fn of(marked: SlotSet) -> Self {
        let mut complete = ArrayVec::new();
        let mut winning = SlotSet::EMPTY;
        for (line, mask) in LINE_MASKS.iter().enumerate() {
            if marked.contains_all(*mask) {
                complete.push(line);
                winning = winning.union(*mask);
            }
        }
        Self { complete, winning }
    }

    /// Indices of complete lines, ascending.
    #[must_use]
    pub fn lines(&self) -> &[usize] {
        &self.complete
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.complete.len()
    }

    /// Union of the slots of all complete lines.
    #[must_use]
    pub const fn winning_slots(&self) -> SlotSet {
        self.winning
    }

    /// Whether at least one line is complete.
    #[must_use]
    pub fn is_bingo(&self) -> bool {
        !self.complete.is_empty()
    }
}
