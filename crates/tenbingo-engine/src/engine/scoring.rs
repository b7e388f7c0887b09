use crate::core::{Board, Person};

use super::Catalog;

/// Bonus awarded once per versus game to the first player reaching bingo.
///
/// A simultaneous first bingo awards it to neither player.
pub const FIRST_BINGO_BONUS: u32 = 1500;

/// Score multiplier for a completed-line count.
///
/// - 0 lines: x0 (no score at all)
/// - 1 line: x1
/// - 2 lines: x2
/// - 3 lines or more: x3
#[must_use]
pub const fn multiplier(line_count: usize) -> u32 {
    match line_count {
        0 => 0,
        1 => 1,
        2 => 2,
        _ => 3,
    }
}

/// The two seats of a versus session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Player {
    #[display("A")]
    A,
    #[display("B")]
    B,
}

impl Player {
    pub const BOTH: [Self; 2] = [Self::A, Self::B];

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
        }
    }

    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

/// Write-once record of who reached bingo first.
///
/// [`Winner`](Self::Winner) and [`Tied`](Self::Tied) are terminal: once a
/// draw decides the latch, later draws never change it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, derive_more::IsVariant)]
pub enum FirstBingo {
    #[default]
    Undecided,
    Winner(Player),
    Tied,
}

impl FirstBingo {
    /// Folds one draw's post-hit line counts into the latch. Both counts
    /// belong to the same draw, so two players crossing together tie.
    pub(crate) fn observe(&mut self, a_lines: usize, b_lines: usize) {
        if !self.is_undecided() {
            return;
        }
        *self = match (a_lines > 0, b_lines > 0) {
            (true, true) => Self::Tied,
            (true, false) => Self::Winner(Player::A),
            (false, true) => Self::Winner(Player::B),
            (false, false) => return,
        };
    }

    /// The bonus one player earns from this latch.
    #[must_use]
    pub fn bonus_for(self, player: Player) -> u32 {
        match self {
            Self::Winner(winner) if winner == player => FIRST_BINGO_BONUS,
            _ => 0,
        }
    }
}

/// Sum of point values over the winning slots of `board`, each slot counted
/// once however many complete lines it sits on.
#[must_use]
pub fn base_score(catalog: &Catalog, board: &Board) -> u32 {
    board
        .scan()
        .winning_slots()
        .iter()
        .filter_map(|slot| board.slot(slot).occupant())
        .filter_map(|id| catalog.person(id))
        .map(Person::point_value)
        .sum()
}

/// One winning slot's contribution to a score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreRow {
    pub slot: usize,
    pub name: String,
    pub total_days: i64,
    pub points: u32,
}

/// Per-slot composition of a solo score: one row per winning slot, in slot
/// order, plus the total. A slot on several complete lines appears once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreBreakdown {
    rows: Vec<ScoreRow>,
    total: u32,
}

impl ScoreBreakdown {
    #[must_use]
    pub fn compute(catalog: &Catalog, board: &Board) -> Self {
        let mut rows = Vec::new();
        let mut total = 0;
        for slot in board.scan().winning_slots().iter() {
            let Some(person) = board.slot(slot).occupant().and_then(|id| catalog.person(id))
            else {
                continue;
            };
            rows.push(ScoreRow {
                slot,
                name: person.name().to_owned(),
                total_days: person.total_days(),
                points: person.point_value(),
            });
            total += person.point_value();
        }
        Self { rows, total }
    }

    #[must_use]
    pub fn rows(&self) -> &[ScoreRow] {
        &self.rows
    }

    #[must_use]
    pub const fn total(&self) -> u32 {
        self.total
    }
}

/// Versus-mode score composition for one player, recomputed on demand from
/// the board and latch state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BingoResult {
    pub line_count: usize,
    pub base_score: u32,
    pub multiplier: u32,
    pub bonus: u32,
    pub total: u32,
}

impl BingoResult {
    #[must_use]
    pub fn compute(catalog: &Catalog, board: &Board, bonus: u32) -> Self {
        let line_count = board.scan().count();
        let base = base_score(catalog, board);
        let factor = multiplier(line_count);
        Self {
            line_count,
            base_score: base,
            multiplier: factor,
            bonus,
            total: base * factor + bonus,
        }
    }
}
