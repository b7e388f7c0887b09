//! Report shapes for `--output` JSON and the text views shared by the
//! subcommands.

use chrono::NaiveDate;
use serde::Serialize;
use tenbingo_engine::{
    BOARD_SIDE, BingoResult, Board, Catalog, DrawRecord, DrawSeed, FirstBingo, GameSession, Player,
    ScoreBreakdown, TermEnd, VersusSession, slot_index,
};

/// One board cell, row-major.
#[derive(Debug, Clone, Serialize)]
pub struct BoardCell {
    pub slot: usize,
    pub name: Option<String>,
    pub hit: bool,
}

/// One committed draw.
#[derive(Debug, Clone, Serialize)]
pub struct DrawEntry {
    pub date: NaiveDate,
    pub hit_names: Vec<String>,
}

/// One winning slot with its point contribution.
#[derive(Debug, Clone, Serialize)]
pub struct BreakdownEntry {
    pub slot: usize,
    pub name: String,
    pub total_days: i64,
    pub points: u32,
}

/// Full record of a solo run.
#[derive(Debug, Serialize)]
pub struct SoloReport {
    pub seed: DrawSeed,
    pub today: NaiveDate,
    pub spins: usize,
    pub board: Vec<BoardCell>,
    pub history: Vec<DrawEntry>,
    pub complete_lines: Vec<usize>,
    pub score: u32,
    pub breakdown: Vec<BreakdownEntry>,
}

impl SoloReport {
    pub fn of(session: &GameSession, seed: DrawSeed) -> Self {
        let scan = session.line_scan();
        let breakdown = session.score_breakdown();
        Self {
            seed,
            today: session.catalog().today(),
            spins: session.history().len(),
            board: board_cells(session.catalog(), session.board()),
            history: draw_entries(session.history()),
            complete_lines: scan.lines().to_vec(),
            score: breakdown.total(),
            breakdown: breakdown_entries(&breakdown),
        }
    }
}

/// Per-player section of a versus report.
#[derive(Debug, Serialize)]
pub struct PlayerReport {
    pub board: Vec<BoardCell>,
    pub line_count: usize,
    pub base_score: u32,
    pub multiplier: u32,
    pub bonus: u32,
    pub total: u32,
}

/// Full record of a versus run.
#[derive(Debug, Serialize)]
pub struct VersusReport {
    pub seed: DrawSeed,
    pub today: NaiveDate,
    pub spins: usize,
    pub first_bingo: String,
    pub history: Vec<DrawEntry>,
    pub players: Vec<PlayerReport>,
}

impl VersusReport {
    pub fn of(session: &VersusSession, seed: DrawSeed) -> Self {
        let players = Player::BOTH
            .into_iter()
            .map(|player| {
                let result = session.result_for(player);
                PlayerReport {
                    board: board_cells(session.catalog(), session.board(player)),
                    line_count: result.line_count,
                    base_score: result.base_score,
                    multiplier: result.multiplier,
                    bonus: result.bonus,
                    total: result.total,
                }
            })
            .collect();
        Self {
            seed,
            today: session.catalog().today(),
            spins: session.history().len(),
            first_bingo: first_bingo_label(session.first_bingo()),
            history: draw_entries(session.history()),
            players,
        }
    }
}

/// One catalog person with resolved terms.
#[derive(Debug, Serialize)]
pub struct PersonEntry {
    pub name: String,
    pub terms: Vec<TermEntry>,
    pub total_days: i64,
    pub points: u32,
}

/// One tenure interval; `end` is absent while the term is ongoing.
#[derive(Debug, Serialize)]
pub struct TermEntry {
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
}

/// One skipped input record.
#[derive(Debug, Serialize)]
pub struct SkippedEntry {
    pub index: usize,
    pub name: String,
    pub reason: String,
}

/// Machine-readable catalog dump.
#[derive(Debug, Serialize)]
pub struct CatalogReport {
    pub today: NaiveDate,
    pub persons: Vec<PersonEntry>,
    pub skipped: Vec<SkippedEntry>,
}

impl CatalogReport {
    pub fn of(catalog: &Catalog) -> Self {
        let persons = catalog
            .persons()
            .iter()
            .map(|person| PersonEntry {
                name: person.name().to_string(),
                terms: person
                    .intervals()
                    .iter()
                    .map(|interval| TermEntry {
                        start: interval.start(),
                        end: match interval.end() {
                            TermEnd::Closed(date) => Some(date),
                            TermEnd::Incumbent => None,
                        },
                    })
                    .collect(),
                total_days: person.total_days(),
                points: person.point_value(),
            })
            .collect();
        let skipped = catalog
            .diagnostics()
            .iter()
            .map(|diag| SkippedEntry {
                index: diag.index,
                name: diag.name.clone(),
                reason: diag.reason.to_string(),
            })
            .collect();
        Self {
            today: catalog.today(),
            persons,
            skipped,
        }
    }
}

fn board_cells(catalog: &Catalog, board: &Board) -> Vec<BoardCell> {
    board
        .slots()
        .enumerate()
        .map(|(slot, view)| BoardCell {
            slot,
            name: view
                .occupant()
                .and_then(|id| catalog.person(id))
                .map(|person| person.name().to_string()),
            hit: view.is_hit(),
        })
        .collect()
}

fn draw_entries(history: &[DrawRecord]) -> Vec<DrawEntry> {
    history
        .iter()
        .map(|record| DrawEntry {
            date: record.date,
            hit_names: record.hit_names.clone(),
        })
        .collect()
}

fn breakdown_entries(breakdown: &ScoreBreakdown) -> Vec<BreakdownEntry> {
    breakdown
        .rows()
        .iter()
        .map(|row| BreakdownEntry {
            slot: row.slot,
            name: row.name.clone(),
            total_days: row.total_days,
            points: row.points,
        })
        .collect()
}

pub fn first_bingo_label(latch: FirstBingo) -> String {
    match latch {
        FirstBingo::Undecided => "undecided".to_string(),
        FirstBingo::Winner(player) => format!("player {player}"),
        FirstBingo::Tied => "tied".to_string(),
    }
}

/// Prints the 5x5 grid, `*`-marking hit slots.
pub fn print_board(catalog: &Catalog, board: &Board) {
    for row in 0..BOARD_SIDE {
        let mut cells = Vec::with_capacity(BOARD_SIDE);
        for col in 0..BOARD_SIDE {
            let slot = board.slot(slot_index(row, col));
            let name = slot
                .occupant()
                .and_then(|id| catalog.person(id))
                .map_or("-", |person| person.name());
            let marker = if slot.is_hit() { '*' } else { ' ' };
            cells.push(format!("{marker}{name:<20}"));
        }
        println!("{}", cells.join(" ").trim_end());
    }
}

/// Prints the per-slot score table for the winning slots.
pub fn print_breakdown(breakdown: &ScoreBreakdown) {
    for row in breakdown.rows() {
        println!(
            "  slot {:>2}  {:<20} {:>6} days  {:>4} pt",
            row.slot, row.name, row.total_days, row.points
        );
    }
    println!("  total: {} pt", breakdown.total());
}

/// Prints one player's final line from a versus result.
pub fn print_result(player: Player, result: &BingoResult) {
    println!(
        "player {player}: {} lines, {} pt x{} + {} bonus = {} pt",
        result.line_count, result.base_score, result.multiplier, result.bonus, result.total
    );
}
