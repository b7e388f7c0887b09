//! Game orchestration over the core data structures.
//!
//! - [`Catalog`] - deduplicated persons built from raw tenure records
//! - [`DrawSeed`] - seed for deterministic date draws
//! - [`DateSampler`] / [`Roulette`] - uniform date sampling and the
//!   tick-budgeted roulette state machine
//! - [`ScoreBreakdown`] / [`BingoResult`] - solo and versus score composition
//! - [`GameSession`] - solo controller (one board, one draw history)
//! - [`VersusSession`] - two boards drafting from a shared pool, with the
//!   first-bingo latch
//!
//! # Game Flow
//!
//! A typical solo game progresses as follows:
//!
//! 1. Build a [`Catalog`] from raw records and wrap it in an [`Arc`]
//! 2. Create a [`GameSession`], place persons (or use
//!    [`GameSession::random_placement`]) and lock the board
//! 3. Call [`GameSession::spin`], then [`GameSession::tick`] once per
//!    animation step until it reports [`SpinStep::Drawn`]
//! 4. Repeat spins; query the line scan and score at any point
//!
//! The engine never sleeps between ticks. Whatever cadence the roulette
//! animation should have belongs to the driver loop.
//!
//! [`Arc`]: std::sync::Arc

pub use self::{catalog::*, draw_seed::*, roulette::*, scoring::*, session::*, versus::*};

mod catalog;
mod draw_seed;
mod roulette;
mod scoring;
mod session;
mod versus;
