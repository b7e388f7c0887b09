use std::{path::PathBuf, sync::Arc, thread, time::Duration};

use chrono::{NaiveDate, Utc};
use rand::Rng as _;
use tenbingo_engine::{Catalog, DrawOutcome, DrawSeed, GameSession, SpinStep};

use crate::{
    report::{self, SoloReport},
    util,
};

/// Pause between candidate dates when animating.
const TICK_INTERVAL: Duration = Duration::from_millis(60);

/// Spin cap for --until-bingo.
const MAX_SPINS: usize = 1000;

/// Command line arguments for a solo run
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Path to the tenure records JSON file
    #[arg(long, default_value = "data/tenures.json")]
    catalog: PathBuf,
    /// 32-digit hex draw seed; random when omitted
    #[arg(long)]
    seed: Option<DrawSeed>,
    /// Evaluate ongoing terms as of this date instead of the current day
    #[arg(long)]
    today: Option<NaiveDate>,
    /// Number of spins to run
    #[arg(long, default_value_t = 5)]
    spins: usize,
    /// Keep spinning until the first bingo (overrides --spins)
    #[arg(long)]
    until_bingo: bool,
    /// Print every candidate date at the roulette cadence
    #[arg(long)]
    animate: bool,
    /// Write a JSON report of the whole run
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let SimulateArg {
        catalog,
        seed,
        today,
        spins,
        until_bingo,
        animate,
        output,
    } = arg;

    let records = util::read_records_file(catalog)?;
    let today = today.unwrap_or_else(|| Utc::now().date_naive());
    let catalog = Arc::new(Catalog::from_records(records, today));
    anyhow::ensure!(!catalog.is_empty(), "no usable tenure records in the catalog");

    let seed = seed.unwrap_or_else(|| rand::rng().random());
    let target = if *until_bingo { MAX_SPINS } else { *spins };
    tracing::info!(%seed, %today, persons = catalog.len(), "starting solo run");

    let mut session = GameSession::with_seed(Arc::clone(&catalog), seed);
    session.random_placement()?;
    session.lock();

    for spin in 1..=target {
        let Some(outcome) = run_spin(&mut session, *animate) else {
            break;
        };
        describe_draw(spin, &outcome);
        if *until_bingo && outcome.scan.is_bingo() {
            break;
        }
    }

    println!();
    report::print_board(&catalog, session.board());
    let scan = session.line_scan();
    if scan.is_bingo() {
        println!();
        println!("BINGO with {} complete lines", scan.count());
    }
    println!();
    report::print_breakdown(&session.score_breakdown());

    if let Some(path) = output {
        let run_report = SoloReport::of(&session, seed);
        util::Output::save_json(&run_report, Some(path.clone()))?;
        eprintln!("Saved run report to {}", path.display());
    }

    Ok(())
}

fn run_spin(session: &mut GameSession, animate: bool) -> Option<DrawOutcome> {
    if !session.spin() {
        return None;
    }
    loop {
        match session.tick() {
            SpinStep::Idle => return None,
            SpinStep::Candidate(date) => {
                if animate {
                    println!("  ... {date}");
                    thread::sleep(TICK_INTERVAL);
                }
            }
            SpinStep::Drawn(outcome) => return Some(outcome),
        }
    }
}

fn describe_draw(spin: usize, outcome: &DrawOutcome) {
    let hits = if outcome.hit_names.is_empty() {
        "no catalog hits".to_string()
    } else {
        outcome.hit_names.join(", ")
    };
    println!(
        "spin {spin}: {} -> {hits} ({} new, {} lines)",
        outcome.date,
        outcome.new_hits.len(),
        outcome.scan.count()
    );
}
