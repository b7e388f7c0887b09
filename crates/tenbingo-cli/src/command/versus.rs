use std::{cmp::Ordering, path::PathBuf, sync::Arc, thread, time::Duration};

use chrono::{NaiveDate, Utc};
use rand::Rng as _;
use tenbingo_engine::{
    Catalog, DrawSeed, FirstBingo, Player, VersusDrawOutcome, VersusSession, VersusSpinStep,
};

use crate::{
    report::{self, VersusReport},
    util,
};

/// Pause between candidate dates when animating.
const TICK_INTERVAL: Duration = Duration::from_millis(60);

/// Spin cap for --until-bingo.
const MAX_SPINS: usize = 1000;

/// Command line arguments for a versus run
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct VersusArg {
    /// Path to the tenure records JSON file
    #[arg(long, default_value = "data/tenures.json")]
    catalog: PathBuf,
    /// 32-digit hex draw seed; random when omitted
    #[arg(long)]
    seed: Option<DrawSeed>,
    /// Evaluate ongoing terms as of this date instead of the current day
    #[arg(long)]
    today: Option<NaiveDate>,
    /// Number of shared spins to run
    #[arg(long, default_value_t = 10)]
    spins: usize,
    /// Keep spinning until the first-bingo bonus is decided (overrides --spins)
    #[arg(long)]
    until_bingo: bool,
    /// Commit each spin after this many candidates instead of the full budget
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=30))]
    stop_after: Option<u32>,
    /// Print every candidate date at the roulette cadence
    #[arg(long)]
    animate: bool,
    /// Write a JSON report of the whole run
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &VersusArg) -> anyhow::Result<()> {
    let VersusArg {
        catalog,
        seed,
        today,
        spins,
        until_bingo,
        stop_after,
        animate,
        output,
    } = arg;

    let records = util::read_records_file(catalog)?;
    let today = today.unwrap_or_else(|| Utc::now().date_naive());
    let catalog = Arc::new(Catalog::from_records(records, today));
    anyhow::ensure!(!catalog.is_empty(), "no usable tenure records in the catalog");

    let seed = seed.unwrap_or_else(|| rand::rng().random());
    let target = if *until_bingo { MAX_SPINS } else { *spins };
    tracing::info!(%seed, %today, persons = catalog.len(), "starting versus run");

    let mut session = VersusSession::with_seed(Arc::clone(&catalog), seed);
    for player in Player::BOTH {
        session.random_placement_for(player)?;
        session.lock_for(player);
    }

    let mut latch = FirstBingo::Undecided;
    for spin in 1..=target {
        let Some(outcome) = run_spin(&mut session, *stop_after, *animate) else {
            break;
        };
        describe_draw(spin, &outcome);
        if latch.is_undecided() && !outcome.first_bingo().is_undecided() {
            latch = outcome.first_bingo();
            println!(
                "first bingo: {} on spin {spin}",
                report::first_bingo_label(latch)
            );
        }
        if *until_bingo && !latch.is_undecided() {
            break;
        }
    }

    for player in Player::BOTH {
        println!();
        println!("player {player}");
        report::print_board(&catalog, session.board(player));
        report::print_result(player, &session.result_for(player));
    }

    println!();
    let total_a = session.result_for(Player::A).total;
    let total_b = session.result_for(Player::B).total;
    match total_a.cmp(&total_b) {
        Ordering::Greater => println!("winner: player A"),
        Ordering::Less => println!("winner: player B"),
        Ordering::Equal => println!("result: draw"),
    }

    if let Some(path) = output {
        let run_report = VersusReport::of(&session, seed);
        util::Output::save_json(&run_report, Some(path.clone()))?;
        eprintln!("Saved run report to {}", path.display());
    }

    Ok(())
}

fn run_spin(
    session: &mut VersusSession,
    stop_after: Option<u32>,
    animate: bool,
) -> Option<VersusDrawOutcome> {
    if !session.spin() {
        return None;
    }
    let mut ticks = 0;
    loop {
        match session.tick() {
            VersusSpinStep::Idle => return None,
            VersusSpinStep::Candidate(date) => {
                ticks += 1;
                if animate {
                    println!("  ... {date}");
                    thread::sleep(TICK_INTERVAL);
                }
                if stop_after == Some(ticks) {
                    return session.stop();
                }
            }
            VersusSpinStep::Drawn(outcome) => return Some(outcome),
        }
    }
}

fn describe_draw(spin: usize, outcome: &VersusDrawOutcome) {
    let hits = if outcome.hit_names().is_empty() {
        "no catalog hits".to_string()
    } else {
        outcome.hit_names().join(", ")
    };
    println!(
        "spin {spin}: {} -> {hits} (A {} lines, B {} lines)",
        outcome.date(),
        outcome.scan(Player::A).count(),
        outcome.scan(Player::B).count()
    );
}
