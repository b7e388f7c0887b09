use std::path::PathBuf;

use chrono::{NaiveDate, Utc};
use tenbingo_engine::Catalog;

use crate::{report::CatalogReport, util};

/// Command line arguments for catalog inspection
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct CatalogArg {
    /// Path to the tenure records JSON file
    #[arg(long, default_value = "data/tenures.json")]
    catalog: PathBuf,
    /// Evaluate ongoing terms as of this date instead of the current day
    #[arg(long)]
    today: Option<NaiveDate>,
    /// Emit the catalog as JSON instead of a text table
    #[arg(long)]
    json: bool,
    /// Output file for --json (stdout when omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &CatalogArg) -> anyhow::Result<()> {
    let CatalogArg {
        catalog,
        today,
        json,
        output,
    } = arg;

    let records = util::read_records_file(catalog)?;
    let today = today.unwrap_or_else(|| Utc::now().date_naive());
    let catalog = Catalog::from_records(records, today);

    if *json {
        let report = CatalogReport::of(&catalog);
        util::Output::save_json(&report, output.clone())?;
        return Ok(());
    }

    println!("{} persons as of {today}", catalog.len());
    println!();
    println!("{:<22} {:>5} {:>7} {:>6}", "name", "terms", "days", "points");
    for person in catalog.persons() {
        println!(
            "{:<22} {:>5} {:>7} {:>6}",
            person.name(),
            person.intervals().len(),
            person.total_days(),
            person.point_value()
        );
    }

    if !catalog.diagnostics().is_empty() {
        println!();
        println!("skipped {} malformed records:", catalog.diagnostics().len());
        for diag in catalog.diagnostics() {
            println!("  record {} ({}): {}", diag.index, diag.name, diag.reason);
        }
    }

    Ok(())
}
