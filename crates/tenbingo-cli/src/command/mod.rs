use clap::{Parser, Subcommand};

use self::{catalog::CatalogArg, simulate::SimulateArg, versus::VersusArg};

mod catalog;
mod simulate;
mod versus;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Inspect the tenure catalog and report skipped records
    Catalog(#[clap(flatten)] CatalogArg),
    /// Run a solo bingo session against the catalog
    Simulate(#[clap(flatten)] SimulateArg),
    /// Run a two-player session with a shared draw and first-bingo bonus
    Versus(#[clap(flatten)] VersusArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Catalog(arg) => catalog::run(&arg)?,
        Mode::Simulate(arg) => simulate::run(&arg)?,
        Mode::Versus(arg) => versus::run(&arg)?,
    }
    Ok(())
}
