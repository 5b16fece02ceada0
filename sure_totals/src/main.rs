mod cli;
mod config;
mod inputs;
mod io;
mod process;

#[macro_use]
extern crate log;
#[macro_use]
extern crate anyhow;

use anyhow::Context;

fn main() -> anyhow::Result<()> {
    let cfg = cli::handle_cli().with_context(|| "Error processing command line arguments")?;
    let totals = process::aggregate_totals(&cfg)?;
    io::write_totals_file(cfg.output(), &totals)
}
