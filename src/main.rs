use clap::Parser;
use log::{debug, warn};

mod args;
mod tabulate;

use crate::args::Args;
use crate::tabulate::config_reader::resolve_settings;
use crate::tabulate::{run_topsis, CliResult};

fn run(args: &Args) -> CliResult<()> {
    let settings = resolve_settings(args)?;
    let outcome = run_topsis(&settings)?;
    debug!(
        "run: ranked {:?} alternatives",
        outcome.result.ranks.len()
    );
    Ok(())
}

fn main() {
    let args = Args::parse();
    if args.verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::init();
    }
    debug!("args: {:?}", args);

    if let Err(e) = run(&args) {
        warn!("Error occured {:?}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
