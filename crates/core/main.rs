#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    clippy::missing_safety_doc,
    clippy::missing_const_for_fn
)]
#![allow(clippy::as_conversions, clippy::mod_module_files)]

use std::process;

use booksift::Config;

use clap::Parser;
use eyre::WrapErr;
use log::{error, trace};

fn main() {
    if let Err(err) = try_main() {
        error!("{:#}", err);
        process::exit(2);
    }
}

fn try_main() -> eyre::Result<()> {
    let Cli { verbosity, quiet } = Cli::parse();

    setup_errlog(verbosity as usize, quiet)?;

    let config = Config::default();
    trace!("Running with {config:?}");

    let saved = booksift::run(&config)
        .wrap_err_with(|| format!("Could not save books to '{}'", config.output.display()))?;

    println!("{saved} books saved successfully");
    Ok(())
}

fn setup_errlog(verbosity: usize, quiet: bool) -> eyre::Result<()> {
    // if quiet then ignore verbosity but still show errors
    let verbosity = if quiet { 0 } else { verbosity + 1 };

    stderrlog::new().verbosity(verbosity).init()?;
    Ok(())
}

#[derive(Parser)]
#[clap(name = "booksift")]
#[clap(about = "Search Open Library and save the books first published after 2000 to a CSV file")]
#[clap(version)]
struct Cli {
    /// How chatty the program is while running
    ///
    /// The number of times this flag is used will increase how chatty
    /// the program is.
    #[clap(short, long, parse(from_occurrences))]
    verbosity: u8,

    /// Only show errors on stderr, the saved count is still printed to stdout.
    #[clap(short, long)]
    quiet: bool,
}
