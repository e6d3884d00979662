use clap::Parser;

use crate::cli::{args::Cli, run};

mod cli;
mod disk;
mod image;
mod report;
mod utils;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        report::error(&e);
        std::process::exit(1);
    }
}
