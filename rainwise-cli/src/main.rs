//! Binary crate for the `rainwise` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Driving the core client
//! - Human-friendly output formatting

use clap::Parser;

mod cli;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cmd = cli::Cli::parse();
    cmd.run()
}
