#![allow(clippy::print_stderr)]

use anyhow::Result;
use clap::Parser;

use doclink_cli::args::CliArgs;
use doclink_cli::{driver, tracing_config};

fn main() -> Result<()> {
    // Zero cost unless DOCLINK_LOG or RUST_LOG is set.
    tracing_config::init_tracing();

    let args = CliArgs::parse();
    let summary = driver::run(&args)?;
    if args.summary {
        eprintln!("{summary}");
    }
    Ok(())
}
