use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for the doclink binary.
#[derive(Parser, Debug)]
#[command(
    name = "doclink",
    version,
    about = "Repair dangling type references in a documentation project"
)]
pub struct CliArgs {
    /// JSON file holding `{ "project": ..., "program": ... }`.
    pub input: PathBuf,

    /// Write the repaired project here instead of stdout.
    #[arg(short = 'o', long)]
    pub out: Option<PathBuf>,

    /// Only repair references whose declaration file was analyzed directly.
    #[arg(long = "no-source-maps")]
    pub no_source_maps: bool,

    /// Pretty-print the output JSON.
    #[arg(long)]
    pub pretty: bool,

    /// Print a repair summary to stderr.
    #[arg(long)]
    pub summary: bool,
}

#[cfg(test)]
#[path = "tests/args_tests.rs"]
mod args_tests;
