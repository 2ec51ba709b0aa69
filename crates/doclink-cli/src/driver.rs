//! Load, repair and write a project document.

use crate::args::CliArgs;
use anyhow::{Context, Result};
use doclink_common::{FsMapFileReader, MapFileReader};
use doclink_model::{ProgramDocument, ProjectDocument, ProjectReflection, SourceText, SymbolTable};
use doclink_repair::{RepairContext, RepairOptions, RepairSummary, repair_project};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Input document: the project to repair and the symbol layer it was
/// built from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepairInput {
    pub project: ProjectDocument,
    #[serde(default)]
    pub program: ProgramDocument,
}

#[derive(Debug, Clone)]
pub struct RepairOutcome {
    pub project: ProjectDocument,
    pub summary: RepairSummary,
}

pub fn load_input(path: &Path) -> Result<RepairInput> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))
}

/// Read declaration files the program document lists without text.
/// Files that cannot be read are left out.
pub fn read_missing_sources(program: &mut ProgramDocument) {
    let known: BTreeSet<PathBuf> = program.sources.iter().map(|source| source.path.clone()).collect();
    let missing: BTreeSet<PathBuf> = program
        .symbols
        .iter()
        .flat_map(|symbol| symbol.declarations.iter())
        .filter(|path| !known.contains(*path))
        .cloned()
        .collect();

    for path in missing {
        match std::fs::read_to_string(&path) {
            Ok(text) => {
                trace!(file = %path.display(), "read declaration file from disk");
                program.sources.push(SourceText { path, text });
            }
            Err(err) => debug!(file = %path.display(), error = %err, "declaration file unreadable"),
        }
    }
}

/// Run the repair pass over a decoded input document.
pub fn repair_document(
    input: RepairInput,
    options: RepairOptions,
    map_reader: &dyn MapFileReader,
) -> Result<RepairOutcome> {
    let mut project =
        ProjectReflection::from_document(input.project).context("invalid project document")?;
    let program = SymbolTable::from_document(input.program).context("invalid program document")?;

    let context = RepairContext::new(&program)
        .with_map_reader(map_reader)
        .with_options(options);
    let summary = repair_project(&mut project, context);

    Ok(RepairOutcome {
        project: project.to_document(),
        summary,
    })
}

/// Execute the command described by `args`.
pub fn run(args: &CliArgs) -> Result<RepairSummary> {
    let mut input = load_input(&args.input)?;
    read_missing_sources(&mut input.program);

    let options = RepairOptions {
        source_maps: !args.no_source_maps,
    };
    let outcome = repair_document(input, options, &FsMapFileReader)?;

    let mut json = if args.pretty {
        serde_json::to_string_pretty(&outcome.project)
    } else {
        serde_json::to_string(&outcome.project)
    }
    .context("failed to serialize repaired project")?;
    json.push('\n');

    match &args.out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(json.as_bytes())
                .context("failed to write to stdout")?;
        }
    }

    Ok(outcome.summary)
}

#[cfg(test)]
#[path = "tests/driver_tests.rs"]
mod driver_tests;
