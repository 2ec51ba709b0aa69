use doclink_common::{FsMapFileReader, MapFileReader};
use doclink_model::Program;

/// Tunables for the repair pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepairOptions {
    /// Follow source maps of declaration files that were not analyzed.
    pub source_maps: bool,
}

impl Default for RepairOptions {
    fn default() -> Self {
        Self { source_maps: true }
    }
}

/// External collaborators consulted while repairing.
#[derive(Clone, Copy)]
pub struct RepairContext<'a> {
    pub program: &'a dyn Program,
    pub map_reader: &'a dyn MapFileReader,
    pub options: RepairOptions,
}

impl<'a> RepairContext<'a> {
    /// Context reading companion map files from disk.
    pub fn new(program: &'a dyn Program) -> Self {
        Self {
            program,
            map_reader: &FsMapFileReader,
            options: RepairOptions::default(),
        }
    }

    pub fn with_map_reader(mut self, map_reader: &'a dyn MapFileReader) -> Self {
        self.map_reader = map_reader;
        self
    }

    pub fn with_options(mut self, options: RepairOptions) -> Self {
        self.options = options;
        self
    }
}
