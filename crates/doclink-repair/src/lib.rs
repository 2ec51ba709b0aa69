//! Reference repair for documentation models.
//!
//! A reference type is *broken* when the program resolves it to a symbol
//! but it is not linked to any reflection. This happens when the symbol's
//! declaration lives in a file the documentation tool did not analyze,
//! typically compiled output whose source map points back at an analyzed
//! file. The repair pass finds the analyzed file (directly, or through the
//! declaration file's source map), looks up a reflection with the same name
//! in it, and replaces the broken reference with one bound to that
//! reflection's symbol.
//!
//! The host calls [`repair_references`] once per reflection after symbol
//! resolution, or [`repair_project`] to cover a whole project.

mod context;
pub use context::{RepairContext, RepairOptions};

pub mod resolver;
pub use resolver::{ReferenceRepair, is_reference_broken};

mod pass;
pub use pass::{RepairSummary, count_broken_references, repair_project, repair_references};
