//! Entry point of the repair pass.

use crate::context::RepairContext;
use crate::resolver::{ReferenceRepair, is_reference_broken};
use doclink_model::{
    ProjectReflection, Program, RecursiveRewriter, ReflectionId, collect_references,
};
use std::fmt;
use tracing::{debug, trace};

/// Counters reported by [`repair_project`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepairSummary {
    /// Typed reflections that carried a type.
    pub reflections_visited: usize,
    pub references_repaired: usize,
    /// Broken references left after the pass.
    pub broken_remaining: usize,
}

impl fmt::Display for RepairSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "visited {} reflections, repaired {} references, {} still broken",
            self.reflections_visited, self.references_repaired, self.broken_remaining
        )
    }
}

/// Repair the broken references in the type of reflection `id`.
///
/// Only declarations, signatures, parameters and type parameters are
/// considered. The rewritten type is stored back on the reflection. Returns
/// the number of references rebuilt.
pub fn repair_references(
    project: &mut ProjectReflection,
    id: ReflectionId,
    context: RepairContext<'_>,
) -> usize {
    let Some(reflection) = project.reflection_mut(id) else {
        return 0;
    };
    if !reflection.kind.is_typed() {
        return 0;
    }
    let Some(ty) = reflection.type_.take() else {
        return 0;
    };

    let (rewritten, repaired) = {
        let mut repair = ReferenceRepair::new(project, context);
        let rewritten = RecursiveRewriter::new(&mut repair).rewrite(ty);
        (rewritten, repair.repaired())
    };

    if let Some(reflection) = project.reflection_mut(id) {
        reflection.type_ = Some(rewritten);
    }
    if repaired > 0 {
        trace!(reflection = %id, repaired, "stored repaired type");
    }
    repaired
}

/// Run [`repair_references`] over every reflection in the project.
pub fn repair_project(project: &mut ProjectReflection, context: RepairContext<'_>) -> RepairSummary {
    let _span = tracing::debug_span!("repair_project", project = %project.name).entered();

    let mut summary = RepairSummary::default();
    for id in project.reflection_ids() {
        let visits = project
            .reflection(id)
            .is_some_and(|reflection| reflection.kind.is_typed() && reflection.type_.is_some());
        if !visits {
            continue;
        }
        summary.reflections_visited += 1;
        summary.references_repaired += repair_references(project, id, context);
    }
    summary.broken_remaining = count_broken_references(project, context.program);

    debug!(
        visited = summary.reflections_visited,
        repaired = summary.references_repaired,
        remaining = summary.broken_remaining,
        "repair pass finished"
    );
    summary
}

/// Count broken references reachable from the types of typed reflections.
pub fn count_broken_references(project: &ProjectReflection, program: &dyn Program) -> usize {
    project
        .reflections()
        .filter(|reflection| reflection.kind.is_typed())
        .filter_map(|reflection| reflection.type_.as_ref())
        .flat_map(collect_references)
        .filter(|reference| is_reference_broken(reference, program))
        .count()
}
