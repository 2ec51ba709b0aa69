//! Reference Repair Resolver
//!
//! Relocates the reflection a broken reference should point at:
//!
//! 1. Walk the symbol's declarations in the order the program reports them.
//! 2. A declaration whose file is an analyzed source file wins outright.
//! 3. Otherwise the declaration file is treated as generated output and its
//!    source map is consulted; the first listed original source that is an
//!    analyzed file wins.
//! 4. In the winning file, the first reflection with the reference's name
//!    provides the symbol the rebuilt reference is bound to.
//!
//! Every failure along the way leaves the reference as it was.

use crate::context::RepairContext;
use doclink_common::{load_source_map, normalize_path};
use doclink_model::{
    ProjectReflection, Program, ReferenceType, SomeType, SourceFileRecord, SymbolId, TypeRewriter,
};
use std::path::Path;
use tracing::{debug, trace};

/// A reference is broken when it resolves to a symbol but is not linked
/// to a reflection.
pub fn is_reference_broken(reference: &ReferenceType, program: &dyn Program) -> bool {
    reference.reflection.is_none() && program.symbol_of(reference).is_some()
}

/// The `reference` rewrite rule of the repair pass.
pub struct ReferenceRepair<'a> {
    project: &'a ProjectReflection,
    context: RepairContext<'a>,
    repaired: usize,
}

impl<'a> ReferenceRepair<'a> {
    pub fn new(project: &'a ProjectReflection, context: RepairContext<'a>) -> Self {
        Self {
            project,
            context,
            repaired: 0,
        }
    }

    /// Number of references rebuilt so far.
    pub fn repaired(&self) -> usize {
        self.repaired
    }

    /// Return `reference` unchanged unless it is broken and a replacement
    /// can be found.
    pub fn repair(&mut self, reference: ReferenceType) -> ReferenceType {
        if !is_reference_broken(&reference, self.context.program) {
            return reference;
        }
        let Some(target_symbol) = self.find_target_symbol(&reference) else {
            return reference;
        };

        let ReferenceType {
            name,
            type_arguments,
            qualified_name,
            package,
            external_url,
            ..
        } = reference;
        let mut fixed = ReferenceType::create_symbol_reference(name, target_symbol, self.project);
        fixed.type_arguments = type_arguments;
        fixed.qualified_name = qualified_name;
        fixed.package = package;
        fixed.external_url = external_url;

        debug!(
            reference = %fixed.name,
            symbol = %target_symbol,
            reflection = ?fixed.reflection,
            "repaired broken reference"
        );
        self.repaired += 1;
        fixed
    }

    fn find_target_symbol(&self, reference: &ReferenceType) -> Option<SymbolId> {
        let symbol = self.context.program.symbol_of(reference)?;

        let Some(source_file) = self.find_symbol_source_file(symbol) else {
            debug!(reference = %reference.name, %symbol, "no analyzed file declares symbol");
            return None;
        };

        let project = self.project;
        let Some(target) = source_file.reflections.iter().copied().find(|id| {
            project
                .reflection(*id)
                .is_some_and(|reflection| reflection.name == reference.name)
        }) else {
            debug!(
                reference = %reference.name,
                file = %source_file.full_file_name.display(),
                "no reflection with matching name"
            );
            return None;
        };

        let target_symbol = project.get_symbol_from_reflection(target);
        if target_symbol.is_none() {
            debug!(reference = %reference.name, reflection = %target, "candidate reflection has no symbol");
        }
        target_symbol
    }

    /// The analyzed source file that declares `symbol`, directly or through
    /// a source map. Declarations are scanned in order and the first match
    /// wins.
    pub fn find_symbol_source_file(&self, symbol: SymbolId) -> Option<&'a SourceFileRecord> {
        let project = self.project;

        for declaration in self.context.program.declarations(symbol) {
            if let Some(file) = project.file(declaration.file_name) {
                trace!(file = %file.full_file_name.display(), "declaration file analyzed directly");
                return Some(file);
            }
            if !self.context.options.source_maps {
                continue;
            }

            let base_dir = declaration.file_name.parent().unwrap_or(Path::new(""));
            let loaded = match load_source_map(declaration.text, base_dir, self.context.map_reader) {
                Ok(Some(loaded)) => loaded,
                Ok(None) => continue,
                Err(err) => {
                    debug!(
                        file = %declaration.file_name.display(),
                        error = %err,
                        "ignoring unusable source map"
                    );
                    continue;
                }
            };

            for source in loaded.resolved_sources() {
                if let Some(file) = project
                    .files()
                    .find(|file| normalize_path(&file.full_file_name) == source)
                {
                    trace!(
                        generated = %declaration.file_name.display(),
                        file = %file.full_file_name.display(),
                        "declaration file mapped to analyzed source"
                    );
                    return Some(file);
                }
            }
        }

        None
    }
}

impl TypeRewriter for ReferenceRepair<'_> {
    fn rewrite_reference(&mut self, ty: ReferenceType) -> SomeType {
        SomeType::Reference(self.repair(ty))
    }
}

#[cfg(test)]
#[path = "tests/resolver_unit_tests.rs"]
mod resolver_unit_tests;
