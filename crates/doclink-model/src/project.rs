//! The project: owner of all reflections and source file records.

use crate::error::ModelError;
use crate::program::SymbolId;
use crate::reflection::{Reflection, ReflectionId, ReflectionKind};
use indexmap::IndexMap;
use indexmap::map::Entry;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::trace;

/// An analyzed source file and the reflections declared in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFileRecord {
    pub full_file_name: PathBuf,
    /// Reflections in declaration order.
    pub reflections: Vec<ReflectionId>,
}

/// Root container of the documentation model.
#[derive(Debug, Clone, Default)]
pub struct ProjectReflection {
    pub name: String,
    reflections: IndexMap<ReflectionId, Reflection>,
    files: IndexMap<PathBuf, SourceFileRecord>,
    symbol_to_reflection: FxHashMap<SymbolId, ReflectionId>,
    next_id: u32,
}

/// Serialized form of a project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectDocument {
    pub name: String,
    #[serde(default)]
    pub reflections: Vec<Reflection>,
}

impl ProjectReflection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Allocate a fresh id and register a reflection under it.
    pub fn create_reflection(
        &mut self,
        name: impl Into<String>,
        kind: ReflectionKind,
        symbol: Option<SymbolId>,
        source_file: Option<&Path>,
    ) -> ReflectionId {
        let id = ReflectionId(self.next_id);
        let mut reflection = Reflection::new(id, name, kind);
        reflection.symbol = symbol;
        reflection.source_file = source_file.map(Path::to_path_buf);
        let registered = self.register_reflection(reflection);
        debug_assert!(registered.is_ok(), "fresh reflection id {id} collided");
        id
    }

    /// Register a fully built reflection, indexing it by symbol and by
    /// source file.
    ///
    /// The first reflection registered for a symbol stays the symbol's
    /// reflection.
    pub fn register_reflection(&mut self, reflection: Reflection) -> Result<ReflectionId, ModelError> {
        let id = reflection.id;
        let Entry::Vacant(slot) = self.reflections.entry(id) else {
            return Err(ModelError::DuplicateReflection(id));
        };

        if let Some(symbol) = reflection.symbol {
            self.symbol_to_reflection.entry(symbol).or_insert(id);
        }
        if let Some(source_file) = &reflection.source_file {
            self.files
                .entry(source_file.clone())
                .or_insert_with(|| SourceFileRecord {
                    full_file_name: source_file.clone(),
                    reflections: Vec::new(),
                })
                .reflections
                .push(id);
        }
        trace!(reflection = %id, name = %reflection.name, "registered reflection");

        slot.insert(reflection);
        self.next_id = self.next_id.max(id.0 + 1);
        Ok(id)
    }

    pub fn reflection(&self, id: ReflectionId) -> Option<&Reflection> {
        self.reflections.get(&id)
    }

    pub fn reflection_mut(&mut self, id: ReflectionId) -> Option<&mut Reflection> {
        self.reflections.get_mut(&id)
    }

    /// Reflections in registration order.
    pub fn reflections(&self) -> impl Iterator<Item = &Reflection> {
        self.reflections.values()
    }

    pub fn reflection_ids(&self) -> Vec<ReflectionId> {
        self.reflections.keys().copied().collect()
    }

    /// Source file records in the order their first reflection was
    /// registered.
    pub fn files(&self) -> impl Iterator<Item = &SourceFileRecord> {
        self.files.values()
    }

    /// Exact full-path lookup.
    pub fn file(&self, full_file_name: &Path) -> Option<&SourceFileRecord> {
        self.files.get(full_file_name)
    }

    pub fn get_symbol_from_reflection(&self, id: ReflectionId) -> Option<SymbolId> {
        self.reflection(id)?.symbol
    }

    pub fn get_reflection_from_symbol(&self, symbol: SymbolId) -> Option<ReflectionId> {
        self.symbol_to_reflection.get(&symbol).copied()
    }

    // =========================================================================
    // Serialization
    // =========================================================================

    pub fn from_document(document: ProjectDocument) -> Result<Self, ModelError> {
        let mut project = Self::new(document.name);
        for reflection in document.reflections {
            project.register_reflection(reflection)?;
        }
        Ok(project)
    }

    pub fn to_document(&self) -> ProjectDocument {
        ProjectDocument {
            name: self.name.clone(),
            reflections: self.reflections.values().cloned().collect(),
        }
    }
}

#[cfg(test)]
#[path = "tests/project_tests.rs"]
mod project_tests;
