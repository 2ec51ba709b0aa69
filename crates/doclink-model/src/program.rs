//! Symbol layer.
//!
//! The repair pass never inspects source code; it only needs to know, for a
//! reference, which program symbol it resolves to and where that symbol is
//! declared. [`Program`] is that narrow interface and [`SymbolTable`] is an
//! in-memory implementation of it.

use crate::error::ModelError;
use crate::types::ReferenceType;
use indexmap::IndexMap;
use indexmap::map::Entry;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Identifies a program symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolId(pub u32);

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

/// One declaration of a symbol: the file it lives in and that file's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeclarationSite<'a> {
    pub file_name: &'a Path,
    pub text: &'a str,
}

/// Symbol resolution as seen by the repair pass.
///
/// Both methods are queried afresh on every repair; implementations must
/// not assume their answers are cached by the caller.
pub trait Program {
    /// The symbol `reference` resolves to, if any.
    fn symbol_of(&self, reference: &ReferenceType) -> Option<SymbolId>;

    /// Declarations of `symbol` in the order the symbol layer reports them.
    fn declarations(&self, symbol: SymbolId) -> Vec<DeclarationSite<'_>>;
}

/// A symbol and the files it is declared in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolData {
    pub id: SymbolId,
    pub name: String,
    #[serde(default)]
    pub declarations: Vec<PathBuf>,
}

/// Raw text of a file known to the symbol layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceText {
    pub path: PathBuf,
    pub text: String,
}

/// Serialized form of a symbol table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramDocument {
    #[serde(default)]
    pub symbols: Vec<SymbolData>,
    #[serde(default)]
    pub sources: Vec<SourceText>,
}

/// In-memory symbol table.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: IndexMap<SymbolId, SymbolData>,
    sources: FxHashMap<PathBuf, String>,
    next_id: u32,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a new symbol with no declarations.
    pub fn alloc(&mut self, name: impl Into<String>) -> SymbolId {
        let id = SymbolId(self.next_id);
        self.next_id += 1;
        self.symbols.insert(
            id,
            SymbolData {
                id,
                name: name.into(),
                declarations: Vec::new(),
            },
        );
        id
    }

    /// Append a declaration site. Unknown symbols are ignored.
    pub fn add_declaration(&mut self, symbol: SymbolId, file_name: impl Into<PathBuf>) {
        if let Some(data) = self.symbols.get_mut(&symbol) {
            data.declarations.push(file_name.into());
        }
    }

    pub fn set_source_text(&mut self, file_name: impl Into<PathBuf>, text: impl Into<String>) {
        self.sources.insert(file_name.into(), text.into());
    }

    pub fn get(&self, symbol: SymbolId) -> Option<&SymbolData> {
        self.symbols.get(&symbol)
    }

    pub fn source_text(&self, file_name: &Path) -> Option<&str> {
        self.sources.get(file_name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    // =========================================================================
    // Serialization
    // =========================================================================

    pub fn from_document(document: ProgramDocument) -> Result<Self, ModelError> {
        let mut table = Self::new();
        for data in document.symbols {
            if data.declarations.iter().any(|path| path.as_os_str().is_empty()) {
                return Err(ModelError::EmptyDeclarationPath { symbol: data.id });
            }
            let id = data.id;
            match table.symbols.entry(id) {
                Entry::Occupied(_) => return Err(ModelError::DuplicateSymbol(id)),
                Entry::Vacant(slot) => {
                    slot.insert(data);
                }
            }
            table.next_id = table.next_id.max(id.0 + 1);
        }
        for source in document.sources {
            table.sources.insert(source.path, source.text);
        }
        Ok(table)
    }

    pub fn to_document(&self) -> ProgramDocument {
        let mut sources: Vec<SourceText> = self
            .sources
            .iter()
            .map(|(path, text)| SourceText {
                path: path.clone(),
                text: text.clone(),
            })
            .collect();
        sources.sort_by(|left, right| left.path.cmp(&right.path));
        ProgramDocument {
            symbols: self.symbols.values().cloned().collect(),
            sources,
        }
    }
}

impl Program for SymbolTable {
    fn symbol_of(&self, reference: &ReferenceType) -> Option<SymbolId> {
        reference.symbol.filter(|symbol| self.symbols.contains_key(symbol))
    }

    fn declarations(&self, symbol: SymbolId) -> Vec<DeclarationSite<'_>> {
        let Some(data) = self.symbols.get(&symbol) else {
            return Vec::new();
        };
        data.declarations
            .iter()
            .map(|file_name| DeclarationSite {
                file_name,
                text: self.source_text(file_name).unwrap_or_default(),
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "tests/program_tests.rs"]
mod program_tests;
