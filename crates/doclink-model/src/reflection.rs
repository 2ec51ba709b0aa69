//! Documentation nodes ("reflections").

use crate::program::SymbolId;
use crate::types::SomeType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Identifies a reflection within its project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReflectionId(pub u32);

impl fmt::Display for ReflectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a reflection documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReflectionKind {
    Project,
    Module,
    Namespace,
    Enum,
    EnumMember,
    Variable,
    Function,
    Class,
    Interface,
    Constructor,
    Property,
    Method,
    CallSignature,
    IndexSignature,
    ConstructorSignature,
    Parameter,
    TypeLiteral,
    TypeParameter,
    Accessor,
    GetSignature,
    SetSignature,
    TypeAlias,
    Reference,
    Document,
}

/// The structural family a reflection kind belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReflectionVariant {
    Project,
    Declaration,
    Signature,
    Parameter,
    TypeParameter,
    Document,
}

impl ReflectionKind {
    pub fn variant(self) -> ReflectionVariant {
        match self {
            ReflectionKind::Project => ReflectionVariant::Project,
            ReflectionKind::Document => ReflectionVariant::Document,
            ReflectionKind::CallSignature
            | ReflectionKind::IndexSignature
            | ReflectionKind::ConstructorSignature
            | ReflectionKind::GetSignature
            | ReflectionKind::SetSignature => ReflectionVariant::Signature,
            ReflectionKind::Parameter => ReflectionVariant::Parameter,
            ReflectionKind::TypeParameter => ReflectionVariant::TypeParameter,
            _ => ReflectionVariant::Declaration,
        }
    }

    /// Whether reflections of this kind carry a top-level type.
    pub fn is_typed(self) -> bool {
        matches!(
            self.variant(),
            ReflectionVariant::Declaration
                | ReflectionVariant::Signature
                | ReflectionVariant::Parameter
                | ReflectionVariant::TypeParameter
        )
    }
}

/// A documentation node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reflection {
    pub id: ReflectionId,
    pub name: String,
    pub kind: ReflectionKind,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_: Option<SomeType>,
    /// Program symbol this reflection documents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<SymbolId>,
    /// Full path of the analyzed file that declares it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file: Option<PathBuf>,
}

impl Reflection {
    pub fn new(id: ReflectionId, name: impl Into<String>, kind: ReflectionKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            type_: None,
            symbol: None,
            source_file: None,
        }
    }
}
