//! Type nodes.
//!
//! `SomeType` mirrors the documentation tool's serialized type model: every
//! variant is tagged by `"type"` with the tool's own tag names
//! (`"indexedAccess"`, `"named-tuple-member"`, ...). Tags this crate does
//! not know deserialize into `SomeType::Opaque` and are written back
//! verbatim.

use crate::program::SymbolId;
use crate::project::ProjectReflection;
use crate::reflection::ReflectionId;
use serde::{Deserialize, Serialize};

/// A node of the type graph attached to a reflection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SomeType {
    Array(ArrayType),
    Conditional(ConditionalType),
    IndexedAccess(IndexedAccessType),
    Inferred(InferredType),
    Intersection(IntersectionType),
    Intrinsic(IntrinsicType),
    Literal(LiteralType),
    Mapped(MappedType),
    #[serde(rename = "named-tuple-member")]
    NamedTupleMember(NamedTupleMemberType),
    Optional(OptionalType),
    Predicate(PredicateType),
    Query(QueryType),
    Reference(ReferenceType),
    Reflection(ReflectionType),
    Rest(RestType),
    #[serde(rename = "template-literal")]
    TemplateLiteral(TemplateLiteralType),
    Tuple(TupleType),
    TypeOperator(TypeOperatorType),
    Union(UnionType),
    Unknown(UnknownType),
    /// A variant this crate does not recognise, kept as raw JSON.
    #[serde(untagged)]
    Opaque(serde_json::Value),
}

// =============================================================================
// Variants with child slots
// =============================================================================

/// `T[]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrayType {
    pub element_type: Box<SomeType>,
}

/// `C extends E ? T : F`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionalType {
    pub check_type: Box<SomeType>,
    pub extends_type: Box<SomeType>,
    pub true_type: Box<SomeType>,
    pub false_type: Box<SomeType>,
}

/// `O[I]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexedAccessType {
    pub object_type: Box<SomeType>,
    pub index_type: Box<SomeType>,
}

/// `A & B`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntersectionType {
    pub types: Vec<SomeType>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MappedModifier {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Remove,
}

/// `{ [P in K as N]: T }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappedType {
    pub parameter: String,
    pub parameter_type: Box<SomeType>,
    pub template_type: Box<SomeType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readonly_modifier: Option<MappedModifier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional_modifier: Option<MappedModifier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_type: Option<Box<SomeType>>,
}

/// `[name?: T]` inside a tuple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedTupleMemberType {
    pub name: String,
    #[serde(default)]
    pub is_optional: bool,
    pub element: Box<SomeType>,
}

/// `T?` inside a tuple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionalType {
    pub element_type: Box<SomeType>,
}

/// `x is T` / `asserts x is T` / `asserts x`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredicateType {
    pub name: String,
    #[serde(default)]
    pub asserts: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_type: Option<Box<SomeType>>,
}

/// `typeof x`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryType {
    pub query_type: Box<SomeType>,
}

/// A named reference to another type, possibly generic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceType {
    pub name: String,
    /// Program symbol recorded during analysis. Resolve it through
    /// `Program::symbol_of` rather than reading it directly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<SymbolId>,
    /// Documentation node this reference links to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reflection: Option<ReflectionId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_arguments: Vec<SomeType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualified_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
    /// Link to documentation hosted outside the project.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,
}

impl ReferenceType {
    /// An unresolved reference carrying only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbol: None,
            reflection: None,
            type_arguments: Vec::new(),
            qualified_name: None,
            package: None,
            external_url: None,
        }
    }

    pub fn with_symbol(mut self, symbol: SymbolId) -> Self {
        self.symbol = Some(symbol);
        self
    }

    pub fn with_reflection(mut self, reflection: ReflectionId) -> Self {
        self.reflection = Some(reflection);
        self
    }

    pub fn with_type_arguments(mut self, type_arguments: Vec<SomeType>) -> Self {
        self.type_arguments = type_arguments;
        self
    }

    /// A reference to `symbol`, linked to whichever reflection the project
    /// registered for that symbol.
    pub fn create_symbol_reference(
        name: impl Into<String>,
        symbol: SymbolId,
        project: &ProjectReflection,
    ) -> Self {
        Self {
            reflection: project.get_reflection_from_symbol(symbol),
            ..Self::new(name).with_symbol(symbol)
        }
    }
}

/// An inline object type; its declaration is a reflection of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReflectionType {
    pub declaration: ReflectionId,
}

/// `...T` inside a tuple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestType {
    pub element_type: Box<SomeType>,
}

/// `` `head${T}text${U}text` ``
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateLiteralType {
    pub head: String,
    pub tail: Vec<(SomeType, String)>,
}

/// `[A, B]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TupleType {
    #[serde(default)]
    pub elements: Vec<SomeType>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeOperator {
    Keyof,
    Unique,
    Readonly,
}

/// `keyof T` / `unique T` / `readonly T`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeOperatorType {
    pub operator: TypeOperator,
    pub target: Box<SomeType>,
}

/// `A | B`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnionType {
    pub types: Vec<SomeType>,
}

// =============================================================================
// Leaf variants
// =============================================================================

/// `infer T`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferredType {
    pub name: String,
}

/// `string`, `number`, `any`, ...
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntrinsicType {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BigIntLiteral {
    pub negative: bool,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LiteralValue {
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
    BigInt(BigIntLiteral),
}

/// `"text"`, `42`, `true`, `null`, `10n`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiteralType {
    pub value: LiteralValue,
}

/// A type the analysis phase could not express structurally.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnknownType {
    pub name: String,
}

// =============================================================================
// Constructors
// =============================================================================

impl SomeType {
    pub fn intrinsic(name: impl Into<String>) -> Self {
        SomeType::Intrinsic(IntrinsicType { name: name.into() })
    }

    pub fn literal(value: LiteralValue) -> Self {
        SomeType::Literal(LiteralType { value })
    }

    pub fn array(element_type: SomeType) -> Self {
        SomeType::Array(ArrayType {
            element_type: Box::new(element_type),
        })
    }

    pub fn union(types: Vec<SomeType>) -> Self {
        SomeType::Union(UnionType { types })
    }

    pub fn intersection(types: Vec<SomeType>) -> Self {
        SomeType::Intersection(IntersectionType { types })
    }

    pub fn tuple(elements: Vec<SomeType>) -> Self {
        SomeType::Tuple(TupleType { elements })
    }

    pub fn reference(reference: ReferenceType) -> Self {
        SomeType::Reference(reference)
    }

    pub fn as_reference(&self) -> Option<&ReferenceType> {
        match self {
            SomeType::Reference(reference) => Some(reference),
            _ => None,
        }
    }

    /// Move the node out, leaving an empty `unknown` node behind.
    pub(crate) fn take(&mut self) -> SomeType {
        std::mem::replace(self, SomeType::Unknown(UnknownType::default()))
    }
}

#[cfg(test)]
#[path = "tests/types_tests.rs"]
mod types_tests;
