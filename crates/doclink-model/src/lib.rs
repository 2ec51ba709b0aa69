//! Documentation model for doclink.
//!
//! This crate holds everything the repair pass reads or mutates:
//! - Type nodes (`SomeType` and one struct per variant)
//! - The recursive rewriting visitor over type nodes (`visitor`)
//! - Documentation nodes and the project that owns them
//! - The symbol layer interface (`Program`) and an in-memory `SymbolTable`

pub mod error;
pub use error::ModelError;

// Type nodes - the polymorphic type graph attached to reflections
pub mod types;
pub use types::{
    ArrayType, BigIntLiteral, ConditionalType, IndexedAccessType, InferredType, IntersectionType, IntrinsicType,
    LiteralType, LiteralValue, MappedModifier, MappedType, NamedTupleMemberType, OptionalType,
    PredicateType, QueryType, ReferenceType, ReflectionType, RestType, SomeType,
    TemplateLiteralType, TupleType, TypeOperator, TypeOperatorType, UnionType, UnknownType,
};

// Visitor - recursive rewriting and read-only walking of type nodes
pub mod visitor;
pub use visitor::{
    RecursiveRewriter, TypeKind, TypeRewriter, collect_references, for_each_child, walk_type,
};

// Reflections and the project that owns them
pub mod reflection;
pub use reflection::{Reflection, ReflectionId, ReflectionKind, ReflectionVariant};

pub mod project;
pub use project::{ProjectDocument, ProjectReflection, SourceFileRecord};

// Symbol layer
pub mod program;
pub use program::{DeclarationSite, Program, ProgramDocument, SourceText, SymbolData, SymbolId, SymbolTable};
