//! Type Visitor Pattern
//!
//! Two halves live here:
//!
//! - **Rewriting**: implement [`TypeRewriter`] for the variants you care
//!   about (every method defaults to returning the node unchanged) and drive
//!   it with [`RecursiveRewriter`], which applies the rewrite to a node and
//!   then descends into that node's child slots, storing each rewritten child
//!   back into its slot.
//! - **Walking**: [`for_each_child`] and [`walk_type`] give read-only access
//!   to the same child slots, for classification and diagnostics.
//!
//! # Usage
//!
//! ```rust
//! use doclink_model::{ReferenceType, RecursiveRewriter, SomeType, TypeRewriter};
//!
//! struct Rename;
//!
//! impl TypeRewriter for Rename {
//!     fn rewrite_reference(&mut self, mut ty: ReferenceType) -> SomeType {
//!         ty.name = ty.name.to_uppercase();
//!         SomeType::Reference(ty)
//!     }
//! }
//!
//! let ty = SomeType::array(SomeType::reference(ReferenceType::new("foo")));
//! let renamed = RecursiveRewriter::new(&mut Rename).rewrite(ty);
//! assert_eq!(
//!     renamed,
//!     SomeType::array(SomeType::reference(ReferenceType::new("FOO")))
//! );
//! ```

use crate::types::{
    ArrayType, ConditionalType, IndexedAccessType, InferredType, IntersectionType, IntrinsicType,
    LiteralType, MappedType, NamedTupleMemberType, OptionalType, PredicateType, QueryType,
    ReferenceType, ReflectionType, RestType, SomeType, TemplateLiteralType, TupleType,
    TypeOperatorType, UnionType, UnknownType,
};
use std::fmt;

// =============================================================================
// Type Rewriter Trait
// =============================================================================

/// Per-variant rewrite rules.
///
/// Each method receives the node by value and returns its replacement, which
/// may be of a different variant. Child slots are not visited here; the
/// [`RecursiveRewriter`] descends into the returned node afterwards.
pub trait TypeRewriter {
    fn rewrite_array(&mut self, ty: ArrayType) -> SomeType {
        SomeType::Array(ty)
    }

    fn rewrite_conditional(&mut self, ty: ConditionalType) -> SomeType {
        SomeType::Conditional(ty)
    }

    fn rewrite_indexed_access(&mut self, ty: IndexedAccessType) -> SomeType {
        SomeType::IndexedAccess(ty)
    }

    fn rewrite_inferred(&mut self, ty: InferredType) -> SomeType {
        SomeType::Inferred(ty)
    }

    fn rewrite_intersection(&mut self, ty: IntersectionType) -> SomeType {
        SomeType::Intersection(ty)
    }

    fn rewrite_intrinsic(&mut self, ty: IntrinsicType) -> SomeType {
        SomeType::Intrinsic(ty)
    }

    fn rewrite_literal(&mut self, ty: LiteralType) -> SomeType {
        SomeType::Literal(ty)
    }

    fn rewrite_mapped(&mut self, ty: MappedType) -> SomeType {
        SomeType::Mapped(ty)
    }

    fn rewrite_named_tuple_member(&mut self, ty: NamedTupleMemberType) -> SomeType {
        SomeType::NamedTupleMember(ty)
    }

    fn rewrite_optional(&mut self, ty: OptionalType) -> SomeType {
        SomeType::Optional(ty)
    }

    fn rewrite_predicate(&mut self, ty: PredicateType) -> SomeType {
        SomeType::Predicate(ty)
    }

    fn rewrite_query(&mut self, ty: QueryType) -> SomeType {
        SomeType::Query(ty)
    }

    fn rewrite_reference(&mut self, ty: ReferenceType) -> SomeType {
        SomeType::Reference(ty)
    }

    fn rewrite_reflection(&mut self, ty: ReflectionType) -> SomeType {
        SomeType::Reflection(ty)
    }

    fn rewrite_rest(&mut self, ty: RestType) -> SomeType {
        SomeType::Rest(ty)
    }

    fn rewrite_template_literal(&mut self, ty: TemplateLiteralType) -> SomeType {
        SomeType::TemplateLiteral(ty)
    }

    fn rewrite_tuple(&mut self, ty: TupleType) -> SomeType {
        SomeType::Tuple(ty)
    }

    fn rewrite_type_operator(&mut self, ty: TypeOperatorType) -> SomeType {
        SomeType::TypeOperator(ty)
    }

    fn rewrite_union(&mut self, ty: UnionType) -> SomeType {
        SomeType::Union(ty)
    }

    fn rewrite_unknown(&mut self, ty: UnknownType) -> SomeType {
        SomeType::Unknown(ty)
    }

    fn rewrite_opaque(&mut self, value: serde_json::Value) -> SomeType {
        SomeType::Opaque(value)
    }
}

// =============================================================================
// Recursive Rewriter
// =============================================================================

/// Drives a [`TypeRewriter`] over a whole type tree.
pub struct RecursiveRewriter<'r, R: TypeRewriter + ?Sized> {
    rewriter: &'r mut R,
}

impl<'r, R: TypeRewriter + ?Sized> RecursiveRewriter<'r, R> {
    pub fn new(rewriter: &'r mut R) -> Self {
        Self { rewriter }
    }

    /// Rewrite `ty`, then rewrite every child slot of the result.
    pub fn rewrite(&mut self, ty: SomeType) -> SomeType {
        let mut mutated = self.apply(ty);
        self.rewrite_children(&mut mutated);
        mutated
    }

    /// Rewrite the node stored in `slot` and store the result back.
    pub fn rewrite_in_place(&mut self, slot: &mut SomeType) {
        let taken = slot.take();
        *slot = self.rewrite(taken);
    }

    fn apply(&mut self, ty: SomeType) -> SomeType {
        let rewriter = &mut *self.rewriter;
        match ty {
            SomeType::Array(ty) => rewriter.rewrite_array(ty),
            SomeType::Conditional(ty) => rewriter.rewrite_conditional(ty),
            SomeType::IndexedAccess(ty) => rewriter.rewrite_indexed_access(ty),
            SomeType::Inferred(ty) => rewriter.rewrite_inferred(ty),
            SomeType::Intersection(ty) => rewriter.rewrite_intersection(ty),
            SomeType::Intrinsic(ty) => rewriter.rewrite_intrinsic(ty),
            SomeType::Literal(ty) => rewriter.rewrite_literal(ty),
            SomeType::Mapped(ty) => rewriter.rewrite_mapped(ty),
            SomeType::NamedTupleMember(ty) => rewriter.rewrite_named_tuple_member(ty),
            SomeType::Optional(ty) => rewriter.rewrite_optional(ty),
            SomeType::Predicate(ty) => rewriter.rewrite_predicate(ty),
            SomeType::Query(ty) => rewriter.rewrite_query(ty),
            SomeType::Reference(ty) => rewriter.rewrite_reference(ty),
            SomeType::Reflection(ty) => rewriter.rewrite_reflection(ty),
            SomeType::Rest(ty) => rewriter.rewrite_rest(ty),
            SomeType::TemplateLiteral(ty) => rewriter.rewrite_template_literal(ty),
            SomeType::Tuple(ty) => rewriter.rewrite_tuple(ty),
            SomeType::TypeOperator(ty) => rewriter.rewrite_type_operator(ty),
            SomeType::Union(ty) => rewriter.rewrite_union(ty),
            SomeType::Unknown(ty) => rewriter.rewrite_unknown(ty),
            SomeType::Opaque(value) => rewriter.rewrite_opaque(value),
        }
    }

    fn rewrite_children(&mut self, ty: &mut SomeType) {
        match ty {
            SomeType::Array(ty) => self.rewrite_in_place(&mut ty.element_type),
            SomeType::Conditional(ty) => {
                self.rewrite_in_place(&mut ty.check_type);
                self.rewrite_in_place(&mut ty.extends_type);
                self.rewrite_in_place(&mut ty.true_type);
                self.rewrite_in_place(&mut ty.false_type);
            }
            SomeType::IndexedAccess(ty) => {
                self.rewrite_in_place(&mut ty.index_type);
                self.rewrite_in_place(&mut ty.object_type);
            }
            SomeType::Intersection(ty) => self.rewrite_list(&mut ty.types),
            SomeType::Mapped(ty) => {
                if let Some(name_type) = &mut ty.name_type {
                    self.rewrite_in_place(name_type);
                }
                self.rewrite_in_place(&mut ty.parameter_type);
                self.rewrite_in_place(&mut ty.template_type);
            }
            SomeType::NamedTupleMember(ty) => self.rewrite_in_place(&mut ty.element),
            SomeType::Optional(ty) => self.rewrite_in_place(&mut ty.element_type),
            SomeType::Predicate(ty) => {
                if let Some(target_type) = &mut ty.target_type {
                    self.rewrite_in_place(target_type);
                }
            }
            SomeType::Query(ty) => self.rewrite_in_place(&mut ty.query_type),
            SomeType::Reference(ty) => self.rewrite_list(&mut ty.type_arguments),
            SomeType::Rest(ty) => self.rewrite_in_place(&mut ty.element_type),
            SomeType::TemplateLiteral(ty) => {
                for (span_type, _) in &mut ty.tail {
                    self.rewrite_in_place(span_type);
                }
            }
            SomeType::Tuple(ty) => self.rewrite_list(&mut ty.elements),
            SomeType::TypeOperator(ty) => self.rewrite_in_place(&mut ty.target),
            SomeType::Union(ty) => self.rewrite_list(&mut ty.types),
            // Reflection types are not descended into; their declaration is
            // a separate reflection with its own type.
            SomeType::Reflection(_) => {}
            SomeType::Inferred(_)
            | SomeType::Intrinsic(_)
            | SomeType::Literal(_)
            | SomeType::Unknown(_)
            | SomeType::Opaque(_) => {}
        }
    }

    fn rewrite_list(&mut self, types: &mut [SomeType]) {
        for ty in types {
            self.rewrite_in_place(ty);
        }
    }
}

// =============================================================================
// Type Kinds
// =============================================================================

/// The variant tag of a type node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Array,
    Conditional,
    IndexedAccess,
    Inferred,
    Intersection,
    Intrinsic,
    Literal,
    Mapped,
    NamedTupleMember,
    Optional,
    Predicate,
    Query,
    Reference,
    Reflection,
    Rest,
    TemplateLiteral,
    Tuple,
    TypeOperator,
    Union,
    Unknown,
    /// Unrecognised tag
    Opaque,
}

impl TypeKind {
    /// The serialized tag name.
    pub fn as_str(self) -> &'static str {
        match self {
            TypeKind::Array => "array",
            TypeKind::Conditional => "conditional",
            TypeKind::IndexedAccess => "indexedAccess",
            TypeKind::Inferred => "inferred",
            TypeKind::Intersection => "intersection",
            TypeKind::Intrinsic => "intrinsic",
            TypeKind::Literal => "literal",
            TypeKind::Mapped => "mapped",
            TypeKind::NamedTupleMember => "named-tuple-member",
            TypeKind::Optional => "optional",
            TypeKind::Predicate => "predicate",
            TypeKind::Query => "query",
            TypeKind::Reference => "reference",
            TypeKind::Reflection => "reflection",
            TypeKind::Rest => "rest",
            TypeKind::TemplateLiteral => "template-literal",
            TypeKind::Tuple => "tuple",
            TypeKind::TypeOperator => "typeOperator",
            TypeKind::Union => "union",
            TypeKind::Unknown => "unknown",
            TypeKind::Opaque => "opaque",
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl SomeType {
    pub fn kind(&self) -> TypeKind {
        match self {
            SomeType::Array(_) => TypeKind::Array,
            SomeType::Conditional(_) => TypeKind::Conditional,
            SomeType::IndexedAccess(_) => TypeKind::IndexedAccess,
            SomeType::Inferred(_) => TypeKind::Inferred,
            SomeType::Intersection(_) => TypeKind::Intersection,
            SomeType::Intrinsic(_) => TypeKind::Intrinsic,
            SomeType::Literal(_) => TypeKind::Literal,
            SomeType::Mapped(_) => TypeKind::Mapped,
            SomeType::NamedTupleMember(_) => TypeKind::NamedTupleMember,
            SomeType::Optional(_) => TypeKind::Optional,
            SomeType::Predicate(_) => TypeKind::Predicate,
            SomeType::Query(_) => TypeKind::Query,
            SomeType::Reference(_) => TypeKind::Reference,
            SomeType::Reflection(_) => TypeKind::Reflection,
            SomeType::Rest(_) => TypeKind::Rest,
            SomeType::TemplateLiteral(_) => TypeKind::TemplateLiteral,
            SomeType::Tuple(_) => TypeKind::Tuple,
            SomeType::TypeOperator(_) => TypeKind::TypeOperator,
            SomeType::Union(_) => TypeKind::Union,
            SomeType::Unknown(_) => TypeKind::Unknown,
            SomeType::Opaque(_) => TypeKind::Opaque,
        }
    }
}

// =============================================================================
// Read-only walking
// =============================================================================

/// Call `f` on each direct child of `ty`, in the order the rewriter visits
/// them.
pub fn for_each_child<'a>(ty: &'a SomeType, mut f: impl FnMut(&'a SomeType)) {
    match ty {
        SomeType::Array(ty) => f(&ty.element_type),
        SomeType::Conditional(ty) => {
            f(&ty.check_type);
            f(&ty.extends_type);
            f(&ty.true_type);
            f(&ty.false_type);
        }
        SomeType::IndexedAccess(ty) => {
            f(&ty.index_type);
            f(&ty.object_type);
        }
        SomeType::Intersection(ty) => ty.types.iter().for_each(f),
        SomeType::Mapped(ty) => {
            if let Some(name_type) = &ty.name_type {
                f(name_type);
            }
            f(&ty.parameter_type);
            f(&ty.template_type);
        }
        SomeType::NamedTupleMember(ty) => f(&ty.element),
        SomeType::Optional(ty) => f(&ty.element_type),
        SomeType::Predicate(ty) => {
            if let Some(target_type) = &ty.target_type {
                f(target_type);
            }
        }
        SomeType::Query(ty) => f(&ty.query_type),
        SomeType::Reference(ty) => ty.type_arguments.iter().for_each(f),
        SomeType::Rest(ty) => f(&ty.element_type),
        SomeType::TemplateLiteral(ty) => ty.tail.iter().for_each(|(span_type, _)| f(span_type)),
        SomeType::Tuple(ty) => ty.elements.iter().for_each(f),
        SomeType::TypeOperator(ty) => f(&ty.target),
        SomeType::Union(ty) => ty.types.iter().for_each(f),
        SomeType::Reflection(_)
        | SomeType::Inferred(_)
        | SomeType::Intrinsic(_)
        | SomeType::Literal(_)
        | SomeType::Unknown(_)
        | SomeType::Opaque(_) => {}
    }
}

/// Pre-order walk over `ty` and all of its descendants.
pub fn walk_type<'a>(ty: &'a SomeType, f: &mut impl FnMut(&'a SomeType)) {
    f(ty);
    for_each_child(ty, |child| walk_type(child, f));
}

/// All reference nodes in `ty`, in pre-order.
pub fn collect_references(ty: &SomeType) -> Vec<&ReferenceType> {
    let mut references = Vec::new();
    walk_type(ty, &mut |node| {
        if let SomeType::Reference(reference) = node {
            references.push(reference);
        }
    });
    references
}

#[cfg(test)]
#[path = "tests/visitor_tests.rs"]
mod visitor_tests;
