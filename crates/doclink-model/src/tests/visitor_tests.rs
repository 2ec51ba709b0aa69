//! Tests for the recursive type rewriter and read-only walking.

use super::*;
use crate::program::SymbolId;
use crate::types::{LiteralValue, MappedModifier, TypeOperator};

/// Rewrites every reference to carry a marker symbol, counting calls.
#[derive(Default)]
struct MarkReferences {
    calls: usize,
}

impl TypeRewriter for MarkReferences {
    fn rewrite_reference(&mut self, mut ty: ReferenceType) -> SomeType {
        self.calls += 1;
        ty.symbol = Some(SymbolId(99));
        SomeType::Reference(ty)
    }
}

/// Replaces reflection types with `unknown`.
struct DropReflections;

impl TypeRewriter for DropReflections {
    fn rewrite_reflection(&mut self, _ty: ReflectionType) -> SomeType {
        SomeType::Unknown(UnknownType {
            name: "dropped".to_string(),
        })
    }
}

fn reference(name: &str) -> SomeType {
    SomeType::reference(ReferenceType::new(name))
}

fn marked(name: &str) -> SomeType {
    SomeType::reference(ReferenceType::new(name).with_symbol(SymbolId(99)))
}

fn rewrite_with_marks(ty: SomeType) -> (SomeType, usize) {
    let mut marks = MarkReferences::default();
    let rewritten = RecursiveRewriter::new(&mut marks).rewrite(ty);
    (rewritten, marks.calls)
}

fn every_variant() -> SomeType {
    SomeType::tuple(vec![
        SomeType::array(reference("A")),
        SomeType::Conditional(ConditionalType {
            check_type: Box::new(reference("B")),
            extends_type: Box::new(reference("C")),
            true_type: Box::new(reference("D")),
            false_type: Box::new(reference("E")),
        }),
        SomeType::IndexedAccess(IndexedAccessType {
            object_type: Box::new(reference("F")),
            index_type: Box::new(reference("G")),
        }),
        SomeType::Inferred(InferredType {
            name: "T".to_string(),
        }),
        SomeType::intersection(vec![reference("H")]),
        SomeType::intrinsic("string"),
        SomeType::literal(LiteralValue::Number(1.0)),
        SomeType::Mapped(MappedType {
            parameter: "K".to_string(),
            parameter_type: Box::new(reference("I")),
            template_type: Box::new(reference("J")),
            readonly_modifier: Some(MappedModifier::Add),
            optional_modifier: None,
            name_type: Some(Box::new(reference("K"))),
        }),
        SomeType::NamedTupleMember(NamedTupleMemberType {
            name: "x".to_string(),
            is_optional: true,
            element: Box::new(reference("L")),
        }),
        SomeType::Optional(OptionalType {
            element_type: Box::new(reference("M")),
        }),
        SomeType::Predicate(PredicateType {
            name: "x".to_string(),
            asserts: false,
            target_type: Some(Box::new(reference("N"))),
        }),
        SomeType::Query(QueryType {
            query_type: Box::new(reference("O")),
        }),
        SomeType::reference(ReferenceType::new("P").with_type_arguments(vec![reference("Q")])),
        SomeType::Reflection(ReflectionType {
            declaration: crate::ReflectionId(1),
        }),
        SomeType::Rest(RestType {
            element_type: Box::new(reference("R")),
        }),
        SomeType::TemplateLiteral(TemplateLiteralType {
            head: "on".to_string(),
            tail: vec![(reference("S"), "Handler".to_string())],
        }),
        SomeType::TypeOperator(TypeOperatorType {
            operator: TypeOperator::Keyof,
            target: Box::new(reference("T")),
        }),
        SomeType::union(vec![reference("U")]),
        SomeType::Unknown(UnknownType {
            name: "?".to_string(),
        }),
        SomeType::Opaque(serde_json::json!({ "type": "future" })),
    ])
}

#[test]
fn test_rewriter_reaches_every_child_slot() {
    let (rewritten, calls) = rewrite_with_marks(every_variant());

    // A..U is 21 references (P and its argument Q both count).
    assert_eq!(calls, 21);
    for found in collect_references(&rewritten) {
        assert_eq!(found.symbol, Some(SymbolId(99)), "{} not rewritten", found.name);
    }
}

#[test]
fn test_identity_rewriter_preserves_structure() {
    struct Identity;
    impl TypeRewriter for Identity {}

    let original = every_variant();
    let rewritten = RecursiveRewriter::new(&mut Identity).rewrite(original.clone());
    assert_eq!(rewritten, original);
}

#[test]
fn test_type_arguments_are_rewritten_after_the_reference_itself() {
    let ty = SomeType::reference(
        ReferenceType::new("Map").with_type_arguments(vec![reference("K"), reference("V")]),
    );
    let (rewritten, calls) = rewrite_with_marks(ty);

    assert_eq!(calls, 3);
    assert_eq!(
        rewritten,
        SomeType::reference(
            ReferenceType::new("Map")
                .with_symbol(SymbolId(99))
                .with_type_arguments(vec![marked("K"), marked("V")])
        )
    );
}

#[test]
fn test_template_literal_keeps_text_and_order() {
    let ty = SomeType::TemplateLiteral(TemplateLiteralType {
        head: "a".to_string(),
        tail: vec![
            (reference("X"), "b".to_string()),
            (SomeType::intrinsic("string"), "c".to_string()),
        ],
    });
    let (rewritten, _) = rewrite_with_marks(ty);

    let SomeType::TemplateLiteral(template) = rewritten else {
        panic!("expected template literal");
    };
    assert_eq!(template.head, "a");
    assert_eq!(template.tail[0], (marked("X"), "b".to_string()));
    assert_eq!(template.tail[1], (SomeType::intrinsic("string"), "c".to_string()));
}

#[test]
fn test_reflection_node_can_be_replaced_but_is_a_leaf() {
    let ty = SomeType::array(SomeType::Reflection(ReflectionType {
        declaration: crate::ReflectionId(4),
    }));
    let rewritten = RecursiveRewriter::new(&mut DropReflections).rewrite(ty);
    assert_eq!(
        rewritten,
        SomeType::array(SomeType::Unknown(UnknownType {
            name: "dropped".to_string(),
        }))
    );
}

#[test]
fn test_absent_optional_slots_are_skipped() {
    let ty = SomeType::Predicate(PredicateType {
        name: "x".to_string(),
        asserts: true,
        target_type: None,
    });
    let (rewritten, calls) = rewrite_with_marks(ty.clone());
    assert_eq!(calls, 0);
    assert_eq!(rewritten, ty);
}

#[test]
fn test_children_of_a_replacement_node_are_visited() {
    /// Wraps every intrinsic in an array of a reference.
    struct Expand;
    impl TypeRewriter for Expand {
        fn rewrite_intrinsic(&mut self, _ty: IntrinsicType) -> SomeType {
            SomeType::array(SomeType::reference(ReferenceType::new("Inner")))
        }
        fn rewrite_reference(&mut self, ty: ReferenceType) -> SomeType {
            SomeType::reference(ty.with_symbol(SymbolId(1)))
        }
    }

    let rewritten = RecursiveRewriter::new(&mut Expand).rewrite(SomeType::intrinsic("string"));
    assert_eq!(
        rewritten,
        SomeType::array(SomeType::reference(
            ReferenceType::new("Inner").with_symbol(SymbolId(1))
        ))
    );
}

#[test]
fn test_kind_tags_match_serialized_tags() {
    let samples = [
        SomeType::intrinsic("string"),
        SomeType::array(SomeType::intrinsic("string")),
        reference("A"),
        SomeType::TemplateLiteral(TemplateLiteralType {
            head: String::new(),
            tail: Vec::new(),
        }),
        SomeType::NamedTupleMember(NamedTupleMemberType {
            name: "x".to_string(),
            is_optional: false,
            element: Box::new(SomeType::intrinsic("number")),
        }),
    ];
    for sample in samples {
        let value = serde_json::to_value(&sample).unwrap();
        assert_eq!(value["type"], serde_json::json!(sample.kind().as_str()));
    }
}

#[test]
fn test_walk_type_is_pre_order() {
    let ty = SomeType::union(vec![
        SomeType::array(reference("A")),
        reference("B"),
    ]);
    let mut kinds = Vec::new();
    walk_type(&ty, &mut |node| kinds.push(node.kind()));
    assert_eq!(
        kinds,
        vec![
            TypeKind::Union,
            TypeKind::Array,
            TypeKind::Reference,
            TypeKind::Reference
        ]
    );

    let names: Vec<&str> = collect_references(&ty)
        .into_iter()
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(names, vec!["A", "B"]);
}
