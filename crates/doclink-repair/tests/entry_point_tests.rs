//! Entry point behavior: which reflections are visited, coverage of nested
//! types, idempotence and project-wide summaries.

mod common;

use common::*;
use doclink_model::{
    ConditionalType, MappedType, ReferenceType, ReflectionKind, SomeType, SymbolId, collect_references,
};
use doclink_repair::{RepairSummary, count_broken_references};

/// Foo documented in a.ts, plus a generated symbol mapped back to it.
fn scenario() -> (Fixture, SymbolId, doclink_model::ReflectionId) {
    let mut fixture = Fixture::new();
    let (_, foo_reflection) = fixture.documented("Foo", ReflectionKind::Interface, "/repo/a.ts");
    let generated = fixture.undocumented("Foo", &["/repo/gen/a.js"]);
    fixture.file_text("/repo/gen/a.js", &with_inline_map(&["../a.ts"]));
    (fixture, generated, foo_reflection)
}

fn wrap(level: usize, inner: SomeType) -> SomeType {
    match level % 5 {
        0 => SomeType::array(inner),
        1 => SomeType::union(vec![SomeType::intrinsic("undefined"), inner]),
        2 => SomeType::tuple(vec![inner]),
        3 => SomeType::Conditional(ConditionalType {
            check_type: Box::new(SomeType::intrinsic("string")),
            extends_type: Box::new(SomeType::intrinsic("string")),
            true_type: Box::new(inner),
            false_type: Box::new(SomeType::intrinsic("never")),
        }),
        _ => SomeType::Mapped(MappedType {
            parameter: "K".to_string(),
            parameter_type: Box::new(SomeType::intrinsic("string")),
            template_type: Box::new(inner),
            readonly_modifier: None,
            optional_modifier: None,
            name_type: None,
        }),
    }
}

#[test]
fn test_broken_reference_is_repaired_at_any_depth() {
    for depth in 0..=3 {
        for start in 0..5 {
            let (mut fixture, generated, foo_reflection) = scenario();
            let mut ty = reference_to("Foo", generated);
            for level in 0..depth {
                ty = wrap(start + level, ty);
            }

            let holder = fixture.typed("value", ReflectionKind::Variable, ty);
            assert_eq!(fixture.repair(holder), 1, "depth {depth}, wrapper {start}");

            let found = collect_references(fixture.type_of(holder));
            assert_eq!(found.len(), 1);
            assert_eq!(found[0].reflection, Some(foo_reflection), "depth {depth}, wrapper {start}");
        }
    }
}

#[test]
fn test_type_arguments_of_repaired_reference_are_repaired() {
    let (mut fixture, generated, foo_reflection) = scenario();
    let ty = SomeType::reference(
        ReferenceType::new("Foo")
            .with_symbol(generated)
            .with_type_arguments(vec![reference_to("Foo", generated)]),
    );
    let holder = fixture.typed("value", ReflectionKind::TypeAlias, ty);
    assert_eq!(fixture.repair(holder), 2);

    for found in collect_references(fixture.type_of(holder)) {
        assert_eq!(found.reflection, Some(foo_reflection));
    }
}

#[test]
fn test_repair_is_idempotent() {
    let (mut fixture, generated, _) = scenario();
    let ty = SomeType::union(vec![
        reference_to("Foo", generated),
        SomeType::array(reference_to("Foo", generated)),
    ]);
    let holder = fixture.typed("value", ReflectionKind::Variable, ty);

    assert_eq!(fixture.repair(holder), 2);
    let once = fixture.type_of(holder).clone();
    assert_eq!(fixture.repair(holder), 0);
    assert_eq!(fixture.type_of(holder), &once);
}

#[test]
fn test_untouched_type_is_stored_back_intact() {
    let (mut fixture, _, _) = scenario();
    let ty = SomeType::union(vec![SomeType::intrinsic("string"), SomeType::intrinsic("number")]);
    let holder = fixture.typed("value", ReflectionKind::Variable, ty.clone());

    assert_eq!(fixture.repair(holder), 0);
    assert_eq!(fixture.type_of(holder), &ty);
}

#[test]
fn test_every_typed_kind_is_visited() {
    let kinds = [
        ReflectionKind::Variable,
        ReflectionKind::Property,
        ReflectionKind::CallSignature,
        ReflectionKind::Parameter,
        ReflectionKind::TypeParameter,
    ];
    for kind in kinds {
        let (mut fixture, generated, foo_reflection) = scenario();
        let holder = fixture.typed("value", kind, reference_to("Foo", generated));
        assert_eq!(fixture.repair(holder), 1, "{kind:?}");
        assert_eq!(
            collect_references(fixture.type_of(holder))[0].reflection,
            Some(foo_reflection)
        );
    }
}

#[test]
fn test_untyped_kinds_are_skipped() {
    for kind in [ReflectionKind::Project, ReflectionKind::Document] {
        let (mut fixture, generated, _) = scenario();
        let ty = reference_to("Foo", generated);
        let holder = fixture.typed("value", kind, ty.clone());
        assert_eq!(fixture.repair(holder), 0, "{kind:?}");
        assert_eq!(fixture.type_of(holder), &ty);
    }
}

#[test]
fn test_reflection_without_type_is_a_no_op() {
    let (mut fixture, _, foo_reflection) = scenario();
    assert_eq!(fixture.repair(foo_reflection), 0);
    assert!(
        fixture
            .project
            .reflection(foo_reflection)
            .is_some_and(|reflection| reflection.type_.is_none())
    );
}

#[test]
fn test_unknown_reflection_id_is_a_no_op() {
    let (mut fixture, _, _) = scenario();
    assert_eq!(fixture.repair(doclink_model::ReflectionId(999)), 0);
}

#[test]
fn test_repair_project_reports_summary() {
    let (mut fixture, generated, foo_reflection) = scenario();
    let external = fixture.undocumented("Ext", &["/node_modules/ext/index.d.ts"]);

    let first = fixture.typed("first", ReflectionKind::Variable, reference_to("Foo", generated));
    fixture.typed(
        "second",
        ReflectionKind::Parameter,
        SomeType::union(vec![reference_to("Foo", generated), reference_to("Ext", external)]),
    );
    fixture.typed("readme", ReflectionKind::Document, reference_to("Foo", generated));

    assert_eq!(count_broken_references(&fixture.project, &fixture.program), 3);

    let summary = fixture.repair_all();
    assert_eq!(
        summary,
        RepairSummary {
            reflections_visited: 2,
            references_repaired: 2,
            broken_remaining: 1,
        }
    );
    assert_eq!(
        collect_references(fixture.type_of(first))[0].reflection,
        Some(foo_reflection)
    );
    assert_eq!(
        summary.to_string(),
        "visited 2 reflections, repaired 2 references, 1 still broken"
    );

    let again = fixture.repair_all();
    assert_eq!(again.references_repaired, 0);
    assert_eq!(again.broken_remaining, 1);
}
