//! Collection Construction Tests
//!
//! Tests for: makeSet, makeBag, groupBy, isEmpty, notEmpty, size, element,
//! notElement, grouping, kind and arity consistency, reset

mod common;

use common::{QUERY, fill, int, ints, run, string, var};
use pretty_assertions::assert_eq;
use rstest::rstest;
use sqwrl_eval::{
    CollectionId, CollectionKind, ErrorCategory, Invocation, SqwrlBuiltIn as B, SqwrlEngine,
    SqwrlError,
};
use sqwrl_types::{BuiltInArgument, CollectionHandle, Literal};

fn stored(engine: &SqwrlEngine, name: &str, group_key: &str) -> Vec<BuiltInArgument> {
    engine
        .store()
        .get(&CollectionId::new(QUERY, name), group_key)
        .unwrap()
        .to_vec()
}

// ============================================================================
// makeSet / makeBag
// ============================================================================

#[test]
fn test_make_bag_keeps_order_and_duplicates() {
    let mut engine = SqwrlEngine::new();
    fill(&mut engine, B::MakeBag, "b", &ints(&[3, 1, 3, 2]), &[]);
    assert_eq!(stored(&engine, "b", ""), ints(&[3, 1, 3, 2]));
}

#[test]
fn test_make_set_deduplicates() {
    let mut engine = SqwrlEngine::new();
    fill(&mut engine, B::MakeSet, "s", &ints(&[3, 1, 3, 2, 1]), &[]);
    assert_eq!(stored(&engine, "s", ""), ints(&[3, 1, 2]));
}

#[test]
fn test_make_binds_handle() {
    let mut engine = SqwrlEngine::new();
    let mut args = vec![var("s"), int(1)];
    assert!(run(&mut engine, B::MakeSet, &mut args).unwrap());
    assert_eq!(
        args[0].resolved(),
        &BuiltInArgument::Collection(CollectionHandle::new(QUERY, "s", ""))
    );
}

#[test]
fn test_make_accepts_bound_collection_variable() {
    let mut engine = SqwrlEngine::new();
    let mut args = vec![var("s"), int(1)];
    run(&mut engine, B::MakeSet, &mut args).unwrap();

    let handle = args[0].resolved().clone();
    let mut again = vec![BuiltInArgument::bound("s", handle), int(2)];
    assert!(run(&mut engine, B::MakeSet, &mut again).unwrap());
    assert_eq!(stored(&engine, "s", ""), ints(&[1, 2]));
}

#[test]
fn test_make_rejects_variable_from_non_collection_context() {
    let mut engine = SqwrlEngine::new();
    let mut args = vec![BuiltInArgument::bound("s", int(7)), int(1)];
    let err = run(&mut engine, B::MakeSet, &mut args).unwrap_err();
    assert!(matches!(err, SqwrlError::NonCollectionVariable { .. }));
    assert_eq!(err.category(), ErrorCategory::Consistency);
}

#[test]
fn test_make_requires_bound_element() {
    let mut engine = SqwrlEngine::new();
    let mut args = vec![var("s"), var("e")];
    let err = run(&mut engine, B::MakeSet, &mut args).unwrap_err();
    assert!(matches!(err, SqwrlError::InvalidArgument { position: 1, .. }));
}

#[test]
fn test_make_in_consequent_is_phase_error() {
    let mut engine = SqwrlEngine::new();
    let mut invocation = Invocation::consequent(QUERY);
    let mut args = vec![var("s"), int(1)];
    let err = engine.invoke(B::MakeSet, &mut invocation, &mut args).unwrap_err();
    assert!(matches!(err, SqwrlError::PhaseViolation { .. }));
    assert!(err.is_fatal());
}

// ============================================================================
// Kind and arity consistency
// ============================================================================

#[test]
fn test_set_then_bag_is_kind_mismatch() {
    let mut engine = SqwrlEngine::new();
    fill(&mut engine, B::MakeSet, "c", &ints(&[1]), &[]);
    let mut args = vec![var("c"), int(2)];
    let err = run(&mut engine, B::MakeBag, &mut args).unwrap_err();
    assert!(matches!(err, SqwrlError::CollectionKindMismatch { .. }));
}

#[test]
fn test_kind_mismatch_across_groups() {
    let mut engine = SqwrlEngine::new();
    fill(&mut engine, B::MakeSet, "c", &ints(&[1]), &[string("g1")]);
    let mut args = vec![var("c"), int(2), string("g2")];
    let err = run(&mut engine, B::MakeBag, &mut args).unwrap_err();
    assert!(matches!(err, SqwrlError::CollectionKindMismatch { .. }));
}

#[test]
fn test_group_arity_mismatch() {
    let mut engine = SqwrlEngine::new();
    fill(&mut engine, B::MakeSet, "c", &ints(&[1]), &[string("g")]);
    let mut args = vec![var("c"), int(2), string("g"), string("h")];
    let err = run(&mut engine, B::MakeSet, &mut args).unwrap_err();
    assert!(matches!(
        err,
        SqwrlError::GroupArityMismatch {
            recorded: 1,
            requested: 2,
            ..
        }
    ));
}

#[test]
fn test_collections_are_query_scoped() {
    let mut engine = SqwrlEngine::new();
    fill(&mut engine, B::MakeSet, "s", &ints(&[1]), &[]);

    let mut invocation = Invocation::antecedent("q2");
    let mut args = vec![var("n"), var("s")];
    let err = engine.invoke(B::Size, &mut invocation, &mut args).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Lookup);
}

// ============================================================================
// Grouping
// ============================================================================

#[test]
fn test_grouped_collections_are_partitioned() {
    let mut engine = SqwrlEngine::new();
    let alice = BuiltInArgument::individual("urn:alice");
    let bob = BuiltInArgument::individual("urn:bob");
    fill(&mut engine, B::MakeBag, "b", &ints(&[1, 2]), &[alice.clone()]);
    fill(&mut engine, B::MakeBag, "b", &ints(&[10]), &[bob.clone()]);

    let mut args = vec![var("n"), var("b"), alice];
    assert!(run(&mut engine, B::Size, &mut args).unwrap());
    assert_eq!(args[0].as_decimal(), Some(2.into()));

    let mut args = vec![var("n"), var("b"), bob];
    assert!(run(&mut engine, B::Size, &mut args).unwrap());
    assert_eq!(args[0].as_decimal(), Some(1.into()));

    let id = CollectionId::new(QUERY, "b");
    assert_eq!(engine.store().groups(&id).unwrap().count(), 2);
    assert_eq!(engine.store().kind_of(&id), Some(CollectionKind::Bag));
    assert_eq!(engine.store().ungrouped(&id).unwrap().len(), 3);
}

#[test]
fn test_handle_carries_group_key() {
    let mut engine = SqwrlEngine::new();
    let mut args = vec![var("s"), int(1), string("g")];
    run(&mut engine, B::MakeSet, &mut args).unwrap();
    let handle = args[0].as_collection().unwrap();
    assert!(!handle.group_key.is_empty());
    assert_eq!(stored(&engine, "s", &handle.group_key), ints(&[1]));
}

#[test]
fn test_group_by_is_preprocessed() {
    let mut engine = SqwrlEngine::new();
    let mut args = vec![var("x")];
    assert!(run(&mut engine, B::GroupBy, &mut args).unwrap());
}

// ============================================================================
// isEmpty / notEmpty / size
// ============================================================================

#[test]
fn test_is_empty_and_not_empty() {
    let mut engine = SqwrlEngine::new();
    fill(&mut engine, B::MakeSet, "s", &ints(&[1]), &[]);

    let mut args = vec![var("s")];
    assert!(!run(&mut engine, B::IsEmpty, &mut args).unwrap());
    assert!(run(&mut engine, B::NotEmpty, &mut args).unwrap());
}

#[test]
fn test_is_empty_on_empty_slice_result() {
    let mut engine = SqwrlEngine::new();
    fill(&mut engine, B::MakeBag, "b", &ints(&[1, 2]), &[]);

    let mut args = vec![var("e"), var("b"), int(5), int(1)];
    assert!(run(&mut engine, B::NthSlice, &mut args).unwrap());

    let mut args = vec![var("e")];
    assert!(run(&mut engine, B::IsEmpty, &mut args).unwrap());
}

#[rstest]
#[case(&[], 0)]
#[case(&[4], 1)]
#[case(&[4, 4, 5], 3)]
fn test_size_of_bag(#[case] values: &[i32], #[case] expected: i32) {
    let mut engine = SqwrlEngine::new();
    fill(&mut engine, B::MakeBag, "b", &ints(values), &[]);
    if values.is_empty() {
        // Never-written collections are lookup failures, not empty
        let mut args = vec![var("n"), var("b")];
        let err = run(&mut engine, B::Size, &mut args).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Lookup);
        return;
    }

    let mut args = vec![var("n"), var("b")];
    assert!(run(&mut engine, B::Size, &mut args).unwrap());
    assert_eq!(args[0].as_decimal(), Some(expected.into()));

    let mut args = vec![int(expected), var("b")];
    assert!(run(&mut engine, B::Size, &mut args).unwrap());
    let mut args = vec![int(expected + 1), var("b")];
    assert!(!run(&mut engine, B::Size, &mut args).unwrap());
}

// ============================================================================
// element / notElement
// ============================================================================

#[test]
fn test_element_binds_every_member() {
    let mut engine = SqwrlEngine::new();
    fill(&mut engine, B::MakeSet, "s", &ints(&[1, 2, 3]), &[]);

    let mut args = vec![var("e"), var("s")];
    assert!(run(&mut engine, B::Element, &mut args).unwrap());
    assert_eq!(args[0].resolved(), &BuiltInArgument::MultiValue(ints(&[1, 2, 3])));
}

#[test]
fn test_element_checks_membership() {
    let mut engine = SqwrlEngine::new();
    fill(&mut engine, B::MakeSet, "s", &ints(&[1, 2, 3]), &[]);

    let mut args = vec![int(2), var("s")];
    assert!(run(&mut engine, B::Element, &mut args).unwrap());
    let mut args = vec![int(9), var("s")];
    assert!(!run(&mut engine, B::Element, &mut args).unwrap());
    assert!(run(&mut engine, B::NotElement, &mut args).unwrap());
}

#[test]
fn test_membership_distinguishes_numeric_datatypes() {
    let mut engine = SqwrlEngine::new();
    fill(&mut engine, B::MakeBag, "b", &ints(&[1, 2]), &[]);
    let long_two = BuiltInArgument::literal(Literal::long(2));
    fill(&mut engine, B::MakeSet, "s", &[long_two.clone()], &[]);

    let mut args = vec![long_two, var("b")];
    assert!(!run(&mut engine, B::Element, &mut args).unwrap());
    assert!(run(&mut engine, B::NotElement, &mut args).unwrap());

    // contains and intersects agree with element
    let mut args = vec![var("b"), var("s")];
    assert!(!run(&mut engine, B::Contains, &mut args).unwrap());
    assert!(!run(&mut engine, B::Intersects, &mut args).unwrap());

    let mut args = vec![BuiltInArgument::bound("x", int(2)), var("b")];
    assert!(run(&mut engine, B::Element, &mut args).unwrap());
}

#[test]
fn test_not_element_requires_bound_element() {
    let mut engine = SqwrlEngine::new();
    fill(&mut engine, B::MakeSet, "s", &ints(&[1]), &[]);
    let mut args = vec![var("e"), var("s")];
    let err = run(&mut engine, B::NotElement, &mut args).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Argument);
}

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn test_reset_clears_collections() {
    let mut engine = SqwrlEngine::new();
    fill(&mut engine, B::MakeSet, "s", &ints(&[1]), &[]);
    engine.reset();

    let mut args = vec![var("n"), var("s")];
    let err = run(&mut engine, B::Size, &mut args).unwrap_err();
    assert!(matches!(err, SqwrlError::CollectionNotFound { .. }));
    assert!(!err.is_fatal());

    // Kind records are gone too
    fill(&mut engine, B::MakeBag, "s", &ints(&[1]), &[]);
}

#[test]
fn test_invoke_named_accepts_prefixed_names() {
    let mut engine = SqwrlEngine::new();
    let mut invocation = Invocation::antecedent(QUERY);
    let mut args = vec![var("s"), int(1)];
    assert!(
        engine
            .invoke_named("sqwrl:makeSet", &mut invocation, &mut args)
            .unwrap()
    );

    let err = engine
        .invoke_named("sqwrl:frobnicate", &mut invocation, &mut args)
        .unwrap_err();
    assert!(matches!(err, SqwrlError::UnknownBuiltIn { .. }));
}
