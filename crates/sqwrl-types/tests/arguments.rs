//! Argument model tests
//!
//! Covers:
//! - Variable binding and resolution
//! - Comparability of each argument kind
//! - The total order used by sorting built-ins
//! - Serialization of arguments

use pretty_assertions::assert_eq;
use rstest::rstest;
use rust_decimal::Decimal;
use sqwrl_types::*;

fn int(i: i32) -> BuiltInArgument {
    BuiltInArgument::literal(Literal::int(i))
}

fn dec(s: &str) -> BuiltInArgument {
    BuiltInArgument::literal(Literal::decimal(s.parse::<Decimal>().unwrap()))
}

fn string(s: &str) -> BuiltInArgument {
    BuiltInArgument::literal(Literal::string(s))
}

// ============================================================================
// Binding
// ============================================================================

#[test]
fn test_bind_unbound_variable() {
    let mut arg = BuiltInArgument::variable("x");
    assert!(arg.is_unbound());
    arg.bind(int(3)).unwrap();
    assert!(!arg.is_unbound());
    assert_eq!(arg.resolved(), &int(3));
    assert_eq!(arg.variable_name(), Some("x"));
}

#[test]
fn test_bind_twice_fails() {
    let mut arg = BuiltInArgument::variable("x");
    arg.bind(int(3)).unwrap();
    let err = arg.bind(int(4)).unwrap_err();
    assert!(matches!(err, TypeError::NotBindable { .. }));
}

#[test]
fn test_bind_literal_slot_fails() {
    let mut arg = int(1);
    assert!(arg.bind(int(2)).is_err());
}

#[test]
fn test_resolution_follows_nested_bindings() {
    let inner = BuiltInArgument::bound("y", string("a"));
    let outer = BuiltInArgument::bound("x", inner);
    assert_eq!(outer.resolved(), &string("a"));
    assert_eq!(outer.clone().into_resolved(), string("a"));
    assert_eq!(outer.kind(), ArgumentKind::Literal);
}

// ============================================================================
// Comparability
// ============================================================================

#[rstest]
#[case(int(1), true)]
#[case(string("a"), true)]
#[case(BuiltInArgument::literal(Literal::boolean(true)), true)]
#[case(BuiltInArgument::individual("http://example.org#fred"), true)]
#[case(BuiltInArgument::class("http://example.org#Person"), true)]
#[case(BuiltInArgument::ClassExpression("(hasChild some Person)".to_string()), false)]
#[case(BuiltInArgument::Collection(CollectionHandle::new("q", "s", "")), false)]
#[case(BuiltInArgument::MultiValue(vec![int(1)]), false)]
#[case(BuiltInArgument::variable("x"), false)]
fn test_comparability(#[case] arg: BuiltInArgument, #[case] comparable: bool) {
    assert_eq!(arg.is_comparable(), comparable);
}

#[test]
fn test_foreign_datatype_not_comparable() {
    let lit = Literal::parse("P1D", Datatype::Duration).unwrap();
    assert!(!BuiltInArgument::literal(lit).is_comparable());
}

#[test]
fn test_bound_variable_takes_comparability_of_value() {
    assert!(BuiltInArgument::bound("x", int(1)).is_comparable());
}

// ============================================================================
// Ordering
// ============================================================================

#[test]
fn test_numeric_literals_order_across_datatypes() {
    let mut values = vec![
        BuiltInArgument::literal(Literal::long(2)),
        dec("1.5"),
        int(1),
    ];
    values.sort();
    assert_eq!(
        values,
        vec![int(1), dec("1.5"), BuiltInArgument::literal(Literal::long(2))]
    );
}

#[test]
fn test_strings_order_lexicographically() {
    let mut values = vec![string("pear"), string("apple"), string("fig")];
    values.sort();
    assert_eq!(values, vec![string("apple"), string("fig"), string("pear")]);
}

#[test]
fn test_temporal_literals_order_chronologically() {
    let late = BuiltInArgument::literal(
        Literal::parse("2021-03-01T00:00:00", Datatype::DateTime).unwrap(),
    );
    let early = BuiltInArgument::literal(
        Literal::parse("2020-12-31T23:59:59.5", Datatype::DateTime).unwrap(),
    );
    assert!(early < late);
}

#[test]
fn test_literals_order_before_entities() {
    assert!(int(100) < BuiltInArgument::individual("http://example.org#a"));
}

#[test]
fn test_same_value_different_datatype_is_distinct() {
    let a = int(1);
    let b = BuiltInArgument::literal(Literal::long(1));
    assert_ne!(a, b);
    assert_eq!(a.as_decimal(), b.as_decimal());
}

// ============================================================================
// Serialization
// ============================================================================

#[test]
fn test_argument_serde_round_trip() {
    let arg = BuiltInArgument::MultiValue(vec![
        int(7),
        BuiltInArgument::individual("http://example.org#fred"),
        BuiltInArgument::Collection(CollectionHandle::new("q1", "s", "k")),
    ]);
    let json = serde_json::to_string(&arg).unwrap();
    let back: BuiltInArgument = serde_json::from_str(&json).unwrap();
    assert_eq!(back, arg);
}

#[test]
fn test_display_of_handles_and_variables() {
    assert_eq!(
        CollectionHandle::new("q", "s", "").to_string(),
        "q:s"
    );
    assert_eq!(BuiltInArgument::variable("x").to_string(), "?x");
    assert_eq!(string("a").to_string(), "\"a\"");
    assert_eq!(int(3).to_string(), "\"3\"^^xsd:int");
}
