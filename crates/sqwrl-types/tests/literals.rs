//! Literal parsing and numeric widening tests

use rstest::rstest;
use rust_decimal::Decimal;
use sqwrl_types::*;

// === Parsing ===

#[rstest]
#[case("42", Datatype::Int, "42")]
#[case("-7", Datatype::Short, "-7")]
#[case("3.140", Datatype::Decimal, "3.14")]
#[case("1.5E2", Datatype::Double, "150.0")]
#[case("true", Datatype::Boolean, "true")]
#[case("0", Datatype::Boolean, "false")]
#[case("2020-02-29", Datatype::Date, "2020-02-29")]
#[case("10:30:00", Datatype::Time, "10:30:00")]
#[case("2020-01-01T08:00:00.250", Datatype::DateTime, "2020-01-01T08:00:00.250")]
fn test_parse_lexical_forms(
    #[case] lexical: &str,
    #[case] datatype: Datatype,
    #[case] canonical: &str,
) {
    let lit = Literal::parse(lexical, datatype.clone()).unwrap();
    assert_eq!(lit.datatype(), &datatype);
    assert_eq!(lit.lexical_form(), canonical);
}

#[rstest]
#[case("300", Datatype::Byte)]
#[case("40000", Datatype::Short)]
#[case("2147483648", Datatype::Int)]
#[case("abc", Datatype::Integer)]
#[case("NaN", Datatype::Double)]
#[case("maybe", Datatype::Boolean)]
#[case("2021-02-29", Datatype::Date)]
fn test_parse_rejects_invalid_forms(#[case] lexical: &str, #[case] datatype: Datatype) {
    assert!(Literal::parse(lexical, datatype).is_err());
}

#[test]
fn test_opaque_datatypes_keep_lexical_form() {
    let lit = Literal::parse("http://example.org", Datatype::AnyUri).unwrap();
    assert_eq!(lit.value(), &LiteralValue::Lexical("http://example.org".to_string()));
}

#[test]
fn test_numeric_constructor_checks_integrality() {
    assert!(Literal::numeric(Decimal::new(25, 1), Datatype::Int).is_err());
    assert!(Literal::numeric(Decimal::from(5), Datatype::Int).is_ok());
    assert!(Literal::numeric(Decimal::from(5), Datatype::String).is_err());
}

// === Widening ===

fn arg(lit: Literal) -> BuiltInArgument {
    BuiltInArgument::literal(lit)
}

#[test]
fn test_integer_and_decimal_mix_widens_to_decimal() {
    let elements = vec![
        arg(Literal::integer(1)),
        arg(Literal::decimal(Decimal::new(25, 1))),
    ];
    let lit = numeric_literal(Decimal::new(35, 1), &elements);
    assert_eq!(lit.datatype(), &Datatype::Decimal);
    assert_eq!(lit.lexical_form(), "3.5");
}

#[test]
fn test_integral_sum_keeps_integral_type() {
    let elements = vec![arg(Literal::int(3)), arg(Literal::int(4))];
    let lit = numeric_literal(Decimal::from(7), &elements);
    assert_eq!(lit.datatype(), &Datatype::Int);
}

#[test]
fn test_byte_overflow_widens_to_short() {
    let byte = Literal::parse("100", Datatype::Byte).unwrap();
    let elements = vec![arg(byte.clone()), arg(byte)];
    let lit = numeric_literal(Decimal::from(200), &elements);
    assert_eq!(lit.datatype(), &Datatype::Short);
}

#[test]
fn test_double_dominates() {
    let elements = vec![
        arg(Literal::int(1)),
        arg(Literal::double(2.5).unwrap()),
        arg(Literal::decimal(Decimal::ONE)),
    ];
    assert_eq!(least_narrow_datatype(&elements), Some(Datatype::Double));
}

#[test]
fn test_no_numeric_elements_defaults_to_decimal() {
    let elements = vec![arg(Literal::string("x"))];
    assert_eq!(least_narrow_datatype(&elements), None);
    let lit = numeric_literal(Decimal::ONE, &elements);
    assert_eq!(lit.datatype(), &Datatype::Decimal);
}
