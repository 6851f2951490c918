//! Result datatype widening for numeric aggregates
//!
//! Aggregate results are tagged with the least narrow datatype among the
//! contributing elements, widened further when the value itself does not fit.

use rust_decimal::Decimal;

use crate::argument::BuiltInArgument;
use crate::datatype::Datatype;
use crate::literal::Literal;

/// Widest numeric datatype among the literal elements
///
/// Non-numeric elements are ignored. Returns `None` when no element is a
/// numeric literal.
pub fn least_narrow_datatype<'a, I>(elements: I) -> Option<Datatype>
where
    I: IntoIterator<Item = &'a BuiltInArgument>,
{
    elements
        .into_iter()
        .filter_map(BuiltInArgument::as_literal)
        .map(Literal::datatype)
        .filter(|dt| dt.is_numeric())
        .max_by_key(|dt| dt.numeric_rank())
        .cloned()
}

/// Tag a computed value with a datatype that represents it
///
/// Starts from the least narrow datatype of `elements` (or `xsd:decimal` when
/// none contributes) and widens until the value fits.
pub fn numeric_literal<'a, I>(value: Decimal, elements: I) -> Literal
where
    I: IntoIterator<Item = &'a BuiltInArgument>,
{
    let mut datatype = least_narrow_datatype(elements).unwrap_or(Datatype::Decimal);

    if datatype.is_integral() && !value.fract().is_zero() {
        datatype = Datatype::Decimal;
    }

    loop {
        match Literal::numeric(value, datatype.clone()) {
            Ok(lit) => return lit,
            Err(_) => match datatype.wider() {
                Some(next) => datatype = next,
                None => return Literal::decimal(value),
            },
        }
    }
}
