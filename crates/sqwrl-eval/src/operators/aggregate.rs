//! Aggregate Operators for SQWRL
//!
//! Implements: min, max, sum, avg, median
//!
//! In the consequent each aggregate forwards one numeric value to the result
//! generator, which does the aggregation. In the antecedent they reduce a
//! collection group.

use rust_decimal::{Decimal, RoundingStrategy};
use sqwrl_types::{BuiltInArgument, numeric_literal};

use crate::builtin::SqwrlBuiltIn;
use crate::context::{Invocation, Phase};
use crate::engine::{SqwrlEngine, process_result};
use crate::error::{EvalResult, SqwrlError};

/// Fractional digits kept by quotients
const QUOTIENT_SCALE: u32 = 20;

/// Checked sum
pub fn sum(values: &[Decimal]) -> EvalResult<Decimal> {
    values.iter().try_fold(Decimal::ZERO, |acc, v| {
        acc.checked_add(*v)
            .ok_or_else(|| SqwrlError::overflow("sum"))
    })
}

/// Arithmetic mean; `None` for no values
pub fn average(values: &[Decimal]) -> EvalResult<Option<Decimal>> {
    if values.is_empty() {
        return Ok(None);
    }
    let total = sum(values)?;
    quotient(total, Decimal::from(values.len()), "avg").map(Some)
}

/// Median; the mean of the two middle values for an even count
pub fn median(values: &[Decimal]) -> EvalResult<Option<Decimal>> {
    if values.is_empty() {
        return Ok(None);
    }

    let mut sorted = values.to_vec();
    sorted.sort();
    let middle = sorted.len() / 2;

    if sorted.len() % 2 == 1 {
        Ok(Some(sorted[middle]))
    } else {
        let pair = sorted[middle - 1]
            .checked_add(sorted[middle])
            .ok_or_else(|| SqwrlError::overflow("median"))?;
        quotient(pair, Decimal::TWO, "median").map(Some)
    }
}

fn quotient(dividend: Decimal, divisor: Decimal, operation: &str) -> EvalResult<Decimal> {
    dividend
        .checked_div(divisor)
        .map(|q| {
            q.round_dp_with_strategy(QUOTIENT_SCALE, RoundingStrategy::MidpointAwayFromZero)
                .normalize()
        })
        .ok_or_else(|| SqwrlError::overflow(operation))
}

impl SqwrlEngine {
    /// Evaluate min, max, sum, avg and median
    pub(crate) fn eval_aggregate(
        &mut self,
        builtin: SqwrlBuiltIn,
        invocation: &mut Invocation<'_>,
        arguments: &mut [BuiltInArgument],
    ) -> EvalResult<bool> {
        if invocation.phase == Phase::Consequent {
            return self.forward_numeric_cell(builtin, invocation, arguments);
        }

        match builtin.canonical() {
            SqwrlBuiltIn::Min | SqwrlBuiltIn::Max => {
                return self.eval_order_value(builtin, invocation, arguments);
            }
            SqwrlBuiltIn::Sum | SqwrlBuiltIn::Avg | SqwrlBuiltIn::Median => {}
            other => {
                return Err(SqwrlError::internal(format!("{} is not an aggregate", other)));
            }
        }

        let (_, collection) = self.source_collection(builtin, invocation, arguments, 1, 2)?;
        if collection.is_empty() {
            return Ok(false);
        }

        let elements = collection.to_vec();
        let values = numeric_values(builtin, &elements)?;

        let value = match builtin.canonical() {
            SqwrlBuiltIn::Sum => sum(&values)?,
            SqwrlBuiltIn::Avg => average(&values)?.unwrap_or_default(),
            _ => median(&values)?.unwrap_or_default(),
        };

        let result = BuiltInArgument::Literal(numeric_literal(value, &elements));
        process_result(arguments, 0, result)
    }
}

/// Decimal value of every element
fn numeric_values(builtin: SqwrlBuiltIn, elements: &[BuiltInArgument]) -> EvalResult<Vec<Decimal>> {
    elements
        .iter()
        .map(|element| {
            if !element.is_comparable() {
                return Err(SqwrlError::not_comparable(builtin.as_str(), element));
            }
            element
                .as_decimal()
                .ok_or_else(|| SqwrlError::not_numeric(builtin.as_str(), element))
        })
        .collect()
}
