//! Result Construction Operators
//!
//! Implements: select, selectDistinct, count, countDistinct

use sqwrl_types::{ArgumentKind, BuiltInArgument};

use crate::builtin::SqwrlBuiltIn;
use crate::context::{Invocation, Phase};
use crate::engine::{SqwrlEngine, check_count, check_count_at_least};
use crate::error::{EvalResult, SqwrlError};

impl SqwrlEngine {
    /// Evaluate select / selectDistinct
    pub(crate) fn eval_select(
        &mut self,
        builtin: SqwrlBuiltIn,
        invocation: &mut Invocation<'_>,
        arguments: &mut [BuiltInArgument],
    ) -> EvalResult<bool> {
        invocation.require_phase(builtin.as_str(), Phase::Consequent)?;
        check_count_at_least(builtin, arguments, 1)?;
        add_cells(builtin, invocation, arguments)?;
        Ok(true)
    }

    /// Evaluate count / countDistinct
    pub(crate) fn eval_count(
        &mut self,
        builtin: SqwrlBuiltIn,
        invocation: &mut Invocation<'_>,
        arguments: &mut [BuiltInArgument],
    ) -> EvalResult<bool> {
        invocation.require_phase(builtin.as_str(), Phase::Consequent)?;
        check_count(builtin, arguments, 1)?;
        add_cells(builtin, invocation, arguments)?;
        Ok(true)
    }

    /// Forward a bound numeric literal to the result generator
    pub(crate) fn forward_numeric_cell(
        &mut self,
        builtin: SqwrlBuiltIn,
        invocation: &mut Invocation<'_>,
        arguments: &[BuiltInArgument],
    ) -> EvalResult<bool> {
        check_count(builtin, arguments, 1)?;
        let argument = &arguments[0];
        if argument.as_decimal().is_none() {
            return Err(SqwrlError::invalid_argument(
                builtin.as_str(),
                0,
                format!("expecting numeric literal, got {}", argument),
            ));
        }

        let results = invocation.results()?;
        if !results.is_row_open() {
            results.open_row()?;
        }
        results.add_cell(argument.resolved().clone())?;
        Ok(true)
    }
}

fn add_cells(
    builtin: SqwrlBuiltIn,
    invocation: &mut Invocation<'_>,
    arguments: &[BuiltInArgument],
) -> EvalResult<()> {
    for (position, argument) in arguments.iter().enumerate() {
        match argument.kind() {
            ArgumentKind::UnboundVariable => {
                return Err(SqwrlError::invalid_argument(
                    builtin.as_str(),
                    position,
                    "argument must be bound",
                ));
            }
            ArgumentKind::Collection | ArgumentKind::MultiValue => {
                return Err(SqwrlError::invalid_argument(
                    builtin.as_str(),
                    position,
                    "collections cannot be selected",
                ));
            }
            _ => {}
        }
    }

    let results = invocation.results()?;
    if !results.is_row_open() {
        results.open_row()?;
    }
    for argument in arguments {
        results.add_cell(argument.resolved().clone())?;
    }
    Ok(())
}
