//! Single Collection Operators
//!
//! Implements: isEmpty, notEmpty, size, element, notElement
//!
//! Membership is structural, the same equality a set uses to drop
//! duplicates: `"2"^^xsd:long` is not a member of a group holding
//! `"2"^^xsd:int`. The two-collection predicates follow the same rule.

use sqwrl_types::BuiltInArgument;

use crate::builtin::SqwrlBuiltIn;
use crate::context::{Invocation, Phase};
use crate::engine::{
    SqwrlEngine, check_count_at_least, integer_argument, process_result,
};
use crate::error::{EvalResult, SqwrlError};
use crate::group::trailing_group_key;
use crate::store::Collection;

impl SqwrlEngine {
    /// Resolve the group a single-collection operator works on
    ///
    /// The source collection sits at `position` and every argument past the
    /// first `core` ones is a grouping argument.
    pub(crate) fn source_collection(
        &self,
        builtin: SqwrlBuiltIn,
        invocation: &Invocation<'_>,
        arguments: &[BuiltInArgument],
        position: usize,
        core: usize,
    ) -> EvalResult<(String, &Collection)> {
        invocation.require_phase(builtin.as_str(), Phase::Antecedent)?;
        check_count_at_least(builtin, arguments, core)?;

        let id = self.collection_id(builtin, invocation, arguments, position)?;
        self.check_group_arity(&id, arguments.len() - core)?;
        let group_key = trailing_group_key(invocation, arguments, core)?;
        let collection = self.store.get(&id, &group_key)?;
        Ok((group_key, collection))
    }

    /// Evaluate isEmpty(?c, group...)
    pub(crate) fn eval_is_empty(
        &mut self,
        builtin: SqwrlBuiltIn,
        invocation: &mut Invocation<'_>,
        arguments: &mut [BuiltInArgument],
    ) -> EvalResult<bool> {
        let (_, collection) = self.source_collection(builtin, invocation, arguments, 0, 1)?;
        Ok(collection.is_empty())
    }

    /// Evaluate size(?n, ?c, group...)
    pub(crate) fn eval_size(
        &mut self,
        builtin: SqwrlBuiltIn,
        invocation: &mut Invocation<'_>,
        arguments: &mut [BuiltInArgument],
    ) -> EvalResult<bool> {
        let (_, collection) = self.source_collection(builtin, invocation, arguments, 1, 2)?;
        let size = integer_argument(collection.len());
        process_result(arguments, 0, size)
    }

    /// Evaluate element(?e, ?c, group...)
    ///
    /// An unbound `?e` is bound to every element of the group at once.
    pub(crate) fn eval_element(
        &mut self,
        builtin: SqwrlBuiltIn,
        invocation: &mut Invocation<'_>,
        arguments: &mut [BuiltInArgument],
    ) -> EvalResult<bool> {
        let (_, collection) = self.source_collection(builtin, invocation, arguments, 1, 2)?;

        if arguments[0].is_unbound() {
            if collection.is_empty() {
                return Ok(false);
            }
            let values = BuiltInArgument::MultiValue(collection.to_vec());
            arguments[0].bind(values)?;
            Ok(true)
        } else {
            Ok(collection.contains(arguments[0].resolved()))
        }
    }

    /// Evaluate notElement(e, ?c, group...)
    pub(crate) fn eval_not_element(
        &mut self,
        builtin: SqwrlBuiltIn,
        invocation: &mut Invocation<'_>,
        arguments: &mut [BuiltInArgument],
    ) -> EvalResult<bool> {
        if arguments.first().is_some_and(BuiltInArgument::is_unbound) {
            return Err(SqwrlError::invalid_argument(
                builtin.as_str(),
                0,
                "argument must be bound",
            ));
        }
        Ok(!self.eval_element(builtin, invocation, arguments)?)
    }
}
