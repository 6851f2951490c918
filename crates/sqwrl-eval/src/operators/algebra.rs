//! Two Collection Operators for SQWRL
//!
//! Implements: intersects, notIntersects, contains, notContains, equal,
//! notEqual, union, intersection, difference, append
//!
//! Grouping arguments follow the core arguments, the first operand's window
//! before the second's. Each window is as long as the group arity recorded
//! for that operand.

use sqwrl_types::BuiltInArgument;

use crate::builtin::SqwrlBuiltIn;
use crate::context::{Invocation, Phase};
use crate::engine::SqwrlEngine;
use crate::error::{EvalResult, SqwrlError};
use crate::group::group_key;
use crate::store::{Collection, CollectionId, CollectionKind};

/// Resolved group of one operand
struct Operand {
    id: CollectionId,
    group_key: String,
}

/// Both operands of a two-collection operator
struct Operands {
    first: Operand,
    second: Operand,
    /// Combined group arity, used to group a materialized result
    arity: usize,
}

/// Union in the first operand's order, as a set
pub fn union(first: &Collection, second: &Collection) -> Collection {
    Collection::from_elements(CollectionKind::Set, first.iter().chain(second.iter()).cloned())
}

/// Elements of the first operand also in the second, as a set
pub fn intersection(first: &Collection, second: &Collection) -> Collection {
    Collection::from_elements(
        CollectionKind::Set,
        first.iter().filter(|e| second.contains(e)).cloned(),
    )
}

/// Elements of the first operand not in the second, as a set
pub fn difference(first: &Collection, second: &Collection) -> Collection {
    Collection::from_elements(
        CollectionKind::Set,
        first.iter().filter(|e| !second.contains(e)).cloned(),
    )
}

/// Concatenation, as a bag
pub fn append(first: &Collection, second: &Collection) -> Collection {
    Collection::from_elements(CollectionKind::Bag, first.iter().chain(second.iter()).cloned())
}

impl SqwrlEngine {
    /// Resolve both operands of a two-collection operator
    ///
    /// `position` is the index of the first operand; the second follows it.
    fn operands(
        &self,
        builtin: SqwrlBuiltIn,
        invocation: &Invocation<'_>,
        arguments: &[BuiltInArgument],
        position: usize,
    ) -> EvalResult<Operands> {
        invocation.require_phase(builtin.as_str(), Phase::Antecedent)?;

        let core = position + 2;
        if arguments.len() < core {
            return Err(SqwrlError::argument_count(
                builtin.as_str(),
                format!("at least {}", core),
                arguments.len(),
            ));
        }

        let first_id = self.collection_id(builtin, invocation, arguments, position)?;
        let second_id = self.collection_id(builtin, invocation, arguments, position + 1)?;
        let first_arity = self
            .store
            .group_arity(&first_id)
            .ok_or_else(|| SqwrlError::collection_not_found(&first_id))?;
        let second_arity = self
            .store
            .group_arity(&second_id)
            .ok_or_else(|| SqwrlError::collection_not_found(&second_id))?;

        let expected = core + first_arity + second_arity;
        if arguments.len() != expected {
            return Err(SqwrlError::argument_count(
                builtin.as_str(),
                expected,
                arguments.len(),
            ));
        }

        Ok(Operands {
            first: Operand {
                group_key: group_key(invocation, arguments, core, 0, first_arity)?,
                id: first_id,
            },
            second: Operand {
                group_key: group_key(invocation, arguments, core, first_arity, second_arity)?,
                id: second_id,
            },
            arity: first_arity + second_arity,
        })
    }

    fn operand_collection(&self, operand: &Operand) -> EvalResult<&Collection> {
        self.store.get(&operand.id, &operand.group_key)
    }

    /// Evaluate intersects, contains, equal and their negations
    pub(crate) fn eval_collection_predicate(
        &mut self,
        builtin: SqwrlBuiltIn,
        invocation: &mut Invocation<'_>,
        arguments: &mut [BuiltInArgument],
    ) -> EvalResult<bool> {
        use SqwrlBuiltIn as B;

        let operands = self.operands(builtin, invocation, arguments, 0)?;
        let first = self.operand_collection(&operands.first)?;
        let second = self.operand_collection(&operands.second)?;

        let same_group = operands.first.id == operands.second.id
            && operands.first.group_key == operands.second.group_key;

        match builtin.canonical() {
            B::Intersects => Ok(first.iter().any(|e| second.contains(e))),
            B::NotIntersects => Ok(!first.iter().any(|e| second.contains(e))),
            B::Contains => Ok(second.iter().all(|e| first.contains(e))),
            B::NotContains => Ok(!second.iter().all(|e| first.contains(e))),
            B::Equal => Ok(same_group || first == second),
            B::NotEqual => Ok(!(same_group || first == second)),
            other => Err(SqwrlError::internal(format!(
                "{} is not a collection predicate",
                other
            ))),
        }
    }

    /// Evaluate union, intersection, difference and append
    ///
    /// The result is grouped by both operands' windows together.
    pub(crate) fn eval_collection_algebra(
        &mut self,
        builtin: SqwrlBuiltIn,
        invocation: &mut Invocation<'_>,
        arguments: &mut [BuiltInArgument],
    ) -> EvalResult<bool> {
        use SqwrlBuiltIn as B;

        let operands = self.operands(builtin, invocation, arguments, 1)?;
        let first = self.operand_collection(&operands.first)?;
        let second = self.operand_collection(&operands.second)?;

        let result = match builtin.canonical() {
            B::Union => union(first, second),
            B::Intersection => intersection(first, second),
            B::Difference => difference(first, second),
            B::Append => append(first, second),
            other => {
                return Err(SqwrlError::internal(format!(
                    "{} does not build a collection",
                    other
                )));
            }
        };

        let result_id = self.collection_id(builtin, invocation, arguments, 0)?;
        let result_key = group_key(invocation, arguments, 3, 0, operands.arity)?;
        self.process_list_result(arguments, 0, &result_id, &result_key, operands.arity, result)
    }
}
