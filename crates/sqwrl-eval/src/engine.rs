//! SQWRL Evaluation Engine
//!
//! This module provides the main SqwrlEngine struct which dispatches built-in
//! invocations to the operator implementations and owns the query-scoped
//! collection store.

use log::trace;
use rust_decimal::Decimal;
use sqwrl_types::{BuiltInArgument, CollectionHandle, Literal};

use crate::builtin::SqwrlBuiltIn;
use crate::context::{Invocation, Phase};
use crate::error::{EvalResult, SqwrlError};
use crate::store::{Collection, CollectionId, CollectionStore};

/// The SQWRL collection engine
///
/// One engine serves one query evaluation at a time. Call `reset` between
/// independent evaluations.
#[derive(Debug, Default)]
pub struct SqwrlEngine {
    pub(crate) store: CollectionStore,
}

impl SqwrlEngine {
    /// Create an engine with an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Read access to the collection store
    pub fn store(&self) -> &CollectionStore {
        &self.store
    }

    /// Clear all collection state
    pub fn reset(&mut self) {
        self.store.reset();
    }

    /// Invoke a built-in by name
    pub fn invoke_named(
        &mut self,
        name: &str,
        invocation: &mut Invocation<'_>,
        arguments: &mut [BuiltInArgument],
    ) -> EvalResult<bool> {
        let builtin: SqwrlBuiltIn = name.parse()?;
        self.invoke(builtin, invocation, arguments)
    }

    /// Invoke a built-in
    ///
    /// Returns whether the built-in succeeded. Unbound result slots are bound
    /// in place on success.
    pub fn invoke(
        &mut self,
        builtin: SqwrlBuiltIn,
        invocation: &mut Invocation<'_>,
        arguments: &mut [BuiltInArgument],
    ) -> EvalResult<bool> {
        trace!(
            "{} {}({}) in {}",
            invocation.phase,
            builtin,
            arguments
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
            invocation.query
        );

        use SqwrlBuiltIn as B;
        match builtin.canonical() {
            // === Result construction ===
            B::Select | B::SelectDistinct => self.eval_select(builtin, invocation, arguments),
            B::Count | B::CountDistinct => self.eval_count(builtin, invocation, arguments),
            B::ColumnNames | B::OrderBy | B::OrderByDescending | B::Limit => {
                self.eval_preprocessed(builtin, invocation, Phase::Consequent)
            }

            // === Collection construction ===
            B::MakeSet | B::MakeBag => self.eval_make(builtin, invocation, arguments),
            B::GroupBy => self.eval_preprocessed(builtin, invocation, Phase::Antecedent),

            // === Single collection predicates ===
            B::IsEmpty => self.eval_is_empty(builtin, invocation, arguments),
            B::NotEmpty => Ok(!self.eval_is_empty(builtin, invocation, arguments)?),
            B::Size => self.eval_size(builtin, invocation, arguments),
            B::Element => self.eval_element(builtin, invocation, arguments),
            B::NotElement => self.eval_not_element(builtin, invocation, arguments),

            // === Aggregates ===
            B::Min | B::Max | B::Sum | B::Avg | B::Median => {
                self.eval_aggregate(builtin, invocation, arguments)
            }

            // === Order statistics ===
            B::Nth | B::Greatest | B::Least | B::NthGreatest => {
                self.eval_order_value(builtin, invocation, arguments)
            }
            B::GreatestN
            | B::LeastN
            | B::NotGreatest
            | B::NotLeast
            | B::NotNth
            | B::NotNthGreatest
            | B::NotGreatestN
            | B::NotLeastN
            | B::NthSlice
            | B::NthGreatestSlice
            | B::NotNthSlice
            | B::NotNthGreatestSlice => self.eval_order_list(builtin, invocation, arguments),

            // === Two collection operators ===
            B::Intersects
            | B::NotIntersects
            | B::Contains
            | B::NotContains
            | B::Equal
            | B::NotEqual => self.eval_collection_predicate(builtin, invocation, arguments),
            B::Union | B::Intersection | B::Difference | B::Append => {
                self.eval_collection_algebra(builtin, invocation, arguments)
            }

            // Aliases never survive canonical()
            alias => Err(SqwrlError::internal(format!("unresolved alias {}", alias))),
        }
    }

    fn eval_preprocessed(
        &self,
        builtin: SqwrlBuiltIn,
        invocation: &Invocation<'_>,
        phase: Phase,
    ) -> EvalResult<bool> {
        invocation.require_phase(builtin.as_str(), phase)?;
        Ok(true)
    }

    /// Collection identity named by the argument at `position`
    pub(crate) fn collection_id(
        &self,
        builtin: SqwrlBuiltIn,
        invocation: &Invocation<'_>,
        arguments: &[BuiltInArgument],
        position: usize,
    ) -> EvalResult<CollectionId> {
        let name = collection_name(builtin, arguments, position)?;
        Ok(CollectionId::new(invocation.query, name))
    }

    /// Fail if the identity was recorded with a different group arity
    pub(crate) fn check_group_arity(&self, id: &CollectionId, arity: usize) -> EvalResult<()> {
        match self.store.group_arity(id) {
            Some(recorded) if recorded != arity => Err(SqwrlError::GroupArityMismatch {
                collection: id.to_string(),
                recorded,
                requested: arity,
            }),
            _ => Ok(()),
        }
    }

    /// Record a computed collection and bind or check the result slot
    ///
    /// An unbound slot gets the result written under `id` and `group_key`
    /// (unless that group exists already) and is bound to a handle on it. A
    /// bound slot must hold a collection handle; the call succeeds iff the
    /// group it names equals the computed result. Nothing is written for a
    /// bound slot.
    pub(crate) fn process_list_result(
        &mut self,
        arguments: &mut [BuiltInArgument],
        position: usize,
        id: &CollectionId,
        group_key: &str,
        arity: usize,
        result: Collection,
    ) -> EvalResult<bool> {
        if !arguments[position].is_unbound() {
            return self.bound_collection_matches(&arguments[position], &result);
        }

        self.store.declare_group_arity(id, arity)?;
        if !self.store.is_group_declared(id, group_key) {
            self.store.put(id, group_key, result)?;
        }

        let handle = CollectionHandle::new(&id.query, &id.name, group_key);
        arguments[position].bind(BuiltInArgument::Collection(handle))?;
        Ok(true)
    }

    fn bound_collection_matches(
        &self,
        argument: &BuiltInArgument,
        result: &Collection,
    ) -> EvalResult<bool> {
        match argument.resolved() {
            BuiltInArgument::Collection(handle) => {
                let id = CollectionId::new(handle.query.as_str(), handle.name.as_str());
                Ok(self.store.get(&id, &handle.group_key)? == result)
            }
            _ => Err(SqwrlError::NonCollectionVariable {
                name: argument
                    .variable_name()
                    .map_or_else(|| argument.to_string(), str::to_string),
            }),
        }
    }
}

/// Fail unless there are exactly `expected` arguments
pub(crate) fn check_count(
    builtin: SqwrlBuiltIn,
    arguments: &[BuiltInArgument],
    expected: usize,
) -> EvalResult<()> {
    if arguments.len() == expected {
        Ok(())
    } else {
        Err(SqwrlError::argument_count(builtin.as_str(), expected, arguments.len()))
    }
}

/// Fail unless there are at least `minimum` arguments
pub(crate) fn check_count_at_least(
    builtin: SqwrlBuiltIn,
    arguments: &[BuiltInArgument],
    minimum: usize,
) -> EvalResult<()> {
    if arguments.len() >= minimum {
        Ok(())
    } else {
        Err(SqwrlError::argument_count(
            builtin.as_str(),
            format!("at least {}", minimum),
            arguments.len(),
        ))
    }
}

/// Fail if any argument from `start` on is an unbound variable
pub(crate) fn check_bound_from(
    builtin: SqwrlBuiltIn,
    arguments: &[BuiltInArgument],
    start: usize,
) -> EvalResult<()> {
    match arguments
        .iter()
        .enumerate()
        .skip(start)
        .find(|(_, arg)| arg.is_unbound())
    {
        Some((position, _)) => Err(SqwrlError::invalid_argument(
            builtin.as_str(),
            position,
            "argument must be bound",
        )),
        None => Ok(()),
    }
}

/// Collection name of a collection argument
///
/// Collections are named after the variable that holds them; a bare handle
/// keeps its own name.
pub(crate) fn collection_name(
    builtin: SqwrlBuiltIn,
    arguments: &[BuiltInArgument],
    position: usize,
) -> EvalResult<String> {
    let argument = arguments.get(position).ok_or_else(|| {
        SqwrlError::argument_count(builtin.as_str(), format!("at least {}", position + 1), arguments.len())
    })?;

    if let Some(name) = argument.variable_name() {
        return Ok(name.to_string());
    }

    match argument.as_collection() {
        Some(handle) => Ok(handle.name.clone()),
        None => Err(SqwrlError::invalid_argument(
            builtin.as_str(),
            position,
            format!("expecting a collection variable, got {}", argument.kind()),
        )),
    }
}

/// Rank or size argument as a non-negative machine int
pub(crate) fn positive_int(
    builtin: SqwrlBuiltIn,
    arguments: &[BuiltInArgument],
    position: usize,
) -> EvalResult<usize> {
    let argument = &arguments[position];
    let literal = argument
        .as_literal()
        .filter(|lit| lit.datatype().is_integral())
        .ok_or_else(|| {
            SqwrlError::invalid_argument(
                builtin.as_str(),
                position,
                format!("expecting an integer, got {}", argument),
            )
        })?;

    let value = literal.as_decimal().unwrap_or_default();
    if value < Decimal::ZERO {
        return Err(SqwrlError::invalid_argument(
            builtin.as_str(),
            position,
            format!("expecting a non-negative integer, got {}", value),
        ));
    }
    if value > Decimal::from(i32::MAX) {
        return Err(SqwrlError::invalid_argument(
            builtin.as_str(),
            position,
            format!("value {} exceeds {}", value, i32::MAX),
        ));
    }

    literal
        .as_i64()
        .and_then(|v| usize::try_from(v).ok())
        .ok_or_else(|| SqwrlError::internal(format!("rank {} not representable", value)))
}

/// Compare a computed value with a bound one
///
/// Numeric literals match by value regardless of datatype.
pub(crate) fn values_match(bound: &BuiltInArgument, computed: &BuiltInArgument) -> bool {
    let bound = bound.resolved();
    let computed = computed.resolved();
    match (bound.as_decimal(), computed.as_decimal()) {
        (Some(a), Some(b)) => a == b,
        _ => bound == computed,
    }
}

/// Bind an unbound result slot, or check a bound one
pub(crate) fn process_result(
    arguments: &mut [BuiltInArgument],
    position: usize,
    value: BuiltInArgument,
) -> EvalResult<bool> {
    let slot = &mut arguments[position];
    if slot.is_unbound() {
        slot.bind(value)?;
        Ok(true)
    } else {
        Ok(values_match(slot, &value))
    }
}

/// Sorted copy of a group's elements
///
/// Every element must be comparable.
pub(crate) fn sorted_elements(
    builtin: SqwrlBuiltIn,
    collection: &Collection,
) -> EvalResult<Vec<BuiltInArgument>> {
    let mut elements = collection.to_vec();
    if let Some(bad) = elements.iter().find(|e| !e.is_comparable()) {
        return Err(SqwrlError::not_comparable(builtin.as_str(), bad));
    }
    elements.sort();
    Ok(elements)
}

/// xsd:integer literal argument
pub(crate) fn integer_argument(value: usize) -> BuiltInArgument {
    BuiltInArgument::Literal(Literal::integer(i64::try_from(value).unwrap_or(i64::MAX)))
}
