//! Collection Construction Operators
//!
//! Implements: makeSet, makeBag

use log::trace;
use sqwrl_types::{BuiltInArgument, CollectionHandle};

use crate::builtin::SqwrlBuiltIn;
use crate::context::{Invocation, Phase};
use crate::engine::{SqwrlEngine, check_bound_from, check_count_at_least};
use crate::error::{EvalResult, SqwrlError};
use crate::group::trailing_group_key;
use crate::store::CollectionKind;

/// Collection variable and element come before the grouping arguments
const CORE_ARGUMENTS: usize = 2;

impl SqwrlEngine {
    /// Evaluate makeSet / makeBag
    ///
    /// `make(?c, element, group...)` adds the element to the group's
    /// container and binds `?c` to a handle on it.
    pub(crate) fn eval_make(
        &mut self,
        builtin: SqwrlBuiltIn,
        invocation: &mut Invocation<'_>,
        arguments: &mut [BuiltInArgument],
    ) -> EvalResult<bool> {
        invocation.require_phase(builtin.as_str(), Phase::Antecedent)?;
        check_count_at_least(builtin, arguments, CORE_ARGUMENTS)?;
        check_bound_from(builtin, arguments, 1)?;

        let kind = match builtin {
            SqwrlBuiltIn::MakeBag => CollectionKind::Bag,
            _ => CollectionKind::Set,
        };
        let id = self.collection_id(builtin, invocation, arguments, 0)?;
        let arity = arguments.len() - CORE_ARGUMENTS;

        if !arguments[0].is_unbound() && self.store.group_arity(&id).is_none() {
            return Err(SqwrlError::NonCollectionVariable {
                name: id.name.clone(),
            });
        }
        self.store.declare_group_arity(&id, arity)?;

        let group_key = trailing_group_key(invocation, arguments, CORE_ARGUMENTS)?;
        let element = arguments[1].resolved().clone();
        trace!("{} adds {} to {}", builtin, element, id);

        self.store
            .get_or_create(&id, &group_key, kind)?
            .insert(element);

        if arguments[0].is_unbound() {
            let handle = CollectionHandle::new(&id.query, &id.name, group_key);
            arguments[0].bind(BuiltInArgument::Collection(handle))?;
        }

        Ok(true)
    }
}
