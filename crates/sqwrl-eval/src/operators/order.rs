//! Order Statistic Operators
//!
//! Implements: nth, greatest, least, nthGreatest, greatestN, leastN,
//! notGreatest, notLeast, notNth, notNthGreatest, notGreatestN, notLeastN,
//! nthSlice, nthGreatestSlice, notNthSlice, notNthGreatestSlice and their
//! first/last aliases.
//!
//! Every operator works on a fresh ascending copy of the group. Ranks are
//! 1-based. Collection-valued operators select a contiguous window of the
//! sorted copy, or drop it; the `not` forms are exact complements.

use std::ops::Range;

use sqwrl_types::BuiltInArgument;

use crate::builtin::SqwrlBuiltIn;
use crate::context::{Invocation, Phase};
use crate::engine::{SqwrlEngine, check_count_at_least, positive_int, process_result, sorted_elements};
use crate::error::{EvalResult, SqwrlError};
use crate::store::Collection;

/// A window of a sorted sequence, kept or dropped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Keep only the window
    Keep(Range<usize>),
    /// Keep everything but the window
    Drop(Range<usize>),
}

impl Selection {
    /// Apply the selection to a sorted sequence
    pub fn apply<T>(&self, mut sorted: Vec<T>) -> Vec<T> {
        match self {
            Self::Keep(window) => {
                sorted.truncate(window.end);
                sorted.drain(..window.start);
                sorted
            }
            Self::Drop(window) => {
                sorted.drain(window.clone());
                sorted
            }
        }
    }

    /// Selection made by a collection-valued operator
    ///
    /// `k` and `size` are ignored by operators that take no rank or size.
    pub fn for_operator(builtin: SqwrlBuiltIn, len: usize, k: usize, size: usize) -> Option<Self> {
        use SqwrlBuiltIn as B;
        Some(match builtin.canonical() {
            B::GreatestN => Self::Keep(greatest_n(len, k)),
            B::LeastN => Self::Keep(least_n(len, k)),
            B::NotGreatest => Self::Drop(greatest_n(len, 1)),
            B::NotLeast => Self::Drop(least_n(len, 1)),
            B::NotNth => Self::Drop(nth_slice(len, k, 1)),
            B::NotNthGreatest => Self::Drop(nth_greatest_slice(len, k, 1)),
            B::NotGreatestN => Self::Drop(greatest_n(len, k)),
            B::NotLeastN => Self::Drop(least_n(len, k)),
            B::NthSlice => Self::Keep(nth_slice(len, k, size)),
            B::NthGreatestSlice => Self::Keep(nth_greatest_slice(len, k, size)),
            B::NotNthSlice => Self::Drop(nth_slice(len, k, size)),
            B::NotNthGreatestSlice => Self::Drop(nth_greatest_slice(len, k, size)),
            _ => return None,
        })
    }
}

/// Top `k` positions, clamped to the length
pub fn greatest_n(len: usize, k: usize) -> Range<usize> {
    len - k.min(len)..len
}

/// Bottom `k` positions, clamped to the length
pub fn least_n(len: usize, k: usize) -> Range<usize> {
    0..k.min(len)
}

/// `size` positions from ascending rank `k`, empty if `k` is out of range
pub fn nth_slice(len: usize, k: usize, size: usize) -> Range<usize> {
    if k == 0 || k > len {
        return 0..0;
    }
    let start = k - 1;
    start..start.saturating_add(size).min(len)
}

/// `size` positions from descending rank `k` towards the greatest
///
/// Empty if `k` is out of range.
pub fn nth_greatest_slice(len: usize, k: usize, size: usize) -> Range<usize> {
    if k == 0 || k > len {
        return 0..0;
    }
    let start = len - k;
    start..start.saturating_add(size).min(len)
}

/// Element at ascending rank `k`
pub fn nth<T>(sorted: &[T], k: usize) -> Option<&T> {
    k.checked_sub(1).and_then(|i| sorted.get(i))
}

/// Element at descending rank `k`
pub fn nth_greatest<T>(sorted: &[T], k: usize) -> Option<&T> {
    if k == 0 || k > sorted.len() {
        None
    } else {
        sorted.get(sorted.len() - k)
    }
}

/// Number of rank/size arguments after the result and source
fn parameter_count(builtin: SqwrlBuiltIn) -> usize {
    use SqwrlBuiltIn as B;
    match builtin.canonical() {
        B::NthSlice | B::NthGreatestSlice | B::NotNthSlice | B::NotNthGreatestSlice => 2,
        B::Nth
        | B::NthGreatest
        | B::GreatestN
        | B::LeastN
        | B::NotNth
        | B::NotNthGreatest
        | B::NotGreatestN
        | B::NotLeastN => 1,
        _ => 0,
    }
}

impl SqwrlEngine {
    /// Rank and size arguments, read before the group is touched
    fn order_parameters(
        builtin: SqwrlBuiltIn,
        arguments: &[BuiltInArgument],
    ) -> EvalResult<(usize, usize, usize)> {
        let parameters = parameter_count(builtin);
        let core = 2 + parameters;
        check_count_at_least(builtin, arguments, core)?;

        let k = if parameters >= 1 { positive_int(builtin, arguments, 2)? } else { 0 };
        let size = if parameters >= 2 { positive_int(builtin, arguments, 3)? } else { 0 };
        Ok((core, k, size))
    }

    /// Evaluate nth, greatest, least and nthGreatest
    ///
    /// Also serves min and max in the antecedent.
    pub(crate) fn eval_order_value(
        &mut self,
        builtin: SqwrlBuiltIn,
        invocation: &mut Invocation<'_>,
        arguments: &mut [BuiltInArgument],
    ) -> EvalResult<bool> {
        // Post-processed by the host in the consequent
        if invocation.phase == Phase::Consequent {
            return Ok(true);
        }

        let (core, k, _) = Self::order_parameters(builtin, arguments)?;
        let (_, collection) = self.source_collection(builtin, invocation, arguments, 1, core)?;
        let sorted = sorted_elements(builtin, collection)?;

        let picked = match builtin.canonical() {
            SqwrlBuiltIn::Nth => nth(&sorted, k),
            SqwrlBuiltIn::NthGreatest => nth_greatest(&sorted, k),
            SqwrlBuiltIn::Greatest | SqwrlBuiltIn::Max => sorted.last(),
            SqwrlBuiltIn::Least | SqwrlBuiltIn::Min => sorted.first(),
            other => {
                return Err(SqwrlError::internal(format!(
                    "{} is not a single-value order statistic",
                    other
                )));
            }
        };

        match picked {
            Some(value) => process_result(arguments, 0, value.clone()),
            None => Ok(false),
        }
    }

    /// Evaluate the collection-valued order statistics
    ///
    /// The result is written under the source's group key with the source's
    /// kind and group arity.
    pub(crate) fn eval_order_list(
        &mut self,
        builtin: SqwrlBuiltIn,
        invocation: &mut Invocation<'_>,
        arguments: &mut [BuiltInArgument],
    ) -> EvalResult<bool> {
        // Post-processed by the host in the consequent
        if invocation.phase == Phase::Consequent {
            return Ok(true);
        }

        let (core, k, size) = Self::order_parameters(builtin, arguments)?;
        let (group_key, collection) = self.source_collection(builtin, invocation, arguments, 1, core)?;
        let kind = collection.kind();
        let sorted = sorted_elements(builtin, collection)?;

        let selection = Selection::for_operator(builtin, sorted.len(), k, size).ok_or_else(|| {
            SqwrlError::internal(format!("{} is not a collection-valued order statistic", builtin))
        })?;
        let result = Collection::from_elements(kind, selection.apply(sorted));

        let result_id = self.collection_id(builtin, invocation, arguments, 0)?;
        let arity = arguments.len() - core;
        self.process_list_result(arguments, 0, &result_id, &group_key, arity, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keep_and_drop_partition() {
        let sorted = vec![1, 2, 3, 4, 5];
        let window = 1..3;
        assert_eq!(Selection::Keep(window.clone()).apply(sorted.clone()), vec![2, 3]);
        assert_eq!(Selection::Drop(window).apply(sorted), vec![1, 4, 5]);
    }

    #[test]
    fn slices_clip_to_length() {
        assert_eq!(nth_slice(3, 2, 2), 1..3);
        assert_eq!(nth_slice(3, 3, 10), 2..3);
        assert_eq!(nth_slice(3, 4, 1), 0..0);
        assert_eq!(nth_slice(3, 0, 1), 0..0);
        assert_eq!(nth_greatest_slice(5, 2, 5), 3..5);
        assert_eq!(nth_greatest_slice(5, 6, 1), 0..0);
    }

    #[test]
    fn n_bounded_windows_clamp() {
        assert_eq!(greatest_n(3, 10), 0..3);
        assert_eq!(greatest_n(3, 0), 3..3);
        assert_eq!(least_n(3, 2), 0..2);
    }

    #[test]
    fn single_ranks() {
        let sorted = [10, 20, 30];
        assert_eq!(nth(&sorted, 1), Some(&10));
        assert_eq!(nth(&sorted, 0), None);
        assert_eq!(nth_greatest(&sorted, 1), Some(&30));
        assert_eq!(nth_greatest(&sorted, 4), None);
    }
}
