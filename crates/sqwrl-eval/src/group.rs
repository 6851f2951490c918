//! Group key derivation
//!
//! Grouping arguments trail the core arguments of a built-in. A collection
//! reference uses a window of them, given as an offset past the core
//! arguments and a length, and the window's values are rendered into the
//! key of that reference's group container.

use sqwrl_types::BuiltInArgument;

use crate::context::Invocation;
use crate::error::{EvalResult, SqwrlError};

/// Key of the ungrouped container
pub const UNGROUPED: &str = "";

/// Derive the group key for a window of grouping arguments
///
/// An empty window gives the ungrouped key.
pub fn group_key(
    invocation: &Invocation<'_>,
    arguments: &[BuiltInArgument],
    core: usize,
    offset: usize,
    len: usize,
) -> EvalResult<String> {
    if len == 0 {
        return Ok(UNGROUPED.to_string());
    }

    let start = core + offset;
    let window = arguments.get(start..start + len).ok_or_else(|| {
        SqwrlError::internal(format!(
            "group window {}..{} exceeds {} arguments",
            start,
            start + len,
            arguments.len()
        ))
    })?;

    Ok(invocation.render(window))
}

/// Group key from every argument past the core ones
pub fn trailing_group_key(
    invocation: &Invocation<'_>,
    arguments: &[BuiltInArgument],
    core: usize,
) -> EvalResult<String> {
    group_key(
        invocation,
        arguments,
        core,
        0,
        arguments.len().saturating_sub(core),
    )
}
