//! Shared helpers for SQWRL engine integration tests

#![allow(dead_code)]

use sqwrl_eval::{EvalResult, Invocation, SqwrlBuiltIn, SqwrlEngine};
use sqwrl_types::{BuiltInArgument, Literal};

pub const QUERY: &str = "q1";

pub fn int(i: i32) -> BuiltInArgument {
    BuiltInArgument::literal(Literal::int(i))
}

pub fn string(s: &str) -> BuiltInArgument {
    BuiltInArgument::literal(Literal::string(s))
}

pub fn var(name: &str) -> BuiltInArgument {
    BuiltInArgument::variable(name)
}

/// Invoke a built-in in the antecedent of `QUERY`
pub fn run(
    engine: &mut SqwrlEngine,
    builtin: SqwrlBuiltIn,
    arguments: &mut [BuiltInArgument],
) -> EvalResult<bool> {
    let mut invocation = Invocation::antecedent(QUERY);
    engine.invoke(builtin, &mut invocation, arguments)
}

/// Add each element to a collection with optional grouping arguments
pub fn fill(
    engine: &mut SqwrlEngine,
    builtin: SqwrlBuiltIn,
    name: &str,
    elements: &[BuiltInArgument],
    group: &[BuiltInArgument],
) {
    for element in elements {
        let mut arguments = vec![var(name), element.clone()];
        arguments.extend(group.iter().cloned());
        assert!(run(engine, builtin, &mut arguments).unwrap());
    }
}

/// Engine holding one ungrouped bag of ints named `b`
pub fn bag_of(values: &[i32]) -> SqwrlEngine {
    let mut engine = SqwrlEngine::new();
    let elements: Vec<_> = values.iter().copied().map(int).collect();
    fill(&mut engine, SqwrlBuiltIn::MakeBag, "b", &elements, &[]);
    engine
}

/// Engine holding one ungrouped set of ints named `b`
pub fn set_of(values: &[i32]) -> SqwrlEngine {
    let mut engine = SqwrlEngine::new();
    let elements: Vec<_> = values.iter().copied().map(int).collect();
    fill(&mut engine, SqwrlBuiltIn::MakeSet, "b", &elements, &[]);
    engine
}

/// Run a single-value operator on `b` and return the bound result
pub fn value_of(
    engine: &mut SqwrlEngine,
    builtin: SqwrlBuiltIn,
    extra: &[BuiltInArgument],
) -> Option<BuiltInArgument> {
    let mut arguments = vec![var("r"), var("b")];
    arguments.extend(extra.iter().cloned());
    if run(engine, builtin, &mut arguments).unwrap() {
        Some(arguments[0].resolved().clone())
    } else {
        None
    }
}

/// Run a collection-valued operator on `b` into `result` and return its
/// elements
pub fn list_of(
    engine: &mut SqwrlEngine,
    builtin: SqwrlBuiltIn,
    result: &str,
    extra: &[BuiltInArgument],
) -> Vec<BuiltInArgument> {
    let mut arguments = vec![var(result), var("b")];
    arguments.extend(extra.iter().cloned());
    assert!(run(engine, builtin, &mut arguments).unwrap());
    let handle = arguments[0].as_collection().cloned().unwrap();
    let id = sqwrl_eval::CollectionId::new(handle.query, handle.name);
    engine.store().get(&id, &handle.group_key).unwrap().to_vec()
}

pub fn ints(values: &[i32]) -> Vec<BuiltInArgument> {
    values.iter().copied().map(int).collect()
}
