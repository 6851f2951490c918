//! SQWRL Collection Engine
//!
//! This crate evaluates the SQWRL built-in library: the collection-construction,
//! aggregation, order-statistic and set-algebra operators a rule engine calls
//! while evaluating a SQWRL query. It covers:
//!
//! - **Result Construction**: select, selectDistinct, count, countDistinct
//! - **Collection Construction**: makeSet, makeBag with grouping arguments
//! - **Single Collection Predicates**: isEmpty, notEmpty, size, element, notElement
//! - **Aggregates**: min, max, sum, avg, median in both rule phases
//! - **Order Statistics**: nth, greatest, least, N-bounded selections, slices
//!   and their complements
//! - **Two Collection Operators**: intersects, contains, equal, union,
//!   intersection, difference, append
//!
//! # Example
//!
//! ```
//! use sqwrl_eval::{Invocation, SqwrlBuiltIn, SqwrlEngine};
//! use sqwrl_types::{BuiltInArgument, Literal};
//!
//! let mut engine = SqwrlEngine::new();
//! let mut inv = Invocation::antecedent("q1");
//!
//! for n in [3, 1, 2] {
//!     let mut args = vec![
//!         BuiltInArgument::variable("b"),
//!         BuiltInArgument::literal(Literal::int(n)),
//!     ];
//!     engine.invoke(SqwrlBuiltIn::MakeBag, &mut inv, &mut args).unwrap();
//! }
//!
//! let mut args = vec![BuiltInArgument::variable("m"), BuiltInArgument::variable("b")];
//! assert!(engine.invoke(SqwrlBuiltIn::Median, &mut inv, &mut args).unwrap());
//! assert_eq!(args[0].as_decimal(), Some(2.into()));
//! ```
//!
//! # Architecture
//!
//! - `SqwrlEngine`: dispatches built-in invocations and owns the collection store
//! - `Invocation`: per-call context (query name, phase, renderer, result sink)
//! - `CollectionStore`: query-scoped sets and bags, one container per group key
//! - `operators`: the operator implementations, one module per category
//!
//! # Grouping
//!
//! Arguments past a built-in's core arguments partition a collection into
//! groups. The grouping values are rendered into a key by a
//! `PatternRenderer`; equal values always give equal keys.

pub mod builtin;
pub mod context;
pub mod engine;
pub mod error;
pub mod group;
pub mod operators;
pub mod result;
pub mod store;

// Re-export main types
pub use builtin::{NAMESPACE, PREFIX, SqwrlBuiltIn};
pub use context::{CanonicalPatternRenderer, Invocation, PatternRenderer, Phase};
pub use engine::SqwrlEngine;
pub use error::{ErrorCategory, EvalResult, SqwrlError};
pub use group::{UNGROUPED, group_key};
pub use result::{ResultGenerator, ResultTable};
pub use store::{Collection, CollectionId, CollectionKind, CollectionStore};

// Re-export the pure operator helpers
pub use operators::{Selection, average, median, sum};
