//! SQWRL Operator Implementations
//!
//! This module contains the built-in implementations organized by category:
//! - Result construction (select, count and the preprocessed modifiers)
//! - Collection construction (makeSet, makeBag)
//! - Single collection predicates (isEmpty, size, element, ...)
//! - Aggregates (min, max, sum, avg, median)
//! - Order statistics (nth, greatest, slices and their complements)
//! - Two collection operators (union, intersection, equal, ...)

pub mod aggregate;
pub mod algebra;
pub mod collection;
pub mod make;
pub mod order;
pub mod select;

pub use aggregate::{average, median, sum};
pub use order::Selection;
