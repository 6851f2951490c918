//! SQWRL built-in argument model
//!
//! This crate defines the values that flow through SQWRL built-in invocations:
//! - XML Schema datatypes and typed literals
//! - Entity references, collection handles and variable slots
//! - The total order used by sorting built-ins
//! - Numeric result widening for aggregates

pub mod argument;
pub mod datatype;
pub mod error;
pub mod literal;
pub mod widening;

pub use argument::{ArgumentKind, BuiltInArgument, CollectionHandle, Iri, Variable};
pub use datatype::{Datatype, XSD_NAMESPACE};
pub use error::{TypeError, TypeResult};
pub use literal::{Literal, LiteralValue};
pub use widening::{least_narrow_datatype, numeric_literal};
