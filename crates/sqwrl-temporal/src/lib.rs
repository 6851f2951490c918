//! SQWRL temporal string utilities
//!
//! Helpers used by the temporal built-ins to bring partial datetime strings
//! to a common granularity:
//! - Granularities from years down to milliseconds
//! - Stripping, padding and normalizing XSD and JDBC datetime strings
//! - Component extraction and granule counts

pub mod error;
pub mod granularity;
pub mod processor;

pub use error::{TemporalError, TemporalResult};
pub use granularity::Granularity;
pub use processor::DatetimeStringProcessor;
