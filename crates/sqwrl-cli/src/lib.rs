//! SQWRL command-line support
//!
//! The `sqwrl` binary is a thin shell over these modules:
//! - `script`: JSON scripts of built-in invocations and a runner that plays
//!   the rule engine host
//! - `output`: text and JSON rendering

pub mod output;
pub mod script;

pub use output::{ColorMode, OutputFormat};
pub use script::{Outcome, RunReport, Script, ScriptRunner};
