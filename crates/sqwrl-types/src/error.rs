//! Errors raised while building or inspecting arguments

use thiserror::Error;

/// Result type for argument model operations
pub type TypeResult<T> = Result<T, TypeError>;

/// Argument model errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    /// Datatype name could not be resolved
    #[error("Unknown datatype: {name}")]
    UnknownDatatype { name: String },

    /// Lexical form is not valid for the datatype
    #[error("Invalid lexical form '{lexical}' for {datatype}")]
    InvalidLexicalForm { lexical: String, datatype: String },

    /// Numeric value does not fit the requested datatype
    #[error("Value {value} is out of range for {datatype}")]
    OutOfRange { value: String, datatype: String },

    /// Attempt to bind a slot that is not an unbound variable
    #[error("Cannot bind {kind} argument")]
    NotBindable { kind: String },
}

impl TypeError {
    /// Create an invalid lexical form error
    pub fn invalid_lexical(lexical: impl Into<String>, datatype: impl ToString) -> Self {
        Self::InvalidLexicalForm {
            lexical: lexical.into(),
            datatype: datatype.to_string(),
        }
    }

    /// Create an out of range error
    pub fn out_of_range(value: impl ToString, datatype: impl ToString) -> Self {
        Self::OutOfRange {
            value: value.to_string(),
            datatype: datatype.to_string(),
        }
    }
}
