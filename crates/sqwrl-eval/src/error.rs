//! Evaluation errors for the SQWRL engine

use sqwrl_types::TypeError;
use thiserror::Error;

/// Result type for built-in evaluation
pub type EvalResult<T> = Result<T, SqwrlError>;

/// Broad classes of evaluation errors
///
/// The host uses the category to decide whether an error only fails the
/// current rule activation or must be reported as a malformed query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Wrong argument count, kind or value
    Argument,
    /// Set/bag or group arity conflict within a query
    Consistency,
    /// Reference to a collection that was never written
    Lookup,
    /// Built-in called in the wrong evaluation phase
    Phase,
    /// Engine invariant broken
    Internal,
}

/// Errors that can occur while evaluating a built-in
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SqwrlError {
    /// Wrong number of arguments
    #[error("{builtin} expects {expected} argument(s), got {found}")]
    ArgumentCount {
        builtin: String,
        expected: String,
        found: usize,
    },

    /// Argument has the wrong kind or value
    #[error("Invalid argument #{position} to {builtin}: {message}")]
    InvalidArgument {
        builtin: String,
        position: usize,
        message: String,
    },

    /// Element cannot be ordered
    #[error("{builtin}: element {element} is not comparable")]
    NotComparable { builtin: String, element: String },

    /// Element is not numeric
    #[error("{builtin}: element {element} is not numeric")]
    NotNumeric { builtin: String, element: String },

    /// Unknown built-in name
    #[error("Unknown built-in: {name}")]
    UnknownBuiltIn { name: String },

    /// Set contents written to a bag identity or the reverse
    #[error("Collection {collection} is a {recorded}, cannot use it as a {requested}")]
    CollectionKindMismatch {
        collection: String,
        recorded: String,
        requested: String,
    },

    /// Same collection grouped with a different number of arguments
    #[error("Collection {collection} has group arity {recorded}, referenced with {requested}")]
    GroupArityMismatch {
        collection: String,
        recorded: usize,
        requested: usize,
    },

    /// Collection variable already used in a non-collection context
    #[error("Variable {name} is already used in a non-collection context")]
    NonCollectionVariable { name: String },

    /// Collection or group never written
    #[error("Collection argument does not refer to a collection: {collection}")]
    CollectionNotFound { collection: String },

    /// Built-in called in the wrong phase
    #[error("{builtin} cannot be used in the {phase}")]
    PhaseViolation { builtin: String, phase: String },

    /// Arithmetic overflow
    #[error("Arithmetic overflow in {operation}")]
    Overflow { operation: String },

    /// Internal error (should not happen)
    #[error("Internal evaluation error: {message}")]
    Internal { message: String },

    /// Argument model error
    #[error(transparent)]
    Type(#[from] TypeError),
}

impl SqwrlError {
    /// Create an argument count error
    pub fn argument_count(builtin: impl Into<String>, expected: impl ToString, found: usize) -> Self {
        Self::ArgumentCount {
            builtin: builtin.into(),
            expected: expected.to_string(),
            found,
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(
        builtin: impl Into<String>,
        position: usize,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidArgument {
            builtin: builtin.into(),
            position,
            message: message.into(),
        }
    }

    /// Create a not comparable error
    pub fn not_comparable(builtin: impl Into<String>, element: impl ToString) -> Self {
        Self::NotComparable {
            builtin: builtin.into(),
            element: element.to_string(),
        }
    }

    /// Create a not numeric error
    pub fn not_numeric(builtin: impl Into<String>, element: impl ToString) -> Self {
        Self::NotNumeric {
            builtin: builtin.into(),
            element: element.to_string(),
        }
    }

    /// Create a collection not found error
    pub fn collection_not_found(collection: impl ToString) -> Self {
        Self::CollectionNotFound {
            collection: collection.to_string(),
        }
    }

    /// Create a phase violation error
    pub fn phase_violation(builtin: impl Into<String>, phase: impl ToString) -> Self {
        Self::PhaseViolation {
            builtin: builtin.into(),
            phase: phase.to_string(),
        }
    }

    /// Create an overflow error
    pub fn overflow(operation: impl Into<String>) -> Self {
        Self::Overflow {
            operation: operation.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Category of this error
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ArgumentCount { .. }
            | Self::InvalidArgument { .. }
            | Self::NotComparable { .. }
            | Self::NotNumeric { .. }
            | Self::UnknownBuiltIn { .. }
            | Self::Overflow { .. }
            | Self::Type(_) => ErrorCategory::Argument,
            Self::CollectionKindMismatch { .. }
            | Self::GroupArityMismatch { .. }
            | Self::NonCollectionVariable { .. } => ErrorCategory::Consistency,
            Self::CollectionNotFound { .. } => ErrorCategory::Lookup,
            Self::PhaseViolation { .. } => ErrorCategory::Phase,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Whether the error indicates a malformed query
    ///
    /// Fatal errors must be reported to the user. The rest only fail the
    /// current rule activation.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Consistency | ErrorCategory::Phase | ErrorCategory::Internal
        )
    }
}
