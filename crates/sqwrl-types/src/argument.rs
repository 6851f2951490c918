//! Built-in arguments
//!
//! Every slot of a built-in invocation is a `BuiltInArgument`. Bound slots
//! carry literals, entity references or collection handles; unbound slots are
//! variables the built-in may bind in place.
//!
//! The derived ordering is total: argument kind first (in variant order), then
//! the value. Literals order by value before datatype, so all numeric literals
//! interleave by magnitude regardless of their declared type.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{TypeError, TypeResult};
use crate::literal::Literal;
use rust_decimal::Decimal;

/// An IRI identifying an entity
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Iri(String);

impl Iri {
    pub fn new(iri: impl Into<String>) -> Self {
        Self(iri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Iri {
    fn from(iri: &str) -> Self {
        Self::new(iri)
    }
}

/// Reference to one group of a named collection
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CollectionHandle {
    /// Query the collection belongs to
    pub query: String,
    /// Collection name, usually the name of the variable it was bound to
    pub name: String,
    /// Group key, empty for ungrouped collections
    pub group_key: String,
}

impl CollectionHandle {
    pub fn new(
        query: impl Into<String>,
        name: impl Into<String>,
        group_key: impl Into<String>,
    ) -> Self {
        Self {
            query: query.into(),
            name: name.into(),
            group_key: group_key.into(),
        }
    }
}

impl fmt::Display for CollectionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.group_key.is_empty() {
            write!(f, "{}:{}", self.query, self.name)
        } else {
            write!(f, "{}:{}[{}]", self.query, self.name, self.group_key)
        }
    }
}

/// A named variable slot
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binding: Option<Box<BuiltInArgument>>,
}

impl Variable {
    /// Create an unbound variable
    pub fn unbound(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            binding: None,
        }
    }

    /// Create a variable already bound to a value
    pub fn bound(name: impl Into<String>, value: BuiltInArgument) -> Self {
        Self {
            name: name.into(),
            binding: Some(Box::new(value)),
        }
    }

    pub fn is_bound(&self) -> bool {
        self.binding.is_some()
    }
}

/// Runtime kind of an argument, used in diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgumentKind {
    Literal,
    NamedIndividual,
    Class,
    ObjectProperty,
    DataProperty,
    AnnotationProperty,
    ClassExpression,
    Collection,
    MultiValue,
    UnboundVariable,
}

impl ArgumentKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Literal => "literal",
            Self::NamedIndividual => "named individual",
            Self::Class => "class",
            Self::ObjectProperty => "object property",
            Self::DataProperty => "data property",
            Self::AnnotationProperty => "annotation property",
            Self::ClassExpression => "class expression",
            Self::Collection => "collection",
            Self::MultiValue => "multi-value",
            Self::UnboundVariable => "unbound variable",
        }
    }
}

impl fmt::Display for ArgumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One positional argument of a built-in invocation
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum BuiltInArgument {
    /// Literal value with a datatype
    Literal(Literal),
    /// Named individual reference
    NamedIndividual(Iri),
    /// Class reference
    Class(Iri),
    /// Object property reference
    ObjectProperty(Iri),
    /// Data property reference
    DataProperty(Iri),
    /// Annotation property reference
    AnnotationProperty(Iri),
    /// Rendered anonymous class expression
    ClassExpression(String),
    /// Handle to a grouped collection
    Collection(CollectionHandle),
    /// Alternative bindings for a single variable
    MultiValue(Vec<BuiltInArgument>),
    /// Variable slot, bound or not
    Variable(Variable),
}

impl BuiltInArgument {
    /// Create a literal argument
    pub fn literal(value: impl Into<Literal>) -> Self {
        Self::Literal(value.into())
    }

    /// Create a named individual reference
    pub fn individual(iri: impl Into<String>) -> Self {
        Self::NamedIndividual(Iri::new(iri))
    }

    /// Create a class reference
    pub fn class(iri: impl Into<String>) -> Self {
        Self::Class(Iri::new(iri))
    }

    /// Create an unbound variable
    pub fn variable(name: impl Into<String>) -> Self {
        Self::Variable(Variable::unbound(name))
    }

    /// Create a bound variable
    pub fn bound(name: impl Into<String>, value: BuiltInArgument) -> Self {
        Self::Variable(Variable::bound(name, value))
    }

    /// Runtime kind after following variable bindings
    pub fn kind(&self) -> ArgumentKind {
        match self.resolved() {
            Self::Literal(_) => ArgumentKind::Literal,
            Self::NamedIndividual(_) => ArgumentKind::NamedIndividual,
            Self::Class(_) => ArgumentKind::Class,
            Self::ObjectProperty(_) => ArgumentKind::ObjectProperty,
            Self::DataProperty(_) => ArgumentKind::DataProperty,
            Self::AnnotationProperty(_) => ArgumentKind::AnnotationProperty,
            Self::ClassExpression(_) => ArgumentKind::ClassExpression,
            Self::Collection(_) => ArgumentKind::Collection,
            Self::MultiValue(_) => ArgumentKind::MultiValue,
            Self::Variable(_) => ArgumentKind::UnboundVariable,
        }
    }

    /// Check if this slot is a variable with no binding
    pub fn is_unbound(&self) -> bool {
        matches!(self, Self::Variable(Variable { binding: None, .. }))
    }

    /// Name of the variable in this slot, bound or not
    pub fn variable_name(&self) -> Option<&str> {
        match self {
            Self::Variable(v) => Some(&v.name),
            _ => None,
        }
    }

    /// Bind an unbound variable slot
    pub fn bind(&mut self, value: BuiltInArgument) -> TypeResult<()> {
        match self {
            Self::Variable(v) if v.binding.is_none() => {
                v.binding = Some(Box::new(value));
                Ok(())
            }
            other => Err(TypeError::NotBindable {
                kind: match other {
                    Self::Variable(_) => "bound variable".to_string(),
                    _ => other.kind().to_string(),
                },
            }),
        }
    }

    /// Follow variable bindings to the underlying value
    ///
    /// Unbound variables resolve to themselves.
    pub fn resolved(&self) -> &BuiltInArgument {
        let mut current = self;
        while let Self::Variable(Variable {
            binding: Some(value),
            ..
        }) = current
        {
            current = value;
        }
        current
    }

    /// Owned copy of the resolved value
    pub fn into_resolved(self) -> BuiltInArgument {
        match self {
            Self::Variable(Variable {
                binding: Some(value),
                ..
            }) => value.into_resolved(),
            other => other,
        }
    }

    /// Check if the value can take part in ordering
    pub fn is_comparable(&self) -> bool {
        match self.resolved() {
            Self::Literal(lit) => lit.is_comparable(),
            Self::NamedIndividual(_)
            | Self::Class(_)
            | Self::ObjectProperty(_)
            | Self::DataProperty(_)
            | Self::AnnotationProperty(_) => true,
            Self::ClassExpression(_)
            | Self::Collection(_)
            | Self::MultiValue(_)
            | Self::Variable(_) => false,
        }
    }

    /// Try to get the literal value
    pub fn as_literal(&self) -> Option<&Literal> {
        match self.resolved() {
            Self::Literal(lit) => Some(lit),
            _ => None,
        }
    }

    /// Try to get a numeric literal value
    pub fn as_decimal(&self) -> Option<Decimal> {
        self.as_literal()
            .filter(|lit| lit.is_numeric())
            .and_then(Literal::as_decimal)
    }

    /// Try to get the collection handle
    pub fn as_collection(&self) -> Option<&CollectionHandle> {
        match self.resolved() {
            Self::Collection(handle) => Some(handle),
            _ => None,
        }
    }
}

impl From<Literal> for BuiltInArgument {
    fn from(lit: Literal) -> Self {
        Self::Literal(lit)
    }
}

impl From<CollectionHandle> for BuiltInArgument {
    fn from(handle: CollectionHandle) -> Self {
        Self::Collection(handle)
    }
}

impl fmt::Display for BuiltInArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(lit) => write!(f, "{}", lit),
            Self::NamedIndividual(iri)
            | Self::Class(iri)
            | Self::ObjectProperty(iri)
            | Self::DataProperty(iri)
            | Self::AnnotationProperty(iri) => write!(f, "{}", iri),
            Self::ClassExpression(expr) => f.write_str(expr),
            Self::Collection(handle) => write!(f, "{}", handle),
            Self::MultiValue(values) => {
                f.write_str("{")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", value)?;
                }
                f.write_str("}")
            }
            Self::Variable(Variable {
                binding: Some(value),
                ..
            }) => write!(f, "{}", value),
            Self::Variable(v) => write!(f, "?{}", v.name),
        }
    }
}
