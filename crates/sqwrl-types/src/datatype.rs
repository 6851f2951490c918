//! XML Schema datatypes carried by literal arguments

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TypeError;

/// XML Schema namespace
pub const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema#";

/// Datatype of a literal argument
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Datatype {
    /// xsd:byte (8-bit signed)
    Byte,
    /// xsd:short (16-bit signed)
    Short,
    /// xsd:int (32-bit signed)
    Int,
    /// xsd:long (64-bit signed)
    Long,
    /// xsd:integer (unbounded)
    Integer,
    /// xsd:decimal
    Decimal,
    /// xsd:float
    Float,
    /// xsd:double
    Double,
    /// xsd:string
    String,
    /// xsd:boolean
    Boolean,
    /// xsd:dateTime
    DateTime,
    /// xsd:date
    Date,
    /// xsd:time
    Time,
    /// xsd:duration
    Duration,
    /// xsd:anyURI
    AnyUri,
    /// Any other datatype, kept by IRI
    Other(String),
}

impl Datatype {
    /// Local name within the XML Schema namespace, if it is one of ours
    pub fn local_name(&self) -> Option<&'static str> {
        Some(match self {
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Integer => "integer",
            Self::Decimal => "decimal",
            Self::Float => "float",
            Self::Double => "double",
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::DateTime => "dateTime",
            Self::Date => "date",
            Self::Time => "time",
            Self::Duration => "duration",
            Self::AnyUri => "anyURI",
            Self::Other(_) => return None,
        })
    }

    /// Full IRI of the datatype
    pub fn iri(&self) -> String {
        match self {
            Self::Other(iri) => iri.clone(),
            known => format!("{}{}", XSD_NAMESPACE, known.local_name().unwrap_or_default()),
        }
    }

    fn from_local_name(name: &str) -> Option<Self> {
        Some(match name {
            "byte" => Self::Byte,
            "short" => Self::Short,
            "int" => Self::Int,
            "long" => Self::Long,
            "integer" => Self::Integer,
            "decimal" => Self::Decimal,
            "float" => Self::Float,
            "double" => Self::Double,
            "string" => Self::String,
            "boolean" => Self::Boolean,
            "dateTime" => Self::DateTime,
            "date" => Self::Date,
            "time" => Self::Time,
            "duration" => Self::Duration,
            "anyURI" => Self::AnyUri,
            _ => return None,
        })
    }

    /// Check if this is a numeric datatype
    pub fn is_numeric(&self) -> bool {
        self.numeric_rank().is_some()
    }

    /// Check if this is an integral numeric datatype
    pub fn is_integral(&self) -> bool {
        matches!(
            self,
            Self::Byte | Self::Short | Self::Int | Self::Long | Self::Integer
        )
    }

    /// Check if this is a temporal datatype with a natural order
    pub fn is_temporal(&self) -> bool {
        matches!(self, Self::DateTime | Self::Date | Self::Time)
    }

    /// Check if literals of this datatype can be ordered
    pub fn is_comparable(&self) -> bool {
        self.is_numeric() || self.is_temporal() || matches!(self, Self::String | Self::Boolean)
    }

    /// Position in the numeric widening order
    ///
    /// byte < short < int < long < integer < decimal < float < double
    pub fn numeric_rank(&self) -> Option<u8> {
        match self {
            Self::Byte => Some(0),
            Self::Short => Some(1),
            Self::Int => Some(2),
            Self::Long => Some(3),
            Self::Integer => Some(4),
            Self::Decimal => Some(5),
            Self::Float => Some(6),
            Self::Double => Some(7),
            _ => None,
        }
    }

    /// Inclusive value range of bounded integral datatypes
    pub fn integral_bounds(&self) -> Option<(i64, i64)> {
        match self {
            Self::Byte => Some((i8::MIN as i64, i8::MAX as i64)),
            Self::Short => Some((i16::MIN as i64, i16::MAX as i64)),
            Self::Int => Some((i32::MIN as i64, i32::MAX as i64)),
            Self::Long => Some((i64::MIN, i64::MAX)),
            _ => None,
        }
    }

    /// The next wider numeric datatype, if any
    pub fn wider(&self) -> Option<Self> {
        match self {
            Self::Byte => Some(Self::Short),
            Self::Short => Some(Self::Int),
            Self::Int => Some(Self::Long),
            Self::Long => Some(Self::Integer),
            Self::Integer => Some(Self::Decimal),
            Self::Decimal => Some(Self::Float),
            Self::Float => Some(Self::Double),
            _ => None,
        }
    }
}

impl fmt::Display for Datatype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.local_name() {
            Some(name) => write!(f, "xsd:{}", name),
            None => write!(f, "<{}>", self.iri()),
        }
    }
}

impl FromStr for Datatype {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(TypeError::UnknownDatatype { name: s.to_string() });
        }

        let trimmed = s.strip_prefix('<').and_then(|s| s.strip_suffix('>')).unwrap_or(s);

        if let Some(local) = trimmed.strip_prefix("xsd:") {
            return Self::from_local_name(local)
                .ok_or_else(|| TypeError::UnknownDatatype { name: s.to_string() });
        }

        if let Some(local) = trimmed.strip_prefix(XSD_NAMESPACE) {
            return Ok(Self::from_local_name(local).unwrap_or_else(|| Self::Other(trimmed.to_string())));
        }

        if trimmed.contains(':') {
            Ok(Self::Other(trimmed.to_string()))
        } else {
            Err(TypeError::UnknownDatatype { name: s.to_string() })
        }
    }
}

impl From<Datatype> for String {
    fn from(datatype: Datatype) -> Self {
        datatype.to_string()
    }
}

impl TryFrom<String> for Datatype {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
