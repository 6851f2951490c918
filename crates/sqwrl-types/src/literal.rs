//! Literal values with an XML Schema datatype
//!
//! Literals hold a parsed value alongside their datatype. All numeric datatypes
//! share the `Decimal` value space so that values of different numeric types
//! order naturally against each other.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::datatype::Datatype;
use crate::error::{TypeError, TypeResult};

/// Parsed value of a literal
///
/// Variant order is the cross-kind sort order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum LiteralValue {
    Boolean(bool),
    Numeric(Decimal),
    Text(String),
    DateTime(NaiveDateTime),
    Date(NaiveDate),
    Time(NaiveTime),
    /// Durations, URIs and foreign datatypes, kept as written
    Lexical(String),
}

/// A literal argument
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Literal {
    value: LiteralValue,
    datatype: Datatype,
}

impl Literal {
    /// Parse a lexical form for the given datatype
    pub fn parse(lexical: &str, datatype: Datatype) -> TypeResult<Self> {
        let value = match &datatype {
            Datatype::Boolean => match lexical.trim() {
                "true" | "1" => LiteralValue::Boolean(true),
                "false" | "0" => LiteralValue::Boolean(false),
                _ => return Err(TypeError::invalid_lexical(lexical, &datatype)),
            },
            dt if dt.is_integral() => {
                let value = Decimal::from_str(lexical.trim())
                    .map_err(|_| TypeError::invalid_lexical(lexical, &datatype))?;
                if !value.fract().is_zero() {
                    return Err(TypeError::invalid_lexical(lexical, &datatype));
                }
                check_integral_range(value, dt)?;
                LiteralValue::Numeric(value.trunc())
            }
            Datatype::Decimal | Datatype::Float | Datatype::Double => {
                LiteralValue::Numeric(parse_decimal(lexical, &datatype)?)
            }
            Datatype::String => LiteralValue::Text(lexical.to_string()),
            Datatype::DateTime => LiteralValue::DateTime(parse_datetime(lexical, &datatype)?),
            Datatype::Date => LiteralValue::Date(
                NaiveDate::parse_from_str(lexical.trim(), "%Y-%m-%d")
                    .map_err(|_| TypeError::invalid_lexical(lexical, &datatype))?,
            ),
            Datatype::Time => LiteralValue::Time(
                NaiveTime::parse_from_str(lexical.trim(), "%H:%M:%S%.f")
                    .map_err(|_| TypeError::invalid_lexical(lexical, &datatype))?,
            ),
            Datatype::Duration | Datatype::AnyUri | Datatype::Other(_) => {
                LiteralValue::Lexical(lexical.to_string())
            }
            // Integral datatypes are handled by the guard above
            _ => return Err(TypeError::invalid_lexical(lexical, &datatype)),
        };

        Ok(Self { value, datatype })
    }

    /// Create a numeric literal, checking the value fits the datatype
    pub fn numeric(value: Decimal, datatype: Datatype) -> TypeResult<Self> {
        if !datatype.is_numeric() {
            return Err(TypeError::invalid_lexical(value.to_string(), &datatype));
        }
        if datatype.is_integral() {
            if !value.fract().is_zero() {
                return Err(TypeError::out_of_range(value, &datatype));
            }
            check_integral_range(value, &datatype)?;
        }
        Ok(Self {
            value: LiteralValue::Numeric(value.normalize()),
            datatype,
        })
    }

    /// Create an xsd:boolean literal
    pub fn boolean(value: bool) -> Self {
        Self {
            value: LiteralValue::Boolean(value),
            datatype: Datatype::Boolean,
        }
    }

    /// Create an xsd:int literal
    pub fn int(value: i32) -> Self {
        Self {
            value: LiteralValue::Numeric(Decimal::from(value)),
            datatype: Datatype::Int,
        }
    }

    /// Create an xsd:long literal
    pub fn long(value: i64) -> Self {
        Self {
            value: LiteralValue::Numeric(Decimal::from(value)),
            datatype: Datatype::Long,
        }
    }

    /// Create an xsd:integer literal
    pub fn integer(value: i64) -> Self {
        Self {
            value: LiteralValue::Numeric(Decimal::from(value)),
            datatype: Datatype::Integer,
        }
    }

    /// Create an xsd:decimal literal
    pub fn decimal(value: Decimal) -> Self {
        Self {
            value: LiteralValue::Numeric(value.normalize()),
            datatype: Datatype::Decimal,
        }
    }

    /// Create an xsd:double literal
    ///
    /// Fails for NaN and infinities, which have no decimal representation.
    pub fn double(value: f64) -> TypeResult<Self> {
        let decimal = Decimal::from_f64_retain(value)
            .ok_or_else(|| TypeError::invalid_lexical(value.to_string(), Datatype::Double))?;
        Ok(Self {
            value: LiteralValue::Numeric(decimal.normalize()),
            datatype: Datatype::Double,
        })
    }

    /// Create an xsd:string literal
    pub fn string(value: impl Into<String>) -> Self {
        Self {
            value: LiteralValue::Text(value.into()),
            datatype: Datatype::String,
        }
    }

    /// Get the datatype
    pub fn datatype(&self) -> &Datatype {
        &self.datatype
    }

    /// Get the parsed value
    pub fn value(&self) -> &LiteralValue {
        &self.value
    }

    /// Check if the literal is numeric
    pub fn is_numeric(&self) -> bool {
        self.datatype.is_numeric()
    }

    /// Check if the literal can take part in ordering
    pub fn is_comparable(&self) -> bool {
        self.datatype.is_comparable()
    }

    /// Try to get the numeric value
    pub fn as_decimal(&self) -> Option<Decimal> {
        match &self.value {
            LiteralValue::Numeric(d) => Some(*d),
            _ => None,
        }
    }

    /// Try to get the numeric value as a machine integer
    pub fn as_i64(&self) -> Option<i64> {
        self.as_decimal()
            .filter(|d| d.fract().is_zero())
            .and_then(|d| d.to_i64())
    }

    /// Try to get the string value
    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            LiteralValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the boolean value
    pub fn as_bool(&self) -> Option<bool> {
        match &self.value {
            LiteralValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Canonical lexical form
    pub fn lexical_form(&self) -> String {
        match &self.value {
            LiteralValue::Boolean(b) => b.to_string(),
            LiteralValue::Numeric(d) => {
                let s = d.normalize().to_string();
                match self.datatype {
                    // Keep a decimal point on floating values
                    Datatype::Float | Datatype::Double if !s.contains('.') => format!("{}.0", s),
                    _ => s,
                }
            }
            LiteralValue::Text(s) | LiteralValue::Lexical(s) => s.clone(),
            LiteralValue::DateTime(dt) => dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string(),
            LiteralValue::Date(d) => d.format("%Y-%m-%d").to_string(),
            LiteralValue::Time(t) => t.format("%H:%M:%S%.f").to_string(),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.datatype {
            Datatype::String => write!(f, "\"{}\"", self.lexical_form()),
            _ => write!(f, "\"{}\"^^{}", self.lexical_form(), self.datatype),
        }
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Self::boolean(value)
    }
}

impl From<i32> for Literal {
    fn from(value: i32) -> Self {
        Self::int(value)
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Self::long(value)
    }
}

impl From<Decimal> for Literal {
    fn from(value: Decimal) -> Self {
        Self::decimal(value)
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Self::string(value)
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Self::string(value)
    }
}

fn check_integral_range(value: Decimal, datatype: &Datatype) -> TypeResult<()> {
    if let Some((min, max)) = datatype.integral_bounds() {
        let in_range = value
            .to_i64()
            .is_some_and(|v| v >= min && v <= max);
        if !in_range {
            return Err(TypeError::out_of_range(value, datatype));
        }
    }
    Ok(())
}

fn parse_decimal(lexical: &str, datatype: &Datatype) -> TypeResult<Decimal> {
    let trimmed = lexical.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| TypeError::invalid_lexical(lexical, datatype))
}

fn parse_datetime(lexical: &str, datatype: &Datatype) -> TypeResult<NaiveDateTime> {
    let trimmed = lexical.trim();
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| DateTime::parse_from_rfc3339(trimmed).map(|dt| dt.naive_utc()))
        .map_err(|_| TypeError::invalid_lexical(lexical, datatype))
}
