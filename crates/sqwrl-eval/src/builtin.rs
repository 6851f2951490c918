//! SQWRL built-in names
//!
//! Maps built-in names to the closed set of operators the engine implements.
//! Aliases (`first`, `last` and friends) are separate names that dispatch to
//! the same operator.

use std::fmt;
use std::str::FromStr;

use crate::error::SqwrlError;

/// Namespace of the SQWRL built-in library
pub const NAMESPACE: &str = "http://sqwrl.stanford.edu/ontologies/built-ins/3.4/sqwrl.owl#";

/// Conventional prefix for the SQWRL namespace
pub const PREFIX: &str = "sqwrl";

/// Every SQWRL built-in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SqwrlBuiltIn {
    // === Result construction ===
    Select,
    SelectDistinct,
    Count,
    CountDistinct,
    ColumnNames,
    OrderBy,
    OrderByDescending,
    Limit,

    // === Collection construction ===
    MakeSet,
    MakeBag,
    GroupBy,

    // === Single collection predicates ===
    IsEmpty,
    NotEmpty,
    Size,
    Element,
    NotElement,

    // === Aggregates ===
    Min,
    Max,
    Sum,
    Avg,
    Median,

    // === Order statistics ===
    Nth,
    Greatest,
    Least,
    NthGreatest,
    GreatestN,
    LeastN,
    NotGreatest,
    NotLeast,
    NotNth,
    NotNthGreatest,
    NotGreatestN,
    NotLeastN,
    NthSlice,
    NthGreatestSlice,
    NotNthSlice,
    NotNthGreatestSlice,

    // === Order statistic aliases ===
    First,
    Last,
    FirstN,
    LastN,
    NotFirst,
    NotLast,
    NotFirstN,
    NotLastN,
    NthLast,
    NotNthLast,
    NthLastSlice,
    NotNthLastSlice,

    // === Two collection operators ===
    Intersects,
    NotIntersects,
    Contains,
    NotContains,
    Equal,
    NotEqual,
    Union,
    Intersection,
    Difference,
    Append,
}

impl SqwrlBuiltIn {
    /// All built-ins in declaration order
    pub const ALL: [SqwrlBuiltIn; 59] = [
        Self::Select,
        Self::SelectDistinct,
        Self::Count,
        Self::CountDistinct,
        Self::ColumnNames,
        Self::OrderBy,
        Self::OrderByDescending,
        Self::Limit,
        Self::MakeSet,
        Self::MakeBag,
        Self::GroupBy,
        Self::IsEmpty,
        Self::NotEmpty,
        Self::Size,
        Self::Element,
        Self::NotElement,
        Self::Min,
        Self::Max,
        Self::Sum,
        Self::Avg,
        Self::Median,
        Self::Nth,
        Self::Greatest,
        Self::Least,
        Self::NthGreatest,
        Self::GreatestN,
        Self::LeastN,
        Self::NotGreatest,
        Self::NotLeast,
        Self::NotNth,
        Self::NotNthGreatest,
        Self::NotGreatestN,
        Self::NotLeastN,
        Self::NthSlice,
        Self::NthGreatestSlice,
        Self::NotNthSlice,
        Self::NotNthGreatestSlice,
        Self::First,
        Self::Last,
        Self::FirstN,
        Self::LastN,
        Self::NotFirst,
        Self::NotLast,
        Self::NotFirstN,
        Self::NotLastN,
        Self::NthLast,
        Self::NotNthLast,
        Self::NthLastSlice,
        Self::NotNthLastSlice,
        Self::Intersects,
        Self::NotIntersects,
        Self::Contains,
        Self::NotContains,
        Self::Equal,
        Self::NotEqual,
        Self::Union,
        Self::Intersection,
        Self::Difference,
        Self::Append,
    ];

    /// Local name of the built-in
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::SelectDistinct => "selectDistinct",
            Self::Count => "count",
            Self::CountDistinct => "countDistinct",
            Self::ColumnNames => "columnNames",
            Self::OrderBy => "orderBy",
            Self::OrderByDescending => "orderByDescending",
            Self::Limit => "limit",
            Self::MakeSet => "makeSet",
            Self::MakeBag => "makeBag",
            Self::GroupBy => "groupBy",
            Self::IsEmpty => "isEmpty",
            Self::NotEmpty => "notEmpty",
            Self::Size => "size",
            Self::Element => "element",
            Self::NotElement => "notElement",
            Self::Min => "min",
            Self::Max => "max",
            Self::Sum => "sum",
            Self::Avg => "avg",
            Self::Median => "median",
            Self::Nth => "nth",
            Self::Greatest => "greatest",
            Self::Least => "least",
            Self::NthGreatest => "nthGreatest",
            Self::GreatestN => "greatestN",
            Self::LeastN => "leastN",
            Self::NotGreatest => "notGreatest",
            Self::NotLeast => "notLeast",
            Self::NotNth => "notNth",
            Self::NotNthGreatest => "notNthGreatest",
            Self::NotGreatestN => "notGreatestN",
            Self::NotLeastN => "notLeastN",
            Self::NthSlice => "nthSlice",
            Self::NthGreatestSlice => "nthGreatestSlice",
            Self::NotNthSlice => "notNthSlice",
            Self::NotNthGreatestSlice => "notNthGreatestSlice",
            Self::First => "first",
            Self::Last => "last",
            Self::FirstN => "firstN",
            Self::LastN => "lastN",
            Self::NotFirst => "notFirst",
            Self::NotLast => "notLast",
            Self::NotFirstN => "notFirstN",
            Self::NotLastN => "notLastN",
            Self::NthLast => "nthLast",
            Self::NotNthLast => "notNthLast",
            Self::NthLastSlice => "nthLastSlice",
            Self::NotNthLastSlice => "notNthLastSlice",
            Self::Intersects => "intersects",
            Self::NotIntersects => "notIntersects",
            Self::Contains => "contains",
            Self::NotContains => "notContains",
            Self::Equal => "equal",
            Self::NotEqual => "notEqual",
            Self::Union => "union",
            Self::Intersection => "intersection",
            Self::Difference => "difference",
            Self::Append => "append",
        }
    }

    /// Full IRI of the built-in
    pub fn iri(&self) -> String {
        format!("{}{}", NAMESPACE, self.as_str())
    }

    /// The operator an alias stands for
    pub fn canonical(self) -> Self {
        match self {
            Self::First => Self::Least,
            Self::Last => Self::Greatest,
            Self::FirstN => Self::LeastN,
            Self::LastN => Self::GreatestN,
            Self::NotFirst => Self::NotLeast,
            Self::NotLast => Self::NotGreatest,
            Self::NotFirstN => Self::NotLeastN,
            Self::NotLastN => Self::NotGreatestN,
            Self::NthLast => Self::NthGreatest,
            Self::NotNthLast => Self::NotNthGreatest,
            Self::NthLastSlice => Self::NthGreatestSlice,
            Self::NotNthLastSlice => Self::NotNthGreatestSlice,
            other => other,
        }
    }

    /// Check if the name is an alias for another built-in
    pub fn is_alias(&self) -> bool {
        self.canonical() != *self
    }

    /// Short description of when the built-in may be used
    pub fn phase_usage(&self) -> &'static str {
        match self.canonical() {
            Self::Select
            | Self::SelectDistinct
            | Self::Count
            | Self::CountDistinct
            | Self::ColumnNames
            | Self::OrderBy
            | Self::OrderByDescending
            | Self::Limit => "consequent",
            Self::Min | Self::Max | Self::Sum | Self::Avg | Self::Median => "both",
            Self::Nth
            | Self::Greatest
            | Self::Least
            | Self::NthGreatest
            | Self::GreatestN
            | Self::LeastN
            | Self::NotGreatest
            | Self::NotLeast
            | Self::NotNth
            | Self::NotNthGreatest
            | Self::NotGreatestN
            | Self::NotLeastN
            | Self::NthSlice
            | Self::NthGreatestSlice
            | Self::NotNthSlice
            | Self::NotNthGreatestSlice => "antecedent (ignored in consequent)",
            _ => "antecedent",
        }
    }
}

impl fmt::Display for SqwrlBuiltIn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", PREFIX, self.as_str())
    }
}

impl FromStr for SqwrlBuiltIn {
    type Err = SqwrlError;

    /// Accepts bare names, `sqwrl:` prefixed names and full IRIs
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let local = s
            .strip_prefix(NAMESPACE)
            .or_else(|| s.strip_prefix("sqwrl:"))
            .unwrap_or(s);

        Self::ALL
            .iter()
            .copied()
            .find(|builtin| builtin.as_str() == local)
            .ok_or_else(|| SqwrlError::UnknownBuiltIn { name: s.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for builtin in SqwrlBuiltIn::ALL {
            assert_eq!(builtin.as_str().parse::<SqwrlBuiltIn>().unwrap(), builtin);
            assert_eq!(builtin.iri().parse::<SqwrlBuiltIn>().unwrap(), builtin);
        }
    }

    #[test]
    fn aliases_resolve() {
        assert_eq!(SqwrlBuiltIn::Last.canonical(), SqwrlBuiltIn::Greatest);
        assert_eq!(SqwrlBuiltIn::NotNthLastSlice.canonical(), SqwrlBuiltIn::NotNthGreatestSlice);
        assert!(!SqwrlBuiltIn::Union.is_alias());
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert!("sqwrl:mode".parse::<SqwrlBuiltIn>().is_err());
    }
}
