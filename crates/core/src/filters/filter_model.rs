//! Filter domain models.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::filter_errors::FilterError;

/// The columns of the countries table a request may filter on.
///
/// Column identifiers that end up in SQL text come only from
/// [`CountryColumn::as_sql`], never from request input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountryColumn {
    Name,
    Capital,
    Region,
    Population,
    Flag,
    Currency,
    Rate,
    EstimatedGdp,
}

impl CountryColumn {
    pub const ALL: [CountryColumn; 8] = [
        CountryColumn::Name,
        CountryColumn::Capital,
        CountryColumn::Region,
        CountryColumn::Population,
        CountryColumn::Flag,
        CountryColumn::Currency,
        CountryColumn::Rate,
        CountryColumn::EstimatedGdp,
    ];

    pub const fn as_sql(self) -> &'static str {
        match self {
            CountryColumn::Name => "name",
            CountryColumn::Capital => "capital",
            CountryColumn::Region => "region",
            CountryColumn::Population => "population",
            CountryColumn::Flag => "flag",
            CountryColumn::Currency => "currency",
            CountryColumn::Rate => "rate",
            CountryColumn::EstimatedGdp => "estimated_gdp",
        }
    }

    /// Left-hand side of a clause on this column.
    ///
    /// `rate` and `estimated_gdp` are stored as exact decimal text, so they are
    /// cast to REAL for comparisons; integer and text columns are used as is.
    pub const fn operand(self) -> &'static str {
        match self {
            CountryColumn::Rate => "CAST(rate AS REAL)",
            CountryColumn::EstimatedGdp => "CAST(estimated_gdp AS REAL)",
            other => other.as_sql(),
        }
    }

    /// Numeric columns accept comparison operators; the rest are matched by substring.
    pub const fn is_numeric(self) -> bool {
        matches!(
            self,
            CountryColumn::Population | CountryColumn::Rate | CountryColumn::EstimatedGdp
        )
    }
}

impl fmt::Display for CountryColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl FromStr for CountryColumn {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CountryColumn::ALL
            .into_iter()
            .find(|column| column.as_sql() == s)
            .ok_or_else(|| FilterError::UnknownFilterField(s.to_string()))
    }
}

/// Comparison applied by one clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    Gt,
    Ge,
    Lt,
    Le,
    Like,
}

impl Comparison {
    pub const fn as_sql(self) -> &'static str {
        match self {
            Comparison::Eq => "=",
            Comparison::Gt => ">",
            Comparison::Ge => ">=",
            Comparison::Lt => "<",
            Comparison::Le => "<=",
            Comparison::Like => "LIKE",
        }
    }

    /// Split a leading operator off a numeric filter value.
    ///
    /// Two-character operators are tried first so `>=5` is never read as `>`
    /// followed by `=5`. No prefix means equality.
    pub fn split_prefix(raw: &str) -> (Comparison, &str) {
        const PREFIXES: [(&str, Comparison); 4] = [
            (">=", Comparison::Ge),
            ("<=", Comparison::Le),
            (">", Comparison::Gt),
            ("<", Comparison::Lt),
        ];

        PREFIXES
            .iter()
            .find_map(|(prefix, op)| raw.strip_prefix(prefix).map(|rest| (*op, rest)))
            .unwrap_or((Comparison::Eq, raw))
    }
}

/// A value bound to a `?` placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Number(f64),
    Text(String),
}

/// One `column op ?` clause with its bound value.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterClause {
    pub column: CountryColumn,
    pub comparison: Comparison,
    pub value: FilterValue,
}

impl FilterClause {
    pub fn to_sql(&self) -> String {
        format!("{} {} ?", self.column.operand(), self.comparison.as_sql())
    }
}
