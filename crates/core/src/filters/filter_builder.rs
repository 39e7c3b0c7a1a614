use log::debug;

use super::filter_errors::FilterError;
use super::filter_model::{Comparison, CountryColumn, FilterClause, FilterValue};

/// Predicate that matches every row.
const MATCH_ALL: &str = "1=1";

/// A validated, parametrized predicate over the countries table.
///
/// `predicate()` renders `?` placeholders only; the values to bind come from
/// `params()` in the same order the clauses were added.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterQuery {
    clauses: Vec<FilterClause>,
}

impl FilterQuery {
    /// The unconstrained query.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn clauses(&self) -> &[FilterClause] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// SQL text for a `WHERE` clause, e.g. `name LIKE ? AND population >= ?`.
    pub fn predicate(&self) -> String {
        if self.clauses.is_empty() {
            return MATCH_ALL.to_string();
        }
        self.clauses
            .iter()
            .map(FilterClause::to_sql)
            .collect::<Vec<_>>()
            .join(" AND ")
    }

    /// Bound values in placeholder order.
    pub fn params(&self) -> impl Iterator<Item = &FilterValue> {
        self.clauses.iter().map(|clause| &clause.value)
    }

    /// Exact name match, used by single-country lookups.
    pub fn by_name(name: &str) -> Self {
        Self {
            clauses: vec![FilterClause {
                column: CountryColumn::Name,
                comparison: Comparison::Eq,
                value: FilterValue::Text(name.to_string()),
            }],
        }
    }
}

/// Translates request `field=value` pairs into a [`FilterQuery`].
///
/// - numeric fields (`population`, `rate`, `estimated_gdp`) accept an optional
///   `>=`, `<=`, `>` or `<` prefix, defaulting to `=`
/// - text fields become a `LIKE '%value%'` match
/// - any other field name is rejected before a clause is built
pub struct FilterQueryBuilder;

impl FilterQueryBuilder {
    pub fn build<I, K, V>(filters: I) -> Result<FilterQuery, FilterError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let clauses = filters
            .into_iter()
            .map(|(field, raw)| Self::build_clause(field.as_ref(), raw.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        debug!("Built filter query with {} clause(s)", clauses.len());
        Ok(FilterQuery { clauses })
    }

    fn build_clause(field: &str, raw: &str) -> Result<FilterClause, FilterError> {
        let column: CountryColumn = field.parse()?;

        if column.is_numeric() {
            let (comparison, rest) = Comparison::split_prefix(raw.trim());
            let number = rest
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .ok_or_else(|| FilterError::InvalidFilterValue {
                    field: field.to_string(),
                    value: raw.to_string(),
                })?;
            Ok(FilterClause {
                column,
                comparison,
                value: FilterValue::Number(number),
            })
        } else {
            Ok(FilterClause {
                column,
                comparison: Comparison::Like,
                value: FilterValue::Text(format!("%{}%", raw)),
            })
        }
    }
}
