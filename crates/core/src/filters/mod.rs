//! Filters module - allow-listed columns and the parametrized predicate builder.

mod filter_builder;
mod filter_errors;
mod filter_model;

pub use filter_builder::{FilterQuery, FilterQueryBuilder};
pub use filter_errors::FilterError;
pub use filter_model::{Comparison, CountryColumn, FilterClause, FilterValue};
