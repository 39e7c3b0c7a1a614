//! Country domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A country entry after defaulting, before the currency join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedCountry {
    pub name: String,
    pub capital: String,
    pub region: String,
    pub population: i64,
    pub flag: String,
    pub currency: Option<String>,
}

/// A normalized country joined with its rate and GDP estimate, ready to be
/// written. The refresh timestamp is assigned by the store on write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedCountry {
    pub name: String,
    pub capital: String,
    pub region: String,
    pub population: i64,
    pub flag: String,
    pub currency: Option<String>,
    pub rate: Option<Decimal>,
    pub estimated_gdp: Option<Decimal>,
}

/// A persisted country row as returned by the read API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub id: i32,
    pub name: String,
    pub capital: String,
    pub region: String,
    pub population: i64,
    pub flag: String,
    pub currency: Option<String>,
    pub rate: Option<Decimal>,
    pub estimated_gdp: Option<Decimal>,
    pub last_refreshed_at: DateTime<Utc>,
}

/// Rows written by one committed replace and the time stamped on them.
///
/// The stamp is taken inside the write transaction, so replaces that commit
/// later always carry a later `refreshed_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplaceOutcome {
    pub rows: usize,
    pub refreshed_at: DateTime<Utc>,
}

/// Outcome of one successful refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshSummary {
    /// Rows written to the store
    pub countries: usize,
    /// Rows whose currency matched a rate
    pub matched_rates: usize,
    /// Multiplier used for every GDP estimate in this refresh
    pub multiplier: u32,
    pub last_refreshed_at: DateTime<Utc>,
}

/// Row count and last refresh time reported by the status endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryStatus {
    pub total_countries: i64,
    pub last_refreshed_at: Option<DateTime<Utc>>,
}
