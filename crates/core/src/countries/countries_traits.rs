use super::countries_model::{
    Country, CountryStatus, MergedCountry, RefreshSummary, ReplaceOutcome,
};
use crate::errors::Result;
use crate::filters::FilterQuery;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Trait defining the contract for country persistence.
#[async_trait]
pub trait CountryRepositoryTrait: Send + Sync {
    /// Replace the whole table with `countries`.
    ///
    /// Runs as one exclusive transaction: either every row is replaced or the
    /// previous rows stay untouched. The refresh time is taken inside that
    /// transaction and stamped on every row.
    async fn replace_all(&self, countries: Vec<MergedCountry>) -> Result<ReplaceOutcome>;

    fn query(&self, filter: &FilterQuery) -> Result<Vec<Country>>;
    fn get_by_name(&self, name: &str) -> Result<Option<Country>>;
    async fn delete_by_name(&self, name: &str) -> Result<usize>;
    fn count(&self) -> Result<i64>;
    fn latest_refresh(&self) -> Result<Option<DateTime<Utc>>>;
}

/// Trait defining the contract for country service operations.
#[async_trait]
pub trait CountryServiceTrait: Send + Sync {
    /// Seed in-memory state from the store.
    fn initialize(&self) -> Result<()>;

    /// Fetch, normalize, merge and replace the stored countries.
    async fn refresh(&self) -> Result<RefreshSummary>;

    /// List countries matching request `field=value` filters.
    fn search_countries(&self, filters: &[(String, String)]) -> Result<Vec<Country>>;

    fn get_country(&self, name: &str) -> Result<Country>;
    async fn delete_country(&self, name: &str) -> Result<usize>;
    fn get_status(&self) -> Result<CountryStatus>;
}
