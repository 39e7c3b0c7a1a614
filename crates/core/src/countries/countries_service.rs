use super::countries_model::{Country, CountryStatus, NormalizedCountry, RefreshSummary};
use super::countries_traits::{CountryRepositoryTrait, CountryServiceTrait};
use super::merger::{merge_countries, GdpMultiplier};
use super::normalizer::normalize_countries;
use super::refresh_state::RefreshState;
use crate::errors::{Error, Result};
use crate::filters::FilterQueryBuilder;
use async_trait::async_trait;
use atlas_sources::{CountrySource, RateSource};
use log::{debug, error, info, warn};
use std::collections::HashSet;
use std::sync::Arc;

/// Runs the refresh pipeline and serves reads over the stored countries.
///
/// Owns the [`RefreshState`]: only a refresh that has committed its rows
/// updates it, and [`CountryServiceTrait::get_status`] reads it.
#[derive(Clone)]
pub struct CountryService {
    repository: Arc<dyn CountryRepositoryTrait>,
    country_source: Arc<dyn CountrySource>,
    rate_source: Arc<dyn RateSource>,
    refresh_state: Arc<RefreshState>,
    fixed_multiplier: Option<GdpMultiplier>,
}

impl CountryService {
    pub fn new(
        repository: Arc<dyn CountryRepositoryTrait>,
        country_source: Arc<dyn CountrySource>,
        rate_source: Arc<dyn RateSource>,
    ) -> Self {
        Self {
            repository,
            country_source,
            rate_source,
            refresh_state: Arc::new(RefreshState::default()),
            fixed_multiplier: None,
        }
    }

    /// Use the same multiplier for every refresh instead of drawing one.
    pub fn with_fixed_multiplier(mut self, multiplier: GdpMultiplier) -> Self {
        self.fixed_multiplier = Some(multiplier);
        self
    }

    pub fn refresh_state(&self) -> Arc<RefreshState> {
        self.refresh_state.clone()
    }

    fn next_multiplier(&self) -> GdpMultiplier {
        self.fixed_multiplier.unwrap_or_else(GdpMultiplier::draw)
    }
}

/// Keep the first entry for each name so the store holds one row per country.
fn dedupe_by_name(countries: Vec<NormalizedCountry>) -> Vec<NormalizedCountry> {
    let mut seen = HashSet::with_capacity(countries.len());
    countries
        .into_iter()
        .filter(|country| {
            let first = seen.insert(country.name.clone());
            if !first {
                warn!("Dropping duplicate country entry '{}'", country.name);
            }
            first
        })
        .collect()
}

#[async_trait]
impl CountryServiceTrait for CountryService {
    fn initialize(&self) -> Result<()> {
        if let Some(at) = self.repository.latest_refresh()? {
            debug!("Restoring last refresh time {}", at);
            self.refresh_state.record(at);
        }
        Ok(())
    }

    async fn refresh(&self) -> Result<RefreshSummary> {
        info!(
            "Refreshing countries from {} and {}",
            self.country_source.id(),
            self.rate_source.id()
        );

        let (raw_countries, rates) = tokio::try_join!(
            self.country_source.fetch_countries(),
            self.rate_source.fetch_rates()
        )
        .map_err(|e| {
            error!("Refresh aborted: {}", e);
            Error::from(e)
        })?;

        let normalized = dedupe_by_name(normalize_countries(raw_countries));
        let multiplier = self.next_multiplier();
        let merged = merge_countries(&normalized, &rates, multiplier);
        let matched_rates = merged.iter().filter(|c| c.rate.is_some()).count();
        debug!(
            "Merged {} countries with {} rates ({} matched, multiplier {})",
            merged.len(),
            rates.len(),
            matched_rates,
            multiplier
        );

        let outcome = self.repository.replace_all(merged).await.map_err(|e| {
            error!("Failed to store refreshed countries: {}", e);
            e
        })?;
        self.refresh_state.record(outcome.refreshed_at);

        info!("Stored {} countries at {}", outcome.rows, outcome.refreshed_at);
        Ok(RefreshSummary {
            countries: outcome.rows,
            matched_rates,
            multiplier: multiplier.value(),
            last_refreshed_at: outcome.refreshed_at,
        })
    }

    fn search_countries(&self, filters: &[(String, String)]) -> Result<Vec<Country>> {
        let query = FilterQueryBuilder::build(filters.iter().map(|(k, v)| (k, v)))?;
        self.repository.query(&query)
    }

    fn get_country(&self, name: &str) -> Result<Country> {
        self.repository
            .get_by_name(name)?
            .ok_or_else(|| Error::NotFound(format!("country '{}'", name)))
    }

    async fn delete_country(&self, name: &str) -> Result<usize> {
        let deleted = self.repository.delete_by_name(name).await?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("country '{}'", name)));
        }
        info!("Deleted {} row(s) for country '{}'", deleted, name);
        Ok(deleted)
    }

    fn get_status(&self) -> Result<CountryStatus> {
        Ok(CountryStatus {
            total_countries: self.repository.count()?,
            last_refreshed_at: self.refresh_state.last_refreshed_at(),
        })
    }
}
