//! Countries module - domain models, pipeline steps, services, and traits.

mod countries_model;
mod countries_service;
mod countries_traits;
mod merger;
mod normalizer;
mod refresh_state;


pub use countries_model::{
    Country, CountryStatus, MergedCountry, NormalizedCountry, RefreshSummary, ReplaceOutcome,
};
pub use countries_service::CountryService;
pub use countries_traits::{CountryRepositoryTrait, CountryServiceTrait};
pub use merger::{estimate_gdp, merge_countries, GdpMultiplier};
pub use normalizer::normalize_countries;
pub use refresh_state::RefreshState;
