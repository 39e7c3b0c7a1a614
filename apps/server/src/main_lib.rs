use std::sync::Arc;

use crate::config::{Config, LogFormat};
use atlas_core::countries::{CountryService, CountryServiceTrait};
use atlas_sources::{OpenErApiSource, RestCountriesSource};
use atlas_storage_sqlite::{countries::CountryRepository, db, spawn_writer};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub country_service: Arc<dyn CountryServiceTrait + Send + Sync>,
}

pub fn init_tracing(log_format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match log_format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(false))
            .init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init(),
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = spawn_writer((*pool).clone());

    let country_repository = Arc::new(CountryRepository::new(pool.clone(), writer));
    let country_source = Arc::new(RestCountriesSource::new(
        config.countries_url.clone(),
        config.fetch_timeout,
    )?);
    let rate_source = Arc::new(OpenErApiSource::new(
        config.rates_url.clone(),
        config.fetch_timeout,
    )?);

    let mut country_service =
        CountryService::new(country_repository, country_source, rate_source);
    if let Some(multiplier) = config.gdp_multiplier {
        tracing::info!("Using fixed GDP multiplier {}", multiplier);
        country_service = country_service.with_fixed_multiplier(multiplier);
    }
    country_service.initialize()?;

    Ok(Arc::new(AppState {
        country_service: Arc::new(country_service),
    }))
}
