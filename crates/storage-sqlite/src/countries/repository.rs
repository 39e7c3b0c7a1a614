use atlas_core::countries::{Country, CountryRepositoryTrait, MergedCountry, ReplaceOutcome};
use atlas_core::filters::{FilterQuery, FilterValue};
use atlas_core::Result;

use super::model::{CountryDB, NewCountryDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::countries;
use crate::utils::chunk_for_insert;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use diesel::prelude::*;
use diesel::sql_types::{Double, Text};
use diesel::sqlite::Sqlite;
use log::debug;
use std::sync::Arc;

const SELECT_COUNTRIES: &str = "SELECT id, name, capital, region, population, flag, currency, \
     rate, estimated_gdp, last_refreshed_at, updated_at FROM countries";

#[derive(Clone)]
pub struct CountryRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl CountryRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl CountryRepositoryTrait for CountryRepository {
    async fn replace_all(&self, new_countries: Vec<MergedCountry>) -> Result<ReplaceOutcome> {
        debug!("Replacing countries table with {} rows", new_countries.len());

        self.writer
            .exec(move |conn| {
                // Stamped on the writer so commit order and stamp order agree.
                let refreshed_at = Utc::now();
                let stamp = refreshed_at.naive_utc();
                let rows: Vec<NewCountryDB> = new_countries
                    .into_iter()
                    .map(|country| NewCountryDB::from_merged(country, stamp))
                    .collect();

                diesel::delete(countries::table).execute(conn).into_core()?;

                let mut written = 0;
                for chunk in chunk_for_insert(&rows) {
                    written += diesel::insert_into(countries::table)
                        .values(chunk)
                        .execute(conn)
                        .into_core()?;
                }
                Ok(ReplaceOutcome {
                    rows: written,
                    refreshed_at,
                })
            })
            .await
    }

    fn query(&self, filter: &FilterQuery) -> Result<Vec<Country>> {
        let mut conn = get_connection(&self.pool)?;

        let sql = format!(
            "{} WHERE {} ORDER BY name ASC",
            SELECT_COUNTRIES,
            filter.predicate()
        );
        let mut query_builder = diesel::sql_query(sql).into_boxed::<Sqlite>();
        for param in filter.params() {
            query_builder = match param {
                FilterValue::Number(n) => query_builder.bind::<Double, _>(*n),
                FilterValue::Text(t) => query_builder.bind::<Text, _>(t.clone()),
            };
        }

        let rows: Vec<CountryDB> = query_builder.load(&mut conn).into_core()?;
        Ok(rows.into_iter().map(Country::from).collect())
    }

    fn get_by_name(&self, name: &str) -> Result<Option<Country>> {
        Ok(self.query(&FilterQuery::by_name(name))?.into_iter().next())
    }

    async fn delete_by_name(&self, name: &str) -> Result<usize> {
        let name = name.to_string();
        self.writer
            .exec(move |conn| {
                diesel::delete(countries::table.filter(countries::name.eq(name)))
                    .execute(conn)
                    .into_core()
            })
            .await
    }

    fn count(&self) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        countries::table
            .count()
            .get_result::<i64>(&mut conn)
            .into_core()
    }

    fn latest_refresh(&self) -> Result<Option<DateTime<Utc>>> {
        let mut conn = get_connection(&self.pool)?;
        let latest: Option<NaiveDateTime> = countries::table
            .select(diesel::dsl::max(countries::last_refreshed_at))
            .get_result(&mut conn)
            .into_core()?;
        Ok(latest.map(|naive| Utc.from_utc_datetime(&naive)))
    }
}
