use serde::Deserialize;
use serde_with::{serde_as, DefaultOnError};

/// One country entry exactly as the country catalogue returns it.
///
/// Every field is optional. A field that is present but of the wrong type
/// (a string population, a numeric capital) is read as absent instead of
/// failing the whole payload; defaulting happens later during normalization.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawCountry {
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub name: Option<String>,

    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub capital: Option<String>,

    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub region: Option<String>,

    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub population: Option<i64>,

    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub flag: Option<String>,

    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub currencies: Option<Vec<RawCurrency>>,
}

/// Currency descriptor attached to a country. Only `code` is used downstream.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawCurrency {
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub code: Option<String>,

    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub name: Option<String>,

    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub symbol: Option<String>,
}

impl RawCountry {
    /// Code of the first currency descriptor, if there is one.
    pub fn primary_currency_code(&self) -> Option<&str> {
        self.currencies
            .as_ref()
            .and_then(|currencies| currencies.first())
            .and_then(|currency| currency.code.as_deref())
    }
}
