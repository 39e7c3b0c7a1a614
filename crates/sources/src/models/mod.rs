//! Raw payload models as returned by the upstream sources.

mod country;
mod rates;

pub use country::{RawCountry, RawCurrency};
pub use rates::RateTable;
