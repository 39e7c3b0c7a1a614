use rust_decimal::Decimal;
use std::collections::HashMap;

/// USD-relative exchange rates keyed by ISO currency code.
///
/// Keys are unique; when the upstream payload repeats a code the last
/// occurrence is kept.
pub type RateTable = HashMap<String, Decimal>;
