/// Name given to a country whose source entry has no usable name
pub const UNKNOWN_COUNTRY_NAME: &str = "Unknown";

/// Decimal precision for persisted rates and GDP estimates
pub const DECIMAL_PRECISION: u32 = 10;

/// Lower bound of the per-refresh GDP multiplier
pub const GDP_MULTIPLIER_MIN: u32 = 1000;

/// Upper bound (inclusive) of the per-refresh GDP multiplier
pub const GDP_MULTIPLIER_MAX: u32 = 2000;
