//! Report thresholds.

/// Fixed limits used by the listing reports.
///
/// The defaults are the shop's standing report definitions; they are bound
/// as query parameters rather than spliced into SQL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopConfig {
    /// Closed requests billed strictly below this amount are "low bills".
    pub low_bill_limit: i32,
    /// Customers owning strictly more cars than this are listed.
    pub fleet_min_cars: i64,
    /// Cars built strictly before this year are "old".
    pub vintage_before_year: i32,
    /// Old cars whose intake odometer is strictly below this are listed.
    pub vintage_max_odometer: i32,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            low_bill_limit: 100,
            fleet_min_cars: 20,
            vintage_before_year: 1995,
            vintage_max_odometer: 50_000,
        }
    }
}
