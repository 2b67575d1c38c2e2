/// Data layer: core types, loading, filtering, and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → CustomerDataset
///   └──────────┘
///        │
///        ▼
///   ┌─────────────────┐
///   │ CustomerDataset  │  Vec<Customer>, column indices, PRR flag
///   └─────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  apply FilterSelection → FilterResult (tagged empty)
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  KPI / geo / loyalty reducers → view rows
///   └───────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;

#[cfg(test)]
pub(crate) mod test_support {
    use super::model::Customer;

    /// Minimal record builder for tests; geo and flight fields get fixed
    /// defaults that individual tests override as needed.
    pub(crate) fn customer(clv: f64, province: &str, education: &str, loyalty: &str) -> Customer {
        Customer {
            clv,
            province: province.to_string(),
            education: education.to_string(),
            loyalty_status: loyalty.to_string(),
            latitude: 45.0,
            longitude: -75.0,
            avg_flight_dist_km: 1000.0,
            total_flights: 10,
            prr: None,
        }
    }
}
