use std::collections::BTreeMap;

use super::model::CustomerDataset;

// ---------------------------------------------------------------------------
// Aggregation views over the filtered subset
// ---------------------------------------------------------------------------
//
// All three reducers are pure functions of (dataset, filtered indices) and
// are only defined for a non-empty index slice; the caller branches on
// `FilterResult` before invoking them.

/// Scalar headline metrics for the KPI row.
#[derive(Debug, Clone, PartialEq)]
pub struct Kpis {
    /// Number of customers in the filtered subset.
    pub customer_count: usize,
    /// Mean Customer Lifetime Value.
    pub avg_clv: f64,
    /// Mean flight distance in kilometres.
    pub avg_flight_dist_km: f64,
    /// Mean PRR as a percentage (x100), or `None` when the dataset has no
    /// PRR column.
    pub avg_prr_pct: Option<f64>,
}

/// One bubble on the map: all customers sharing an exact
/// `(province, latitude, longitude)` triple.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoBucket {
    pub province: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Mean flight distance across the bucket.
    pub avg_flight_dist_km: f64,
    /// Summed flight volume across the bucket.
    pub total_flights: u64,
    /// Customers in the bucket.
    pub customer_count: usize,
}

/// One pie slice: customers sharing a loyalty status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoyaltyCount {
    pub status: String,
    pub count: usize,
}

/// Reduce the filtered subset to the four headline metrics.
pub fn compute_kpis(dataset: &CustomerDataset, indices: &[usize]) -> Kpis {
    let n = indices.len() as f64;
    let mut clv_sum = 0.0;
    let mut dist_sum = 0.0;
    let mut prr_sum = 0.0;

    for &i in indices {
        let c = &dataset.customers[i];
        clv_sum += c.clv;
        dist_sum += c.avg_flight_dist_km;
        prr_sum += c.prr.unwrap_or(0.0);
    }

    Kpis {
        customer_count: indices.len(),
        avg_clv: clv_sum / n,
        avg_flight_dist_km: dist_sum / n,
        avg_prr_pct: dataset.has_prr.then(|| prr_sum / n * 100.0),
    }
}

/// Group the filtered subset by the exact `(province, latitude, longitude)`
/// triple. Coordinates are compared bit-for-bit (no tolerance or binning);
/// output order is unspecified.
pub fn geo_buckets(dataset: &CustomerDataset, indices: &[usize]) -> Vec<GeoBucket> {
    // (distance sum, flight sum, count) per group
    let mut groups: BTreeMap<(String, u64, u64), (f64, u64, usize)> = BTreeMap::new();

    for &i in indices {
        let c = &dataset.customers[i];
        let key = (
            c.province.clone(),
            c.latitude.to_bits(),
            c.longitude.to_bits(),
        );
        let entry = groups.entry(key).or_insert((0.0, 0, 0));
        entry.0 += c.avg_flight_dist_km;
        entry.1 += c.total_flights;
        entry.2 += 1;
    }

    groups
        .into_iter()
        .map(|((province, lat_bits, lon_bits), (dist_sum, flights, count))| GeoBucket {
            province,
            latitude: f64::from_bits(lat_bits),
            longitude: f64::from_bits(lon_bits),
            avg_flight_dist_km: dist_sum / count as f64,
            total_flights: flights,
            customer_count: count,
        })
        .collect()
}

/// Count the filtered subset per loyalty status. Output order is unspecified.
pub fn loyalty_counts(dataset: &CustomerDataset, indices: &[usize]) -> Vec<LoyaltyCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for &i in indices {
        *counts
            .entry(dataset.customers[i].loyalty_status.as_str())
            .or_default() += 1;
    }

    counts
        .into_iter()
        .map(|(status, count)| LoyaltyCount {
            status: status.to_string(),
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{apply_filters, FilterResult, FilterSelection};
    use crate::data::model::Customer;
    use crate::data::test_support::customer;

    fn geo_customer(province: &str, lat: f64, lon: f64, dist: f64, flights: u64) -> Customer {
        Customer {
            latitude: lat,
            longitude: lon,
            avg_flight_dist_km: dist,
            total_flights: flights,
            ..customer(500.0, province, "Bachelor", "Gold")
        }
    }

    #[test]
    fn kpis_are_plain_arithmetic_means() {
        let ds = CustomerDataset::from_customers(
            vec![
                Customer {
                    clv: 100.0,
                    avg_flight_dist_km: 1000.0,
                    prr: Some(0.2),
                    ..customer(0.0, "Ontario", "Bachelor", "Gold")
                },
                Customer {
                    clv: 300.0,
                    avg_flight_dist_km: 3000.0,
                    prr: Some(0.4),
                    ..customer(0.0, "Quebec", "College", "Silver")
                },
            ],
            true,
        );

        let kpis = compute_kpis(&ds, &[0, 1]);
        assert_eq!(kpis.customer_count, 2);
        assert_eq!(kpis.avg_clv, 200.0);
        assert_eq!(kpis.avg_flight_dist_km, 2000.0);
        // mean PRR 0.3 scaled x100
        let prr = kpis.avg_prr_pct.unwrap();
        assert!((prr - 30.0).abs() < 1e-9);
    }

    #[test]
    fn missing_prr_column_degrades_to_unavailable() {
        let ds = CustomerDataset::from_customers(
            vec![customer(100.0, "Ontario", "Bachelor", "Gold")],
            false,
        );

        let kpis = compute_kpis(&ds, &[0]);
        assert_eq!(kpis.avg_prr_pct, None);
    }

    #[test]
    fn geo_buckets_group_by_exact_triple() {
        let ds = CustomerDataset::from_customers(
            vec![
                geo_customer("Ontario", 43.7, -79.4, 1000.0, 5),
                geo_customer("Ontario", 43.7, -79.4, 3000.0, 7),
                geo_customer("Quebec", 46.8, -71.2, 500.0, 2),
                // Same province, different coordinates: its own bucket.
                geo_customer("Ontario", 45.4, -75.7, 800.0, 1),
            ],
            false,
        );

        let mut buckets = geo_buckets(&ds, &[0, 1, 2, 3]);
        buckets.sort_by(|a, b| {
            (&a.province, a.latitude.to_bits()).cmp(&(&b.province, b.latitude.to_bits()))
        });

        assert_eq!(buckets.len(), 3);

        let toronto = &buckets[0];
        assert_eq!(toronto.province, "Ontario");
        assert_eq!(toronto.customer_count, 2);
        assert_eq!(toronto.avg_flight_dist_km, 2000.0);
        assert_eq!(toronto.total_flights, 12);

        // Counts across buckets account for every filtered record.
        let total: usize = buckets.iter().map(|b| b.customer_count).sum();
        assert_eq!(total, 4);
    }

    #[test]
    fn loyalty_counts_sum_to_filtered_length() {
        let ds = CustomerDataset::from_customers(
            vec![
                customer(100.0, "Ontario", "Bachelor", "Gold"),
                customer(200.0, "Quebec", "College", "Silver"),
                customer(300.0, "Ontario", "Master", "Gold"),
            ],
            false,
        );

        let sel = FilterSelection::for_dataset(&ds);
        let indices = match apply_filters(&ds, &sel) {
            FilterResult::NonEmpty(idx) => idx,
            FilterResult::Empty => panic!("defaults admit everything"),
        };

        let counts = loyalty_counts(&ds, &indices);
        assert_eq!(
            counts,
            vec![
                LoyaltyCount {
                    status: "Gold".to_string(),
                    count: 2
                },
                LoyaltyCount {
                    status: "Silver".to_string(),
                    count: 1
                },
            ]
        );

        let total: usize = counts.iter().map(|c| c.count).sum();
        assert_eq!(total, indices.len());
    }
}
