use std::collections::BTreeSet;

// ---------------------------------------------------------------------------
// Customer – one row of the source table
// ---------------------------------------------------------------------------

/// A single customer record (one row of the source table).
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    /// Customer Lifetime Value.
    pub clv: f64,
    /// Province or state the customer lives in.
    pub province: String,
    /// Education level (categorical).
    pub education: String,
    /// Loyalty program tier (categorical).
    pub loyalty_status: String,
    /// Latitude of the customer's province centroid.
    pub latitude: f64,
    /// Longitude of the customer's province centroid.
    pub longitude: f64,
    /// Mean flight distance for this customer, in kilometres.
    pub avg_flight_dist_km: f64,
    /// Total number of flights taken.
    pub total_flights: u64,
    /// Points Redemption Rate. Present for every record or for none;
    /// see [`CustomerDataset::has_prr`].
    pub prr: Option<f64>,
}

// ---------------------------------------------------------------------------
// CustomerDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed column indices.
///
/// Built once at load time and never mutated afterwards. Everything the
/// sidebar offers as filter options (unique categorical values, the observed
/// CLV bounds) is computed here rather than re-scanned per frame.
#[derive(Debug, Clone)]
pub struct CustomerDataset {
    /// All customers (rows), in file order.
    pub customers: Vec<Customer>,
    /// Sorted unique `Province or State` values.
    pub provinces: BTreeSet<String>,
    /// Sorted unique `Education` values.
    pub educations: BTreeSet<String>,
    /// Sorted unique `LoyaltyStatus` values.
    pub loyalty_statuses: BTreeSet<String>,
    /// Observed `(min, max)` of the CLV column.
    pub clv_bounds: (f64, f64),
    /// Whether the optional `PRR` column exists in this dataset.
    /// Decided once at load; gates the fourth KPI.
    pub has_prr: bool,
}

impl CustomerDataset {
    /// Build column indices from the loaded customers.
    pub fn from_customers(customers: Vec<Customer>, has_prr: bool) -> Self {
        let mut provinces = BTreeSet::new();
        let mut educations = BTreeSet::new();
        let mut loyalty_statuses = BTreeSet::new();
        let mut clv_min = f64::INFINITY;
        let mut clv_max = f64::NEG_INFINITY;

        for c in &customers {
            provinces.insert(c.province.clone());
            educations.insert(c.education.clone());
            loyalty_statuses.insert(c.loyalty_status.clone());
            clv_min = clv_min.min(c.clv);
            clv_max = clv_max.max(c.clv);
        }

        CustomerDataset {
            customers,
            provinces,
            educations,
            loyalty_statuses,
            clv_bounds: (clv_min, clv_max),
            has_prr,
        }
    }

    /// Number of customers.
    pub fn len(&self) -> usize {
        self.customers.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_support::customer;

    #[test]
    fn indices_collect_unique_values_and_clv_bounds() {
        let ds = CustomerDataset::from_customers(
            vec![
                customer(100.0, "Ontario", "Bachelor", "Gold"),
                customer(900.0, "Quebec", "College", "Silver"),
                customer(500.0, "Ontario", "Bachelor", "Gold"),
            ],
            false,
        );

        assert_eq!(ds.len(), 3);
        assert_eq!(
            ds.provinces.iter().collect::<Vec<_>>(),
            ["Ontario", "Quebec"]
        );
        assert_eq!(
            ds.loyalty_statuses.iter().collect::<Vec<_>>(),
            ["Gold", "Silver"]
        );
        assert_eq!(ds.clv_bounds, (100.0, 900.0));
        assert!(!ds.has_prr);
    }
}
