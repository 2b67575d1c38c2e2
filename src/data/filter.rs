use std::collections::BTreeSet;

use super::model::{Customer, CustomerDataset};

// ---------------------------------------------------------------------------
// Filter predicate set: CLV range + per-column category selections
// ---------------------------------------------------------------------------

/// The active filter criteria: an inclusive CLV range plus one selected-value
/// set per categorical column.
///
/// A set equal to the full domain of observed values admits everything for
/// that column; an empty set admits nothing. Values that never occur in the
/// dataset simply never match (not an error).
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSelection {
    /// Inclusive `(min, max)` bounds on Customer Lifetime Value.
    pub clv_range: (f64, f64),
    /// Selected `Province or State` values.
    pub provinces: BTreeSet<String>,
    /// Selected `Education` values.
    pub educations: BTreeSet<String>,
    /// Selected `LoyaltyStatus` values.
    pub loyalty_statuses: BTreeSet<String>,
}

impl FilterSelection {
    /// Default selection for a dataset: full CLV range, every observed value
    /// selected in each category. Under these defaults every record passes.
    pub fn for_dataset(dataset: &CustomerDataset) -> Self {
        FilterSelection {
            clv_range: dataset.clv_bounds,
            provinces: dataset.provinces.clone(),
            educations: dataset.educations.clone(),
            loyalty_statuses: dataset.loyalty_statuses.clone(),
        }
    }

    /// Whether a customer passes all active filters (logical AND, no side
    /// effects).
    pub fn admits(&self, c: &Customer) -> bool {
        c.clv >= self.clv_range.0
            && c.clv <= self.clv_range.1
            && self.provinces.contains(&c.province)
            && self.educations.contains(&c.education)
            && self.loyalty_statuses.contains(&c.loyalty_status)
    }
}

// ---------------------------------------------------------------------------
// Filter engine
// ---------------------------------------------------------------------------

/// Outcome of a filter pass.
///
/// Emptiness is a tagged variant rather than a bare empty `Vec` so callers
/// are forced to branch before feeding the aggregation views (a mean over
/// zero rows is undefined).
#[derive(Debug, Clone, PartialEq)]
pub enum FilterResult {
    /// Indices of customers passing the filters, in dataset order.
    NonEmpty(Vec<usize>),
    /// No customer matched the current selection.
    Empty,
}

/// Apply the selection to every customer. Pure and deterministic: a single
/// linear scan that preserves dataset order.
pub fn apply_filters(dataset: &CustomerDataset, selection: &FilterSelection) -> FilterResult {
    let indices: Vec<usize> = dataset
        .customers
        .iter()
        .enumerate()
        .filter(|(_, c)| selection.admits(c))
        .map(|(i, _)| i)
        .collect();

    if indices.is_empty() {
        FilterResult::Empty
    } else {
        FilterResult::NonEmpty(indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_support::customer;

    fn dataset() -> CustomerDataset {
        CustomerDataset::from_customers(
            vec![
                customer(100.0, "Ontario", "Bachelor", "Gold"),
                customer(500.0, "Quebec", "College", "Silver"),
                customer(900.0, "Ontario", "Master", "Gold"),
            ],
            false,
        )
    }

    #[test]
    fn defaults_admit_every_record() {
        let ds = dataset();
        let sel = FilterSelection::for_dataset(&ds);

        for c in &ds.customers {
            assert!(sel.admits(c));
        }
        assert_eq!(
            apply_filters(&ds, &sel),
            FilterResult::NonEmpty(vec![0, 1, 2])
        );
    }

    #[test]
    fn clv_range_is_inclusive_on_both_ends() {
        let ds = dataset();
        let mut sel = FilterSelection::for_dataset(&ds);
        sel.clv_range = (200.0, 600.0);

        // Only the CLV 500 record survives.
        assert_eq!(apply_filters(&ds, &sel), FilterResult::NonEmpty(vec![1]));

        sel.clv_range = (500.0, 500.0);
        assert_eq!(apply_filters(&ds, &sel), FilterResult::NonEmpty(vec![1]));
    }

    #[test]
    fn empty_category_set_admits_nothing() {
        let ds = dataset();
        let mut sel = FilterSelection::for_dataset(&ds);
        sel.provinces.clear();

        assert_eq!(apply_filters(&ds, &sel), FilterResult::Empty);
    }

    #[test]
    fn unknown_category_value_is_ignored_not_an_error() {
        let ds = dataset();
        let mut sel = FilterSelection::for_dataset(&ds);
        sel.provinces.insert("Atlantis".to_string());

        assert_eq!(
            apply_filters(&ds, &sel),
            FilterResult::NonEmpty(vec![0, 1, 2])
        );
    }

    #[test]
    fn zero_match_selection_yields_empty_signal() {
        let ds = dataset();
        let mut sel = FilterSelection::for_dataset(&ds);
        // Quebec-only keeps row 1; intersect with Gold-only and nothing is left.
        sel.provinces = ["Quebec".to_string()].into_iter().collect();
        sel.loyalty_statuses = ["Gold".to_string()].into_iter().collect();

        assert_eq!(apply_filters(&ds, &sel), FilterResult::Empty);
    }

    #[test]
    fn filtering_is_idempotent_and_order_preserving() {
        let ds = dataset();
        let mut sel = FilterSelection::for_dataset(&ds);
        sel.educations.remove("College");

        let first = apply_filters(&ds, &sel);
        let second = apply_filters(&ds, &sel);
        assert_eq!(first, second);
        assert_eq!(first, FilterResult::NonEmpty(vec![0, 2]));
    }

    #[test]
    fn narrowing_a_category_never_grows_the_result() {
        let ds = dataset();
        let sel = FilterSelection::for_dataset(&ds);
        let full_len = match apply_filters(&ds, &sel) {
            FilterResult::NonEmpty(idx) => idx.len(),
            FilterResult::Empty => 0,
        };

        for value in ds.educations.clone() {
            let mut narrowed = sel.clone();
            narrowed.educations.remove(&value);
            let len = match apply_filters(&ds, &narrowed) {
                FilterResult::NonEmpty(idx) => idx.len(),
                FilterResult::Empty => 0,
            };
            assert!(len <= full_len);
        }
    }
}
