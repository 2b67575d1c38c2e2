use std::collections::BTreeSet;

use crate::color::CategoryColors;
use crate::data::aggregate::{
    compute_kpis, geo_buckets, loyalty_counts, GeoBucket, Kpis, LoyaltyCount,
};
use crate::data::filter::{apply_filters, FilterResult, FilterSelection};
use crate::data::model::CustomerDataset;

// ---------------------------------------------------------------------------
// Derived views and the interaction cycle
// ---------------------------------------------------------------------------

/// Everything the central panel renders, rebuilt on each filter change.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedViews {
    pub kpis: Kpis,
    pub geo: Vec<GeoBucket>,
    pub loyalty: Vec<LoyaltyCount>,
}

/// Outcome of the last recompute cycle.
///
/// `Empty` is a terminal state of the cycle: no aggregation view is computed
/// and the UI shows a "no matches" notice until the filters change again.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    /// Fresh views plus the matching indices (for the match-count label).
    Ready {
        matched: Vec<usize>,
        views: DerivedViews,
    },
    /// No customer matched the current selection.
    Empty,
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a file is loaded). Read-only afterwards.
    pub dataset: Option<CustomerDataset>,

    /// The active filter criteria, mutated by sidebar widgets.
    pub filters: Option<FilterSelection>,

    /// Result of the last synchronous recompute.
    pub view: Option<ViewState>,

    /// Slice colours for the loyalty pie, fixed per dataset.
    pub loyalty_colors: Option<CategoryColors>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            filters: None,
            view: None,
            loyalty_colors: None,
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset, reset filters to defaults, and run the
    /// first pipeline pass (under defaults every record matches).
    pub fn set_dataset(&mut self, dataset: CustomerDataset) {
        self.filters = Some(FilterSelection::for_dataset(&dataset));
        self.loyalty_colors = Some(CategoryColors::new(&dataset.loyalty_statuses));
        self.dataset = Some(dataset);
        self.status_message = None;
        self.recompute();
    }

    /// Run the whole pipeline synchronously: filter engine, then the three
    /// reducers, or the `Empty` terminal state. Called once per interaction.
    pub fn recompute(&mut self) {
        let (Some(dataset), Some(filters)) = (&self.dataset, &self.filters) else {
            self.view = None;
            return;
        };

        self.view = Some(match apply_filters(dataset, filters) {
            FilterResult::Empty => ViewState::Empty,
            FilterResult::NonEmpty(indices) => {
                let views = DerivedViews {
                    kpis: compute_kpis(dataset, &indices),
                    geo: geo_buckets(dataset, &indices),
                    loyalty: loyalty_counts(dataset, &indices),
                };
                ViewState::Ready {
                    matched: indices,
                    views,
                }
            }
        });
    }

    /// Number of customers matching the current filters.
    pub fn matched_count(&self) -> usize {
        match &self.view {
            Some(ViewState::Ready { matched, .. }) => matched.len(),
            _ => 0,
        }
    }

    /// Toggle a single value in one of the categorical filters.
    pub fn toggle_filter_value(&mut self, field: CategoryField, value: &str) {
        if let Some(filters) = &mut self.filters {
            let selected = field.selected_mut(filters);
            if !selected.remove(value) {
                selected.insert(value.to_string());
            }
            self.recompute();
        }
    }

    /// Select all observed values for a categorical filter.
    pub fn select_all(&mut self, field: CategoryField) {
        if let (Some(dataset), Some(filters)) = (&self.dataset, &mut self.filters) {
            *field.selected_mut(filters) = field.domain(dataset).clone();
            self.recompute();
        }
    }

    /// Deselect all values for a categorical filter (admits no records).
    pub fn select_none(&mut self, field: CategoryField) {
        if let Some(filters) = &mut self.filters {
            field.selected_mut(filters).clear();
            self.recompute();
        }
    }

    /// Set the CLV range, clamped to the observed dataset bounds.
    pub fn set_clv_range(&mut self, min: f64, max: f64) {
        if let (Some(dataset), Some(filters)) = (&self.dataset, &mut self.filters) {
            let (lo, hi) = dataset.clv_bounds;
            let min = min.clamp(lo, hi);
            let max = max.clamp(min, hi);
            filters.clv_range = (min, max);
            self.recompute();
        }
    }
}

/// The three categorical filter columns, so the sidebar can drive them with
/// one widget loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryField {
    Province,
    Education,
    LoyaltyStatus,
}

impl CategoryField {
    pub const ALL: [CategoryField; 3] = [
        CategoryField::Province,
        CategoryField::Education,
        CategoryField::LoyaltyStatus,
    ];

    /// Sidebar section label.
    pub fn label(self) -> &'static str {
        match self {
            CategoryField::Province => "Province/State",
            CategoryField::Education => "Education Level",
            CategoryField::LoyaltyStatus => "Loyalty Status",
        }
    }

    /// Full set of observed values for this column.
    pub fn domain(self, dataset: &CustomerDataset) -> &BTreeSet<String> {
        match self {
            CategoryField::Province => &dataset.provinces,
            CategoryField::Education => &dataset.educations,
            CategoryField::LoyaltyStatus => &dataset.loyalty_statuses,
        }
    }

    /// Selected values for this column.
    pub fn selected_mut(self, filters: &mut FilterSelection) -> &mut BTreeSet<String> {
        match self {
            CategoryField::Province => &mut filters.provinces,
            CategoryField::Education => &mut filters.educations,
            CategoryField::LoyaltyStatus => &mut filters.loyalty_statuses,
        }
    }

    pub fn selected<'a>(self, filters: &'a FilterSelection) -> &'a BTreeSet<String> {
        match self {
            CategoryField::Province => &filters.provinces,
            CategoryField::Education => &filters.educations,
            CategoryField::LoyaltyStatus => &filters.loyalty_statuses,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_support::customer;

    fn loaded_state() -> AppState {
        let ds = CustomerDataset::from_customers(
            vec![
                customer(100.0, "Ontario", "Bachelor", "Gold"),
                customer(500.0, "Quebec", "College", "Silver"),
                customer(900.0, "Ontario", "Master", "Gold"),
            ],
            false,
        );
        let mut state = AppState::default();
        state.set_dataset(ds);
        state
    }

    #[test]
    fn loading_a_dataset_runs_the_pipeline_under_defaults() {
        let state = loaded_state();

        match state.view {
            Some(ViewState::Ready { ref matched, ref views }) => {
                assert_eq!(matched, &vec![0, 1, 2]);
                assert_eq!(views.kpis.customer_count, 3);
                assert_eq!(views.loyalty.len(), 2);
            }
            other => panic!("expected Ready state, got {other:?}"),
        }
    }

    #[test]
    fn deselecting_everything_reaches_the_empty_terminal_state() {
        let mut state = loaded_state();
        state.select_none(CategoryField::LoyaltyStatus);

        // No views are carried over from the previous cycle.
        assert_eq!(state.view, Some(ViewState::Empty));
        assert_eq!(state.matched_count(), 0);
    }

    #[test]
    fn toggling_a_value_narrows_then_restores() {
        let mut state = loaded_state();

        state.toggle_filter_value(CategoryField::Province, "Quebec");
        assert_eq!(state.matched_count(), 2);

        state.toggle_filter_value(CategoryField::Province, "Quebec");
        assert_eq!(state.matched_count(), 3);
    }

    #[test]
    fn select_all_restores_the_full_domain() {
        let mut state = loaded_state();
        state.select_none(CategoryField::Education);
        state.select_all(CategoryField::Education);

        assert_eq!(state.matched_count(), 3);
    }

    #[test]
    fn clv_range_is_clamped_to_observed_bounds() {
        let mut state = loaded_state();
        state.set_clv_range(-1000.0, 1e9);

        let filters = state.filters.as_ref().unwrap();
        assert_eq!(filters.clv_range, (100.0, 900.0));
        assert_eq!(state.matched_count(), 3);

        state.set_clv_range(200.0, 600.0);
        assert_eq!(state.matched_count(), 1);
    }
}
