use std::path::Path;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::{AppState, CategoryField};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter Segmentation");
    ui.separator();

    let dataset = match &state.dataset {
        Some(ds) => ds,
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    // Clone what the widgets need so we can mutate state inside the loop.
    let clv_bounds = dataset.clv_bounds;
    let domains: Vec<(CategoryField, Vec<String>)> = CategoryField::ALL
        .iter()
        .map(|&f| (f, f.domain(dataset).iter().cloned().collect()))
        .collect();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            clv_range_section(ui, state, clv_bounds);
            ui.separator();

            for (field, values) in &domains {
                category_section(ui, state, *field, values);
            }
        });
}

/// Two bounded sliders for the inclusive CLV range.
fn clv_range_section(ui: &mut Ui, state: &mut AppState, bounds: (f64, f64)) {
    let Some(filters) = &state.filters else {
        return;
    };
    let (mut lo, mut hi) = filters.clv_range;

    ui.strong("Customer Lifetime Value");
    let changed = ui
        .add(egui::Slider::new(&mut lo, bounds.0..=bounds.1).text("min"))
        .changed()
        | ui.add(egui::Slider::new(&mut hi, bounds.0..=bounds.1).text("max"))
            .changed();

    if changed {
        state.set_clv_range(lo, hi);
    }
}

/// One collapsible multi-select section for a categorical column.
fn category_section(ui: &mut Ui, state: &mut AppState, field: CategoryField, values: &[String]) {
    let n_selected = state
        .filters
        .as_ref()
        .map_or(0, |f| field.selected(f).len());
    let header_text = format!("{}  ({n_selected}/{})", field.label(), values.len());

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(field.label())
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all(field);
                }
                if ui.small_button("None").clicked() {
                    state.select_none(field);
                }
            });

            for value in values {
                let is_selected = state
                    .filters
                    .as_ref()
                    .is_some_and(|f| field.selected(f).contains(value));

                let mut checked = is_selected;
                if ui.checkbox(&mut checked, value).changed() {
                    state.toggle_filter_value(field, value);
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} customers loaded, {} match",
                ds.len(),
                state.matched_count()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File loading
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open customer data")
        .add_filter("Supported files", &["csv", "json"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        load_into_state(state, &path);
    }
}

/// Load a dataset file and install it, or surface the error in the top bar.
pub fn load_into_state(state: &mut AppState, path: &Path) {
    match crate::data::loader::load_file(path) {
        Ok(dataset) => {
            log::info!(
                "Loaded {} customers from {} ({} provinces, PRR: {})",
                dataset.len(),
                path.display(),
                dataset.provinces.len(),
                if dataset.has_prr { "yes" } else { "no" }
            );
            state.set_dataset(dataset);
        }
        Err(e) => {
            log::error!("Failed to load {}: {e:#}", path.display());
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
