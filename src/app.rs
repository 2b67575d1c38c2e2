use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::{AppState, ViewState};
use crate::ui::{map, metrics, panels, pie};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct DashboardApp {
    pub state: AppState,
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: KPIs, map, pie ----
        egui::CentralPanel::default().show(ctx, |ui| {
            central_panel(ui, &self.state);
        });
    }
}

/// Dispatch on the pipeline outcome: placeholder, empty notice, or the three
/// aggregation views.
fn central_panel(ui: &mut Ui, state: &AppState) {
    match &state.view {
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a customer file to explore  (File → Open…)");
            });
        }
        Some(ViewState::Empty) => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.label(
                    RichText::new(
                        "No customers match the current filter selection. \
                         Please adjust your filters.",
                    )
                    .color(Color32::YELLOW)
                    .heading(),
                );
            });
        }
        Some(ViewState::Ready { views, .. }) => {
            metrics::kpi_row(ui, &views.kpis);
            ui.separator();

            // Map takes two thirds of the width, pie the rest.
            let pie_width = ui.available_width() / 3.0;
            ui.horizontal_top(|ui: &mut Ui| {
                ui.vertical(|ui: &mut Ui| {
                    ui.set_width(ui.available_width() - pie_width);
                    map::bubble_map(ui, &views.geo);
                });
                ui.vertical(|ui: &mut Ui| {
                    if let Some(colors) = &state.loyalty_colors {
                        pie::pie_chart(ui, &views.loyalty, colors);
                    }
                });
            });
        }
    }
}
