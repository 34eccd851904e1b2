use eframe::egui::{self, ScrollArea, Ui};

use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct UdaraApp {
    pub state: AppState,
}

impl eframe::App for UdaraApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(200.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: table + charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            self.central(ui);
        });
    }
}

impl UdaraApp {
    fn central(&mut self, ui: &mut Ui) {
        ui.heading("Air Quality Analysis Dashboard");

        if self.state.dataset.is_none() {
            // A failed load keeps the charts hidden; the error is in the top bar.
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a CSV to explore air quality data  (File → Open…)");
            });
            return;
        }

        ui.label(selection_summary(&self.state));
        ui.separator();

        if self.state.visible_indices.is_empty() {
            ui.label("No data for this selection.");
            return;
        }

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui: &mut Ui| {
                ui.strong("Filtered records");
                table::record_table(ui, &self.state);
                ui.separator();

                ui.strong("Average concentration of compounds");
                plot::mean_bar_chart(ui, &self.state);
                ui.separator();

                ui.strong("Concentration over time");
                plot::time_series(ui, &mut self.state);
                ui.separator();

                ui.strong("Concentration distributions");
                plot::distribution_box_plot(ui, &self.state);
            });
    }
}

fn selection_summary(state: &AppState) -> String {
    let season = state
        .selection
        .season
        .map(|s| s.label().to_string())
        .unwrap_or_else(|| "all seasons".to_string());
    let year = state
        .selection
        .year
        .map(|y| y.to_string())
        .unwrap_or_else(|| "all years".to_string());
    let month = state
        .selection
        .month
        .map(|m| format!("month {m}"))
        .unwrap_or_else(|| "all months".to_string());
    format!("Data for {season} ({year}, {month})")
}
