use anyhow::Context as _;
use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::export::EXPORT_FILENAME;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter selectors
// ---------------------------------------------------------------------------

/// Render the sidebar: season selector plus optional year/month selectors.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter Data");
    ui.separator();

    let dataset = match &state.dataset {
        Some(ds) => ds,
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    // Clone the selector indices so we can mutate state inside the loops.
    let seasons = dataset.seasons.clone();
    let years = dataset.years.clone();
    let months = dataset.months.clone();
    let total = dataset.len();

    let mut changed = false;

    ui.strong("Select Season:");
    let current_season = state
        .selection
        .season
        .map(|s| s.label().to_string())
        .unwrap_or_default();
    egui::ComboBox::from_id_salt("season_select")
        .selected_text(&current_season)
        .show_ui(ui, |ui: &mut Ui| {
            for season in &seasons {
                let swatch = RichText::new(season.label()).color(state.color_map.season(*season));
                if ui
                    .selectable_label(state.selection.season == Some(*season), swatch)
                    .clicked()
                {
                    state.selection.season = Some(*season);
                    changed = true;
                }
            }
        });
    ui.add_space(4.0);

    ui.strong("Select Year:");
    let current_year = state
        .selection
        .year
        .map(|y| y.to_string())
        .unwrap_or_else(|| "All".to_string());
    egui::ComboBox::from_id_salt("year_select")
        .selected_text(&current_year)
        .show_ui(ui, |ui: &mut Ui| {
            if ui
                .selectable_label(state.selection.year.is_none(), "All")
                .clicked()
            {
                state.selection.year = None;
                changed = true;
            }
            for year in &years {
                if ui
                    .selectable_label(state.selection.year == Some(*year), year.to_string())
                    .clicked()
                {
                    state.selection.year = Some(*year);
                    changed = true;
                }
            }
        });
    ui.add_space(4.0);

    ui.strong("Select Month:");
    let current_month = state
        .selection
        .month
        .map(|m| m.to_string())
        .unwrap_or_else(|| "All".to_string());
    egui::ComboBox::from_id_salt("month_select")
        .selected_text(&current_month)
        .show_ui(ui, |ui: &mut Ui| {
            if ui
                .selectable_label(state.selection.month.is_none(), "All")
                .clicked()
            {
                state.selection.month = None;
                changed = true;
            }
            for month in &months {
                if ui
                    .selectable_label(state.selection.month == Some(*month), month.to_string())
                    .clicked()
                {
                    state.selection.month = Some(*month);
                    changed = true;
                }
            }
        });

    if changed {
        state.refilter();
    }

    ui.separator();
    ui.label(format!(
        "{} of {total} records match",
        state.visible_indices.len()
    ));
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
            ui.menu_button("Open URL…", |ui: &mut Ui| {
                ui.text_edit_singleline(&mut state.url_input);
                if ui.button("Load").clicked() {
                    let url = state.url_input.trim().to_string();
                    if !url.is_empty() {
                        state.load_source(&url);
                    }
                    ui.close_menu();
                }
            });
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} records loaded, {} match",
                ds.len(),
                state.visible_indices.len()
            ));

            ui.separator();

            let can_export = !state.visible_indices.is_empty();
            if ui
                .add_enabled(can_export, egui::Button::new("Download CSV"))
                .clicked()
            {
                save_export_dialog(state);
            }
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open air quality data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.load_source(&path.to_string_lossy());
    }
}

/// Save the current filtered subset as `data_filtered.csv`.
pub fn save_export_dialog(state: &mut AppState) {
    let Some(csv) = state.export_csv() else {
        return;
    };

    let file = rfd::FileDialog::new()
        .set_title("Save filtered data")
        .set_file_name(EXPORT_FILENAME)
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        let written = std::fs::write(&path, csv)
            .with_context(|| format!("writing {}", path.display()));
        match written {
            Ok(()) => {
                log::info!(
                    "Exported {} records to {}",
                    state.visible_indices.len(),
                    path.display()
                );
                state.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to write export: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
