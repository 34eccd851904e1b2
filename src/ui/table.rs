use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::Pollutant;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Filtered record table
// ---------------------------------------------------------------------------

const ROW_HEIGHT: f32 = 18.0;

fn fmt_cell(v: Option<f64>) -> String {
    match v {
        Some(v) => format!("{v:.1}"),
        None => String::new(),
    }
}

/// Virtualized table of the filtered subset: datetime, TEMP, the pollutant
/// columns, and the derived Year/Month/Season.
pub fn record_table(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        return;
    };
    let indices = &state.visible_indices;

    TableBuilder::new(ui)
        .striped(true)
        .max_scroll_height(280.0)
        .column(Column::auto().at_least(140.0)) // datetime
        .column(Column::auto().at_least(50.0)) // TEMP
        .columns(Column::auto().at_least(50.0), Pollutant::ALL.len())
        .column(Column::auto().at_least(44.0)) // Year
        .column(Column::auto().at_least(44.0)) // Month
        .column(Column::remainder().at_least(110.0)) // Season
        .header(ROW_HEIGHT + 2.0, |mut header| {
            for title in ["datetime", "TEMP"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
            for p in Pollutant::ALL {
                header.col(|ui| {
                    ui.strong(p.column());
                });
            }
            for title in ["Year", "Month", "Season"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, indices.len(), |mut row| {
                let record = &dataset.records[indices[row.index()]];
                row.col(|ui| {
                    ui.label(record.datetime.format("%Y-%m-%d %H:%M:%S").to_string());
                });
                row.col(|ui| {
                    ui.label(format!("{:.1}", record.temp));
                });
                for p in Pollutant::ALL {
                    row.col(|ui| {
                        ui.label(fmt_cell(record.pollutant(p)));
                    });
                }
                row.col(|ui| {
                    ui.label(record.year.to_string());
                });
                row.col(|ui| {
                    ui.label(record.month.to_string());
                });
                row.col(|ui| {
                    ui.label(
                        RichText::new(record.season.label())
                            .color(state.color_map.season(record.season)),
                    );
                });
            });
        });
}
