use chrono::DateTime;
use eframe::egui::{self, Ui};
use egui_plot::{Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Line, Plot, PlotPoints};

use crate::data::model::Pollutant;
use crate::data::stats;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Bar chart – mean concentration per pollutant
// ---------------------------------------------------------------------------

/// Average concentration of each pollutant over the filtered subset.
/// Pollutants with no non-missing value in the subset get no bar.
pub fn mean_bar_chart(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        return;
    };

    let means = stats::pollutant_means(dataset, &state.visible_indices);
    let bars: Vec<Bar> = means
        .iter()
        .enumerate()
        .filter_map(|(i, (p, mean))| {
            mean.map(|m| {
                Bar::new(i as f64, m)
                    .width(0.6)
                    .name(p.column())
                    .fill(state.color_map.pollutant(*p))
            })
        })
        .collect();

    if bars.is_empty() {
        ui.label("No concentration values in this selection.");
        return;
    }

    let labels: Vec<&'static str> = means.iter().map(|(p, _)| p.column()).collect();

    Plot::new("mean_bars")
        .height(240.0)
        .y_axis_label("Concentration (µg/m³)")
        .x_axis_formatter(move |mark, _range| {
            let i = mark.value.round();
            if (mark.value - i).abs() > 1e-6 || i < 0.0 {
                return String::new();
            }
            labels.get(i as usize).copied().unwrap_or("").to_string()
        })
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

// ---------------------------------------------------------------------------
// Time-series line – one pollutant over the filtered subset
// ---------------------------------------------------------------------------

/// Concentration of the chosen pollutant over time, ordered by datetime.
/// Missing readings leave gaps in the x axis rather than plotting as zero.
pub fn time_series(ui: &mut Ui, state: &mut AppState) {
    let Some(dataset) = &state.dataset else {
        return;
    };

    // Pollutant picker for the series.
    egui::ComboBox::from_id_salt("series_pollutant")
        .selected_text(state.series_pollutant.column())
        .show_ui(ui, |ui: &mut Ui| {
            for p in Pollutant::ALL {
                if ui
                    .selectable_label(state.series_pollutant == p, p.column())
                    .clicked()
                {
                    state.series_pollutant = p;
                }
            }
        });

    let pollutant = state.series_pollutant;
    let ordered = stats::ordered_by_datetime(dataset, &state.visible_indices);
    let points: Vec<[f64; 2]> = ordered
        .iter()
        .filter_map(|&i| {
            let r = &dataset.records[i];
            r.pollutant(pollutant)
                .map(|v| [r.datetime.and_utc().timestamp() as f64, v])
        })
        .collect();

    if points.is_empty() {
        ui.label(format!("No {} values in this selection.", pollutant.column()));
        return;
    }

    let color = state.color_map.pollutant(pollutant);

    Plot::new("time_series")
        .height(240.0)
        .y_axis_label(format!("{} (µg/m³)", pollutant.column()))
        .x_axis_formatter(|mark, _range| {
            DateTime::from_timestamp(mark.value as i64, 0)
                .map(|dt| dt.format("%Y-%m-%d").to_string())
                .unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from(points))
                    .name(pollutant.column())
                    .color(color)
                    .width(1.5),
            );
        });
}

// ---------------------------------------------------------------------------
// Box plot – per-pollutant distributions
// ---------------------------------------------------------------------------

/// Distribution of each pollutant over the filtered subset as a five-number
/// box. Pollutants with no values are left out.
pub fn distribution_box_plot(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        return;
    };

    let mut boxes = Vec::new();
    let mut labels = Vec::new();
    for (i, p) in Pollutant::ALL.into_iter().enumerate() {
        let Some((min, q1, median, q3, max)) =
            stats::quartiles(dataset, &state.visible_indices, p)
        else {
            continue;
        };
        let color = state.color_map.pollutant(p);
        boxes.push(
            BoxElem::new(i as f64, BoxSpread::new(min, q1, median, q3, max))
                .name(p.column())
                .fill(color.gamma_multiply(0.4))
                .stroke(egui::Stroke::new(1.0, color)),
        );
        labels.push((i, p.column()));
    }

    if boxes.is_empty() {
        ui.label("No concentration values in this selection.");
        return;
    }

    Plot::new("distribution_boxes")
        .height(240.0)
        .y_axis_label("Concentration (µg/m³)")
        .x_axis_formatter(move |mark, _range| {
            let i = mark.value.round();
            if (mark.value - i).abs() > 1e-6 {
                return String::new();
            }
            labels
                .iter()
                .find(|(idx, _)| *idx == i as usize)
                .map(|(_, col)| col.to_string())
                .unwrap_or_default()
        })
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.box_plot(BoxPlot::new(boxes));
        });
}
