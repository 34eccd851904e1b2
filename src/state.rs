use crate::color::ColorMap;
use crate::data::export::ExportCache;
use crate::data::filter::{filtered_indices, Selection};
use crate::data::loader::{self, LoadError};
use crate::data::model::{Dataset, Pollutant};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until the user opens a source).
    pub dataset: Option<Dataset>,

    /// Current sidebar selection.
    pub selection: Selection,

    /// Indices of records matching the current selection (cached).
    pub visible_indices: Vec<usize>,

    /// Pollutant shown in the time-series chart.
    pub series_pollutant: Pollutant,

    /// Fixed season/pollutant colours.
    pub color_map: ColorMap,

    /// Memoized CSV exports for the session.
    pub export_cache: ExportCache,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// URL entry buffer for the "Open URL" menu.
    pub url_input: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            selection: Selection::default(),
            visible_indices: Vec::new(),
            series_pollutant: Pollutant::No2,
            color_map: ColorMap::default(),
            export_cache: ExportCache::default(),
            status_message: None,
            url_input: String::new(),
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset and reset selection to its defaults.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.selection = Selection::for_dataset(&dataset);
        self.visible_indices = filtered_indices(&dataset, &self.selection);
        self.export_cache.clear();
        self.dataset = Some(dataset);
        self.status_message = None;
    }

    /// Load a dataset from a path or URL, surfacing failures as the status
    /// message instead of rendering a partial dashboard.
    pub fn load_source(&mut self, source: &str) {
        match loader::load(source) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} records ({} seasons, years {:?})",
                    dataset.len(),
                    dataset.seasons.len(),
                    dataset.years
                );
                self.set_dataset(dataset);
            }
            Err(e) => self.report_load_error(source, e),
        }
    }

    fn report_load_error(&mut self, source: &str, e: LoadError) {
        log::error!("Failed to load {source}: {e}");
        self.status_message = Some(format!("Error: {e}"));
    }

    /// Recompute `visible_indices` after a selection change.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.visible_indices = filtered_indices(ds, &self.selection);
        }
    }

    /// CSV text for the current filtered subset, memoized per subset.
    pub fn export_csv(&mut self) -> Option<String> {
        let ds = self.dataset.as_ref()?;
        Some(
            self.export_cache
                .get_or_encode(ds, &self.visible_indices)
                .to_string(),
        )
    }
}
