use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::color::ColorMap;
use crate::data::filter::{FilterConfig, SortOrder};
use crate::data::loader::load_file;
use crate::data::model::Dataset;
use crate::data::pipeline::{self, DerivedViews};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// File the dataset was (or will be) loaded from; used by Refresh.
    pub source_path: PathBuf,

    /// Loaded dataset (None until a file loads successfully).
    pub dataset: Option<Dataset>,

    /// Active filter and sort settings.
    pub config: FilterConfig,

    /// Views derived from `dataset` + `config`, rebuilt on every change.
    pub views: DerivedViews,

    /// Per-source colours.
    pub color_map: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(source_path: PathBuf) -> Self {
        Self {
            source_path,
            dataset: None,
            config: FilterConfig::default(),
            views: DerivedViews::default(),
            color_map: ColorMap::default(),
            status_message: None,
        }
    }

    /// Ingest a newly loaded dataset, reset filters to show everything.
    pub fn set_dataset(&mut self, dataset: Dataset, today: NaiveDate) {
        self.config = FilterConfig::for_dataset(&dataset, today);
        self.color_map = ColorMap::new(&dataset.sources);
        self.dataset = Some(dataset);
        self.status_message = None;
        self.recompute(today);
    }

    /// Load `path` and make it the active dataset. On failure the previous
    /// dataset stays and the error is reported in the status line.
    pub fn load_path(&mut self, path: &Path, today: NaiveDate) {
        match load_file(path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} news items from {} ({} sources, {} rows excluded)",
                    dataset.len(),
                    path.display(),
                    dataset.sources.len(),
                    dataset.excluded
                );
                if dataset.is_empty() {
                    log::warn!("{} has no rows with a valid date", path.display());
                }
                self.source_path = path.to_path_buf();
                self.set_dataset(dataset, today);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Reload the dataset from `source_path` and rebuild every view from the
    /// currently active filters.
    pub fn refresh(&mut self, today: NaiveDate) {
        match load_file(&self.source_path) {
            Ok(dataset) => {
                log::info!(
                    "Refreshed {}: {} news items",
                    self.source_path.display(),
                    dataset.len()
                );
                if self.dataset.is_none() {
                    self.set_dataset(dataset, today);
                    return;
                }
                self.color_map = ColorMap::new(&dataset.sources);
                self.dataset = Some(dataset);
                self.status_message = None;
                self.recompute(today);
            }
            Err(e) => {
                log::error!("Failed to refresh {}: {e:#}", self.source_path.display());
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Rebuild `views` from the active dataset and config.
    pub fn recompute(&mut self, today: NaiveDate) {
        self.views = match &self.dataset {
            Some(ds) => pipeline::run(ds, &self.config, today),
            None => DerivedViews::default(),
        };
    }

    pub fn set_date_range(&mut self, start: NaiveDate, end: NaiveDate, today: NaiveDate) {
        self.config.date_range = vec![start, end];
        self.recompute(today);
    }

    pub fn set_keyword(&mut self, keyword: &str, today: NaiveDate) {
        self.config.keyword = keyword.to_string();
        self.recompute(today);
    }

    pub fn set_sort_order(&mut self, order: SortOrder, today: NaiveDate) {
        self.config.sort_order = order;
        self.recompute(today);
    }

    /// Toggle a single source in the selection.
    pub fn toggle_source(&mut self, source: &str, today: NaiveDate) {
        if !self.config.sources.remove(source) {
            self.config.sources.insert(source.to_string());
        }
        self.recompute(today);
    }

    /// Select every source of the loaded dataset.
    pub fn select_all_sources(&mut self, today: NaiveDate) {
        if let Some(ds) = &self.dataset {
            self.config.sources = ds.sources.iter().cloned().collect();
            self.recompute(today);
        }
    }

    /// Deselect all sources.
    pub fn select_no_sources(&mut self, today: NaiveDate) {
        self.config.sources.clear();
        self.recompute(today);
    }
}
