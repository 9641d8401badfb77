use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::color::ColorMap;
use crate::config::Config;
use crate::data::cache::DatasetCache;
use crate::data::export::export_file;
use crate::data::model::{Dataset, Normalization, TidyRecord, YearRange};
use crate::data::pipeline::{Selection, tidy_records};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    config: Config,

    /// Memoized file loads.
    cache: DatasetCache,

    /// Path of the dataset currently shown.
    pub data_path: Option<PathBuf>,

    /// Loaded dataset (None until a load succeeds).
    pub dataset: Option<Arc<Dataset>>,

    /// Sorted distinct artist names of the dataset.
    pub artist_names: Vec<String>,

    /// Selected artists, in the order they were picked.
    pub selected: Vec<String>,

    /// Year bounds of the data; None when no date parsed.
    pub year_bounds: Option<YearRange>,

    /// Chosen year range, always within `year_bounds`.
    pub years: Option<YearRange>,

    pub mode: Normalization,

    /// Pipeline output for the current selection (cached).
    pub records: Vec<TidyRecord>,

    /// Stable artist colours.
    pub color_map: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            mode: config.initial_mode(),
            config,
            cache: DatasetCache::new(),
            data_path: None,
            dataset: None,
            artist_names: Vec::new(),
            selected: Vec::new(),
            year_bounds: None,
            years: None,
            records: Vec::new(),
            color_map: ColorMap::default(),
            status_message: None,
        }
    }

    /// Load (or fetch from cache) the file at `path`.
    ///
    /// On failure the previous dataset is dropped: nothing is rendered
    /// except the error.
    pub fn load(&mut self, path: &Path) {
        match self.cache.get_or_load(path) {
            Ok(dataset) => self.set_dataset(path, dataset),
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                self.status_message = Some(format!("Error: {e}"));
                self.dataset = None;
                self.artist_names.clear();
                self.selected.clear();
                self.year_bounds = None;
                self.years = None;
                self.records.clear();
                self.data_path = Some(path.to_path_buf());
            }
        }
    }

    /// Re-read the current file; unchanged files come from the cache.
    pub fn reload(&mut self) {
        if let Some(path) = self.data_path.clone() {
            self.load(&path);
        }
    }

    /// Ingest a loaded dataset, initialise selection and colours.
    ///
    /// Reloading the same path keeps the selection where still valid; a new
    /// path starts from the configured defaults.
    pub fn set_dataset(&mut self, path: &Path, dataset: Arc<Dataset>) {
        let same_file = self.data_path.as_deref() == Some(path);

        self.artist_names = dataset.artist_names();
        self.year_bounds = dataset.year_bounds();
        self.color_map = ColorMap::new(self.artist_names.iter().map(String::as_str));

        if same_file {
            let names = &self.artist_names;
            self.selected.retain(|a| names.contains(a));
            self.years = match (self.years, self.year_bounds) {
                (Some(years), Some(bounds)) => Some(years.clamp_to(bounds)),
                (_, bounds) => bounds,
            };
        } else {
            self.selected = self
                .artist_names
                .iter()
                .take(self.config.default_artists)
                .cloned()
                .collect();
            self.years = self.year_bounds;
        }

        self.data_path = Some(path.to_path_buf());
        self.dataset = Some(dataset);
        self.status_message = None;
        self.recompute();
    }

    /// Whether the UI should prompt for an artist instead of drawing.
    pub fn needs_selection(&self) -> bool {
        self.dataset.is_some() && self.selected.is_empty()
    }

    /// Re-run the pipeline for the current selection.
    ///
    /// The pipeline is not invoked for an empty selection.
    pub fn recompute(&mut self) {
        self.records.clear();
        let (Some(dataset), Some(years)) = (&self.dataset, self.years) else {
            return;
        };
        if self.selected.is_empty() {
            return;
        }
        let selection = Selection {
            artists: self.selected.clone(),
            years,
            mode: self.mode,
        };
        self.records = tidy_records(dataset, &selection);
    }

    /// Add an artist to the end of the selection, or remove it.
    pub fn toggle_artist(&mut self, artist: &str) {
        if let Some(pos) = self.selected.iter().position(|a| a == artist) {
            self.selected.remove(pos);
        } else if self.artist_names.iter().any(|a| a == artist) {
            self.selected.push(artist.to_string());
        }
        self.recompute();
    }

    /// Select every artist, keeping already selected ones first.
    pub fn select_all(&mut self) {
        for name in &self.artist_names {
            if !self.selected.contains(name) {
                self.selected.push(name.clone());
            }
        }
        self.recompute();
    }

    pub fn select_none(&mut self) {
        self.selected.clear();
        self.recompute();
    }

    pub fn set_years(&mut self, years: YearRange) {
        let years = match self.year_bounds {
            Some(bounds) => years.clamp_to(bounds),
            None => return,
        };
        if self.years != Some(years) {
            self.years = Some(years);
            self.recompute();
        }
    }

    pub fn set_mode(&mut self, mode: Normalization) {
        if self.mode != mode {
            self.mode = mode;
            self.recompute();
        }
    }

    /// Write the current records to `path` (CSV or JSON by extension).
    pub fn export(&mut self, path: &Path) {
        match export_file(path, &self.records) {
            Ok(()) => {
                self.status_message = Some(format!(
                    "Exported {} records to {}",
                    self.records.len(),
                    path.display()
                ));
            }
            Err(e) => {
                log::error!("Export failed: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
