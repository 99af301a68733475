use std::path::{Path, PathBuf};

use crate::config::AnalysisConfig;
use crate::data::aggregate::aggregate_daily;
use crate::data::analysis::VolumeAnalysis;
use crate::data::filter::DateRange;
use crate::data::loader::load_file;
use crate::data::model::{DailySeries, Record};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Peak distance and list length.
    pub config: AnalysisConfig,

    /// File the current data came from (used by Reload).
    pub source: Option<PathBuf>,

    /// Number of records in the loaded file.
    pub record_count: usize,

    /// Full daily series (None until a file loads successfully).
    pub series: Option<DailySeries>,

    /// Analysed window; covers the whole series after a load.
    pub range: Option<DateRange>,

    /// Peaks and top days over the current window (cached).
    pub analysis: Option<VolumeAnalysis>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Load `path` and replace the current data.
    ///
    /// Any failure clears what was shown before and leaves a single
    /// `錯誤: ...` status message.
    pub fn load_path(&mut self, path: &Path) {
        self.source = Some(path.to_path_buf());
        match load_file(path) {
            Ok(records) => {
                log::info!("Loaded {} records from {}", records.len(), path.display());
                self.set_records(records);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                self.clear();
                self.status_message = Some(format!("錯誤: {e:#}"));
            }
        }
    }

    /// Load the last opened file again.
    pub fn reload(&mut self) {
        if let Some(path) = self.source.clone() {
            self.load_path(&path);
        }
    }

    /// Aggregate freshly loaded records and reset the window to the full range.
    pub fn set_records(&mut self, records: Vec<Record>) {
        let series = aggregate_daily(&records);
        log::info!(
            "{} records over {} days ({:?} – {:?})",
            records.len(),
            series.len(),
            series.first_date(),
            series.last_date()
        );

        self.record_count = records.len();
        self.range = DateRange::covering(&series);
        self.series = Some(series);
        self.status_message = None;
        self.refilter();
    }

    /// Narrow (or widen) the analysed window.
    pub fn set_range(&mut self, range: DateRange) {
        if self.range != Some(range) {
            self.range = Some(range);
            self.refilter();
        }
    }

    /// Back to the whole series.
    pub fn reset_range(&mut self) {
        if let Some(series) = &self.series {
            self.range = DateRange::covering(series);
            self.refilter();
        }
    }

    /// Recompute `analysis` after a data or range change.
    pub fn refilter(&mut self) {
        self.analysis = self.series.as_ref().map(|series| {
            let window = match &self.range {
                Some(range) => range.apply(series),
                None => series.clone(),
            };
            VolumeAnalysis::compute(window, &self.config)
        });
    }

    fn clear(&mut self) {
        self.record_count = 0;
        self.series = None;
        self.range = None;
        self.analysis = None;
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use chrono::NaiveDate;

    use super::*;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn csv_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn successful_load_populates_analysis() {
        let file = csv_file("date,text\n2024-01-01,a\n2024-01-01,b\n2024-01-02,c\n");
        let mut state = AppState::default();
        state.load_path(file.path());

        assert!(state.status_message.is_none());
        assert_eq!(state.record_count, 3);
        assert_eq!(state.range, Some(DateRange::new(date(1, 1), date(1, 2))));
        let analysis = state.analysis.as_ref().unwrap();
        assert_eq!(analysis.series.volumes(), vec![2, 1]);
        assert_eq!(analysis.top, vec![0, 1]);
        assert!(analysis.peaks.is_empty());
    }

    #[test]
    fn failed_load_clears_previous_data_and_reports() {
        let good = csv_file("date,text\n2024-01-01,a\n");
        let bad = csv_file("date,text\nsoon,a\n");
        let mut state = AppState::default();
        state.load_path(good.path());
        assert!(state.analysis.is_some());

        state.load_path(bad.path());
        assert!(state.analysis.is_none());
        assert!(state.series.is_none());
        assert_eq!(state.record_count, 0);
        let msg = state.status_message.as_deref().unwrap();
        assert!(msg.starts_with("錯誤: "), "{msg}");
        assert!(msg.contains("soon"), "{msg}");
    }

    #[test]
    fn narrowing_the_range_recomputes_the_analysis() {
        let mut state = AppState::default();
        let records = [(1, 1), (1, 2), (1, 2), (1, 3), (1, 9), (1, 9), (1, 9)]
            .iter()
            .map(|&(m, d)| Record::new(date(m, d), "p"))
            .collect();
        state.set_records(records);
        assert_eq!(state.analysis.as_ref().unwrap().series.total_volume(), 7);

        state.set_range(DateRange::new(date(1, 1), date(1, 3)));
        let analysis = state.analysis.as_ref().unwrap();
        assert_eq!(analysis.series.total_volume(), 4);
        assert_eq!(analysis.peaks, vec![1]);

        state.reset_range();
        assert_eq!(state.analysis.as_ref().unwrap().series.len(), 4);
    }

    #[test]
    fn dateless_rows_are_left_out_of_the_counts() {
        let file = csv_file("date,text\n2024-01-01,a\n,b\n2024-01-02,c\n");
        let mut state = AppState::default();
        state.load_path(file.path());

        assert!(state.status_message.is_none());
        assert_eq!(state.record_count, 2);
        let analysis = state.analysis.as_ref().unwrap();
        assert_eq!(analysis.series.len(), 2);
        assert_eq!(analysis.series.total_volume(), 2);
    }

    #[test]
    fn reload_without_source_is_a_no_op() {
        let mut state = AppState::new(AnalysisConfig::default());
        state.reload();
        assert!(state.analysis.is_none());
        assert!(state.status_message.is_none());
    }
}
