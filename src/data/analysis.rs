use crate::config::AnalysisConfig;

use super::model::{DailySeries, DailyVolume};
use super::peaks::find_peaks;

/// Everything the presenter needs, computed in one pass from a series.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VolumeAnalysis {
    pub series: DailySeries,
    /// Ascending indices into `series`.
    pub peaks: Vec<usize>,
    /// Indices into `series`, highest volume first.
    pub top: Vec<usize>,
}

impl VolumeAnalysis {
    pub fn compute(series: DailySeries, config: &AnalysisConfig) -> Self {
        let peaks = find_peaks(&series.volumes(), config.peak_distance);
        let top = series.top_n(config.top_n);
        Self { series, peaks, top }
    }

    pub fn peak_days(&self) -> impl Iterator<Item = &DailyVolume> {
        self.peaks.iter().filter_map(|&i| self.series.get(i))
    }

    pub fn top_days(&self) -> impl Iterator<Item = &DailyVolume> {
        self.top.iter().filter_map(|&i| self.series.get(i))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate};

    use super::*;
    use crate::data::aggregate::aggregate_daily;
    use crate::data::model::Record;

    fn series_from_volumes(volumes: &[usize]) -> DailySeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let records: Vec<Record> = volumes
            .iter()
            .enumerate()
            .flat_map(|(i, &v)| {
                let date = start + Duration::days(i as i64);
                (0..v).map(move |n| Record::new(date, format!("post {n}")))
            })
            .collect();
        aggregate_daily(&records)
    }

    #[test]
    fn compute_uses_config() {
        let series = series_from_volumes(&[1, 3, 1, 2, 1, 1, 1, 4, 1, 2, 1, 1]);
        let config = AnalysisConfig::default();
        let analysis = VolumeAnalysis::compute(series, &config);

        assert_eq!(analysis.peaks, vec![1, 7]);
        assert_eq!(analysis.top.len(), 10);
        let top_volumes: Vec<usize> = analysis.top_days().map(|d| d.volume).collect();
        assert_eq!(top_volumes[..4].to_vec(), vec![4, 3, 2, 2]);
        assert!(top_volumes.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn fewer_days_than_top_n_lists_all() {
        let series = series_from_volumes(&[2, 5, 1]);
        let analysis = VolumeAnalysis::compute(series, &AnalysisConfig::default());
        assert_eq!(analysis.top, vec![1, 0, 2]);
        let peaks: Vec<usize> = analysis.peak_days().map(|d| d.volume).collect();
        assert_eq!(peaks, vec![5]);
    }
}
