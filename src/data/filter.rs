use chrono::NaiveDate;

use super::model::DailySeries;

// ---------------------------------------------------------------------------
// Date-range predicate: which days are analysed
// ---------------------------------------------------------------------------

/// Inclusive `[start, end]` window over the daily series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// The range spanning the whole series, `None` for an empty series.
    pub fn covering(series: &DailySeries) -> Option<Self> {
        Some(Self::new(series.first_date()?, series.last_date()?))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Sub-series of days inside the range. An inverted range
    /// (`start > end`) matches nothing.
    pub fn apply(&self, series: &DailySeries) -> DailySeries {
        DailySeries {
            days: series
                .days()
                .iter()
                .filter(|d| self.contains(d.date))
                .cloned()
                .collect(),
        }
    }
}
