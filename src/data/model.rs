use std::fmt;

use chrono::NaiveDate;

/// Date format used everywhere a day is shown to the user.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ---------------------------------------------------------------------------
// Record – one row of the source table
// ---------------------------------------------------------------------------

/// A single post: the calendar date it was published and its text.
/// Any other columns in the source table are dropped by the loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub date: NaiveDate,
    pub text: String,
}

impl Record {
    pub fn new(date: NaiveDate, text: impl Into<String>) -> Self {
        Self {
            date,
            text: text.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// DailyVolume – one aggregated day
// ---------------------------------------------------------------------------

/// All posts that share one calendar date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyVolume {
    pub date: NaiveDate,
    /// Number of posts on `date`; always equals `texts.len()`.
    pub volume: usize,
    /// Post texts in source order.
    pub texts: Vec<String>,
}

impl DailyVolume {
    pub fn date_label(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

/// `日期: YYYY-MM-DD | 聲量: <count>`
impl fmt::Display for DailyVolume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "日期: {} | 聲量: {}", self.date_label(), self.volume)
    }
}

// ---------------------------------------------------------------------------
// DailySeries – the ordered daily time series
// ---------------------------------------------------------------------------

/// Daily volumes ordered by strictly increasing date.
///
/// Only built through [`crate::data::aggregate::aggregate_daily`] or by
/// slicing an existing series, so the ordering invariant always holds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DailySeries {
    pub(crate) days: Vec<DailyVolume>,
}

impl DailySeries {
    pub fn days(&self) -> &[DailyVolume] {
        &self.days
    }

    pub fn get(&self, index: usize) -> Option<&DailyVolume> {
        self.days.get(index)
    }

    /// Number of distinct days.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// The volume column, in date order.
    pub fn volumes(&self) -> Vec<usize> {
        self.days.iter().map(|d| d.volume).collect()
    }

    /// Sum of all daily volumes (= number of records aggregated).
    pub fn total_volume(&self) -> usize {
        self.days.iter().map(|d| d.volume).sum()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.days.first().map(|d| d.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.days.last().map(|d| d.date)
    }

    /// Indices of the `n` highest-volume days, highest first.
    /// Equal volumes keep date order (earlier day first).
    pub fn top_n(&self, n: usize) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.days.len()).collect();
        // stable sort keeps ties in table order
        order.sort_by(|&a, &b| self.days[b].volume.cmp(&self.days[a].volume));
        order.truncate(n);
        order
    }
}
