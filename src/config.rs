use serde::{Deserialize, Serialize};

/// Column holding the post date.
pub const DATE_COLUMN: &str = "date";
/// Column holding the post text.
pub const TEXT_COLUMN: &str = "text";

/// Tunables for peak detection and the ranked list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Minimum number of days between two reported peaks.
    pub peak_distance: usize,
    /// Length of the highest-volume list.
    pub top_n: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            peak_distance: 5,
            top_n: 10,
        }
    }
}
