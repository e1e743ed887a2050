use serde::{Deserialize, Serialize};

/// Aggregate series from `GET /api/journal_stats`.
///
/// The three arrays are parallel: `dates[i]` pairs with
/// `entries_per_day[i]` and `words_per_entry[i]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalStats {
    pub first_entry_date: Option<String>,
    pub dates: Vec<String>,
    pub entries_per_day: Vec<i64>,
    pub words_per_entry: Vec<f64>,
}

/// One point of a per-day count series (`daily_entries`, `word_frequency`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimePoint {
    pub date: String,
    pub count: i64,
}

/// One point of the entry-length series (`entry_lengths`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LengthPoint {
    pub date: String,
    pub length: i64,
}
