//! Statistics views: fetch the server-computed series and shape them
//! for display. All the math lives server-side; the client only zips
//! parallel arrays and refuses inconsistent ones.

use crate::client::api::JournalApi;
use crate::client::error::ClientError;
use crate::models::{LengthPoint, TimePoint};

/// One row of the overview table: a date with both of its series values.
#[derive(Debug, Clone, serde::Serialize)]
pub struct OverviewRow {
    pub date: String,
    pub entries: i64,
    pub words: f64,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct Overview {
    pub first_entry_date: Option<String>,
    pub rows: Vec<OverviewRow>,
}

/// `GET /api/journal_stats`, zipped into display rows.
///
/// The three arrays are parallel by contract; a length mismatch means
/// the response is unusable, not partially renderable.
pub async fn overview(
    api: &dyn JournalApi,
    start_date: Option<&str>,
    end_date: Option<&str>,
) -> Result<Overview, ClientError> {
    let stats = api.journal_stats(start_date, end_date).await?;

    if stats.dates.len() != stats.entries_per_day.len()
        || stats.dates.len() != stats.words_per_entry.len()
    {
        return Err(ClientError::Malformed(format!(
            "journal_stats arrays disagree: {} dates, {} entry counts, {} word counts",
            stats.dates.len(),
            stats.entries_per_day.len(),
            stats.words_per_entry.len()
        )));
    }

    let rows = stats
        .dates
        .into_iter()
        .zip(stats.entries_per_day)
        .zip(stats.words_per_entry)
        .map(|((date, entries), words)| OverviewRow {
            date,
            entries,
            words,
        })
        .collect();

    Ok(Overview {
        first_entry_date: stats.first_entry_date,
        rows,
    })
}

pub async fn daily_entries(api: &dyn JournalApi) -> Result<Vec<TimePoint>, ClientError> {
    api.daily_entries().await
}

/// Per-day frequency of one word across entry history. The word is
/// required; a blank word is rejected before any network call.
pub async fn word_frequency(
    api: &dyn JournalApi,
    word: &str,
) -> Result<Vec<TimePoint>, ClientError> {
    let word = word.trim();
    if word.is_empty() {
        return Err(ClientError::InvalidInput(
            "a word is required for word frequency".to_string(),
        ));
    }
    api.word_frequency(word).await
}

pub async fn entry_lengths(api: &dyn JournalApi) -> Result<Vec<LengthPoint>, ClientError> {
    api.entry_lengths().await
}

/// Compact text bar for a count relative to the series maximum.
/// Used by the CLI in place of the web charts.
pub fn bar(value: i64, max: i64, width: usize) -> String {
    if max <= 0 || value <= 0 {
        return String::new();
    }
    let filled = ((value as f64 / max as f64) * width as f64).round() as usize;
    "█".repeat(filled.clamp(1, width))
}
