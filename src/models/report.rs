use serde::{Deserialize, Serialize};
use std::fmt;

/// Generated report as returned by `/api/get_report` and
/// `/api/generate_report`. `content` is an HTML fragment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub content: String,
    pub generated_at: String,
}

/// Cadence of a report. `Custom` requires explicit start/end dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeRange {
    Daily,
    Weekly,
    Monthly,
    Custom,
}

impl TimeRange {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "daily" => Some(Self::Daily),
            "weekly" => Some(Self::Weekly),
            "monthly" => Some(Self::Monthly),
            "custom" => Some(Self::Custom),
            _ => None,
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Custom => "custom",
        };
        write!(f, "{label}")
    }
}

/// Lookup key for a report.
///
/// Mirrors the uniqueness constraint on the server's `reports` table:
/// `(category, time_range, start_date, end_date)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportParams {
    pub category: String,
    pub time_range: TimeRange,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}
