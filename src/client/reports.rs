//! Report view: fetch a cached report or ask the server to generate one.
//!
//! The server keys reports by `(category, time_range, start_date,
//! end_date)`; `get_report` answers 404 until `generate_report` has run
//! for that key.

use chrono::{Days, NaiveDate};
use regex::Regex;
use tracing::debug;

use crate::client::api::JournalApi;
use crate::client::error::ClientError;
use crate::models::{Report, ReportParams, TimeRange};

/// Date window implied by a fixed cadence, ending today: daily covers
/// today, weekly the past 7 days, monthly the past 30. `Custom` has no
/// implied window — the caller must supply explicit dates.
pub fn default_window(range: TimeRange, today: NaiveDate) -> Option<(String, String)> {
    let days_back = match range {
        TimeRange::Daily => 0,
        TimeRange::Weekly => 7,
        TimeRange::Monthly => 30,
        TimeRange::Custom => return None,
    };
    let start = today.checked_sub_days(Days::new(days_back)).unwrap_or(today);
    Some((
        start.format("%Y-%m-%d").to_string(),
        today.format("%Y-%m-%d").to_string(),
    ))
}

/// Fetch the stored report for `params`, generating it when absent or
/// when `regenerate` forces a fresh one. A custom range must carry
/// explicit start and end dates.
pub async fn fetch_or_generate(
    api: &dyn JournalApi,
    params: &ReportParams,
    regenerate: bool,
) -> Result<Report, ClientError> {
    if params.time_range == TimeRange::Custom
        && (params.start_date.is_none() || params.end_date.is_none())
    {
        return Err(ClientError::InvalidInput(
            "a custom time range needs --start-date and --end-date".to_string(),
        ));
    }

    if !regenerate {
        if let Some(report) = api.get_report(params).await? {
            debug!("serving stored report");
            return Ok(report);
        }
        debug!("no stored report, generating");
    }

    api.generate_report(params).await
}

/// Reduce the report's HTML fragment to plain text for the terminal:
/// break tags and paragraph ends become newlines, remaining tags are
/// dropped, and the five standard entities are expanded. Anything
/// fancier stays the web front-end's problem.
pub fn strip_html(fragment: &str) -> String {
    let breaks = Regex::new(r"(?i)<br\s*/?>|</p>|</h[1-6]>|</li>").expect("static pattern");
    let tags = Regex::new(r"<[^>]*>").expect("static pattern");

    let text = breaks.replace_all(fragment, "\n");
    let text = tags.replace_all(&text, "");

    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags_and_keeps_structure() {
        let fragment = "<h2>Weekly</h2><p>Walked <b>daily</b>.</p><p>Slept well.</p>";
        assert_eq!(strip_html(fragment), "Weekly\nWalked daily.\nSlept well.");
    }

    #[test]
    fn expands_entities_after_dropping_tags() {
        assert_eq!(
            strip_html("<p>Tom &amp; Jerry &lt;3 &quot;cheese&quot;</p>"),
            "Tom & Jerry <3 \"cheese\""
        );
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(strip_html("already plain"), "already plain");
    }

    #[test]
    fn cadences_imply_a_window_ending_today() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        assert_eq!(
            default_window(TimeRange::Daily, today),
            Some(("2024-06-15".to_string(), "2024-06-15".to_string()))
        );
        assert_eq!(
            default_window(TimeRange::Weekly, today),
            Some(("2024-06-08".to_string(), "2024-06-15".to_string()))
        );
        assert_eq!(
            default_window(TimeRange::Monthly, today),
            Some(("2024-05-16".to_string(), "2024-06-15".to_string()))
        );
        assert_eq!(default_window(TimeRange::Custom, today), None);
    }
}
