use crate::client::error::ClientError;
use crate::client::{stats, HttpJournalApi};
use crate::commands::CallableTrait;
use crate::configuration;
use crate::models::{LengthPoint, TimePoint};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// stats — text charts over entry history
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

const BAR_WIDTH: usize = 30;

fn build_runtime() -> Result<tokio::runtime::Runtime, ClientError> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| ClientError::Config(format!("Failed to create async runtime: {}", e)))
}

fn api() -> Result<HttpJournalApi, ClientError> {
    let settings =
        configuration::get_settings().map_err(|e| ClientError::Config(e.to_string()))?;
    Ok(HttpJournalApi::new(
        &settings.server.base_url,
        settings.server.timeout_secs,
    ))
}

fn print_time_points(points: &[TimePoint]) {
    let max = points.iter().map(|p| p.count).max().unwrap_or(0);
    for point in points {
        println!(
            "{:<12} {:>5}  {}",
            point.date,
            point.count,
            stats::bar(point.count, max, BAR_WIDTH)
        );
    }
}

/// `journal stats overview [--start-date D] [--end-date D] [--json]`
pub struct StatsOverviewCommand {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub json: bool,
}

impl StatsOverviewCommand {
    pub fn new(start_date: Option<String>, end_date: Option<String>, json: bool) -> Self {
        Self {
            start_date,
            end_date,
            json,
        }
    }
}

impl CallableTrait for StatsOverviewCommand {
    fn call(&self) -> Result<(), Box<dyn std::error::Error>> {
        let rt = build_runtime()?;
        rt.block_on(async {
            let api = api()?;
            let overview = stats::overview(
                &api,
                self.start_date.as_deref(),
                self.end_date.as_deref(),
            )
            .await?;

            if self.json {
                println!("{}", serde_json::to_string_pretty(&overview)?);
                return Ok(());
            }

            if let Some(first) = &overview.first_entry_date {
                println!("Journaling since {first}");
            }
            if overview.rows.is_empty() {
                println!("No entries in this range.");
                return Ok(());
            }

            let max = overview.rows.iter().map(|r| r.entries).max().unwrap_or(0);
            println!("{:<12} {:>7} {:>11}", "date", "entries", "words/entry");
            for row in &overview.rows {
                println!(
                    "{:<12} {:>7} {:>11.1}  {}",
                    row.date,
                    row.entries,
                    row.words,
                    stats::bar(row.entries, max, BAR_WIDTH)
                );
            }
            Ok(())
        })
    }
}

/// `journal stats daily [--json]`
pub struct StatsDailyCommand {
    pub json: bool,
}

impl StatsDailyCommand {
    pub fn new(json: bool) -> Self {
        Self { json }
    }
}

impl CallableTrait for StatsDailyCommand {
    fn call(&self) -> Result<(), Box<dyn std::error::Error>> {
        let rt = build_runtime()?;
        rt.block_on(async {
            let api = api()?;
            let points = stats::daily_entries(&api).await?;
            if self.json {
                println!("{}", serde_json::to_string_pretty(&points)?);
            } else {
                print_time_points(&points);
            }
            Ok(())
        })
    }
}

/// `journal stats word <WORD> [--json]`
pub struct StatsWordCommand {
    pub word: String,
    pub json: bool,
}

impl StatsWordCommand {
    pub fn new(word: String, json: bool) -> Self {
        Self { word, json }
    }
}

impl CallableTrait for StatsWordCommand {
    fn call(&self) -> Result<(), Box<dyn std::error::Error>> {
        let rt = build_runtime()?;
        rt.block_on(async {
            let api = api()?;
            let points = stats::word_frequency(&api, &self.word).await?;
            if self.json {
                println!("{}", serde_json::to_string_pretty(&points)?);
                return Ok(());
            }
            if points.iter().all(|p| p.count == 0) {
                println!("\"{}\" does not appear in any entry.", self.word.trim());
                return Ok(());
            }
            print_time_points(&points);
            Ok(())
        })
    }
}

/// `journal stats lengths [--json]`
pub struct StatsLengthsCommand {
    pub json: bool,
}

impl StatsLengthsCommand {
    pub fn new(json: bool) -> Self {
        Self { json }
    }
}

impl CallableTrait for StatsLengthsCommand {
    fn call(&self) -> Result<(), Box<dyn std::error::Error>> {
        let rt = build_runtime()?;
        rt.block_on(async {
            let api = api()?;
            let points: Vec<LengthPoint> = stats::entry_lengths(&api).await?;
            if self.json {
                println!("{}", serde_json::to_string_pretty(&points)?);
                return Ok(());
            }
            let max = points.iter().map(|p| p.length).max().unwrap_or(0);
            for point in &points {
                println!(
                    "{:<12} {:>6}  {}",
                    point.date,
                    point.length,
                    stats::bar(point.length, max, BAR_WIDTH)
                );
            }
            Ok(())
        })
    }
}
