use crate::client::error::ClientError;
use crate::client::{reports, HttpJournalApi};
use crate::commands::CallableTrait;
use crate::configuration;
use crate::models::{ReportParams, TimeRange};

/// `journal report --range daily|weekly|monthly|custom --category <C>
///  [--start-date D --end-date D] [--regenerate] [--json]`
///
/// Shows the stored report for the key, generating it server-side when
/// none exists yet.
pub struct ReportCommand {
    pub range: String,
    pub category: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub regenerate: bool,
    pub json: bool,
}

impl ReportCommand {
    pub fn new(
        range: String,
        category: String,
        start_date: Option<String>,
        end_date: Option<String>,
        regenerate: bool,
        json: bool,
    ) -> Self {
        Self {
            range,
            category,
            start_date,
            end_date,
            regenerate,
            json,
        }
    }
}

impl CallableTrait for ReportCommand {
    fn call(&self) -> Result<(), Box<dyn std::error::Error>> {
        let time_range = TimeRange::parse(&self.range).ok_or_else(|| {
            ClientError::InvalidInput(format!(
                "unknown time range '{}': expected daily, weekly, monthly or custom",
                self.range
            ))
        })?;

        // Fixed cadences imply their window; explicit dates win.
        let mut start_date = self.start_date.clone();
        let mut end_date = self.end_date.clone();
        if start_date.is_none() && end_date.is_none() {
            if let Some((start, end)) =
                reports::default_window(time_range, chrono::Local::now().date_naive())
            {
                start_date = Some(start);
                end_date = Some(end);
            }
        }

        let params = ReportParams {
            category: self.category.clone(),
            time_range,
            start_date,
            end_date,
        };

        let settings = configuration::get_settings()
            .map_err(|e| ClientError::Config(e.to_string()))?;

        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ClientError::Config(format!("Failed to create async runtime: {}", e)))?;

        rt.block_on(async {
            let api = HttpJournalApi::new(&settings.server.base_url, settings.server.timeout_secs);
            let report = reports::fetch_or_generate(&api, &params, self.regenerate).await?;

            if self.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
                return Ok(());
            }

            println!("{}", reports::strip_html(&report.content));
            println!();
            println!("Generated at {}", report.generated_at);
            Ok(())
        })
    }
}
