use crate::client::error::ClientError;
use crate::client::{HttpJournalApi, JournalApi};
use crate::commands::CallableTrait;
use crate::configuration;

/// `journal categories [--json]`
///
/// Lists the category labels currently in use across all entries.
pub struct CategoriesCommand {
    pub json: bool,
}

impl CategoriesCommand {
    pub fn new(json: bool) -> Self {
        Self { json }
    }
}

impl CallableTrait for CategoriesCommand {
    fn call(&self) -> Result<(), Box<dyn std::error::Error>> {
        let settings = configuration::get_settings()
            .map_err(|e| ClientError::Config(e.to_string()))?;

        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ClientError::Config(format!("Failed to create async runtime: {}", e)))?;

        rt.block_on(async {
            let api = HttpJournalApi::new(&settings.server.base_url, settings.server.timeout_secs);
            let categories = api.categories().await?;

            if categories.is_empty() {
                eprintln!("No categories yet.");
                return Ok(());
            }

            if self.json {
                println!("{}", serde_json::to_string_pretty(&categories)?);
            } else {
                for category in categories {
                    println!("{category}");
                }
            }
            Ok(())
        })
    }
}
