use dialoguer::Confirm;

use crate::client::error::ClientError;
use crate::client::{HttpJournalApi, JournalApi};
use crate::commands::CallableTrait;
use crate::configuration;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// edit / delete — single-entry mutations
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// `journal edit <ID> --content <TEXT>`
pub struct EditEntryCommand {
    pub id: i64,
    pub content: String,
}

impl EditEntryCommand {
    pub fn new(id: i64, content: String) -> Self {
        Self { id, content }
    }
}

impl CallableTrait for EditEntryCommand {
    fn call(&self) -> Result<(), Box<dyn std::error::Error>> {
        if self.content.trim().is_empty() {
            return Err(Box::new(ClientError::InvalidInput(
                "content must not be empty".to_string(),
            )));
        }

        let settings = configuration::get_settings()
            .map_err(|e| ClientError::Config(e.to_string()))?;

        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ClientError::Config(format!("Failed to create async runtime: {}", e)))?;

        rt.block_on(async {
            let api = HttpJournalApi::new(&settings.server.base_url, settings.server.timeout_secs);
            api.update_entry(self.id, &self.content).await?;
            println!("Entry #{} updated.", self.id);
            Ok(())
        })
    }
}

/// `journal delete <ID> [--yes]`
pub struct DeleteEntryCommand {
    pub id: i64,
    pub yes: bool,
}

impl DeleteEntryCommand {
    pub fn new(id: i64, yes: bool) -> Self {
        Self { id, yes }
    }
}

impl CallableTrait for DeleteEntryCommand {
    fn call(&self) -> Result<(), Box<dyn std::error::Error>> {
        if !self.yes {
            let confirmed = Confirm::new()
                .with_prompt(format!("Delete entry #{} permanently?", self.id))
                .default(false)
                .interact()?;
            if !confirmed {
                println!("Aborted.");
                return Ok(());
            }
        }

        let settings = configuration::get_settings()
            .map_err(|e| ClientError::Config(e.to_string()))?;

        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ClientError::Config(format!("Failed to create async runtime: {}", e)))?;

        rt.block_on(async {
            let api = HttpJournalApi::new(&settings.server.base_url, settings.server.timeout_secs);
            api.delete_entry(self.id).await?;
            println!("Entry #{} deleted.", self.id);
            Ok(())
        })
    }
}
