use std::path::PathBuf;

use dialoguer::Input;

use crate::client::error::ClientError;
use crate::client::{ChatClient, FileConversationStore, HttpJournalApi};
use crate::commands::render::{RevealMode, TerminalChat};
use crate::commands::CallableTrait;
use crate::configuration;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// chat — streaming assistant conversation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// `journal chat [MESSAGE] [--no-typing] [--new]`
///
/// One-shot send when a message is given, otherwise a REPL. The
/// conversation id survives restarts via the conversation store, so the
/// assistant keeps its thread until `--new`.
pub struct ChatCommand {
    pub message: Option<String>,
    pub no_typing: bool,
    pub new_conversation: bool,
}

impl ChatCommand {
    pub fn new(message: Option<String>, no_typing: bool, new_conversation: bool) -> Self {
        Self {
            message,
            no_typing,
            new_conversation,
        }
    }
}

impl CallableTrait for ChatCommand {
    fn call(&self) -> Result<(), Box<dyn std::error::Error>> {
        let settings = configuration::get_settings()
            .map_err(|e| ClientError::Config(e.to_string()))?;

        let store = match &settings.chat.conversation_path {
            Some(path) => FileConversationStore::new(PathBuf::from(path)),
            None => FileConversationStore::with_default_path(),
        };
        let mut chat = ChatClient::new(store);
        if self.new_conversation {
            chat.new_conversation()?;
        }

        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ClientError::Config(format!("Failed to create async runtime: {}", e)))?;

        rt.block_on(async {
            let api = HttpJournalApi::new(&settings.server.base_url, settings.server.timeout_secs);
            let mode = RevealMode::resolve(&settings.chat, self.no_typing);
            let mut sink = TerminalChat::new(mode);

            if let Some(message) = &self.message {
                let result = chat.send(message, &api, &mut sink).await;
                sink.settle().await;
                match result {
                    Ok(Some(_)) => Ok(()),
                    Ok(None) => Err(Box::new(ClientError::InvalidInput(
                        "message is empty".to_string(),
                    )) as Box<dyn std::error::Error>),
                    Err(err) => Err(Box::new(err) as Box<dyn std::error::Error>),
                }
            } else {
                repl(&mut chat, &api, &mut sink).await
            }
        })
    }
}

async fn repl(
    chat: &mut ChatClient<FileConversationStore>,
    api: &HttpJournalApi,
    sink: &mut TerminalChat,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Chat with your journal. /quit to leave.");
    loop {
        let line: String = Input::new()
            .with_prompt("›")
            .allow_empty(true)
            .interact_text()?;

        let trimmed = line.trim();
        if trimmed == "/quit" || trimmed == "/exit" {
            break;
        }

        // Empty input is a silent no-op; failures were rendered by the
        // sink and the loop stays usable.
        let _ = chat.send(&line, api, sink).await;
        sink.settle().await;
    }
    Ok(())
}
