#[derive(Debug, Clone, serde::Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub feed: FeedSettings,
    pub chat: ChatSettings,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct ServerSettings {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct FeedSettings {
    pub page_size: u32,
    // Minimum gap between scroll-triggered load evaluations.
    pub scroll_debounce_ms: u64,
    // Quiet period after the last keystroke before a search fires.
    pub search_debounce_ms: u64,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct ChatSettings {
    /// "typed" or "instant".
    pub reveal: String,
    pub reveal_delay_ms: u64,
    /// Overrides the default conversation-id file location.
    pub conversation_path: Option<String>,
}

/// Read settings from `journal.toml` (optional) with `JOURNAL_*` env
/// overrides, e.g. `JOURNAL_SERVER__BASE_URL=http://host:5003`.
pub fn get_settings() -> Result<Settings, config::ConfigError> {
    config::Config::builder()
        .set_default("server.base_url", "http://localhost:5003")?
        .set_default("server.timeout_secs", 30)?
        .set_default("feed.page_size", 10)?
        .set_default("feed.scroll_debounce_ms", 100)?
        .set_default("feed.search_debounce_ms", 300)?
        .set_default("chat.reveal", "typed")?
        .set_default("chat.reveal_delay_ms", 20)?
        .add_source(config::File::with_name("journal").required(false))
        .add_source(
            config::Environment::with_prefix("JOURNAL")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?
        .try_deserialize()
}
