use std::time::{Duration, Instant};

use dialoguer::{FuzzySelect, Input, Select};

use crate::client::error::ClientError;
use crate::client::{EntryFeed, HttpJournalApi, JournalApi, LoadOutcome, ScrollGate, SearchDebouncer};
use crate::commands::render::{spinner, TerminalFeed};
use crate::commands::CallableTrait;
use crate::configuration;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// browse — infinite-scroll entry listing with search
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// `journal browse [--category <c>] [--search <q>] [--plain] [--pages N]`
///
/// Interactive by default: a load-more loop standing in for the web
/// front-end's infinite scroll, plus category and search pickers that
/// reset the feed. `--plain` prints a fixed number of pages and exits.
pub struct BrowseCommand {
    pub category: Option<String>,
    pub search: Option<String>,
    pub page_size: Option<u32>,
    pub pages: u32,
    pub plain: bool,
}

impl BrowseCommand {
    pub fn new(
        category: Option<String>,
        search: Option<String>,
        page_size: Option<u32>,
        pages: u32,
        plain: bool,
    ) -> Self {
        Self {
            category,
            search,
            page_size,
            pages,
            plain,
        }
    }
}

impl CallableTrait for BrowseCommand {
    fn call(&self) -> Result<(), Box<dyn std::error::Error>> {
        let settings = configuration::get_settings()
            .map_err(|e| ClientError::Config(e.to_string()))?;

        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ClientError::Config(format!("Failed to create async runtime: {}", e)))?;

        rt.block_on(async {
            let api = HttpJournalApi::new(&settings.server.base_url, settings.server.timeout_secs);
            let mut feed = EntryFeed::new(self.page_size.unwrap_or(settings.feed.page_size));
            feed.set_category(self.category.clone());
            if let Some(search) = &self.search {
                feed.set_search(search);
            }

            let mut sink = TerminalFeed::new();
            sink.set_term(feed.search());

            if self.plain {
                return print_pages(&api, &mut feed, &mut sink, self.pages).await;
            }

            browse_loop(&api, &mut feed, &mut sink, &settings.feed).await
        })
    }
}

async fn print_pages(
    api: &dyn JournalApi,
    feed: &mut EntryFeed,
    sink: &mut TerminalFeed,
    pages: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    // pages == 0 means "until exhausted".
    let mut remaining = if pages == 0 { u32::MAX } else { pages };
    while remaining > 0 && feed.has_more() {
        feed.load_more(api, sink).await?;
        remaining -= 1;
    }
    if sink.shown() == 0 {
        println!("No entries found.");
    }
    Ok(())
}

async fn browse_loop(
    api: &dyn JournalApi,
    feed: &mut EntryFeed,
    sink: &mut TerminalFeed,
    feed_settings: &crate::configuration::FeedSettings,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut gate = ScrollGate::new(Duration::from_millis(feed_settings.scroll_debounce_ms));
    let quiet = Duration::from_millis(feed_settings.search_debounce_ms);
    let mut debouncer = SearchDebouncer::new(quiet);

    load_with_spinner(api, feed, sink).await;

    loop {
        let mut items = vec!["Load more"];
        if !feed.has_more() {
            items[0] = "Load more (end reached)";
        }
        items.extend(["Search", "Filter by category", "Quit"]);

        let choice = Select::new()
            .with_prompt(format!(
                "{} entries shown — page {}",
                sink.shown(),
                feed.page()
            ))
            .items(&items)
            .default(0)
            .interact()?;

        match choice {
            0 => {
                // The gate coalesces rapid repeat triggers, same as the
                // scroll handler it stands in for.
                if gate.should_fire(Instant::now()) {
                    load_with_spinner(api, feed, sink).await;
                }
            }
            1 => {
                let text: String = Input::new()
                    .with_prompt("Search")
                    .allow_empty(true)
                    .interact_text()?;
                debouncer.input(&text, Instant::now());
                // Quiet period before the term settles and fires a reload.
                tokio::time::sleep(quiet).await;
                if let Some(term) = debouncer.take_due(Instant::now()) {
                    feed.set_search(&term);
                    sink.set_term(&term);
                    reset_with_spinner(api, feed, sink).await;
                }
            }
            2 => {
                let category = pick_category(api).await?;
                feed.set_category(category);
                reset_with_spinner(api, feed, sink).await;
            }
            _ => break,
        }
    }

    Ok(())
}

async fn load_with_spinner(api: &dyn JournalApi, feed: &mut EntryFeed, sink: &mut TerminalFeed) {
    let pb = spinner("Loading entries...");
    let outcome = feed.load_more(api, sink).await;
    pb.finish_and_clear();
    match outcome {
        Ok(LoadOutcome::EndReached) => println!("No more entries."),
        Ok(_) => {}
        // The sink already rendered the failure; keep the loop alive so
        // the user can retry.
        Err(_) => {}
    }
}

async fn reset_with_spinner(api: &dyn JournalApi, feed: &mut EntryFeed, sink: &mut TerminalFeed) {
    let pb = spinner("Reloading...");
    let outcome = feed.reset_and_reload(api, sink).await;
    pb.finish_and_clear();
    if matches!(outcome, Ok(LoadOutcome::EndReached)) {
        println!("No entries match.");
    }
}

async fn pick_category(api: &dyn JournalApi) -> Result<Option<String>, Box<dyn std::error::Error>> {
    let pb = spinner("Fetching categories...");
    let categories = api.categories().await;
    pb.finish_and_clear();
    let categories = categories?;

    let mut items = vec!["All".to_string()];
    items.extend(categories);

    let choice = FuzzySelect::new()
        .with_prompt("Category")
        .items(&items)
        .default(0)
        .interact()?;

    if choice == 0 {
        Ok(None)
    } else {
        Ok(Some(items[choice].clone()))
    }
}
