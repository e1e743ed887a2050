//! Terminal rendering — feed and chat sinks, spinners.
//!
//! The controllers never print; these sinks are the CLI's rendering
//! surface. Chat output optionally simulates human-paced typing: chunks
//! are queued into an unbounded channel and a spawned task reveals them
//! one character at a time, so the network read loop is never blocked
//! by the animation.

use std::io::Write;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::{mpsc, oneshot};

use crate::client::feed::FeedSink;
use crate::client::highlight::highlight;
use crate::client::ChatSink;
use crate::configuration::ChatSettings;
use crate::models::Entry;

const RESET: &str = "\x1b[0m";
const REVERSE: &str = "\x1b[7m";
const RED: &str = "\x1b[31m";
const DIM: &str = "\x1b[2m";

// ── Spinner helpers ──────────────────────────────────

/// Braille dots — clean, modern feel.
const TICK_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

/// Animated spinner shown while a fetch is in flight.
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars(TICK_CHARS)
            .template("{spinner:.cyan} {msg}")
            .expect("invalid spinner template"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// TerminalFeed — FeedSink over stdout
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Prints entries as they are appended, with the active search term in
/// reverse video.
#[derive(Default)]
pub struct TerminalFeed {
    term: String,
    shown: usize,
}

impl TerminalFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Term used for highlighting; keep in sync with the feed's search.
    pub fn set_term(&mut self, term: &str) {
        self.term = term.trim().to_string();
    }

    pub fn shown(&self) -> usize {
        self.shown
    }
}

impl FeedSink for TerminalFeed {
    fn entries_appended(&mut self, entries: &[Entry]) {
        for entry in entries {
            self.shown += 1;
            let labels = entry.category_labels().join(", ");
            println!();
            if labels.is_empty() {
                println!("{DIM}#{} · {}{RESET}", entry.id, entry.date);
            } else {
                println!("{DIM}#{} · {} · {}{RESET}", entry.id, entry.date, labels);
            }
            println!("{}", highlight(&entry.content, &self.term, REVERSE, RESET));
            let keywords = entry.keyword_labels();
            if !keywords.is_empty() {
                println!("{DIM}keywords: {}{RESET}", keywords.join(", "));
            }
        }
    }

    fn cleared(&mut self) {
        self.shown = 0;
        println!("{}", "─".repeat(52));
    }

    fn load_failed(&mut self, message: &str) {
        eprintln!("{RED}✗ {message}{RESET}");
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// TerminalChat — ChatSink with optional typed reveal
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// How assistant text reaches the screen. A presentation choice only;
/// the network stream is consumed the same way in both modes.
#[derive(Debug, Clone, Copy)]
pub enum RevealMode {
    /// Print chunks the moment they arrive.
    Instant,
    /// Reveal one character per tick, human-paced.
    Typed { delay: Duration },
}

impl RevealMode {
    /// Resolve from settings with a CLI override forcing instant mode.
    pub fn resolve(settings: &ChatSettings, no_typing: bool) -> Self {
        if no_typing || settings.reveal != "typed" {
            Self::Instant
        } else {
            Self::Typed {
                delay: Duration::from_millis(settings.reveal_delay_ms),
            }
        }
    }
}

enum RevealEvent {
    Text(String),
    /// Ack once everything queued before this point is on screen.
    Drained(oneshot::Sender<()>),
}

pub struct TerminalChat {
    /// Present only in typed mode.
    queue: Option<mpsc::UnboundedSender<RevealEvent>>,
}

impl TerminalChat {
    /// Must be created inside a tokio runtime in typed mode (the reveal
    /// task is spawned here).
    pub fn new(mode: RevealMode) -> Self {
        let queue = match mode {
            RevealMode::Instant => None,
            RevealMode::Typed { delay } => {
                let (tx, rx) = mpsc::unbounded_channel();
                tokio::spawn(reveal_loop(rx, delay));
                Some(tx)
            }
        };
        Self { queue }
    }

    /// Wait until the reveal queue is fully printed. Call after each
    /// completed send, before redrawing any prompt.
    pub async fn settle(&self) {
        if let Some(queue) = &self.queue {
            let (tx, rx) = oneshot::channel();
            if queue.send(RevealEvent::Drained(tx)).is_ok() {
                let _ = rx.await;
            }
        }
    }
}

impl ChatSink for TerminalChat {
    fn user_message(&mut self, text: &str) {
        println!("{DIM}you ▸{RESET} {text}");
        print!("{DIM}assistant ▸{RESET} ");
        let _ = std::io::stdout().flush();
    }

    fn assistant_chunk(&mut self, text: &str) {
        match &self.queue {
            Some(queue) => {
                // Queued, not printed: receipt never waits on the animation.
                let _ = queue.send(RevealEvent::Text(text.to_string()));
            }
            None => {
                print!("{text}");
                let _ = std::io::stdout().flush();
            }
        }
    }

    fn assistant_done(&mut self) {
        match &self.queue {
            Some(queue) => {
                let _ = queue.send(RevealEvent::Text("\n".to_string()));
            }
            None => println!(),
        }
    }

    fn chat_failed(&mut self, message: &str) {
        println!("{RED}✗ {message}{RESET}");
    }
}

async fn reveal_loop(mut rx: mpsc::UnboundedReceiver<RevealEvent>, delay: Duration) {
    while let Some(event) = rx.recv().await {
        match event {
            RevealEvent::Text(text) => {
                for ch in text.chars() {
                    print!("{ch}");
                    let _ = std::io::stdout().flush();
                    tokio::time::sleep(delay).await;
                }
            }
            RevealEvent::Drained(ack) => {
                let _ = ack.send(());
            }
        }
    }
}
