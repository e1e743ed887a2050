//! `journal` CLI binary.
//!
//! Terminal front-end for the journal web API:
//!
//! ```text
//! journal browse --search running
//! journal chat "what did I write about last week?"
//! journal stats overview
//! journal report --range weekly --category Health
//! ```

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use journal::telemetry::{get_subscriber, init_subscriber};

#[derive(Parser, Debug)]
#[command(
    name = "journal",
    version,
    about = "Browse, search and chat with your personal journal",
    long_about = "Journal CLI — terminal client for a personal journaling service\n\n\
        Lists entries with incremental loading and search highlighting,\n\
        streams replies from the journal's AI assistant, and renders\n\
        statistics and generated reports."
)]
struct Cli {
    #[command(subcommand)]
    command: JournalCommands,
}

#[derive(Debug, Subcommand)]
enum JournalCommands {
    /// Browse entries with incremental loading, search and category filter
    Browse {
        /// Only entries in this category
        #[arg(long)]
        category: Option<String>,
        /// Free-text search; matches are highlighted
        #[arg(long)]
        search: Option<String>,
        /// Entries per page (default from config)
        #[arg(long, value_name = "N")]
        page_size: Option<u32>,
        /// Non-interactive: print pages and exit
        #[arg(long)]
        plain: bool,
        /// Pages to print with --plain (0 = all)
        #[arg(long, default_value_t = 1, value_name = "N")]
        pages: u32,
    },
    /// Talk to the journal assistant (streams the reply)
    Chat {
        /// Message to send; omit for an interactive session
        message: Option<String>,
        /// Print reply chunks instantly instead of the typing animation
        #[arg(long)]
        no_typing: bool,
        /// Forget the stored conversation and start a fresh thread
        #[arg(long)]
        new: bool,
    },
    /// Replace the content of an entry
    Edit {
        /// Entry id
        id: i64,
        /// New entry content
        #[arg(long)]
        content: String,
    },
    /// Delete an entry
    Delete {
        /// Entry id
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// List category labels in use
    Categories {
        #[arg(long)]
        json: bool,
    },
    /// Statistics over entry history
    Stats {
        #[command(subcommand)]
        command: StatsCommands,
    },
    /// Show (or generate) a summary report
    Report {
        /// daily, weekly, monthly or custom
        #[arg(long)]
        range: String,
        /// Report category, e.g. Work or Health
        #[arg(long)]
        category: String,
        /// Range start (YYYY-MM-DD), required for --range custom
        #[arg(long)]
        start_date: Option<String>,
        /// Range end (YYYY-MM-DD), required for --range custom
        #[arg(long)]
        end_date: Option<String>,
        /// Regenerate even when a stored report exists
        #[arg(long)]
        regenerate: bool,
        #[arg(long)]
        json: bool,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Subcommand)]
enum StatsCommands {
    /// Entries per day and words per entry over a date range
    Overview {
        #[arg(long)]
        start_date: Option<String>,
        #[arg(long)]
        end_date: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Entry count per day
    Daily {
        #[arg(long)]
        json: bool,
    },
    /// How often a word appears per day
    Word {
        word: String,
        #[arg(long)]
        json: bool,
    },
    /// Entry length per day
    Lengths {
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_subscriber(get_subscriber("journal".into(), "warn".into()));

    let cli = Cli::parse();
    let command = get_command(cli)?;
    if let Err(err) = command.call() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
    Ok(())
}

fn get_command(cli: Cli) -> Result<Box<dyn journal::commands::CallableTrait>, Box<dyn std::error::Error>> {
    let cmd: Box<dyn journal::commands::CallableTrait> = match cli.command {
        JournalCommands::Browse {
            category,
            search,
            page_size,
            plain,
            pages,
        } => Box::new(journal::commands::BrowseCommand::new(
            category, search, page_size, pages, plain,
        )),
        JournalCommands::Chat {
            message,
            no_typing,
            new,
        } => Box::new(journal::commands::ChatCommand::new(message, no_typing, new)),
        JournalCommands::Edit { id, content } => {
            Box::new(journal::commands::EditEntryCommand::new(id, content))
        }
        JournalCommands::Delete { id, yes } => {
            Box::new(journal::commands::DeleteEntryCommand::new(id, yes))
        }
        JournalCommands::Categories { json } => {
            Box::new(journal::commands::CategoriesCommand::new(json))
        }
        JournalCommands::Stats { command } => match command {
            StatsCommands::Overview {
                start_date,
                end_date,
                json,
            } => Box::new(journal::commands::StatsOverviewCommand::new(
                start_date, end_date, json,
            )),
            StatsCommands::Daily { json } => {
                Box::new(journal::commands::StatsDailyCommand::new(json))
            }
            StatsCommands::Word { word, json } => {
                Box::new(journal::commands::StatsWordCommand::new(word, json))
            }
            StatsCommands::Lengths { json } => {
                Box::new(journal::commands::StatsLengthsCommand::new(json))
            }
        },
        JournalCommands::Report {
            range,
            category,
            start_date,
            end_date,
            regenerate,
            json,
        } => Box::new(journal::commands::ReportCommand::new(
            range, category, start_date, end_date, regenerate, json,
        )),
        JournalCommands::Completions { shell } => Box::new(CompletionsCommand { shell }),
    };

    Ok(cmd)
}

/// Kept local: completions need the `Cli` type, which lives here.
struct CompletionsCommand {
    shell: Shell,
}

impl journal::commands::CallableTrait for CompletionsCommand {
    fn call(&self) -> Result<(), Box<dyn std::error::Error>> {
        let mut cmd = Cli::command();
        clap_complete::generate(self.shell, &mut cmd, "journal", &mut std::io::stdout());
        Ok(())
    }
}
