//! Client-side controllers for the journal web API.
//!
//! Everything here is presentation-agnostic: controllers talk to the
//! server through the [`JournalApi`] trait and report to the caller
//! through sink traits, so the state machines can be unit-tested
//! without a terminal (or any rendering surface) attached.

pub mod api;
pub mod chat;
pub mod conversation;
pub mod debounce;
pub mod error;
pub mod feed;
pub mod highlight;
pub mod reports;
pub mod stats;

pub use api::{ChatStream, HttpJournalApi, JournalApi, CONVERSATION_ID_HEADER};
pub use chat::{ChatClient, ChatSink, ChatState};
pub use conversation::{ConversationStore, FileConversationStore, InMemoryConversationStore};
pub use debounce::{ScrollGate, SearchDebouncer};
pub use error::ClientError;
pub use feed::{EntryFeed, FeedSink, LoadOutcome};
