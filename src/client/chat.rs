//! Streaming chat client.
//!
//! One send walks Idle → Sending → Streaming → Idle (or → Errored on
//! failure). The assistant reply is consumed incrementally off the
//! response stream and forwarded to the sink chunk by chunk — never
//! buffered whole. The server-issued conversation id is written through
//! the [`ConversationStore`] the moment it is seen, before the body is
//! drained, so a restart mid-stream still resumes the same thread.

use futures_util::StreamExt;
use tracing::{debug, warn};

use crate::client::api::JournalApi;
use crate::client::conversation::ConversationStore;
use crate::client::error::ClientError;
use crate::models::ChatOutcome;

/// Per-send state, observable for tests and prompts.
///
/// `Errored` persists until the next send so the last failure stays
/// visible; the next send proceeds normally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatState {
    Idle,
    Sending,
    Streaming,
    Errored,
}

/// Where chat output is rendered. Assistant text and error text arrive
/// on different methods so the renderer can distinguish them visually.
pub trait ChatSink {
    /// The user's message, verbatim, rendered before the request opens.
    fn user_message(&mut self, text: &str);
    /// One decoded chunk of assistant text, in arrival order.
    fn assistant_chunk(&mut self, text: &str);
    /// The stream ended cleanly.
    fn assistant_done(&mut self);
    /// The send failed; `message` is the server's error body when there
    /// is one, otherwise a transport description.
    fn chat_failed(&mut self, message: &str);
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// ChatClient — one conversation thread
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub struct ChatClient<S: ConversationStore> {
    store: S,
    conversation_id: Option<String>,
    state: ChatState,
}

impl<S: ConversationStore> ChatClient<S> {
    /// Load any persisted conversation id so the thread resumes across
    /// process restarts. An unreadable store is downgraded to a fresh
    /// conversation, not a startup failure.
    pub fn new(store: S) -> Self {
        let conversation_id = match store.load() {
            Ok(id) => id,
            Err(err) => {
                warn!("could not read stored conversation id: {err}");
                None
            }
        };
        Self {
            store,
            conversation_id,
            state: ChatState::Idle,
        }
    }

    pub fn state(&self) -> ChatState {
        self.state
    }

    pub fn conversation_id(&self) -> Option<&str> {
        self.conversation_id.as_deref()
    }

    /// Drop the held id and its stored copy; the next send starts a
    /// fresh server-side thread.
    pub fn new_conversation(&mut self) -> Result<(), ClientError> {
        self.conversation_id = None;
        self.store.clear()
    }

    /// Send one message and stream the reply into `sink`.
    ///
    /// Whitespace-only input is a no-op: no network call, no rendered
    /// message, `Ok(None)`. A send attempted while another is in flight
    /// fails fast with `ChatBusy` instead of interleaving renders.
    pub async fn send(
        &mut self,
        text: &str,
        api: &dyn JournalApi,
        sink: &mut dyn ChatSink,
    ) -> Result<Option<ChatOutcome>, ClientError> {
        let message = text.trim();
        if message.is_empty() {
            return Ok(None);
        }
        if matches!(self.state, ChatState::Sending | ChatState::Streaming) {
            return Err(ClientError::ChatBusy);
        }

        self.state = ChatState::Sending;
        sink.user_message(message);

        let stream = match api.chat(message, self.conversation_id.as_deref()).await {
            Ok(stream) => stream,
            Err(err) => {
                self.state = ChatState::Errored;
                sink.chat_failed(&surface_text(&err));
                return Err(err);
            }
        };

        if let Some(id) = stream.conversation_id.clone() {
            if self.conversation_id.as_deref() != Some(id.as_str()) {
                debug!("server issued conversation id");
                if let Err(err) = self.store.save(&id) {
                    // The thread still works for this process lifetime.
                    warn!("could not persist conversation id: {err}");
                }
                self.conversation_id = Some(id);
            }
        }

        self.state = ChatState::Streaming;
        let mut reply = String::new();
        let mut chunks = stream.chunks;
        while let Some(chunk) = chunks.next().await {
            match chunk {
                Ok(bytes) => {
                    let text = String::from_utf8_lossy(&bytes).into_owned();
                    sink.assistant_chunk(&text);
                    reply.push_str(&text);
                }
                Err(err) => {
                    self.state = ChatState::Errored;
                    sink.chat_failed(&surface_text(&err));
                    return Err(err);
                }
            }
        }

        sink.assistant_done();
        self.state = ChatState::Idle;
        Ok(Some(ChatOutcome {
            conversation_id: self.conversation_id.clone(),
            reply,
        }))
    }

    #[cfg(test)]
    fn force_state(&mut self, state: ChatState) {
        self.state = state;
    }
}

/// What the user should see for a failed send: the server's own words
/// when it sent any, otherwise the error description.
fn surface_text(err: &ClientError) -> String {
    match err {
        ClientError::Api { body, .. } if !body.is_empty() => body.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::api::ChatStream;
    use crate::client::conversation::InMemoryConversationStore;
    use crate::models::{
        Entry, EntryQuery, JournalStats, LengthPoint, Report, ReportParams, TimePoint,
    };
    use async_trait::async_trait;
    use futures_util::stream;
    use futures_util::StreamExt as _;
    use std::sync::Mutex;

    /// Replays one canned chat response per call and records requests.
    struct ScriptedChatApi {
        issue_id: Option<String>,
        chunks: Vec<&'static str>,
        fail: Option<(u16, &'static str)>,
        requests: Mutex<Vec<(String, Option<String>)>>,
    }

    impl ScriptedChatApi {
        fn streaming(issue_id: Option<&str>, chunks: Vec<&'static str>) -> Self {
            Self {
                issue_id: issue_id.map(ToOwned::to_owned),
                chunks,
                fail: None,
                requests: Mutex::new(Vec::new()),
            }
        }

        fn failing(status: u16, body: &'static str) -> Self {
            Self {
                issue_id: None,
                chunks: Vec::new(),
                fail: Some((status, body)),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<(String, Option<String>)> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl JournalApi for ScriptedChatApi {
        async fn categories(&self) -> Result<Vec<String>, ClientError> {
            unimplemented!()
        }

        async fn entries(&self, _: &EntryQuery) -> Result<Vec<Entry>, ClientError> {
            unimplemented!()
        }

        async fn update_entry(&self, _: i64, _: &str) -> Result<(), ClientError> {
            unimplemented!()
        }

        async fn delete_entry(&self, _: i64) -> Result<(), ClientError> {
            unimplemented!()
        }

        async fn chat(
            &self,
            message: &str,
            conversation_id: Option<&str>,
        ) -> Result<ChatStream, ClientError> {
            self.requests
                .lock()
                .unwrap()
                .push((message.to_string(), conversation_id.map(ToOwned::to_owned)));

            if let Some((status, body)) = self.fail {
                return Err(ClientError::Api {
                    status,
                    body: body.to_string(),
                });
            }

            let chunks = stream::iter(
                self.chunks
                    .iter()
                    .map(|c| Ok(c.as_bytes().to_vec()))
                    .collect::<Vec<_>>(),
            )
            .boxed();

            Ok(ChatStream {
                conversation_id: self.issue_id.clone(),
                chunks,
            })
        }

        async fn journal_stats(
            &self,
            _: Option<&str>,
            _: Option<&str>,
        ) -> Result<JournalStats, ClientError> {
            unimplemented!()
        }

        async fn daily_entries(&self) -> Result<Vec<TimePoint>, ClientError> {
            unimplemented!()
        }

        async fn word_frequency(&self, _: &str) -> Result<Vec<TimePoint>, ClientError> {
            unimplemented!()
        }

        async fn entry_lengths(&self) -> Result<Vec<LengthPoint>, ClientError> {
            unimplemented!()
        }

        async fn get_report(&self, _: &ReportParams) -> Result<Option<Report>, ClientError> {
            unimplemented!()
        }

        async fn generate_report(&self, _: &ReportParams) -> Result<Report, ClientError> {
            unimplemented!()
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        user: Vec<String>,
        chunks: Vec<String>,
        done: usize,
        errors: Vec<String>,
    }

    impl ChatSink for RecordingSink {
        fn user_message(&mut self, text: &str) {
            self.user.push(text.to_string());
        }

        fn assistant_chunk(&mut self, text: &str) {
            self.chunks.push(text.to_string());
        }

        fn assistant_done(&mut self) {
            self.done += 1;
        }

        fn chat_failed(&mut self, message: &str) {
            self.errors.push(message.to_string());
        }
    }

    #[tokio::test]
    async fn whitespace_only_input_is_a_complete_no_op() {
        let api = ScriptedChatApi::streaming(None, vec!["never"]);
        let mut client = ChatClient::new(InMemoryConversationStore::new());
        let mut sink = RecordingSink::default();

        let outcome = client.send("   \n\t", &api, &mut sink).await.unwrap();
        assert!(outcome.is_none());
        assert!(api.requests().is_empty());
        assert!(sink.user.is_empty());
        assert_eq!(client.state(), ChatState::Idle);
    }

    #[tokio::test]
    async fn reply_streams_chunk_by_chunk_and_accumulates() {
        let api = ScriptedChatApi::streaming(Some("abc123"), vec!["Hel", "lo ", "you"]);
        let mut client = ChatClient::new(InMemoryConversationStore::new());
        let mut sink = RecordingSink::default();

        let outcome = client
            .send("  good morning  ", &api, &mut sink)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(outcome.reply, "Hello you");
        assert_eq!(outcome.conversation_id.as_deref(), Some("abc123"));
        assert_eq!(sink.user, vec!["good morning"]);
        assert_eq!(sink.chunks, vec!["Hel", "lo ", "you"]);
        assert_eq!(sink.done, 1);
        assert_eq!(client.state(), ChatState::Idle);
    }

    #[tokio::test]
    async fn issued_id_is_persisted_and_sent_on_the_next_exchange() {
        let store = InMemoryConversationStore::new();
        let api = ScriptedChatApi::streaming(Some("abc123"), vec!["ok"]);
        let mut client = ChatClient::new(store);
        let mut sink = RecordingSink::default();

        client.send("first", &api, &mut sink).await.unwrap();
        assert_eq!(client.conversation_id(), Some("abc123"));

        client.send("second", &api, &mut sink).await.unwrap();
        let requests = api.requests();
        assert_eq!(requests[0].1, None);
        assert_eq!(requests[1].1.as_deref(), Some("abc123"));
    }

    #[tokio::test]
    async fn stored_id_is_loaded_on_construction() {
        let store = InMemoryConversationStore::new();
        store.save("abc123").unwrap();

        let client = ChatClient::new(store);
        assert_eq!(client.conversation_id(), Some("abc123"));
    }

    #[tokio::test]
    async fn http_failure_surfaces_the_response_body() {
        let api = ScriptedChatApi::failing(503, "assistant overloaded");
        let mut client = ChatClient::new(InMemoryConversationStore::new());
        let mut sink = RecordingSink::default();

        let err = client.send("hello", &api, &mut sink).await.unwrap_err();
        assert!(matches!(err, ClientError::Api { status: 503, .. }));
        assert_eq!(sink.errors, vec!["assistant overloaded"]);
        assert_eq!(client.state(), ChatState::Errored);

        // The component stays usable: a later send goes through.
        let api = ScriptedChatApi::streaming(None, vec!["fine now"]);
        let outcome = client.send("again", &api, &mut sink).await.unwrap();
        assert!(outcome.is_some());
        assert_eq!(client.state(), ChatState::Idle);
    }

    #[tokio::test]
    async fn concurrent_send_is_rejected_explicitly() {
        let api = ScriptedChatApi::streaming(None, vec!["x"]);
        let mut client = ChatClient::new(InMemoryConversationStore::new());
        let mut sink = RecordingSink::default();

        client.force_state(ChatState::Streaming);
        let err = client.send("hello", &api, &mut sink).await.unwrap_err();
        assert!(matches!(err, ClientError::ChatBusy));
        assert!(api.requests().is_empty());
    }

    #[tokio::test]
    async fn new_conversation_clears_held_and_stored_id() {
        let store = InMemoryConversationStore::new();
        store.save("abc123").unwrap();
        let mut client = ChatClient::new(store);

        client.new_conversation().unwrap();
        assert!(client.conversation_id().is_none());

        let api = ScriptedChatApi::streaming(None, vec!["hi"]);
        let mut sink = RecordingSink::default();
        client.send("hello", &api, &mut sink).await.unwrap();
        assert_eq!(api.requests()[0].1, None);
    }
}
