//! Chat client tests over a real HTTP boundary: streaming consumption,
//! conversation-id persistence across process lifetimes, error surfacing.

use journal::client::{ChatClient, ChatSink, ChatState, ClientError, FileConversationStore, HttpJournalApi};
use mockito::Matcher;
use serde_json::json;
use tempfile::TempDir;

#[derive(Default)]
struct RecordingSink {
    user: Vec<String>,
    chunks: Vec<String>,
    errors: Vec<String>,
    done: usize,
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

fn store_in(dir: &TempDir) -> FileConversationStore {
    FileConversationStore::new(dir.path().join("journal").join("conversation_id"))
}

#[tokio::test]
async fn issued_id_is_stored_on_disk_and_included_in_the_next_send() {
    let mut server = mockito::Server::new_async().await;
    let dir = TempDir::new().unwrap();

    let first = server
        .mock("POST", "/api/chat")
        .match_body(Matcher::Json(json!({ "message": "hello" })))
        .with_header("X-Conversation-Id", "abc123")
        .with_body("Hi! How was your day?")
        .expect(1)
        .create_async()
        .await;
    let second = server
        .mock("POST", "/api/chat")
        .match_body(Matcher::Json(json!({
            "message": "fine",
            "conversation_id": "abc123"
        })))
        .with_body("Glad to hear it.")
        .expect(1)
        .create_async()
        .await;

    let api = HttpJournalApi::new(&server.url(), 5);
    let mut chat = ChatClient::new(store_in(&dir));
    let mut sink = RecordingSink::default();

    let outcome = chat.send("hello", &api, &mut sink).await.unwrap().unwrap();
    assert_eq!(outcome.reply, "Hi! How was your day?");
    assert_eq!(outcome.conversation_id.as_deref(), Some("abc123"));
    assert_eq!(sink.chunks.concat(), "Hi! How was your day?");
    assert_eq!(sink.done, 1);
    assert_eq!(chat.state(), ChatState::Idle);

    // Written through to disk before the body was drained.
    let on_disk =
        std::fs::read_to_string(dir.path().join("journal").join("conversation_id")).unwrap();
    assert_eq!(on_disk.trim(), "abc123");

    chat.send("fine", &api, &mut sink).await.unwrap();

    first.assert_async().await;
    second.assert_async().await;
}

#[tokio::test]
async fn a_restarted_client_resumes_the_stored_thread() {
    let mut server = mockito::Server::new_async().await;
    let dir = TempDir::new().unwrap();
    {
        use journal::client::ConversationStore;
        store_in(&dir).save("abc123").unwrap();
    }

    let resumed = server
        .mock("POST", "/api/chat")
        .match_body(Matcher::Json(json!({
            "message": "back again",
            "conversation_id": "abc123"
        })))
        .with_body("Welcome back.")
        .expect(1)
        .create_async()
        .await;

    // Fresh client, same storage location — as after a page reload.
    let api = HttpJournalApi::new(&server.url(), 5);
    let mut chat = ChatClient::new(store_in(&dir));
    assert_eq!(chat.conversation_id(), Some("abc123"));

    let mut sink = RecordingSink::default();
    chat.send("back again", &api, &mut sink).await.unwrap();
    resumed.assert_async().await;
}

#[tokio::test]
async fn error_status_surfaces_the_body_as_error_text() {
    let mut server = mockito::Server::new_async().await;
    let dir = TempDir::new().unwrap();

    server
        .mock("POST", "/api/chat")
        .with_status(503)
        .with_body("assistant is overloaded, try later")
        .create_async()
        .await;

    let api = HttpJournalApi::new(&server.url(), 5);
    let mut chat = ChatClient::new(store_in(&dir));
    let mut sink = RecordingSink::default();

    let err = chat.send("hello", &api, &mut sink).await.unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 503, .. }));
    // Error text is the server's body, routed to the error channel —
    // never to the assistant-text channel.
    assert_eq!(sink.errors, vec!["assistant is overloaded, try later"]);
    assert!(sink.chunks.is_empty());
    assert_eq!(chat.state(), ChatState::Errored);
    // Nothing persisted for a failed exchange.
    assert!(!dir.path().join("journal").join("conversation_id").exists());
}

#[tokio::test]
async fn whitespace_message_never_reaches_the_network() {
    let mut server = mockito::Server::new_async().await;
    let dir = TempDir::new().unwrap();

    let untouched = server
        .mock("POST", "/api/chat")
        .expect(0)
        .create_async()
        .await;

    let api = HttpJournalApi::new(&server.url(), 5);
    let mut chat = ChatClient::new(store_in(&dir));
    let mut sink = RecordingSink::default();

    let outcome = chat.send("   ", &api, &mut sink).await.unwrap();
    assert!(outcome.is_none());
    assert!(sink.user.is_empty());
    untouched.assert_async().await;
}

#[tokio::test]
async fn missing_header_leaves_the_conversation_unthreaded() {
    let mut server = mockito::Server::new_async().await;
    let dir = TempDir::new().unwrap();

    server
        .mock("POST", "/api/chat")
        .match_body(Matcher::Json(json!({ "message": "hi" })))
        .with_body("Hello.")
        .create_async()
        .await;

    let api = HttpJournalApi::new(&server.url(), 5);
    let mut chat = ChatClient::new(store_in(&dir));
    let mut sink = RecordingSink::default();

    let outcome = chat.send("hi", &api, &mut sink).await.unwrap().unwrap();
    assert!(outcome.conversation_id.is_none());
    assert!(!dir.path().join("journal").join("conversation_id").exists());
}
