//! Journal server API transport.
//!
//! [`JournalApi`] is the dependency-injection seam: controllers only see
//! the trait, production wires in [`HttpJournalApi`], tests script a stub.
//!
//! Endpoints (server-defined contracts):
//! - `GET  /api/entries?page&per_page&category&search`
//! - `GET  /api/categories`
//! - `PUT/DELETE /api/entries/{id}`
//! - `POST /api/chat` (chunked text stream, `X-Conversation-Id` header)
//! - `GET  /api/journal_stats`, `/api/stats/*`
//! - `GET  /api/get_report`, `/api/generate_report`

use async_trait::async_trait;
use futures_util::stream::BoxStream;
use futures_util::StreamExt;

use crate::client::error::ClientError;
use crate::models::{
    ChatRequest, Entry, EntryQuery, JournalStats, LengthPoint, Report, ReportParams, TimePoint,
};

/// Response header carrying the server-issued conversation id.
pub const CONVERSATION_ID_HEADER: &str = "X-Conversation-Id";

/// An open chat response: the conversation id (read from the response
/// headers before the body is touched) plus the raw chunk stream. The
/// body is never buffered whole.
pub struct ChatStream {
    pub conversation_id: Option<String>,
    pub chunks: BoxStream<'static, Result<Vec<u8>, ClientError>>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// JournalApi trait — abstraction for testability (DIP)
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[async_trait]
pub trait JournalApi: Send + Sync {
    /// Sorted list of category labels.
    async fn categories(&self) -> Result<Vec<String>, ClientError>;

    /// One page of entries for the given cursor. A short or empty list
    /// signals the end of pages; interpreting that is the feed's job.
    async fn entries(&self, query: &EntryQuery) -> Result<Vec<Entry>, ClientError>;

    async fn update_entry(&self, id: i64, content: &str) -> Result<(), ClientError>;

    async fn delete_entry(&self, id: i64) -> Result<(), ClientError>;

    /// Open a streaming chat exchange. `conversation_id` is sent only
    /// when a prior exchange issued one.
    async fn chat(
        &self,
        message: &str,
        conversation_id: Option<&str>,
    ) -> Result<ChatStream, ClientError>;

    async fn journal_stats(
        &self,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<JournalStats, ClientError>;

    async fn daily_entries(&self) -> Result<Vec<TimePoint>, ClientError>;

    async fn word_frequency(&self, word: &str) -> Result<Vec<TimePoint>, ClientError>;

    async fn entry_lengths(&self) -> Result<Vec<LengthPoint>, ClientError>;

    /// Previously generated report, or `None` when the server has none
    /// for this key (HTTP 404).
    async fn get_report(&self, params: &ReportParams) -> Result<Option<Report>, ClientError>;

    async fn generate_report(&self, params: &ReportParams) -> Result<Report, ClientError>;
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// HttpJournalApi — reqwest implementation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub struct HttpJournalApi {
    base_url: String,
    http: reqwest::Client,
}

impl HttpJournalApi {
    pub fn new(base_url: &str, timeout_secs: u64) -> Self {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Map a non-success status to `ClientError::Api` carrying the body text.
    async fn check(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(ClientError::Api {
            status: status.as_u16(),
            body,
        })
    }

    fn report_query(params: &ReportParams) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("category", params.category.clone()),
            ("time_range", params.time_range.to_string()),
        ];
        if let Some(start) = &params.start_date {
            query.push(("start_date", start.clone()));
        }
        if let Some(end) = &params.end_date {
            query.push(("end_date", end.clone()));
        }
        query
    }
}

#[async_trait]
impl JournalApi for HttpJournalApi {
    async fn categories(&self) -> Result<Vec<String>, ClientError> {
        let resp = self.http.get(self.url("/api/categories")).send().await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    #[tracing::instrument(name = "Fetch entries page.", skip(self))]
    async fn entries(&self, query: &EntryQuery) -> Result<Vec<Entry>, ClientError> {
        let mut params = vec![
            ("page", query.page.to_string()),
            ("per_page", query.per_page.to_string()),
        ];
        if let Some(category) = &query.category {
            params.push(("category", category.clone()));
        }
        if let Some(search) = &query.search {
            params.push(("search", search.clone()));
        }

        let resp = self
            .http
            .get(self.url("/api/entries"))
            .query(&params)
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    async fn update_entry(&self, id: i64, content: &str) -> Result<(), ClientError> {
        let resp = self
            .http
            .put(self.url(&format!("/api/entries/{id}")))
            .json(&serde_json::json!({ "content": content }))
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }

    async fn delete_entry(&self, id: i64) -> Result<(), ClientError> {
        let resp = self
            .http
            .delete(self.url(&format!("/api/entries/{id}")))
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }

    #[tracing::instrument(name = "Open chat stream.", skip(self, message))]
    async fn chat(
        &self,
        message: &str,
        conversation_id: Option<&str>,
    ) -> Result<ChatStream, ClientError> {
        let body = ChatRequest {
            message: message.to_string(),
            conversation_id: conversation_id.map(ToOwned::to_owned),
        };
        let resp = self
            .http
            .post(self.url("/api/chat"))
            .json(&body)
            .send()
            .await?;
        let resp = Self::check(resp).await?;

        let conversation_id = resp
            .headers()
            .get(CONVERSATION_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(ToOwned::to_owned);

        let chunks = resp
            .bytes_stream()
            .map(|chunk| {
                chunk
                    .map(|bytes| bytes.to_vec())
                    .map_err(ClientError::from)
            })
            .boxed();

        Ok(ChatStream {
            conversation_id,
            chunks,
        })
    }

    async fn journal_stats(
        &self,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<JournalStats, ClientError> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(start) = start_date {
            params.push(("start_date", start.to_string()));
        }
        if let Some(end) = end_date {
            params.push(("end_date", end.to_string()));
        }
        let resp = self
            .http
            .get(self.url("/api/journal_stats"))
            .query(&params)
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    async fn daily_entries(&self) -> Result<Vec<TimePoint>, ClientError> {
        let resp = self
            .http
            .get(self.url("/api/stats/daily_entries"))
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    async fn word_frequency(&self, word: &str) -> Result<Vec<TimePoint>, ClientError> {
        let resp = self
            .http
            .get(self.url("/api/stats/word_frequency"))
            .query(&[("word", word)])
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    async fn entry_lengths(&self) -> Result<Vec<LengthPoint>, ClientError> {
        let resp = self
            .http
            .get(self.url("/api/stats/entry_lengths"))
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    async fn get_report(&self, params: &ReportParams) -> Result<Option<Report>, ClientError> {
        let resp = self
            .http
            .get(self.url("/api/get_report"))
            .query(&Self::report_query(params))
            .send()
            .await?;
        if resp.status().as_u16() == 404 {
            return Ok(None);
        }
        Ok(Some(Self::check(resp).await?.json().await?))
    }

    async fn generate_report(&self, params: &ReportParams) -> Result<Report, ClientError> {
        let resp = self
            .http
            .get(self.url("/api/generate_report"))
            .query(&Self::report_query(params))
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }
}
