use std::fmt;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// ClientError — unified error hierarchy for client operations
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug)]
pub enum ClientError {
    /// Transport-level failure (connect, timeout, body read).
    Http(reqwest::Error),
    /// Non-success HTTP status; `body` is the raw response text.
    Api { status: u16, body: String },
    /// Response arrived but did not match the expected shape.
    Malformed(String),
    /// A chat send was attempted while another one is in flight.
    ChatBusy,
    /// Conversation-id storage failure.
    Storage(std::io::Error),
    /// Settings could not be loaded or are inconsistent.
    Config(String),
    /// Caller-supplied input rejected before any network call.
    InvalidInput(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(source) => {
                write!(f, "Request failed: {source}")
            }
            Self::Api { status, body } => {
                if body.is_empty() {
                    write!(f, "Server returned HTTP {status}")
                } else {
                    write!(f, "Server returned HTTP {status}: {body}")
                }
            }
            Self::Malformed(msg) => {
                write!(f, "Unexpected server response: {msg}")
            }
            Self::ChatBusy => {
                write!(f, "A chat message is already being sent. Wait for the reply to finish.")
            }
            Self::Storage(source) => {
                write!(f, "Conversation storage error: {source}")
            }
            Self::Config(msg) => {
                write!(f, "Configuration error: {msg}")
            }
            Self::InvalidInput(msg) => {
                write!(f, "Invalid input: {msg}")
            }
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Http(source) => Some(source),
            Self::Storage(source) => Some(source),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(source: reqwest::Error) -> Self {
        Self::Http(source)
    }
}

impl From<std::io::Error> for ClientError {
    fn from(source: std::io::Error) -> Self {
        Self::Storage(source)
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(source: serde_json::Error) -> Self {
        Self::Malformed(source.to_string())
    }
}
