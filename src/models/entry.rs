use serde::{Deserialize, Serialize};

/// Journal entry as returned by `GET /api/entries`.
///
/// `category` and `keywords` are comma-separated label lists; the server
/// capitalizes categories on read, the client only splits and trims.
/// `date` is an opaque server timestamp — the client never does date math
/// on it, so it stays a string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    pub id: i64,
    pub date: String,
    pub content: String,
    pub category: Option<String>,
    pub keywords: Option<String>,
}

impl Entry {
    pub fn category_labels(&self) -> Vec<String> {
        split_labels(self.category.as_deref())
    }

    pub fn keyword_labels(&self) -> Vec<String> {
        split_labels(self.keywords.as_deref())
    }
}

fn split_labels(raw: Option<&str>) -> Vec<String> {
    raw.map(|value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .map(ToOwned::to_owned)
            .collect()
    })
    .unwrap_or_default()
}

/// Pagination cursor sent to `GET /api/entries`.
///
/// `page` starts at 1; the feed controller owns the increment/reset rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryQuery {
    pub page: u32,
    pub per_page: u32,
    pub category: Option<String>,
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(category: Option<&str>, keywords: Option<&str>) -> Entry {
        Entry {
            id: 1,
            date: "2024-03-01 08:12:00".to_string(),
            content: "morning pages".to_string(),
            category: category.map(ToOwned::to_owned),
            keywords: keywords.map(ToOwned::to_owned),
        }
    }

    #[test]
    fn labels_split_and_trim() {
        let e = entry(Some("Work, Health ,"), Some("standup,coffee"));
        assert_eq!(e.category_labels(), vec!["Work", "Health"]);
        assert_eq!(e.keyword_labels(), vec!["standup", "coffee"]);
    }

    #[test]
    fn missing_labels_are_empty() {
        let e = entry(None, None);
        assert!(e.category_labels().is_empty());
        assert!(e.keyword_labels().is_empty());
    }
}
