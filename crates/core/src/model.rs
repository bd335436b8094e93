use serde::{Deserialize, Serialize};

/// The hard-coded upstream id that the feed deliberately leaves missing.
///
/// `Ingestor::update` stores a sentinel row for this id so a fresh crawl
/// never re-requests it.
pub const SENTINEL_COMIC_ID: u32 = 404;

/// Canonical row as persisted by the Store.
///
/// `id` is the primary key. `keywords` is conceptually a set, the
/// normalizer already dedupes, but travels as a `Vec` end to end since
/// callers only ever care about its contents, not its type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comic {
    pub id: u32,
    pub image_url: String,
    pub keywords: Vec<String>,
}

impl Comic {
    /// The sentinel row inserted once the upstream 404s on [`SENTINEL_COMIC_ID`].
    pub fn sentinel() -> Self {
        Self {
            id: SENTINEL_COMIC_ID,
            image_url: String::new(),
            keywords: Vec::new(),
        }
    }

    /// A comic as it's returned to search callers: id and url only.
    pub fn summary(id: u32, image_url: impl Into<String>) -> Self {
        Self {
            id,
            image_url: image_url.into(),
            keywords: Vec::new(),
        }
    }
}

/// Transient shape returned by the upstream feed for a single comic.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamEntry {
    #[serde(rename = "num")]
    pub id: u32,
    #[serde(rename = "img")]
    pub image_url: String,
    pub title: String,
    pub alt: String,
    pub transcript: String,
    pub safe_title: String,
}

impl UpstreamEntry {
    /// The phrase fed to the normalizer: title, transcript, safe title, alt , 
    /// in that order, space-joined, matching the upstream's own field order.
    pub fn phrase(&self) -> String {
        format!(
            "{} {} {} {}",
            self.title, self.transcript, self.safe_title, self.alt
        )
    }
}

/// A stored row as the Index refresher reads it: no URL, just enough to
/// build the keyword→ids map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexRow {
    pub id: u32,
    pub keywords: Vec<String>,
}

/// Aggregate counters exposed by `/api/db/stats`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestStats {
    pub words_total: i64,
    pub words_unique: i64,
    pub comics_fetched: i64,
    pub comics_total: i64,
}

/// Single-flight lock state, as reported by `/api/db/status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum IngestStatus {
    Idle,
    Running,
}

impl std::fmt::Display for IngestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IngestStatus::Idle => write!(f, "IDLE"),
            IngestStatus::Running => write!(f, "RUNNING"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_has_no_url_or_keywords() {
        let c = Comic::sentinel();
        assert_eq!(c.id, SENTINEL_COMIC_ID);
        assert!(c.image_url.is_empty());
        assert!(c.keywords.is_empty());
    }

    #[test]
    fn phrase_joins_in_title_transcript_safe_title_alt_order() {
        let entry = UpstreamEntry {
            id: 1,
            image_url: "https://example.com/1.png".into(),
            title: "Title".into(),
            alt: "Alt text".into(),
            transcript: "Transcript".into(),
            safe_title: "Safe Title".into(),
        };
        assert_eq!(entry.phrase(), "Title Transcript Safe Title Alt text");
    }

    #[test]
    fn status_display_matches_wire_strings() {
        assert_eq!(IngestStatus::Idle.to_string(), "IDLE");
        assert_eq!(IngestStatus::Running.to_string(), "RUNNING");
    }
}
