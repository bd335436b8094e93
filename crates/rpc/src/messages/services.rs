//! Request/reply payloads for the three internal RPC services
//! (Normalizer, Ingestor, SearchSvc), carried inside [`Message`](crate::Message)
//! envelopes and serialized with MessagePack.

use comics_core::{Comic, IngestStats, IngestStatus};
use serde::{Deserialize, Serialize};

/// Shared by every service: an empty liveness probe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PingRequest;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PingResponse;

// ─── Normalizer ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormRequest {
    pub phrase: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormResponse {
    pub keywords: Vec<String>,
}

// ─── Ingestor ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRequest;

/// `already_running` is set when `Update` found the single-flight lock
/// already held; the caller (Gateway) maps that to "accepted, in progress"
/// rather than treating it as a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateResponse {
    pub already_running: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsResponse {
    pub stats: IngestStats,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: IngestStatus,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropRequest;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropResponse;

// ─── SearchSvc ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub phrase: String,
    pub limit: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub comics: Vec<Comic>,
    pub total: usize,
}

/// Identical shape to [`SearchRequest`]/[`SearchResponse`]; kept as distinct
/// types so `IndexSearch` and `Search` can't be accidentally interchanged at
/// the call site even though the wire schema matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexSearchRequest {
    pub phrase: String,
    pub limit: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexSearchResponse {
    pub comics: Vec<Comic>,
    pub total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip<T>(val: &T) -> T
    where
        T: Serialize + for<'de> Deserialize<'de> + std::fmt::Debug + PartialEq,
    {
        let bytes = rmp_serde::to_vec(val).expect("serialize");
        rmp_serde::from_slice(&bytes).expect("deserialize")
    }

    #[test]
    fn roundtrip_norm_request_response() {
        let req = NormRequest {
            phrase: "the cats and the Dogs".into(),
        };
        assert_eq!(roundtrip(&req), req);

        let resp = NormResponse {
            keywords: vec!["cat".into(), "dog".into()],
        };
        assert_eq!(roundtrip(&resp), resp);
    }

    #[test]
    fn roundtrip_update_response_already_running() {
        let resp = UpdateResponse {
            already_running: true,
        };
        assert_eq!(roundtrip(&resp), resp);
    }

    #[test]
    fn roundtrip_search_response_carries_comics() {
        let resp = SearchResponse {
            comics: vec![Comic::summary(1, "https://example.com/1.png")],
            total: 1,
        };
        assert_eq!(roundtrip(&resp), resp);
    }

    #[test]
    fn roundtrip_via_message_envelope() {
        use crate::Message;

        let req = NormRequest {
            phrase: "hello world".into(),
        };
        let msg = Message::new(super::super::topics::WORDS_NORM, &req).unwrap();
        let decoded: NormRequest = msg.decode().unwrap();
        assert_eq!(decoded, req);
    }
}
