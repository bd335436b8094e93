//! Topic constants for request/reply routing.
//!
//! Topics follow the pattern `rpc.<service>.<operation>` so a dump of
//! wire traffic reads as a call log even without decoding payloads.

pub const WORDS_PING: &str = "rpc.words.ping";
pub const WORDS_NORM: &str = "rpc.words.norm";

pub const UPDATE_PING: &str = "rpc.update.ping";
pub const UPDATE_UPDATE: &str = "rpc.update.update";
pub const UPDATE_STATS: &str = "rpc.update.stats";
pub const UPDATE_STATUS: &str = "rpc.update.status";
pub const UPDATE_DROP: &str = "rpc.update.drop";

pub const SEARCH_PING: &str = "rpc.search.ping";
pub const SEARCH_SEARCH: &str = "rpc.search.search";
pub const SEARCH_ISEARCH: &str = "rpc.search.isearch";
