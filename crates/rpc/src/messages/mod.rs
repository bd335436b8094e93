//! Domain-specific message types for the internal RPC layer.
//!
//! - **Service messages** (`services`): typed request/reply payloads for the
//!   Normalizer, Ingestor, and SearchSvc endpoints
//! - **Topic constants** (`topics`): canonical topic strings for routing

pub mod services;
pub mod topics;

pub use services::*;
