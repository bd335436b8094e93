pub mod client;
pub mod cookie;
pub mod handlers;
pub mod router;
pub mod state;
pub mod templates;

pub use router::build_router;
pub use state::AppState;
