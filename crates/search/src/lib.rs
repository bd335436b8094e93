pub mod index;
pub mod service;

pub use index::Index;
pub use service::SearchSvc;
