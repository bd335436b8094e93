pub mod config;
pub mod error;
pub mod logging;
pub mod model;

pub use error::CoreError;
pub use model::*;
