pub mod auth;
pub mod concurrency;
pub mod rate;
