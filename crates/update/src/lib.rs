pub mod ingestor;
pub mod xkcd;

pub use ingestor::Ingestor;
pub use xkcd::UpstreamClient;
