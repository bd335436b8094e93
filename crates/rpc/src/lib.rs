pub mod clients;
pub mod error;
pub mod message;
pub mod messages;
pub mod reqrep;
pub mod traits;
pub mod transport;

pub use clients::{IngestorClient, NormalizerClient, SearchClient};
pub use error::RpcError;
pub use message::Message;
pub use messages::services;
pub use messages::topics;
pub use reqrep::{ReplyToken, ZmqRequestClient, ZmqRequestServer};
pub use traits::{RequestHandler, RequestSender};
pub use transport::Transport;
