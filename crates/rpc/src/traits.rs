use std::time::Duration;

use async_trait::async_trait;

use crate::error::RpcError;
use crate::message::Message;
use crate::reqrep::ReplyToken;

/// Sends a request and awaits its matched reply.
#[async_trait]
pub trait RequestSender: Send + Sync {
    /// Send a request and wait for a single reply matched by `correlation_id`.
    async fn request(&self, msg: Message, timeout: Duration) -> Result<Message, RpcError>;
}

/// Receives requests and sends replies addressed to the originating client.
#[async_trait]
pub trait RequestHandler: Send + Sync {
    /// Receive the next request from any connected client.
    async fn recv_request(&self) -> Result<(ReplyToken, Message), RpcError>;

    /// Send a reply to the client identified by the given token.
    async fn send_reply(&self, token: ReplyToken, reply: Message) -> Result<(), RpcError>;
}
