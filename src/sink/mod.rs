//! Message sink abstractions.
//!
//! The pipeline only talks to chat through [`MessageSink`]; it never owns a
//! session or a channel.

#[cfg(feature = "discord")]
pub mod discord;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::Digest;

#[cfg(feature = "discord")]
pub use discord::DiscordSink;

/// An existing message that can be replaced in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageHandle {
    pub channel_id: u64,
    pub message_id: u64,
}

/// Trait for digest destinations.
#[async_trait]
pub trait MessageSink: Send + Sync {
    /// Post a new message and return its id.
    async fn send_new(&self, channel_id: u64, digest: &Digest) -> Result<u64>;

    /// Look up a previously posted message.
    ///
    /// `Ok(None)` means the channel or the message no longer exists. The
    /// implementation logs which one.
    async fn fetch_existing(&self, channel_id: u64, message_id: u64)
    -> Result<Option<MessageHandle>>;

    /// Replace the content of an existing message.
    async fn replace(&self, handle: &MessageHandle, digest: &Digest) -> Result<()>;
}
