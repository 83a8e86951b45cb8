// src/sink/discord.rs

//! Discord message sink over the REST API.

use std::sync::Arc;

use async_trait::async_trait;
use serenity::all::{
    ChannelId, CreateEmbed, CreateEmbedFooter, CreateMessage, EditMessage, MessageId,
};
use serenity::http::{Http, HttpError};

use crate::error::{AppError, Result};
use crate::models::{BLANK_FIELD, Digest};
use crate::sink::{MessageHandle, MessageSink};

/// Posts and edits digests as embeds. No gateway session is opened.
pub struct DiscordSink {
    http: Arc<Http>,
}

impl DiscordSink {
    pub fn new(token: &str) -> Self {
        Self {
            http: Arc::new(Http::new(token)),
        }
    }
}

#[async_trait]
impl MessageSink for DiscordSink {
    async fn send_new(&self, channel_id: u64, digest: &Digest) -> Result<u64> {
        if channel_id == 0 {
            return Err(AppError::ChannelNotFound(channel_id));
        }
        let message = CreateMessage::new().embed(to_embed(digest));
        let sent = ChannelId::new(channel_id)
            .send_message(&self.http, message)
            .await
            .map_err(Box::new)?;

        log::info!("Posted new message {} in channel {channel_id}", sent.id);
        Ok(sent.id.get())
    }

    async fn fetch_existing(
        &self,
        channel_id: u64,
        message_id: u64,
    ) -> Result<Option<MessageHandle>> {
        if channel_id == 0 {
            log::warn!("Channel 0 does not exist");
            return Ok(None);
        }
        let channel = ChannelId::new(channel_id);
        match self.http.get_channel(channel).await {
            Ok(_) => {}
            Err(e) if is_not_found(&e) => {
                log::warn!("Channel {channel_id} not found");
                return Ok(None);
            }
            Err(e) => return Err(Box::new(e).into()),
        }

        if message_id == 0 {
            log::warn!("Message 0 does not exist in channel {channel_id}");
            return Ok(None);
        }
        match self
            .http
            .get_message(channel, MessageId::new(message_id))
            .await
        {
            Ok(_) => Ok(Some(MessageHandle {
                channel_id,
                message_id,
            })),
            Err(e) if is_not_found(&e) => {
                log::warn!("Message {message_id} not found in channel {channel_id}");
                Ok(None)
            }
            Err(e) => Err(Box::new(e).into()),
        }
    }

    async fn replace(&self, handle: &MessageHandle, digest: &Digest) -> Result<()> {
        let edit = EditMessage::new().embed(to_embed(digest));
        let edited = ChannelId::new(handle.channel_id)
            .edit_message(&self.http, MessageId::new(handle.message_id), edit)
            .await;
        match edited {
            Ok(_) => {}
            // Deleted between lookup and edit.
            Err(e) if is_not_found(&e) => {
                return Err(AppError::MessageNotFound {
                    channel_id: handle.channel_id,
                    message_id: handle.message_id,
                });
            }
            Err(e) => return Err(e.into()),
        }

        log::debug!(
            "Edited message {} in channel {}",
            handle.message_id,
            handle.channel_id
        );
        Ok(())
    }
}

fn is_not_found(error: &serenity::Error) -> bool {
    matches!(
        error,
        serenity::Error::Http(HttpError::UnsuccessfulRequest(response))
            if response.status_code.as_u16() == 404
    )
}

fn non_blank(text: &str) -> &str {
    if text.is_empty() { BLANK_FIELD } else { text }
}

/// Convert a digest into an embed.
pub fn to_embed(digest: &Digest) -> CreateEmbed {
    let mut embed = CreateEmbed::new()
        .title(&digest.title)
        .color(digest.color);

    if let Some(description) = &digest.description {
        embed = embed.description(description);
    }

    embed = embed.fields(
        digest
            .fields
            .iter()
            .map(|f| (non_blank(&f.name), non_blank(&f.value), f.inline)),
    );

    if let Some(footer) = &digest.footer {
        embed = embed.footer(CreateEmbedFooter::new(footer));
    }

    embed
}
