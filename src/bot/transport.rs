//! Outbound reply channel.
//!
//! The dispatcher, dialogs and handlers only see the `Transport` trait. The
//! Telegram implementation maps the neutral message types onto teloxide
//! requests.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{
    InlineKeyboardButton, InlineKeyboardMarkup, InputFile, InputMedia, InputMediaDocument,
    InputMediaPhoto, KeyboardButton, KeyboardMarkup, ReplyMarkup,
};
use thiserror::Error;
use tracing::warn;

use super::dispatcher::ThrottledBot;
use crate::models::{
    Attachment, AttachmentKind, CallbackEvent, InlineButton, Keyboard, OutgoingMessage, Peer,
};

/// Failure to deliver a reply. Logged by callers, never retried.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("telegram request failed: {0}")]
    Request(#[from] teloxide::RequestError),

    #[error("transport rejected message: {0}")]
    Rejected(String),
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a message (with optional keyboard and attachments) to a peer.
    async fn send(&self, peer: Peer, message: OutgoingMessage) -> Result<(), TransportError>;

    /// Acknowledge a button press so the client stops its spinner.
    async fn acknowledge_callback(&self, event: &CallbackEvent) -> Result<(), TransportError>;
}

/// Telegram transport over the throttled bot.
#[derive(Clone)]
pub struct TelegramTransport {
    bot: ThrottledBot,
}

impl TelegramTransport {
    pub fn new(bot: ThrottledBot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Transport for TelegramTransport {
    async fn send(&self, peer: Peer, message: OutgoingMessage) -> Result<(), TransportError> {
        let chat_id = ChatId(peer.0);
        let markup = message.keyboard.as_ref().map(reply_markup);
        let OutgoingMessage {
            text, attachments, ..
        } = message;

        match attachments.len() {
            0 => {
                let mut request = self.bot.send_message(chat_id, text);
                if let Some(markup) = markup {
                    request = request.reply_markup(markup);
                }
                request.await?;
            }
            1 => {
                let Some(attachment) = attachments.into_iter().next() else {
                    return Err(TransportError::Rejected("attachment vanished".to_string()));
                };
                let file = InputFile::memory(attachment.bytes).file_name(attachment.file_name);
                match attachment.kind {
                    AttachmentKind::Photo => {
                        let mut request = self.bot.send_photo(chat_id, file).caption(text);
                        if let Some(markup) = markup {
                            request = request.reply_markup(markup);
                        }
                        request.await?;
                    }
                    AttachmentKind::Document => {
                        let mut request = self.bot.send_document(chat_id, file).caption(text);
                        if let Some(markup) = markup {
                            request = request.reply_markup(markup);
                        }
                        request.await?;
                    }
                }
            }
            _ => {
                let media = media_group(attachments, text);
                self.bot.send_media_group(chat_id, media).await?;
            }
        }

        Ok(())
    }

    async fn acknowledge_callback(&self, event: &CallbackEvent) -> Result<(), TransportError> {
        self.bot.answer_callback_query(event.event_id.clone()).await?;
        Ok(())
    }
}

fn reply_markup(keyboard: &Keyboard) -> ReplyMarkup {
    match keyboard {
        Keyboard::Menu(rows) => {
            let rows = rows
                .iter()
                .map(|row| row.iter().map(KeyboardButton::new).collect::<Vec<_>>());
            KeyboardMarkup::new(rows).into()
        }
        Keyboard::Inline(rows) => {
            let rows = rows
                .iter()
                .map(|row| row.iter().filter_map(inline_button).collect::<Vec<_>>());
            InlineKeyboardMarkup::new(rows).into()
        }
    }
}

fn inline_button(button: &InlineButton) -> Option<InlineKeyboardButton> {
    match button {
        InlineButton::Url { text, url } => match url.parse() {
            Ok(url) => Some(InlineKeyboardButton::url(text.clone(), url)),
            Err(e) => {
                warn!("Dropping button '{}' with bad url {}: {}", text, url, e);
                None
            }
        },
        InlineButton::Callback { text, payload } => {
            Some(InlineKeyboardButton::callback(text.clone(), payload.clone()))
        }
    }
}

/// Telegram puts the caption on the first item of a media group.
fn media_group(attachments: Vec<Attachment>, caption: String) -> Vec<InputMedia> {
    attachments
        .into_iter()
        .enumerate()
        .map(|(index, attachment)| {
            let file = InputFile::memory(attachment.bytes).file_name(attachment.file_name);
            match attachment.kind {
                AttachmentKind::Photo => {
                    let mut media = InputMediaPhoto::new(file);
                    if index == 0 {
                        media = media.caption(caption.clone());
                    }
                    InputMedia::Photo(media)
                }
                AttachmentKind::Document => {
                    let mut media = InputMediaDocument::new(file);
                    if index == 0 {
                        media = media.caption(caption.clone());
                    }
                    InputMedia::Document(media)
                }
            }
        })
        .collect()
}
