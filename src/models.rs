//! Transport-neutral message types.
//!
//! Everything the dispatcher, dialogs and command handlers see is expressed
//! with these types. The Telegram layer converts to and from them at the edge.

use std::fmt;

/// Stable identity of a message sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identity(pub u64);

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Conversation context a message arrived in (direct chat or group chat).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Peer(pub i64);

impl Peer {
    /// Direct chats have positive ids, groups negative ones.
    pub fn is_private(self) -> bool {
        self.0 > 0
    }
}

impl fmt::Display for Peer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Coordinates attached to a message.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Inbound text message (text may be empty for location-only messages).
#[derive(Debug, Clone)]
pub struct TextMessage {
    pub identity: Identity,
    pub peer: Peer,
    /// Sender's display name, recorded in the usage log.
    pub display_name: String,
    pub text: String,
    pub location: Option<GeoPoint>,
}

/// Inline-button press.
#[derive(Debug, Clone)]
pub struct CallbackEvent {
    pub identity: Identity,
    pub peer: Peer,
    pub event_id: String,
    pub payload: String,
}

/// Anything the transport delivers to the dispatcher.
#[derive(Debug, Clone)]
pub enum Inbound {
    Text(TextMessage),
    Callback(CallbackEvent),
}

impl Inbound {
    pub fn identity(&self) -> Identity {
        match self {
            Inbound::Text(msg) => msg.identity,
            Inbound::Callback(event) => event.identity,
        }
    }

    pub fn peer(&self) -> Peer {
        match self {
            Inbound::Text(msg) => msg.peer,
            Inbound::Callback(event) => event.peer,
        }
    }
}

/// Inline keyboard button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineButton {
    Url { text: String, url: String },
    Callback { text: String, payload: String },
}

impl InlineButton {
    pub fn url(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self::Url {
            text: text.into(),
            url: url.into(),
        }
    }

    pub fn callback(text: impl Into<String>, payload: impl Into<String>) -> Self {
        Self::Callback {
            text: text.into(),
            payload: payload.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Keyboard {
    /// Persistent reply keyboard with plain-text buttons.
    Menu(Vec<Vec<String>>),
    /// Buttons attached to the message itself.
    Inline(Vec<Vec<InlineButton>>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachmentKind {
    Photo,
    Document,
}

#[derive(Debug, Clone)]
pub struct Attachment {
    pub kind: AttachmentKind,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn photo(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            kind: AttachmentKind::Photo,
            file_name: file_name.into(),
            bytes,
        }
    }

    pub fn document(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            kind: AttachmentKind::Document,
            file_name: file_name.into(),
            bytes,
        }
    }
}

/// A reply, built with the small builder below.
#[derive(Debug, Clone, Default)]
pub struct OutgoingMessage {
    pub text: String,
    pub keyboard: Option<Keyboard>,
    pub attachments: Vec<Attachment>,
}

impl OutgoingMessage {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn keyboard(mut self, keyboard: Option<Keyboard>) -> Self {
        self.keyboard = keyboard;
        self
    }

    #[must_use]
    pub fn attach(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn private_peers_are_positive() {
        assert!(Peer(42).is_private());
        assert!(!Peer(-100123).is_private());
    }

    #[test]
    fn inbound_exposes_common_fields() {
        let event = Inbound::Callback(CallbackEvent {
            identity: Identity(5),
            peer: Peer(-7),
            event_id: "e1".to_string(),
            payload: "decode_airport".to_string(),
        });
        assert_eq!(event.identity(), Identity(5));
        assert_eq!(event.peer(), Peer(-7));
    }
}
