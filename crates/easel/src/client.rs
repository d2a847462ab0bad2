//! Board clients.
//!
//! A [`BoardClient`] creates items on a remote board and hands back the
//! identifier the board assigned. [`MiroClient`] talks to the Miro REST API;
//! [`DryRunClient`] only logs what it would create and is used for offline
//! runs and previews.

mod dry_run;
mod miro;

pub use dry_run::DryRunClient;
pub use miro::MiroClient;

use std::fmt;

use thiserror::Error;

use easel_core::command::{ElementKind, Frame, Shape, Sticky, Text};

/// Identifier the board assigned to a created item.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemId(String);

impl ItemId {
    /// Creates a new [`ItemId`].
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the identifier is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Board collection an item is created in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Frames,
    Shapes,
    StickyNotes,
    Texts,
    Connectors,
}

impl Endpoint {
    /// Returns the endpoint that creates items of `kind`.
    pub fn for_element(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Frame => Endpoint::Frames,
            ElementKind::Shape => Endpoint::Shapes,
            ElementKind::Sticky => Endpoint::StickyNotes,
            ElementKind::Connector => Endpoint::Connectors,
            ElementKind::Text => Endpoint::Texts,
        }
    }

    /// Returns the URL path segment of the endpoint.
    pub fn as_str(self) -> &'static str {
        match self {
            Endpoint::Frames => "frames",
            Endpoint::Shapes => "shapes",
            Endpoint::StickyNotes => "sticky_notes",
            Endpoint::Texts => "texts",
            Endpoint::Connectors => "connectors",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure to create a board item.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request to `{endpoint}` timed out")]
    Timeout { endpoint: Endpoint },

    #[error("`{endpoint}` rejected the request with status {status}: {details}")]
    Rejected {
        endpoint: Endpoint,
        status: u16,
        details: String,
    },

    #[error("sticky note color `{color}` is not accepted by the board")]
    InvalidColor { color: String, allowed: Vec<String> },

    #[error("`{endpoint}` did not return an item id")]
    MissingId { endpoint: Endpoint },

    #[error("request to `{endpoint}` failed: {message}")]
    Transport { endpoint: Endpoint, message: String },
}

impl ClientError {
    /// Returns a hint for fixing the failure, when one is known.
    pub fn help(&self) -> Option<String> {
        match self {
            ClientError::InvalidColor { allowed, .. } => {
                Some(format!("sticky notes accept: {}", allowed.join(", ")))
            }
            ClientError::Timeout { .. } => {
                Some("raise `timeout_secs` in the `[api]` config section".to_string())
            }
            _ => None,
        }
    }
}

/// Creates items on a remote board.
///
/// Every method returns the identifier the board assigned to the new item.
pub trait BoardClient {
    fn create_frame(&mut self, frame: &Frame) -> Result<ItemId, ClientError>;

    fn create_shape(&mut self, shape: &Shape) -> Result<ItemId, ClientError>;

    fn create_sticky(&mut self, sticky: &Sticky) -> Result<ItemId, ClientError>;

    fn create_text(&mut self, text: &Text) -> Result<ItemId, ClientError>;

    /// Connects two existing items. An empty `label` means no caption.
    fn create_connector(
        &mut self,
        start: &ItemId,
        end: &ItemId,
        label: &str,
    ) -> Result<ItemId, ClientError>;
}

impl<C: BoardClient + ?Sized> BoardClient for Box<C> {
    fn create_frame(&mut self, frame: &Frame) -> Result<ItemId, ClientError> {
        (**self).create_frame(frame)
    }

    fn create_shape(&mut self, shape: &Shape) -> Result<ItemId, ClientError> {
        (**self).create_shape(shape)
    }

    fn create_sticky(&mut self, sticky: &Sticky) -> Result<ItemId, ClientError> {
        (**self).create_sticky(sticky)
    }

    fn create_text(&mut self, text: &Text) -> Result<ItemId, ClientError> {
        (**self).create_text(text)
    }

    fn create_connector(
        &mut self,
        start: &ItemId,
        end: &ItemId,
        label: &str,
    ) -> Result<ItemId, ClientError> {
        (**self).create_connector(start, end, label)
    }
}

/// Access token and board identifier for a remote board.
#[derive(Clone)]
pub struct Credentials {
    token: String,
    board_id: String,
}

impl Credentials {
    pub fn new(token: impl Into<String>, board_id: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            board_id: board_id.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn board_id(&self) -> &str {
        &self.board_id
    }

    /// Returns the first characters of the token followed by `...`.
    pub fn masked_token(&self) -> String {
        let prefix: String = self.token.chars().take(10).collect();
        format!("{prefix}...")
    }

    /// Returns the browser URL of the board.
    pub fn board_url(&self) -> String {
        format!("https://miro.com/app/board/{}/", self.board_id)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &self.masked_token())
            .field("board_id", &self.board_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_masks_token() {
        let credentials = Credentials::new("eyJtaXJvLm9yaWdpbiI6ImV1MDEifQ", "uXjVK123=");

        let debug = format!("{credentials:?}");

        assert!(debug.contains("eyJtaXJvLm..."));
        assert!(!debug.contains("eyJtaXJvLm9yaWdpbiI6ImV1MDEifQ"));
        assert!(debug.contains("uXjVK123="));
    }

    #[test]
    fn test_board_url() {
        let credentials = Credentials::new("token", "uXjVK123=");
        assert_eq!(
            credentials.board_url(),
            "https://miro.com/app/board/uXjVK123=/"
        );
    }

    #[test]
    fn test_endpoint_for_element() {
        assert_eq!(
            Endpoint::for_element(ElementKind::Sticky).as_str(),
            "sticky_notes"
        );
        assert_eq!(
            Endpoint::for_element(ElementKind::Connector).to_string(),
            "connectors"
        );
    }

    #[test]
    fn test_invalid_color_help_lists_allowed() {
        let err = ClientError::InvalidColor {
            color: "#123456".to_string(),
            allowed: vec!["gray".to_string(), "yellow".to_string()],
        };

        assert_eq!(
            err.to_string(),
            "sticky note color `#123456` is not accepted by the board"
        );
        assert_eq!(err.help().as_deref(), Some("sticky notes accept: gray, yellow"));
    }
}
