//! Payload envelope passed to and from command handlers.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::BusError;

/// An opaque JSON payload.
///
/// The bus treats the payload as a blob: it checks that the bytes parse as
/// well-formed JSON before any handler sees them, but never parses into a
/// handler-specific shape — that stays the handler's own responsibility,
/// typically via [`Message::decode`].
///
/// ## Example
///
/// ```
/// use command_bus::Message;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Greet {
///     name: String,
/// }
///
/// let msg = Message::encode(&Greet { name: "Alice".into() }).unwrap();
/// let greet: Greet = msg.decode().unwrap();
/// assert_eq!(greet.name, "Alice");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message(Vec<u8>);

impl Message {
    /// Create a message from raw bytes. Validity is not checked here; the
    /// bus checks it at every entry point.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Serialize a value into a JSON message.
    pub fn encode<T: Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        serde_json::to_vec(value).map(Self)
    }

    /// Deserialize the payload into a concrete shape.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.0)
    }

    /// The raw payload bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The payload as a string, if valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.0).ok()
    }

    /// Consume the message, returning the payload bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Check that the payload is well-formed JSON. A pure check: nothing is
    /// retained from the parse. An empty payload is invalid.
    pub(crate) fn valid(&self) -> Result<(), BusError> {
        serde_json::from_slice::<serde::de::IgnoredAny>(&self.0)
            .map(|_| ())
            .map_err(|e| BusError::InvalidPayload(e.to_string()))
    }
}

impl From<&str> for Message {
    fn from(payload: &str) -> Self {
        Self(payload.as_bytes().to_vec())
    }
}

impl From<String> for Message {
    fn from(payload: String) -> Self {
        Self(payload.into_bytes())
    }
}

impl From<Vec<u8>> for Message {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for Message {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_str() {
            Some(s) => f.write_str(s),
            None => write!(f, "<{} bytes>", self.0.len()),
        }
    }
}
