//! Wire messages exchanged between clients.
//!
//! Every message is a JSON object tagged by `action`:
//!
//! ```text
//! { "action": "move", "move": Move }
//! { "action": "reset" }
//! { "action": "sync", "board": Board }
//! { "action": "arrived" }
//! ```
//!
//! Coordinates inside `move` and `board` are always absolute. To reach the
//! other clients a message is wrapped in a relay frame,
//! `{ "action": "sendmessage", "message": "<message json>" }`, and delivered
//! to peers as the bare inner string.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::apply::Move;
use crate::board::Board;
use crate::constants::RELAY_SEND_ACTION;

/// A message exchanged between clients, tagged by `action` on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Message {
    /// A move the sender has already applied locally.
    Move {
        #[serde(rename = "move")]
        mv: Move,
    },
    /// Return to the starting layout.
    Reset,
    /// The sender's full board, replacing the receiver's.
    Sync { board: Box<Board> },
    /// Sent once by a newly connected client; peers answer with `Sync`.
    Arrived,
}

impl Message {
    /// A `sync` message carrying a copy of `board`.
    pub fn sync(board: &Board) -> Self {
        Message::Sync {
            board: Box::new(board.clone()),
        }
    }

    /// The `action` tag this message is sent under.
    pub fn action(&self) -> &'static str {
        match self {
            Message::Move { .. } => "move",
            Message::Reset => "reset",
            Message::Sync { .. } => "sync",
            Message::Arrived => "arrived",
        }
    }
}

/// Errors raised while decoding messages or relay frames.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed message: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unexpected relay action '{0}'")]
    UnexpectedAction(String),
}

/// The relay's request envelope.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayFrame {
    pub action: String,
    pub message: String,
}

/// Serialize a message to its JSON payload.
pub fn encode(message: &Message) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string(message)?)
}

/// Parse a JSON payload received from a peer.
pub fn decode(payload: &str) -> Result<Message, ProtocolError> {
    Ok(serde_json::from_str(payload)?)
}

/// Wrap a message for the relay's `sendmessage` route.
pub fn frame(message: &Message) -> Result<String, ProtocolError> {
    let frame = RelayFrame {
        action: RELAY_SEND_ACTION.to_string(),
        message: encode(message)?,
    };
    Ok(serde_json::to_string(&frame)?)
}

/// Extract the payload from a relay frame.
pub fn unframe(raw: &str) -> Result<String, ProtocolError> {
    let frame: RelayFrame = serde_json::from_str(raw)?;
    if frame.action != RELAY_SEND_ACTION {
        return Err(ProtocolError::UnexpectedAction(frame.action));
    }
    Ok(frame.message)
}
