//! In-process stand-in for the fan-out relay service.
//!
//! The relay keeps a registry of connection ids and, on a send from one
//! connection, queues the payload for every other registered connection.
//! It never looks inside payloads. Queues are FIFO per connection; there is
//! no ordering across recipients and nothing is retried.

use std::collections::{BTreeMap, VecDeque};

use log::{debug, warn};

use crate::protocol::{ProtocolError, unframe};

/// Opaque connection identifier handed out on connect.
pub type ConnectionId = String;

const CONNECTION_ID_LEN: usize = 16;

/// Connection registry with one inbound queue per connection.
#[derive(Default)]
pub struct Relay {
    /// Payloads waiting to be polled, keyed by recipient.
    connections: BTreeMap<ConnectionId, VecDeque<String>>,
}

impl Relay {
    /// An empty relay with no connections.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new connection and return its id.
    pub fn connect(&mut self) -> ConnectionId {
        let id = loop {
            let candidate: String = std::iter::repeat_with(fastrand::alphanumeric)
                .take(CONNECTION_ID_LEN)
                .collect();
            if !self.connections.contains_key(&candidate) {
                break candidate;
            }
        };
        debug!("connect {id}");
        self.connections.insert(id.clone(), VecDeque::new());
        id
    }

    /// Deregister a connection. Undelivered payloads are discarded.
    pub fn disconnect(&mut self, id: &str) -> bool {
        debug!("disconnect {id}");
        self.connections.remove(id).is_some()
    }

    pub fn is_connected(&self, id: &str) -> bool {
        self.connections.contains_key(id)
    }

    /// Number of registered connections.
    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    /// Deliver `payload` to every registered connection except `from`.
    /// Returns the number of recipients.
    pub fn send(&mut self, from: &str, payload: &str) -> usize {
        if !self.is_connected(from) {
            warn!("send from unknown connection {from}");
            return 0;
        }
        let mut delivered = 0;
        for (id, queue) in self.connections.iter_mut() {
            if id != from {
                queue.push_back(payload.to_string());
                delivered += 1;
            }
        }
        delivered
    }

    /// Handle a raw `sendmessage` frame from `from`.
    pub fn handle_frame(&mut self, from: &str, raw: &str) -> Result<usize, ProtocolError> {
        let payload = unframe(raw)?;
        Ok(self.send(from, &payload))
    }

    /// Take the next payload queued for `id`.
    pub fn poll(&mut self, id: &str) -> Option<String> {
        self.connections.get_mut(id)?.pop_front()
    }
}
