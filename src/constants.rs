//! Board geometry and rule constants.
//!
//! The board is a fixed 9x9 grid stored in a single absolute orientation.
//! Row 0 is the far edge as seen by the reference side ([`REFERENCE_SIDE`]),
//! so the reference side starts on rows 6-8 and moves towards row 0.

use crate::piece::Side;

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (NxN). Shogi is always played on 9x9.
pub const N: usize = 9;

/// Largest valid coordinate on either axis.
pub const MAX_COORD: u8 = (N - 1) as u8;

// =============================================================================
// Rules
// =============================================================================

/// Number of rows, counted from the far edge, forming a player's promotion zone.
pub const PROMOTION_ZONE_DEPTH: usize = 3;

/// The side whose view matches absolute board coordinates.
pub const REFERENCE_SIDE: Side = Side::First;

// =============================================================================
// Wire
// =============================================================================

/// The relay route that fans a message out to every other connection.
pub const RELAY_SEND_ACTION: &str = "sendmessage";
