//! Shogi-Net: a shared shogi board for two remote players.
//!
//! Each client keeps its own copy of the board, lets its player move or drop
//! pieces under the movement rules, and relays every accepted move to the
//! other clients through a stateless fan-out relay. There is no authority:
//! clients converge by applying the same moves, and a newly joined client
//! bootstraps from a full-board `sync` sent by an existing one.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry and rule constants
//! - [`piece`] - Piece types, pieces and sides
//! - [`board`] - Points, squares, hands and the board value
//! - [`movement`] - Static movement profile table
//! - [`legality`] - Selectable move and drop targets, remote move validation
//! - [`perspective`] - Absolute coordinates versus a player's rotated view
//! - [`apply`] - Moves and the pure board transition
//! - [`promotion`] - Promotion choice state machine
//! - [`protocol`] - Wire messages and relay framing
//! - [`session`] - One client's synchronization state and user actions
//! - [`relay`] - In-process fan-out relay
//! - [`console`] - Line-oriented command loop around a session
//!
//! ## Example
//!
//! ```
//! use shogi_net::board::Point;
//! use shogi_net::session::Session;
//!
//! let mut alice = Session::default();
//! let mut bob = Session::default();
//!
//! // Alice pushes a pawn; the returned messages go to the relay.
//! alice.click_square(Point::new(6, 6));
//! let outgoing = alice.click_square(Point::new(6, 5));
//!
//! for message in outgoing {
//!     bob.handle(message);
//! }
//! assert_eq!(alice.board(), bob.board());
//! ```

pub mod apply;
pub mod board;
pub mod console;
pub mod constants;
pub mod legality;
pub mod movement;
pub mod perspective;
pub mod piece;
pub mod promotion;
pub mod protocol;
pub mod relay;
pub mod session;
