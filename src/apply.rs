//! Moves and the board transition function.
//!
//! [`apply_move`] trusts its caller: degenerate input (empty origin,
//! friendly-occupied destination, a drop of a piece not in hand) yields the
//! board unchanged instead of an error.

use log::trace;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Point, Square};
use crate::piece::{Piece, PieceType, Side};

/// A fully resolved move in absolute coordinates.
///
/// `from == None` is a drop from `side`'s hand. `piece` is the piece as it
/// stands after the move, including the final promotion flag.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub side: Side,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Point>,
    pub to: Point,
    pub piece: Piece,
}

impl Move {
    pub fn relocate(side: Side, from: Point, to: Point, piece: Piece) -> Self {
        Self {
            side,
            from: Some(from),
            to,
            piece,
        }
    }

    pub fn drop(side: Side, to: Point, kind: PieceType) -> Self {
        Self {
            side,
            from: None,
            to,
            piece: Piece::new(kind),
        }
    }

    pub fn is_drop(&self) -> bool {
        self.from.is_none()
    }
}

/// Return the board that results from playing `mv` on `board`.
///
/// Relocations take the mover from the origin square. Capturing puts the
/// captured piece's type, unpromoted, into the mover's hand.
pub fn apply_move(board: &Board, mv: &Move) -> Board {
    let mut next = board.clone();
    let target = board.square(mv.to);

    match mv.from {
        None => {
            if target.is_some() || !next.hands.take(mv.side, mv.piece.kind) {
                trace!("ignoring drop {mv:?}");
                return next;
            }
            set(&mut next, mv.to, Some(Square::new(Piece::new(mv.piece.kind), mv.side)));
        }
        Some(from) => {
            let Some(origin) = board.square(from) else {
                trace!("ignoring move from empty {from}");
                return next;
            };
            if let Some(captured) = target {
                if captured.side == origin.side {
                    trace!("ignoring move onto own piece at {}", mv.to);
                    return next;
                }
                next.hands.add(origin.side, captured.piece.kind);
            }
            set(&mut next, mv.to, Some(Square::new(mv.piece, origin.side)));
            set(&mut next, from, None);
        }
    }
    next
}

fn set(board: &mut Board, p: Point, square: Option<Square>) {
    board.squares[p.y() as usize][p.x() as usize] = square;
}
