//! Promotion decision for moves touching the promotion zone.
//!
//! A move of an unpromoted, promotable piece that starts or ends in its
//! owner's promotion zone must wait for the player to choose. Until then
//! the board is left alone.

use crate::board::Point;
use crate::constants::{N, PROMOTION_ZONE_DEPTH};
use crate::piece::{Piece, Side};

/// Whether `point` (in `perspective`'s view) lies in `owner`'s promotion zone.
pub fn in_promotion_zone(owner: Side, point: Point, perspective: Side) -> bool {
    let y = point.y() as usize;
    if owner == perspective {
        y < PROMOTION_ZONE_DEPTH
    } else {
        y >= N - PROMOTION_ZONE_DEPTH
    }
}

/// Whether moving `piece` from `from` to `to` offers a promotion choice.
pub fn offers_promotion(piece: Piece, owner: Side, from: Point, to: Point, perspective: Side) -> bool {
    piece.can_promote()
        && (in_promotion_zone(owner, from, perspective) || in_promotion_zone(owner, to, perspective))
}

/// A board move in view coordinates, before promotion is decided.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PendingMove {
    /// Owner of the moving piece.
    pub owner: Side,
    pub from: Point,
    pub to: Point,
    /// The piece as it will stand after the move.
    pub piece: Piece,
}

/// The player's answer to a promotion prompt.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Choice {
    Promote,
    Decline,
    Cancel,
}

/// Result of submitting a move to the resolver.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// The move is final; `piece` carries the resulting promotion flag.
    Ready(PendingMove),
    /// The move is held until [`PromotionResolver::choose`] is called.
    AwaitingChoice,
}

/// Holds a move that may promote until the player decides.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PromotionResolver {
    /// No prompt is open.
    #[default]
    Idle,
    /// A move is waiting for [`Choice`].
    AwaitingChoice(PendingMove),
}

impl PromotionResolver {
    /// Submit a move. Replaces any move still waiting for a choice.
    pub fn submit(&mut self, pending: PendingMove, perspective: Side) -> Resolution {
        if offers_promotion(pending.piece, pending.owner, pending.from, pending.to, perspective) {
            *self = PromotionResolver::AwaitingChoice(pending);
            Resolution::AwaitingChoice
        } else {
            *self = PromotionResolver::Idle;
            Resolution::Ready(pending)
        }
    }

    /// Answer the pending prompt. Returns the finalized move, or `None` on
    /// cancel or when nothing is pending. Always returns to idle.
    pub fn choose(&mut self, choice: Choice) -> Option<PendingMove> {
        let PromotionResolver::AwaitingChoice(pending) = std::mem::take(self) else {
            return None;
        };
        match choice {
            Choice::Promote => Some(PendingMove {
                piece: pending.piece.promote(),
                ..pending
            }),
            Choice::Decline => Some(pending),
            Choice::Cancel => None,
        }
    }

    /// The move waiting for a choice, if any.
    pub fn pending(&self) -> Option<&PendingMove> {
        match self {
            PromotionResolver::Idle => None,
            PromotionResolver::AwaitingChoice(p) => Some(p),
        }
    }

    pub fn is_awaiting(&self) -> bool {
        matches!(self, PromotionResolver::AwaitingChoice(_))
    }
}
