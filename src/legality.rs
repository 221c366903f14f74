//! Selectable destinations for board moves and hand drops.
//!
//! Both functions operate on a grid as seen by `perspective` (see
//! [`crate::perspective`]): pieces owned by `perspective` face towards row 0,
//! pieces of the other side face towards row 8.
//!
//! Only movement geometry and the two-pawns-in-a-file drop restriction are
//! checked. Check, checkmate and drop-mate are not detected, and a king is
//! never offered as a capture target.

use thiserror::Error;

use crate::apply::Move;
use crate::board::{Board, Grid, Point, square_at};
use crate::movement::{Reach, profile_of};
use crate::perspective::{reverse_if_opposite, reverse_point_if_opposite};
use crate::piece::{PieceType, Side};
use crate::promotion::in_promotion_zone;

/// Squares the piece at `origin` may move to.
///
/// Returns an empty list if `origin` is empty.
pub fn selectable_move_points(origin: Point, grid: &Grid, perspective: Side) -> Vec<Point> {
    let Some(mover) = square_at(grid, origin) else {
        return Vec::new();
    };
    let sign = if mover.side == perspective { 1 } else { -1 };

    let mut points = Vec::new();
    for (direction, reach) in profile_of(mover.piece).moves() {
        let (dx, dy) = direction.delta();
        let steps = match reach {
            Reach::None => 0,
            Reach::Step => 1,
            Reach::Slide => crate::constants::N as i64,
        };
        for i in 1..=steps {
            let Some(target) = origin.offset(dx * i * sign, dy * i * sign) else {
                break;
            };
            match square_at(grid, target) {
                None => points.push(target),
                Some(occupant) => {
                    if occupant.side != mover.side && occupant.piece.kind != PieceType::King {
                        points.push(target);
                    }
                    break;
                }
            }
        }
    }
    points
}

/// Empty squares `kind` may be dropped on by `perspective`.
///
/// A pawn may not be dropped into a column that already holds an unpromoted
/// pawn of the same side.
pub fn selectable_put_points(kind: PieceType, grid: &Grid, perspective: Side) -> Vec<Point> {
    let mut blocked = [false; crate::constants::N];
    if kind == PieceType::Pawn {
        for p in Point::all() {
            if let Some(sq) = square_at(grid, p) {
                if sq.side == perspective && sq.piece.kind == PieceType::Pawn && !sq.piece.promoted {
                    blocked[p.x() as usize] = true;
                }
            }
        }
    }

    Point::all()
        .filter(|&p| square_at(grid, p).is_none() && !blocked[p.x() as usize])
        .collect()
}

/// Why a received move was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IllegalMove {
    #[error("no piece at {0}")]
    EmptyOrigin(Point),
    #[error("piece at {point} does not belong to {side}")]
    NotOwner { point: Point, side: Side },
    #[error("{from} cannot reach {to}")]
    Unreachable { from: Point, to: Point },
    #[error("move changes the piece type")]
    PieceChanged,
    #[error("a promoted piece cannot be demoted")]
    Demotion,
    #[error("promotion is only allowed when entering or leaving the promotion zone")]
    PromotionOutsideZone,
    #[error("{side} has no {kind} in hand")]
    NotInHand { side: Side, kind: PieceType },
    #[error("cannot drop on {0}")]
    DropNotAllowed(Point),
    #[error("dropped pieces are always unpromoted")]
    PromotedDrop,
}

/// Check a move in absolute coordinates against the rules, from the mover's point of view.
pub fn validate_move(board: &Board, mv: &Move) -> Result<(), IllegalMove> {
    let side = mv.side;
    let view = reverse_if_opposite(&board.squares, side);
    let to = reverse_point_if_opposite(mv.to, side);

    let Some(from_abs) = mv.from else {
        if mv.piece.promoted {
            return Err(IllegalMove::PromotedDrop);
        }
        if !board.hands.contains(side, mv.piece.kind) {
            return Err(IllegalMove::NotInHand {
                side,
                kind: mv.piece.kind,
            });
        }
        if !selectable_put_points(mv.piece.kind, &view, side).contains(&to) {
            return Err(IllegalMove::DropNotAllowed(mv.to));
        }
        return Ok(());
    };

    let from = reverse_point_if_opposite(from_abs, side);
    let origin = square_at(&view, from).ok_or(IllegalMove::EmptyOrigin(from_abs))?;
    if origin.side != side {
        return Err(IllegalMove::NotOwner {
            point: from_abs,
            side,
        });
    }
    if !selectable_move_points(from, &view, side).contains(&to) {
        return Err(IllegalMove::Unreachable {
            from: from_abs,
            to: mv.to,
        });
    }
    if origin.piece.kind != mv.piece.kind {
        return Err(IllegalMove::PieceChanged);
    }
    match (origin.piece.promoted, mv.piece.promoted) {
        (true, false) => Err(IllegalMove::Demotion),
        (false, true) => {
            let zone = in_promotion_zone(side, from, side) || in_promotion_zone(side, to, side);
            if origin.piece.can_promote() && zone {
                Ok(())
            } else {
                Err(IllegalMove::PromotionOutsideZone)
            }
        }
        _ => Ok(()),
    }
}
