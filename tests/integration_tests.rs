//! Integration tests for shogi-net rules.
//!
//! Coordinates in these tests are `Point::new(x, y)` with `x` the column and
//! `y` the row, both absolute unless a test says it works in a view.

use std::collections::BTreeSet;

use shogi_net::apply::{Move, apply_move};
use shogi_net::board::{Board, Point, Square, square_at};
use shogi_net::legality::{selectable_move_points, selectable_put_points};
use shogi_net::perspective::{reverse_if_opposite, reverse_point_if_opposite};
use shogi_net::piece::{Piece, PieceType, Side};
use shogi_net::promotion::{Choice, PendingMove, PromotionResolver, Resolution};

// =============================================================================
// Helper functions for setting up test positions
// =============================================================================

/// A board with a single piece at `(x, y)`.
fn lone(kind: PieceType, promoted: bool, side: Side, x: u8, y: u8) -> Board {
    Board::empty().with(Point::new(x, y), Some(Square::new(Piece { kind, promoted }, side)))
}

/// Targets as a set of `(x, y)` pairs.
fn targets(board: &Board, x: u8, y: u8, perspective: Side) -> BTreeSet<(u8, u8)> {
    selectable_move_points(Point::new(x, y), &board.squares, perspective)
        .into_iter()
        .map(|p| (p.x(), p.y()))
        .collect()
}

/// Expected targets for a piece at `(x, y)` on an otherwise empty board,
/// given `(dx, dy, slides)` offsets in the piece's own facing.
fn expected(x: u8, y: u8, dirs: &[(i64, i64, bool)], sign: i64) -> BTreeSet<(u8, u8)> {
    let origin = Point::new(x, y);
    let mut out = BTreeSet::new();
    for &(dx, dy, slides) in dirs {
        let max = if slides { 8 } else { 1 };
        for i in 1..=max {
            match origin.offset(dx * i * sign, dy * i * sign) {
                Some(p) => {
                    out.insert((p.x(), p.y()));
                }
                None => break,
            }
        }
    }
    out
}

const FL: (i64, i64) = (-1, -1);
const F: (i64, i64) = (0, -1);
const FR: (i64, i64) = (1, -1);
const L: (i64, i64) = (-1, 0);
const R: (i64, i64) = (1, 0);
const BL: (i64, i64) = (-1, 1);
const B: (i64, i64) = (0, 1);
const BR: (i64, i64) = (1, 1);

fn step(dirs: &[(i64, i64)]) -> Vec<(i64, i64, bool)> {
    dirs.iter().map(|&(dx, dy)| (dx, dy, false)).collect()
}

fn slide(dirs: &[(i64, i64)]) -> Vec<(i64, i64, bool)> {
    dirs.iter().map(|&(dx, dy)| (dx, dy, true)).collect()
}

/// The full movement table, as (type, promoted, directions).
fn movement_table() -> Vec<(PieceType, bool, Vec<(i64, i64, bool)>)> {
    let gold = step(&[FL, F, FR, L, R, B]);
    let mut dragon = slide(&[F, L, R, B]);
    dragon.extend(step(&[FL, FR, BL, BR]));
    let mut horse = slide(&[FL, FR, BL, BR]);
    horse.extend(step(&[F, L, R, B]));

    vec![
        (PieceType::King, false, step(&[FL, F, FR, L, R, BL, B, BR])),
        (PieceType::Gold, false, gold.clone()),
        (PieceType::Silver, false, step(&[FL, F, FR, BL, BR])),
        (PieceType::Silver, true, gold.clone()),
        (PieceType::Knight, false, step(&[(-1, -2), (1, -2)])),
        (PieceType::Knight, true, gold.clone()),
        (PieceType::Lance, false, slide(&[F])),
        (PieceType::Lance, true, gold.clone()),
        (PieceType::Pawn, false, step(&[F])),
        (PieceType::Pawn, true, gold),
        (PieceType::Rook, false, slide(&[F, L, R, B])),
        (PieceType::Rook, true, dragon),
        (PieceType::Bishop, false, slide(&[FL, FR, BL, BR])),
        (PieceType::Bishop, true, horse),
    ]
}

// =============================================================================
// Legality engine
// =============================================================================

#[test]
fn test_every_piece_matches_movement_table() {
    for (kind, promoted, dirs) in movement_table() {
        for &(x, y) in &[(4, 4), (0, 0), (8, 8), (1, 6)] {
            let board = lone(kind, promoted, Side::First, x, y);
            assert_eq!(
                targets(&board, x, y, Side::First),
                expected(x, y, &dirs, 1),
                "{kind} promoted={promoted} at ({x}, {y})"
            );
        }
    }
}

#[test]
fn test_opponent_pieces_are_mirrored() {
    for (kind, promoted, dirs) in movement_table() {
        let board = lone(kind, promoted, Side::Second, 3, 5);
        assert_eq!(
            targets(&board, 3, 5, Side::First),
            expected(3, 5, &dirs, -1),
            "{kind} promoted={promoted}"
        );
        // Seen from its owner the same piece faces the normal way.
        assert_eq!(targets(&board, 3, 5, Side::Second), expected(3, 5, &dirs, 1));
    }
}

#[test]
fn test_slides_stop_at_first_occupied_square() {
    let board = lone(PieceType::Lance, false, Side::First, 0, 8)
        .with(Point::new(0, 3), Some(Square::new(Piece::new(PieceType::Silver), Side::Second)));
    assert_eq!(
        targets(&board, 0, 8, Side::First),
        BTreeSet::from([(0, 7), (0, 6), (0, 5), (0, 4), (0, 3)])
    );

    let blocked = board.with(Point::new(0, 3), Some(Square::new(Piece::new(PieceType::Silver), Side::First)));
    assert_eq!(
        targets(&blocked, 0, 8, Side::First),
        BTreeSet::from([(0, 7), (0, 6), (0, 5), (0, 4)])
    );
}

#[test]
fn test_kings_are_never_capturable() {
    for attacker_side in [Side::First, Side::Second] {
        for (kind, promoted, _) in movement_table() {
            if kind == PieceType::Knight && !promoted {
                continue;
            }
            let king = Square::new(Piece::new(PieceType::King), attacker_side.opposite());
            let mut board = lone(kind, promoted, attacker_side, 4, 4);
            for p in [(3, 3), (4, 3), (5, 3), (3, 4), (5, 4), (3, 5), (4, 5), (5, 5)] {
                board = board.with(Point::new(p.0, p.1), Some(king));
            }
            assert!(
                targets(&board, 4, 4, attacker_side).is_empty(),
                "{kind} promoted={promoted} for {attacker_side}"
            );
        }
    }
}

#[test]
fn test_knight_cannot_capture_king_either() {
    let board = lone(PieceType::Knight, false, Side::First, 4, 4)
        .with(Point::new(3, 2), Some(Square::new(Piece::new(PieceType::King), Side::Second)))
        .with(Point::new(5, 2), Some(Square::new(Piece::new(PieceType::Gold), Side::Second)));
    assert_eq!(targets(&board, 4, 4, Side::First), BTreeSet::from([(5, 2)]));
}

#[test]
fn test_starting_position_targets() {
    let board = Board::starting();
    assert_eq!(targets(&board, 7, 7, Side::First), BTreeSet::from([(8, 7), (6, 7), (5, 7), (4, 7), (3, 7), (2, 7)]));
    assert!(targets(&board, 1, 7, Side::First).is_empty(), "bishop is boxed in");
    assert!(targets(&board, 1, 8, Side::First).is_empty(), "knight jumps onto own pawns");
}

#[test]
fn test_put_points_two_pawn_rule_per_column() {
    let board = Board::starting();
    for side in [Side::First, Side::Second] {
        assert!(selectable_put_points(PieceType::Pawn, &board.squares, side).is_empty());
    }

    let board = apply_move(
        &Board::starting(),
        &Move::relocate(Side::First, Point::new(6, 6), Point::new(6, 5), Piece::new(PieceType::Pawn)),
    );
    let cols: BTreeSet<u8> = selectable_put_points(PieceType::Pawn, &board.squares, Side::First)
        .into_iter()
        .map(|p| p.x())
        .collect();
    assert!(cols.is_empty(), "pawn still in column 6");
}

#[test]
fn test_put_points_only_pawns_restricted() {
    let board = Board::starting();
    for kind in PieceType::ALL {
        if kind == PieceType::Pawn {
            continue;
        }
        assert_eq!(selectable_put_points(kind, &board.squares, Side::First).len(), 41);
    }
}

// =============================================================================
// Perspective
// =============================================================================

#[test]
fn test_view_legality_matches_absolute_legality() {
    // A second-side silver evaluated in white's view, mapped back, equals
    // the absolute evaluation from black's perspective.
    let board = lone(PieceType::Silver, false, Side::Second, 2, 3);
    let view = reverse_if_opposite(&board.squares, Side::Second);
    let from_view = reverse_point_if_opposite(Point::new(2, 3), Side::Second);

    let via_view: BTreeSet<(u8, u8)> = selectable_move_points(from_view, &view, Side::Second)
        .into_iter()
        .map(|p| reverse_point_if_opposite(p, Side::Second))
        .map(|p| (p.x(), p.y()))
        .collect();
    assert_eq!(via_view, targets(&board, 2, 3, Side::First));
}

#[test]
fn test_grid_transform_round_trip() {
    let board = apply_move(
        &Board::starting(),
        &Move::relocate(Side::First, Point::new(2, 6), Point::new(2, 5), Piece::new(PieceType::Pawn)),
    );
    for side in [Side::First, Side::Second] {
        let twice = reverse_if_opposite(&reverse_if_opposite(&board.squares, side), side);
        assert_eq!(twice, board.squares);
    }
    let view = reverse_if_opposite(&board.squares, Side::Second);
    assert_eq!(square_at(&view, Point::new(6, 3)), board.square(Point::new(2, 5)));
}

// =============================================================================
// End-to-end scenarios
// =============================================================================

#[test]
fn test_scenario_a_pawn_push() {
    let start = Board::starting();
    let mv = Move::relocate(Side::First, Point::new(6, 6), Point::new(6, 5), Piece::new(PieceType::Pawn));
    let next = apply_move(&start, &mv);

    for p in Point::all() {
        if p == Point::new(6, 6) || p == Point::new(6, 5) {
            continue;
        }
        assert_eq!(next.square(p), start.square(p), "{p} changed");
    }
    assert_eq!(next.square(Point::new(6, 6)), None);
    assert_eq!(next.square(Point::new(6, 5)), start.square(Point::new(6, 6)));
    assert_eq!(next.hands, start.hands);
}

#[test]
fn test_scenario_b_rook_captures_pawn() {
    // Clear the rook's file first so the slide is legal.
    let start = Board::starting().with(Point::new(7, 6), None);
    assert!(targets(&start, 7, 7, Side::First).contains(&(7, 2)));

    let mv = Move::relocate(Side::First, Point::new(7, 7), Point::new(7, 2), Piece::new(PieceType::Rook));
    let next = apply_move(&start, &mv);

    assert_eq!(
        next.square(Point::new(7, 2)),
        Some(Square::new(Piece::new(PieceType::Rook), Side::First))
    );
    assert_eq!(next.square(Point::new(7, 7)), None);
    assert_eq!(next.hands.first, vec![PieceType::Pawn]);
    assert!(next.hands.second.is_empty());
}

#[test]
fn test_scenario_c_pawn_enters_zone() {
    let board = lone(PieceType::Pawn, false, Side::First, 4, 3);
    let pending = PendingMove {
        owner: Side::First,
        from: Point::new(4, 3),
        to: Point::new(4, 2),
        piece: Piece::new(PieceType::Pawn),
    };

    for (choice, promoted) in [(Choice::Promote, true), (Choice::Decline, false)] {
        let mut resolver = PromotionResolver::default();
        assert_eq!(resolver.submit(pending, Side::First), Resolution::AwaitingChoice);
        let done = resolver.choose(choice).unwrap();
        let next = apply_move(&board, &Move::relocate(done.owner, done.from, done.to, done.piece));
        assert_eq!(
            next.square(Point::new(4, 2)),
            Some(Square::new(Piece { kind: PieceType::Pawn, promoted }, Side::First))
        );
    }
}

#[test]
fn test_promoted_piece_is_demoted_when_captured() {
    let board = lone(PieceType::Rook, true, Side::Second, 4, 4)
        .with(Point::new(4, 5), Some(Square::new(Piece::new(PieceType::Gold), Side::First)));
    let next = apply_move(
        &board,
        &Move::relocate(Side::First, Point::new(4, 5), Point::new(4, 4), Piece::new(PieceType::Gold)),
    );
    assert_eq!(next.hands.first, vec![PieceType::Rook]);

    let dropped = apply_move(&next, &Move::drop(Side::First, Point::new(0, 0), PieceType::Rook));
    assert_eq!(
        dropped.square(Point::new(0, 0)),
        Some(Square::new(Piece::new(PieceType::Rook), Side::First))
    );
    assert!(dropped.hands.first.is_empty());
}
