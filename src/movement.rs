//! Static movement profiles for every piece.
//!
//! A profile gives, for each of the ten [`Direction`]s, how far a piece may
//! travel. Directions are expressed in the piece's own facing: "forward" is
//! towards the far edge of its owner's view, which is decreasing `y`.

use crate::piece::{Piece, PieceType};

/// A movement direction relative to the piece's forward orientation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    ForwardLeft,
    Forward,
    ForwardRight,
    Left,
    Right,
    BackwardLeft,
    Backward,
    BackwardRight,
    /// Two rows forward, one column left.
    LeftJump,
    /// Two rows forward, one column right.
    RightJump,
}

impl Direction {
    pub const ALL: [Direction; 10] = [
        Direction::ForwardLeft,
        Direction::Forward,
        Direction::ForwardRight,
        Direction::Left,
        Direction::Right,
        Direction::BackwardLeft,
        Direction::Backward,
        Direction::BackwardRight,
        Direction::LeftJump,
        Direction::RightJump,
    ];

    /// Unit displacement `(dx, dy)` for a piece facing towards row 0.
    pub const fn delta(self) -> (i64, i64) {
        match self {
            Direction::ForwardLeft => (-1, -1),
            Direction::Forward => (0, -1),
            Direction::ForwardRight => (1, -1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::BackwardLeft => (-1, 1),
            Direction::Backward => (0, 1),
            Direction::BackwardRight => (1, 1),
            Direction::LeftJump => (-1, -2),
            Direction::RightJump => (1, -2),
        }
    }

    /// Jumps ignore any piece standing between origin and destination.
    pub const fn is_jump(self) -> bool {
        matches!(self, Direction::LeftJump | Direction::RightJump)
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// How far a piece can travel in one direction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Reach {
    None,
    Step,
    Slide,
}

/// Per-direction reach for one kind of piece.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MovementProfile {
    reach: [Reach; 10],
}

use Reach::{None as X, Slide as S, Step as O};

// Column order follows `Direction::ALL`:
//   FL  F   FR  L   R   BL  B   BR  LJ  RJ
const KING: MovementProfile = MovementProfile::new([O, O, O, O, O, O, O, O, X, X]);
const GOLD: MovementProfile = MovementProfile::new([O, O, O, O, O, X, O, X, X, X]);
const SILVER: MovementProfile = MovementProfile::new([O, O, O, X, X, O, X, O, X, X]);
const KNIGHT: MovementProfile = MovementProfile::new([X, X, X, X, X, X, X, X, O, O]);
const LANCE: MovementProfile = MovementProfile::new([X, S, X, X, X, X, X, X, X, X]);
const PAWN: MovementProfile = MovementProfile::new([X, O, X, X, X, X, X, X, X, X]);
const ROOK: MovementProfile = MovementProfile::new([X, S, X, S, S, X, S, X, X, X]);
const DRAGON: MovementProfile = MovementProfile::new([O, S, O, S, S, O, S, O, X, X]);
const BISHOP: MovementProfile = MovementProfile::new([S, X, S, X, X, S, X, S, X, X]);
const HORSE: MovementProfile = MovementProfile::new([S, O, S, O, O, S, O, S, X, X]);

impl MovementProfile {
    const fn new(reach: [Reach; 10]) -> Self {
        Self { reach }
    }

    pub fn reach(&self, direction: Direction) -> Reach {
        self.reach[direction.index()]
    }

    /// Directions with any reach, paired with that reach.
    pub fn moves(&self) -> impl Iterator<Item = (Direction, Reach)> + '_ {
        Direction::ALL
            .into_iter()
            .map(|d| (d, self.reach(d)))
            .filter(|&(_, r)| r != Reach::None)
    }
}

/// The movement profile of a piece.
///
/// Promoted pawns, silvers, knights and lances all move like gold.
pub fn profile_of(piece: Piece) -> &'static MovementProfile {
    match (piece.kind, piece.promoted) {
        (PieceType::King, _) => &KING,
        (PieceType::Rook, false) => &ROOK,
        (PieceType::Rook, true) => &DRAGON,
        (PieceType::Bishop, false) => &BISHOP,
        (PieceType::Bishop, true) => &HORSE,
        (PieceType::Gold, _) | (_, true) => &GOLD,
        (PieceType::Silver, false) => &SILVER,
        (PieceType::Knight, false) => &KNIGHT,
        (PieceType::Lance, false) => &LANCE,
        (PieceType::Pawn, false) => &PAWN,
    }
}
