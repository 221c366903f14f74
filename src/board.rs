//! Board state: squares, points and captured-piece hands.
//!
//! A [`Board`] is a plain value. Transitions ([`crate::apply::apply_move`],
//! a `sync` payload, a reset) produce a new board instead of editing one
//! another component holds.

use std::fmt::{self, Write};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{MAX_COORD, N};
use crate::piece::{Piece, PieceType, Side};

/// A coordinate pair, each component in `0..=8`.
///
/// `(0, 0)` is the top-left corner as seen by the reference side. Every
/// constructor enforces the range, so any `Point` can index a [`Grid`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawPoint")]
pub struct Point {
    x: u8,
    y: u8,
}

#[derive(Deserialize)]
struct RawPoint {
    x: i64,
    y: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("point ({x}, {y}) is outside the 9x9 board")]
pub struct PointOutOfRange {
    pub x: i64,
    pub y: i64,
}

impl TryFrom<RawPoint> for Point {
    type Error = PointOutOfRange;

    fn try_from(raw: RawPoint) -> Result<Self, Self::Error> {
        Point::checked(raw.x, raw.y).ok_or(PointOutOfRange { x: raw.x, y: raw.y })
    }
}

impl Point {
    /// Build a point from coordinates known to be on the board.
    ///
    /// # Panics
    ///
    /// Panics if either coordinate is greater than 8. Use [`Point::checked`]
    /// for untrusted input.
    pub const fn new(x: u8, y: u8) -> Self {
        assert!(x <= MAX_COORD && y <= MAX_COORD, "point off the board");
        Self { x, y }
    }

    /// Column, counted from the reference side's left.
    pub const fn x(self) -> u8 {
        self.x
    }

    /// Row, counted from the reference side's top.
    pub const fn y(self) -> u8 {
        self.y
    }

    /// Build a point, returning `None` when it falls off the board.
    pub fn checked(x: i64, y: i64) -> Option<Self> {
        let range = 0..=i64::from(MAX_COORD);
        if range.contains(&x) && range.contains(&y) {
            Some(Self {
                x: x as u8,
                y: y as u8,
            })
        } else {
            None
        }
    }

    /// The point displaced by `(dx, dy)`, if still on the board.
    pub fn offset(self, dx: i64, dy: i64) -> Option<Self> {
        Point::checked(i64::from(self.x) + dx, i64::from(self.y) + dy)
    }

    /// Every point on the board, row by row.
    pub fn all() -> impl Iterator<Item = Point> {
        (0..N as u8).flat_map(|y| (0..N as u8).map(move |x| Point { x, y }))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// An occupied square: the piece and its owner.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Square {
    pub piece: Piece,
    pub side: Side,
}

impl Square {
    pub const fn new(piece: Piece, side: Side) -> Self {
        Self { piece, side }
    }

    fn symbol(&self) -> String {
        let letter = self.piece.kind.letter();
        let letter = match self.side {
            Side::First => letter,
            Side::Second => letter.to_ascii_lowercase(),
        };
        if self.piece.promoted {
            format!("+{letter}")
        } else {
            format!(" {letter}")
        }
    }
}

/// A 9x9 grid of squares indexed `[y][x]`; `None` is an empty square.
pub type Grid = [[Option<Square>; N]; N];

/// Read the square at `p`.
pub fn square_at(grid: &Grid, p: Point) -> Option<Square> {
    grid[p.y as usize][p.x as usize]
}

/// Render a grid as a text diagram, one row per line.
///
/// First-side pieces are uppercase, second-side pieces lowercase, and
/// promoted pieces carry a `+` prefix.
pub fn diagram(grid: &Grid) -> String {
    let mut out = String::new();
    out.push_str("  ");
    for x in 0..N {
        let _ = write!(out, " {x} ");
    }
    out.push('\n');
    for (y, row) in grid.iter().enumerate() {
        let _ = write!(out, "{y} ");
        for square in row {
            match square {
                Some(sq) => {
                    let _ = write!(out, "{} ", sq.symbol());
                }
                None => out.push_str(" . "),
            }
        }
        out.push('\n');
    }
    out
}

/// Captured pieces held by each side, always stored unpromoted.
///
/// Order within a hand is irrelevant.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hands {
    #[serde(rename = "black")]
    pub first: Vec<PieceType>,
    #[serde(rename = "white")]
    pub second: Vec<PieceType>,
}

impl Hands {
    pub fn of(&self, side: Side) -> &[PieceType] {
        match side {
            Side::First => &self.first,
            Side::Second => &self.second,
        }
    }

    fn of_mut(&mut self, side: Side) -> &mut Vec<PieceType> {
        match side {
            Side::First => &mut self.first,
            Side::Second => &mut self.second,
        }
    }

    pub fn add(&mut self, side: Side, kind: PieceType) {
        self.of_mut(side).push(kind);
    }

    /// Remove one instance of `kind` from `side`'s hand. Returns false if there was none.
    pub fn take(&mut self, side: Side, kind: PieceType) -> bool {
        let hand = self.of_mut(side);
        match hand.iter().position(|&k| k == kind) {
            Some(i) => {
                hand.remove(i);
                true
            }
            None => false,
        }
    }

    pub fn count(&self, side: Side, kind: PieceType) -> usize {
        self.of(side).iter().filter(|&&k| k == kind).count()
    }

    pub fn contains(&self, side: Side, kind: PieceType) -> bool {
        self.of(side).contains(&kind)
    }

    /// The hand grouped by type in display order, with counts.
    pub fn grouped(&self, side: Side) -> Vec<(PieceType, usize)> {
        PieceType::ALL
            .into_iter()
            .map(|kind| (kind, self.count(side, kind)))
            .filter(|&(_, n)| n > 0)
            .collect()
    }
}

/// The full game state shared between clients.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Squares in absolute coordinates, indexed `[y][x]`.
    pub squares: Grid,
    pub hands: Hands,
}

impl Default for Board {
    fn default() -> Self {
        Self::starting()
    }
}

impl Board {
    /// A board with no pieces and empty hands.
    pub fn empty() -> Self {
        Self {
            squares: [[None; N]; N],
            hands: Hands::default(),
        }
    }

    /// The standard starting layout with empty hands.
    pub fn starting() -> Self {
        use PieceType::*;
        const BACK_RANK: [PieceType; N] = [Lance, Knight, Silver, Gold, King, Gold, Silver, Knight, Lance];

        let mut board = Board::empty();
        for (x, &kind) in BACK_RANK.iter().enumerate() {
            board.squares[0][x] = Some(Square::new(Piece::new(kind), Side::Second));
            board.squares[2][x] = Some(Square::new(Piece::new(Pawn), Side::Second));
            board.squares[6][x] = Some(Square::new(Piece::new(Pawn), Side::First));
            board.squares[8][x] = Some(Square::new(Piece::new(kind), Side::First));
        }
        board.squares[1][1] = Some(Square::new(Piece::new(Rook), Side::Second));
        board.squares[1][7] = Some(Square::new(Piece::new(Bishop), Side::Second));
        board.squares[7][1] = Some(Square::new(Piece::new(Bishop), Side::First));
        board.squares[7][7] = Some(Square::new(Piece::new(Rook), Side::First));
        board
    }

    /// The square at `p`, in absolute coordinates.
    pub fn square(&self, p: Point) -> Option<Square> {
        square_at(&self.squares, p)
    }

    /// Builder-style placement, used to set up positions.
    pub fn with(mut self, p: Point, square: Option<Square>) -> Self {
        self.squares[p.y as usize][p.x as usize] = square;
        self
    }

    /// Builder-style hand entry, used to set up positions.
    pub fn with_hand(mut self, side: Side, kind: PieceType) -> Self {
        self.hands.add(side, kind);
        self
    }

    /// Iterate over occupied squares.
    pub fn pieces(&self) -> impl Iterator<Item = (Point, Square)> + '_ {
        Point::all().filter_map(move |p| self.square(p).map(|sq| (p, sq)))
    }
}

fn write_hand(f: &mut fmt::Formatter<'_>, hands: &Hands, side: Side) -> fmt::Result {
    write!(f, "{side} hand:")?;
    for (kind, n) in hands.grouped(side) {
        write!(f, " {}x{n}", kind.letter())?;
    }
    writeln!(f)
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_hand(f, &self.hands, Side::Second)?;
        f.write_str(&diagram(&self.squares))?;
        write_hand(f, &self.hands, Side::First)
    }
}
