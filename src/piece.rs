//! Piece types, pieces and sides.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The eight kinds of shogi piece.
///
/// The declaration order is the display order used when grouping a hand.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceType {
    King,
    Rook,
    Bishop,
    Gold,
    Silver,
    Knight,
    Lance,
    Pawn,
}

impl PieceType {
    /// All piece types in display order.
    pub const ALL: [PieceType; 8] = [
        PieceType::King,
        PieceType::Rook,
        PieceType::Bishop,
        PieceType::Gold,
        PieceType::Silver,
        PieceType::Knight,
        PieceType::Lance,
        PieceType::Pawn,
    ];

    /// Whether this type can ever carry the promoted flag.
    pub fn is_promotable(self) -> bool {
        !matches!(self, PieceType::King | PieceType::Gold)
    }

    /// Single-letter notation (uppercase).
    pub fn letter(self) -> char {
        match self {
            PieceType::King => 'K',
            PieceType::Rook => 'R',
            PieceType::Bishop => 'B',
            PieceType::Gold => 'G',
            PieceType::Silver => 'S',
            PieceType::Knight => 'N',
            PieceType::Lance => 'L',
            PieceType::Pawn => 'P',
        }
    }

    /// Parse a type from its name (`"pawn"`) or letter (`"p"`), case-insensitively.
    pub fn parse(s: &str) -> Option<PieceType> {
        let s = s.to_ascii_lowercase();
        PieceType::ALL.into_iter().find(|t| {
            s == t.name() || (s.len() == 1 && s.starts_with(t.letter().to_ascii_lowercase()))
        })
    }

    /// Lowercase name, as used on the wire.
    pub fn name(self) -> &'static str {
        match self {
            PieceType::King => "king",
            PieceType::Rook => "rook",
            PieceType::Bishop => "bishop",
            PieceType::Gold => "gold",
            PieceType::Silver => "silver",
            PieceType::Knight => "knight",
            PieceType::Lance => "lance",
            PieceType::Pawn => "pawn",
        }
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A piece on the board: its type plus the promotion flag.
///
/// Promotion never changes the type. Only promotable types may have
/// `promoted == true`; use [`Piece::promote`] to keep that invariant.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    #[serde(rename = "type")]
    pub kind: PieceType,
    pub promoted: bool,
}

impl Piece {
    /// An unpromoted piece of `kind`.
    pub const fn new(kind: PieceType) -> Self {
        Self {
            kind,
            promoted: false,
        }
    }

    /// The promoted form of this piece, or the piece unchanged if its type never promotes.
    pub fn promote(self) -> Self {
        Self {
            kind: self.kind,
            promoted: self.kind.is_promotable(),
        }
    }

    /// Whether a move of this piece may still offer promotion.
    pub fn can_promote(self) -> bool {
        self.kind.is_promotable() && !self.promoted
    }
}

impl From<PieceType> for Piece {
    fn from(kind: PieceType) -> Self {
        Piece::new(kind)
    }
}

/// One of the two players.
///
/// `First` (sente) is serialized as `"black"` and `Second` (gote) as `"white"`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    #[serde(rename = "black", alias = "first")]
    First,
    #[serde(rename = "white", alias = "second")]
    Second,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }

    pub fn parse(s: &str) -> Option<Side> {
        match s.to_ascii_lowercase().as_str() {
            "black" | "first" | "sente" | "b" => Some(Side::First),
            "white" | "second" | "gote" | "w" => Some(Side::Second),
            _ => None,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::First => f.write_str("black"),
            Side::Second => f.write_str("white"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_king_and_gold_never_promote() {
        assert_eq!(Piece::new(PieceType::King).promote(), Piece::new(PieceType::King));
        assert_eq!(Piece::new(PieceType::Gold).promote(), Piece::new(PieceType::Gold));
        assert!(Piece::new(PieceType::Rook).promote().promoted);
    }

    #[test]
    fn test_opposite_is_involution() {
        for side in [Side::First, Side::Second] {
            assert_ne!(side.opposite(), side);
            assert_eq!(side.opposite().opposite(), side);
        }
    }

    #[test]
    fn test_parse_piece_type() {
        assert_eq!(PieceType::parse("pawn"), Some(PieceType::Pawn));
        assert_eq!(PieceType::parse("N"), Some(PieceType::Knight));
        assert_eq!(PieceType::parse("queen"), None);
    }

    #[test]
    fn test_side_wire_names() {
        assert_eq!(serde_json::to_string(&Side::First).unwrap(), "\"black\"");
        assert_eq!(serde_json::from_str::<Side>("\"second\"").unwrap(), Side::Second);
    }
}
