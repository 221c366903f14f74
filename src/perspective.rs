//! Conversion between absolute board coordinates and a player's view.
//!
//! The stored board always uses the reference side's orientation. Any other
//! side sees it rotated by 180 degrees, with its own pieces nearest the
//! bottom. Both transforms are involutions.

use crate::board::{Grid, Point};
use crate::constants::{MAX_COORD, REFERENCE_SIDE};
use crate::piece::Side;

/// The grid as `side` sees it.
pub fn reverse_if_opposite(grid: &Grid, side: Side) -> Grid {
    if side == REFERENCE_SIDE {
        return *grid;
    }
    let mut out = *grid;
    for row in out.iter_mut() {
        row.reverse();
    }
    out.reverse();
    out
}

/// The point as `side` sees it. Also converts a view point back to absolute.
pub fn reverse_point_if_opposite(point: Point, side: Side) -> Point {
    if side == REFERENCE_SIDE {
        point
    } else {
        Point::new(MAX_COORD - point.x(), MAX_COORD - point.y())
    }
}
