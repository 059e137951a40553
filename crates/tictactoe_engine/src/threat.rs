//! Threat analysis: lines one mark away from completion.
//!
//! The same lookup serves attack (the cell that wins now) and defense (the
//! cell that must be blocked).

use crate::coordinate::Coordinate;
use crate::rules::{Grid, LINE_GROUPS};
use crate::types::{Mark, Side};
use tracing::{instrument, trace};

/// Finds a line holding two of `side`'s marks and one open cell.
///
/// Lines are scanned in the fixed order of [`LINE_GROUPS`] and the open cell
/// of the first match is returned.
#[instrument(level = "trace", skip(grid))]
pub fn find_threat<G: Grid + ?Sized>(grid: &G, side: Side) -> Option<Coordinate> {
    LINE_GROUPS.iter().find_map(|line| {
        let own = line
            .iter()
            .filter(|c| grid.mark_at(**c) == Mark::Taken(side))
            .count();
        if own != 2 {
            return None;
        }
        line.iter().copied().find(|c| grid.is_open(*c))
    })
}

/// Overrides `candidate` when a line is one mark from completion.
///
/// The opponent's threat is blocked first; otherwise `own` completes its
/// line; otherwise `candidate` is returned unchanged. Pure: the grid is only
/// read.
#[instrument(level = "trace", skip(grid))]
pub fn safe_move<G: Grid + ?Sized>(
    grid: &G,
    candidate: Coordinate,
    own: Side,
    opponent: Side,
) -> Coordinate {
    if let Some(block) = find_threat(grid, opponent) {
        trace!(%block, "Blocking opponent threat");
        return block;
    }
    if let Some(win) = find_threat(grid, own) {
        trace!(%win, "Completing own line");
        return win;
    }
    candidate
}
