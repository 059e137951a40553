//! Exhaustive game-tree search.
//!
//! Scores are from the computer's point of view: `+1` computer win, `-1`
//! human win, `0` draw. The computer maximizes and the human minimizes.
//! Fast draws are terminal, exactly as the board reports them. Alpha-beta
//! pruning cuts the tree without changing any score because every root move
//! is searched with the full `[-1, 1]` window.

use crate::coordinate::Coordinate;
use crate::rules::{self, Grid};
use crate::types::{Mark, Outcome, Side};
use tracing::{debug, instrument};

const LOSS: i8 = -1;
const WIN: i8 = 1;

/// Copyable view of the marks, used while searching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Snapshot([Mark; 9]);

impl Snapshot {
    fn of<G: Grid + ?Sized>(grid: &G) -> Self {
        Snapshot(Coordinate::ALL.map(|c| grid.mark_at(c)))
    }

    fn with(mut self, coordinate: Coordinate, side: Side) -> Self {
        self.0[coordinate.index()] = Mark::Taken(side);
        self
    }

    fn open(self) -> impl Iterator<Item = Coordinate> {
        Coordinate::ALL.into_iter().filter(move |c| self.is_open(*c))
    }
}

impl Grid for Snapshot {
    fn mark_at(&self, coordinate: Coordinate) -> Mark {
        self.0[coordinate.index()]
    }
}

fn terminal_score(outcome: Outcome) -> Option<i8> {
    match outcome {
        Outcome::ComputerWin => Some(WIN),
        Outcome::HumanWin => Some(LOSS),
        Outcome::Draw => Some(0),
        Outcome::InProgress => None,
    }
}

fn alpha_beta(position: Snapshot, to_move: Side, mut alpha: i8, mut beta: i8) -> i8 {
    if let Some(score) = terminal_score(rules::outcome(&position)) {
        return score;
    }

    match to_move {
        Side::Computer => {
            let mut best = LOSS;
            for coordinate in position.open() {
                let next = position.with(coordinate, Side::Computer);
                best = best.max(alpha_beta(next, Side::Human, alpha, beta));
                alpha = alpha.max(best);
                if alpha >= beta {
                    break;
                }
            }
            best
        }
        Side::Human => {
            let mut best = WIN;
            for coordinate in position.open() {
                let next = position.with(coordinate, Side::Human);
                best = best.min(alpha_beta(next, Side::Computer, alpha, beta));
                beta = beta.min(best);
                if alpha >= beta {
                    break;
                }
            }
            best
        }
    }
}

/// Value of the position with perfect play from both sides.
pub fn score<G: Grid + ?Sized>(grid: &G, to_move: Side) -> i8 {
    alpha_beta(Snapshot::of(grid), to_move, LOSS, WIN)
}

/// Value of each open coordinate if `side` plays it next.
pub fn move_scores<G: Grid + ?Sized>(grid: &G, side: Side) -> Vec<(Coordinate, i8)> {
    let position = Snapshot::of(grid);
    if rules::outcome(&position).is_terminal() {
        return Vec::new();
    }
    position
        .open()
        .map(|c| (c, alpha_beta(position.with(c, side), side.opponent(), LOSS, WIN)))
        .collect()
}

/// Every open coordinate that achieves the best guaranteed result for `side`.
///
/// Empty when the position is already terminal.
#[instrument(skip(grid))]
pub fn best_moves<G: Grid + ?Sized>(grid: &G, side: Side) -> Vec<Coordinate> {
    let scores = move_scores(grid, side);
    let best = match side {
        Side::Computer => scores.iter().map(|(_, s)| *s).max(),
        Side::Human => scores.iter().map(|(_, s)| *s).min(),
    };
    let Some(best) = best else {
        return Vec::new();
    };
    let moves: Vec<Coordinate> = scores
        .into_iter()
        .filter(|(_, s)| *s == best)
        .map(|(c, _)| c)
        .collect();
    debug!(best, candidates = moves.len(), "Search complete");
    moves
}
