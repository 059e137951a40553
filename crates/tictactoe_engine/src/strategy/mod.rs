//! Computer move selection for each difficulty level.
//!
//! Strategies are free functions over a board, a difficulty and a caller-owned
//! randomness source. They only read the board and only ever return an open
//! coordinate.

pub mod minimax;

use crate::board::Board;
use crate::coordinate::Coordinate;
use crate::error::{EngineError, IllegalMove};
use crate::rules::Grid;
use crate::threat::{find_threat, safe_move};
use crate::types::{Difficulty, Mark, Side};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument};

/// Picks the computer's next move.
///
/// # Errors
///
/// Returns `EngineError::IllegalMove` when the game is already over or the
/// human is due to move, and `EngineError::EmptyOpenSet` when no cell is open.
#[instrument(skip(board, rng), fields(turn = board.turn()))]
pub fn choose_move<R: Rng>(
    board: &Board,
    difficulty: Difficulty,
    rng: &mut R,
) -> Result<Coordinate, EngineError> {
    let outcome = board.outcome();
    if outcome.is_terminal() {
        return Err(IllegalMove::GameOver(outcome).into());
    }
    if board.to_move() != Side::Computer {
        return Err(IllegalMove::WrongTurn(Side::Computer).into());
    }

    let chosen = match difficulty {
        Difficulty::Easy => easy(board, rng)?,
        Difficulty::Medium => medium(board, rng)?,
        Difficulty::Hard => hard(board, rng)?,
        Difficulty::Wizard => wizard(board, rng)?,
    };
    debug!(%chosen, %difficulty, "Computer move chosen");
    Ok(chosen)
}

/// Uniformly random open cell.
pub fn easy<R: Rng>(board: &Board, rng: &mut R) -> Result<Coordinate, EngineError> {
    pick(board.open_coordinates(), rng)
}

/// Win if possible, else block, else random.
pub fn medium<R: Rng>(board: &Board, rng: &mut R) -> Result<Coordinate, EngineError> {
    if let Some(win) = find_threat(board, Side::Computer) {
        return Ok(win);
    }
    let candidate = easy(board, rng)?;
    Ok(safe_move(board, candidate, Side::Computer, Side::Human))
}

/// Medium, plus a corner reply when the human holds the center and the
/// computer holds no corner yet.
pub fn hard<R: Rng>(board: &Board, rng: &mut R) -> Result<Coordinate, EngineError> {
    if let Some(forced) = forced_move(board) {
        return Ok(forced);
    }

    let human_center = board.mark_at(Coordinate::CENTER) == Mark::Taken(Side::Human);
    let holds_corner = Coordinate::CORNERS
        .iter()
        .any(|c| board.mark_at(*c) == Mark::Taken(Side::Computer));
    if human_center && !holds_corner {
        let open_corners: Vec<Coordinate> = Coordinate::CORNERS
            .into_iter()
            .filter(|c| board.is_open(*c))
            .collect();
        if !open_corners.is_empty() {
            debug!("Springing corner trap");
            return pick(&open_corners, rng);
        }
    }

    easy(board, rng)
}

/// Immediate win if one exists, otherwise a random choice among every move
/// with the best minimax score.
pub fn wizard<R: Rng>(board: &Board, rng: &mut R) -> Result<Coordinate, EngineError> {
    if let Some(win) = find_threat(board, Side::Computer) {
        return Ok(win);
    }
    let best = minimax::best_moves(board, Side::Computer);
    pick(&best, rng)
}

/// The winning cell, or else the blocking cell, if either exists.
fn forced_move(board: &Board) -> Option<Coordinate> {
    find_threat(board, Side::Computer).or_else(|| find_threat(board, Side::Human))
}

fn pick<R: Rng>(options: &[Coordinate], rng: &mut R) -> Result<Coordinate, EngineError> {
    if options.is_empty() {
        return Err(EngineError::EmptyOpenSet);
    }
    Ok(options[rng.random_range(0..options.len())])
}

/// Owns a difficulty and the randomness source that drives it.
#[derive(Debug, Clone)]
pub struct ComputerPlayer<R = StdRng> {
    difficulty: Difficulty,
    rng: R,
}

impl ComputerPlayer<StdRng> {
    /// Creates a player seeded from the operating system.
    #[instrument]
    pub fn new(difficulty: Difficulty) -> Self {
        Self::with_rng(difficulty, StdRng::from_os_rng())
    }

    /// Creates a reproducible player.
    #[instrument]
    pub fn seeded(difficulty: Difficulty, seed: u64) -> Self {
        Self::with_rng(difficulty, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> ComputerPlayer<R> {
    /// Creates a player around an existing randomness source.
    pub fn with_rng(difficulty: Difficulty, rng: R) -> Self {
        Self { difficulty, rng }
    }

    /// The level this player uses.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Picks the next move on `board`.
    ///
    /// # Errors
    ///
    /// See [`choose_move`].
    pub fn choose_move(&mut self, board: &Board) -> Result<Coordinate, EngineError> {
        choose_move(board, self.difficulty, &mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(index: usize) -> Coordinate {
        Coordinate::from_index(index).unwrap()
    }

    #[test]
    fn test_easy_picks_open_cell() {
        let board = Board::arranged(Side::Computer, &[at(0)], &[at(4)]).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let chosen = easy(&board, &mut rng).unwrap();
            assert!(board.open_coordinates().contains(&chosen));
        }
    }

    #[test]
    fn test_medium_prefers_win_over_block() {
        let board = Board::arranged(Side::Computer, &[at(0), at(1)], &[at(3), at(4)]).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            assert_eq!(medium(&board, &mut rng).unwrap(), at(2));
        }
    }

    #[test]
    fn test_hard_corner_trap() {
        let board = Board::arranged(Side::Computer, &[], &[Coordinate::CENTER]).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let chosen = hard(&board, &mut rng).unwrap();
            assert!(Coordinate::CORNERS.contains(&chosen), "{}", chosen);
        }
    }

    #[test]
    fn test_hard_still_blocks_before_trap() {
        let board =
            Board::arranged(Side::Computer, &[at(1)], &[Coordinate::CENTER, at(3)]).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        assert_eq!(hard(&board, &mut rng).unwrap(), at(5));
    }

    #[test]
    fn test_wizard_takes_immediate_win() {
        let board = Board::arranged(Side::Computer, &[at(0), at(4)], &[at(1), at(2)]).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        assert_eq!(wizard(&board, &mut rng).unwrap(), at(8));
    }

    #[test]
    fn test_terminal_board_refused() {
        let board = Board::arranged(Side::Human, &[at(0), at(1), at(2)], &[at(3), at(4)]).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            choose_move(&board, Difficulty::Easy, &mut rng),
            Err(EngineError::IllegalMove(IllegalMove::GameOver(_)))
        ));
    }

    #[test]
    fn test_humans_turn_refused() {
        let board = Board::new(false);
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            choose_move(&board, Difficulty::Wizard, &mut rng),
            Err(EngineError::IllegalMove(IllegalMove::WrongTurn(Side::Computer)))
        );
    }

    #[test]
    fn test_empty_options_reported() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(pick(&[], &mut rng), Err(EngineError::EmptyOpenSet));
    }

    #[test]
    fn test_seeded_players_agree() {
        let board = Board::new(true);
        let mut a = ComputerPlayer::seeded(Difficulty::Easy, 42);
        let mut b = ComputerPlayer::seeded(Difficulty::Easy, 42);
        for _ in 0..10 {
            assert_eq!(a.choose_move(&board), b.choose_move(&board));
        }
    }
}
