//! Turn sequencing between the human and the computer.
//!
//! A session owns one board and one computer player. Human moves come from an
//! [`InputProvider`]; everything worth showing goes to a [`Presenter`]. Both
//! are synchronous and the session never retries on their behalf.

use crate::board::Board;
use crate::coordinate::Coordinate;
use crate::error::{EngineError, IllegalMove};
use crate::strategy::ComputerPlayer;
use crate::types::{Difficulty, Outcome, Side};
use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// What the input provider hands back on the human's turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HumanInput {
    /// A coordinate the provider has already checked is open.
    Move(Coordinate),
    /// Stop the game immediately.
    Abort,
}

/// Source of human moves.
pub trait InputProvider {
    /// Returns the human's choice among `open`, or an abort request.
    ///
    /// Re-prompting on bad input is the provider's job.
    fn request_move(&mut self, open: &[Coordinate]) -> HumanInput;
}

/// Sink for everything the game wants to show.
pub trait Presenter {
    /// Called with the board before play and after every move.
    fn show_board(&mut self, board: &Board);

    /// Called before each turn.
    fn announce_turn(&mut self, _side: Side) {}

    /// Called once when the session ends.
    fn show_end(&mut self, end: SessionEnd, board: &Board);
}

/// How a session finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEnd {
    /// Played to a terminal outcome.
    Finished(Outcome),
    /// Abandoned through the input provider.
    Aborted,
}

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Created, no turn taken yet.
    NotStarted,
    /// The strategy engine moves next.
    ComputerTurn,
    /// The input provider moves next.
    HumanTurn,
    /// Absorbing: no further moves are accepted.
    Terminal(SessionEnd),
}

impl SessionPhase {
    /// Returns true once the session has ended.
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionPhase::Terminal(_))
    }
}

/// One self-contained game.
#[derive(Debug, Clone)]
pub struct GameSession<R = StdRng> {
    board: Board,
    computer: ComputerPlayer<R>,
    phase: SessionPhase,
}

impl<R: Rng> GameSession<R> {
    /// Creates a session on an empty board.
    pub fn new(computer_starts: bool, computer: ComputerPlayer<R>) -> Self {
        Self::from_board(Board::new(computer_starts), computer)
    }

    /// Creates a session that continues from an existing board.
    pub fn from_board(board: Board, computer: ComputerPlayer<R>) -> Self {
        Self {
            board,
            computer,
            phase: SessionPhase::NotStarted,
        }
    }

    /// The board being played.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// The computer's level.
    pub fn difficulty(&self) -> Difficulty {
        self.computer.difficulty()
    }

    /// Leaves `NotStarted`; does nothing in any other phase.
    #[instrument(skip(self), fields(difficulty = %self.difficulty()))]
    pub fn start(&mut self) -> SessionPhase {
        if self.phase == SessionPhase::NotStarted {
            info!(
                computer_starts = self.board.computer_started(),
                "Session started"
            );
            self.phase = self.phase_from_board();
        }
        self.phase
    }

    /// Ends the session without touching the board.
    #[instrument(skip(self))]
    pub fn abort(&mut self) -> SessionPhase {
        if !self.phase.is_terminal() {
            info!(turn = self.board.turn(), "Session aborted");
            self.phase = SessionPhase::Terminal(SessionEnd::Aborted);
        }
        self.phase
    }

    /// Plays exactly one turn and returns the resulting phase.
    ///
    /// # Errors
    ///
    /// Returns `IllegalMove::GameOver` or `IllegalMove::Aborted` once the
    /// session is terminal, and propagates any move the board refuses. A
    /// refused move leaves the board and the phase unchanged.
    #[instrument(skip(self, input), fields(turn = self.board.turn()))]
    pub fn step<I: InputProvider + ?Sized>(
        &mut self,
        input: &mut I,
    ) -> Result<SessionPhase, EngineError> {
        match self.start() {
            SessionPhase::NotStarted => unreachable!("start() always leaves NotStarted"),
            SessionPhase::Terminal(SessionEnd::Finished(outcome)) => {
                return Err(IllegalMove::GameOver(outcome).into());
            }
            SessionPhase::Terminal(SessionEnd::Aborted) => {
                return Err(IllegalMove::Aborted.into());
            }
            SessionPhase::ComputerTurn => {
                let coordinate = self.computer.choose_move(&self.board)?;
                self.board.apply_move(coordinate, Side::Computer)?;
            }
            SessionPhase::HumanTurn => match input.request_move(self.board.open_coordinates()) {
                HumanInput::Move(coordinate) => {
                    if let Err(e) = self.board.apply_move(coordinate, Side::Human) {
                        warn!(error = %e, "Input provider returned an unplayable move");
                        return Err(e);
                    }
                }
                HumanInput::Abort => return Ok(self.abort()),
            },
        }

        self.phase = self.phase_from_board();
        debug!(phase = ?self.phase, "Turn complete");
        Ok(self.phase)
    }

    /// Runs turns until the session ends, reporting to `presenter` throughout.
    ///
    /// # Errors
    ///
    /// Propagates the first error from [`GameSession::step`].
    #[instrument(skip_all, fields(difficulty = %self.difficulty()))]
    pub fn play<I, P>(&mut self, input: &mut I, presenter: &mut P) -> Result<SessionEnd, EngineError>
    where
        I: InputProvider + ?Sized,
        P: Presenter + ?Sized,
    {
        self.start();
        presenter.show_board(&self.board);

        loop {
            match self.phase {
                SessionPhase::Terminal(end) => {
                    info!(?end, turns = self.board.history().len(), "Session ended");
                    presenter.show_end(end, &self.board);
                    return Ok(end);
                }
                SessionPhase::ComputerTurn => presenter.announce_turn(Side::Computer),
                SessionPhase::HumanTurn => presenter.announce_turn(Side::Human),
                SessionPhase::NotStarted => {}
            }

            let moves_before = self.board.history().len();
            self.step(input)?;
            if self.board.history().len() != moves_before {
                presenter.show_board(&self.board);
            }
        }
    }

    fn phase_from_board(&self) -> SessionPhase {
        let outcome = self.board.outcome();
        if outcome.is_terminal() {
            return SessionPhase::Terminal(SessionEnd::Finished(outcome));
        }
        match self.board.to_move() {
            Side::Computer => SessionPhase::ComputerTurn,
            Side::Human => SessionPhase::HumanTurn,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Scripted(Vec<HumanInput>);

    impl InputProvider for Scripted {
        fn request_move(&mut self, _open: &[Coordinate]) -> HumanInput {
            if self.0.is_empty() {
                HumanInput::Abort
            } else {
                self.0.remove(0)
            }
        }
    }

    #[test]
    fn test_phases_follow_turns() {
        let mut session = GameSession::new(false, ComputerPlayer::seeded(Difficulty::Easy, 1));
        assert_eq!(session.phase(), SessionPhase::NotStarted);
        assert_eq!(session.start(), SessionPhase::HumanTurn);

        let mut input = Scripted(vec![HumanInput::Move(Coordinate::CENTER)]);
        assert_eq!(session.step(&mut input), Ok(SessionPhase::ComputerTurn));
        assert_eq!(session.step(&mut input), Ok(SessionPhase::HumanTurn));
        assert_eq!(session.board().history().len(), 2);
    }

    #[test]
    fn test_abort_is_absorbing() {
        let mut session = GameSession::new(false, ComputerPlayer::seeded(Difficulty::Easy, 1));
        let mut input = Scripted(vec![HumanInput::Abort]);

        assert_eq!(
            session.step(&mut input),
            Ok(SessionPhase::Terminal(SessionEnd::Aborted))
        );
        assert_eq!(
            session.step(&mut input),
            Err(EngineError::IllegalMove(IllegalMove::Aborted))
        );
        assert!(session.board().history().is_empty());
    }

    #[test]
    fn test_unplayable_human_move_leaves_state() {
        let mut session = GameSession::new(true, ComputerPlayer::seeded(Difficulty::Easy, 9));
        let mut input = Scripted(Vec::new());
        session.step(&mut input).unwrap();
        let taken = session.board().history()[0].coordinate;
        let snapshot = session.board().clone();

        let mut input = Scripted(vec![HumanInput::Move(taken)]);
        assert_eq!(
            session.step(&mut input),
            Err(EngineError::IllegalMove(IllegalMove::Occupied(taken)))
        );
        assert_eq!(session.board(), &snapshot);
        assert_eq!(session.phase(), SessionPhase::HumanTurn);
    }
}
