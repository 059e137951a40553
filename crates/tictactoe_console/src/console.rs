//! Text console: prompts, board rendering and the end-of-game taunts.
//!
//! Both halves are generic over their streams so a whole game can be scripted
//! against in-memory buffers.

use crate::config::{FirstPlayer, GameConfig};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::{self, BufRead, Write};
use tictactoe_engine::{
    Board, ComputerPlayer, Coordinate, Difficulty, GameSession, HumanInput, InputProvider, Outcome,
    Presenter, SessionEnd, Side,
};
use tracing::{debug, info, instrument, warn};

/// Welcome text shown before the level prompt.
pub const INSTRUCTIONS: &str = "\
Welcome human, to the greatest intellectual challenge of all time: Tic-Tac-Toe.
Here, you will challenge and face my silicon processor.
You will enter your move as a number from 0 through 8 which will correspond
to one of the following positions:

\t\t 0 | 1 | 2
\t\t-----------
\t\t 3 | 4 | 5
\t\t-----------
\t\t 6 | 7 | 8

You will be player 'O', I will be 'X'.
Type q at any prompt to flee.
Prepare yourself, human. The worst is yet to come!
";

const INVALID_INPUT: &str = "That is invalid input.";

/// Reads the human's answers and moves, re-prompting until they make sense.
///
/// An I/O failure while reading a move abandons the game. The error is kept
/// for [`ConsoleInput::take_error`] so the caller can report it.
pub struct ConsoleInput<R, W> {
    reader: R,
    writer: W,
    failure: Option<io::Error>,
}

impl<R: BufRead, W: Write> ConsoleInput<R, W> {
    /// Wraps an input stream and the stream prompts are written to.
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            failure: None,
        }
    }

    /// Removes the I/O error that ended the game early, if there was one.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.failure.take()
    }

    /// Returns the underlying streams.
    pub fn into_parts(self) -> (R, W) {
        (self.reader, self.writer)
    }

    /// Writes the welcome banner.
    pub fn write_instructions(&mut self) -> io::Result<()> {
        self.writer.write_all(INSTRUCTIONS.as_bytes())?;
        self.writer.flush()
    }

    /// Asks for a level until one parses. `None` means the human quit.
    #[instrument(skip(self))]
    pub fn prompt_level(&mut self) -> io::Result<Option<Difficulty>> {
        writeln!(self.writer, "Select which level you would like to play")?;
        writeln!(self.writer, "\tEasy\n\tMedium\n\tHard\n\tWizard")?;
        loop {
            let Some(answer) = self.ask("Level: ")? else {
                return Ok(None);
            };
            match answer.parse::<Difficulty>() {
                Ok(level) => return Ok(Some(level)),
                Err(_) => {
                    debug!(%answer, "Unrecognized level");
                    writeln!(self.writer, "{}", INVALID_INPUT)?;
                }
            }
        }
    }

    /// Asks who opens: `Y` for the human, `N` for the computer, `R` for a coin
    /// flip. `None` means the human quit.
    #[instrument(skip(self))]
    pub fn prompt_first(&mut self) -> io::Result<Option<FirstPlayer>> {
        writeln!(self.writer, "Would you like to go first?")?;
        let mut prompt = "Type Y to go first, N to not, or R to choose randomly: ";
        loop {
            let Some(answer) = self.ask(prompt)? else {
                return Ok(None);
            };
            let first = match answer.chars().next().map(|c| c.to_ascii_uppercase()) {
                Some('Y') => FirstPlayer::Human,
                Some('N') => FirstPlayer::Computer,
                Some('R') => FirstPlayer::Random,
                _ => {
                    prompt = "That is invalid input. Please re-enter: ";
                    continue;
                }
            };
            return Ok(Some(first));
        }
    }

    /// Writes `prompt` and reads one trimmed line.
    ///
    /// Returns `None` at end of input or when the human types `q` or `quit`.
    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.writer, "{}", prompt)?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            debug!("Input closed");
            return Ok(None);
        }
        let answer = line.trim();
        if answer.eq_ignore_ascii_case("q") || answer.eq_ignore_ascii_case("quit") {
            return Ok(None);
        }
        Ok(Some(answer.to_string()))
    }

    fn read_move(&mut self, open: &[Coordinate]) -> io::Result<HumanInput> {
        loop {
            let Some(answer) = self.ask("\nEnter your move: ")? else {
                return Ok(HumanInput::Abort);
            };
            let chosen = answer
                .parse::<usize>()
                .ok()
                .and_then(|index| Coordinate::from_index(index).ok())
                .filter(|c| open.contains(c));
            match chosen {
                Some(coordinate) => return Ok(HumanInput::Move(coordinate)),
                None => {
                    debug!(%answer, "Rejected move input");
                    writeln!(self.writer, "{}", INVALID_INPUT)?;
                }
            }
        }
    }
}

impl<R: BufRead, W: Write> InputProvider for ConsoleInput<R, W> {
    fn request_move(&mut self, open: &[Coordinate]) -> HumanInput {
        match self.read_move(open) {
            Ok(input) => input,
            Err(e) => {
                warn!(error = %e, "Console input failed, abandoning game");
                if self.failure.is_none() {
                    self.failure = Some(e);
                }
                HumanInput::Abort
            }
        }
    }
}

/// Draws the board and comments on the game.
///
/// After the first write error nothing more is written. The error is kept for
/// [`ConsolePresenter::take_error`].
pub struct ConsolePresenter<W> {
    writer: W,
    failure: Option<io::Error>,
}

impl<W: Write> ConsolePresenter<W> {
    /// Wraps the output stream.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            failure: None,
        }
    }

    /// Removes the first write error, if there was one.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.failure.take()
    }

    /// Returns the underlying stream.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn emit(&mut self, text: std::fmt::Arguments<'_>) {
        if self.failure.is_some() {
            return;
        }
        let result = self
            .writer
            .write_fmt(text)
            .and_then(|()| self.writer.flush());
        if let Err(e) = result {
            warn!(error = %e, "Console output failed");
            self.failure = Some(e);
        }
    }
}

/// Closing line for a finished or abandoned game.
pub fn taunt(end: SessionEnd) -> &'static str {
    match end {
        SessionEnd::Finished(Outcome::ComputerWin) => {
            "Ha, I won! Your puny mind is no match for me!"
        }
        SessionEnd::Finished(Outcome::HumanWin) => {
            "No, no! You have won! But I swear I shall have vengeance!"
        }
        SessionEnd::Finished(_) => "It's a draw. Consider yourself lucky, human.",
        SessionEnd::Aborted => "Fleeing already? Come back when you are braver, human.",
    }
}

impl<W: Write> Presenter for ConsolePresenter<W> {
    fn show_board(&mut self, board: &Board) {
        self.emit(format_args!("\n{}\n", board));
    }

    fn announce_turn(&mut self, side: Side) {
        if side == Side::Computer {
            self.emit(format_args!("Now it's my turn...\n"));
        }
    }

    fn show_end(&mut self, end: SessionEnd, _board: &Board) {
        self.emit(format_args!("\n{}\n", taunt(end)));
    }
}

/// Runs one game on the console, prompting for any setting `config` leaves open.
///
/// Returns `None` when the human quits during setup.
///
/// # Errors
///
/// Fails on console I/O errors and on engine errors, which indicate a bug.
#[instrument(skip_all)]
pub fn run_game<R, W, V>(
    config: &GameConfig,
    mut input: ConsoleInput<R, W>,
    mut presenter: ConsolePresenter<V>,
) -> anyhow::Result<Option<SessionEnd>>
where
    R: BufRead,
    W: Write,
    V: Write,
{
    if *config.instructions() {
        input.write_instructions()?;
    }

    let level = match config.level() {
        Some(level) => *level,
        None => match input.prompt_level()? {
            Some(level) => level,
            None => return Ok(None),
        },
    };
    let first = match config.first() {
        Some(first) => *first,
        None => match input.prompt_first()? {
            Some(first) => first,
            None => return Ok(None),
        },
    };

    let mut rng = match config.seed() {
        Some(seed) => StdRng::seed_from_u64(*seed),
        None => StdRng::from_os_rng(),
    };
    let computer_starts = first.computer_starts(&mut rng);
    info!(%level, %first, computer_starts, "Starting game");

    let computer = ComputerPlayer::with_rng(level, rng);
    let mut session = GameSession::new(computer_starts, computer);
    let end = session.play(&mut input, &mut presenter)?;

    if let Some(e) = input.take_error() {
        return Err(anyhow::Error::new(e).context("Failed to read a move"));
    }
    if let Some(e) = presenter.take_error() {
        return Err(anyhow::Error::new(e).context("Failed to draw the game"));
    }
    Ok(Some(end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(text: &str) -> ConsoleInput<&[u8], Vec<u8>> {
        ConsoleInput::new(text.as_bytes(), Vec::new())
    }

    fn written(console: ConsoleInput<&[u8], Vec<u8>>) -> String {
        String::from_utf8(console.into_parts().1).unwrap()
    }

    #[test]
    fn test_move_retries_until_open() {
        let mut console = input("nine\n9\n4\n2\n");
        let open = [Coordinate::from_index(2).unwrap()];
        assert_eq!(
            console.request_move(&open),
            HumanInput::Move(Coordinate::from_index(2).unwrap())
        );
        assert_eq!(written(console).matches(INVALID_INPUT).count(), 3);
    }

    #[test]
    fn test_move_abort_on_quit_and_eof() {
        let open = Coordinate::ALL;
        assert_eq!(input("q\n").request_move(&open), HumanInput::Abort);
        assert_eq!(input("QUIT\n").request_move(&open), HumanInput::Abort);
        assert_eq!(input("").request_move(&open), HumanInput::Abort);
    }

    struct Broken;

    impl io::Read for Broken {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("stream closed"))
        }
    }

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("stream closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_read_failure_aborts_and_is_kept() {
        let mut console = ConsoleInput::new(io::BufReader::new(Broken), Vec::new());
        assert_eq!(console.request_move(&Coordinate::ALL), HumanInput::Abort);
        let error = console.take_error().unwrap();
        assert_eq!(error.to_string(), "stream closed");
        assert!(console.take_error().is_none());
    }

    #[test]
    fn test_write_failure_is_kept_once() {
        let mut presenter = ConsolePresenter::new(Broken);
        let board = Board::new(true);
        presenter.show_board(&board);
        presenter.show_end(SessionEnd::Aborted, &board);
        assert!(presenter.take_error().is_some());
        assert!(presenter.take_error().is_none());
    }

    #[test]
    fn test_level_prompt_accepts_any_case() {
        let mut console = input("impossible\n  mEdIuM \n");
        assert_eq!(console.prompt_level().unwrap(), Some(Difficulty::Medium));
        assert!(written(console).contains(INVALID_INPUT));
    }

    #[test]
    fn test_first_prompt_choices() {
        assert_eq!(input("y\n").prompt_first().unwrap(), Some(FirstPlayer::Human));
        assert_eq!(input("No\n").prompt_first().unwrap(), Some(FirstPlayer::Computer));
        assert_eq!(input("x\nR\n").prompt_first().unwrap(), Some(FirstPlayer::Random));
        assert_eq!(input("").prompt_first().unwrap(), None);
    }

    #[test]
    fn test_presenter_taunts() {
        let mut presenter = ConsolePresenter::new(Vec::new());
        let board = Board::new(true);
        presenter.announce_turn(Side::Human);
        presenter.announce_turn(Side::Computer);
        presenter.show_end(SessionEnd::Finished(Outcome::Draw), &board);

        let text = String::from_utf8(presenter.into_inner()).unwrap();
        assert_eq!(text.matches("my turn").count(), 1);
        assert!(text.contains("Consider yourself lucky"));
    }
}
