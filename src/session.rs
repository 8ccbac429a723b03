//! # Game Session - Turn Sequencing and Game Status
//!
//! The session owns the authoritative board state and the cross-cutting
//! turn state around it: whose move it is, how many moves each side has
//! made, and whether the game has been decided. All moves go through
//! the session, which validates them against the current turn and board
//! before application.
//!
//! The board and the move selector stay pure over whatever grid they
//! are given; everything turn-shaped lives here.

use std::fmt;

use rand::Rng;

use crate::board::{Board, BoardError, Move, Side, LINE_LEN};
use crate::selector;

/// Current status of a game
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameStatus {
    /// Game is still in progress
    InProgress,
    /// A side completed a line of 5
    Won {
        side: Side,
        /// The winning line, for highlighting
        line: [Move; LINE_LEN],
    },
    /// The grid filled up with no winner
    Draw,
}

impl GameStatus {
    /// Check if the game is over
    pub fn is_over(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

/// Errors raised when a move is rejected by the session
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SessionError {
    /// The board rejected the move
    Board(BoardError),
    /// The move came from the side whose turn it is not
    NotYourTurn,
    /// The game is already decided
    GameOver,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Board(err) => write!(f, "{}", err),
            SessionError::NotYourTurn => write!(f, "it is not that side's turn"),
            SessionError::GameOver => write!(f, "the game is already over"),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<BoardError> for SessionError {
    fn from(err: BoardError) -> Self {
        SessionError::Board(err)
    }
}

/// A running game: board plus turn ownership and move counters
#[derive(Clone, Debug)]
pub struct Session {
    board: Board,
    to_move: Side,
    computer_moves: u32,
    player_moves: u32,
    status: GameStatus,
}

impl Default for Session {
    fn default() -> Self {
        Session::new()
    }
}

impl Session {
    /// Starts a fresh game; the computer moves first
    pub fn new() -> Self {
        Session {
            board: Board::new(),
            to_move: Side::Computer,
            computer_moves: 0,
            player_moves: 0,
            status: GameStatus::InProgress,
        }
    }

    /// Resumes a game from a restored board
    ///
    /// Move counters are recovered from the piece counts, and the side
    /// to move is inferred from them: when the computer has more pieces
    /// down it is the player's turn, otherwise the computer's. An empty
    /// board therefore gives the computer the opening move.
    pub fn resume(board: Board) -> Self {
        let computer_moves = board.count(Side::Computer) as u32;
        let player_moves = board.count(Side::Player) as u32;
        let to_move = if computer_moves > player_moves {
            Side::Player
        } else {
            Side::Computer
        };
        Session {
            board,
            to_move,
            computer_moves,
            player_moves,
            status: GameStatus::InProgress,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn to_move(&self) -> Side {
        self.to_move
    }

    /// Number of moves the given side has made
    pub fn move_count(&self, side: Side) -> u32 {
        match side {
            Side::Computer => self.computer_moves,
            Side::Player => self.player_moves,
        }
    }

    /// Plays the human side's drop into a column
    ///
    /// Validates the turn and the drop, applies it, re-checks the win
    /// condition, and hands the turn to the computer.
    pub fn play_human(&mut self, col: usize) -> Result<Move, SessionError> {
        if self.status.is_over() {
            return Err(SessionError::GameOver);
        }
        if self.to_move != Side::Player {
            return Err(SessionError::NotYourTurn);
        }

        let mv = self.board.drop_piece(col, Side::Player)?;
        self.player_moves += 1;
        self.to_move = self.to_move.opponent();
        self.check_win(Side::Player);
        Ok(mv)
    }

    /// Plays the computer side's turn using the heuristic selector
    ///
    /// Returns `Ok(None)` when the selector finds no room left, which
    /// ends the game as a draw.
    pub fn play_computer<R: Rng>(&mut self, rng: &mut R) -> Result<Option<Move>, SessionError> {
        if self.status.is_over() {
            return Err(SessionError::GameOver);
        }
        if self.to_move != Side::Computer {
            return Err(SessionError::NotYourTurn);
        }

        let Some(mv) = selector::select_move(&self.board, rng) else {
            self.status = GameStatus::Draw;
            return Ok(None);
        };
        self.board.apply_move(mv.row, mv.col, Side::Computer)?;
        self.computer_moves += 1;
        self.to_move = self.to_move.opponent();
        self.check_win(Side::Computer);
        Ok(Some(mv))
    }

    fn check_win(&mut self, side: Side) {
        if let Some(line) = self.board.find_winning_line(side) {
            self.status = GameStatus::Won { side, line };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    fn rng() -> Xoshiro256PlusPlus {
        Xoshiro256PlusPlus::seed_from_u64(7)
    }

    #[test]
    fn test_computer_opens_a_fresh_game() {
        let mut session = Session::new();
        assert_eq!(session.to_move(), Side::Computer);
        assert_eq!(session.play_human(0), Err(SessionError::NotYourTurn));

        let mv = session.play_computer(&mut rng()).unwrap().unwrap();
        assert_eq!(mv.row, 6);
        assert_eq!(session.move_count(Side::Computer), 1);
        assert_eq!(session.to_move(), Side::Player);
    }

    #[test]
    fn test_turns_alternate() {
        let mut session = Session::new();
        session.play_computer(&mut rng()).unwrap();
        session.play_human(3).unwrap();
        assert_eq!(
            session.play_human(3),
            Err(SessionError::NotYourTurn)
        );
        assert_eq!(session.move_count(Side::Player), 1);
    }

    #[test]
    fn test_human_drop_is_validated() {
        let mut session = Session::new();
        session.play_computer(&mut rng()).unwrap();
        assert_eq!(
            session.play_human(9),
            Err(SessionError::Board(BoardError::InvalidColumn(9)))
        );
        // The failed drop must not consume the turn
        assert_eq!(session.to_move(), Side::Player);
        session.play_human(2).unwrap();
    }

    #[test]
    fn test_player_win_sets_status_and_blocks_further_moves() {
        let mut board = Board::new();
        // Player holds (6,0)..(6,3); the computer is one piece ahead
        // so the resumed session gives the player the move
        for col in 0..4 {
            board.drop_piece(col, Side::Player).unwrap();
        }
        for col in [5, 6] {
            board.drop_piece(col, Side::Computer).unwrap();
        }
        board.drop_piece(7, Side::Computer).unwrap();
        board.drop_piece(7, Side::Computer).unwrap();
        board.drop_piece(7, Side::Computer).unwrap();

        let mut session = Session::resume(board);
        assert_eq!(session.to_move(), Side::Player);
        session.play_human(4).unwrap();

        match session.status() {
            GameStatus::Won { side, line } => {
                assert_eq!(side, Side::Player);
                assert_eq!(line[0], Move { row: 6, col: 0 });
                assert_eq!(line[4], Move { row: 6, col: 4 });
            }
            other => panic!("expected a player win, got {:?}", other),
        }
        assert_eq!(session.play_computer(&mut rng()), Err(SessionError::GameOver));
        assert_eq!(session.play_human(0), Err(SessionError::GameOver));
    }

    #[test]
    fn test_resume_turn_inference() {
        let mut board = Board::new();
        board.drop_piece(0, Side::Computer).unwrap();
        let session = Session::resume(board.clone());
        assert_eq!(session.to_move(), Side::Player);
        assert_eq!(session.move_count(Side::Computer), 1);

        board.drop_piece(1, Side::Player).unwrap();
        let session = Session::resume(board);
        assert_eq!(session.to_move(), Side::Computer);
    }

    #[test]
    fn test_full_board_draw() {
        let mut board = Board::new();
        // Fill every column except the last cell of column 7, with a
        // period-4 pattern that lines nothing up
        let mut cells: Vec<(usize, usize)> = Vec::new();
        for row in (0..7).rev() {
            for col in 0..8 {
                cells.push((row, col));
            }
        }
        for (row, col) in cells {
            if (row, col) == (0, 7) {
                continue;
            }
            let side = if (col + 2 * row) % 4 < 2 {
                Side::Computer
            } else {
                Side::Player
            };
            board.apply_move(row, col, side).unwrap();
        }

        // The computer is one piece ahead, so the player fills the
        // last cell; the pattern still lines nothing up
        let mut session = Session::resume(board);
        assert_eq!(session.to_move(), Side::Player);
        session.play_human(7).unwrap();
        assert_eq!(session.status(), GameStatus::InProgress);

        // With the grid full the selector has nothing left
        assert_eq!(session.play_computer(&mut rng()).unwrap(), None);
        assert_eq!(session.status(), GameStatus::Draw);
        assert_eq!(session.play_human(0), Err(SessionError::GameOver));
    }
}
