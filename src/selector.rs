//! # Move Selector
//!
//! Computes the computer side's next move with a single-pass greedy
//! line scan: every 5-cell window on the grid is scored once for
//! "how close is the computer to completing it" and once for "how close
//! is the player", the single best-scoring window wins, and the move is
//! the first cell of that window a marker can currently be dropped
//! into. When no window scores at all, the move falls back to a uniform
//! random drop.
//!
//! This is deliberately not a game-tree search. The scorer looks one
//! winner-take-all window ahead, offense and defense compete in the
//! same comparison, and ties keep the earliest window found. The
//! heuristic's window directions run upward from each start cell,
//! unlike the win detector's downward set; both cover the full grid
//! because every cell is visited as a start point.

use rand::Rng;

use crate::board::{Board, Cell, Move, COLS, LINE_LEN, ROWS};

/// Running best window of the scan
struct BestWindow {
    /// Highest computer score seen so far
    computer: usize,
    /// Highest player score seen so far
    opponent: usize,
    line: Option<[Move; LINE_LEN]>,
}

/// Selects the computer's next move, or `None` when the grid is full
/// and the game is a draw
///
/// The randomness only enters through the fallback path; under a fixed
/// seed the whole selection is deterministic.
pub fn select_move<R: Rng>(board: &Board, rng: &mut R) -> Option<Move> {
    if let Some(mv) = best_scoring_move(board) {
        return Some(mv);
    }

    // No window offers an advantage anymore; fill the grid randomly.
    // One candidate per column with room: its gravity drop target.
    let candidates: Vec<Move> = (0..COLS)
        .filter_map(|col| {
            (0..ROWS)
                .rev()
                .find(|&row| board.cell(row, col) == Cell::Empty)
                .map(|row| Move { row, col })
        })
        .collect();

    if candidates.is_empty() {
        None // draw
    } else {
        Some(candidates[rng.gen_range(0..candidates.len())])
    }
}

/// Runs the heuristic window scan and returns the chosen droppable
/// cell, if any window scored
///
/// Starts are scanned rows 6 down to 0, columns 0 up to 7. At each
/// start up to four windows are scored in order: diagonal-up-right,
/// horizontal-right, diagonal-up-left, vertical-up.
pub fn best_scoring_move(board: &Board) -> Option<Move> {
    let mut best = BestWindow {
        computer: 0,
        opponent: 0,
        line: None,
    };

    for row in (0..ROWS).rev() {
        for col in 0..COLS {
            if row >= LINE_LEN - 1 && col + LINE_LEN <= COLS {
                score_window(board, window(|m| (row - m, col + m)), &mut best);
            }
            if col + LINE_LEN <= COLS {
                score_window(board, window(|m| (row, col + m)), &mut best);
            }
            if row >= LINE_LEN - 1 && col >= LINE_LEN - 1 {
                score_window(board, window(|m| (row - m, col - m)), &mut best);
            }
            if row >= LINE_LEN - 1 {
                score_window(board, window(|m| (row - m, col)), &mut best);
            }
        }
    }

    // Walk the chosen window in order and take the first cell a marker
    // can land in right now. A window without one yields nothing.
    let line = best.line?;
    line.iter()
        .copied()
        .find(|mv| board.is_droppable(mv.row, mv.col))
}

/// Builds the 5 coordinates of one window from its step function
fn window(step: impl Fn(usize) -> (usize, usize)) -> [Move; LINE_LEN] {
    std::array::from_fn(|m| {
        let (row, col) = step(m);
        Move { row, col }
    })
}

/// Scores one window both ways and replaces the running best when
/// either score strictly exceeds both running maxima
///
/// A tie never replaces, so the earliest maximal window in scan order
/// is kept, and a window whose two scores are equal is taken on its
/// computer score first.
fn score_window(board: &Board, line: [Move; LINE_LEN], best: &mut BestWindow) {
    let opponent = opponent_score(board, &line);
    let computer = computer_score(board, &line);

    if computer > best.opponent && computer > best.computer {
        best.computer = computer;
        best.line = Some(line);
    } else if opponent > best.computer && opponent > best.opponent {
        best.opponent = opponent;
        best.line = Some(line);
    }
}

/// How strong a block-opportunity the window is: the count of player
/// markers in it
///
/// A computer marker anywhere in the window means the player can no
/// longer complete it, so the score collapses to 0.
fn opponent_score(board: &Board, line: &[Move; LINE_LEN]) -> usize {
    let mut count = 0;
    for mv in line {
        match board.cell(mv.row, mv.col) {
            Cell::Player => count += 1,
            Cell::Computer => return 0,
            Cell::Empty => {}
        }
    }
    count
}

/// How close the computer is to completing the window: the count of
/// its own markers
///
/// A player marker collapses the score to 0. So does an empty cell
/// that nothing can drop into yet (not on the bottom row and with an
/// empty cell directly below): no single move could advance such a
/// window.
fn computer_score(board: &Board, line: &[Move; LINE_LEN]) -> usize {
    let mut count = 0;
    for mv in line {
        match board.cell(mv.row, mv.col) {
            Cell::Computer => count += 1,
            Cell::Player => return 0,
            Cell::Empty => {
                if mv.row != ROWS - 1 && board.cell(mv.row + 1, mv.col) == Cell::Empty {
                    return 0;
                }
            }
        }
    }
    count
}
