//! # Drop Five
//!
//! A two-player gravity-drop connection game on a 7×8 grid: markers are
//! dropped into columns and fall to the bottom, and the first side to
//! line up five in a row (horizontally, vertically, or diagonally)
//! wins. One side is human-controlled; the other is a computer opponent
//! driven by a greedy heuristic line scan.
//!
//! The library is split into:
//! - [`board`] — the grid state, gravity-constrained drops, and win
//!   detection
//! - [`selector`] — the computer's move heuristic with a seeded random
//!   fallback
//! - [`session`] — turn sequencing and game status around the board
//! - [`save`] — the comma-separated save-file codec
//!
//! The core is single-threaded and synchronous; all randomness enters
//! through an injected [`rand::Rng`], so games replay identically under
//! a fixed seed.

pub mod board;
pub mod save;
pub mod selector;
pub mod session;

pub use board::{Board, BoardError, Cell, Move, Side, CELLS, COLS, LINE_LEN, ROWS};
pub use selector::select_move;
pub use session::{GameStatus, Session, SessionError};
