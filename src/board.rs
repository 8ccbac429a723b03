//! # Board Model
//!
//! This module implements the 7×8 gravity-drop grid.
//! Markers are dropped into columns and fall to the lowest empty cell;
//! a side wins by lining up five markers horizontally, vertically, or
//! diagonally.
//!
//! ## Rules
//! - Row 0 is the top of the grid, row 6 the bottom; gravity pulls
//!   dropped markers toward row 6
//! - A drop is only legal into the lowest empty cell of a column
//! - First side to get 5 markers in an unbroken line wins

use std::fmt;

/// Number of rows in the grid
pub const ROWS: usize = 7;
/// Number of columns in the grid
pub const COLS: usize = 8;
/// Number of cells in the grid
pub const CELLS: usize = ROWS * COLS;
/// Markers in an unbroken line needed to win
pub const LINE_LEN: usize = 5;

/// One of the two sides contesting the grid
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Side {
    Computer,
    Player,
}

impl Side {
    /// Returns the opposing side
    pub fn opponent(self) -> Side {
        match self {
            Side::Computer => Side::Player,
            Side::Player => Side::Computer,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Computer => write!(f, "Computer"),
            Side::Player => write!(f, "Player"),
        }
    }
}

/// The state of a single grid cell
///
/// Three-state on purpose: the move heuristic branches on
/// "mine" vs "opponent's" vs "empty".
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Cell {
    Empty,
    Computer,
    Player,
}

impl Cell {
    /// The integer code used by the flat serialization (0/1/2)
    pub fn code(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Computer => 1,
            Cell::Player => 2,
        }
    }

    /// Decodes an integer cell code; codes outside 0..=2 are rejected
    pub fn from_code(code: u8) -> Option<Cell> {
        match code {
            0 => Some(Cell::Empty),
            1 => Some(Cell::Computer),
            2 => Some(Cell::Player),
            _ => None,
        }
    }
}

impl From<Side> for Cell {
    fn from(side: Side) -> Cell {
        match side {
            Side::Computer => Cell::Computer,
            Side::Player => Cell::Player,
        }
    }
}

/// A (row, column) coordinate of a just-filled cell
///
/// Row and column are 0-based; row 0 is the top of the grid.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Move {
    pub row: usize,
    pub col: usize,
}

/// Errors raised by board operations
///
/// All of these are caller-contract violations: the board performs no
/// self-correction and has no recoverable internal failure mode.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BoardError {
    /// Column index outside the grid
    InvalidColumn(usize),
    /// No empty cell left in the column
    ColumnFull(usize),
    /// Attempt to fill a cell that is occupied or not the lowest empty
    /// cell of its column
    InvalidCellState { row: usize, col: usize },
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::InvalidColumn(col) => write!(f, "column {} is outside the grid", col),
            BoardError::ColumnFull(col) => write!(f, "column {} is full", col),
            BoardError::InvalidCellState { row, col } => {
                write!(f, "cell ({}, {}) cannot be filled", row, col)
            }
        }
    }
}

impl std::error::Error for BoardError {}

/// The complete grid state
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for cell in row {
                let symbol = match cell {
                    Cell::Computer => "C",
                    Cell::Player => "P",
                    Cell::Empty => ".",
                };
                write!(f, "{} ", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Board {
    /// Creates an empty grid
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; COLS]; ROWS],
        }
    }

    /// Returns the value of a single cell
    ///
    /// # Panics
    /// Panics if the coordinate lies outside the 7×8 grid.
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// Finds the lowest empty row of a column, scanning from the bottom
    ///
    /// Returns `Ok(None)` when the column is full. This is the sole
    /// legality rule for a drop: a drop into `col` is legal iff this
    /// returns a row.
    pub fn lowest_empty_row(&self, col: usize) -> Result<Option<usize>, BoardError> {
        if col >= COLS {
            return Err(BoardError::InvalidColumn(col));
        }
        Ok((0..ROWS).rev().find(|&row| self.cells[row][col] == Cell::Empty))
    }

    /// True when the cell is empty and a marker dropped into its column
    /// would land there right now
    pub fn is_droppable(&self, row: usize, col: usize) -> bool {
        self.cells[row][col] == Cell::Empty
            && (row == ROWS - 1 || self.cells[row + 1][col] != Cell::Empty)
    }

    /// Fills a known cell with a side's marker
    ///
    /// The caller resolves the target cell beforehand (via
    /// [`lowest_empty_row`](Board::lowest_empty_row)); the board does not
    /// re-derive gravity placement from a bare column index. Filling an
    /// occupied cell or one floating above an empty cell is a contract
    /// violation and fails with [`BoardError::InvalidCellState`].
    pub fn apply_move(&mut self, row: usize, col: usize, side: Side) -> Result<(), BoardError> {
        if col >= COLS {
            return Err(BoardError::InvalidColumn(col));
        }
        if row >= ROWS || !self.is_droppable(row, col) {
            return Err(BoardError::InvalidCellState { row, col });
        }
        self.cells[row][col] = Cell::from(side);
        Ok(())
    }

    /// Drops a side's marker into a column, resolving the landing row
    ///
    /// Convenience for drivers: combines
    /// [`lowest_empty_row`](Board::lowest_empty_row) and
    /// [`apply_move`](Board::apply_move).
    ///
    /// # Returns
    /// The coordinate of the filled cell, or
    /// [`BoardError::ColumnFull`] when the column has no room.
    pub fn drop_piece(&mut self, col: usize, side: Side) -> Result<Move, BoardError> {
        let row = self
            .lowest_empty_row(col)?
            .ok_or(BoardError::ColumnFull(col))?;
        self.apply_move(row, col, side)?;
        Ok(Move { row, col })
    }

    /// True when no column has room left
    pub fn is_full(&self) -> bool {
        self.cells[0].iter().all(|&cell| cell != Cell::Empty)
    }

    /// Number of cells holding the given side's marker
    pub fn count(&self, side: Side) -> usize {
        let want = Cell::from(side);
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell == want)
            .count()
    }

    /// Searches the grid for a completed line of 5 for the given side
    ///
    /// Every cell is tried as a line start, rows top to bottom, columns
    /// left to right. At each start four window shapes are checked in
    /// order: diagonal-up-right, horizontal-right, diagonal-down-right,
    /// vertical-down. Together these cover every possible line of 5 on
    /// the grid. The first complete match is returned in window order.
    pub fn find_winning_line(&self, side: Side) -> Option<[Move; LINE_LEN]> {
        let want = Cell::from(side);
        for row in 0..ROWS {
            for col in 0..COLS {
                if row >= LINE_LEN - 1 && col + LINE_LEN <= COLS {
                    // Diagonal up-right
                    if let Some(line) = self.matched_line(want, |m| (row - m, col + m)) {
                        return Some(line);
                    }
                }
                if col + LINE_LEN <= COLS {
                    // Horizontal
                    if let Some(line) = self.matched_line(want, |m| (row, col + m)) {
                        return Some(line);
                    }
                }
                if row + LINE_LEN <= ROWS && col + LINE_LEN <= COLS {
                    // Diagonal down-right
                    if let Some(line) = self.matched_line(want, |m| (row + m, col + m)) {
                        return Some(line);
                    }
                }
                if row + LINE_LEN <= ROWS {
                    // Vertical
                    if let Some(line) = self.matched_line(want, |m| (row + m, col)) {
                        return Some(line);
                    }
                }
            }
        }
        None
    }

    /// Checks one 5-cell window; returns its coordinates when every
    /// cell holds `want`
    fn matched_line(
        &self,
        want: Cell,
        step: impl Fn(usize) -> (usize, usize),
    ) -> Option<[Move; LINE_LEN]> {
        let mut line = [Move { row: 0, col: 0 }; LINE_LEN];
        for (m, slot) in line.iter_mut().enumerate() {
            let (row, col) = step(m);
            if self.cells[row][col] != want {
                return None;
            }
            *slot = Move { row, col };
        }
        Some(line)
    }

    /// The grid as a flat row-major sequence of 56 cell codes
    /// (0 = empty, 1 = computer, 2 = player)
    pub fn codes(&self) -> [u8; CELLS] {
        let mut codes = [0u8; CELLS];
        for row in 0..ROWS {
            for col in 0..COLS {
                codes[row * COLS + col] = self.cells[row][col].code();
            }
        }
        codes
    }

    /// Rebuilds a grid from a flat row-major code sequence
    ///
    /// Returns `None` unless the slice holds exactly 56 codes, each one
    /// of 0/1/2.
    pub fn from_codes(codes: &[u8]) -> Option<Board> {
        if codes.len() != CELLS {
            return None;
        }
        let mut board = Board::new();
        for (index, &code) in codes.iter().enumerate() {
            board.cells[index / COLS][index % COLS] = Cell::from_code(code)?;
        }
        Some(board)
    }
}
