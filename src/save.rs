//! # Save-File Codec
//!
//! A saved game is the grid as its 56 row-major cell codes, each
//! followed by a comma (`"0,0,1,2,..."`, trailing comma included).
//! An absent or empty file means no saved game.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use crate::board::{Board, Cell, CELLS};

/// Errors raised while reading or decoding a saved game
#[derive(Debug)]
pub enum SaveError {
    Io(io::Error),
    /// An entry that is not an integer cell code
    Malformed(String),
    /// Wrong number of cell codes for a 7×8 grid
    WrongCount(usize),
    /// A code outside 0/1/2
    BadCode(u8),
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveError::Io(err) => write!(f, "save file i/o error: {}", err),
            SaveError::Malformed(entry) => write!(f, "malformed cell code {:?}", entry),
            SaveError::WrongCount(count) => {
                write!(f, "expected {} cell codes, found {}", CELLS, count)
            }
            SaveError::BadCode(code) => write!(f, "cell code {} is not one of 0/1/2", code),
        }
    }
}

impl std::error::Error for SaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SaveError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for SaveError {
    fn from(err: io::Error) -> Self {
        SaveError::Io(err)
    }
}

/// Encodes a board as its comma-separated cell codes
pub fn encode(board: &Board) -> String {
    let mut data = String::with_capacity(CELLS * 2);
    for code in board.codes() {
        data.push_str(&code.to_string());
        data.push(',');
    }
    data
}

/// Decodes a comma-separated code string back into a board
///
/// Empty segments (such as the one after the trailing comma) are
/// ignored; everything else must parse to one of the 56 codes.
pub fn decode(data: &str) -> Result<Board, SaveError> {
    let mut codes = Vec::with_capacity(CELLS);
    for entry in data.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let code = entry
            .parse::<u8>()
            .map_err(|_| SaveError::Malformed(entry.to_string()))?;
        codes.push(code);
    }
    if codes.len() != CELLS {
        return Err(SaveError::WrongCount(codes.len()));
    }
    if let Some(&bad) = codes.iter().find(|&&code| Cell::from_code(code).is_none()) {
        return Err(SaveError::BadCode(bad));
    }
    // Length and codes are validated above, so this cannot be None
    Board::from_codes(&codes).ok_or(SaveError::WrongCount(codes.len()))
}

/// Writes a board to the save file
pub fn write_save(path: &Path, board: &Board) -> Result<(), SaveError> {
    fs::write(path, encode(board))?;
    Ok(())
}

/// Reads the saved game, if one exists
///
/// An absent or empty file is `Ok(None)`.
pub fn read_save(path: &Path) -> Result<Option<Board>, SaveError> {
    if !path.exists() {
        return Ok(None);
    }
    let data = fs::read_to_string(path)?;
    if data.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(decode(&data)?))
}

/// Truncates the save file, discarding any saved game
pub fn clear_save(path: &Path) -> Result<(), SaveError> {
    if path.exists() {
        fs::write(path, "")?;
    }
    Ok(())
}
