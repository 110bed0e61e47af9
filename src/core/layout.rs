//! Board description files
//!
//! Two formats are supported.
//!
//! Board description (`.brd`): the player sequence on the first line, then one
//! board row per line with comma-separated two-character cells (`{type}{color}`,
//! colours `w`, `b`, `r`, `y`). Empty cells are written `--`.
//!
//! ```text
//! 0w01b2
//! rw,nw,bw,kw,qw,bw,nw,rw
//! pw,pw,pw,pw,pw,pw,pw,pw
//! --,--,--,--,--,--,--,--
//! ```
//!
//! Compact rank notation (`.fen`): a single FEN-like line. Ranks are separated
//! by `/`, digit runs are empty squares (several digits allowed, so ranks can
//! be wider than 9), uppercase letters are white pieces and lowercase letters
//! black ones. The optional second field is the side to move (`w` default).
//! When white is to move the ranks are stored turned by half a turn so that
//! white's pieces sit on the low rows of the canonical board.

use super::board::{Board, Cell, Color, Piece};
use super::sequence::{PlayerSequence, SequenceError};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unsupported extension '{0}'")]
    UnsupportedExtension(String),
    #[error("board must have at least one row")]
    Empty,
    #[error("board side exceeds {limit} squares")]
    TooLarge { limit: usize },
    #[error("all rows must have the same width (row {row} has {found} cells, expected {expected})")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("invalid piece '{0}'")]
    InvalidPiece(String),
    #[error("invalid player '{0}'")]
    InvalidSideToMove(String),
    #[error(transparent)]
    Sequence(#[from] SequenceError),
    #[error("{0} pieces cannot be written in rank notation")]
    UnrepresentableColor(Color),
    #[error("player sequence '{0}' cannot be written in rank notation")]
    UnrepresentableSequence(String),
}

/// Largest accepted board height or width.
pub const MAX_SIDE: usize = 256;

/// A loaded game setup: turn order and canonical board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    pub sequence: PlayerSequence,
    pub board: Board,
}

/// Standard 8x8 two-player start.
pub const DEFAULT_BRD: &str = "0w01b2
rw,nw,bw,kw,qw,bw,nw,rw
pw,pw,pw,pw,pw,pw,pw,pw
--,--,--,--,--,--,--,--
--,--,--,--,--,--,--,--
--,--,--,--,--,--,--,--
--,--,--,--,--,--,--,--
pb,pb,pb,pb,pb,pb,pb,pb
rb,nb,bb,kb,qb,bb,nb,rb
";

impl Default for Layout {
    fn default() -> Self {
        // DEFAULT_BRD is a fixed, well-formed layout
        Layout::from_brd(DEFAULT_BRD).expect("built-in layout is valid")
    }
}

fn check_rectangular(rows: &[Vec<Cell>]) -> Result<(), LayoutError> {
    let expected = rows.first().map(Vec::len).ok_or(LayoutError::Empty)?;
    if expected == 0 {
        return Err(LayoutError::Empty);
    }
    if rows.len() > MAX_SIDE || expected > MAX_SIDE {
        return Err(LayoutError::TooLarge { limit: MAX_SIDE });
    }
    for (row, cells) in rows.iter().enumerate() {
        if cells.len() != expected {
            return Err(LayoutError::Ragged {
                row,
                expected,
                found: cells.len(),
            });
        }
    }
    Ok(())
}

fn into_board(rows: Vec<Vec<Cell>>) -> Result<Board, LayoutError> {
    check_rectangular(&rows)?;
    Board::from_rows(rows).ok_or(LayoutError::Empty)
}

impl Layout {
    pub fn new(sequence: PlayerSequence, board: Board) -> Self {
        Layout { sequence, board }
    }

    /// Parse the `.brd` board description format.
    pub fn from_brd(text: &str) -> Result<Self, LayoutError> {
        let mut lines = text.lines();
        let sequence: PlayerSequence = lines.next().ok_or(LayoutError::Empty)?.parse()?;

        let mut rows = Vec::new();
        for line in lines {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let row = line
                .split(',')
                .map(|token| match token.trim() {
                    "" | "--" => Ok(Cell::Empty),
                    t => Piece::from_token(t)
                        .map(Cell::Occupied)
                        .ok_or_else(|| LayoutError::InvalidPiece(t.to_string())),
                })
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(row);
        }

        Ok(Layout::new(sequence, into_board(rows)?))
    }

    /// Write the `.brd` board description format.
    pub fn to_brd(&self) -> String {
        let mut out = self.sequence.to_string();
        for r in 0..self.board.height() as i32 {
            out.push('\n');
            let cells: Vec<String> = (0..self.board.width() as i32)
                .map(|c| match self.board.piece_at((r, c).into()) {
                    Some(p) => p.token(),
                    None => "--".to_string(),
                })
                .collect();
            out.push_str(&cells.join(","));
        }
        out.push('\n');
        out
    }

    /// Parse the compact rank notation.
    pub fn from_fen(text: &str) -> Result<Self, LayoutError> {
        let parts: Vec<&str> = text.split_whitespace().collect();
        let placement = parts.first().ok_or(LayoutError::Empty)?;

        let mut rows = Vec::new();
        for rank in placement.split('/') {
            let mut row = Vec::new();
            let mut run = String::new();
            for ch in rank.chars() {
                if ch.is_ascii_digit() {
                    run.push(ch);
                    continue;
                }
                flush_run(&mut run, &mut row)?;
                let piece = shakmaty::Piece::from_char(ch)
                    .ok_or_else(|| LayoutError::InvalidPiece(ch.to_string()))?;
                let color = match piece.color {
                    shakmaty::Color::White => Color::White,
                    shakmaty::Color::Black => Color::Black,
                };
                row.push(Cell::Occupied(Piece::new(piece.role, color)));
            }
            flush_run(&mut run, &mut row)?;
            rows.push(row);
        }
        let board = into_board(rows)?;

        let side = parts.get(1).copied().unwrap_or("w");
        let (sequence, board) = match side {
            "w" => (PlayerSequence::two_player(Color::White, Color::Black), board.rotated(2)),
            "b" => (PlayerSequence::two_player(Color::Black, Color::White), board),
            other => return Err(LayoutError::InvalidSideToMove(other.to_string())),
        };
        Ok(Layout::new(sequence, board))
    }

    /// Write the compact rank notation. Only two-player white/black layouts
    /// using the default sequences can be represented.
    pub fn to_fen(&self) -> Result<String, LayoutError> {
        let white_first = PlayerSequence::two_player(Color::White, Color::Black);
        let black_first = PlayerSequence::two_player(Color::Black, Color::White);
        let (side, board) = if self.sequence == white_first {
            ('w', self.board.rotated(2))
        } else if self.sequence == black_first {
            ('b', self.board.clone())
        } else {
            return Err(LayoutError::UnrepresentableSequence(self.sequence.to_string()));
        };

        let mut ranks = Vec::with_capacity(board.height());
        for r in 0..board.height() as i32 {
            let mut rank = String::new();
            let mut empty = 0;
            for c in 0..board.width() as i32 {
                let Some(p) = board.piece_at((r, c).into()) else {
                    empty += 1;
                    continue;
                };
                if empty > 0 {
                    rank.push_str(&empty.to_string());
                    empty = 0;
                }
                let color = match p.color {
                    Color::White => shakmaty::Color::White,
                    Color::Black => shakmaty::Color::Black,
                    other => return Err(LayoutError::UnrepresentableColor(other)),
                };
                rank.push(p.role.of(color).char());
            }
            if empty > 0 {
                rank.push_str(&empty.to_string());
            }
            ranks.push(rank);
        }

        Ok(format!("{} {} - - 0 1", ranks.join("/"), side))
    }

    /// Load a `.brd` or `.fen` file.
    pub fn load_file(path: &Path) -> Result<Self, LayoutError> {
        let ext = extension(path);
        if ext != "brd" && ext != "fen" {
            return Err(LayoutError::UnsupportedExtension(ext));
        }
        let text = fs::read_to_string(path).map_err(|source| LayoutError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if ext == "brd" {
            Layout::from_brd(&text)
        } else {
            Layout::from_fen(&text)
        }
    }

    /// Save to a `.brd` or `.fen` file, picking the format from the extension.
    pub fn save_file(&self, path: &Path) -> Result<(), LayoutError> {
        let text = match extension(path).as_str() {
            "brd" => self.to_brd(),
            "fen" => self.to_fen()? + "\n",
            other => return Err(LayoutError::UnsupportedExtension(other.to_string())),
        };
        fs::write(path, text).map_err(|source| LayoutError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase()
}

fn flush_run(run: &mut String, row: &mut Vec<Cell>) -> Result<(), LayoutError> {
    if run.is_empty() {
        return Ok(());
    }
    // `run` holds only ASCII digits, so a parse failure is an overflow
    let count = run
        .parse::<usize>()
        .ok()
        .filter(|&count| count <= MAX_SIDE.saturating_sub(row.len()))
        .ok_or(LayoutError::TooLarge { limit: MAX_SIDE })?;
    row.extend(std::iter::repeat_n(Cell::Empty, count));
    run.clear();
    Ok(())
}
