//! Board representation
//!
//! A rectangular grid of cells of arbitrary size. Cells are stored row-major;
//! row 0 is the side of the board nearest to the player whose frame the grid
//! is expressed in.

use super::moves::{Move, Square};
use super::rotation::{self, Size};
use shakmaty::Role;
use std::fmt;

/// Piece colour. Up to four colours can share one board.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Color {
    White,
    Black,
    Red,
    Yellow,
}

impl Color {
    pub const ALL: [Color; 4] = [Color::White, Color::Black, Color::Red, Color::Yellow];

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'w' => Some(Color::White),
            'b' => Some(Color::Black),
            'r' => Some(Color::Red),
            'y' => Some(Color::Yellow),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
            Color::Red => 'r',
            Color::Yellow => 'y',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::White => "White",
            Color::Black => "Black",
            Color::Red => "Red",
            Color::Yellow => "Yellow",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A piece: role (pawn, knight, ...) and colour.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Piece {
    pub role: Role,
    pub color: Color,
}

impl Piece {
    pub const fn new(role: Role, color: Color) -> Self {
        Piece { role, color }
    }

    /// Parse a two-character `{type}{color}` token such as `pw` or `kb`.
    pub fn from_token(token: &str) -> Option<Self> {
        let mut chars = token.chars();
        let role = Role::from_char(chars.next()?.to_ascii_lowercase())?;
        let color = Color::from_char(chars.next()?.to_ascii_lowercase())?;
        if chars.next().is_some() {
            return None;
        }
        Some(Piece { role, color })
    }

    pub fn token(self) -> String {
        format!("{}{}", self.role.char(), self.color.to_char())
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.role.char(), self.color.to_char())
    }
}

/// Content of one board square.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Cell {
    #[default]
    Empty,
    Occupied(Piece),
}

impl Cell {
    #[inline]
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    #[inline]
    pub fn piece(self) -> Option<Piece> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(p) => Some(p),
        }
    }
}

impl From<Piece> for Cell {
    fn from(piece: Piece) -> Self {
        Cell::Occupied(piece)
    }
}

/// Rectangular board, `height` rows by `width` columns.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    height: usize,
    width: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board
    ///
    /// # Panics
    ///
    /// Panics if `height * width` overflows `usize`.
    pub fn empty(height: usize, width: usize) -> Self {
        Self::try_empty(height, width).expect("board dimensions overflow")
    }

    /// Create an empty board, or `None` if `height * width` overflows.
    pub fn try_empty(height: usize, width: usize) -> Option<Self> {
        let len = height.checked_mul(width)?;
        Some(Board {
            height,
            width,
            cells: vec![Cell::Empty; len],
        })
    }

    /// Build a board from rows. Returns `None` if there are no rows or the
    /// rows do not all have the same width.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Option<Self> {
        let width = rows.first()?.len();
        if rows.iter().any(|r| r.len() != width) {
            return None;
        }
        let height = rows.len();
        let cells = rows.into_iter().flatten().collect();
        Some(Board { height, width, cells })
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn size(&self) -> Size {
        (self.height, self.width)
    }

    #[inline]
    pub fn last_row(&self) -> i32 {
        self.height as i32 - 1
    }

    #[inline]
    pub fn in_bounds(&self, sq: Square) -> bool {
        sq.row >= 0 && sq.col >= 0 && (sq.row as usize) < self.height && (sq.col as usize) < self.width
    }

    #[inline]
    fn index(&self, sq: Square) -> Option<usize> {
        if self.in_bounds(sq) {
            Some(sq.row as usize * self.width + sq.col as usize)
        } else {
            None
        }
    }

    /// Cell at `sq`, or `None` when off the board.
    #[inline]
    pub fn get(&self, sq: Square) -> Option<Cell> {
        self.index(sq).map(|i| self.cells[i])
    }

    /// Piece at `sq`; `None` for empty or off-board squares.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.get(sq).and_then(Cell::piece)
    }

    #[inline]
    pub fn is_empty_at(&self, sq: Square) -> bool {
        matches!(self.get(sq), Some(Cell::Empty))
    }

    /// Overwrite the cell at `sq`. Off-board writes are ignored.
    pub fn set(&mut self, sq: Square, cell: Cell) {
        if let Some(i) = self.index(sq) {
            self.cells[i] = cell;
        }
    }

    pub fn put(&mut self, sq: Square, piece: Piece) {
        self.set(sq, Cell::Occupied(piece));
    }

    pub fn remove(&mut self, sq: Square) -> Option<Piece> {
        let i = self.index(sq)?;
        std::mem::take(&mut self.cells[i]).piece()
    }

    /// Iterate over all squares in row-major order.
    pub fn squares(&self) -> impl Iterator<Item = Square> + '_ {
        (0..self.height as i32).flat_map(move |r| (0..self.width as i32).map(move |c| Square::new(r, c)))
    }

    /// Iterate over occupied squares in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.squares().filter_map(move |sq| self.piece_at(sq).map(|p| (sq, p)))
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, p)| p.color == color)
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .find(|(_, p)| p.role == Role::King)
            .map(|(sq, _)| sq)
    }

    /// Colours present on the board, in order of first appearance.
    pub fn colors(&self) -> Vec<Color> {
        let mut found = Vec::new();
        for (_, p) in self.pieces() {
            if !found.contains(&p.color) {
                found.push(p.color);
            }
        }
        found
    }

    /// Board turned by `turns` quarter turns.
    ///
    /// Cell `(r, c)` of the result holds the cell found at
    /// `rotation::rotate(result_size, (r, c), turns)` of `self`, so the same
    /// function maps points of the rotated board back onto this one.
    pub fn rotated(&self, turns: u8) -> Board {
        let turns = turns % 4;
        if turns == 0 {
            return self.clone();
        }
        let (height, width) = rotation::rotated_size(self.size(), turns);
        let mut out = Board::empty(height, width);
        for row in 0..height as i32 {
            for col in 0..width as i32 {
                let (r, c) = rotation::rotate((height, width), (row, col), turns);
                if let Some(cell) = self.get(Square::new(r, c)) {
                    out.set(Square::new(row, col), cell);
                }
            }
        }
        out
    }

    /// Relocate the piece of `mv`, clearing its origin, and queen a pawn that
    /// lands on the last row. Returns the captured piece, if any.
    ///
    /// Rows are those of this board's frame; callers rotate into the mover's
    /// frame first.
    pub fn play(&mut self, mv: Move) -> Option<Piece> {
        let piece = self.remove(mv.from)?;
        let captured = self.piece_at(mv.to);
        let landed = if piece.role == Role::Pawn && mv.to.row == self.last_row() {
            Piece::new(Role::Queen, piece.color)
        } else {
            piece
        };
        self.put(mv.to, landed);
        captured
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in (0..self.height as i32).rev() {
            write!(f, "{:>3} ", r)?;
            for c in 0..self.width as i32 {
                match self.piece_at(Square::new(r, c)) {
                    Some(p) => write!(f, " {}", p)?,
                    None => write!(f, " --")?,
                }
            }
            writeln!(f)?;
        }
        write!(f, "    ")?;
        for c in 0..self.width {
            write!(f, " {:>2}", c)?;
        }
        writeln!(f)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board {}x{}\n{}", self.height, self.width, self)
    }
}
