use crate::logic::rules::MoveError;
use serde::{Deserialize, Serialize};
use serde_big_array::BigArray;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

pub const BOARD_SIZE: usize = 8;
const SQUARE_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Rank delta of a pawn step. White starts on ranks 0-1 and moves up.
    pub const fn forward(self) -> i8 {
        match self {
            Self::White => 1,
            Self::Black => -1,
        }
    }

    pub const fn back_rank(self) -> usize {
        match self {
            Self::White => 0,
            Self::Black => 7,
        }
    }

    pub const fn pawn_rank(self) -> usize {
        match self {
            Self::White => 1,
            Self::Black => 6,
        }
    }

    /// The far rank, where a pawn would promote if promotion is enabled.
    pub const fn last_rank(self) -> usize {
        self.opposite().back_rank()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::White => f.write_str("white"),
            Self::Black => f.write_str("black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl PieceKind {
    pub const fn to_char(self) -> char {
        match self {
            Self::Pawn => 'p',
            Self::Rook => 'r',
            Self::Knight => 'n',
            Self::Bishop => 'b',
            Self::Queen => 'q',
            Self::King => 'k',
        }
    }

    pub const fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'p' => Some(Self::Pawn),
            'r' => Some(Self::Rook),
            'n' => Some(Self::Knight),
            'b' => Some(Self::Bishop),
            'q' => Some(Self::Queen),
            'k' => Some(Self::King),
            _ => None,
        }
    }
}

/// Stable identity of a piece for the lifetime of one board. Allocated per board,
/// so two games never share an id sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(pub u16);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    pub kind: PieceKind,
    pub color: Color,
    pub square: Square,
    pub has_moved: bool,
}

impl Piece {
    pub fn is_enemy_of(&self, other: &Self) -> bool {
        self.color != other.color
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotationError {
    #[error("invalid square notation: {0:?}")]
    Square(String),
    #[error("invalid piece letter {0:?}")]
    Piece(char),
    #[error("rank {rank} of the placement describes {files} files")]
    RankLength { rank: usize, files: usize },
    #[error("placement describes {0} ranks, expected 8")]
    RankCount(usize),
    #[error("invalid side to move {0:?}")]
    Turn(String),
}

/// A square on the 8x8 board. `file` 0 is the a-file, `rank` 0 is White's back rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    #[must_use]
    pub const fn new(file: usize, rank: usize) -> Option<Self> {
        if file < BOARD_SIZE && rank < BOARD_SIZE {
            Some(Self {
                file: file as u8,
                rank: rank as u8,
            })
        } else {
            None
        }
    }

    /// Range-checked conversion for coordinates coming from outside the engine.
    pub fn try_new(file: i32, rank: i32) -> Result<Self, MoveError> {
        usize::try_from(file)
            .ok()
            .zip(usize::try_from(rank).ok())
            .and_then(|(f, r)| Self::new(f, r))
            .ok_or(MoveError::InvalidSquare { file, rank })
    }

    pub const fn file(self) -> usize {
        self.file as usize
    }

    pub const fn rank(self) -> usize {
        self.rank as usize
    }

    pub const fn index(self) -> usize {
        self.rank() * BOARD_SIZE + self.file()
    }

    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        Self::new(index % BOARD_SIZE, index / BOARD_SIZE)
    }

    /// The square `df` files and `dr` ranks away, or `None` off the board.
    #[must_use]
    pub fn offset(self, df: i8, dr: i8) -> Option<Self> {
        let file = self.file.checked_add_signed(df)?;
        let rank = self.rank.checked_add_signed(dr)?;
        Self::new(file as usize, rank as usize)
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (0..SQUARE_COUNT).filter_map(Self::from_index)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = char::from(b'a' + self.file);
        write!(f, "{file}{}", self.rank + 1)
    }
}

impl FromStr for Square {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        let err = || NotationError::Square(s.to_string());
        if bytes.len() != 2 {
            return Err(err());
        }
        let file = bytes[0].to_ascii_lowercase().checked_sub(b'a').ok_or_else(err)?;
        let rank = bytes[1].checked_sub(b'1').ok_or_else(err)?;
        Self::new(file as usize, rank as usize).ok_or_else(err)
    }
}

impl TryFrom<String> for Square {
    type Error = NotationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Square> for String {
    fn from(sq: Square) -> Self {
        sq.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("piece in slot {slot} claims to stand on {square}")]
    MisplacedPiece { slot: Square, square: Square },
    #[error("piece id {0:?} appears more than once")]
    DuplicateId(PieceId),
}

/// Mailbox board. Every occupied slot holds a piece whose `square` equals that slot;
/// `apply_move` is the only way pieces change squares during play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardData")]
pub struct Board {
    #[serde(with = "BigArray")]
    grid: [Option<Piece>; SQUARE_COUNT],
    next_id: u16,
}

/// Wire form of `Board`, checked before it becomes one.
#[derive(Deserialize)]
struct BoardData {
    #[serde(with = "BigArray")]
    grid: [Option<Piece>; SQUARE_COUNT],
    next_id: u16,
}

impl TryFrom<BoardData> for Board {
    type Error = BoardError;

    fn try_from(data: BoardData) -> Result<Self, Self::Error> {
        let mut ids = HashSet::new();
        let mut next_id = data.next_id;

        for (slot, piece) in Square::all().zip(data.grid.iter()) {
            let Some(piece) = piece else {
                continue;
            };
            if piece.square != slot {
                return Err(BoardError::MisplacedPiece {
                    slot,
                    square: piece.square,
                });
            }
            if !ids.insert(piece.id) {
                return Err(BoardError::DuplicateId(piece.id));
            }
            next_id = next_id.max(piece.id.0.saturating_add(1));
        }

        Ok(Self {
            grid: data.grid,
            next_id,
        })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Standard starting position, 16 pieces per side.
    #[must_use]
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.setup_initial_position();
        board
    }

    #[must_use]
    pub const fn empty() -> Self {
        Self {
            grid: [None; SQUARE_COUNT],
            next_id: 0,
        }
    }

    fn setup_initial_position(&mut self) {
        self.setup_pieces(Color::White);
        self.setup_pieces(Color::Black);
    }

    fn setup_pieces(&mut self, color: Color) {
        let back_row = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        for (file, &kind) in back_row.iter().enumerate() {
            if let Some(sq) = Square::new(file, color.back_rank()) {
                self.add_piece(sq, kind, color);
            }
        }

        for file in 0..BOARD_SIZE {
            if let Some(sq) = Square::new(file, color.pawn_rank()) {
                self.add_piece(sq, PieceKind::Pawn, color);
            }
        }
    }

    /// Places a fresh, unmoved piece, replacing any occupant. Used for setup.
    pub fn add_piece(&mut self, sq: Square, kind: PieceKind, color: Color) -> PieceId {
        let id = self.allocate_id();
        self.grid[sq.index()] = Some(Piece {
            id,
            kind,
            color,
            square: sq,
            has_moved: false,
        });
        id
    }

    /// Next id not held by a piece on the board. Wraps around once the counter runs out.
    fn allocate_id(&mut self) -> PieceId {
        let mut candidate = self.next_id;
        while self.find(PieceId(candidate)).is_some() {
            candidate = candidate.wrapping_add(1);
        }
        self.next_id = candidate.wrapping_add(1);
        PieceId(candidate)
    }

    #[must_use]
    pub const fn get_piece(&self, sq: Square) -> Option<Piece> {
        self.grid[sq.index()]
    }

    pub fn is_occupied(&self, sq: Square) -> bool {
        self.grid[sq.index()].is_some()
    }

    pub fn pieces(&self) -> impl Iterator<Item = Piece> + '_ {
        self.grid.iter().filter_map(|slot| *slot)
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = Piece> + '_ {
        self.pieces().filter(move |p| p.color == color)
    }

    pub fn count(&self, color: Color) -> usize {
        self.pieces_of(color).count()
    }

    pub fn find(&self, id: PieceId) -> Option<Piece> {
        self.pieces().find(|p| p.id == id)
    }

    /// Moves the piece on `from` to `to`, removing any occupant of `to`.
    ///
    /// All checks run before the grid is touched, so an `Err` leaves the board unchanged.
    /// Geometry is not validated here; callers pass squares produced by the move generator.
    /// A pawn reaching its last rank becomes `promotion` when one is given.
    pub fn apply_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Result<Option<Piece>, MoveError> {
        let mut piece = self.get_piece(from).ok_or(MoveError::NoPieceAtSource)?;
        if from == to {
            return Err(MoveError::IllegalTarget { to });
        }
        if let Some(target) = self.get_piece(to) {
            if target.color == piece.color {
                return Err(MoveError::TargetOccupiedByFriendly { to });
            }
        }

        piece.square = to;
        piece.has_moved = true;
        if piece.kind == PieceKind::Pawn && to.rank() == piece.color.last_rank() {
            if let Some(kind) = promotion {
                piece.kind = kind;
            }
        }

        self.grid[from.index()] = None;
        let captured = self.grid[to.index()].replace(piece);
        Ok(captured)
    }

    /// Reverts a move made by `apply_move`. `moved` is the piece as it was before the move.
    pub fn undo_move(&mut self, moved: Piece, to: Square, captured: Option<Piece>) {
        self.grid[to.index()] = captured;
        self.grid[moved.square.index()] = Some(moved);
    }

    /// Piece placement in FEN order (rank 8 first, White upper-case) followed by the side to move.
    pub fn to_fen_string(&self, turn: Color) -> String {
        let mut fen = String::new();
        for rank in (0..BOARD_SIZE).rev() {
            let mut empty_count = 0;
            for file in 0..BOARD_SIZE {
                let piece = Square::new(file, rank).and_then(|sq| self.get_piece(sq));
                if let Some(piece) = piece {
                    if empty_count > 0 {
                        fen.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    let c = piece.kind.to_char();
                    fen.push(if piece.color == Color::White {
                        c.to_ascii_uppercase()
                    } else {
                        c
                    });
                } else {
                    empty_count += 1;
                }
            }
            if empty_count > 0 {
                fen.push_str(&empty_count.to_string());
            }
            if rank > 0 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(if turn == Color::White { 'w' } else { 'b' });
        fen
    }

    /// Parses the placement and optional side-to-move fields. Trailing FEN fields are ignored.
    /// Pawns found off their home rank are marked as moved.
    pub fn from_fen(fen: &str) -> Result<(Self, Color), NotationError> {
        let mut fields = fen.split_whitespace();
        let placement = fields.next().unwrap_or_default();
        let turn = match fields.next() {
            None | Some("w") => Color::White,
            Some("b") => Color::Black,
            Some(other) => return Err(NotationError::Turn(other.to_string())),
        };

        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != BOARD_SIZE {
            return Err(NotationError::RankCount(ranks.len()));
        }

        let mut board = Self::empty();
        for (row, rank_str) in ranks.iter().enumerate() {
            let rank = BOARD_SIZE - 1 - row;
            let mut file = 0;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as usize;
                    continue;
                }
                let kind = PieceKind::from_char(c).ok_or(NotationError::Piece(c))?;
                let color = if c.is_ascii_uppercase() {
                    Color::White
                } else {
                    Color::Black
                };
                let sq = Square::new(file, rank).ok_or(NotationError::RankLength {
                    rank: rank + 1,
                    files: file + 1,
                })?;
                board.add_piece(sq, kind, color);
                if kind == PieceKind::Pawn && rank != color.pawn_rank() {
                    if let Some(p) = board.grid[sq.index()].as_mut() {
                        p.has_moved = true;
                    }
                }
                file += 1;
            }
            if file != BOARD_SIZE {
                return Err(NotationError::RankLength {
                    rank: rank + 1,
                    files: file,
                });
            }
        }

        Ok((board, turn))
    }
}
