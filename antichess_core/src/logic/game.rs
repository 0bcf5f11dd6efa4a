use crate::engine::config::{NoMovesPolicy, RulesConfig};
use crate::engine::Move;
use crate::logic::board::{Board, Color, NotationError, Piece, PieceKind, Square};
use crate::logic::generator::MoveGenerator;
use crate::logic::rules::{is_valid_move, legal_targets, MoveError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    Won(Color), // Winner
    Drawn,
}

/// Pieces each color has captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Scores {
    pub white: u32,
    pub black: u32,
}

impl Scores {
    pub const fn get(&self, color: Color) -> u32 {
        match color {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }

    fn slot(&mut self, color: Color) -> &mut u32 {
        match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// The mover as it stood on `from`, before the move.
    pub piece: Piece,
    pub from: Square,
    pub to: Square,
    pub captured: Option<Piece>,
    pub promoted_to: Option<PieceKind>,
}

impl MoveRecord {
    pub const fn color(&self) -> Color {
        self.piece.color
    }
}

/// Turn controller for one game: board, side to move, selection, scores and result.
///
/// Every mutating call either succeeds completely or returns an `Err` with the state untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    board: Board,
    turn: Color,
    selected: Option<Piece>,
    legal_targets: Vec<Square>,
    scores: Scores,
    status: GameStatus,
    history: Vec<MoveRecord>,
    rules: RulesConfig,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    #[must_use]
    pub fn new() -> Self {
        Self::with_rules(RulesConfig::default())
    }

    #[must_use]
    pub fn with_rules(rules: RulesConfig) -> Self {
        Self::from_board(Board::new(), Color::White, rules)
    }

    /// Starts a game from an arbitrary position. The result is evaluated immediately,
    /// so a position with an empty side is already over.
    #[must_use]
    pub fn from_board(board: Board, turn: Color, rules: RulesConfig) -> Self {
        let mut state = Self {
            board,
            turn,
            selected: None,
            legal_targets: Vec::new(),
            scores: Scores::default(),
            status: GameStatus::Playing,
            history: Vec::new(),
            rules,
        };
        state.refresh_status();
        state
    }

    pub fn from_fen(fen: &str, rules: RulesConfig) -> Result<Self, NotationError> {
        let (board, turn) = Board::from_fen(fen)?;
        Ok(Self::from_board(board, turn, rules))
    }

    /// Discards everything and sets up the starting position, keeping the rule set.
    pub fn new_game(&mut self) {
        *self = Self::with_rules(self.rules);
    }

    pub const fn board(&self) -> &Board {
        &self.board
    }

    pub const fn turn(&self) -> Color {
        self.turn
    }

    pub const fn selected(&self) -> Option<Piece> {
        self.selected
    }

    pub fn legal_targets(&self) -> &[Square] {
        &self.legal_targets
    }

    pub const fn scores(&self) -> Scores {
        self.scores
    }

    pub const fn status(&self) -> GameStatus {
        self.status
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn over(&self) -> bool {
        self.status != GameStatus::Playing
    }

    pub const fn winner(&self) -> Option<Color> {
        match self.status {
            GameStatus::Won(color) => Some(color),
            _ => None,
        }
    }

    pub fn to_fen(&self) -> String {
        self.board.to_fen_string(self.turn)
    }

    /// Pieces captured by `color`, oldest first.
    pub fn captured_by(&self, color: Color) -> Vec<Piece> {
        self.history
            .iter()
            .filter(|record| record.color() == color)
            .filter_map(|record| record.captured)
            .collect()
    }

    /// Moves the side to move may play, mandatory capture applied.
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.over() {
            return Vec::new();
        }
        MoveGenerator::new().legal_moves(&self.board, self.turn)
    }

    /// Selects `piece` and computes its legal targets.
    ///
    /// When another piece of the same color must capture, a piece without captures is
    /// still selectable but gets no targets.
    pub fn select_piece(&mut self, piece: &Piece) -> Result<&[Square], MoveError> {
        if self.over() {
            return Err(MoveError::GameOver);
        }

        let current = self
            .board
            .get_piece(piece.square)
            .ok_or(MoveError::NoPieceAtSource)?;
        if current.id != piece.id {
            return Err(MoveError::StaleSelection);
        }
        if current.color != self.turn {
            return Err(MoveError::NotYourTurn);
        }

        let targets = legal_targets(&self.board, &current);
        log::trace!(
            "selected {:?} on {} with {} targets",
            current.kind,
            current.square,
            targets.len()
        );

        self.selected = Some(current);
        self.legal_targets = targets;
        Ok(&self.legal_targets)
    }

    pub fn select_square(&mut self, sq: Square) -> Result<&[Square], MoveError> {
        let piece = self.board.get_piece(sq).ok_or(MoveError::NoPieceAtSource)?;
        self.select_piece(&piece)
    }

    pub fn deselect(&mut self) {
        self.selected = None;
        self.legal_targets.clear();
    }

    /// Moves the selected piece from `from` to `to`.
    ///
    /// The target set is recomputed and must equal the one handed out at selection time,
    /// otherwise the selection is stale and the move is rejected.
    pub fn move_piece(&mut self, from: Square, to: Square) -> Result<MoveRecord, MoveError> {
        if self.over() {
            return Err(MoveError::GameOver);
        }

        let selected = self.selected.ok_or(MoveError::NoSelection)?;
        if selected.square != from {
            return Err(MoveError::SelectionMismatch {
                selected: selected.square,
            });
        }

        let current = self
            .board
            .get_piece(from)
            .ok_or(MoveError::StaleSelection)?;
        if current != selected || current.color != self.turn {
            return Err(MoveError::StaleSelection);
        }
        if legal_targets(&self.board, &current) != self.legal_targets {
            return Err(MoveError::StaleSelection);
        }
        is_valid_move(&self.board, from, to, self.turn)?;

        let captured = self.board.apply_move(from, to, self.rules.promotion)?;
        let promoted_to = self
            .board
            .get_piece(to)
            .map(|p| p.kind)
            .filter(|&kind| kind != current.kind);

        if captured.is_some() {
            *self.scores.slot(current.color) += 1;
        }

        let record = MoveRecord {
            piece: current,
            from,
            to,
            captured,
            promoted_to,
        };
        self.history.push(record);

        self.turn = self.turn.opposite();
        self.deselect();
        self.refresh_status();

        log::debug!(
            "{} {:?} {}{}{}",
            current.color,
            current.kind,
            from,
            if captured.is_some() { "x" } else { "-" },
            to
        );

        Ok(record)
    }

    /// Takes back the last move, restoring board, scores, turn and result.
    pub fn undo_move(&mut self) -> bool {
        let Some(record) = self.history.pop() else {
            return false;
        };

        self.board.undo_move(record.piece, record.to, record.captured);
        if record.captured.is_some() {
            let score = self.scores.slot(record.color());
            *score = score.saturating_sub(1);
        }
        self.turn = record.color();
        self.deselect();
        self.refresh_status();
        true
    }

    fn refresh_status(&mut self) {
        self.status = GameStatus::Playing;

        for color in [self.turn, self.turn.opposite()] {
            if self.board.count(color) == 0 {
                // The side that lost all its pieces wins.
                self.status = GameStatus::Won(color);
                log::info!("{color} has no pieces left and wins");
                return;
            }
        }

        if MoveGenerator::new().has_legal_moves(&self.board, self.turn) {
            return;
        }

        self.status = match self.rules.no_moves {
            NoMovesPolicy::Unresolved => {
                log::warn!("{} has no legal move, leaving the game open", self.turn);
                GameStatus::Playing
            }
            NoMovesPolicy::StalledPlayerWins => GameStatus::Won(self.turn),
            NoMovesPolicy::StalledPlayerLoses => GameStatus::Won(self.turn.opposite()),
            NoMovesPolicy::Draw => GameStatus::Drawn,
        };
        if self.over() {
            log::info!("{} has no legal move: {:?}", self.turn, self.status);
        }
    }
}
