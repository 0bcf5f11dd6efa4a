use crate::logic::board::Square;
use std::sync::OnceLock;

const SQUARE_COUNT: usize = 64;

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub const ORTHOGONAL_DIRS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];
pub const DIAGONAL_DIRS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];
pub const ALL_DIRS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

/// On-board destinations of the fixed-step pieces, indexed by `Square::index`.
pub struct AttackTables {
    pub knight_moves: Vec<Vec<Square>>,
    pub king_moves: Vec<Vec<Square>>,
}

impl AttackTables {
    fn new() -> Self {
        let mut knight_moves = Vec::with_capacity(SQUARE_COUNT);
        let mut king_moves = Vec::with_capacity(SQUARE_COUNT);

        for sq in Square::all() {
            knight_moves.push(compute_steps(sq, &KNIGHT_OFFSETS));
            king_moves.push(compute_steps(sq, &ALL_DIRS));
        }

        Self {
            knight_moves,
            king_moves,
        }
    }

    pub fn get() -> &'static Self {
        static INSTANCE: OnceLock<AttackTables> = OnceLock::new();
        INSTANCE.get_or_init(AttackTables::new)
    }

    pub fn knight_targets(&self, sq: Square) -> &[Square] {
        match self.knight_moves.get(sq.index()) {
            Some(targets) => targets.as_slice(),
            None => &[],
        }
    }

    pub fn king_targets(&self, sq: Square) -> &[Square] {
        match self.king_moves.get(sq.index()) {
            Some(targets) => targets.as_slice(),
            None => &[],
        }
    }
}

fn compute_steps(from: Square, offsets: &[(i8, i8)]) -> Vec<Square> {
    offsets
        .iter()
        .filter_map(|&(df, dr)| from.offset(df, dr))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corner_step_counts() {
        let tables = AttackTables::get();
        let a1 = Square::new(0, 0).unwrap();
        assert_eq!(tables.knight_targets(a1).len(), 2);
        assert_eq!(tables.king_targets(a1).len(), 3);
    }

    #[test]
    fn test_center_step_counts() {
        let tables = AttackTables::get();
        let d4 = Square::new(3, 3).unwrap();
        assert_eq!(tables.knight_targets(d4).len(), 8);
        assert_eq!(tables.king_targets(d4).len(), 8);
    }
}
