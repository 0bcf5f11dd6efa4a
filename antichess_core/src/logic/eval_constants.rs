// Evaluation weights. Piece count dominates; both forced-capture terms are tie-breakers.
pub const WEIGHT_PIECE: i32 = 10;
pub const PENALTY_OWN_FORCED: i32 = 15;
pub const BONUS_OPPONENT_FORCED: i32 = 5;

// Search depth per difficulty tier, in plies below the root move.
pub const DEPTH_MEDIUM: u8 = 2;
pub const DEPTH_HARD: u8 = 3;

/// Bound for alpha-beta windows. Far above any reachable evaluation.
pub const SCORE_INFINITY: i32 = 1_000_000;
