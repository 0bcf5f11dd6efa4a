use crate::logic::board::PieceKind;
use crate::logic::eval_constants::{
    BONUS_OPPONENT_FORCED, DEPTH_HARD, DEPTH_MEDIUM, PENALTY_OWN_FORCED, WEIGHT_PIECE,
};
use serde::{Deserialize, Serialize};

/// What happens when the side to move has no legal move at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoMovesPolicy {
    /// The game stays in progress; the driver decides how to proceed.
    #[default]
    Unresolved,
    StalledPlayerWins,
    StalledPlayerLoses,
    Draw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub no_moves: NoMovesPolicy,
    /// Kind a pawn becomes on its last rank. `None` leaves pawns as they are.
    pub promotion: Option<PieceKind>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // Evaluation Parameters
    pub weight_piece: i32,
    pub penalty_own_forced: i32,
    pub bonus_opponent_forced: i32,

    // Search Parameters
    pub depth_medium: u8,
    pub depth_hard: u8,
    pub node_budget: Option<u64>, // None searches to full depth

    pub rules: RulesConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            weight_piece: WEIGHT_PIECE,
            penalty_own_forced: PENALTY_OWN_FORCED,
            bonus_opponent_forced: BONUS_OPPONENT_FORCED,

            depth_medium: DEPTH_MEDIUM,
            depth_hard: DEPTH_HARD,
            node_budget: None,

            rules: RulesConfig::default(),
        }
    }
}

#[derive(Deserialize)]
struct EngineConfigJson {
    weight_piece: Option<f32>,
    penalty_own_forced: Option<f32>,
    bonus_opponent_forced: Option<f32>,

    depth_medium: Option<u8>,
    depth_hard: Option<u8>,
    node_budget: Option<u64>,

    rules: Option<RulesConfig>,
}

impl EngineConfig {
    /// Weights in `json_str` are scale factors over the defaults; depths and budget are absolute.
    pub fn load_from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        let json_config: EngineConfigJson = serde_json::from_str(json_str)?;
        let default = Self::default();

        Ok(Self {
            weight_piece: apply_scale(default.weight_piece, json_config.weight_piece),
            penalty_own_forced: apply_scale(
                default.penalty_own_forced,
                json_config.penalty_own_forced,
            ),
            bonus_opponent_forced: apply_scale(
                default.bonus_opponent_forced,
                json_config.bonus_opponent_forced,
            ),

            depth_medium: json_config.depth_medium.unwrap_or(default.depth_medium),
            depth_hard: json_config.depth_hard.unwrap_or(default.depth_hard),
            node_budget: json_config.node_budget.or(default.node_budget),

            rules: json_config.rules.unwrap_or(default.rules),
        })
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn apply_scale(default_val: i32, scale: Option<f32>) -> i32 {
    scale.map_or(default_val, |s| (default_val as f32 * s) as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_config_default() {
        let config = EngineConfig::load_from_json("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.weight_piece, WEIGHT_PIECE);
        assert_eq!(config.depth_medium, 2);
        assert_eq!(config.depth_hard, 3);
        assert_eq!(config.rules.no_moves, NoMovesPolicy::Unresolved);
        assert_eq!(config.rules.promotion, None);
    }

    #[test]
    fn test_load_config_scaled() {
        let json = r#"{
            "weight_piece": 1.5,
            "penalty_own_forced": 2.0
        }"#;
        let config = EngineConfig::load_from_json(json).unwrap();
        assert_eq!(config.weight_piece, 15);
        assert_eq!(config.penalty_own_forced, 30);
        assert_eq!(config.bonus_opponent_forced, BONUS_OPPONENT_FORCED);
    }

    #[test]
    fn test_load_config_invalid_json() {
        let result = EngineConfig::load_from_json("{ invalid json }");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_full() {
        let json = r#"{
            "weight_piece": 1.2,
            "penalty_own_forced": 0.4,
            "bonus_opponent_forced": 3.0,
            "depth_medium": 1,
            "depth_hard": 4,
            "node_budget": 5000,
            "rules": { "no_moves": "stalled_player_wins", "promotion": "Queen" }
        }"#;
        let config = EngineConfig::load_from_json(json).unwrap();

        assert_eq!(config.weight_piece, (WEIGHT_PIECE as f32 * 1.2) as i32);
        assert_eq!(config.penalty_own_forced, 6);
        assert_eq!(config.bonus_opponent_forced, 15);
        assert_eq!(config.depth_medium, 1);
        assert_eq!(config.depth_hard, 4);
        assert_eq!(config.node_budget, Some(5000));
        assert_eq!(config.rules.no_moves, NoMovesPolicy::StalledPlayerWins);
        assert_eq!(config.rules.promotion, Some(PieceKind::Queen));
    }

    #[test]
    fn test_load_config_edge_cases() {
        let json = r#"{
            "penalty_own_forced": 0.0,
            "bonus_opponent_forced": -1.0
        }"#;
        let config = EngineConfig::load_from_json(json).unwrap();

        assert_eq!(config.penalty_own_forced, 0);
        assert_eq!(config.bonus_opponent_forced, -BONUS_OPPONENT_FORCED);
    }

    #[test]
    fn test_deserialize_absolute_config() {
        let json = r#"{
            "weight_piece": 100,
            "rules": { "no_moves": "draw" }
        }"#;

        let config: EngineConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.weight_piece, 100);
        assert_eq!(config.rules.no_moves, NoMovesPolicy::Draw);
        assert_eq!(config.rules.promotion, None);
        assert_eq!(config.penalty_own_forced, PENALTY_OWN_FORCED);
    }
}
