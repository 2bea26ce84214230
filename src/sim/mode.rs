//! Game modes and the per-run presets they supply

use serde::{Deserialize, Serialize};

/// Selectable game modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GameMode {
    #[default]
    Classic,
    Hardcore,
    Zen,
    TimeAttack,
}

impl GameMode {
    pub const ALL: [GameMode; 4] = [
        GameMode::Classic,
        GameMode::Hardcore,
        GameMode::Zen,
        GameMode::TimeAttack,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            GameMode::Classic => "Classic",
            GameMode::Hardcore => "Hardcore",
            GameMode::Zen => "Zen Mode",
            GameMode::TimeAttack => "Time Attack",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            GameMode::Classic => "Standard gameplay with 3 lives",
            GameMode::Hardcore => "One life, faster start, x1.5 score",
            GameMode::Zen => "No death, infinite flight",
            GameMode::TimeAttack => "60 seconds to score high",
        }
    }

    pub fn config(&self) -> GameModeConfig {
        match self {
            GameMode::Classic => GameModeConfig {
                mode: *self,
                lives: 3,
                starting_difficulty: 1.0,
                score_multiplier: 1.0,
                time_limit: None,
            },
            GameMode::Hardcore => GameModeConfig {
                mode: *self,
                lives: 1,
                starting_difficulty: 1.5,
                score_multiplier: 1.5,
                time_limit: None,
            },
            GameMode::Zen => GameModeConfig {
                mode: *self,
                lives: 999,
                starting_difficulty: 1.0,
                score_multiplier: 1.0,
                time_limit: None,
            },
            GameMode::TimeAttack => GameModeConfig {
                mode: *self,
                lives: 3,
                starting_difficulty: 1.3,
                score_multiplier: 1.0,
                time_limit: Some(60.0),
            },
        }
    }
}

/// Presets a run starts from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameModeConfig {
    pub mode: GameMode,
    pub lives: u32,
    pub starting_difficulty: f32,
    pub score_multiplier: f32,
    /// Flight time after which the run ends
    pub time_limit: Option<f32>,
}

impl Default for GameModeConfig {
    fn default() -> Self {
        GameMode::Classic.config()
    }
}

impl From<GameMode> for GameModeConfig {
    fn from(mode: GameMode) -> Self {
        mode.config()
    }
}
