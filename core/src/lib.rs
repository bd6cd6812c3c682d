use serde::{Deserialize, Serialize};

pub use catalog::*;
pub use engine::*;
pub use error::*;
pub use progress::*;
pub use selector::*;
pub use session::*;
pub use tile::*;
pub use types::*;

mod catalog;
mod engine;
mod error;
mod progress;
mod selector;
mod session;
mod tile;
mod types;

/// Rule-difficulty tier. Each tier has its own rule pool and board settings.
///
/// The serialized form is the lowercase token (`"easy"`, `"medium"`,
/// `"hard"`), which is also the key used in the persisted best-scores
/// document.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// Resolves a difficulty token, coercing anything unrecognized to easy.
    pub fn from_token(token: &str) -> Self {
        match token {
            "medium" => Self::Medium,
            "hard" => Self::Hard,
            _ => Self::Easy,
        }
    }

    pub const fn token(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    pub const fn config(self) -> DifficultyConfig {
        CONFIGS[self as usize]
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Easy
    }
}

/// Board and scoring settings for one tier. Static data, never mutated.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DifficultyConfig {
    pub grid_size: Coord,
    pub move_budget: MoveCount,
    pub correct_delta: Score,
    pub wrong_delta: Score,
}

impl DifficultyConfig {
    pub const fn total_cells(&self) -> CellCount {
        mult(self.grid_size, self.grid_size)
    }
}

/// Indexed by `Difficulty as usize`.
const CONFIGS: [DifficultyConfig; 3] = [
    DifficultyConfig {
        grid_size: 5,
        move_budget: 20,
        correct_delta: 2,
        wrong_delta: -1,
    },
    DifficultyConfig {
        grid_size: 6,
        move_budget: 28,
        correct_delta: 2,
        wrong_delta: -1,
    },
    DifficultyConfig {
        grid_size: 7,
        move_budget: 36,
        correct_delta: 3,
        wrong_delta: -2,
    },
];
