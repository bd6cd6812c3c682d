use serde::{Deserialize, Serialize};

/// Player-visible state of one grid cell. A cell leaves `Unknown` exactly
/// once and never goes back.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TileState {
    Unknown,
    Correct,
    Incorrect,
}

impl TileState {
    pub const fn is_unknown(self) -> bool {
        matches!(self, Self::Unknown)
    }

    pub const fn is_revealed(self) -> bool {
        !self.is_unknown()
    }
}

impl Default for TileState {
    fn default() -> Self {
        Self::Unknown
    }
}
