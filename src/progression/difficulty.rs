//! Difficulty settings
//!
//! The chosen difficulty feeds into hit rolls, damage, regeneration and
//! poison frequency as a small integer scalar.

use serde::{Deserialize, Serialize};

/// Game difficulty levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Easy,
    Normal,
    Hard,
    Nightmare,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Normal,
        Difficulty::Hard,
        Difficulty::Nightmare,
    ];

    /// Integer used by the game rules (0 on easy)
    pub fn scalar(&self) -> i32 {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Normal => 1,
            Difficulty::Hard => 2,
            Difficulty::Nightmare => 3,
        }
    }

    /// Turns between regeneration ticks grow with difficulty
    pub fn regen_frequency(&self) -> i32 {
        self.scalar() << 3
    }

    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
            Difficulty::Nightmare => "Nightmare",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar() {
        let scalars: Vec<i32> = Difficulty::ALL.iter().map(|d| d.scalar()).collect();
        assert_eq!(scalars, vec![0, 1, 2, 3]);
        assert_eq!(Difficulty::Hard.regen_frequency(), 16);
        assert_eq!(Difficulty::default(), Difficulty::Easy);
    }
}
