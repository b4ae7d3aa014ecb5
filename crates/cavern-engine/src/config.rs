//! `CaveHunt` configuration.

use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Settings for a [`CaveHunt`](crate::CaveHunt) game.
///
/// The defaults reproduce the classic game: twenty caves on a
/// dodecahedron, two pits, two bat colonies, five arrows each.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaveConfig {
    /// Number of caves. 20 gives the dodecahedron; any other even number
    /// of at least 4 gives a ring with opposite chords.
    pub caves: usize,

    /// Number of bottomless pits.
    pub pits: usize,

    /// Number of bat colonies.
    pub bats: usize,

    /// Arrows each player starts with.
    pub arrows: u32,

    /// Fixed RNG seed. `None` seeds from the OS for every game.
    pub seed: Option<u64>,
}

impl Default for CaveConfig {
    fn default() -> Self {
        Self {
            caves: 20,
            pits: 2,
            bats: 2,
            arrows: 5,
            seed: None,
        }
    }
}

impl CaveConfig {
    /// Caves occupied by hazards: the wumpus, every pit, every colony.
    pub fn hazard_count(&self) -> usize {
        1 + self.pits + self.bats
    }

    /// Checks that the map can be built and still leaves a safe cave for
    /// players to start in.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.caves < 4 || self.caves % 2 != 0 {
            return Err(EngineError::InvalidConfig(format!(
                "cave count must be an even number of at least 4, got {}",
                self.caves
            )));
        }
        if self.hazard_count() >= self.caves {
            return Err(EngineError::InvalidConfig(format!(
                "{} hazards leave no safe cave among {}",
                self.hazard_count(),
                self.caves
            )));
        }
        if self.arrows == 0 {
            return Err(EngineError::InvalidConfig(
                "players need at least one arrow".into(),
            ));
        }
        Ok(())
    }
}
