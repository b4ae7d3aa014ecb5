//! `CaveHunt`: the bundled engine.
//!
//! Players wander a cave network looking for the wumpus. They sense
//! danger one tunnel away, move through tunnels, and shoot arrows into
//! adjacent caves. Walking into the wumpus or a pit is fatal; bats carry
//! a player off to a random cave.

use std::collections::HashMap;

use cavern_protocol::{Action, CaveId, Outcome, Perception, PlayerId, PlayerState, TurnResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{CaveConfig, CaveMap, EngineError, GameEngine};

/// Chance that a missed arrow wakes the wumpus and it moves.
const WUMPUS_WAKE_CHANCE: f64 = 0.75;

/// Where the dangers are at the start of a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hazards {
    pub wumpus: CaveId,
    pub pits: Vec<CaveId>,
    pub bats: Vec<CaveId>,
}

/// A cave-hunting game for any number of players.
#[derive(Debug)]
pub struct CaveHunt {
    map: CaveMap,
    /// `None` once the wumpus has been shot.
    wumpus: Option<CaveId>,
    pits: Vec<CaveId>,
    bats: Vec<CaveId>,
    players: HashMap<PlayerId, PlayerState>,
    arrows: u32,
    rng: StdRng,
}

impl CaveHunt {
    /// Builds a game with hazards in known places.
    ///
    /// [`GameEngine::new`] places hazards at random; this constructor is
    /// for callers (mostly tests) that need a fixed layout.
    pub fn from_parts(map: CaveMap, hazards: Hazards, arrows: u32, seed: u64) -> Self {
        Self {
            map,
            wumpus: Some(hazards.wumpus),
            pits: hazards.pits,
            bats: hazards.bats,
            players: HashMap::new(),
            arrows,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Puts a player in a specific cave, bypassing random placement.
    pub fn spawn_at(&mut self, player: &PlayerId, cave: CaveId) {
        self.players.insert(
            player.clone(),
            PlayerState {
                location: cave,
                arrows: self.arrows,
                alive: true,
            },
        );
    }

    /// Where the wumpus is, if it is still alive.
    pub fn wumpus(&self) -> Option<CaveId> {
        self.wumpus
    }

    fn is_hazard(&self, cave: CaveId) -> bool {
        self.wumpus == Some(cave) || self.pits.contains(&cave) || self.bats.contains(&cave)
    }

    fn random_cave(&mut self) -> CaveId {
        self.rng.random_range(0..self.map.len()) as CaveId
    }

    /// Common checks for move and shoot targets.
    fn check_target(&self, from: CaveId, target: CaveId) -> Result<(), TurnResult> {
        if !self.map.contains(target) {
            return Err(TurnResult::rejected(format!("cave {target} does not exist")));
        }
        if !self.map.is_adjacent(from, target) {
            return Err(TurnResult::rejected(format!(
                "no tunnel leads from cave {from} to cave {target}"
            )));
        }
        Ok(())
    }

    /// Moves a player into `cave` and applies whatever lives there.
    ///
    /// Bats may chain flights; the chain is cut off after one flight per
    /// cave so a bat-heavy map still terminates.
    fn enter(&mut self, player: &PlayerId, cave: CaveId) -> (Outcome, String) {
        let mut location = cave;
        let mut notes = Vec::new();

        for _ in 0..=self.map.len() {
            if self.wumpus == Some(location) {
                self.eliminate(player, location);
                notes.push(format!("the wumpus ate you in cave {location}"));
                return (Outcome::Lost, notes.join("; "));
            }
            if self.pits.contains(&location) {
                self.eliminate(player, location);
                notes.push(format!("you fell into a bottomless pit in cave {location}"));
                return (Outcome::Lost, notes.join("; "));
            }
            if !self.bats.contains(&location) {
                break;
            }
            let landing = self.random_cave();
            notes.push(format!("bats carried you from cave {location} to cave {landing}"));
            location = landing;
        }

        if let Some(state) = self.players.get_mut(player) {
            state.location = location;
        }
        notes.push(format!("you are in cave {location}"));
        (Outcome::Ok, notes.join("; "))
    }

    fn eliminate(&mut self, player: &PlayerId, location: CaveId) {
        if let Some(state) = self.players.get_mut(player) {
            state.location = location;
            state.alive = false;
        }
        tracing::debug!(%player, cave = location, "player eliminated");
    }

    fn shoot(&mut self, player: &PlayerId, target: CaveId) -> (Outcome, String) {
        let arrows_left = match self.players.get_mut(player) {
            Some(state) => {
                state.arrows -= 1;
                state.arrows
            }
            None => 0,
        };

        if self.wumpus == Some(target) {
            self.wumpus = None;
            tracing::info!(%player, cave = target, "wumpus killed");
            return (Outcome::Win, format!("you shot the wumpus in cave {target}"));
        }

        let mut message = format!("your arrow missed in cave {target}");

        if let Some(wumpus) = self.wumpus {
            if self.rng.random_bool(WUMPUS_WAKE_CHANCE) {
                let exits = self.map.neighbours(wumpus);
                if !exits.is_empty() {
                    let next = exits[self.rng.random_range(0..exits.len())];
                    self.wumpus = Some(next);
                    message.push_str("; you hear the wumpus move");
                    for (id, state) in self.players.iter_mut() {
                        if state.alive && state.location == next {
                            state.alive = false;
                            tracing::debug!(player = %id, cave = next, "wumpus ate player");
                        }
                    }
                }
            }
        }

        if !self.is_alive(player) {
            message.push_str("; the wumpus found you");
            return (Outcome::Lost, message);
        }
        if arrows_left == 0 {
            if let Some(state) = self.players.get_mut(player) {
                state.alive = false;
            }
            message.push_str("; you are out of arrows");
            return (Outcome::Lost, message);
        }
        (Outcome::Ok, message)
    }
}

impl GameEngine for CaveHunt {
    type Config = CaveConfig;
    type Map = CaveMap;

    fn validate_config(config: &CaveConfig) -> Result<(), EngineError> {
        config.validate()
    }

    fn new(config: &CaveConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };
        let map = CaveMap::for_size(config.caves);

        // Distinct caves for every hazard, always leaving one cave free.
        let amount = config.hazard_count().min(map.len().saturating_sub(1));
        let mut picks = rand::seq::index::sample(&mut rng, map.len(), amount)
            .into_iter()
            .map(|i| i as CaveId);
        let wumpus = picks.next().unwrap_or(0);
        let pits: Vec<CaveId> = picks.by_ref().take(config.pits).collect();
        let bats: Vec<CaveId> = picks.take(config.bats).collect();

        Self {
            map,
            wumpus: Some(wumpus),
            pits,
            bats,
            players: HashMap::new(),
            arrows: config.arrows,
            rng,
        }
    }

    fn cave_count(&self) -> usize {
        self.map.len()
    }

    fn initialize_player(&mut self, player: &PlayerId) -> CaveId {
        if let Some(existing) = self.players.get(player) {
            return existing.location;
        }
        let safe: Vec<CaveId> = (0..self.map.len() as CaveId)
            .filter(|&c| !self.is_hazard(c))
            .collect();
        let start = if safe.is_empty() {
            0
        } else {
            safe[self.rng.random_range(0..safe.len())]
        };
        self.spawn_at(player, start);
        start
    }

    fn player_state(&self, player: &PlayerId) -> Option<PlayerState> {
        self.players.get(player).copied()
    }

    fn handle_player_turn(&mut self, player: &PlayerId, action: Action) -> TurnResult {
        let Some(state) = self.player_state(player) else {
            return TurnResult::rejected("unknown player");
        };
        if !state.alive {
            return TurnResult::rejected("you are dead");
        }

        let (outcome, message) = match action {
            Action::Move(target) => {
                if let Err(rejected) = self.check_target(state.location, target) {
                    return rejected;
                }
                self.enter(player, target)
            }
            Action::Shoot(target) => {
                if let Err(rejected) = self.check_target(state.location, target) {
                    return rejected;
                }
                if state.arrows == 0 {
                    return TurnResult::rejected("you have no arrows left");
                }
                self.shoot(player, target)
            }
            Action::Pass => (Outcome::Ok, format!("you wait in cave {}", state.location)),
        };

        TurnResult {
            outcome,
            perceptions: self.perceive(player),
            message,
        }
    }

    fn perceive(&self, player: &PlayerId) -> Vec<Perception> {
        let Some(state) = self.players.get(player).filter(|s| s.alive) else {
            return Vec::new();
        };
        let around = self.map.neighbours(state.location);

        let mut senses = Vec::new();
        if around.iter().any(|&c| self.wumpus == Some(c)) {
            senses.push(Perception::Stench);
        }
        if around.iter().any(|c| self.pits.contains(c)) {
            senses.push(Perception::Breeze);
        }
        if around.iter().any(|c| self.bats.contains(c)) {
            senses.push(Perception::Rustle);
        }
        senses
    }

    fn map_data(&self) -> CaveMap {
        self.map.clone()
    }
}
