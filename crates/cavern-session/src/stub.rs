//! A minimal engine for unit tests.
//!
//! Every player starts in the cave matching their join position. Moving
//! to cave 9 is refused, moving to cave 8 is fatal, anything else is `Ok`.
//! Tests can also eliminate players directly with [`StubEngine::kill`].

use std::collections::HashMap;

use cavern_engine::GameEngine;
use cavern_protocol::{Action, CaveId, Outcome, Perception, PlayerId, PlayerState, TurnResult};

pub(crate) const SEALED_CAVE: CaveId = 9;
pub(crate) const DEADLY_CAVE: CaveId = 8;

#[derive(Debug, Default)]
pub(crate) struct StubEngine {
    players: HashMap<PlayerId, PlayerState>,
}

impl StubEngine {
    pub(crate) fn kill(&mut self, player: &PlayerId) {
        if let Some(state) = self.players.get_mut(player) {
            state.alive = false;
        }
    }
}

impl GameEngine for StubEngine {
    type Config = ();
    type Map = Vec<CaveId>;

    fn new(_config: &()) -> Self {
        Self::default()
    }

    fn cave_count(&self) -> usize {
        10
    }

    fn initialize_player(&mut self, player: &PlayerId) -> CaveId {
        let location = self.players.len() as CaveId;
        self.players.insert(
            player.clone(),
            PlayerState {
                location,
                arrows: 3,
                alive: true,
            },
        );
        location
    }

    fn player_state(&self, player: &PlayerId) -> Option<PlayerState> {
        self.players.get(player).copied()
    }

    fn handle_player_turn(&mut self, player: &PlayerId, action: Action) -> TurnResult {
        let Some(state) = self.players.get_mut(player) else {
            return TurnResult::rejected("unknown player");
        };
        let outcome = match action {
            Action::Move(SEALED_CAVE) => return TurnResult::rejected("sealed"),
            Action::Move(DEADLY_CAVE) => {
                state.alive = false;
                Outcome::Lost
            }
            Action::Move(target) => {
                state.location = target;
                Outcome::Ok
            }
            Action::Shoot(_) => {
                state.arrows = state.arrows.saturating_sub(1);
                Outcome::Ok
            }
            Action::Pass => Outcome::Ok,
        };
        TurnResult {
            outcome,
            perceptions: Vec::new(),
            message: format!("{action:?}"),
        }
    }

    fn perceive(&self, _player: &PlayerId) -> Vec<Perception> {
        vec![Perception::Breeze]
    }

    fn map_data(&self) -> Vec<CaveId> {
        (0..10).collect()
    }
}
