//! Integration tests for the turn system using a mock engine.

use std::sync::Arc;

use cavern_engine::GameEngine;
use cavern_protocol::{
    Action, ActionKind, ActionRequest, CaveId, Outcome, Perception, PlayerId, PlayerState,
    PlayerStatus, SequentialIds, SessionId, TurnResult,
};
use cavern_session::{ErrorKind, GameService, Registry, SessionError};

// =========================================================================
// Mock game: a duel where shooting at cave N eliminates the N-th player.
// =========================================================================

const CAVES: usize = 16;
/// Moving here is fatal to the mover.
const LAVA: CaveId = 13;
/// Moving here is refused by the engine.
const WALL: CaveId = 15;

#[derive(Debug, Default)]
struct DuelEngine {
    order: Vec<PlayerId>,
    states: Vec<PlayerState>,
}

impl DuelEngine {
    fn index_of(&self, player: &PlayerId) -> Option<usize> {
        self.order.iter().position(|p| p == player)
    }
}

impl GameEngine for DuelEngine {
    type Config = ();
    type Map = Vec<CaveId>;

    fn new(_config: &()) -> Self {
        Self::default()
    }

    fn cave_count(&self) -> usize {
        CAVES
    }

    fn initialize_player(&mut self, player: &PlayerId) -> CaveId {
        let location = self.order.len() as CaveId;
        self.order.push(player.clone());
        self.states.push(PlayerState {
            location,
            arrows: 2,
            alive: true,
        });
        location
    }

    fn player_state(&self, player: &PlayerId) -> Option<PlayerState> {
        self.index_of(player).map(|i| self.states[i])
    }

    fn handle_player_turn(&mut self, player: &PlayerId, action: Action) -> TurnResult {
        let Some(me) = self.index_of(player) else {
            return TurnResult::rejected("unknown player");
        };
        let (outcome, message) = match action {
            Action::Move(WALL) => return TurnResult::rejected("a wall blocks the way"),
            Action::Move(LAVA) => {
                self.states[me].alive = false;
                (Outcome::Lost, "you walked into lava".to_string())
            }
            Action::Move(cave) => {
                self.states[me].location = cave;
                (Outcome::Ok, format!("you moved to cave {cave}"))
            }
            Action::Shoot(target) => {
                self.states[me].arrows = self.states[me].arrows.saturating_sub(1);
                match self.states.get_mut(target as usize) {
                    Some(victim) if victim.alive && target as usize != me => {
                        victim.alive = false;
                        (Outcome::Win, format!("you hit player {target}"))
                    }
                    _ => (Outcome::Ok, "you missed".to_string()),
                }
            }
            Action::Pass => (Outcome::Ok, "you wait".to_string()),
        };
        TurnResult {
            outcome,
            perceptions: self.perceive(player),
            message,
        }
    }

    fn perceive(&self, player: &PlayerId) -> Vec<Perception> {
        match self.player_state(player) {
            Some(state) if state.alive && state.location % 2 == 1 => vec![Perception::Stench],
            _ => Vec::new(),
        }
    }

    fn map_data(&self) -> Vec<CaveId> {
        (0..CAVES as CaveId).collect()
    }
}

// =========================================================================
// Helpers
// =========================================================================

fn service() -> GameService<DuelEngine> {
    let registry = Registry::new((), Arc::new(SequentialIds::new("duel"))).unwrap();
    GameService::new(registry)
}

/// Creates a session and joins `extra` more players. Returns the session
/// and all players in join order.
async fn party(svc: &GameService<DuelEngine>, extra: usize) -> (SessionId, Vec<PlayerId>) {
    let created = svc.create().await;
    let mut players = vec![created.player_id];
    for _ in 0..extra {
        players.push(svc.join(&created.game_id).await.unwrap().player_id);
    }
    (created.game_id, players)
}

fn at(cave: impl Into<serde_json::Value>) -> Result<ActionRequest, cavern_protocol::ProtocolError> {
    Ok(ActionRequest::with_target(cave))
}

async fn current(svc: &GameService<DuelEngine>, player: &PlayerId) -> PlayerId {
    svc.status(player).await.unwrap().current_player
}

// =========================================================================
// Session lifecycle
// =========================================================================

#[tokio::test]
async fn test_create_single_player_holds_turn() {
    let svc = service();

    let reply = svc.create().await;

    assert_eq!(reply.current_player, reply.player_id);
    assert_eq!(reply.num_caves, CAVES);
    assert_eq!(reply.start_location, 0);
    assert_eq!(svc.registry().session_count().await, 1);
}

#[tokio::test]
async fn test_join_preserves_order_and_turn() {
    let svc = service();
    let (game, players) = party(&svc, 1).await;
    svc.pass(&players[0]).await.unwrap();

    let late = svc.join(&game).await.unwrap();

    assert_eq!(late.num_players, 3);
    assert_eq!(late.start_location, 2);
    assert_eq!(current(&svc, &late.player_id).await, players[1]);

    // The newcomer slots in after everyone already seated.
    svc.pass(&players[1]).await.unwrap();
    assert_eq!(current(&svc, &players[0]).await, late.player_id);
}

#[tokio::test]
async fn test_join_unknown_game_is_not_found() {
    let svc = service();

    let err = svc.join(&SessionId("duel-404".into())).await.unwrap_err();

    assert!(matches!(err, SessionError::SessionNotFound(_)));
}

#[tokio::test]
async fn test_evicted_players_are_not_found() {
    let svc = service();
    let (game, players) = party(&svc, 2).await;

    let removed = svc.registry().evict(&game).await.unwrap();

    assert_eq!(removed.len(), 3);
    for p in &players {
        assert_eq!(svc.status(p).await.unwrap_err().kind(), ErrorKind::NotFound);
    }
    assert_eq!(svc.registry().player_count().await, 0);
}

// =========================================================================
// Rotation
// =========================================================================

#[tokio::test]
async fn test_rotation_follows_join_order_and_wraps() {
    let svc = service();
    let (_, p) = party(&svc, 2).await;

    assert_eq!(svc.pass(&p[0]).await.unwrap().current_player, p[1]);
    assert_eq!(svc.pass(&p[1]).await.unwrap().current_player, p[2]);
    assert_eq!(svc.pass(&p[2]).await.unwrap().current_player, p[0]);
}

#[tokio::test]
async fn test_shot_player_is_skipped() {
    let svc = service();
    let (_, p) = party(&svc, 2).await;

    // A shoots B (join index 1) on A's turn.
    let reply = svc.act(&p[0], ActionKind::Shoot, at(1)).await.unwrap();

    assert_eq!(reply.result.outcome, Outcome::Win);
    assert_eq!(reply.current_player, p[2]);
}

#[tokio::test]
async fn test_self_elimination_passes_turn_on() {
    let svc = service();
    let (_, p) = party(&svc, 1).await;

    let reply = svc.act(&p[0], ActionKind::Move, at(LAVA)).await.unwrap();

    assert_eq!(reply.result.outcome, Outcome::Lost);
    assert_eq!(reply.current_player, p[1]);
    // Only B is left, so the turn keeps coming back to B.
    assert_eq!(svc.pass(&p[1]).await.unwrap().current_player, p[1]);
}

#[tokio::test]
async fn test_everyone_dead_rotation_still_terminates() {
    let svc = service();
    let (_, p) = party(&svc, 1).await;
    svc.act(&p[0], ActionKind::Shoot, at(1)).await.unwrap();

    // A is now the only one alive and walks into lava.
    let reply = svc.act(&p[0], ActionKind::Move, at(LAVA)).await.unwrap();

    assert!(p.contains(&reply.current_player));
    for player in &p {
        let status = svc.status(player).await.unwrap();
        assert_eq!(status.status, PlayerStatus::Dead);
    }
}

// =========================================================================
// Gate
// =========================================================================

#[tokio::test]
async fn test_out_of_turn_move_names_current_player() {
    let svc = service();
    let (_, p) = party(&svc, 1).await;

    let err = svc.act(&p[1], ActionKind::Move, at(3)).await.unwrap_err();

    assert_eq!(
        err,
        SessionError::TurnViolation {
            player: p[1].clone(),
            current: p[0].clone(),
        }
    );
    assert_eq!(svc.status(&p[1]).await.unwrap().location, 1);
}

#[tokio::test]
async fn test_dead_player_can_look_but_not_act() {
    let svc = service();
    let (_, p) = party(&svc, 2).await;
    svc.act(&p[0], ActionKind::Shoot, at(1)).await.unwrap();

    let status = svc.status(&p[1]).await.unwrap();
    assert_eq!(status.status, PlayerStatus::Dead);
    assert_eq!(status.message, "you are dead");
    assert!(svc.map(&p[1]).await.is_ok());

    let err = svc.act(&p[1], ActionKind::Move, at(3)).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Eliminated);
    assert_eq!(err.to_string(), "you are dead");
}

#[tokio::test]
async fn test_unknown_player_is_not_found_everywhere() {
    let svc = service();
    party(&svc, 1).await;
    let ghost = PlayerId::from("ghost");

    assert_eq!(svc.status(&ghost).await.unwrap_err().kind(), ErrorKind::NotFound);
    assert_eq!(svc.map(&ghost).await.unwrap_err().kind(), ErrorKind::NotFound);
    assert_eq!(svc.pass(&ghost).await.unwrap_err().kind(), ErrorKind::NotFound);
}

// =========================================================================
// Input and engine rejection
// =========================================================================

#[tokio::test]
async fn test_non_numeric_target_keeps_turn() {
    let svc = service();
    let (_, p) = party(&svc, 1).await;

    for bad in [
        serde_json::json!("abc"),
        serde_json::json!(-1),
        serde_json::json!(2.5),
        serde_json::json!([3]),
        serde_json::json!(null),
    ] {
        let err = svc.act(&p[0], ActionKind::Move, at(bad)).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    assert_eq!(current(&svc, &p[0]).await, p[0]);
    assert_eq!(svc.status(&p[0]).await.unwrap().location, 0);
}

#[tokio::test]
async fn test_target_past_map_is_invalid_input() {
    let svc = service();
    let (_, p) = party(&svc, 1).await;

    let err = svc
        .act(&p[0], ActionKind::Shoot, at(CAVES as u64))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert_eq!(svc.status(&p[0]).await.unwrap().arrows, 2);
}

#[tokio::test]
async fn test_engine_error_keeps_turn() {
    let svc = service();
    let (_, p) = party(&svc, 1).await;

    let err = svc.act(&p[0], ActionKind::Move, at(WALL)).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::EngineRejected);
    assert_eq!(err.to_string(), "a wall blocks the way");
    assert_eq!(err.current_player(), Some(&p[0]));
    assert_eq!(current(&svc, &p[1]).await, p[0]);
}

#[tokio::test]
async fn test_move_reports_perceptions_of_new_cave() {
    let svc = service();
    let (_, p) = party(&svc, 1).await;

    let reply = svc.act(&p[0], ActionKind::Move, at("5")).await.unwrap();

    assert_eq!(reply.result.outcome, Outcome::Ok);
    assert_eq!(reply.result.perceptions, vec![Perception::Stench]);
    assert_eq!(svc.status(&p[0]).await.unwrap().location, 5);
}

// =========================================================================
// Concurrency
// =========================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_actions_only_one_wins_the_turn() {
    let svc = Arc::new(service());
    let (_, p) = party(&svc, 1).await;

    let mut tasks = Vec::new();
    for _ in 0..8 {
        let svc = Arc::clone(&svc);
        let a = p[0].clone();
        tasks.push(tokio::spawn(async move { svc.pass(&a).await }));
    }

    let mut ok = 0;
    let mut refused = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(_) => ok += 1,
            Err(SessionError::TurnViolation { .. }) => refused += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(ok, 1, "A holds exactly one turn");
    assert_eq!(refused, 7);
    assert_eq!(current(&svc, &p[0]).await, p[1]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_joins_get_distinct_seats() {
    let svc = Arc::new(service());
    let (game, founder) = party(&svc, 0).await;

    let mut tasks = Vec::new();
    for _ in 0..10 {
        let svc = Arc::clone(&svc);
        let game = game.clone();
        tasks.push(tokio::spawn(async move { svc.join(&game).await }));
    }

    let mut sizes = Vec::new();
    for task in tasks {
        sizes.push(task.await.unwrap().unwrap().num_players);
    }
    sizes.sort_unstable();

    assert_eq!(sizes, (2..=11).collect::<Vec<_>>());
    assert_eq!(svc.registry().player_count().await, 11);
    assert_eq!(current(&svc, &founder[0]).await, founder[0]);
}

#[tokio::test]
async fn test_sessions_are_independent() {
    let svc = service();
    let (_, first) = party(&svc, 1).await;
    let (_, second) = party(&svc, 1).await;

    svc.act(&first[0], ActionKind::Shoot, at(1)).await.unwrap();

    assert_eq!(current(&svc, &second[0]).await, second[0]);
    assert_eq!(
        svc.status(&second[1]).await.unwrap().status,
        PlayerStatus::Alive
    );
    let err = svc.act(&second[1], ActionKind::Pass, Ok(ActionRequest::default())).await;
    assert!(matches!(err, Err(SessionError::TurnViolation { .. })));
}
