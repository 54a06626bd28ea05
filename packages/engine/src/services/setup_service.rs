use rand::seq::SliceRandom;
use thiserror::Error;

use crate::models::game::{GamePhase, GameState};
use crate::models::outcome::ResolutionReport;
use crate::models::player::{Player, PlayerId};
use crate::models::role::Role;

pub const MIN_PLAYERS: usize = 3;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SetupError {
    #[error("players can only be changed before the game starts")]
    GameAlreadyStarted,
    #[error("at least {0} players are required")]
    NotEnoughPlayers(usize),
    #[error("unknown player id {0}")]
    UnknownPlayer(PlayerId),
    #[error("identities are assigned on the first night only")]
    NotFirstNight,
}

pub fn new_game(roles: Vec<Role>) -> GameState {
    GameState::new(roles)
}

/// 配り札のシャッフル
pub fn shuffle_deck(roles: &mut [Role]) {
    roles.shuffle(&mut rand::thread_rng());
}

pub fn add_role(state: &mut GameState, role: Role) -> Result<PlayerId, SetupError> {
    if state.phase != GamePhase::Setup {
        return Err(SetupError::GameAlreadyStarted);
    }
    let id = state.players.iter().map(|p| p.id).max().unwrap_or(0) + 1;
    state.players.push(Player::new(id, role));
    Ok(id)
}

pub fn remove_player(state: &mut GameState, id: PlayerId) -> Result<(), SetupError> {
    if state.phase != GamePhase::Setup {
        return Err(SetupError::GameAlreadyStarted);
    }
    let before = state.players.len();
    state.players.retain(|p| p.id != id);
    if state.players.len() == before {
        return Err(SetupError::UnknownPlayer(id));
    }
    Ok(())
}

pub fn start_game(state: &mut GameState) -> Result<(), SetupError> {
    if state.phase != GamePhase::Setup {
        return Err(SetupError::GameAlreadyStarted);
    }
    if state.players.len() < MIN_PLAYERS {
        return Err(SetupError::NotEnoughPlayers(MIN_PLAYERS));
    }
    state.phase = GamePhase::Night;
    state.add_log("Setup", "Game started");
    log::info!("game started with {} players", state.players.len());
    Ok(())
}

/// 1夜目は戦闘なし。名前の紐付けだけ行い、そのまま初日の朝になる。
pub fn assign_identities(
    state: &mut GameState,
    names: &[(PlayerId, String)],
) -> Result<ResolutionReport, SetupError> {
    if state.phase != GamePhase::Night || state.night_count != 1 {
        return Err(SetupError::NotFirstNight);
    }
    for (id, name) in names {
        let player = state
            .player_mut(*id)
            .ok_or(SetupError::UnknownPlayer(*id))?;
        player.name = name.clone();
    }
    // 未指定のプレイヤーには役職名から仮の名前を振る
    for p in &mut state.players {
        if p.name.is_empty() {
            p.name = format!("{} {}", p.role, p.id);
        }
    }
    state.add_log("Night 1", "Identities assigned, the game begins");
    state.phase = GamePhase::Day;
    Ok(ResolutionReport {
        events: vec!["The first morning! Introductions and discussion".to_string()],
        ..Default::default()
    })
}
