use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::game::GameState;
use crate::models::player::{Player, PlayerId};
use crate::models::role::Role;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InfoError {
    #[error("unknown player id {0}")]
    UnknownPlayer(PlayerId),
    #[error("player {0} is dead")]
    DeadTarget(PlayerId),
    #[error("player {0} is not dead")]
    TargetNotDead(PlayerId),
}

/// 占い結果。Lycanは村人なのに狼に見える。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeerReading {
    Werewolf,
    AppearsWerewolf,
    Villager,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuraReading {
    Special,
    Ordinary,
}

/// オーラ持ちとして視える役職
const AURA_SPECIAL: &[Role] = &[
    Role::Seer,
    Role::Witch,
    Role::Bodyguard,
    Role::Hunter,
    Role::Prince,
    Role::AuraSeer,
    Role::Cupid,
    Role::SerialKiller,
    Role::Fool,
    Role::Hoodlum,
    Role::Sorcerer,
    Role::ToughGuy,
    Role::Priest,
    Role::Medium,
];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PiReport {
    pub checked: Vec<String>,
    pub wolf_found: bool,
}

fn living(state: &GameState, id: PlayerId) -> Result<&Player, InfoError> {
    let player = state.player(id).ok_or(InfoError::UnknownPlayer(id))?;
    if !player.is_alive {
        return Err(InfoError::DeadTarget(id));
    }
    Ok(player)
}

pub fn seer_check(state: &GameState, target: PlayerId) -> Result<SeerReading, InfoError> {
    let player = living(state, target)?;
    let reading = if player.role.is_killing_wolf() {
        SeerReading::Werewolf
    } else if player.role == Role::Lycan {
        SeerReading::AppearsWerewolf
    } else {
        SeerReading::Villager
    };
    Ok(reading)
}

pub fn aura_check(state: &GameState, target: PlayerId) -> Result<AuraReading, InfoError> {
    let player = living(state, target)?;
    let reading = if AURA_SPECIAL.contains(&player.role) {
        AuraReading::Special
    } else {
        AuraReading::Ordinary
    };
    Ok(reading)
}

/// ソーサラーは占い師（と跡を継いだ弟子）を探す
pub fn sorcerer_check(state: &GameState, target: PlayerId) -> Result<bool, InfoError> {
    let player = living(state, target)?;
    Ok(matches!(player.role, Role::Seer | Role::ApprenticeSeer))
}

/// 探偵は対象と生存者リスト上の両隣をまとめて調べる
pub fn pi_check(state: &GameState, target: PlayerId) -> Result<PiReport, InfoError> {
    living(state, target)?;
    let alive: Vec<&Player> = state.alive_players().collect();
    let idx = alive
        .iter()
        .position(|p| p.id == target)
        .ok_or(InfoError::DeadTarget(target))?;
    let len = alive.len();
    let ring = [alive[(idx + len - 1) % len], alive[idx], alive[(idx + 1) % len]];

    let mut checked = Vec::new();
    let mut wolf_found = false;
    for p in ring {
        if !checked.contains(&p.name) {
            checked.push(p.name.clone());
        }
        if p.role.is_killing_wolf() {
            wolf_found = true;
        }
    }
    Ok(PiReport { checked, wolf_found })
}

/// 霊媒師は死者の正体を知る
pub fn medium_check(state: &GameState, target: PlayerId) -> Result<Role, InfoError> {
    let player = state.player(target).ok_or(InfoError::UnknownPlayer(target))?;
    if player.is_alive {
        return Err(InfoError::TargetNotDead(target));
    }
    Ok(player.role)
}

/// ミニオンは初日に狼の顔ぶれを知らされる
pub fn minion_wolves(state: &GameState) -> Vec<String> {
    state
        .players
        .iter()
        .filter(|p| p.is_alive && p.role.is_killing_wolf())
        .map(|p| p.name.clone())
        .collect()
}

/// メイソンはお互いを知っている
pub fn masons(state: &GameState) -> Vec<String> {
    state
        .players
        .iter()
        .filter(|p| p.is_alive && p.role == Role::Mason)
        .map(|p| p.name.clone())
        .collect()
}
