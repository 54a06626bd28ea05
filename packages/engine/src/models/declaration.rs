use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::game::GameState;
use super::player::{Player, PlayerId};
use super::role::Role;

/// 夜の攻撃一件。同じ対象に複数の攻撃が重なることもある。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Attack {
    pub target: PlayerId,
    pub kind: AttackerKind,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackerKind {
    Werewolf,
    SerialKiller,
    Witch,
}

/// フォーム層から届く生の選択。未選択はそのままNone。
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NightInput {
    pub wolf_target: Option<PlayerId>,
    pub serial_killer_target: Option<PlayerId>,
    pub witch_poison_target: Option<PlayerId>,
    pub witch_save: bool,
    pub guard_target: Option<PlayerId>,
    pub priest_target: Option<PlayerId>,
    pub hunter_shot: Option<PlayerId>,
    pub troublemaker: bool,
    pub seer_target: Option<PlayerId>,
    pub aura_seer_target: Option<PlayerId>,
    pub sorcerer_target: Option<PlayerId>,
    pub pi_target: Option<PlayerId>,
    pub medium_target: Option<PlayerId>,
    pub spellcaster_target: Option<PlayerId>,
    pub old_hag_target: Option<PlayerId>,
    pub cupid_pair: Option<(PlayerId, PlayerId)>,
    pub hoodlum_pair: Option<(PlayerId, PlayerId)>,
    pub doppelganger_target: Option<PlayerId>,
}

/// 検証済みの一晩分の宣言。エンジンは再検証しない。
#[derive(Clone, Debug, Default)]
pub struct NightDeclaration {
    pub wolf_target: Option<PlayerId>,
    pub serial_killer_target: Option<PlayerId>,
    pub witch_poison_target: Option<PlayerId>,
    pub witch_save: bool,
    pub guard_target: Option<PlayerId>,
    pub priest_target: Option<PlayerId>,
    pub hunter_shot: Option<PlayerId>,
    pub troublemaker: bool,
    pub seer_target: Option<PlayerId>,
    pub aura_seer_target: Option<PlayerId>,
    pub sorcerer_target: Option<PlayerId>,
    pub pi_target: Option<PlayerId>,
    pub medium_target: Option<PlayerId>,
    pub spellcaster_target: Option<PlayerId>,
    pub old_hag_target: Option<PlayerId>,
    pub cupid_pair: Option<(PlayerId, PlayerId)>,
    pub hoodlum_pair: Option<(PlayerId, PlayerId)>,
    pub doppelganger_target: Option<PlayerId>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IntakeError {
    #[error("night actions are not accepted on the first night")]
    FirstNight,
    #[error("unknown player id {0}")]
    UnknownPlayer(PlayerId),
    #[error("target {0} is already dead")]
    DeadTarget(PlayerId),
    #[error("target {0} must be dead for this action")]
    TargetNotDead(PlayerId),
    #[error("a role may not target its own holder (player {0})")]
    SelfTarget(PlayerId),
    #[error("no living {0} to perform this action")]
    MissingActor(Role),
    #[error("the wolves cannot attack one of their own (player {0})")]
    WolfTargetIsWolf(PlayerId),
    #[error("the wolves are sick tonight and cannot attack")]
    WolvesSkipTonight,
    #[error("{0} may only act on the second night")]
    SecondNightOnly(Role),
    #[error("a pair must name two different players")]
    PairNotDistinct,
}

fn require_alive(state: &GameState, id: PlayerId) -> Result<&Player, IntakeError> {
    let p = state.player(id).ok_or(IntakeError::UnknownPlayer(id))?;
    if !p.is_alive {
        return Err(IntakeError::DeadTarget(id));
    }
    Ok(p)
}

/// 単独行動役職の標準検証: 生きた担い手が居て、対象は生存かつ本人以外。
fn validate_targeted(state: &GameState, actor: Role, target: PlayerId) -> Result<(), IntakeError> {
    let holder = state
        .living_holder(actor)
        .ok_or(IntakeError::MissingActor(actor))?;
    let holder_id = holder.id;
    let p = require_alive(state, target)?;
    if p.id == holder_id {
        return Err(IntakeError::SelfTarget(target));
    }
    Ok(())
}

fn validate_pair(
    state: &GameState,
    actor: Role,
    pair: (PlayerId, PlayerId),
    night_count: u32,
) -> Result<(), IntakeError> {
    state
        .living_holder(actor)
        .ok_or(IntakeError::MissingActor(actor))?;
    if night_count != 2 {
        return Err(IntakeError::SecondNightOnly(actor));
    }
    if pair.0 == pair.1 {
        return Err(IntakeError::PairNotDistinct);
    }
    require_alive(state, pair.0)?;
    require_alive(state, pair.1)?;
    Ok(())
}

impl NightDeclaration {
    /// 境界での正規化・検証。不正な入力はエンジンまで届かせない。
    pub fn from_input(state: &GameState, input: NightInput) -> Result<Self, IntakeError> {
        if state.night_count < 2 {
            return Err(IntakeError::FirstNight);
        }

        if let Some(id) = input.wolf_target {
            if state.wolf_skip_next_night {
                return Err(IntakeError::WolvesSkipTonight);
            }
            let has_wolf = state
                .alive_players()
                .any(|p| p.role.is_killing_wolf());
            if !has_wolf {
                return Err(IntakeError::MissingActor(Role::Werewolf));
            }
            let p = require_alive(state, id)?;
            if p.role.is_killing_wolf() {
                return Err(IntakeError::WolfTargetIsWolf(id));
            }
        }

        if let Some(id) = input.serial_killer_target {
            validate_targeted(state, Role::SerialKiller, id)?;
        }
        if let Some(id) = input.witch_poison_target {
            validate_targeted(state, Role::Witch, id)?;
        }
        if input.witch_save {
            state
                .living_holder(Role::Witch)
                .ok_or(IntakeError::MissingActor(Role::Witch))?;
        }
        if let Some(id) = input.guard_target {
            validate_targeted(state, Role::Bodyguard, id)?;
        }
        if let Some(id) = input.priest_target {
            validate_targeted(state, Role::Priest, id)?;
        }
        if let Some(id) = input.hunter_shot {
            validate_targeted(state, Role::Hunter, id)?;
        }
        if input.troublemaker {
            state
                .living_holder(Role::Troublemaker)
                .ok_or(IntakeError::MissingActor(Role::Troublemaker))?;
        }

        // 占いは本家か弟子のどちらか生きている方が行う
        if let Some(id) = input.seer_target {
            let holder = state
                .living_holder(Role::Seer)
                .or_else(|| state.living_holder(Role::ApprenticeSeer))
                .ok_or(IntakeError::MissingActor(Role::Seer))?;
            let holder_id = holder.id;
            let p = require_alive(state, id)?;
            if p.id == holder_id {
                return Err(IntakeError::SelfTarget(id));
            }
        }
        if let Some(id) = input.aura_seer_target {
            validate_targeted(state, Role::AuraSeer, id)?;
        }
        if let Some(id) = input.sorcerer_target {
            validate_targeted(state, Role::Sorcerer, id)?;
        }
        if let Some(id) = input.pi_target {
            if state.night_count != 2 {
                return Err(IntakeError::SecondNightOnly(Role::PI));
            }
            validate_targeted(state, Role::PI, id)?;
        }
        if let Some(id) = input.medium_target {
            state
                .living_holder(Role::Medium)
                .ok_or(IntakeError::MissingActor(Role::Medium))?;
            let p = state.player(id).ok_or(IntakeError::UnknownPlayer(id))?;
            if p.is_alive {
                return Err(IntakeError::TargetNotDead(id));
            }
        }
        if let Some(id) = input.spellcaster_target {
            validate_targeted(state, Role::Spellcaster, id)?;
        }
        if let Some(id) = input.old_hag_target {
            validate_targeted(state, Role::OldHag, id)?;
        }

        if let Some(pair) = input.cupid_pair {
            validate_pair(state, Role::Cupid, pair, state.night_count)?;
        }
        if let Some(pair) = input.hoodlum_pair {
            validate_pair(state, Role::Hoodlum, pair, state.night_count)?;
        }
        if let Some(id) = input.doppelganger_target {
            if state.night_count != 2 {
                return Err(IntakeError::SecondNightOnly(Role::Doppelganger));
            }
            validate_targeted(state, Role::Doppelganger, id)?;
        }

        Ok(NightDeclaration {
            wolf_target: input.wolf_target,
            serial_killer_target: input.serial_killer_target,
            witch_poison_target: input.witch_poison_target,
            witch_save: input.witch_save,
            guard_target: input.guard_target,
            priest_target: input.priest_target,
            hunter_shot: input.hunter_shot,
            troublemaker: input.troublemaker,
            seer_target: input.seer_target,
            aura_seer_target: input.aura_seer_target,
            sorcerer_target: input.sorcerer_target,
            pi_target: input.pi_target,
            medium_target: input.medium_target,
            spellcaster_target: input.spellcaster_target,
            old_hag_target: input.old_hag_target,
            cupid_pair: input.cupid_pair,
            hoodlum_pair: input.hoodlum_pair,
            doppelganger_target: input.doppelganger_target,
        })
    }
}
