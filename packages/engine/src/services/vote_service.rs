use thiserror::Error;

use crate::models::game::{GamePhase, GameState};
use crate::models::outcome::{GameVerdict, ResolutionReport, Winner};
use crate::models::player::PlayerId;
use crate::models::role::Role;
use crate::services::{night_service, win_service};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VoteError {
    #[error("unknown player id {0}")]
    UnknownPlayer(PlayerId),
    #[error("player {0} is already dead")]
    DeadTarget(PlayerId),
    #[error("player {0} is exiled today and cannot be executed")]
    ExiledTarget(PlayerId),
    #[error("no revenge shot is pending")]
    NoPendingShot,
}

/// 昼の処刑。Fool/Prince/Pacifistの特例を先に片付け、
/// それ以外は夜と同じ死亡処理（恋人連鎖・狩人の報復）を通す。
pub fn resolve_vote(
    state: &mut GameState,
    target: Option<PlayerId>,
) -> Result<ResolutionReport, VoteError> {
    let day_label = format!("Day {}", state.night_count);
    let mut events: Vec<String> = Vec::new();
    let mut deaths: Vec<PlayerId> = Vec::new();

    let Some(id) = target else {
        events.push("No one was voted out today".to_string());
        state.add_log(&day_label, "No execution");
        return Ok(finish(state, events, deaths));
    };

    let pos = state
        .players
        .iter()
        .position(|p| p.id == id)
        .ok_or(VoteError::UnknownPlayer(id))?;
    if !state.players[pos].is_alive {
        return Err(VoteError::DeadTarget(id));
    }
    if state.players[pos].exiled {
        return Err(VoteError::ExiledTarget(id));
    }
    let name = state.players[pos].name.clone();
    let role = state.players[pos].role;

    // 狂人は処刑されるのが勝利条件。通常の判定を飛ばして即終了。
    if role == Role::Fool {
        state.players[pos].is_alive = false;
        deaths.push(id);
        events.push(format!("{} was voted out of the village", name));
        state.add_log(&day_label, format!("{} (Fool) was voted out and wins", name));
        let verdict = GameVerdict {
            winner: Winner::Fool,
            title: format!("{} (Fool) wins!", name),
            reason: "Voted out, exactly as planned".to_string(),
        };
        state.phase = GamePhase::Finished;
        log::info!("fool win on day {}", state.night_count);
        return Ok(ResolutionReport {
            events,
            deaths,
            hunter_pending_shot: state.hunter_pending_shot,
            wolf_skip_next_night: state.wolf_skip_next_night,
            game_over: Some(verdict),
        });
    }

    apply_execution(
        state,
        id,
        &day_label,
        format!("{} was voted out of the village", name),
        &mut events,
        &mut deaths,
    );

    Ok(finish(state, events, deaths))
}

/// 狩人の報復射撃。処刑と同じ死亡処理を通すので
/// プリンスの免罪とパシフィストの不可侵はここでも効く。
pub fn resolve_hunter_shot(
    state: &mut GameState,
    target: Option<PlayerId>,
) -> Result<ResolutionReport, VoteError> {
    let Some(hunter_id) = state.hunter_pending_shot else {
        return Err(VoteError::NoPendingShot);
    };
    let label = state.phase_label();
    let hunter_name = state
        .player(hunter_id)
        .map(|p| p.name.clone())
        .unwrap_or_else(|| "Hunter".to_string());
    state.hunter_pending_shot = None;

    let mut events: Vec<String> = Vec::new();
    let mut deaths: Vec<PlayerId> = Vec::new();

    let Some(id) = target else {
        events.push(format!("Hunter {} holds fire", hunter_name));
        state.add_log(&label, format!("Hunter {} did not shoot", hunter_name));
        return Ok(finish(state, events, deaths));
    };

    let victim = state.player(id).ok_or(VoteError::UnknownPlayer(id))?;
    if !victim.is_alive {
        return Err(VoteError::DeadTarget(id));
    }
    let victim_name = victim.name.clone();

    apply_execution(
        state,
        id,
        &label,
        format!("Hunter {} shot {}", hunter_name, victim_name),
        &mut events,
        &mut deaths,
    );

    Ok(finish(state, events, deaths))
}

/// 処刑系の共通死亡処理。投票でも報復射撃でも同じ一本を通す。
fn apply_execution(
    state: &mut GameState,
    id: PlayerId,
    label: &str,
    death_event: String,
    events: &mut Vec<String>,
    deaths: &mut Vec<PlayerId>,
) {
    let Some(pos) = state.players.iter().position(|p| p.id == id) else {
        return;
    };
    if !state.players[pos].is_alive {
        return;
    }
    let name = state.players[pos].name.clone();
    let role = state.players[pos].role;

    // プリンスは一度だけ正体を明かして免れる
    if role == Role::Prince && !state.players[pos].prince_used_power {
        state.players[pos].prince_used_power = true;
        events.push(format!("{} is the Prince and survives", name));
        state.add_log(label, format!("{} (Prince) revealed himself and survived", name));
        return;
    }
    // パシフィストは処刑では死なない
    if role == Role::Pacifist {
        events.push(format!("{} is a Pacifist and cannot be executed", name));
        state.add_log(label, format!("{} (Pacifist) survived the execution", name));
        return;
    }

    state.players[pos].is_alive = false;
    deaths.push(id);
    state.add_log(label, death_event.clone());
    events.push(death_event);

    if role == Role::Hunter {
        state.hunter_pending_shot = Some(id);
        events.push(format!("Hunter {} may take one player down", name));
    }

    let chained = night_service::apply_lover_chain(state, &[id], events, label);
    deaths.extend(chained);
}

/// 報復射撃待ちの間は勝敗判定を保留する
fn finish(state: &mut GameState, events: Vec<String>, deaths: Vec<PlayerId>) -> ResolutionReport {
    let game_over = if state.hunter_pending_shot.is_some() {
        None
    } else {
        win_service::check_win(state)
    };
    if let Some(verdict) = &game_over {
        state.phase = GamePhase::Finished;
        let label = state.phase_label();
        state.add_log(&label, verdict.title.clone());
    }
    ResolutionReport {
        events,
        deaths,
        hunter_pending_shot: state.hunter_pending_shot,
        wolf_skip_next_night: state.wolf_skip_next_night,
        game_over,
    }
}
