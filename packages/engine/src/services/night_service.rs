use crate::models::declaration::{Attack, AttackerKind, NightDeclaration};
use crate::models::game::{GamePhase, GameState};
use crate::models::outcome::ResolutionReport;
use crate::models::player::PlayerId;
use crate::models::role::Role;
use crate::services::{info_service, win_service};

/// 夜の解決本体。2夜目以降で一晩につき一回だけ呼ばれる。
/// 処理順は固定: 襲撃(狼→殺人鬼→魔女) → 変身/遅延死 → 継承 → 連鎖死。
pub fn process_night(state: &mut GameState, decl: &NightDeclaration) -> ResolutionReport {
    let night_label = format!("Night {}", state.night_count);
    log::info!("resolving night {}", state.night_count);

    let mut events: Vec<String> = Vec::new();
    let mut deaths: Vec<PlayerId> = Vec::new();

    // 前夜に噛まれたタフガイを先に控える。今夜噛まれた分は来夜まで生きる。
    let pending_bitten: Vec<PlayerId> = state
        .players
        .iter()
        .filter(|p| p.tough_guy_bitten && p.is_alive)
        .map(|p| p.id)
        .collect();

    if state.wolf_skip_next_night {
        state.wolf_skip_next_night = false;
        events.push("The wolves are sick tonight and skip their kill".to_string());
        state.add_log(&night_label, "Disease kept the wolves from killing tonight");
    }

    register_pairings(state, decl);

    // 襲撃は宣言順に集める。保護の判定順序がここで決まる。
    let mut attacks: Vec<Attack> = Vec::new();
    if let Some(target) = decl.wolf_target {
        attacks.push(Attack { target, kind: AttackerKind::Werewolf });
    }
    if let Some(target) = decl.serial_killer_target {
        attacks.push(Attack { target, kind: AttackerKind::SerialKiller });
    }
    if let Some(target) = decl.witch_poison_target {
        attacks.push(Attack { target, kind: AttackerKind::Witch });
    }

    // 保護判定は攻撃ごと。ボディーガードは殺人鬼を止められない。
    let mut candidates: Vec<PlayerId> = Vec::new();
    for attack in &attacks {
        if decl.guard_target == Some(attack.target) && attack.kind != AttackerKind::SerialKiller {
            events.push("Bodyguard protection succeeded".to_string());
            continue;
        }
        if decl.priest_target == Some(attack.target) {
            events.push("Priest protection succeeded".to_string());
            continue;
        }
        if decl.witch_save && attack.kind == AttackerKind::Werewolf {
            events.push("The Witch used her healing potion".to_string());
            continue;
        }
        if !candidates.contains(&attack.target) {
            candidates.push(attack.target);
        }
    }

    let wolf_attacked = |id: PlayerId| {
        attacks
            .iter()
            .any(|a| a.target == id && a.kind == AttackerKind::Werewolf)
    };

    for id in candidates {
        let Some(pos) = state.players.iter().position(|p| p.id == id) else {
            continue;
        };
        if !state.players[pos].is_alive {
            continue;
        }
        let name = state.players[pos].name.clone();
        let role = state.players[pos].role;

        // 呪われ人は狼に噛まれると死なずに狼化する
        if role == Role::Cursed && wolf_attacked(id) {
            state.players[pos].role = Role::Werewolf;
            events.push(format!("{} turned into a Werewolf", name));
            state.add_log(&night_label, format!("{} (Cursed) turned into a Werewolf", name));
            continue;
        }

        // タフガイの遅延死は一ゲームに一度だけ
        if role == Role::ToughGuy && wolf_attacked(id) && !state.tough_guy_bitten {
            state.tough_guy_bitten = true;
            state.players[pos].tough_guy_bitten = true;
            events.push(format!("{} was bitten but hangs on, he will die next night", name));
            state.add_log(&night_label, format!("{} (Tough Guy) was bitten but survived the night", name));
            continue;
        }

        state.players[pos].is_alive = false;
        deaths.push(id);
        events.push(format!("{} died", name));
        state.add_log(&night_label, format!("{} died", name));

        if role == Role::Hunter {
            state.hunter_pending_shot = Some(id);
            events.push(format!("Hunter {} may take one player down", name));
        }
        if role == Role::Disease && wolf_attacked(id) {
            state.wolf_skip_next_night = true;
            events.push("Disease infected the wolves, they skip the next night's kill".to_string());
            state.add_log(&night_label, "Disease will keep the wolves from killing next night");
        }
    }

    // 前夜の噛み傷が今夜発症する
    for id in pending_bitten {
        let Some(pos) = state.players.iter().position(|p| p.id == id) else {
            continue;
        };
        if !state.players[pos].is_alive {
            continue;
        }
        state.players[pos].is_alive = false;
        state.players[pos].tough_guy_bitten = false;
        let name = state.players[pos].name.clone();
        let role = state.players[pos].role;
        deaths.push(id);
        events.push(format!("{} (Tough Guy) died from last night's wound", name));
        state.add_log(&night_label, format!("{} (Tough Guy) died from last night's wound", name));
        if role == Role::Hunter {
            state.hunter_pending_shot = Some(id);
            events.push(format!("Hunter {} may take one player down", name));
        }
    }

    // 占い師が倒れたら弟子が跡を継ぐ（一度きり）
    let seer_is_dead = state
        .players
        .iter()
        .any(|p| p.role == Role::Seer && !p.is_alive);
    if seer_is_dead {
        if let Some(pos) = state
            .players
            .iter()
            .position(|p| p.role == Role::ApprenticeSeer && p.is_alive && !p.upgraded_to_seer)
        {
            state.players[pos].role = Role::Seer;
            state.players[pos].upgraded_to_seer = true;
            let name = state.players[pos].name.clone();
            events.push(format!("{} took over as the Seer", name));
            state.add_log(&night_label, format!("{} became the Seer", name));
        }
    }

    // ドッペルゲンガーの変身は3夜目以降。写し先の死亡時の役職を引き継ぐ。
    if state.night_count > 2 {
        if let Some(pos) = state
            .players
            .iter()
            .position(|p| p.role == Role::Doppelganger && p.is_alive && !p.transformed)
        {
            if let Some(target_id) = state.players[pos].doppel_target {
                let target_info = state
                    .player(target_id)
                    .filter(|t| !t.is_alive)
                    .map(|t| t.role);
                if let Some(new_role) = target_info {
                    state.players[pos].role = new_role;
                    state.players[pos].transformed = true;
                    let name = state.players[pos].name.clone();
                    events.push(format!("{} now acts as the {}", name, new_role));
                    state.add_log(&night_label, format!("{} transformed into the {}", name, new_role));
                }
            }
        }
    }

    side_effect_events(state, decl, &night_label, &mut events);

    if deaths.is_empty() && events.is_empty() {
        events.push("A quiet night, nobody died".to_string());
    }

    // 死んだゴーストからの伝言を朝に読み上げる
    let ghost_is_dead = state
        .players
        .iter()
        .any(|p| p.role == Role::Ghost && !p.is_alive);
    if ghost_is_dead && !state.ghost_letters.is_empty() {
        events.push(format!("Letters from the Ghost so far: {}", state.ghost_letters));
    }

    let chained = apply_lover_chain(state, &deaths, &mut events, &night_label);
    deaths.extend(chained);

    if deaths.is_empty() {
        state.add_log(&night_label, "No one died");
    } else {
        let names: Vec<String> = deaths
            .iter()
            .filter_map(|id| state.player(*id))
            .map(|p| p.name.clone())
            .collect();
        state.add_log(&night_label, format!("Died tonight: {}", names.join(", ")));
    }

    state.phase = GamePhase::Day;
    // 報復射撃が残っている間は勝敗を確定させない
    let game_over = if state.hunter_pending_shot.is_some() {
        None
    } else {
        win_service::check_win(state)
    };
    if let Some(verdict) = &game_over {
        state.phase = GamePhase::Finished;
        state.add_log(&night_label, verdict.title.clone());
    }

    log::info!(
        "night {} resolved: {} death(s), game over: {}",
        state.night_count,
        deaths.len(),
        game_over.is_some()
    );

    ResolutionReport {
        events,
        deaths,
        hunter_pending_shot: state.hunter_pending_shot,
        wolf_skip_next_night: state.wolf_skip_next_night,
        game_over,
    }
}

/// 2夜目に登録される紐付け（恋人・狙われた二人・写し先）
fn register_pairings(state: &mut GameState, decl: &NightDeclaration) {
    if let Some(pair) = decl.cupid_pair {
        state.cupid_lovers = Some(pair);
        log::info!("cupid bound players {} and {}", pair.0, pair.1);
    }
    if let Some(pair) = decl.hoodlum_pair {
        if let Some(pos) = state
            .players
            .iter()
            .position(|p| p.role == Role::Hoodlum && p.is_alive)
        {
            state.players[pos].hoodlum_targets = Some(pair);
            log::info!("hoodlum marked players {} and {}", pair.0, pair.1);
        }
    }
    if let Some(target) = decl.doppelganger_target {
        if let Some(pos) = state
            .players
            .iter()
            .position(|p| p.role == Role::Doppelganger && p.is_alive)
        {
            state.players[pos].doppel_target = Some(target);
            log::info!("doppelganger is watching player {}", target);
        }
    }
}

/// 死に直結しない夜の副作用（追放・沈黙など）をイベント化する
fn side_effect_events(
    state: &mut GameState,
    decl: &NightDeclaration,
    night_label: &str,
    events: &mut Vec<String>,
) {
    if let Some(id) = decl.old_hag_target {
        if let Some(pos) = state.players.iter().position(|p| p.id == id && p.is_alive) {
            state.players[pos].exiled = true;
            let name = state.players[pos].name.clone();
            events.push(format!("{} was exiled from the village for the day", name));
            state.add_log(night_label, format!("Old Hag exiled {}", name));
        }
    }
    if let Some(id) = decl.spellcaster_target {
        if let Some(name) = state.player(id).map(|p| p.name.clone()) {
            events.push(format!("{} was silenced and may not speak today", name));
            state.add_log(night_label, format!("Spellcaster silenced {}", name));
        }
    }
    if decl.troublemaker {
        events.push("The Troublemaker stirs: two executions today".to_string());
        state.add_log(night_label, "Troublemaker forces two executions today");
    }
    if let Some(id) = decl.hunter_shot {
        if let Some(name) = state.player(id).map(|p| p.name.clone()) {
            events.push(format!("The Hunter declares a shot at {} for the coming day", name));
            state.add_log(night_label, format!("Hunter declared a shot at {}", name));
        }
    }
    if let Some(id) = decl.pi_target {
        if let Ok(report) = info_service::pi_check(state, id) {
            let names = report.checked.join(", ");
            let line = if report.wolf_found {
                format!("PI checked {}: a wolf is among them", names)
            } else {
                format!("PI checked {}: no wolf in this group", names)
            };
            events.push(line.clone());
            state.add_log(night_label, line);
        }
    }
}

/// 恋人の連鎖死。相方が既に死んでいれば何もしない（二重処理の防止）。
pub(crate) fn apply_lover_chain(
    state: &mut GameState,
    dead: &[PlayerId],
    events: &mut Vec<String>,
    phase_label: &str,
) -> Vec<PlayerId> {
    let Some((a, b)) = state.cupid_lovers else {
        return Vec::new();
    };
    let mut extra = Vec::new();
    for &id in dead {
        let other = if id == a {
            b
        } else if id == b {
            a
        } else {
            continue;
        };
        let Some(pos) = state.players.iter().position(|p| p.id == other) else {
            continue;
        };
        if !state.players[pos].is_alive {
            continue;
        }
        state.players[pos].is_alive = false;
        let name = state.players[pos].name.clone();
        events.push(format!("{} died of heartbreak", name));
        state.add_log(phase_label, format!("{} died of heartbreak", name));
        extra.push(other);
    }
    extra
}
