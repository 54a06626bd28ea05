use crate::models::game::GameState;
use crate::models::outcome::{GameVerdict, Winner};
use crate::models::player::Player;
use crate::models::role::Role;

/// 勝敗判定。生死が動くたびに呼ばれる。条件は固定の優先順で最初の一致が勝ち。
pub fn check_win(state: &GameState) -> Option<GameVerdict> {
    let alive: Vec<&Player> = state.alive_players().collect();

    // 1. 全滅は引き分け
    if alive.is_empty() {
        return Some(verdict(Winner::Draw, "Draw", "Everyone is dead"));
    }

    // 2. 一匹狼は最後の一人として生き残ったら勝ち
    if alive.len() == 1 && alive[0].role == Role::LoneWolf {
        return Some(verdict(
            Winner::LoneWolf,
            format!("{} (Lone Wolf) wins!", alive[0].name),
            "The last one standing",
        ));
    }

    // 3. 殺人鬼も最後の一人なら勝ち
    if alive.len() == 1 && alive[0].role == Role::SerialKiller {
        return Some(verdict(
            Winner::SerialKiller,
            format!("{} (Serial Killer) wins!", alive[0].name),
            "Killed everyone else",
        ));
    }

    // 4. アンパンは狙った二人が死んでいれば勝ち（村勝利より先に見る）
    if let Some(hoodlum) = alive.iter().find(|p| p.role == Role::Hoodlum) {
        if let Some((t1, t2)) = hoodlum.hoodlum_targets {
            let is_dead =
                |id| state.player(id).map_or(false, |p: &Player| !p.is_alive);
            if is_dead(t1) && is_dead(t2) {
                return Some(verdict(
                    Winner::Hoodlum,
                    format!("{} (Hoodlum) wins!", hoodlum.name),
                    "Both marked targets are dead",
                ));
            }
        }
    }

    let counts = state.count_by_team();
    let killing_wolves = alive.iter().filter(|p| p.role.is_killing_wolf()).count();
    let serial_killers = alive
        .iter()
        .filter(|p| p.role == Role::SerialKiller)
        .count();

    // 5. 狼陣営と殺人鬼が全滅していれば村の勝ち
    if counts.wolf_aligned == 0 && serial_killers == 0 {
        return Some(verdict(
            Winner::Village,
            "The village wins!",
            "Every threat has been eliminated",
        ));
    }

    // 6. 狼陣営が村側と並んだら狼の勝ち。襲撃できる狼が残っている事が条件。
    if counts.wolf_aligned >= counts.village_aligned
        && counts.village_aligned > 0
        && killing_wolves > 0
    {
        return Some(verdict(
            Winner::Wolves,
            "The wolves win!",
            "The village is overrun",
        ));
    }

    None
}

fn verdict(winner: Winner, title: impl Into<String>, reason: impl Into<String>) -> GameVerdict {
    GameVerdict {
        winner,
        title: title.into(),
        reason: reason.into(),
    }
}
