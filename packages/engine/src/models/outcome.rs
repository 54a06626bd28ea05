use serde::{Deserialize, Serialize};

use super::player::PlayerId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    Draw,
    LoneWolf,
    SerialKiller,
    Hoodlum,
    Village,
    Wolves,
    Fool,
}

/// 勝敗が決した時の結果。描画は外部の仕事。
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameVerdict {
    pub winner: Winner,
    pub title: String,
    pub reason: String,
}

/// 一回の解決パスの結果。イベントは発生順。
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolutionReport {
    pub events: Vec<String>,
    pub deaths: Vec<PlayerId>,
    pub hunter_pending_shot: Option<PlayerId>,
    pub wolf_skip_next_night: bool,
    pub game_over: Option<GameVerdict>,
}
