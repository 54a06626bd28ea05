use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::player::{Player, PlayerId};
use super::role::{Role, Team};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Setup,   // ゲーム開始前
    Night,   // 夜フェーズ
    Day,     // 昼フェーズ
    Finished, // ゲーム終了
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub phase: String,
    pub event: String,
    pub time: DateTime<Utc>,
}

/// 生存者の陣営別カウント。勝敗判定用。
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamCounts {
    pub wolf_aligned: usize,
    pub neutral: usize,
    pub village_aligned: usize,
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("failed to serialize the game state: {0}")]
    Serialize(serde_json::Error),
    #[error("corrupt save data: {0}")]
    Corrupt(serde_json::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GhostLetterError {
    #[error("there is no dead Ghost to send letters")]
    NoDeadGhost,
    #[error("a ghost letter must be a single letter or digit, got {0:?}")]
    InvalidLetter(char),
}

/// エンジンが唯一の書き手。外部は読み取りとコマンド送信のみ。
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    pub players: Vec<Player>,
    pub night_count: u32,
    pub phase: GamePhase,
    pub log: Vec<LogEntry>,
    #[serde(default)]
    pub cupid_lovers: Option<(PlayerId, PlayerId)>,
    #[serde(default)]
    pub ghost_letters: String,
    #[serde(default)]
    pub hunter_pending_shot: Option<PlayerId>,
    #[serde(default)]
    pub tough_guy_bitten: bool,
    #[serde(default)]
    pub wolf_skip_next_night: bool,
}

impl GameState {
    pub fn new(roles: Vec<Role>) -> Self {
        let players = roles
            .into_iter()
            .enumerate()
            .map(|(i, role)| Player::new(i as PlayerId + 1, role))
            .collect();
        GameState {
            players,
            night_count: 1,
            phase: GamePhase::Setup,
            log: Vec::new(),
            cupid_lovers: None,
            ghost_letters: String::new(),
            hunter_pending_shot: None,
            tough_guy_bitten: false,
            wolf_skip_next_night: false,
        }
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    pub fn alive_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.is_alive)
    }

    pub fn alive_of(&self, role: Role) -> Vec<&Player> {
        self.players
            .iter()
            .filter(|p| p.is_alive && p.role == role)
            .collect()
    }

    /// 指定役職の生存者（先頭の一人）。対象役職は基本一人しか入らない。
    pub fn living_holder(&self, role: Role) -> Option<&Player> {
        self.players.iter().find(|p| p.is_alive && p.role == role)
    }

    pub fn count_by_team(&self) -> TeamCounts {
        let mut counts = TeamCounts::default();
        for p in self.alive_players() {
            match p.role.team() {
                Team::WolfAligned => counts.wolf_aligned += 1,
                Team::Neutral => counts.neutral += 1,
                Team::VillageAligned => counts.village_aligned += 1,
            }
        }
        counts
    }

    pub fn add_log(&mut self, phase: &str, event: impl Into<String>) {
        self.log.push(LogEntry {
            phase: phase.to_string(),
            event: event.into(),
            time: Utc::now(),
        });
    }

    pub fn phase_label(&self) -> String {
        match self.phase {
            GamePhase::Setup => "Setup".to_string(),
            GamePhase::Night => format!("Night {}", self.night_count),
            GamePhase::Day => format!("Day {}", self.night_count),
            GamePhase::Finished => "End".to_string(),
        }
    }

    /// 昼→夜の遷移。nightCountはここでしか増えない。追放は一日で解除。
    pub fn next_night(&mut self) {
        self.night_count += 1;
        self.phase = GamePhase::Night;
        for p in &mut self.players {
            p.exiled = false;
        }
        log::debug!("advancing to night {}", self.night_count);
    }

    /// 死んだゴーストが一文字ずつメッセージを送る
    pub fn send_ghost_letter(&mut self, letter: char) -> Result<(), GhostLetterError> {
        if !letter.is_ascii_alphanumeric() {
            return Err(GhostLetterError::InvalidLetter(letter));
        }
        let ghost_is_dead = self
            .players
            .iter()
            .any(|p| p.role == Role::Ghost && !p.is_alive);
        if !ghost_is_dead {
            return Err(GhostLetterError::NoDeadGhost);
        }
        let letter = letter.to_ascii_uppercase();
        self.ghost_letters.push(letter);
        let label = self.phase_label();
        self.add_log(&label, format!("The Ghost sent the letter {}", letter));
        Ok(())
    }

    pub fn to_save(&self) -> Result<String, SaveError> {
        serde_json::to_string(self).map_err(SaveError::Serialize)
    }

    pub fn from_save(data: &str) -> Result<GameState, SaveError> {
        serde_json::from_str(data).map_err(SaveError::Corrupt)
    }
}
