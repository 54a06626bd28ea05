use serde::{Deserialize, Serialize};

use super::role::Role;

pub type PlayerId = u32;

/// 全フラグを保存対象にする。復元後に同じ解決結果が出ないと困る。
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub role: Role,
    pub is_alive: bool,
    #[serde(default)]
    pub exiled: bool,
    #[serde(default)]
    pub tough_guy_bitten: bool,
    #[serde(default)]
    pub upgraded_to_seer: bool,
    #[serde(default)]
    pub transformed: bool,
    #[serde(default)]
    pub prince_used_power: bool,
    #[serde(default)]
    pub doppel_target: Option<PlayerId>,
    #[serde(default)]
    pub hoodlum_targets: Option<(PlayerId, PlayerId)>,
}

impl Player {
    pub fn new(id: PlayerId, role: Role) -> Self {
        Self {
            id,
            name: String::new(),
            role,
            is_alive: true,
            exiled: false,
            tough_guy_bitten: false,
            upgraded_to_seer: false,
            transformed: false,
            prince_used_power: false,
            doppel_target: None,
            hoodlum_targets: None,
        }
    }
}
