use std::fmt;

use serde::{Deserialize, Serialize};

/// デッキに含まれる全役職
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Villager,
    Seer,
    Bodyguard,
    Spellcaster,
    Cupid,
    AuraSeer,
    Drunk,
    Prince,
    Priest,
    PI,
    Troublemaker,
    Witch,
    OldHag,
    ApprenticeSeer,
    Mayor,
    Hunter,
    Disease,
    Pacifist,
    Ghost,
    Mason,
    Doppelganger,
    Lycan,
    ToughGuy,
    Idiot,
    Werewolf,
    LoneWolf,
    WolfCub,
    Minion,
    Sorcerer,
    Hoodlum,
    Cursed,
    SerialKiller,
    Fool,
    Medium,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Team {
    WolfAligned,
    Neutral,
    VillageAligned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoleKind {
    Attacker,
    Protector,
    Informer,
    None,
}

impl Role {
    /// 陣営は役職から静的に決まる（プレイヤーには保存しない）
    pub fn team(self) -> Team {
        match self {
            Role::Werewolf | Role::LoneWolf | Role::WolfCub | Role::Minion | Role::Sorcerer => {
                Team::WolfAligned
            }
            Role::SerialKiller | Role::Fool | Role::Hoodlum => Team::Neutral,
            _ => Team::VillageAligned,
        }
    }

    pub fn kind(self) -> RoleKind {
        match self {
            Role::Werewolf
            | Role::LoneWolf
            | Role::WolfCub
            | Role::SerialKiller
            | Role::Witch
            | Role::Hunter => RoleKind::Attacker,
            Role::Bodyguard | Role::Priest => RoleKind::Protector,
            Role::Seer
            | Role::ApprenticeSeer
            | Role::AuraSeer
            | Role::Sorcerer
            | Role::PI
            | Role::Medium
            | Role::Minion
            | Role::Mason => RoleKind::Informer,
            _ => RoleKind::None,
        }
    }

    /// 夜に襲撃できる狼。MinionとSorcererは狼陣営だが襲撃はしない。
    pub fn is_killing_wolf(self) -> bool {
        matches!(self, Role::Werewolf | Role::LoneWolf | Role::WolfCub)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Villager => "Villager",
            Role::Seer => "Seer",
            Role::Bodyguard => "Bodyguard",
            Role::Spellcaster => "Spellcaster",
            Role::Cupid => "Cupid",
            Role::AuraSeer => "Aura Seer",
            Role::Drunk => "Drunk",
            Role::Prince => "Prince",
            Role::Priest => "Priest",
            Role::PI => "PI",
            Role::Troublemaker => "Troublemaker",
            Role::Witch => "Witch",
            Role::OldHag => "Old Hag",
            Role::ApprenticeSeer => "Apprentice Seer",
            Role::Mayor => "Mayor",
            Role::Hunter => "Hunter",
            Role::Disease => "Disease",
            Role::Pacifist => "Pacifist",
            Role::Ghost => "Ghost",
            Role::Mason => "Mason",
            Role::Doppelganger => "Doppelganger",
            Role::Lycan => "Lycan",
            Role::ToughGuy => "Tough Guy",
            Role::Idiot => "Idiot",
            Role::Werewolf => "Werewolf",
            Role::LoneWolf => "Lone Wolf",
            Role::WolfCub => "Wolf Cub",
            Role::Minion => "Minion",
            Role::Sorcerer => "Sorcerer",
            Role::Hoodlum => "Hoodlum",
            Role::Cursed => "Cursed",
            Role::SerialKiller => "Serial Killer",
            Role::Fool => "Fool",
            Role::Medium => "Medium",
        };
        write!(f, "{}", name)
    }
}
