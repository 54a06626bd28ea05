pub mod models;
pub mod services;

pub use models::declaration::{IntakeError, NightDeclaration, NightInput};
pub use models::game::{GamePhase, GameState, LogEntry, TeamCounts};
pub use models::outcome::{GameVerdict, ResolutionReport, Winner};
pub use models::player::{Player, PlayerId};
pub use models::role::{Role, RoleKind, Team};
