pub mod declaration;
pub mod game;
pub mod outcome;
pub mod player;
pub mod role;
