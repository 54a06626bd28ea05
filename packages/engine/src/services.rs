pub mod info_service;
pub mod night_service;
pub mod setup_service;
pub mod vote_service;
pub mod win_service;
