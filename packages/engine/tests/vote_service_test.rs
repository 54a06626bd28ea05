use engine::models::role::Role;
use engine::services::vote_service::{self, VoteError};
use engine::services::setup_service;
use engine::{GamePhase, GameState, Winner};

fn setup_game(roles: &[Role]) -> GameState {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut state = setup_service::new_game(roles.to_vec());
    setup_service::start_game(&mut state).unwrap();
    setup_service::assign_identities(&mut state, &[]).unwrap();
    state.next_night();
    state.phase = GamePhase::Day;
    state
}

#[test]
fn test_no_execution_when_no_one_is_voted() {
    let mut state = setup_game(&[Role::Werewolf, Role::Seer, Role::Villager, Role::Villager]);

    let report = vote_service::resolve_vote(&mut state, None).unwrap();

    assert!(report.deaths.is_empty());
    assert_eq!(report.events, vec!["No one was voted out today".to_string()]);
    assert!(report.game_over.is_none());
}

#[test]
fn test_voting_out_the_last_wolf_ends_the_game() {
    let mut state = setup_game(&[
        Role::Werewolf,
        Role::Seer,
        Role::Villager,
        Role::Villager,
    ]);

    let report = vote_service::resolve_vote(&mut state, Some(1)).unwrap();

    assert_eq!(report.deaths, vec![1]);
    let verdict = report.game_over.expect("村の勝利で終わるはず");
    assert_eq!(verdict.winner, Winner::Village);
    assert_eq!(state.phase, GamePhase::Finished);
}

#[test]
fn test_fool_wins_by_being_voted_out() {
    let mut state = setup_game(&[
        Role::Werewolf,
        Role::Fool,
        Role::Villager,
        Role::Villager,
    ]);

    let report = vote_service::resolve_vote(&mut state, Some(2)).unwrap();

    assert!(!state.player(2).unwrap().is_alive);
    let verdict = report.game_over.expect("狂人の単独勝利");
    assert_eq!(verdict.winner, Winner::Fool);
    assert_eq!(state.phase, GamePhase::Finished);
}

#[test]
fn test_prince_survives_the_first_vote_only() {
    let mut state = setup_game(&[
        Role::Werewolf,
        Role::Prince,
        Role::Villager,
        Role::Villager,
        Role::Villager,
    ]);

    let report = vote_service::resolve_vote(&mut state, Some(2)).unwrap();
    assert!(report.deaths.is_empty());
    assert!(state.player(2).unwrap().is_alive);
    assert!(state.player(2).unwrap().prince_used_power);

    let report = vote_service::resolve_vote(&mut state, Some(2)).unwrap();
    assert_eq!(report.deaths, vec![2]);
    assert!(!state.player(2).unwrap().is_alive);
}

#[test]
fn test_pacifist_cannot_be_executed() {
    let mut state = setup_game(&[
        Role::Werewolf,
        Role::Pacifist,
        Role::Villager,
        Role::Villager,
    ]);

    let report = vote_service::resolve_vote(&mut state, Some(2)).unwrap();
    assert!(report.deaths.is_empty());
    assert!(state.player(2).unwrap().is_alive);

    let report = vote_service::resolve_vote(&mut state, Some(2)).unwrap();
    assert!(report.deaths.is_empty(), "パシフィストは何度でも免れる");
}

#[test]
fn test_exiled_player_cannot_be_executed() {
    let mut state = setup_game(&[Role::Werewolf, Role::Seer, Role::Villager, Role::Villager]);
    state.player_mut(3).unwrap().exiled = true;

    let result = vote_service::resolve_vote(&mut state, Some(3));
    assert_eq!(result.unwrap_err(), VoteError::ExiledTarget(3));
}

#[test]
fn test_dead_player_cannot_be_voted() {
    let mut state = setup_game(&[Role::Werewolf, Role::Seer, Role::Villager, Role::Villager]);
    state.player_mut(3).unwrap().is_alive = false;

    let result = vote_service::resolve_vote(&mut state, Some(3));
    assert_eq!(result.unwrap_err(), VoteError::DeadTarget(3));
}

#[test]
fn test_verdict_waits_for_the_hunters_shot() {
    let mut state = setup_game(&[Role::Werewolf, Role::Hunter, Role::Villager]);

    let report = vote_service::resolve_vote(&mut state, Some(2)).unwrap();

    // 狼と村人の同数だが、射撃が残っている間は決着しない
    assert_eq!(report.hunter_pending_shot, Some(2));
    assert!(report.game_over.is_none());
    assert_ne!(state.phase, GamePhase::Finished);

    let report = vote_service::resolve_hunter_shot(&mut state, Some(1)).unwrap();
    assert_eq!(report.deaths, vec![1]);
    let verdict = report.game_over.expect("狼が死んで村の勝ち");
    assert_eq!(verdict.winner, Winner::Village);
}

#[test]
fn test_hunter_may_hold_fire() {
    let mut state = setup_game(&[
        Role::Werewolf,
        Role::Hunter,
        Role::Villager,
        Role::Villager,
        Role::Villager,
    ]);

    vote_service::resolve_vote(&mut state, Some(2)).unwrap();
    let report = vote_service::resolve_hunter_shot(&mut state, None).unwrap();

    assert!(report.deaths.is_empty());
    assert!(report.events.iter().any(|e| e.contains("holds fire")));
    assert_eq!(state.hunter_pending_shot, None);
}

#[test]
fn test_shot_without_a_pending_hunter_is_rejected() {
    let mut state = setup_game(&[Role::Werewolf, Role::Seer, Role::Villager, Role::Villager]);

    let result = vote_service::resolve_hunter_shot(&mut state, Some(1));
    assert_eq!(result.unwrap_err(), VoteError::NoPendingShot);
}

#[test]
fn test_prince_survives_the_hunters_shot() {
    let mut state = setup_game(&[
        Role::Werewolf,
        Role::Hunter,
        Role::Prince,
        Role::Villager,
        Role::Villager,
    ]);

    vote_service::resolve_vote(&mut state, Some(2)).unwrap();
    let report = vote_service::resolve_hunter_shot(&mut state, Some(3)).unwrap();

    // 免罪特権は報復射撃にも効く
    assert!(report.deaths.is_empty());
    assert!(state.player(3).unwrap().is_alive);
    assert!(state.player(3).unwrap().prince_used_power);
}

#[test]
fn test_execution_drags_the_lover_down() {
    let mut state = setup_game(&[
        Role::Werewolf,
        Role::Cupid,
        Role::Villager,
        Role::Villager,
        Role::Villager,
        Role::Villager,
    ]);
    state.cupid_lovers = Some((3, 4));

    let report = vote_service::resolve_vote(&mut state, Some(3)).unwrap();

    assert_eq!(report.deaths, vec![3, 4]);
    assert!(!state.player(4).unwrap().is_alive);
    assert!(report.events.iter().any(|e| e.contains("heartbreak")));
}

#[test]
fn test_voted_out_hunter_takes_the_lover_down_too() {
    let mut state = setup_game(&[
        Role::Werewolf,
        Role::Hunter,
        Role::Villager,
        Role::Villager,
        Role::Villager,
        Role::Villager,
    ]);
    state.cupid_lovers = Some((2, 3));

    let report = vote_service::resolve_vote(&mut state, Some(2)).unwrap();

    // 狩人の死で恋人も連鎖し、そのうえで射撃が保留になる
    assert_eq!(report.deaths, vec![2, 3]);
    assert_eq!(report.hunter_pending_shot, Some(2));
    assert!(report.game_over.is_none());
}
