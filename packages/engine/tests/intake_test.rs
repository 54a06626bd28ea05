use engine::models::role::Role;
use engine::services::setup_service;
use engine::{GameState, IntakeError, NightDeclaration, NightInput};

fn setup_game(roles: &[Role]) -> GameState {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut state = setup_service::new_game(roles.to_vec());
    setup_service::start_game(&mut state).unwrap();
    setup_service::assign_identities(&mut state, &[]).unwrap();
    state.next_night();
    state
}

#[test]
fn test_no_actions_on_the_first_night() {
    let mut state = setup_service::new_game(vec![
        Role::Werewolf,
        Role::Seer,
        Role::Villager,
        Role::Villager,
    ]);
    setup_service::start_game(&mut state).unwrap();

    let result = NightDeclaration::from_input(
        &state,
        NightInput {
            wolf_target: Some(3),
            ..Default::default()
        },
    );
    assert_eq!(result.unwrap_err(), IntakeError::FirstNight);
}

#[test]
fn test_unknown_target_is_rejected() {
    let state = setup_game(&[Role::Werewolf, Role::Seer, Role::Villager, Role::Villager]);

    let result = NightDeclaration::from_input(
        &state,
        NightInput {
            wolf_target: Some(99),
            ..Default::default()
        },
    );
    assert_eq!(result.unwrap_err(), IntakeError::UnknownPlayer(99));
}

#[test]
fn test_dead_target_is_rejected() {
    let mut state = setup_game(&[Role::Werewolf, Role::Seer, Role::Villager, Role::Villager]);
    state.player_mut(3).unwrap().is_alive = false;

    let result = NightDeclaration::from_input(
        &state,
        NightInput {
            wolf_target: Some(3),
            ..Default::default()
        },
    );
    assert_eq!(result.unwrap_err(), IntakeError::DeadTarget(3));
}

#[test]
fn test_wolves_cannot_attack_a_wolf() {
    let state = setup_game(&[
        Role::Werewolf,
        Role::WolfCub,
        Role::Villager,
        Role::Villager,
    ]);

    let result = NightDeclaration::from_input(
        &state,
        NightInput {
            wolf_target: Some(2),
            ..Default::default()
        },
    );
    assert_eq!(result.unwrap_err(), IntakeError::WolfTargetIsWolf(2));
}

#[test]
fn test_seer_cannot_check_herself() {
    let state = setup_game(&[Role::Werewolf, Role::Seer, Role::Villager, Role::Villager]);

    let result = NightDeclaration::from_input(
        &state,
        NightInput {
            seer_target: Some(2),
            ..Default::default()
        },
    );
    assert_eq!(result.unwrap_err(), IntakeError::SelfTarget(2));
}

#[test]
fn test_action_without_a_living_holder_is_rejected() {
    let state = setup_game(&[Role::Werewolf, Role::Seer, Role::Villager, Role::Villager]);

    // 魔女はこのゲームに居ない
    let result = NightDeclaration::from_input(
        &state,
        NightInput {
            witch_poison_target: Some(3),
            ..Default::default()
        },
    );
    assert_eq!(result.unwrap_err(), IntakeError::MissingActor(Role::Witch));
}

#[test]
fn test_cupid_binds_on_the_second_night_only() {
    let mut state = setup_game(&[
        Role::Werewolf,
        Role::Cupid,
        Role::Villager,
        Role::Villager,
    ]);
    state.next_night(); // 3夜目

    let result = NightDeclaration::from_input(
        &state,
        NightInput {
            cupid_pair: Some((3, 4)),
            ..Default::default()
        },
    );
    assert_eq!(
        result.unwrap_err(),
        IntakeError::SecondNightOnly(Role::Cupid)
    );
}

#[test]
fn test_pair_must_name_two_players() {
    let state = setup_game(&[
        Role::Werewolf,
        Role::Cupid,
        Role::Villager,
        Role::Villager,
    ]);

    let result = NightDeclaration::from_input(
        &state,
        NightInput {
            cupid_pair: Some((3, 3)),
            ..Default::default()
        },
    );
    assert_eq!(result.unwrap_err(), IntakeError::PairNotDistinct);
}

#[test]
fn test_medium_may_only_read_the_dead() {
    let mut state = setup_game(&[
        Role::Werewolf,
        Role::Medium,
        Role::Villager,
        Role::Villager,
    ]);

    let result = NightDeclaration::from_input(
        &state,
        NightInput {
            medium_target: Some(3),
            ..Default::default()
        },
    );
    assert_eq!(result.unwrap_err(), IntakeError::TargetNotDead(3));

    state.player_mut(3).unwrap().is_alive = false;
    let result = NightDeclaration::from_input(
        &state,
        NightInput {
            medium_target: Some(3),
            ..Default::default()
        },
    );
    assert!(result.is_ok());
}

#[test]
fn test_sick_wolves_cannot_declare_an_attack() {
    let mut state = setup_game(&[Role::Werewolf, Role::Seer, Role::Villager, Role::Villager]);
    state.wolf_skip_next_night = true;

    let result = NightDeclaration::from_input(
        &state,
        NightInput {
            wolf_target: Some(3),
            ..Default::default()
        },
    );
    assert_eq!(result.unwrap_err(), IntakeError::WolvesSkipTonight);
}

#[test]
fn test_apprentice_may_use_the_seer_check() {
    let mut state = setup_game(&[
        Role::Werewolf,
        Role::Seer,
        Role::ApprenticeSeer,
        Role::Villager,
    ]);
    state.player_mut(2).unwrap().is_alive = false;

    let result = NightDeclaration::from_input(
        &state,
        NightInput {
            seer_target: Some(4),
            ..Default::default()
        },
    );
    assert!(result.is_ok(), "弟子が生きていれば占いは受け付ける");
}
