use compliance_runner::entities::*;
use compliance_runner::tuning::{PLAYER_START_X, PLAYER_Y, STARTING_LIVES};

#[test]
fn entity_clone_and_eq() {
    // Enums derive PartialEq, so equality comparisons must work
    assert_eq!(EnemyKind::Risk, EnemyKind::Risk);
    assert_ne!(EnemyKind::Risk, EnemyKind::Threat);
    assert_eq!(GameStatus::Playing, GameStatus::Playing);
    assert_ne!(GameStatus::Playing, GameStatus::GameOver);
    assert_ne!(PowerUpKind::Shield, PowerUpKind::MultiShot);

    let kind = EnemyKind::Vulnerability;
    assert_eq!(kind.clone(), EnemyKind::Vulnerability);
}

#[test]
fn default_run_state_is_idle() {
    let s = RunState::default();
    assert_eq!(s.status, GameStatus::Idle);
    assert_eq!(s.menu, MenuState { screen: MenuScreen::Main, cursor: 0 });
    assert_eq!(s.lives, STARTING_LIVES);
    assert_eq!(s.wave, 1);
    assert_eq!(s.player.x, PLAYER_START_X);
    assert_eq!(s.player.y, PLAYER_Y);
    assert!(s.schedule.is_empty());
    assert!(!s.reward_wave_active());
}

#[test]
fn run_state_clone_is_independent() {
    let original = RunState::default();
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.player.x = 99.0;
    cloned.score = 999;
    cloned.bullets.push(Bullet { id: 0, x: 1.0, y: 2.0, angle: 0.0 });

    assert_eq!(original.player.x, PLAYER_START_X);
    assert_eq!(original.score, 0);
    assert!(original.bullets.is_empty());
}

#[test]
fn difficulty_lookups_fall_back_to_normal() {
    assert_eq!(Difficulty::from_index(0), Difficulty::Easy);
    assert_eq!(Difficulty::from_index(2), Difficulty::Hard);
    assert_eq!(Difficulty::from_index(17), Difficulty::Normal);
    assert_eq!(Difficulty::from_name(" HARD "), Difficulty::Hard);
    assert_eq!(Difficulty::from_name("nightmare"), Difficulty::Normal);
    assert_eq!(Difficulty::default(), Difficulty::Normal);
    for d in Difficulty::ALL {
        assert_eq!(Difficulty::from_index(d.index()), d);
        assert_eq!(Difficulty::from_name(d.key()), d);
    }
}

#[test]
fn power_stacks_are_addressed_by_kind() {
    let mut powers = Powers::default();
    powers.get_mut(PowerUpKind::RapidFire).level = 3;
    assert_eq!(powers.rapid.level, 3);
    assert_eq!(powers.get(PowerUpKind::RapidFire).level, 3);
    assert_eq!(powers.get(PowerUpKind::Shield).level, 0);
}

#[test]
fn id_counters_are_monotonic() {
    let mut ids = IdCounters::default();
    assert_eq!(ids.next_enemy(), 0);
    assert_eq!(ids.next_enemy(), 1);
    assert_eq!(ids.next_bullet(), 0);
    assert_eq!(ids.next_enemy(), 2);
}

#[test]
fn invincibility_window_is_half_open() {
    let s = RunState { invincible_until: 1_500, ..RunState::default() };
    assert!(s.is_invincible(1_499));
    assert!(!s.is_invincible(1_500));
}
