use compliance_runner::entities::{Difficulty, EnemyKind};
use compliance_runner::tuning::*;

#[test]
fn score_ordering() {
    assert!(score_for(EnemyKind::Boss) > score_for(EnemyKind::Threat));
    assert!(score_for(EnemyKind::Threat) > score_for(EnemyKind::Vulnerability));
    assert!(score_for(EnemyKind::Vulnerability) > score_for(EnemyKind::Risk));
}

#[test]
fn wave_bonus_scales_with_wave() {
    assert_eq!(wave_clear_bonus(1), 100);
    assert_eq!(wave_clear_bonus(7), 700);
}

#[test]
fn enemy_health_never_below_one() {
    for d in Difficulty::ALL {
        for kind in [EnemyKind::Risk, EnemyKind::Vulnerability, EnemyKind::Threat] {
            assert!(enemy_health(kind, d) >= 1);
        }
    }
    assert_eq!(enemy_health(EnemyKind::Threat, Difficulty::Normal), 2);
    assert_eq!(enemy_health(EnemyKind::Threat, Difficulty::Hard), 3);
    assert_eq!(enemy_health(EnemyKind::Risk, Difficulty::Easy), 1);
}

#[test]
fn boss_health_formula() {
    assert_eq!(boss_health(5, Difficulty::Normal, None), 30);
    assert_eq!(boss_health(10, Difficulty::Easy, None), 36); // 45 × 0.8
    assert_eq!(boss_health(9, Difficulty::Hard, Some(boss_rush_health(9))), 42); // 28 × 1.5
    assert_eq!(boss_rush_health(13), 36);
}

#[test]
fn fire_rates_strictly_decrease() {
    for w in RAPID_FIRE_RATES.windows(2) {
        assert!(w[0] > w[1]);
    }
    assert_eq!(fire_cooldown_ms(0), 200);
    assert_eq!(fire_cooldown_ms(200), 50); // clamped to level 5
}

#[test]
fn difficulty_scales_speed_and_duration() {
    assert!(enemy_speed(3, Difficulty::Hard) > enemy_speed(3, Difficulty::Normal));
    assert!(enemy_speed(3, Difficulty::Normal) > enemy_speed(3, Difficulty::Easy));
    assert!(boss_speed(5, Difficulty::Normal) > enemy_speed(5, Difficulty::Normal));
    assert_eq!(power_up_duration_ms(Difficulty::Normal), 8_000);
    assert_eq!(power_up_duration_ms(Difficulty::Easy), 10_400);
    assert_eq!(power_up_duration_ms(Difficulty::Hard), 5_600);
}

#[test]
fn drop_chances() {
    assert_eq!(power_up_drop_chance(EnemyKind::Boss), 1.0);
    assert!(power_up_drop_chance(EnemyKind::Threat) < 1.0);
    assert!(enemy_finding_chance(10, Difficulty::Normal) > enemy_finding_chance(1, Difficulty::Normal));
    assert!(boss_finding_chance(5, Difficulty::Normal) > enemy_finding_chance(5, Difficulty::Normal));
}
