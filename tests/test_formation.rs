use compliance_runner::entities::{EnemyKind, MovePattern, WaveModifier};
use compliance_runner::formation::*;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

proptest! {
    #[test]
    fn counts_are_monotonic_and_capped(wave in 1u32..500) {
        for archetype in Archetype::ALL {
            let now = archetype.count(wave);
            let next = archetype.count(wave + 1);
            prop_assert!(next >= now);
            prop_assert!(next <= archetype.cap());
            prop_assert_eq!(formation_for(archetype, wave).len(), now);
        }
    }
}

#[test]
fn wave_one_counts() {
    assert_eq!(Archetype::VShape.count(1), 3);
    assert_eq!(Archetype::Wave.count(1), 4);
    assert_eq!(Archetype::Ring.count(1), 4);
    assert_eq!(Archetype::Zigzag.count(1), 2);
    assert_eq!(Archetype::Wave.count(50), 10);
}

#[test]
fn v_shape_puts_threat_at_the_point() {
    let f = formation_for(Archetype::VShape, 8); // 7 enemies
    assert_eq!(f.len(), 7);
    assert_eq!(f.slots[3].kind, EnemyKind::Threat);
    for (i, slot) in f.slots.iter().enumerate() {
        if i != 3 {
            assert_eq!(slot.kind, EnemyKind::Risk, "slot {i}");
        }
    }
    assert!(f.slots[3].y > f.slots[0].y); // the point leads
    assert!(f.slots.iter().all(|s| s.pattern == MovePattern::Swoop));
}

#[test]
fn smallest_v_is_risk_threat_risk() {
    let kinds: Vec<EnemyKind> = formation_for(Archetype::VShape, 1).slots.iter().map(|s| s.kind).collect();
    assert_eq!(kinds, vec![EnemyKind::Risk, EnemyKind::Threat, EnemyKind::Risk]);
}

#[test]
fn archetype_patterns() {
    assert!(formation_for(Archetype::Wave, 3).slots.iter().all(|s| s.pattern == MovePattern::Dive));
    assert!(formation_for(Archetype::Ring, 3).slots.iter().all(|s| s.pattern == MovePattern::Circle));
    let zig = formation_for(Archetype::Zigzag, 3);
    assert!(zig.slots.iter().all(|s| s.pattern == MovePattern::Zigzag && s.kind == EnemyKind::Threat));
}

#[test]
fn formations_spawn_above_the_field() {
    for archetype in Archetype::ALL {
        for slot in formation_for(archetype, 12).slots {
            assert!(slot.y < 0.0, "{} slot starts on screen", archetype.name());
        }
    }
}

#[test]
fn create_formation_is_seed_deterministic() {
    let a = create_formation(4, &mut seeded_rng());
    let b = create_formation(4, &mut seeded_rng());
    assert_eq!(a, b);
    assert_eq!(a.len(), a.archetype.count(4));
}

#[test]
fn mission_catalog_shape() {
    let stage_counts: Vec<usize> = MISSIONS.iter().map(|m| m.stages.len()).collect();
    assert_eq!(stage_counts, vec![5, 8, 10]);
    let bosses: Vec<Option<u32>> = MISSIONS.iter().map(|m| m.stages.last().and_then(|s| s.boss_health)).collect();
    assert_eq!(bosses, vec![Some(30), Some(45), Some(60)]);
    for mission in &MISSIONS {
        let regular = &mission.stages[..mission.stages.len() - 1];
        assert!(regular.iter().all(|s| !s.is_boss() && s.enemy_count() > 0));
    }
}

#[test]
fn mission_slots_use_rows_of_eight() {
    assert_eq!(mission_slot_position(0), (60.0, -50.0));
    let (x7, y7) = mission_slot_position(7);
    let (x8, y8) = mission_slot_position(8);
    assert!(x7 > 60.0);
    assert_eq!(y7, -50.0);
    assert_eq!(x8, 60.0);
    assert_eq!(y8, -95.0);
}

#[test]
fn early_and_boss_waves_have_no_modifier() {
    let mut rng = seeded_rng();
    for wave in [1, 2, 5, 10, 15] {
        let pick = pick_wave_modifier(wave, &mut rng);
        assert_eq!(pick.modifier, None, "wave {wave}");
        assert!(pick.label.is_empty());
    }
}

#[test]
fn modifier_cycle() {
    let mut rng = seeded_rng();
    assert_eq!(pick_wave_modifier(3, &mut rng).modifier, Some(WaveModifier::ShadowAudit));
    assert_eq!(pick_wave_modifier(6, &mut rng).modifier, None); // boss rush only past wave 8
    assert_eq!(pick_wave_modifier(13, &mut rng).modifier, Some(WaveModifier::BossRush));

    let mission = pick_wave_modifier(12, &mut rng);
    assert_eq!(mission.modifier, Some(WaveModifier::MissionStage));
    let stage = mission.stage.expect("mission waves carry a stage");
    assert!(!stage.is_boss());
    assert!(mission.label.ends_with(stage.name));
}
