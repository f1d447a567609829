use compliance_runner::events::GameEvent;
use compliance_runner::entities::{Difficulty, EnemyKind};
use compliance_runner::sound::*;

#[test]
fn every_cue_renders_bounded_samples() {
    for kind in SoundKind::ALL {
        let samples = synthesize(kind, 1.0);
        assert!(!samples.is_empty(), "{kind:?} is silent");
        assert!(samples.len() < SAMPLE_RATE as usize * 3, "{kind:?} is too long");
        assert!(samples.iter().all(|s| s.is_finite() && (-1.0..=1.0).contains(s)));
        assert!(samples.iter().any(|s| s.abs() > 0.01), "{kind:?} has no signal");
    }
}

#[test]
fn zero_volume_is_silent() {
    assert!(synthesize(SoundKind::Explode, 0.0).iter().all(|s| *s == 0.0));
}

#[test]
fn synthesis_is_deterministic() {
    assert_eq!(synthesize(SoundKind::Damage, 0.3), synthesize(SoundKind::Damage, 0.3));
}

#[test]
fn volume_scales_peak() {
    let peak = |v: f32| synthesize(SoundKind::Hit, v).iter().fold(0.0f32, |m, s| m.max(s.abs()));
    assert!(peak(0.5) > peak(0.2));
}

#[test]
fn engine_gates_on_enabled_and_volume() {
    let mut engine = SoundEngine::new(false, 0.5);
    engine.play(SoundKind::Shoot);
    assert_eq!(engine.played(), 0);

    engine.set_enabled(true);
    engine.play(SoundKind::Shoot);
    assert_eq!(engine.played(), 1);

    engine.set_volume(0.0);
    engine.play(SoundKind::Shoot);
    assert_eq!(engine.played(), 1);
}

#[test]
fn volume_is_sanitized() {
    let mut engine = SoundEngine::default();
    assert_eq!(engine.volume(), DEFAULT_VOLUME);
    engine.set_volume(3.0);
    assert_eq!(engine.volume(), 1.0);
    engine.set_volume(-1.0);
    assert_eq!(engine.volume(), 0.0);
    engine.set_volume(f32::NAN);
    assert_eq!(engine.volume(), DEFAULT_VOLUME);
    assert_eq!(SoundEngine::new(true, f32::INFINITY).volume(), DEFAULT_VOLUME);
}

#[test]
fn events_map_to_cues() {
    assert_eq!(GameEvent::Shot { bullets: 3 }.sound(), Some(SoundKind::Shoot));
    assert_eq!(
        GameEvent::EnemyKilled { id: 1, kind: EnemyKind::Boss, points: 500 }.sound(),
        Some(SoundKind::Victory)
    );
    assert_eq!(
        GameEvent::EnemyKilled { id: 1, kind: EnemyKind::Risk, points: 10 }.sound(),
        Some(SoundKind::Explode)
    );
    assert_eq!(GameEvent::RunStarted { difficulty: Difficulty::Easy }.sound(), None);
    assert_eq!(
        GameEvent::GameOver { score: 0, wave: 1, difficulty: Difficulty::Normal }.sound(),
        Some(SoundKind::GameOver)
    );
}
