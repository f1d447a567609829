use compliance_runner::entities::Difficulty;
use compliance_runner::scorecard::*;

#[test]
fn display_name_normalizes() {
    assert_eq!(display_name("  alice "), "ALICE");
    assert_eq!(display_name("   "), ANONYMOUS);
    assert_eq!(display_name(""), ANONYMOUS);
    assert_eq!(display_name("abcdefghijklmnopqrstuvwxyz"), "ABCDEFGHIJKLMNOP");
}

#[test]
fn file_name_carries_score_and_wave() {
    assert_eq!(scorecard_file_name(4200, 7), "compliance-runner-4200-wave7.png");
    let card = Scorecard::new("bob", 10, 1, Difficulty::Easy);
    assert_eq!(card.file_name(), "compliance-runner-10-wave1.png");
    assert_eq!(card.name, "BOB");
    assert!(!card.new_high_score);
}

#[test]
fn render_has_card_dimensions() {
    let img = render_scorecard("alice", 1234, 5, Difficulty::Hard);
    assert_eq!(img.dimensions(), (CARD_WIDTH, CARD_HEIGHT));
    // Fully opaque everywhere.
    assert!(img.pixels().all(|p| p.0[3] == 255));
}

#[test]
fn render_is_deterministic_and_content_dependent() {
    let a = render_scorecard("alice", 1234, 5, Difficulty::Hard);
    let b = render_scorecard("alice", 1234, 5, Difficulty::Hard);
    let c = render_scorecard("alice", 1235, 5, Difficulty::Hard);
    assert!(a == b);
    assert!(a != c);
}

#[test]
fn high_score_banner_changes_the_card() {
    let mut card = Scorecard::new("alice", 900, 4, Difficulty::Normal);
    let plain = render(&card);
    card.new_high_score = true;
    assert!(render(&card) != plain);
}

#[test]
fn text_width_counts_glyph_gaps() {
    assert_eq!(text_width("", 2), 0);
    assert_eq!(text_width("A", 1), 5);
    assert_eq!(text_width("AB", 1), 11);
    assert_eq!(text_width("AB", 3), 33);
}

#[test]
fn export_writes_png() {
    let dir = tempfile::tempdir().unwrap();
    let card = Scorecard::new("", 4200, 7, Difficulty::Normal);
    let path = export_scorecard(&dir.path().join("cards"), &card).unwrap();
    assert_eq!(path.file_name().unwrap(), "compliance-runner-4200-wave7.png");
    assert_eq!(image::image_dimensions(&path).unwrap(), (CARD_WIDTH, CARD_HEIGHT));
}

#[test]
fn export_to_unwritable_dir_fails_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "file").unwrap();
    let card = Scorecard::new("x", 1, 1, Difficulty::Easy);
    assert!(matches!(export_scorecard(&blocker, &card), Err(ScorecardError::Io { .. })));
}
