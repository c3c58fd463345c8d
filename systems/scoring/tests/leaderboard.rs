use face_invaders_core::{BodySize, ScoreEntry};
use face_invaders_system_scoring::{
    ConfirmOutcome, InitialsEntry, Leaderboard, PointTable, Session,
};

fn full_board(score: u32) -> Leaderboard {
    let mut board = Leaderboard::default();
    for initials in ["AAA", "BBB", "CCC", "DDD", "EEE"] {
        board.commit(initials, score);
    }
    board
}

fn assert_ranked(board: &Leaderboard) {
    assert!(board.entries().len() <= 5);
    for pair in board.entries().windows(2) {
        assert!(pair[0].score >= pair[1].score, "table out of order: {pair:?}");
    }
}

#[test]
fn empty_and_partial_tables_accept_any_score() {
    let mut board = Leaderboard::default();
    assert!(board.is_high_score(0));
    board.commit("ABC", 300);
    assert!(board.is_high_score(0));
}

#[test]
fn full_table_rejects_lower_scores_and_accepts_higher_ones() {
    let mut board = full_board(1000);

    assert!(!board.is_high_score(500));
    assert!(!board.is_high_score(1000));
    assert!(board.is_high_score(1500));

    board.commit("XYZ", 1500);

    assert_eq!(board.entries().len(), 5);
    assert_eq!(board.entries()[0], ScoreEntry::new("XYZ", 1500));
    assert_ranked(&board);
}

#[test]
fn commits_keep_the_table_sorted_and_capped() {
    let mut board = Leaderboard::default();
    for (index, score) in [40, 900, 15, 900, 300, 70, 1200, 5].into_iter().enumerate() {
        board.commit(format!("P{index:02}"), score);
        assert_ranked(&board);
    }

    let scores: Vec<u32> = board.entries().iter().map(|row| row.score).collect();
    assert_eq!(scores, vec![1200, 900, 900, 300, 70]);
}

#[test]
fn ties_keep_insertion_order() {
    let mut board = Leaderboard::default();
    board.commit("OLD", 500);
    board.commit("NEW", 500);

    let names: Vec<&str> = board
        .entries()
        .iter()
        .map(|row| row.initials.as_str())
        .collect();
    assert_eq!(names, vec!["OLD", "NEW"]);
}

#[test]
fn stored_rows_are_reordered_and_truncated() {
    let rows = vec![
        ScoreEntry::new("AAA", 10),
        ScoreEntry::new("BBB", 60),
        ScoreEntry::new("CCC", 30),
        ScoreEntry::new("DDD", 50),
        ScoreEntry::new("EEE", 40),
        ScoreEntry::new("FFF", 20),
    ];
    let board = Leaderboard::from_entries(rows);

    let scores: Vec<u32> = board.entries().iter().map(|row| row.score).collect();
    assert_eq!(scores, vec![60, 50, 40, 30, 20]);
}

#[test]
fn initials_cycle_with_wraparound() {
    let mut entry = InitialsEntry::new();
    entry.decrement();
    assert_eq!(entry.text(), "Z__");
    entry.increment();
    assert_eq!(entry.text(), "A__");
    entry.decrement();
    entry.decrement();
    assert_eq!(entry.text(), "Y__");
}

#[test]
fn confirming_each_slot_completes_the_initials() {
    let mut entry = InitialsEntry::new();

    entry.increment();
    assert_eq!(entry.confirm(), ConfirmOutcome::Advanced);
    entry.increment();
    entry.increment();
    assert_eq!(entry.confirm(), ConfirmOutcome::Advanced);
    assert_eq!(entry.confirm(), ConfirmOutcome::Blank);
    entry.decrement();
    assert_eq!(entry.confirm(), ConfirmOutcome::Complete("ABZ".to_string()));
}

#[test]
fn confirmed_slots_stay_editable_after_moving_back() {
    let mut entry = InitialsEntry::new();
    entry.increment();
    let _ = entry.confirm();
    entry.increment();
    let _ = entry.confirm();

    entry.back();
    assert_eq!(entry.cursor(), 1);
    entry.increment();
    assert_eq!(entry.text(), "AB_");

    entry.back();
    entry.back();
    assert_eq!(entry.cursor(), 0);

    entry.rewind();
    assert_eq!(entry.cursor(), 0);
    assert_eq!(entry.text(), "AB_");
}

#[test]
fn session_accumulates_points_by_size() {
    let mut session = Session::new(PointTable::default());
    assert_eq!(session.award_hit(BodySize::Large), 20);
    assert_eq!(session.award_hit(BodySize::Medium), 50);
    assert_eq!(session.award_hit(BodySize::Small), 100);
    assert_eq!(session.score(), 170);
}
