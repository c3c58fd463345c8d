use std::fs;

use face_invaders_core::{Event, ScoreEntry};
use face_invaders_storage::{save_changes, JsonFileStore, MemoryStore, ScoreStore};
use tempfile::tempdir;

fn rows() -> Vec<ScoreEntry> {
    vec![
        ScoreEntry::new("AAA", 1500),
        ScoreEntry::new("BOB", 900),
        ScoreEntry::new("ZED", 40),
    ]
}

#[test]
fn missing_file_loads_an_empty_table() {
    let dir = tempdir().expect("temp dir");
    let store = JsonFileStore::new(dir.path().join("scores.json"));

    assert!(store.load().entries().is_empty());
}

#[test]
fn saved_rows_are_written_as_pairs() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("nested").join("scores.json");
    let mut store = JsonFileStore::new(&path);

    store.save(&rows()).expect("save succeeds");

    let text = fs::read_to_string(&path).expect("file exists");
    assert_eq!(text, r#"[["AAA",1500],["BOB",900],["ZED",40]]"#);
    assert_eq!(store.load().entries(), rows().as_slice());
}

#[test]
fn corrupt_file_loads_an_empty_table() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("scores.json");
    fs::write(&path, "{ not json").expect("write fixture");

    let store = JsonFileStore::new(&path);

    assert!(store.load().entries().is_empty());
}

#[test]
fn loading_restores_order_and_capacity() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("scores.json");
    fs::write(
        &path,
        r#"[["low",1],["TOP",99],["MID",50],["AAA",40],["BBB",30],["CCC",20],["bad!",70]]"#,
    )
    .expect("write fixture");

    let board = JsonFileStore::new(&path).load();

    let initials: Vec<&str> = board
        .entries()
        .iter()
        .map(|row| row.initials.as_str())
        .collect();
    assert_eq!(initials, ["TOP", "MID", "AAA", "BBB", "CCC"]);
}

#[test]
fn leaderboard_events_are_persisted() {
    let mut store = MemoryStore::default();
    let events = vec![
        Event::FrameReady,
        Event::LeaderboardChanged(rows()),
        Event::ScoreChanged { score: 3 },
    ];

    let written = save_changes(&mut store, &events).expect("memory store never fails");

    assert_eq!(written, 1);
    assert_eq!(store.saves(), 1);
    assert_eq!(store.rows(), rows().as_slice());
    assert_eq!(store.load().entries(), rows().as_slice());
}

#[test]
fn save_errors_are_reported() {
    let dir = tempdir().expect("temp dir");
    // a directory cannot be overwritten by a file
    let mut store = JsonFileStore::new(dir.path());

    assert!(store.save(&rows()).is_err());
}
