use std::path::PathBuf;

use cricket_terminal::crud;
use cricket_terminal::db::Database;
use cricket_terminal::ingest::{IngestOutcome, SkipReason, load_sample_players};

fn fixture(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    path
}

fn temp_db() -> (tempfile::TempDir, Database) {
    let dir = tempfile::tempdir().expect("tempdir");
    let db = Database::open(dir.path().join("cricket.db")).expect("open db");
    (dir, db)
}

fn names(db: &Database) -> Vec<(String, String)> {
    let mut rows = crud::recent_players(db)
        .expect("players")
        .into_iter()
        .map(|p| (p.first_name.unwrap_or_default(), p.last_name.unwrap_or_default()))
        .collect::<Vec<_>>();
    rows.reverse();
    rows
}

#[test]
fn sample_csv_is_normalized_and_deduplicated() {
    let (_dir, db) = temp_db();
    let outcome = load_sample_players(&db, &fixture("bat.csv"));

    let IngestOutcome::Loaded(report) = &outcome else {
        panic!("expected loaded outcome, got {outcome:?}");
    };
    assert_eq!(report.rows_read, 6);
    assert_eq!(report.duplicates_dropped, 1);
    assert_eq!(report.rows_inserted, 5);
    assert_eq!(
        report.columns,
        vec!["first_name", "last_name", "country", "playing_role"]
    );

    assert_eq!(
        names(&db),
        vec![
            ("Virat".to_string(), "Kohli".to_string()),
            ("Kohli".to_string(), String::new()),
            ("MS".to_string(), "Dhoni".to_string()),
            ("Joe".to_string(), "Root".to_string()),
            ("AB".to_string(), "de Villiers".to_string()),
        ]
    );
}

#[test]
fn optional_columns_map_and_blank_cells_are_null() {
    let (_dir, db) = temp_db();
    load_sample_players(&db, &fixture("bat.csv"));

    let players = crud::recent_players(&db).expect("players");
    let root = players
        .iter()
        .find(|p| p.first_name.as_deref() == Some("Joe"))
        .expect("root row");
    assert_eq!(root.country.as_deref(), Some("England"));
    assert_eq!(root.playing_role, None);
    assert_eq!(root.batting_style, None);

    let kohli = players
        .iter()
        .find(|p| p.first_name.as_deref() == Some("Virat"))
        .expect("kohli row");
    // First occurrence wins over the later duplicate.
    assert_eq!(kohli.playing_role.as_deref(), Some("Batsman"));
}

#[test]
fn missing_file_is_skipped() {
    let (dir, db) = temp_db();
    let path = dir.path().join("absent.csv");
    let outcome = load_sample_players(&db, &path);
    assert_eq!(outcome, IngestOutcome::Skipped(SkipReason::FileMissing(path)));
    assert!(names(&db).is_empty());
}

#[test]
fn directory_at_csv_path_is_not_reported_missing() {
    let (dir, db) = temp_db();
    let path = dir.path().join("bat.csv");
    std::fs::create_dir(&path).expect("mkdir");

    let outcome = load_sample_players(&db, &path);
    let IngestOutcome::Failed { reason, .. } = &outcome else {
        panic!("expected failure, got {outcome:?}");
    };
    assert_eq!(reason, "not a regular file");
    assert!(!outcome.to_string().contains("not found"));
}

#[test]
fn invalid_utf8_row_fails_without_inserting() {
    let (dir, db) = temp_db();
    let csv = dir.path().join("players.csv");
    let mut bytes = b"player,country\nShubman Gill,India\n".to_vec();
    bytes.extend_from_slice(b"Rohit \xff\xfe,India\n");
    std::fs::write(&csv, bytes).expect("write csv");

    let outcome = load_sample_players(&db, &csv);
    let IngestOutcome::Failed { reason, .. } = &outcome else {
        panic!("expected failure, got {outcome:?}");
    };
    assert!(reason.contains("invalid utf-8"), "reason was {reason}");
    assert_eq!(outcome.rows_inserted(), 0);
    assert!(names(&db).is_empty());
}

#[test]
fn csv_without_name_column_inserts_nothing() {
    let (_dir, db) = temp_db();
    let outcome = load_sample_players(&db, &fixture("no_name.csv"));
    assert!(matches!(
        outcome,
        IngestOutcome::Skipped(SkipReason::NoNameColumn(_))
    ));
    assert_eq!(outcome.rows_inserted(), 0);
    assert!(names(&db).is_empty());
}

#[test]
fn database_failure_is_reported_not_raised() {
    let (dir, db) = temp_db();
    let csv = dir.path().join("players.csv");
    std::fs::write(&csv, "name\nShubman Gill\n").expect("write csv");

    let conn = db.connect().expect("connect");
    conn.execute_batch("DROP TABLE players").expect("drop players");
    drop(conn);

    let outcome = load_sample_players(&db, &csv);
    let IngestOutcome::Failed { reason, .. } = &outcome else {
        panic!("expected failure, got {outcome:?}");
    };
    assert!(reason.contains("no such table"), "reason was {reason}");
}

#[test]
fn player_name_header_is_accepted() {
    let (dir, db) = temp_db();
    let csv = dir.path().join("players.csv");
    std::fs::write(&csv, "PLAYER_NAME,playing_role\nRashid Khan,Bowler\n").expect("write csv");

    let outcome = load_sample_players(&db, &csv);
    assert_eq!(outcome.rows_inserted(), 1);
    let players = crud::recent_players(&db).expect("players");
    assert_eq!(players[0].first_name.as_deref(), Some("Rashid"));
    assert_eq!(players[0].playing_role.as_deref(), Some("Bowler"));
    assert_eq!(players[0].country, None);
}
