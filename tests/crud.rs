use chrono::NaiveDate;

use cricket_terminal::crud::{
    self, MatchStatus, MatchType, NewMatch, NewPlayer, RECENT_ROW_LIMIT,
};
use cricket_terminal::db::Database;
use cricket_terminal::state::{FormError, MatchForm, PlayerForm};
use cricket_terminal::table::Cell;

fn temp_db() -> (tempfile::TempDir, Database) {
    let dir = tempfile::tempdir().expect("tempdir");
    let db = Database::open(dir.path().join("cricket.db")).expect("open db");
    (dir, db)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[test]
fn new_player_is_at_head_of_recent_list() {
    let (_dir, db) = temp_db();
    for name in ["Shikhar", "Rishabh"] {
        crud::insert_player(
            &db,
            &NewPlayer {
                first_name: name.to_string(),
                ..NewPlayer::default()
            },
        )
        .expect("insert");
    }
    let id = crud::insert_player(
        &db,
        &NewPlayer {
            first_name: "Ravindra".to_string(),
            last_name: "Jadeja".to_string(),
            country: "India".to_string(),
            playing_role: "All-rounder".to_string(),
            batting_style: "Left-hand bat".to_string(),
            bowling_style: "Slow left-arm orthodox".to_string(),
        },
    )
    .expect("insert");

    let players = crud::recent_players(&db).expect("players");
    assert_eq!(players.len(), 3);
    assert_eq!(players[0].id, id);
    assert_eq!(players[0].bowling_style.as_deref(), Some("Slow left-arm orthodox"));
    assert!(players.windows(2).all(|w| w[0].id > w[1].id));
}

#[test]
fn empty_fields_and_duplicates_are_accepted() {
    let (_dir, db) = temp_db();
    let blank = NewPlayer::default();
    let first = crud::insert_player(&db, &blank).expect("insert blank");
    let second = crud::insert_player(&db, &blank).expect("insert duplicate");
    assert_ne!(first, second);

    let players = crud::recent_players(&db).expect("players");
    assert_eq!(players.len(), 2);
    assert_eq!(players[0].first_name.as_deref(), Some(""));
}

#[test]
fn recent_matches_is_capped_at_newest_500() {
    let (_dir, db) = temp_db();
    let total = RECENT_ROW_LIMIT + 12;
    let mut ids = Vec::with_capacity(total);
    for n in 0..total {
        let id = crud::insert_match(
            &db,
            &NewMatch {
                description: format!("Match {n}"),
                team1_id: 1,
                team2_id: 2,
                venue_id: 1,
                match_date: date(2024, 1, 1),
                match_type: MatchType::T20i,
                status: MatchStatus::Scheduled,
            },
        )
        .expect("insert match");
        ids.push(id);
    }

    let matches = crud::recent_matches(&db).expect("matches");
    assert_eq!(matches.len(), RECENT_ROW_LIMIT);
    let expected = ids.iter().rev().take(RECENT_ROW_LIMIT).copied().collect::<Vec<_>>();
    assert_eq!(matches.iter().map(|m| m.id).collect::<Vec<_>>(), expected);
    assert_eq!(
        matches[0].description.as_deref(),
        Some(format!("Match {}", total - 1).as_str())
    );
}

#[test]
fn match_outcome_fields_stay_null() {
    let (_dir, db) = temp_db();
    crud::insert_match(
        &db,
        &NewMatch {
            description: "India vs Pakistan".to_string(),
            team1_id: 3,
            team2_id: 7,
            venue_id: 42,
            match_date: date(2025, 2, 23),
            match_type: MatchType::Odi,
            status: MatchStatus::InProgress,
        },
    )
    .expect("insert");

    let matches = crud::recent_matches(&db).expect("matches");
    let m = &matches[0];
    assert_eq!(m.match_date.as_deref(), Some("2025-02-23"));
    assert_eq!(m.match_type.as_deref(), Some("ODI"));
    assert_eq!(m.status.as_deref(), Some("in_progress"));
    assert_eq!(m.venue_id, Some(42));
    assert_eq!(m.winning_team_id, None);
    assert_eq!(m.win_margin, None);
    assert_eq!(m.win_type, None);
    assert_eq!(m.toss_winner_id, None);
    assert_eq!(m.toss_decision, None);

    let table = crud::matches_table(&matches);
    assert_eq!(table.cell(0, "toss_decision"), Some(&Cell::Null));
    assert_eq!(table.cell(0, "team2_id"), Some(&Cell::Integer(7)));
}

#[test]
fn match_form_defaults_and_cycles() {
    let mut form = MatchForm::new(date(2026, 10, 19));
    let new_match = form.to_new_match().expect("defaults are valid");
    assert_eq!(new_match.team1_id, 1);
    assert_eq!(new_match.team2_id, 2);
    assert_eq!(new_match.venue_id, 1);
    assert_eq!(new_match.match_date, date(2026, 10, 19));
    assert_eq!(new_match.match_type, MatchType::Test);
    assert_eq!(new_match.status, MatchStatus::Scheduled);

    form.focus = 5;
    form.input_char('x');
    form.focus_next();
    form.cycle_choice();
    form.cycle_choice();
    let new_match = form.to_new_match().expect("valid");
    assert_eq!(new_match.match_type, MatchType::Odi);
    assert_eq!(new_match.status, MatchStatus::Completed);
}

#[test]
fn match_form_rejects_bad_ids_and_dates() {
    let mut form = MatchForm::new(date(2026, 10, 19));
    form.team1_id = "0".to_string();
    assert!(matches!(
        form.to_new_match(),
        Err(FormError::InvalidId { field: "Team 1 ID", .. })
    ));

    form.team1_id = "4".to_string();
    form.venue_id = "lords".to_string();
    assert!(matches!(
        form.to_new_match(),
        Err(FormError::InvalidId { field: "Venue ID", .. })
    ));

    form.venue_id = "9".to_string();
    form.match_date = "19/10/2026".to_string();
    assert_eq!(
        form.to_new_match(),
        Err(FormError::InvalidDate("19/10/2026".to_string()))
    );
}

#[test]
fn player_form_typing_fills_fields_in_order() {
    let mut form = PlayerForm::default();
    for c in "Babar".chars() {
        form.input_char(c);
    }
    form.focus_next();
    for c in "Azamx".chars() {
        form.input_char(c);
    }
    form.backspace();
    form.focus_prev();
    form.focus_prev();
    form.input_char('?');

    let player = form.to_new_player();
    assert_eq!(player.first_name, "Babar");
    assert_eq!(player.last_name, "Azam");
    assert_eq!(player.bowling_style, "?");
    assert_eq!(player.country, "");
}
