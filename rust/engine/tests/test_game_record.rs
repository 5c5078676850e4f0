mod helpers;

use std::fs;
use std::io::Write;

use hilo_engine::record::{format_game_id, GameRecord};
use hilo_engine::session::{GameSession, Phase};

use helpers::{first_active_lane, losing_direction, peek_next, top_of};

fn lose_game(session: &mut GameSession, streak: u32) {
    while session.phase() == Phase::InProgress {
        let state = session.current_state().unwrap();
        let lane = first_active_lane(&state).unwrap();
        let next = peek_next(session).unwrap();
        session
            .guess(lane, losing_direction(&top_of(&state, lane), &next), streak)
            .unwrap();
    }
}

#[test]
fn no_record_until_game_over() {
    let mut session = GameSession::with_seed(1);
    assert!(session.record().is_none());
    session.start(6).unwrap();
    assert!(session.record().is_none());
}

#[test]
fn record_carries_final_outcome() {
    let mut session = GameSession::with_seed(6);
    session.start(7).unwrap();
    lose_game(&mut session, 2);

    let state = session.current_state().unwrap();
    let rec = session.record().expect("record after game over");
    assert_eq!(rec.num_decks, 7);
    assert_eq!(rec.score, state.score);
    assert!(!rec.won);
    assert_eq!(rec.win_streak, 2);
    assert_eq!(rec.cards_drawn as usize, state.drawn);
    assert!(rec.duration_seconds.is_some());
    assert!(rec.played_at.ends_with('Z'));
}

#[test]
fn game_ids_are_sequential_per_session() {
    let mut session = GameSession::with_seed(6);
    session.start(6).unwrap();
    lose_game(&mut session, 0);
    let first = session.record().unwrap().game_id;
    session.start(6).unwrap();
    lose_game(&mut session, 0);
    let second = session.record().unwrap().game_id;

    assert!(first.ends_with("-000001"), "{first}");
    assert!(second.ends_with("-000002"), "{second}");
    assert_eq!(first.len(), "20260101-000001".len());
}

#[test]
fn format_game_id_pads_sequence() {
    assert_eq!(format_game_id("20251231", 1), "20251231-000001");
    assert_eq!(format_game_id("20251231", 123456), "20251231-123456");
}

#[test]
fn json_line_is_lf_terminated_and_parses_back() {
    let mut session = GameSession::with_seed(8);
    session.start(10).unwrap();
    lose_game(&mut session, 0);
    let rec = session.record().unwrap();

    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(rec.to_json_line().unwrap().as_bytes())
        .expect("write");
    let bytes = fs::read(file.path()).expect("read file");
    assert!(bytes.ends_with(b"\n"));
    assert!(!bytes.contains(&b'\r'));

    let text = String::from_utf8(bytes).unwrap();
    let back: GameRecord = serde_json::from_str(text.trim_end()).unwrap();
    assert_eq!(back, rec);
}

#[test]
fn duration_defaults_when_missing() {
    let json = r#"{"game_id":"20260101-000001","num_decks":6,"score":12,"won":false,
        "win_streak":0,"cards_drawn":12,"played_at":"2026-01-01T00:00:00Z"}"#;
    let rec: GameRecord = serde_json::from_str(json).unwrap();
    assert_eq!(rec.duration_seconds, None);
    assert_eq!(rec.score, 12);
}
