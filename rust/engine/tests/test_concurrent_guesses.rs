use std::sync::{Arc, Mutex};
use std::thread;

use hilo_engine::session::{Direction, GameSession, Phase};

#[test]
fn session_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GameSession>();
}

#[test]
fn guesses_serialized_by_a_session_lock_keep_invariants() {
    let session = Arc::new(Mutex::new(GameSession::with_seed(4242)));
    session.lock().unwrap().start(10).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let session = Arc::clone(&session);
            thread::spawn(move || {
                let dir = if t % 2 == 0 {
                    Direction::Higher
                } else {
                    Direction::Lower
                };
                for i in 0..25 {
                    let mut guard = session.lock().unwrap();
                    if guard.phase() != Phase::InProgress {
                        break;
                    }
                    let lane = (t * 3 + i) % 10;
                    let report = guard.guess(lane, dir, 0).unwrap();
                    let pool = guard.pool();
                    assert_eq!(pool.size() + pool.drawn(), 52);
                    assert_eq!(report.snapshot.remaining, pool.size());
                }
            })
        })
        .collect();

    for h in handles {
        h.join().expect("worker panicked");
    }

    let guard = session.lock().unwrap();
    let state = guard.current_state().unwrap();
    assert_eq!(state.remaining + state.drawn, 52);
    assert!(state.drawn >= 10);
}
