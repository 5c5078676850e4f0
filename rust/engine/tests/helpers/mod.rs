#![allow(dead_code)]

use hilo_engine::cards::Card;
use hilo_engine::session::{Direction, GameSession, GameSnapshot, Lane};

/// The card the next guess will draw. Seeded sessions clone their RNG, so a
/// guess on a copy reveals the draw without touching the real session.
pub fn peek_next(session: &GameSession) -> Option<Card> {
    let state = session.current_state()?;
    let lane = first_active_lane(&state)?;
    session
        .clone()
        .guess(lane, Direction::Higher, 0)
        .ok()?
        .drawn_card
}

pub fn first_active_lane(state: &GameSnapshot) -> Option<usize> {
    state.lanes.iter().position(|l| l.is_active())
}

pub fn top_of(state: &GameSnapshot, lane: usize) -> Card {
    match state.lanes[lane] {
        Lane::Active(card) => card,
        Lane::Eliminated => panic!("lane {lane} is eliminated"),
    }
}

/// A direction that wins against `next` (ties win either way).
pub fn winning_direction(top: &Card, next: &Card) -> Direction {
    if next.value() < top.value() {
        Direction::Lower
    } else {
        Direction::Higher
    }
}

/// A direction that loses against `next` unless the values tie.
pub fn losing_direction(top: &Card, next: &Card) -> Direction {
    if next.value() < top.value() {
        Direction::Higher
    } else {
        Direction::Lower
    }
}

pub fn assert_pool_invariant(session: &GameSession) {
    let pool = session.pool();
    assert_eq!(pool.size() + pool.drawn(), 52);
    if let Some(state) = session.current_state() {
        assert_eq!(state.remaining + state.drawn, 52);
        assert_eq!(state.remaining, pool.size());
    }
}
