//! # hilo-engine: Higher/Lower Card Game Engine
//!
//! Session engine for a "higher or lower" game played on 6 to 10 parallel
//! lanes dealt from one shared 52-card pool. The engine is synchronous and
//! in-memory; authentication, persistence and routing belong to the caller.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card), ace-low values
//! - [`pool`] - The undealt cards, drawn uniformly with ChaCha20 RNG
//! - [`session`] - Game state machine: start, guess, probability, reset
//! - [`scoring`] - Difficulty and streak multipliers, victory bonus
//! - [`probability`] - Higher/lower/equal counts over the remaining pool
//! - [`record`] - History row produced when a game ends
//! - [`config`] - Engine configuration from file and environment
//! - [`logging`] - tracing subscriber setup and test capture
//! - [`errors`] - Error types for engine calls
//!
//! ## Quick Start
//!
//! ```rust
//! use hilo_engine::session::{Direction, GameSession, GuessOutcome};
//!
//! let mut session = GameSession::with_seed(2024);
//! session.start(8).unwrap();
//!
//! let odds = session.probability(0).unwrap();
//! assert_eq!(odds.total, 44);
//!
//! let dir = if odds.higher >= odds.lower { Direction::Higher } else { Direction::Lower };
//! let report = session.guess(0, dir, 0).unwrap();
//! assert!(matches!(report.outcome, GuessOutcome::Evaluated { .. }));
//! println!("{}", report.snapshot.message);
//! ```
//!
//! ## Tolerated Faults
//!
//! Guessing on an unknown or eliminated lane is not an error: the state comes
//! back unchanged with a message.
//!
//! ```rust
//! use hilo_engine::session::{Direction, GameSession, GuessOutcome};
//!
//! let mut session = GameSession::with_seed(1);
//! let before = session.start(6).unwrap();
//! let report = session.guess(42, Direction::Lower, 0).unwrap();
//! assert_eq!(report.outcome, GuessOutcome::InvalidLane);
//! assert_eq!(report.snapshot.lanes, before.lanes);
//! ```

pub mod cards;
pub mod config;
pub mod errors;
pub mod logging;
pub mod pool;
pub mod probability;
pub mod record;
pub mod scoring;
pub mod session;
