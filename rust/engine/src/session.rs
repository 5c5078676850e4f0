use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::config::EngineConfig;
use crate::errors::GameError;
use crate::pool::{CardPool, DECK_SIZE};
use crate::probability::{self, ProbabilitySnapshot};
use crate::record::{format_game_id, GameRecord};
use crate::scoring;

/// Fewest lanes a game may be started with.
pub const MIN_DECKS: u32 = 6;
/// Most lanes a game may be started with.
pub const MAX_DECKS: u32 = 10;

/// The player's call for the next card relative to a lane's top card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Higher,
    Lower,
}

impl FromStr for Direction {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "h" | "high" | "higher" => Ok(Direction::Higher),
            "l" | "low" | "lower" => Ok(Direction::Lower),
            _ => Err(GameError::InvalidDirection(s.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Higher => f.write_str("higher"),
            Direction::Lower => f.write_str("lower"),
        }
    }
}

/// One guessing position. A lane shows its top card until a wrong guess
/// eliminates it; eliminated lanes stay in place for the rest of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "card", rename_all = "snake_case")]
pub enum Lane {
    Active(Card),
    Eliminated,
}

impl Lane {
    pub fn top_card(&self) -> Option<&Card> {
        match self {
            Lane::Active(card) => Some(card),
            Lane::Eliminated => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Lane::Active(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
    NotStarted,
    InProgress,
    Over { won: bool },
}

/// What a single `guess` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GuessOutcome {
    /// Lane index outside the game; nothing changed
    InvalidLane,
    /// Lane was already eliminated; nothing changed
    LaneEliminated,
    /// A card was drawn and compared against the lane's top card
    Evaluated { correct: bool },
    /// The pool had no card left to draw; the game is won
    PoolExhausted,
}

impl GuessOutcome {
    pub fn is_correct(&self) -> bool {
        matches!(self, GuessOutcome::Evaluated { correct: true })
    }
}

/// Read-only view of a running or finished game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub num_decks: u32,
    pub lanes: Vec<Lane>,
    pub score: u32,
    pub phase: Phase,
    /// Cards still in the pool
    pub remaining: usize,
    /// Cards taken from the pool so far, lane deals included
    pub drawn: usize,
    pub message: String,
}

impl GameSnapshot {
    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::Over { .. })
    }

    pub fn won(&self) -> bool {
        matches!(self.phase, Phase::Over { won: true })
    }

    pub fn active_lanes(&self) -> usize {
        self.lanes.iter().filter(|l| l.is_active()).count()
    }
}

/// Result of a `guess`: the outcome, the card drawn (if any) and the new state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessReport {
    pub outcome: GuessOutcome,
    pub drawn_card: Option<Card>,
    pub snapshot: GameSnapshot,
}

#[derive(Debug, Clone)]
struct Game {
    id: String,
    num_decks: u32,
    lanes: Vec<Lane>,
    score: u32,
    phase: Phase,
    message: String,
    /// Streak supplied with the most recent guess
    win_streak: u32,
    started_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
}

/// The higher/lower game state machine for one player.
///
/// A session owns its card pool and lanes. It does no locking of its own:
/// callers sharing a session across threads hold one lock per session for
/// the duration of each call.
///
/// # Examples
///
/// ```
/// use hilo_engine::session::{Direction, GameSession, Phase};
///
/// let mut session = GameSession::with_seed(42);
/// let state = session.start(6).unwrap();
/// assert_eq!(state.lanes.len(), 6);
/// assert_eq!(state.remaining, 46);
///
/// let report = session.guess(0, Direction::Higher, 0).unwrap();
/// assert!(report.drawn_card.is_some());
/// assert_eq!(report.snapshot.remaining, 45);
///
/// session.reset();
/// assert_eq!(session.phase(), Phase::NotStarted);
/// assert!(session.current_state().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    pool: CardPool,
    game: Option<Game>,
    /// Games started on this session, used for record ids
    games_started: u32,
}

impl GameSession {
    /// Session whose pool is seeded from entropy.
    pub fn new() -> Self {
        Self::with_pool(CardPool::new())
    }

    /// Session with a reproducible draw sequence.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_pool(CardPool::new_with_seed(seed))
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        match config.seed {
            Some(seed) => Self::with_seed(seed),
            None => Self::new(),
        }
    }

    fn with_pool(pool: CardPool) -> Self {
        Self {
            pool,
            game: None,
            games_started: 0,
        }
    }

    /// Starts a fresh game with `num_decks` lanes, replacing any current game.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidDeckCount`] when `num_decks` is outside `6..=10`.
    pub fn start(&mut self, num_decks: u32) -> Result<GameSnapshot, GameError> {
        if !(MIN_DECKS..=MAX_DECKS).contains(&num_decks) {
            tracing::warn!(num_decks, "rejected start with invalid deck count");
            return Err(GameError::InvalidDeckCount {
                requested: num_decks,
            });
        }

        self.pool.reset();
        let lanes: Vec<Lane> = (0..num_decks)
            .map_while(|_| self.pool.draw().map(Lane::Active))
            .collect();

        self.games_started += 1;
        let started_at = Utc::now();
        let game = Game {
            id: format_game_id(&started_at.format("%Y%m%d").to_string(), self.games_started),
            num_decks,
            lanes,
            score: 0,
            phase: Phase::InProgress,
            message: "Game started! Choose a lane and guess higher or lower.".to_string(),
            win_streak: 0,
            started_at,
            finished_at: None,
        };

        tracing::info!(
            game_id = %game.id,
            num_decks,
            remaining = self.pool.size(),
            "game started"
        );

        let snapshot = snapshot_of(&game, &self.pool);
        self.game = Some(game);
        Ok(snapshot)
    }

    /// Draws the next card for `lane` and scores the guess.
    ///
    /// An unknown lane or an eliminated lane leaves the game untouched and
    /// reports it through [`GuessOutcome`]. A drawn card equal in value to the
    /// lane's top card counts as correct in either direction.
    ///
    /// # Errors
    ///
    /// [`GameError::NoGameInProgress`] before `start`, and
    /// [`GameError::GameAlreadyOver`] once the game has ended.
    pub fn guess(
        &mut self,
        lane: usize,
        direction: Direction,
        win_streak: u32,
    ) -> Result<GuessReport, GameError> {
        let game = self.game.as_mut().ok_or(GameError::NoGameInProgress)?;
        if let Phase::Over { .. } = game.phase {
            return Err(GameError::GameAlreadyOver);
        }

        let Some(top) = game.lanes.get(lane).copied() else {
            tracing::warn!(lane, lanes = game.lanes.len(), "guess on unknown lane");
            game.message = format!("Invalid lane {lane}");
            return Ok(report_of(game, &self.pool, GuessOutcome::InvalidLane, None));
        };
        let Lane::Active(top) = top else {
            tracing::warn!(lane, "guess on eliminated lane");
            game.message = format!("Lane {lane} is already eliminated. Choose another lane.");
            return Ok(report_of(game, &self.pool, GuessOutcome::LaneEliminated, None));
        };

        game.win_streak = win_streak;

        let Some(card) = self.pool.draw() else {
            finish(game, &self.pool, true);
            game.message = "Congratulations! You won! All cards have been guessed!".to_string();
            return Ok(report_of(game, &self.pool, GuessOutcome::PoolExhausted, None));
        };

        let correct = is_correct(&top, &card, direction);
        let drawn = self.pool.drawn();
        tracing::debug!(
            game_id = %game.id,
            lane,
            %direction,
            top = %top,
            drawn_card = %card,
            correct,
            drawn,
            "guess evaluated"
        );

        game.lanes[lane] = if correct {
            Lane::Active(card)
        } else {
            Lane::Eliminated
        };

        if drawn >= DECK_SIZE || self.pool.is_empty() {
            finish(game, &self.pool, true);
            game.message = format!(
                "Congratulations! You won! You guessed all {DECK_SIZE} cards! Final score: {}",
                game.score
            );
        } else {
            game.score = scoring::final_score(drawn, game.num_decks, win_streak);
            game.message = if correct {
                format!("Correct! The new card was {card}. Your score: {}", game.score)
            } else {
                format!(
                    "Wrong! The card was {card}. Lane {lane} eliminated. Your score: {}",
                    game.score
                )
            };
            if game.lanes.iter().all(|l| !l.is_active()) {
                finish(game, &self.pool, false);
                game.message.push_str(&format!(
                    " Game Over! All lanes eliminated. Final score: {}",
                    game.score
                ));
            }
        }

        let outcome = GuessOutcome::Evaluated { correct };
        Ok(report_of(game, &self.pool, outcome, Some(card)))
    }

    /// Remaining-card counts against `lane`'s top card.
    ///
    /// # Errors
    ///
    /// [`GameError::NoGameInProgress`] before `start`;
    /// [`GameError::LaneOutOfRange`] for an unknown lane.
    pub fn probability(&self, lane: usize) -> Result<ProbabilitySnapshot, GameError> {
        let game = self.game.as_ref().ok_or(GameError::NoGameInProgress)?;
        let state = game.lanes.get(lane).ok_or(GameError::LaneOutOfRange {
            lane,
            lanes: game.lanes.len(),
        })?;
        Ok(probability::for_top_card(&self.pool, state.top_card()))
    }

    /// One snapshot per lane, in lane order.
    pub fn probabilities(&self) -> Result<Vec<ProbabilitySnapshot>, GameError> {
        let game = self.game.as_ref().ok_or(GameError::NoGameInProgress)?;
        Ok(game
            .lanes
            .iter()
            .map(|l| probability::for_top_card(&self.pool, l.top_card()))
            .collect())
    }

    pub fn current_state(&self) -> Option<GameSnapshot> {
        self.game.as_ref().map(|g| snapshot_of(g, &self.pool))
    }

    /// Discards the current game and refills the pool.
    pub fn reset(&mut self) {
        if let Some(game) = self.game.take() {
            tracing::debug!(game_id = %game.id, "game discarded");
        }
        self.pool.reset();
    }

    pub fn phase(&self) -> Phase {
        self.game
            .as_ref()
            .map(|g| g.phase)
            .unwrap_or(Phase::NotStarted)
    }

    pub fn score(&self) -> u32 {
        self.game.as_ref().map(|g| g.score).unwrap_or(0)
    }

    pub fn pool(&self) -> &CardPool {
        &self.pool
    }

    /// History row for a finished game; `None` until the game is over.
    pub fn record(&self) -> Option<GameRecord> {
        let game = self.game.as_ref()?;
        let Phase::Over { won } = game.phase else {
            return None;
        };
        let finished_at = game.finished_at.unwrap_or(game.started_at);
        let duration = (finished_at - game.started_at).num_seconds().max(0) as u64;
        Some(GameRecord {
            game_id: game.id.clone(),
            num_decks: game.num_decks,
            score: game.score,
            won,
            win_streak: game.win_streak,
            cards_drawn: self.pool.drawn() as u32,
            played_at: GameRecord::timestamp(game.started_at),
            duration_seconds: Some(duration),
        })
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Equal values win regardless of the called direction.
fn is_correct(top: &Card, drawn: &Card, direction: Direction) -> bool {
    let (top, drawn) = (top.value(), drawn.value());
    if top == drawn {
        return true;
    }
    match direction {
        Direction::Higher => drawn > top,
        Direction::Lower => drawn < top,
    }
}

fn finish(game: &mut Game, pool: &CardPool, won: bool) {
    game.score = scoring::session_score(pool.drawn(), game.num_decks, game.win_streak, won);
    game.phase = Phase::Over { won };
    game.finished_at = Some(Utc::now());
    tracing::info!(
        game_id = %game.id,
        num_decks = game.num_decks,
        score = game.score,
        won,
        "game over"
    );
}

fn snapshot_of(game: &Game, pool: &CardPool) -> GameSnapshot {
    GameSnapshot {
        num_decks: game.num_decks,
        lanes: game.lanes.clone(),
        score: game.score,
        phase: game.phase,
        remaining: pool.size(),
        drawn: pool.drawn(),
        message: game.message.clone(),
    }
}

fn report_of(
    game: &Game,
    pool: &CardPool,
    outcome: GuessOutcome,
    drawn_card: Option<Card>,
) -> GuessReport {
    GuessReport {
        outcome,
        drawn_card,
        snapshot: snapshot_of(game, pool),
    }
}
