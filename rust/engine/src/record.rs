use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// One finished game as handed to the history/leaderboard store.
/// Streak and best-score bookkeeping happen on the receiving side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Identifier for this game (format: YYYYMMDD-NNNNNN)
    pub game_id: String,
    /// Number of lanes the game was played with
    pub num_decks: u32,
    /// Final score, victory bonus included
    pub score: u32,
    pub won: bool,
    /// Win streak the caller supplied with the last guess
    pub win_streak: u32,
    /// Cards taken from the pool, lane deals included
    pub cards_drawn: u32,
    /// Start time of the game (RFC3339)
    pub played_at: String,
    #[serde(default)]
    pub duration_seconds: Option<u64>,
}

impl GameRecord {
    pub fn timestamp(at: DateTime<Utc>) -> String {
        at.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    /// Single-line JSON, LF-terminated.
    pub fn to_json_line(&self) -> serde_json::Result<String> {
        let mut line = serde_json::to_string(self)?;
        line.push('\n');
        Ok(line)
    }
}

pub fn format_game_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}
