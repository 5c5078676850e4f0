//! Score computation for a higher/lower session.
//!
//! Multipliers are kept in hundredths so the final rounding is exact integer
//! arithmetic: `round(drawn * difficulty * streak)` rounds half up.
//!
//! ```
//! use hilo_engine::scoring::{final_score, victory_bonus};
//!
//! // 10 cards drawn with six lanes and a four-game streak: 10 * 2.0 * 1.2
//! assert_eq!(final_score(10, 6, 4), 24);
//! assert_eq!(victory_bonus(6, 4), 350);
//! ```

/// Fixed-point scale for multipliers (1.00 == 100).
pub const MULTIPLIER_SCALE: u64 = 100;

/// Streak length at which the streak multiplier starts to apply.
pub const STREAK_THRESHOLD: u32 = 2;

/// Difficulty multiplier in hundredths. Fewer lanes is harder and pays more.
/// Lane counts outside the table are clamped to its ends.
pub fn difficulty_hundredths(num_decks: u32) -> u64 {
    match num_decks {
        0..=6 => 200,
        7 => 180,
        8 => 150,
        9 => 120,
        _ => 100,
    }
}

/// Streak multiplier in hundredths: `1.0` below the threshold, else `1.0 + 0.05 * streak`.
pub fn streak_hundredths(win_streak: u32) -> u64 {
    if win_streak < STREAK_THRESHOLD {
        MULTIPLIER_SCALE
    } else {
        MULTIPLIER_SCALE + 5 * u64::from(win_streak)
    }
}

pub fn difficulty_multiplier(num_decks: u32) -> f64 {
    difficulty_hundredths(num_decks) as f64 / MULTIPLIER_SCALE as f64
}

pub fn streak_multiplier(win_streak: u32) -> f64 {
    streak_hundredths(win_streak) as f64 / MULTIPLIER_SCALE as f64
}

pub fn base_score(drawn_count: usize) -> u64 {
    drawn_count as u64
}

/// `round(base * difficulty * streak)`, rounding half up.
pub fn final_score(drawn_count: usize, num_decks: u32, win_streak: u32) -> u32 {
    let scale = MULTIPLIER_SCALE * MULTIPLIER_SCALE;
    let raw = base_score(drawn_count)
        * difficulty_hundredths(num_decks)
        * streak_hundredths(win_streak);
    saturate((raw + scale / 2) / scale)
}

/// Bonus added once, when a session ends in a win.
pub fn victory_bonus(num_decks: u32, win_streak: u32) -> u32 {
    let lanes_part = 11u64.saturating_sub(u64::from(num_decks)) * 50;
    saturate(lanes_part + u64::from(win_streak) * 25)
}

/// Score for the current draw count, including the bonus when `won`.
pub fn session_score(drawn_count: usize, num_decks: u32, win_streak: u32, won: bool) -> u32 {
    let score = final_score(drawn_count, num_decks, win_streak);
    if won {
        score.saturating_add(victory_bonus(num_decks, win_streak))
    } else {
        score
    }
}

fn saturate(v: u64) -> u32 {
    u32::try_from(v).unwrap_or(u32::MAX)
}
