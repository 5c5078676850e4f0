use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};

/// Number of cards in the single source deck shared by every lane.
pub const DECK_SIZE: usize = 52;

/// The undealt cards of one standard 52-card deck.
///
/// Each draw picks uniformly among the cards still in the pool, so a suit
/// with one card left is no more likely to come up than any other single card.
/// The pool is a flat array; order carries no meaning and draws swap-remove.
///
/// # Examples
///
/// ```
/// use hilo_engine::pool::CardPool;
///
/// let mut pool = CardPool::new_with_seed(7);
/// assert_eq!(pool.size(), 52);
///
/// let card = pool.draw().expect("full pool");
/// assert_eq!(pool.size(), 51);
/// assert!(!pool.cards().contains(&card));
/// ```
#[derive(Debug, Clone)]
pub struct CardPool {
    /// Remaining cards, in no meaningful order
    cards: Vec<Card>,
    rng: ChaCha20Rng,
}

impl CardPool {
    /// Full pool seeded from the thread RNG.
    pub fn new() -> Self {
        Self::with_rng(ChaCha20Rng::from_rng(&mut rand::rng()))
    }

    /// Full pool whose draw sequence is fixed by `seed`.
    pub fn new_with_seed(seed: u64) -> Self {
        Self::with_rng(ChaCha20Rng::seed_from_u64(seed))
    }

    fn with_rng(rng: ChaCha20Rng) -> Self {
        Self {
            cards: full_deck(),
            rng,
        }
    }

    /// Removes and returns a uniformly chosen remaining card, or `None` once empty.
    pub fn draw(&mut self) -> Option<Card> {
        if self.cards.is_empty() {
            return None;
        }
        let idx = self.rng.random_range(0..self.cards.len());
        Some(self.cards.swap_remove(idx))
    }

    /// Puts all 52 cards back. The RNG keeps its position.
    pub fn reset(&mut self) {
        self.cards = full_deck();
    }

    pub fn size(&self) -> usize {
        self.cards.len()
    }

    /// Cards removed since the last reset; always `DECK_SIZE - size()`.
    pub fn drawn(&self) -> usize {
        DECK_SIZE - self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

impl Default for CardPool {
    fn default() -> Self {
        Self::new()
    }
}
