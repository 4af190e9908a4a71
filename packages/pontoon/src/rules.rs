use serde::{Deserialize, Serialize};

/// Busting threshold for a hand.
pub const BLACKJACK_SCORE: u8 = 21;

/// The dealer stands at this total, except on a soft one.
pub const DEALER_STAND_SCORE: u8 = 17;

/// The shoe is rebuilt before a deal once it holds this many cards or
/// fewer, so a full two-card deal can never exhaust it mid-round.
pub const RESHUFFLE_THRESHOLD: usize = 15;

/// Decks concatenated into a fresh shoe.
pub const DEFAULT_NUM_DECKS: usize = 3;

/// Table configuration. The defaults reproduce the reference game; the
/// fields exist so a table can tune them together (e.g. a deeper shoe
/// warrants a higher reshuffle threshold).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    pub num_decks: usize,
    pub reshuffle_threshold: usize,
    pub dealer_stand_score: u8,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            num_decks: DEFAULT_NUM_DECKS,
            reshuffle_threshold: RESHUFFLE_THRESHOLD,
            dealer_stand_score: DEALER_STAND_SCORE,
        }
    }
}
