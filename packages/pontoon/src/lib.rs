//! A twenty-one card game engine: a multi-deck shoe built through a
//! composable transform pipeline, dual-valued Ace scoring, and a strict
//! turn-taking state machine driven by copy-on-write snapshots.

mod card;
pub mod deck;
mod error;
mod game_state;
mod hand;
mod policy;
mod rules;

pub use card::{Card, Rank, Suit};
pub use deck::Shoe;
pub use error::GameError;
pub use game_state::{GameState, Outcome, Phase, RoundResult};
pub use hand::Hand;
pub use policy::{
    available_actions, dealer_should_hit, dealer_turn, player_turn, ActionPrompt, PlayerAction,
    TurnOutcome, UnrecognizedInput,
};
pub use rules::{
    Rules, BLACKJACK_SCORE, DEALER_STAND_SCORE, DEFAULT_NUM_DECKS, RESHUFFLE_THRESHOLD,
};
