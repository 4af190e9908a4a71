use crate::error::GameError;
use crate::{Card, Rank, Suit};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A deck-building step. Steps compose left to right via [`new_deck`], so
/// `[copies(3), shuffled(rng)]` triples the deck before permuting it.
pub type Transform = Box<dyn FnMut(Vec<Card>) -> Vec<Card>>;

/// One standard 52-card deck, suit-major and rank-ascending, no jokers.
pub fn standard_deck() -> Vec<Card> {
    let mut cards = Vec::with_capacity(52);
    for suit in Suit::STANDARD {
        for rank in Rank::ALL {
            cards.push(Card::new(suit, rank));
        }
    }
    cards
}

/// Builds a deck by applying each transform, in order, to [`standard_deck`].
pub fn new_deck(transforms: impl IntoIterator<Item = Transform>) -> Vec<Card> {
    let mut cards = standard_deck();
    for mut transform in transforms {
        cards = transform(cards);
    }
    cards
}

/// Concatenates `n` copies of the deck built so far.
pub fn copies(n: usize) -> Transform {
    Box::new(move |cards| {
        let mut ret = Vec::with_capacity(cards.len() * n);
        for _ in 0..n {
            ret.extend_from_slice(&cards);
        }
        ret
    })
}

/// Appends `n` joker cards.
pub fn jokers(n: usize) -> Transform {
    Box::new(move |mut cards| {
        for _ in 0..n {
            cards.push(Card::new(Suit::Joker, Rank::Ace));
        }
        cards
    })
}

/// Drops every card matching the predicate.
pub fn exclude(pred: impl Fn(&Card) -> bool + 'static) -> Transform {
    Box::new(move |cards| cards.into_iter().filter(|c| !pred(c)).collect())
}

/// Sorts with a caller-supplied comparator.
pub fn sorted_by(mut cmp: impl FnMut(&Card, &Card) -> std::cmp::Ordering + 'static) -> Transform {
    Box::new(move |mut cards| {
        cards.sort_by(&mut cmp);
        cards
    })
}

/// Sorts suit-major, rank-ascending.
pub fn default_sort() -> Transform {
    sorted_by(|a, b| a.sort_key().cmp(&b.sort_key()))
}

/// Permutes the deck uniformly at random with the given generator.
pub fn shuffled<R: Rng + 'static>(mut rng: R) -> Transform {
    Box::new(move |mut cards| {
        cards.shuffle(&mut rng);
        cards
    })
}

/// Returns a uniformly random permutation of `cards` without touching the
/// input.
pub fn shuffle<R: Rng + ?Sized>(cards: &[Card], rng: &mut R) -> Vec<Card> {
    let mut ret = cards.to_vec();
    ret.shuffle(rng);
    ret
}

/// The card source for a game: an ordered sequence drawn from the front.
/// A drawn card never comes back; the whole shoe is rebuilt on reshuffle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shoe {
    cards: VecDeque<Card>,
}

impl Shoe {
    pub fn empty() -> Self {
        Self::default()
    }

    /// A freshly shuffled shoe of `num_decks` standard decks.
    pub fn build<R: Rng + ?Sized>(num_decks: usize, rng: &mut R) -> Self {
        let mut cards = new_deck([copies(num_decks)]);
        cards.shuffle(rng);
        Self {
            cards: cards.into(),
        }
    }

    /// A shoe with a known card order, front of the deque dealt first.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self {
            cards: cards.into(),
        }
    }

    /// Removes and returns the front card. An empty shoe is a caller bug:
    /// the reshuffle threshold must be enforced before every deal.
    pub fn draw(&mut self) -> Result<Card, GameError> {
        self.cards.pop_front().ok_or(GameError::EmptyShoe)
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn needs_reshuffle(&self, threshold: usize) -> bool {
        self.cards.len() <= threshold
    }
}
