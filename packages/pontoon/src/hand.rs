use crate::rules::BLACKJACK_SCORE;
use crate::Card;
use serde::{Deserialize, Serialize};

/// One participant's cards for a single round. Append-only while the round
/// runs; `deal` rebuilds it empty for the next round.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    pub cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Hand total counting every Ace as 1.
    pub fn min_score(&self) -> u8 {
        self.cards.iter().map(Card::point_value).sum()
    }

    /// Best total with at most one Ace promoted to 11. If the all-low total
    /// already exceeds 11, or no Ace is present, this is just the all-low
    /// total and may exceed 21; busting is the caller comparing against 21.
    pub fn score(&self) -> u8 {
        let min_score = self.min_score();
        if min_score > 11 {
            return min_score;
        }
        if self.cards.iter().any(Card::is_ace) {
            return min_score + 10;
        }
        min_score
    }

    pub fn is_busted(&self) -> bool {
        self.score() > BLACKJACK_SCORE
    }

    /// A soft hand holds an Ace currently counted as 11.
    pub fn is_soft(&self) -> bool {
        self.score() != self.min_score()
    }

    /// All cards, comma-joined.
    pub fn to_display(&self) -> String {
        self.cards
            .iter()
            .map(Card::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// The dealer's table view: up card only, the rest hidden.
    pub fn dealer_display(&self) -> String {
        match self.cards.first() {
            Some(up_card) => format!("{up_card}, **HIDDEN**"),
            None => String::new(),
        }
    }
}

impl FromIterator<Card> for Hand {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Self {
            cards: iter.into_iter().collect(),
        }
    }
}
