use crate::deck::Shoe;
use crate::error::GameError;
use crate::rules::{Rules, BLACKJACK_SCORE};
use crate::Hand;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Round phases, in the order they occur. Transitions only move forward;
/// a new round restarts at `PlayerTurn` via [`GameState::deal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Phase {
    PlayerTurn,
    DealerTurn,
    HandOver,
}

impl Phase {
    fn next(self) -> Phase {
        match self {
            Phase::PlayerTurn => Phase::DealerTurn,
            Phase::DealerTurn | Phase::HandOver => Phase::HandOver,
        }
    }
}

/// How a finished round came out, from the player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    PlayerBust,
    DealerBust,
    PlayerWin,
    DealerWin,
    Draw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub outcome: Outcome,
    pub player_score: u8,
    pub dealer_score: u8,
}

/// A frozen snapshot of one game. Every mutating operation takes `&self`
/// and returns a fresh snapshot, so earlier generations are never touched
/// and any observer of an old snapshot keeps seeing exactly what it saw.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub shoe: Shoe,
    pub phase: Phase,
    pub player: Hand,
    pub dealer: Hand,
    pub rules: Rules,
}

impl Default for Phase {
    fn default() -> Self {
        // A fresh game is pre-deal: no hand is active until the first deal.
        Phase::HandOver
    }
}

impl GameState {
    pub fn new(rules: Rules) -> Self {
        Self {
            rules,
            ..Self::default()
        }
    }

    /// Replaces the shoe with a freshly built, shuffled one. Hands are
    /// unaffected; the old shoe is discarded wholesale.
    pub fn shuffle(&self) -> Self {
        self.shuffle_with_rng(&mut rand::thread_rng())
    }

    pub fn shuffle_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        let mut ret = self.clone();
        ret.shoe = Shoe::build(self.rules.num_decks, rng);
        log::debug!("shoe rebuilt with {} cards", ret.shoe.remaining());
        ret
    }

    /// Swaps in a shoe with a known card order. Useful for tests and for
    /// callers that build the shoe through a custom deck pipeline.
    pub fn with_shoe(&self, shoe: Shoe) -> Self {
        let mut ret = self.clone();
        ret.shoe = shoe;
        ret
    }

    pub fn needs_reshuffle(&self) -> bool {
        self.shoe.needs_reshuffle(self.rules.reshuffle_threshold)
    }

    /// Starts a round: both hands rebuilt empty, two cards drawn into each,
    /// interleaved player/dealer/player/dealer, phase set to `PlayerTurn`.
    /// The reshuffle threshold guarantees four cards are available.
    pub fn deal(&self) -> Result<Self, GameError> {
        let mut ret = self.clone();
        ret.player = Hand::new();
        ret.dealer = Hand::new();
        for _ in 0..2 {
            ret.player.push(ret.shoe.draw()?);
            ret.dealer.push(ret.shoe.draw()?);
        }
        ret.phase = Phase::PlayerTurn;
        log::debug!(
            "dealt new round, {} cards left in the shoe",
            ret.shoe.remaining()
        );
        Ok(ret)
    }

    /// The hand the current phase is drawing into.
    pub fn current_hand(&self) -> Result<&Hand, GameError> {
        match self.phase {
            Phase::PlayerTurn => Ok(&self.player),
            Phase::DealerTurn => Ok(&self.dealer),
            Phase::HandOver => Err(GameError::InvalidTransition {
                action: "current_hand",
                phase: self.phase,
            }),
        }
    }

    /// Draws one card into the active hand. A hit that busts the hand
    /// stands automatically: no further action is possible on it.
    pub fn hit(&self) -> Result<Self, GameError> {
        let mut ret = self.clone();
        let hand = match ret.phase {
            Phase::PlayerTurn => &mut ret.player,
            Phase::DealerTurn => &mut ret.dealer,
            Phase::HandOver => {
                return Err(GameError::InvalidTransition {
                    action: "hit",
                    phase: self.phase,
                })
            }
        };
        hand.push(ret.shoe.draw()?);
        if hand.score() > BLACKJACK_SCORE {
            log::debug!("{:?} busted at {}", self.phase, hand.score());
            return ret.stand();
        }
        Ok(ret)
    }

    /// Ends the active hand's turn, advancing the phase one step.
    pub fn stand(&self) -> Result<Self, GameError> {
        if self.phase == Phase::HandOver {
            return Err(GameError::InvalidTransition {
                action: "stand",
                phase: self.phase,
            });
        }
        let mut ret = self.clone();
        ret.phase = ret.phase.next();
        log::debug!("phase advanced to {:?}", ret.phase);
        Ok(ret)
    }

    /// Scores the finished round. Pure over the two hands: calling it any
    /// number of times on the same snapshot yields the same result.
    pub fn resolve(&self) -> Result<RoundResult, GameError> {
        if self.phase != Phase::HandOver {
            return Err(GameError::InvalidTransition {
                action: "resolve",
                phase: self.phase,
            });
        }
        let player_score = self.player.score();
        let dealer_score = self.dealer.score();
        let outcome = if player_score > BLACKJACK_SCORE {
            Outcome::PlayerBust
        } else if dealer_score > BLACKJACK_SCORE {
            Outcome::DealerBust
        } else if player_score > dealer_score {
            Outcome::PlayerWin
        } else if dealer_score > player_score {
            Outcome::DealerWin
        } else {
            Outcome::Draw
        };
        Ok(RoundResult {
            outcome,
            player_score,
            dealer_score,
        })
    }
}
