use crate::error::GameError;
use crate::game_state::{GameState, Phase};
use crate::rules::Rules;
use crate::Hand;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// What the player may do on their turn. `Quit` aborts the whole round
/// and is not a `Stand`: play never reaches the dealer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerAction {
    Hit,
    Stand,
    Quit,
}

/// Input that maps to no action. The one recoverable error in the engine:
/// report it and ask again, no turn is consumed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized input: {0:?}")]
pub struct UnrecognizedInput(pub String);

impl FromStr for PlayerAction {
    type Err = UnrecognizedInput;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "h" | "hit" => Ok(PlayerAction::Hit),
            "s" | "stand" => Ok(PlayerAction::Stand),
            "q" | "quit" => Ok(PlayerAction::Quit),
            _ => Err(UnrecognizedInput(s.to_string())),
        }
    }
}

/// The legal action set for the current phase. Only the player's turn
/// offers choices; every other phase is driven by the engine.
pub fn available_actions(state: &GameState) -> &'static [PlayerAction] {
    match state.phase {
        Phase::PlayerTurn => &[PlayerAction::Hit, PlayerAction::Stand, PlayerAction::Quit],
        _ => &[],
    }
}

/// The external input collaborator for the player's turn. Implementations
/// present the table however they like and block until a choice arrives.
pub trait ActionPrompt {
    fn solicit(&mut self, state: &GameState) -> Result<PlayerAction, UnrecognizedInput>;

    /// Called when solicited input maps to no action, before re-soliciting.
    fn reject(&mut self, _input: &UnrecognizedInput) {}
}

/// How a player's turn ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Turn complete; play continues from this snapshot.
    Played(GameState),
    /// The player quit the session mid-round.
    Quit,
}

/// Runs the player's turn to completion: solicits actions until the phase
/// advances, the player quits, or an unrecoverable error surfaces.
/// Unrecognized input is reported back and re-solicited without touching
/// the state.
pub fn player_turn<P: ActionPrompt>(
    state: GameState,
    prompt: &mut P,
) -> Result<TurnOutcome, GameError> {
    let mut state = state;
    while state.phase == Phase::PlayerTurn {
        match prompt.solicit(&state) {
            Ok(PlayerAction::Hit) => state = state.hit()?,
            Ok(PlayerAction::Stand) => state = state.stand()?,
            Ok(PlayerAction::Quit) => {
                log::debug!("player quit mid-round");
                return Ok(TurnOutcome::Quit);
            }
            Err(unrecognized) => prompt.reject(&unrecognized),
        }
    }
    Ok(TurnOutcome::Played(state))
}

/// The dealer's fixed rule: hit below the stand score, hit a soft stand
/// score (an Ace still counted as 11), stand on a hard one. No lookahead,
/// no knowledge of the shoe.
pub fn dealer_should_hit(dealer: &Hand, rules: &Rules) -> bool {
    let score = dealer.score();
    score < rules.dealer_stand_score
        || (score == rules.dealer_stand_score && dealer.min_score() != rules.dealer_stand_score)
}

/// Plays the dealer's hand out by the fixed rule until the round ends.
/// A dealer bust ends the round through hit's auto-stand.
pub fn dealer_turn(state: GameState) -> Result<GameState, GameError> {
    let mut state = state;
    while state.phase == Phase::DealerTurn {
        if dealer_should_hit(&state.dealer, &state.rules) {
            state = state.hit()?;
        } else {
            state = state.stand()?;
        }
    }
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::Shoe;
    use crate::game_state::Outcome;
    use crate::{Card, Rank, Suit};

    fn card(rank: Rank) -> Card {
        Card::new(Suit::Spade, rank)
    }

    fn hand(ranks: &[Rank]) -> Hand {
        ranks.iter().copied().map(card).collect()
    }

    fn mid_round(phase: Phase, player: &[Rank], dealer: &[Rank], next: &[Rank]) -> GameState {
        GameState {
            shoe: Shoe::from_cards(next.iter().copied().map(card).collect()),
            phase,
            player: hand(player),
            dealer: hand(dealer),
            rules: Rules::default(),
        }
    }

    /// Feeds a fixed sequence of raw inputs and records rejections.
    struct Script {
        inputs: Vec<&'static str>,
        next: usize,
        rejected: Vec<String>,
    }

    impl Script {
        fn new(inputs: &[&'static str]) -> Self {
            Self {
                inputs: inputs.to_vec(),
                next: 0,
                rejected: Vec::new(),
            }
        }
    }

    impl ActionPrompt for Script {
        fn solicit(&mut self, _state: &GameState) -> Result<PlayerAction, UnrecognizedInput> {
            let input = self.inputs[self.next];
            self.next += 1;
            input.parse()
        }

        fn reject(&mut self, input: &UnrecognizedInput) {
            self.rejected.push(input.0.clone());
        }
    }

    #[test]
    fn test_parse_actions() {
        assert_eq!("h".parse::<PlayerAction>(), Ok(PlayerAction::Hit));
        assert_eq!("HIT".parse::<PlayerAction>(), Ok(PlayerAction::Hit));
        assert_eq!("s".parse::<PlayerAction>(), Ok(PlayerAction::Stand));
        assert_eq!(" quit ".parse::<PlayerAction>(), Ok(PlayerAction::Quit));
        assert_eq!(
            "double".parse::<PlayerAction>(),
            Err(UnrecognizedInput("double".to_string()))
        );
    }

    #[test]
    fn test_available_actions_by_phase() {
        let game = mid_round(Phase::PlayerTurn, &[Rank::Ten], &[Rank::Nine], &[]);
        assert_eq!(
            available_actions(&game),
            &[PlayerAction::Hit, PlayerAction::Stand, PlayerAction::Quit]
        );
        let game = mid_round(Phase::DealerTurn, &[Rank::Ten], &[Rank::Nine], &[]);
        assert!(available_actions(&game).is_empty());
        let game = mid_round(Phase::HandOver, &[], &[], &[]);
        assert!(available_actions(&game).is_empty());
    }

    #[test]
    fn test_player_turn_stand() {
        let game = mid_round(
            Phase::PlayerTurn,
            &[Rank::Ten, Rank::Seven],
            &[Rank::Nine, Rank::Eight],
            &[],
        );
        let mut prompt = Script::new(&["s"]);
        match player_turn(game, &mut prompt).unwrap() {
            TurnOutcome::Played(state) => assert_eq!(state.phase, Phase::DealerTurn),
            TurnOutcome::Quit => panic!("expected the turn to finish"),
        }
    }

    #[test]
    fn test_player_turn_unrecognized_input_keeps_state() {
        let game = mid_round(
            Phase::PlayerTurn,
            &[Rank::Ten, Rank::Seven],
            &[Rank::Nine, Rank::Eight],
            &[Rank::Two],
        );
        let mut prompt = Script::new(&["x", "double", "s"]);
        let outcome = player_turn(game.clone(), &mut prompt).unwrap();
        assert_eq!(prompt.rejected, vec!["x", "double"]);
        match outcome {
            TurnOutcome::Played(state) => {
                // Bad input consumed no turn: same hand, untouched shoe.
                assert_eq!(state.player, game.player);
                assert_eq!(state.shoe, game.shoe);
            }
            TurnOutcome::Quit => panic!("expected the turn to finish"),
        }
    }

    #[test]
    fn test_player_turn_quit_propagates() {
        let game = mid_round(
            Phase::PlayerTurn,
            &[Rank::Ten, Rank::Seven],
            &[Rank::Nine, Rank::Eight],
            &[Rank::Two],
        );
        let mut prompt = Script::new(&["q"]);
        assert_eq!(player_turn(game, &mut prompt).unwrap(), TurnOutcome::Quit);
    }

    #[test]
    fn test_player_turn_hit_until_bust_ends_turn() {
        let game = mid_round(
            Phase::PlayerTurn,
            &[Rank::King, Rank::Queen],
            &[Rank::Nine, Rank::Eight],
            &[Rank::Five],
        );
        let mut prompt = Script::new(&["h"]);
        match player_turn(game, &mut prompt).unwrap() {
            TurnOutcome::Played(state) => {
                assert_eq!(state.player.score(), 25);
                assert_eq!(state.phase, Phase::DealerTurn);
            }
            TurnOutcome::Quit => panic!("expected the turn to finish"),
        }
    }

    #[test]
    fn test_dealer_hits_sixteen_and_below() {
        let rules = Rules::default();
        assert!(dealer_should_hit(&hand(&[Rank::Ten, Rank::Six]), &rules));
        assert!(dealer_should_hit(&hand(&[Rank::Two, Rank::Three]), &rules));
    }

    #[test]
    fn test_dealer_stands_on_hard_seventeen() {
        let rules = Rules::default();
        assert!(!dealer_should_hit(&hand(&[Rank::Ten, Rank::Seven]), &rules));
    }

    #[test]
    fn test_dealer_hits_soft_seventeen() {
        let rules = Rules::default();
        // Ace + Six: score 17, min score 7.
        assert!(dealer_should_hit(&hand(&[Rank::Ace, Rank::Six]), &rules));
    }

    #[test]
    fn test_dealer_stands_on_eighteen_and_above() {
        let rules = Rules::default();
        assert!(!dealer_should_hit(&hand(&[Rank::Ten, Rank::Eight]), &rules));
        assert!(!dealer_should_hit(&hand(&[Rank::Ace, Rank::King]), &rules));
        // Soft 18 is still a stand.
        assert!(!dealer_should_hit(&hand(&[Rank::Ace, Rank::Seven]), &rules));
    }

    #[test]
    fn test_dealer_turn_plays_to_hand_over() {
        // Dealer at hard 16 must hit; a Five makes 21, a hard stand.
        let game = mid_round(
            Phase::DealerTurn,
            &[Rank::Ten, Rank::Seven],
            &[Rank::Ten, Rank::Six],
            &[Rank::Five],
        );
        let done = dealer_turn(game).unwrap();
        assert_eq!(done.phase, Phase::HandOver);
        assert_eq!(done.dealer.score(), 21);
        let result = done.resolve().unwrap();
        assert_eq!(result.outcome, Outcome::DealerWin);
        assert_eq!((result.player_score, result.dealer_score), (17, 21));
    }

    #[test]
    fn test_dealer_turn_stands_immediately_on_hard_seventeen() {
        let game = mid_round(
            Phase::DealerTurn,
            &[Rank::Ten, Rank::Nine],
            &[Rank::Ten, Rank::Seven],
            &[Rank::Five],
        );
        let done = dealer_turn(game).unwrap();
        assert_eq!(done.dealer.len(), 2);
        assert_eq!(done.phase, Phase::HandOver);
    }

    #[test]
    fn test_natural_twenty_one_beats_dealer_twenty() {
        let game = mid_round(
            Phase::PlayerTurn,
            &[Rank::Ace, Rank::King],
            &[Rank::Ten, Rank::Six],
            &[Rank::Four],
        );
        let mut prompt = Script::new(&["s"]);
        let state = match player_turn(game, &mut prompt).unwrap() {
            TurnOutcome::Played(state) => state,
            TurnOutcome::Quit => panic!("expected the turn to finish"),
        };
        let done = dealer_turn(state).unwrap();
        assert_eq!(done.dealer.score(), 20);
        assert_eq!(done.resolve().unwrap().outcome, Outcome::PlayerWin);
    }
}
