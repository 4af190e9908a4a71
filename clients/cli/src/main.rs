use clap::Parser;
use pontoon::{
    available_actions, dealer_turn, player_turn, ActionPrompt, GameState, Outcome, PlayerAction,
    Rules, RoundResult, TurnOutcome, UnrecognizedInput,
};
use rand::rngs::ThreadRng;
use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
use std::io::{self, BufRead, Write};

type BoxErr = Box<dyn std::error::Error>;

#[derive(Parser)]
#[command(name = "pontoon", about = "Twenty-one at the terminal")]
struct Cli {
    /// Decks in the shoe
    #[arg(long, default_value_t = 3)]
    decks: usize,

    /// Seed the shuffle for a reproducible session
    #[arg(long)]
    seed: Option<u64>,
}

enum SessionRng {
    Seeded(ChaCha8Rng),
    Os(ThreadRng),
}

/// Reads actions from stdin, echoing the table before each prompt.
struct ConsolePrompt {
    stdin: io::Stdin,
}

impl ConsolePrompt {
    fn new() -> Self {
        Self { stdin: io::stdin() }
    }
}

impl ActionPrompt for ConsolePrompt {
    fn solicit(&mut self, state: &GameState) -> Result<PlayerAction, UnrecognizedInput> {
        println!("Player: {}", state.player.to_display());
        println!("Dealer: {}", state.dealer.dealer_display());
        let choices = available_actions(state)
            .iter()
            .map(|action| match action {
                PlayerAction::Hit => "(h)it",
                PlayerAction::Stand => "(s)tand",
                PlayerAction::Quit => "(q)uit",
            })
            .collect::<Vec<_>>()
            .join(", ");
        print!("What will you do? {choices}: ");
        io::stdout().flush().ok();

        let mut line = String::new();
        match self.stdin.lock().read_line(&mut line) {
            // EOF: treat a closed stdin as quitting the session.
            Ok(0) => Ok(PlayerAction::Quit),
            Ok(_) => line.parse(),
            Err(err) => {
                log::warn!("stdin read failed: {err}");
                Ok(PlayerAction::Quit)
            }
        }
    }

    fn reject(&mut self, input: &UnrecognizedInput) {
        println!("Invalid option: {}", input.0.trim());
    }
}

fn print_result(state: &GameState, result: &RoundResult) {
    println!("==FINAL HANDS==");
    println!("Player: {}", state.player.to_display());
    println!("Score: {}", result.player_score);
    println!("Dealer: {}", state.dealer.to_display());
    println!("Score: {}", result.dealer_score);
    let verdict = match result.outcome {
        Outcome::PlayerBust => "You busted",
        Outcome::DealerBust => "Dealer busted",
        Outcome::PlayerWin => "You win!",
        Outcome::DealerWin => "You lose",
        Outcome::Draw => "Draw",
    };
    println!("{verdict}");
    println!();
}

fn main() -> Result<(), BoxErr> {
    env_logger::init();
    let cli = Cli::parse();

    let rules = Rules {
        num_decks: cli.decks,
        ..Rules::default()
    };
    let mut rng = match cli.seed {
        Some(seed) => SessionRng::Seeded(ChaCha8Rng::seed_from_u64(seed)),
        None => SessionRng::Os(rand::thread_rng()),
    };
    let mut prompt = ConsolePrompt::new();

    let mut game = GameState::new(rules);
    loop {
        println!("----NEW GAME----");
        if game.needs_reshuffle() {
            println!("Reshuffling the shoe...");
            game = match &mut rng {
                SessionRng::Seeded(rng) => game.shuffle_with_rng(rng),
                SessionRng::Os(rng) => game.shuffle_with_rng(rng),
            };
        }
        game = game.deal()?;

        game = match player_turn(game, &mut prompt)? {
            TurnOutcome::Played(state) => state,
            TurnOutcome::Quit => {
                println!("Exiting game.");
                return Ok(());
            }
        };
        game = dealer_turn(game)?;
        let result = game.resolve()?;
        print_result(&game, &result);
    }
}
