//! ludo-sim - plays a computer-vs-computer game and narrates it.
//!
//! ```text
//! RUST_LOG=info ludo-sim --players 4 --seed 7
//! RUST_LOG=debug ludo-sim --names Red,Blue --concurrent
//! ludo-sim --config board.toml --random
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use rust_ludo::{
    BoardSnapshot, ConcurrentScheduler, EventRecord, FirstLegalAgent, GameEvent, GameObserver,
    GameResult, GameRng, GameState, LudoConfig, PlayerAgent, PlayerId, RandomAgent,
    SequentialScheduler, TurnController,
};

/// Simulate a game of Ludo between computer players
#[derive(Parser, Debug)]
#[command(name = "ludo-sim")]
#[command(about = "Simulate a game of Ludo between computer players", long_about = None)]
#[command(version)]
struct Cli {
    /// Number of players (2-4). Overrides the config file.
    #[arg(short, long)]
    players: Option<usize>,

    /// Comma-separated player names, in turn order
    #[arg(short, long, value_delimiter = ',')]
    names: Vec<String>,

    /// Dice seed. A random seed is drawn when omitted.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Run each player on its own thread
    #[arg(long)]
    concurrent: bool,

    /// Pick random legal tokens instead of the first legal one
    #[arg(long)]
    random: bool,

    /// TOML file with rule settings
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// Narrates events through `tracing`.
struct Narrator {
    names: Vec<String>,
}

impl Narrator {
    fn name(&self, player: PlayerId) -> &str {
        self.names
            .get(player.index())
            .map(String::as_str)
            .unwrap_or("?")
    }
}

impl GameObserver for Narrator {
    fn on_event(&mut self, record: &EventRecord) {
        let turn = record.turn;
        match &record.event {
            GameEvent::TurnStarted { player } => info!(turn, "{}'s turn", self.name(*player)),
            GameEvent::Rolled { player, value } => {
                info!(turn, "{} rolled a {value}", self.name(*player));
            }
            GameEvent::TokenEntered { player, token } => {
                info!(turn, "{} brings token {token} onto the board", self.name(*player));
            }
            GameEvent::TokenMoved { player, token, from, to } => {
                info!(turn, "{} moves token {token} from {from} to {to}", self.name(*player));
            }
            GameEvent::Captured { by, victim, token, cell } => info!(
                turn,
                "{} captures {}'s token {token} at {cell}",
                self.name(*by),
                self.name(*victim)
            ),
            GameEvent::NoValidMoves { player, roll } => {
                info!(turn, "{} has no move for {roll}", self.name(*player));
            }
            GameEvent::BonusGranted { player, streak } => {
                info!(turn, streak, "{} rolls again", self.name(*player));
            }
            GameEvent::Forfeited { player, streak } => {
                info!(turn, "{} forfeits the turn after {streak} bonus rolls", self.name(*player));
            }
            GameEvent::PlayerFinished { player, rank } => {
                info!(turn, "{} finishes in place {rank}", self.name(*player));
            }
            GameEvent::TurnPassed { .. } => {}
            GameEvent::GameOver { .. } => info!(turn, "game over"),
        }
    }

    fn on_snapshot(&mut self, snapshot: &BoardSnapshot) {
        for player in &snapshot.players {
            let tokens: Vec<String> = player.tokens.iter().map(ToString::to_string).collect();
            debug!(turn = snapshot.turn, "{}: [{}]", player.name, tokens.join(", "));
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => LudoConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => LudoConfig::default(),
    };
    if let Some(players) = cli.players {
        config = config.with_player_count(players);
    } else if !cli.names.is_empty() {
        config = config.with_player_count(cli.names.len());
    }

    let names = if cli.names.is_empty() {
        (1..=config.player_count).map(|i| format!("Player {i}")).collect()
    } else {
        cli.names.clone()
    };

    let dice = cli.seed.map_or_else(GameRng::from_entropy, GameRng::new);
    let seed = dice.seed();
    info!(seed, players = config.player_count, concurrent = cli.concurrent, "starting game");

    let mut controller =
        TurnController::new(config, names.clone()).context("invalid game setup")?;
    let narrator = Narrator { names };

    let mut agents: Vec<Box<dyn PlayerAgent + Send>> = (0..controller.state().player_count())
        .map(|seat| -> Box<dyn PlayerAgent + Send> {
            if cli.random {
                Box::new(RandomAgent::new(seed.wrapping_add(seat as u64 + 1)))
            } else {
                Box::new(FirstLegalAgent)
            }
        })
        .collect();

    let result = if cli.concurrent {
        ConcurrentScheduler::new(dice, narrator).run(&mut controller, &mut agents)?
    } else {
        SequentialScheduler::new(dice, narrator).run(&mut controller, &mut agents)?
    };

    print_standings(&result, controller.state());
    Ok(())
}

fn print_standings(result: &GameResult, state: &GameState) {
    println!("Final standings after {} turns:", result.turns);
    for standing in &result.standings {
        let name = &state.player(standing.player).name;
        if standing.finished {
            println!("  {}. {name}", standing.rank);
        } else {
            println!("  -  {name} (did not finish)");
        }
    }
}
