use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rand::Rng;
use sweeper_core::{Board, BoardConfig, Coord, Coordinate, Difficulty, Game, Record, Seed};

use store::SaveStore;

mod render;
mod store;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity<clap_verbosity_flag::InfoLevel>,

    /// Directory holding saved games
    #[arg(long, global = true, default_value = "saves")]
    saves: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a new game, save it and print it
    New(NewArgs),
    /// Clear a cell of a saved game
    Reveal {
        name: String,
        #[arg(allow_negative_numbers = true)]
        x: Coord,
        #[arg(allow_negative_numbers = true)]
        y: Coord,
    },
    /// Print a saved game
    Show { name: String },
}

#[derive(clap::Args, Debug)]
struct NewArgs {
    /// Preset board, beginner when no custom size is given
    #[arg(short, long, value_enum, conflicts_with_all = ["mines", "width", "height"])]
    difficulty: Option<Preset>,

    #[arg(long, requires_all = ["width", "height"])]
    mines: Option<usize>,

    #[arg(long, requires_all = ["mines", "height"])]
    width: Option<usize>,

    #[arg(long, requires_all = ["mines", "width"])]
    height: Option<usize>,

    /// Force a seed instead of random
    #[arg(short, long, allow_negative_numbers = true)]
    seed: Option<Seed>,

    /// Save name, derived from a random value when omitted
    #[arg(short, long)]
    name: Option<String>,
}

impl NewArgs {
    fn config(&self) -> BoardConfig {
        match (self.mines, self.width, self.height) {
            (Some(mines), Some(width), Some(height)) => BoardConfig::new(width, height, mines),
            _ => Difficulty::from(self.difficulty.unwrap_or(Preset::Beginner)).config(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Preset {
    Beginner,
    Intermediate,
    Expert,
}

impl From<Preset> for Difficulty {
    fn from(preset: Preset) -> Self {
        match preset {
            Preset::Beginner => Difficulty::Beginner,
            Preset::Intermediate => Difficulty::Intermediate,
            Preset::Expert => Difficulty::Expert,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(cli.verbose.tracing_level_filter())
        .with_writer(std::io::stderr)
        .init();

    let store = SaveStore::new(&cli.saves);
    log::debug!("Using save directory {}", store.dir().display());

    match cli.command {
        Command::New(args) => new_game(&store, args),
        Command::Reveal { name, x, y } => reveal(&store, &name, Coordinate::new(x, y)),
        Command::Show { name } => show(&store, &name),
    }
}

fn new_game(store: &SaveStore, args: NewArgs) -> Result<()> {
    let mut rng = rand::rng();
    let config = args.config();
    let seed = args.seed.unwrap_or_else(|| rng.random());

    let board = Board::generate(config, seed)
        .with_context(|| {
            format!(
                "Could not generate a {}x{} board with {} mines",
                config.width, config.height, config.mines
            )
        })?
        .into_valid()?;
    let game = Game::new(board);

    let name = args
        .name
        .unwrap_or_else(|| store::generate_name(rng.random()));
    store.save(&name, &Record::from_game(&game))?;
    log::info!("Created game {} with seed {}", name, seed);

    println!("{name}");
    print!("{}", render::render(&game));
    Ok(())
}

fn load_game(store: &SaveStore, name: &str) -> Result<Game> {
    store
        .load(name)?
        .to_game()
        .with_context(|| format!("Could not replay save {name}"))
}

fn reveal(store: &SaveStore, name: &str, coords: Coordinate) -> Result<()> {
    let mut game = load_game(store, name)?;
    if !game.board().is_in_range(coords.y, coords.x) {
        log::warn!(
            "({}, {}) is outside the {}x{} board, recording it anyway",
            coords.x,
            coords.y,
            game.width(),
            game.height()
        );
    }

    let shown = game.clear(coords);
    store.save(name, &Record::from_game(&game))?;
    log::info!(
        "Game {} click ({}, {}), {} cells shown",
        name,
        coords.x,
        coords.y,
        shown
    );

    print!("{}", render::render(&game));
    Ok(())
}

fn show(store: &SaveStore, name: &str) -> Result<()> {
    let game = load_game(store, name)?;
    print!("{}", render::render(&game));
    Ok(())
}
