use anyhow::{bail, Context};
use bombsnake::cli_renderer::INFO_LINES;
use bombsnake::{CliRenderer, Direction, Game, GameConfig, GameState, Input, RandomSpawner, Renderer};
use clap::Parser;
use crossterm::terminal;
use std::time::{Duration, Instant};

#[derive(Debug, Parser)]
#[command(name = "bombsnake", about = "Snake on a board with exploding bombs")]
struct Args {
    /// Board width in cells
    #[arg(long, default_value_t = bombsnake::config::DEFAULT_WIDTH)]
    width: i32,

    /// Board height in cells
    #[arg(long, default_value_t = bombsnake::config::DEFAULT_HEIGHT)]
    height: i32,

    /// Seed for apple and bomb spawns; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Milliseconds per game round
    #[arg(long, default_value_t = 100)]
    tick_ms: u64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = GameConfig::default().with_board(args.width, args.height);
    config.validate().context("invalid board")?;

    // Each cell is 2 chars wide, plus info lines below the board
    let (term_width, term_height) = terminal::size()?;
    let needed_width = (config.width as u32) * 2;
    let needed_height = config.height as u32 + INFO_LINES as u32;
    if needed_width > term_width as u32 || needed_height > term_height as u32 {
        bail!(
            "terminal is {}x{}, a {}x{} board needs at least {}x{}",
            term_width,
            term_height,
            config.width,
            config.height,
            needed_width,
            needed_height
        );
    }

    let spawner = match args.seed {
        Some(seed) => RandomSpawner::seeded(&config, seed),
        None => RandomSpawner::from_entropy(&config),
    };
    let mut game = Game::new(config, Box::new(spawner))?;
    let tick_rate = Duration::from_millis(args.tick_ms);

    let mut renderer = CliRenderer::new();
    renderer.init()?;

    // The opening frame is shown for a full round before the snake moves
    let mut last_game_update = Instant::now();
    let mut requested: Option<Direction> = None;

    loop {
        if let Some(input) = renderer.poll_input()? {
            match input {
                Input::Direction(direction) => {
                    requested = Some(direction);
                }
                Input::Quit => {
                    break;
                }
                Input::Restart => {
                    game.reset();
                    requested = None;
                    last_game_update = Instant::now();
                }
            }
        }

        if game.state() == GameState::Playing && last_game_update.elapsed() >= tick_rate {
            game.tick(requested.take());
            last_game_update = Instant::now();
        }

        renderer.render(&game)?;
    }

    renderer.cleanup()?;
    log::info!("Finished with score {}", game.score());
    Ok(())
}
