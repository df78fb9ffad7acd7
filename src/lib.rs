pub mod config;
pub mod entity;
pub mod game;
pub mod renderer;
pub mod snake;
pub mod spawn;
#[cfg(not(target_arch = "wasm32"))]
pub mod cli_renderer;

pub use config::{ConfigError, GameConfig};
pub use entity::{Apple, Bomb, BombPhase, Direction, Position};
pub use game::{Colour, EndReason, Game, GameState};
pub use renderer::{Input, Renderer};
pub use snake::{Body, Snake};
pub use spawn::{AppleSpawn, BombSpawn, RandomSpawner, SpawnSource};
#[cfg(not(target_arch = "wasm32"))]
pub use cli_renderer::CliRenderer;
