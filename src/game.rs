use crate::config::{ConfigError, GameConfig};
use crate::entity::{Apple, Bomb, Direction, Position};
use crate::snake::Snake;
use crate::spawn::{RandomSpawner, SpawnSource};
use std::collections::{BTreeMap, HashSet};

/// Draws after which a placement is reported as suspiciously slow.
const SLOW_PLACEMENT_DRAWS: usize = 10_000;

/// Cell categories the display layer paints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Colour {
    Body,
    Apple,
    BombArmed,
    BombExploding,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    OutOfBounds,
    Bomb,
    SelfCollision,
    BoardFull,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing,
    Over(EndReason),
}

pub struct Game {
    config: GameConfig,
    spawner: Box<dyn SpawnSource>,
    snake: Snake,
    bomb: Option<Bomb>,
    apples: Vec<Apple>,
    score: u32,
    state: GameState,
    snake_cells: Vec<Position>,
    bomb_cells: Vec<Position>,
    apple_cells: Vec<Position>,
}

impl Game {
    pub fn new(config: GameConfig, spawner: Box<dyn SpawnSource>) -> Result<Self, ConfigError> {
        config.validate()?;

        let snake = Snake::new(
            config.initial_position,
            config.initial_direction,
            config.initial_length,
        );

        let mut game = Self {
            config,
            spawner,
            snake,
            bomb: None,
            apples: Vec::new(),
            score: 0,
            state: GameState::Playing,
            snake_cells: Vec::new(),
            bomb_cells: Vec::new(),
            apple_cells: Vec::new(),
        };

        game.update_snake_cells();
        game.check_bomb();
        game.check_apples();

        log::info!(
            "New game on {}x{} board, snake at {:?} heading {:?}",
            game.config.width,
            game.config.height,
            game.config.initial_position,
            game.config.initial_direction
        );

        Ok(game)
    }

    /// Game with uniformly random spawns from a fixed seed
    pub fn seeded(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        let spawner = RandomSpawner::seeded(&config, seed);
        Self::new(config, Box::new(spawner))
    }

    /// Starts over with the same config, continuing to draw from the same spawner.
    pub fn reset(&mut self) {
        self.snake = Snake::new(
            self.config.initial_position,
            self.config.initial_direction,
            self.config.initial_length,
        );
        self.bomb = None;
        self.apples.clear();
        self.score = 0;
        self.state = GameState::Playing;
        self.bomb_cells.clear();
        self.apple_cells.clear();

        self.update_snake_cells();
        self.check_bomb();
        self.check_apples();
        log::info!("Game reset");
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn bomb(&self) -> Option<&Bomb> {
        self.bomb.as_ref()
    }

    pub fn apples(&self) -> &[Apple] {
        &self.apples
    }

    pub fn snake_cells(&self) -> &[Position] {
        &self.snake_cells
    }

    pub fn bomb_cells(&self) -> &[Position] {
        &self.bomb_cells
    }

    pub fn apple_cells(&self) -> &[Position] {
        &self.apple_cells
    }

    /// Plays one round: turn, move, advance the bomb, then check the rules and
    /// refill the board. Returns whether another round can be played.
    pub fn tick(&mut self, direction: Option<Direction>) -> bool {
        if self.state != GameState::Playing {
            return false;
        }

        if let Some(direction) = direction {
            self.snake.turn(direction);
        }
        self.snake.move_forward();
        self.update_snake_cells();

        if let Some(bomb) = self.bomb.as_mut() {
            bomb.tick();
        }
        self.update_bomb_cells();

        if let Some(reason) = self.check_survival().or_else(|| self.check_space()) {
            log::debug!("Game over ({:?}) with score {}", reason, self.score);
            self.state = GameState::Over(reason);
            return false;
        }

        self.eat_apples();
        self.check_bomb();
        self.check_apples();
        true
    }

    /// Cells to paint, keyed by category. The bomb appears under exactly one key
    /// depending on whether it is exploding.
    pub fn as_colours(&self) -> BTreeMap<Colour, Vec<Position>> {
        let bomb_colour = match &self.bomb {
            Some(bomb) if bomb.is_exploding() => Colour::BombExploding,
            _ => Colour::BombArmed,
        };

        let mut colours = BTreeMap::new();
        colours.insert(Colour::Body, self.snake_cells.clone());
        colours.insert(Colour::Apple, self.apple_cells.clone());
        colours.insert(bomb_colour, self.bomb_cells.clone());
        colours
    }

    fn is_placement_empty(&self, position: Position) -> bool {
        !self.bomb_cells.contains(&position)
            && !self.snake_cells.contains(&position)
            && !self.apple_cells.contains(&position)
    }

    fn update_snake_cells(&mut self) {
        self.snake_cells = self.snake.positions();
    }

    fn update_bomb_cells(&mut self) {
        self.bomb_cells = self.bomb.as_ref().map(Bomb::positions).unwrap_or_default();
    }

    fn update_apple_cells(&mut self) {
        self.apple_cells = self.apples.iter().map(|apple| apple.position).collect();
    }

    /// Drops the head from the reported cells so an off-board or swallowed head
    /// is never painted.
    fn hide_head(&mut self) {
        let head = self.snake.head();
        if let Some(index) = self.snake_cells.iter().position(|&cell| cell == head) {
            self.snake_cells.remove(index);
        }
    }

    fn check_survival(&mut self) -> Option<EndReason> {
        if !self.config.in_bounds(self.snake.head()) {
            self.hide_head();
            return Some(EndReason::OutOfBounds);
        }

        let hit_bomb = self
            .snake_cells
            .iter()
            .any(|cell| self.bomb_cells.contains(cell));
        if hit_bomb {
            // The blast is drawn over the snake, an armed bomb swallows the head
            let exploding = self.bomb.as_ref().is_some_and(Bomb::is_exploding);
            if !exploding {
                self.hide_head();
            }
            return Some(EndReason::Bomb);
        }

        let distinct: HashSet<Position> = self.snake_cells.iter().copied().collect();
        if distinct.len() != self.snake_cells.len() {
            return Some(EndReason::SelfCollision);
        }

        None
    }

    fn check_space(&self) -> Option<EndReason> {
        (self.snake_cells.len() >= self.config.capacity()).then_some(EndReason::BoardFull)
    }

    fn eat_apples(&mut self) {
        let head = self.snake.head();
        while let Some(index) = self.apples.iter().position(|apple| apple.position == head) {
            let apple = self.apples.remove(index);
            self.snake.grow_by(self.config.growth_length);
            self.score += apple.score;
            self.update_apple_cells();
            log::debug!("Ate apple at {:?} worth {}, score {}", apple.position, apple.score, self.score);
            self.check_apples();
        }
    }

    /// Replaces the bomb when there is none, when it has burnt out, or when its
    /// shockwave has left the board.
    fn check_bomb(&mut self) {
        let off_board = self.bomb.as_ref().is_some_and(|bomb| {
            !bomb.is_finished() && self.bomb_cells.iter().any(|&cell| !self.config.in_bounds(cell))
        });
        if off_board {
            log::debug!("Shockwave left the board, discarding bomb");
            self.bomb = None;
            self.update_bomb_cells();
        }

        let mut draws = 0;
        while self.bomb.as_ref().map_or(true, Bomb::is_finished) {
            draws += 1;
            warn_if_slow("bomb", draws);

            let spawn = self.spawner.next_bomb();
            let candidate = Bomb::new(spawn.origin, spawn.radius, spawn.time);
            let base = candidate.positions().first().copied();
            if base.is_some_and(|cell| self.is_placement_empty(cell)) {
                log::debug!(
                    "Placed bomb at {:?} (radius {}, timer {})",
                    spawn.origin,
                    spawn.radius,
                    spawn.time
                );
                self.bomb = Some(candidate);
                self.update_bomb_cells();
            }
        }
    }

    /// Removes apples engulfed by the bomb and tops the board back up.
    fn check_apples(&mut self) {
        let before = self.apples.len();
        let bomb_cells = &self.bomb_cells;
        self.apples.retain(|apple| !bomb_cells.contains(&apple.position));
        if self.apples.len() != before {
            log::debug!("Bomb destroyed {} apple(s)", before - self.apples.len());
            self.update_apple_cells();
        }

        let mut draws = 0;
        while self.apples.len() < self.config.apple_count {
            draws += 1;
            warn_if_slow("apple", draws);

            let spawn = self.spawner.next_apple();
            if self.is_placement_empty(spawn.position) {
                self.apples.push(Apple::new(spawn.position, spawn.score));
                self.update_apple_cells();
            }
        }
    }
}

fn warn_if_slow(what: &str, draws: usize) {
    if draws == SLOW_PLACEMENT_DRAWS {
        log::warn!("Still looking for a free cell for the {} after {} draws", what, draws);
    }
}
