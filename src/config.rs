//! Board dimensions, starting snake and spawn ranges.

use crate::entity::{Direction, Position};
use std::ops::RangeInclusive;
use thiserror::Error;

pub const DEFAULT_WIDTH: i32 = 40;
pub const DEFAULT_HEIGHT: i32 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board must be at least 1x1, got {width}x{height}")]
    EmptyBoard { width: i32, height: i32 },
    #[error("initial snake length must be at least 1")]
    ZeroLength,
    #[error("initial snake leaves the board at ({}, {})", .0.x, .0.y)]
    SnakeOutOfBounds(Position),
    #[error("{reserved} reserved cells cannot hold {apples} apples and a bomb")]
    ReserveTooSmall { reserved: usize, apples: usize },
    #[error("board of {cells} cells with {reserved} reserved has no room for a snake of {length}")]
    NoRoomForSnake {
        cells: usize,
        reserved: usize,
        length: usize,
    },
    #[error("{name} range {start}..={end} is empty or negative")]
    BadRange { name: &'static str, start: i64, end: i64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub width: i32,
    pub height: i32,
    /// Tail cell of the starting snake
    pub initial_position: Position,
    pub initial_direction: Direction,
    pub initial_length: usize,
    /// Segments added per apple eaten
    pub growth_length: usize,
    /// Live apples kept on the board
    pub apple_count: usize,
    /// Cells that must stay free of the snake for the game to go on
    pub reserved_cells: usize,
    pub apple_scores: RangeInclusive<u32>,
    pub bomb_radius: RangeInclusive<i32>,
    pub bomb_timer: RangeInclusive<i32>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            initial_position: Position::new(10, 8),
            initial_direction: Direction::Up,
            initial_length: 3,
            growth_length: 3,
            apple_count: 3,
            reserved_cells: 4,
            apple_scores: 1..=9,
            bomb_radius: 2..=6,
            bomb_timer: 10..=30,
        }
    }
}

impl GameConfig {
    pub fn with_board(mut self, width: i32, height: i32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn in_bounds(&self, position: Position) -> bool {
        position.x >= 0 && position.y >= 0 && position.x < self.width && position.y < self.height
    }

    pub fn cell_count(&self) -> usize {
        (self.width.max(0) as usize) * (self.height.max(0) as usize)
    }

    /// Largest snake the board tolerates before the game ends.
    pub fn capacity(&self) -> usize {
        self.cell_count().saturating_sub(self.reserved_cells)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < 1 || self.height < 1 {
            return Err(ConfigError::EmptyBoard {
                width: self.width,
                height: self.height,
            });
        }
        if self.initial_length == 0 {
            return Err(ConfigError::ZeroLength);
        }

        let mut cell = self.initial_position;
        for i in 0..self.initial_length {
            if i > 0 {
                cell = cell.moved(self.initial_direction);
            }
            if !self.in_bounds(cell) {
                return Err(ConfigError::SnakeOutOfBounds(cell));
            }
        }

        if self.reserved_cells < self.apple_count + 1 {
            return Err(ConfigError::ReserveTooSmall {
                reserved: self.reserved_cells,
                apples: self.apple_count,
            });
        }
        if self.initial_length >= self.capacity() {
            return Err(ConfigError::NoRoomForSnake {
                cells: self.cell_count(),
                reserved: self.reserved_cells,
                length: self.initial_length,
            });
        }

        check_range("apple score", *self.apple_scores.start() as i64, *self.apple_scores.end() as i64)?;
        check_range("bomb radius", *self.bomb_radius.start() as i64, *self.bomb_radius.end() as i64)?;
        check_range("bomb timer", *self.bomb_timer.start() as i64, *self.bomb_timer.end() as i64)?;
        Ok(())
    }
}

fn check_range(name: &'static str, start: i64, end: i64) -> Result<(), ConfigError> {
    if start < 0 || start > end {
        return Err(ConfigError::BadRange { name, start, end });
    }
    Ok(())
}
