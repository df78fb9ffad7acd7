use crate::config::GameConfig;
use crate::entity::Position;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppleSpawn {
    pub position: Position,
    pub score: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BombSpawn {
    pub origin: Position,
    pub radius: i32,
    pub time: i32,
}

/// Source of spawn data for apples and bombs.
///
/// Every draw must land inside the board; radius and time are non-negative.
/// The game keeps drawing until a candidate fits, so a source must not get
/// stuck offering the same occupied cell forever.
pub trait SpawnSource {
    fn next_apple(&mut self) -> AppleSpawn;
    fn next_bomb(&mut self) -> BombSpawn;
}

/// Uniform spawns over the whole board.
#[derive(Debug, Clone)]
pub struct RandomSpawner<R: Rng = StdRng> {
    rng: R,
    width: i32,
    height: i32,
    apple_scores: RangeInclusive<u32>,
    bomb_radius: RangeInclusive<i32>,
    bomb_timer: RangeInclusive<i32>,
}

impl<R: Rng> RandomSpawner<R> {
    pub fn new(config: &GameConfig, rng: R) -> Self {
        Self {
            rng,
            width: config.width,
            height: config.height,
            apple_scores: config.apple_scores.clone(),
            bomb_radius: config.bomb_radius.clone(),
            bomb_timer: config.bomb_timer.clone(),
        }
    }

    fn random_cell(&mut self) -> Position {
        let x = self.rng.gen_range(0..self.width);
        let y = self.rng.gen_range(0..self.height);
        Position::new(x, y)
    }
}

impl RandomSpawner<StdRng> {
    /// Deterministic spawns for replays and tests
    pub fn seeded(config: &GameConfig, seed: u64) -> Self {
        Self::new(config, StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy(config: &GameConfig) -> Self {
        Self::new(config, StdRng::from_entropy())
    }
}

impl<R: Rng> SpawnSource for RandomSpawner<R> {
    fn next_apple(&mut self) -> AppleSpawn {
        let position = self.random_cell();
        let score = self.rng.gen_range(self.apple_scores.clone());
        AppleSpawn { position, score }
    }

    fn next_bomb(&mut self) -> BombSpawn {
        let origin = self.random_cell();
        let radius = self.rng.gen_range(self.bomb_radius.clone());
        let time = self.rng.gen_range(self.bomb_timer.clone());
        BombSpawn { origin, radius, time }
    }
}

/// Replays fixed spawn lists in a loop.
#[cfg(test)]
#[derive(Debug, Clone)]
pub(crate) struct ScriptedSpawner {
    apples: Vec<AppleSpawn>,
    bombs: Vec<BombSpawn>,
    next_apple: usize,
    next_bomb: usize,
}

#[cfg(test)]
impl ScriptedSpawner {
    pub(crate) fn new(apples: &[((i32, i32), u32)], bombs: &[((i32, i32), i32, i32)]) -> Self {
        assert!(!apples.is_empty() && !bombs.is_empty(), "script needs apples and bombs");
        Self {
            apples: apples
                .iter()
                .map(|&(p, score)| AppleSpawn {
                    position: p.into(),
                    score,
                })
                .collect(),
            bombs: bombs
                .iter()
                .map(|&(p, radius, time)| BombSpawn {
                    origin: p.into(),
                    radius,
                    time,
                })
                .collect(),
            next_apple: 0,
            next_bomb: 0,
        }
    }
}

#[cfg(test)]
impl SpawnSource for ScriptedSpawner {
    fn next_apple(&mut self) -> AppleSpawn {
        let spawn = self.apples[self.next_apple % self.apples.len()];
        self.next_apple += 1;
        spawn
    }

    fn next_bomb(&mut self) -> BombSpawn {
        let spawn = self.bombs[self.next_bomb % self.bombs.len()];
        self.next_bomb += 1;
        spawn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_spawner_is_deterministic() {
        let config = GameConfig::default();
        let mut a = RandomSpawner::seeded(&config, 7);
        let mut b = RandomSpawner::seeded(&config, 7);
        for _ in 0..20 {
            assert_eq!(a.next_apple(), b.next_apple());
            assert_eq!(a.next_bomb(), b.next_bomb());
        }
    }

    #[test]
    fn test_scripted_spawner_cycles() {
        let mut spawner = ScriptedSpawner::new(&[((1, 1), 5), ((2, 2), 6)], &[((3, 3), 1, 4)]);
        assert_eq!(spawner.next_apple().position, Position::new(1, 1));
        assert_eq!(spawner.next_apple().score, 6);
        assert_eq!(spawner.next_apple().position, Position::new(1, 1));
        assert_eq!(spawner.next_bomb(), spawner.next_bomb());
    }
}
