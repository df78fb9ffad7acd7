use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn moved(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Position::new(self.x + dx, self.y + dy)
    }

    pub fn manhattan_distance(&self, other: Position) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Position::new(x, y)
    }
}

/// Heading of the snake. `Up` grows `y`, `Right` grows `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Unit step applied to the head when moving in this direction.
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Headings reachable in one turn: straight on or either side, never a reversal.
    pub const fn allowed_turns(self) -> &'static [Direction; 3] {
        match self {
            Direction::Up => &[Direction::Up, Direction::Right, Direction::Left],
            Direction::Down => &[Direction::Down, Direction::Right, Direction::Left],
            Direction::Right => &[Direction::Right, Direction::Up, Direction::Down],
            Direction::Left => &[Direction::Left, Direction::Up, Direction::Down],
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Interprets a raw key name from the input layer. Anything other than the
    /// four exact names means no turn was requested.
    pub fn parse_request(raw: &str) -> Option<Direction> {
        raw.parse().ok()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownDirection;

impl FromStr for Direction {
    type Err = UnknownDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Up" => Ok(Direction::Up),
            "Down" => Ok(Direction::Down),
            "Left" => Ok(Direction::Left),
            "Right" => Ok(Direction::Right),
            _ => Err(UnknownDirection),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Apple {
    pub position: Position,
    pub score: u32,
}

impl Apple {
    pub fn new(position: Position, score: u32) -> Self {
        Self { position, score }
    }
}

/// Lifecycle of a bomb, derived from its countdown and radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BombPhase {
    Armed,
    Exploding,
    Spent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bomb {
    origin: Position,
    radius: i32,
    time: i32,
}

impl Bomb {
    pub fn new(origin: Position, radius: i32, time: i32) -> Self {
        Self { origin, radius, time }
    }

    pub fn origin(&self) -> Position {
        self.origin
    }

    pub fn radius(&self) -> i32 {
        self.radius
    }

    pub fn time(&self) -> i32 {
        self.time
    }

    pub fn tick(&mut self) {
        self.time -= 1;
    }

    pub fn phase(&self) -> BombPhase {
        if self.is_finished() {
            BombPhase::Spent
        } else if self.time <= 0 {
            BombPhase::Exploding
        } else {
            BombPhase::Armed
        }
    }

    pub fn is_exploding(&self) -> bool {
        self.time <= 0 && self.time + self.radius >= 0
    }

    pub fn is_finished(&self) -> bool {
        self.time + self.radius < 0
    }

    /// Cells the bomb currently occupies. An armed bomb sits on its origin; once
    /// the countdown passes zero the shockwave is the ring at Manhattan distance
    /// `-time`, and a spent bomb occupies nothing.
    pub fn positions(&self) -> Vec<Position> {
        match self.phase() {
            BombPhase::Armed => vec![self.origin],
            BombPhase::Exploding => self.shockwave(),
            BombPhase::Spent => Vec::new(),
        }
    }

    fn shockwave(&self) -> Vec<Position> {
        if self.time == 0 {
            return vec![self.origin];
        }
        let r = -self.time;
        let Position { x, y } = self.origin;
        // Walk inward from each corner of the diamond; the four walks never meet.
        let mut cells = Vec::with_capacity(4 * r as usize);
        for i in 0..r {
            cells.push(Position::new(x - r + i, y + i));
            cells.push(Position::new(x + i, y + r - i));
            cells.push(Position::new(x + r - i, y - i));
            cells.push(Position::new(x - i, y - r + i));
        }
        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn cells(list: &[(i32, i32)]) -> Vec<Position> {
        list.iter().map(|&p| Position::from(p)).collect()
    }

    #[test]
    fn test_bomb_timeline() {
        let mut bomb = Bomb::new(Position::new(2, 2), 2, 2);
        assert_eq!(bomb.positions(), cells(&[(2, 2)]));
        assert_eq!(bomb.phase(), BombPhase::Armed);

        bomb.tick();
        assert_eq!(bomb.positions(), cells(&[(2, 2)]));
        assert!(!bomb.is_exploding());

        bomb.tick();
        assert_eq!(bomb.positions(), cells(&[(2, 2)]));
        assert!(bomb.is_exploding());

        bomb.tick();
        assert_eq!(bomb.positions(), cells(&[(1, 2), (2, 3), (3, 2), (2, 1)]));

        bomb.tick();
        let ring: HashSet<Position> = bomb.positions().into_iter().collect();
        let expected: HashSet<Position> = cells(&[
            (0, 2),
            (1, 1),
            (2, 0),
            (3, 1),
            (4, 2),
            (3, 3),
            (2, 4),
            (1, 3),
        ])
        .into_iter()
        .collect();
        assert_eq!(ring, expected);
        assert!(bomb.is_exploding());

        bomb.tick();
        assert!(bomb.is_finished());
        assert_eq!(bomb.phase(), BombPhase::Spent);
        assert!(bomb.positions().is_empty());
    }

    #[test]
    fn test_zero_radius_bomb_flashes_once() {
        let mut bomb = Bomb::new(Position::new(5, 5), 0, 0);
        assert!(bomb.is_exploding());
        assert_eq!(bomb.positions(), cells(&[(5, 5)]));

        bomb.tick();
        assert!(bomb.is_finished());
        assert!(bomb.positions().is_empty());
    }

    #[test]
    fn test_turn_tables_never_reverse() {
        for direction in Direction::ALL {
            let turns = direction.allowed_turns();
            assert!(turns.contains(&direction));
            assert!(!turns.contains(&direction.opposite()));
        }
    }

    #[test]
    fn test_parse_request() {
        assert_eq!(Direction::parse_request("Left"), Some(Direction::Left));
        assert_eq!(Direction::parse_request("Up"), Some(Direction::Up));
        assert_eq!(Direction::parse_request("up"), None);
        assert_eq!(Direction::parse_request("Space"), None);
        assert_eq!(Direction::parse_request(""), None);
    }

    #[test]
    fn test_up_grows_y() {
        let origin = Position::new(3, 3);
        assert_eq!(origin.moved(Direction::Up), Position::new(3, 4));
        assert_eq!(origin.moved(Direction::Down), Position::new(3, 2));
        assert_eq!(origin.moved(Direction::Left), Position::new(2, 3));
        assert_eq!(origin.moved(Direction::Right), Position::new(4, 3));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    proptest! {
        #[test]
        fn prop_shockwave_is_distinct_diamond(
            x in -20i32..20,
            y in -20i32..20,
            radius in 0i32..12,
            time in 0i32..8,
        ) {
            let origin = Position::new(x, y);
            let mut bomb = Bomb::new(origin, radius, time);

            // Run the whole lifecycle and one tick past it
            for _ in 0..(time + radius + 2) {
                let cells = bomb.positions();
                let distinct: HashSet<Position> = cells.iter().copied().collect();
                prop_assert_eq!(distinct.len(), cells.len(), "duplicate cells at time {}", bomb.time());

                match bomb.phase() {
                    BombPhase::Armed => prop_assert_eq!(cells, vec![origin]),
                    BombPhase::Exploding if bomb.time() == 0 => prop_assert_eq!(cells, vec![origin]),
                    BombPhase::Exploding => {
                        let r = -bomb.time();
                        prop_assert_eq!(cells.len(), (4 * r) as usize);
                        for cell in &cells {
                            prop_assert_eq!(cell.manhattan_distance(origin), r);
                        }
                    }
                    BombPhase::Spent => prop_assert!(cells.is_empty()),
                }
                bomb.tick();
            }
            prop_assert!(bomb.is_finished());
        }
    }
}
