use crate::entity::{Direction, Position};
use std::collections::VecDeque;

/// Ordered chain of body cells, tail at the front and head at the back.
#[derive(Clone, Debug, Default)]
pub struct Body {
    cells: VecDeque<Position>,
}

impl Body {
    pub fn new() -> Self {
        Self {
            cells: VecDeque::new(),
        }
    }

    /// Add a new head segment
    pub fn append_head(&mut self, position: Position) {
        self.cells.push_back(position);
    }

    /// Drop the tail segment. The caller decides when trimming is due.
    pub fn advance_tail(&mut self) -> Option<Position> {
        self.cells.pop_front()
    }

    pub fn head(&self) -> Option<Position> {
        self.cells.back().copied()
    }

    pub fn tail(&self) -> Option<Position> {
        self.cells.front().copied()
    }

    /// Cells from tail to head
    pub fn positions(&self) -> Vec<Position> {
        self.cells.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Snake {
    body: Body,
    length: usize,
    direction: Direction,
}

impl Snake {
    /// Lays out `length` segments starting at `tail` and extending along `direction`.
    pub fn new(tail: Position, direction: Direction, length: usize) -> Self {
        let length = length.max(1);
        let mut body = Body::new();
        let mut cell = tail;
        body.append_head(cell);
        for _ in 1..length {
            cell = cell.moved(direction);
            body.append_head(cell);
        }

        Self {
            body,
            length,
            direction,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Target size the body grows towards
    pub fn length(&self) -> usize {
        self.length
    }

    /// Number of segments actually on the board
    pub fn current_length(&self) -> usize {
        self.body.len()
    }

    pub fn head(&self) -> Position {
        // Body always holds at least one segment: construction lays down one and
        // a move appends before it trims.
        self.body.head().unwrap_or_else(|| unreachable!("snake body is never empty"))
    }

    pub fn positions(&self) -> Vec<Position> {
        self.body.positions()
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Requests a new heading. Reversals are ignored and the old heading stays.
    pub fn turn(&mut self, requested: Direction) {
        if self.direction.allowed_turns().contains(&requested) {
            self.direction = requested;
        }
    }

    pub fn move_forward(&mut self) {
        let new_head = self.head().moved(self.direction);
        self.body.append_head(new_head);

        if self.body.len() > self.length {
            self.body.advance_tail();
        }
    }

    /// Raise the target length. The tail stops being trimmed until the body catches up.
    pub fn grow_by(&mut self, amount: usize) {
        self.length += amount;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(list: &[(i32, i32)]) -> Vec<Position> {
        list.iter().map(|&p| Position::from(p)).collect()
    }

    #[test]
    fn test_initial_layout_runs_from_tail() {
        let snake = Snake::new(Position::new(10, 8), Direction::Up, 3);
        assert_eq!(snake.positions(), cells(&[(10, 8), (10, 9), (10, 10)]));
        assert_eq!(snake.head(), Position::new(10, 10));
        assert_eq!(snake.current_length(), 3);
    }

    #[test]
    fn test_zero_length_still_has_a_head() {
        let snake = Snake::new(Position::new(1, 1), Direction::Right, 0);
        assert_eq!(snake.positions(), cells(&[(1, 1)]));
        assert_eq!(snake.length(), 1);
    }

    #[test]
    fn test_move_keeps_length() {
        let mut snake = Snake::new(Position::new(10, 8), Direction::Up, 3);
        snake.move_forward();
        assert_eq!(snake.positions(), cells(&[(10, 9), (10, 10), (10, 11)]));
        assert_eq!(snake.current_length(), 3);
    }

    #[test]
    fn test_reverse_turn_is_ignored() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Up, 3);
        snake.turn(Direction::Down);
        assert_eq!(snake.direction(), Direction::Up);

        snake.turn(Direction::Left);
        assert_eq!(snake.direction(), Direction::Left);

        snake.turn(Direction::Right);
        assert_eq!(snake.direction(), Direction::Left);

        snake.move_forward();
        assert_eq!(snake.head(), Position::new(4, 7));
    }

    #[test]
    fn test_growth_is_gradual() {
        let mut snake = Snake::new(Position::new(0, 0), Direction::Right, 2);
        snake.grow_by(3);
        assert_eq!(snake.length(), 5);
        assert_eq!(snake.current_length(), 2);

        for expected in 3..=5 {
            snake.move_forward();
            assert_eq!(snake.current_length(), expected);
        }

        snake.move_forward();
        assert_eq!(snake.current_length(), 5);
        assert_eq!(snake.body().tail(), Some(Position::new(1, 0)));
        assert_eq!(snake.head(), Position::new(5, 0));
    }

    #[test]
    fn test_body_trims_from_tail() {
        let mut body = Body::new();
        assert!(body.is_empty());
        body.append_head(Position::new(0, 0));
        body.append_head(Position::new(0, 1));
        assert_eq!(body.advance_tail(), Some(Position::new(0, 0)));
        assert_eq!(body.positions(), cells(&[(0, 1)]));
        assert_eq!(body.head(), body.tail());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn direction_strategy() -> impl Strategy<Value = Direction> {
        prop_oneof![
            Just(Direction::Up),
            Just(Direction::Down),
            Just(Direction::Left),
            Just(Direction::Right),
        ]
    }

    proptest! {
        #[test]
        fn prop_current_length_never_exceeds_length(
            initial_length in 1usize..8,
            steps in prop::collection::vec((direction_strategy(), 0usize..4), 1..80),
        ) {
            let mut snake = Snake::new(Position::new(0, 0), Direction::Right, initial_length);

            for (direction, growth) in steps {
                let before = snake.direction();
                snake.turn(direction);
                prop_assert_ne!(snake.direction(), before.opposite());

                snake.grow_by(growth);
                let head = snake.head();
                snake.move_forward();

                prop_assert!(snake.current_length() <= snake.length());
                prop_assert_eq!(snake.head(), head.moved(snake.direction()));
                prop_assert_eq!(snake.positions().last().copied(), Some(snake.head()));
            }
        }
    }
}
