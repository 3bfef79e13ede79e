use crate::{Coords, GameError, Result};
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    /// Offset of one step in this direction, in pixels.
    pub fn delta(self, cell_size: i32) -> Coords {
        match self {
            Up => (0, -cell_size),
            Down => (0, cell_size),
            Left => (-cell_size, 0),
            Right => (cell_size, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub fn head_char(self) -> char {
        match self {
            Up => '^',
            Down => 'v',
            Left => '<',
            Right => '>',
        }
    }
}

/// Snake body, head first.
#[derive(Clone, Debug)]
pub struct Snake {
    body: Vec<Coords>,
    direction: Direction,
    next_direction: Direction,
}

impl Snake {
    pub fn new(head: Coords, direction: Direction) -> Self {
        Snake { body: vec![head], direction, next_direction: direction }
    }

    pub fn from_body(body: Vec<Coords>, direction: Direction) -> Result<Self> {
        if body.is_empty() {
            return Err(GameError::EmptySnake);
        }
        Ok(Snake { body, direction, next_direction: direction })
    }

    pub fn body(&self) -> &[Coords] {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn head(&self) -> Coords {
        self.body[0]
    }

    pub fn tail(&self) -> Coords {
        self.body[self.body.len() - 1]
    }

    /// Shifts every segment onto its predecessor, tail first, then moves the head
    /// one cell in the queued direction and wraps it around the field edges.
    /// Returns the new head.
    pub fn move_step(&mut self, width: i32, height: i32, cell_size: i32) -> Coords {
        self.direction = self.next_direction;

        for i in (1..self.body.len()).rev() {
            self.body[i] = self.body[i - 1];
        }

        let (dx, dy) = self.direction.delta(cell_size);
        let (x, y) = self.body[0];
        let new_head = (wrap(x + dx, width, cell_size), wrap(y + dy, height, cell_size));
        self.body[0] = new_head;
        new_head
    }

    /// Queues a turn for the next step. Turning back onto the direction the
    /// snake last moved in is ignored.
    pub fn set_direction(&mut self, new_direction: Direction) {
        if new_direction != self.direction.opposite() {
            self.next_direction = new_direction;
        }
    }

    /// Direction of the last step taken.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn next_direction(&self) -> Direction {
        self.next_direction
    }

    /// Appends a segment on top of the current tail; it separates on the next step.
    pub fn grow(&mut self) {
        let tail = self.tail();
        self.body.push(tail);
    }

    /// True when the head overlaps a segment between the head and the last one.
    /// The final tail segment is deliberately not checked.
    pub fn bites_itself(&self) -> bool {
        let head = self.head();
        let last = self.body.len().saturating_sub(1);
        self.body.get(1..last).map_or(false, |middle| middle.contains(&head))
    }
}

fn wrap(value: i32, extent: i32, cell_size: i32) -> i32 {
    if value < 0 {
        extent - cell_size
    } else if value > extent - cell_size {
        0
    } else {
        value
    }
}
