//! What the renderer gets to see each frame.

use std::fmt;

use crate::{Coords, Direction, GameState, Result};
use crate::state::MOVE_TIMER_MAX;

/// Offset value shown as a speed of 1.00.
const SPEED_BASELINE: f32 = 19.0;

/// Score, speed and remaining space, derived from the state.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Hud {
    pub score: usize,
    pub speed: f32,
    pub speed_max: bool,
    pub space_left: usize,
}

impl Hud {
    pub fn project(state: &GameState) -> Self {
        let offset = state.move_timer_offset();
        Hud {
            score: state.snake().len(),
            speed: offset.min(MOVE_TIMER_MAX) - SPEED_BASELINE,
            speed_max: offset >= MOVE_TIMER_MAX,
            space_left: state.free_cells().len(),
        }
    }

    pub fn score_text(&self) -> String {
        format!("Score: {}", self.score)
    }

    pub fn speed_text(&self) -> String {
        if self.speed_max {
            format!("Speed: {:.2} (MAX)", self.speed)
        } else {
            format!("Speed: {:.2}", self.speed)
        }
    }

    pub fn space_left_text(&self) -> String {
        format!("Space Left: {}", self.space_left)
    }
}

impl fmt::Display for Hud {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}  {}  {}", self.score_text(), self.speed_text(), self.space_left_text())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Fill {
    Even,
    Odd,
    Third,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BodyPart {
    Head,
    Middle,
    NearTail,
    Tail,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SegmentStyle {
    pub fill: Fill,
    pub part: BodyPart,
}

/// Stripes the body: even segments, then every third odd one, then the rest.
/// The last two segments get tail emphasis; the head never does.
pub fn segment_style(index: usize, len: usize) -> SegmentStyle {
    let fill = if index % 2 == 0 {
        Fill::Even
    } else if index % 3 == 0 {
        Fill::Third
    } else {
        Fill::Odd
    };

    let part = if index == 0 {
        BodyPart::Head
    } else if index + 1 == len {
        BodyPart::Tail
    } else if index + 2 == len {
        BodyPart::NearTail
    } else {
        BodyPart::Middle
    };

    SegmentStyle { fill, part }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    pub index: usize,
    pub pos: Coords,
    pub style: SegmentStyle,
}

/// Snapshot of one frame, head first.
#[derive(Clone, Debug)]
pub struct Frame {
    pub segments: Vec<Segment>,
    pub food: Option<Coords>,
    pub heading: Direction,
    pub hud: Hud,
}

impl Frame {
    pub fn capture(state: &GameState) -> Self {
        let body = state.snake().body();
        let segments = body.iter()
            .enumerate()
            .map(|(index, &pos)| Segment { index, pos, style: segment_style(index, body.len()) })
            .collect();

        Frame {
            segments,
            food: state.food(),
            heading: state.snake().direction(),
            hud: Hud::project(state),
        }
    }
}

pub trait Renderer {
    fn render(&mut self, frame: &Frame) -> Result<()>;
}
