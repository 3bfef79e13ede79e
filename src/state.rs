use std::time::Duration;

use log::{debug, info};
use rand::{rngs::StdRng, seq::SliceRandom, Rng};

use crate::{Config, Coords, GameError, Result};
use crate::snake::{Snake, Direction::Down};

/// Movement happens once the accumulator reaches this many speed units.
pub const MOVE_TIMER_MAX: f32 = 80.0;
/// Speed units added per frame at the start of a game. Lower is slower.
pub const INITIAL_MOVE_TIMER_OFFSET: f32 = 20.0;
/// Added to the offset on every second piece of food.
pub const SPEED_UP_STEP: f32 = 0.44;

// The first head lands in cells 2..5 on both axes.
const SPAWN_CELLS: std::ops::Range<i32> = 2..5;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickStatus {
    Continue,
    AteFood,
    /// The head ran into the body. Terminal.
    Collided,
    /// No cell left to place food on. Terminal.
    Completed,
}

impl TickStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, TickStatus::Collided | TickStatus::Completed)
    }
}

pub struct GameState {
    config: Config,
    snake: Snake,
    food: Option<Coords>,
    free_cells: Vec<Coords>,
    move_timer: f32,
    move_timer_offset: f32,
    growth_count: u32,
    status: TickStatus,
    rng: StdRng,
}

impl GameState {
    /// Starts a game: one-segment snake heading down near the top-left corner,
    /// food on a random cell.
    pub fn new(config: &Config, mut rng: StdRng) -> Result<Self> {
        config.validate()?;

        let head = (
            config.cell_size * rng.gen_range(SPAWN_CELLS),
            config.cell_size * rng.gen_range(SPAWN_CELLS),
        );

        let mut state = GameState::blank(config, Snake::new(head, Down), grid_cells(config), rng);
        state.food = state.spawn_food();
        if state.food.is_none() {
            state.status = TickStatus::Completed;
        }

        info!("new game on a {}x{} grid, head at {:?}, food at {:?}",
              config.columns(), config.rows(), head, state.food);
        Ok(state)
    }

    /// Builds a game from a known snake and food cell.
    pub fn from_parts(config: &Config, snake: Snake, food: Coords, rng: StdRng) -> Result<Self> {
        config.validate()?;

        if let Some(pos) = snake.body().iter().chain(Some(&food)).find(|pos| !config.contains(**pos)) {
            return Err(GameError::OffGrid(*pos));
        }

        let mut free_cells = grid_cells(config);
        free_cells.retain(|cell| *cell != food);

        let mut state = GameState::blank(config, snake, free_cells, rng);
        state.food = Some(food);
        Ok(state)
    }

    fn blank(config: &Config, snake: Snake, free_cells: Vec<Coords>, rng: StdRng) -> Self {
        GameState {
            config: config.clone(),
            snake,
            food: None,
            free_cells,
            move_timer: 0.0,
            move_timer_offset: INITIAL_MOVE_TIMER_OFFSET,
            growth_count: 0,
            status: TickStatus::Continue,
            rng,
        }
    }

    /// Queues a turn for the next movement step. Reversals are ignored and the
    /// latest request wins.
    pub fn apply_direction(&mut self, requested: crate::Direction) {
        self.snake.set_direction(requested);
    }

    /// Runs one simulation step. Food and body collisions are checked against
    /// the head as it stands before this tick's movement.
    pub fn tick(&mut self, elapsed_units: f32) -> TickStatus {
        if self.status.is_terminal() {
            return self.status;
        }

        let mut ate_food = false;
        if self.food == Some(self.snake.head()) {
            self.snake.grow();
            self.growth_count += 1;

            if self.growth_count % 2 == 0 {
                self.move_timer_offset = (self.move_timer_offset + SPEED_UP_STEP).min(MOVE_TIMER_MAX);
            }

            self.food = self.spawn_food();
            debug!("ate food, length {} offset {:.2} next food {:?}",
                   self.snake.len(), self.move_timer_offset, self.food);

            if self.food.is_none() {
                info!("no free cells left, game complete at length {}", self.snake.len());
                self.status = TickStatus::Completed;
                return self.status;
            }
            ate_food = true;
        }

        if self.snake.bites_itself() {
            info!("snake bit itself at {:?}, final length {}", self.snake.head(), self.snake.len());
            self.status = TickStatus::Collided;
            return self.status;
        }

        self.move_timer += elapsed_units;
        if self.move_timer >= MOVE_TIMER_MAX {
            let Config { width, height, cell_size, .. } = self.config;
            self.snake.move_step(width, height, cell_size);
            self.move_timer = 0.0;
        }

        self.status = if ate_food { TickStatus::AteFood } else { TickStatus::Continue };
        self.status
    }

    /// Ticks with wall-clock time. One frame at the configured rate is worth
    /// exactly one offset's worth of speed units.
    pub fn advance(&mut self, elapsed: Duration) -> TickStatus {
        let frames = elapsed.as_secs_f32() * self.config.fps as f32;
        self.tick(self.move_timer_offset * frames)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Option<Coords> {
        self.food
    }

    pub fn free_cells(&self) -> &[Coords] {
        &self.free_cells
    }

    pub fn move_timer(&self) -> f32 {
        self.move_timer
    }

    pub fn move_timer_offset(&self) -> f32 {
        self.move_timer_offset
    }

    pub fn growth_count(&self) -> u32 {
        self.growth_count
    }

    pub fn status(&self) -> TickStatus {
        self.status
    }

    ///////////////////////////////////////////////////////////////////////////

    // Cells under the snake stay in the pool, so food may land on the body
    // unless `food_avoids_snake` is set.
    fn spawn_food(&mut self) -> Option<Coords> {
        let body = self.snake.body();
        let avoid_snake = self.config.food_avoids_snake;
        let free_cells = &self.free_cells;

        let choices: Vec<usize> = (0..free_cells.len())
            .filter(|&i| !avoid_snake || !body.contains(&free_cells[i]))
            .collect();
        let idx = *choices.choose(&mut self.rng)?;

        Some(self.free_cells.swap_remove(idx))
    }
}

fn grid_cells(config: &Config) -> Vec<Coords> {
    let step = config.cell_size as usize;
    let mut cells = Vec::with_capacity(config.columns() as usize * config.rows() as usize);

    for x in (0..config.width).step_by(step) {
        for y in (0..config.height).step_by(step) {
            cells.push((x, y));
        }
    }

    cells
}
