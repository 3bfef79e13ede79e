use std::{thread::sleep, time::{Duration, Instant}};

use log::{debug, info};

use crate::{Config, GameState, Result, TickStatus};
use crate::input::{apply_inputs, map_key, Input};
use crate::term::TermManager;
use crate::view::{Frame, Hud, Renderer};

/// How a round ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Quit,
    Collided,
    Completed,
}

pub struct SnakeGame {
    config: Config,
    state: GameState,
    term: TermManager,
}

impl SnakeGame {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        // Check the terminal before allocating the free-cell pool
        let term = TermManager::new(&config)?;
        let state = GameState::new(&config, config.rng())?;
        Ok(SnakeGame { config, state, term })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Runs the frame loop until the player quits or the round ends.
    pub fn play(&mut self) -> Result<Outcome> {
        self.term.setup()?;
        self.term.clear()?;
        self.term.draw_borders()?;

        let frame_budget = self.config.frame_duration();
        let mut last_frame = Instant::now();

        let outcome = loop {
            let frame_start = Instant::now();

            let inputs: Vec<Input> = self.term.read_key_events_queue()?
                .iter()
                .filter_map(map_key)
                .collect();

            let ended = run_frame(&mut self.state, inputs, frame_start - last_frame);
            last_frame = frame_start;

            if let Some(outcome) = ended {
                if outcome != Outcome::Quit {
                    self.term.render(&Frame::capture(&self.state))?;
                }
                break outcome;
            }
            self.term.render(&Frame::capture(&self.state))?;

            // Pace to the target frame rate
            if let Some(rest) = frame_budget.checked_sub(frame_start.elapsed()) {
                sleep(rest);
            }
        };

        if outcome != Outcome::Quit {
            self.game_over(outcome)?;
        }

        self.term.restore()?;
        Ok(outcome)
    }

    ///////////////////////////////////////////////////////////////////////////

    fn game_over(&mut self, outcome: Outcome) -> Result<()> {
        let s = if outcome == Outcome::Completed {"Board cleared!"} else {"Game over!"};

        self.term.show_message(&[
            s,
            &*format!("Score: {}", self.state.snake().len()),
            "",
            "Press any key to quit.",
        ])?;

        self.term.read_key_blocking()?;
        Ok(())
    }
}

/// Everything a frame does besides drawing and sleeping: apply the frame's
/// input, then advance the simulation by the elapsed time. Returns how the
/// round ended, if it did.
pub fn run_frame<I>(state: &mut GameState, inputs: I, elapsed: Duration) -> Option<Outcome>
where
    I: IntoIterator<Item = Input>,
{
    if apply_inputs(state, inputs).is_break() {
        info!("quit at length {}", state.snake().len());
        return Some(Outcome::Quit);
    }

    match state.advance(elapsed) {
        TickStatus::Collided => Some(Outcome::Collided),
        TickStatus::Completed => Some(Outcome::Completed),
        TickStatus::AteFood => {
            debug!("{}", Hud::project(state));
            None
        },
        TickStatus::Continue => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Direction::*, Snake};
    use rand::{rngs::StdRng, SeedableRng};

    const NO_INPUT: [Input; 0] = [];

    fn state(body: Vec<(i32, i32)>, direction: crate::Direction) -> GameState {
        let config = Config { width: 100, height: 100, cell_size: 10, fps: 30, ..Config::default() };
        let snake = Snake::from_body(body, direction).unwrap();
        GameState::from_parts(&config, snake, (0, 0), StdRng::seed_from_u64(4)).unwrap()
    }

    #[test]
    fn empty_input_and_short_frames_leave_the_snake_in_place() {
        let mut game = state(vec![(50, 50)], Right);
        assert_eq!(run_frame(&mut game, NO_INPUT, Duration::from_millis(10)), None);
        assert_eq!(game.snake().head(), (50, 50));
    }

    #[test]
    fn irregular_frames_still_step_one_cell_at_a_time() {
        let mut game = state(vec![(50, 50)], Right);
        let frames = [5, 70, 3, 40, 200, 1, 0, 90, 60, 80];
        let mut steps = 0;

        for ms in frames {
            let before = game.snake().head();
            assert_eq!(run_frame(&mut game, NO_INPUT, Duration::from_millis(ms)), None);
            let after = game.snake().head();
            if after != before {
                assert_eq!(after.0 - before.0, 10);
                steps += 1;
            }
        }

        // 0.6 units per ms: the 200 ms frame overshoots and the excess is dropped,
        // the second step lands on the 60 ms frame
        assert_eq!(steps, 2);
        assert_eq!(game.snake().head(), (70, 50));
    }

    #[test]
    fn quit_ends_the_round_before_any_movement() {
        let mut game = state(vec![(50, 50)], Right);
        let outcome = run_frame(&mut game, vec![Input::Turn(Up), Input::Quit], Duration::from_secs(1));

        assert_eq!(outcome, Some(Outcome::Quit));
        assert_eq!(game.snake().head(), (50, 50));
    }

    #[test]
    fn biting_ends_the_round() {
        let mut game = state(vec![(50, 50), (60, 50), (50, 50), (40, 50), (30, 50)], Up);
        assert_eq!(run_frame(&mut game, NO_INPUT, Duration::ZERO), Some(Outcome::Collided));
    }
}
