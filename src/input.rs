use std::ops::ControlFlow;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::{Direction, GameState};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Input {
    Quit,
    Turn(Direction),
}

pub fn map_key(ev: &KeyEvent) -> Option<Input> {
    match ev {
        ev if is_ctrl_c(ev) => Some(Input::Quit),
        KeyEvent { code, modifiers: _ } => match code {
            KeyCode::Char('w') | KeyCode::Up => Some(Input::Turn(Direction::Up)),
            KeyCode::Char('a') | KeyCode::Left => Some(Input::Turn(Direction::Left)),
            KeyCode::Char('s') | KeyCode::Down => Some(Input::Turn(Direction::Down)),
            KeyCode::Char('d') | KeyCode::Right => Some(Input::Turn(Direction::Right)),
            KeyCode::Esc | KeyCode::Char('q') => Some(Input::Quit),
            _ => None,
        }
    }
}

/// Feeds one frame's worth of input to the game, in arrival order.
/// Breaks on the first quit; turns after it are dropped.
pub fn apply_inputs<I>(state: &mut GameState, inputs: I) -> ControlFlow<()>
where
    I: IntoIterator<Item = Input>,
{
    for input in inputs {
        match input {
            Input::Quit => return ControlFlow::Break(()),
            Input::Turn(dir) => state.apply_direction(dir),
        }
    }

    ControlFlow::Continue(())
}

pub fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}
