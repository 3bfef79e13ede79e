pub mod config;
pub mod error;
pub mod game;
pub mod input;
pub mod snake;
pub mod state;
pub mod term;
pub mod view;

/// Pixel position of a cell's top-left corner. Always a multiple of the cell size.
pub type Coords = (i32, i32);

pub use config::Config;
pub use error::{GameError, Result};
pub use snake::{Direction, Snake};
pub use state::{GameState, TickStatus};
