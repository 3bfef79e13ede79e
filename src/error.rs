use crate::Coords;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GameError>;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("cell size must be positive, got {cell_size}")]
    InvalidCellSize { cell_size: i32 },
    #[error("play field {width}x{height} is not a positive multiple of cell size {cell_size}")]
    MisalignedField { width: i32, height: i32, cell_size: i32 },
    #[error("play field of {columns}x{rows} cells is too small, need at least {min}x{min}")]
    FieldTooSmall { columns: i32, rows: i32, min: i32 },
    #[error("play field of {columns}x{rows} cells is too large, at most {max} cells allowed")]
    FieldTooLarge { columns: i32, rows: i32, max: i32 },
    #[error("frame rate must be at least 1")]
    ZeroFps,
    #[error("a snake needs at least one segment")]
    EmptySnake,
    #[error("cell {0:?} is not on the play field grid")]
    OffGrid(Coords),
    #[error("terminal is {actual:?} but the game needs {needed:?}")]
    TerminalTooSmall { needed: (u16, u16), actual: (u16, u16) },
    #[error("terminal error: {0}")]
    Terminal(#[from] crossterm::ErrorKind),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
