use std::{path::PathBuf, time::Duration};

use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};

use crate::{Coords, GameError, Result};

/// Smallest field, in cells, that still fits the spawn region on both axes.
pub const MIN_FIELD_CELLS: i32 = 5;
/// Largest number of cells a field may have.
pub const MAX_FIELD_CELLS: i32 = 1 << 16;

#[derive(Debug, Clone, Parser)]
#[command(name = "wrapsnake", about = "Snake on a wraparound grid, in your terminal")]
pub struct Config {
    /// Play field width in pixels
    #[arg(long, default_value_t = 420)]
    pub width: i32,

    /// Play field height in pixels
    #[arg(long, default_value_t = 360)]
    pub height: i32,

    /// Side of one grid cell in pixels
    #[arg(long, default_value_t = 12)]
    pub cell_size: i32,

    /// Target frames per second
    #[arg(long, default_value_t = 30)]
    pub fps: u32,

    /// Seed for snake and food placement
    #[arg(long)]
    pub seed: Option<u64>,

    /// Never spawn food underneath the snake
    #[arg(long)]
    pub food_avoids_snake: bool,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            width: 420,
            height: 360,
            cell_size: 12,
            fps: 30,
            seed: None,
            food_avoids_snake: false,
            log_file: None,
        }
    }
}

impl Config {
    /// Rejects any field the game could not be placed on.
    pub fn validate(&self) -> Result<()> {
        if self.cell_size <= 0 {
            return Err(GameError::InvalidCellSize { cell_size: self.cell_size });
        }

        if self.width <= 0 || self.height <= 0
            || self.width % self.cell_size != 0 || self.height % self.cell_size != 0 {
            return Err(GameError::MisalignedField {
                width: self.width,
                height: self.height,
                cell_size: self.cell_size,
            });
        }

        if self.columns() < MIN_FIELD_CELLS || self.rows() < MIN_FIELD_CELLS {
            return Err(GameError::FieldTooSmall {
                columns: self.columns(),
                rows: self.rows(),
                min: MIN_FIELD_CELLS,
            });
        }

        match self.columns().checked_mul(self.rows()) {
            Some(cells) if cells <= MAX_FIELD_CELLS => {},
            _ => return Err(GameError::FieldTooLarge {
                columns: self.columns(),
                rows: self.rows(),
                max: MAX_FIELD_CELLS,
            }),
        }

        if self.fps == 0 {
            return Err(GameError::ZeroFps);
        }

        Ok(())
    }

    pub fn columns(&self) -> i32 {
        self.width / self.cell_size
    }

    pub fn rows(&self) -> i32 {
        self.height / self.cell_size
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.fps.max(1)))
    }

    pub fn contains(&self, pos: Coords) -> bool {
        let (x, y) = pos;
        (0..self.width).contains(&x) && (0..self.height).contains(&y)
            && x % self.cell_size == 0 && y % self.cell_size == 0
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_a_35_by_30_grid() {
        let config = Config::default();
        config.validate().unwrap();
        assert_eq!((config.columns(), config.rows()), (35, 30));
    }

    #[test]
    fn parses_command_line_flags() {
        let config = Config::try_parse_from([
            "wrapsnake", "--width", "100", "--height", "80", "--cell-size", "10",
            "--seed", "7", "--food-avoids-snake",
        ]).unwrap();

        assert_eq!((config.width, config.height, config.cell_size), (100, 80, 10));
        assert_eq!(config.seed, Some(7));
        assert!(config.food_avoids_snake);
        assert_eq!(config.fps, 30);
    }

    #[test]
    fn rejects_degenerate_fields() {
        let zero_cell = Config { cell_size: 0, ..Config::default() };
        assert!(matches!(zero_cell.validate(), Err(GameError::InvalidCellSize { .. })));

        let misaligned = Config { width: 425, ..Config::default() };
        assert!(matches!(misaligned.validate(), Err(GameError::MisalignedField { .. })));

        let tiny = Config { width: 40, height: 40, cell_size: 10, ..Config::default() };
        assert!(matches!(tiny.validate(), Err(GameError::FieldTooSmall { columns: 4, rows: 4, .. })));

        let huge = Config { width: 1_000_000, height: 1_000_000, cell_size: 1, ..Config::default() };
        assert!(matches!(huge.validate(), Err(GameError::FieldTooLarge { .. })));

        let wide = Config { width: 65536 * 12, height: 120, cell_size: 12, ..Config::default() };
        assert!(matches!(wide.validate(), Err(GameError::FieldTooLarge { columns: 65536, rows: 10, .. })));

        let frozen = Config { fps: 0, ..Config::default() };
        assert!(matches!(frozen.validate(), Err(GameError::ZeroFps)));
    }

    #[test]
    fn contains_only_aligned_cells_inside_the_field() {
        let config = Config { width: 50, height: 50, cell_size: 10, ..Config::default() };
        assert!(config.contains((0, 0)));
        assert!(config.contains((40, 40)));
        assert!(!config.contains((50, 0)));
        assert!(!config.contains((-10, 0)));
        assert!(!config.contains((15, 0)));
    }
}
