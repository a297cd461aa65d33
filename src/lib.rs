use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use outcome::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod outcome;
mod types;

/// Board dimensions and mine count.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    rows: Coord,
    cols: Coord,
    mines: CellCount,
}

impl BoardConfig {
    /// Builds a config without validating it. The caller must keep `rows`
    /// and `cols` nonzero and `mines` below `rows * cols`.
    pub const fn new_unchecked(rows: Coord, cols: Coord, mines: CellCount) -> Self {
        Self { rows, cols, mines }
    }

    /// Builds a config, rejecting empty boards and boards without at least
    /// one safe cell.
    pub fn new(rows: Coord, cols: Coord, mines: CellCount) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(GameError::InvalidSize);
        }

        let config = Self::new_unchecked(rows, cols, mines);
        if mines >= config.total_cells() {
            return Err(GameError::TooManyMines);
        }

        Ok(config)
    }

    pub const fn rows(&self) -> Coord {
        self.rows
    }

    pub const fn cols(&self) -> Coord {
        self.cols
    }

    pub const fn mines(&self) -> CellCount {
        self.mines
    }

    /// Board size as `(rows, cols)`.
    pub const fn size(&self) -> Coord2 {
        (self.rows, self.cols)
    }

    pub const fn total_cells(&self) -> CellCount {
        (self.rows as CellCount).saturating_mul(self.cols as CellCount)
    }

    /// Number of cells that have to be revealed to win.
    pub const fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mines
    }
}

/// The classic difficulty table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Preset {
    Beginner,
    Intermediate,
    Expert,
}

impl Preset {
    pub const ALL: [Self; 3] = [Self::Beginner, Self::Intermediate, Self::Expert];

    pub const fn config(self) -> BoardConfig {
        match self {
            Self::Beginner => BoardConfig::new_unchecked(9, 9, 10),
            Self::Intermediate => BoardConfig::new_unchecked(16, 16, 40),
            Self::Expert => BoardConfig::new_unchecked(16, 30, 99),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Expert => "Expert",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Preset {
    type Err = GameError;

    fn from_str(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|preset| name.eq_ignore_ascii_case(preset.label()))
            .ok_or(GameError::UnknownPreset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_rejects_empty_and_overfull_boards() {
        assert_eq!(BoardConfig::new(0, 9, 1).unwrap_err(), GameError::InvalidSize);
        assert_eq!(BoardConfig::new(9, 0, 1).unwrap_err(), GameError::InvalidSize);
        assert_eq!(BoardConfig::new(2, 2, 4).unwrap_err(), GameError::TooManyMines);
        assert!(BoardConfig::new(2, 2, 3).is_ok());
        assert!(BoardConfig::new(1, 1, 0).is_ok());
    }

    #[test]
    fn config_derives_cell_counts() {
        let config = BoardConfig::new(9, 9, 10).unwrap();
        assert_eq!(config.size(), (9, 9));
        assert_eq!(config.total_cells(), 81);
        assert_eq!(config.safe_cell_count(), 71);
    }

    #[test]
    fn presets_match_the_classic_table() {
        assert_eq!(Preset::Beginner.config(), BoardConfig::new(9, 9, 10).unwrap());
        assert_eq!(Preset::Intermediate.config(), BoardConfig::new(16, 16, 40).unwrap());
        assert_eq!(Preset::Expert.config(), BoardConfig::new(16, 30, 99).unwrap());
    }

    #[test]
    fn presets_parse_by_name() {
        assert_eq!("beginner".parse::<Preset>().unwrap(), Preset::Beginner);
        assert_eq!("EXPERT".parse::<Preset>().unwrap(), Preset::Expert);
        assert_eq!("nightmare".parse::<Preset>().unwrap_err(), GameError::UnknownPreset);
        assert_eq!(Preset::Intermediate.to_string(), "Intermediate");
    }
}
