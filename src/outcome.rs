use serde::{Deserialize, Serialize};

use crate::types::Coord2;

/// One cell opened by a reveal command, paired with its adjacent mine count.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RevealedCell {
    pub coords: Coord2,
    pub adjacent_mines: u8,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum RevealOutcome {
    /// Nothing happened: the target was flagged or already revealed, or the
    /// game was over.
    NoChange,
    /// The listed cells were opened and the game continues.
    Revealed(Vec<RevealedCell>),
    /// The listed cells were opened and no safe cell remains hidden.
    Won(Vec<RevealedCell>),
    /// The target held a mine; `mines` lists every mine on the board.
    Exploded { hit: Coord2, mines: Vec<Coord2> },
}

impl RevealOutcome {
    /// Whether this outcome could have caused an update to the game.
    pub const fn has_update(&self) -> bool {
        !matches!(self, Self::NoChange)
    }

    /// Whether the game ended with this outcome.
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Won(_) | Self::Exploded { .. })
    }

    /// Cells opened by the command, empty for `NoChange` and `Exploded`.
    pub fn revealed_cells(&self) -> &[RevealedCell] {
        match self {
            Self::Revealed(cells) | Self::Won(cells) => cells,
            _ => &[],
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum FlagOutcome {
    NoChange,
    Flagged,
    Unflagged,
}

impl FlagOutcome {
    /// Whether this outcome could have caused an update to the game.
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}
