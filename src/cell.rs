use serde::{Deserialize, Serialize};

/// Full per-cell record tracked by the board. Only the [`CellView`]
/// projection leaves the crate, so mine positions stay internal until the
/// game ends.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct Cell {
    pub mine: bool,
    pub revealed: bool,
    pub flagged: bool,
    pub adjacent_mines: u8,
}

impl Cell {
    pub const fn view(self) -> CellView {
        if self.revealed {
            CellView::Revealed(self.adjacent_mines)
        } else if self.flagged {
            CellView::Flagged
        } else {
            CellView::Hidden
        }
    }
}

/// Player-visible state of a single cell.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Revealed(u8),
    Flagged,
}

impl CellView {
    pub const fn is_unrevealed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }
}

impl Default for CellView {
    fn default() -> Self {
        Self::Hidden
    }
}
