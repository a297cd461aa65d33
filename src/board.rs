use std::collections::{HashSet, VecDeque};

use ndarray::Array2;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::types::GridIndex;
use crate::*;

/// Lifecycle of a single game.
///
/// Valid transitions: `Ready -> Active`, `Active -> Won`, `Active -> Lost`,
/// plus `Ready -> Won`/`Ready -> Lost` for boards decided by their first
/// reveal.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameState {
    Ready,
    Active,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::Ready
    }
}

/// Chebyshev-distance check: whether `a` lies in the 3x3 block around `b`.
const fn in_safe_zone(a: Coord2, b: Coord2) -> bool {
    a.0.abs_diff(b.0) <= 1 && a.1.abs_diff(b.1) <= 1
}

/// A single game of minesweeper: the grid, the rules, and nothing else.
///
/// Mine placement is deferred. A fresh board holds no mines at all; the
/// first reveal places them, keeping the revealed cell and its neighborhood
/// clear, so the opening move never explodes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    config: BoardConfig,
    grid: Array2<Cell>,
    revealed_count: CellCount,
    flagged_count: CellCount,
    mines_placed: bool,
    state: GameState,
    triggered_mine: Option<Coord2>,
    seed: u64,
}

impl Board {
    /// Creates a board with every cell hidden and no mines placed yet.
    pub fn new(config: BoardConfig) -> Self {
        Self::with_seed(config, rand::rng().random())
    }

    /// Creates a board whose deferred mine placement draws from `seed`.
    pub fn with_seed(config: BoardConfig, seed: u64) -> Self {
        Self {
            config,
            grid: Array2::default([usize::from(config.rows()), usize::from(config.cols())]),
            revealed_count: 0,
            flagged_count: 0,
            mines_placed: false,
            state: Default::default(),
            triggered_mine: None,
            seed,
        }
    }

    /// Builds a board from an explicit mine layout instead of a deferred
    /// random one. Duplicate coordinates collapse into a single mine.
    pub fn with_mines(rows: Coord, cols: Coord, mine_coords: &[Coord2]) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(GameError::InvalidSize);
        }

        let mut grid: Array2<Cell> = Array2::default([usize::from(rows), usize::from(cols)]);
        for &coords in mine_coords {
            if coords.0 >= rows || coords.1 >= cols {
                return Err(GameError::InvalidCoords);
            }
            grid[coords.grid_index()].mine = true;
        }

        let mines: CellCount = grid
            .iter()
            .filter(|cell| cell.mine)
            .count()
            .try_into()
            .unwrap();
        let config = BoardConfig::new(rows, cols, mines)?;

        let mut board = Self {
            config,
            grid,
            revealed_count: 0,
            flagged_count: 0,
            mines_placed: true,
            state: Default::default(),
            triggered_mine: None,
            seed: 0,
        };
        board.compute_adjacency();
        Ok(board)
    }

    /// Abandons the current game and starts over with the same config.
    pub fn reset(&mut self) {
        *self = Self::new(self.config);
    }

    /// Abandons the current game and starts over on a different config.
    pub fn configure(&mut self, config: BoardConfig) {
        *self = Self::new(config);
    }

    pub fn config(&self) -> BoardConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size()
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// Whether the deferred mine placement has run.
    pub fn mines_placed(&self) -> bool {
        self.mines_placed
    }

    pub fn total_mines(&self) -> CellCount {
        self.config.mines()
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    /// Mines not yet flagged, negative when the player overflags.
    pub fn mines_left(&self) -> isize {
        (self.config.mines() as isize) - (self.flagged_count as isize)
    }

    /// Player-visible state of one cell.
    ///
    /// # Panics
    ///
    /// Panics if `coords` is out of bounds.
    pub fn cell_at(&self, coords: Coord2) -> CellView {
        self.grid[coords.grid_index()].view()
    }

    /// Snapshot of every cell's player-visible state.
    pub fn cells(&self) -> Array2<CellView> {
        self.grid.map(|cell| cell.view())
    }

    /// Whether a mine sits at `coords`. Always false before placement.
    ///
    /// # Panics
    ///
    /// Panics if `coords` is out of bounds.
    pub fn has_mine_at(&self, coords: Coord2) -> bool {
        self.grid[coords.grid_index()].mine
    }

    /// The mine that ended the game, if it ended in a loss.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// Reveals a cell. A zero-count reveal floods outward through the
    /// connected zero region plus its numbered border.
    ///
    /// The first reveal places the mines if they are not placed yet, keeping
    /// its own neighborhood clear. Flagged and already-revealed targets are
    /// reported as [`RevealOutcome::NoChange`], as is any reveal after the
    /// game ended.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        use RevealOutcome::*;

        let coords = self.validate_coords(coords)?;

        if self.state.is_finished() {
            return Ok(NoChange);
        }

        if !self.mines_placed {
            self.place_mines(coords);
        }

        let cell = self.grid[coords.grid_index()];
        if cell.flagged || cell.revealed {
            return Ok(NoChange);
        }

        if cell.mine {
            self.triggered_mine = Some(coords);
            self.state = GameState::Lost;
            log::debug!("mine hit at {:?}", coords);
            return Ok(Exploded {
                hit: coords,
                mines: self.mine_coords(),
            });
        }

        let mut opened = Vec::new();
        self.open_cell(coords, &mut opened);
        if self.grid[coords.grid_index()].adjacent_mines == 0 {
            self.flood_from(coords, &mut opened);
        }

        if self.revealed_count == self.config.safe_cell_count() {
            self.state = GameState::Won;
            log::debug!("all {} safe cells revealed", self.revealed_count);
            Ok(Won(opened))
        } else {
            if self.state.is_ready() {
                self.state = GameState::Active;
            }
            Ok(Revealed(opened))
        }
    }

    /// Toggles the flag on a hidden cell. Flags block reveal commands but
    /// have no effect on placement or win detection. Revealed cells cannot
    /// be flagged, and finished games ignore the command.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        use FlagOutcome::*;

        let coords = self.validate_coords(coords)?;

        if self.state.is_finished() {
            return Ok(NoChange);
        }

        let index = coords.grid_index();
        Ok(match self.grid[index].view() {
            CellView::Revealed(_) => NoChange,
            CellView::Flagged => {
                self.grid[index].flagged = false;
                self.flagged_count -= 1;
                Unflagged
            }
            CellView::Hidden => {
                self.grid[index].flagged = true;
                self.flagged_count += 1;
                Flagged
            }
        })
    }

    /// Places mines by rejection sampling, keeping `first_reveal` and, when
    /// the board has room, its whole neighborhood clear, then fills in every
    /// adjacency count.
    fn place_mines(&mut self, first_reveal: Coord2) {
        let mines = self.config.mines();
        let keep_zone_clear = mines + 9 <= self.config.total_cells();
        if !keep_zone_clear {
            log::warn!(
                "no room to clear the opening area around {:?}, protecting only that cell",
                first_reveal
            );
        }

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut placed: CellCount = 0;
        while placed < mines {
            let coords = (
                rng.random_range(0..self.config.rows()),
                rng.random_range(0..self.config.cols()),
            );
            let protected = if keep_zone_clear {
                in_safe_zone(coords, first_reveal)
            } else {
                coords == first_reveal
            };
            if protected || self.grid[coords.grid_index()].mine {
                continue;
            }

            self.grid[coords.grid_index()].mine = true;
            placed += 1;
        }

        self.compute_adjacency();
        self.mines_placed = true;
        log::debug!("placed {} mines, opening at {:?}", placed, first_reveal);
    }

    fn compute_adjacency(&mut self) {
        let bounds = self.size();
        for row in 0..bounds.0 {
            for col in 0..bounds.1 {
                let coords = (row, col);
                if self.grid[coords.grid_index()].mine {
                    continue;
                }

                let count = neighbors(coords, bounds)
                    .filter(|&pos| self.grid[pos.grid_index()].mine)
                    .count();
                self.grid[coords.grid_index()].adjacent_mines = count as u8;
            }
        }
    }

    fn open_cell(&mut self, coords: Coord2, opened: &mut Vec<RevealedCell>) {
        let adjacent_mines = self.grid[coords.grid_index()].adjacent_mines;
        self.grid[coords.grid_index()].revealed = true;
        self.revealed_count += 1;
        opened.push(RevealedCell {
            coords,
            adjacent_mines,
        });
        log::trace!("revealed {:?} with {} adjacent mines", coords, adjacent_mines);
    }

    /// Opens the connected region of zero-count cells around `start` plus
    /// its one-cell border of numbered cells. `start` itself must already be
    /// open with a count of zero.
    fn flood_from(&mut self, start: Coord2, opened: &mut Vec<RevealedCell>) {
        let bounds = self.size();
        let mut visited = HashSet::from([start]);
        let mut to_visit: VecDeque<_> = neighbors(start, bounds)
            .filter(|&pos| self.is_hidden(pos))
            .collect();

        while let Some(coords) = to_visit.pop_front() {
            if !visited.insert(coords) {
                continue;
            }

            // flagged cells dam the cascade, revealed cells already ended it
            if !self.is_hidden(coords) {
                continue;
            }

            self.open_cell(coords, opened);

            if self.grid[coords.grid_index()].adjacent_mines == 0 {
                to_visit.extend(
                    neighbors(coords, bounds)
                        .filter(|&pos| self.is_hidden(pos))
                        .filter(|pos| !visited.contains(pos)),
                );
            }
        }
    }

    fn is_hidden(&self, coords: Coord2) -> bool {
        matches!(self.cell_at(coords), CellView::Hidden)
    }

    fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (rows, cols) = self.size();
        if coords.0 < rows && coords.1 < cols {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    /// Every mine on the board in row-major order.
    fn mine_coords(&self) -> Vec<Coord2> {
        self.grid
            .indexed_iter()
            .filter(|(_, cell)| cell.mine)
            .map(|((row, col), _)| (row as Coord, col as Coord))
            .collect()
    }
}
