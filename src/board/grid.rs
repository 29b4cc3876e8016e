//! Board construction, topology, and ownership.
//!
//! The grid is an arena of cells indexed by `CellId`. Construction is
//! two-pass: the first pass allocates every cell, the second wires the
//! four neighbor links; linking needs the full allocation in place.
//! Rebuilding discards every cell; nothing mutates in place across
//! resets.
//!
//! Win-check code scans by bounds-checked coordinates (`owner_at`),
//! not by chained link dereferences; the link walk (`relative`) exists
//! for callers that need adjacency semantics rather than raw indexing.

use log::debug;

use crate::core::{GameConfig, PlayerId};
use crate::error::GameError;
use crate::events::{BoardReset, EventChannel, OwnerChanged};

use super::cell::{Cell, CellId, Coord, Direction};

/// A rectangular grid of cells with fixed dimensions.
///
/// Dimensions are fixed for the board's lifetime; the cells themselves
/// exist only after `reset` builds them.
#[derive(Debug)]
pub struct Board {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
    on_reset: EventChannel<BoardReset>,
    on_owner_changed: EventChannel<OwnerChanged>,
}

impl Board {
    /// Create an unbuilt board. Call `reset` to build the grid.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        assert!(width >= 1, "Board must be at least 1 cell wide");
        assert!(height >= 1, "Board must be at least 1 cell tall");

        Self {
            width,
            height,
            cells: Vec::new(),
            on_reset: EventChannel::new(),
            on_owner_changed: EventChannel::new(),
        }
    }

    /// Create an unbuilt board from a session configuration.
    #[must_use]
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.board_width, config.board_height)
    }

    /// Board width in cells.
    #[must_use]
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Board height in cells.
    #[must_use]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Check whether the grid has been built.
    #[must_use]
    pub fn is_built(&self) -> bool {
        !self.cells.is_empty()
    }

    /// Discard the current grid, rebuild from scratch, and publish
    /// `BoardReset`.
    pub fn reset(&mut self) {
        self.cells = Self::build(self.width, self.height);
        debug!("board rebuilt ({}x{})", self.width, self.height);
        self.on_reset.emit(&BoardReset);
    }

    /// Two-pass construction: allocate all cells, then link them.
    fn build(width: u16, height: u16) -> Vec<Cell> {
        let mut cells = Vec::with_capacity(width as usize * height as usize);

        for y in 0..height {
            for x in 0..width {
                let id = CellId::new(cells.len() as u32);
                cells.push(Cell::new(id, Coord::new(x, y)));
            }
        }

        // Second pass wires the links; every coordinate resolves now.
        let index = |x: u16, y: u16| CellId::new(y as u32 * width as u32 + x as u32);
        for y in 0..height {
            for x in 0..width {
                let cell = &mut cells[index(x, y).raw() as usize];
                cell.set_neighbour(
                    Direction::North,
                    (y + 1 < height).then(|| index(x, y + 1)),
                );
                cell.set_neighbour(Direction::South, (y > 0).then(|| index(x, y - 1)));
                cell.set_neighbour(Direction::East, (x + 1 < width).then(|| index(x + 1, y)));
                cell.set_neighbour(Direction::West, (x > 0).then(|| index(x - 1, y)));
            }
        }

        cells
    }

    /// Bounds-checked lookup. `None` when the board is unbuilt or the
    /// coordinates fall outside it; never indexes out of bounds.
    #[must_use]
    pub fn cell(&self, x: i32, y: i32) -> Option<&Cell> {
        if !self.is_built() {
            return None;
        }
        if x < 0 || x >= i32::from(self.width) || y < 0 || y >= i32::from(self.height) {
            return None;
        }
        self.cells
            .get(y as usize * self.width as usize + x as usize)
    }

    /// Lookup by coordinate record.
    #[must_use]
    pub fn cell_at(&self, coord: Coord) -> Option<&Cell> {
        self.cell(i32::from(coord.x), i32::from(coord.y))
    }

    /// Lookup by arena id.
    #[must_use]
    pub fn get(&self, id: CellId) -> Option<&Cell> {
        self.cells.get(id.raw() as usize)
    }

    /// Owner of the cell at the given coordinates, if both the cell
    /// and an owner exist.
    #[must_use]
    pub fn owner_at(&self, x: i32, y: i32) -> Option<PlayerId> {
        self.cell(x, y).and_then(Cell::owner)
    }

    /// Walk neighbor links one step at a time toward `(dx, dy)`.
    ///
    /// X-axis steps are taken before y-axis steps. The walk
    /// short-circuits to `None` at the first missing link, so a
    /// blocked edge mid-path hides the destination even when the
    /// target coordinate exists on the board.
    #[must_use]
    pub fn relative(&self, from: CellId, dx: i32, dy: i32) -> Option<CellId> {
        let mut current = self.get(from)?.id();
        let mut dx = dx;
        let mut dy = dy;

        while dx != 0 {
            let direction = if dx > 0 { Direction::East } else { Direction::West };
            current = self.get(current)?.neighbour(direction)?;
            dx -= dx.signum();
        }
        while dy != 0 {
            let direction = if dy > 0 { Direction::North } else { Direction::South };
            current = self.get(current)?.neighbour(direction)?;
            dy -= dy.signum();
        }

        Some(current)
    }

    /// Claim the cell at `(x, y)` for a player and publish
    /// `OwnerChanged`.
    ///
    /// Rejections (`CellNotFound`, `AlreadyOwned`) leave the grid
    /// untouched and publish nothing.
    pub fn claim(&mut self, x: i32, y: i32, player: PlayerId) -> Result<(), GameError> {
        let id = self
            .cell(x, y)
            .map(Cell::id)
            .ok_or(GameError::CellNotFound { x, y })?;

        let cell = &mut self.cells[id.raw() as usize];
        let previous = cell.owner();
        cell.claim(player)?;
        let coord = cell.coord();

        self.on_owner_changed.emit(&OwnerChanged {
            cell: coord,
            previous,
            new_owner: player,
        });
        Ok(())
    }

    /// Check whether every cell is owned. An unbuilt board is not
    /// full.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.is_built() && self.cells.iter().all(Cell::is_owned)
    }

    /// Iterate all cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Channel publishing `BoardReset`.
    pub fn on_reset(&mut self) -> &mut EventChannel<BoardReset> {
        &mut self.on_reset
    }

    /// Channel publishing `OwnerChanged`.
    pub fn on_owner_changed(&mut self) -> &mut EventChannel<OwnerChanged> {
        &mut self.on_owner_changed
    }
}
