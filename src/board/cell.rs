//! Cells, coordinates, and directions.
//!
//! A cell is one grid position: its coordinate, an optional owner, and
//! four directional neighbor links. Links are wired once at board
//! construction and never change; boundary directions hold `None`.
//!
//! Ownership is claimed at most once. There is deliberately no
//! per-cell clear; ownership goes away only with a full board reset.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::core::PlayerId;
use crate::error::GameError;

/// A grid coordinate. `(0, 0)` is the south-west corner; x grows east,
/// y grows north.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: u16,
    pub y: u16,
}

impl Coord {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The four neighbor directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// All four directions, in link-array order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Unit coordinate offset of one step in this direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::South => (0, -1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }

    /// The direction pointing back.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// Index into a cell's link array.
    pub(crate) const fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::South => 1,
            Direction::East => 2,
            Direction::West => 3,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::North => write!(f, "north"),
            Direction::South => write!(f, "south"),
            Direction::East => write!(f, "east"),
            Direction::West => write!(f, "west"),
        }
    }
}

/// Arena index of a cell within its board.
///
/// Ids are only meaningful against the board generation that produced
/// them; a reset hands out a fresh arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellId(pub u32);

impl CellId {
    /// Create a new cell ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CellId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Cell({})", self.0)
    }
}

/// One grid position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    id: CellId,
    coord: Coord,
    owner: Option<PlayerId>,
    neighbours: [Option<CellId>; 4],
}

impl Cell {
    /// Create an unowned, unlinked cell.
    pub(crate) fn new(id: CellId, coord: Coord) -> Self {
        Self {
            id,
            coord,
            owner: None,
            neighbours: [None; 4],
        }
    }

    /// Arena id of this cell.
    #[must_use]
    pub fn id(&self) -> CellId {
        self.id
    }

    /// Grid coordinate of this cell.
    #[must_use]
    pub fn coord(&self) -> Coord {
        self.coord
    }

    /// Current owner, if any.
    #[must_use]
    pub fn owner(&self) -> Option<PlayerId> {
        self.owner
    }

    /// Check whether the cell has been claimed.
    #[must_use]
    pub fn is_owned(&self) -> bool {
        self.owner.is_some()
    }

    /// Neighbor link in the given direction; `None` past the board
    /// edge.
    #[must_use]
    pub fn neighbour(&self, direction: Direction) -> Option<CellId> {
        self.neighbours[direction.index()]
    }

    pub(crate) fn set_neighbour(&mut self, direction: Direction, neighbour: Option<CellId>) {
        self.neighbours[direction.index()] = neighbour;
    }

    /// Claim ownership for a player.
    ///
    /// A second claim on an owned cell is rejected and leaves the
    /// owner untouched; the board clears ownership only by rebuilding.
    pub(crate) fn claim(&mut self, player: PlayerId) -> Result<(), GameError> {
        if let Some(owner) = self.owner {
            warn!("cell {} is already owned by {}", self.coord, owner);
            return Err(GameError::AlreadyOwned {
                cell: self.coord,
                owner,
            });
        }
        self.owner = Some(player);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coord_display() {
        assert_eq!(format!("{}", Coord::new(2, 0)), "(2, 0)");
    }

    #[test]
    fn test_direction_delta_and_opposite() {
        assert_eq!(Direction::North.delta(), (0, 1));
        assert_eq!(Direction::South.delta(), (0, -1));
        assert_eq!(Direction::East.delta(), (1, 0));
        assert_eq!(Direction::West.delta(), (-1, 0));

        for direction in Direction::ALL {
            assert_eq!(direction.opposite().opposite(), direction);
        }
    }

    #[test]
    fn test_new_cell_is_unowned_and_unlinked() {
        let cell = Cell::new(CellId::new(0), Coord::new(0, 0));
        assert!(!cell.is_owned());
        for direction in Direction::ALL {
            assert_eq!(cell.neighbour(direction), None);
        }
    }

    #[test]
    fn test_claim_once() {
        let mut cell = Cell::new(CellId::new(0), Coord::new(1, 1));
        assert!(cell.claim(PlayerId::new(0)).is_ok());
        assert_eq!(cell.owner(), Some(PlayerId::new(0)));
    }

    #[test]
    fn test_second_claim_rejected() {
        let mut cell = Cell::new(CellId::new(0), Coord::new(1, 1));
        cell.claim(PlayerId::new(0)).unwrap();

        let err = cell.claim(PlayerId::new(1)).unwrap_err();
        assert_eq!(
            err,
            GameError::AlreadyOwned {
                cell: Coord::new(1, 1),
                owner: PlayerId::new(0),
            }
        );
        // Ownership untouched by the rejected claim.
        assert_eq!(cell.owner(), Some(PlayerId::new(0)));
    }

    #[test]
    fn test_links() {
        let mut cell = Cell::new(CellId::new(0), Coord::new(0, 0));
        cell.set_neighbour(Direction::East, Some(CellId::new(1)));
        assert_eq!(cell.neighbour(Direction::East), Some(CellId::new(1)));
        assert_eq!(cell.neighbour(Direction::West), None);
    }
}
