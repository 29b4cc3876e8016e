//! Board topology: a rectangular grid of linked, ownable cells.
//!
//! ## Key Types
//!
//! - [`Coord`]: grid coordinate, south-west origin
//! - [`Direction`]: the four neighbor directions
//! - [`CellId`]: arena index of a cell within its board generation
//! - [`Cell`]: one position with an optional owner and fixed links
//! - [`Board`]: construction, reset, lookup, and the link walk
//!
//! ## Construction contract
//!
//! Building is create-all-then-link: neighbor wiring needs every cell
//! allocated first. A reset rebuilds the whole arena; cells are never
//! mutated in place across resets, and ownership never clears any
//! other way.

pub mod cell;
pub mod grid;

pub use cell::{Cell, CellId, Coord, Direction};
pub use grid::Board;
