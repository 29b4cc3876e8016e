//! Concrete games built on the generic engine.
//!
//! Games configure the engine (board size, win length, player bounds,
//! strategies) rather than subclassing it.

pub mod tictactoe;
