//! Tic-tac-toe: the reference instantiation of the engine.
//!
//! A minimal game that validates the whole core path: board topology,
//! ownership locking, turn rotation, line detection, draw detection,
//! and the end-of-game idempotence guard.

mod game;

pub use game::TicTacToe;
