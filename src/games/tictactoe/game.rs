//! Tic-tac-toe built on the generic engine.

use crate::core::{GameConfig, PlayerId, SessionState};
use crate::engine::GridGameEngine;
use crate::error::GameError;

/// The classic 3x3, three-in-a-row, two-player game.
///
/// A thin wrapper that configures the generic engine, creates both
/// players, and plays moves for whoever is current. The underlying
/// engine stays reachable for event subscriptions and board access.
#[derive(Debug)]
pub struct TicTacToe {
    engine: GridGameEngine,
    cross: PlayerId,
    nought: PlayerId,
}

impl TicTacToe {
    /// Set up a fresh game, already started: both players registered
    /// and crosses to move.
    #[must_use]
    pub fn new() -> Self {
        let mut engine = GridGameEngine::with_defaults(GameConfig::tictactoe());

        let cross = engine
            .add_player()
            .expect("fresh roster has room for crosses");
        let nought = engine
            .add_player()
            .expect("fresh roster has room for noughts");
        engine
            .start_game()
            .expect("two players satisfy the minimum");

        Self {
            engine,
            cross,
            nought,
        }
    }

    /// Place a mark at `(x, y)` for the current player.
    pub fn place(&mut self, x: i32, y: i32) -> Result<(), GameError> {
        let player = self
            .engine
            .players()
            .current()
            .ok_or(GameError::InvalidTransition {
                action: "place a mark",
                state: self.engine.session().state,
            })?;
        self.engine.select_cell(player, x, y)
    }

    /// The player whose turn it is, while the game runs.
    #[must_use]
    pub fn current_player(&self) -> Option<PlayerId> {
        self.engine.players().current()
    }

    /// The winner, once there is one.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.engine.outcome().and_then(|outcome| outcome.winner())
    }

    /// Check whether the game ended in a draw.
    #[must_use]
    pub fn is_draw(&self) -> bool {
        self.engine
            .outcome()
            .is_some_and(|outcome| outcome.is_draw())
    }

    /// Check whether the game is over.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.engine.session().state == SessionState::Stopped
    }

    /// Wipe the board and start the next game with the same players.
    pub fn restart(&mut self) {
        self.engine.reset();
        self.engine
            .start_game()
            .expect("roster survives the reset");
    }

    /// The crosses player (moves first).
    #[must_use]
    pub fn cross(&self) -> PlayerId {
        self.cross
    }

    /// The noughts player.
    #[must_use]
    pub fn nought(&self) -> PlayerId {
        self.nought
    }

    /// The underlying engine.
    #[must_use]
    pub fn engine(&self) -> &GridGameEngine {
        &self.engine
    }

    /// Mutable engine access (for event subscriptions).
    pub fn engine_mut(&mut self) -> &mut GridGameEngine {
        &mut self.engine
    }
}

impl Default for TicTacToe {
    fn default() -> Self {
        Self::new()
    }
}
