//! The session state machine.
//!
//! `GridGameEngine` composes a board, a player roster, and the two
//! strategy traits into one turn engine. A move runs as a single
//! uninterrupted sequence (ownership write, its notification, the win
//! check, and either game end or turn rotation) before any other
//! input is processed.

use log::{debug, warn};

use crate::board::Board;
use crate::core::{GameConfig, GameSession, Player, PlayerId, SessionState};
use crate::error::GameError;
use crate::events::{EventChannel, GameEnded, GameStarted, TurnStarted};
use crate::players::PlayerRegistry;
use crate::registry::Service;

use super::rules::{FreeForAll, GameOutcome, LineWinRule, RoundRobin, TurnPolicy, WinRule};

/// Turn engine for one grid-game session.
pub struct GridGameEngine {
    config: GameConfig,
    board: Board,
    players: PlayerRegistry,
    session: GameSession,
    outcome: Option<GameOutcome>,
    win_rule: Box<dyn WinRule>,
    turn_policy: Box<dyn TurnPolicy>,
    on_game_started: EventChannel<GameStarted>,
    on_game_ended: EventChannel<GameEnded>,
    on_turn_started: EventChannel<TurnStarted>,
}

impl GridGameEngine {
    /// Create an engine with injected strategies. The board is built
    /// immediately and the session starts `Ready`.
    #[must_use]
    pub fn new(
        config: GameConfig,
        win_rule: Box<dyn WinRule>,
        turn_policy: Box<dyn TurnPolicy>,
    ) -> Self {
        let mut board = Board::from_config(&config);
        board.reset();
        let players = PlayerRegistry::from_config(&config);

        Self {
            config,
            board,
            players,
            session: GameSession::new(),
            outcome: None,
            win_rule,
            turn_policy,
            on_game_started: EventChannel::new(),
            on_game_ended: EventChannel::new(),
            on_turn_started: EventChannel::new(),
        }
    }

    /// Create an engine with the standard strategies for the
    /// configuration: line-of-`win_length` detection, and round-robin
    /// or free-for-all turns per the turn mode.
    #[must_use]
    pub fn with_defaults(config: GameConfig) -> Self {
        let win_rule = Box::new(LineWinRule::new(config.win_length));
        let turn_policy: Box<dyn TurnPolicy> = if config.turn_based {
            Box::new(RoundRobin)
        } else {
            Box::new(FreeForAll)
        };
        Self::new(config, win_rule, turn_policy)
    }

    /// Start a game: `Ready -> Playing`.
    ///
    /// Requires the roster to hold at least `min_players`. The lowest
    /// id becomes current when nobody is, and `GameStarted` is
    /// published.
    pub fn start_game(&mut self) -> Result<(), GameError> {
        if self.session.state != SessionState::Ready {
            warn!("cannot start game while session is {}", self.session.state);
            return Err(GameError::InvalidTransition {
                action: "start game",
                state: self.session.state,
            });
        }
        if self.players.len() < self.config.min_players {
            warn!(
                "not enough players to start ({}/{})",
                self.players.len(),
                self.config.min_players
            );
            return Err(GameError::InvalidTransition {
                action: "start game without enough players",
                state: self.session.state,
            });
        }

        self.session.state = SessionState::Playing;
        if self.players.current().is_none() {
            let first = self.players.ids().next();
            if let Some(first) = first {
                self.players.set_current(first);
            }
        }

        let players: Vec<PlayerId> = self.players.ids().collect();
        debug!("game started with {} players", players.len());
        self.on_game_started.emit(&GameStarted { players });
        Ok(())
    }

    /// Play one move: claim the cell at `(x, y)` for `player`.
    ///
    /// Rejections (wrong session state, unknown player, not the
    /// player's turn, cell out of range, cell already owned) are
    /// returned as errors, leave all state untouched, and do **not**
    /// advance the turn. On success the ownership write, its
    /// notification, the single win check, and the follow-up (game end
    /// or turn rotation) complete before this call returns.
    pub fn select_cell(&mut self, player: PlayerId, x: i32, y: i32) -> Result<(), GameError> {
        if self.session.state != SessionState::Playing {
            debug!("selection ignored: session is {}", self.session.state);
            return Err(GameError::InvalidTransition {
                action: "select a cell",
                state: self.session.state,
            });
        }
        if !self.players.contains(player) {
            warn!("selection ignored: {} is not in the roster", player);
            return Err(GameError::PlayerNotFound(player));
        }
        if !self.turn_policy.is_players_turn(&self.players, player) {
            debug!("selection ignored: not {}'s turn", player);
            return Err(GameError::NotPlayersTurn(player));
        }

        self.board.claim(x, y, player)?;

        match self.win_rule.evaluate(&self.board) {
            Some(outcome) => {
                // Idempotence guard inside end_game still applies.
                let _ = self.end_game(Some(outcome));
            }
            None => self.advance_turn(),
        }
        Ok(())
    }

    fn advance_turn(&mut self) {
        let prev_player = self.players.current();
        let Some(new_player) = self.turn_policy.next(&self.players) else {
            return;
        };
        self.players.set_current(new_player);

        let players: Vec<PlayerId> = self.players.ids().collect();
        self.on_turn_started.emit(&TurnStarted {
            players,
            new_player,
            prev_player,
        });
    }

    /// End the game: `Playing -> Stopped`, publishing `GameEnded` with
    /// the winner (or none, for a draw or an aborted game).
    ///
    /// Idempotent per session: once the session has announced its end,
    /// further calls are rejected until a reset.
    pub fn end_game(&mut self, outcome: Option<GameOutcome>) -> Result<(), GameError> {
        if self.session.state != SessionState::Playing || self.session.game_over {
            warn!("cannot end game while session is {}", self.session.state);
            return Err(GameError::InvalidTransition {
                action: "end game",
                state: self.session.state,
            });
        }

        self.session.state = SessionState::Stopped;
        self.session.game_over = true;
        self.outcome = outcome;

        let winner = outcome.and_then(|o| o.winner());
        let is_draw = outcome.is_some_and(|o| o.is_draw());
        match winner {
            Some(player) => debug!("game ended, winner: {}", player),
            None if is_draw => debug!("game ended in a draw"),
            None => debug!("game ended with no result"),
        }

        let players: Vec<PlayerId> = self.players.ids().collect();
        self.on_game_ended.emit(&GameEnded {
            players,
            winner,
            is_draw,
        });
        Ok(())
    }

    /// Add a player to the roster (capacity-checked).
    pub fn add_player(&mut self) -> Result<PlayerId, GameError> {
        self.players.create_player()
    }

    /// Remove a player, fixing up the current player.
    ///
    /// If the roster empties mid-game the session leaves `Playing`
    /// silently; no result is announced for an abandoned game.
    pub fn remove_player(&mut self, id: PlayerId) -> Option<Player> {
        let removed = self.players.remove_player(id)?;
        if self.session.is_playing() && self.players.is_empty() {
            debug!("roster emptied mid-game; stopping session");
            self.session.state = SessionState::Stopped;
        }
        Some(removed)
    }

    /// Rebuild the board (publishing `BoardReset`), clear the result,
    /// and return the session to `Ready`. The roster survives.
    pub fn reset(&mut self) {
        self.board.reset();
        self.session.reset();
        self.outcome = None;
        debug!("session reset");
    }

    /// The session configuration.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access (for subscribing to its channels).
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// The player roster.
    #[must_use]
    pub fn players(&self) -> &PlayerRegistry {
        &self.players
    }

    /// Mutable roster access.
    pub fn players_mut(&mut self) -> &mut PlayerRegistry {
        &mut self.players
    }

    /// The session record.
    #[must_use]
    pub fn session(&self) -> GameSession {
        self.session
    }

    /// Result of the finished game, if one has been announced.
    #[must_use]
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// Channel publishing `GameStarted`.
    pub fn on_game_started(&mut self) -> &mut EventChannel<GameStarted> {
        &mut self.on_game_started
    }

    /// Channel publishing `GameEnded`.
    pub fn on_game_ended(&mut self) -> &mut EventChannel<GameEnded> {
        &mut self.on_game_ended
    }

    /// Channel publishing `TurnStarted`.
    pub fn on_turn_started(&mut self) -> &mut EventChannel<TurnStarted> {
        &mut self.on_turn_started
    }
}

impl std::fmt::Debug for GridGameEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridGameEngine")
            .field("session", &self.session)
            .field("players", &self.players.len())
            .field("board", &self.board)
            .finish()
    }
}

impl Service for GridGameEngine {
    fn name(&self) -> &str {
        "grid game engine"
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}
