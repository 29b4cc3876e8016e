//! Dynamic player roster with turn rotation.
//!
//! IDs ascend monotonically and are never reused while the roster
//! lives; removal leaves a gap. Turn order is ascending-id cyclic over
//! whoever is currently registered (not insertion order, and not a
//! separate turn list), so removing a player mid-game simply shortens
//! the cycle.

use std::collections::BTreeMap;
use std::ops::Bound::{Excluded, Unbounded};

use log::{debug, warn};

use crate::core::{GameConfig, Player, PlayerId};
use crate::error::GameError;
use crate::events::{EventChannel, PlayerJoined, PlayerLeft, TurnChanged};

/// Roster and current-player tracking.
///
/// Backed by a `BTreeMap` so ascending-id iteration, the turn order
/// contract, is free.
#[derive(Debug)]
pub struct PlayerRegistry {
    players: BTreeMap<PlayerId, Player>,
    current: Option<PlayerId>,
    next_id: u32,
    max_players: usize,
    turn_based: bool,
    on_player_joined: EventChannel<PlayerJoined>,
    on_player_left: EventChannel<PlayerLeft>,
    on_turn_changed: EventChannel<TurnChanged>,
}

impl PlayerRegistry {
    /// Create an empty roster.
    #[must_use]
    pub fn new(max_players: usize, turn_based: bool) -> Self {
        assert!(max_players >= 1, "Must allow at least 1 player");

        Self {
            players: BTreeMap::new(),
            current: None,
            next_id: 0,
            max_players,
            turn_based,
            on_player_joined: EventChannel::new(),
            on_player_left: EventChannel::new(),
            on_turn_changed: EventChannel::new(),
        }
    }

    /// Create an empty roster from a session configuration.
    #[must_use]
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.max_players, config.turn_based)
    }

    /// Register a new player with id-indexed default name, color, and
    /// symbol, and publish `PlayerJoined`.
    ///
    /// Rejected with `CapacityExceeded` once the roster is full.
    pub fn create_player(&mut self) -> Result<PlayerId, GameError> {
        if self.players.len() >= self.max_players {
            warn!(
                "cannot create player: roster is full ({} players)",
                self.max_players
            );
            return Err(GameError::CapacityExceeded {
                max: self.max_players,
            });
        }

        let id = PlayerId::new(self.next_id);
        self.next_id += 1;

        let player = Player::with_defaults(id);
        debug!("player created: {}", player);
        self.players.insert(id, player.clone());
        self.on_player_joined.emit(&PlayerJoined { player });
        Ok(id)
    }

    /// Remove a player and publish `PlayerLeft`. Unknown ids yield
    /// `None`.
    ///
    /// If the removed player was current, the first remaining player in
    /// ascending-id order becomes current (publishing `TurnChanged`),
    /// or nobody when the roster empties.
    pub fn remove_player(&mut self, id: PlayerId) -> Option<Player> {
        let player = self.players.remove(&id)?;
        debug!("player removed: {} ({} remaining)", player, self.players.len());
        self.on_player_left.emit(&PlayerLeft {
            player: player.clone(),
        });

        if self.current == Some(id) {
            match self.players.keys().next().copied() {
                Some(next) => self.set_current(next),
                None => self.current = None,
            }
        }

        Some(player)
    }

    /// Make `id` the current player and publish `TurnChanged`.
    ///
    /// Unknown ids are tolerated with a warning and no change.
    pub fn set_current(&mut self, id: PlayerId) {
        if !self.players.contains_key(&id) {
            warn!("cannot set current player: {} is not in the roster", id);
            return;
        }

        let previous = self.current;
        self.current = Some(id);
        self.on_turn_changed.emit(&TurnChanged {
            previous,
            current: id,
        });
    }

    /// Advance to the next player in ascending-id cyclic order and
    /// publish `TurnChanged`. With no current player, the lowest id
    /// becomes current. `None` on an empty roster.
    pub fn next_player(&mut self) -> Option<PlayerId> {
        let next = match self.current {
            Some(current) => self.next_after(current)?,
            None => self.players.keys().next().copied()?,
        };
        self.set_current(next);
        Some(next)
    }

    /// The id that follows `id` in ascending-id cyclic order among
    /// registered players. Pure lookup; publishes nothing.
    #[must_use]
    pub fn next_after(&self, id: PlayerId) -> Option<PlayerId> {
        if self.players.is_empty() {
            return None;
        }
        self.players
            .range((Excluded(id), Unbounded))
            .next()
            .map(|(&next, _)| next)
            .or_else(|| self.players.keys().next().copied())
    }

    /// Whose-turn check. Always passes in simultaneous mode.
    #[must_use]
    pub fn is_players_turn(&self, id: PlayerId) -> bool {
        if !self.turn_based {
            return true;
        }
        self.current == Some(id)
    }

    /// Look up a player. Absence is a tolerated contract; callers get
    /// `None`, never a panic.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(&id)
    }

    /// Mutable player lookup.
    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(&id)
    }

    /// Iterate players in ascending-id order.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    /// Iterate player ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.players.keys().copied()
    }

    /// Current player id, if one is set.
    #[must_use]
    pub fn current(&self) -> Option<PlayerId> {
        self.current
    }

    /// Current player record, if one is set.
    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        self.current.and_then(|id| self.players.get(&id))
    }

    /// Roster size.
    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Check for an empty roster.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Check membership.
    #[must_use]
    pub fn contains(&self, id: PlayerId) -> bool {
        self.players.contains_key(&id)
    }

    /// Whether play is turn based (as opposed to simultaneous).
    #[must_use]
    pub fn turn_based(&self) -> bool {
        self.turn_based
    }

    /// Switch between turn-based and simultaneous play.
    pub fn set_turn_based(&mut self, turn_based: bool) {
        self.turn_based = turn_based;
        debug!(
            "turn mode set to {}",
            if turn_based { "turn-based" } else { "simultaneous" }
        );
    }

    /// Channel publishing `PlayerJoined`.
    pub fn on_player_joined(&mut self) -> &mut EventChannel<PlayerJoined> {
        &mut self.on_player_joined
    }

    /// Channel publishing `PlayerLeft`.
    pub fn on_player_left(&mut self) -> &mut EventChannel<PlayerLeft> {
        &mut self.on_player_left
    }

    /// Channel publishing `TurnChanged`.
    pub fn on_turn_changed(&mut self) -> &mut EventChannel<TurnChanged> {
        &mut self.on_turn_changed
    }
}
