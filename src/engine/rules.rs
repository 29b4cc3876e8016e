//! Win/draw evaluation and turn policies.
//!
//! Both are strategy traits injected into the engine, so game variants
//! swap rules without touching the state machine.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::core::PlayerId;
use crate::players::PlayerRegistry;

/// Result of a finished game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    /// A single winner.
    Winner(PlayerId),
    /// The board filled with no winning line.
    Draw,
}

impl GameOutcome {
    /// The winning player, if there is one.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self {
            GameOutcome::Winner(player) => Some(*player),
            GameOutcome::Draw => None,
        }
    }

    /// Check for a draw.
    #[must_use]
    pub fn is_draw(&self) -> bool {
        matches!(self, GameOutcome::Draw)
    }
}

/// Strategy deciding whether the game has ended.
///
/// Evaluated exactly once per successful ownership mutation; the
/// engine never polls it between moves.
pub trait WinRule {
    /// `Some(outcome)` if the game is over, `None` if play continues.
    fn evaluate(&self, board: &Board) -> Option<GameOutcome>;
}

/// Line-of-K detection over the four forward directions.
///
/// For every owned cell, the rule scans east, north, north-east, and
/// north-west for `run_length` equal owners. Scanning uses
/// bounds-checked coordinate lookups rather than chained neighbor
/// dereferences, so boundary cells are safe by construction. When no
/// line exists and every cell is owned, the outcome is a draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineWinRule {
    run_length: u16,
}

impl LineWinRule {
    /// Forward scan directions: east, north, north-east, north-west.
    /// The backward four would find the same lines from the far end.
    const DIRECTIONS: [(i32, i32); 4] = [(1, 0), (0, 1), (1, 1), (-1, 1)];

    /// Create a rule requiring `run_length` in a row.
    #[must_use]
    pub fn new(run_length: u16) -> Self {
        assert!(run_length >= 1, "Run length must be at least 1");
        Self { run_length }
    }

    /// The required run length.
    #[must_use]
    pub fn run_length(&self) -> u16 {
        self.run_length
    }

    fn line_from(&self, board: &Board, x: i32, y: i32, owner: PlayerId, delta: (i32, i32)) -> bool {
        let (dx, dy) = delta;
        for step in 1..i32::from(self.run_length) {
            match board.owner_at(x + dx * step, y + dy * step) {
                Some(other) if other == owner => {}
                _ => return false,
            }
        }
        true
    }
}

impl WinRule for LineWinRule {
    fn evaluate(&self, board: &Board) -> Option<GameOutcome> {
        for cell in board.cells() {
            let Some(owner) = cell.owner() else {
                continue;
            };
            let coord = cell.coord();
            let (x, y) = (i32::from(coord.x), i32::from(coord.y));

            for delta in Self::DIRECTIONS {
                if self.line_from(board, x, y, owner, delta) {
                    return Some(GameOutcome::Winner(owner));
                }
            }
        }

        if board.is_full() {
            return Some(GameOutcome::Draw);
        }
        None
    }
}

/// Strategy for whose-turn checks and rotation after a completed move.
pub trait TurnPolicy {
    /// May `player` act right now?
    fn is_players_turn(&self, roster: &PlayerRegistry, player: PlayerId) -> bool;

    /// Pick the player who acts next.
    fn next(&self, roster: &PlayerRegistry) -> Option<PlayerId>;
}

/// Strict ascending-id cyclic rotation.
#[derive(Clone, Copy, Debug, Default)]
pub struct RoundRobin;

impl TurnPolicy for RoundRobin {
    fn is_players_turn(&self, roster: &PlayerRegistry, player: PlayerId) -> bool {
        roster.is_players_turn(player)
    }

    fn next(&self, roster: &PlayerRegistry) -> Option<PlayerId> {
        match roster.current() {
            Some(current) => roster.next_after(current),
            None => roster.ids().next(),
        }
    }
}

/// Simultaneous play: every whose-turn check passes and rotation keeps
/// the current player in place.
#[derive(Clone, Copy, Debug, Default)]
pub struct FreeForAll;

impl TurnPolicy for FreeForAll {
    fn is_players_turn(&self, _roster: &PlayerRegistry, _player: PlayerId) -> bool {
        true
    }

    fn next(&self, roster: &PlayerRegistry) -> Option<PlayerId> {
        roster.current().or_else(|| roster.ids().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn built_board(width: u16, height: u16) -> Board {
        let mut board = Board::new(width, height);
        board.reset();
        board
    }

    #[test]
    fn test_outcome_accessors() {
        let win = GameOutcome::Winner(PlayerId::new(1));
        assert_eq!(win.winner(), Some(PlayerId::new(1)));
        assert!(!win.is_draw());

        let draw = GameOutcome::Draw;
        assert_eq!(draw.winner(), None);
        assert!(draw.is_draw());
    }

    #[test]
    fn test_empty_board_continues() {
        let board = built_board(3, 3);
        let rule = LineWinRule::new(3);
        assert_eq!(rule.evaluate(&board), None);
    }

    #[test]
    fn test_horizontal_line_wins() {
        let mut board = built_board(3, 3);
        let rule = LineWinRule::new(3);
        let player = PlayerId::new(0);

        board.claim(0, 0, player).unwrap();
        assert_eq!(rule.evaluate(&board), None);
        board.claim(1, 0, player).unwrap();
        assert_eq!(rule.evaluate(&board), None);
        board.claim(2, 0, player).unwrap();
        assert_eq!(rule.evaluate(&board), Some(GameOutcome::Winner(player)));
    }

    #[test]
    fn test_vertical_line_wins() {
        let mut board = built_board(3, 3);
        let rule = LineWinRule::new(3);
        let player = PlayerId::new(1);

        for y in 0..3 {
            board.claim(1, y, player).unwrap();
        }
        assert_eq!(rule.evaluate(&board), Some(GameOutcome::Winner(player)));
    }

    #[test]
    fn test_diagonal_lines_win() {
        let mut board = built_board(3, 3);
        let rule = LineWinRule::new(3);
        let player = PlayerId::new(0);

        for i in 0..3 {
            board.claim(i, i, player).unwrap();
        }
        assert_eq!(rule.evaluate(&board), Some(GameOutcome::Winner(player)));

        // Anti-diagonal, scanned north-west from the east edge.
        let mut board = built_board(3, 3);
        for i in 0..3 {
            board.claim(2 - i, i, player).unwrap();
        }
        assert_eq!(rule.evaluate(&board), Some(GameOutcome::Winner(player)));
    }

    #[test]
    fn test_boundary_cells_are_safe() {
        let mut board = built_board(3, 3);
        let rule = LineWinRule::new(3);

        // Fill edge cells; every scan from them runs off the board.
        board.claim(2, 2, PlayerId::new(0)).unwrap();
        board.claim(0, 2, PlayerId::new(1)).unwrap();
        board.claim(2, 0, PlayerId::new(1)).unwrap();
        assert_eq!(rule.evaluate(&board), None);
    }

    #[test]
    fn test_mixed_line_does_not_win() {
        let mut board = built_board(3, 3);
        let rule = LineWinRule::new(3);

        board.claim(0, 0, PlayerId::new(0)).unwrap();
        board.claim(1, 0, PlayerId::new(0)).unwrap();
        board.claim(2, 0, PlayerId::new(1)).unwrap();
        assert_eq!(rule.evaluate(&board), None);
    }

    #[test]
    fn test_full_board_without_line_is_draw() {
        let mut board = built_board(3, 3);
        let rule = LineWinRule::new(3);
        let a = PlayerId::new(0);
        let b = PlayerId::new(1);

        // A A B / B B A / A A B from the bottom row up; no run of 3.
        let rows = [[a, a, b], [b, b, a], [a, a, b]];
        for (y, row) in rows.iter().enumerate() {
            for (x, &owner) in row.iter().enumerate() {
                board.claim(x as i32, y as i32, owner).unwrap();
            }
        }

        assert_eq!(rule.evaluate(&board), Some(GameOutcome::Draw));
    }

    #[test]
    fn test_longer_run_on_bigger_board() {
        let mut board = built_board(7, 6);
        let rule = LineWinRule::new(4);
        let player = PlayerId::new(0);

        for x in 2..5 {
            board.claim(x, 3, player).unwrap();
        }
        assert_eq!(rule.evaluate(&board), None);

        board.claim(5, 3, player).unwrap();
        assert_eq!(rule.evaluate(&board), Some(GameOutcome::Winner(player)));
    }

    #[test]
    fn test_round_robin_policy() {
        let mut roster = PlayerRegistry::new(4, true);
        for _ in 0..3 {
            roster.create_player().unwrap();
        }
        roster.set_current(PlayerId::new(2));

        let policy = RoundRobin;
        assert_eq!(policy.next(&roster), Some(PlayerId::new(0)));
        assert!(policy.is_players_turn(&roster, PlayerId::new(2)));
        assert!(!policy.is_players_turn(&roster, PlayerId::new(0)));
    }

    #[test]
    fn test_free_for_all_policy() {
        let mut roster = PlayerRegistry::new(4, false);
        roster.create_player().unwrap();
        roster.create_player().unwrap();
        roster.set_current(PlayerId::new(0));

        let policy = FreeForAll;
        assert!(policy.is_players_turn(&roster, PlayerId::new(1)));
        // Rotation keeps the current player in place.
        assert_eq!(policy.next(&roster), Some(PlayerId::new(0)));
    }
}
