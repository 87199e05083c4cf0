pub mod capture;
pub mod endgame;
pub mod logic;
pub mod movegen;
pub mod state;
pub mod validate;

use crate::board::BoardState;
use crate::error::{BoardError, ConfigError, HistoryError, ParseError, PlayError};
use crate::game::logic::GameLogic;
use crate::game::state::GameplayState;
use crate::game::validate::MoveValidity;
use crate::pieces::Side;
use crate::play::Play;
use crate::preset::{self, Variant};
use crate::rules::Ruleset;
use crate::tiles::Tile;
use rand::seq::SliceRandom;
use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The reason why a game has been won.
#[derive(Eq, PartialEq, Debug, Copy, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum WinReason {
    /// King has been captured.
    KingCaptured,
    /// King has escaped in the "normal" way, ie, by reaching an edge or corner.
    KingEscaped,
    /// All defenders have been enclosed away from the edge.
    Encircled,
    /// King has escaped through an exit fort.
    ExitFort,
    /// The defender has repeated a position too many times.
    Repetition,
    /// The other side has no legal plays available.
    Stalemate,
}

/// The reason why a game has been drawn.
#[derive(Eq, PartialEq, Debug, Copy, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DrawReason {
    /// A position has been repeated too many times.
    Repetition,
}

/// The outcome of a single game.
#[derive(Eq, PartialEq, Debug, Copy, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GameOutcome {
    /// Game has been won by the specified side.
    Win(WinReason, Side),
    /// Game has ended in a draw.
    Draw(DrawReason),
}

/// The current status of the game.
#[derive(Eq, PartialEq, Debug, Copy, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GameStatus {
    /// Game is still ongoing.
    Ongoing,
    /// Game is over, with the given outcome.
    Over(GameOutcome),
}

/// A struct representing a single game, including all state and associated information (such as
/// rules) needed to play. This struct also keeps every previous state of the game, so that any
/// of them can be restored.
#[derive(Clone, Debug)]
pub struct Game {
    /// The variant the game was created from, if it was created from a variant identifier.
    pub variant: Option<Variant>,
    pub logic: GameLogic,
    pub state: GameplayState,
    /// Every state of the game so far, starting with the initial one. The last entry is the
    /// state after the most recent play.
    pub history: Vec<GameplayState>,
}

impl Game {
    /// Create a new [`Game`] from a variant identifier such as `copenhagen-11-tdiamond-a`.
    pub fn new(variant_id: &str) -> Result<Self, ConfigError> {
        let (variant, rules, board) = preset::resolve(variant_id)?;
        let mut game = Self::with_board(rules, board);
        game.variant = Some(variant);
        Ok(game)
    }

    /// Create a new [`Game`] from the given rules and a starting position in FEN format.
    pub fn from_position(rules: Ruleset, fen: &str, side_to_play: Side) -> Result<Self, ParseError> {
        let board = BoardState::from_fen(fen)?;
        let mut game = Self::with_board(rules, board);
        game.state.side_to_play = side_to_play;
        game.history = vec![game.state.clone()];
        Ok(game)
    }

    fn with_board(rules: Ruleset, board: BoardState) -> Self {
        let state = GameplayState::new(board, rules.starting_side);
        let logic = GameLogic::new(rules, state.board.side_len());
        Self { variant: None, logic, history: vec![state.clone()], state }
    }

    /// Reload a game from its variant identifier and a persisted history. The current state is
    /// the last entry of the history; an empty history starts a new game.
    pub fn load(variant_id: &str, history: Vec<GameplayState>) -> Result<Self, ConfigError> {
        let mut game = Self::new(variant_id)?;
        let Some(last) = history.last() else { return Ok(game) };
        let side_len = game.logic.board_geo.side_len;
        if history.iter().any(|s| s.board.side_len() != side_len) {
            return Err(ConfigError::HistoryMismatch)
        }
        game.state = last.clone();
        game.history = history;
        Ok(game)
    }

    pub fn board(&self) -> &BoardState {
        &self.state.board
    }

    pub fn side_to_play(&self) -> Side {
        self.state.side_to_play
    }

    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    /// Check move text against the current position.
    pub fn validate(&self, text: &str) -> Result<MoveValidity, PlayError> {
        if self.state.status != GameStatus::Ongoing {
            return Err(PlayError::GameOver)
        }
        self.logic.validate(&self.state.board, self.state.side_to_play, text)
    }

    /// Actually "do" a play, checking validity, applying it to the board, switching side to play
    /// and returning the game status following the play. Nothing changes unless the play is
    /// valid and complete.
    pub fn do_play(&mut self, text: &str) -> Result<GameStatus, PlayError> {
        if self.state.status != GameStatus::Ongoing {
            return Err(PlayError::GameOver)
        }
        let mover = self.state.side_to_play;
        let replay = self.logic.replay(&self.state.board, mover, text)?;
        if replay.validity == MoveValidity::Incomplete {
            return Err(PlayError::Incomplete)
        }
        let status = self.logic.game_status(&replay.board, &replay.play, mover, &self.history);
        let state = GameplayState {
            board: replay.board,
            side_to_play: mover.other(),
            last_move: Some(text.to_string()),
            status,
        };
        tracing::debug!(%mover, play = text, ply = self.history.len(), "applied play");
        if let GameStatus::Over(outcome) = status {
            tracing::info!(?outcome, plies = self.history.len(), "game over");
        }
        self.history.push(state.clone());
        self.state = state;
        Ok(status)
    }

    /// Apply the given move text to a copy of the current board, for showing a play while it is
    /// being built. The text may be unfinished, but every segment in it must be valid, otherwise
    /// the error is returned. The result is not part of the game.
    pub fn preview(&self, text: &str) -> Result<BoardState, PlayError> {
        self.logic.replay(&self.state.board, self.state.side_to_play, text).map(|r| r.board)
    }

    /// Every complete play available to the side to play. Empty once the game is over.
    pub fn plays(&self) -> Result<Vec<Play>, BoardError> {
        if self.state.status != GameStatus::Ongoing {
            return Ok(vec![])
        }
        self.logic.plays(&self.state.board, self.state.side_to_play)
    }

    /// Every complete play that can be made by the piece at the given tile. Returns an error if
    /// there is no piece at the given tile.
    pub fn plays_from(&self, tile: Tile) -> Result<Vec<Play>, BoardError> {
        self.logic.plays_from(&self.state.board, tile)
    }

    /// Pick one of the available plays uniformly at random.
    pub fn random_play<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Option<Play>, BoardError> {
        Ok(self.plays()?.choose(rng).cloned())
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> GameplayState {
        self.state.clone()
    }

    /// Load the state at the given history index. Negative indices count from the end, so `-1`
    /// is the current state. Later entries are kept.
    pub fn restore(&mut self, idx: isize) -> Result<(), HistoryError> {
        let len = self.history.len();
        let resolved = if idx < 0 { len as isize + idx } else { idx };
        let state = usize::try_from(resolved)
            .ok()
            .and_then(|i| self.history.get(i))
            .ok_or(HistoryError::IndexOutOfRange { index: idx, len })?;
        self.state = state.clone();
        Ok(())
    }

    /// Drop every history entry from index `len` onwards, keeping at least the initial state.
    pub fn truncate_history(&mut self, len: usize) {
        self.history.truncate(len.max(1));
    }
}

#[cfg(test)]
mod tests {
    use crate::error::{ConfigError, HistoryError, InvalidPlay, PlayError};
    use crate::game::validate::MoveValidity;
    use crate::game::GameOutcome::Win;
    use crate::game::GameStatus::{Ongoing, Over};
    use crate::game::WinReason::{KingEscaped, Stalemate};
    use crate::game::Game;
    use crate::pieces::Side::{Attacker, Defender};
    use crate::preset::{boards, rules};
    use crate::rules::Ruleset;
    use crate::tiles::Tile;
    use std::collections::HashSet;

    #[test]
    fn test_new_game() {
        let game = Game::new("brandubh-7-tcross-a").unwrap();
        assert_eq!(game.board().to_fen(), boards::TCROSS_7);
        assert_eq!(game.side_to_play(), Attacker);
        assert_eq!(game.history.len(), 1);
        assert_eq!(game.status(), Ongoing);
        let game = Game::new("brandubh-7-tcross-d").unwrap();
        assert_eq!(game.side_to_play(), Defender);
        assert!(matches!(Game::new("brandubh-7-tcross"), Err(ConfigError::BadVariantId(_))));
        assert!(matches!(Game::new("brandubh-8-tcross-a"), Err(ConfigError::UnsupportedSetup { .. })));
    }

    #[test]
    fn test_plays_from() {
        let game = Game::new("brandubh-7-tcross-a").unwrap();
        assert!(game.plays_from(Tile::new(0, 0)).is_err());
        let plays: HashSet<String> = game.plays_from(Tile::new(0, 3))
            .unwrap()
            .iter()
            .map(|p| p.to_string())
            .collect();
        assert_eq!(
            plays,
            hashset!(
                "a4-a2".to_string(), "a4-a3".to_string(), "a4-a5".to_string(), "a4-a6".to_string()
            )
        );
    }

    #[test]
    fn test_do_play() {
        let mut game = Game::new("brandubh-7-tcross-a").unwrap();
        assert_eq!(game.do_play("a4-a2"), Ok(Ongoing));
        assert_eq!(game.side_to_play(), Defender);
        assert_eq!(game.state.last_move.as_deref(), Some("a4-a2"));
        assert_eq!(game.history.len(), 2);
        // Invalid plays leave everything unchanged.
        let before = game.snapshot();
        assert_eq!(
            game.do_play("a2-a3"),
            Err(PlayError::Invalid(InvalidPlay::WrongPlayer(Tile::new(0, 1))))
        );
        assert_eq!(game.do_play("Kd4"), Err(PlayError::Incomplete));
        assert_eq!(game.snapshot(), before);
        assert_eq!(game.history.len(), 2);
        assert_eq!(game.validate("c4-c6"), Ok(MoveValidity::Complete));
    }

    #[test]
    fn test_game_over() {
        let mut game = Game::from_position(Ruleset::default(), "7/7/7/7/7/7/5K1", Defender).unwrap();
        assert_eq!(game.do_play("Kf1-g1"), Ok(Over(Win(KingEscaped, Defender))));
        assert_eq!(game.do_play("a1-a2"), Err(PlayError::GameOver));
        assert!(game.plays().unwrap().is_empty());

        // Attacker boxes in the only defender and wins.
        let mut game = Game::from_position(Ruleset::default(), "7/7/7/7/7/2t4/1tK2t1", Attacker).unwrap();
        assert_eq!(game.do_play("f1-d1"), Ok(Over(Win(Stalemate, Attacker))));
    }

    #[test]
    fn test_preview() {
        let game = Game::from_position(rules::berserk(), "7/3Tt2/3Tt2/7/7/2c4/7", Attacker).unwrap();
        let board = game.preview("Cc2-c5xd5 Cc5").unwrap();
        assert_eq!(board.to_fen(), "7/3Tt2/2c1t2/7/7/7/7");
        assert_eq!(game.board().to_fen(), "7/3Tt2/3Tt2/7/7/2c4/7");
        // A segment missing its capture is not previewed at all.
        assert!(game.preview("Cc2-c5").is_err());
    }

    #[test]
    fn test_restore() {
        let mut g = Game::new("brandubh-7-tcross-a").unwrap();
        let state_0 = g.snapshot();
        g.do_play("a4-a2").unwrap();
        let state_1 = g.snapshot();
        assert_ne!(state_0, state_1);
        g.do_play("c4-c6").unwrap();
        let state_2 = g.snapshot();
        g.do_play("b4-b3").unwrap();
        let state_3 = g.snapshot();
        assert_ne!(state_2, state_3);
        g.restore(-2).unwrap();
        assert_eq!(g.state, state_2);
        g.restore(1).unwrap();
        assert_eq!(g.state, state_1);
        g.restore(0).unwrap();
        assert_eq!(g.state, state_0);
        assert_eq!(g.history.len(), 4);
        assert_eq!(g.restore(4), Err(HistoryError::IndexOutOfRange { index: 4, len: 4 }));
        assert_eq!(g.restore(-5), Err(HistoryError::IndexOutOfRange { index: -5, len: 4 }));
        g.restore(-1).unwrap();
        assert_eq!(g.state, state_3);

        g.truncate_history(2);
        assert_eq!(g.history.len(), 2);
        g.truncate_history(0);
        assert_eq!(g.history.len(), 1);
    }

    #[test]
    fn test_load() {
        let mut g = Game::new("copenhagen-11-tdiamond-a").unwrap();
        g.do_play("d11-d9").unwrap();
        let loaded = Game::load("copenhagen-11-tdiamond-a", g.history.clone()).unwrap();
        assert_eq!(loaded.state, g.state);
        assert_eq!(loaded.history.len(), 2);
        let fresh = Game::load("copenhagen-11-tdiamond-a", vec![]).unwrap();
        assert_eq!(fresh.history.len(), 1);
        assert_eq!(
            Game::load("brandubh-7-tcross-a", g.history.clone()).err(),
            Some(ConfigError::HistoryMismatch)
        );
    }
}
