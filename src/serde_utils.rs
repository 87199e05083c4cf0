#![cfg(feature = "serde")]

//! Boards and plays are stored in their text forms: a board as its FEN string and a play as its
//! move text. Everything else derives its serde implementations directly.

use crate::board::BoardState;
use crate::play::Play;
use serde::de::{Error, Unexpected, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::Formatter;
use std::marker::PhantomData;
use std::str::FromStr;

/// Deserializes any type with a [`FromStr`] implementation from a string, describing the
/// expected text with `expecting`.
struct TextVisitor<T> {
    expecting: &'static str,
    marker: PhantomData<T>,
}

impl<T> TextVisitor<T> {
    fn new(expecting: &'static str) -> Self {
        Self { expecting, marker: PhantomData }
    }
}

impl<'de, T: FromStr> Visitor<'de> for TextVisitor<T> {
    type Value = T;

    fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
        formatter.write_str(self.expecting)
    }

    fn visit_str<E: Error>(self, value: &str) -> Result<Self::Value, E> {
        T::from_str(value).map_err(|_| E::invalid_value(Unexpected::Str(value), &self))
    }
}

impl Serialize for BoardState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_fen())
    }
}

impl<'de> Deserialize<'de> for BoardState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(TextVisitor::new("a board in FEN format"))
    }
}

impl Serialize for Play {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Play {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(TextVisitor::new("move text, eg, 'Kd4-d7xc7'"))
    }
}

#[cfg(test)]
mod tests {
    use crate::board::BoardState;
    use crate::game::state::GameplayState;
    use crate::game::Game;
    use crate::play::Play;
    use crate::preset::{boards, rules};
    use crate::rules::{RepetitionRule, Ruleset};
    use std::str::FromStr;

    #[test]
    fn test_board_as_fen() {
        let board = BoardState::from_str(boards::TCROSS_7).unwrap();
        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(json, format!("\"{}\"", boards::TCROSS_7));
        let back: BoardState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, board);
        assert!(serde_json::from_str::<BoardState>("\"3t3/3t3\"").is_err());
    }

    #[test]
    fn test_play_as_text() {
        let play = Play::from_str("Cc2-c5xd5 Cc5-c6xd6").unwrap();
        let json = serde_json::to_string(&play).unwrap();
        assert_eq!(json, "\"Cc2-c5xd5 Cc5-c6xd6\"");
        let back: Play = serde_json::from_str(&json).unwrap();
        assert_eq!(back, play);
    }

    #[test]
    fn test_history_round_trip() {
        let mut g = Game::new("copenhagen-11-tdiamond-a").expect("failed to create game");
        g.do_play("h11-h9").expect("failed to do play");
        g.do_play("f8-h8").expect("failed to do play");
        let json = serde_json::to_string(&g.history).unwrap();
        let back: Vec<GameplayState> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, g.history);
        let loaded = Game::load("copenhagen-11-tdiamond-a", back).unwrap();
        assert_eq!(loaded.state, g.state);
    }

    #[test]
    fn test_ruleset_overlay() {
        let rules: Ruleset = serde_json::from_str(r#"{"shield_walls": true, "repetition": "Draw"}"#)
            .unwrap();
        assert!(rules.shield_walls);
        assert_eq!(rules.repetition, RepetitionRule::Draw);
        assert_eq!(rules.pieces, Ruleset::default().pieces);
        let back: Ruleset = serde_json::from_str(&serde_json::to_string(&rules::copenhagen()).unwrap())
            .unwrap();
        assert_eq!(back, rules::copenhagen());
    }
}
