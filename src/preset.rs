//! The catalogue of built-in rulesets and starting positions, and the parsing of variant
//! identifiers of the form `<family>-<size>-<setup>-<marker>` (eg, `copenhagen-11-tdiamond-a`).
//!
//! Each family is described only by how it deviates from [`Ruleset::default`]. The marker is
//! `a` if the attackers move first or `d` if the defenders move first.

use crate::board::BoardState;
use crate::error::ConfigError;
use crate::pieces::Side;
use crate::rules::Ruleset;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// The names of all built-in ruleset families.
pub const FAMILIES: [&str; 7] = [
    "historical",
    "fetlar",
    "copenhagen",
    "linnaeus",
    "brandubh",
    "magpie",
    "berserk",
];

pub mod rules {
    use crate::collections::PieceSet;
    use crate::pieces::PieceKind::King;
    use crate::pieces::Side::Attacker;
    use crate::rules::EscapeType::Edge;
    use crate::rules::Movement::OneStep;
    use crate::rules::RepetitionRule::{DefenderLoses, Draw};
    use crate::rules::Strength::StrongNearThrone;
    use crate::rules::{CornerRules, PieceRules, PieceRulesTable, Ruleset, ThroneRules};

    /// The base rules, used unchanged.
    pub fn historical() -> Ruleset {
        Ruleset::default()
    }

    /// Fetlar Hnefatafl.
    pub fn fetlar() -> Ruleset {
        Ruleset {
            encirclement: true,
            repetition: Draw,
            ..Ruleset::default()
        }
    }

    /// Copenhagen Hnefatafl.
    pub fn copenhagen() -> Ruleset {
        Ruleset {
            shield_walls: true,
            exit_forts: true,
            encirclement: true,
            repetition: DefenderLoses,
            ..Ruleset::default()
        }
    }

    /// Tablut as described by Linnaeus: edge escape, no corners and an impassable throne.
    pub fn linnaeus() -> Ruleset {
        let base = Ruleset::default();
        Ruleset {
            escape: Edge,
            pieces: PieceRulesTable {
                king: PieceRules { strength: StrongNearThrone, ..base.pieces.king },
                ..base.pieces
            },
            throne: ThroneRules {
                pass: PieceSet::none(),
                hostile: PieceSet::from_side(Attacker),
                ..base.throne
            },
            corners: CornerRules { enabled: false, ..base.corners },
            encirclement: true,
            linnaean_capture: true,
            ..base
        }
    }

    /// Federation Brandubh.
    pub fn brandubh() -> Ruleset {
        let base = Ruleset::default();
        Ruleset {
            pieces: PieceRulesTable {
                king: PieceRules { strength: StrongNearThrone, ..base.pieces.king },
                ..base.pieces
            },
            throne: ThroneRules { hostile: PieceSet::all_but_kind(King), ..base.throne },
            encirclement: true,
            repetition: DefenderLoses,
            ..base
        }
    }

    /// Magpie: the king moves only one tile at a time.
    pub fn magpie() -> Ruleset {
        let base = Ruleset::default();
        Ruleset {
            pieces: PieceRulesTable {
                king: PieceRules { movement: OneStep, ..base.pieces.king },
                ..base.pieces
            },
            ..base
        }
    }

    /// Berserk Hnefatafl: capturing pieces may keep moving, and the king may escape mid-chain.
    pub fn berserk() -> Ruleset {
        let base = Ruleset::default();
        Ruleset {
            pieces: PieceRulesTable {
                king: PieceRules { berserk_escape: true, ..base.pieces.king },
                ..base.pieces
            },
            berserk: true,
            encirclement: true,
            repetition: Draw,
            ..base
        }
    }
}

pub mod boards {
    /// Brandubh.
    pub const TCROSS_7: &str = "3t3/3t3/3T3/ttTKTtt/3T3/3t3/3t3";

    pub const MAGPIE_7: &str = "3t3/1t3t1/3T3/t1TKT1t/3T3/1t3t1/3t3";

    /// Tablut.
    pub const TCROSS_9: &str = "3ttt3/4t4/4T4/t3T3t/ttTTKTTtt/t3T3t/4T4/4t4/3ttt3";

    /// The Copenhagen and Fetlar starting position.
    pub const TDIAMOND_11: &str =
        "3ttttt3/5t5/11/t4T4t/t3TTT3t/tt1TTKTT1tt/t3TTT3t/t4T4t/11/5t5/3ttttt3";

    pub const TCROSS_11: &str =
        "3ttttt3/5t5/11/t4T4t/t4T4t/ttTTTKTTTtt/t4T4t/t4T4t/11/5t5/3ttttt3";

    /// Diamond layout with a commander in the middle of each attacking group and a defending
    /// knight.
    pub const BERSERK_11: &str =
        "3ttctt3/5t5/11/t4N4t/t3TTT3t/c1tTTKTTt1c/t3TTT3t/t4T4t/11/5t5/3ttctt3";

    pub const TCROSS_13: &str =
        "4ttttt4/6t6/13/13/t5T5t/t5T5t/tt2TTKTT2tt/t5T5t/t5T5t/13/13/6t6/4ttttt4";

    pub const TCROSS_15: &str =
        "5ttttt5/7t7/15/15/15/t6T6t/t6T6t/tt3TTKTT3tt/t6T6t/t6T6t/15/15/15/7t7/5ttttt5";
}

/// Look up a ruleset family by name.
pub fn family(name: &str) -> Result<Ruleset, ConfigError> {
    match name {
        "historical" => Ok(rules::historical()),
        "fetlar" => Ok(rules::fetlar()),
        "copenhagen" => Ok(rules::copenhagen()),
        "linnaeus" => Ok(rules::linnaeus()),
        "brandubh" => Ok(rules::brandubh()),
        "magpie" => Ok(rules::magpie()),
        "berserk" => Ok(rules::berserk()),
        _ => Err(ConfigError::UnknownFamily(name.to_string()))
    }
}

/// Get the starting position for the given board size and setup name, in FEN format.
pub fn setup(size: u8, name: &str) -> Result<&'static str, ConfigError> {
    match (size, name) {
        (7, "tcross") => Ok(boards::TCROSS_7),
        (7, "magpie") => Ok(boards::MAGPIE_7),
        (9, "tcross") => Ok(boards::TCROSS_9),
        (11, "tdiamond") => Ok(boards::TDIAMOND_11),
        (11, "tcross") => Ok(boards::TCROSS_11),
        (11, "berserk") => Ok(boards::BERSERK_11),
        (13, "tcross") => Ok(boards::TCROSS_13),
        (15, "tcross") => Ok(boards::TCROSS_15),
        _ => Err(ConfigError::UnsupportedSetup { size, name: name.to_string() })
    }
}

/// Get the starting position for the given board size and setup name as a grid of placement
/// characters, top row first: lowercase letters are attacking pieces, uppercase letters are
/// defending pieces and `.` is an empty tile.
pub fn setup_grid(size: u8, name: &str) -> Result<Vec<Vec<char>>, ConfigError> {
    let board = BoardState::from_fen(setup(size, name)?)?;
    Ok(board.to_display_str().lines().map(|l| l.chars().collect()).collect())
}

/// A parsed variant identifier.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Variant {
    pub family: String,
    pub board_size: u8,
    pub setup: String,
    pub first: Side,
}

impl FromStr for Variant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('-').collect();
        let [family, size, setup, marker] = parts[..] else {
            return Err(ConfigError::BadVariantId(s.to_string()))
        };
        if family.is_empty() || setup.is_empty() {
            return Err(ConfigError::BadVariantId(s.to_string()))
        }
        let board_size: u8 = size.parse()
            .map_err(|_| ConfigError::BadBoardSize(size.to_string()))?;
        if !(5..=19).contains(&board_size) {
            return Err(ConfigError::BadBoardSize(size.to_string()))
        }
        let first = match marker {
            "a" => Side::Attacker,
            "d" => Side::Defender,
            _ => return Err(ConfigError::BadFirstPlayer(marker.to_string()))
        };
        Ok(Self {
            family: family.to_string(),
            board_size,
            setup: setup.to_string(),
            first,
        })
    }
}

impl Display for Variant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let marker = match self.first {
            Side::Attacker => "a",
            Side::Defender => "d",
        };
        write!(f, "{}-{}-{}-{}", self.family, self.board_size, self.setup, marker)
    }
}

/// Resolve a variant identifier into its fully-defaulted ruleset.
pub fn parse(variant_id: &str) -> Result<Ruleset, ConfigError> {
    resolve(variant_id).map(|(_, rules, _)| rules)
}

/// Resolve a variant identifier into the parsed identifier, its ruleset and its starting board.
pub fn resolve(variant_id: &str) -> Result<(Variant, Ruleset, BoardState), ConfigError> {
    let variant = Variant::from_str(variant_id)?;
    let mut rules = family(&variant.family)?;
    rules.starting_side = variant.first;
    let board = BoardState::from_fen(setup(variant.board_size, &variant.setup)?)?;
    tracing::debug!(variant = %variant, "resolved variant");
    Ok((variant, rules, board))
}
