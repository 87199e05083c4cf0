use crate::collections::PieceSet;
use crate::pieces::PieceKind::{Commander, King, Knight, Taflman};
use crate::pieces::Side::Attacker;
use crate::pieces::{PieceKind, Side};
use crate::rules::CapturePower::{Armed, Piercing};
use crate::rules::JumpMode::{OverEnemyTaflmenCapture, OverFriendlyTaflmen};
use crate::rules::Movement::Unlimited;
use crate::rules::Strength::{Strong, Weak};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Where the king must reach to escape.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EscapeType {
    /// King escapes on reaching any edge tile.
    Edge,
    /// King escapes on reaching a corner.
    #[default]
    Corner,
}

/// How hard a piece is to capture by custodian capture.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Strength {
    /// Piece can be captured by two hostile pieces or tiles on opposite sides.
    #[default]
    Weak,
    /// Piece must be surrounded by hostile pieces or tiles on all four sides to be captured.
    Strong,
    /// Piece is strong on or beside the throne, and weak elsewhere.
    StrongNearThrone,
}

/// Whether and how a piece takes part in captures.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CapturePower {
    /// Piece can capture by moving (hammer) and be captured against (anvil).
    #[default]
    Armed,
    /// Piece can be captured against but cannot initiate captures.
    AnvilOnly,
    /// Piece can initiate captures but cannot be captured against.
    HammerOnly,
    /// Piece takes no part in captures.
    Unarmed,
    /// Piece is armed, and may also capture strong pieces from a single direction.
    Piercing,
}

impl CapturePower {
    /// Whether a piece with this power captures by moving next to an enemy.
    pub fn is_hammer(&self) -> bool {
        matches!(self, CapturePower::Armed | CapturePower::HammerOnly | CapturePower::Piercing)
    }

    /// Whether a piece with this power can be captured against.
    pub fn is_anvil(&self) -> bool {
        matches!(self, CapturePower::Armed | CapturePower::AnvilOnly | CapturePower::Piercing)
    }
}

/// Whether and over what a piece may jump. Jumps always cover exactly two tiles.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum JumpMode {
    /// Piece cannot jump.
    #[default]
    None,
    /// Piece may jump over a friendly non-king piece.
    OverFriendlyTaflmen,
    /// Piece may jump over an enemy non-king piece, without capturing it.
    OverEnemyTaflmen,
    /// Piece may jump over an enemy non-king piece, capturing it.
    OverEnemyTaflmenCapture,
    /// Piece may jump over (and capture) an enemy taflman, but only when the jump starts or ends
    /// on a special tile reserved for pieces of its kind.
    OverEnemySpecial,
}

impl JumpMode {
    /// Whether a jump in this mode captures the jumped piece.
    pub fn captures(&self) -> bool {
        matches!(self, JumpMode::OverEnemyTaflmenCapture | JumpMode::OverEnemySpecial)
    }
}

/// How far a piece may slide.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Movement {
    /// Any number of empty tiles in a straight line.
    #[default]
    Unlimited,
    /// Exactly one tile.
    OneStep,
}

/// The behaviour of a single kind of piece.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PieceRules {
    pub strength: Strength,
    pub power: CapturePower,
    pub jump: JumpMode,
    pub movement: Movement,
    /// Whether the piece may end a berserk chain by escaping (only meaningful for the king).
    pub berserk_escape: bool,
}

/// Behaviour of every kind of piece.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PieceRulesTable {
    pub king: PieceRules,
    pub taflman: PieceRules,
    pub knight: PieceRules,
    pub commander: PieceRules,
}

impl PieceRulesTable {
    /// The rules for the given kind of piece. This is the one place piece behaviour is looked up.
    pub fn get(&self, kind: PieceKind) -> &PieceRules {
        match kind {
            King => &self.king,
            Taflman => &self.taflman,
            Knight => &self.knight,
            Commander => &self.commander,
        }
    }
}

impl Default for PieceRulesTable {
    fn default() -> Self {
        Self {
            king: PieceRules { strength: Strong, power: Armed, ..PieceRules::default() },
            taflman: PieceRules { strength: Weak, power: Armed, ..PieceRules::default() },
            knight: PieceRules { jump: OverEnemyTaflmenCapture, ..PieceRules::default() },
            commander: PieceRules {
                power: Piercing,
                jump: OverFriendlyTaflmen,
                movement: Unlimited,
                ..PieceRules::default()
            },
        }
    }
}

/// Rules relating to the throne. Entry, passage and hostility only apply while the throne is
/// empty.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ThroneRules {
    /// Whether the board has a throne at all.
    pub enabled: bool,
    /// Pieces that may stop on the throne.
    pub entry: PieceSet,
    /// Pieces that may pass over the empty throne.
    pub pass: PieceSet,
    /// Pieces to which the empty throne is hostile.
    pub hostile: PieceSet,
}

impl Default for ThroneRules {
    fn default() -> Self {
        Self {
            enabled: true,
            entry: PieceSet::from_kind(King),
            pass: PieceSet::all(),
            hostile: PieceSet::all(),
        }
    }
}

/// Rules relating to the corners.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CornerRules {
    /// Whether the board has special corner tiles.
    pub enabled: bool,
    /// Pieces that may enter a corner.
    pub entry: PieceSet,
    /// Pieces to which an empty corner is hostile.
    pub hostile: PieceSet,
}

impl Default for CornerRules {
    fn default() -> Self {
        Self {
            enabled: true,
            entry: PieceSet::from_kind(King),
            hostile: PieceSet::all(),
        }
    }
}

/// What happens when a position repeats.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RepetitionRule {
    /// Repetition has no effect.
    #[default]
    Ignore,
    /// The defender loses if their play produces a position for the third time.
    DefenderLoses,
    /// The game is drawn when a position occurs for the third time.
    Draw,
}

/// A set of rules for a tafl game. Built once per game and never changed.
///
/// The [`Default`] value is the documented base ruleset from which every preset family is
/// derived; see [`crate::preset`].
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Ruleset {
    /// Where the king must get to in order to escape.
    pub escape: EscapeType,
    /// Behaviour of each kind of piece.
    pub pieces: PieceRulesTable,
    /// Rules relating to the throne.
    pub throne: ThroneRules,
    /// Rules relating to the corners.
    pub corners: CornerRules,
    /// Pieces for which the edge of the board counts as hostile.
    pub hostile_edge: PieceSet,
    /// Whether shieldwall captures are allowed.
    pub shield_walls: bool,
    /// Whether the defender wins by forming an exit fort.
    pub exit_forts: bool,
    /// Whether a capturing piece may keep moving and capturing in the same turn.
    pub berserk: bool,
    /// Whether the attacker wins by enclosing all defenders away from the edge.
    pub encirclement: bool,
    /// What happens when a position repeats.
    pub repetition: RepetitionRule,
    /// Linnaean throne capture. Accepted in configuration but not implemented.
    pub linnaean_capture: bool,
    /// The side that plays first.
    pub starting_side: Side,
}

impl Default for Ruleset {
    fn default() -> Self {
        Self {
            escape: EscapeType::Corner,
            pieces: PieceRulesTable::default(),
            throne: ThroneRules::default(),
            corners: CornerRules::default(),
            hostile_edge: PieceSet::none(),
            shield_walls: false,
            exit_forts: false,
            berserk: false,
            encirclement: false,
            repetition: RepetitionRule::Ignore,
            linnaean_capture: false,
            starting_side: Attacker,
        }
    }
}

impl Ruleset {
    /// Shorthand for the rules governing the given kind of piece.
    pub fn piece(&self, kind: PieceKind) -> &PieceRules {
        self.pieces.get(kind)
    }
}
