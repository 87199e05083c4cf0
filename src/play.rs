//! Move text. A play is one or more space-separated segments, each of the form
//! `[prefix]origin(-|^)destination[x[prefix]capture]*`, where `-` is a slide, `^` is a jump and
//! the prefix is the uppercase letter of the piece's kind (omitted for taflmen). Segments after
//! the first are berserk continuations by the same piece.
//!
//! Text is decoded once into [`Play`] and everything else works on the structured form. The
//! only place the board is consulted is [`normalize`], which re-derives the parts of the text
//! that depend on what is on the board.

use crate::board::BoardState;
use crate::error::ParseError;
use crate::error::ParseError::{BadSegment, EmptyString};
use crate::pieces::PieceKind;
use crate::pieces::PieceKind::Taflman;
use crate::tiles::Tile;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const SLIDE: char = '-';
const JUMP: char = '^';
const CAPTURE: char = 'x';

/// How a piece gets from one tile to another in a single segment.
#[derive(Debug, Eq, PartialEq, Clone, Copy, Hash)]
pub enum SegmentKind {
    /// Movement along a row or column through empty tiles.
    Slide,
    /// A leap over the adjacent piece to the tile beyond it.
    Jump,
}

impl SegmentKind {
    fn connector(&self) -> char {
        match self {
            SegmentKind::Slide => SLIDE,
            SegmentKind::Jump => JUMP,
        }
    }
}

/// A captured piece, as written in move text.
#[derive(Debug, Eq, PartialEq, Clone, Copy, Hash)]
pub struct Capture {
    pub kind: PieceKind,
    pub tile: Tile,
}

impl Display for Capture {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write_prefixed(f, self.kind, self.tile)
    }
}

/// A single movement of a piece from one tile to another, with the pieces it captured.
#[derive(Debug, Eq, PartialEq, Clone, Hash)]
pub struct PlaySegment {
    /// The kind of the moving piece.
    pub kind: PieceKind,
    pub from: Tile,
    pub to: Tile,
    pub motion: SegmentKind,
    pub captures: Vec<Capture>,
}

impl PlaySegment {
    pub fn new(kind: PieceKind, from: Tile, to: Tile, motion: SegmentKind) -> Self {
        Self { kind, from, to, motion, captures: vec![] }
    }

    /// Whether this segment captured anything.
    pub fn is_capture(&self) -> bool {
        !self.captures.is_empty()
    }

    /// The tiles captured by this segment.
    pub fn captured_tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        self.captures.iter().map(|c| c.tile)
    }
}

impl Display for PlaySegment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write_prefixed(f, self.kind, self.from)?;
        write!(f, "{}{}", self.motion.connector(), self.to)?;
        for c in &self.captures {
            write!(f, "{CAPTURE}{c}")?;
        }
        Ok(())
    }
}

impl FromStr for PlaySegment {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let conn_i = s.find(&[SLIDE, JUMP][..]).ok_or_else(|| BadSegment(s.to_string()))?;
        let motion = if s[conn_i..].starts_with(JUMP) { SegmentKind::Jump } else { SegmentKind::Slide };
        let (kind, from) = parse_prefixed(&s[..conn_i])?;
        let mut rest = s[conn_i + 1..].split(CAPTURE);
        let to_str = rest.next().ok_or_else(|| BadSegment(s.to_string()))?;
        if to_str.starts_with(|c: char| c.is_ascii_uppercase()) {
            // Destinations never carry a prefix.
            return Err(BadSegment(s.to_string()))
        }
        let to = Tile::from_str(to_str)?;
        let captures = rest
            .map(|c| parse_prefixed(c).map(|(kind, tile)| Capture { kind, tile }))
            .collect::<Result<Vec<Capture>, ParseError>>()?;
        Ok(Self { kind, from, to, motion, captures })
    }
}

/// A complete play: an ordered, non-empty chain of segments by the same piece.
#[derive(Debug, Eq, PartialEq, Clone, Hash)]
pub struct Play {
    pub segments: Vec<PlaySegment>,
}

impl Play {
    pub fn new(segments: Vec<PlaySegment>) -> Self {
        Self { segments }
    }

    /// The tile the moving piece started from.
    pub fn origin(&self) -> Option<Tile> {
        self.segments.first().map(|s| s.from)
    }

    /// The tile the moving piece ended on.
    pub fn destination(&self) -> Option<Tile> {
        self.segments.last().map(|s| s.to)
    }

    /// Every capture made across all segments.
    pub fn captures(&self) -> impl Iterator<Item = &Capture> + '_ {
        self.segments.iter().flat_map(|s| s.captures.iter())
    }

    /// A copy of this play extended by one segment.
    pub fn with_segment(&self, segment: PlaySegment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }
}

impl Display for Play {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (i, seg) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{seg}")?;
        }
        Ok(())
    }
}

impl FromStr for Play {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match PartialPlay::from_str(s)? {
            PartialPlay { play, pending: None } if !play.segments.is_empty() => Ok(play),
            _ => Err(ParseError::BadString(s.to_string()))
        }
    }
}

/// Move text that may end with an origin whose destination has not been chosen yet, as produced
/// while a play is being built up one click at a time.
#[derive(Debug, Eq, PartialEq, Clone, Hash)]
pub struct PartialPlay {
    pub play: Play,
    /// The origin (with its written kind) of a segment that has no destination yet.
    pub pending: Option<(PieceKind, Tile)>,
}

impl FromStr for PartialPlay {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(EmptyString)
        }
        let tokens: Vec<&str> = s.split(' ').collect();
        let mut segments = Vec::with_capacity(tokens.len());
        let mut pending = None;
        for (i, token) in tokens.iter().enumerate() {
            if token.contains(&[SLIDE, JUMP][..]) {
                segments.push(PlaySegment::from_str(token)?);
            } else if i == tokens.len() - 1 {
                pending = Some(parse_prefixed(token)?);
            } else {
                return Err(BadSegment(token.to_string()))
            }
        }
        Ok(Self { play: Play::new(segments), pending })
    }
}

impl Display for PartialPlay {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.play)?;
        if let Some((kind, tile)) = self.pending {
            if !self.play.segments.is_empty() {
                write!(f, " ")?;
            }
            write_prefixed(f, kind, tile)?;
        }
        Ok(())
    }
}

fn write_prefixed(f: &mut Formatter<'_>, kind: PieceKind, tile: Tile) -> std::fmt::Result {
    if let Some(p) = kind.prefix() {
        write!(f, "{p}")?;
    }
    write!(f, "{tile}")
}

/// Parse a tile optionally preceded by an uppercase kind prefix. No prefix means a taflman.
fn parse_prefixed(s: &str) -> Result<(PieceKind, Tile), ParseError> {
    let mut chars = s.chars();
    match chars.next() {
        None => Err(EmptyString),
        Some(c) if c.is_ascii_uppercase() => {
            let kind = PieceKind::from_letter(c).ok_or(ParseError::BadChar(c))?;
            Ok((kind, Tile::from_str(chars.as_str())?))
        },
        Some(_) => Ok((Taflman, Tile::from_str(s)?))
    }
}

/// Rewrite move text (which may end with a pending origin) into its one canonical form, given
/// the board as it was before the play:
///
/// * every origin carries the prefix of the piece on the play's first origin, since the same
///   piece makes every segment;
/// * each connector is `^` if the segment leaps over a piece and `-` otherwise;
/// * each capture carries the prefix of the piece it names, and captures are sorted by tile
///   and de-duplicated.
///
/// Where the board cannot answer (eg, the origin is empty) the text is left as written, so that
/// normalising is idempotent and the validator can report the underlying problem.
pub fn normalize(text: &str, board: &BoardState) -> Result<String, ParseError> {
    let PartialPlay { play, pending } = PartialPlay::from_str(text)?;
    let first_origin = play.origin().or(pending.map(|(_, t)| t));
    let written_kind = play.segments.first().map(|s| s.kind).or(pending.map(|(k, _)| k));
    let chain_kind = first_origin
        .and_then(|t| board.get_piece(t))
        .map(|p| p.kind)
        .or(written_kind)
        .unwrap_or(Taflman);

    let mut scratch = board.clone();
    let mut segments = Vec::with_capacity(play.segments.len());
    for seg in play.segments {
        let motion = if leaps_piece(seg.from, seg.to, &scratch) {
            SegmentKind::Jump
        } else {
            SegmentKind::Slide
        };
        let mut captures: Vec<Capture> = seg.captures.iter()
            .map(|c| Capture {
                kind: scratch.get_piece(c.tile).map(|p| p.kind).unwrap_or(c.kind),
                tile: c.tile
            })
            .collect();
        captures.sort_by_key(|c| c.tile);
        captures.dedup_by_key(|c| c.tile);

        // Replay on the scratch board as far as it can be replayed.
        if scratch.move_piece(seg.from, seg.to).is_ok() {
            for c in &captures {
                if c.tile != seg.to {
                    scratch.remove_piece(c.tile).ok();
                }
            }
        }
        segments.push(PlaySegment { kind: chain_kind, from: seg.from, to: seg.to, motion, captures });
    }
    let normalized = PartialPlay {
        play: Play::new(segments),
        pending: pending.map(|(_, t)| (chain_kind, t)),
    };
    Ok(normalized.to_string())
}

/// Whether moving from `from` to `to` passes directly over an occupied tile, ie, is a jump.
fn leaps_piece(from: Tile, to: Tile, board: &BoardState) -> bool {
    let (dc, dr) = (to.col.abs_diff(from.col), to.row.abs_diff(from.row));
    if !((dc == 2 && dr == 0) || (dc == 0 && dr == 2)) {
        return false
    }
    board.tile_occupied(from.midpoint(to))
}

/// Every captured tile in the move text, across all segments, without prefixes.
pub fn extract_captures(text: &str) -> Result<Vec<Tile>, ParseError> {
    let partial = PartialPlay::from_str(text)?;
    Ok(partial.play.captures().map(|c| c.tile).collect())
}
