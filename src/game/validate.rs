use crate::board::BoardState;
use crate::error::{InvalidPlay, ParseError, PlayError};
use crate::game::logic::{ChainContext, GameLogic};
use crate::pieces::Side;
use crate::play::{normalize, PartialPlay, Play};
use crate::tiles::Tile;
use std::collections::BTreeSet;
use std::str::FromStr;

/// How far a piece of move text is from being a play that can be made.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum MoveValidity {
    /// The text can never become a legal play.
    Invalid(InvalidPlay),
    /// The text is a legal beginning, but names no destination yet.
    Incomplete,
    /// The text is a legal play, and the moving piece could also keep going.
    Extendable,
    /// The text is a legal play and nothing more can be added to it.
    Complete,
}

impl MoveValidity {
    /// Whether the text could be played as it stands.
    pub fn is_playable(&self) -> bool {
        matches!(self, MoveValidity::Extendable | MoveValidity::Complete)
    }
}

/// The result of replaying valid move text against a board.
#[derive(Debug, Clone)]
pub(crate) struct Replay {
    /// The play as made, with captures worked out from the board.
    pub(crate) play: Play,
    /// The board after the play.
    pub(crate) board: BoardState,
    pub(crate) validity: MoveValidity,
}

impl GameLogic {
    /// Check move text against the given board for the given side to play.
    ///
    /// The checks are made in order: the text must parse, every tile must be on the board, the
    /// first origin must hold one of the mover's pieces, segments must join up, every prefix must
    /// match the piece it names, every destination must be legal at that point of the chain,
    /// the listed captures must be exactly those the segment makes, and finally the text must be
    /// in canonical form.
    pub fn validate(&self, board: &BoardState, side: Side, text: &str) -> Result<MoveValidity, PlayError> {
        match self.replay(board, side, text) {
            Ok(replay) => Ok(replay.validity),
            Err(PlayError::Invalid(reason)) => Ok(MoveValidity::Invalid(reason)),
            Err(e) => Err(e),
        }
    }

    /// Replay move text on a copy of the board, checking it as it goes.
    pub(crate) fn replay(&self, board: &BoardState, side: Side, text: &str) -> Result<Replay, PlayError> {
        let PartialPlay { play, pending } = PartialPlay::from_str(text).map_err(InvalidPlay::from)?;

        let mut named: Vec<Tile> = vec![];
        for seg in &play.segments {
            named.push(seg.from);
            named.push(seg.to);
            named.extend(seg.captured_tiles());
        }
        named.extend(pending.map(|(_, t)| t));
        if let Some(t) = named.iter().find(|t| !board.tile_in_bounds(**t)) {
            return Err(InvalidPlay::OutOfBounds(*t).into())
        }

        let origin = match (play.origin(), pending) {
            (Some(t), _) | (None, Some((_, t))) => t,
            // Parsing never yields neither.
            (None, None) => return Err(InvalidPlay::Malformed(ParseError::EmptyString).into()),
        };
        let piece = board.get_piece(origin).ok_or(InvalidPlay::NoPiece(origin))?;
        if piece.side != side {
            return Err(InvalidPlay::WrongPlayer(origin).into())
        }

        let mut ctx = ChainContext::new(piece, origin);
        let mut current = board.clone();
        let mut at = origin;
        let mut may_go_on = true;
        let mut done = Vec::with_capacity(play.segments.len());
        for seg in &play.segments {
            if seg.from != at {
                return Err(InvalidPlay::NotContiguous { expected: at, found: seg.from }.into())
            }
            if !may_go_on {
                return Err(InvalidPlay::NoContinuation(at).into())
            }
            if seg.kind != piece.kind {
                return Err(InvalidPlay::WrongPrefix(seg.from).into())
            }
            for cap in &seg.captures {
                match current.get_piece(cap.tile) {
                    Some(p) if p.kind != cap.kind => return Err(InvalidPlay::WrongPrefix(cap.tile).into()),
                    _ => {}
                }
            }

            let Some((_, motion)) = self.destinations(&current, at, &ctx)
                .into_iter()
                .find(|(t, _)| *t == seg.to) else {
                return Err(InvalidPlay::IllegalDestination(seg.to).into())
            };
            let (resolved, after) = self.resolve_segment(&current, at, seg.to, motion, &ctx)?;
            if !self.segment_allowed(&resolved, &ctx) {
                return Err(InvalidPlay::IllegalDestination(seg.to).into())
            }

            for cap in &seg.captures {
                match current.get_piece(cap.tile) {
                    None => return Err(InvalidPlay::CaptureEmptyTile(cap.tile).into()),
                    Some(p) if p.side == side => return Err(InvalidPlay::CaptureOwnPiece(cap.tile).into()),
                    _ => {}
                }
            }
            let claimed: BTreeSet<Tile> = seg.captured_tiles().collect();
            let actual: BTreeSet<Tile> = resolved.captured_tiles().collect();
            if claimed != actual {
                return Err(InvalidPlay::WrongCaptures(seg.to).into())
            }

            may_go_on = self.may_continue(&resolved, &ctx);
            ctx = ctx.continued(&resolved);
            current = after;
            at = seg.to;
            done.push(resolved);
        }

        if let Some((kind, tile)) = pending {
            if !done.is_empty() {
                if tile != at {
                    return Err(InvalidPlay::NotContiguous { expected: at, found: tile }.into())
                }
                if !may_go_on {
                    return Err(InvalidPlay::NoContinuation(at).into())
                }
            }
            if kind != piece.kind {
                return Err(InvalidPlay::WrongPrefix(tile).into())
            }
        }

        let canonical = normalize(text, board).map_err(InvalidPlay::from)?;
        if canonical != text {
            return Err(InvalidPlay::NotCanonical(canonical).into())
        }

        let validity = if pending.is_some() || done.is_empty() {
            MoveValidity::Incomplete
        } else if may_go_on && self.has_continuation(&current, at, &ctx)? {
            MoveValidity::Extendable
        } else {
            MoveValidity::Complete
        };
        Ok(Replay { play: Play::new(done), board: current, validity })
    }
}
