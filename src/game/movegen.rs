use crate::board::BoardState;
use crate::error::BoardError;
use crate::game::logic::{ChainContext, GameLogic, Phase};
use crate::pieces::PieceKind::{King, Taflman};
use crate::pieces::{Piece, Side};
use crate::play::{Capture, Play, PlaySegment, SegmentKind};
use crate::rules::{JumpMode, Movement};
use crate::tiles::{Direction, Tile};

impl GameLogic {
    /// Tiles the moving piece can slide to from `from`: any number of tiles in a straight line
    /// (or one, for pieces that move a single step), stopping before the first occupied tile.
    /// Special tiles the piece may not enter are skipped over, and an empty throne the piece may
    /// not pass stops it.
    pub fn slide_destinations(&self, board: &BoardState, from: Tile, ctx: &ChainContext) -> Vec<Tile> {
        let range = match self.piece_rules(ctx.piece).movement {
            Movement::Unlimited => self.board_geo.side_len,
            Movement::OneStep => 1,
        };
        let mut dests = vec![];
        for dir in Direction::ALL {
            let mut tile = from;
            for _ in 0..range {
                let Some(next) = self.board_geo.step(tile, dir) else { break };
                tile = next;
                if tile != ctx.origin && board.tile_occupied(tile) {
                    break
                }
                if self.may_enter(ctx.piece, tile) {
                    dests.push(tile);
                }
                if !self.may_pass(ctx.piece, tile, board) {
                    break
                }
            }
        }
        dests
    }

    /// Tiles the moving piece can jump to from `from`, over exactly one adjacent piece.
    pub fn jump_destinations(&self, board: &BoardState, from: Tile, ctx: &ChainContext) -> Vec<Tile> {
        let mode = self.piece_rules(ctx.piece).jump;
        if mode == JumpMode::None {
            return vec![]
        }
        let mut dests = vec![];
        for dir in Direction::ALL {
            let Some(mid) = self.board_geo.step(from, dir) else { continue };
            let Some(land) = self.board_geo.step(mid, dir) else { continue };
            let Some(jumped) = board.get_piece(mid) else { continue };
            if land != ctx.origin && board.tile_occupied(land) {
                continue
            }
            if self.may_enter(ctx.piece, land) && self.may_jump(mode, ctx.piece, jumped, from, land) {
                dests.push(land);
            }
        }
        dests
    }

    fn may_jump(&self, mode: JumpMode, piece: Piece, jumped: Piece, from: Tile, land: Tile) -> bool {
        match mode {
            JumpMode::None => false,
            JumpMode::OverFriendlyTaflmen => jumped.side == piece.side && !jumped.is_king(),
            JumpMode::OverEnemyTaflmen | JumpMode::OverEnemyTaflmenCapture => {
                jumped.side != piece.side && !jumped.is_king()
            },
            JumpMode::OverEnemySpecial => {
                jumped.side != piece.side
                    && jumped.kind == Taflman
                    && (self.is_reserved_for(piece, from) || self.is_reserved_for(piece, land))
            },
        }
    }

    /// Every legal destination for the next segment from `from`, with how it is reached.
    pub fn destinations(
        &self,
        board: &BoardState,
        from: Tile,
        ctx: &ChainContext,
    ) -> Vec<(Tile, SegmentKind)> {
        let slides = self.slide_destinations(board, from, ctx);
        let jumps: Vec<(Tile, SegmentKind)> = self.jump_destinations(board, from, ctx)
            .into_iter()
            .filter(|t| !slides.contains(t))
            .map(|t| (t, SegmentKind::Jump))
            .collect();
        slides.into_iter()
            .map(|t| (t, SegmentKind::Slide))
            .chain(jumps)
            .collect()
    }

    /// Apply a single segment to a copy of `board`, moving the piece and removing whatever it
    /// captures. Returns the completed segment (captures sorted by tile) and the resulting board.
    pub fn resolve_segment(
        &self,
        board: &BoardState,
        from: Tile,
        to: Tile,
        motion: SegmentKind,
        ctx: &ChainContext,
    ) -> Result<(PlaySegment, BoardState), BoardError> {
        let mut after = board.clone();
        after.move_piece(from, to)?;
        let captured = self.get_captures(&after, from, to, motion, ctx);
        let mut segment = PlaySegment::new(ctx.kind(), from, to, motion);
        for tile in captured {
            let piece = after.remove_piece(tile)?;
            segment.captures.push(Capture { kind: piece.kind, tile });
        }
        Ok((segment, after))
    }

    /// Whether a king landing at `to` has escaped mid-chain under berserk rules.
    fn escapes(&self, piece: Piece, to: Tile) -> bool {
        piece.is_king() && self.is_escape_tile(to)
    }

    /// Whether a segment is allowed in the given phase of the chain. Continuations must capture,
    /// or take a king that may escape mid-chain onto an escape tile.
    pub fn segment_allowed(&self, segment: &PlaySegment, ctx: &ChainContext) -> bool {
        match ctx.phase {
            Phase::Initial => true,
            Phase::Continuation => segment.is_capture()
                || (self.escapes(ctx.piece, segment.to) && self.piece_rules(ctx.piece).berserk_escape),
        }
    }

    /// Whether the chain may go on after the given segment.
    pub fn may_continue(&self, segment: &PlaySegment, ctx: &ChainContext) -> bool {
        self.rules.berserk
            && segment.is_capture()
            && !self.escapes(ctx.piece, segment.to)
            && !segment.captures.iter().any(|c| c.kind == King)
    }

    /// Whether any further segment is possible from `at`, given a chain described by `ctx` that is
    /// already in its continuation phase.
    pub fn has_continuation(&self, board: &BoardState, at: Tile, ctx: &ChainContext) -> Result<bool, BoardError> {
        for (to, motion) in self.destinations(board, at, ctx) {
            let (segment, _) = self.resolve_segment(board, at, to, motion, ctx)?;
            if self.segment_allowed(&segment, ctx) {
                return Ok(true)
            }
        }
        Ok(false)
    }

    /// Every complete play that can be made by the piece at `tile`, including every point at which
    /// a berserk chain may stop. Returns an error if there is no piece at the given tile.
    pub fn plays_from(&self, board: &BoardState, tile: Tile) -> Result<Vec<Play>, BoardError> {
        let piece = board.get_piece(tile).ok_or(BoardError::NoPiece(tile))?;
        let mut plays = vec![];
        self.extend_chains(board, tile, &ChainContext::new(piece, tile), &Play::new(vec![]), &mut plays)?;
        Ok(plays)
    }

    fn extend_chains(
        &self,
        board: &BoardState,
        from: Tile,
        ctx: &ChainContext,
        prefix: &Play,
        out: &mut Vec<Play>,
    ) -> Result<(), BoardError> {
        for (to, motion) in self.destinations(board, from, ctx) {
            let (segment, after) = self.resolve_segment(board, from, to, motion, ctx)?;
            if !self.segment_allowed(&segment, ctx) {
                continue
            }
            let play = prefix.with_segment(segment);
            out.push(play.clone());
            if let Some(last) = play.segments.last() {
                if self.may_continue(last, ctx) {
                    let next = ctx.continued(last);
                    self.extend_chains(&after, to, &next, &play, out)?;
                }
            }
        }
        Ok(())
    }

    /// Every complete play available to the given side.
    pub fn plays(&self, board: &BoardState, side: Side) -> Result<Vec<Play>, BoardError> {
        let mut plays = vec![];
        for tile in board.pieces_of(side) {
            plays.extend(self.plays_from(board, tile)?);
        }
        tracing::trace!(%side, count = plays.len(), "generated plays");
        Ok(plays)
    }

    /// Whether the given side has at least one legal play.
    pub fn has_moves(&self, board: &BoardState, side: Side) -> bool {
        board.pieces_of(side).any(|tile| match board.get_piece(tile) {
            Some(piece) => !self.destinations(board, tile, &ChainContext::new(piece, tile)).is_empty(),
            None => false,
        })
    }
}
