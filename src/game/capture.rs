use crate::board::BoardState;
use crate::game::logic::{ChainContext, GameLogic};
use crate::pieces::PieceKind::Taflman;
use crate::pieces::{Piece, Side};
use crate::play::SegmentKind;
use crate::rules::CapturePower::Piercing;
use crate::rules::JumpMode;
use crate::tiles::{Coords, Direction, Tile};
use std::collections::BTreeSet;

impl GameLogic {
    /// Get the tiles containing pieces captured when the moving piece described by `ctx` arrives
    /// at `to` from `from`. `board` is the board after the piece has moved, with nothing yet
    /// removed. Tiles already captured earlier in the chain are never returned again.
    pub fn get_captures(
        &self,
        board: &BoardState,
        from: Tile,
        to: Tile,
        motion: SegmentKind,
        ctx: &ChainContext,
    ) -> BTreeSet<Tile> {
        let mut captures: BTreeSet<Tile> = self.custodian_captures(board, to, ctx.piece)
            .into_iter()
            .collect();
        if motion == SegmentKind::Jump {
            captures.extend(self.jump_capture(board, from, to, ctx.piece));
        }
        captures.extend(self.shieldwall_captures(board, to, ctx.piece));
        captures.retain(|t| !ctx.captured.contains(t));
        captures
    }

    /// Captures made by the piece at `to` against enemies next to it.
    ///
    /// A weak enemy is captured if the tile on its far side is hostile to it. A strong enemy must
    /// be hostile on all four sides, the moving piece counting as one of them, unless the moving
    /// piece is piercing, in which case a single opposite anvil of any kind is enough.
    pub fn custodian_captures(&self, board: &BoardState, to: Tile, mover: Piece) -> Vec<Tile> {
        let power = self.piece_rules(mover).power;
        if !power.is_hammer() {
            return vec![]
        }
        let mut captures = vec![];
        for dir in Direction::ALL {
            let Some(n) = self.board_geo.step(to, dir) else { continue };
            let Some(victim) = board.get_piece(n) else { continue };
            if victim.side == mover.side {
                // Friendly neighbour so no possibility for capture
                continue
            }
            let far = n + dir;
            let captured = if self.is_strong(victim, n) {
                let surrounded = Direction::ALL.iter().all(|d| {
                    let c = n + *d;
                    c == Coords::from(to) || self.coords_hostile(c, victim, mover.side, false, board)
                });
                surrounded
                    || (power == Piercing && self.coords_hostile(far, victim, mover.side, true, board))
            } else {
                self.coords_hostile(far, victim, mover.side, false, board)
            };
            if captured {
                captures.push(n);
            }
        }
        captures
    }

    /// The piece jumped over by a capturing jump from `from` to `to`, if the jump captures it.
    pub fn jump_capture(&self, board: &BoardState, from: Tile, to: Tile, mover: Piece) -> Option<Tile> {
        let mode = self.piece_rules(mover).jump;
        if !mode.captures() {
            return None
        }
        let mid = from.midpoint(to);
        let victim = board.get_piece(mid)?;
        if victim.side == mover.side || victim.is_king() {
            return None
        }
        if mode == JumpMode::OverEnemySpecial && victim.kind != Taflman {
            return None
        }
        Some(mid)
    }

    /// Detect shieldwall captures made by the piece arriving at the edge tile `to`.
    ///
    /// Starting next to `to`, walk along the edge in each direction over enemy pieces, each of
    /// which must be pinned by an anvil on its inward side. The run is captured if it is at least
    /// two pieces long and closed at the far end by an anvil or a corner hostile to the run. A
    /// king may form part of the wall but is never captured by it.
    pub fn shieldwall_captures(&self, board: &BoardState, to: Tile, mover: Piece) -> Vec<Tile> {
        if !self.rules.shield_walls || !self.piece_rules(mover).power.is_hammer() {
            return vec![]
        }
        let max = self.board_geo.side_len - 1;
        let mut inward = vec![];
        if to.row == 0 {
            inward.push(Direction::Up);
        }
        if to.row == max {
            inward.push(Direction::Down);
        }
        if to.col == 0 {
            inward.push(Direction::Right);
        }
        if to.col == max {
            inward.push(Direction::Left);
        }

        let mut captures = vec![];
        for in_dir in inward {
            for along in in_dir.perpendicular() {
                if let Some(run) = self.wall_run(board, to, along, in_dir, mover.side) {
                    captures.extend(run.into_iter().filter(|(_, p)| !p.is_king()).map(|(t, _)| t));
                }
            }
        }
        captures
    }

    /// Walk from `start` in direction `along`, returning the enclosed run of enemy pieces if it
    /// forms a capturable shieldwall.
    fn wall_run(
        &self,
        board: &BoardState,
        start: Tile,
        along: Direction,
        in_dir: Direction,
        capturer: Side,
    ) -> Option<Vec<(Tile, Piece)>> {
        let mut run: Vec<(Tile, Piece)> = vec![];
        let mut tile = start;
        loop {
            tile = self.board_geo.step(tile, along)?;
            match board.get_piece(tile) {
                None => {
                    let closed = self.board_geo.is_corner(tile)
                        && run.iter().all(|(_, p)| self.rules.corners.hostile.contains(*p));
                    return (closed && run.len() >= 2).then_some(run)
                },
                Some(p) if p.side == capturer => {
                    let closed = self.piece_rules(p).power.is_anvil();
                    return (closed && run.len() >= 2).then_some(run)
                },
                Some(p) => {
                    let pinned = self.board_geo.step(tile, in_dir)
                        .and_then(|t| board.get_piece(t))
                        .map(|a| a.side == capturer && self.piece_rules(a).power.is_anvil())
                        .unwrap_or(false);
                    if !pinned {
                        return None
                    }
                    run.push((tile, p));
                }
            }
        }
    }
}
