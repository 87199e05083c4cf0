use crate::board::BoardState;
use crate::game::logic::GameLogic;
use crate::game::state::{count_occurrences, GameplayState};
use crate::game::GameOutcome::{Draw, Win};
use crate::game::GameStatus::{Ongoing, Over};
use crate::game::WinReason::{Encircled, ExitFort, KingCaptured, KingEscaped, Repetition, Stalemate};
use crate::game::{DrawReason, GameStatus};
use crate::pieces::PieceKind::King;
use crate::pieces::Side;
use crate::pieces::Side::{Attacker, Defender};
use crate::play::Play;
use crate::rules::RepetitionRule;
use crate::tiles::Tile;
use std::collections::{BTreeSet, VecDeque};

impl GameLogic {
    /// Get the status of the game after `mover` has made `play`, leaving `board`. `history` is
    /// every state before the play, used to detect repetition.
    ///
    /// Conditions are checked in a fixed order and the first that applies decides the game: king
    /// captured, king escaped, repetition, encirclement, exit fort and finally whether the next
    /// player is left without any move.
    pub fn game_status(
        &self,
        board: &BoardState,
        play: &Play,
        mover: Side,
        history: &[GameplayState],
    ) -> GameStatus {
        if play.captures().any(|c| c.kind == King) || board.king().is_none() {
            return Over(Win(KingCaptured, Attacker))
        }
        if board.king().map_or(false, |k| self.is_escape_tile(k)) {
            return Over(Win(KingEscaped, Defender))
        }
        let next = mover.other();
        match self.rules.repetition {
            RepetitionRule::Ignore => {},
            RepetitionRule::Draw => {
                if count_occurrences(history, board, next) + 1 >= 3 {
                    return Over(Draw(DrawReason::Repetition))
                }
            },
            RepetitionRule::DefenderLoses => {
                if mover == Defender && count_occurrences(history, board, next) + 1 >= 3 {
                    return Over(Win(Repetition, Attacker))
                }
            },
        }
        if self.rules.encirclement && mover == Attacker && self.detect_encirclement(board) {
            return Over(Win(Encircled, Attacker))
        }
        if self.rules.exit_forts && mover == Defender && self.detect_exit_fort(board) {
            return Over(Win(ExitFort, Defender))
        }
        if !self.has_moves(board, next) {
            return Over(Win(Stalemate, mover))
        }
        Ongoing
    }

    /// Whether every defender is shut in by attackers, away from the edge. Flood fills from the
    /// king through empty and defending tiles; the defenders are encircled if the fill never
    /// touches the edge and reaches every defender.
    pub fn detect_encirclement(&self, board: &BoardState) -> bool {
        let Some(king) = board.king() else { return false };
        let mut seen: BTreeSet<Tile> = BTreeSet::from([king]);
        let mut queue: VecDeque<Tile> = VecDeque::from([king]);
        while let Some(tile) = queue.pop_front() {
            if self.board_geo.tile_at_edge(tile) {
                return false
            }
            for n in self.board_geo.neighbors(tile) {
                let open = board.get_piece(n).map_or(true, |p| p.side == Defender);
                if open && seen.insert(n) {
                    queue.push_back(n);
                }
            }
        }
        board.pieces_of(Defender).all(|t| seen.contains(&t))
    }

    /// Detect whether the king is in an exit fort: on the edge, able to move, and in a pocket of
    /// empty tiles that no attacker borders.
    pub fn detect_exit_fort(&self, board: &BoardState) -> bool {
        let Some(king) = board.king() else { return false };

        // King is at edge
        if !self.board_geo.tile_at_edge(king) {
            return false
        }
        // King has space to move
        if self.board_geo.neighbors(king).iter().all(|t| board.tile_occupied(*t)) {
            return false
        }

        let mut seen: BTreeSet<Tile> = BTreeSet::from([king]);
        let mut queue: VecDeque<Tile> = VecDeque::from([king]);
        while let Some(tile) = queue.pop_front() {
            for n in self.board_geo.neighbors(tile) {
                match board.get_piece(n) {
                    Some(p) if p.side == Attacker => return false,
                    Some(_) => {},
                    None => {
                        if seen.insert(n) {
                            queue.push_back(n);
                        }
                    }
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use crate::board::BoardState;
    use crate::game::logic::GameLogic;
    use crate::game::state::GameplayState;
    use crate::game::DrawReason;
    use crate::game::GameOutcome::{Draw, Win};
    use crate::game::GameStatus::Over;
    use crate::game::WinReason::{Encircled, ExitFort, KingCaptured, Repetition};
    use crate::pieces::Side::{Attacker, Defender};
    use crate::play::Play;
    use crate::preset::rules;
    use std::str::FromStr;

    #[test]
    fn test_encirclement() {
        let logic = GameLogic::new(rules::fetlar(), 9);
        let ring = "9/9/3ttt3/2tTKTt2/3ttt3/9/9/9/9";
        assert!(logic.detect_encirclement(&BoardState::from_str(ring).unwrap()));
        // A gap in the ring lets the defenders reach the edge.
        let open = "9/9/3ttt3/2tTKT3/3ttt3/9/9/9/9";
        assert!(!logic.detect_encirclement(&BoardState::from_str(open).unwrap()));
        // A defender outside the ring.
        let outside = "T8/9/3ttt3/2tTKTt2/3ttt3/9/9/9/9";
        assert!(!logic.detect_encirclement(&BoardState::from_str(outside).unwrap()));
    }

    #[test]
    fn test_exit_fort() {
        let logic = GameLogic::new(rules::copenhagen(), 11);
        let fort = "11/11/11/11/11/11/11/11/3TTT5/3T1T5/3TK1T4";
        assert!(logic.detect_exit_fort(&BoardState::from_str(fort).unwrap()));
        // An attacker inside the fort.
        let broken = "11/11/11/11/11/11/11/11/3TTT5/3TtT5/3TK1T4";
        assert!(!logic.detect_exit_fort(&BoardState::from_str(broken).unwrap()));
        // The king cannot move.
        let stuck = "11/11/11/11/11/11/11/11/11/4T6/3TKT5";
        assert!(!logic.detect_exit_fort(&BoardState::from_str(stuck).unwrap()));
        // Not on the edge.
        let inland = "11/11/11/11/11/11/11/3TTT5/3TK1T4/3TTTT4/11";
        assert!(!logic.detect_exit_fort(&BoardState::from_str(inland).unwrap()));
    }

    #[test]
    fn test_repetition_before_encirclement() {
        let logic = GameLogic::new(rules::fetlar(), 9);
        let ring = BoardState::from_str("9/9/3ttt3/2tTKTt2/3ttt3/9/9/9/9").unwrap();
        let play = Play::from_str("a1-a2").unwrap();
        assert_eq!(logic.game_status(&ring, &play, Attacker, &[]), Over(Win(Encircled, Attacker)));
        let seen = vec![GameplayState::new(ring.clone(), Defender); 2];
        assert_eq!(
            logic.game_status(&ring, &play, Attacker, &seen),
            Over(Draw(DrawReason::Repetition))
        );
    }

    #[test]
    fn test_repetition_before_exit_fort() {
        let logic = GameLogic::new(rules::copenhagen(), 11);
        let fort = BoardState::from_str("t10/11/11/11/11/11/11/11/3TTT5/3T1T5/3TK1T4").unwrap();
        let play = Play::from_str("Kf1-e1").unwrap();
        assert_eq!(logic.game_status(&fort, &play, Defender, &[]), Over(Win(ExitFort, Defender)));
        let seen = vec![GameplayState::new(fort.clone(), Attacker); 2];
        assert_eq!(
            logic.game_status(&fort, &play, Defender, &seen),
            Over(Win(Repetition, Attacker))
        );
    }

    #[test]
    fn test_king_capture_before_stalemate() {
        // The defenders have nothing left to move once the king is gone.
        let logic = GameLogic::new(rules::brandubh(), 7);
        let board = BoardState::from_str("7/7/7/7/7/1t1t3/7").unwrap();
        let play = Play::from_str("g2-d2xKc2").unwrap();
        assert!(!logic.has_moves(&board, Defender));
        assert_eq!(logic.game_status(&board, &play, Attacker, &[]), Over(Win(KingCaptured, Attacker)));
    }
}
