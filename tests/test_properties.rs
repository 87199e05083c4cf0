use proptest::prelude::*;
use std::collections::BTreeSet;
use tafl::game::logic::GameLogic;
use tafl::pieces::PieceKind::{Commander, Knight, Taflman};
use tafl::preset::boards;
use tafl::{normalize, BoardState, Game, GameStatus, Piece, PieceKind, Ruleset, Side, Tile};

const VARIANTS: [&str; 7] = [
    "historical-9-tcross-a",
    "fetlar-11-tdiamond-a",
    "copenhagen-11-tdiamond-a",
    "linnaeus-9-tcross-a",
    "brandubh-7-tcross-a",
    "magpie-7-magpie-d",
    "berserk-11-berserk-a",
];

fn piece_from_code(code: u8) -> Option<Piece> {
    let kinds: [PieceKind; 3] = [Taflman, Knight, Commander];
    match code {
        0..=3 => None,
        c => {
            let side = if c % 2 == 0 { Side::Attacker } else { Side::Defender };
            Some(Piece::new(kinds[((c - 4) / 2 % 3) as usize], side))
        }
    }
}

/// Build a 7x7 board from one code per tile, plus an optional king.
fn board_from_codes(codes: &[u8], king: Option<usize>) -> BoardState {
    let mut board = BoardState::new(7);
    for (i, code) in codes.iter().enumerate() {
        let tile = Tile::new((i % 7) as u8, (i / 7) as u8);
        let piece = if king == Some(i) { Some(Piece::king()) } else { piece_from_code(*code) };
        if let Some(p) = piece {
            board.place_piece(tile, p).unwrap();
        }
    }
    board
}

/// Play the moves picked by `choices` from the start of the given variant, calling `check` with
/// the game and the chosen play before each play is made.
fn playout(variant: &str, choices: &[usize], mut check: impl FnMut(&Game, &tafl::Play)) -> Game {
    let mut g = Game::new(variant).unwrap();
    for choice in choices {
        if g.status() != GameStatus::Ongoing {
            break
        }
        let plays = g.plays().unwrap();
        if plays.is_empty() {
            break
        }
        let play = &plays[choice % plays.len()];
        check(&g, play);
        g.do_play(&play.to_string()).unwrap();
    }
    g
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn normalize_is_idempotent(
        text in "[KNCT]?[a-g][1-7][-^][a-g][1-7](x[KNCT]?[a-g][1-7]){0,2}( [KNCT]?[a-g][1-7][-^][a-g][1-7](x[KNCT]?[a-g][1-7]){0,2}){0,2}( [KNCT]?[a-g][1-7])?"
    ) {
        let board = BoardState::from_fen(boards::TCROSS_7).unwrap();
        if let Ok(once) = normalize(&text, &board) {
            let twice = normalize(&once, &board).unwrap();
            prop_assert_eq!(once, twice);
        }
    }

    #[test]
    fn restore_undoes_play(
        variant_idx in 0..VARIANTS.len(),
        choices in prop::collection::vec(any::<usize>(), 1..30)
    ) {
        let mut g = Game::new(VARIANTS[variant_idx]).unwrap();
        for choice in choices {
            if g.status() != GameStatus::Ongoing {
                break
            }
            let plays = g.plays().unwrap();
            if plays.is_empty() {
                break
            }
            let before = g.snapshot();
            g.do_play(&plays[choice % plays.len()].to_string()).unwrap();
            let after = g.snapshot();
            g.restore(-2).unwrap();
            prop_assert_eq!(&g.state, &before);
            g.restore(-1).unwrap();
            prop_assert_eq!(&g.state, &after);
        }
    }

    #[test]
    fn custodian_captures_survive_half_turn(
        codes in prop::collection::vec(0u8..10, 49),
        king in prop::option::of(0usize..49),
        mover_idx in any::<usize>(),
    ) {
        let logic = GameLogic::new(Ruleset::default(), 7);
        let board = board_from_codes(&codes, king);
        let occupied: Vec<(Tile, Piece)> = board.iter().collect();
        prop_assume!(!occupied.is_empty());
        let (to, mover) = occupied[mover_idx % occupied.len()];

        let rotated = board.rotated();
        let direct: BTreeSet<Tile> = logic.custodian_captures(&board, to, mover)
            .into_iter()
            .map(|t| t.rotated(7))
            .collect();
        let turned: BTreeSet<Tile> = logic.custodian_captures(&rotated, to.rotated(7), mover)
            .into_iter()
            .collect();
        prop_assert_eq!(direct, turned);
    }

    #[test]
    fn generated_plays_respect_entry_rules(
        variant_idx in 0..VARIANTS.len(),
        choices in prop::collection::vec(any::<usize>(), 1..40)
    ) {
        let mut violations = vec![];
        playout(VARIANTS[variant_idx], &choices, |g, play| {
            let rules = &g.logic.rules;
            let geo = &g.logic.board_geo;
            let Some(origin) = play.origin() else { return };
            let Some(piece) = g.board().get_piece(origin) else {
                violations.push(format!("{play}: no piece at origin"));
                return
            };
            for seg in &play.segments {
                let on_throne = geo.throne == Some(seg.to);
                let on_corner = rules.corners.enabled && geo.is_corner(seg.to);
                if on_throne && !rules.throne.entry.contains(piece) {
                    violations.push(format!("{play}: {piece} may not stop on the throne"));
                }
                if on_corner && !rules.corners.entry.contains(piece) {
                    violations.push(format!("{play}: {piece} may not stop on a corner"));
                }
                if seg.from == seg.to {
                    violations.push(format!("{play}: segment goes nowhere"));
                }
            }
        });
        prop_assert!(violations.is_empty(), "{:?}", violations);
    }
}
