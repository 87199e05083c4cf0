use rand::rngs::StdRng;
use rand::SeedableRng;
use tafl::preset::FAMILIES;
use tafl::{Game, GameStatus, MoveValidity};

const MAX_PLIES: usize = 150;

/// Play random games to the end (or to `MAX_PLIES`), checking every chosen play against the
/// validator and the board after every ply.
fn random_game(variant: &str, seed: u64) -> Game {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut g = Game::new(variant).unwrap();
    for ply in 0..MAX_PLIES {
        let Some(play) = g.random_play(&mut rng).unwrap() else { break };
        let text = play.to_string();
        let validity = g.validate(&text).unwrap();
        assert!(validity.is_playable(), "{variant}: {text} is {validity:?}");
        let preview = g.preview(&text).unwrap();
        let mover = g.side_to_play();
        let status = g.do_play(&text).unwrap();
        assert_eq!(g.board(), &preview, "{variant}: {text}");
        assert_eq!(g.side_to_play(), !mover);
        assert_eq!(g.history.len(), ply + 2);
        assert!(g.board().count_pieces(mover) > 0);
        if status != GameStatus::Ongoing {
            assert!(g.plays().unwrap().is_empty());
            assert_eq!(g.validate(&text), Err(tafl::PlayError::GameOver));
            break
        }
    }
    g
}

#[test]
fn test_random_games_every_family() {
    let setups = [
        (7, "tcross"), (7, "magpie"), (9, "tcross"), (11, "tdiamond"), (11, "berserk"),
    ];
    for family in FAMILIES {
        for (size, setup) in setups {
            for marker in ["a", "d"] {
                let variant = format!("{family}-{size}-{setup}-{marker}");
                let g = random_game(&variant, size as u64);
                assert!(g.history.len() <= MAX_PLIES + 1);
            }
        }
    }
}

#[test]
fn test_random_games_large_boards() {
    for variant in ["historical-13-tcross-a", "copenhagen-15-tcross-a", "fetlar-11-tcross-d"] {
        random_game(variant, 7);
    }
}

#[test]
fn test_seeded_games_repeat() {
    let a = random_game("berserk-11-berserk-a", 42);
    let b = random_game("berserk-11-berserk-a", 42);
    assert_eq!(a.history, b.history);
}

#[test]
fn test_validity_of_chain_prefixes() {
    // Every proper prefix of a generated chain is itself playable, and cutting the last segment
    // down to its origin leaves an incomplete play.
    let mut rng = StdRng::seed_from_u64(3);
    let mut g = Game::new("berserk-11-berserk-a").unwrap();
    for _ in 0..60 {
        if g.status() != GameStatus::Ongoing {
            break
        }
        let plays = g.plays().unwrap();
        for play in plays.iter().filter(|p| p.segments.len() > 1) {
            let tokens: Vec<String> = play.segments.iter().map(|s| s.to_string()).collect();
            for n in 1..tokens.len() {
                let prefix = tokens[..n].join(" ");
                assert_eq!(g.validate(&prefix), Ok(MoveValidity::Extendable), "{prefix}");
            }
        }
        let Some(play) = g.random_play(&mut rng).unwrap() else { break };
        g.do_play(&play.to_string()).unwrap();
    }
}
