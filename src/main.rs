use std::env;
use std::io::stdin;
use std::process::ExitCode;
use tafl::GameOutcome::{Draw, Win};
use tafl::GameStatus::{Ongoing, Over};
use tafl::{Game, MoveValidity};

const DEFAULT_VARIANT: &str = "copenhagen-11-tdiamond-a";

fn input(prompt: &str) -> std::io::Result<String> {
    println!("{prompt}");
    let mut s: String = String::new();
    stdin().read_line(&mut s)?;
    Ok(s.trim().to_string())
}

/// Read move text until a playable move is entered. Entering `random` picks a move at random.
fn get_play(game: &Game) -> Option<String> {
    loop {
        let text = match input("Please enter your move (or 'random', or 'quit'):") {
            Ok(text) => text,
            Err(e) => {
                println!("Error reading input ({e}). Try again.");
                continue
            }
        };
        match text.as_str() {
            "quit" | "" => return None,
            "random" => match game.random_play(&mut rand::thread_rng()) {
                Ok(Some(play)) => return Some(play.to_string()),
                Ok(None) => return None,
                Err(e) => println!("Could not generate a move ({e})."),
            },
            _ => match game.validate(&text) {
                Ok(v) if v.is_playable() => return Some(text),
                Ok(MoveValidity::Incomplete) => {
                    if let Ok(board) = game.preview(&text) {
                        println!("{board}");
                    }
                    println!("Move is incomplete. Try again.");
                },
                Ok(MoveValidity::Invalid(reason)) => println!("Invalid move ({reason}). Try again."),
                Ok(_) => {},
                Err(e) => println!("Invalid move ({e}). Try again."),
            }
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();
    let variant = env::args().nth(1).unwrap_or_else(|| DEFAULT_VARIANT.to_string());
    println!("tafl demo: {variant}");
    let mut game = match Game::new(&variant) {
        Ok(game) => game,
        Err(e) => {
            eprintln!("Could not create game ({e}).");
            return ExitCode::FAILURE
        }
    };
    while game.status() == Ongoing {
        println!("Board:");
        println!("{}", game.board());
        println!("{} to play.", game.side_to_play());

        let Some(text) = get_play(&game) else {
            println!("Goodbye.");
            return ExitCode::SUCCESS
        };
        match game.do_play(&text) {
            Ok(_) => println!("Played {text}."),
            Err(e) => println!("Invalid move ({e}). Try again."),
        }
    }
    if let Over(outcome) = game.status() {
        match outcome {
            Draw(reason) => println!("Game over. Draw ({reason:?})."),
            Win(reason, side) => println!("Game over. Winner is {side} ({reason:?})."),
        }
    }
    println!("Final board:");
    println!("{}", game.board());
    ExitCode::SUCCESS
}
