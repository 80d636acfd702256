//! Console front end: play against the engine, or watch it play itself.

use std::io::{self, BufRead, Write};

use clap::{Parser, ValueEnum};
use log::info;

use xiangqi_engine::board::{Move, Side, Square};
use xiangqi_engine::game::{Difficulty, DrawReason, Game, GameConfig, GameEvents, Handicap};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Seat {
    Red,
    Black,
    None,
}

impl Seat {
    fn side(self) -> Option<Side> {
        match self {
            Seat::Red => Some(Side::Red),
            Seat::Black => Some(Side::Black),
            Seat::None => None,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Xiangqi engine console", long_about = None)]
struct Args {
    /// Start from this FEN instead of the standard opening
    #[arg(long)]
    fen: Option<String>,

    /// Handicap opening: none, left-horse, two-horses, nine-pieces
    #[arg(long, default_value = "none")]
    handicap: Handicap,

    /// Side played by the engine
    #[arg(long, value_enum, default_value_t = Seat::Black)]
    computer: Seat,

    /// Engine strength 0..=2 (10, 100 or 1000 ms per move)
    #[arg(long, default_value_t = 0)]
    level: u32,

    /// Override the thinking time per move in milliseconds
    #[arg(long)]
    millis: Option<u64>,

    /// Transposition table size as a power of two; 0 disables the engine
    #[arg(long, default_value_t = 16)]
    hash_level: u32,

    /// Maximum search depth
    #[arg(long, default_value_t = 64)]
    depth: u32,

    /// Let the engine play both sides for at most N plies, then exit
    #[arg(long)]
    self_play: Option<usize>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

/// Prints game events to stdout.
struct ConsoleEvents;

impl GameEvents for ConsoleEvents {
    fn on_illegal_move(&mut self, mv: Move) {
        if mv.is_null() {
            println!("Select one of your own pieces first");
        } else {
            println!("Illegal move {mv}");
        }
    }

    fn on_check(&mut self, by_computer: bool) {
        println!("{}", if by_computer { "Engine gives check!" } else { "Check!" });
    }

    fn on_win(&mut self) {
        println!("You win!");
    }

    fn on_loss(&mut self) {
        println!("You lose.");
    }

    fn on_draw(&mut self, reason: DrawReason) {
        let why = match reason {
            DrawReason::Repetition => "repetition",
            DrawReason::NoAttackingMaterial => "no attacking material left",
            DrawReason::MoveLimit => "no capture in 100 plies",
        };
        println!("Draw: {why}");
    }

    fn on_mate(&mut self, sq: Square, side: Side) {
        println!("{side} general on {sq} is mated");
    }

    fn on_begin_thinking(&mut self) {
        print!("Thinking... ");
        let _ = io::stdout().flush();
    }

    fn on_end_thinking(&mut self) {
        println!("done");
    }

    fn on_move_record(&mut self, text: &str, _mv: Move) {
        println!("{text}");
    }
}

enum ConsoleCommand {
    Move(String),
    Undo,
    New(Handicap),
    Board,
    Fen,
    Go,
    Level(Difficulty),
    Perft(usize),
    Help,
    Quit,
    Unknown(String),
}

fn parse_command(line: &str) -> Option<ConsoleCommand> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let first = *parts.first()?;
    let cmd = match first {
        "undo" | "retract" => ConsoleCommand::Undo,
        "new" => match parts.get(1).map(|h| h.parse::<Handicap>()) {
            None => ConsoleCommand::New(Handicap::None),
            Some(Ok(handicap)) => ConsoleCommand::New(handicap),
            Some(Err(_)) => ConsoleCommand::Unknown(line.to_string()),
        },
        "board" | "d" => ConsoleCommand::Board,
        "fen" => ConsoleCommand::Fen,
        "go" => ConsoleCommand::Go,
        "level" => match parts
            .get(1)
            .and_then(|v| v.parse::<u32>().ok())
            .and_then(Difficulty::from_level)
        {
            Some(difficulty) => ConsoleCommand::Level(difficulty),
            None => ConsoleCommand::Unknown(line.to_string()),
        },
        "perft" => {
            let depth = parts.get(1).and_then(|v| v.parse::<usize>().ok()).unwrap_or(1);
            ConsoleCommand::Perft(depth)
        }
        "help" | "?" => ConsoleCommand::Help,
        "quit" | "exit" => ConsoleCommand::Quit,
        mv if mv.len() == 4 || mv.len() == 5 => ConsoleCommand::Move(mv.to_string()),
        _ => ConsoleCommand::Unknown(line.to_string()),
    };
    Some(cmd)
}

const HELP: &str = "\
commands:
  <move>          play a move in ICCS notation, e.g. h2e2
  undo            take back your last move
  new [handicap]  start again (none, left-horse, two-horses, nine-pieces)
  go              let the engine move for the side to move
  level <0-2>     engine strength
  board | fen     show the position
  perft <depth>   count leaf nodes
  quit";

fn self_play(game: &mut Game<ConsoleEvents>, max_plies: usize) {
    for _ in 0..max_plies {
        let side = game.position().side_to_move();
        game.set_computer(Some(side));
        if game.respond().is_none() {
            break;
        }
    }
    println!("{}", game.position());
    println!("Result: {}", game.result());
}

fn run_console(game: &mut Game<ConsoleEvents>) {
    println!("{}", game.position());
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        let Some(cmd) = parse_command(line.trim()) else {
            continue;
        };
        match cmd {
            ConsoleCommand::Move(text) => match game.position().parse_move(&text) {
                Ok(mv) => match game.play_move(mv) {
                    Ok(()) => println!("{}", game.position()),
                    Err(e) => println!("Error: {e}"),
                },
                Err(e) => println!("Error: {e}"),
            },
            ConsoleCommand::Undo => match game.retract() {
                Ok(()) => println!("{}", game.position()),
                Err(e) => println!("Error: {e}"),
            },
            ConsoleCommand::New(handicap) => {
                if let Err(e) = game.restart_with(handicap) {
                    println!("Error: {e}");
                }
                println!("{}", game.position());
            }
            ConsoleCommand::Board => println!("{}", game.position()),
            ConsoleCommand::Fen => println!("{}", game.position().to_fen()),
            ConsoleCommand::Go => {
                let seat = game.config().computer;
                game.set_computer(Some(game.position().side_to_move()));
                if game.respond().is_none() {
                    println!("No move");
                }
                game.set_computer(seat);
                println!("{}", game.position());
            }
            ConsoleCommand::Level(difficulty) => game.set_difficulty(difficulty),
            ConsoleCommand::Perft(depth) => {
                let mut pos = game.position().clone();
                println!("perft {depth}: {}", pos.perft(depth));
            }
            ConsoleCommand::Help => println!("{HELP}"),
            ConsoleCommand::Quit => break,
            ConsoleCommand::Unknown(text) => println!("Unknown command '{text}', try 'help'"),
        }
    }
}

fn main() {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .init();

    let config = GameConfig {
        hash_level: args.hash_level,
        difficulty: Difficulty::from_level(args.level).unwrap_or_default(),
        think_millis: args.millis,
        max_depth: args.depth.max(1),
        computer: args.computer.side(),
        startup: args.handicap,
    };
    info!("starting with {config:?}");

    let mut game = match Game::new(config, ConsoleEvents) {
        Ok(game) => game,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    if let Some(fen) = &args.fen {
        if let Err(e) = game.restart(fen) {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    } else {
        game.respond();
    }

    match args.self_play {
        Some(plies) => self_play(&mut game, plies),
        None => run_console(&mut game),
    }
}
