//! End-to-end controller tests: adjudication, retraction and engine replies.

use xiangqi_engine::board::{Move, Position, Side, Square};
use xiangqi_engine::game::{
    Difficulty, DrawReason, Game, GameConfig, GameError, GameEvents, GameResult, Handicap,
    NoEvents, WinReason,
};

#[derive(Default)]
struct Log {
    wins: usize,
    losses: usize,
    draws: Vec<DrawReason>,
    checks: usize,
    captures: usize,
    quiet: usize,
    new_games: usize,
    thinking: (usize, usize),
    records: Vec<String>,
}

impl GameEvents for Log {
    fn on_move(&mut self, _by_computer: bool) {
        self.quiet += 1;
    }
    fn on_capture(&mut self, _by_computer: bool) {
        self.captures += 1;
    }
    fn on_check(&mut self, _by_computer: bool) {
        self.checks += 1;
    }
    fn on_win(&mut self) {
        self.wins += 1;
    }
    fn on_loss(&mut self) {
        self.losses += 1;
    }
    fn on_draw(&mut self, reason: DrawReason) {
        self.draws.push(reason);
    }
    fn on_new_game(&mut self) {
        self.new_games += 1;
    }
    fn on_begin_thinking(&mut self) {
        self.thinking.0 += 1;
    }
    fn on_end_thinking(&mut self) {
        self.thinking.1 += 1;
    }
    fn on_move_record(&mut self, text: &str, _mv: Move) {
        self.records.push(text.to_string());
    }
}

fn human_game(fen: &str) -> Game<Log> {
    let config = GameConfig {
        hash_level: 0,
        computer: None,
        ..GameConfig::default()
    };
    let mut game = Game::new(config, Log::default()).unwrap();
    game.restart(fen).unwrap();
    game
}

fn play(game: &mut Game<Log>, moves: &[&str]) {
    for text in moves {
        let mv = game.position().parse_move(text).unwrap_or_else(|e| panic!("{text}: {e}"));
        game.play_move(mv).unwrap_or_else(|e| panic!("{text}: {e}"));
    }
}

#[test]
fn perpetual_check_loses_for_the_checker() {
    let mut game = human_game("4k4/7R1/9/9/9/9/9/9/9/3K5 w");
    let cycle = ["h8h9", "e9e8", "h9h8", "e8e9"];
    for round in 0..3 {
        play(&mut game, &cycle[..3]);
        assert_eq!(game.result(), GameResult::InProgress, "round {round}");
        play(&mut game, &cycle[3..]);
    }
    assert_eq!(
        game.result(),
        GameResult::Win {
            winner: Side::Black,
            reason: WinReason::BannedRepetition
        }
    );
    // Black made the final move and is credited with the win.
    assert_eq!(game.events().wins, 1);
    assert_eq!(game.events().losses, 0);
    assert_eq!(game.events().checks, 6);
}

#[test]
fn horse_shuffle_is_drawn() {
    let mut game = human_game(Position::STARTPOS);
    for _ in 0..3 {
        play(&mut game, &["h0g2", "h9g7", "g2h0", "g7h9"]);
    }
    assert_eq!(game.result(), GameResult::Draw(DrawReason::Repetition));
    assert_eq!(game.events().draws, vec![DrawReason::Repetition]);

    let mv = game.position().parse_move("h0g2").unwrap();
    assert_eq!(game.play_move(mv), Err(GameError::GameOver));
}

/// Each rook walks its own closed loop, so no position comes back within
/// a hundred plies and nothing can be captured.
#[test]
fn hundred_quiet_plies_is_drawn() {
    let red_loop = ["a1", "b1", "c1", "c2", "b2", "b3", "c3", "c4", "b4", "a4", "a3", "a2"];
    let black_loop = ["g4", "h4", "h5", "h6", "h7", "h8", "g8", "g7", "g6", "g5"];
    let mut game = human_game("5k3/9/9/9/9/6r2/9/9/R8/3K5 w");

    for ply in 0..100 {
        assert_eq!(game.result(), GameResult::InProgress, "ply {ply}");
        let k = ply / 2;
        let text = if ply % 2 == 0 {
            format!("{}{}", red_loop[k % 12], red_loop[(k + 1) % 12])
        } else {
            format!("{}{}", black_loop[k % 10], black_loop[(k + 1) % 10])
        };
        play(&mut game, &[text.as_str()]);
    }

    assert_eq!(game.position().plies_since_capture(), 100);
    assert_eq!(game.result(), GameResult::Draw(DrawReason::MoveLimit));
}

#[test]
fn capture_down_to_bare_generals_is_drawn() {
    let mut game = human_game("3k5/9/9/9/9/9/9/9/4r4/4K4 w");
    play(&mut game, &["e0e1"]);
    assert_eq!(game.result(), GameResult::Draw(DrawReason::NoAttackingMaterial));
    assert_eq!(game.events().captures, 0);
}

#[test]
fn announcements_follow_the_move() {
    let mut game = human_game(Position::STARTPOS);
    play(&mut game, &["h2e2", "h9g7", "e2e6"]);
    assert_eq!(game.events().quiet, 2);
    assert_eq!(game.events().captures, 1);
    assert_eq!(
        game.events().records,
        vec![" 1.H2E2", "   H9G7", " 2.E2E6"]
    );
}

#[test]
fn engine_replies_after_human_move() {
    let config = GameConfig {
        hash_level: 14,
        difficulty: Difficulty::Beginner,
        max_depth: 4,
        ..GameConfig::default()
    };
    let mut game = Game::new(config, Log::default()).unwrap();
    let mv = game.position().parse_move("h2e2").unwrap();
    game.play_move(mv).unwrap();

    assert_eq!(game.position().history_len(), 2);
    assert_eq!(game.position().side_to_move(), Side::Red);
    assert_eq!(game.events().thinking, (1, 1));
    assert_eq!(game.events().records.len(), 2);
    assert!(!game.is_busy());

    game.retract().unwrap();
    assert_eq!(game.position().history_len(), 0);
    assert_eq!(game.retract(), Err(GameError::NothingToRetract));
}

#[test]
fn engine_playing_red_moves_first() {
    let config = GameConfig {
        hash_level: 12,
        think_millis: Some(20),
        computer: Some(Side::Red),
        ..GameConfig::default()
    };
    let mut game = Game::new(config, NoEvents).unwrap();
    assert!(game.is_computer_turn());

    let reply = game.respond().expect("engine moves");
    assert_eq!(game.last_move(), reply);
    assert_eq!(game.position().side_to_move(), Side::Black);

    let e9 = Square::new(4, 9).unwrap();
    assert_eq!(game.view_square(e9), Square::new(4, 0).unwrap());
}

#[test]
fn engine_off_never_moves() {
    let mut game = Game::with_defaults().unwrap();
    game.set_hash_level(0).unwrap();
    assert!(game.engine().is_none());

    let mv = game.position().parse_move("h2e2").unwrap();
    game.play_move(mv).unwrap();
    assert_eq!(game.position().history_len(), 1);
    assert_eq!(game.respond(), None);
}

#[test]
fn restart_with_handicap() {
    let mut game = human_game(Position::STARTPOS);
    play(&mut game, &["h2e2"]);

    game.restart_with(Handicap::NinePieces).unwrap();
    assert_eq!(game.position().to_fen(), Handicap::NinePieces.fen());
    assert_eq!(game.config().startup, Handicap::NinePieces);
    assert_eq!(game.position().history_len(), 0);
    assert_eq!(game.last_move(), Move::NULL);
    assert_eq!(game.events().new_games, 2);
}

#[test]
fn click_to_move() {
    let mut game = human_game(Position::STARTPOS);
    let b2 = Square::new(1, 2).unwrap();
    let e2 = Square::new(4, 2).unwrap();
    let b9 = Square::new(1, 9).unwrap();

    // Clicking an enemy piece with nothing selected does nothing.
    game.select_square(b9).unwrap();
    assert_eq!(game.selected(), None);

    game.select_square(b2).unwrap();
    assert_eq!(game.selected(), Some(b2));
    game.select_square(e2).unwrap();
    assert_eq!(game.last_move(), Move::new(b2, e2));
    assert_eq!(game.position().side_to_move(), Side::Black);
}

#[test]
fn setters_update_config() {
    let mut game = Game::with_defaults().unwrap();
    game.set_difficulty(Difficulty::Professional);
    assert_eq!(game.config().think_millis(), 1000);
    game.set_think_millis(42);
    assert_eq!(game.config().think_millis(), 42);
    game.set_computer(None);
    assert!(!game.is_computer_turn());
}
