//! Game controller: a human against the engine, or two humans.
//!
//! [`Game`] owns the live [`Position`], the optional [`SearchEngine`] and the
//! `busy` flag that keeps the board untouched while the engine thinks. It
//! validates human moves, lets the engine answer, adjudicates mate,
//! repetition and the draw rules, and reports everything through the
//! injected [`GameEvents`] implementation.

mod config;
mod error;
mod events;

pub use config::{Difficulty, DrawReason, GameConfig, GameResult, Handicap, WinReason};
pub use error::GameError;
pub use events::{GameEvents, NoEvents};

use log::{debug, info, warn};

use crate::board::{move_to_iccs, Move, Position, SearchEngine, Side, Square, WIN_VALUE};

/// Plies without a capture after which the game is drawn.
pub const NATURAL_LIMIT_PLIES: usize = 100;

/// Repetitions needed before a cycle is adjudicated.
const ADJUDICATE_REPEATS: u32 = 3;

/// A game in progress.
pub struct Game<E: GameEvents = NoEvents> {
    pos: Position,
    /// Absent when the hash level is 0; the engine never moves then.
    engine: Option<SearchEngine>,
    events: E,
    config: GameConfig,
    busy: bool,
    selected: Option<Square>,
    last_move: Move,
    result: GameResult,
}

impl Game<NoEvents> {
    /// A game with default settings and no event sink.
    ///
    /// # Errors
    /// Never fails for the built-in startup positions.
    pub fn with_defaults() -> Result<Self, GameError> {
        Game::new(GameConfig::default(), NoEvents)
    }
}

impl<E: GameEvents> Game<E> {
    /// Set up the configured startup position. The engine does not move
    /// here even when it plays Red; call [`respond`](Self::respond).
    ///
    /// # Errors
    /// Returns [`GameError::InvalidFen`] if the startup FEN does not parse.
    pub fn new(config: GameConfig, events: E) -> Result<Self, GameError> {
        let pos = Position::try_from_fen(config.startup.fen())?;
        let engine = (config.hash_level > 0).then(|| SearchEngine::new(config.hash_level));
        Ok(Game {
            pos,
            engine,
            events,
            config,
            busy: false,
            selected: None,
            last_move: Move::NULL,
            result: GameResult::InProgress,
        })
    }

    #[must_use]
    pub fn position(&self) -> &Position {
        &self.pos
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn result(&self) -> GameResult {
        self.result
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    #[must_use]
    pub fn selected(&self) -> Option<Square> {
        self.selected
    }

    /// The move shown as last played, `Move::NULL` before the first move.
    #[must_use]
    pub fn last_move(&self) -> Move {
        self.last_move
    }

    #[must_use]
    pub fn engine(&self) -> Option<&SearchEngine> {
        self.engine.as_ref()
    }

    pub fn engine_mut(&mut self) -> Option<&mut SearchEngine> {
        self.engine.as_mut()
    }

    #[must_use]
    pub fn events(&self) -> &E {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut E {
        &mut self.events
    }

    /// Whether the engine is to move.
    #[must_use]
    pub fn is_computer_turn(&self) -> bool {
        self.config.computer == Some(self.pos.side_to_move())
    }

    /// Board square as seen from the human's seat: rotated when the engine
    /// plays Red so the human's pieces stay at the bottom.
    #[must_use]
    pub fn view_square(&self, sq: Square) -> Square {
        if self.config.computer == Some(Side::Red) {
            sq.flip()
        } else {
            sq
        }
    }

    fn ensure_idle(&self) -> Result<(), GameError> {
        if self.busy {
            Err(GameError::Busy)
        } else {
            Ok(())
        }
    }

    fn ensure_playable(&self) -> Result<(), GameError> {
        self.ensure_idle()?;
        if self.result.is_over() {
            return Err(GameError::GameOver);
        }
        Ok(())
    }

    /// Start over from `fen`, then let the engine move if it is its turn.
    ///
    /// # Errors
    /// [`GameError::Busy`] while thinking, [`GameError::InvalidFen`] if `fen`
    /// does not parse. The current game is untouched on error.
    pub fn restart(&mut self, fen: &str) -> Result<(), GameError> {
        self.ensure_idle()?;
        self.pos = Position::try_from_fen(fen)?;
        self.selected = None;
        self.last_move = Move::NULL;
        self.result = GameResult::InProgress;
        if let Some(engine) = self.engine.as_mut() {
            engine.clear();
        }
        info!("new game: {}", self.pos.to_fen());
        self.events.on_board_changed();
        self.events.on_new_game();
        self.respond();
        Ok(())
    }

    /// Start over from one of the handicap openings.
    ///
    /// # Errors
    /// [`GameError::Busy`] while thinking.
    pub fn restart_with(&mut self, handicap: Handicap) -> Result<(), GameError> {
        self.config.startup = handicap;
        self.restart(handicap.fen())
    }

    /// Handle a click on `sq`: pick up one of the mover's pieces, or move
    /// the piece already picked up to `sq`.
    ///
    /// # Errors
    /// [`GameError::Busy`], [`GameError::GameOver`], or
    /// [`GameError::IllegalMove`] when the attempted move is refused.
    pub fn select_square(&mut self, sq: Square) -> Result<(), GameError> {
        self.ensure_playable()?;
        if !sq.is_on_board() {
            return Ok(());
        }

        if self.pos.piece_at(sq).belongs_to(self.pos.side_to_move()) {
            self.events.on_piece_selected(sq);
            if !self.last_move.is_null() {
                self.events.on_square_highlight(self.last_move.src(), false);
                self.events.on_square_highlight(self.last_move.dst(), false);
            }
            if let Some(prev) = self.selected {
                self.events.on_square_highlight(prev, false);
            }
            self.events.on_square_highlight(sq, true);
            self.selected = Some(sq);
            self.events.on_board_changed();
            return Ok(());
        }

        match self.selected {
            Some(src) => self.play_move(Move::new(src, sq)),
            None => {
                self.events.on_illegal_move(Move::NULL);
                Ok(())
            }
        }
    }

    /// Play a human move, adjudicate, and let the engine answer.
    ///
    /// # Errors
    /// [`GameError::Busy`], [`GameError::GameOver`],
    /// [`GameError::NotYourTurn`] when the engine is to move, or
    /// [`GameError::IllegalMove`].
    pub fn play_move(&mut self, mv: Move) -> Result<(), GameError> {
        self.ensure_playable()?;
        if self.engine.is_some() && self.is_computer_turn() {
            return Err(GameError::NotYourTurn);
        }
        if !self.add_move(mv, false) {
            return Err(GameError::IllegalMove { mv });
        }
        if !self.result.is_over() {
            self.respond();
        }
        Ok(())
    }

    /// Let the engine move if it is its turn. Returns the move it played.
    pub fn respond(&mut self) -> Option<Move> {
        if self.busy || self.result.is_over() || !self.is_computer_turn() {
            return None;
        }
        let max_depth = self.config.max_depth;
        let millis = self.config.think_millis();
        let engine = self.engine.as_mut()?;

        self.busy = true;
        self.events.on_begin_thinking();
        let mv = engine.search_main(&mut self.pos, max_depth, millis);
        self.events.on_end_thinking();
        self.busy = false;

        if mv.is_null() || !self.pos.legal_move(mv) {
            if !self.pos.is_mate() {
                warn!("engine returned no usable move ({mv}) in {}", self.pos.to_fen());
            }
            return None;
        }
        self.add_move(mv, true).then_some(mv)
    }

    /// Apply `mv` if legal and adjudicate the new position.
    fn add_move(&mut self, mv: Move, by_computer: bool) -> bool {
        if !self.pos.legal_move(mv) {
            self.events.on_illegal_move(mv);
            return false;
        }
        if !self.pos.make_move(mv) {
            self.events.on_illegal_move(mv);
            return false;
        }
        debug!("{} played {mv}", if by_computer { "engine" } else { "human" });

        self.events.on_piece_moved(mv, by_computer);
        if !self.last_move.is_null() {
            self.events.on_square_highlight(self.last_move.src(), false);
            self.events.on_square_highlight(self.last_move.dst(), false);
        }
        self.events.on_square_highlight(mv.src(), true);
        self.events.on_square_highlight(mv.dst(), true);
        self.selected = None;
        self.last_move = mv;

        self.result = self.adjudicate();
        match self.result {
            GameResult::InProgress => self.announce(by_computer),
            GameResult::Win { winner, reason } => {
                info!("{}", self.result);
                let human_lost = if by_computer {
                    winner != self.pos.side_to_move()
                } else {
                    winner == self.pos.side_to_move()
                };
                if human_lost {
                    self.events.on_loss();
                } else {
                    self.events.on_win();
                }
                if reason == WinReason::Mate {
                    let loser = self.pos.side_to_move();
                    if let Some(sq) = self.pos.general_square(loser) {
                        self.events.on_mate(sq, loser);
                    }
                }
            }
            GameResult::Draw(reason) => {
                info!("{}", self.result);
                self.events.on_draw(reason);
            }
        }

        let text = self.move_record_text();
        self.events.on_move_record(&text, mv);
        true
    }

    /// Decide whether the move just played ended the game.
    fn adjudicate(&mut self) -> GameResult {
        let to_move = self.pos.side_to_move();
        if self.pos.is_mate() {
            return GameResult::Win {
                winner: to_move.opponent(),
                reason: WinReason::Mate,
            };
        }

        let status = self.pos.rep_status(ADJUDICATE_REPEATS);
        if status.is_repetition() {
            let value = self.pos.rep_value(status);
            return if value > -WIN_VALUE && value < WIN_VALUE {
                GameResult::Draw(DrawReason::Repetition)
            } else {
                let winner = if value < 0 { to_move.opponent() } else { to_move };
                GameResult::Win {
                    winner,
                    reason: WinReason::BannedRepetition,
                }
            };
        }

        if self.pos.captured() {
            if !self.pos.has_attacking_material() {
                return GameResult::Draw(DrawReason::NoAttackingMaterial);
            }
        } else if self.pos.plies_since_capture() >= NATURAL_LIMIT_PLIES {
            return GameResult::Draw(DrawReason::MoveLimit);
        }

        GameResult::InProgress
    }

    fn announce(&mut self, by_computer: bool) {
        if self.pos.in_check() {
            self.events.on_check(by_computer);
        } else if self.pos.captured() {
            self.events.on_capture(by_computer);
        } else {
            self.events.on_move(by_computer);
        }
    }

    /// Take back the last move, and the engine's reply before it when the
    /// engine would otherwise be to move again.
    ///
    /// # Errors
    /// [`GameError::Busy`], [`GameError::GameOver`], or
    /// [`GameError::NothingToRetract`] with an empty history.
    pub fn retract(&mut self) -> Result<(), GameError> {
        self.ensure_playable()?;
        if self.pos.try_undo_make_move().is_none() {
            return Err(GameError::NothingToRetract);
        }
        if self.engine.is_some() && self.is_computer_turn() {
            self.pos.try_undo_make_move();
        }
        self.selected = None;
        self.last_move = self.pos.last_move().unwrap_or(Move::NULL);
        self.events.on_board_changed();
        Ok(())
    }

    /// Move-list line for the last move: Red's moves carry the move number,
    /// Black's are indented to line up under them.
    #[must_use]
    pub fn move_record_text(&self) -> String {
        let number = (self.pos.history_len() + 1) >> 1;
        let iccs = move_to_iccs(self.last_move);
        if self.pos.side_to_move() == Side::Red {
            let space = if number > 99 { "    " } else { "   " };
            format!("{space}{iccs}")
        } else {
            let pad = if number > 9 { "" } else { " " };
            format!("{pad}{number}.{iccs}")
        }
    }

    /// Resize the transposition table; 0 turns the engine off.
    ///
    /// # Errors
    /// [`GameError::Busy`] while thinking.
    pub fn set_hash_level(&mut self, hash_level: u32) -> Result<(), GameError> {
        self.ensure_idle()?;
        self.config.hash_level = hash_level;
        self.engine = (hash_level > 0).then(|| SearchEngine::new(hash_level));
        Ok(())
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.config.difficulty = difficulty;
        self.config.think_millis = None;
    }

    pub fn set_think_millis(&mut self, millis: u64) {
        self.config.think_millis = Some(millis);
    }

    pub fn set_max_depth(&mut self, depth: u32) {
        self.config.max_depth = depth.max(1);
    }

    /// Choose the engine's side, or `None` for two human players.
    pub fn set_computer(&mut self, computer: Option<Side>) {
        self.config.computer = computer;
    }
}
