//! Callbacks a [`Game`](super::Game) raises towards whatever presents it.
//!
//! Every method has an empty default, so a front end implements only the
//! notifications it cares about.

use crate::board::{Move, Side, Square};

use super::config::DrawReason;

/// Presentation hooks injected into a [`Game`](super::Game).
///
/// `by_computer` tells whether the engine made the move being announced.
#[allow(unused_variables)]
pub trait GameEvents {
    /// The whole board should be redrawn.
    fn on_board_changed(&mut self) {}

    /// A square gained or lost its highlight (selection or last-move marker).
    fn on_square_highlight(&mut self, sq: Square, highlighted: bool) {}

    /// The human picked up one of their own pieces.
    fn on_piece_selected(&mut self, sq: Square) {}

    fn on_piece_moved(&mut self, mv: Move, by_computer: bool) {}

    /// The attempted move is not legal, or would leave the mover in check.
    fn on_illegal_move(&mut self, mv: Move) {}

    fn on_move(&mut self, by_computer: bool) {}
    fn on_capture(&mut self, by_computer: bool) {}
    fn on_check(&mut self, by_computer: bool) {}

    /// The human won.
    fn on_win(&mut self) {}
    /// The human lost.
    fn on_loss(&mut self) {}
    fn on_draw(&mut self, reason: DrawReason) {}

    /// The General of `side`, standing on `sq`, has been mated.
    fn on_mate(&mut self, sq: Square, side: Side) {}

    fn on_new_game(&mut self) {}
    fn on_begin_thinking(&mut self) {}
    fn on_end_thinking(&mut self) {}

    /// A line for the move list, in the layout of [`Game::move_record_text`].
    ///
    /// [`Game::move_record_text`]: super::Game::move_record_text
    fn on_move_record(&mut self, text: &str, mv: Move) {}
}

/// Event sink that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoEvents;

impl GameEvents for NoEvents {}

impl<T: GameEvents + ?Sized> GameEvents for &mut T {
    fn on_board_changed(&mut self) {
        (**self).on_board_changed();
    }
    fn on_square_highlight(&mut self, sq: Square, highlighted: bool) {
        (**self).on_square_highlight(sq, highlighted);
    }
    fn on_piece_selected(&mut self, sq: Square) {
        (**self).on_piece_selected(sq);
    }
    fn on_piece_moved(&mut self, mv: Move, by_computer: bool) {
        (**self).on_piece_moved(mv, by_computer);
    }
    fn on_illegal_move(&mut self, mv: Move) {
        (**self).on_illegal_move(mv);
    }
    fn on_move(&mut self, by_computer: bool) {
        (**self).on_move(by_computer);
    }
    fn on_capture(&mut self, by_computer: bool) {
        (**self).on_capture(by_computer);
    }
    fn on_check(&mut self, by_computer: bool) {
        (**self).on_check(by_computer);
    }
    fn on_win(&mut self) {
        (**self).on_win();
    }
    fn on_loss(&mut self) {
        (**self).on_loss();
    }
    fn on_draw(&mut self, reason: DrawReason) {
        (**self).on_draw(reason);
    }
    fn on_mate(&mut self, sq: Square, side: Side) {
        (**self).on_mate(sq, side);
    }
    fn on_new_game(&mut self) {
        (**self).on_new_game();
    }
    fn on_begin_thinking(&mut self) {
        (**self).on_begin_thinking();
    }
    fn on_end_thinking(&mut self) {
        (**self).on_end_thinking();
    }
    fn on_move_record(&mut self, text: &str, mv: Move) {
        (**self).on_move_record(text, mv);
    }
}
