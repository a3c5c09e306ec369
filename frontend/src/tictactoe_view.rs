use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Sense, Stroke, Vec2};
use log::debug;
use tictactoe::{board::SIZE, Cell, Game, GameError, Position};

use crate::app::Demo;

const BOARD_SIZE: f32 = 300.0;
const LINE_WIDTH: f32 = 15.0;
const LINE_COLOR: Color32 = Color32::WHITE;
const FONT_SIZE: f32 = 60.0;

/// The human (X) against the minimax player (O) on a 300x300 board
#[derive(Default)]
pub struct TicTacToeDemo {
    game: Game,
}

impl TicTacToeDemo {
    /// Handle a click on a cell, the computer answers right away
    fn click(&mut self, position: Position) -> Result<(), GameError> {
        match self.game.play(position) {
            Ok(()) => {}
            // clicks on taken cells or a finished board do nothing
            Err(GameError::Occupied(_) | GameError::GameOver) => {
                debug!("ignoring click on {}", position);
                return Ok(());
            }
            Err(e) => return Err(e),
        }

        if !self.game.is_over() {
            self.game.computer_move()?;
        }
        Ok(())
    }

    fn status(&self) -> &'static str {
        match self.game.outcome() {
            Some(outcome) => outcome.message(),
            None => "Your move (X)",
        }
    }

    fn paint(&self, painter: &Painter, rect: Rect) {
        painter.rect_filled(rect, 0.0, Color32::BLACK);

        let cell = rect.size() / SIZE as f32;
        let stroke = Stroke::new(LINE_WIDTH, LINE_COLOR);
        for i in 1..SIZE {
            let x = rect.left() + i as f32 * cell.x;
            let y = rect.top() + i as f32 * cell.y;
            painter.line_segment([Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())], stroke);
            painter.line_segment([Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)], stroke);
        }

        for position in Position::all() {
            let symbol = match self.game.board().get(position) {
                Some(Cell::X) => "X",
                Some(Cell::O) => "O",
                _ => continue,
            };
            let center = rect.min
                + Vec2::new(
                    (position.col as f32 + 0.5) * cell.x,
                    (position.row as f32 + 0.5) * cell.y,
                );
            painter.text(
                center,
                Align2::CENTER_CENTER,
                symbol,
                FontId::proportional(FONT_SIZE),
                LINE_COLOR,
            );
        }
    }
}

impl Demo for TicTacToeDemo {
    fn name(&self) -> &'static str {
        "Tic-Tac-Toe"
    }

    fn run(&mut self, ui: &mut egui::Ui) -> anyhow::Result<()> {
        let status = self.status();
        let mut new_game = false;
        ui.horizontal(|ui| {
            new_game = ui.button("New game").clicked();
            ui.label(status);
        });
        if new_game {
            self.game = Game::new();
        }

        let (response, painter) = ui.allocate_painter(Vec2::splat(BOARD_SIZE), Sense::click());
        let rect = response.rect;

        if response.clicked() {
            if let Some(pointer) = response.interact_pointer_pos() {
                let local = pointer - rect.min;
                if let Some(position) =
                    Position::from_pixel(local.x, local.y, rect.width(), rect.height())
                {
                    self.click(position)?;
                }
            }
        }

        self.paint(&painter, rect);

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use tictactoe::Player;

    #[test]
    fn test_click_gets_an_answer() {
        let mut demo = TicTacToeDemo::default();
        demo.click(Position::new(0, 0)).unwrap();

        assert_eq!(demo.game.board().occupied_count(), 2);
        assert_eq!(demo.game.turn(), Player::X);
        assert_eq!(demo.status(), "Your move (X)");
    }

    #[test]
    fn test_click_on_taken_cell_is_ignored() {
        let mut demo = TicTacToeDemo::default();
        demo.click(Position::new(1, 1)).unwrap();
        let board = *demo.game.board();

        demo.click(Position::new(1, 1)).unwrap();
        assert_eq!(*demo.game.board(), board);
    }
}
