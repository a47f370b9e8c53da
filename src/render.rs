//! Drawing the game onto a pixel surface
//!
//! Everything is expressed in pixels with `BLOCK_SIZE` pixels per cell, so a
//! frontend only has to know how to fill and outline rectangles.

use crate::board::Board;
use crate::game::{Game, GameState};
use crate::tetromino::{Kind, Matrix};
use ratatui::style::Color;

/// Pixels per board cell
pub const BLOCK_SIZE: i32 = 30;
/// Opacity of the landing projection
pub const GHOST_ALPHA: f32 = 0.2;

const BORDER_WIDTH: i32 = 2;
const BORDER_ALPHA: f32 = 0.5;
const SHADE_INSET: i32 = 5;
const SHADE_ALPHA: f32 = 0.2;

/// An axis-aligned rectangle in surface pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl PixelRect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// The rectangle shrunk by `by` pixels on every side
    pub fn inset(&self, by: i32) -> Self {
        Self::new(
            self.x + by,
            self.y + by,
            (self.width - 2 * by).max(0),
            (self.height - 2 * by).max(0),
        )
    }
}

/// Anything that can paint rectangles
pub trait Surface {
    /// Surface size in pixels (width, height)
    fn size(&self) -> (i32, i32);

    /// Paint the whole surface with `color`
    fn clear(&mut self, color: Color);

    fn fill_rect(&mut self, rect: PixelRect, color: Color, alpha: f32);

    fn stroke_rect(&mut self, rect: PixelRect, color: Color, alpha: f32, line_width: i32);
}

/// Paint one block: solid body, light outline, darker inset
pub fn draw_block<S: Surface + ?Sized>(surface: &mut S, x: i32, y: i32, kind: Kind, alpha: f32) {
    let rect = PixelRect::new(x, y, BLOCK_SIZE, BLOCK_SIZE);
    surface.fill_rect(rect, kind.color(), alpha);
    surface.stroke_rect(rect, Color::White, BORDER_ALPHA * alpha, BORDER_WIDTH);
    surface.fill_rect(rect.inset(SHADE_INSET), Color::Black, SHADE_ALPHA * alpha);
}

/// Paint every occupied cell of `matrix` with its top-left at pixel `origin`
pub fn draw_matrix<S: Surface + ?Sized>(
    surface: &mut S,
    matrix: &Matrix,
    origin: (i32, i32),
    kind: Kind,
    alpha: f32,
) {
    for (row, col) in matrix.occupied() {
        draw_block(
            surface,
            origin.0 + col * BLOCK_SIZE,
            origin.1 + row * BLOCK_SIZE,
            kind,
            alpha,
        );
    }
}

/// Paint the locked cells
pub fn draw_board<S: Surface + ?Sized>(surface: &mut S, board: &Board) {
    for (row, cells) in board.rows() {
        for (col, cell) in cells.iter().enumerate() {
            if let Some(kind) = Kind::from_id(cell.id()) {
                draw_block(
                    surface,
                    col as i32 * BLOCK_SIZE,
                    row as i32 * BLOCK_SIZE,
                    kind,
                    1.0,
                );
            }
        }
    }
}

/// Paint a full frame: stack, ghost projection and the falling piece
pub fn draw_game<S: Surface + ?Sized>(surface: &mut S, game: &Game, show_ghost: bool) {
    surface.clear(Color::Black);
    draw_board(surface, &game.board);

    if game.state != GameState::Playing {
        return;
    }
    let Some(piece) = &game.current_piece else {
        return;
    };

    let x = piece.col * BLOCK_SIZE;
    if show_ghost {
        let ghost_y = piece.ghost_row(&game.board) * BLOCK_SIZE;
        draw_matrix(surface, &piece.matrix, (x, ghost_y), piece.kind, GHOST_ALPHA);
    }
    draw_matrix(surface, &piece.matrix, (x, piece.row * BLOCK_SIZE), piece.kind, 1.0);
}

/// Paint a single kind centered on the surface (next / hold boxes)
pub fn draw_preview<S: Surface + ?Sized>(surface: &mut S, kind: Option<Kind>) {
    surface.clear(Color::Black);
    let Some(kind) = kind else {
        return;
    };
    let shape = kind.shape();
    let extent = shape.size() as i32 * BLOCK_SIZE;
    let (width, height) = surface.size();
    let origin = ((width - extent) / 2, (height - extent) / 2);
    draw_matrix(surface, &shape, origin, kind, 1.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Cell, BOARD_HEIGHT, BOARD_WIDTH};
    use crate::game::Action;
    use crate::piece::Piece;

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Clear,
        Fill(PixelRect, Color, f32),
        Stroke(PixelRect, f32, i32),
    }

    struct Recorder {
        width: i32,
        height: i32,
        ops: Vec<Op>,
    }

    impl Recorder {
        fn board() -> Self {
            Self {
                width: BOARD_WIDTH as i32 * BLOCK_SIZE,
                height: BOARD_HEIGHT as i32 * BLOCK_SIZE,
                ops: Vec::new(),
            }
        }

        fn solid_fills(&self) -> Vec<(PixelRect, Color, f32)> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    Op::Fill(rect, color, alpha)
                        if rect.width == BLOCK_SIZE && *color != Color::Black =>
                    {
                        Some((*rect, *color, *alpha))
                    }
                    _ => None,
                })
                .collect()
        }
    }

    impl Surface for Recorder {
        fn size(&self) -> (i32, i32) {
            (self.width, self.height)
        }

        fn clear(&mut self, _color: Color) {
            self.ops.push(Op::Clear);
        }

        fn fill_rect(&mut self, rect: PixelRect, color: Color, alpha: f32) {
            self.ops.push(Op::Fill(rect, color, alpha));
        }

        fn stroke_rect(&mut self, rect: PixelRect, _color: Color, alpha: f32, line_width: i32) {
            self.ops.push(Op::Stroke(rect, alpha, line_width));
        }
    }

    #[test]
    fn test_block_has_fill_outline_and_shade() {
        let mut surface = Recorder::board();
        draw_block(&mut surface, 60, 90, Kind::Z, 1.0);
        assert_eq!(
            surface.ops,
            vec![
                Op::Fill(PixelRect::new(60, 90, 30, 30), Kind::Z.color(), 1.0),
                Op::Stroke(PixelRect::new(60, 90, 30, 30), 0.5, 2),
                Op::Fill(PixelRect::new(65, 95, 20, 20), Color::Black, 0.2),
            ]
        );
    }

    #[test]
    fn test_board_cells_land_on_block_grid() {
        let mut board = Board::new();
        board.set(19, 2, Cell::Filled(Kind::J));
        let mut surface = Recorder::board();
        draw_board(&mut surface, &board);
        assert_eq!(
            surface.solid_fills(),
            vec![(PixelRect::new(60, 570, 30, 30), Kind::J.color(), 1.0)]
        );
    }

    #[test]
    fn test_playing_frame_draws_ghost_then_piece() {
        let mut game = Game::with_seed(5);
        game.process_action(Action::Start);
        let mut piece = Piece::spawn(Kind::O);
        piece.col = 0;
        game.current_piece = Some(piece);

        let mut surface = Recorder::board();
        draw_game(&mut surface, &game, true);

        let fills = surface.solid_fills();
        assert_eq!(surface.ops[0], Op::Clear);
        assert_eq!(fills.len(), 8);
        // Ghost rests on the floor at 20% opacity
        assert!(fills[..4].iter().all(|(_, _, alpha)| *alpha == GHOST_ALPHA));
        assert!(fills[..4].iter().any(|(rect, _, _)| rect.y == 19 * BLOCK_SIZE));
        assert!(fills[4..].iter().all(|(rect, _, alpha)| *alpha == 1.0 && rect.y <= BLOCK_SIZE));
    }

    #[test]
    fn test_ghost_can_be_hidden() {
        let mut game = Game::with_seed(5);
        game.process_action(Action::Start);
        let mut surface = Recorder::board();
        draw_game(&mut surface, &game, false);
        assert_eq!(surface.solid_fills().len(), 4);
    }

    #[test]
    fn test_paused_frame_hides_active_piece() {
        let mut game = Game::with_seed(5);
        game.process_action(Action::Start);
        game.process_action(Action::Pause);
        let mut surface = Recorder::board();
        draw_game(&mut surface, &game, true);
        assert!(surface.solid_fills().is_empty());
    }

    #[test]
    fn test_preview_is_centered() {
        let mut surface = Recorder {
            width: 4 * BLOCK_SIZE,
            height: 4 * BLOCK_SIZE,
            ops: Vec::new(),
        };
        draw_preview(&mut surface, Some(Kind::O));
        let fills = surface.solid_fills();
        assert_eq!(fills.len(), 4);
        assert_eq!(fills[0].0, PixelRect::new(30, 30, 30, 30));

        draw_preview(&mut surface, None);
        assert_eq!(surface.ops.last(), Some(&Op::Clear));
    }
}
