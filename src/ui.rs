//! Terminal UI rendering with ratatui

use crate::game::{Action, Game, GameState};
use crate::hud::{HudSink, Stats};
use crate::render::{self, PixelRect, Surface, BLOCK_SIZE};
use crate::settings::Settings;
use crate::tetromino::Kind;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Total width needed: hold(12) + board(22) + next/stats(16) = 50
const GAME_WIDTH: u16 = 50;
/// Board(20) + 2 for borders, plus the 3-row control bar
const GAME_HEIGHT: u16 = 25;
const BOARD_PANEL_HEIGHT: u16 = 22;
const CONTROLS_HEIGHT: u16 = 3;
const PREVIEW_HEIGHT: u16 = 6;
/// Terminal columns per board cell
const CHARS_PER_BLOCK: i32 = 2;
const BUTTON_WIDTH: u16 = 6;

/// On-screen buttons, left to right
const CONTROLS: [(&str, Action); 8] = [
    ("⤓", Action::HardDrop),
    ("↓", Action::SoftDrop),
    ("←", Action::MoveLeft),
    ("→", Action::MoveRight),
    ("↻", Action::RotateCW),
    ("↺", Action::RotateCCW),
    ("Hold", Action::Hold),
    ("Esc", Action::Pause),
];

/// Screen areas of every panel, derived from the terminal size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameLayout {
    pub hold: Rect,
    pub board: Rect,
    pub next: Rect,
    pub stats: Rect,
    pub controls: Rect,
}

impl GameLayout {
    pub fn new(area: Rect) -> Self {
        let game_area = center_rect(area, GAME_WIDTH, GAME_HEIGHT);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(BOARD_PANEL_HEIGHT),
                Constraint::Length(CONTROLS_HEIGHT),
            ])
            .split(game_area);

        // hold | board | next + stats
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(12),
                Constraint::Length(22), // Board (10*2 + 2 for borders)
                Constraint::Length(16),
            ])
            .split(rows[0]);

        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(PREVIEW_HEIGHT), Constraint::Min(0)])
            .split(columns[0]);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(PREVIEW_HEIGHT), Constraint::Min(6)])
            .split(columns[2]);

        Self {
            hold: left[0],
            board: columns[1],
            next: right[0],
            stats: right[1],
            controls: rows[1],
        }
    }

    /// Action of the on-screen button under (column, row), if any
    pub fn control_at(&self, column: u16, row: u16) -> Option<Action> {
        if !self.controls.contains(Position::new(column, row)) {
            return None;
        }
        let index = ((column - self.controls.x) / BUTTON_WIDTH) as usize;
        CONTROLS.get(index).map(|&(_, action)| action)
    }
}

/// Paints render output into a ratatui buffer, two columns per block.
///
/// Terminal cells cannot show sub-block detail, so outlines and the inset
/// shading are not drawn.
pub struct TermSurface<'a> {
    buf: &'a mut Buffer,
    area: Rect,
    block_char: &'static str,
    ghost_char: &'static str,
}

impl<'a> TermSurface<'a> {
    pub fn new(buf: &'a mut Buffer, area: Rect, glyphs: (&'static str, &'static str)) -> Self {
        Self {
            buf,
            area,
            block_char: glyphs.0,
            ghost_char: glyphs.1,
        }
    }

    /// Terminal position of the pixel (x, y), if the whole block fits
    fn cell_at(&self, x: i32, y: i32) -> Option<(u16, u16)> {
        if x < 0 || y < 0 {
            return None;
        }
        let col = x * CHARS_PER_BLOCK / BLOCK_SIZE;
        let row = y / BLOCK_SIZE;
        if col + CHARS_PER_BLOCK > self.area.width as i32 || row >= self.area.height as i32 {
            return None;
        }
        Some((self.area.x + col as u16, self.area.y + row as u16))
    }
}

impl Surface for TermSurface<'_> {
    fn size(&self) -> (i32, i32) {
        (
            self.area.width as i32 / CHARS_PER_BLOCK * BLOCK_SIZE,
            self.area.height as i32 * BLOCK_SIZE,
        )
    }

    fn clear(&mut self, color: Color) {
        let blank = " ".repeat(self.area.width as usize);
        for y in self.area.top()..self.area.bottom() {
            self.buf
                .set_string(self.area.x, y, &blank, Style::default().bg(color));
        }
    }

    fn fill_rect(&mut self, rect: PixelRect, color: Color, alpha: f32) {
        if rect.width != BLOCK_SIZE || rect.height != BLOCK_SIZE {
            return;
        }
        let Some((x, y)) = self.cell_at(rect.x, rect.y) else {
            return;
        };
        let (glyph, style) = if alpha >= 1.0 {
            (self.block_char, Style::default().fg(color))
        } else {
            (self.ghost_char, Style::default().fg(color).add_modifier(Modifier::DIM))
        };
        self.buf.set_string(x, y, glyph, style);
    }

    fn stroke_rect(&mut self, _rect: PixelRect, _color: Color, _alpha: f32, _line_width: i32) {}
}

/// Latest HUD numbers, fed by game events
#[derive(Debug, Clone, Default)]
pub struct StatsPanel {
    pub stats: Stats,
    pub last_clear: Option<&'static str>,
    pub final_result: Option<(u64, u32)>,
}

impl HudSink for StatsPanel {
    fn show_stats(&mut self, stats: Stats) {
        if stats.lines == 0 {
            self.last_clear = None;
        }
        self.stats = stats;
    }

    fn show_clear(&mut self, name: &'static str) {
        self.last_clear = Some(name);
    }

    fn show_game_over(&mut self, score: u64, lines: u32) {
        self.final_result = Some((score, lines));
    }
}

/// Render the entire game UI
pub fn render_game(frame: &mut Frame, game: &Game, hud: &StatsPanel, settings: &Settings) {
    let area = frame.area();
    let layout = GameLayout::new(area);
    let glyphs = settings.visual.block_chars();

    render_preview(frame, layout.hold, " HOLD ", game.hold_piece, game.can_hold(), glyphs);
    render_preview(
        frame,
        layout.next,
        " NEXT ",
        game.next_piece.as_ref().map(|piece| piece.kind),
        true,
        glyphs,
    );
    render_board(frame, layout.board, game, settings);
    render_stats(frame, layout.stats, hud);
    render_controls(frame, layout.controls);

    // Overlays
    match game.state {
        GameState::Ready => render_overlay(
            frame,
            area,
            "BLOCKFALL",
            vec![Line::styled("Press Enter to start", Style::default().fg(Color::Gray))],
        ),
        GameState::Paused => render_overlay(
            frame,
            area,
            "PAUSED",
            vec![Line::styled("Esc or Enter to resume", Style::default().fg(Color::Gray))],
        ),
        GameState::GameOver => {
            let (score, lines) = hud
                .final_result
                .unwrap_or((game.score.points, game.score.lines));
            render_overlay(
                frame,
                area,
                "GAME OVER",
                vec![
                    Line::raw(format!("Score: {}", score)),
                    Line::raw(format!("Lines: {}", lines)),
                    Line::styled("R to restart", Style::default().fg(Color::Gray)),
                ],
            );
        }
        GameState::Playing => {}
    }
}

/// Center a rect within another rect
fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Render a boxed single-piece preview (hold and next)
fn render_preview(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    kind: Option<Kind>,
    active: bool,
    glyphs: (&'static str, &'static str),
) {
    let border = if active { Color::Gray } else { Color::DarkGray };
    let block = Block::default()
        .title(title)
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut surface = TermSurface::new(frame.buffer_mut(), inner, glyphs);
    render::draw_preview(&mut surface, kind);
}

/// Render the game board
fn render_board(frame: &mut Frame, area: Rect, game: &Game, settings: &Settings) {
    let block = Block::default()
        .title(" BLOCKFALL ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut surface = TermSurface::new(frame.buffer_mut(), inner, settings.visual.block_chars());
    render::draw_game(&mut surface, game, settings.visual.show_ghost);
}

/// Render stats panel
fn render_stats(frame: &mut Frame, area: Rect, hud: &StatsPanel) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let label = |text: &'static str| Line::from(Span::styled(text, Style::default().fg(Color::Gray)));
    let stats = hud.stats;
    let mut lines = vec![
        label("SCORE"),
        Line::from(Span::styled(
            stats.score.to_string(),
            Style::default().fg(Color::Yellow).bold(),
        )),
        Line::raw(""),
        label("LINES"),
        Line::from(Span::styled(stats.lines.to_string(), Style::default().fg(Color::Cyan))),
        Line::raw(""),
        label("LEVEL"),
        Line::from(Span::styled(stats.level.to_string(), Style::default().fg(Color::Cyan))),
        Line::raw(""),
        label("COMBO"),
        Line::from(Span::styled(stats.combo.to_string(), Style::default().fg(Color::Magenta))),
    ];

    if let Some(name) = hud.last_clear {
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(name, Style::default().fg(Color::Green).bold())));
    }

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}

/// Render the clickable control bar
fn render_controls(frame: &mut Frame, area: Rect) {
    for (i, (label, _)) in CONTROLS.iter().enumerate() {
        let x = area.x + i as u16 * BUTTON_WIDTH;
        if x + BUTTON_WIDTH > area.right() {
            break;
        }
        let button = Rect::new(x, area.y, BUTTON_WIDTH, area.height);
        let paragraph = Paragraph::new(Line::raw(*label))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
        frame.render_widget(paragraph, button);
    }
}

/// Render a centered popup (ready, pause, game over)
fn render_overlay(frame: &mut Frame, area: Rect, title: &str, body: Vec<Line<'static>>) {
    let popup_width = 26u16;
    let popup_height = 4 + body.len() as u16;
    let popup_area = center_rect(area, popup_width, popup_height);

    // Clear the background
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let mut text = vec![
        Line::styled(title.to_string(), Style::default().fg(Color::Yellow).bold()),
        Line::raw(""),
    ];
    text.extend(body);

    let paragraph = Paragraph::new(text).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}
