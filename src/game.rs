//! Core game state and logic
//!
//! `Game` owns the whole session: board, pieces, bag, score and the
//! frame-driven state machine. It never reads a clock; the caller passes the
//! current timestamp to [`Game::frame`].

use crate::bag::Bag;
use crate::board::Board;
use crate::hud::{GameEvent, Stats};
use crate::piece::Piece;
use crate::score::Score;
use crate::tetromino::{Kind, RotationDirection};
use std::time::Duration;

/// Corner offsets (col, row) around the 3×3 box of a T piece
const SPIN_CORNERS: [(i32, i32); 4] = [(0, 0), (2, 0), (0, 2), (2, 2)];
/// Filled corners needed for a spin
const SPIN_MIN_CORNERS: usize = 3;

/// Session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// Waiting for the first start
    Ready,
    Playing,
    Paused,
    /// Terminal until a start/restart
    GameOver,
}

/// Input actions the game can process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    RotateCW,
    RotateCCW,
    Hold,
    /// Toggle between playing and paused
    Pause,
    Start,
    Restart,
    Resume,
}

/// The main game struct
#[derive(Debug, Clone)]
pub struct Game {
    /// The game board
    pub board: Board,
    /// Current falling piece
    pub current_piece: Option<Piece>,
    /// Piece that spawns after the current one locks
    pub next_piece: Option<Piece>,
    /// Held kind (can swap once per lock)
    pub hold_piece: Option<Kind>,
    can_hold: bool,
    /// Whether the last successful action on the current piece was a rotation
    last_move_was_rotate: bool,
    /// Piece bag randomizer
    bag: Bag,
    /// Score tracking
    pub score: Score,
    /// Current game state
    pub state: GameState,
    /// Time accumulated toward the next automatic drop
    drop_counter: Duration,
    /// Timestamp of the previous frame; None right after start or resume
    last_frame: Option<Duration>,
    /// Pending HUD events
    events: Vec<GameEvent>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Create a new game waiting to be started
    pub fn new() -> Self {
        Self::with_bag(Bag::new())
    }

    /// Create a new game whose piece sequence is fixed by `seed`
    pub fn with_seed(seed: u64) -> Self {
        Self::with_bag(Bag::with_seed(seed))
    }

    fn with_bag(bag: Bag) -> Self {
        Self {
            board: Board::new(),
            current_piece: None,
            next_piece: None,
            hold_piece: None,
            can_hold: true,
            last_move_was_rotate: false,
            bag,
            score: Score::new(),
            state: GameState::Ready,
            drop_counter: Duration::ZERO,
            last_frame: None,
            events: Vec::new(),
        }
    }

    /// Whether hold is currently allowed
    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    /// Take all events produced since the last call
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    /// Process an action, ignoring anything the current state does not accept
    pub fn process_action(&mut self, action: Action) {
        match self.state {
            GameState::Ready | GameState::GameOver => {
                if matches!(action, Action::Start | Action::Restart) {
                    self.start();
                }
            }
            GameState::Paused => {
                if matches!(action, Action::Pause | Action::Resume) {
                    self.resume();
                }
            }
            GameState::Playing => match action {
                Action::MoveLeft => self.move_horizontal(-1),
                Action::MoveRight => self.move_horizontal(1),
                Action::SoftDrop => self.soft_drop(),
                Action::HardDrop => self.hard_drop(),
                Action::RotateCW => self.rotate(RotationDirection::Clockwise),
                Action::RotateCCW => self.rotate(RotationDirection::CounterClockwise),
                Action::Hold => self.hold(),
                Action::Pause => self.pause(),
                Action::Restart => self.restart(),
                // Already running
                Action::Start | Action::Resume => {}
            },
        }
    }

    /// Reset the session to its creation defaults and begin play
    pub fn start(&mut self) {
        self.board = Board::new();
        self.score = Score::new();
        self.current_piece = None;
        self.next_piece = None;
        self.hold_piece = None;
        self.can_hold = true;
        self.last_move_was_rotate = false;
        self.bag.clear();
        self.drop_counter = Duration::ZERO;
        self.last_frame = None;
        self.state = GameState::Playing;
        self.events.push(GameEvent::Stats(Stats::from(&self.score)));
        tracing::info!("game started");
        self.spawn();
    }

    pub fn restart(&mut self) {
        tracing::info!(score = self.score.points, lines = self.score.lines, "restarting");
        self.start();
    }

    /// Suspend scheduling without touching state
    pub fn pause(&mut self) {
        if self.state == GameState::Playing {
            self.state = GameState::Paused;
            tracing::debug!("paused");
        }
    }

    /// Continue after a pause; paused time is not credited to the drop timer
    pub fn resume(&mut self) {
        if self.state == GameState::Paused {
            self.state = GameState::Playing;
            self.last_frame = None;
            tracing::debug!("resumed");
        }
    }

    /// Advance the clock to `now` (a monotonic timestamp) and apply gravity.
    /// Does nothing unless the game is playing.
    pub fn frame(&mut self, now: Duration) {
        if self.state != GameState::Playing {
            return;
        }

        let elapsed = self
            .last_frame
            .map_or(Duration::ZERO, |last| now.saturating_sub(last));
        self.last_frame = Some(now);
        self.drop_counter += elapsed;

        if self.drop_counter > self.score.drop_interval() {
            self.soft_drop();
        }
    }

    fn move_horizontal(&mut self, dir: i32) {
        if let Some(piece) = &mut self.current_piece {
            if piece.try_move(0, dir, &self.board) {
                self.last_move_was_rotate = false;
            }
        }
    }

    fn soft_drop(&mut self) {
        if let Some(piece) = &mut self.current_piece {
            if !piece.try_move(1, 0, &self.board) {
                self.lock_piece();
            }
        }
        self.drop_counter = Duration::ZERO;
    }

    fn hard_drop(&mut self) {
        if let Some(piece) = &mut self.current_piece {
            let distance = piece.hard_drop(&self.board);
            tracing::trace!(distance, "hard drop");
            self.lock_piece();
        }
        self.drop_counter = Duration::ZERO;
    }

    fn rotate(&mut self, direction: RotationDirection) {
        if let Some(piece) = &mut self.current_piece {
            if piece.rotate(direction, &self.board) {
                self.last_move_was_rotate = true;
            }
        }
    }

    fn hold(&mut self) {
        if !self.can_hold {
            return;
        }

        let Some(current) = self.current_piece.take() else {
            return;
        };

        match self.hold_piece.replace(current.kind) {
            None => self.spawn(),
            Some(held) => self.place_active(Piece::spawn(held)),
        }
        self.can_hold = false;
    }

    /// Lock the current piece, clear rows, score and spawn the next piece
    fn lock_piece(&mut self) {
        let Some(piece) = self.current_piece.take() else {
            return;
        };

        self.board.merge(&piece);

        // Corners are judged on the swept board, with rows already shifted down
        let cleared = self.board.sweep();
        let is_spin = self.detect_spin(&piece);

        if let Some(clear) = self.score.on_lock(cleared, is_spin) {
            tracing::debug!(
                kind = ?piece.kind,
                lines = clear.lines(),
                spin = is_spin,
                combo = self.score.combo,
                points = self.score.points,
                "{}",
                clear.name()
            );
            self.events.push(GameEvent::Cleared(clear.name()));
        }
        self.events.push(GameEvent::Stats(Stats::from(&self.score)));

        self.last_move_was_rotate = false;
        self.spawn();
    }

    /// Promote the next piece to active and queue a new next piece
    fn spawn(&mut self) {
        let active = self
            .next_piece
            .take()
            .unwrap_or_else(|| Piece::spawn(self.bag.draw()));
        self.next_piece = Some(Piece::spawn(self.bag.draw()));
        self.can_hold = true;
        self.place_active(active);
    }

    /// Make `piece` the active piece, ending the game if it overlaps the stack
    fn place_active(&mut self, piece: Piece) {
        let blocked = self.board.collides(&piece);
        self.current_piece = Some(piece);
        if blocked {
            self.game_over();
        }
    }

    fn game_over(&mut self) {
        self.state = GameState::GameOver;
        tracing::info!(score = self.score.points, lines = self.score.lines, "game over");
        self.events.push(GameEvent::GameOver {
            score: self.score.points,
            lines: self.score.lines,
        });
    }

    /// A T piece locked right after a rotation with 3 of its 4 box corners
    /// blocked counts as a spin
    fn detect_spin(&self, piece: &Piece) -> bool {
        if !piece.is_t_piece() || !self.last_move_was_rotate {
            return false;
        }

        let filled = SPIN_CORNERS
            .iter()
            .filter(|&&(dc, dr)| self.board.is_blocked(piece.row + dr, piece.col + dc))
            .count();

        filled >= SPIN_MIN_CORNERS
    }
}
