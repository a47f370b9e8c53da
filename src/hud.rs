//! Events the game emits for whatever displays the numbers

use crate::score::Score;

/// Snapshot of the numbers shown next to the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    pub score: u64,
    pub lines: u32,
    pub level: u32,
    /// Combo clamped at zero
    pub combo: u32,
}

impl From<&Score> for Stats {
    fn from(score: &Score) -> Self {
        Self {
            score: score.points,
            lines: score.lines,
            level: score.level,
            combo: score.display_combo(),
        }
    }
}

/// Something that happened that the HUD should reflect
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// Score, lines, level or combo may have changed
    Stats(Stats),
    /// A clear was scored, with its display name
    Cleared(&'static str),
    /// The session ended; sent exactly once per game
    GameOver { score: u64, lines: u32 },
}

/// Receiver for HUD updates
pub trait HudSink {
    fn show_stats(&mut self, stats: Stats);

    fn show_clear(&mut self, _name: &'static str) {}

    fn show_game_over(&mut self, score: u64, lines: u32);
}

/// Forward a batch of events to a sink, in order
pub fn dispatch<S: HudSink + ?Sized>(events: impl IntoIterator<Item = GameEvent>, sink: &mut S) {
    for event in events {
        match event {
            GameEvent::Stats(stats) => sink.show_stats(stats),
            GameEvent::Cleared(name) => sink.show_clear(name),
            GameEvent::GameOver { score, lines } => sink.show_game_over(score, lines),
        }
    }
}
