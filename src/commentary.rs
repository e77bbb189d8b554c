//! Race commentary
//!
//! Picks the next line for a speech layer. Event notices from the race
//! mailbox go out first; otherwise one generated line per interval.

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::race::Race;
use crate::sim::state::RacePhase;
use crate::standings::Standings;

/// Minimum ms of race time between generated lines
pub const COMMENTARY_INTERVAL: f64 = 5000.0;

const LEADER_LINE_PROBABILITY: f64 = 0.3;
const POSITION_LINE_PROBABILITY: f64 = 0.5;

pub const PHRASES: &[&str] = &[
    "What a show!",
    "The competition is heating up!",
    "They're swimming for glory!",
    "This is intense!",
    "Look at them go!",
    "It's neck and neck!",
    "The race is on!",
    "Can you believe this?!",
    "Absolutely incredible!",
    "The swimmers are giving it their all!",
    "What a thrilling race!",
    "The tension is building!",
    "This is what we came to see!",
    "They're really pushing it!",
    "The finish line approaches!",
];

#[derive(Debug, Clone, Default)]
pub struct CommentaryDirector {
    last_line_at: Option<f64>,
}

impl CommentaryDirector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next line to speak, if any is due
    pub fn next_line<R: Rng + ?Sized>(&mut self, race: &mut Race, rng: &mut R) -> Option<String> {
        if race.phase() != RacePhase::Racing {
            return None;
        }
        if let Some(message) = race.take_event_message() {
            return Some(message);
        }

        let now = race.now();
        if self.last_line_at.is_some_and(|t| now - t < COMMENTARY_INTERVAL) {
            return None;
        }
        self.last_line_at = Some(now);
        generate(&race.standings(), rng)
    }

    /// Forget the last line time (new race)
    pub fn reset(&mut self) {
        self.last_line_at = None;
    }
}

fn generate<R: Rng + ?Sized>(standings: &Standings, rng: &mut R) -> Option<String> {
    let leader = standings.leader()?;

    if rng.random_bool(LEADER_LINE_PROBABILITY) {
        return Some(if leader.is_player {
            "You're in the lead! Keep it up!".to_owned()
        } else {
            format!("{} is leading the pack!", leader.name)
        });
    }

    if rng.random_bool(POSITION_LINE_PROBABILITY) {
        let line = match standings.player_position() {
            Some(1) => "You're dominating this race!",
            Some(2) => "You're in second place! Push harder!",
            _ => "You're falling behind! Speed up!",
        };
        return Some(line.to_owned());
    }

    PHRASES.choose(rng).map(|p| (*p).to_owned())
}
