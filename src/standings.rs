//! Race standings
//!
//! Ranks racers by distance swum. Used for the leaderboard overlay, the
//! commentary and the end-of-race summary.

use serde::{Deserialize, Serialize};

use crate::sim::state::{RaceState, Racer};

/// Medals for the podium places
pub const MEDALS: [&str; 3] = ["🥇", "🥈", "🥉"];

/// A single standings row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandingEntry {
    /// 1-indexed place
    pub rank: usize,
    pub racer_id: String,
    pub name: String,
    pub color: String,
    /// Percent of the track covered, capped at 100
    pub progress: f32,
    pub is_player: bool,
}

impl StandingEntry {
    /// Medal for the podium, `None` from fourth place on
    pub fn medal(&self) -> Option<&'static str> {
        MEDALS.get(self.rank.wrapping_sub(1)).copied()
    }

    /// Medal or "#n"
    pub fn badge(&self) -> String {
        match self.medal() {
            Some(m) => m.to_owned(),
            None => format!("#{}", self.rank),
        }
    }
}

/// Racers in finishing order
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Standings {
    pub entries: Vec<StandingEntry>,
}

impl Standings {
    /// Rank `racers` by y, furthest first. Ties keep roster order.
    pub fn from_racers(racers: &[Racer], track_length: f32) -> Self {
        let mut order: Vec<&Racer> = racers.iter().collect();
        // sort_by is stable
        order.sort_by(|a, b| b.pos.y.total_cmp(&a.pos.y));

        let entries = order
            .into_iter()
            .enumerate()
            .map(|(i, r)| StandingEntry {
                rank: i + 1,
                racer_id: r.id.clone(),
                name: r.display_name().to_owned(),
                color: r.color.clone(),
                progress: progress_percent(r.pos.y, track_length),
                is_player: r.is_player,
            })
            .collect();

        Self { entries }
    }

    pub fn from_state(state: &RaceState) -> Self {
        Self::from_racers(&state.racers, state.track_length)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn leader(&self) -> Option<&StandingEntry> {
        self.entries.first()
    }

    /// The player's 1-indexed place (if there is a player)
    pub fn player_position(&self) -> Option<usize> {
        self.entries.iter().find(|e| e.is_player).map(|e| e.rank)
    }

    pub fn player_won(&self) -> bool {
        self.leader().is_some_and(|e| e.is_player)
    }
}

fn progress_percent(y: f32, track_length: f32) -> f32 {
    if track_length <= 0.0 {
        return 0.0;
    }
    (y / track_length * 100.0).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    fn racers() -> Vec<Racer> {
        let settings = Settings::default();
        settings
            .roster
            .iter()
            .map(|p| Racer::from_profile(p, settings.canvas_width, None))
            .collect()
    }

    #[test]
    fn test_orders_by_distance() {
        let mut rs = racers();
        rs[0].pos.y = 500.0;
        rs[1].pos.y = 900.0;
        rs[2].pos.y = 700.0;

        let s = Standings::from_racers(&rs, 1000.0);
        let ids: Vec<_> = s.entries.iter().map(|e| e.racer_id.as_str()).collect();
        assert_eq!(ids, ["speedy", "turbo", "player"]);
        assert_eq!(s.player_position(), Some(3));
        assert!(!s.player_won());
        assert_eq!(s.leader().unwrap().progress, 90.0);
    }

    #[test]
    fn test_ties_keep_roster_order() {
        let s = Standings::from_racers(&racers(), 36000.0);
        let ids: Vec<_> = s.entries.iter().map(|e| e.racer_id.as_str()).collect();
        assert_eq!(ids, ["player", "speedy", "turbo"]);
        assert!(s.player_won());
    }

    #[test]
    fn test_progress_capped() {
        let mut rs = racers();
        rs[0].pos.y = 1500.0;
        let s = Standings::from_racers(&rs, 1000.0);
        assert_eq!(s.entries[0].progress, 100.0);
        assert_eq!(Standings::from_racers(&rs, 0.0).entries[0].progress, 0.0);
    }

    #[test]
    fn test_badges() {
        let mut rs = racers();
        rs.push(Racer {
            id: "extra".into(),
            ..rs[1].clone()
        });
        let s = Standings::from_racers(&rs, 1000.0);
        assert_eq!(s.entries[0].medal(), Some("🥇"));
        assert_eq!(s.entries[2].badge(), "🥉");
        assert_eq!(s.entries[3].medal(), None);
        assert_eq!(s.entries[3].badge(), "#4");
    }

    #[test]
    fn test_no_player() {
        let rs: Vec<_> = racers().into_iter().filter(|r| !r.is_player).collect();
        let s = Standings::from_racers(&rs, 1000.0);
        assert_eq!(s.player_position(), None);
        assert!(!s.player_won());
        assert!(Standings::default().is_empty());
    }
}
