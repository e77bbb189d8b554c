//! Voice trigger
//!
//! The host owns the speech recognizer and feeds finished transcripts in
//! here. A transcript containing the trigger phrase fires the voice boost.

use serde::{Deserialize, Serialize};

use crate::race::Race;
use crate::sim::state::RacePhase;

/// Phrase the player has to shout
pub const DEFAULT_TRIGGER_PHRASE: &str = "east or west goon hack is the best";

/// Lower-case, keep only word characters and whitespace
fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Whether `transcript` contains `phrase`, ignoring case and punctuation
pub fn matches_trigger(transcript: &str, phrase: &str) -> bool {
    let phrase = normalize(phrase);
    !phrase.trim().is_empty() && normalize(transcript).contains(&phrase)
}

/// Whether the host could start a speech recognizer
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VoiceStatus {
    #[default]
    Ready,
    /// No recognizer, or it failed; carries the reason for display
    Unavailable(String),
}

/// Listens for the trigger phrase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceGate {
    pub phrase: String,
    pub status: VoiceStatus,
}

impl Default for VoiceGate {
    fn default() -> Self {
        Self::new(DEFAULT_TRIGGER_PHRASE)
    }
}

impl VoiceGate {
    pub fn new(phrase: impl Into<String>) -> Self {
        Self {
            phrase: phrase.into(),
            status: VoiceStatus::Ready,
        }
    }

    /// Mark voice input as unusable. The race plays on without it.
    pub fn disable(&mut self, reason: impl Into<String>) {
        let reason = reason.into();
        log::info!("Voice input unavailable: {}", reason);
        self.status = VoiceStatus::Unavailable(reason);
    }

    pub fn is_ready(&self) -> bool {
        self.status == VoiceStatus::Ready
    }

    /// Feed a finished transcript. Returns true if it started a boost.
    pub fn hear(&self, race: &mut Race, transcript: &str) -> bool {
        if !self.is_ready() || race.phase() != RacePhase::Racing {
            return false;
        }
        if !matches_trigger(transcript, &self.phrase) {
            return false;
        }
        log::debug!("Voice trigger heard");
        race.activate_voice_boost()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    #[test]
    fn test_matches_ignoring_case_and_punctuation() {
        let phrase = DEFAULT_TRIGGER_PHRASE;
        assert!(matches_trigger("East or West, Goon Hack is the BEST!", phrase));
        assert!(matches_trigger("ok so east or west goon hack is the best right", phrase));
        assert!(!matches_trigger("east or west goon hack", phrase));
        assert!(!matches_trigger("eastorwest goon hack is the best", phrase));
        assert!(!matches_trigger("anything", "  "));
    }

    #[test]
    fn test_phrase_punctuation_ignored() {
        assert!(matches_trigger("go go go", "Go, go!"));
    }

    #[test]
    fn test_hear_triggers_boost_once() {
        let gate = VoiceGate::default();
        let mut race = Race::with_seed(Settings::default(), 3);
        assert!(!gate.hear(&mut race, DEFAULT_TRIGGER_PHRASE), "not racing yet");

        race.start();
        assert!(!gate.hear(&mut race, "hello there"));
        assert!(gate.hear(&mut race, DEFAULT_TRIGGER_PHRASE));
        assert!(race.state().voice_boost_active);
        assert!(!gate.hear(&mut race, DEFAULT_TRIGGER_PHRASE), "cooling down");
    }

    #[test]
    fn test_unavailable_gate_never_fires() {
        let mut gate = VoiceGate::default();
        gate.disable("Voice recognition not supported");
        assert_eq!(gate.status, VoiceStatus::Unavailable("Voice recognition not supported".into()));

        let mut race = Race::with_seed(Settings::default(), 3);
        race.start();
        assert!(!gate.hear(&mut race, DEFAULT_TRIGGER_PHRASE));
        assert!(!race.state().voice_boost_active);
    }
}
