//! Slot gate - readiness flags derived from the transcript suffix
//!
//! A plan needs three facts: where, when, and how many. The gate scans only
//! the user text after the most recent plan snapshot (see
//! [`crate::transcript`]) and applies a strict priority order so at most one
//! missing-slot signal surfaces per turn.

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

/// Fixed city gazetteer - the fallback when no "(to|in|for|at) City" phrasing
/// is present. Word-bounded, case-insensitive.
const GAZETTEER: [&str; 30] = [
    "Paris",
    "Rome",
    "London",
    "Barcelona",
    "Lisbon",
    "Madrid",
    "Seville",
    "Amsterdam",
    "Berlin",
    "Prague",
    "Vienna",
    "Athens",
    "Venice",
    "Florence",
    "Copenhagen",
    "Reykjavik",
    "Istanbul",
    "Dubai",
    "Marrakech",
    "Cairo",
    "Cape Town",
    "Tokyo",
    "Kyoto",
    "Bangkok",
    "Singapore",
    "Sydney",
    "New York",
    "Honolulu",
    "Rio de Janeiro",
    "Buenos Aires",
];

/// Capitalized words that look like destinations but never are
const DESTINATION_STOPWORDS: [&str; 17] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
    "Monday",
    "Friday",
    "Saturday",
    "Sunday",
    "Christmas",
];

/// The slot a turn is still missing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    Dates,
    Guests,
}

/// Derived readiness flags - recomputed each request, never stored
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotState {
    /// First destination found, if any
    pub destination: Option<String>,
    pub dates_known: bool,
    pub guests_known: bool,
}

impl SlotState {
    /// Derive the slot state from concatenated user text
    pub fn detect(user_text: &str) -> Self {
        let state = Self {
            destination: detect_destination(user_text),
            dates_known: detect_dates(user_text),
            guests_known: detect_guests(user_text),
        };
        debug!(?state, "SlotState::detect: derived");
        state
    }

    /// Which slot to request this turn, in strict priority order
    ///
    /// Destination unknown yields `None`: the model falls back to a generic
    /// prompt rather than a slot-request signal. Otherwise dates come before
    /// guests, and a fully known state yields `None` with
    /// [`SlotState::ready_for_plan`] true.
    pub fn gate(&self) -> Option<SlotKind> {
        if self.destination.is_none() {
            return None;
        }
        if !self.dates_known {
            return Some(SlotKind::Dates);
        }
        if !self.guests_known {
            return Some(SlotKind::Guests);
        }
        None
    }

    /// Whether all three slots are filled
    pub fn ready_for_plan(&self) -> bool {
        self.destination.is_some() && self.dates_known && self.guests_known
    }
}

fn detect_destination(text: &str) -> Option<String> {
    static PHRASE: OnceLock<Regex> = OnceLock::new();
    let phrase = PHRASE.get_or_init(|| {
        Regex::new(r"\b(?:to|in|for|at)\s+([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*)").expect("destination regex")
    });

    for captures in phrase.captures_iter(text) {
        let candidate = captures[1].trim().to_string();
        let first_word = candidate.split_whitespace().next().unwrap_or_default();
        if DESTINATION_STOPWORDS.contains(&first_word) {
            continue;
        }
        return Some(candidate);
    }

    static CITIES: OnceLock<Regex> = OnceLock::new();
    let cities = CITIES.get_or_init(|| {
        let alternation = GAZETTEER.map(regex::escape).join("|");
        Regex::new(&format!(r"(?i)\b({alternation})\b")).expect("gazetteer regex")
    });

    cities.find(text).map(|m| canonical_city(m.as_str()))
}

/// Map a case-insensitive gazetteer hit back to its canonical spelling
fn canonical_city(raw: &str) -> String {
    GAZETTEER
        .iter()
        .find(|city| city.eq_ignore_ascii_case(raw))
        .map(|city| city.to_string())
        .unwrap_or_else(|| raw.to_string())
}

fn detect_dates(text: &str) -> bool {
    static DATES: OnceLock<Regex> = OnceLock::new();
    let dates = DATES.get_or_init(|| {
        Regex::new(concat!(
            r"(?i)\d{4}-\d{2}-\d{2}",
            r"|\b\d{1,2}/\d{1,2}(?:/\d{2,4})?\b",
            r"|\b(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s+\d{1,2}\b",
            r"|\b\d{1,2}(?:st|nd|rd|th)?\s+(?:of\s+)?(?:january|february|march|april|may|june|july|august|september|october|november|december)\b",
            r"|\b(?:next|this)\s+(?:week|weekend|month)\b",
        ))
        .expect("dates regex")
    });

    dates.is_match(text)
}

fn detect_guests(text: &str) -> bool {
    static CUES: OnceLock<Regex> = OnceLock::new();
    let cues = CUES.get_or_init(|| {
        Regex::new(
            r"(?i)\b(?:adults?|people|persons?|guests?|travell?ers?|kids?|children|pax|of\s+us|party)\b",
        )
        .expect("guests regex")
    });

    cues.is_match(text) && text.chars().any(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_destination_cue_yields_unknown() {
        let state = SlotState::detect("somewhere warm with good food");
        assert_eq!(state.destination, None);
        assert_eq!(state.gate(), None);
        assert!(!state.ready_for_plan());
    }

    #[test]
    fn test_preposition_phrase_wins() {
        let state = SlotState::detect("I want to go to Rome next summer");
        assert_eq!(state.destination.as_deref(), Some("Rome"));
    }

    #[test]
    fn test_multi_word_destination() {
        let state = SlotState::detect("we are heading to New York for a long weekend");
        assert_eq!(state.destination.as_deref(), Some("New York"));
    }

    #[test]
    fn test_month_names_are_not_destinations() {
        let state = SlotState::detect("thinking of leaving in June with friends");
        assert_eq!(state.destination, None);
    }

    #[test]
    fn test_gazetteer_fallback_is_case_insensitive() {
        let state = SlotState::detect("maybe lisbon? not sure yet");
        assert_eq!(state.destination.as_deref(), Some("Lisbon"));
    }

    #[test]
    fn test_iso_range_sets_dates_known() {
        let state = SlotState::detect("Paris from 2025-06-01 to 2025-06-10");
        assert_eq!(state.destination.as_deref(), Some("Paris"));
        assert!(state.dates_known);
        assert!(!state.guests_known);
        assert_eq!(state.gate(), Some(SlotKind::Guests));
    }

    #[test]
    fn test_month_day_marker_sets_dates_known() {
        assert!(SlotState::detect("arriving March 3 in Rome").dates_known);
        assert!(SlotState::detect("around the 12th of september").dates_known);
        assert!(SlotState::detect("next weekend would be great").dates_known);
        assert!(!SlotState::detect("sometime soon").dates_known);
    }

    #[test]
    fn test_guests_need_cue_and_digit() {
        assert!(SlotState::detect("2 adults and 1 child").guests_known);
        assert!(SlotState::detect("there will be 4 of us").guests_known);
        // Digits without a people cue (dates) do not count
        assert!(!SlotState::detect("Paris from 2025-06-01 to 2025-06-10").guests_known);
        // Cue without a digit does not count
        assert!(!SlotState::detect("me and some friends, a few people").guests_known);
    }

    #[test]
    fn test_gate_priority_dates_before_guests() {
        let state = SlotState::detect("off to Barcelona with 2 adults");
        assert!(state.guests_known);
        assert!(!state.dates_known);
        assert_eq!(state.gate(), Some(SlotKind::Dates));
    }

    #[test]
    fn test_gate_ready_when_all_slots_filled() {
        let state = SlotState::detect("to Rome from 2025-09-01 to 2025-09-05 with 2 adults");
        assert_eq!(state.gate(), None);
        assert!(state.ready_for_plan());
    }
}
