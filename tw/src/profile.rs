//! Per-user preference profile
//!
//! Accumulated from cumulative user text and injected into the system prompt
//! every turn. The profile is monotonic: scalar categories only ever
//! overwrite with a fresh match, list categories append without duplicates
//! and never shrink.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Travel style cues: tag -> lowercase substrings that imply it
const TRAVEL_STYLES: [(&str, &[&str]); 4] = [
    ("adventure", &["adventure", "adrenaline", "off the beaten", "trekking"]),
    ("relaxation", &["relax", "unwind", "chill", "slow pace", "do nothing"]),
    ("culture", &["culture", "cultural", "history", "historic", "art "]),
    ("romantic", &["romantic", "honeymoon", "anniversary"]),
];

/// Companionship cues
const COMPANIONSHIPS: [(&str, &[&str]); 4] = [
    ("solo", &["solo", "by myself", "on my own", "travelling alone", "traveling alone"]),
    ("couple", &["my wife", "my husband", "my partner", "my girlfriend", "my boyfriend", "the two of us"]),
    ("family", &["my kids", "our kids", "my children", "family trip", "with the family"]),
    ("friends", &["my friends", "with friends", "group of friends", "the lads", "the girls"]),
];

/// Budget stance cues
const BUDGET_STANCES: [(&str, &[&str]); 2] = [
    ("budget-conscious", &["cheap", "budget", "affordable", "low cost", "save money", "not too expensive"]),
    ("premium", &["luxury", "luxurious", "five star", "5 star", "splurge", "high end", "money is no object"]),
];

/// Liked-activity cues (list-valued category)
const ACTIVITIES: [(&str, &[&str]); 8] = [
    ("hiking", &["hike", "hiking", "trail"]),
    ("museums", &["museum", "gallery", "galleries"]),
    ("beaches", &["beach", "beaches", "seaside", "swimming"]),
    ("nightlife", &["nightlife", "clubbing", "bars", "party"]),
    ("food", &["food", "restaurants", "cuisine", "street food", "foodie"]),
    ("shopping", &["shopping", "markets", "boutique"]),
    ("diving", &["diving", "snorkel", "scuba"]),
    ("skiing", &["ski", "skiing", "snowboard"]),
];

/// Categorical preference profile for one user
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UserProfile {
    pub travel_style: Option<String>,
    pub companionship: Option<String>,
    pub budget_stance: Option<String>,
    pub activities: Vec<String>,
}

impl UserProfile {
    /// Scan user text and fold any matches into the profile
    ///
    /// Scalar categories overwrite on a match; the activity list appends
    /// unseen tags. Nothing is ever removed.
    pub fn absorb(&mut self, user_text: &str) {
        let text = user_text.to_lowercase();

        if let Some(tag) = latest_match(&TRAVEL_STYLES, &text) {
            self.travel_style = Some(tag.to_string());
        }
        if let Some(tag) = latest_match(&COMPANIONSHIPS, &text) {
            self.companionship = Some(tag.to_string());
        }
        if let Some(tag) = latest_match(&BUDGET_STANCES, &text) {
            self.budget_stance = Some(tag.to_string());
        }

        for (tag, cues) in &ACTIVITIES {
            if cues.iter().any(|cue| text.contains(cue)) && !self.activities.iter().any(|t| t == tag) {
                debug!(%tag, "UserProfile::absorb: new activity tag");
                self.activities.push((*tag).to_string());
            }
        }
    }

    /// Whether any preference has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.travel_style.is_none()
            && self.companionship.is_none()
            && self.budget_stance.is_none()
            && self.activities.is_empty()
    }

    /// One-line summary for the system prompt
    pub fn summary(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }

        let mut parts = Vec::new();
        if let Some(style) = &self.travel_style {
            parts.push(format!("travel style: {style}"));
        }
        if let Some(companionship) = &self.companionship {
            parts.push(format!("travelling: {companionship}"));
        }
        if let Some(stance) = &self.budget_stance {
            parts.push(format!("budget stance: {stance}"));
        }
        if !self.activities.is_empty() {
            parts.push(format!("enjoys: {}", self.activities.join(", ")));
        }

        Some(parts.join("; "))
    }
}

/// Tag whose cue occurs last in the text
///
/// Callers feed the full cumulative transcript, so within a scalar category
/// the traveller's most recent statement must win, not the table order.
fn latest_match<'a>(table: &'a [(&'a str, &'a [&'a str])], text: &str) -> Option<&'a str> {
    let mut best: Option<(usize, &str)> = None;

    for (tag, cues) in table {
        for cue in *cues {
            if let Some(pos) = text.rfind(cue) {
                if best.is_none_or(|(best_pos, _)| pos > best_pos) {
                    best = Some((pos, tag));
                }
            }
        }
    }

    best.map(|(_, tag)| tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absorb_fills_categories() {
        let mut profile = UserProfile::default();
        profile.absorb("My wife and I love museums and street food, not too expensive please");

        assert_eq!(profile.companionship.as_deref(), Some("couple"));
        assert_eq!(profile.budget_stance.as_deref(), Some("budget-conscious"));
        assert!(profile.activities.contains(&"museums".to_string()));
        assert!(profile.activities.contains(&"food".to_string()));
    }

    #[test]
    fn test_absorb_is_monotonic_and_deduplicated() {
        let mut profile = UserProfile::default();
        profile.absorb("we love hiking and beaches");
        let after_first = profile.clone();

        // Repeated passes never remove tags and never duplicate them
        profile.absorb("we love hiking and beaches");
        profile.absorb("also keen on museums");

        assert_eq!(profile.activities.iter().filter(|t| *t == "hiking").count(), 1);
        for tag in &after_first.activities {
            assert!(profile.activities.contains(tag));
        }
        assert!(profile.activities.contains(&"museums".to_string()));
    }

    #[test]
    fn test_scalar_categories_overwrite() {
        let mut profile = UserProfile::default();
        profile.absorb("budget trip please");
        assert_eq!(profile.budget_stance.as_deref(), Some("budget-conscious"));

        profile.absorb("actually, let's splurge on a luxury resort");
        assert_eq!(profile.budget_stance.as_deref(), Some("premium"));
    }

    #[test]
    fn test_latest_statement_wins_in_cumulative_text() {
        let mut profile = UserProfile::default();
        profile.absorb("keep it cheap please");
        assert_eq!(profile.budget_stance.as_deref(), Some("budget-conscious"));

        // The engine re-absorbs the whole transcript every request, so the
        // earlier cue is still present when the traveller changes their mind
        profile.absorb("keep it cheap please\nactually, let's splurge on a luxury resort");
        assert_eq!(profile.budget_stance.as_deref(), Some("premium"));

        profile.absorb(
            "keep it cheap please\nactually, let's splurge on a luxury resort\nsecond thoughts, back to budget",
        );
        assert_eq!(profile.budget_stance.as_deref(), Some("budget-conscious"));
    }

    #[test]
    fn test_absorb_without_cues_changes_nothing() {
        let mut profile = UserProfile::default();
        profile.absorb("take me somewhere nice");
        assert!(profile.is_empty());
        assert!(profile.summary().is_none());
    }

    #[test]
    fn test_summary_mentions_recorded_preferences() {
        let mut profile = UserProfile::default();
        profile.absorb("honeymoon! diving and beaches, money is no object");

        let summary = profile.summary().unwrap();
        assert!(summary.contains("romantic"));
        assert!(summary.contains("premium"));
        assert!(summary.contains("diving"));
    }
}
