//! Keyword routing

use std::collections::BTreeSet;

use crate::agents::config::RouterConfig;
use crate::agents::domain::AgentKind;

/// Maps a free-text message to the agents that should answer it
#[derive(Debug, Clone)]
pub struct KeywordRouter {
    sets: Vec<(AgentKind, Vec<String>)>,
    broad: Vec<String>,
}

fn lowercase(words: &[String]) -> Vec<String> {
    words
        .iter()
        .map(|w| w.to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}

impl KeywordRouter {
    pub fn new(config: &RouterConfig) -> Self {
        let sets = AgentKind::ALL
            .iter()
            .map(|&kind| {
                let words = match kind {
                    AgentKind::History => &config.history,
                    AgentKind::Medication => &config.medication,
                    AgentKind::CareGap => &config.care_gap,
                    AgentKind::Appointment => &config.appointment,
                };
                (kind, lowercase(words))
            })
            .collect();

        Self {
            sets,
            broad: lowercase(&config.broad),
        }
    }

    /// Agents selected for `message`. Never empty.
    ///
    /// An agent is picked when any of its keywords is a substring of the
    /// lowercased message. No match at all, or any broad-query match, picks
    /// every agent.
    pub fn select(&self, message: &str) -> BTreeSet<AgentKind> {
        let message = message.to_lowercase();
        let hit = |words: &[String]| words.iter().any(|w| message.contains(w.as_str()));

        if hit(&self.broad) {
            return AgentKind::ALL.into_iter().collect();
        }

        let selected: BTreeSet<AgentKind> = self
            .sets
            .iter()
            .filter(|(_, words)| hit(words))
            .map(|(kind, _)| *kind)
            .collect();

        if selected.is_empty() {
            AgentKind::ALL.into_iter().collect()
        } else {
            selected
        }
    }
}

impl Default for KeywordRouter {
    fn default() -> Self {
        Self::new(&RouterConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all() -> BTreeSet<AgentKind> {
        AgentKind::ALL.into_iter().collect()
    }

    #[test]
    fn test_care_gap_only_messages() {
        let router = KeywordRouter::default();
        for message in [
            "Do I have any overdue screenings?",
            "Which EXAMS am I missing?",
            "any preventive gaps",
        ] {
            assert_eq!(
                router.select(message),
                BTreeSet::from([AgentKind::CareGap]),
                "{}",
                message
            );
        }
    }

    #[test]
    fn test_no_keywords_selects_everyone() {
        let router = KeywordRouter::default();
        assert_eq!(router.select("Good morning"), all());
        assert_eq!(router.select(""), all());
    }

    #[test]
    fn test_broad_query_selects_everyone() {
        let router = KeywordRouter::default();
        assert_eq!(router.select("Can you help with my medication?"), all());
        assert_eq!(router.select("Tell me everything"), all());
    }

    #[test]
    fn test_interaction_question_goes_to_medication() {
        let router = KeywordRouter::default();
        assert_eq!(
            router.select("What medications interact with my heart failure drugs?"),
            BTreeSet::from([AgentKind::Medication])
        );
    }

    #[test]
    fn test_multiple_sets() {
        let router = KeywordRouter::default();
        assert_eq!(
            router.select("Should I bring my pill list to the appointment?"),
            BTreeSet::from([AgentKind::Medication, AgentKind::Appointment])
        );
    }

    #[test]
    fn test_custom_keywords() {
        let config = RouterConfig {
            history: vec!["Past".to_string()],
            medication: vec![],
            care_gap: vec![],
            appointment: vec![],
            broad: vec![],
        };
        let router = KeywordRouter::new(&config);
        assert_eq!(router.select("my PAST"), BTreeSet::from([AgentKind::History]));
        assert_eq!(router.select("medication"), all());
    }
}
