//! Monitoring and alerting coverage of the capabilities at a location.

use std::fmt;

use readiness_types::{AnswerSet, Capability, Integration, Location, QuestionKey, Signal, TriState};

use crate::catalog;

/// Traffic-light rating of a coverage percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    Green,
    Orange,
    Red,
}

impl Band {
    /// Green from 80%, red below 20%, orange in between.
    pub fn of(percent: u8) -> Self {
        match percent {
            80.. => Self::Green,
            0..20 => Self::Red,
            _ => Self::Orange,
        }
    }
}

/// Selected items over offered items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Ratio {
    pub selected: usize,
    pub total: usize,
}

impl Ratio {
    /// Rounded percentage, `None` when nothing is offered.
    pub fn percent(&self) -> Option<u8> {
        if self.total == 0 {
            return None;
        }
        let rounded = (200 * self.selected + self.total) / (2 * self.total);
        Some(rounded.min(100) as u8)
    }

    pub fn band(&self) -> Option<Band> {
        self.percent().map(Band::of)
    }

    fn add(&mut self, other: Ratio) {
        self.selected += other.selected;
        self.total += other.total;
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.percent() {
            Some(p) => write!(f, "{p}%"),
            None => f.write_str("—"),
        }
    }
}

/// Coverage figures of one capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityCoverage {
    pub capability: Capability,
    pub monitoring: Ratio,
    pub alerting: Ratio,
    /// Monitoring, alerting and integrations together.
    pub overall: Ratio,
}

/// Coverage of every capability answered "yes" at `location`.
pub fn coverage(answers: &AnswerSet, location: Location) -> Vec<CapabilityCoverage> {
    Capability::ALL
        .iter()
        .copied()
        .filter(|&c| answers.tri(QuestionKey::Capability(location, c)) == Some(TriState::Yes))
        .map(|capability| {
            let monitoring = signal_ratio(answers, location, capability, Signal::Monitoring);
            let alerting = signal_ratio(answers, location, capability, Signal::Alerting);

            let mut overall = monitoring;
            overall.add(alerting);
            for &integration in Integration::ALL {
                let key = QuestionKey::Integration(location, capability, integration);
                match answers.tri(key) {
                    Some(TriState::Yes) => overall.add(Ratio { selected: 1, total: 1 }),
                    Some(TriState::No) => overall.add(Ratio { selected: 0, total: 1 }),
                    Some(TriState::Na) | None => {}
                }
            }

            CapabilityCoverage {
                capability,
                monitoring,
                alerting,
                overall,
            }
        })
        .collect()
}

fn signal_ratio(
    answers: &AnswerSet,
    location: Location,
    capability: Capability,
    signal: Signal,
) -> Ratio {
    catalog::providers(location)
        .iter()
        .map(|&provider| Ratio {
            selected: answers
                .choices(QuestionKey::Signal(location, capability, signal, provider))
                .len(),
            total: catalog::signal_items(signal, provider).len(),
        })
        .fold(Ratio::default(), |mut acc, r| {
            acc.add(r);
            acc
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use readiness_types::Provider;

    #[test]
    fn bands() {
        assert_eq!(Band::of(100), Band::Green);
        assert_eq!(Band::of(80), Band::Green);
        assert_eq!(Band::of(79), Band::Orange);
        assert_eq!(Band::of(20), Band::Orange);
        assert_eq!(Band::of(19), Band::Red);
        assert_eq!(Band::of(0), Band::Red);
    }

    #[test]
    fn only_affirmed_capabilities() {
        let answers = AnswerSet::new()
            .with(QuestionKey::Capability(Location::Gcp, Capability::Frontend), TriState::Yes)
            .with(QuestionKey::Capability(Location::Gcp, Capability::Backend), TriState::No);
        let stats = coverage(&answers, Location::Gcp);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].capability, Capability::Frontend);
        assert_eq!(stats[0].overall.to_string(), "0%");
    }

    #[test]
    fn counts_items_and_integrations() {
        let cap = Capability::Apis;
        let answers = AnswerSet::new()
            .with(QuestionKey::Capability(Location::OnPrem, cap), TriState::Yes)
            .with(
                QuestionKey::Signal(Location::OnPrem, cap, Signal::Alerting, Provider::NewRelic),
                vec!["Availability".to_string(), "Error rate".to_string()],
            )
            .with(
                QuestionKey::Integration(Location::OnPrem, cap, Integration::Stip),
                TriState::Yes,
            )
            .with(
                QuestionKey::Integration(Location::OnPrem, cap, Integration::Lisi),
                TriState::No,
            )
            .with(
                QuestionKey::Integration(Location::OnPrem, cap, Integration::Geneos),
                TriState::Na,
            );
        let stats = &coverage(&answers, Location::OnPrem)[0];

        // New Relic offers five monitoring items, Splunk nine.
        assert_eq!(stats.monitoring, Ratio { selected: 0, total: 14 });
        // New Relic and Splunk offer three alerting items each.
        assert_eq!(stats.alerting, Ratio { selected: 2, total: 6 });
        assert_eq!(stats.alerting.percent(), Some(33));
        assert_eq!(stats.overall, Ratio { selected: 3, total: 22 });
        assert_eq!(stats.overall.band(), Some(Band::Red));
    }

    #[test]
    fn empty_ratio() {
        let ratio = Ratio::default();
        assert_eq!(ratio.percent(), None);
        assert_eq!(ratio.band(), None);
        assert_eq!(ratio.to_string(), "—");
    }
}
