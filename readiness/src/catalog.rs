//! The SRE readiness questionnaire.
//!
//! Every question, option set and dependency of the assessment is declared
//! here, once, and validated by the tests below.

use std::sync::LazyLock;

use readiness_types::{
    ActivationRule, Answer, Capability, Cascade, CascadeTrigger, ChoiceQuestion, Integration,
    Location, MetaField, Practice, Provider, Question, QuestionKey, QuestionKind, Schema, Section,
    Signal, SloDetail, TriState,
};

/// The choice value that unlocks a free-text qualifier.
pub const OTHER: &str = "other";

pub const ROLE_OPTIONS: &[&str] = &["developer", "sre", "product-owner", "architect", OTHER];

pub const APP_TYPE_OPTIONS: &[&str] = &["java", "dotnet", "python", "nodejs", OTHER];

/// The single option of a stip provider drill-down.
pub const STIP_ENABLED: &str = "Enabled";

/// Practices whose "yes" can be backed by a documentation link.
pub const LINK_GATED: [Practice; 4] = [
    Practice::SloPdm,
    Practice::DrPlan,
    Practice::BpRunbooks,
    Practice::BpDependencies,
];

/// Providers offered for stip integration, independent of location.
pub const STIP_PROVIDERS: [Provider; 2] = [Provider::NewRelic, Provider::Splunk];

const NEW_RELIC_MONITORING: &[&str] = &[
    "APM (dashboard)",
    "INFRA (dashboard)",
    "Golden Signals (dashboard)",
    "SYNT",
    "Other",
];

const LOG_MONITORING: &[&str] = &[
    "Response times",
    "HTTP Response Codes",
    "Error Rate",
    "Throughput",
    "Availability",
    "Anomalies",
    "DB connections",
    "Restarts/Uptime",
    "Other",
];

const NEW_RELIC_ALERTING: &[&str] = &["Availability", "Error rate", "Other"];

const LOG_ALERTING: &[&str] = &["Critical errors", "Error Rate", "Other"];

/// Monitoring and alerting providers available at a location.
pub fn providers(location: Location) -> &'static [Provider] {
    match location {
        Location::Gcp => &[Provider::NewRelic, Provider::CloudMonitoring],
        Location::OnPrem => &[Provider::NewRelic, Provider::Splunk],
        Location::Hybrid => &[
            Provider::NewRelic,
            Provider::Splunk,
            Provider::CloudMonitoring,
        ],
    }
}

/// The items a provider can monitor or alert on.
pub fn signal_items(signal: Signal, provider: Provider) -> &'static [&'static str] {
    match (signal, provider) {
        (Signal::Monitoring, Provider::NewRelic) => NEW_RELIC_MONITORING,
        (Signal::Monitoring, _) => LOG_MONITORING,
        (Signal::Alerting, Provider::NewRelic) => NEW_RELIC_ALERTING,
        (Signal::Alerting, _) => LOG_ALERTING,
    }
}

static SCHEMA: LazyLock<Schema> = LazyLock::new(build);

/// The questionnaire schema.
pub fn schema() -> &'static Schema {
    &SCHEMA
}

fn text(key: impl Into<QuestionKey>, label: &str, ask: &str, section: Section) -> Question {
    Question::new(key, label, ask, QuestionKind::Text, section)
}

fn tri(key: impl Into<QuestionKey>, label: &str, ask: &str, section: Section) -> Question {
    Question::new(key, label, ask, QuestionKind::TriState, section)
}

fn choice(
    key: impl Into<QuestionKey>,
    label: &str,
    ask: &str,
    options: &[&str],
    section: Section,
) -> Question {
    Question::new(
        key,
        label,
        ask,
        QuestionKind::Choice(ChoiceQuestion::new(options.iter().copied())),
        section,
    )
}

fn choices(
    key: impl Into<QuestionKey>,
    label: String,
    ask: String,
    options: &[&str],
) -> Question {
    Question::new(
        key,
        label,
        ask,
        QuestionKind::Choices(ChoiceQuestion::new(options.iter().copied())),
        Section::Locations,
    )
}

fn practice(
    practice: Practice,
    label: &str,
    ask: &str,
    section: Section,
    questions: &mut Vec<Question>,
) {
    let mut question = tri(practice, label, ask, section).required();
    let gated = LINK_GATED.contains(&practice);
    if gated {
        question = question.cascades(Cascade::new(
            CascadeTrigger::IsNot(TriState::Yes),
            Answer::Unanswered,
            vec![QuestionKey::Link(practice)],
        ));
    }
    questions.push(question);
    if gated {
        questions.push(
            text(
                QuestionKey::Link(practice),
                &format!("{label} (link)"),
                "Link to the documentation:",
                section,
            )
            .activated_by(practice, ActivationRule::Affirmed),
        );
    }
}

fn build() -> Schema {
    let mut questions = Vec::new();

    // Metadata
    questions.extend([
        text(
            MetaField::AppName,
            "Application name",
            "Application name:",
            Section::Metadata,
        )
        .required()
        .sensitive(),
        choice(
            MetaField::Role,
            "Role",
            "Your role:",
            ROLE_OPTIONS,
            Section::Metadata,
        )
        .required()
        .sensitive(),
        text(
            MetaField::RoleOther,
            "Role (Other)",
            "Describe your role:",
            Section::Metadata,
        )
        .sensitive()
        .activated_by(MetaField::Role, ActivationRule::Equals(OTHER.into())),
        text(MetaField::NarId, "NAR-ID", "NAR-ID:", Section::Metadata)
            .required()
            .sensitive(),
        text(
            MetaField::ContactEmail,
            "Contact Email",
            "Contact email:",
            Section::Metadata,
        )
        .required()
        .sensitive(),
        choice(
            MetaField::AppType,
            "Application Type",
            "Main language of the application:",
            APP_TYPE_OPTIONS,
            Section::Metadata,
        )
        .required(),
        text(
            MetaField::AppTypeOther,
            "Application Type (Other)",
            "Which language?",
            Section::Metadata,
        )
        .activated_by(MetaField::AppType, ActivationRule::Equals(OTHER.into())),
        choice(
            MetaField::Location,
            "Location",
            "Where does the application run?",
            &Location::ALL.iter().map(|l| l.as_str()).collect::<Vec<_>>(),
            Section::Metadata,
        )
        .required(),
    ]);

    // SLO/SLA
    let slo_details = [
        (SloDetail::Latency, "Latency SLO", "Is a latency SLO defined?"),
        (
            SloDetail::Availability,
            "Availability SLO",
            "Is an availability SLO defined?",
        ),
        (
            SloDetail::ErrorBudget,
            "Error budget",
            "Is an error budget defined and tracked?",
        ),
    ];
    questions.push(
        tri(
            Practice::SloExists,
            "SLO/SLA structure",
            "Does an SLO/SLA structure exist for the application?",
            Section::SloSla,
        )
        .required()
        .cascades(Cascade::new(
            CascadeTrigger::Is(TriState::No),
            TriState::Na,
            slo_details.iter().map(|(d, _, _)| QuestionKey::Slo(*d)).collect(),
        )),
    );
    for (detail, label, ask) in slo_details {
        questions.push(
            tri(detail, label, ask, Section::SloSla)
                .required()
                .activated_by(Practice::SloExists, ActivationRule::Affirmed),
        );
    }
    practice(
        Practice::SloPdm,
        "PDM documentation",
        "Are the SLOs documented in the PDM?",
        Section::SloSla,
        &mut questions,
    );

    // Disaster recovery
    practice(
        Practice::DrPlan,
        "DR plan",
        "Is a disaster recovery plan documented?",
        Section::DisasterRecovery,
        &mut questions,
    );
    practice(
        Practice::DrRtoRpo,
        "RTO/RPO definition",
        "Are RTO and RPO defined?",
        Section::DisasterRecovery,
        &mut questions,
    );
    practice(
        Practice::DrTested,
        "DR plan testing",
        "Was the DR plan tested in the last 12 months?",
        Section::DisasterRecovery,
        &mut questions,
    );

    // Best practices
    for (p, label, ask) in [
        (
            Practice::BpRunbooks,
            "Runbooks/support guides",
            "Are runbooks or support guides available?",
        ),
        (
            Practice::BpSpof,
            "Critical failure scenarios",
            "Are critical failure scenarios and single points of failure documented?",
        ),
        (
            Practice::BpNoise,
            "Alert noise documentation",
            "Is alert noise reviewed and documented?",
        ),
        (Practice::BpMttr, "MTTR tracking", "Is MTTR tracked?"),
        (
            Practice::BpDependencies,
            "Direct dependencies documentation",
            "Are direct dependencies documented?",
        ),
    ] {
        practice(p, label, ask, Section::BestPractices, &mut questions);
    }

    for &location in Location::ALL {
        location_questions(location, &mut questions);
    }

    questions.push(text(
        MetaField::OtherMentions,
        "Other Mentions",
        "Anything else worth mentioning?",
        Section::Notes,
    ));

    Schema::new(questions).with_prelude(
        "SRE readiness assessment: answer every question to unlock the CSV export.",
    )
}

fn location_questions(location: Location, questions: &mut Vec<Question>) {
    for &capability in Capability::ALL {
        let owner = QuestionKey::Capability(location, capability);
        let cap = capability.title();

        questions.push(
            tri(
                owner,
                &format!("{cap} component"),
                &format!("Does the application have a {cap} component?"),
                Section::Locations,
            )
            .required()
            .activated_by(
                MetaField::Location,
                ActivationRule::Equals(location.as_str().into()),
            )
            .cascades(Cascade::new(
                CascadeTrigger::Is(TriState::No),
                TriState::Na,
                Integration::ALL
                    .iter()
                    .map(|&i| QuestionKey::Integration(location, capability, i))
                    .collect(),
            )),
        );

        for &signal in Signal::ALL {
            for &provider in providers(location) {
                questions.push(
                    choices(
                        QuestionKey::Signal(location, capability, signal, provider),
                        format!("{cap} - {} {}", provider.title(), signal.title()),
                        format!("{} items covered by {}:", signal.title(), provider.title()),
                        signal_items(signal, provider),
                    )
                    .activated_by(owner, ActivationRule::Affirmed),
                );
            }
        }

        for &integration in Integration::ALL {
            let key = QuestionKey::Integration(location, capability, integration);
            questions.push(
                tri(
                    key,
                    &format!("{cap} - {}", integration.title()),
                    &format!("{}?", integration.title()),
                    Section::Locations,
                )
                .required()
                .activated_by(owner, ActivationRule::Affirmed),
            );

            if integration == Integration::Stip {
                for provider in STIP_PROVIDERS {
                    questions.push(
                        choices(
                            QuestionKey::StipProvider(location, capability, provider),
                            format!("{cap} - Stip via {}", provider.title()),
                            format!("Stip integration through {}:", provider.title()),
                            &[STIP_ENABLED],
                        )
                        .activated_by(key, ActivationRule::Affirmed),
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_is_valid() {
        schema().validate().unwrap();
    }

    #[test]
    fn sensitive_fields() {
        let sensitive: Vec<String> = schema().sensitive_keys().map(|k| k.to_string()).collect();
        assert_eq!(
            sensitive,
            vec!["app_name", "role", "role_other", "nar_id", "contact_email"]
        );
    }

    #[test]
    fn required_question_count_per_location() {
        let per_location = schema()
            .questions()
            .iter()
            .filter(|q| q.is_required() && q.key().location() == Some(Location::Gcp))
            .count();
        // Four capabilities, each with four integrations.
        assert_eq!(per_location, 4 + 4 * 4);

        let global = schema()
            .questions()
            .iter()
            .filter(|q| q.is_required() && q.key().location().is_none())
            .count();
        // Six metadata fields, ten practices and three SLO details.
        assert_eq!(global, 6 + 10 + 3);
    }

    #[test]
    fn providers_follow_location() {
        let gcp_signal = QuestionKey::Signal(
            Location::Gcp,
            Capability::Apis,
            Signal::Alerting,
            Provider::CloudMonitoring,
        );
        let gcp_splunk = QuestionKey::Signal(
            Location::Gcp,
            Capability::Apis,
            Signal::Alerting,
            Provider::Splunk,
        );
        assert!(schema().contains(&gcp_signal));
        assert!(!schema().contains(&gcp_splunk));
    }

    #[test]
    fn monitoring_selections_are_optional() {
        for question in schema().questions() {
            if matches!(
                question.key(),
                QuestionKey::Signal(..) | QuestionKey::StipProvider(..) | QuestionKey::Link(_)
            ) {
                assert!(!question.is_required(), "{} is required", question.key());
            }
        }
    }
}
