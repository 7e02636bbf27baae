use std::fmt;

use readiness_types::{AnswerSet, MetaField, Schema};

use crate::ReadinessConfig;
use crate::completeness;

/// The identity fields that must be filled before anything is exported.
pub const IDENTITY_FIELDS: [MetaField; 4] = [
    MetaField::AppName,
    MetaField::Role,
    MetaField::NarId,
    MetaField::ContactEmail,
];

/// The export action is not permitted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportBlocked {
    /// Completion percentage at the time of the check.
    pub percent: u8,
    /// Every unmet item, identity fields first.
    pub missing: Vec<String>,
}

impl fmt::Display for ExportBlocked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Complete all questions to enable CSV generation ({}% answered)",
            self.percent
        )?;
        if !self.missing.is_empty() {
            write!(f, "\n\nMissing:\n• {}", self.missing.join("\n• "))?;
        }
        Ok(())
    }
}

impl std::error::Error for ExportBlocked {}

/// Check whether the answers may be exported.
///
/// Export is permitted when completion is 100%, the identity fields are
/// filled in and the contact address carries the configured domain suffix.
pub fn check_export(
    schema: &Schema,
    answers: &AnswerSet,
    config: &ReadinessConfig,
) -> Result<(), ExportBlocked> {
    let mut missing: Vec<String> = Vec::new();

    for field in IDENTITY_FIELDS {
        if answers.text(field).trim().is_empty() {
            missing.push(label(schema, field));
        }
    }

    let email = answers.text(MetaField::ContactEmail).trim();
    if !email.is_empty() && !config.accepts_email(email) {
        missing.push(format!(
            "{} (must end with {})",
            label(schema, MetaField::ContactEmail),
            config.email_domain_suffix
        ));
    }

    for item in completeness::missing(schema, answers) {
        if !missing.iter().any(|m| m == item) {
            missing.push(item.to_string());
        }
    }

    let percent = completeness::compute(schema, answers).percent();
    if percent == 100 && missing.is_empty() {
        return Ok(());
    }

    tracing::debug!(percent, unmet = missing.len(), "export blocked");
    Err(ExportBlocked { percent, missing })
}

fn label(schema: &Schema, field: MetaField) -> String {
    schema
        .get(&field.into())
        .map(|q| q.label().to_string())
        .unwrap_or_else(|| field.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use readiness_types::{Answer, Practice, TriState};

    #[test]
    fn empty_answers_list_identity_first() {
        let err = check_export(
            catalog::schema(),
            &AnswerSet::new(),
            &ReadinessConfig::default(),
        )
        .unwrap_err();
        assert_eq!(err.percent, 0);
        assert_eq!(
            &err.missing[..5],
            ["Application name", "Role", "NAR-ID", "Contact Email", "Application Type"]
        );
        // Identity items are not repeated by the completeness walk.
        assert_eq!(
            err.missing.iter().filter(|m| *m == "Application name").count(),
            1
        );
    }

    #[test]
    fn bad_email_is_reported() {
        let answers = AnswerSet::new()
            .with(MetaField::ContactEmail, Answer::Text("ops@example.com".into()));
        let err = check_export(catalog::schema(), &answers, &ReadinessConfig::default())
            .unwrap_err();
        assert!(
            err.missing
                .contains(&"Contact Email (must end with @db.com)".to_string())
        );
        assert!(!err.missing.contains(&"Contact Email".to_string()));
    }

    #[test]
    fn message_lists_items() {
        let err = ExportBlocked {
            percent: 97,
            missing: vec!["NAR-ID".into(), "MTTR tracking".into()],
        };
        assert_eq!(
            err.to_string(),
            "Complete all questions to enable CSV generation (97% answered)\n\nMissing:\n• NAR-ID\n• MTTR tracking"
        );
    }

    #[test]
    fn partial_answers_stay_blocked() {
        let answers = AnswerSet::new().with(Practice::BpMttr, TriState::Yes);
        let err = check_export(catalog::schema(), &answers, &ReadinessConfig::default())
            .unwrap_err();
        assert!(!err.missing.contains(&"MTTR tracking".to_string()));
        assert_eq!(err.percent, 5);
    }
}
