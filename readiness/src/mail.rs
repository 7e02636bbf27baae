use chrono::NaiveDate;
use readiness_types::{AnswerSet, MetaField};
use url::form_urlencoded;

use crate::ReadinessConfig;
use crate::catalog::OTHER;

const NOT_SPECIFIED: &str = "Not specified";

/// A pre-filled email announcing a finished assessment.
///
/// The exported report is never attached; the body tells the reader to
/// attach it by hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailDraft {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

impl EmailDraft {
    /// Summarise the identity answers of an assessment taken on `date`.
    pub fn compose(answers: &AnswerSet, config: &ReadinessConfig, date: NaiveDate) -> Self {
        let app = answers.text(MetaField::AppName).trim();
        let subject = format!("{} - {app}", config.report_title);

        let role = with_qualifier(
            answers.text(MetaField::Role),
            answers.text(MetaField::RoleOther),
        );
        let app_type = with_qualifier(
            answers.text(MetaField::AppType),
            answers.text(MetaField::AppTypeOther),
        );

        let lines = [
            "Dear SRE Team,".to_string(),
            String::new(),
            format!("Please find attached the {} for {app}.", config.report_title),
            String::new(),
            "Assessment Summary:".to_string(),
            format!("- Application: {}", or_unspecified(app)),
            format!("- Role: {role}"),
            format!("- NAR-ID: {}", or_unspecified(answers.text(MetaField::NarId))),
            format!(
                "- Contact Email: {}",
                or_unspecified(answers.text(MetaField::ContactEmail))
            ),
            format!("- Application Type: {app_type}"),
            format!(
                "- Location: {}",
                or_unspecified(answers.text(MetaField::Location))
            ),
            format!("- Assessment Date: {}", date.format("%Y-%m-%d")),
            String::new(),
            "The CSV file contains detailed responses to all assessment questions.".to_string(),
            "It is not attached automatically: please attach the exported file before sending."
                .to_string(),
            String::new(),
            "Best regards,".to_string(),
            format!("{} Tool", config.report_title),
        ];

        Self {
            recipient: config.recipient.clone(),
            subject,
            body: lines.join("\n"),
        }
    }

    /// The draft as a `mailto:` URI with percent-encoded subject and body.
    pub fn to_mailto_uri(&self) -> String {
        format!(
            "mailto:{}?subject={}&body={}",
            self.recipient,
            encode_component(&self.subject),
            encode_component(&self.body)
        )
    }
}

fn or_unspecified(value: &str) -> &str {
    let value = value.trim();
    if value.is_empty() { NOT_SPECIFIED } else { value }
}

fn with_qualifier(choice: &str, qualifier: &str) -> String {
    let choice_text = or_unspecified(choice);
    let qualifier = qualifier.trim();
    if choice == OTHER && !qualifier.is_empty() {
        format!("{choice_text} ({qualifier})")
    } else {
        choice_text.to_string()
    }
}

fn encode_component(text: &str) -> String {
    form_urlencoded::byte_serialize(text.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
