use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use readiness::{
    Answer, AnswerSet, Completeness, EmailDraft, MetaField, ParamStore, Question, QuestionKey,
    QuestionKind, ReadinessConfig, SecureStore, Section, Session, completeness,
};

use crate::{Prompter, WizardError};

/// Walk the questionnaire, asking every question that is currently relevant.
///
/// Each answer goes through the session as soon as it is given, so its
/// cascades apply before the next question is considered and an interrupted
/// walk keeps everything answered so far. Questions that were already
/// answered are asked again with their answer as the default.
pub fn run<P: ParamStore, S: SecureStore>(
    session: &mut Session<P, S>,
    prompter: &impl Prompter,
) -> Result<Completeness, WizardError> {
    let schema = session.schema();
    if let Some(prelude) = &schema.prelude {
        prompter.note(prelude);
    }

    let mut section: Option<Section> = None;
    for question in schema.questions() {
        let key = *question.key();
        let answers = session.answers();
        if !completeness::node_state(schema, &answers, &key).is_visible() {
            continue;
        }

        if section != Some(question.section()) {
            section = Some(question.section());
            prompter.note(&format!(
                "\n== {} ({}% answered) ==",
                question.section().title(),
                session.progress().percent()
            ));
        }

        let value = ask(prompter, question, &answers, session.config())?;
        session.set(key, value);

        let progress = session.progress();
        tracing::debug!(%key, percent = progress.percent(), "answered");
    }

    let progress = session.progress();
    prompter.note(&format!(
        "\n{}% answered ({} of {})",
        progress.percent(),
        progress.answered,
        progress.total
    ));
    Ok(progress)
}

fn ask(
    prompter: &impl Prompter,
    question: &Question,
    answers: &AnswerSet,
    config: &ReadinessConfig,
) -> Result<Answer, WizardError> {
    let key = *question.key();
    let prompt = question.ask();

    match question.kind() {
        QuestionKind::TriState => prompter.tri(prompt, answers.tri(key)).map(Answer::Tri),

        QuestionKind::Text => loop {
            let value = prompter.text(prompt, answers.text(key), question.is_required())?;
            let value = value.trim().to_string();
            if let Err(msg) = validate(key, &value, config) {
                prompter.note(&format!("Error: {msg}"));
                continue;
            }
            break Ok(Answer::Text(value));
        },

        QuestionKind::Choice(q) => {
            let idx = prompter.choice(prompt, &q.options, q.position(answers.text(key)))?;
            Ok(q.options
                .get(idx)
                .cloned()
                .map_or(Answer::Unanswered, Answer::Choice))
        }

        QuestionKind::Choices(q) => {
            let selected = answers.choices(key);
            let defaults: Vec<bool> = q.options.iter().map(|o| selected.contains(o)).collect();
            let mut picked = prompter.choices(prompt, &q.options, &defaults)?;
            picked.sort_unstable();
            picked.dedup();
            Ok(Answer::Choices(
                picked
                    .into_iter()
                    .filter_map(|i| q.options.get(i).cloned())
                    .collect(),
            ))
        }
    }
}

fn validate(key: QuestionKey, value: &str, config: &ReadinessConfig) -> Result<(), String> {
    if key == QuestionKey::Meta(MetaField::ContactEmail)
        && !value.is_empty()
        && !config.accepts_email(value)
    {
        return Err(format!(
            "Contact Email must end with {}",
            config.email_domain_suffix
        ));
    }
    Ok(())
}

/// A written report and the email announcing it.
#[derive(Debug, Clone)]
pub struct Exported {
    pub path: PathBuf,
    pub draft: EmailDraft,
}

/// Write the CSV report into `out_dir` and compose the email draft.
///
/// Nothing is written unless the export gate passes. The answers are never
/// modified.
pub fn export<P: ParamStore, S: SecureStore>(
    session: &Session<P, S>,
    out_dir: &Path,
    date: NaiveDate,
) -> Result<Exported, WizardError> {
    session.check_export()?;

    let answers = session.answers();
    let csv = readiness_csv::to_csv(session.schema(), &answers);
    let path = out_dir.join(readiness_csv::export_file_name(
        answers.text(MetaField::AppName),
        date,
    ));
    std::fs::write(&path, csv).map_err(|source| WizardError::Write {
        path: path.clone(),
        source,
    })?;
    tracing::info!(path = %path.display(), "report written");

    Ok(Exported {
        path,
        draft: EmailDraft::compose(&answers, session.config(), date),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_validation() {
        let config = ReadinessConfig::default();
        let email = QuestionKey::Meta(MetaField::ContactEmail);
        assert!(validate(email, "ops@db.com", &config).is_ok());
        assert!(validate(email, "", &config).is_ok());
        assert_eq!(
            validate(email, "ops@gmail.com", &config).unwrap_err(),
            "Contact Email must end with @db.com"
        );
        assert!(validate(MetaField::NarId.into(), "ops@gmail.com", &config).is_ok());
    }
}
