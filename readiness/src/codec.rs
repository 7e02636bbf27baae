//! Conversion between the persisted parameter sets and an [`AnswerSet`].
//!
//! Decoding is total: malformed or unknown values decode to unanswered and
//! unknown parameters are ignored. Encoding routes sensitive questions to the
//! secure store and everything else to the shareable query string.

use readiness_types::{
    Answer, AnswerSet, CHOICE_DELIMITER, ParamSet, QuestionKey, QuestionKind, Schema, TriState,
};

/// Where an encoded answer must be stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// The shareable query string.
    Url,
    /// The private per-profile store.
    Secure,
}

/// A single answer in its persisted form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    pub target: Target,
    /// Parameter name, the flat form of the question key.
    pub name: String,
    /// Raw value. Empty means "remove the parameter".
    pub value: String,
}

/// Decode the answers of every schema question.
///
/// Sensitive questions are read from `secure` only; a sensitive parameter
/// that shows up in `raw` is ignored.
pub fn decode(schema: &Schema, raw: &ParamSet, secure: &ParamSet) -> AnswerSet {
    let mut answers = AnswerSet::new();
    for question in schema.questions() {
        let name = question.key().to_string();
        let source = if question.is_sensitive() { secure } else { raw };
        if let Some(value) = source.get(&name) {
            answers.set(*question.key(), decode_value(question.kind(), value));
        }
    }

    let ignored = raw
        .iter()
        .filter(|(name, _)| {
            QuestionKey::parse(name).is_none_or(|key| !schema.contains(&key) || schema.is_sensitive(&key))
        })
        .count();
    if ignored > 0 {
        tracing::trace!(ignored, "ignored parameters outside the schema");
    }

    answers
}

/// Decode one raw value for a question of the given kind.
pub fn decode_value(kind: &QuestionKind, raw: &str) -> Answer {
    match kind {
        QuestionKind::TriState => match raw {
            "1" => Answer::Tri(TriState::Yes),
            "0" => Answer::Tri(TriState::No),
            "na" => Answer::Tri(TriState::Na),
            _ => Answer::Unanswered,
        },
        QuestionKind::Text => Answer::Text(raw.to_string()),
        QuestionKind::Choice(q) => {
            if q.contains(raw) {
                Answer::Choice(raw.to_string())
            } else {
                Answer::Unanswered
            }
        }
        QuestionKind::Choices(q) => {
            let mut positions: Vec<usize> = raw
                .split(CHOICE_DELIMITER)
                .filter_map(|label| q.position(label))
                .collect();
            positions.sort_unstable();
            positions.dedup();
            Answer::Choices(positions.into_iter().map(|p| q.options[p].clone()).collect())
        }
    }
}

/// Encode one answer. Returns `None` for keys the schema does not define.
pub fn encode(schema: &Schema, key: &QuestionKey, value: &Answer) -> Option<Encoded> {
    let question = schema.get(key)?;
    Some(Encoded {
        target: if question.is_sensitive() {
            Target::Secure
        } else {
            Target::Url
        },
        name: key.to_string(),
        value: encode_value(question.kind(), value),
    })
}

/// Encode one answer for a question of the given kind.
///
/// Answers that do not fit the kind encode as the empty string, which
/// removes the parameter.
pub fn encode_value(kind: &QuestionKind, value: &Answer) -> String {
    if !kind.accepts(value) {
        return String::new();
    }
    match value {
        Answer::Unanswered => String::new(),
        Answer::Tri(TriState::Yes) => "1".to_string(),
        Answer::Tri(TriState::No) => "0".to_string(),
        Answer::Tri(TriState::Na) => "na".to_string(),
        Answer::Text(s) | Answer::Choice(s) => s.clone(),
        Answer::Choices(labels) => labels.join(&CHOICE_DELIMITER.to_string()),
    }
}

/// Encode a whole answer set into its shareable and secure parameter sets.
pub fn encode_all(schema: &Schema, answers: &AnswerSet) -> (ParamSet, ParamSet) {
    let mut url = ParamSet::new();
    let mut secure = ParamSet::new();
    for (key, value) in answers {
        let Some(encoded) = encode(schema, key, value) else {
            continue;
        };
        match encoded.target {
            Target::Url => url.set(encoded.name, encoded.value),
            Target::Secure => secure.set(encoded.name, encoded.value),
        }
    }
    (url, secure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use readiness_types::{Capability, Location, MetaField, Practice, Provider, Signal};

    fn monitoring() -> QuestionKey {
        QuestionKey::Signal(
            Location::Gcp,
            Capability::Frontend,
            Signal::Monitoring,
            Provider::NewRelic,
        )
    }

    #[test]
    fn decode_tri_states() {
        let raw = ParamSet::new()
            .with("slo_exists", "1")
            .with("dr_plan", "0")
            .with("dr_tested", "na")
            .with("bp_mttr", "yes");
        let answers = decode(catalog::schema(), &raw, &ParamSet::new());

        assert_eq!(answers.tri(Practice::SloExists), Some(TriState::Yes));
        assert_eq!(answers.tri(Practice::DrPlan), Some(TriState::No));
        assert_eq!(answers.tri(Practice::DrTested), Some(TriState::Na));
        assert_eq!(answers.tri(Practice::BpMttr), None);
    }

    #[test]
    fn decode_multi_choice_canonicalises() {
        let raw = ParamSet::new().with(
            monitoring().to_string(),
            "SYNT|APM (dashboard)|bogus|SYNT",
        );
        let answers = decode(catalog::schema(), &raw, &ParamSet::new());
        assert_eq!(answers.choices(monitoring()), ["APM (dashboard)", "SYNT"]);
    }

    #[test]
    fn decode_rejects_unknown_choice() {
        let raw = ParamSet::new()
            .with("app_type", "cobol")
            .with("loc_selected", "gcp");
        let answers = decode(catalog::schema(), &raw, &ParamSet::new());
        assert_eq!(answers.text(MetaField::AppType), "");
        assert_eq!(answers.text(MetaField::Location), "gcp");
    }

    #[test]
    fn sensitive_fields_come_from_secure_store_only() {
        let raw = ParamSet::new().with("app_name", "from-url");
        let secure = ParamSet::new().with("nar_id", "NAR-42");
        let answers = decode(catalog::schema(), &raw, &secure);

        assert_eq!(answers.text(MetaField::AppName), "");
        assert_eq!(answers.text(MetaField::NarId), "NAR-42");
    }

    #[test]
    fn encode_routes_sensitive_fields() {
        let schema = catalog::schema();
        let encoded = encode(
            schema,
            &MetaField::ContactEmail.into(),
            &Answer::Text("ops@db.com".into()),
        )
        .unwrap();
        assert_eq!(encoded.target, Target::Secure);
        assert_eq!(encoded.name, "contact_email");

        let encoded = encode(
            schema,
            &Practice::DrPlan.into(),
            &Answer::Tri(TriState::Na),
        )
        .unwrap();
        assert_eq!(encoded.target, Target::Url);
        assert_eq!(encoded.value, "na");
    }

    #[test]
    fn encode_mismatched_kind_clears() {
        let encoded = encode(
            catalog::schema(),
            &Practice::DrPlan.into(),
            &Answer::Text("1".into()),
        )
        .unwrap();
        assert_eq!(encoded.value, "");
    }

    #[test]
    fn encode_outside_schema() {
        let key = QuestionKey::Signal(
            Location::Gcp,
            Capability::Frontend,
            Signal::Monitoring,
            Provider::Splunk,
        );
        assert!(encode(catalog::schema(), &key, &Answer::Choices(vec![])).is_none());
    }

    #[test]
    fn encode_all_splits_targets() {
        let answers = AnswerSet::new()
            .with(MetaField::AppName, Answer::Text("Ledger".into()))
            .with(Practice::SloExists, TriState::No)
            .with(monitoring(), vec!["SYNT".to_string(), "Other".to_string()]);
        let (url, secure) = encode_all(catalog::schema(), &answers);

        assert_eq!(url.get("slo_exists"), Some("0"));
        assert_eq!(url.get(&monitoring().to_string()), Some("SYNT|Other"));
        assert!(!url.contains("app_name"));
        assert_eq!(secure.get("app_name"), Some("Ledger"));
    }

    #[test]
    fn empty_decode() {
        let answers = decode(catalog::schema(), &ParamSet::new(), &ParamSet::new());
        assert!(answers.is_empty());
        for question in catalog::schema().questions() {
            match question.kind() {
                QuestionKind::TriState => assert_eq!(answers.tri(*question.key()), None),
                QuestionKind::Choices(_) => assert!(answers.choices(*question.key()).is_empty()),
                _ => assert_eq!(answers.text(*question.key()), ""),
            }
        }
    }
}
