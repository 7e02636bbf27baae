use readiness_types::{
    Answer, AnswerSet, ParamSet, ParamStore, QuestionKey, QuestionKind, Schema, SecureStore, Write,
};

use crate::codec::{self, Target};
use crate::completeness::{self, Completeness, NodeState};
use crate::gate::{self, ExportBlocked};
use crate::{ReadinessConfig, cascade, catalog, storage};

/// A running questionnaire over a pair of stores.
///
/// The session keeps no answers of its own: every read decodes the stores
/// afresh, and every write goes through them. This makes the stores the
/// single source of truth, the way a page URL is for the web form.
pub struct Session<P, S> {
    schema: &'static Schema,
    params: P,
    secure: S,
    config: ReadinessConfig,
}

impl<P: ParamStore, S: SecureStore> Session<P, S> {
    /// Create a session over the SRE readiness catalog.
    pub fn new(params: P, secure: S, config: ReadinessConfig) -> Self {
        Self {
            schema: catalog::schema(),
            params,
            secure,
            config,
        }
    }

    pub fn schema(&self) -> &'static Schema {
        self.schema
    }

    pub fn config(&self) -> &ReadinessConfig {
        &self.config
    }

    pub fn params(&self) -> &P {
        &self.params
    }

    pub fn secure(&self) -> &S {
        &self.secure
    }

    /// Give back the stores.
    pub fn into_parts(self) -> (P, S) {
        (self.params, self.secure)
    }

    /// Decode the current answers from both stores.
    pub fn answers(&self) -> AnswerSet {
        let secure = storage::read_secure(&self.secure, self.schema, &self.config);
        codec::decode(self.schema, &self.params.read(), &secure)
    }

    /// Record an answer and everything it cascades to.
    ///
    /// Returns the writes that were applied, primary write first. Keys the
    /// questionnaire does not define are ignored.
    pub fn set(&mut self, key: impl Into<QuestionKey>, value: impl Into<Answer>) -> Vec<Write> {
        let key = key.into();
        if !self.schema.contains(&key) {
            tracing::debug!(%key, "ignoring write to an undefined question");
            return Vec::new();
        }

        let current = self.answers();
        let writes = cascade::apply(self.schema, key, value, &current);

        let mut raw = self.params.read();
        for write in &writes {
            let Some(encoded) = codec::encode(self.schema, &write.key, &write.value) else {
                continue;
            };
            match encoded.target {
                Target::Url => raw.set(encoded.name, encoded.value),
                Target::Secure => {
                    storage::write_secure(
                        &mut self.secure,
                        &self.config,
                        &encoded.name,
                        &encoded.value,
                    );
                }
            }
        }
        self.strip_sensitive(&mut raw);
        self.params.write(raw);

        tracing::trace!(%key, writes = writes.len(), "answer recorded");
        writes
    }

    /// Flip one option of a multi-choice question.
    ///
    /// Labels that are not options of the question are ignored.
    pub fn toggle_choice(&mut self, key: impl Into<QuestionKey>, label: &str) -> Vec<Write> {
        let key = key.into();
        let Some(QuestionKind::Choices(options)) = self.schema.get(&key).map(|q| q.kind()) else {
            return Vec::new();
        };
        if !options.contains(label) {
            return Vec::new();
        }

        let answers = self.answers();
        let selected = answers.choices(key);
        let toggled: Vec<String> = options
            .options
            .iter()
            .filter(|option| {
                let chosen = selected.iter().any(|s| s == *option);
                if option.as_str() == label { !chosen } else { chosen }
            })
            .cloned()
            .collect();
        self.set(key, toggled)
    }

    /// The completion figures of the current answers.
    pub fn progress(&self) -> Completeness {
        completeness::compute(self.schema, &self.answers())
    }

    /// Labels of the required questions still waiting for an answer.
    pub fn missing(&self) -> Vec<String> {
        completeness::missing(self.schema, &self.answers())
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Whether a question should currently be asked.
    pub fn node_state(&self, key: &QuestionKey) -> NodeState {
        completeness::node_state(self.schema, &self.answers(), key)
    }

    /// Check the export gate.
    pub fn check_export(&self) -> Result<(), ExportBlocked> {
        gate::check_export(self.schema, &self.answers(), &self.config)
    }

    /// The query string that can be shared, free of sensitive fields.
    pub fn shareable_query(&self) -> String {
        let mut raw = self.params.read();
        self.strip_sensitive(&mut raw);
        storage::to_query(&raw)
    }

    /// Forget every answer, shareable and sensitive.
    pub fn reset(&mut self) {
        self.params.write(ParamSet::new());
        for key in self.schema.sensitive_keys() {
            storage::write_secure(&mut self.secure, &self.config, &key.to_string(), "");
        }
        tracing::debug!("session reset");
    }

    fn strip_sensitive(&self, raw: &mut ParamSet) {
        for key in self.schema.sensitive_keys() {
            raw.remove(&key.to_string());
        }
    }
}
