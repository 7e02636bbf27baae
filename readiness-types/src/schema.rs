use std::collections::{HashMap, HashSet};

use crate::{ActivationRule, CHOICE_DELIMITER, Question, QuestionKey, QuestionKind, SchemaError};

/// The complete questionnaire: every question, its kind and its dependencies.
///
/// Questions are kept flat in declaration order. A question's parent must be
/// declared before it, so declaration order is also a depth-first walk of the
/// activation tree.
#[derive(Debug, Clone)]
pub struct Schema {
    /// Optional message shown before the questionnaire starts.
    pub prelude: Option<String>,

    questions: Vec<Question>,

    index: HashMap<QuestionKey, usize>,
}

impl Schema {
    /// Create a schema from questions in declaration order.
    ///
    /// Lookups resolve to the first declaration of a key; call
    /// [`validate`](Self::validate) to reject duplicates and other mistakes.
    pub fn new(questions: Vec<Question>) -> Self {
        let mut index = HashMap::with_capacity(questions.len());
        for (position, question) in questions.iter().enumerate() {
            index.entry(*question.key()).or_insert(position);
        }
        Self {
            prelude: None,
            questions,
            index,
        }
    }

    /// Set the prelude message.
    pub fn with_prelude(mut self, prelude: impl Into<String>) -> Self {
        self.prelude = Some(prelude.into());
        self
    }

    /// Get the questions in declaration order.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Look up a question by key.
    pub fn get(&self, key: &QuestionKey) -> Option<&Question> {
        self.index.get(key).map(|&position| &self.questions[position])
    }

    /// Check if the schema defines a key.
    pub fn contains(&self, key: &QuestionKey) -> bool {
        self.index.contains_key(key)
    }

    /// Questions whose activation names `key` as parent.
    pub fn children<'a>(&'a self, key: &'a QuestionKey) -> impl Iterator<Item = &'a Question> + 'a {
        self.questions
            .iter()
            .filter(move |q| q.activation().is_some_and(|a| &a.parent == key))
    }

    /// Whether `key` sits somewhere below `ancestor` in the activation tree.
    pub fn is_descendant(&self, key: &QuestionKey, ancestor: &QuestionKey) -> bool {
        let mut current = self.get(key);
        // Bounded so that a malformed, cyclic schema cannot loop forever.
        for _ in 0..self.questions.len() {
            let Some(parent) = current.and_then(|q| q.activation()).map(|a| a.parent) else {
                return false;
            };
            if &parent == ancestor {
                return true;
            }
            current = self.get(&parent);
        }
        false
    }

    /// Check if a key must stay out of shareable storage.
    pub fn is_sensitive(&self, key: &QuestionKey) -> bool {
        self.get(key).is_some_and(Question::is_sensitive)
    }

    /// Keys of every sensitive question.
    pub fn sensitive_keys(&self) -> impl Iterator<Item = &QuestionKey> {
        self.questions
            .iter()
            .filter(|q| q.is_sensitive())
            .map(Question::key)
    }

    /// Check the structural invariants of the schema.
    ///
    /// Keys are unique, parents are declared before their children (which
    /// makes the activation graph acyclic), activation rules match the
    /// parent's kind, option labels are free of [`CHOICE_DELIMITER`],
    /// sensitive questions hold text or a choice, and cascades only force
    /// acceptable values onto their own descendants.
    pub fn validate(&self) -> Result<(), SchemaError> {
        let mut declared = HashSet::with_capacity(self.questions.len());

        for question in &self.questions {
            let key = *question.key();

            if let Some(activation) = question.activation() {
                let parent = activation.parent;
                if !declared.contains(&parent) {
                    return Err(SchemaError::UndeclaredParent { key, parent });
                }
                let parent_kind = self.get(&parent).map(Question::kind);
                let fits = match (&activation.rule, parent_kind) {
                    (ActivationRule::Affirmed, Some(QuestionKind::TriState)) => true,
                    (ActivationRule::Equals(_), Some(QuestionKind::Choice(_))) => true,
                    _ => false,
                };
                if !fits {
                    return Err(SchemaError::RuleMismatch { key, parent });
                }
            }

            if !declared.insert(key) {
                return Err(SchemaError::DuplicateKey(key));
            }

            if let Some(options) = question.kind().options() {
                if let Some(option) = options
                    .options
                    .iter()
                    .find(|o| o.is_empty() || o.contains(CHOICE_DELIMITER))
                {
                    return Err(SchemaError::InvalidOption {
                        key,
                        option: option.clone(),
                    });
                }
            }

            if question.is_sensitive()
                && !matches!(question.kind(), QuestionKind::Text | QuestionKind::Choice(_))
            {
                return Err(SchemaError::SensitiveKind(key));
            }
        }

        for question in &self.questions {
            let Some(cascade) = question.cascade() else {
                continue;
            };
            let key = *question.key();
            for target in &cascade.targets {
                let accepted = self
                    .get(target)
                    .is_some_and(|t| t.kind().accepts(&cascade.force));
                if !accepted || !self.is_descendant(target, &key) {
                    return Err(SchemaError::CascadeTarget {
                        key,
                        target: *target,
                    });
                }
            }
        }

        Ok(())
    }

    /// Check if the schema has any questions.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Get the number of questions.
    pub fn len(&self) -> usize {
        self.questions.len()
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
