use std::collections::BTreeMap;

use crate::{Answer, QuestionKey, TriState};

static UNANSWERED: Answer = Answer::Unanswered;

/// A single pending assignment of an answer to a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Write {
    pub key: QuestionKey,
    pub value: Answer,
}

impl Write {
    pub fn new(key: impl Into<QuestionKey>, value: impl Into<Answer>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// The answers recorded so far, keyed by question.
///
/// Only informative answers are stored: a key that is absent reads as
/// [`Answer::Unanswered`], so every question has exactly one value at all
/// times. Iteration order follows [`QuestionKey`]'s ordering, which keeps
/// everything derived from an answer set deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSet {
    values: BTreeMap<QuestionKey, Answer>,
}

impl AnswerSet {
    /// Create a new empty answer set.
    pub fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Record an answer. Recording an unanswered value forgets the key.
    pub fn set(&mut self, key: impl Into<QuestionKey>, value: impl Into<Answer>) {
        let key = key.into();
        let value = value.into();
        if value.is_unanswered() {
            self.values.remove(&key);
        } else {
            self.values.insert(key, value);
        }
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, key: impl Into<QuestionKey>, value: impl Into<Answer>) -> Self {
        self.set(key, value);
        self
    }

    /// Apply a batch of writes in order.
    pub fn apply(&mut self, writes: impl IntoIterator<Item = Write>) {
        for write in writes {
            self.set(write.key, write.value);
        }
    }

    /// Get the answer for a key.
    pub fn get(&self, key: &QuestionKey) -> &Answer {
        self.values.get(key).unwrap_or(&UNANSWERED)
    }

    /// The tri-state answer, or `None` when unanswered.
    pub fn tri(&self, key: impl Into<QuestionKey>) -> Option<TriState> {
        self.get(&key.into()).as_tri()
    }

    /// Text or choice content; empty when unanswered.
    pub fn text(&self, key: impl Into<QuestionKey>) -> &str {
        self.get(&key.into()).as_str().unwrap_or("")
    }

    /// Selected labels; empty when unanswered.
    pub fn choices(&self, key: impl Into<QuestionKey>) -> &[String] {
        self.get(&key.into()).as_choices().unwrap_or(&[])
    }

    /// Check if an informative answer exists for the key.
    pub fn contains(&self, key: &QuestionKey) -> bool {
        self.values.contains_key(key)
    }

    /// Forget the answer for a key.
    pub fn remove(&mut self, key: &QuestionKey) -> Option<Answer> {
        self.values.remove(key)
    }

    /// Get an iterator over all recorded answers.
    pub fn iter(&self) -> impl Iterator<Item = (&QuestionKey, &Answer)> {
        self.values.iter()
    }

    /// Get the number of recorded answers.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if nothing has been answered.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<'a> IntoIterator for &'a AnswerSet {
    type Item = (&'a QuestionKey, &'a Answer);
    type IntoIter = std::collections::btree_map::Iter<'a, QuestionKey, Answer>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
