//! Forced follow-up writes for answers that make dependent questions moot.

use std::collections::{HashSet, VecDeque};

use readiness_types::{Answer, AnswerSet, Question, QuestionKey, Schema, Write};

/// Compute the writes that setting `key` to `value` entails.
///
/// The first write is always the primary `(key, value)`. It is followed by
/// the writes of the key's cascade rule and, transitively, of any rule fired
/// by a forced value. Each key is written at most once, and a forced write is
/// left out when `current` already holds the forced value. The caller applies
/// the whole list as a single batch.
pub fn apply(
    schema: &Schema,
    key: QuestionKey,
    value: impl Into<Answer>,
    current: &AnswerSet,
) -> Vec<Write> {
    let value = value.into();
    let mut writes = vec![Write::new(key, value.clone())];
    let mut written = HashSet::from([key]);
    let mut pending = VecDeque::from([(key, value)]);

    while let Some((owner, owner_value)) = pending.pop_front() {
        let Some(cascade) = schema.get(&owner).and_then(Question::cascade) else {
            continue;
        };
        if !cascade.fires_on(&owner_value) {
            continue;
        }
        for &target in &cascade.targets {
            if !written.insert(target) {
                continue;
            }
            if current.get(&target) != &cascade.force {
                writes.push(Write::new(target, cascade.force.clone()));
            }
            pending.push_back((target, cascade.force.clone()));
        }
    }

    if writes.len() > 1 {
        tracing::debug!(%key, forced = writes.len() - 1, "cascade fired");
    }
    writes
}
