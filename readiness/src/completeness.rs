//! Progress accounting over the question tree.
//!
//! The walk follows the same activation rules the cascade engine enforces: a
//! question whose governing tri-state is "no" or "not applicable" counts as
//! answered whatever its stored value, because the cascade is defined to have
//! settled it. Questions under a location that is not selected drop out
//! entirely.

use std::collections::HashMap;

use readiness_types::{
    ActivationRule, AnswerSet, Question, QuestionKey, QuestionKind, Schema, TriState,
};

/// How a question participates in the questionnaire, given the answers so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    /// Shown and evaluated on its own value.
    Live,
    /// Its governing answer is still missing; counted, never answered.
    Pending,
    /// Settled by a dismissive governing answer; counted as answered.
    AutoAnswered,
    /// Out of the questionnaire; not counted at all.
    Irrelevant,
}

impl NodeState {
    /// Whether a presentation layer should ask this question.
    pub fn is_visible(self) -> bool {
        matches!(self, Self::Live)
    }
}

/// Answered and total counts of required questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Completeness {
    pub answered: usize,
    pub total: usize,
}

impl Completeness {
    /// `round(100 * answered / total)`, or 0 for an empty questionnaire.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        // Integer round-half-up of answered / total.
        let rounded = (200 * self.answered + self.total) / (2 * self.total);
        rounded.min(100) as u8
    }

    pub fn is_complete(&self) -> bool {
        self.percent() == 100
    }
}

/// Compute the state of every question in declaration order.
pub fn node_states(schema: &Schema, answers: &AnswerSet) -> HashMap<QuestionKey, NodeState> {
    let mut states = HashMap::with_capacity(schema.len());
    for question in schema.questions() {
        let state = own_state(question, answers, &states);
        states.entry(*question.key()).or_insert(state);
    }
    states
}

/// The state of a single question.
pub fn node_state(schema: &Schema, answers: &AnswerSet, key: &QuestionKey) -> NodeState {
    node_states(schema, answers)
        .get(key)
        .copied()
        .unwrap_or(NodeState::Irrelevant)
}

fn own_state(
    question: &Question,
    answers: &AnswerSet,
    states: &HashMap<QuestionKey, NodeState>,
) -> NodeState {
    let Some(activation) = question.activation() else {
        return NodeState::Live;
    };
    let parent = activation.parent;
    match states.get(&parent).copied().unwrap_or(NodeState::Irrelevant) {
        NodeState::Live => match &activation.rule {
            ActivationRule::Affirmed => match answers.tri(parent) {
                Some(TriState::Yes) => NodeState::Live,
                Some(TriState::No | TriState::Na) => NodeState::AutoAnswered,
                None => NodeState::Pending,
            },
            ActivationRule::Equals(value) => {
                if answers.text(parent) == value {
                    NodeState::Live
                } else {
                    NodeState::Irrelevant
                }
            }
        },
        inherited => inherited,
    }
}

fn has_value(question: &Question, answers: &AnswerSet) -> bool {
    let key = *question.key();
    match question.kind() {
        QuestionKind::TriState => answers.tri(key).is_some(),
        QuestionKind::Text => !answers.text(key).trim().is_empty(),
        QuestionKind::Choice(_) => !answers.text(key).is_empty(),
        QuestionKind::Choices(_) => !answers.choices(key).is_empty(),
    }
}

/// Walk the required questions, yielding each counted one with its answered flag.
fn counted<'a>(
    schema: &'a Schema,
    answers: &'a AnswerSet,
) -> impl Iterator<Item = (&'a Question, bool)> + 'a {
    let states = node_states(schema, answers);
    schema
        .questions()
        .iter()
        .filter(|q| q.is_required())
        .filter_map(move |question| match states.get(question.key()) {
            Some(NodeState::Live) => Some((question, has_value(question, answers))),
            Some(NodeState::AutoAnswered) => Some((question, true)),
            Some(NodeState::Pending) => Some((question, false)),
            Some(NodeState::Irrelevant) | None => None,
        })
}

/// Count answered and total required questions.
pub fn compute(schema: &Schema, answers: &AnswerSet) -> Completeness {
    counted(schema, answers).fold(Completeness::default(), |mut acc, (_, answered)| {
        acc.total += 1;
        if answered {
            acc.answered += 1;
        }
        acc
    })
}

/// Labels of the counted questions that are still unanswered, in order.
pub fn missing<'a>(schema: &'a Schema, answers: &'a AnswerSet) -> Vec<&'a str> {
    counted(schema, answers)
        .filter(|(_, answered)| !answered)
        .map(|(question, _)| question.label())
        .collect()
}

/// Keys of the counted questions that are still unanswered, in order.
pub fn missing_keys(schema: &Schema, answers: &AnswerSet) -> Vec<QuestionKey> {
    counted(schema, answers)
        .filter(|(_, answered)| !answered)
        .map(|(question, _)| *question.key())
        .collect()
}
