use crate::{Answer, QuestionKey, TriState};

/// The delimiter joining multi-choice labels in their persisted form.
///
/// Option labels must never contain it; [`crate::Schema::validate`] checks this.
pub const CHOICE_DELIMITER: char = '|';

/// A single question in the questionnaire.
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    /// Identifies the question and its persisted parameter.
    key: QuestionKey,

    /// Short name used in progress lists and reports.
    label: String,

    /// The prompt text shown to the user.
    ask: String,

    /// The kind of answer expected.
    kind: QuestionKind,

    /// When the question becomes relevant, relative to its parent.
    activation: Option<Activation>,

    /// Values forced onto descendants when this question takes a given value.
    cascade: Option<Cascade>,

    /// Whether the question counts toward completeness.
    required: bool,

    /// Whether the answer must stay out of shareable storage.
    sensitive: bool,

    /// The report section the question belongs to.
    section: Section,
}

impl Question {
    /// Create an optional, unconditional question.
    pub fn new(
        key: impl Into<QuestionKey>,
        label: impl Into<String>,
        ask: impl Into<String>,
        kind: QuestionKind,
        section: Section,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            ask: ask.into(),
            kind,
            activation: None,
            cascade: None,
            required: false,
            sensitive: false,
            section,
        }
    }

    /// Mark the question as counting toward completeness.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Mark the answer as sensitive.
    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    /// Make the question depend on a parent question.
    pub fn activated_by(mut self, parent: impl Into<QuestionKey>, rule: ActivationRule) -> Self {
        self.activation = Some(Activation {
            parent: parent.into(),
            rule,
        });
        self
    }

    /// Attach a cascade rule.
    pub fn cascades(mut self, cascade: Cascade) -> Self {
        self.cascade = Some(cascade);
        self
    }

    pub fn key(&self) -> &QuestionKey {
        &self.key
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn ask(&self) -> &str {
        &self.ask
    }

    pub fn kind(&self) -> &QuestionKind {
        &self.kind
    }

    pub fn activation(&self) -> Option<&Activation> {
        self.activation.as_ref()
    }

    pub fn cascade(&self) -> Option<&Cascade> {
        self.cascade.as_ref()
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn is_sensitive(&self) -> bool {
        self.sensitive
    }

    pub fn section(&self) -> Section {
        self.section
    }
}

/// The kind of answer a question takes.
#[derive(Debug, Clone, PartialEq)]
pub enum QuestionKind {
    /// Yes, no or not applicable.
    TriState,

    /// Free text.
    Text,

    /// Exactly one label out of `options`.
    Choice(ChoiceQuestion),

    /// Any number of labels out of `options`.
    Choices(ChoiceQuestion),
}

impl QuestionKind {
    /// Check whether an answer has the shape this kind expects.
    ///
    /// Unanswered fits every kind; choice labels must come from the option set.
    pub fn accepts(&self, answer: &Answer) -> bool {
        match (self, answer) {
            (_, Answer::Unanswered) => true,
            (Self::TriState, Answer::Tri(_)) => true,
            (Self::Text, Answer::Text(_)) => true,
            (Self::Choice(q), Answer::Choice(label)) => label.is_empty() || q.contains(label),
            (Self::Choices(q), Answer::Choices(labels)) => labels.iter().all(|l| q.contains(l)),
            _ => false,
        }
    }

    /// The option set of a choice kind.
    pub fn options(&self) -> Option<&ChoiceQuestion> {
        match self {
            Self::Choice(q) | Self::Choices(q) => Some(q),
            _ => None,
        }
    }
}

/// The option set of a single- or multi-choice question.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceQuestion {
    /// Option labels, in display order. The order is also the canonical
    /// order of persisted selections.
    pub options: Vec<String>,
}

impl ChoiceQuestion {
    pub fn new<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            options: options.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, label: &str) -> bool {
        self.options.iter().any(|o| o == label)
    }

    /// Position of a label in the option list.
    pub fn position(&self, label: &str) -> Option<usize> {
        self.options.iter().position(|o| o == label)
    }
}

/// A dependency of a question on its parent's answer.
#[derive(Debug, Clone, PartialEq)]
pub struct Activation {
    pub parent: QuestionKey,
    pub rule: ActivationRule,
}

/// How a parent's answer governs a dependent question.
#[derive(Debug, Clone, PartialEq)]
pub enum ActivationRule {
    /// Relevant when the parent tri-state is yes. A parent answered no or
    /// not-applicable settles the question automatically.
    Affirmed,

    /// Relevant only while the parent choice equals this label. Otherwise
    /// the question and its subtree drop out of the questionnaire.
    Equals(String),
}

/// A value forced onto dependent questions when the owner takes a given value.
#[derive(Debug, Clone, PartialEq)]
pub struct Cascade {
    pub trigger: CascadeTrigger,
    pub force: Answer,
    pub targets: Vec<QuestionKey>,
}

impl Cascade {
    pub fn new(trigger: CascadeTrigger, force: impl Into<Answer>, targets: Vec<QuestionKey>) -> Self {
        Self {
            trigger,
            force: force.into(),
            targets,
        }
    }

    /// Whether the owner taking `value` fires this cascade.
    pub fn fires_on(&self, value: &Answer) -> bool {
        match self.trigger {
            CascadeTrigger::Is(t) => value.as_tri() == Some(t),
            CascadeTrigger::IsNot(t) => value.as_tri() != Some(t),
        }
    }
}

/// The owner value that fires a cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CascadeTrigger {
    Is(TriState),
    IsNot(TriState),
}

/// Report sections, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Section {
    Metadata,
    SloSla,
    DisasterRecovery,
    BestPractices,
    Locations,
    Notes,
}

impl Section {
    pub fn title(self) -> &'static str {
        match self {
            Self::Metadata => "Metadata",
            Self::SloSla => "SLO/SLA",
            Self::DisasterRecovery => "Disaster Recovery",
            Self::BestPractices => "Best Practices",
            Self::Locations => "Locations",
            Self::Notes => "Notes",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_accept_matching_answers() {
        let choice = QuestionKind::Choice(ChoiceQuestion::new(["java", "other"]));
        assert!(choice.accepts(&Answer::Choice("java".into())));
        assert!(!choice.accepts(&Answer::Choice("cobol".into())));
        assert!(!choice.accepts(&Answer::Text("java".into())));
        assert!(choice.accepts(&Answer::Unanswered));

        let many = QuestionKind::Choices(ChoiceQuestion::new(["a", "b"]));
        assert!(many.accepts(&Answer::Choices(vec!["b".into(), "a".into()])));
        assert!(!many.accepts(&Answer::Choices(vec!["c".into()])));

        assert!(QuestionKind::TriState.accepts(&Answer::Tri(TriState::Na)));
        assert!(!QuestionKind::TriState.accepts(&Answer::Text("1".into())));
    }

    #[test]
    fn cascade_triggers() {
        let on_no = Cascade::new(CascadeTrigger::Is(TriState::No), TriState::Na, Vec::new());
        assert!(on_no.fires_on(&Answer::Tri(TriState::No)));
        assert!(!on_no.fires_on(&Answer::Tri(TriState::Na)));
        assert!(!on_no.fires_on(&Answer::Unanswered));

        let unless_yes = Cascade::new(
            CascadeTrigger::IsNot(TriState::Yes),
            Answer::Unanswered,
            Vec::new(),
        );
        assert!(unless_yes.fires_on(&Answer::Tri(TriState::No)));
        assert!(unless_yes.fires_on(&Answer::Unanswered));
        assert!(!unless_yes.fires_on(&Answer::Tri(TriState::Yes)));
    }
}
