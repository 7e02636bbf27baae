use std::fmt;

/// The answer to a yes/no question that also accepts "not applicable".
///
/// "Not yet answered" is not a tri-state value; it is [`Answer::Unanswered`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TriState {
    Yes,
    No,
    Na,
}

impl TriState {
    pub const ALL: [TriState; 3] = [TriState::Yes, TriState::No, TriState::Na];

    /// Human readable form used in reports and prompts.
    pub fn label(self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
            Self::Na => "N/A",
        }
    }

    /// True for `No` and `Na`, the answers that make dependent questions moot.
    pub fn is_dismissive(self) -> bool {
        !matches!(self, Self::Yes)
    }
}

impl fmt::Display for TriState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The current value of a single question.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Answer {
    /// Nothing has been recorded yet.
    #[default]
    Unanswered,

    /// Yes, no or not applicable.
    Tri(TriState),

    /// Free text.
    Text(String),

    /// One label out of an option set.
    Choice(String),

    /// Any number of labels out of an option set.
    Choices(Vec<String>),
}

impl Answer {
    /// True when the answer carries no information.
    ///
    /// Empty text, an empty choice and an empty selection are all unanswered.
    pub fn is_unanswered(&self) -> bool {
        match self {
            Self::Unanswered => true,
            Self::Tri(_) => false,
            Self::Text(s) | Self::Choice(s) => s.is_empty(),
            Self::Choices(items) => items.is_empty(),
        }
    }

    /// Try to get this answer as a tri-state.
    pub fn as_tri(&self) -> Option<TriState> {
        match self {
            Self::Tri(t) => Some(*t),
            _ => None,
        }
    }

    /// Text or choice content, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) | Self::Choice(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this answer as a list of selected labels.
    pub fn as_choices(&self) -> Option<&[String]> {
        match self {
            Self::Choices(items) => Some(items),
            _ => None,
        }
    }
}

impl From<TriState> for Answer {
    fn from(t: TriState) -> Self {
        Self::Tri(t)
    }
}

impl From<Vec<String>> for Answer {
    fn from(items: Vec<String>) -> Self {
        Self::Choices(items)
    }
}
