use crate::QuestionKey;

/// A structural defect in a [`crate::Schema`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("Question '{0}' is declared more than once")]
    DuplicateKey(QuestionKey),

    /// The parent is missing or declared after the question that depends on it.
    #[error("Question '{key}' depends on '{parent}', which is not declared before it")]
    UndeclaredParent {
        key: QuestionKey,
        parent: QuestionKey,
    },

    #[error("Activation rule of '{key}' does not fit the kind of its parent '{parent}'")]
    RuleMismatch {
        key: QuestionKey,
        parent: QuestionKey,
    },

    #[error("Question '{key}' has an empty or delimiter-bearing option '{option}'")]
    InvalidOption { key: QuestionKey, option: String },

    #[error("Sensitive question '{0}' must hold text or a single choice")]
    SensitiveKind(QuestionKey),

    #[error("Cascade of '{key}' cannot force a value onto '{target}'")]
    CascadeTarget {
        key: QuestionKey,
        target: QuestionKey,
    },
}

/// Error type for storage boundary operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The store cannot be used at all (disabled, quota exceeded, private mode).
    #[error("Storage unavailable")]
    Unavailable,

    /// Backend-specific failure (I/O, serialization, ...).
    #[error("Storage backend error: {0}")]
    Backend(#[from] anyhow::Error),
}

impl StorageError {
    /// Create a backend error from any error type.
    pub fn backend(err: impl Into<anyhow::Error>) -> Self {
        Self::Backend(err.into())
    }

    /// Check if this error means the store is unavailable.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable)
    }
}
