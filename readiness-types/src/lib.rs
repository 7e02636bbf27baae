//! Core types for the SRE readiness questionnaire.
//!
//! This crate provides the presentation-agnostic building blocks:
//! - `QuestionKey` and its segments - typed identifiers with a flat string form
//! - `Answer`, `TriState` and `AnswerSet` - the working form of the answers
//! - `Question` and `Schema` - the question tree, its activation and cascade rules
//! - `ParamSet`, `ParamStore` and `SecureStore` - the persisted form and its stores

mod question_key;
pub use question_key::{
    Capability, Integration, Location, MetaField, Practice, Provider, QuestionKey, Signal,
    SloDetail,
};

mod answer;
pub use answer::{Answer, TriState};

mod answer_set;
pub use answer_set::{AnswerSet, Write};

mod question;
pub use question::{
    Activation, ActivationRule, CHOICE_DELIMITER, Cascade, CascadeTrigger, ChoiceQuestion,
    Question, QuestionKind, Section,
};

mod schema;
pub use schema::Schema;

mod param_set;
pub use param_set::ParamSet;

mod error;
pub use error::{SchemaError, StorageError};

mod traits;
pub use traits::{ParamStore, SecureStore};
