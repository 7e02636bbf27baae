//! # readiness
//!
//! An SRE readiness assessment. Presentation-agnostic.
//!
//! This crate holds the questionnaire and everything that turns raw stored
//! parameters into answers, progress and an export decision:
//!
//! - [`catalog`] - every question of the assessment, declared once
//! - [`codec`] - parameter sets to answers and back
//! - [`cascade`] - forced follow-up writes ("no frontend" settles its integrations)
//! - [`completeness`] - the completion percentage, cascades included
//! - [`gate`] - whether the answers may be exported
//! - [`coverage`] - monitoring and alerting coverage per capability
//! - [`Session`] - the whole loop over a pair of stores
//!
//! ## Usage
//!
//! ```rust
//! use readiness::{
//!     Capability, Location, MemoryParamStore, MemorySecureStore, QuestionKey,
//!     ReadinessConfig, Session, TriState,
//! };
//!
//! let mut session = Session::new(
//!     MemoryParamStore::new(),
//!     MemorySecureStore::new(),
//!     ReadinessConfig::default(),
//! );
//! session.set(QuestionKey::Capability(Location::Gcp, Capability::Mobile), TriState::No);
//!
//! assert!(session.check_export().is_err());
//! assert!(session.params().query().contains("loc_gcp_mobile_lisi=na"));
//! ```
//!
//! ## Presentation layers
//!
//! Front ends are separate crates:
//! - `readiness-dialoguer-wizard` - CLI prompts via dialoguer
//! - `readiness-csv` - the CSV report

// Re-export all types from readiness-types
pub use readiness_types::*;

pub mod cascade;
pub mod catalog;
pub mod codec;
pub mod completeness;
pub mod coverage;
pub mod gate;
pub mod storage;

mod config;
pub use config::{ConfigError, ReadinessConfig};

mod mail;
pub use mail::EmailDraft;

// In-memory stores for running sessions without a browser
mod memory;
pub use memory::{MemoryParamStore, MemorySecureStore};

mod session;
pub use session::Session;

pub use completeness::{Completeness, NodeState};
pub use gate::ExportBlocked;
