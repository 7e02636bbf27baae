//! # readiness-dialoguer-wizard
//!
//! Command-line wizard for the SRE readiness assessment.
//!
//! Questions are presented one at a time in the classic CLI wizard style
//! using the `dialoguer` library. Only questions that are currently relevant
//! are asked: answering "No" to a component skips its signals and settles its
//! integrations.
//!
//! ## Example
//!
//! ```rust,no_run
//! use readiness::{ReadinessConfig, Session};
//! use readiness_dialoguer_wizard::{DialoguerWizard, FileParamStore, FileSecureStore, wizard};
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut session = Session::new(
//!         FileParamStore::open("readiness.state")?,
//!         FileSecureStore::open("readiness.secure.json"),
//!         ReadinessConfig::default(),
//!     );
//!     let progress = wizard::run(&mut session, &DialoguerWizard::new())?;
//!     println!("{}% answered", progress.percent());
//!     Ok(())
//! }
//! ```

mod backend;
mod store;
pub mod wizard;

pub use backend::{DialoguerWizard, Prompter, WizardError};
pub use store::{FileParamStore, FileSecureStore};
pub use wizard::{Exported, export, run};
