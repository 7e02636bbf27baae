//! CSV report for readiness: turns a finished assessment into a spreadsheet.
//!
//! ```rust
//! use chrono::NaiveDate;
//! use readiness::{AnswerSet, Practice, TriState, catalog};
//!
//! let answers = AnswerSet::new().with(Practice::BpMttr, TriState::Na);
//! let csv = readiness_csv::to_csv(catalog::schema(), &answers);
//! assert!(csv.contains("\"MTTR Tracked\",\"N/A\""));
//!
//! let date = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
//! assert_eq!(
//!     readiness_csv::export_file_name("Ledger v2", date),
//!     "sre-readiness-Ledger-v2-2025-01-31.csv"
//! );
//! ```

mod generator;

pub use generator::{escape_cell, export_file_name, to_csv};
