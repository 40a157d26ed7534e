//! Core types and reconciliation logic for the revops daily report.
//!
//! This crate holds the parts with actual decision logic, kept free of I/O:
//! - `classify`: calendar events → per-setter daily metrics
//! - `sheet`: semi-structured grid → typed, gap-aware daily records
//! - `report`: consolidated output documents
//!
//! Network fetches, configuration files and output formatting live in
//! revops-cli.

pub mod classify;
pub mod config;
pub mod error;
pub mod event;
pub mod ics;
pub mod report;
pub mod setter;
pub mod sheet;

pub use classify::{Classifier, DayMetrics, SetterDailyMetrics};
pub use error::{RevopsError, RevopsResult};
pub use event::{ClassifiedEvent, EventStart, RawEvent};
pub use report::{ConsolidatedOutput, DailyRecord, ExtractSnapshot};
pub use setter::Setter;
pub use sheet::SheetGrid;
