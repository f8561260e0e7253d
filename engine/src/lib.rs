//! FILENAME: engine/src/lib.rs
//! Core KPI domain model.
//!
//! Layers:
//!   - record: the raw spreadsheet row and its lenient cell values
//!   - value: numeric prefix parsing shared by every consumer
//!   - percentage: achievement percentage and pass/near/fail grading
//!   - filter: the shared selection state and basic row filtering
//!   - view: the five drill-down levels
//!   - format: display formatting

pub mod filter;
pub mod format;
pub mod percentage;
pub mod record;
pub mod value;
pub mod view;

pub use filter::{apply_basic_filters, FilterState};
pub use format::{format_number, format_percentage};
pub use percentage::{absolute_status, calculate_percentage, threshold_status, ThresholdStatus};
pub use record::{KpiRecord, RawValue};
pub use view::ViewLevel;
