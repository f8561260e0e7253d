//! FILENAME: navigation/src/lib.rs
//! Navigation state machine for the KPI dashboard.
//!
//! Layers:
//!   - machine: drill-down selections, smart level skipping, back
//!     navigation
//!   - sync: the URL synchronisation state machine
//!   - icon: group icon assignment

pub mod icon;
pub mod machine;
pub mod sync;

pub use icon::{assign_icon, GroupIcon, IconAssignments};
pub use machine::{
    derive_back_level_from_detail, derive_back_level_from_target, BackLevel, NavigationState,
};
pub use sync::{SyncAction, SyncPhase, UrlSync, PUSH_DEBOUNCE_MS};
