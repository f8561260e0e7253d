//! FILENAME: summary-engine/src/lib.rs
//! Aggregation over KPI records.
//!
//! Layers:
//!   - bucket: order-preserving grouping primitives
//!   - rollup: sub / main / group equal-weight averages
//!   - summary: whole-dataset pass counts and group stats
//!   - view_context: the per-view header aggregates
//!   - status_filter: view-dependent status-chip filtering

pub mod bucket;
pub mod rollup;
pub mod status_filter;
pub mod summary;
pub mod view_context;

pub use bucket::{bucket_by, distinct_nonblank};
pub use rollup::{
    group_overview_by_main, main_stats, mains_in_group, sub_stats, GroupOverview,
    MainIndicatorStats, SubIndicatorStats,
};
pub use status_filter::apply_status_filter;
pub use summary::{calculate_summary, GroupStat, SummaryStats};
pub use view_context::{view_context, ViewContext};
