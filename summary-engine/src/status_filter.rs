//! FILENAME: summary-engine/src/status_filter.rs
//! Status-chip filtering. The chips mean something different at each
//! level: on the overview they grade whole groups, on the main view
//! whole mains, and so on down to individual rows in the detail view.

use engine::{
    absolute_status, calculate_percentage, threshold_status, FilterState, KpiRecord,
    ThresholdStatus, ViewLevel,
};
use rustc_hash::FxHashMap;

use crate::bucket::bucket_by;
use crate::rollup::mean;
use crate::summary::calculate_summary;

/// Keeps the rows whose status at the current view level is among the
/// active chips. With no chips active everything passes through.
pub fn apply_status_filter(
    view: ViewLevel,
    data: &[KpiRecord],
    filters: &FilterState,
) -> Vec<KpiRecord> {
    if filters.status_filters.is_empty() {
        return data.to_vec();
    }
    let wanted = &filters.status_filters;

    match view {
        ViewLevel::Groups => {
            let statuses = group_statuses(data);
            data.iter()
                .filter(|r| {
                    statuses
                        .get(&r.group)
                        .map(|st| wanted.contains(st))
                        .unwrap_or(false)
                })
                .cloned()
                .collect()
        }
        ViewLevel::Main => {
            let statuses = main_statuses(data);
            data.iter()
                .filter(|r| {
                    statuses
                        .get(r.main_name())
                        .map(|st| wanted.contains(st))
                        .unwrap_or(false)
                })
                .cloned()
                .collect()
        }
        ViewLevel::Sub => {
            let statuses = first_row_statuses(data, |r| r.sub_name().to_string());
            data.iter()
                .filter(|r| {
                    statuses
                        .get(r.sub_name())
                        .map(|st| wanted.contains(st))
                        .unwrap_or(false)
                })
                .cloned()
                .collect()
        }
        ViewLevel::Target => {
            let statuses = first_row_statuses(data, |r| r.target_name().to_string());
            data.iter()
                .filter(|r| {
                    statuses
                        .get(r.target_name())
                        .map(|st| wanted.contains(st))
                        .unwrap_or(false)
                })
                .cloned()
                .collect()
        }
        ViewLevel::Detail => data
            .iter()
            .filter(|r| {
                if r.result.is_blank() {
                    return false;
                }
                let Some(p) = calculate_percentage(&r.goal, &r.result) else {
                    return false;
                };
                wanted.contains(&threshold_status(Some(p), r.threshold_or_zero()))
            })
            .cloned()
            .collect(),
    }
}

/// Groups graded on the absolute scale over their summary average.
fn group_statuses(data: &[KpiRecord]) -> FxHashMap<String, ThresholdStatus> {
    let stats = calculate_summary(data);
    stats
        .group_stats
        .iter()
        .map(|(name, g)| (name.clone(), absolute_status(Some(g.average_percentage))))
        .collect()
}

/// Mains graded on the absolute scale over the mean of their subs'
/// first-row percentages.
fn main_statuses(data: &[KpiRecord]) -> FxHashMap<String, ThresholdStatus> {
    let mut out = FxHashMap::default();
    for (main_name, rows) in bucket_by(data, true, |r| r.main_name().to_string()) {
        let owned: Vec<KpiRecord> = rows.iter().map(|r| (*r).clone()).collect();
        let sub_percentages: Vec<f64> = bucket_by(&owned, false, |r| r.sub_name().to_string())
            .iter()
            .map(|(_, sub_rows)| {
                let first = sub_rows[0];
                calculate_percentage(&first.goal, &first.result).unwrap_or(0.0)
            })
            .collect();
        out.insert(main_name, absolute_status(Some(mean(&sub_percentages))));
    }
    out
}

/// Subs and targets grade their representative first row against the
/// per-KPI threshold. A blank result is graded as missing data.
fn first_row_statuses<F>(data: &[KpiRecord], key_fn: F) -> FxHashMap<String, ThresholdStatus>
where
    F: Fn(&KpiRecord) -> String,
{
    let mut out = FxHashMap::default();
    for (key, rows) in bucket_by(data, false, key_fn) {
        let first = rows[0];
        let pct = if first.result.is_blank() {
            None
        } else {
            calculate_percentage(&first.goal, &first.result)
        };
        out.insert(key, threshold_status(pct, first.threshold_or_zero()));
    }
    out
}
