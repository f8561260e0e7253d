//! FILENAME: summary-engine/src/summary.rs
//! Whole-dataset summary: per-KPI pass counts and group rollups.
//!
//! A "KPI" here is one logical indicator series, identified by the
//! sheet's kpi_info_id when present, otherwise by the composite of
//! main, sub and target columns. Rows of the same KPI across service
//! units are averaged before grading.

use std::collections::BTreeMap;

use engine::{calculate_percentage, KpiRecord};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::rollup::mean;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupStat {
    pub passed: usize,
    pub failed: usize,
    pub total: usize,
    pub average_percentage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    pub total_kpis: usize,
    pub passed_kpis: usize,
    pub failed_kpis: usize,
    pub average_percentage: f64,
    /// Keyed by the verbatim group column value.
    pub group_stats: BTreeMap<String, GroupStat>,
}

struct KpiBucket {
    group: String,
    threshold: f64,
    percentages: Vec<f64>,
}

fn kpi_key(r: &KpiRecord) -> String {
    if !r.kpi_info_id.is_empty() {
        r.kpi_info_id.clone()
    } else {
        format!(
            "{}|{}|{}",
            r.main_indicator, r.sub_indicator, r.target_population
        )
    }
}

/// Summarises a dataset. Each KPI contributes one equal-weight unit
/// to both the global and the per-group counters. Rows with no
/// computable percentage are ignored, so a KPI whose rows are all
/// empty never enters the counters at all and its group gets no
/// `group_stats` entry.
pub fn calculate_summary(data: &[KpiRecord]) -> SummaryStats {
    let mut order: Vec<KpiBucket> = Vec::new();
    let mut index: FxHashMap<String, usize> = FxHashMap::default();

    for r in data {
        let p = match calculate_percentage(&r.goal, &r.result) {
            Some(p) => p,
            None => continue,
        };
        let key = kpi_key(r);
        let i = match index.get(&key) {
            Some(&i) => i,
            None => {
                index.insert(key, order.len());
                order.push(KpiBucket {
                    group: r.group.clone(),
                    threshold: r.threshold_or_zero(),
                    percentages: Vec::new(),
                });
                order.len() - 1
            }
        };
        order[i].percentages.push(p);
    }

    let mut stats = SummaryStats::default();
    let mut kpi_averages: Vec<f64> = Vec::with_capacity(order.len());

    for kpi in &order {
        let avg = mean(&kpi.percentages);
        let passed = avg >= kpi.threshold;
        kpi_averages.push(avg);

        stats.total_kpis += 1;
        if passed {
            stats.passed_kpis += 1;
        } else {
            stats.failed_kpis += 1;
        }

        let entry = stats.group_stats.entry(kpi.group.clone()).or_default();
        entry.total += 1;
        if passed {
            entry.passed += 1;
        } else {
            entry.failed += 1;
        }
        // Accumulate a running sum; normalised after the loop.
        entry.average_percentage += avg;
    }

    for entry in stats.group_stats.values_mut() {
        if entry.total > 0 {
            entry.average_percentage /= entry.total as f64;
        }
    }
    stats.average_percentage = mean(&kpi_averages);
    stats
}
