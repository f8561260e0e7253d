//! FILENAME: summary-engine/src/view_context.rs
//! The header strip shown above each view: how many items, how many
//! pass, and the equal-weight average at that level.

use engine::{
    absolute_status, calculate_percentage, FilterState, KpiRecord, ThresholdStatus, ViewLevel,
};

use crate::bucket::bucket_by;
use crate::rollup::{main_stats, mains_in_group, mean, sub_stats};
use crate::summary::calculate_summary;

#[derive(Debug, Clone, PartialEq)]
pub struct ViewContext {
    pub average: f64,
    pub passed: usize,
    pub total: usize,
    /// Thai unit noun for the items counted at this level.
    pub unit_label: &'static str,
}

/// Context aggregates for the current view. `data` is expected to be
/// the basic-filtered dataset; the selections drive the extra scoping
/// each level needs.
pub fn view_context(view: ViewLevel, data: &[KpiRecord], filters: &FilterState) -> ViewContext {
    match view {
        ViewLevel::Groups => groups_context(data),
        ViewLevel::Main => main_context(data, filters),
        ViewLevel::Sub => sub_context(data, filters),
        ViewLevel::Target => target_context(data, filters),
        ViewLevel::Detail => detail_context(data),
    }
}

fn groups_context(data: &[KpiRecord]) -> ViewContext {
    let stats = calculate_summary(data);
    let averages: Vec<f64> = stats
        .group_stats
        .values()
        .map(|g| g.average_percentage)
        .collect();
    let passed = averages
        .iter()
        .filter(|&&a| absolute_status(Some(a)) == ThresholdStatus::Passed)
        .count();
    ViewContext {
        average: mean(&averages),
        passed,
        total: averages.len(),
        unit_label: "ประเด็นขับเคลื่อนหลัก",
    }
}

fn main_context(data: &[KpiRecord], filters: &FilterState) -> ViewContext {
    let mains = mains_in_group(data, &filters.selected_group);
    let averages: Vec<f64> = mains.iter().map(|m| m.average).collect();
    ViewContext {
        average: mean(&averages),
        passed: mains.iter().filter(|m| m.passed_guarded()).count(),
        total: mains.len(),
        unit_label: "ตัวชี้วัดหลัก",
    }
}

fn sub_context(data: &[KpiRecord], filters: &FilterState) -> ViewContext {
    let scoped: Vec<KpiRecord> = data
        .iter()
        .filter(|r| r.group == filters.selected_group && r.main_name() == filters.selected_main_kpi)
        .cloned()
        .collect();
    let m = main_stats(&filters.selected_main_kpi, &scoped);
    ViewContext {
        average: m.average,
        passed: m.subs.iter().filter(|s| s.passed()).count(),
        total: m.subs.len(),
        unit_label: "ตัวชี้วัดย่อย",
    }
}

fn target_context(data: &[KpiRecord], filters: &FilterState) -> ViewContext {
    let scoped: Vec<KpiRecord> = data
        .iter()
        .filter(|r| {
            r.group == filters.selected_group
                && r.main_name() == filters.selected_main_kpi
                && (filters.selected_sub_kpi.is_empty()
                    || r.sub_name() == filters.selected_sub_kpi)
        })
        .cloned()
        .collect();
    // Rows with no target form their own unnamed bucket and count.
    let targets = bucket_by(&scoped, false, |r| r.target_name().to_string());
    let stats: Vec<_> = targets
        .iter()
        .map(|(name, rows)| sub_stats(name, rows))
        .collect();
    let averages: Vec<f64> = stats.iter().map(|t| t.average).collect();
    ViewContext {
        average: mean(&averages),
        passed: stats.iter().filter(|t| t.passed()).count(),
        total: stats.len(),
        unit_label: "กลุ่มเป้าหมาย",
    }
}

fn detail_context(data: &[KpiRecord]) -> ViewContext {
    // Only rows with an actual result count here; a blank result would
    // otherwise compute to 0 and drag the average down. The pass check
    // is the raw threshold compare, a blank threshold parses to 0.
    let mut valid: Vec<f64> = Vec::new();
    let mut passed = 0;
    for r in data {
        if r.result.is_blank() {
            continue;
        }
        if let Some(p) = calculate_percentage(&r.goal, &r.result) {
            valid.push(p);
            if p >= r.threshold_or_zero() {
                passed += 1;
            }
        }
    }
    ViewContext {
        average: mean(&valid),
        passed,
        total: valid.len(),
        unit_label: "หน่วยบริการ",
    }
}
