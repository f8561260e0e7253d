//! FILENAME: summary-engine/src/rollup.rs
//! Equal-weight rollup of records into sub / main / group aggregates.
//!
//! Every level averages its children with equal weight, so a sub
//! indicator with three service rows counts the same as one with
//! thirty. Sub averages come from valid row percentages; main
//! averages from sub averages; group averages from main averages.

use engine::{calculate_percentage, KpiRecord};
use smallvec::SmallVec;

use crate::bucket::bucket_by;

/// Aggregate over the rows of one sub indicator.
#[derive(Debug, Clone, PartialEq)]
pub struct SubIndicatorStats {
    pub name: String,
    /// Mean of valid row percentages, 0 when no row has data.
    pub average: f64,
    /// Pass threshold taken from the first row of the sub.
    pub threshold: f64,
    pub record_count: usize,
}

impl SubIndicatorStats {
    /// A NaN threshold (unparsable cell) fails every sub.
    pub fn passed(&self) -> bool {
        self.average >= self.threshold
    }
}

/// Aggregate over the subs of one main indicator.
#[derive(Debug, Clone, PartialEq)]
pub struct MainIndicatorStats {
    pub name: String,
    /// Mean of sub averages, 0 when the main has no subs.
    pub average: f64,
    pub subs: Vec<SubIndicatorStats>,
}

impl MainIndicatorStats {
    /// A main passes when every sub passes. With no subs this is
    /// vacuously true; the card badge uses this form.
    pub fn passed_unguarded(&self) -> bool {
        self.subs.iter().all(|s| s.passed())
    }

    /// Same conjunction, but a main with no subs does not pass. The
    /// header counter uses this form.
    pub fn passed_guarded(&self) -> bool {
        !self.subs.is_empty() && self.passed_unguarded()
    }
}

/// Per-group overview used by the landing chart.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupOverview {
    pub name: String,
    /// Mean of main averages within the group.
    pub average: f64,
    pub main_count: usize,
    pub passed_count: usize,
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Stats for one sub indicator's rows. Rows with a blank result or an
/// incomputable percentage do not contribute to the average, but they
/// still count toward `record_count`.
pub fn sub_stats(name: &str, records: &[&KpiRecord]) -> SubIndicatorStats {
    let mut percentages: SmallVec<[f64; 8]> = SmallVec::new();
    for r in records {
        if r.result.is_blank() {
            continue;
        }
        if let Some(p) = calculate_percentage(&r.goal, &r.result) {
            percentages.push(p);
        }
    }
    let threshold = records.first().map(|r| r.threshold_or_zero()).unwrap_or(0.0);
    SubIndicatorStats {
        name: name.to_string(),
        average: mean(&percentages),
        threshold,
        record_count: records.len(),
    }
}

/// Stats for one main indicator from its already-scoped rows. Rows
/// with a blank sub name form their own unnamed sub bucket, which is
/// how sheets model mains that carry targets directly.
pub fn main_stats(name: &str, records: &[KpiRecord]) -> MainIndicatorStats {
    let subs: Vec<SubIndicatorStats> = bucket_by(records, false, |r| r.sub_name().to_string())
        .iter()
        .map(|(sub_name, rows)| sub_stats(sub_name, rows))
        .collect();
    let averages: Vec<f64> = subs.iter().map(|s| s.average).collect();
    MainIndicatorStats {
        name: name.to_string(),
        average: mean(&averages),
        subs,
    }
}

/// All main indicator stats within one group, in first-seen order.
/// The group is matched on the verbatim column value, the same way
/// the group cards select their rows. Rows with a blank main name
/// form their own unnamed bucket.
pub fn mains_in_group(data: &[KpiRecord], group: &str) -> Vec<MainIndicatorStats> {
    let scoped: Vec<KpiRecord> = data.iter().filter(|r| r.group == group).cloned().collect();
    bucket_by(&scoped, false, |r| r.main_name().to_string())
        .iter()
        .map(|(main_name, rows)| {
            let owned: Vec<KpiRecord> = rows.iter().map(|r| (*r).clone()).collect();
            main_stats(main_name, &owned)
        })
        .collect()
}

/// Group overviews across the whole dataset, each group averaging its
/// mains with equal weight.
pub fn group_overview_by_main(data: &[KpiRecord]) -> Vec<GroupOverview> {
    bucket_by(data, true, |r| r.group.clone())
        .iter()
        .map(|(group_name, rows)| {
            let owned: Vec<KpiRecord> = rows.iter().map(|r| (*r).clone()).collect();
            let mains = bucket_by(&owned, true, |r| r.main_name().to_string())
                .iter()
                .map(|(main_name, main_rows)| {
                    let main_owned: Vec<KpiRecord> =
                        main_rows.iter().map(|r| (*r).clone()).collect();
                    main_stats(main_name, &main_owned)
                })
                .collect::<Vec<_>>();
            let averages: Vec<f64> = mains.iter().map(|m| m.average).collect();
            GroupOverview {
                name: group_name.clone(),
                average: mean(&averages),
                main_count: mains.len(),
                passed_count: mains.iter().filter(|m| m.passed_unguarded()).count(),
            }
        })
        .collect()
}
