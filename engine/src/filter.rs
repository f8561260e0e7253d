//! FILENAME: engine/src/filter.rs
//! Filter state shared by the views, the URL codec and the stats.

use serde::{Deserialize, Serialize};

use crate::percentage::ThresholdStatus;
use crate::record::KpiRecord;

/// The current selection at each hierarchy level, plus the active
/// status chips. Empty string means "not selected".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterState {
    pub selected_group: String,
    pub selected_main_kpi: String,
    pub selected_sub_kpi: String,
    pub selected_target: String,
    pub selected_service: String,
    pub status_filters: Vec<ThresholdStatus>,
}

impl FilterState {
    /// True when nothing is selected and no status chip is active.
    pub fn is_default(&self) -> bool {
        self.selected_group.is_empty()
            && self.selected_main_kpi.is_empty()
            && self.selected_sub_kpi.is_empty()
            && self.selected_target.is_empty()
            && self.selected_service.is_empty()
            && self.status_filters.is_empty()
    }

    /// True when any of the four hierarchy selections differ. Status
    /// chips and the service selection are not part of the hierarchy.
    pub fn hierarchy_differs(&self, other: &FilterState) -> bool {
        self.selected_group != other.selected_group
            || self.selected_main_kpi != other.selected_main_kpi
            || self.selected_sub_kpi != other.selected_sub_kpi
            || self.selected_target != other.selected_target
    }

    /// Whether a record matches every non-empty selection. The group
    /// column matches verbatim; the other columns match on their
    /// trimmed names, the same form the selections are built from.
    pub fn matches(&self, r: &KpiRecord) -> bool {
        if !self.selected_group.is_empty() && r.group != self.selected_group {
            return false;
        }
        if !self.selected_main_kpi.is_empty() && r.main_name() != self.selected_main_kpi {
            return false;
        }
        if !self.selected_sub_kpi.is_empty() && r.sub_name() != self.selected_sub_kpi {
            return false;
        }
        if !self.selected_target.is_empty() && r.target_name() != self.selected_target {
            return false;
        }
        if !self.selected_service.is_empty() && r.service_name() != self.selected_service {
            return false;
        }
        true
    }
}

/// Applies the hierarchy and service selections. Status chips are a
/// separate, view-dependent pass (see the summary engine).
pub fn apply_basic_filters(records: &[KpiRecord], filters: &FilterState) -> Vec<KpiRecord> {
    records.iter().filter(|r| filters.matches(r)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RawValue;

    fn rec(group: &str, main: &str, sub: &str) -> KpiRecord {
        KpiRecord {
            group: group.to_string(),
            main_indicator: main.to_string(),
            sub_indicator: sub.to_string(),
            goal: RawValue::from("100"),
            result: RawValue::from("80"),
            ..KpiRecord::default()
        }
    }

    #[test]
    fn default_state_matches_everything() {
        let f = FilterState::default();
        assert!(f.is_default());
        assert!(f.matches(&rec("ก", "ข", "ค")));
    }

    #[test]
    fn selections_narrow_the_set() {
        let data = vec![rec("ก", "ข1", "ค"), rec("ก", "ข2", "ค"), rec("ข", "ข1", "ค")];
        let f = FilterState {
            selected_group: "ก".to_string(),
            selected_main_kpi: "ข1".to_string(),
            ..FilterState::default()
        };
        assert_eq!(apply_basic_filters(&data, &f).len(), 1);
    }

    #[test]
    fn trimmed_names_match_padded_cells() {
        let data = vec![rec("ก", " ข1 ", "ค")];
        let f = FilterState {
            selected_main_kpi: "ข1".to_string(),
            ..FilterState::default()
        };
        assert_eq!(apply_basic_filters(&data, &f).len(), 1);
    }

    #[test]
    fn hierarchy_diff_ignores_service_and_statuses() {
        let a = FilterState::default();
        let mut b = FilterState::default();
        b.selected_service = "รพ.สต. บ้านเหนือ".to_string();
        b.status_filters = vec![ThresholdStatus::Passed];
        assert!(!a.hierarchy_differs(&b));

        b.selected_target = "ผู้สูงอายุ".to_string();
        assert!(a.hierarchy_differs(&b));
    }
}
