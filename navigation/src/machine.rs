//! FILENAME: navigation/src/machine.rs
//! The drill-down navigation state machine.
//!
//! Selecting a card narrows the filters and moves one level deeper,
//! except that levels with nothing to choose are skipped: zero values
//! at a level jumps straight to the detail table, exactly one value
//! is auto-selected and the walk continues below it. The skip flags
//! remember which levels were jumped so back navigation can land on a
//! level the user actually saw.

use engine::{FilterState, KpiRecord, ViewLevel};
use summary_engine::distinct_nonblank;

use crate::icon::{assign_icon, GroupIcon, IconAssignments};

/// Level the back button should land on, derived from which
/// dimensions actually exist in the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackLevel {
    Main,
    Sub,
    Target,
}

/// Back target when leaving the target view: the sub level only if
/// the current main has a sub dimension at all.
pub fn derive_back_level_from_target(data: &[KpiRecord], group: &str, main: &str) -> BackLevel {
    let has_subs = data
        .iter()
        .filter(|r| r.group_name() == group && r.main_name() == main)
        .any(|r| !r.sub_name().is_empty());
    if has_subs {
        BackLevel::Sub
    } else {
        BackLevel::Main
    }
}

/// Back target when leaving the detail view. Prefers the target level
/// when the current scope has targets, then the sub level, then main.
pub fn derive_back_level_from_detail(
    data: &[KpiRecord],
    group: &str,
    main: &str,
    sub: &str,
) -> BackLevel {
    let has_targets = data
        .iter()
        .filter(|r| {
            r.group_name() == group
                && r.main_name() == main
                && (sub.is_empty() || r.sub_name() == sub)
        })
        .any(|r| !r.target_name().is_empty());
    if has_targets {
        return BackLevel::Target;
    }
    derive_back_level_from_target(data, group, main)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavigationState {
    pub view: ViewLevel,
    pub filters: FilterState,
    pub group_icon: Option<GroupIcon>,
    /// The main level was auto-skipped on the way down.
    pub skipped_main_view: bool,
    /// The sub level was auto-skipped on the way down.
    pub skipped_sub_view: bool,
    icons: IconAssignments,
}

impl NavigationState {
    pub fn new() -> Self {
        NavigationState::default()
    }

    /// Filter change from the panel or a removed filter tag. Changing
    /// any hierarchy selection clears the status chips, and the view
    /// is re-derived from which selections remain.
    pub fn apply_filters_change(&mut self, next: FilterState) {
        let hierarchy_changed = next.hierarchy_differs(&self.filters);
        let mut apply = next;
        if hierarchy_changed {
            apply.status_filters.clear();
        }
        self.set_filters_and_derive(apply);
    }

    /// State restored from a URL. Unlike a panel edit this keeps the
    /// status chips, and an explicit view from the link wins over the
    /// derived one.
    pub fn apply_restored(&mut self, filters: FilterState, view: Option<ViewLevel>) {
        self.set_filters_and_derive(filters);
        if let Some(v) = view {
            self.view = v;
        }
    }

    fn set_filters_and_derive(&mut self, filters: FilterState) {
        self.filters = filters;

        if self.filters.selected_group.is_empty() {
            self.group_icon = None;
        } else {
            let (icon, icons) = assign_icon(&self.filters.selected_group, &self.icons);
            self.icons = icons;
            self.group_icon = Some(icon);
        }

        if self.filters.selected_group.is_empty() {
            self.view = ViewLevel::Groups;
            self.skipped_main_view = false;
            self.skipped_sub_view = false;
            return;
        }
        if self.filters.selected_main_kpi.is_empty() {
            self.view = ViewLevel::Main;
            self.skipped_main_view = false;
            self.skipped_sub_view = false;
            return;
        }
        if self.filters.selected_sub_kpi.is_empty() {
            self.view = ViewLevel::Sub;
            self.skipped_sub_view = false;
            return;
        }
        if self.filters.selected_target.is_empty() {
            self.view = ViewLevel::Target;
            return;
        }
        self.view = ViewLevel::Detail;
    }

    /// Group card clicked. Narrows to the group, then walks down past
    /// any level with fewer than two values.
    pub fn select_group(&mut self, data: &[KpiRecord], group: &str) {
        let next = FilterState {
            selected_group: group.to_string(),
            selected_main_kpi: String::new(),
            selected_sub_kpi: String::new(),
            selected_target: String::new(),
            ..self.filters.clone()
        };
        self.apply_filters_change(next);

        let in_group: Vec<KpiRecord> = data.iter().filter(|r| r.group == group).cloned().collect();
        let mains = distinct_nonblank(&in_group, |r| r.main_name().to_string());
        match mains.len() {
            0 => self.view = ViewLevel::Detail,
            1 => {
                let only_main = &mains[0];
                log::debug!("single main under group, skipping main view");
                self.filters.selected_main_kpi = only_main.clone();
                self.skipped_main_view = true;
                let in_main: Vec<KpiRecord> = in_group
                    .iter()
                    .filter(|r| r.main_name() == only_main)
                    .cloned()
                    .collect();
                self.descend_past_main(&in_main);
            }
            _ => self.view = ViewLevel::Main,
        }
    }

    /// Main indicator card clicked.
    pub fn select_main(&mut self, data: &[KpiRecord], main: &str) {
        let next = FilterState {
            selected_main_kpi: main.to_string(),
            selected_sub_kpi: String::new(),
            selected_target: String::new(),
            ..self.filters.clone()
        };
        self.apply_filters_change(next);

        let in_main: Vec<KpiRecord> = data
            .iter()
            .filter(|r| r.group == self.filters.selected_group && r.main_name() == main)
            .cloned()
            .collect();
        self.descend_past_main(&in_main);
    }

    /// Shared walk below a freshly selected (or auto-selected) main.
    fn descend_past_main(&mut self, in_main: &[KpiRecord]) {
        let subs = distinct_nonblank(in_main, |r| r.sub_name().to_string());
        match subs.len() {
            0 => {
                self.skipped_sub_view = false;
                self.stop_at_targets(in_main);
            }
            1 => {
                let only_sub = &subs[0];
                log::debug!("single sub under main, skipping sub view");
                self.filters.selected_sub_kpi = only_sub.clone();
                self.skipped_sub_view = true;
                let in_sub: Vec<KpiRecord> = in_main
                    .iter()
                    .filter(|r| r.sub_name() == only_sub)
                    .cloned()
                    .collect();
                self.stop_at_targets(&in_sub);
            }
            _ => {
                self.skipped_sub_view = false;
                self.view = ViewLevel::Sub;
            }
        }
    }

    fn stop_at_targets(&mut self, scope: &[KpiRecord]) {
        let targets = distinct_nonblank(scope, |r| r.target_name().to_string());
        match targets.len() {
            0 => self.view = ViewLevel::Detail,
            1 => {
                self.filters.selected_target = targets[0].clone();
                self.view = ViewLevel::Detail;
            }
            _ => self.view = ViewLevel::Target,
        }
    }

    /// Sub indicator card clicked.
    pub fn select_sub(&mut self, data: &[KpiRecord], sub: &str) {
        self.skipped_sub_view = false;
        let next = FilterState {
            selected_sub_kpi: sub.to_string(),
            selected_target: String::new(),
            ..self.filters.clone()
        };
        self.apply_filters_change(next);

        let in_sub: Vec<KpiRecord> = data
            .iter()
            .filter(|r| {
                r.group == self.filters.selected_group
                    && r.main_name() == self.filters.selected_main_kpi
                    && r.sub_name() == sub
            })
            .cloned()
            .collect();
        self.stop_at_targets(&in_sub);
    }

    /// Target card clicked: always lands on the detail table.
    pub fn select_target(&mut self, target: &str) {
        self.filters.selected_target = target.to_string();
        self.filters.status_filters.clear();
        self.view = ViewLevel::Detail;
    }

    pub fn back_to_groups(&mut self) {
        self.apply_filters_change(FilterState::default());
    }

    pub fn back_to_main(&mut self) {
        let next = FilterState {
            selected_main_kpi: String::new(),
            selected_sub_kpi: String::new(),
            selected_target: String::new(),
            selected_service: String::new(),
            status_filters: Vec::new(),
            ..self.filters.clone()
        };
        self.apply_filters_change(next);
    }

    pub fn back_to_sub(&mut self) {
        let next = FilterState {
            selected_sub_kpi: String::new(),
            selected_target: String::new(),
            selected_service: String::new(),
            status_filters: Vec::new(),
            ..self.filters.clone()
        };
        self.apply_filters_change(next);
    }

    pub fn back_to_target(&mut self) {
        let next = FilterState {
            selected_target: String::new(),
            selected_service: String::new(),
            status_filters: Vec::new(),
            ..self.filters.clone()
        };
        self.apply_filters_change(next);
    }

    /// Back from the target view, landing past any skipped level.
    pub fn back_from_target(&mut self, data: &[KpiRecord]) {
        let level = derive_back_level_from_target(
            data,
            &self.filters.selected_group,
            &self.filters.selected_main_kpi,
        );
        match level {
            BackLevel::Sub => self.back_to_sub(),
            _ => self.back_to_main(),
        }
    }

    /// Back from the detail table.
    pub fn back_from_detail(&mut self, data: &[KpiRecord]) {
        let level = derive_back_level_from_detail(
            data,
            &self.filters.selected_group,
            &self.filters.selected_main_kpi,
            &self.filters.selected_sub_kpi,
        );
        match level {
            BackLevel::Target => self.back_to_target(),
            BackLevel::Sub => self.back_to_sub(),
            BackLevel::Main => self.back_to_main(),
        }
    }
}
