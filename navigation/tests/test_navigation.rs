//! FILENAME: navigation/tests/test_navigation.rs
//! Drill-down, smart skipping and back navigation.

mod common;

use common::{full_hierarchy, rec, single_chain};
use engine::{FilterState, ThresholdStatus, ViewLevel};
use navigation::{
    derive_back_level_from_detail, derive_back_level_from_target, BackLevel, NavigationState,
};

#[test]
fn selecting_a_rich_group_stops_at_the_main_view() {
    let data = full_hierarchy();
    let mut nav = NavigationState::new();
    nav.select_group(&data, "ประเด็น ก");
    assert_eq!(nav.view, ViewLevel::Main);
    assert_eq!(nav.filters.selected_group, "ประเด็น ก");
    assert!(nav.filters.selected_main_kpi.is_empty());
    assert!(!nav.skipped_main_view);
    assert!(nav.group_icon.is_some());
}

#[test]
fn single_chain_group_skips_to_the_target_view() {
    let data = single_chain();
    let mut nav = NavigationState::new();
    nav.select_group(&data, "ประเด็น ค");
    // One main and one sub are auto-selected; two targets stop the walk.
    assert_eq!(nav.view, ViewLevel::Target);
    assert_eq!(nav.filters.selected_main_kpi, "หลัก เดียว");
    assert_eq!(nav.filters.selected_sub_kpi, "ย่อย เดียว");
    assert!(nav.filters.selected_target.is_empty());
    assert!(nav.skipped_main_view);
    assert!(nav.skipped_sub_view);
}

#[test]
fn single_target_is_auto_selected_down_to_detail() {
    let data = vec![rec("ก", "ม", "", "เด็ก"), rec("ก", "ม", "", "เด็ก")];
    let mut nav = NavigationState::new();
    nav.select_group(&data, "ก");
    assert_eq!(nav.view, ViewLevel::Detail);
    assert_eq!(nav.filters.selected_main_kpi, "ม");
    assert_eq!(nav.filters.selected_target, "เด็ก");
    assert!(!nav.skipped_sub_view);
}

#[test]
fn group_without_any_mains_lands_on_detail() {
    let data = vec![rec("ก", "", "", "")];
    let mut nav = NavigationState::new();
    nav.select_group(&data, "ก");
    assert_eq!(nav.view, ViewLevel::Detail);
}

#[test]
fn selecting_a_main_without_subs_stops_at_targets() {
    let data = vec![
        rec("ก", "ม1", "ย", "เด็ก"),
        rec("ก", "ม2", "", "เด็ก"),
        rec("ก", "ม2", "", "ผู้สูงอายุ"),
    ];
    let mut nav = NavigationState::new();
    nav.select_group(&data, "ก");
    assert_eq!(nav.view, ViewLevel::Main);

    nav.select_main(&data, "ม2");
    assert_eq!(nav.view, ViewLevel::Target);
    assert!(nav.filters.selected_sub_kpi.is_empty());
    assert!(!nav.skipped_sub_view);
}

#[test]
fn selecting_a_sub_with_one_target_jumps_to_detail() {
    let data = vec![
        rec("ก", "ม", "ย1", "เด็ก"),
        rec("ก", "ม", "ย2", "วัยทำงาน"),
    ];
    let mut nav = NavigationState::new();
    nav.select_group(&data, "ก");
    nav.select_main(&data, "ม");
    assert_eq!(nav.view, ViewLevel::Sub);

    nav.select_sub(&data, "ย1");
    assert_eq!(nav.view, ViewLevel::Detail);
    assert_eq!(nav.filters.selected_target, "เด็ก");
}

#[test]
fn selecting_a_target_clears_status_chips() {
    let mut nav = NavigationState::new();
    nav.apply_filters_change(FilterState {
        selected_group: "ก".to_string(),
        selected_main_kpi: "ม".to_string(),
        selected_sub_kpi: "ย".to_string(),
        ..FilterState::default()
    });
    nav.filters.status_filters = vec![ThresholdStatus::Failed];
    nav.select_target("เด็ก");
    assert_eq!(nav.view, ViewLevel::Detail);
    assert_eq!(nav.filters.selected_target, "เด็ก");
    assert!(nav.filters.status_filters.is_empty());
}

#[test]
fn hierarchy_change_clears_chips_but_service_change_keeps_them() {
    let mut nav = NavigationState::new();
    nav.apply_filters_change(FilterState {
        selected_group: "ก".to_string(),
        ..FilterState::default()
    });

    let mut with_chips = nav.filters.clone();
    with_chips.status_filters = vec![ThresholdStatus::Passed];
    nav.apply_filters_change(with_chips);
    assert_eq!(nav.filters.status_filters, vec![ThresholdStatus::Passed]);

    let mut service_only = nav.filters.clone();
    service_only.selected_service = "รพ.ก".to_string();
    nav.apply_filters_change(service_only);
    assert_eq!(nav.filters.status_filters, vec![ThresholdStatus::Passed]);

    let mut new_group = nav.filters.clone();
    new_group.selected_group = "ข".to_string();
    nav.apply_filters_change(new_group);
    assert!(nav.filters.status_filters.is_empty());
}

#[test]
fn view_derives_from_the_deepest_unset_selection() {
    let mut nav = NavigationState::new();
    nav.apply_filters_change(FilterState {
        selected_group: "ก".to_string(),
        selected_main_kpi: "ม".to_string(),
        selected_sub_kpi: "ย".to_string(),
        selected_target: "เด็ก".to_string(),
        ..FilterState::default()
    });
    assert_eq!(nav.view, ViewLevel::Detail);

    let mut next = nav.filters.clone();
    next.selected_target = String::new();
    nav.apply_filters_change(next);
    assert_eq!(nav.view, ViewLevel::Target);

    nav.apply_filters_change(FilterState::default());
    assert_eq!(nav.view, ViewLevel::Groups);
    assert!(nav.group_icon.is_none());
}

#[test]
fn back_level_from_target_depends_on_the_sub_dimension() {
    let with_subs = vec![rec("ก", "ม", "ย", "เด็ก")];
    let without_subs = vec![rec("ก", "ม", "", "เด็ก")];
    assert_eq!(
        derive_back_level_from_target(&with_subs, "ก", "ม"),
        BackLevel::Sub
    );
    assert_eq!(
        derive_back_level_from_target(&without_subs, "ก", "ม"),
        BackLevel::Main
    );
}

#[test]
fn back_level_from_detail_prefers_targets_then_subs() {
    let with_targets = vec![rec("ก", "ม", "ย", "เด็ก")];
    let subs_only = vec![rec("ก", "ม", "ย", "")];
    let flat = vec![rec("ก", "ม", "", "")];
    assert_eq!(
        derive_back_level_from_detail(&with_targets, "ก", "ม", "ย"),
        BackLevel::Target
    );
    assert_eq!(
        derive_back_level_from_detail(&subs_only, "ก", "ม", "ย"),
        BackLevel::Sub
    );
    assert_eq!(
        derive_back_level_from_detail(&flat, "ก", "ม", ""),
        BackLevel::Main
    );
}

#[test]
fn back_from_detail_walks_up_one_visible_level() {
    let data = full_hierarchy();
    let mut nav = NavigationState::new();
    nav.select_group(&data, "ประเด็น ก");
    nav.select_main(&data, "หลัก 1");
    nav.select_sub(&data, "ย่อย 1");
    assert_eq!(nav.view, ViewLevel::Target);
    nav.select_target("เด็ก");
    assert_eq!(nav.view, ViewLevel::Detail);

    nav.back_from_detail(&data);
    assert_eq!(nav.view, ViewLevel::Target);
    assert!(nav.filters.selected_target.is_empty());
    assert_eq!(nav.filters.selected_sub_kpi, "ย่อย 1");

    nav.back_from_target(&data);
    assert_eq!(nav.view, ViewLevel::Sub);
    assert!(nav.filters.selected_sub_kpi.is_empty());

    nav.back_to_main();
    assert_eq!(nav.view, ViewLevel::Main);
    assert!(nav.filters.selected_main_kpi.is_empty());

    nav.back_to_groups();
    assert_eq!(nav.view, ViewLevel::Groups);
    assert!(nav.filters.is_default());
}

#[test]
fn back_from_detail_skips_levels_with_no_dimension() {
    // No subs and no targets under the main: back goes straight to main.
    let data = vec![rec("ก", "ม1", "", ""), rec("ก", "ม2", "", "")];
    let mut nav = NavigationState::new();
    nav.select_group(&data, "ก");
    nav.select_main(&data, "ม1");
    assert_eq!(nav.view, ViewLevel::Detail);

    nav.back_from_detail(&data);
    assert_eq!(nav.view, ViewLevel::Main);
    assert_eq!(nav.filters.selected_group, "ก");
    assert!(nav.filters.selected_main_kpi.is_empty());
}

#[test]
fn navigates_a_dataset_deserialized_from_the_api_payload() {
    let json = r#"[
        {"ประเด็นขับเคลื่อน": "สุขภาพจิต", "ตัวชี้วัดหลัก": "การเข้าถึงบริการ",
         "กลุ่มเป้าหมาย": "ผู้ป่วยซึมเศร้า", "เป้าหมาย": 200, "ผลงาน": "180 ราย",
         "เกณฑ์ผ่าน (%)": "80"},
        {"ประเด็นขับเคลื่อน": "สุขภาพจิต", "ตัวชี้วัดหลัก": "การเข้าถึงบริการ",
         "กลุ่มเป้าหมาย": "ผู้ป่วยจิตเวช", "เป้าหมาย": 100, "ผลงาน": 60,
         "เกณฑ์ผ่าน (%)": "80"}
    ]"#;
    let data: Vec<engine::KpiRecord> = serde_json::from_str(json).unwrap();

    let mut nav = NavigationState::new();
    nav.select_group(&data, "สุขภาพจิต");
    // One main, no subs, two targets: stop on the target cards.
    assert_eq!(nav.view, ViewLevel::Target);
    assert_eq!(nav.filters.selected_main_kpi, "การเข้าถึงบริการ");
    assert!(nav.skipped_main_view);
    assert_eq!(nav.group_icon, Some(navigation::GroupIcon::Brain));
}

#[test]
fn back_clears_service_and_chips() {
    let data = full_hierarchy();
    let mut nav = NavigationState::new();
    nav.select_group(&data, "ประเด็น ก");
    nav.select_main(&data, "หลัก 1");
    nav.filters.selected_service = "รพ.ก".to_string();
    nav.filters.status_filters = vec![ThresholdStatus::Near];

    nav.back_to_main();
    assert!(nav.filters.selected_service.is_empty());
    assert!(nav.filters.status_filters.is_empty());
    assert_eq!(nav.filters.selected_group, "ประเด็น ก");
}
