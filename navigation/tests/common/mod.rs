//! FILENAME: navigation/tests/common/mod.rs
//! Shared fixtures for navigation integration tests.

use engine::{KpiRecord, RawValue};

pub fn rec(group: &str, main: &str, sub: &str, target: &str) -> KpiRecord {
    KpiRecord {
        group: group.to_string(),
        main_indicator: main.to_string(),
        sub_indicator: sub.to_string(),
        target_population: target.to_string(),
        service_unit: "รพ.สต. ตัวอย่าง".to_string(),
        goal: RawValue::from("100"),
        result: RawValue::from("85"),
        pass_threshold: RawValue::from("80"),
        ..KpiRecord::default()
    }
}

/// A group with a full hierarchy: two mains, the first with two subs
/// and targets under each sub.
pub fn full_hierarchy() -> Vec<KpiRecord> {
    vec![
        rec("ประเด็น ก", "หลัก 1", "ย่อย 1", "เด็ก"),
        rec("ประเด็น ก", "หลัก 1", "ย่อย 1", "ผู้สูงอายุ"),
        rec("ประเด็น ก", "หลัก 1", "ย่อย 2", "เด็ก"),
        rec("ประเด็น ก", "หลัก 2", "", ""),
        rec("ประเด็น ข", "หลัก 3", "", "วัยทำงาน"),
    ]
}

/// A group whose single main has a single sub with two targets, so
/// selecting the group should skip straight to the target view.
pub fn single_chain() -> Vec<KpiRecord> {
    vec![
        rec("ประเด็น ค", "หลัก เดียว", "ย่อย เดียว", "เด็ก"),
        rec("ประเด็น ค", "หลัก เดียว", "ย่อย เดียว", "ผู้สูงอายุ"),
    ]
}
