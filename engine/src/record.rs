//! FILENAME: engine/src/record.rs
//! The raw KPI record model.
//!
//! One record is one row from the upstream spreadsheet API. Field
//! names deserialize from the Thai column headers the sheets use, so
//! the API payload decodes directly into `KpiRecord` values.

use serde::{Deserialize, Serialize};

use crate::value::{parse_float_prefix, parse_float_prefix_or_nan, render_number};

/// A spreadsheet cell. The API delivers numbers and strings
/// interchangeably, with the empty string standing for "no data".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl Default for RawValue {
    fn default() -> Self {
        RawValue::Text(String::new())
    }
}

impl RawValue {
    /// The trimmed display form. Numbers render the way the sheet
    /// shows them (`50`, not `50.0`).
    pub fn trimmed(&self) -> String {
        match self {
            RawValue::Number(n) => render_number(*n),
            RawValue::Text(s) => s.trim().to_string(),
        }
    }

    /// True when the trimmed form is the empty string.
    pub fn is_blank(&self) -> bool {
        match self {
            RawValue::Number(_) => false,
            RawValue::Text(s) => s.trim().is_empty(),
        }
    }

    /// Numeric value via leading-prefix parsing ("85 ราย" -> 85).
    pub fn parse(&self) -> Option<f64> {
        match self {
            RawValue::Number(n) => Some(*n),
            RawValue::Text(s) => parse_float_prefix(s),
        }
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::Text(s)
    }
}

impl From<f64> for RawValue {
    fn from(n: f64) -> Self {
        RawValue::Number(n)
    }
}

/// One KPI measurement row.
///
/// The five name columns form the navigation hierarchy:
/// group -> main indicator -> sub indicator -> target population,
/// with the service unit as the leaf dimension.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KpiRecord {
    #[serde(rename = "ประเด็นขับเคลื่อน")]
    pub group: String,
    #[serde(rename = "กลุ่มงานย่อย")]
    pub subgroup: String,
    #[serde(rename = "ตัวชี้วัดหลัก")]
    pub main_indicator: String,
    #[serde(rename = "ตัวชี้วัดย่อย")]
    pub sub_indicator: String,
    #[serde(rename = "กลุ่มเป้าหมาย")]
    pub target_population: String,
    #[serde(rename = "ชื่อหน่วยบริการ")]
    pub service_unit: String,
    #[serde(rename = "เป้าหมาย")]
    pub goal: RawValue,
    #[serde(rename = "ผลงาน")]
    pub result: RawValue,
    #[serde(rename = "ร้อยละ (%)")]
    pub percent_reported: RawValue,
    #[serde(rename = "เกณฑ์ผ่าน (%)")]
    pub pass_threshold: RawValue,
    #[serde(rename = "ข้อมูลวันที่")]
    pub data_date: String,
    pub sheet_source: String,
    #[serde(rename = "แหล่งข้อมูล")]
    pub data_source: String,
    pub service_code_ref: String,
    pub kpi_info_id: String,
}

impl KpiRecord {
    pub fn group_name(&self) -> &str {
        self.group.trim()
    }

    pub fn main_name(&self) -> &str {
        self.main_indicator.trim()
    }

    pub fn sub_name(&self) -> &str {
        self.sub_indicator.trim()
    }

    pub fn target_name(&self) -> &str {
        self.target_population.trim()
    }

    pub fn service_name(&self) -> &str {
        self.service_unit.trim()
    }

    /// Which sheet the row came from, falling back to the legacy
    /// data-source column used by older exports.
    pub fn sheet(&self) -> &str {
        let s = self.sheet_source.trim();
        if !s.is_empty() {
            s
        } else {
            self.data_source.trim()
        }
    }

    /// Pass threshold as a number. A blank cell means "no threshold"
    /// and maps to 0; an unparsable cell maps to NaN, which fails
    /// every comparison downstream.
    pub fn threshold_or_zero(&self) -> f64 {
        if self.pass_threshold.is_blank() {
            0.0
        } else {
            match &self.pass_threshold {
                RawValue::Number(n) => *n,
                RawValue::Text(s) => parse_float_prefix_or_nan(s),
            }
        }
    }
}
