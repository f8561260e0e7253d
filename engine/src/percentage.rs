//! FILENAME: engine/src/percentage.rs
//! Percentage calculation and pass/fail grading.
//!
//! `calculate_percentage` turns a goal/result cell pair into an
//! achievement percentage, distinguishing "no data" (None) from a
//! real zero. The two grading functions map a percentage onto the
//! three-level status scale shown throughout the dashboard.

use serde::{Deserialize, Serialize};

use crate::record::RawValue;
use crate::value::parse_float_prefix;

/// Three-level grade for a KPI percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdStatus {
    Passed,
    Near,
    Failed,
}

impl ThresholdStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThresholdStatus::Passed => "passed",
            ThresholdStatus::Near => "near",
            ThresholdStatus::Failed => "failed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "passed" => Some(ThresholdStatus::Passed),
            "near" => Some(ThresholdStatus::Near),
            "failed" => Some(ThresholdStatus::Failed),
            _ => None,
        }
    }
}

/// Achievement percentage for one record, or `None` when the row has
/// no measurable data.
///
/// No data means: both cells blank, both cells literally "0", a goal
/// that is missing, unparsable or zero, or an unparsable result. A
/// blank result against a real goal counts as 0 achieved.
pub fn calculate_percentage(goal: &RawValue, result: &RawValue) -> Option<f64> {
    let goal_text = goal.trimmed();
    let result_text = result.trimmed();

    if goal_text.is_empty() && result_text.is_empty() {
        return None;
    }
    if goal_text == "0" && result_text == "0" {
        return None;
    }

    let goal_value = parse_float_prefix(&goal_text)?;
    let result_value = if result_text.is_empty() {
        0.0
    } else {
        parse_float_prefix(&result_text)?
    };

    if goal_value == 0.0 {
        return None;
    }
    Some(result_value / goal_value * 100.0)
}

/// Grades a percentage against a per-KPI threshold. "Near" starts at
/// 80% of the threshold. Rows without a usable threshold fall back to
/// the absolute scale.
pub fn threshold_status(percentage: Option<f64>, threshold: f64) -> ThresholdStatus {
    let Some(p) = percentage else {
        return ThresholdStatus::Failed;
    };
    if !threshold.is_finite() || threshold <= 0.0 {
        return absolute_status(Some(p));
    }
    if p >= threshold {
        ThresholdStatus::Passed
    } else if p >= threshold * 0.8 {
        ThresholdStatus::Near
    } else {
        ThresholdStatus::Failed
    }
}

/// Grades a percentage on the fixed 80/60 scale used for overview
/// aggregates, where no single KPI threshold applies.
pub fn absolute_status(percentage: Option<f64>) -> ThresholdStatus {
    let Some(p) = percentage else {
        return ThresholdStatus::Failed;
    };
    if p >= 80.0 {
        ThresholdStatus::Passed
    } else if p >= 60.0 {
        ThresholdStatus::Near
    } else {
        ThresholdStatus::Failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pct(goal: &str, result: &str) -> Option<f64> {
        calculate_percentage(&RawValue::from(goal), &RawValue::from(result))
    }

    #[test]
    fn percentage_distinguishes_no_data_from_zero() {
        assert_eq!(pct("", ""), None);
        assert_eq!(pct("0", "0"), None);
        assert_eq!(pct("0", "5"), None);
        // Real goal with a blank result is 0 achieved, not "no data".
        assert_eq!(pct("200", ""), Some(0.0));
        assert_eq!(pct("200", "0"), Some(0.0));
    }

    #[test]
    fn percentage_basic_math() {
        assert_eq!(pct("200", "50"), Some(25.0));
        assert_eq!(pct("200", "180"), Some(90.0));
        assert_eq!(pct("200 ราย", "150 ราย"), Some(75.0));
        assert_eq!(pct("ไม่ระบุ", "5"), None);
        assert_eq!(pct("100", "ไม่ระบุ"), None);
    }

    #[test]
    fn threshold_boundaries() {
        assert_eq!(threshold_status(Some(80.0), 80.0), ThresholdStatus::Passed);
        assert_eq!(threshold_status(Some(79.0), 80.0), ThresholdStatus::Near);
        assert_eq!(threshold_status(Some(64.0), 80.0), ThresholdStatus::Near);
        assert_eq!(threshold_status(Some(63.0), 80.0), ThresholdStatus::Failed);
        assert_eq!(threshold_status(None, 80.0), ThresholdStatus::Failed);
    }

    #[test]
    fn unusable_threshold_falls_back_to_absolute() {
        assert_eq!(threshold_status(Some(81.0), 0.0), ThresholdStatus::Passed);
        assert_eq!(threshold_status(Some(65.0), f64::NAN), ThresholdStatus::Near);
        assert_eq!(threshold_status(Some(59.9), -5.0), ThresholdStatus::Failed);
        assert_eq!(threshold_status(None, 70.0), ThresholdStatus::Failed);
    }

    #[test]
    fn absolute_boundaries() {
        assert_eq!(absolute_status(Some(81.0)), ThresholdStatus::Passed);
        assert_eq!(absolute_status(Some(80.0)), ThresholdStatus::Passed);
        assert_eq!(absolute_status(Some(60.0)), ThresholdStatus::Near);
        assert_eq!(absolute_status(Some(59.9)), ThresholdStatus::Failed);
        assert_eq!(absolute_status(None), ThresholdStatus::Failed);
    }

    #[test]
    fn status_round_trips_through_strings() {
        for st in [ThresholdStatus::Passed, ThresholdStatus::Near, ThresholdStatus::Failed] {
            assert_eq!(ThresholdStatus::parse(st.as_str()), Some(st));
        }
        assert_eq!(ThresholdStatus::parse("warning"), None);
    }
}
