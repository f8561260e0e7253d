//! FILENAME: link-format/src/short.rs
//! The legacy short token: filters as base64url-encoded JSON.
//!
//! Unlike the index token this carries the selected names verbatim,
//! so it decodes without the dataset but produces much longer links.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use engine::{FilterState, ThresholdStatus};
use serde::{Deserialize, Serialize};

use crate::error::LinkError;

#[derive(Debug, Default, Serialize, Deserialize)]
struct ShortFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    g: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    m: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    s: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    t: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    v: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    st: Option<StatusField>,
}

/// Older links wrote the status list as a comma-joined string.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum StatusField {
    List(Vec<String>),
    Csv(String),
}

impl StatusField {
    fn statuses(&self) -> Vec<ThresholdStatus> {
        let names: Vec<String> = match self {
            StatusField::List(v) => v.clone(),
            StatusField::Csv(s) => s.split(',').map(|p| p.trim().to_string()).collect(),
        };
        names
            .iter()
            .filter_map(|n| ThresholdStatus::parse(n))
            .collect()
    }
}

fn some_if_set(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

pub fn encode_short_token(filters: &FilterState) -> String {
    let payload = ShortFilters {
        g: some_if_set(&filters.selected_group),
        m: some_if_set(&filters.selected_main_kpi),
        s: some_if_set(&filters.selected_sub_kpi),
        t: some_if_set(&filters.selected_target),
        v: some_if_set(&filters.selected_service),
        st: if filters.status_filters.is_empty() {
            None
        } else {
            Some(StatusField::List(
                filters
                    .status_filters
                    .iter()
                    .map(|s| s.as_str().to_string())
                    .collect(),
            ))
        },
    };
    // Serialising a plain struct of strings cannot fail.
    let json = serde_json::to_string(&payload).unwrap_or_default();
    URL_SAFE_NO_PAD.encode(json.as_bytes())
}

pub fn try_decode_short_token(token: &str) -> Result<FilterState, LinkError> {
    let bytes = URL_SAFE_NO_PAD.decode(token.trim_end_matches('='))?;
    let json = String::from_utf8(bytes)?;
    let payload: ShortFilters = serde_json::from_str(&json)?;
    Ok(FilterState {
        selected_group: payload.g.unwrap_or_default(),
        selected_main_kpi: payload.m.unwrap_or_default(),
        selected_sub_kpi: payload.s.unwrap_or_default(),
        selected_target: payload.t.unwrap_or_default(),
        selected_service: payload.v.unwrap_or_default(),
        status_filters: payload.st.map(|st| st.statuses()).unwrap_or_default(),
    })
}

/// Lenient form used on the URL-restore path.
pub fn decode_short_token(token: &str) -> Option<FilterState> {
    match try_decode_short_token(token) {
        Ok(filters) => Some(filters),
        Err(e) => {
            log::warn!("short token rejected: {}", e);
            None
        }
    }
}
