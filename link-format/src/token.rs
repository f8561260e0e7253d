//! FILENAME: link-format/src/token.rs
//! The index token: filters and view packed as base-36 dictionary
//! positions.
//!
//! Format: `{version}-{dictHash}.{g}.{m}.{s}.{t}.{v}.{bits}.{view}`
//! where g..v are positions in the scoped dictionaries, bits is the
//! status-chip bitmask (bit0 passed, bit1 near, bit2 failed) and view
//! is a single-letter view code. An empty segment means "not set";
//! trailing empty segments are omitted when no view code follows.

use engine::{FilterState, KpiRecord, ThresholdStatus, ViewLevel};

use crate::dictionary::{build_dictionaries, dictionary_hash, gm_key, gms_key};
use crate::error::LinkError;
use crate::radix::{from_base36, to_base36};

pub const TOKEN_VERSION: &str = "1";

#[derive(Debug, Clone, PartialEq)]
pub struct DecodedIndexToken {
    pub filters: FilterState,
    pub view: Option<ViewLevel>,
}

fn idx_of(list: Option<&Vec<String>>, value: &str) -> Option<usize> {
    if value.is_empty() {
        return None;
    }
    list?.iter().position(|v| v == value)
}

/// Encodes the filters against the dataset's dictionaries. Selections
/// the dictionaries cannot place (stale names, or a deeper level with
/// no resolved parent) encode as unset.
pub fn encode_index_token(
    data: &[KpiRecord],
    filters: &FilterState,
    view: Option<ViewLevel>,
) -> String {
    let d = build_dictionaries(data);
    let group = filters.selected_group.as_str();
    let main = filters.selected_main_kpi.as_str();
    let sub = filters.selected_sub_kpi.as_str();

    let g_idx = idx_of(Some(&d.groups), group);
    let m_idx = if g_idx.is_some() {
        idx_of(d.mains_by_group.get(group), main)
    } else {
        None
    };
    let s_idx = if g_idx.is_some() && m_idx.is_some() {
        idx_of(d.subs_by_gm.get(&gm_key(group, main)), sub)
    } else {
        None
    };
    let t_idx = if g_idx.is_some() && m_idx.is_some() {
        idx_of(
            d.targets_by_gms.get(&gms_key(group, main, sub)),
            &filters.selected_target,
        )
    } else {
        None
    };
    let v_idx = idx_of(Some(&d.services), &filters.selected_service);

    let mut bits: u64 = 0;
    if filters.status_filters.contains(&ThresholdStatus::Passed) {
        bits |= 1;
    }
    if filters.status_filters.contains(&ThresholdStatus::Near) {
        bits |= 2;
    }
    if filters.status_filters.contains(&ThresholdStatus::Failed) {
        bits |= 4;
    }

    let seg = |idx: Option<usize>| idx.map(|i| to_base36(i as u64)).unwrap_or_default();
    let mut parts = vec![
        seg(g_idx),
        seg(m_idx),
        seg(s_idx),
        seg(t_idx),
        seg(v_idx),
        if bits > 0 { to_base36(bits) } else { String::new() },
    ];

    match view {
        Some(v) => {
            // The view code is positional (seventh segment), so the
            // index segments before it must all stay in place.
            parts.push(v.as_code().to_string());
        }
        None => {
            while parts.last().map(|s| s.is_empty()).unwrap_or(false) {
                parts.pop();
            }
        }
    }

    format!("{}-{}.{}", TOKEN_VERSION, dictionary_hash(data), parts.join("."))
}

fn parse_prefix(seg: &str) -> Option<(&str, &str)> {
    let (ver, hash) = seg.split_once('-')?;
    if ver.is_empty() || !ver.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if hash.is_empty() || !hash.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return None;
    }
    Some((ver, hash))
}

fn seg_index(segs: &[&str], i: usize) -> Result<Option<usize>, LinkError> {
    match segs.get(i) {
        Some(s) if !s.is_empty() => from_base36(s)
            .map(|n| Some(n as usize))
            .ok_or_else(|| LinkError::InvalidSegment(s.to_string())),
        _ => Ok(None),
    }
}

/// Decodes a token against the current dataset. Tokens carrying a
/// version-hash prefix are rejected when either side does not match;
/// bare prefixless bodies are accepted for backward compatibility.
pub fn try_decode_index_token(
    data: &[KpiRecord],
    token: &str,
) -> Result<DecodedIndexToken, LinkError> {
    let d = build_dictionaries(data);
    let mut segs: Vec<&str> = token.split('.').collect();

    if let Some(first) = segs.first().copied() {
        if let Some((ver, hash)) = parse_prefix(first) {
            if ver != TOKEN_VERSION {
                return Err(LinkError::UnsupportedVersion(ver.to_string()));
            }
            let current = dictionary_hash(data);
            if hash != current {
                return Err(LinkError::DictionaryMismatch {
                    token: hash.to_string(),
                    current,
                });
            }
            segs.remove(0);
        }
    }

    let lookup = |list: Option<&Vec<String>>, idx: Option<usize>| -> String {
        match (list, idx) {
            (Some(list), Some(i)) => list.get(i).cloned().unwrap_or_default(),
            _ => String::new(),
        }
    };

    let group = lookup(Some(&d.groups), seg_index(&segs, 0)?);
    let mains = if group.is_empty() {
        None
    } else {
        d.mains_by_group.get(&group)
    };
    let main = lookup(mains, seg_index(&segs, 1)?);
    let subs = if group.is_empty() || main.is_empty() {
        None
    } else {
        d.subs_by_gm.get(&gm_key(&group, &main))
    };
    let sub = lookup(subs, seg_index(&segs, 2)?);
    let target = lookup(
        d.targets_by_gms.get(&gms_key(&group, &main, &sub)),
        seg_index(&segs, 3)?,
    );
    let service = lookup(Some(&d.services), seg_index(&segs, 4)?);

    let mut status_filters = Vec::new();
    if let Some(bits) = seg_index(&segs, 5)? {
        if bits & 1 != 0 {
            status_filters.push(ThresholdStatus::Passed);
        }
        if bits & 2 != 0 {
            status_filters.push(ThresholdStatus::Near);
        }
        if bits & 4 != 0 {
            status_filters.push(ThresholdStatus::Failed);
        }
    }

    let view = segs.get(6).and_then(|s| ViewLevel::from_code(s));

    Ok(DecodedIndexToken {
        filters: FilterState {
            selected_group: group,
            selected_main_kpi: main,
            selected_sub_kpi: sub,
            selected_target: target,
            selected_service: service,
            status_filters,
        },
        view,
    })
}

/// [`try_decode_index_token`] with failures logged and flattened to
/// `None`, for call sites that only care whether the link applies.
pub fn decode_index_token(data: &[KpiRecord], token: &str) -> Option<DecodedIndexToken> {
    match try_decode_index_token(data, token) {
        Ok(decoded) => Some(decoded),
        Err(e) => {
            log::warn!("index token rejected: {}", e);
            None
        }
    }
}
