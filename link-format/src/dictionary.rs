//! FILENAME: link-format/src/dictionary.rs
//! Dataset-derived value dictionaries.
//!
//! Index tokens do not carry the selected names, only their positions
//! in sorted dictionaries rebuilt from the dataset on both ends. The
//! dictionary hash travels inside the token so a decoder working from
//! a changed dataset can tell the positions no longer mean the same
//! thing.

use std::collections::HashMap;

use engine::KpiRecord;

use crate::radix::to_base36;

/// Separator inside composite dictionary keys. A control character
/// never appears in sheet values, so keys cannot collide.
pub const SCOPE_SEP: char = '\u{1}';

pub fn gm_key(group: &str, main: &str) -> String {
    format!("{}{}{}", group, SCOPE_SEP, main)
}

pub fn gms_key(group: &str, main: &str, sub: &str) -> String {
    format!("{}{}{}{}{}", group, SCOPE_SEP, main, SCOPE_SEP, sub)
}

/// Sorted value dictionaries scoped by hierarchy level. Mains are
/// listed per group, subs per group+main, targets per group+main+sub.
/// Each group+main additionally has a no-sub targets entry (empty sub
/// in the key) covering every target under the main.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dictionaries {
    pub groups: Vec<String>,
    pub services: Vec<String>,
    pub mains_by_group: HashMap<String, Vec<String>>,
    pub subs_by_gm: HashMap<String, Vec<String>>,
    pub targets_by_gms: HashMap<String, Vec<String>>,
}

/// Trimmed, de-duplicated, code-point-sorted values.
fn uniq<'a, I>(values: I) -> Vec<String>
where
    I: Iterator<Item = &'a str>,
{
    let mut out: Vec<String> = Vec::new();
    for v in values {
        let v = v.trim();
        if v.is_empty() || out.iter().any(|x| x == v) {
            continue;
        }
        out.push(v.to_string());
    }
    out.sort();
    out
}

pub fn build_dictionaries(data: &[KpiRecord]) -> Dictionaries {
    let groups = uniq(data.iter().map(|r| r.group.as_str()));
    let services = uniq(data.iter().map(|r| r.service_unit.as_str()));

    let mut mains_by_group = HashMap::new();
    let mut subs_by_gm = HashMap::new();
    let mut targets_by_gms = HashMap::new();

    for g in &groups {
        let in_g: Vec<&KpiRecord> = data.iter().filter(|r| r.group_name() == g).collect();
        let mains = uniq(in_g.iter().map(|r| r.main_indicator.as_str()));

        for m in &mains {
            let in_gm: Vec<&KpiRecord> =
                in_g.iter().filter(|r| r.main_name() == m).copied().collect();
            let subs = uniq(in_gm.iter().map(|r| r.sub_indicator.as_str()));

            for s in &subs {
                let in_gms: Vec<&KpiRecord> =
                    in_gm.iter().filter(|r| r.sub_name() == s).copied().collect();
                targets_by_gms.insert(
                    gms_key(g, m, s),
                    uniq(in_gms.iter().map(|r| r.target_population.as_str())),
                );
            }
            // Targets with no sub selected, used at the main level.
            targets_by_gms.insert(
                gms_key(g, m, ""),
                uniq(in_gm.iter().map(|r| r.target_population.as_str())),
            );
            subs_by_gm.insert(gm_key(g, m), subs);
        }
        mains_by_group.insert(g.clone(), mains);
    }

    Dictionaries {
        groups,
        services,
        mains_by_group,
        subs_by_gm,
        targets_by_gms,
    }
}

/// djb2-xor over the UTF-16 code units of `s`.
fn djb2(s: &str) -> u32 {
    let mut h: u32 = 5381;
    for unit in s.encode_utf16() {
        h = (h.wrapping_shl(5).wrapping_add(h)) ^ unit as u32;
    }
    h
}

/// Base-36 fingerprint of the dictionaries. Sensitive to both content
/// and ordering, so any dataset change that could shift an index
/// produces a different hash.
pub fn dictionary_hash(data: &[KpiRecord]) -> String {
    let d = build_dictionaries(data);
    let empty: Vec<String> = Vec::new();
    let mut parts: Vec<String> = Vec::new();

    parts.push(format!("g:{}", d.groups.join("|")));
    for g in &d.groups {
        let mains = d.mains_by_group.get(g).unwrap_or(&empty);
        parts.push(format!("m:{}:{}", g, mains.join("|")));
        for m in mains {
            let subs = d.subs_by_gm.get(&gm_key(g, m)).unwrap_or(&empty);
            parts.push(format!("s:{}|{}:{}", g, m, subs.join("|")));
            // The first sub stands in for the whole sub level; the
            // no-sub list already covers every target under the main.
            let first_sub = subs.first().map(String::as_str).unwrap_or("");
            let t_with_sub = d.targets_by_gms.get(&gms_key(g, m, first_sub)).unwrap_or(&empty);
            let t_no_sub = d.targets_by_gms.get(&gms_key(g, m, "")).unwrap_or(&empty);
            parts.push(format!("tN:{}|{}:{}", g, m, t_no_sub.join("|")));
            if !t_with_sub.is_empty() {
                parts.push(format!("tS:{}|{}:{}", g, m, t_with_sub.join("|")));
            }
        }
    }
    parts.push(format!("v:{}", d.services.join("|")));

    to_base36(djb2(&parts.join("||")) as u64)
}
