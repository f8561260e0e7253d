//! FILENAME: summary-engine/src/bucket.rs
//! Order-preserving grouping of records by a derived key.

use engine::KpiRecord;
use rustc_hash::FxHashMap;

/// Groups records by `key_fn`, keeping buckets in first-seen order so
/// aggregate output is stable across runs. Records whose key is empty
/// are dropped when `skip_blank` is set.
pub fn bucket_by<'a, F>(
    records: &'a [KpiRecord],
    skip_blank: bool,
    key_fn: F,
) -> Vec<(String, Vec<&'a KpiRecord>)>
where
    F: Fn(&KpiRecord) -> String,
{
    let mut order: Vec<(String, Vec<&KpiRecord>)> = Vec::new();
    let mut index: FxHashMap<String, usize> = FxHashMap::default();

    for record in records {
        let key = key_fn(record);
        if skip_blank && key.is_empty() {
            continue;
        }
        match index.get(&key) {
            Some(&i) => order[i].1.push(record),
            None => {
                index.insert(key.clone(), order.len());
                order.push((key, vec![record]));
            }
        }
    }
    order
}

/// Distinct non-blank values of `key_fn`, in first-seen order.
pub fn distinct_nonblank<F>(records: &[KpiRecord], key_fn: F) -> Vec<String>
where
    F: Fn(&KpiRecord) -> String,
{
    let mut seen: FxHashMap<String, ()> = FxHashMap::default();
    let mut out = Vec::new();
    for record in records {
        let key = key_fn(record);
        if key.is_empty() || seen.contains_key(&key) {
            continue;
        }
        seen.insert(key.clone(), ());
        out.push(key);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(main: &str) -> KpiRecord {
        KpiRecord {
            main_indicator: main.to_string(),
            ..KpiRecord::default()
        }
    }

    #[test]
    fn buckets_preserve_first_seen_order() {
        let data = vec![rec("ข"), rec("ก"), rec("ข"), rec("ค")];
        let buckets = bucket_by(&data, true, |r| r.main_name().to_string());
        let keys: Vec<&str> = buckets.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["ข", "ก", "ค"]);
        assert_eq!(buckets[0].1.len(), 2);
    }

    #[test]
    fn blank_keys_can_be_skipped_or_kept() {
        let data = vec![rec(""), rec("ก")];
        assert_eq!(bucket_by(&data, true, |r| r.main_name().to_string()).len(), 1);
        assert_eq!(bucket_by(&data, false, |r| r.main_name().to_string()).len(), 2);
        assert_eq!(distinct_nonblank(&data, |r| r.main_name().to_string()), vec!["ก"]);
    }
}
