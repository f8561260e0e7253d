//! FILENAME: link-format/src/query.rs
//! URL query parsing and the token priority ladder.
//!
//! Three generations of share links coexist: `x` (index token), `s`
//! (legacy short token) and the original long-form params. Restore
//! tries them in that order.

use engine::{FilterState, KpiRecord, ThresholdStatus, ViewLevel};

use crate::short::decode_short_token;
use crate::token::{decode_index_token, encode_index_token};

/// Parsed query-string pairs with percent-decoding applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

fn decode_component(s: &str) -> String {
    let plus_normalised = s.replace('+', " ");
    match urlencoding::decode(&plus_normalised) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => plus_normalised,
    }
}

impl QueryParams {
    /// Parses `a=b&c=d`, with or without a leading `?`. Pairs without
    /// an `=` are kept with an empty value.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs = query
            .split('&')
            .filter(|part| !part.is_empty())
            .map(|part| match part.split_once('=') {
                Some((k, v)) => (decode_component(k), decode_component(v)),
                None => (decode_component(part), String::new()),
            })
            .collect();
        QueryParams { pairs }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Outcome of resolving a URL against the (possibly not yet loaded)
/// dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResolution {
    /// Filters restored from the URL, possibly with an explicit view.
    Applied {
        filters: FilterState,
        view: Option<ViewLevel>,
    },
    /// The URL carries an index token but the dataset is not loaded
    /// yet; resolve again with the same token once it is.
    PendingIndexToken(String),
    /// Nothing restorable in the URL.
    Default,
}

/// Resolves the query params in priority order: index token, short
/// token, long-form params. An index token that fails to decode falls
/// through to the older forms rather than aborting the restore.
pub fn resolve_query(params: &QueryParams, data: Option<&[KpiRecord]>) -> QueryResolution {
    if let Some(x) = params.get("x") {
        match data {
            Some(data) => {
                if let Some(decoded) = decode_index_token(data, x) {
                    return QueryResolution::Applied {
                        filters: decoded.filters,
                        view: decoded.view,
                    };
                }
            }
            None => return QueryResolution::PendingIndexToken(x.to_string()),
        }
    }

    if let Some(s) = params.get("s") {
        if let Some(filters) = decode_short_token(s) {
            return QueryResolution::Applied {
                filters,
                view: None,
            };
        }
    }

    let long = FilterState {
        selected_group: params.get("group").unwrap_or("").to_string(),
        selected_main_kpi: params.get("main").unwrap_or("").to_string(),
        selected_sub_kpi: params.get("sub").unwrap_or("").to_string(),
        selected_target: params.get("target").unwrap_or("").to_string(),
        selected_service: params.get("service").unwrap_or("").to_string(),
        status_filters: params
            .get("status")
            .unwrap_or("")
            .split(',')
            .filter_map(|s| ThresholdStatus::parse(s.trim()))
            .collect(),
    };
    if long.is_default() {
        QueryResolution::Default
    } else {
        QueryResolution::Applied {
            filters: long,
            view: None,
        }
    }
}

/// Canonical query string for the current state, or `None` when the
/// state is the default so the home URL stays clean.
pub fn share_query(
    data: &[KpiRecord],
    filters: &FilterState,
    view: Option<ViewLevel>,
) -> Option<String> {
    if filters.is_default() && view.unwrap_or(ViewLevel::Groups) == ViewLevel::Groups {
        return None;
    }
    let token = encode_index_token(data, filters, view);
    Some(format!("x={}", urlencoding::encode(&token)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::short::encode_short_token;

    fn rec(group: &str, main: &str) -> KpiRecord {
        KpiRecord {
            group: group.to_string(),
            main_indicator: main.to_string(),
            ..KpiRecord::default()
        }
    }

    fn sample() -> Vec<KpiRecord> {
        vec![rec("ก", "ม1"), rec("ข", "ม2")]
    }

    #[test]
    fn parses_percent_encoded_thai_params() {
        let p = QueryParams::parse("?group=%E0%B8%81&status=passed,near");
        assert_eq!(p.get("group"), Some("ก"));
        assert_eq!(p.get("status"), Some("passed,near"));
        assert_eq!(p.get("x"), None);
    }

    #[test]
    fn index_token_wins_when_data_is_available() {
        let data = sample();
        let f = FilterState {
            selected_group: "ก".to_string(),
            ..FilterState::default()
        };
        let q = share_query(&data, &f, Some(ViewLevel::Main)).unwrap();
        let params = QueryParams::parse(&q);
        match resolve_query(&params, Some(&data)) {
            QueryResolution::Applied { filters, view } => {
                assert_eq!(filters, f);
                assert_eq!(view, Some(ViewLevel::Main));
            }
            other => panic!("unexpected resolution: {:?}", other),
        }
    }

    #[test]
    fn index_token_is_parked_without_data() {
        let params = QueryParams::parse("x=1-abc.0");
        assert_eq!(
            resolve_query(&params, None),
            QueryResolution::PendingIndexToken("1-abc.0".to_string())
        );
    }

    #[test]
    fn stale_index_token_falls_back_to_short_token() {
        let data = sample();
        let f = FilterState {
            selected_group: "ข".to_string(),
            ..FilterState::default()
        };
        let query = format!("x=1-zzzz.0&s={}", encode_short_token(&f));
        let params = QueryParams::parse(&query);
        match resolve_query(&params, Some(&data)) {
            QueryResolution::Applied { filters, view } => {
                assert_eq!(filters, f);
                assert_eq!(view, None);
            }
            other => panic!("unexpected resolution: {:?}", other),
        }
    }

    #[test]
    fn long_params_are_the_last_resort() {
        let params = QueryParams::parse("group=ก&status=passed");
        match resolve_query(&params, Some(&sample())) {
            QueryResolution::Applied { filters, .. } => {
                assert_eq!(filters.selected_group, "ก");
                assert_eq!(filters.status_filters, vec![ThresholdStatus::Passed]);
            }
            other => panic!("unexpected resolution: {:?}", other),
        }
    }

    #[test]
    fn empty_query_resolves_to_default() {
        assert_eq!(
            resolve_query(&QueryParams::parse(""), Some(&sample())),
            QueryResolution::Default
        );
    }

    #[test]
    fn default_state_has_no_share_query() {
        assert_eq!(
            share_query(&sample(), &FilterState::default(), Some(ViewLevel::Groups)),
            None
        );
        assert!(share_query(&sample(), &FilterState::default(), Some(ViewLevel::Detail)).is_some());
    }
}
