/// Candidate domain collection for the manual deep clean
///
/// Two independent sources are merged into one hostname -> origins map:
/// - cookies, whose bare domains are expanded into guessed origins
/// - recent history, which contributes the exact origins observed
///
/// The origin guessing is a heuristic. It lives here, apart from the
/// orchestration, so it can be replaced on its own.
use crate::domain::{guess_origins, normalize_cookie_domain, parse_web_location};
use crate::tab_data::{CookieInfo, HistoryItem};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// How far back the history scan looks
pub const HISTORY_WINDOW_DAYS: u32 = 30;

/// Upper bound on history records per scan
pub const HISTORY_MAX_RESULTS: u32 = 10_000;

const MILLIS_PER_DAY: f64 = 24.0 * 60.0 * 60.0 * 1000.0;

/// Hostname -> set of origins to remove for it
pub type CandidateMap = BTreeMap<String, BTreeSet<String>>;

/// Query for `chrome.history.search`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryQuery {
    pub text: String,
    pub start_time: f64,
    pub max_results: u32,
}

impl HistoryQuery {
    /// Unfiltered query over the last thirty days, ending at `now_ms`
    pub fn recent(now_ms: f64) -> Self {
        HistoryQuery {
            text: String::new(),
            start_time: now_ms - f64::from(HISTORY_WINDOW_DAYS) * MILLIS_PER_DAY,
            max_results: HISTORY_MAX_RESULTS,
        }
    }
}

/// Build the candidate map from cookie and history snapshots
pub fn collect_candidates(cookies: &[CookieInfo], history: &[HistoryItem]) -> CandidateMap {
    let mut candidates = CandidateMap::new();

    for cookie in cookies {
        let domain = normalize_cookie_domain(&cookie.domain);
        candidates
            .entry(domain.to_string())
            .or_default()
            .extend(guess_origins(domain));
    }

    for item in history {
        let Some(location) = item.url.as_deref().and_then(parse_web_location) else {
            continue;
        };
        candidates
            .entry(location.hostname)
            .or_default()
            .insert(location.origin);
    }

    candidates
}
