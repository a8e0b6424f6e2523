/// Cleanup orchestration: automatic on tab close, manual deep clean on request
use crate::activity::{active_hostnames, is_host_open, is_protected};
use crate::candidates::{HistoryQuery, collect_candidates};
use crate::domain::parse_web_location;
use crate::error::Result;
use crate::host::{BrowserHost, SettingsStore};
use crate::registry::TabRegistry;
use crate::rules::RuleSet;
use std::cell::RefCell;
use std::collections::BTreeSet;

/// Kinds of site data the browser can remove
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataCategory {
    Cache,
    Cookies,
    LocalStorage,
    IndexedDb,
    ServiceWorkers,
    WebSql,
    FileSystems,
    PluginData,
}

impl DataCategory {
    /// Key used by `chrome.browsingData.DataTypeSet`
    pub fn key(self) -> &'static str {
        match self {
            DataCategory::Cache => "cache",
            DataCategory::Cookies => "cookies",
            DataCategory::LocalStorage => "localStorage",
            DataCategory::IndexedDb => "indexedDB",
            DataCategory::ServiceWorkers => "serviceWorkers",
            DataCategory::WebSql => "webSQL",
            DataCategory::FileSystems => "fileSystems",
            DataCategory::PluginData => "pluginData",
        }
    }
}

/// Removed when the last tab of a site closes
pub const AUTO_CLEAN_CATEGORIES: &[DataCategory] = &[
    DataCategory::Cache,
    DataCategory::Cookies,
    DataCategory::LocalStorage,
    DataCategory::IndexedDb,
    DataCategory::ServiceWorkers,
    DataCategory::WebSql,
    DataCategory::FileSystems,
];

/// Removed by a manual deep clean
pub const MANUAL_CLEAN_CATEGORIES: &[DataCategory] = &[
    DataCategory::Cache,
    DataCategory::Cookies,
    DataCategory::LocalStorage,
    DataCategory::IndexedDb,
    DataCategory::ServiceWorkers,
    DataCategory::WebSql,
    DataCategory::FileSystems,
    DataCategory::PluginData,
];

/// What happened when a tab closed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabCloseOutcome {
    /// No URL was known for the tab
    Untracked,
    /// The tab showed a non-http(s) or unparsable URL
    NotWebUrl,
    /// Another open tab still shows the same hostname
    StillOpen { hostname: String },
    /// The rules say to keep this hostname's data
    Kept { hostname: String },
    /// Data for the origin was removed
    Cleaned { origin: String },
}

/// Summary of a manual deep clean
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManualCleanReport {
    /// Domains found in cookies and history
    pub candidates: usize,
    /// Candidates skipped because a related host is open
    pub protected: usize,
    /// Origins handed to the removal call, sorted
    pub origins: Vec<String>,
}

/// The background process: tab registry plus both cleanup pipelines
///
/// The registry is the only mutable state. Borrows of it never span an
/// await, so overlapping event handlers on the single-threaded executor
/// cannot conflict.
pub struct Background<H, S> {
    host: H,
    settings: S,
    tabs: RefCell<TabRegistry>,
}

impl<H: BrowserHost, S: SettingsStore> Background<H, S> {
    pub fn new(host: H, settings: S) -> Self {
        Background {
            host,
            settings,
            tabs: RefCell::new(TabRegistry::new()),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Last known URL for a tab
    pub fn tracked_url(&self, tab_id: i32) -> Option<String> {
        self.tabs.borrow().url(tab_id).map(str::to_string)
    }

    pub fn tracked_tab_count(&self) -> usize {
        self.tabs.borrow().len()
    }

    /// Rebuild the registry from a fresh tab enumeration
    pub async fn initialize(&self) -> Result<usize> {
        let tabs = self.host.query_tabs().await?;
        let mut registry = self.tabs.borrow_mut();
        registry.replace_all(&tabs);
        log::info!("Tab cache initialized, {} tabs found", registry.len());
        Ok(registry.len())
    }

    pub fn on_tab_updated(&self, tab_id: i32, url: Option<&str>) {
        self.tabs.borrow_mut().record_navigation(tab_id, url);
    }

    /// A prerendered or discarded tab replaced another one
    pub async fn on_tab_replaced(&self, added_tab_id: i32, removed_tab_id: i32) {
        self.tabs.borrow_mut().forget(removed_tab_id);

        match self.host.get_tab(added_tab_id).await {
            Ok(tab) => self
                .tabs
                .borrow_mut()
                .record_navigation(added_tab_id, tab.url.as_deref()),
            Err(e) => log::debug!("Replacement tab {} not available: {}", added_tab_id, e),
        }
    }

    /// Tab-close handler; faults are logged and never reported to the host
    pub async fn on_tab_removed(&self, tab_id: i32) -> Option<TabCloseOutcome> {
        match self.handle_tab_closed(tab_id).await {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                log::error!("Cleanup for closed tab {} failed: {}", tab_id, e);
                None
            }
        }
    }

    /// Automatic path: clean the closed tab's origin if no other tab
    /// shows its hostname and the rules select it
    pub async fn handle_tab_closed(&self, tab_id: i32) -> Result<TabCloseOutcome> {
        let Some(closed_url) = self.tabs.borrow_mut().take(tab_id) else {
            return Ok(TabCloseOutcome::Untracked);
        };
        let Some(location) = parse_web_location(&closed_url) else {
            return Ok(TabCloseOutcome::NotWebUrl);
        };

        log::info!("Tab closed. Domain: {}", location.hostname);

        let remaining = self.host.query_tabs().await?;
        if is_host_open(&location.hostname, &remaining) {
            log::info!("Domain {} still active. Skipping.", location.hostname);
            return Ok(TabCloseOutcome::StillOpen {
                hostname: location.hostname,
            });
        }

        let settings = self.settings.load().await?;
        if !RuleSet::from_settings(&settings).should_clean(&location.hostname) {
            return Ok(TabCloseOutcome::Kept {
                hostname: location.hostname,
            });
        }

        log::info!("Cleaning data for {}", location.hostname);
        let origins = [location.origin];
        self.host
            .remove_browsing_data(&origins, AUTO_CLEAN_CATEGORIES)
            .await?;
        log::info!("Cleaned {}", origins[0]);

        let [origin] = origins;
        Ok(TabCloseOutcome::Cleaned { origin })
    }

    /// Manual path: scan cookies and recent history for leftover site data
    /// and remove everything the rules select in one batch. Resolves after
    /// the browser confirms the removal.
    pub async fn clean_now(&self) -> Result<ManualCleanReport> {
        log::info!("Starting deep manual cleanup");
        let settings = self.settings.load().await?;
        let rules = RuleSet::from_settings(&settings);

        let open_tabs = self.host.query_tabs().await?;
        let active = active_hostnames(&open_tabs);

        let cookies = self.host.get_all_cookies().await?;
        let query = HistoryQuery::recent(self.host.now_ms());
        let history = self.host.search_history(&query).await?;

        let candidates = collect_candidates(&cookies, &history);

        let mut report = ManualCleanReport {
            candidates: candidates.len(),
            ..ManualCleanReport::default()
        };
        let mut batch = BTreeSet::new();

        for (domain, origins) in candidates {
            if is_protected(&domain, &active) {
                log::debug!("{} is in use, skipping", domain);
                report.protected += 1;
                continue;
            }
            if rules.should_clean(&domain) {
                batch.extend(origins);
            }
        }

        if batch.is_empty() {
            log::info!("No matching data found to clean");
            return Ok(report);
        }

        report.origins = batch.into_iter().collect();
        log::info!(
            "Identified {} domains. Deleting {} origins...",
            report.candidates,
            report.origins.len()
        );
        self.host
            .remove_browsing_data(&report.origins, MANUAL_CLEAN_CATEGORIES)
            .await?;
        log::info!("Manual cleanup complete");

        Ok(report)
    }
}
