/// Collaborators the cleanup engine depends on
///
/// The background process talks to the browser only through these traits,
/// so tests can substitute in-memory fakes for the chrome.* APIs.
use crate::candidates::HistoryQuery;
use crate::cleanup::DataCategory;
use crate::error::Result;
use crate::storage::Settings;
use crate::tab_data::{CookieInfo, HistoryItem, TabInfo};

/// Tabs, cookies, history and browsing-data removal
#[allow(async_fn_in_trait)]
pub trait BrowserHost {
    /// Snapshot of every open tab
    async fn query_tabs(&self) -> Result<Vec<TabInfo>>;

    /// Current state of one tab; fails if the tab no longer exists
    async fn get_tab(&self, tab_id: i32) -> Result<TabInfo>;

    async fn get_all_cookies(&self) -> Result<Vec<CookieInfo>>;

    async fn search_history(&self, query: &HistoryQuery) -> Result<Vec<HistoryItem>>;

    /// Current time in milliseconds since the epoch
    fn now_ms(&self) -> f64;

    /// Remove the given categories of data for the given origins.
    /// Resolves only once the browser reports the removal complete.
    async fn remove_browsing_data(
        &self,
        origins: &[String],
        categories: &[DataCategory],
    ) -> Result<()>;
}

/// Read access to the user's settings
#[allow(async_fn_in_trait)]
pub trait SettingsStore {
    async fn load(&self) -> Result<Settings>;
}
