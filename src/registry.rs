/// In-memory tab id -> last known URL mapping

use crate::tab_data::TabInfo;
use std::collections::HashMap;

/// Last known URL of every open tab
///
/// The map lives only as long as the background process. It is rebuilt
/// from a fresh tab enumeration on every (re)start and never merged with
/// earlier contents. None of its operations fail; unknown tabs are
/// reported as absent.
#[derive(Debug, Default)]
pub struct TabRegistry {
    urls: HashMap<i32, String>,
}

impl TabRegistry {
    pub fn new() -> Self {
        TabRegistry {
            urls: HashMap::new(),
        }
    }

    /// Replace the whole mapping with the tabs that have both an id and a URL
    pub fn replace_all(&mut self, tabs: &[TabInfo]) {
        self.urls = tabs
            .iter()
            .filter_map(|tab| match (tab.id, &tab.url) {
                (Some(id), Some(url)) => Some((id, url.clone())),
                _ => None,
            })
            .collect();
    }

    /// Record a navigation; a missing URL leaves the entry untouched
    pub fn record_navigation(&mut self, tab_id: i32, url: Option<&str>) {
        if let Some(url) = url {
            self.urls.insert(tab_id, url.to_string());
        }
    }

    /// Drop an entry without reporting its URL
    pub fn forget(&mut self, tab_id: i32) {
        self.urls.remove(&tab_id);
    }

    /// Remove a closed tab, handing back the URL it had before removal
    pub fn take(&mut self, tab_id: i32) -> Option<String> {
        self.urls.remove(&tab_id)
    }

    pub fn url(&self, tab_id: i32) -> Option<&str> {
        self.urls.get(&tab_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_all_skips_incomplete_tabs() {
        let mut registry = TabRegistry::new();
        let tabs = vec![
            TabInfo::new(1, "https://google.com"),
            TabInfo { id: Some(2), url: None },
            TabInfo { id: None, url: Some("https://github.com".to_string()) },
            TabInfo::new(3, "chrome://newtab"),
        ];

        registry.replace_all(&tabs);

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.url(1), Some("https://google.com"));
        assert_eq!(registry.url(2), None);
        assert_eq!(registry.url(3), Some("chrome://newtab"));
    }

    #[test]
    fn test_replace_all_discards_previous_state() {
        let mut registry = TabRegistry::new();
        registry.record_navigation(9, Some("https://stale.com"));

        let tabs = vec![TabInfo::new(1, "https://a.com")];
        registry.replace_all(&tabs);
        registry.replace_all(&tabs);

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.url(9), None);
        assert_eq!(registry.url(1), Some("https://a.com"));
    }

    #[test]
    fn test_record_navigation_upserts() {
        let mut registry = TabRegistry::new();

        registry.record_navigation(1, Some("https://a.com"));
        registry.record_navigation(1, Some("https://b.com/page"));
        registry.record_navigation(1, None);

        assert_eq!(registry.url(1), Some("https://b.com/page"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_take_returns_pre_deletion_value() {
        let mut registry = TabRegistry::new();
        registry.record_navigation(5, Some("https://a.com"));

        assert_eq!(registry.take(5), Some("https://a.com".to_string()));
        assert_eq!(registry.take(5), None);
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_forget_unknown_tab_is_noop() {
        let mut registry = TabRegistry::new();
        registry.record_navigation(1, Some("https://a.com"));

        registry.forget(2);
        registry.forget(1);

        assert_eq!(registry.len(), 0);
    }
}
