/// Browser records as delivered by the chrome.* APIs
use serde::{Deserialize, Serialize};

/// A browser tab snapshot (`chrome.tabs.Tab`, only the fields we read)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabInfo {
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(default)]
    pub url: Option<String>,
}

impl TabInfo {
    pub fn new(id: i32, url: &str) -> TabInfo {
        TabInfo {
            id: Some(id),
            url: Some(url.to_string()),
        }
    }
}

/// A cookie record (`chrome.cookies.Cookie`)
///
/// `domain` may carry a leading dot for cookies shared across subdomains.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CookieInfo {
    pub domain: String,
}

/// A history record (`chrome.history.HistoryItem`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryItem {
    #[serde(default)]
    pub url: Option<String>,
}
