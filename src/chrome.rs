/// chrome.* implementations of the host traits, backed by bridge.js

use crate::candidates::HistoryQuery;
use crate::cleanup::DataCategory;
use crate::error::{self, Error};
use crate::host::{BrowserHost, SettingsStore};
use crate::storage::Settings;
use crate::tab_data::{CookieInfo, HistoryItem, TabInfo};
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;

// Import JS bridge functions
#[wasm_bindgen(module = "/bridge.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn queryTabs() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn getTab(tab_id: i32) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn getAllCookies() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn searchHistory(query: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn removeBrowsingData(origins: JsValue, data_types: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn getSettings(defaults: JsValue) -> Result<JsValue, JsValue>;
}

fn host_error(call: &str, e: JsValue) -> Error {
    Error::Host(format!("{} failed: {:?}", call, e))
}

fn parse<T: DeserializeOwned>(value: JsValue) -> error::Result<T> {
    Ok(serde_wasm_bindgen::from_value(value)?)
}

/// The real browser
#[derive(Debug, Clone, Copy, Default)]
pub struct ChromeHost;

impl BrowserHost for ChromeHost {
    async fn query_tabs(&self) -> error::Result<Vec<TabInfo>> {
        let tabs_js = queryTabs().await.map_err(|e| host_error("tabs.query", e))?;
        parse(tabs_js)
    }

    async fn get_tab(&self, tab_id: i32) -> error::Result<TabInfo> {
        let tab_js = getTab(tab_id).await.map_err(|e| host_error("tabs.get", e))?;
        parse(tab_js)
    }

    async fn get_all_cookies(&self) -> error::Result<Vec<CookieInfo>> {
        let cookies_js = getAllCookies()
            .await
            .map_err(|e| host_error("cookies.getAll", e))?;
        parse(cookies_js)
    }

    async fn search_history(&self, query: &HistoryQuery) -> error::Result<Vec<HistoryItem>> {
        let query_js = serde_wasm_bindgen::to_value(query)?;
        let items_js = searchHistory(query_js)
            .await
            .map_err(|e| host_error("history.search", e))?;
        parse(items_js)
    }

    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }

    async fn remove_browsing_data(
        &self,
        origins: &[String],
        categories: &[DataCategory],
    ) -> error::Result<()> {
        let keys: Vec<&str> = categories.iter().map(|c| c.key()).collect();
        let origins_js = serde_wasm_bindgen::to_value(origins)?;
        let keys_js = serde_wasm_bindgen::to_value(&keys)?;

        removeBrowsingData(origins_js, keys_js)
            .await
            .map_err(|e| host_error("browsingData.remove", e))
    }
}

/// Settings read from chrome.storage.local on every call
#[derive(Debug, Clone, Copy, Default)]
pub struct ChromeSettings;

impl SettingsStore for ChromeSettings {
    async fn load(&self) -> error::Result<Settings> {
        let defaults = serde_wasm_bindgen::to_value(&Settings::default())?;
        let settings_js = getSettings(defaults)
            .await
            .map_err(|e| host_error("storage.local.get", e))?;
        parse(settings_js)
    }
}
