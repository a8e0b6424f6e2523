/// ForgetMeNot - Chrome Extension that forgets site data when you leave
/// Built with Rust + WASM

mod activity;
mod candidates;
mod chrome;
mod cleanup;
mod domain;
mod error;
mod host;
mod messages;
mod registry;
mod rules;
mod storage;
mod tab_data;

pub use candidates::{CandidateMap, HistoryQuery, collect_candidates};
pub use cleanup::{Background, DataCategory, ManualCleanReport, TabCloseOutcome};
pub use error::Error;
pub use host::{BrowserHost, SettingsStore};
pub use rules::{RuleSet, matches};
pub use storage::{Mode, Settings};
pub use tab_data::{CookieInfo, HistoryItem, TabInfo};

use chrome::{ChromeHost, ChromeSettings};
use messages::{Request, Response};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{future_to_promise, spawn_local};

type ChromeBackground = Background<ChromeHost, ChromeSettings>;

thread_local! {
    static BACKGROUND: Rc<ChromeBackground> = Rc::new(Background::new(ChromeHost, ChromeSettings));
}

fn background() -> Rc<ChromeBackground> {
    BACKGROUND.with(Rc::clone)
}

// Set up panic hook and logging, then rebuild the tab cache: the service
// worker may have been restarted and lost it.
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());

    spawn_local(async {
        if let Err(e) = background().initialize().await {
            log::error!("Tab cache initialization failed: {}", e);
        }
    });
}

/// runtime.onStartup / runtime.onInstalled
#[wasm_bindgen]
pub async fn initialize_tab_cache() {
    if let Err(e) = background().initialize().await {
        log::error!("Tab cache initialization failed: {}", e);
    }
}

/// tabs.onUpdated, with `changeInfo.url`
#[wasm_bindgen]
pub fn on_tab_updated(tab_id: i32, url: Option<String>) {
    background().on_tab_updated(tab_id, url.as_deref());
}

/// tabs.onReplaced
#[wasm_bindgen]
pub async fn on_tab_replaced(added_tab_id: i32, removed_tab_id: i32) {
    background().on_tab_replaced(added_tab_id, removed_tab_id).await;
}

/// tabs.onRemoved
#[wasm_bindgen]
pub async fn on_tab_removed(tab_id: i32) {
    background().on_tab_removed(tab_id).await;
}

/// runtime.onMessage
///
/// Returns a promise resolving to the response for messages we handle,
/// `undefined` otherwise so the listener does not hold the channel open.
#[wasm_bindgen]
pub fn handle_message(message: JsValue) -> JsValue {
    let request = serde_wasm_bindgen::from_value::<serde_json::Value>(message)
        .ok()
        .and_then(|value| Request::parse(&value));

    match request {
        Some(Request::CleanNow) => future_to_promise(async move {
            let success = match background().clean_now().await {
                Ok(_) => true,
                Err(e) => {
                    log::error!("Manual cleanup failed: {}", e);
                    false
                }
            };
            serde_wasm_bindgen::to_value(&Response { success }).map_err(JsValue::from)
        })
        .into(),
        None => JsValue::UNDEFINED,
    }
}
