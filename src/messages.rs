/// Runtime messages exchanged with the options page
use serde::{Deserialize, Serialize};

/// A request sent with `chrome.runtime.sendMessage`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum Request {
    /// Run the manual deep clean now
    #[serde(rename = "CLEAN_NOW")]
    CleanNow,
}

impl Request {
    /// Parse an incoming message; anything unrecognized is not for us
    pub fn parse(message: &serde_json::Value) -> Option<Request> {
        Request::deserialize(message).ok()
    }
}

/// Reply sent back through `sendResponse`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub success: bool,
}
