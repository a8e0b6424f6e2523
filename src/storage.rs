/// Settings stored in chrome.storage.local

use serde::{Deserialize, Serialize};

/// How the rule list is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Clean only the domains the rules match
    #[default]
    Blacklist,
    /// Clean every domain the rules do not match
    Whitelist,
}

/// User settings: mode plus a newline-separated block of regex rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub mode: Mode,
    pub rules: String,
}

impl Settings {
    pub fn new(mode: Mode, rules: &str) -> Self {
        Settings {
            mode,
            rules: rules.to_string(),
        }
    }

    /// One rule per non-blank line, surrounding whitespace trimmed
    pub fn rule_lines(&self) -> Vec<&str> {
        self.rules
            .split('\n')
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings::new(Mode::Blacklist, "")
    }
}
