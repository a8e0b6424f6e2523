/// "Is this domain still in use?" checks against the open tabs

use crate::domain::{is_same_or_related_host, web_hostname};
use crate::tab_data::TabInfo;
use std::collections::BTreeSet;

/// Hostnames of all open tabs showing an http(s) page
pub fn active_hostnames(tabs: &[TabInfo]) -> BTreeSet<String> {
    tabs.iter()
        .filter_map(|tab| tab.url.as_deref())
        .filter_map(web_hostname)
        .collect()
}

/// Tab-close check: some open tab shows exactly this hostname.
/// Scheme, port and path are ignored.
pub fn is_host_open(hostname: &str, tabs: &[TabInfo]) -> bool {
    tabs.iter()
        .filter_map(|tab| tab.url.as_deref())
        .filter_map(web_hostname)
        .any(|open| open == hostname)
}

/// Manual-clean check: an active hostname equals the domain, is a
/// subdomain of it, or is a parent domain of it.
pub fn is_protected(domain: &str, active: &BTreeSet<String>) -> bool {
    active
        .iter()
        .any(|active_host| is_same_or_related_host(active_host, domain))
}
