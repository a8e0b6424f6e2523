/// URL, hostname and origin helpers for ForgetMeNot
use url::Url;

/// Hostname and origin of a web page URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebLocation {
    pub hostname: String,
    pub origin: String,
}

/// Only http(s) pages carry site data we manage; everything else
/// (chrome://, about:, file://, extension pages) is ignored.
pub fn is_web_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Parse a web URL into its hostname and origin
///
/// Returns `None` for non-http(s) URLs and for URLs that fail to parse.
/// The origin is the ASCII serialization (scheme + host, plus the port
/// when it isn't the scheme default), e.g. `https://sub.example.com`.
pub fn parse_web_location(url: &str) -> Option<WebLocation> {
    if !is_web_url(url) {
        return None;
    }

    let parsed = Url::parse(url).ok()?;
    let hostname = parsed.host_str()?.to_string();
    let origin = parsed.origin().ascii_serialization();

    Some(WebLocation { hostname, origin })
}

/// Hostname of a web URL, if it has one
pub fn web_hostname(url: &str) -> Option<String> {
    parse_web_location(url).map(|location| location.hostname)
}

/// Strip the leading dot that marks a cookie as shared across subdomains
pub fn normalize_cookie_domain(domain: &str) -> &str {
    domain.strip_prefix('.').unwrap_or(domain)
}

/// Best-effort origin reconstruction for a bare cookie domain.
///
/// Cookie records carry no scheme and no `www.` prefix information, while
/// data removal works per origin, so every plausible variant is returned.
pub fn guess_origins(domain: &str) -> [String; 4] {
    [
        format!("http://{}", domain),
        format!("https://{}", domain),
        format!("http://www.{}", domain),
        format!("https://www.{}", domain),
    ]
}

/// True when `a` and `b` are the same host or one is a subdomain of the other
pub fn is_same_or_related_host(a: &str, b: &str) -> bool {
    a == b || is_subdomain_of(a, b) || is_subdomain_of(b, a)
}

fn is_subdomain_of(host: &str, parent: &str) -> bool {
    host.strip_suffix(parent)
        .is_some_and(|prefix| prefix.ends_with('.'))
}
