/// Blacklist/whitelist rule evaluation
use crate::storage::{Mode, Settings};
use regex::RegexBuilder;

/// A single compiled rule
///
/// Plain patterns run on `regex`. Patterns that need look-around or
/// backreferences, which users write in browser regex syntax, fall back
/// to `fancy_regex`.
#[derive(Debug, Clone)]
enum Pattern {
    Plain(regex::Regex),
    Fancy(fancy_regex::Regex),
}

impl Pattern {
    fn is_match(&self, hostname: &str) -> bool {
        match self {
            Pattern::Plain(regex) => regex.is_match(hostname),
            Pattern::Fancy(regex) => regex.is_match(hostname).unwrap_or_else(|e| {
                log::warn!("Rule {:?} failed on {}: {}", regex.as_str(), hostname, e);
                false
            }),
        }
    }
}

/// Rules compiled for one decision
///
/// Every pattern is compiled case-insensitively. Patterns that fail to
/// compile are logged and dropped; they never match and never abort
/// evaluation of the remaining rules.
#[derive(Debug, Clone)]
pub struct RuleSet {
    mode: Mode,
    has_rules: bool,
    patterns: Vec<Pattern>,
}

impl RuleSet {
    pub fn new<S: AsRef<str>>(mode: Mode, rules: &[S]) -> Self {
        let patterns = rules
            .iter()
            .filter_map(|rule| compile_rule(rule.as_ref()))
            .collect();

        RuleSet {
            mode,
            has_rules: !rules.is_empty(),
            patterns,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        RuleSet::new(settings.mode, &settings.rule_lines())
    }

    /// True if any valid rule matches somewhere in the hostname
    pub fn is_matched(&self, hostname: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.is_match(hostname))
    }

    /// Decide whether data for `hostname` should be removed
    ///
    /// With no rules at all, blacklist mode targets nothing and whitelist
    /// mode protects nothing. A list made only of invalid patterns still
    /// counts as non-empty and simply matches nothing.
    pub fn should_clean(&self, hostname: &str) -> bool {
        if !self.has_rules {
            return self.mode == Mode::Whitelist;
        }

        match self.mode {
            Mode::Blacklist => self.is_matched(hostname),
            Mode::Whitelist => !self.is_matched(hostname),
        }
    }
}

/// One-shot form of [`RuleSet::should_clean`]
pub fn matches<S: AsRef<str>>(hostname: &str, mode: Mode, rules: &[S]) -> bool {
    RuleSet::new(mode, rules).should_clean(hostname)
}

fn compile_rule(rule: &str) -> Option<Pattern> {
    let rule = rule.trim();
    let pattern = compile_pattern(rule).or_else(|e| {
        // Browsers read a `{` that opens no valid quantifier as a literal
        let escaped = escape_stray_braces(rule);
        if escaped == rule {
            Err(e)
        } else {
            compile_pattern(&escaped).map_err(|_| e)
        }
    });

    match pattern {
        Ok(pattern) => Some(pattern),
        Err(e) => {
            log::warn!("Invalid rule pattern {:?}: {}", rule, e);
            None
        }
    }
}

fn compile_pattern(rule: &str) -> Result<Pattern, fancy_regex::Error> {
    if let Ok(regex) = RegexBuilder::new(rule).case_insensitive(true).build() {
        return Ok(Pattern::Plain(regex));
    }

    fancy_regex::RegexBuilder::new(&format!("(?i){}", rule))
        .build()
        .map(Pattern::Fancy)
}

/// Escape `{` and `}` that are not part of a `{n}`, `{n,}` or `{n,m}`
/// quantifier. Escapes and character classes are copied unchanged.
fn escape_stray_braces(rule: &str) -> String {
    let chars: Vec<char> = rule.chars().collect();
    let mut out = String::with_capacity(rule.len());
    let mut in_class = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '\\' => {
                out.push(c);
                if let Some(&next) = chars.get(i + 1) {
                    out.push(next);
                    i += 1;
                }
            }
            '[' if !in_class => {
                in_class = true;
                out.push(c);
            }
            ']' if in_class => {
                in_class = false;
                out.push(c);
            }
            '{' if !in_class => match quantifier_len(&chars[i..]) {
                Some(len) => {
                    out.extend(&chars[i..i + len]);
                    i += len - 1;
                }
                None => out.push_str("\\{"),
            },
            '}' if !in_class => out.push_str("\\}"),
            _ => out.push(c),
        }
        i += 1;
    }

    out
}

/// Length of a `{n}`, `{n,}` or `{n,m}` quantifier at the start of `chars`
fn quantifier_len(chars: &[char]) -> Option<usize> {
    let mut i = 1;
    let digits = |from: usize| chars[from..].iter().take_while(|c| c.is_ascii_digit()).count();

    let min = digits(i);
    if min == 0 {
        return None;
    }
    i += min;

    if chars.get(i) == Some(&',') {
        i += 1;
        i += digits(i);
    }

    (chars.get(i) == Some(&'}')).then_some(i + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOSTS: &[&str] = &["a.com", "x.example.com", "localhost", "192.168.1.1", ""];

    #[test]
    fn test_empty_rules_blacklist_keeps_everything() {
        let none: [&str; 0] = [];
        for host in HOSTS {
            assert!(!matches(host, Mode::Blacklist, &none));
        }
    }

    #[test]
    fn test_empty_rules_whitelist_cleans_everything() {
        let none: [&str; 0] = [];
        for host in HOSTS {
            assert!(matches(host, Mode::Whitelist, &none));
        }
    }

    #[test]
    fn test_blacklist_matches_substring_case_insensitively() {
        assert!(matches("X.EXAMPLE.COM", Mode::Blacklist, &["example\\.com"]));
        assert!(matches("x.example.com", Mode::Blacklist, &["example\\.com"]));
        assert!(!matches("example.org", Mode::Blacklist, &["example\\.com"]));
    }

    #[test]
    fn test_whitelist_inverts_verdict() {
        let rules = ["keep-me-logged-in\\.com", "important-work\\.net"];

        assert!(!matches("keep-me-logged-in.com", Mode::Whitelist, &rules));
        assert!(!matches("mail.important-work.net", Mode::Whitelist, &rules));
        assert!(matches("tracker.io", Mode::Whitelist, &rules));
    }

    #[test]
    fn test_anchored_rules() {
        let rules = ["^facebook\\.com$"];

        assert!(matches("facebook.com", Mode::Blacklist, &rules));
        assert!(!matches("m.facebook.com", Mode::Blacklist, &rules));
    }

    #[test]
    fn test_invalid_pattern_is_skipped_not_fatal() {
        let rules = ["(unbalanced", "shop\\.com"];

        assert!(matches("shop.com", Mode::Blacklist, &rules));
        assert!(!matches("other.com", Mode::Blacklist, &rules));
    }

    #[test]
    fn test_only_invalid_patterns_match_nothing() {
        let rules = ["(unbalanced", "[z-a]"];

        assert!(!matches("shop.com", Mode::Blacklist, &rules));
        assert!(matches("shop.com", Mode::Whitelist, &rules));
    }

    #[test]
    fn test_look_ahead_rule_protects_host_in_whitelist() {
        let rules = ["^mail\\.google\\.com(?!\\.evil)"];

        assert!(!matches("mail.google.com", Mode::Whitelist, &rules));
        assert!(!matches("MAIL.GOOGLE.COM", Mode::Whitelist, &rules));
        assert!(matches("mail.google.com.evil", Mode::Whitelist, &rules));
    }

    #[test]
    fn test_backreference_rule() {
        let rules = ["^(\\w+)\\.\\1\\.com$"];

        assert!(matches("echo.echo.com", Mode::Blacklist, &rules));
        assert!(!matches("echo.other.com", Mode::Blacklist, &rules));
    }

    #[test]
    fn test_stray_brace_is_literal() {
        let rules = ["bank\\.com|legacy{"];

        assert!(!matches("bank.com", Mode::Whitelist, &rules));
        assert!(matches("bank.com", Mode::Blacklist, &rules));
        assert!(matches("legacy{", Mode::Blacklist, &["bank\\.com|legacy{"]));
        assert!(!matches("legacy", Mode::Blacklist, &["legacy{"]));
    }

    #[test]
    fn test_escape_stray_braces_keeps_quantifiers() {
        assert_eq!(escape_stray_braces("a{2}b{1,}c{1,3}"), "a{2}b{1,}c{1,3}");
        assert_eq!(escape_stray_braces("a{b}"), "a\\{b\\}");
        assert_eq!(escape_stray_braces("[{}]\\{x{"), "[{}]\\{x\\{");
        assert_eq!(escape_stray_braces("a{,2}"), "a\\{,2\\}");
    }

    #[test]
    fn test_rule_order_does_not_change_verdict() {
        let rules = ["(broken", "google\\.com", "^news\\.", "facebook"];
        let hosts = ["news.bbc.co.uk", "www.google.com", "facebook.com", "rust-lang.org"];

        let mut reversed = rules;
        reversed.reverse();
        let rotated = [rules[2], rules[3], rules[0], rules[1]];

        for mode in [Mode::Blacklist, Mode::Whitelist] {
            for host in hosts {
                let expected = matches(host, mode, &rules);
                assert_eq!(matches(host, mode, &reversed), expected, "{host} {mode:?}");
                assert_eq!(matches(host, mode, &rotated), expected, "{host} {mode:?}");
            }
        }
    }

    #[test]
    fn test_from_settings_uses_rule_lines() {
        let settings = Settings::new(Mode::Blacklist, "\n  shop\\.com  \n\n");
        let rule_set = RuleSet::from_settings(&settings);

        assert!(rule_set.should_clean("www.shop.com"));
        assert!(!rule_set.should_clean("example.com"));

        let blank = RuleSet::from_settings(&Settings::new(Mode::Whitelist, "\n \n"));
        assert!(blank.should_clean("example.com"));
    }
}
