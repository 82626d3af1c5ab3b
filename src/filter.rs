//! Request filtering for article tabs.
//!
//! Every request a tab issues is paused and passed through
//! [`RequestFilter::decide`]. Rules are checked in order and the first
//! match wins:
//!
//! 1. Blocked resource type (image, font, media, stylesheet by default) → abort
//! 2. URL matches a [`BlockPattern`] → abort
//! 3. Otherwise → continue unmodified
//!
//! # Pattern semantics
//!
//! | Written as | Variant | Matches when |
//! |------------|---------|--------------|
//! | `googlesyndication.com` | [`BlockPattern::Substring`] | the full URL contains the text |
//! | `*.doubleclick.net` | [`BlockPattern::Domain`] | the host is `doubleclick.net` or any subdomain of it |
//!
//! Matching is plain string comparison. No regex or glob engine is involved.

use serde::Deserialize;
use url::Url;

/// Resource categories reported by the browser for a paused request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Document,
    Stylesheet,
    Image,
    Media,
    Font,
    Script,
    Xhr,
    Fetch,
    Other,
}

/// Resource types that never matter for text extraction.
pub const DEFAULT_BLOCKED_KINDS: [ResourceKind; 4] = [
    ResourceKind::Image,
    ResourceKind::Font,
    ResourceKind::Media,
    ResourceKind::Stylesheet,
];

/// Ad and tracking hosts blocked by default.
pub const DEFAULT_BLOCK_LIST: [&str; 4] = [
    "googlesyndication.com",
    "*.doubleclick.net",
    "*.amazon-adsystem.com",
    "*.adnxs.com",
];

/// A single block-list entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum BlockPattern {
    /// Matches any URL containing the text.
    Substring(String),
    /// Matches a host equal to the domain or ending in `.domain`.
    Domain(String),
}

impl BlockPattern {
    /// Parse a pattern; a leading `*.` makes it a [`BlockPattern::Domain`].
    pub fn parse(pattern: &str) -> Self {
        match pattern.strip_prefix("*.") {
            Some(domain) => BlockPattern::Domain(domain.to_ascii_lowercase()),
            None => BlockPattern::Substring(pattern.to_string()),
        }
    }

    pub fn matches(&self, url: &str) -> bool {
        match self {
            BlockPattern::Substring(needle) => url.contains(needle.as_str()),
            BlockPattern::Domain(domain) => Url::parse(url)
                .ok()
                .and_then(|parsed| parsed.host_str().map(str::to_ascii_lowercase))
                .is_some_and(|host| {
                    host == *domain
                        || host
                            .strip_suffix(domain.as_str())
                            .is_some_and(|rest| rest.ends_with('.'))
                }),
        }
    }
}

impl From<String> for BlockPattern {
    fn from(pattern: String) -> Self {
        BlockPattern::parse(&pattern)
    }
}

/// What to do with a paused request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Abort,
    Continue,
}

/// The per-tab request policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestFilter {
    blocked_kinds: Vec<ResourceKind>,
    block_list: Vec<BlockPattern>,
}

impl RequestFilter {
    pub fn new(blocked_kinds: Vec<ResourceKind>, block_list: Vec<BlockPattern>) -> Self {
        Self {
            blocked_kinds,
            block_list,
        }
    }

    pub fn decide(&self, kind: ResourceKind, url: &str) -> Verdict {
        if self.blocked_kinds.contains(&kind) {
            return Verdict::Abort;
        }
        if self.block_list.iter().any(|pattern| pattern.matches(url)) {
            return Verdict::Abort;
        }
        Verdict::Continue
    }
}

impl Default for RequestFilter {
    fn default() -> Self {
        Self::new(
            DEFAULT_BLOCKED_KINDS.to_vec(),
            DEFAULT_BLOCK_LIST.iter().map(|p| BlockPattern::parse(p)).collect(),
        )
    }
}
