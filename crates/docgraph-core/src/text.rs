//! Text normalization for element text.
//!
//! Nothing here runs automatically; callers clean text before building the
//! graph or after projecting it.

use std::sync::OnceLock;

use regex::Regex;

/// Leading bullet characters, optionally followed by whitespace.
const BULLET_PATTERN: &str = r"^[\u{2022}\u{25CF}\u{25E6}\u{25AA}\u{25AB}\u{2023}\u{2043}\u{2219}\u{00B7}\u{25A0}\u{25A1}\u{27A2}\u{2713}\u{F0B7}*\-]\s*";

/// Runs of whitespace, including non-breaking spaces.
const WHITESPACE_PATTERN: &str = r"[\s\u{00A0}]+";

/// Which normalizations `clean` applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanOptions {
    /// Strip a leading bullet.
    pub bullets: bool,
    /// Collapse whitespace runs to one space and trim.
    pub extra_whitespace: bool,
    pub lowercase: bool,
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self {
            bullets: true,
            extra_whitespace: true,
            lowercase: true,
        }
    }
}

fn bullet_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(BULLET_PATTERN).expect("bullet pattern is valid"))
}

fn whitespace_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(WHITESPACE_PATTERN).expect("whitespace pattern is valid"))
}

/// Normalize `text` according to `options`.
pub fn clean(text: &str, options: &CleanOptions) -> String {
    let mut cleaned = text.to_string();

    if options.extra_whitespace {
        cleaned = whitespace_regex().replace_all(&cleaned, " ").trim().to_string();
    }
    if options.bullets {
        cleaned = bullet_regex().replace(cleaned.trim_start(), "").to_string();
    }
    if options.lowercase {
        cleaned = cleaned.to_lowercase();
    }

    cleaned.trim().to_string()
}

/// `clean` with every normalization enabled.
pub fn clean_default(text: &str) -> String {
    clean(text, &CleanOptions::default())
}
