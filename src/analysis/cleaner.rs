//! Noise removal for social-media text.
//!
//! The [`TextCleaner`] is an ordered table of char filters. Each rule runs on
//! the output of the previous one, so the order is part of the behavior:
//! later rules are frequently no-ops given earlier ones, but not for every
//! input, and the whole table is kept as-is rather than deduplicated.
//!
//! ```text
//! emoticon bytes → URLs → HTML → mentions → markers → symbols → digits
//!                → residual hashtags/mentions/punctuation → emoji names → trim
//! ```
//!
//! # Examples
//!
//! ```
//! use emosi::analysis::cleaner::TextCleaner;
//!
//! let cleaner = TextCleaner::new().unwrap();
//! let cleaned = cleaner.clean("cek https://x.co/abc @someone <b>keren</b> 100%!!");
//! assert_eq!(cleaned, "cek keren");
//! ```

use std::sync::Arc;

use crate::analysis::char_filter::CharFilter;
use crate::analysis::char_filter::emoji::EmojiNameCharFilter;
use crate::analysis::char_filter::pattern_replace::PatternReplaceCharFilter;
use crate::error::Result;

/// `(name, pattern, replacement)` rules applied before emoji naming.
pub const DEFAULT_CLEANING_RULES: &[(&str, &str, &str)] = &[
    ("emoticon_bytes", r"\s*(?:\\x[A-Fa-f0-9]{2})+", ""),
    (
        "url",
        r"(www\.[^\s]+)|(https?://[^\s]+)|(http?://[^\s]+)",
        "",
    ),
    ("html_tag", r"<[^>]*>", ""),
    ("mention_alnum", r"@[A-Za-z0-9]+", ""),
    ("newline", r"\n", " "),
    ("mention_word", r"@[\w\-]+", ""),
    ("retweet_marker", "RT", ""),
    ("user_marker", "USER", ""),
    ("url_marker_upper", " URL", " "),
    ("url_marker_lower", " url", " "),
    ("plus_sign", r"\+", " "),
    ("whitespace", r"\s+", " "),
    ("non_alphanumeric", "[^0-9a-zA-Z]", " "),
    ("non_alphabetic", "[^a-zA-Z]", " "),
    ("extra_spaces", " +", " "),
    ("url_residue", r"http\S+", ""),
    ("hashtag", r"#\w+", ""),
    ("mention_residue", r"@\w+", ""),
    ("retweet_residue", "RT", ""),
    ("punctuation", r"[^\w\s]", ""),
    ("newline_residue", r"\n", " "),
    ("digits", r"\d+", ""),
];

/// `(name, pattern, replacement)` rules applied after emoji naming.
pub const FINAL_CLEANING_RULES: &[(&str, &str, &str)] = &[
    ("whitespace_final", r"\s+", " "),
    ("trim", r"^\s+|\s+$", ""),
];

/// Ordered rule table that strips noise from text.
#[derive(Clone)]
pub struct TextCleaner {
    rules: Vec<Arc<dyn CharFilter>>,
}

impl std::fmt::Debug for TextCleaner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.rules.iter().map(|rule| rule.name()))
            .finish()
    }
}

impl TextCleaner {
    /// Create a cleaner with the default rule table.
    pub fn new() -> Result<Self> {
        let mut rules = Self::compile(DEFAULT_CLEANING_RULES)?;
        rules.push(Arc::new(EmojiNameCharFilter::new()?));
        rules.extend(Self::compile(FINAL_CLEANING_RULES)?);
        Ok(Self { rules })
    }

    /// Create a cleaner from an explicit ordered rule list.
    pub fn with_rules(rules: Vec<Arc<dyn CharFilter>>) -> Self {
        Self { rules }
    }

    fn compile(table: &[(&'static str, &str, &str)]) -> Result<Vec<Arc<dyn CharFilter>>> {
        table
            .iter()
            .map(|&(name, pattern, replacement)| {
                let rule: Arc<dyn CharFilter> =
                    Arc::new(PatternReplaceCharFilter::new(name, pattern, replacement)?);
                Ok(rule)
            })
            .collect()
    }

    /// The rules, in application order.
    pub fn rules(&self) -> &[Arc<dyn CharFilter>] {
        &self.rules
    }

    /// Look up a rule by name.
    pub fn rule(&self, name: &str) -> Option<&Arc<dyn CharFilter>> {
        self.rules.iter().find(|rule| rule.name() == name)
    }

    /// Apply every rule in order.
    pub fn clean(&self, text: &str) -> String {
        self.rules
            .iter()
            .fold(text.to_string(), |current, rule| rule.filter(&current))
    }
}
