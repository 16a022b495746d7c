//! Char filter implementations for text cleaning.
//!
//! A char filter rewrites a whole string into a new string. The
//! [`TextCleaner`](crate::analysis::cleaner::TextCleaner) is nothing more than
//! an ordered list of char filters, each one operating on the output of the
//! previous one.
//!
//! # Available Filters
//!
//! - [`pattern_replace::PatternReplaceCharFilter`] - Regex-based replacement
//! - [`emoji::EmojiNameCharFilter`] - Emoji glyph to name token replacement
//!
//! # Examples
//!
//! ```
//! use emosi::analysis::char_filter::CharFilter;
//! use emosi::analysis::char_filter::pattern_replace::PatternReplaceCharFilter;
//!
//! let filter = PatternReplaceCharFilter::new("digits", r"\d+", "").unwrap();
//! assert_eq!(filter.filter("tahun 2024 ini"), "tahun  ini");
//! ```

/// Trait for character filters that rewrite text.
pub trait CharFilter: Send + Sync {
    /// Apply this filter to the input text and return the rewritten text.
    fn filter(&self, input: &str) -> String;

    /// Get the name of this char filter.
    fn name(&self) -> &'static str;
}

pub mod emoji;
pub mod pattern_replace;
