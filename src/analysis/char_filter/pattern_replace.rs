use regex::{NoExpand, Regex};

use super::CharFilter;
use crate::error::Result;

/// A char filter that replaces every match of a regex pattern.
///
/// The replacement is inserted literally; `$` has no special meaning.
#[derive(Debug, Clone)]
pub struct PatternReplaceCharFilter {
    name: &'static str,
    pattern: Regex,
    replacement: String,
}

impl PatternReplaceCharFilter {
    /// Create a new pattern replace char filter.
    pub fn new(name: &'static str, pattern: &str, replacement: &str) -> Result<Self> {
        Ok(Self {
            name,
            pattern: Regex::new(pattern)?,
            replacement: replacement.to_string(),
        })
    }

    /// The regex source of this rule.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// The literal replacement of this rule.
    pub fn replacement(&self) -> &str {
        &self.replacement
    }
}

impl CharFilter for PatternReplaceCharFilter {
    fn filter(&self, input: &str) -> String {
        self.pattern
            .replace_all(input, NoExpand(&self.replacement))
            .into_owned()
    }

    fn name(&self) -> &'static str {
        self.name
    }
}
