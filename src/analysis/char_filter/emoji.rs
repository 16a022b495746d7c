//! Emoji to name-token char filter.
//!
//! Replaces emoji glyphs with their CLDR short names wrapped in colons, so a
//! face with tears of joy becomes `:face_with_tears_of_joy:`. The table
//! covers the emoji that show up in Indonesian social-media text often
//! enough to carry emotional signal.

use aho_corasick::{AhoCorasick, MatchKind};

use super::CharFilter;
use crate::error::{EmosiError, Result};

/// Default emoji glyph to name table.
///
/// Variants with the U+FE0F presentation selector come before their bare
/// glyph so the longest match consumes the selector too.
pub const DEFAULT_EMOJI_NAMES: &[(&str, &str)] = &[
    ("\u{1F600}", "grinning_face"),
    ("\u{1F603}", "grinning_face_with_big_eyes"),
    ("\u{1F604}", "grinning_face_with_smiling_eyes"),
    ("\u{1F601}", "beaming_face_with_smiling_eyes"),
    ("\u{1F606}", "grinning_squinting_face"),
    ("\u{1F605}", "grinning_face_with_sweat"),
    ("\u{1F923}", "rolling_on_the_floor_laughing"),
    ("\u{1F602}", "face_with_tears_of_joy"),
    ("\u{1F642}", "slightly_smiling_face"),
    ("\u{1F609}", "winking_face"),
    ("\u{1F60A}", "smiling_face_with_smiling_eyes"),
    ("\u{1F607}", "smiling_face_with_halo"),
    ("\u{1F970}", "smiling_face_with_hearts"),
    ("\u{1F60D}", "smiling_face_with_heart-eyes"),
    ("\u{1F618}", "face_blowing_a_kiss"),
    ("\u{1F917}", "smiling_face_with_open_hands"),
    ("\u{1F60E}", "smiling_face_with_sunglasses"),
    ("\u{1F610}", "neutral_face"),
    ("\u{1F611}", "expressionless_face"),
    ("\u{1F612}", "unamused_face"),
    ("\u{1F614}", "pensive_face"),
    ("\u{1F61E}", "disappointed_face"),
    ("\u{1F61F}", "worried_face"),
    ("\u{1F641}", "slightly_frowning_face"),
    ("\u{2639}\u{FE0F}", "frowning_face"),
    ("\u{2639}", "frowning_face"),
    ("\u{1F622}", "crying_face"),
    ("\u{1F62D}", "loudly_crying_face"),
    ("\u{1F625}", "sad_but_relieved_face"),
    ("\u{1F613}", "downcast_face_with_sweat"),
    ("\u{1F629}", "weary_face"),
    ("\u{1F97A}", "pleading_face"),
    ("\u{1F616}", "confounded_face"),
    ("\u{1F623}", "persevering_face"),
    ("\u{1F633}", "flushed_face"),
    ("\u{1F628}", "fearful_face"),
    ("\u{1F630}", "anxious_face_with_sweat"),
    ("\u{1F631}", "face_screaming_in_fear"),
    ("\u{1F620}", "angry_face"),
    ("\u{1F621}", "enraged_face"),
    ("\u{1F92C}", "face_with_symbols_on_mouth"),
    ("\u{1F624}", "face_with_steam_from_nose"),
    ("\u{1F63B}", "smiling_cat_with_heart-eyes"),
    ("\u{2764}\u{FE0F}", "red_heart"),
    ("\u{2764}", "red_heart"),
    ("\u{1F494}", "broken_heart"),
    ("\u{1F495}", "two_hearts"),
    ("\u{1F496}", "sparkling_heart"),
    ("\u{1F497}", "growing_heart"),
    ("\u{1F44D}", "thumbs_up"),
    ("\u{1F44E}", "thumbs_down"),
    ("\u{1F44F}", "clapping_hands"),
    ("\u{1F64F}", "folded_hands"),
    ("\u{1F4AA}", "flexed_biceps"),
    ("\u{1F525}", "fire"),
    ("\u{1F389}", "party_popper"),
];

/// A char filter that replaces emoji glyphs with `:name:` tokens.
pub struct EmojiNameCharFilter {
    ac: AhoCorasick,
    replacements: Vec<String>,
}

impl std::fmt::Debug for EmojiNameCharFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmojiNameCharFilter")
            .field("emoji", &self.replacements.len())
            .finish()
    }
}

impl EmojiNameCharFilter {
    /// Create a filter over the default emoji table.
    pub fn new() -> Result<Self> {
        Self::from_table(DEFAULT_EMOJI_NAMES.iter().copied())
    }

    /// Create a filter from `(glyph, name)` pairs. Names are wrapped in colons.
    pub fn from_table<'a, I>(table: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut glyphs = Vec::new();
        let mut replacements = Vec::new();
        for (glyph, name) in table {
            glyphs.push(glyph);
            replacements.push(format!(":{name}:"));
        }

        let ac = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostLongest)
            .build(&glyphs)
            .map_err(|e| EmosiError::analysis(format!("Failed to build emoji table: {e}")))?;

        Ok(Self { ac, replacements })
    }
}

impl CharFilter for EmojiNameCharFilter {
    fn filter(&self, input: &str) -> String {
        let mut output = String::with_capacity(input.len());
        let mut last_match_end = 0;

        for m in self.ac.find_iter(input) {
            output.push_str(&input[last_match_end..m.start()]);
            output.push_str(&self.replacements[m.pattern().as_usize()]);
            last_match_end = m.end();
        }

        output.push_str(&input[last_match_end..]);
        output
    }

    fn name(&self) -> &'static str {
        "emoji_name"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emoji_to_name() {
        let filter = EmojiNameCharFilter::new().unwrap();
        assert_eq!(filter.filter("lucu \u{1F602}"), "lucu :face_with_tears_of_joy:");
    }

    #[test]
    fn test_presentation_selector_is_consumed() {
        let filter = EmojiNameCharFilter::new().unwrap();
        assert_eq!(filter.filter("\u{2764}\u{FE0F}"), ":red_heart:");
        assert_eq!(filter.filter("\u{2764}"), ":red_heart:");
    }

    #[test]
    fn test_plain_text_untouched() {
        let filter = EmojiNameCharFilter::new().unwrap();
        assert_eq!(filter.filter("aku senang sekali"), "aku senang sekali");
    }

    #[test]
    fn test_custom_table() {
        let filter = EmojiNameCharFilter::from_table([("*", "star")]).unwrap();
        assert_eq!(filter.filter("a*b"), "a:star:b");
    }
}
