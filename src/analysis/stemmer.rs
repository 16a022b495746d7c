//! Stemming algorithms for reducing Indonesian words to their root forms.
//!
//! Indonesian morphology is affix based: inflectional particles
//! (`-lah`, `-kah`, `-tah`, `-pun`), possessive pronouns (`-ku`, `-mu`,
//! `-nya`), derivational suffixes (`-kan`, `-an`, `-i`) and up to three
//! derivational prefixes, some of which recode the first letter of the root
//! (`menyapu` → `sapu`, `memakai` → `pakai`).
//!
//! [`IndonesianStemmer`] works in two modes:
//!
//! - **Dictionary mode** (a root-word list is supplied): every removal
//!   candidate is checked against the dictionary and the first hit wins; a
//!   word with no dictionary root is returned unchanged.
//! - **Greedy mode** (no dictionary): affixes are stripped with length
//!   guards so that short roots such as `senang` or `sedih` survive.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use crate::error::{EmosiError, Result};

/// Maximum number of stacked derivational prefixes.
const MAX_PREFIXES: usize = 3;

const PARTICLES: &[&str] = &["lah", "kah", "tah", "pun"];
const POSSESSIVES: &[&str] = &["nya", "ku", "mu"];
const DERIVATIONAL_SUFFIXES: &[&str] = &["kan", "an", "i"];

/// Trait for stemming capabilities.
///
/// A stemmer receives a whole (already cleaned) text and returns the text
/// with every word reduced to its root.
pub trait Stemmer: Send + Sync {
    /// Stem every word of the text.
    fn stem(&self, text: &str) -> Result<String>;

    /// Get the name of this stemmer.
    fn name(&self) -> &'static str;
}

/// No-op stemmer. Returns text unchanged.
#[derive(Debug, Clone, Default)]
pub struct IdentityStemmer;

impl IdentityStemmer {
    pub fn new() -> Self {
        IdentityStemmer
    }
}

impl Stemmer for IdentityStemmer {
    fn stem(&self, text: &str) -> Result<String> {
        Ok(text.to_string())
    }

    fn name(&self) -> &'static str {
        "identity"
    }
}

/// Affix-stripping stemmer for Indonesian.
#[derive(Debug, Clone, Default)]
pub struct IndonesianStemmer {
    root_words: Arc<HashSet<String>>,
}

/// A prefix removal candidate. `light` marks the `di-`/`ke-`/`se-` family,
/// which needs a longer remainder in greedy mode.
struct PrefixCandidate {
    stem: String,
    light: bool,
}

impl IndonesianStemmer {
    /// Create a stemmer without a root dictionary (greedy mode).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a stemmer backed by a root-word dictionary.
    pub fn with_root_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let root_words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self {
            root_words: Arc::new(root_words),
        }
    }

    /// Load a newline-delimited root-word file.
    pub fn load_root_words<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            EmosiError::artifact(format!(
                "Failed to read root-word dictionary '{}': {}",
                path.display(),
                e
            ))
        })?;
        Ok(Self::with_root_words(content.lines()))
    }

    /// Whether a root dictionary is in use.
    pub fn has_dictionary(&self) -> bool {
        !self.root_words.is_empty()
    }

    fn is_root(&self, word: &str) -> bool {
        self.root_words.contains(word)
    }

    /// Stem a single lowercase word.
    pub fn stem_word(&self, word: &str) -> String {
        if let Some((left, right)) = word.split_once('-') {
            if left.is_empty() || right.is_empty() {
                return word.to_string();
            }
            // Reduplicated plural: buku-buku
            let left = self.stem_singular(left);
            let right = self.stem_singular(right);
            return if left == right {
                left
            } else {
                word.to_string()
            };
        }
        self.stem_singular(word)
    }

    fn stem_singular(&self, word: &str) -> String {
        if char_len(word) <= 3 || self.is_root(word) {
            return word.to_string();
        }

        if self.has_dictionary() {
            self.find_root(word).unwrap_or_else(|| word.to_string())
        } else {
            self.greedy_stem(word)
        }
    }

    fn find_root(&self, word: &str) -> Option<String> {
        let word = strip_any(word, PARTICLES, 2).unwrap_or_else(|| word.to_string());
        if self.is_root(&word) {
            return Some(word);
        }

        let word = strip_any(&word, POSSESSIVES, 2).unwrap_or(word);
        if self.is_root(&word) {
            return Some(word);
        }

        let mut bases: Vec<String> = DERIVATIONAL_SUFFIXES
            .iter()
            .filter_map(|suffix| strip_suffix(&word, suffix, 2))
            .collect();
        bases.push(word);

        for base in bases {
            if self.is_root(&base) {
                return Some(base);
            }
            if let Some(root) = self.find_root_by_prefix(&base, 0) {
                return Some(root);
            }
        }

        None
    }

    fn find_root_by_prefix(&self, word: &str, depth: usize) -> Option<String> {
        if depth == MAX_PREFIXES {
            return None;
        }
        for candidate in prefix_candidates(word, false) {
            if char_len(&candidate.stem) < 2 {
                continue;
            }
            if self.is_root(&candidate.stem) {
                return Some(candidate.stem);
            }
            if let Some(root) = self.find_root_by_prefix(&candidate.stem, depth + 1) {
                return Some(root);
            }
        }
        None
    }

    fn greedy_stem(&self, word: &str) -> String {
        let mut current = word.to_string();

        // One free prefix, then only the ber-/per- family may follow.
        for depth in 0..MAX_PREFIXES {
            let next = prefix_candidates(&current, depth > 0)
                .into_iter()
                .find(|c| char_len(&c.stem) >= if c.light { 5 } else { 4 });
            match next {
                Some(candidate) => current = candidate.stem,
                None => break,
            }
        }

        for suffixes in [PARTICLES, POSSESSIVES, DERIVATIONAL_SUFFIXES] {
            if let Some(stripped) = strip_any(&current, suffixes, 4) {
                current = stripped;
            }
        }

        current
    }
}

impl Stemmer for IndonesianStemmer {
    fn stem(&self, text: &str) -> Result<String> {
        let normalized: String = text
            .to_lowercase()
            .chars()
            .map(|c| {
                if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
                    c
                } else {
                    ' '
                }
            })
            .collect();

        Ok(normalized
            .split_whitespace()
            .map(|word| self.stem_word(word))
            .collect::<Vec<_>>()
            .join(" "))
    }

    fn name(&self) -> &'static str {
        "indonesian"
    }
}

fn char_len(word: &str) -> usize {
    word.chars().count()
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

fn starts_with_vowel(word: &str) -> bool {
    word.chars().next().is_some_and(is_vowel)
}

fn starts_with_any(word: &str, letters: &[char]) -> bool {
    word.chars().next().is_some_and(|c| letters.contains(&c))
}

fn strip_suffix(word: &str, suffix: &str, min_len: usize) -> Option<String> {
    word.strip_suffix(suffix)
        .filter(|stem| char_len(stem) >= min_len)
        .map(str::to_string)
}

/// Strip the first suffix of `suffixes` that leaves at least `min_len` chars.
fn strip_any(word: &str, suffixes: &[&str], min_len: usize) -> Option<String> {
    suffixes
        .iter()
        .find_map(|suffix| strip_suffix(word, suffix, min_len))
}

/// Prefix removal candidates for `word`, most likely first.
///
/// With `secondary` set only the `ber-`/`per-` family is considered, which is
/// what may legitimately follow another prefix (`memperbaiki`).
fn prefix_candidates(word: &str, secondary: bool) -> Vec<PrefixCandidate> {
    let heavy = |stem: String| PrefixCandidate { stem, light: false };
    let mut out = Vec::new();

    if let Some(rest) = word.strip_prefix("ber") {
        out.push(heavy(rest.to_string()));
        if starts_with_vowel(rest) {
            out.push(heavy(format!("r{rest}")));
        }
        return out;
    }
    if let Some(rest) = word.strip_prefix("per") {
        out.push(heavy(rest.to_string()));
        if starts_with_vowel(rest) {
            out.push(heavy(format!("r{rest}")));
        }
        return out;
    }
    if secondary {
        return out;
    }

    for light in ["di", "ke", "se"] {
        if let Some(rest) = word.strip_prefix(light) {
            out.push(PrefixCandidate {
                stem: rest.to_string(),
                light: true,
            });
            return out;
        }
    }

    if let Some(rest) = word.strip_prefix("bel") {
        if rest.starts_with("ajar") {
            out.push(heavy(rest.to_string()));
            return out;
        }
    }
    if let Some(rest) = word.strip_prefix("be") {
        // be-C-er: bekerja → kerja
        if rest.get(1..3) == Some("er") && !starts_with_vowel(rest) {
            out.push(heavy(rest.to_string()));
        }
        return out;
    }

    if let Some(rest) = word.strip_prefix("ter") {
        out.push(heavy(rest.to_string()));
        if starts_with_vowel(rest) {
            out.push(heavy(format!("r{rest}")));
        }
        return out;
    }

    for prefix in ["meng", "peng"] {
        if let Some(rest) = word.strip_prefix(prefix) {
            if starts_with_vowel(rest) {
                out.push(heavy(rest.to_string()));
                out.push(heavy(format!("k{rest}")));
            } else if starts_with_any(rest, &['g', 'h', 'q', 'k']) {
                out.push(heavy(rest.to_string()));
            }
            return out;
        }
    }

    for prefix in ["meny", "peny"] {
        if let Some(rest) = word.strip_prefix(prefix) {
            if starts_with_vowel(rest) {
                out.push(heavy(format!("s{rest}")));
            }
            return out;
        }
    }

    if let Some(rest) = word.strip_prefix("memper") {
        out.push(heavy(format!("per{rest}")));
        return out;
    }

    for prefix in ["mem", "pem"] {
        if let Some(rest) = word.strip_prefix(prefix) {
            if starts_with_any(rest, &['b', 'f', 'v']) {
                out.push(heavy(rest.to_string()));
            } else if starts_with_vowel(rest) {
                out.push(heavy(format!("p{rest}")));
                out.push(heavy(format!("m{rest}")));
            }
            return out;
        }
    }

    for prefix in ["men", "pen"] {
        if let Some(rest) = word.strip_prefix(prefix) {
            if starts_with_any(rest, &['c', 'd', 'j', 'z']) {
                out.push(heavy(rest.to_string()));
            } else if starts_with_vowel(rest) {
                out.push(heavy(format!("t{rest}")));
                out.push(heavy(format!("n{rest}")));
            }
            return out;
        }
    }

    if let Some(rest) = word.strip_prefix("pel") {
        if rest.starts_with("ajar") {
            out.push(heavy(rest.to_string()));
            return out;
        }
    }

    for prefix in ["me", "pe"] {
        if let Some(rest) = word.strip_prefix(prefix) {
            if starts_with_any(rest, &['l', 'r', 'w', 'y']) {
                out.push(heavy(rest.to_string()));
            }
            return out;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const ROOTS: &[&str] = &[
        "makan", "main", "baca", "ajar", "tangis", "sedih", "senang", "marah", "takut", "cinta",
        "bahagia", "rasa", "pakai", "sapu", "kenal", "ambil", "lihat", "kecewa", "kerja",
    ];

    fn dictionary_stemmer() -> IndonesianStemmer {
        IndonesianStemmer::with_root_words(ROOTS)
    }

    #[test]
    fn test_dictionary_prefixes() {
        let stemmer = dictionary_stemmer();
        assert_eq!(stemmer.stem_word("dimakan"), "makan");
        assert_eq!(stemmer.stem_word("bermain"), "main");
        assert_eq!(stemmer.stem_word("membaca"), "baca");
        assert_eq!(stemmer.stem_word("menangis"), "tangis");
        assert_eq!(stemmer.stem_word("menyapu"), "sapu");
        assert_eq!(stemmer.stem_word("mengenal"), "kenal");
        assert_eq!(stemmer.stem_word("mengambil"), "ambil");
        assert_eq!(stemmer.stem_word("melihat"), "lihat");
        assert_eq!(stemmer.stem_word("memakai"), "pakai");
        assert_eq!(stemmer.stem_word("bekerja"), "kerja");
    }

    #[test]
    fn test_dictionary_suffixes() {
        let stemmer = dictionary_stemmer();
        assert_eq!(stemmer.stem_word("makanan"), "makan");
        assert_eq!(stemmer.stem_word("pelajaran"), "ajar");
        assert_eq!(stemmer.stem_word("perasaan"), "rasa");
        assert_eq!(stemmer.stem_word("kesedihannya"), "sedih");
        assert_eq!(stemmer.stem_word("marahlah"), "marah");
    }

    #[test]
    fn test_dictionary_roots_are_kept() {
        let stemmer = dictionary_stemmer();
        assert_eq!(stemmer.stem_word("senang"), "senang");
        assert_eq!(stemmer.stem_word("kecewa"), "kecewa");
    }

    #[test]
    fn test_dictionary_unknown_word_unchanged() {
        let stemmer = dictionary_stemmer();
        assert_eq!(stemmer.stem_word("bukunya"), "bukunya");
        assert_eq!(stemmer.stem_word("xyzabc"), "xyzabc");
    }

    #[test]
    fn test_reduplicated_plural() {
        let stemmer = dictionary_stemmer();
        assert_eq!(stemmer.stem_word("buku-buku"), "buku");
        assert_eq!(stemmer.stem_word("makanan-makanan"), "makan");
        assert_eq!(stemmer.stem_word("tarik-ulur"), "tarik-ulur");
    }

    #[test]
    fn test_greedy_mode() {
        let stemmer = IndonesianStemmer::new();
        assert!(!stemmer.has_dictionary());
        assert_eq!(stemmer.stem_word("dimakan"), "makan");
        assert_eq!(stemmer.stem_word("makanan"), "makan");
        assert_eq!(stemmer.stem_word("bermain"), "main");
        assert_eq!(stemmer.stem_word("membaca"), "baca");
        assert_eq!(stemmer.stem_word("menangis"), "tangis");
        assert_eq!(stemmer.stem_word("ketakutan"), "takut");
        assert_eq!(stemmer.stem_word("menyedihkan"), "sedih");
        assert_eq!(stemmer.stem_word("cintanya"), "cinta");
        assert_eq!(stemmer.stem_word("marahlah"), "marah");
    }

    #[test]
    fn test_greedy_mode_keeps_short_roots() {
        let stemmer = IndonesianStemmer::new();
        assert_eq!(stemmer.stem_word("sedih"), "sedih");
        assert_eq!(stemmer.stem_word("senang"), "senang");
        assert_eq!(stemmer.stem_word("kecewa"), "kecewa");
        assert_eq!(stemmer.stem_word("aku"), "aku");
    }

    #[test]
    fn test_stem_text() {
        let stemmer = dictionary_stemmer();
        assert_eq!(stemmer.stem("Dimakan, MAKANAN!").unwrap(), "makan makan");
        assert_eq!(stemmer.stem("").unwrap(), "");
        assert_eq!(stemmer.stem("   ").unwrap(), "");
    }

    #[test]
    fn test_stem_is_deterministic() {
        let stemmer = IndonesianStemmer::new();
        let text = "ketakutan menyedihkan bermain";
        assert_eq!(stemmer.stem(text).unwrap(), stemmer.stem(text).unwrap());
    }

    #[test]
    fn test_identity_stemmer() {
        let stemmer = IdentityStemmer::new();
        assert_eq!(stemmer.stem("bermain").unwrap(), "bermain");
        assert_eq!(stemmer.name(), "identity");
    }

    #[test]
    fn test_load_root_words() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "makan\n\nMain\n").unwrap();

        let stemmer = IndonesianStemmer::load_root_words(file.path()).unwrap();
        assert!(stemmer.has_dictionary());
        assert_eq!(stemmer.stem_word("bermain"), "main");
    }
}
