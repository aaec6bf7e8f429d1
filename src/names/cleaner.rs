//! Normalization of Persian and English administrative place names.
//!
//! Every fixed word list used here is a constant table so that additions can be
//! reviewed and tested on their own.

use regex::Regex;

/// Persian word for "province", written in front of province names.
pub const PERSIAN_PROVINCE_PREFIX: &str = "استان";

/// English word for "province", written after province names.
pub const ENGLISH_PROVINCE_SUFFIX: &str = "province";

/// Known inconsistent renderings of a whole Persian name, mapped to the
/// canonical spelling.
pub const PERSIAN_SPELLING_CORRECTIONS: &[(&str, &str)] =
    &[("کهگیلویه و بویر احمد", "کهگیلویه و بویراحمد")];

/// Persian administrative words removed from short names: province, county,
/// district, sub-district, village, city.
pub const PERSIAN_COMMON_WORDS: &[&str] = &["استان", "شهرستان", "بخش", "دهستان", "روستا", "شهر"];

/// English administrative words removed from short names.
pub const ENGLISH_COMMON_WORDS: &[&str] =
    &["province", "state", "county", "district", "region", "area"];

pub struct NameCleaner {
    persian_prefix: Regex,
    english_suffix: Regex,
    whitespace: Regex,
    common_words: Vec<Regex>,
}

impl NameCleaner {
    pub fn new() -> Self {
        // The patterns are built from the constant tables above and are known
        // to be valid. The prefix may be followed by whitespace or a ZWNJ.
        let persian_prefix = Regex::new(&format!(
            r"^(?:{}[\s\x{{200C}}]*)+",
            regex::escape(PERSIAN_PROVINCE_PREFIX)
        ))
        .unwrap();
        let english_suffix = Regex::new(&format!(
            r"(?i)(?:\s*\b{}\b)+\s*$",
            regex::escape(ENGLISH_PROVINCE_SUFFIX)
        ))
        .unwrap();
        let common_words = PERSIAN_COMMON_WORDS
            .iter()
            .chain(ENGLISH_COMMON_WORDS.iter())
            .map(|word| Regex::new(&format!(r"(?i)\b{}\b\s*", regex::escape(word))).unwrap())
            .collect();
        Self {
            persian_prefix,
            english_suffix,
            whitespace: Regex::new(r"\s+").unwrap(),
            common_words,
        }
    }

    fn collapse_whitespace(&self, name: &str) -> String {
        self.whitespace.replace_all(name, " ").trim().to_string()
    }

    /// Strip the leading "province" prefix, normalize whitespace and apply the
    /// known spelling corrections.
    pub fn clean_persian_name(&self, raw: &str) -> String {
        if raw.is_empty() {
            return String::new();
        }
        let stripped = self.persian_prefix.replace(raw.trim(), "");
        let cleaned = self.collapse_whitespace(&stripped);
        match PERSIAN_SPELLING_CORRECTIONS
            .iter()
            .find(|(variant, _)| *variant == cleaned)
        {
            Some((_, canonical)) => canonical.to_string(),
            None => cleaned,
        }
    }

    /// Strip the trailing "province" word (any case) and normalize whitespace.
    pub fn clean_english_name(&self, raw: &str) -> String {
        if raw.is_empty() {
            return String::new();
        }
        let stripped = self.english_suffix.replace(raw.trim(), "");
        self.collapse_whitespace(&stripped)
    }

    /// Remove every common administrative word, wherever it occurs in the
    /// name. Expects a name that has already been cleaned.
    pub fn create_short_name(&self, name: &str) -> String {
        let mut short = name.to_string();
        for word in &self.common_words {
            short = word.replace_all(&short, "").into_owned();
        }
        self.collapse_whitespace(&short)
    }
}

impl Default for NameCleaner {
    fn default() -> Self {
        Self::new()
    }
}
