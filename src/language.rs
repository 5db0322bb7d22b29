//! Working-language detection for incoming questions
//!
//! The detected language steers prompt selection, extractor routing, and the
//! web-fallback gate, so it is computed exactly once per question and the
//! same value is threaded through the whole cascade.

use serde::Serialize;

/// Working language of a question.
///
/// Only English and Arabic change the cascade's behavior; every other
/// detected language is carried as `Other` with its ISO 639-3 code, and
/// undetectable input maps to the `Unknown` sentinel instead of an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Language {
    English,
    Arabic,
    Other(&'static str),
    Unknown,
}

impl Language {
    /// Short language code for prompts and logs.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Arabic => "ar",
            Self::Other(code) => code,
            Self::Unknown => "unknown",
        }
    }

    #[must_use]
    pub fn is_arabic(&self) -> bool {
        matches!(self, Self::Arabic)
    }

    #[must_use]
    pub fn is_english(&self) -> bool {
        matches!(self, Self::English)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Detect the working language of a question.
///
/// Deterministic for a given input. Detection failure (empty or unparseable
/// text) yields [`Language::Unknown`] rather than an error so that language
/// detection can never abort the question-answering flow.
#[must_use]
pub fn detect_language(text: &str) -> Language {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Language::Unknown;
    }

    match whatlang::detect(trimmed) {
        Some(info) => match info.lang() {
            whatlang::Lang::Eng => Language::English,
            whatlang::Lang::Ara => Language::Arabic,
            other => Language::Other(other.code()),
        },
        None => Language::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_english() {
        let lang = detect_language("What is the maximum operating pressure of the turbine?");
        assert_eq!(lang, Language::English);
        assert_eq!(lang.code(), "en");
    }

    #[test]
    fn test_detects_arabic() {
        let lang = detect_language("ما هو عنوان هذا التقرير؟");
        assert_eq!(lang, Language::Arabic);
        assert_eq!(lang.code(), "ar");
    }

    #[test]
    fn test_empty_text_is_unknown() {
        assert_eq!(detect_language(""), Language::Unknown);
        assert_eq!(detect_language("   \t\n"), Language::Unknown);
        assert_eq!(detect_language("").code(), "unknown");
    }

    #[test]
    fn test_detection_is_deterministic() {
        let text = "Which organizations are mentioned in the annual report?";
        let first = detect_language(text);
        for _ in 0..10 {
            assert_eq!(detect_language(text), first);
        }
    }
}
