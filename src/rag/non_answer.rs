//! Detection of "no information found" answers
//!
//! The synthesis prompts instruct the model to say explicitly when the
//! context lacks the answer; this module recognizes those phrasings so the
//! cascade can fall through to the next source. It is a fixed trigger-list
//! gate by contract, not a semantic judgment: false negatives (a real
//! non-answer phrased differently) and false positives (a real answer that
//! happens to contain a trigger) are accepted, and the list itself stays
//! inspectable and testable.

/// Phrasings the synthesis prompts mandate for failed grounding, in both
/// prompt languages.
const NON_ANSWER_TRIGGERS: &[&str] = &[
    "does not contain information",
    "cannot be found in the context",
    "not mentioned in the context",
    "no information provided",
    // Arabic
    "لا تتضمن",
    "غير مذكور",
    "لا يرد",
    "لا يحتوي السياق",
];

/// Does this synthesized text assert that no information was found?
///
/// Case-insensitive substring match against the fixed trigger list.
#[must_use]
pub fn is_non_answer(text: &str) -> bool {
    let text_lower = text.to_lowercase();
    NON_ANSWER_TRIGGERS.iter().any(|t| text_lower.contains(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_trigger_phrases() {
        assert!(is_non_answer(
            "The provided context does not contain information about turbines."
        ));
        assert!(is_non_answer("This topic is not mentioned in the context."));
        assert!(is_non_answer("The answer cannot be found in the context."));
        assert!(is_non_answer("There is no information provided on this."));
    }

    #[test]
    fn test_case_insensitive() {
        assert!(is_non_answer(
            "The context DOES NOT CONTAIN INFORMATION about X"
        ));
    }

    #[test]
    fn test_substring_match() {
        // Trigger embedded mid-sentence still counts
        assert!(is_non_answer(
            "Unfortunately the retrieved text does not contain information that would help."
        ));
    }

    #[test]
    fn test_real_answers_pass() {
        assert!(!is_non_answer("Paris is the capital of France."));
        assert!(!is_non_answer(
            "The maximum operating pressure is 12 bar, per section 4.2."
        ));
        assert!(!is_non_answer(""));
    }

    #[test]
    fn test_detects_arabic_triggers() {
        assert!(is_non_answer("لا يرد العنوان في النص"));
        assert!(is_non_answer("لا تتضمن الوثيقة هذه المعلومة"));
        assert!(!is_non_answer("عاصمة فرنسا هي باريس"));
    }
}
