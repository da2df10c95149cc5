//! Sentence-level helpers shared by the local and online response paths.

use std::sync::OnceLock;

use regex::Regex;

pub const MISSING_DETAILS: &str = "Details not available in standard format.";

const WARNING_KEYWORDS: &[&str] = &[
    "contraindicat",
    "avoid",
    "do not",
    "unsafe",
    "risk",
    "warning",
    "danger",
    "prohibit",
    "consult",
    "harm",
    "monitor",
    "caution",
    "severe",
    "fatal",
    "pregnancy",
    "breastfeeding",
    "allerg",
    "should not",
    "adverse",
    "stop",
];

const MEDICAL_KEYWORDS: &[&str] = &[
    "drug",
    "medication",
    "medicine",
    "tablet",
    "capsule",
    "syrup",
    "injection",
    "pharmaceutical",
    "treatment",
    "therapy",
    "dosage",
    "side effect",
    "symptom",
    "disease",
    "disorder",
    "infection",
    "antibiotic",
    "vitamin",
    "supplement",
    "vaccine",
    "analgesic",
    "antipyretic",
    "anti-inflammatory",
    "prescription",
    "otc",
    "medical",
];

const DOCTOR_PADDING: &str = "Consult your doctor for full safety profile.";
const LABEL_PADDING: &str = "Refer to package insert for complete contraindications.";

fn sentence_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^.!?]+[.!?]+").expect("valid regex"))
}

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("valid regex"))
}

fn newline_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\r\n|\n|\r").expect("valid regex"))
}

/// Collapses line breaks and runs of whitespace into single spaces.
pub fn collapse_whitespace(text: &str) -> String {
    whitespace_re().replace_all(text, " ").trim().to_string()
}

/// Splits on runs of non-terminal characters followed by `.`, `!` or `?`.
/// A trailing fragment without terminal punctuation is dropped.
fn split_sentences(clean: &str) -> Vec<&str> {
    sentence_re()
        .find_iter(clean)
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .collect()
}

/// First `max_count` whole sentences of `text`, joined by spaces.
pub fn extract_sentences(text: &str, max_count: usize) -> String {
    if text.trim().is_empty() {
        return MISSING_DETAILS.to_string();
    }

    let clean = collapse_whitespace(text);
    let clean = clean.strip_suffix("...").unwrap_or(&clean).trim_end();

    let sentences = split_sentences(clean);
    if sentences.is_empty() {
        if clean.chars().count() > 20 && !clean.ends_with('.') {
            return format!("{clean}.");
        }
        return clean.to_string();
    }

    sentences
        .into_iter()
        .take(max_count)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Sentences of `text` that carry a safety keyword, deduplicated, at most `limit`.
///
/// With fewer than two hits, a generic line is added for "doctor" or "label"
/// mentions that no kept sentence already covers.
pub fn extract_warning_sentences(text: &str, limit: usize) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let clean = collapse_whitespace(text);
    let sentences = split_sentences(&clean);
    if sentences.is_empty() {
        return Vec::new();
    }

    let mut found: Vec<String> = Vec::new();
    for sentence in sentences {
        let lower = sentence.to_lowercase();
        if !WARNING_KEYWORDS.iter().any(|k| lower.contains(k)) {
            continue;
        }
        if !found.iter().any(|s| s == sentence) {
            found.push(sentence.to_string());
        }
    }

    if found.len() < 2 {
        let lower = clean.to_lowercase();
        let covered = |topic: &str| found.iter().any(|s| s.to_lowercase().contains(topic));
        let pad_doctor = lower.contains("doctor") && !covered("doctor");
        let pad_label = lower.contains("label") && !covered("label");
        if pad_doctor {
            found.push(DOCTOR_PADDING.to_string());
        }
        if pad_label {
            found.push(LABEL_PADDING.to_string());
        }
    }

    found.truncate(limit);
    found
}

pub fn is_medical_context(text: &str) -> bool {
    let lower = text.to_lowercase();
    MEDICAL_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// Cuts label text longer than `max_chars` at the last sentence end inside the
/// limit (or the last word break when no sentence end is near), then flattens
/// line breaks to spaces.
pub fn truncate_at_sentence(text: &str, max_chars: usize) -> String {
    let mut out = text;
    if let Some((limit, _)) = text.char_indices().nth(max_chars) {
        let head = &text[..limit];
        out = match head.rfind('.') {
            Some(dot) if dot > 100 => &head[..=dot],
            _ => match head.rfind(char::is_whitespace) {
                Some(space) => head[..space].trim_end(),
                None => head,
            },
        };
    }
    newline_re().replace_all(out, " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_sentences_strips_ellipsis_and_keeps_whole_sentence() {
        assert_eq!(
            extract_sentences("Hello world. This is great! ...", 1),
            "Hello world."
        );
    }

    #[test]
    fn extract_sentences_joins_requested_count() {
        assert_eq!(
            extract_sentences("One.\nTwo!   Three? Four.", 3),
            "One. Two! Three?"
        );
    }

    #[test]
    fn extract_sentences_without_punctuation_appends_period_when_long() {
        assert_eq!(
            extract_sentences("an antibiotic used for infections", 2),
            "an antibiotic used for infections."
        );
        assert_eq!(extract_sentences("short text", 2), "short text");
    }

    #[test]
    fn extract_sentences_handles_empty_input() {
        assert_eq!(extract_sentences("  ", 2), MISSING_DETAILS);
    }

    #[test]
    fn warning_sentences_keep_only_keyword_hits() {
        let text = "Aspirin is common. Avoid in children. It relieves pain. \
                    Monitor for bleeding. Avoid in children.";
        let found = extract_warning_sentences(text, 3);
        assert_eq!(found, vec!["Avoid in children.", "Monitor for bleeding."]);
    }

    #[test]
    fn warning_sentences_respect_limit() {
        let text = "Avoid alcohol. Do not drive. Monitor liver enzymes. Stop if rash appears.";
        let found = extract_warning_sentences(text, 2);
        assert_eq!(found, vec!["Avoid alcohol.", "Do not drive."]);
    }

    #[test]
    fn warning_sentences_pad_doctor_and_label_topics() {
        let text = "Ask your doctor before use. Read the label. Caution in elderly.";
        let found = extract_warning_sentences(text, 3);
        assert_eq!(
            found,
            vec![
                "Caution in elderly.",
                "Consult your doctor for full safety profile.",
                "Refer to package insert for complete contraindications.",
            ]
        );
    }

    #[test]
    fn warning_sentences_do_not_pad_covered_topic() {
        let found = extract_warning_sentences("Consult a doctor if pain persists.", 3);
        assert_eq!(found, vec!["Consult a doctor if pain persists."]);
    }

    #[test]
    fn warning_sentences_empty_without_sentences() {
        assert!(extract_warning_sentences("avoid this", 3).is_empty());
        assert!(extract_warning_sentences("", 3).is_empty());
    }

    #[test]
    fn medical_context_detects_keywords() {
        assert!(is_medical_context("Dexamethasone is a corticosteroid MEDICATION."));
        assert!(!is_medical_context("Thriller is a 1982 album by Michael Jackson."));
    }

    #[test]
    fn truncate_at_sentence_cuts_at_last_period() {
        let sentence = "This label sentence is long enough to count as a real sentence. ";
        let text = sentence.repeat(40);
        let out = truncate_at_sentence(&text, 1500);
        assert!(out.chars().count() <= 1500);
        assert!(out.ends_with("sentence."));
    }

    #[test]
    fn truncate_at_sentence_never_cuts_mid_word_without_periods() {
        let text = "word ".repeat(400);
        let out = truncate_at_sentence(&text, 1500);
        assert!(out.ends_with("word"));
        assert!(out.chars().count() <= 1500);
    }

    #[test]
    fn truncate_at_sentence_flattens_newlines() {
        assert_eq!(truncate_at_sentence("a\nb\r\nc", 1500), "a b c");
    }
}
