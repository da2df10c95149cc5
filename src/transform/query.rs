//! Pure text heuristics that turn a chat message into adapter queries.

use std::sync::OnceLock;

use regex::Regex;

fn filler_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)\b(side effects|dosage|uses|benefits|of|about|tell me|is|safe|medicine|tablet|syrup)\b",
        )
        .expect("valid regex")
    })
}

fn conjunction_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r" and | \+ | with | & ").expect("valid regex"))
}

/// Removes question filler ("side effects of", "tell me about", ...) from a query.
pub fn clean_query(query: &str) -> String {
    let stripped = filler_re().replace_all(query, " ");
    crate::transform::text::collapse_whitespace(&stripped)
}

/// Splits "x and y" style messages into one query per drug.
///
/// Falls back to the whole message when fewer than two parts longer than
/// two characters remain.
pub fn split_sub_queries(message: &str) -> Vec<String> {
    let lower = message.to_lowercase();
    let parts: Vec<String> = conjunction_re()
        .split(&lower)
        .map(str::trim)
        .filter(|part| part.chars().count() > 2)
        .map(str::to_string)
        .collect();

    if parts.len() > 1 {
        parts
    } else {
        vec![message.to_string()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_query_strips_filler_words_case_insensitively() {
        assert_eq!(clean_query("Tell me about Dexamethasone"), "Dexamethasone");
        assert_eq!(clean_query("side effects of Tylenol"), "Tylenol");
        assert_eq!(clean_query("Is Benadryl SAFE"), "Benadryl");
    }

    #[test]
    fn clean_query_keeps_words_that_contain_filler() {
        assert_eq!(clean_query("isoniazid"), "isoniazid");
        assert_eq!(clean_query("Profenid tablet"), "Profenid");
    }

    #[test]
    fn clean_query_can_empty_out() {
        assert_eq!(clean_query("tell me about side effects"), "");
    }

    #[test]
    fn split_sub_queries_uses_conjunctions() {
        assert_eq!(
            split_sub_queries("Tylenol and Benadryl"),
            vec!["tylenol", "benadryl"]
        );
        assert_eq!(
            split_sub_queries("zyrtec + advil with aleve & motrin"),
            vec!["zyrtec", "advil", "aleve", "motrin"]
        );
    }

    #[test]
    fn split_sub_queries_drops_short_parts_and_falls_back() {
        assert_eq!(split_sub_queries("Tylenol and it"), vec!["Tylenol and it"]);
        assert_eq!(split_sub_queries("Benadryl"), vec!["Benadryl"]);
    }
}
