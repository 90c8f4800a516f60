//! Keyword extraction from task descriptions.

/// Split a task description into lowercase keyword probes.
///
/// Commas are dropped, the text is split on whitespace and only tokens
/// longer than `min_chars` are kept. Repeated tokens are kept once, in
/// first-seen order.
pub fn extract_keywords_with_min(task: &str, min_chars: usize) -> Vec<String> {
    let normalized = task.to_lowercase().replace(',', "");
    let mut keywords: Vec<String> = Vec::new();

    for token in normalized.split_whitespace() {
        if token.chars().count() > min_chars && !keywords.iter().any(|k| k == token) {
            keywords.push(token.to_string());
        }
    }

    keywords
}

/// Split a task description into keywords longer than three characters.
pub fn extract_keywords(task: &str) -> Vec<String> {
    extract_keywords_with_min(task, 3)
}

/// Count the distinct keywords that occur in `text`, ignoring case.
///
/// Keywords are expected in lowercase, as produced by [`extract_keywords`].
pub fn keyword_score(text: &str, keywords: &[String]) -> usize {
    let lower = text.to_lowercase();
    keywords
        .iter()
        .enumerate()
        .filter(|(i, k)| !keywords[..*i].contains(*k) && lower.contains(k.as_str()))
        .count()
}
