use std::sync::OnceLock;

use regex::Regex;

const MAX_SUGGESTIONS: usize = 3;
const ACTION_WORDS: &[&str] = &[
    "should", "could", "try", "consider", "add", "include", "improve", "update",
];

fn list_marker() -> &'static Regex {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    MARKER.get_or_init(|| Regex::new(r"^(?:[•\-*]|\d+[.)])\s*").expect("valid list marker regex"))
}

/// Pulls up to three actionable suggestions out of an advice reply.
///
/// Bulleted or numbered lines win; otherwise sentences containing an action
/// word are used.
pub fn extract_suggestions(reply: &str) -> Vec<String> {
    let marker = list_marker();

    let listed: Vec<String> = reply
        .lines()
        .map(str::trim)
        .filter(|line| marker.is_match(line))
        .map(|line| marker.replace(line, "").trim().to_string())
        .filter(|item| item.chars().count() > 10)
        .take(MAX_SUGGESTIONS)
        .collect();

    if !listed.is_empty() {
        return listed;
    }

    reply
        .split('.')
        .map(str::trim)
        .filter(|sentence| sentence.chars().count() > 20)
        .filter(|sentence| {
            let lower = sentence.to_lowercase();
            ACTION_WORDS.iter().any(|word| lower.contains(word))
        })
        .map(|sentence| format!("{sentence}."))
        .take(MAX_SUGGESTIONS)
        .collect()
}
