//! Shared helpers for reading GitHub responses.

/// Longest error body echoed into a rejection message.
const MAX_BODY_CHARS: usize = 160;

/// Extracts GitHub's `message` field from an error body, falling back to a
/// truncated copy of the raw body.
pub(super) fn rejection_message(body: &str) -> String {
    extract_github_message(body).unwrap_or_else(|| {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            "(empty response body)".to_owned()
        } else {
            truncate_for_message(trimmed, MAX_BODY_CHARS)
        }
    })
}

fn extract_github_message(body: &str) -> Option<String> {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return None;
    };
    value
        .get("message")
        .and_then(serde_json::Value::as_str)
        .map(ToOwned::to_owned)
}

fn truncate_for_message(message: &str, max_chars: usize) -> String {
    let mut output: String = message.chars().take(max_chars).collect();
    if message.chars().nth(max_chars).is_some() {
        output.push_str("...");
    }
    output
}
