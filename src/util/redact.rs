use std::borrow::Cow;

const MAX_BODY_EXCERPT_CHARS: usize = 200;

const REDACTED: &str = "[REDACTED]";

fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':' | '+' | '/' | '=')
}

fn token_end(input: &str, from: usize) -> usize {
    let mut end = from;
    for (i, c) in input[from..].char_indices() {
        if is_token_char(c) {
            end = from + i + c.len_utf8();
        } else {
            break;
        }
    }
    end
}

/// Replace the token following each occurrence of `marker`.
///
/// Prefix markers (`keep_marker == false`) are redacted together with their
/// token; key markers such as `"jwtToken":"` are kept so the excerpt still
/// shows which field was hidden.
fn scrub_after_marker(scrubbed: &mut String, marker: &str, keep_marker: bool) {
    let mut search_from = 0;
    while let Some(rel) = scrubbed[search_from..].find(marker) {
        let start = search_from + rel;
        let content_start = start + marker.len();
        let end = token_end(scrubbed, content_start);

        if end == content_start {
            search_from = content_start;
            continue;
        }

        let replace_from = if keep_marker { content_start } else { start };
        scrubbed.replace_range(replace_from..end, REDACTED);
        search_from = replace_from + REDACTED.len();
    }
}

const PREFIX_PATTERNS: [&str; 2] = ["eyJ", "ya29."];

const MARKER_PATTERNS: [&str; 8] = [
    "\"jwtToken\":\"",
    "\"jwtToken\": \"",
    "\"token\":\"",
    "\"token\": \"",
    "\"googleAuthCode\":\"",
    "\"googleAuthCode\": \"",
    "Authorization: ",
    "authorization: ",
];

fn needs_scrubbing(input: &str) -> bool {
    PREFIX_PATTERNS
        .iter()
        .chain(MARKER_PATTERNS.iter())
        .any(|pattern| input.contains(pattern))
}

/// Hide session tokens, JWTs and auth codes in text bound for the log.
pub fn scrub_tokens(input: &str) -> Cow<'_, str> {
    if !needs_scrubbing(input) {
        return Cow::Borrowed(input);
    }

    let mut scrubbed = input.to_string();
    for marker in MARKER_PATTERNS {
        scrub_after_marker(&mut scrubbed, marker, true);
    }
    for prefix in PREFIX_PATTERNS {
        scrub_after_marker(&mut scrubbed, prefix, false);
    }

    Cow::Owned(scrubbed)
}

/// Scrub and truncate a response body so it can be logged.
pub fn body_excerpt(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let scrubbed = scrub_tokens(&text);

    match scrubbed.char_indices().nth(MAX_BODY_EXCERPT_CHARS) {
        Some((idx, _)) => format!("{}...", &scrubbed[..idx]),
        None => scrubbed.into_owned(),
    }
}
