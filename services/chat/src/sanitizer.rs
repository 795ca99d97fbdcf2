//! Cleanup of raw model output before it is stored

use regex::Regex;
use std::sync::OnceLock;

/// Strip quote markers and bold markers from a model reply.
///
/// A leading `"> "` or `">"` is removed from every line and every `**` is
/// removed wherever it appears. Everything else is left untouched.
pub fn sanitize(text: &str) -> String {
    static QUOTE_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = QUOTE_REGEX
        .get_or_init(|| Regex::new(r"(?m)^> ?").expect("Failed to compile quote marker regex"));

    regex.replace_all(text, "").replace("**", "")
}
