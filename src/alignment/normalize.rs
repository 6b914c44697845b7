use std::sync::LazyLock;

use regex::Regex;

static MARKUP_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>?").expect("valid markup regex"));

static LINE_BREAKS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\r\n|[\n\x0B\x0C\r\x{85}\x{2028}\x{2029}])+").expect("valid line break regex")
});

/// ASCII punctuation only; non-ASCII marks survive except the quotes below.
static PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[[:punct:]]+").expect("valid punctuation regex"));

const TYPOGRAPHIC_QUOTES: [char; 4] = ['\u{201C}', '\u{201D}', '\u{2018}', '\u{2019}'];

/// Canonical form used for word comparison and spell-check submission.
///
/// Line breaks are removed outright rather than replaced by spaces, so a word
/// broken across lines without a space is joined back together.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = MARKUP_TAG.replace_all(&lowered, "");
    let joined = LINE_BREAKS.replace_all(&stripped, "");
    let unpunctuated = PUNCTUATION.replace_all(&joined, "");
    let unquoted: String = unpunctuated
        .chars()
        .filter(|c| !TYPOGRAPHIC_QUOTES.contains(c))
        .collect();

    unquoted
        .split(' ')
        .filter(|piece| !piece.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
