//! Input normalization — the first stage of the resolution pipeline.
//!
//! Every entry path (typed text + Enter, autosuggest selection, direct URL)
//! funnels its raw string through [`normalize`] before matching, so the
//! matcher only ever compares canonical forms against canonical forms.

/// Canonicalize raw query text for matching.
///
/// Trims leading/trailing whitespace, collapses internal whitespace runs to
/// a single space, lowercases, and strips every character outside
/// `[a-z0-9 ,-]` (after lowercasing). Pure and locale-independent: identical
/// input always yields identical output.
///
/// Empty or whitespace-only input normalizes to the empty string, which the
/// matcher treats as "no match" — it never acts as a wildcard.
///
/// # Example
///
/// ```
/// use loqr::normalize;
///
/// assert_eq!(normalize("  KwaZulu-Natal  "), "kwazulu-natal");
/// assert_eq!(normalize("Sea   Point!"), "sea point");
/// assert_eq!(normalize("   "), "");
/// ```
#[must_use]
pub fn normalize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_space = false;

    for ch in raw.chars() {
        if ch.is_whitespace() {
            pending_space = true;
            continue;
        }
        let ch = ch.to_ascii_lowercase();
        if matches!(ch, 'a'..='z' | '0'..='9' | ',' | '-') {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(ch);
        }
        // Everything else (punctuation, non-ASCII) is stripped without
        // becoming a separator: "Durban!" and "Durban" normalize equally.
    }

    out
}
