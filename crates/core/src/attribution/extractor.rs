//! Artist identifier extraction from artwork filenames.
//!
//! Uploaded artwork is named after its creator, e.g. `art by Davood.png` or
//! `render-by-zmpixie.webp`. The extractor decodes the last path segment,
//! drops the extension and runs an ordered chain of named patterns over the
//! remaining stem. The first pattern that applies decides the identifier.

use std::borrow::Cow;

use serde::Serialize;

/// Outcome of a successful extraction, kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Extraction {
    /// Percent-decoded last path segment.
    pub filename: String,
    /// Filename without its extension.
    pub stem: String,
    /// Name of the pattern that produced the identifier.
    pub pattern: &'static str,
    /// Trimmed, non-empty artist identifier.
    pub identifier: String,
}

/// A named matcher over a filename stem.
///
/// Returns `Some` when the pattern applies, even if the captured text turns
/// out to be blank.
struct IdentifierPattern {
    name: &'static str,
    matcher: fn(&str) -> Option<String>,
}

/// Patterns in priority order.
const PATTERNS: &[IdentifierPattern] = &[
    IdentifierPattern {
        name: "hyphenated-by",
        matcher: after_hyphenated_by,
    },
    IdentifierPattern {
        name: "spaced-by",
        matcher: after_spaced_by,
    },
    IdentifierPattern {
        name: "whole-name",
        matcher: whole_name,
    },
];

/// Names of the extraction patterns, in the order they are tried.
pub fn pattern_names() -> impl Iterator<Item = &'static str> {
    PATTERNS.iter().map(|p| p.name)
}

/// Derive a candidate artist identifier from an artwork URL.
///
/// Returns `None` for URLs whose filename cannot be decoded or yields a blank
/// identifier.
///
/// # Examples
///
/// ```
/// use p100_core::attribution::extract_identifier;
///
/// let url = "https://cdn.example.com/artworks/spirit/art%20by%20Davood.png";
/// assert_eq!(extract_identifier(url).as_deref(), Some("Davood"));
/// assert_eq!(extract_identifier("https://cdn.example.com/a/solo.png").as_deref(), Some("solo"));
/// ```
pub fn extract_identifier(url: &str) -> Option<String> {
    extract(url).map(|e| e.identifier)
}

/// Like [`extract_identifier`] but keeps the intermediate steps.
pub fn extract(url: &str) -> Option<Extraction> {
    let filename = decoded_filename(url)?;
    let stem = strip_extension(&filename);

    let (pattern, raw) = PATTERNS
        .iter()
        .find_map(|p| (p.matcher)(stem).map(|raw| (p.name, raw)))?;

    let identifier = raw.trim();
    if identifier.is_empty() {
        return None;
    }

    Some(Extraction {
        stem: stem.to_string(),
        pattern,
        identifier: identifier.to_string(),
        filename,
    })
}

/// Percent-decode the segment after the last `/`, ignoring query and fragment.
fn decoded_filename(url: &str) -> Option<String> {
    let path = match url.find(|c| c == '?' || c == '#') {
        Some(idx) => &url[..idx],
        None => url,
    };
    let segment = path.rsplit('/').next().unwrap_or(path);
    urlencoding::decode(segment).ok().map(Cow::into_owned)
}

/// Drop everything after the last `.`; no-op without a dot.
fn strip_extension(filename: &str) -> &str {
    match filename.rfind('.') {
        Some(idx) => &filename[..idx],
        None => filename,
    }
}

/// Text after the last ASCII-case-insensitive occurrence of `token`.
///
/// `token` must be lowercase ASCII so byte offsets line up with `stem`.
fn after_last<'a>(stem: &'a str, token: &str) -> Option<&'a str> {
    let lowered = stem.to_ascii_lowercase();
    lowered.rfind(token).map(|idx| &stem[idx + token.len()..])
}

fn after_hyphenated_by(stem: &str) -> Option<String> {
    after_last(stem, "-by-").map(str::to_string)
}

fn after_spaced_by(stem: &str) -> Option<String> {
    after_last(stem, " by ").map(str::to_string)
}

/// Fallback: the whole stem, with separators turned into spaces and any
/// leading `art by` / `by` removed.
fn whole_name(stem: &str) -> Option<String> {
    let spaced = stem.replace(['_', '-'], " ");
    let trimmed = spaced.trim();
    Some(strip_by_prefix(trimmed).to_string())
}

fn strip_by_prefix(s: &str) -> &str {
    strip_word(s, "art")
        .and_then(|rest| strip_word(rest, "by"))
        .or_else(|| strip_word(s, "by"))
        .unwrap_or(s)
}

/// Strip `word` (ASCII case-insensitive) when followed by whitespace.
fn strip_word<'a>(s: &'a str, word: &str) -> Option<&'a str> {
    let head = s.get(..word.len())?;
    if !head.eq_ignore_ascii_case(word) {
        return None;
    }
    let rest = &s[word.len()..];
    let trimmed = rest.trim_start();
    (trimmed.len() < rest.len()).then_some(trimmed)
}
