//! Matching-key normalization for artist names, slugs and identifiers.

/// Lowercase `s` and drop every whitespace, hyphen and underscore.
///
/// `"Polina Butterfly"`, `"polina-butterfly"` and `"Polina_Butterfly"` all
/// normalize to `"polinabutterfly"`.
pub fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}
