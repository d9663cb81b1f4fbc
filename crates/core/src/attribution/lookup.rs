//! Normalized artist lookup table.
//!
//! Pure logic, no store access. The cache builds one of these per refresh
//! and hands out immutable `Arc` snapshots.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::artist::Artist;
use crate::attribution::normalize::normalize;

/// Shortest key or identifier that can count as a truncated spelling.
const MIN_RELATED_PREFIX: usize = 4;

/// Two artists mapped to the same normalized key; the later one won.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyCollision {
    pub key: String,
    /// Name of the artist that was shadowed.
    pub shadowed: String,
    /// Name of the artist now served for `key`.
    pub winner: String,
}

/// Artists keyed by normalized name and, when present, normalized slug.
#[derive(Debug, Clone, Default)]
pub struct ArtistLookup {
    by_key: HashMap<String, Artist>,
    collisions: Vec<KeyCollision>,
    /// Normalized profile handles taken from artist URLs.
    handles: HashSet<String>,
    artist_count: usize,
}

impl ArtistLookup {
    /// A lookup that resolves nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build the lookup from artist records in iteration order.
    ///
    /// On a normalized-key collision the later artist silently replaces the
    /// earlier one. Collisions are recorded and available through
    /// [`collisions`](Self::collisions); they are never an error.
    pub fn build(artists: impl IntoIterator<Item = Artist>) -> Self {
        let mut lookup = Self::default();

        for artist in artists {
            lookup.artist_count += 1;

            if let Some(handle) = profile_handle(&artist.url) {
                lookup.handles.insert(handle);
            }

            let mut keys = vec![normalize(&artist.name)];
            if let Some(slug) = artist.slug.as_deref() {
                let slug_key = normalize(slug);
                if slug_key != keys[0] {
                    keys.push(slug_key);
                }
            }

            for key in keys {
                if key.is_empty() {
                    continue;
                }
                lookup.insert(key, artist.clone());
            }
        }

        lookup
    }

    fn insert(&mut self, key: String, artist: Artist) {
        if let Some(previous) = self.by_key.get(&key) {
            if previous.id != artist.id {
                tracing::debug!(
                    key = %key,
                    shadowed = %previous.name,
                    winner = %artist.name,
                    "Artist lookup key collision, later artist wins"
                );
                self.collisions.push(KeyCollision {
                    key: key.clone(),
                    shadowed: previous.name.clone(),
                    winner: artist.name.clone(),
                });
            }
        }
        self.by_key.insert(key, artist);
    }

    /// Resolve a raw identifier with a single exact lookup on its normalized form.
    pub fn resolve(&self, identifier: &str) -> Option<&Artist> {
        self.get(&normalize(identifier))
    }

    /// Look up an already-normalized key.
    pub fn get(&self, key: &str) -> Option<&Artist> {
        self.by_key.get(key)
    }

    /// Whether a normalized identifier plausibly refers to a known artist.
    ///
    /// True when the identifier is a known artist's profile handle, or when
    /// it and a known key are a prefix of one another with the shorter side
    /// at least [`MIN_RELATED_PREFIX`] characters and over half the longer.
    /// Used to tell parsing near-misses apart from artists that are absent
    /// from the table altogether.
    pub fn has_related_key(&self, normalized: &str) -> bool {
        if normalized.is_empty() {
            return false;
        }
        self.handles.contains(normalized)
            || self.by_key.keys().any(|key| prefix_related(key, normalized))
    }

    /// Number of artist records the lookup was built from.
    pub fn artist_count(&self) -> usize {
        self.artist_count
    }

    /// Number of distinct normalized keys.
    pub fn key_count(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    /// Key collisions observed while building, in build order.
    pub fn collisions(&self) -> &[KeyCollision] {
        &self.collisions
    }
}

fn prefix_related(a: &str, b: &str) -> bool {
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let short_len = short.chars().count();
    short_len >= MIN_RELATED_PREFIX
        && short_len * 2 > long.chars().count()
        && long.starts_with(short)
}

/// Last path segment of a profile URL, without a leading `@`, normalized.
///
/// `https://www.instagram.com/razz_pazazz/` gives `razzpazazz`. URLs with no
/// path after the host give `None`.
fn profile_handle(url: &str) -> Option<String> {
    let without_query = url.split(['?', '#']).next().unwrap_or(url);
    let after_scheme = match without_query.find("://") {
        Some(idx) => &without_query[idx + 3..],
        None => without_query,
    };
    let handle = after_scheme
        .split('/')
        .skip(1)
        .filter(|segment| !segment.is_empty())
        .last()?;
    let key = normalize(handle.trim_start_matches('@'));
    (!key.is_empty()).then_some(key)
}
