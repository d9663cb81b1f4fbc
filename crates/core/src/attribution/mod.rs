//! Artist attribution for character artwork.
//!
//! - [`extractor`]: artwork URL → candidate identifier.
//! - [`normalize`]: matching-key normalization.
//! - [`lookup`]: normalized artist table built from store records.
//! - [`cache`]: shared, refreshable lookup snapshots.
//! - [`report`]: per-character analytics over extraction + resolution.
//! - [`reporter`]: cache-backed entry point for page code.
//! - [`diagnostics`]: advisory logging of reports and single URLs.

pub mod cache;
pub mod diagnostics;
pub mod extractor;
pub mod lookup;
pub mod normalize;
pub mod report;
pub mod reporter;
pub mod store;

pub use cache::ArtistCache;
pub use extractor::{extract, extract_identifier, Extraction};
pub use lookup::{ArtistLookup, KeyCollision};
pub use normalize::normalize;
pub use report::{analyze, AnalyticsReport, ArtworkRef, ArtworkRole, MatchResult, ReportInput};
pub use reporter::ArtworkReporter;
pub use store::{ArtistStore, StaticArtistStore};
