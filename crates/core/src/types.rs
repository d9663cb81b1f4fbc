/// Artist records are keyed by UUID primary keys.
pub type ArtistId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
