//! Repository layer: one zero-sized struct per table, static async methods
//! taking the pool.

pub mod artist_repo;
pub mod character_artwork_repo;

pub use artist_repo::ArtistRepo;
pub use character_artwork_repo::CharacterArtworkRepo;
