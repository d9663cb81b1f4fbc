//! Domain logic for P100 artwork attribution.
//!
//! Pure logic and traits only; database access lives in `p100-db` and change
//! notifications in `p100-events`.

pub mod artist;
pub mod attribution;
pub mod clock;
pub mod config;
pub mod error;
pub mod types;
