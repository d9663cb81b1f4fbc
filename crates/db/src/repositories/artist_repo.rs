//! Repository for the `artists` table.
//!
//! Every write fires the `artist_changes` notification through a table
//! trigger; callers do not publish invalidations themselves.

use p100_core::types::ArtistId;
use sqlx::PgPool;

use crate::models::artist::{ArtistRow, CreateArtist, UpdateArtist};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, url, platform, slug, created_at, updated_at";

/// Provides CRUD operations for artists.
pub struct ArtistRepo;

impl ArtistRepo {
    /// Insert a new artist, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateArtist) -> Result<ArtistRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO artists (name, url, platform, slug)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ArtistRow>(&query)
            .bind(&input.name)
            .bind(&input.url)
            .bind(input.platform.as_str())
            .bind(&input.slug)
            .fetch_one(pool)
            .await
    }

    /// Find an artist by id.
    pub async fn find_by_id(pool: &PgPool, id: ArtistId) -> Result<Option<ArtistRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM artists WHERE id = $1");
        sqlx::query_as::<_, ArtistRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an artist by exact name, ignoring case.
    ///
    /// Names are not unique; the oldest matching row is returned.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<ArtistRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM artists
             WHERE LOWER(name) = LOWER($1)
             ORDER BY created_at ASC
             LIMIT 1"
        );
        sqlx::query_as::<_, ArtistRow>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// List all artists ordered by name, then creation time.
    ///
    /// The secondary ordering keeps lookup collisions resolving the same
    /// way across refreshes.
    pub async fn list(pool: &PgPool) -> Result<Vec<ArtistRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM artists ORDER BY name ASC, created_at ASC");
        sqlx::query_as::<_, ArtistRow>(&query).fetch_all(pool).await
    }

    /// Update an artist. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: ArtistId,
        input: &UpdateArtist,
    ) -> Result<Option<ArtistRow>, sqlx::Error> {
        let query = format!(
            "UPDATE artists SET
                name = COALESCE($2, name),
                url = COALESCE($3, url),
                platform = COALESCE($4, platform),
                slug = COALESCE($5, slug),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ArtistRow>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.url)
            .bind(input.platform.map(|p| p.as_str()))
            .bind(&input.slug)
            .fetch_optional(pool)
            .await
    }

    /// Delete an artist by id. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: ArtistId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM artists WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Total number of artist rows.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM artists")
            .fetch_one(pool)
            .await
    }
}
