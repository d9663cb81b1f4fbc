//! Database-level tests for the artist store and character artwork source.
//!
//! Each test gets a fresh database with the crate's migrations applied.

use p100_core::artist::{CharacterType, Platform};
use p100_core::attribution::{analyze, ArtistLookup, ArtistStore};
use p100_db::models::artist::{CreateArtist, UpdateArtist};
use p100_db::repositories::{ArtistRepo, CharacterArtworkRepo};
use p100_db::PgArtistStore;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_artist(name: &str, url: &str, platform: Platform) -> CreateArtist {
    CreateArtist {
        name: name.to_string(),
        url: url.to_string(),
        platform,
        slug: None,
    }
}

// ---------------------------------------------------------------------------
// ArtistRepo
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_create_and_find(pool: PgPool) {
    let created = ArtistRepo::create(
        &pool,
        &new_artist("Davood", "https://x.com/davoodisatwat", Platform::Twitter),
    )
    .await
    .unwrap();
    assert_eq!(created.platform, "twitter");

    let by_id = ArtistRepo::find_by_id(&pool, created.id).await.unwrap();
    assert_eq!(by_id.map(|a| a.name), Some("Davood".to_string()));

    let by_name = ArtistRepo::find_by_name(&pool, "DAVOOD").await.unwrap();
    assert_eq!(by_name.map(|a| a.id), Some(created.id));

    assert!(ArtistRepo::find_by_name(&pool, "davoodisatwat")
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_is_ordered_by_name(pool: PgPool) {
    for name in ["Vivi", "CIII", "Emilu"] {
        ArtistRepo::create(
            &pool,
            &new_artist(name, "https://x.com/someone", Platform::Twitter),
        )
        .await
        .unwrap();
    }

    let names: Vec<_> = ArtistRepo::list(&pool)
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.name)
        .collect();
    assert_eq!(names, ["CIII", "Emilu", "Vivi"]);
    assert_eq!(ArtistRepo::count(&pool).await.unwrap(), 3);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_applies_only_given_fields(pool: PgPool) {
    let created = ArtistRepo::create(
        &pool,
        &new_artist("RAZZ", "https://www.instagram.com/razz_pazazz/", Platform::Instagram),
    )
    .await
    .unwrap();

    let updated = ArtistRepo::update(
        &pool,
        created.id,
        &UpdateArtist {
            slug: Some("razz_pazazz".to_string()),
            ..UpdateArtist::default()
        },
    )
    .await
    .unwrap()
    .expect("row should exist");

    assert_eq!(updated.name, "RAZZ");
    assert_eq!(updated.platform, "instagram");
    assert_eq!(updated.slug.as_deref(), Some("razz_pazazz"));
    assert!(updated.updated_at >= created.updated_at);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_missing_returns_none(pool: PgPool) {
    let result = ArtistRepo::update(&pool, uuid::Uuid::new_v4(), &UpdateArtist::default())
        .await
        .unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete(pool: PgPool) {
    let created = ArtistRepo::create(
        &pool,
        &new_artist("Shaggy", "https://x.com/HaddieTh3Baddie", Platform::Twitter),
    )
    .await
    .unwrap();

    assert!(ArtistRepo::delete(&pool, created.id).await.unwrap());
    assert!(!ArtistRepo::delete(&pool, created.id).await.unwrap());
    assert_eq!(ArtistRepo::count(&pool).await.unwrap(), 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_platform_check_constraint(pool: PgPool) {
    let result = sqlx::query(
        "INSERT INTO artists (name, url, platform) VALUES ('X', 'https://example.com', 'myspace')",
    )
    .execute(&pool)
    .await;
    assert!(result.is_err());
}

// ---------------------------------------------------------------------------
// PgArtistStore
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_store_feeds_lookup(pool: PgPool) {
    let mut input = new_artist("Polina Butterfly", "https://x.com/LePapillonPo", Platform::Twitter);
    input.slug = Some("lepapillonpo".to_string());
    ArtistRepo::create(&pool, &input).await.unwrap();

    let store = PgArtistStore::new(pool);
    let lookup = ArtistLookup::build(store.list_artists().await.unwrap());

    assert_eq!(lookup.resolve("polina_butterfly").unwrap().name, "Polina Butterfly");
    assert_eq!(lookup.resolve("LePapillonPo").unwrap().name, "Polina Butterfly");
}

// ---------------------------------------------------------------------------
// CharacterArtworkRepo
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_character_artwork_end_to_end(pool: PgPool) {
    ArtistRepo::create(
        &pool,
        &new_artist("tori si ro", "https://x.com/tori_si_ro", Platform::Twitter),
    )
    .await
    .unwrap();

    sqlx::query(
        "INSERT INTO killers (id, name, artist_urls, legacy_header_urls)
         VALUES ($1, $2, $3, $4)",
    )
    .bind("spirit")
    .bind("Spirit")
    // Older rows carry the list as a JSON-encoded string.
    .bind(serde_json::json!(
        "[\"https://cdn.example.com/artworks/spirit/Art%20by%20tori_si_ro.png\"]"
    ))
    .bind(vec![
        Some("https://cdn.example.com/artworks/spirit/left-by-Nobody.png".to_string()),
        Some("https://cdn.example.com/artworks/spirit/perks.png".to_string()),
        None,
    ])
    .execute(&pool)
    .await
    .unwrap();

    let artwork = CharacterArtworkRepo::find(&pool, CharacterType::Killer, "spirit")
        .await
        .unwrap()
        .expect("spirit should exist");
    assert_eq!(artwork.artist_urls.len(), 1);
    assert_eq!(artwork.legacy_header_urls.len(), 3);

    let lookup = ArtistLookup::build(PgArtistStore::new(pool.clone()).list_artists().await.unwrap());
    let report = analyze(&lookup, &artwork.into_report_input());
    assert_eq!(report.total_artworks, 2);
    assert_eq!(report.matched_artist_count, 1);
    assert_eq!(report.missing_artists, ["Nobody"]);

    assert!(CharacterArtworkRepo::find(&pool, CharacterType::Survivor, "spirit")
        .await
        .unwrap()
        .is_none());
}
