use p100_core::artist::Platform;
use p100_db::repositories::ArtistRepo;
use p100_tools::commands::seed::seed;
use p100_tools::roster::parse_roster;
use sqlx::PgPool;

const ROSTER: &str = r#"[
    { "name": "Davood", "url": "https://x.com/davoodisatwat", "platform": "twitter" },
    { "name": "RAZZ", "url": "https://www.instagram.com/razz_pazazz/", "platform": "instagram", "slug": "razz_pazazz" },
    { "name": "razz", "url": "https://x.com/razz", "platform": "twitter" },
    { "name": "", "url": "https://x.com/nobody", "platform": "twitter" }
]"#;

#[sqlx::test(migrations = "../db/migrations")]
async fn test_seed_skips_existing_and_invalid(pool: PgPool) {
    ArtistRepo::create(
        &pool,
        &parse_roster(ROSTER).unwrap().remove(0),
    )
    .await
    .unwrap();

    let summary = seed(&pool, parse_roster(ROSTER).unwrap(), false).await.unwrap();
    assert_eq!(summary.created, ["RAZZ"]);
    assert_eq!(summary.existing, ["Davood", "razz"]);
    assert_eq!(summary.rejected.len(), 1);
    assert_eq!(summary.rejected[0].index, 3);

    assert_eq!(ArtistRepo::count(&pool).await.unwrap(), 2);
    let razz = ArtistRepo::find_by_name(&pool, "razz").await.unwrap().unwrap();
    assert_eq!(razz.platform, Platform::Instagram.as_str());
    assert_eq!(razz.slug.as_deref(), Some("razz_pazazz"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_dry_run_writes_nothing(pool: PgPool) {
    let summary = seed(&pool, parse_roster(ROSTER).unwrap(), true).await.unwrap();
    assert!(summary.dry_run);
    assert_eq!(summary.created, ["Davood", "RAZZ"]);
    assert_eq!(ArtistRepo::count(&pool).await.unwrap(), 0);
}
