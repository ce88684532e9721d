use super::*;

async fn seeded() -> Storage {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    seed_sample_brands(&storage).await.expect("seed");
    storage
}

#[tokio::test]
async fn health_check_succeeds_for_live_pool() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage.health_check().await.expect("health check");
}

#[tokio::test]
async fn creates_database_file_when_missing() {
    let temp_root = tempfile::tempdir().expect("tempdir");
    let db_path = temp_root.path().join("nested").join("storage.db");
    let database_url = format!("sqlite://{}", db_path.to_string_lossy().replace('\\', "/"));

    let storage = Storage::new(&database_url).await.expect("db");
    drop(storage);

    assert!(
        db_path.exists(),
        "database file should exist: {}",
        db_path.display()
    );
}

#[tokio::test]
async fn records_survive_reopening_the_database_file() {
    let temp_root = tempfile::tempdir().expect("tempdir");
    let db_path = temp_root.path().join("brands.db");
    let database_url = format!("sqlite://{}", db_path.to_string_lossy().replace('\\', "/"));

    let storage = Storage::new(&database_url).await.expect("db");
    storage
        .add(&Brand::new(42, "Luna Veil"))
        .await
        .expect("add");
    storage.pool().close().await;

    let reopened = Storage::new(&database_url).await.expect("reopen");
    let brand = reopened.find_by_id(BrandId(42)).await.expect("brand");
    assert_eq!(brand.name, "Luna Veil");
}

#[tokio::test]
async fn seeding_twice_only_inserts_once() {
    let storage = seeded().await;
    let second = seed_sample_brands(&storage).await.expect("seed again");
    assert_eq!(second, 0);
    assert_eq!(storage.count().await.expect("count"), 10);
}

#[tokio::test]
async fn search_is_case_sensitive() {
    let storage = seeded().await;
    let upper = storage.search(Some("Urban")).await.expect("search");
    assert_eq!(upper.len(), 2);
    let lower = storage.search(Some("urban")).await.expect("search");
    assert!(lower.is_empty());
}

#[tokio::test]
async fn search_matches_non_ascii_names() {
    let storage = seeded().await;
    let hits = storage.search(Some("Élé")).await.expect("search");
    assert_eq!(hits, vec![Brand::new(3, "Noir Élégance")]);
}

#[tokio::test]
async fn duplicate_insert_leaves_original_record() {
    let storage = seeded().await;
    let err = storage
        .add(&Brand::new(5, "Impostor"))
        .await
        .expect_err("duplicate");
    assert!(matches!(err, StoreError::DuplicateKey(BrandId(5))));
    let brand = storage.find_by_id(BrandId(5)).await.expect("brand");
    assert_eq!(brand.name, "Echo Atelier");
}

#[tokio::test]
async fn delete_removes_only_the_target() {
    let storage = seeded().await;
    storage.delete(BrandId(7)).await.expect("delete");
    assert!(matches!(
        storage.find_by_id(BrandId(7)).await,
        Err(StoreError::NotFound(BrandId(7)))
    ));
    assert_eq!(storage.count().await.expect("count"), 9);
    assert!(matches!(
        storage.delete(BrandId(7)).await,
        Err(StoreError::NotFound(_))
    ));
}

#[test]
fn sqlite_path_ignores_memory_and_strips_query() {
    assert_eq!(sqlite_path("sqlite::memory:"), None);
    assert_eq!(sqlite_path("postgres://localhost/db"), None);
    assert_eq!(
        sqlite_path("sqlite://./data/brands.db?mode=rwc"),
        Some(PathBuf::from("./data/brands.db"))
    );
}
