use sqlx::PgPool;
use std::sync::Arc;
use short_url::domain::entities::NewUrlMapping;
use short_url::domain::repositories::{StoreError, UrlRepository};
use short_url::infrastructure::persistence::PgUrlRepository;

#[sqlx::test]
async fn test_insert_mapping(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool));

    let result = repo
        .insert(NewUrlMapping::new("https://example.com", "abc123"))
        .await;

    assert!(result.is_ok());
    let mapping = result.unwrap();
    assert_eq!(mapping.short_code, "abc123");
    assert_eq!(mapping.original_url, "https://example.com");
    assert!(mapping.id > 0);
}

#[sqlx::test]
async fn test_insert_duplicate_code(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool));

    repo.insert(NewUrlMapping::new("https://a.com", "dup123"))
        .await
        .unwrap();

    let result = repo
        .insert(NewUrlMapping::new("https://b.com", "dup123"))
        .await;

    assert!(matches!(result, Err(StoreError::DuplicateCode(code)) if code == "dup123"));

    let all = repo.list_all().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].original_url, "https://a.com");
}

#[sqlx::test]
async fn test_find_by_code(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool));

    repo.insert(NewUrlMapping::new("https://example.com", "find01"))
        .await
        .unwrap();

    let found = repo.find_by_code("find01").await.unwrap();

    assert!(found.is_some());
    assert_eq!(found.unwrap().original_url, "https://example.com");
}

#[sqlx::test]
async fn test_find_by_code_not_found(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool));

    let result = repo.find_by_code("nope00").await;

    assert!(result.is_ok());
    assert!(result.unwrap().is_none());
}

#[sqlx::test]
async fn test_list_all_newest_first(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool.clone()));

    sqlx::query(
        "INSERT INTO urls (original_url, short_code, created_at) VALUES ($1, $2, NOW() - INTERVAL '1 hour')",
    )
    .bind("https://old.com")
    .bind("old000")
    .execute(&pool)
    .await
    .unwrap();

    repo.insert(NewUrlMapping::new("https://new.com", "new000"))
        .await
        .unwrap();

    let all = repo.list_all().await.unwrap();

    let codes: Vec<&str> = all.iter().map(|m| m.short_code.as_str()).collect();
    assert_eq!(codes, vec!["new000", "old000"]);
}

#[sqlx::test]
async fn test_ensure_schema_is_idempotent(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool));

    repo.ensure_schema().await.unwrap();
    repo.ensure_schema().await.unwrap();

    repo.ping().await.unwrap();
}

#[sqlx::test]
async fn test_empty_url_rejected_by_schema(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool));

    let result = repo.insert(NewUrlMapping::new("", "empty0")).await;

    assert!(matches!(result, Err(StoreError::Query(_))));
}
