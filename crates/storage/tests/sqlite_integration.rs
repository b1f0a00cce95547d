use storage::repository::{KeyValueStore, Storage};
use storage::sqlite::SqliteRepository;

#[tokio::test]
async fn sqlite_roundtrips_and_overwrites_values() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_kv_roundtrip?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    assert_eq!(repo.get("progress").await.unwrap(), None);

    repo.set("progress", r#"{"quizPassed":false}"#).await.unwrap();
    repo.set("progress", r#"{"quizPassed":true}"#).await.unwrap();

    let value = repo.get("progress").await.unwrap();
    assert_eq!(value.as_deref(), Some(r#"{"quizPassed":true}"#));
}

#[tokio::test]
async fn sqlite_remove_deletes_only_the_given_key() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_kv_remove?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    repo.set("a", "1").await.unwrap();
    repo.set("b", "2").await.unwrap();
    repo.remove("a").await.unwrap();
    repo.remove("missing").await.unwrap();

    assert_eq!(repo.get("a").await.unwrap(), None);
    assert_eq!(repo.get("b").await.unwrap().as_deref(), Some("2"));
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_kv_migrate?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("first migrate");
    repo.migrate().await.expect("second migrate");

    repo.set("k", "v").await.unwrap();
    assert_eq!(repo.get("k").await.unwrap().as_deref(), Some("v"));
}

#[tokio::test]
async fn storage_sqlite_exposes_kv_handle() {
    let storage = Storage::sqlite("sqlite:file:memdb_kv_storage?mode=memory&cache=shared")
        .await
        .expect("storage");
    storage.kv.set("k", "v").await.unwrap();
    assert_eq!(storage.kv.get("k").await.unwrap().as_deref(), Some("v"));
}
