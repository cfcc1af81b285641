use super::*;
use crate::embedding::Vectorizer;

fn meta(query: &str, mode: FilterMode) -> FilterMeta {
    FilterMeta {
        query: query.to_string(),
        mode,
        top_k: 20,
        threshold: 0.5,
    }
}

#[test]
fn test_filter_new_derives_vector_from_text() {
    let vectorizer = Vectorizer::new();
    let filter = Filter::new("sports", FilterMode::Hide, 20, 0.5, &vectorizer);

    assert_eq!(filter.query_vector, vectorizer.mean_vector("sports"));
}

#[test]
fn test_from_meta_rebuilds_identical_vector() {
    let vectorizer = Vectorizer::new();
    let original = Filter::new("ai safety news", FilterMode::Show, 10, 0.5, &vectorizer);

    let restored = Filter::from_meta(original.meta(), &Vectorizer::new());

    assert_eq!(restored.query, original.query);
    assert_eq!(restored.mode, original.mode);
    assert_eq!(restored.top_k, original.top_k);
    assert_eq!(restored.threshold, original.threshold);
    assert_eq!(restored.query_vector, original.query_vector);
}

#[test]
fn test_meta_json_shape() {
    let json = serde_json::to_value(meta("tech", FilterMode::Show)).unwrap();

    assert_eq!(json["query"], "tech");
    assert_eq!(json["mode"], "show");
    assert_eq!(json["topK"], 20);
    assert!((json["threshold"].as_f64().unwrap() - 0.5).abs() < 1e-9);
    // The wire tuple is exactly four fields, vector-free.
    assert_eq!(json.as_object().unwrap().len(), 4);
}

#[test]
fn test_meta_json_round_trip() {
    let original = meta("crypto scams", FilterMode::Hide);
    let parsed: FilterMeta =
        serde_json::from_str(&serde_json::to_string(&original).unwrap()).unwrap();
    assert_eq!(parsed, original);
}

#[tokio::test]
async fn test_json_store_missing_file_loads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFilterStore::new(dir.path().join("filters.json"));

    let loaded = store.load().await.unwrap();
    assert!(loaded.is_empty());
}

#[tokio::test]
async fn test_json_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFilterStore::new(dir.path().join("filters.json"));

    let filters = vec![meta("sports", FilterMode::Hide), meta("tech", FilterMode::Show)];
    store.save(&filters).await.unwrap();

    let loaded = store.load().await.unwrap();
    assert_eq!(loaded, filters);
}

#[tokio::test]
async fn test_json_store_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFilterStore::new(dir.path().join("nested/state/filters.json"));

    store.save(&[meta("cats", FilterMode::Hide)]).await.unwrap();

    assert_eq!(store.load().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_json_store_save_replaces_prior_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFilterStore::new(dir.path().join("filters.json"));

    store.save(&[meta("a", FilterMode::Hide)]).await.unwrap();
    store.save(&[]).await.unwrap();

    assert!(store.load().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_json_store_corrupt_snapshot_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("filters.json");
    tokio::fs::write(&path, b"not json").await.unwrap();

    let store = JsonFilterStore::new(path);
    assert!(matches!(
        store.load().await,
        Err(StoreError::Serialization(_))
    ));
}

#[tokio::test]
async fn test_memory_store_fail_next_save_is_one_shot() {
    let store = MemoryFilterStore::new();
    store.fail_next_save();

    assert!(store.save(&[meta("x", FilterMode::Hide)]).await.is_err());
    assert!(store.saved().is_empty());

    store.save(&[meta("x", FilterMode::Hide)]).await.unwrap();
    assert_eq!(store.saved().len(), 1);
}
