//! End-to-end remove: buckets come from the configuration, every object in
//! them is deleted.

use std::sync::Arc;

use assets_core::{AssetsConfig, Error, SyncEngine};
use assets_fs::LocalFs;
use assets_test_utils::{MemoryStorage, RecordingLogger, TestTree};
use pretty_assertions::assert_eq;

const CONFIG: &str = r#"{
  "site": {
    "bucket": "www-bucket",
    "img": { "bucket": "img-bucket" }
  },
  "mirror": { "bucket": "www-bucket" }
}"#;

fn setup() -> (TestTree, AssetsConfig) {
    let tree = TestTree::new().config("assets.json", CONFIG);
    let config = AssetsConfig::load(&tree.path("assets.json")).unwrap();
    (tree, config)
}

#[tokio::test]
async fn remove_empties_configured_buckets_entirely() {
    let (tree, config) = setup();
    let storage = Arc::new(
        MemoryStorage::new()
            .with_objects("www-bucket", &["index.html", "not-from-deploy.txt"])
            .with_objects("img-bucket", &["a.png"])
            .with_objects("someone-else", &["keep"]),
    );
    let logger = Arc::new(RecordingLogger::new());
    let engine = SyncEngine::new(storage.clone(), Arc::new(LocalFs::new(tree.root())), logger.clone());

    let buckets = config.buckets();
    let report = engine.remove_all(&buckets).await.unwrap();

    assert_eq!(buckets, vec!["www-bucket", "img-bucket"]);
    assert_eq!(
        report.actions,
        vec![
            "Removed 2 objects from www-bucket",
            "Removed 1 objects from img-bucket"
        ]
    );
    assert!(storage.keys("www-bucket").is_empty());
    assert!(storage.keys("img-bucket").is_empty());
    assert_eq!(storage.keys("someone-else"), vec!["keep"]);
    assert_eq!(
        logger.messages(),
        vec!["Start removing S3 assets", "Completed removing S3 assets"]
    );
}

#[tokio::test]
async fn remove_reports_failing_bucket() {
    let (tree, config) = setup();
    let storage = Arc::new(
        MemoryStorage::new()
            .with_objects("www-bucket", &["index.html"])
            .with_objects("img-bucket", &["a.png"])
            .fail_list("www-bucket"),
    );
    let logger = Arc::new(RecordingLogger::new());
    let engine = SyncEngine::new(storage.clone(), Arc::new(LocalFs::new(tree.root())), logger.clone());

    let err = engine.remove_all(&config.buckets()).await.unwrap_err();

    let Error::RemovalFailed { bucket, source } = err else {
        panic!("expected RemovalFailed, got {err:?}");
    };
    assert_eq!(bucket, "www-bucket");
    assert_eq!(source.message, "failure to list");
    assert_eq!(storage.keys("www-bucket"), vec!["index.html"]);
    assert!(storage.keys("img-bucket").is_empty());
    assert_eq!(logger.messages(), vec!["Start removing S3 assets"]);
}
