//! End-to-end deploy: configuration file on disk, real directory walk,
//! uploads captured by in-memory storage.

use std::sync::Arc;

use assets_core::{AssetsConfig, SyncEngine, TracingLogger, TreeBuilder, plan};
use assets_fs::LocalFs;
use assets_test_utils::{MemoryStorage, RecordingLogger, TestTree};
use pretty_assertions::assert_eq;

const MANIFEST: &str = r#"
service: marketing-site
provider:
  name: aws
custom:
  s3Assets:
    site:
      bucket: www-bucket
      isPublic: true
      cacheTime: 300
      metadata:
        owner: web
      img:
        cacheControl: public, max-age=31536000
        logo.svg:
          metadata:
            owner: brand
      drafts:
        isPublic: false
    docs:
      bucket: docs-bucket
      contentType: application/octet-stream
"#;

fn project() -> TestTree {
    TestTree::new()
        .config("serverless.yml", MANIFEST)
        .file("site/index.html", "<h1>hi</h1>")
        .file("site/img/logo.svg", "<svg/>")
        .file("site/img/hero.png", "png")
        .file("site/drafts/next.html", "soon")
        .file("docs/README", "read me")
}

fn load(tree: &TestTree) -> AssetsConfig {
    AssetsConfig::load(&tree.path("serverless.yml")).unwrap()
}

#[tokio::test]
async fn deploy_uploads_every_file_with_resolved_settings() {
    let tree = project();
    let config = load(&tree);
    let fs = Arc::new(LocalFs::new(tree.root()));
    let logger = Arc::new(RecordingLogger::new());
    let storage = Arc::new(MemoryStorage::new());

    let trees = TreeBuilder::new(fs.clone(), logger.clone()).build(&config);
    let engine = SyncEngine::new(storage.clone(), fs, logger.clone());
    let report = engine.upload_all(&trees).await.unwrap();

    assert_eq!(report.actions.len(), 5);
    assert_eq!(
        storage.keys("www-bucket"),
        vec!["drafts/next.html", "img/hero.png", "img/logo.svg", "index.html"]
    );
    assert_eq!(storage.keys("docs-bucket"), vec!["README"]);

    let puts = storage.puts();
    let put = |key: &str| puts.iter().find(|p| p.key == key).unwrap();

    let index = put("index.html");
    assert_eq!(index.body, b"<h1>hi</h1>");
    assert_eq!(index.acl, "public-read");
    assert_eq!(index.cache_control, "max-age=300");
    assert_eq!(index.content_type, "text/html");
    assert_eq!(index.metadata["owner"], "web");

    let logo = put("img/logo.svg");
    assert_eq!(logo.cache_control, "public, max-age=31536000");
    assert_eq!(logo.content_type, "image/svg+xml");
    assert_eq!(logo.metadata["owner"], "brand");

    assert_eq!(put("img/hero.png").metadata["owner"], "web");
    assert_eq!(put("drafts/next.html").acl, "private");

    let readme = put("README");
    assert_eq!(readme.content_type, "application/octet-stream");
    assert_eq!(readme.acl, "private");
    assert_eq!(readme.cache_control, "max-age=0");

    assert_eq!(
        logger.messages(),
        vec!["Start uploading S3 assets", "Completed uploading S3 assets"]
    );
}

#[test]
fn plan_matches_deploy_order_per_folder() {
    let tree = project();
    let config = load(&tree);
    let fs = Arc::new(LocalFs::new(tree.root()));

    let trees = TreeBuilder::new(fs, Arc::new(TracingLogger)).build(&config);
    let keys: Vec<_> = plan(&trees).into_iter().map(|u| u.key).collect();

    assert_eq!(
        keys,
        vec![
            "index.html",
            "drafts/next.html",
            "img/hero.png",
            "img/logo.svg",
            "README"
        ]
    );
}

#[tokio::test]
async fn deploy_of_one_group_leaves_other_buckets_alone() {
    let tree = project();
    let config = load(&tree).only("docs").unwrap();
    let fs = Arc::new(LocalFs::new(tree.root()));
    let logger = Arc::new(RecordingLogger::new());
    let storage = Arc::new(MemoryStorage::new());

    let trees = TreeBuilder::new(fs.clone(), logger.clone()).build(&config);
    SyncEngine::new(storage.clone(), fs, logger)
        .upload_all(&trees)
        .await
        .unwrap();

    assert!(storage.keys("www-bucket").is_empty());
    assert_eq!(storage.keys("docs-bucket"), vec!["README"]);
}

#[tokio::test]
async fn empty_directory_is_an_upload_failure() {
    let tree = project().dir("site/empty");
    let config = load(&tree);
    let fs = Arc::new(LocalFs::new(tree.root()));
    let logger = Arc::new(RecordingLogger::new());
    let storage = Arc::new(MemoryStorage::new());

    let trees = TreeBuilder::new(fs.clone(), logger.clone()).build(&config);
    let err = SyncEngine::new(storage.clone(), fs, logger)
        .upload_all(&trees)
        .await
        .unwrap_err();

    let assets_core::Error::UploadFailed {
        failures,
        attempted,
    } = err
    else {
        panic!("expected UploadFailed, got {err:?}");
    };
    assert_eq!(attempted, 6);
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].path.as_str(), "site/empty");
    assert_eq!(storage.puts().len(), 5);
}
