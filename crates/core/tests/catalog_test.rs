//! Catalog readiness: single load, shared outcome, retry after failure.

mod common;

use std::io::Write as _;
use std::sync::Arc;

use common::{GatedSource, red_pink};
use futures::future::join_all;
use huefind_core::catalog::{ColorCatalog, JsonFileSource, Readiness};
use huefind_core::{CatalogLoadError, Rgb};

// ============================================================================
// Single-writer loading
// ============================================================================

#[tokio::test]
async fn concurrent_initialize_shares_one_load() {
    let source = GatedSource::new(red_pink());
    let catalog = ColorCatalog::new(source.clone());

    let waiters = join_all((0..8).map(|_| catalog.initialize()));
    let (results, ()) = tokio::join!(waiters, async { source.open() });

    assert!(results.iter().all(Result::is_ok));
    assert_eq!(source.loads(), 1);
    assert_eq!(catalog.load_attempts(), 1);
    assert_eq!(catalog.state(), Readiness::Ready);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_initialize_across_tasks_loads_once() {
    let source = GatedSource::new(red_pink());
    let catalog = Arc::new(ColorCatalog::new(source.clone()));

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let catalog = Arc::clone(&catalog);
            tokio::spawn(async move { catalog.initialize().await })
        })
        .collect();

    while catalog.state() != Readiness::Loading {
        tokio::task::yield_now().await;
    }
    source.open();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }
    assert_eq!(source.loads(), 1);
    assert_eq!(catalog.entries().unwrap().len(), 2);
}

#[tokio::test]
async fn initialize_after_ready_does_not_reload() {
    let source = GatedSource::open_with(red_pink());
    let catalog = ColorCatalog::new(source.clone());
    for _ in 0..3 {
        catalog.initialize().await.unwrap();
    }
    assert_eq!(source.loads(), 1);
}

// ============================================================================
// Failure and retry
// ============================================================================

#[tokio::test]
async fn failure_is_observed_by_every_waiter() {
    let source = GatedSource::new(red_pink()).failing_first(1);
    let catalog = ColorCatalog::new(source.clone());

    let waiters = join_all((0..4).map(|_| catalog.initialize()));
    let (results, ()) = tokio::join!(waiters, async { source.open() });

    assert_eq!(results.len(), 4);
    for result in results {
        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "catalog format error: simulated failure");
    }
    assert_eq!(source.loads(), 1);
    assert_eq!(catalog.state(), Readiness::Failed);
    assert!(catalog.entries().is_none());
}

#[tokio::test]
async fn initialize_retries_after_failure() {
    let source = GatedSource::open_with(red_pink()).failing_first(1);
    let catalog = ColorCatalog::new(source.clone());

    assert!(catalog.initialize().await.is_err());
    assert_eq!(catalog.state(), Readiness::Failed);

    catalog.initialize().await.unwrap();
    assert_eq!(catalog.state(), Readiness::Ready);
    assert_eq!(source.loads(), 2);
    assert_eq!(catalog.load_attempts(), 2);
}

#[tokio::test]
async fn reset_then_initialize_reloads() {
    let source = GatedSource::open_with(red_pink()).failing_first(1);
    let catalog = ColorCatalog::new(source.clone());

    assert!(catalog.initialize().await.is_err());
    assert!(catalog.reset());
    assert_eq!(catalog.state(), Readiness::Uninitialized);

    catalog.initialize().await.unwrap();
    assert_eq!(source.loads(), 2);
}

// ============================================================================
// JSON files
// ============================================================================

fn temp_catalog(name: &str, contents: &str) -> std::path::PathBuf {
    let file_name = format!("huefind-{}-{name}.json", std::process::id());
    let path = std::env::temp_dir().join(file_name);
    let mut file = std::fs::File::create(&path).expect("create temp catalog");
    file.write_all(contents.as_bytes()).expect("write temp catalog");
    path
}

#[tokio::test]
async fn json_file_catalog_loads_in_order() {
    let path = temp_catalog(
        "ordered",
        r#"[
            {"name": "Navy", "rgb": [0, 0, 128]},
            {"id": "brand-red", "name": "Brand Red", "rgb": [230, 20, 30]}
        ]"#,
    );
    let catalog = ColorCatalog::new(JsonFileSource::new(&path));
    catalog.initialize().await.unwrap();

    let entries = catalog.entries().unwrap();
    assert_eq!(entries[0].id, "#000080");
    assert_eq!(entries[1].id, "brand-red");
    assert_eq!(entries[1].rgb, Rgb::new(230, 20, 30));
    std::fs::remove_file(path).ok();
}

#[tokio::test]
async fn malformed_json_file_is_a_format_error() {
    let path = temp_catalog("malformed", r#"[{"name": "Bad", "rgb": [1, 2, 300]}]"#);
    let catalog = ColorCatalog::new(JsonFileSource::new(&path));

    let err = catalog.initialize().await.unwrap_err();
    assert!(matches!(err, CatalogLoadError::Format(_)), "{err:?}");
    assert_eq!(catalog.state(), Readiness::Failed);
    std::fs::remove_file(path).ok();
}

#[tokio::test]
async fn missing_file_reports_path() {
    let catalog = ColorCatalog::new(JsonFileSource::new("/definitely/missing/colors.json"));
    let err = catalog.initialize().await.unwrap_err();
    assert!(
        err.to_string()
            .starts_with("io error reading /definitely/missing/colors.json"),
        "{err}"
    );
}
