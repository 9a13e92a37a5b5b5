//! Integration tests for parsing storage API responses.

use std::fs;
use std::path::PathBuf;

use gpucloud_core::Resource;
use gpucloud_storage::models::Dataset;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn load_dataset_list() -> Vec<Dataset> {
    let fixture_path = fixtures_dir().join("dataset_list.json");
    let json_data = fs::read_to_string(&fixture_path).unwrap_or_else(|e| {
        panic!(
            "Failed to read dataset fixture at {}: {}",
            fixture_path.display(),
            e
        )
    });
    serde_json::from_str(&json_data)
        .unwrap_or_else(|e| panic!("Failed to deserialize dataset list: {e}"))
}

#[test]
fn test_deserialize_dataset_list() {
    let datasets = load_dataset_list();
    assert_eq!(datasets.len(), 2, "Expected 2 datasets in test data");
}

#[test]
fn test_ready_dataset_fields() {
    let datasets = load_dataset_list();
    let ready = datasets
        .iter()
        .find(|d| d.status() == "ready")
        .expect("Should have a ready dataset");

    assert_eq!(ready.name, "imagenet-mini");
    assert_eq!(ready.description.as_deref(), Some("100 class subset"));
    assert_eq!(ready.size_bytes, Some(4_831_838_208));
    assert_eq!(ready.file_count, Some(50_000));
    assert!(ready.project_uuid.is_some());
    assert!(ready.updated_at.is_some());
    assert_eq!(
        ready.path(),
        "/dataset/0e4d9f5a-7c43-4b1e-9b1a-5f3f0d6a2c11"
    );
}

#[test]
fn test_uploading_dataset_optional_fields() {
    let datasets = load_dataset_list();
    let uploading = &datasets[1];

    assert_eq!(uploading.status(), "uploading");
    assert!(uploading.description.is_none());
    assert!(uploading.project_uuid.is_none());
    assert!(uploading.size_bytes.is_none());
    assert!(uploading.created_at.is_some());
}
