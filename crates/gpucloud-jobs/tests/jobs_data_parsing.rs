//! Integration tests for parsing job API responses.

use std::fs;
use std::path::PathBuf;

use gpucloud_core::Resource;
use gpucloud_jobs::models::{FINISHED, RUNNING, WAITING_FOR_GPUS};
use gpucloud_jobs::{Job, JobType};

fn load_job_list() -> Vec<Job> {
    let fixture_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("job_list.json");
    let json_data = fs::read_to_string(&fixture_path).unwrap_or_else(|e| {
        panic!(
            "Failed to read job fixture at {}: {}",
            fixture_path.display(),
            e
        )
    });
    serde_json::from_str(&json_data).unwrap_or_else(|e| panic!("Failed to deserialize jobs: {e}"))
}

#[test]
fn test_deserialize_job_list() {
    let jobs = load_job_list();
    assert_eq!(jobs.len(), 3, "Expected 3 jobs in test data");
}

#[test]
fn test_training_job() {
    let jobs = load_job_list();
    let training = &jobs[0];

    assert_eq!(training.job_type, JobType::Training);
    assert_eq!(training.status(), RUNNING);
    assert_eq!(training.gpu_count, Some(8));
    assert!(training.region_uuid.is_some());
    assert!(training.started_at.is_some());
    assert!(training.finished_at.is_none());
}

#[test]
fn test_notebook_job_has_url() {
    let jobs = load_job_list();
    let notebook = &jobs[1];

    assert_eq!(notebook.job_type, JobType::Notebook);
    assert_eq!(notebook.status(), WAITING_FOR_GPUS);
    assert_eq!(notebook.url.as_deref(), Some("https://nb.gpucloud.dev/7c2e9d14"));
}

#[test]
fn test_unknown_job_type_falls_back() {
    let jobs = load_job_list();
    let eval = &jobs[2];

    assert_eq!(eval.job_type, JobType::Other);
    assert_eq!(eval.status(), FINISHED);
    assert!(eval.finished_at.is_some());
}
