/*!
 * Folder runs through the application controller
 */

use std::fs::{self, File};
use std::path::Path;
use std::time::{Duration, SystemTime};

use mdxlate::app_controller::Controller;
use mdxlate::providers::mock::MockProvider;
use mdxlate::translation::TranslationService;

use crate::common::{create_temp_dir, create_test_file, test_config, SAMPLE_MDX};

/// Backdate a source file so its translation is strictly newer
fn backdate(path: &Path) {
    let past = SystemTime::now() - Duration::from_secs(3600);
    File::options().write(true).open(path).unwrap().set_modified(past).unwrap();
}

fn controller(root: &Path, mock: &MockProvider) -> Controller {
    let config = test_config(root);
    let service = TranslationService::with_mock(mock.clone(), &config);
    Controller::with_service(config, service)
}

fn write_docs(root: &Path) {
    let intro = create_test_file(root, "docs/intro.mdx", SAMPLE_MDX).unwrap();
    let setup = create_test_file(
        root,
        "docs/guides/setup.mdx",
        "# Setup Guide\n\nFollow these steps to set up the project.\n",
    )
    .unwrap();
    create_test_file(root, "docs/notes.txt", "Not a document that gets translated.").unwrap();
    backdate(&intro);
    backdate(&setup);
}

#[tokio::test]
async fn test_runFolder_shouldMirrorTreeAndPersistCache() {
    let temp_dir = create_temp_dir().unwrap();
    let root = temp_dir.path();
    write_docs(root);
    let mock = MockProvider::uppercase();
    let controller = controller(root, &mock);

    let summary = controller
        .run_folder(&root.join("docs"), &root.join("out"), false)
        .await
        .unwrap();

    assert_eq!(summary.total_files, 2);
    assert_eq!(summary.completed, 2);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.skipped, 0);
    assert_eq!(
        fs::read_to_string(root.join("out/guides/setup.mdx")).unwrap(),
        "# SETUP GUIDE\n\nFOLLOW THESE STEPS TO SET UP THE PROJECT.\n"
    );
    assert!(root.join("out/intro.mdx").exists());
    assert!(!root.join("out/notes.txt").exists());

    let cache_json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(root.join("cache/translation_cache.json")).unwrap()).unwrap();
    assert_eq!(cache_json.as_object().unwrap().len(), 10);
    assert_eq!(summary.cache_entries, 10);
}

#[tokio::test]
async fn test_runFolder_withFreshOutputs_shouldSkipUnlessForced() {
    let temp_dir = create_temp_dir().unwrap();
    let root = temp_dir.path();
    write_docs(root);
    let mock = MockProvider::uppercase();

    let first = controller(root, &mock)
        .run_folder(&root.join("docs"), &root.join("out"), false)
        .await
        .unwrap();
    let calls_after_first = mock.request_count();
    assert_eq!(first.completed, 2);

    let second = controller(root, &mock)
        .run_folder(&root.join("docs"), &root.join("out"), false)
        .await
        .unwrap();
    assert_eq!(second.skipped, 2);
    assert_eq!(second.completed, 0);

    // Forced rerun is served entirely from the persisted cache
    let forced = controller(root, &mock)
        .run_folder(&root.join("docs"), &root.join("out"), true)
        .await
        .unwrap();
    assert_eq!(forced.completed, 2);
    assert_eq!(forced.stats.cache_hits, 10);
    assert_eq!(forced.cache_hit_rate, 1.0);
    assert_eq!(mock.request_count(), calls_after_first);
}

#[tokio::test]
async fn test_runFolder_withUnreadableDocument_shouldCountFailureAndContinue() {
    let temp_dir = create_temp_dir().unwrap();
    let root = temp_dir.path();
    write_docs(root);
    fs::write(root.join("docs/broken.mdx"), [0xff, 0xfe, 0xfd]).unwrap();
    let mock = MockProvider::uppercase();

    let summary = controller(root, &mock)
        .run_folder(&root.join("docs"), &root.join("out"), true)
        .await
        .unwrap();

    assert_eq!(summary.total_files, 3);
    assert_eq!(summary.completed, 2);
    assert_eq!(summary.failed, 1);
    assert!(!root.join("out/broken.mdx").exists());
}

#[tokio::test]
async fn test_runFolder_withFailingProvider_shouldWriteOriginalText() {
    let temp_dir = create_temp_dir().unwrap();
    let root = temp_dir.path();
    write_docs(root);

    let summary = controller(root, &MockProvider::failing())
        .run_folder(&root.join("docs"), &root.join("out"), false)
        .await
        .unwrap();

    assert_eq!(summary.completed, 2);
    assert_eq!(summary.stats.failures, 10);
    assert_eq!(fs::read_to_string(root.join("out/intro.mdx")).unwrap(), SAMPLE_MDX);
    assert_eq!(summary.cache_entries, 0);
}

#[tokio::test]
async fn test_runFolder_withMissingInputDir_shouldFail() {
    let temp_dir = create_temp_dir().unwrap();
    let root = temp_dir.path();
    let result = controller(root, &MockProvider::echo())
        .run_folder(&root.join("nowhere"), &root.join("out"), false)
        .await;
    assert!(result.is_err());
}

#[test]
fn test_extractFolder_shouldWriteOneJsonLinePerUnit() {
    let temp_dir = create_temp_dir().unwrap();
    let root = temp_dir.path();
    write_docs(root);
    let mock = MockProvider::echo();
    let controller = controller(root, &mock);

    let mut buffer = Vec::new();
    let count = controller.extract_folder(&root.join("docs"), &mut buffer).unwrap();

    let output = String::from_utf8(buffer).unwrap();
    let records: Vec<serde_json::Value> = output
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(count, 10);
    assert_eq!(records.len(), 10);
    assert_eq!(mock.request_count(), 0);

    let title = records.iter().find(|r| r["category"] == "title").unwrap();
    assert_eq!(title["raw_text"], "Getting Started Guide");
    assert_eq!(title["line_index"], 1);
    assert_eq!(title["context"]["kind"], "title");
    assert_eq!(title["context"]["glyph_prefix"], "🟢 ");
    assert!(records.iter().any(|r| r["file"] == "guides/setup.mdx" || r["file"] == "guides\\setup.mdx"));
}
