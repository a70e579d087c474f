/*!
 * Tests for file system utilities
 */

use std::fs::{self, File};
use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use mdxlate::file_utils::FileManager;

use crate::common::{create_temp_dir, create_test_file};

fn set_modified(path: &PathBuf, time: SystemTime) {
    File::options().write(true).open(path).unwrap().set_modified(time).unwrap();
}

#[test]
fn test_findFiles_shouldRecurseAndFilterByExtension() {
    let temp_dir = create_temp_dir().unwrap();
    let root = temp_dir.path();
    create_test_file(root, "b.mdx", "b").unwrap();
    create_test_file(root, "a.MDX", "a").unwrap();
    create_test_file(root, "guides/c.mdx", "c").unwrap();
    create_test_file(root, "notes.md", "x").unwrap();

    let files = FileManager::find_files(root, ".mdx").unwrap();

    let names: Vec<PathBuf> = files.iter().map(|f| f.strip_prefix(root).unwrap().to_path_buf()).collect();
    assert_eq!(
        names,
        vec![PathBuf::from("a.MDX"), PathBuf::from("b.mdx"), PathBuf::from("guides/c.mdx")]
    );
}

#[cfg(unix)]
#[test]
fn test_findFiles_withDanglingSymlink_shouldSkipItAndKeepWalking() {
    let temp_dir = create_temp_dir().unwrap();
    let root = temp_dir.path();
    create_test_file(root, "guides/a.mdx", "a").unwrap();
    create_test_file(root, "guides/z.mdx", "z").unwrap();
    std::os::unix::fs::symlink(root.join("missing"), root.join("guides/broken.mdx")).unwrap();

    let files = FileManager::find_files(root, "mdx").unwrap();

    assert_eq!(files, vec![root.join("guides/a.mdx"), root.join("guides/z.mdx")]);
}

#[test]
fn test_mirrorOutputPath_shouldKeepRelativeLayout() {
    let output = FileManager::mirror_output_path("docs", "out/uz", "docs/guides/setup.mdx").unwrap();
    assert_eq!(output, PathBuf::from("out/uz/guides/setup.mdx"));

    assert!(FileManager::mirror_output_path("docs", "out", "other/file.mdx").is_err());
}

#[test]
fn test_isUpToDate_shouldCompareModificationTimes() {
    let temp_dir = create_temp_dir().unwrap();
    let input = create_test_file(temp_dir.path(), "in.mdx", "source").unwrap();
    let output = temp_dir.path().join("out.mdx");

    assert!(!FileManager::is_up_to_date(&input, &output));

    fs::write(&output, "translated").unwrap();
    let now = SystemTime::now();
    set_modified(&input, now - Duration::from_secs(120));
    set_modified(&output, now);
    assert!(FileManager::is_up_to_date(&input, &output));

    set_modified(&input, now + Duration::from_secs(120));
    assert!(!FileManager::is_up_to_date(&input, &output));
}

#[test]
fn test_writeToFile_shouldCreateParentDirectories() {
    let temp_dir = create_temp_dir().unwrap();
    let path = temp_dir.path().join("deep").join("er").join("file.mdx");

    FileManager::write_to_file(&path, "content").unwrap();

    assert_eq!(FileManager::read_to_string(&path).unwrap(), "content");
    assert!(FileManager::dir_exists(temp_dir.path().join("deep")));
    assert!(path.is_file());
}
