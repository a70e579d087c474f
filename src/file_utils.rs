use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use log::warn;
use walkdir::WalkDir;

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    /// Find files with a specific extension under a directory, sorted by path.
    /// Entries that cannot be read are logged and skipped.
    pub fn find_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<PathBuf>> {
        let wanted = extension.trim_start_matches('.');
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable directory entry: {}", e);
                    continue;
                }
            };
            let path = entry.path();

            if path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(wanted))
            {
                result.push(path.to_path_buf());
            }
        }

        result.sort();
        Ok(result)
    }

    // @generates: Output path mirroring the file's location under the input root
    pub fn mirror_output_path<P1, P2, P3>(input_root: P1, output_root: P2, file: P3) -> Result<PathBuf>
    where
        P1: AsRef<Path>,
        P2: AsRef<Path>,
        P3: AsRef<Path>,
    {
        let relative = file.as_ref().strip_prefix(input_root.as_ref()).map_err(|_| {
            anyhow!(
                "{:?} is not inside the input directory {:?}",
                file.as_ref(),
                input_root.as_ref()
            )
        })?;
        Ok(output_root.as_ref().join(relative))
    }

    /// Whether the output exists and was modified after the input
    pub fn is_up_to_date<P1: AsRef<Path>, P2: AsRef<Path>>(input: P1, output: P2) -> bool {
        let modified = |path: &Path| fs::metadata(path).and_then(|m| m.modified()).ok();

        match (modified(input.as_ref()), modified(output.as_ref())) {
            (Some(input_time), Some(output_time)) => output_time > input_time,
            _ => false,
        }
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }
}
