/*!
 * Common test utilities for the mdxlate test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use mdxlate::app_config::Config;

/// Separator used by default to join batched texts
pub const SEPARATOR: &str = "\n|||TRANSLATE_SPLIT|||\n";

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content, creating parent directories
pub fn create_test_file(dir: &Path, relative: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(relative);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Configuration rooted in a temporary directory, with no pacing delays
pub fn test_config(root: &Path) -> Config {
    let mut config = Config::default();
    config.paths.input_dir = root.join("docs");
    config.paths.output_dir = root.join("out");
    config.paths.cache_file = root.join("cache").join("translation_cache.json");
    config.translation.api_key = "test-key".to_string();
    config.translation.batch_delay_ms = 0;
    config.translation.request_delay_ms = 0;
    config
}

/// A document exercising every line category
pub const SAMPLE_MDX: &str = r#"---
title: "🟢 Getting Started Guide"
description: Learn the basics
---

import { Card } from '/snippets/card.mdx'

# 🛸 Introduction

Welcome to the platform documentation for new developers.

- Install the command line tool first.
- ok
1. Configure your workspace before deploying anything.

<Note>Remember to save your work often.</Note>

<CodeGroup>
```bash
npm install platform-cli
```
</CodeGroup>

```python
print("hello world from python")
```

```text
This block explains the output format.
```

<div>
Content inside a container is still translated.
</div>

https://example.com/docs
---
"#;
