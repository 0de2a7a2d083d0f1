// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::error::{GmanError, Result};
use log::trace;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Ensure the provided path exists, returning it on success.
pub fn ensure_directory(path: PathBuf) -> Result<PathBuf> {
    fs::create_dir_all(&path).map_err(|error| {
        GmanError::ConfigError(format!(
            "Failed to create directory {}: {error}",
            path.display()
        ))
    })?;
    Ok(path)
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

/// Recursively copy `src` into `dst`, skipping dot-files and dot-directories.
///
/// Existing files in `dst` are overwritten. Symlinks are copied as the files
/// they point to.
pub fn copy_dir(src: &Path, dst: &Path) -> Result<u64> {
    if !src.is_dir() {
        return Err(GmanError::DirectoryNotFound(src.display().to_string()));
    }
    fs::create_dir_all(dst)?;

    let mut copied = 0;
    let walker = WalkDir::new(src)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !entry.file_name().to_string_lossy().starts_with('.'));

    for entry in walker {
        let entry = entry?;
        let Ok(relative) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            trace!("Copying {} -> {}", entry.path().display(), target.display());
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}
