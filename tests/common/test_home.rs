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

use rand::Rng;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const REPO_URL: &str = "https://git.example.com/org/docs.git";

/// Creates a test home directory under target/home with a random 8-character name
/// Returns the path to the created directory
/// The directory will be automatically cleaned up when the returned guard is dropped
pub struct TestHomeGuard {
    path: PathBuf,
}

impl TestHomeGuard {
    pub fn new() -> Self {
        let random_name: String = rand::thread_rng()
            .sample_iter(&rand::distributions::Alphanumeric)
            .take(8)
            .map(char::from)
            .collect();

        let path = env::current_dir()
            .expect("Failed to read current directory")
            .join("target/home")
            .join(random_name);
        fs::create_dir_all(&path).expect("Failed to create test home directory");

        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn gman_home(&self) -> PathBuf {
        self.path.join(".gman")
    }

    /// Working copy for `REPO_URL` inside the gman home.
    pub fn mirror(&self) -> PathBuf {
        self.gman_home().join("src/git.example.com/org/docs")
    }

    /// Lay out a mirror that was fetched just now, so no git command runs.
    pub fn setup_mirror(&self) -> &Self {
        let git_dir = self.mirror().join(".git");
        fs::create_dir_all(&git_dir).expect("Failed to create mirror .git directory");
        fs::write(git_dir.join("FETCH_HEAD"), "").expect("Failed to write FETCH_HEAD");
        self
    }

    #[allow(dead_code)]
    pub fn write(&self, relative: &str, contents: &str) -> &Self {
        let path = self.mirror().join(relative);
        fs::create_dir_all(path.parent().unwrap()).expect("Failed to create parent directory");
        fs::write(&path, contents).expect("Failed to write mirror file");
        self
    }

    #[allow(dead_code)]
    pub fn app(&self, namespace: &str, name: &str) -> &Self {
        self.write(
            &format!("docs/{namespace}/{name}/README.md"),
            &format!("# {name}\n\nAbout {name}.\n"),
        )
    }

    #[allow(dead_code)]
    pub fn release(&self, name: &str) -> &Self {
        self.write(
            &format!("releases/{name}/README.md"),
            &format!("# Release {name}\n"),
        )
    }

    #[allow(dead_code)]
    pub fn write_config(&self, contents: &str) -> &Self {
        fs::create_dir_all(self.gman_home()).expect("Failed to create gman home");
        fs::write(self.gman_home().join("config.yaml"), contents)
            .expect("Failed to write config.yaml");
        self
    }
}

impl Drop for TestHomeGuard {
    fn drop(&mut self) {
        if self.path.exists() {
            fs::remove_dir_all(&self.path).unwrap_or_else(|e| {
                eprintln!(
                    "Failed to cleanup test directory {}: {}",
                    self.path.display(),
                    e
                );
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creates_and_cleans_up_directory() {
        let test_path = {
            let guard = TestHomeGuard::new();
            let path = guard.path().to_path_buf();
            assert!(path.exists());
            assert!(path.ends_with(path.file_name().unwrap()));
            assert!(path.parent().unwrap().ends_with("target/home"));
            path
        };
        assert!(!test_path.exists());
    }

    #[test]
    fn test_setup_mirror() {
        let guard = TestHomeGuard::new();
        guard.setup_mirror().app("default", "vault");

        assert!(guard.mirror().join(".git/FETCH_HEAD").is_file());
        assert!(guard.mirror().join("docs/default/vault/README.md").is_file());
    }
}
