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
use crate::paths;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use url::Url;

pub const DEFAULT_BRANCH: &str = "main";

fn default_branch() -> String {
    DEFAULT_BRANCH.to_string()
}

/// Remote location of the documentation repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoRef {
    pub url: String,
    #[serde(default = "default_branch")]
    pub branch: String,
}

impl RepoRef {
    pub fn new(url: impl Into<String>, branch: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            branch: branch.into(),
        }
    }

    fn parsed(&self) -> Result<Url> {
        let url = Url::parse(&self.url)
            .map_err(|e| GmanError::InvalidRepository(format!("{}: {e}", self.url)))?;
        if url.host_str().is_none() {
            return Err(GmanError::InvalidRepository(format!(
                "{}: missing host",
                self.url
            )));
        }
        Ok(url)
    }

    /// Local working copy location: `<config_dir>/src/<host>/<path sans extension>`.
    pub fn mirror_dir(&self, config_dir: &Path) -> Result<PathBuf> {
        let url = self.parsed()?;
        let host = url.host_str().unwrap_or_default();

        let mut dir = paths::src_dir(config_dir).join(host);
        let path = Path::new(url.path().trim_matches('/')).with_extension("");
        for segment in path.iter() {
            dir.push(segment);
        }
        Ok(dir)
    }

    /// Repository name without extension, used as the web site title.
    pub fn site_title(&self) -> String {
        let last = self
            .url
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default();
        Path::new(last)
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Browser URL for editing files on the configured branch.
    pub fn edit_url(&self) -> String {
        let base = self.url.strip_suffix(".git").unwrap_or(&self.url);
        format!("{base}/blob/{}", self.branch)
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.url, self.branch)
    }
}
