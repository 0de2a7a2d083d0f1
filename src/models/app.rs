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

use crate::content::{ContentResolver, ResolveOptions};
use crate::error::{GmanError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_NAMESPACE: &str = "default";

/// A documented application found under `docs/<namespace>/<name>/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct App {
    pub namespace: String,
    pub name: String,
    pub dir: PathBuf,
    pub readme_file: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tldr_file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub examples_dir: Option<PathBuf>,
}

impl App {
    /// Full readme, with pointer files resolved.
    pub fn readme(&self, resolver: &ContentResolver, options: &ResolveOptions) -> Result<String> {
        resolver.read(&self.readme_file, options)
    }

    /// Short summary, with pointer files resolved.
    pub fn tldr(&self, resolver: &ContentResolver, options: &ResolveOptions) -> Result<String> {
        let path = self
            .tldr_file
            .as_ref()
            .ok_or_else(|| GmanError::ArtifactMissing {
                item: self.name.clone(),
                artifact: "TLDR.md".to_string(),
            })?;
        resolver.read(path, options)
    }

    pub fn has_tldr(&self) -> bool {
        self.tldr_file.is_some()
    }
}
