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
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A dated release found under `releases/<name>/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    pub name: String,
    pub date: DateTime<Utc>,
    pub dir: PathBuf,
    pub readme_file: PathBuf,
}

impl Release {
    /// Release notes, with pointer files resolved.
    ///
    /// A pointer that answers with a non-2xx status yields
    /// `GmanError::FetchFailure` carrying the literal pointer text.
    pub fn readme(&self, resolver: &ContentResolver, options: &ResolveOptions) -> Result<String> {
        resolver.read(&self.readme_file, options)
    }
}
