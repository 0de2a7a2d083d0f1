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
use std::env;
use std::path::{Path, PathBuf};

pub const SRC_DIR: &str = "src";
pub const WEB_DIR: &str = "web";
pub const WEB_DOCS_DIR: &str = "docs";
pub const WEB_BUILD_DIR: &str = "build";

const CONFIG_DIR_NAME: &str = ".gman";

/// `$GMAN_HOME` when set, otherwise `~/.gman`.
pub fn default_config_dir() -> Result<PathBuf> {
    if let Ok(home) = env::var("GMAN_HOME")
        && !home.trim().is_empty()
    {
        return Ok(PathBuf::from(home));
    }
    dirs::home_dir()
        .map(|home| home.join(CONFIG_DIR_NAME))
        .ok_or_else(|| GmanError::ConfigError("Unable to determine home directory".to_string()))
}

/// Root of all mirrors inside the config directory.
pub fn src_dir(config_dir: &Path) -> PathBuf {
    config_dir.join(SRC_DIR)
}

pub fn web_dir(config_dir: &Path) -> PathBuf {
    config_dir.join(WEB_DIR)
}

/// Rendered documentation fed to the site build.
pub fn web_docs_dir(web_dir: &Path) -> PathBuf {
    web_dir.join(WEB_DOCS_DIR)
}

/// Static site output served in web mode.
pub fn web_build_dir(web_dir: &Path) -> PathBuf {
    web_dir.join(WEB_BUILD_DIR)
}
