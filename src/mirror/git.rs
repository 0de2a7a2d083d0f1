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
use crate::models::RepoRef;
use crate::platform;
use log::debug;
use std::ffi::OsStr;
use std::fs;
use std::path::Path;
use std::time::SystemTime;

/// Version-control operations the mirror relies on.
pub trait VersionControl: Send + Sync {
    /// Clone `repo` at its branch into `dest`.
    fn clone_repo(&self, repo: &RepoRef, dest: &Path) -> Result<()>;

    fn pull(&self, dir: &Path, branch: &str) -> Result<()>;

    fn checkout(&self, dir: &Path, branch: &str) -> Result<()>;

    /// Discard local changes and move to `origin/<branch>`.
    fn reset_hard(&self, dir: &Path, branch: &str) -> Result<()>;

    fn update_submodules(&self, dir: &Path) -> Result<()>;

    /// When the working copy last fetched from its remote.
    fn last_fetched(&self, dir: &Path) -> Result<SystemTime>;
}

/// `VersionControl` backed by the `git` command line.
pub struct GitCli {
    program: String,
}

impl GitCli {
    pub fn new() -> Self {
        Self {
            program: "git".to_string(),
        }
    }

    fn git<I, S>(&self, dir: Option<&Path>, args: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut cmd = platform::command(&self.program)?;
        cmd.args(args);
        if let Some(dir) = dir {
            cmd.current_dir(dir);
        }
        platform::run(cmd)
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionControl for GitCli {
    fn clone_repo(&self, repo: &RepoRef, dest: &Path) -> Result<()> {
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        let args: [&OsStr; 5] = [
            OsStr::new("clone"),
            OsStr::new("-b"),
            OsStr::new(&repo.branch),
            OsStr::new(&repo.url),
            dest.as_os_str(),
        ];
        self.git(None, args)
    }

    fn pull(&self, dir: &Path, branch: &str) -> Result<()> {
        self.git(Some(dir), ["pull", "origin", branch])
    }

    fn checkout(&self, dir: &Path, branch: &str) -> Result<()> {
        self.git(Some(dir), ["checkout", branch])
    }

    fn reset_hard(&self, dir: &Path, branch: &str) -> Result<()> {
        let target = format!("origin/{branch}");
        self.git(Some(dir), ["reset", "--hard", target.as_str()])
    }

    fn update_submodules(&self, dir: &Path) -> Result<()> {
        self.git(Some(dir), ["submodule", "update", "--init", "--recursive"])
    }

    fn last_fetched(&self, dir: &Path) -> Result<SystemTime> {
        let marker = dir.join(".git").join("FETCH_HEAD");
        let modified = fs::metadata(&marker)
            .and_then(|m| m.modified())
            .map_err(|e| {
                debug!("Cannot read {}: {e}", marker.display());
                GmanError::Io(e)
            })?;
        Ok(modified)
    }
}
