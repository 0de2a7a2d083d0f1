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

mod test_home;

pub use test_home::{REPO_URL, TestHomeGuard};

use assert_cmd::Command;

/// `gman` isolated in `guard`'s home, with prompts and pagers disabled.
#[allow(dead_code)]
pub fn gman(guard: &TestHomeGuard) -> Command {
    let mut cmd = Command::cargo_bin("gman").unwrap();
    cmd.env("HOME", guard.path())
        .env("GMAN_HOME", guard.gman_home())
        .env_remove("RUST_LOG")
        .args(["--repo", REPO_URL, "--no-progress", "--no-render", "--pager", ""]);
    cmd
}
