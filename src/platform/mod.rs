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

mod process;

pub use process::{command, describe, pipe, pipe_interactive, resolve_program, run};

use crate::error::Result;
use std::process::Command;

/// Program used to hand a URL to the desktop environment.
pub fn opener_program() -> &'static str {
    if cfg!(target_os = "macos") {
        "open"
    } else if cfg!(windows) {
        "cmd"
    } else {
        "xdg-open"
    }
}

/// Open a URL with the platform's default handler, typically a browser.
pub fn open_url(url: &str) -> Result<()> {
    let mut cmd = Command::new(opener_program());
    if cfg!(windows) {
        // `start` is a cmd builtin; the empty string is the window title
        cmd.args(["/C", "start", ""]);
    }
    cmd.arg(url.trim());
    run(cmd)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opener_program_matches_platform() {
        let program = opener_program();
        if cfg!(target_os = "macos") {
            assert_eq!(program, "open");
        } else if cfg!(windows) {
            assert_eq!(program, "cmd");
        } else {
            assert_eq!(program, "xdg-open");
        }
    }
}
