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

use crate::indicator::{IndicatifProgress, ProgressIndicator, SilentProgress, SimpleProgress};
use std::env;
use std::io::IsTerminal;

pub struct ProgressFactory;

impl ProgressFactory {
    pub fn create(no_progress: bool) -> Box<dyn ProgressIndicator> {
        if no_progress {
            Box::new(SilentProgress)
        } else if Self::env_flag("GMAN_FORCE_TTY_PROGRESS") {
            Box::new(IndicatifProgress::new())
        } else if Self::env_flag("GMAN_NO_TTY_PROGRESS") || Self::should_use_simple_progress() {
            Box::new(SimpleProgress::new())
        } else {
            Box::new(IndicatifProgress::new())
        }
    }

    fn env_flag(name: &str) -> bool {
        env::var(name)
            .map(|value| match value.trim() {
                "" => true,
                v if v.eq_ignore_ascii_case("0") => false,
                v if v.eq_ignore_ascii_case("false") => false,
                _ => true,
            })
            .unwrap_or(false)
    }

    fn should_use_simple_progress() -> bool {
        if !std::io::stderr().is_terminal() {
            return true;
        }

        if env::var("CI").is_ok() {
            return true;
        }

        if let Ok(term) = env::var("TERM")
            && term == "dumb"
        {
            return true;
        }

        env::var("NO_COLOR").is_ok()
    }
}
