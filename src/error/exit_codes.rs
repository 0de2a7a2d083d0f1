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

use crate::error::GmanError;

pub fn get_exit_code(error: &GmanError) -> i32 {
    match error {
        GmanError::InvalidInterval(_)
        | GmanError::InvalidRepository(_)
        | GmanError::ConfigError(_)
        | GmanError::Config(_)
        | GmanError::NoRepository => 2,

        GmanError::ProcessFailed { .. } => 3,

        GmanError::AppNotFound { .. }
        | GmanError::ReleaseNotFound(_)
        | GmanError::ArtifactMissing { .. } => 4,

        GmanError::FetchFailure { .. } | GmanError::Network(_) | GmanError::Http(_) => 20,

        GmanError::CommandNotFound(_) => 127, // Standard "command not found" exit code

        _ => 1,
    }
}
