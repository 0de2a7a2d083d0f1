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

/// Configuration for a progress operation
#[derive(Debug, Clone)]
pub struct ProgressConfig {
    /// Operation being performed (e.g., "Cloning", "Building")
    pub operation: String,
    /// What the operation applies to (e.g., a repository URL)
    pub context: String,
    /// Total number of steps; `None` shows a spinner
    pub total: Option<u64>,
}

impl ProgressConfig {
    pub fn new(operation: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            context: context.into(),
            total: None,
        }
    }

    pub fn with_total(mut self, total: u64) -> Self {
        self.total = Some(total);
        self
    }
}
