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

//! Progress feedback for long-running steps such as cloning the mirror or
//! building the web site.

mod factory;
mod indicatif;
mod silent;
mod simple;
mod types;

pub use factory::ProgressFactory;
pub use self::indicatif::IndicatifProgress;
pub use silent::SilentProgress;
pub use simple::SimpleProgress;
pub use types::ProgressConfig;

/// Implementations include:
/// - `IndicatifProgress` - animated spinners and bars for terminals
/// - `SimpleProgress` - one line per finished step for logs and CI
/// - `SilentProgress` - no output, for `--no-progress`
pub trait ProgressIndicator: Send + Sync {
    /// Start a new operation. A config with a total shows a bar, otherwise
    /// a spinner.
    fn start(&mut self, config: ProgressConfig);

    fn update(&mut self, current: u64, total: Option<u64>);

    fn set_message(&mut self, message: String);

    /// Complete the operation successfully (defaults to "Complete").
    fn complete(&mut self, message: Option<String>);

    /// Mark the operation as failed.
    fn error(&mut self, message: String);
}
