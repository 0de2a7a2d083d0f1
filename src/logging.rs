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

use env_logger;

/// Map a `-v` count to the default `env_logger` filter.
pub fn filter_for_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "gman=warn",
        1 => "gman=info",
        2 => "gman=debug",
        _ => "gman=trace",
    }
}

/// Initialize the logger with the specified verbosity level
///
/// # Arguments
/// * `verbose` - Verbosity level (0=warn, 1=info, 2=debug, 3+=trace)
///
/// `RUST_LOG` still takes precedence when set.
pub fn setup_logger(verbose: u8) {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(filter_for_verbosity(verbose)),
    )
    .format_timestamp(None)
    .format_module_path(false)
    .format_target(false)
    .init();
}

/// Whether collaborator processes should stream their output to the terminal.
pub fn stream_process_output() -> bool {
    log::log_enabled!(log::Level::Debug)
}
