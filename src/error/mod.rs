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

mod context;
mod exit_codes;
mod format;
#[cfg(test)]
mod tests;

pub use context::ErrorContext;
pub use exit_codes::get_exit_code;
pub use format::{format_error_chain, format_error_with_color};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GmanError {
    #[error("App '{name}' not found{}", namespace_suffix(.namespace))]
    AppNotFound {
        namespace: Option<String>,
        name: String,
    },

    #[error("Release '{0}' not found")]
    ReleaseNotFound(String),

    #[error("'{item}' has no {artifact}")]
    ArtifactMissing { item: String, artifact: String },

    /// A pointer URL answered with a non-2xx status. `literal` holds the
    /// unresolved pointer text so callers can still show something.
    #[error("Failed to fetch {url}: HTTP {status}")]
    FetchFailure {
        url: String,
        status: u16,
        literal: String,
    },

    #[error("Directory not found: {0}")]
    DirectoryNotFound(String),

    #[error("Command '{command}' failed: {message}")]
    ProcessFailed { command: String, message: String },

    #[error("Command '{0}' not found in PATH")]
    CommandNotFound(String),

    #[error("No documentation repository configured")]
    NoRepository,

    #[error("Invalid repository URL: {0}")]
    InvalidRepository(String),

    #[error("Invalid update interval: {0}")]
    InvalidInterval(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Thread panic: {0}")]
    ThreadPanic(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Http(#[from] attohttpc::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error(transparent)]
    WalkDir(#[from] walkdir::Error),

    #[error(transparent)]
    Config(#[from] config::ConfigError),
}

impl GmanError {
    /// The literal pointer text carried by a fetch failure.
    pub fn fetch_fallback(&self) -> Option<&str> {
        match self {
            GmanError::FetchFailure { literal, .. } => Some(literal),
            _ => None,
        }
    }

    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, GmanError::FetchFailure { .. })
    }
}

fn namespace_suffix(namespace: &Option<String>) -> String {
    match namespace {
        Some(ns) => format!(" in namespace '{ns}'"),
        None => String::new(),
    }
}

pub type Result<T> = std::result::Result<T, GmanError>;
