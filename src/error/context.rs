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
use std::fmt;

pub struct ErrorContext<'a> {
    pub error: &'a GmanError,
    pub suggestion: Option<String>,
    pub details: Option<String>,
}

impl<'a> ErrorContext<'a> {
    pub fn new(error: &'a GmanError) -> Self {
        let (suggestion, details) = match error {
            GmanError::AppNotFound { namespace, .. } => {
                let suggestion = if namespace.is_some() {
                    Some(
                        "Run 'gman list -A' to see apps in every namespace, or 'gman search \
                         <term>' to search their contents."
                            .to_string(),
                    )
                } else {
                    Some("Run 'gman search <term>' to search app contents.".to_string())
                };
                (suggestion, None)
            }
            GmanError::ReleaseNotFound(_) => {
                let suggestion = Some("Run 'gman releases' to list known releases.".to_string());
                (suggestion, None)
            }
            GmanError::FetchFailure { url, status, .. } => {
                let suggestion = match status {
                    401 | 403 => Some(
                        "Add a 'machine <host> login <user> password <token>' entry to ~/.netrc \
                         for this host."
                            .to_string(),
                    ),
                    404 => Some("The linked document no longer exists upstream.".to_string()),
                    300..=399 => Some(
                        "The pointer URL redirects; update it to the final location.".to_string(),
                    ),
                    _ => Some("Run with --open to view the document in a browser.".to_string()),
                };
                let details = Some(format!("Pointer target: {url}"));
                (suggestion, details)
            }
            GmanError::NoRepository => {
                let suggestion = Some(
                    "Pass --repo <url>, or set 'repo' and 'repos' in ~/.gman/config.yaml."
                        .to_string(),
                );
                (suggestion, None)
            }
            GmanError::InvalidInterval(_) => {
                let suggestion = Some(
                    "Intervals look like '24h', '1h30m', '90s' or a number of seconds.".to_string(),
                );
                (suggestion, None)
            }
            GmanError::CommandNotFound(program) => {
                let suggestion = Some(format!(
                    "Ensure '{program}' is installed and available in your PATH."
                ));
                (suggestion, None)
            }
            GmanError::ProcessFailed { command, .. } if command.starts_with("git") => {
                let suggestion = Some(
                    "Check the repository URL and branch, or re-run with --pull after fixing \
                     network access."
                        .to_string(),
                );
                (suggestion, None)
            }
            GmanError::DirectoryNotFound(dir) => {
                let suggestion = Some(format!("Ensure the directory exists: {dir}"));
                (suggestion, None)
            }
            GmanError::Network(msg) => {
                let suggestion = Some(
                    "Check your internet connection and proxy settings, then try again."
                        .to_string(),
                );
                let details = Some(format!("Network issue: {msg}"));
                (suggestion, details)
            }
            GmanError::Http(http_err) => {
                let suggestion = Some("Check your internet connection and try again.".to_string());
                let details = Some(format!("HTTP error: {http_err}"));
                (suggestion, details)
            }
            GmanError::Io(io_err) => {
                let suggestion = match io_err.kind() {
                    std::io::ErrorKind::PermissionDenied => {
                        Some("Check file permissions of the gman home directory.".to_string())
                    }
                    std::io::ErrorKind::NotFound => Some(
                        "Ensure the file or directory exists and the path is correct.".to_string(),
                    ),
                    _ => None,
                };
                let details = Some(format!("I/O error: {io_err}"));
                (suggestion, details)
            }
            _ => (None, None),
        };

        ErrorContext {
            error,
            suggestion,
            details,
        }
    }

    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestion = Some(suggestion);
        self
    }

    pub fn with_details(mut self, details: String) -> Self {
        self.details = Some(details);
        self
    }
}

impl<'a> fmt::Display for ErrorContext<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error: {}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\n\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}
