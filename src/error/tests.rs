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

use crate::error::format::format_error_with_color;
use crate::error::*;

#[test]
fn test_app_not_found_message_includes_namespace() {
    let error = GmanError::AppNotFound {
        namespace: Some("infra".to_string()),
        name: "vault".to_string(),
    };
    assert_eq!(
        error.to_string(),
        "App 'vault' not found in namespace 'infra'"
    );

    let error = GmanError::AppNotFound {
        namespace: None,
        name: "vault".to_string(),
    };
    assert_eq!(error.to_string(), "App 'vault' not found");
}

#[test]
fn test_error_context_app_not_found_suggests_all_namespaces() {
    let error = GmanError::AppNotFound {
        namespace: Some("infra".to_string()),
        name: "vault".to_string(),
    };
    let context = ErrorContext::new(&error);

    assert!(context.suggestion.unwrap().contains("gman list -A"));
}

#[test]
fn test_fetch_failure_carries_literal() {
    let error = GmanError::FetchFailure {
        url: "https://example.com/x.md".to_string(),
        status: 404,
        literal: "https://example.com/x.md\n".to_string(),
    };

    assert!(error.is_fetch_failure());
    assert_eq!(error.fetch_fallback(), Some("https://example.com/x.md\n"));
    assert!(error.to_string().contains("HTTP 404"));

    let context = ErrorContext::new(&error);
    assert!(context.details.unwrap().contains("https://example.com/x.md"));
    assert!(context.suggestion.unwrap().contains("no longer exists"));
}

#[test]
fn test_fetch_fallback_absent_for_other_errors() {
    let error = GmanError::ReleaseNotFound("v9.9.9".to_string());
    assert!(!error.is_fetch_failure());
    assert_eq!(error.fetch_fallback(), None);
}

#[test]
fn test_error_context_unauthorized_mentions_netrc() {
    let error = GmanError::FetchFailure {
        url: "https://git.example.com/raw/README.md".to_string(),
        status: 401,
        literal: String::new(),
    };
    let context = ErrorContext::new(&error);
    assert!(context.suggestion.unwrap().contains(".netrc"));
}

#[test]
fn test_error_context_with_custom_suggestion() {
    let error = GmanError::Network("Failed".to_string());
    let context =
        ErrorContext::new(&error).with_suggestion("Try a different proxy.".to_string());

    assert_eq!(context.suggestion, Some("Try a different proxy.".to_string()));
}

#[test]
fn test_exit_codes() {
    assert_eq!(get_exit_code(&GmanError::NoRepository), 2);
    assert_eq!(
        get_exit_code(&GmanError::ProcessFailed {
            command: "git pull".to_string(),
            message: "exit status: 1".to_string(),
        }),
        3
    );
    assert_eq!(
        get_exit_code(&GmanError::ReleaseNotFound("v1".to_string())),
        4
    );
    assert_eq!(
        get_exit_code(&GmanError::FetchFailure {
            url: String::new(),
            status: 500,
            literal: String::new(),
        }),
        20
    );
    assert_eq!(
        get_exit_code(&GmanError::CommandNotFound("pandoc".to_string())),
        127
    );
    assert_eq!(
        get_exit_code(&GmanError::Io(std::io::Error::other("boom"))),
        1
    );
}

#[test]
fn test_format_error_chain() {
    let error = GmanError::NoRepository;
    let formatted = format_error_chain(&error);

    assert!(formatted.starts_with("Error: No documentation repository configured"));
    assert!(formatted.contains("Suggestion:"));
    assert!(formatted.contains("--repo"));
}

#[test]
fn test_format_error_with_color() {
    let error = GmanError::CommandNotFound("groff".to_string());

    let plain = format_error_with_color(&error, false);
    assert!(plain.contains("Error: Command 'groff' not found in PATH"));
    assert!(plain.contains("• Ensure 'groff' is installed"));
    assert!(!plain.contains("\x1b["));

    let colored = format_error_with_color(&error, true);
    assert!(colored.contains("\x1b[31m"));
    assert!(colored.ends_with("\x1b[0m"));
}
