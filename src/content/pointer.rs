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

use url::Url;

/// Return the URL a pointer file refers to, or `None` when the contents are
/// literal text.
///
/// The trimmed contents must be exactly one whitespace-free line that parses
/// as an absolute URL with a host.
pub fn pointer_url(contents: &str) -> Option<Url> {
    let trimmed = contents.trim();
    if trimmed.is_empty() || trimmed.lines().count() != 1 {
        return None;
    }
    if trimmed.chars().any(char::is_whitespace) {
        return None;
    }

    match Url::parse(trimmed) {
        Ok(url) if url.has_host() => Some(url),
        _ => None,
    }
}

pub fn is_pointer(contents: &str) -> bool {
    pointer_url(contents).is_some()
}

/// Link targets left untouched by rewriting: absolute URLs of any scheme and
/// root-relative paths.
pub fn is_absolute_target(target: &str) -> bool {
    target.starts_with('/') || Url::parse(target).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_url_is_pointer() {
        let url = pointer_url("https://example.com/docs/README.md").unwrap();
        assert_eq!(url.host_str(), Some("example.com"));
    }

    #[test]
    fn test_surrounding_whitespace_is_trimmed() {
        assert!(is_pointer("  https://example.com/x.md\n"));
        assert!(is_pointer("\nhttps://example.com/x.md\r\n\n"));
    }

    #[test]
    fn test_literal_text_is_not_pointer() {
        assert!(!is_pointer("hello world"));
        assert!(!is_pointer(""));
        assert!(!is_pointer("   \n"));
        assert!(!is_pointer("# Title\nhttps://example.com/x.md"));
        assert!(!is_pointer("https://example.com/x.md\nhttps://example.com/y.md"));
        assert!(!is_pointer("see https://example.com/x.md"));
    }

    #[test]
    fn test_url_without_host_is_not_pointer() {
        assert!(!is_pointer("mailto:someone@example.com"));
        assert!(!is_pointer("TODO:"));
        assert!(!is_pointer("/absolute/path.md"));
    }

    #[test]
    fn test_absolute_targets() {
        assert!(is_absolute_target("https://example.com/a.png"));
        assert!(is_absolute_target("mailto:someone@example.com"));
        assert!(is_absolute_target("/images/a.png"));
        assert!(!is_absolute_target("images/a.png"));
        assert!(!is_absolute_target("a.md#section"));
    }
}
