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

use regex::Regex;

/// Search predicate: a plain substring, or a regular expression when the
/// term compiles as one.
#[derive(Debug, Clone)]
pub struct Matcher {
    term: String,
    pattern: Option<Regex>,
}

impl Matcher {
    pub fn new(term: &str) -> Self {
        Self {
            term: term.to_string(),
            pattern: Regex::new(term).ok(),
        }
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn is_regex(&self) -> bool {
        self.pattern.is_some()
    }

    pub fn is_match(&self, text: &str) -> bool {
        text.contains(&self.term)
            || self
                .pattern
                .as_ref()
                .is_some_and(|pattern| pattern.is_match(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substring_match() {
        let matcher = Matcher::new("vault");
        assert!(matcher.is_match("hashicorp vault docs"));
        assert!(!matcher.is_match("consul"));
    }

    #[test]
    fn test_regex_match() {
        let matcher = Matcher::new("^ter+a");
        assert!(matcher.is_regex());
        assert!(matcher.is_match("terraform"));
        assert!(!matcher.is_match("a terraform"));
    }

    #[test]
    fn test_invalid_pattern_falls_back_to_substring() {
        let matcher = Matcher::new("c++(");
        assert!(!matcher.is_regex());
        assert!(matcher.is_match("notes on c++( templates"));
        assert!(!matcher.is_match("c templates"));
    }

    #[test]
    fn test_regex_metacharacters_still_match_literally() {
        let matcher = Matcher::new("v1.2");
        assert!(matcher.is_match("released v1.2 today"));
        assert!(matcher.is_match("v1x2"));
    }
}
