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

//! User-Agent strings for outgoing HTTP requests.
//!
//! Every HTTP client in gman identifies itself as `gman/<feature>/<version>`.

/// The gman package version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// User-Agent for pointer-file resolution
pub fn content_client() -> String {
    for_feature("content")
}

/// Get a User-Agent string for a specific feature
pub fn for_feature(feature: &str) -> String {
    format!("gman/{feature}/{VERSION}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agents() {
        assert_eq!(content_client(), format!("gman/content/{VERSION}"));
        assert_eq!(for_feature("web"), format!("gman/web/{VERSION}"));
    }

    #[test]
    fn test_version_format() {
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert_eq!(parts.len(), 3, "Version should have 3 parts");
        assert!(parts.iter().all(|p| p.parse::<u32>().is_ok()));
    }
}
