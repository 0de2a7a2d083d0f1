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

//! Release naming and ordering.
//!
//! Release directories are usually named after semantic versions
//! (`v1.2.3`), though nothing enforces it. A leading `v` is optional and
//! the shorthands `v1` and `v1.2` stand for `v1.0.0` and `v1.2.0`.

use crate::models::Release;
use log::debug;
use semver::Version;
use std::cmp::Ordering;
use std::collections::HashSet;

/// Parse a release name as a semantic version.
pub fn parse_release_version(name: &str) -> Option<Version> {
    let core = name.strip_prefix('v').unwrap_or(name);
    if core.is_empty() {
        return None;
    }
    Version::parse(core).ok().or_else(|| expand_shorthand(core))
}

fn expand_shorthand(core: &str) -> Option<Version> {
    let parts: Vec<&str> = core.split('.').collect();
    if parts.len() > 2 {
        return None;
    }

    let mut numbers = [0u64; 3];
    for (i, part) in parts.iter().enumerate() {
        let numeric = !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if !numeric || (part.len() > 1 && part.starts_with('0')) {
            return None;
        }
        numbers[i] = part.parse().ok()?;
    }
    Some(Version::new(numbers[0], numbers[1], numbers[2]))
}

pub fn is_semver(name: &str) -> bool {
    parse_release_version(name).is_some()
}

/// Compare two release names by semver precedence.
///
/// Build metadata is ignored. Invalid names order below valid ones and
/// compare equal to each other.
pub fn compare(a: &str, b: &str) -> Ordering {
    match (parse_release_version(a), parse_release_version(b)) {
        (Some(a), Some(b)) => a.cmp_precedence(&b),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}

/// Sort releases newest first, but only when the first release is named
/// like a semantic version; otherwise the order is left untouched.
pub fn sort_descending(releases: &mut [Release]) {
    let Some(first) = releases.first() else {
        return;
    };
    if !is_semver(&first.name) {
        debug!(
            "First release '{}' is not a semantic version, keeping discovery order",
            first.name
        );
        return;
    }
    releases.sort_by(|a, b| compare(&b.name, &a.name));
}

/// Releases in `latest` whose names do not appear in `previous`, sorted with
/// the same rule as [`sort_descending`].
pub fn diff_new(previous: &[Release], latest: &[Release]) -> Vec<Release> {
    let known: HashSet<&str> = previous.iter().map(|r| r.name.as_str()).collect();
    let mut fresh: Vec<Release> = latest
        .iter()
        .filter(|r| !known.contains(r.name.as_str()))
        .cloned()
        .collect();
    sort_descending(&mut fresh);
    fresh
}
