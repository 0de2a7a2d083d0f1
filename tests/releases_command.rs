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

mod common;
use common::{TestHomeGuard, gman};
use predicates::prelude::*;

#[test]
fn test_releases_listed_newest_first() {
    let guard = TestHomeGuard::new();
    guard
        .setup_mirror()
        .release("v1.0.0")
        .release("v10.0.0")
        .release("v2.0.0");

    let output = gman(&guard).arg("releases").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let v10 = stdout.find("v10.0.0").unwrap();
    let v2 = stdout.find("v2.0.0").unwrap();
    let v1 = stdout.find("v1.0.0").unwrap();
    assert!(v10 < v2 && v2 < v1, "unexpected order:\n{stdout}");
}

#[test]
fn test_show_release() {
    let guard = TestHomeGuard::new();
    guard.setup_mirror().release("v1.0.0");

    gman(&guard)
        .args(["releases", "v1.0.0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Release v1.0.0"));
}

#[test]
fn test_unknown_release() {
    let guard = TestHomeGuard::new();
    guard.setup_mirror().release("v1.0.0");

    gman(&guard)
        .args(["releases", "v3.0.0"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Release 'v3.0.0' not found"));
}

#[test]
fn test_no_releases() {
    let guard = TestHomeGuard::new();
    guard.setup_mirror().app("default", "vault");

    gman(&guard)
        .args(["releases", "-o", "yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[]"));
}
