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

//! In-memory catalog of the mirrored documentation.
//!
//! A [`Catalog`] is an immutable snapshot built by walking the mirror. It is
//! never edited in place: [`CatalogStore`] swaps in a fresh snapshot after a
//! complete, successful rebuild.

mod indexer;
mod store;

pub use indexer::{build_catalog, build_releases};
pub use store::CatalogStore;

use crate::error::{GmanError, Result};
use crate::models::{App, DEFAULT_NAMESPACE, Release};
use log::debug;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    apps: BTreeMap<String, Vec<App>>,
    releases: Vec<Release>,
}

impl Catalog {
    pub fn new(apps: BTreeMap<String, Vec<App>>, releases: Vec<Release>) -> Self {
        Self { apps, releases }
    }

    /// Index a mirror. Nothing is returned unless both walks succeed.
    pub fn load(mirror_root: &Path) -> Result<Self> {
        let apps = build_catalog(mirror_root)?;
        let releases = build_releases(mirror_root)?;
        debug!(
            "Indexed {} apps in {} namespaces and {} releases",
            apps.values().map(Vec::len).sum::<usize>(),
            apps.len(),
            releases.len()
        );
        Ok(Self::new(apps, releases))
    }

    /// Apps in one namespace, or in every namespace when `namespace` is
    /// `None`, sorted by name.
    pub fn list_apps(&self, namespace: Option<&str>) -> Vec<App> {
        let mut apps: Vec<App> = match namespace {
            Some(ns) => self.apps.get(ns).cloned().unwrap_or_default(),
            None => self.apps.values().flatten().cloned().collect(),
        };
        apps.sort_by(|a, b| a.name.cmp(&b.name));
        apps
    }

    pub fn namespaces(&self) -> Vec<String> {
        self.apps.keys().cloned().collect()
    }

    /// Look up an app by name.
    ///
    /// Without a namespace the `default` namespace is tried first, then
    /// every other namespace in sorted order.
    pub fn get_app(&self, namespace: Option<&str>, name: &str) -> Result<&App> {
        let find = |ns: &str| {
            self.apps
                .get(ns)
                .and_then(|apps| apps.iter().find(|app| app.name == name))
        };

        let found = match namespace {
            Some(ns) => find(ns),
            None => find(DEFAULT_NAMESPACE).or_else(|| {
                self.apps
                    .keys()
                    .filter(|ns| ns.as_str() != DEFAULT_NAMESPACE)
                    .find_map(|ns| find(ns))
            }),
        };

        found.ok_or_else(|| GmanError::AppNotFound {
            namespace: namespace.map(str::to_string),
            name: name.to_string(),
        })
    }

    pub fn list_releases(&self) -> &[Release] {
        &self.releases
    }

    pub fn get_release(&self, name: &str) -> Result<&Release> {
        self.releases
            .iter()
            .find(|release| release.name == name)
            .ok_or_else(|| GmanError::ReleaseNotFound(name.to_string()))
    }

    pub fn app_count(&self) -> usize {
        self.apps.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.app_count() == 0 && self.releases.is_empty()
    }
}
