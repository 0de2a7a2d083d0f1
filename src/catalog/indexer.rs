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

use crate::error::{GmanError, Result};
use crate::models::{App, Release};
use crate::version;
use chrono::{DateTime, Utc};
use log::{debug, trace};
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

const README: &str = "README.md";
const TLDR: &str = "TLDR.md";
const EXAMPLES: &str = "examples";

/// Walk `<mirror_root>/docs` and group every app by namespace.
///
/// An app is a `README.md` (any case) at `docs/<namespace>/<name>/`. Deeper
/// readmes map to the same namespace and name. A mirror without a `docs`
/// directory has no apps.
pub fn build_catalog(mirror_root: &Path) -> Result<BTreeMap<String, Vec<App>>> {
    let docs = section_root(mirror_root, "docs")?;
    let mut apps: BTreeMap<String, Vec<App>> = BTreeMap::new();
    let Some(docs) = docs else {
        return Ok(apps);
    };

    for (readme, segments) in readmes(&docs)? {
        let [namespace, name, ..] = segments.as_slice() else {
            trace!("Skipping {}: not inside an app directory", readme.display());
            continue;
        };
        let Some(dir) = readme.parent().map(Path::to_path_buf) else {
            continue;
        };

        let tldr = dir.join(TLDR);
        let examples = dir.join(EXAMPLES);
        let app = App {
            namespace: namespace.clone(),
            name: name.clone(),
            tldr_file: tldr.exists().then_some(tldr),
            examples_dir: examples.exists().then_some(examples),
            readme_file: readme,
            dir,
        };
        debug!("Found app {}/{}", app.namespace, app.name);
        apps.entry(app.namespace.clone()).or_default().push(app);
    }

    Ok(apps)
}

/// Walk `<mirror_root>/releases` for `releases/<name>/README.md`.
///
/// The result is sorted newest first when the first release found is named
/// like a semantic version.
pub fn build_releases(mirror_root: &Path) -> Result<Vec<Release>> {
    let Some(root) = section_root(mirror_root, "releases")? else {
        return Ok(Vec::new());
    };

    let now = Utc::now();
    let mut releases = Vec::new();
    for (readme, segments) in readmes(&root)? {
        let Some(name) = segments.first() else {
            trace!("Skipping {}: not inside a release directory", readme.display());
            continue;
        };
        let Some(dir) = readme.parent().map(Path::to_path_buf) else {
            continue;
        };

        let modified: DateTime<Utc> = readme.metadata()?.modified()?.into();
        let date = if modified > now { now } else { modified };

        debug!("Found release {name}");
        releases.push(Release {
            name: name.clone(),
            date,
            dir,
            readme_file: readme,
        });
    }

    version::sort_descending(&mut releases);
    Ok(releases)
}

fn section_root(mirror_root: &Path, section: &str) -> Result<Option<PathBuf>> {
    if !mirror_root.is_dir() {
        return Err(GmanError::DirectoryNotFound(
            mirror_root.display().to_string(),
        ));
    }
    let root = mirror_root.join(section);
    if root.is_dir() {
        Ok(Some(root))
    } else {
        debug!("{} does not exist", root.display());
        Ok(None)
    }
}

/// Every readme under `root` in walk order, with the directory segments
/// between `root` and the readme.
fn readmes(root: &Path) -> Result<Vec<(PathBuf, Vec<String>)>> {
    let mut found = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        if !entry.file_name().to_string_lossy().eq_ignore_ascii_case(README) {
            continue;
        }

        let path = entry.into_path();
        let segments = path
            .parent()
            .and_then(|dir| dir.strip_prefix(root).ok())
            .map(|relative| {
                relative
                    .components()
                    .filter_map(|c| match c {
                        Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default();
        found.push((path, segments));
    }
    Ok(found)
}
