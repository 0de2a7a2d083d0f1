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

//! Static site export.
//!
//! The mirror's docs are copied into `<web dir>/docs` with pointer files
//! resolved, then an npm project in the web directory builds the site into
//! `<web dir>/build`. An empty web dir gets a bundled Docusaurus project.

mod server;

pub use server::{SiteUpdater, serve};

use crate::catalog::Catalog;
use crate::content::{ContentResolver, ResolveOptions};
use crate::error::{GmanError, Result};
use crate::indicator::{ProgressConfig, ProgressIndicator};
use crate::models::RepoRef;
use crate::paths;
use crate::platform;
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

pub const PACKAGE_MANIFEST: &str = "package.json";

/// Site project written into an empty web dir.
const BUNDLED_SITE: [(&str, &str); 3] = [
    (PACKAGE_MANIFEST, include_str!("site/package.json")),
    ("docusaurus.config.js", include_str!("site/docusaurus.config.js")),
    ("sidebars.js", include_str!("site/sidebars.js")),
];

/// Copy `<mirror>/docs` to `<web dir>/docs` and replace every readme and
/// short summary with its resolved text.
///
/// A document that fails to resolve keeps its raw contents.
pub fn render_docs_to_disk(
    catalog: &Catalog,
    mirror: &Path,
    web_dir: &Path,
    resolver: &ContentResolver,
    progress: &mut dyn ProgressIndicator,
) -> Result<()> {
    let source_docs = mirror.join("docs");
    let target_docs = paths::web_docs_dir(web_dir);
    if source_docs.is_dir() {
        let copied = paths::copy_dir(&source_docs, &target_docs)?;
        debug!("Copied {copied} files into {}", target_docs.display());
    } else {
        paths::ensure_directory(target_docs.clone())?;
    }

    let apps = catalog.list_apps(None);
    progress.start(
        ProgressConfig::new("Rendering", "documentation").with_total(apps.len() as u64),
    );
    let options = ResolveOptions::export();

    for (index, app) in apps.iter().enumerate() {
        progress.set_message(format!("{}/{}", app.namespace, app.name));
        debug!("Rendering docs for {}/{}", app.namespace, app.name);

        let readme = relocate(&app.readme_file, &source_docs, &target_docs)?;
        write_resolved(&app.readme_file, &readme, resolver, &options)?;

        if let Some(tldr_file) = &app.tldr_file {
            let tldr = relocate(tldr_file, &source_docs, &target_docs)?;
            write_resolved(tldr_file, &tldr, resolver, &options)?;
        }

        if let Some(examples) = &app.examples_dir {
            let target = relocate(examples, &source_docs, &target_docs)?;
            paths::copy_dir(examples, &target)?;
        }

        progress.update(index as u64 + 1, None);
    }

    progress.complete(Some(format!("Rendered {} apps", apps.len())));
    Ok(())
}

/// Path of `file` under `to`, given its location under `from`.
fn relocate(file: &Path, from: &Path, to: &Path) -> Result<PathBuf> {
    let relative = file.strip_prefix(from).map_err(|_| {
        GmanError::DirectoryNotFound(format!(
            "{} is outside {}",
            file.display(),
            from.display()
        ))
    })?;
    Ok(to.join(relative))
}

fn write_resolved(
    source: &Path,
    target: &Path,
    resolver: &ContentResolver,
    options: &ResolveOptions,
) -> Result<()> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    match resolver.read(source, options) {
        Ok(text) => fs::write(target, text)?,
        Err(e) => {
            warn!("Keeping raw {}: {e}", source.display());
            fs::copy(source, target)?;
        }
    }
    Ok(())
}

/// Environment handed to `npm run build`.
pub fn site_env(repo: &RepoRef, mirror: &Path, web_dir: &Path) -> Vec<(&'static str, String)> {
    vec![
        ("NODE_ENV", "production".to_string()),
        ("SITE_TITLE", repo.site_title()),
        (
            "RELEASES_DIR",
            mirror.join("releases").to_string_lossy().into_owned(),
        ),
        (
            "DOCS_DIR",
            paths::web_docs_dir(web_dir).to_string_lossy().into_owned(),
        ),
        ("GIT_REPO", repo.url.clone()),
        ("GIT_REPO_EDIT_URL", repo.edit_url()),
    ]
}

fn require_site_project(web_dir: &Path) -> Result<()> {
    if web_dir.join(PACKAGE_MANIFEST).is_file() {
        Ok(())
    } else {
        Err(GmanError::DirectoryNotFound(format!(
            "{} (no {PACKAGE_MANIFEST}; place the web site project there or set webDir)",
            web_dir.display()
        )))
    }
}

/// Write the bundled site project into `web_dir` when it has no
/// `package.json`. Files already present are kept. Returns whether anything
/// was written.
pub fn ensure_site_project(web_dir: &Path) -> Result<bool> {
    if web_dir.join(PACKAGE_MANIFEST).is_file() {
        return Ok(false);
    }

    info!("Writing bundled web site project to {}", web_dir.display());
    fs::create_dir_all(web_dir)?;
    for (name, contents) in BUNDLED_SITE {
        let target = web_dir.join(name);
        if target.exists() {
            debug!("Keeping existing {}", target.display());
            continue;
        }
        fs::write(&target, contents)?;
    }
    Ok(true)
}

/// Install the site project's npm dependencies, bootstrapping the project
/// first if needed.
pub fn install_site(web_dir: &Path) -> Result<()> {
    ensure_site_project(web_dir)?;
    info!("Installing web dependencies in {}", web_dir.display());
    let mut npm = platform::command("npm")?;
    npm.arg("install").current_dir(web_dir);
    platform::run(npm)
}

/// Build the static site into `<web dir>/build`.
pub fn build_site(repo: &RepoRef, mirror: &Path, web_dir: &Path) -> Result<()> {
    require_site_project(web_dir)?;
    info!("Building web site in {}", web_dir.display());
    let mut npm = platform::command("npm")?;
    npm.args(["run", "build"])
        .current_dir(web_dir)
        .envs(site_env(repo, mirror, web_dir));
    platform::run(npm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::CredentialStore;
    use crate::indicator::SilentProgress;
    use tempfile::TempDir;

    fn write(path: &Path, contents: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn test_render_docs_to_disk_copies_and_resolves() {
        let mirror = TempDir::new().unwrap();
        let web = TempDir::new().unwrap();
        let app_dir = mirror.path().join("docs/default/vault");
        write(&app_dir.join("README.md"), "# Vault\n");
        write(&app_dir.join("TLDR.md"), "vault read secret/x\n");
        write(&app_dir.join("examples/policy.hcl"), "path \"*\" {}\n");
        write(&mirror.path().join("docs/default/assets/logo.txt"), "logo");

        let catalog = Catalog::load(mirror.path()).unwrap();
        let resolver = ContentResolver::with_credentials(CredentialStore::empty());
        render_docs_to_disk(
            &catalog,
            mirror.path(),
            web.path(),
            &resolver,
            &mut SilentProgress,
        )
        .unwrap();

        let docs = web.path().join("docs/default");
        assert_eq!(
            fs::read_to_string(docs.join("vault/README.md")).unwrap(),
            "# Vault\n"
        );
        assert_eq!(
            fs::read_to_string(docs.join("vault/TLDR.md")).unwrap(),
            "vault read secret/x\n"
        );
        assert!(docs.join("vault/examples/policy.hcl").is_file());
        assert!(docs.join("assets/logo.txt").is_file());
    }

    #[test]
    fn test_render_keeps_raw_pointer_on_fetch_failure() {
        let mut server = mockito::Server::new();
        let _missing = server.mock("GET", "/gone.md").with_status(404).create();
        let pointer = format!("{}/gone.md\n", server.url());

        let mirror = TempDir::new().unwrap();
        let web = TempDir::new().unwrap();
        write(&mirror.path().join("docs/default/vault/README.md"), &pointer);

        let catalog = Catalog::load(mirror.path()).unwrap();
        let resolver = ContentResolver::with_credentials(CredentialStore::empty());
        render_docs_to_disk(
            &catalog,
            mirror.path(),
            web.path(),
            &resolver,
            &mut SilentProgress,
        )
        .unwrap();

        let written =
            fs::read_to_string(web.path().join("docs/default/vault/README.md")).unwrap();
        assert_eq!(written, pointer);
    }

    #[test]
    fn test_render_without_docs_section() {
        let mirror = TempDir::new().unwrap();
        let web = TempDir::new().unwrap();
        let catalog = Catalog::default();
        let resolver = ContentResolver::with_credentials(CredentialStore::empty());
        render_docs_to_disk(
            &catalog,
            mirror.path(),
            web.path(),
            &resolver,
            &mut SilentProgress,
        )
        .unwrap();
        assert!(web.path().join("docs").is_dir());
    }

    #[test]
    fn test_site_env() {
        let repo = RepoRef::new("https://git.example.com/org/handbook.git", "main");
        let env = site_env(&repo, Path::new("/cfg/src/mirror"), Path::new("/cfg/web"));
        let lookup = |key: &str| {
            env.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.clone())
                .unwrap()
        };

        assert_eq!(lookup("NODE_ENV"), "production");
        assert_eq!(lookup("SITE_TITLE"), "handbook");
        assert_eq!(
            PathBuf::from(lookup("RELEASES_DIR")),
            Path::new("/cfg/src/mirror").join("releases")
        );
        assert_eq!(
            PathBuf::from(lookup("DOCS_DIR")),
            Path::new("/cfg/web").join("docs")
        );
        assert_eq!(lookup("GIT_REPO"), repo.url);
        assert_eq!(
            lookup("GIT_REPO_EDIT_URL"),
            "https://git.example.com/org/handbook/blob/main"
        );
    }

    #[test]
    fn test_build_requires_package_manifest() {
        let web = TempDir::new().unwrap();
        let repo = RepoRef::new("https://git.example.com/org/handbook.git", "main");
        assert!(matches!(
            build_site(&repo, Path::new("/nonexistent"), web.path()),
            Err(GmanError::DirectoryNotFound(_))
        ));
    }

    #[test]
    fn test_missing_site_project_is_bootstrapped() {
        let parent = TempDir::new().unwrap();
        let web_dir = parent.path().join("web");

        assert!(ensure_site_project(&web_dir).unwrap());
        for (name, _) in BUNDLED_SITE {
            assert!(web_dir.join(name).is_file(), "{name} not written");
        }
        let sidebars = fs::read_to_string(web_dir.join("sidebars.js")).unwrap();
        assert!(sidebars.contains("docsSidebar"));

        assert!(!ensure_site_project(&web_dir).unwrap());
    }

    #[test]
    fn test_bootstrap_keeps_existing_files() {
        let web = TempDir::new().unwrap();
        fs::write(web.path().join("sidebars.js"), "module.exports = {};").unwrap();

        assert!(ensure_site_project(web.path()).unwrap());
        assert_eq!(
            fs::read_to_string(web.path().join("sidebars.js")).unwrap(),
            "module.exports = {};"
        );
        assert!(web.path().join(PACKAGE_MANIFEST).is_file());
    }
}
