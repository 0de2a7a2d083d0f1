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

pub mod list;
pub mod namespaces;
pub mod releases;
pub mod search;
pub mod serve;
pub mod show;
pub mod update;

use crate::catalog::{Catalog, build_releases};
use crate::config::GmanConfig;
use crate::content::{ContentResolver, ResolveOptions};
use crate::error::{GmanError, Result};
use crate::indicator::ProgressFactory;
use crate::mirror::{GitCli, SyncOutcome, Synchronizer};
use crate::models::{App, Release};
use crate::output;
use crate::version;
use colored::Colorize;
use log::{debug, error, warn};
use std::path::Path;

/// Bring the mirror up to date, re-index it and announce new releases.
///
/// Every command except `serve` starts here. Releases are only announced
/// when a previous copy of the mirror existed to compare against.
pub fn update_and_notify(config: &GmanConfig, force: bool) -> Result<(Catalog, SyncOutcome)> {
    let repo = config.repo()?;
    let mirror = config.mirror_dir()?;

    let previous = releases_before_sync(&mirror);

    let mut progress = ProgressFactory::create(config.no_progress);
    let synchronizer = Synchronizer::new(Box::new(GitCli::new()));
    let outcome = synchronizer.ensure_fresh(
        &mirror,
        repo,
        force || config.force_update,
        config.interval,
        progress.as_mut(),
    )?;

    let catalog = Catalog::load(&mirror)?;
    debug!(
        "Indexed {} apps and {} releases",
        catalog.app_count(),
        catalog.list_releases().len()
    );

    if config.notify
        && let Some(previous) = previous
    {
        let fresh = version::diff_new(&previous, catalog.list_releases());
        if !fresh.is_empty() {
            notify_new_releases(&fresh, &ContentResolver::new(), config);
        }
    }

    Ok((catalog, outcome))
}

/// The release list to diff against after syncing. `None` when there is no
/// mirror yet or it cannot be indexed, which suppresses notification.
fn releases_before_sync(mirror: &Path) -> Option<Vec<Release>> {
    if !mirror.exists() {
        return None;
    }
    match build_releases(mirror) {
        Ok(releases) => Some(releases),
        Err(e) => {
            warn!("Unable to index releases before update: {e}");
            None
        }
    }
}

/// Print each release's notes without a pager. Failures are logged and the
/// release is skipped.
pub fn notify_new_releases(releases: &[Release], resolver: &ContentResolver, config: &GmanConfig) {
    let options = ResolveOptions::display(config.open);
    for release in releases {
        println!("{} {}", "New release:".green().bold(), release.name.bold());
        let resolved = release.readme(resolver, &options);
        if let Err(e) = output::display_result(resolved, config.render, None) {
            error!("Failed to show release {}: {e}", release.name);
        }
    }
}

/// Show an app's readme, or its short summary when preferred and present.
pub(crate) fn show_app(app: &App, resolver: &ContentResolver, config: &GmanConfig) -> Result<()> {
    let options = ResolveOptions::display(config.open);
    let resolved = if config.tldr && app.has_tldr() {
        app.tldr(resolver, &options)
    } else {
        app.readme(resolver, &options)
    };
    output::display_result(resolved, config.render, config.pager.as_deref())
}

pub(crate) fn show_release(
    release: &Release,
    resolver: &ContentResolver,
    config: &GmanConfig,
) -> Result<()> {
    let options = ResolveOptions::display(config.open);
    output::display_result(
        release.readme(resolver, &options),
        config.render,
        config.pager.as_deref(),
    )
}

/// Look up an app, retrying a namespaced miss across every namespace.
pub(crate) fn find_app<'c>(
    catalog: &'c Catalog,
    namespace: Option<&str>,
    name: &str,
) -> Result<&'c App> {
    match catalog.get_app(namespace, name) {
        Err(GmanError::AppNotFound { .. }) if namespace.is_some() => {
            debug!("'{name}' not in namespace {namespace:?}, trying all namespaces");
            catalog.get_app(None, name)
        }
        result => result,
    }
}
