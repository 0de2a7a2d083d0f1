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

//! Continuous serve mode.
//!
//! A dedicated updater thread repeats sync, reindex, render and build on the
//! configured interval while an HTTP listener serves the last built site.

use crate::catalog::CatalogStore;
use crate::config::{DEFAULT_INTERVAL, GmanConfig};
use crate::content::ContentResolver;
use crate::error::Result;
use crate::indicator::{ProgressFactory, ProgressIndicator};
use crate::mirror::{GitCli, Synchronizer};
use crate::models::RepoRef;
use crate::paths;
use crate::web::{build_site, install_site, render_docs_to_disk};
use axum::Router;
use log::{error, info};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;

/// Keeps the exported site in step with the mirror.
pub struct SiteUpdater {
    repo: RepoRef,
    mirror: PathBuf,
    web_dir: PathBuf,
    interval: Duration,
    force: bool,
    synchronizer: Synchronizer,
    resolver: ContentResolver,
    store: Arc<CatalogStore>,
    progress: Box<dyn ProgressIndicator>,
}

impl SiteUpdater {
    pub fn new(config: &GmanConfig, synchronizer: Synchronizer, store: Arc<CatalogStore>) -> Result<Self> {
        Ok(Self {
            repo: config.repo()?.clone(),
            mirror: config.mirror_dir()?,
            web_dir: config.web_dir.clone(),
            // Serve mode always refreshes; a disabled interval falls back to a day
            interval: if config.interval.is_zero() {
                DEFAULT_INTERVAL
            } else {
                config.interval
            },
            force: config.force_update,
            synchronizer,
            resolver: ContentResolver::new(),
            store,
            progress: ProgressFactory::create(config.no_progress),
        })
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// One cycle of sync, reindex, render and build.
    pub fn refresh(&mut self) -> Result<()> {
        let outcome = self.synchronizer.ensure_fresh(
            &self.mirror,
            &self.repo,
            self.force,
            self.interval,
            self.progress.as_mut(),
        )?;
        self.force = false;
        info!("Mirror sync: {outcome:?}");

        let catalog = self.store.reload(&self.mirror)?;
        render_docs_to_disk(
            &catalog,
            &self.mirror,
            &self.web_dir,
            &self.resolver,
            self.progress.as_mut(),
        )?;
        build_site(&self.repo, &self.mirror, &self.web_dir)
    }

    /// Refresh forever, logging failed cycles.
    pub fn run(mut self) {
        loop {
            if let Err(e) = self.refresh() {
                error!("Site update failed: {e}");
            }
            thread::sleep(self.interval);
        }
    }
}

/// Router serving the built site from `root`.
pub fn static_site(root: &Path) -> Router {
    Router::new().fallback_service(ServeDir::new(root))
}

/// Bind `addr` and serve `root` until the listener fails.
pub async fn serve_static(root: PathBuf, addr: &str) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    let local: SocketAddr = listener.local_addr()?;
    info!("Serving {} on http://{local}", root.display());
    axum::serve(listener, static_site(&root)).await?;
    Ok(())
}

/// Run the updater thread and serve the site in the foreground.
pub fn serve(config: &GmanConfig) -> Result<()> {
    install_site(&config.web_dir)?;

    let store = Arc::new(CatalogStore::default());
    let synchronizer = Synchronizer::new(Box::new(GitCli::new()));
    let updater = SiteUpdater::new(config, synchronizer, Arc::clone(&store))?;
    info!("Refreshing the site every {:?}", updater.interval());

    thread::Builder::new()
        .name("gman-site-updater".to_string())
        .spawn(move || updater.run())?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(serve_static(
        paths::web_build_dir(&config.web_dir),
        &config.bind_addr(),
    ))
}
