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

use crate::catalog::Catalog;
use crate::content::{ContentResolver, ResolveOptions};
use crate::error::{GmanError, Result};
use crate::models::{App, Release};
use crate::search::Matcher;
use log::{debug, error, trace};
use std::collections::HashSet;
use std::path::Path;
use std::sync::{Mutex, mpsc};
use std::thread;

/// Upper bound on concurrent search workers.
pub const MAX_WORKERS: usize = 10;

/// Something the search engine can test against a [`Matcher`].
pub trait Searchable: Clone + Send + Sync {
    fn name(&self) -> &str;

    /// Content files checked after the name, in order.
    fn documents(&self) -> Vec<&Path>;
}

impl Searchable for App {
    fn name(&self) -> &str {
        &self.name
    }

    fn documents(&self) -> Vec<&Path> {
        let mut documents = vec![self.readme_file.as_path()];
        documents.extend(self.tldr_file.as_deref());
        documents
    }
}

impl Searchable for Release {
    fn name(&self) -> &str {
        &self.name
    }

    fn documents(&self) -> Vec<&Path> {
        vec![self.readme_file.as_path()]
    }
}

/// Tests items against a matcher on a bounded pool of worker threads.
///
/// Searching never opens URLs in a browser, whatever the options it was
/// built with.
pub struct SearchEngine<'a> {
    resolver: &'a ContentResolver,
    options: ResolveOptions,
    max_workers: usize,
}

impl<'a> SearchEngine<'a> {
    pub fn new(resolver: &'a ContentResolver) -> Self {
        Self {
            resolver,
            options: ResolveOptions::quiet(),
            max_workers: MAX_WORKERS,
        }
    }

    pub fn with_options(mut self, options: ResolveOptions) -> Self {
        self.options = ResolveOptions {
            open_on_failure: false,
            ..options
        };
        self
    }

    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers.max(1);
        self
    }

    /// Search apps in `namespace`, or in every namespace when it is `None`.
    ///
    /// A namespaced search with no matches is repeated across all
    /// namespaces.
    pub fn search_apps(
        &self,
        catalog: &Catalog,
        namespace: Option<&str>,
        matcher: &Matcher,
    ) -> Result<Vec<App>> {
        let found = self.search(catalog.list_apps(namespace), matcher)?;
        if found.is_empty()
            && let Some(ns) = namespace
        {
            debug!("No apps matched in namespace '{ns}', searching all namespaces");
            return self.search(catalog.list_apps(None), matcher);
        }
        Ok(found)
    }

    pub fn search_releases(&self, catalog: &Catalog, matcher: &Matcher) -> Result<Vec<Release>> {
        self.search(catalog.list_releases().to_vec(), matcher)
    }

    /// Items whose name or resolved content matches, deduplicated by name.
    ///
    /// Results are in completion order. Items whose content cannot be
    /// resolved are logged and left out.
    pub fn search<T: Searchable>(&self, items: Vec<T>, matcher: &Matcher) -> Result<Vec<T>> {
        let total = items.len();
        if total == 0 {
            return Ok(Vec::new());
        }
        let workers = self.max_workers.min(total);
        debug!(
            "Searching {total} items for '{}' with {workers} workers",
            matcher.term()
        );

        let (job_tx, job_rx) = mpsc::channel::<T>();
        let job_rx = Mutex::new(job_rx);
        let (result_tx, result_rx) = mpsc::channel::<(T, Result<bool>)>();

        thread::scope(|scope| {
            let handles: Vec<_> = (0..workers)
                .map(|_| {
                    let job_rx = &job_rx;
                    let result_tx = result_tx.clone();
                    scope.spawn(move || {
                        loop {
                            let job = match job_rx.lock() {
                                Ok(rx) => rx.recv(),
                                Err(_) => break,
                            };
                            let Ok(item) = job else {
                                break;
                            };
                            let outcome = self.check(&item, matcher);
                            if result_tx.send((item, outcome)).is_err() {
                                break;
                            }
                        }
                    })
                })
                .collect();
            drop(result_tx);

            for item in items {
                if job_tx.send(item).is_err() {
                    break;
                }
            }
            drop(job_tx);

            let mut seen = HashSet::new();
            let mut found = Vec::new();
            for _ in 0..total {
                let Ok((item, outcome)) = result_rx.recv() else {
                    break;
                };
                match outcome {
                    Ok(true) => {
                        if seen.insert(item.name().to_string()) {
                            found.push(item);
                        }
                    }
                    Ok(false) => {}
                    Err(e) => error!("Error searching '{}': {e}", item.name()),
                }
            }

            for handle in handles {
                handle
                    .join()
                    .map_err(|_| GmanError::ThreadPanic("search worker panicked".to_string()))?;
            }
            debug!("{} of {total} items matched", found.len());
            Ok(found)
        })
    }

    fn check<T: Searchable>(&self, item: &T, matcher: &Matcher) -> Result<bool> {
        if matcher.is_match(item.name()) {
            trace!("'{}' matched by name", item.name());
            return Ok(true);
        }
        for document in item.documents() {
            let text = self.resolver.read(document, &self.options)?;
            if matcher.is_match(&text) {
                trace!("'{}' matched in {}", item.name(), document.display());
                return Ok(true);
            }
        }
        Ok(false)
    }
}
