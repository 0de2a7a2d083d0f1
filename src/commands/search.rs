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

use crate::commands::{show_app, show_release, update_and_notify};
use crate::config::GmanConfig;
use crate::content::{ContentResolver, ResolveOptions};
use crate::error::Result;
use crate::output;
use crate::search::{Matcher, SearchEngine};
use log::debug;

pub struct SearchCommand<'a> {
    config: &'a GmanConfig,
}

impl<'a> SearchCommand<'a> {
    pub fn new(config: &'a GmanConfig) -> Result<Self> {
        Ok(Self { config })
    }

    /// Search app (or release) names and contents for `term`.
    ///
    /// A single match is displayed directly, or with `dir` a single app's
    /// directory is printed; anything else is listed.
    pub fn execute(&self, term: &str, releases: bool, dir: bool) -> Result<()> {
        let (catalog, _) = update_and_notify(self.config, false)?;
        let resolver = ContentResolver::new();
        let matcher = Matcher::new(term);
        let engine = SearchEngine::new(&resolver)
            .with_options(ResolveOptions::display(self.config.open));
        debug!(
            "Searching for {:?} ({})",
            matcher.term(),
            if matcher.is_regex() { "regex" } else { "substring" }
        );

        if releases {
            let mut found = engine.search_releases(&catalog, &matcher)?;
            if let [release] = found.as_slice() {
                return show_release(release, &resolver, self.config);
            }
            crate::version::sort_descending(&mut found);
            return output::print_releases(&found, self.config.output);
        }

        let namespace = self.config.namespace.as_deref();
        let mut found = engine.search_apps(&catalog, namespace, &matcher)?;
        if let [app] = found.as_slice() {
            if dir {
                println!("{}", app.dir.display());
                return Ok(());
            }
            return show_app(app, &resolver, self.config);
        }

        found.sort_by(|a, b| (&a.name, &a.namespace).cmp(&(&b.name, &b.namespace)));
        let all_namespaces =
            namespace.is_none() || found.iter().any(|app| Some(app.namespace.as_str()) != namespace);
        output::print_apps(&found, all_namespaces, self.config.output)
    }
}
