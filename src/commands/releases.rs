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

use crate::commands::{show_release, update_and_notify};
use crate::config::GmanConfig;
use crate::content::ContentResolver;
use crate::error::Result;
use crate::output;

pub struct ReleasesCommand<'a> {
    config: &'a GmanConfig,
}

impl<'a> ReleasesCommand<'a> {
    pub fn new(config: &'a GmanConfig) -> Result<Self> {
        Ok(Self { config })
    }

    /// List releases newest first, or show one release's notes.
    pub fn execute(&self, name: Option<&str>) -> Result<()> {
        let (catalog, _) = update_and_notify(self.config, false)?;
        match name {
            None => output::print_releases(catalog.list_releases(), self.config.output),
            Some(name) => {
                let release = catalog.get_release(name)?;
                show_release(release, &ContentResolver::new(), self.config)
            }
        }
    }
}
