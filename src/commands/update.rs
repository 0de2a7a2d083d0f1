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

use crate::commands::update_and_notify;
use crate::config::GmanConfig;
use crate::error::Result;
use crate::mirror::SyncOutcome;
use colored::Colorize;

pub struct UpdateCommand<'a> {
    config: &'a GmanConfig,
}

impl<'a> UpdateCommand<'a> {
    pub fn new(config: &'a GmanConfig) -> Result<Self> {
        Ok(Self { config })
    }

    /// Pull the mirror now, regardless of the update interval.
    pub fn execute(&self) -> Result<()> {
        let (catalog, outcome) = update_and_notify(self.config, true)?;
        let verb = match outcome {
            SyncOutcome::Cloned => "Cloned",
            SyncOutcome::Pulled => "Updated",
            SyncOutcome::UpToDate => "Already up to date:",
        };
        println!(
            "{} {verb} {} ({} apps, {} releases)",
            "✓".green().bold(),
            self.config.repo()?,
            catalog.app_count(),
            catalog.list_releases().len()
        );
        Ok(())
    }
}
