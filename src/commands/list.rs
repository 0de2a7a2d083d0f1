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
use crate::output;
use log::debug;

pub struct ListCommand<'a> {
    config: &'a GmanConfig,
}

impl<'a> ListCommand<'a> {
    pub fn new(config: &'a GmanConfig) -> Result<Self> {
        Ok(Self { config })
    }

    pub fn execute(&self) -> Result<()> {
        let (catalog, _) = update_and_notify(self.config, false)?;
        let namespace = self.config.namespace.as_deref();
        let apps = catalog.list_apps(namespace);
        debug!("Listing {} apps in {namespace:?}", apps.len());
        output::print_apps(&apps, namespace.is_none(), self.config.output)
    }
}
