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

use crate::config::GmanConfig;
use crate::error::Result;
use crate::web;

pub struct ServeCommand<'a> {
    config: &'a GmanConfig,
}

impl<'a> ServeCommand<'a> {
    pub fn new(config: &'a GmanConfig) -> Result<Self> {
        config.repo()?;
        Ok(Self { config })
    }

    /// Keep the web site built from the mirror and serve it until killed.
    pub fn execute(&self) -> Result<()> {
        web::serve(self.config)
    }
}
