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

use crate::commands::{find_app, show_app, update_and_notify};
use crate::config::GmanConfig;
use crate::content::ContentResolver;
use crate::error::Result;

pub struct ShowCommand<'a> {
    config: &'a GmanConfig,
}

impl<'a> ShowCommand<'a> {
    pub fn new(config: &'a GmanConfig) -> Result<Self> {
        Ok(Self { config })
    }

    /// Display an app's documentation, or print its directory with `dir`.
    pub fn execute(&self, name: &str, dir: bool) -> Result<()> {
        let (catalog, _) = update_and_notify(self.config, false)?;
        let app = find_app(&catalog, self.config.namespace.as_deref(), name)?;

        if dir {
            println!("{}", app.dir.display());
            return Ok(());
        }
        show_app(app, &ContentResolver::new(), self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::MirrorFixture;
    use crate::error::GmanError;

    #[test]
    fn test_show_readme_and_dir() {
        let fixture = MirrorFixture::new();
        fixture.app("default", "vault");

        let command = ShowCommand::new(&fixture.config).unwrap();
        assert!(command.execute("vault", false).is_ok());
        assert!(command.execute("vault", true).is_ok());
    }

    #[test]
    fn test_show_falls_back_to_other_namespace() {
        let fixture = MirrorFixture::new();
        fixture.app("infra", "consul");

        let command = ShowCommand::new(&fixture.config).unwrap();
        assert!(command.execute("consul", false).is_ok());
    }

    #[test]
    fn test_show_missing_app() {
        let fixture = MirrorFixture::new();
        fixture.app("default", "vault");

        let command = ShowCommand::new(&fixture.config).unwrap();
        assert!(matches!(
            command.execute("nomad", false),
            Err(GmanError::AppNotFound { .. })
        ));
    }
}
