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

//! netrc lookup used to authenticate pointer fetches.

use crate::error::{GmanError, Result};
use log::debug;
use netrc::Netrc;
use std::fs;
use std::io::BufReader;
use std::path::{Path, PathBuf};

const NETRC_FILE_NAME: &str = ".netrc";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credential {
    pub login: Option<String>,
    pub password: Option<String>,
}

impl From<&netrc::Machine> for Credential {
    fn from(machine: &netrc::Machine) -> Self {
        Self {
            login: Some(machine.login.clone()).filter(|login| !login.is_empty()),
            password: machine.password.clone(),
        }
    }
}

/// Credentials keyed by host, as read from a netrc file.
#[derive(Debug, Clone, Default)]
pub struct CredentialStore {
    machines: Vec<(String, Credential)>,
    default: Option<Credential>,
}

impl CredentialStore {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Location of the per-user netrc file.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(NETRC_FILE_NAME))
    }

    /// Load the per-user netrc file. A missing or unreadable file yields an
    /// empty store so fetches proceed unauthenticated.
    pub fn from_home() -> Self {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path).unwrap_or_else(|e| {
                debug!("Ignoring unreadable netrc {}: {e}", path.display());
                Self::empty()
            }),
            _ => Self::empty(),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let store = Self::parse(&contents)?;
        debug!(
            "Loaded {} netrc machine entries from {}",
            store.machines.len(),
            path.display()
        );
        Ok(store)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let netrc = Netrc::parse(BufReader::new(contents.as_bytes()))
            .map_err(|e| GmanError::ConfigError(format!("Invalid netrc: {e:?}")))?;

        Ok(Self {
            machines: netrc
                .hosts
                .iter()
                .map(|(host, machine)| (host.clone(), Credential::from(machine)))
                .collect(),
            default: netrc.default.as_ref().map(Credential::from),
        })
    }

    /// First entry for `host` wins; the `default` entry covers the rest.
    pub fn lookup(&self, host: &str) -> Option<&Credential> {
        self.machines
            .iter()
            .find(|(name, _)| name == host)
            .map(|(_, cred)| cred)
            .or(self.default.as_ref())
    }

    /// The token sent as `Authorization: token <password>` for a host.
    pub fn token_for(&self, host: &str) -> Option<&str> {
        self.lookup(host).and_then(|cred| cred.password.as_deref())
    }

    /// Like [`token_for`](Self::token_for), but an explicit port selects a
    /// `host:port` entry before the bare host.
    pub fn token_for_authority(&self, host: &str, port: Option<u16>) -> Option<&str> {
        port.and_then(|port| self.exact_token(&format!("{host}:{port}")))
            .or_else(|| self.token_for(host))
    }

    fn exact_token(&self, name: &str) -> Option<&str> {
        self.machines
            .iter()
            .find(|(host, _)| host == name)
            .and_then(|(_, cred)| cred.password.as_deref())
    }

    pub fn is_empty(&self) -> bool {
        self.machines.is_empty() && self.default.is_none()
    }
}
