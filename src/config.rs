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

//! Runtime configuration.
//!
//! Values are layered: command-line flags win over `GMAN_*` environment
//! variables, which win over `<config dir>/config.yaml`, which wins over
//! built-in defaults.

use crate::error::{GmanError, Result};
use crate::models::{DEFAULT_BRANCH, DEFAULT_NAMESPACE, RepoRef};
use crate::output::OutputFormat;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILE_NAMES: [&str; 3] = ["config.yaml", "config.yml", "config.json"];
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);
pub const DEFAULT_PAGER: &str = "less";
pub const DEFAULT_WEB_ADDR: &str = ":8080";

/// An interval written either as duration text (`24h`, `1h30m`) or as a
/// number of seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IntervalValue {
    Seconds(u64),
    Text(String),
}

impl IntervalValue {
    pub fn to_duration(&self) -> Result<Duration> {
        match self {
            IntervalValue::Seconds(secs) => Ok(Duration::from_secs(*secs)),
            IntervalValue::Text(text) => parse_duration(text),
        }
    }
}

/// Contents of `config.yaml` (or `config.yml` / `config.json`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFile {
    pub interval: Option<IntervalValue>,
    pub namespace: Option<String>,
    pub open: Option<bool>,
    pub notify: Option<bool>,
    pub pager: Option<String>,
    /// Name of the entry in `repos` used when no URL is given.
    pub repo: Option<String>,
    pub render: Option<bool>,
    pub tldr: Option<bool>,
    #[serde(default)]
    pub repos: BTreeMap<String, RepoRef>,
    pub web: Option<bool>,
    pub web_addr: Option<String>,
    pub web_dir: Option<PathBuf>,
}

impl ConfigFile {
    /// Read the first config file present in `config_dir`, if any.
    pub fn load(config_dir: &Path) -> Result<Option<Self>> {
        let Some(path) = CONFIG_FILE_NAMES
            .iter()
            .map(|name| config_dir.join(name))
            .find(|path| path.is_file())
        else {
            log::debug!(
                "No config file in {}, using defaults",
                config_dir.display()
            );
            return Ok(None);
        };

        let contents = fs::read_to_string(&path)?;
        // YAML is a superset of JSON, so one parser covers every file name
        let file: ConfigFile = serde_yaml_ng::from_str(&contents).map_err(|e| {
            GmanError::ConfigError(format!("Failed to parse {}: {e}", path.display()))
        })?;
        log::debug!("Loaded config from {}", path.display());
        Ok(Some(file))
    }
}

/// `GMAN_*` environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EnvOverrides {
    pub repo: Option<String>,
    pub branch: Option<String>,
    pub interval: Option<IntervalValue>,
    pub namespace: Option<String>,
    pub pager: Option<String>,
    pub render: Option<bool>,
    pub notify: Option<bool>,
    pub open: Option<bool>,
    pub tldr: Option<bool>,
    pub web: Option<bool>,
    pub web_addr: Option<String>,
    pub web_dir: Option<PathBuf>,
}

impl EnvOverrides {
    pub fn from_env() -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::Environment::with_prefix("GMAN").try_parsing(true))
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}

/// Values given on the command line. `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config_dir: Option<PathBuf>,
    pub repo: Option<String>,
    pub branch: Option<String>,
    pub interval: Option<String>,
    pub force_update: bool,
    pub namespace: Option<String>,
    pub all_namespaces: bool,
    pub output: Option<OutputFormat>,
    pub render: Option<bool>,
    pub pager: Option<String>,
    pub open: Option<bool>,
    pub notify: Option<bool>,
    pub tldr: Option<bool>,
    pub no_progress: bool,
    pub web_addr: Option<String>,
    pub web_dir: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct GmanConfig {
    pub config_dir: PathBuf,
    pub repo: Option<RepoRef>,
    /// `None` lists and searches every namespace.
    pub namespace: Option<String>,
    pub interval: Duration,
    pub force_update: bool,
    /// `None` prints documents straight to stdout.
    pub pager: Option<String>,
    pub render: bool,
    pub notify: bool,
    pub open: bool,
    pub tldr: bool,
    pub output: OutputFormat,
    pub no_progress: bool,
    /// Run as a web server when no command is given.
    pub web: bool,
    pub web_addr: String,
    pub web_dir: PathBuf,
}

impl GmanConfig {
    /// Load configuration from the config file, environment and `cli`.
    pub fn load(cli: &ConfigOverrides) -> Result<Self> {
        let config_dir = match &cli.config_dir {
            Some(dir) => paths::expand_tilde(dir),
            None => paths::default_config_dir()?,
        };
        let file = ConfigFile::load(&config_dir)?.unwrap_or_default();
        let env = EnvOverrides::from_env()?;
        Self::from_sources(config_dir, &file, &env, cli)
    }

    pub fn from_sources(
        config_dir: PathBuf,
        file: &ConfigFile,
        env: &EnvOverrides,
        cli: &ConfigOverrides,
    ) -> Result<Self> {
        let interval = match (&cli.interval, &env.interval, &file.interval) {
            (Some(text), _, _) => parse_duration(text)?,
            (None, Some(value), _) | (None, None, Some(value)) => value.to_duration()?,
            (None, None, None) => DEFAULT_INTERVAL,
        };

        let namespace = if cli.all_namespaces {
            None
        } else {
            Some(
                cli.namespace
                    .clone()
                    .or_else(|| env.namespace.clone())
                    .or_else(|| file.namespace.clone())
                    .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string()),
            )
        }
        .filter(|ns| !ns.is_empty());

        let pager = cli
            .pager
            .clone()
            .or_else(|| env.pager.clone())
            .or_else(|| file.pager.clone())
            .unwrap_or_else(|| DEFAULT_PAGER.to_string());

        let url = cli.repo.as_deref().or(env.repo.as_deref());
        let branch = cli.branch.as_deref().or(env.branch.as_deref());
        let repo = match resolve_repo(url, branch, file) {
            Ok(repo) => Some(repo),
            Err(GmanError::NoRepository) => None,
            Err(e) => return Err(e),
        };

        let web_dir = cli
            .web_dir
            .clone()
            .or_else(|| env.web_dir.clone())
            .or_else(|| file.web_dir.clone())
            .map(|dir| paths::expand_tilde(&dir))
            .unwrap_or_else(|| paths::web_dir(&config_dir));

        Ok(Self {
            repo,
            namespace,
            interval,
            force_update: cli.force_update,
            pager: Some(pager).filter(|p| !p.trim().is_empty()),
            render: layered(cli.render, env.render, file.render, true),
            notify: layered(cli.notify, env.notify, file.notify, true),
            open: layered(cli.open, env.open, file.open, false),
            tldr: layered(cli.tldr, env.tldr, file.tldr, false),
            output: cli.output.unwrap_or_default(),
            no_progress: cli.no_progress,
            web: env.web.or(file.web).unwrap_or(false),
            web_addr: cli
                .web_addr
                .clone()
                .or_else(|| env.web_addr.clone())
                .or_else(|| file.web_addr.clone())
                .unwrap_or_else(|| DEFAULT_WEB_ADDR.to_string()),
            web_dir,
            config_dir,
        })
    }

    pub fn repo(&self) -> Result<&RepoRef> {
        self.repo.as_ref().ok_or(GmanError::NoRepository)
    }

    /// Working copy of the configured repository.
    pub fn mirror_dir(&self) -> Result<PathBuf> {
        self.repo()?.mirror_dir(&self.config_dir)
    }

    /// Socket address for the web server; a bare `:port` binds every
    /// interface.
    pub fn bind_addr(&self) -> String {
        if self.web_addr.starts_with(':') {
            format!("0.0.0.0{}", self.web_addr)
        } else {
            self.web_addr.clone()
        }
    }
}

fn layered(cli: Option<bool>, env: Option<bool>, file: Option<bool>, default: bool) -> bool {
    cli.or(env).or(file).unwrap_or(default)
}

/// Pick the repository to mirror.
///
/// An explicit URL that names an entry in `repos` uses that entry. Any
/// other explicit URL is used as-is with `branch` (default `main`).
/// Without a URL, the entry named by the file's `repo` key is used.
pub fn resolve_repo(url: Option<&str>, branch: Option<&str>, file: &ConfigFile) -> Result<RepoRef> {
    if let Some(url) = url.filter(|url| !url.trim().is_empty()) {
        if let Some(entry) = file.repos.get(url) {
            return Ok(entry.clone());
        }
        return Ok(RepoRef::new(url, branch.unwrap_or(DEFAULT_BRANCH)));
    }

    if let Some(name) = &file.repo
        && let Some(entry) = file.repos.get(name)
    {
        return Ok(entry.clone());
    }

    Err(GmanError::NoRepository)
}

/// Parse a duration such as `24h`, `1h30m`, `90s`, `250ms` or `1.5h`.
///
/// A bare number is a count of seconds. Negative durations mean "never" and
/// parse as zero.
pub fn parse_duration(text: &str) -> Result<Duration> {
    let invalid = || GmanError::InvalidInterval(text.to_string());
    let trimmed = text.trim();
    if let Ok(secs) = trimmed.parse::<u64>() {
        return Ok(Duration::from_secs(secs));
    }

    let (negative, mut rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    if rest.is_empty() {
        return Err(invalid());
    }

    let mut total = 0f64;
    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .ok_or_else(invalid)?;
        let value: f64 = rest[..number_len].parse().map_err(|_| invalid())?;
        rest = &rest[number_len..];

        let unit_len = rest
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len());
        let seconds_per_unit = match &rest[..unit_len] {
            "ns" => 1e-9,
            "us" | "µs" => 1e-6,
            "ms" => 1e-3,
            "s" => 1.0,
            "m" => 60.0,
            "h" => 3600.0,
            _ => return Err(invalid()),
        };
        rest = &rest[unit_len..];
        total += value * seconds_per_unit;
    }

    if negative {
        return Ok(Duration::ZERO);
    }
    Duration::try_from_secs_f64(total).map_err(|_| invalid())
}
