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

use crate::content::credentials::CredentialStore;
use crate::content::pointer::pointer_url;
use crate::content::rewrite::{base_url, rewrite_relative_links};
use crate::error::{GmanError, Result};
use crate::platform;
use crate::user_agent;
use attohttpc::{RequestBuilder, Session};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use log::{debug, error, trace};
use std::fs;
use std::path::Path;
use url::Url;

/// Per-call resolution settings.
///
/// These travel with each request instead of living in process state, so a
/// search and an interactive read can run side by side with different
/// behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Inline relative images as base64 data URIs.
    pub embed_images: bool,
    /// Hand the pointer URL to the desktop opener when the fetch fails.
    pub open_on_failure: bool,
    /// Follow HTTP redirects instead of reporting them as fetch failures.
    ///
    /// None of the constructors below enable this; pointers are expected to
    /// name their final location. It exists for callers that talk to hosts
    /// which redirect raw file URLs, and for tests of both behaviors.
    pub follow_redirects: bool,
}

impl ResolveOptions {
    /// Interactive display of a single document.
    pub fn display(open_on_failure: bool) -> Self {
        Self {
            open_on_failure,
            ..Self::default()
        }
    }

    /// Background reads such as search; never opens anything.
    pub fn quiet() -> Self {
        Self::default()
    }

    /// Static site export: images are embedded so pages are self-contained.
    pub fn export() -> Self {
        Self {
            embed_images: true,
            ..Self::default()
        }
    }
}

/// Presents a URL to the user outside of gman, e.g. in a browser.
pub trait UrlOpener: Send + Sync {
    fn open(&self, url: &str) -> Result<()>;
}

pub struct SystemOpener;

impl UrlOpener for SystemOpener {
    fn open(&self, url: &str) -> Result<()> {
        platform::open_url(url)
    }
}

pub struct ContentResolver {
    session: Session,
    credentials: CredentialStore,
    opener: Box<dyn UrlOpener>,
}

impl ContentResolver {
    pub fn new() -> Self {
        Self::with_credentials(CredentialStore::from_home())
    }

    pub fn with_credentials(credentials: CredentialStore) -> Self {
        let mut session = Session::new();
        session.header("User-Agent", user_agent::content_client());
        session.proxy_settings(attohttpc::ProxySettings::from_env());

        Self {
            session,
            credentials,
            opener: Box::new(SystemOpener),
        }
    }

    pub fn with_opener(mut self, opener: Box<dyn UrlOpener>) -> Self {
        self.opener = opener;
        self
    }

    /// Read a content file and resolve it.
    pub fn read(&self, path: &Path, options: &ResolveOptions) -> Result<String> {
        let contents = fs::read_to_string(path)?;
        debug!("Read {} ({} bytes)", path.display(), contents.len());
        self.resolve(&contents, options)
    }

    /// Return literal contents unchanged, or fetch the document a pointer
    /// refers to.
    ///
    /// On a non-2xx response the error is `FetchFailure` carrying the raw
    /// pointer text, and the URL is opened externally when requested.
    pub fn resolve(&self, contents: &str, options: &ResolveOptions) -> Result<String> {
        let Some(url) = pointer_url(contents) else {
            trace!("Contents are literal text");
            return Ok(contents.to_string());
        };

        debug!("Contents point to {url}");
        match self.fetch_document(&url, options) {
            Ok(text) => Ok(text),
            Err(GmanError::FetchFailure { url, status, .. }) => {
                if options.open_on_failure {
                    debug!("Opening {url} after HTTP {status}");
                    if let Err(e) = self.opener.open(&url) {
                        error!("Failed to open {url}: {e}");
                    }
                }
                Err(GmanError::FetchFailure {
                    url,
                    status,
                    literal: contents.to_string(),
                })
            }
            Err(e) => Err(e),
        }
    }

    fn request(&self, url: &Url, options: &ResolveOptions) -> RequestBuilder {
        let mut request = self
            .session
            .get(url.as_str())
            .follow_redirects(options.follow_redirects);

        if let Some(host) = url.host_str()
            && let Some(token) = self.credentials.token_for_authority(host, url.port())
        {
            trace!("Using netrc credentials for {host}");
            request = request.header("Authorization", format!("token {token}"));
        }
        request
    }

    fn fetch_document(&self, url: &Url, options: &ResolveOptions) -> Result<String> {
        let response = self
            .request(url, options)
            .send()
            .map_err(|e| GmanError::Network(format!("Failed to fetch {url}: {e}")))?;

        let status = response.status();
        debug!("GET {url} -> {status}");
        if !response.is_success() {
            return Err(GmanError::FetchFailure {
                url: url.to_string(),
                status: status.as_u16(),
                literal: String::new(),
            });
        }

        let body = response
            .text()
            .map_err(|e| GmanError::Network(format!("Failed to read {url}: {e}")))?;

        let base = base_url(url);
        let rewritten = rewrite_relative_links(&body, &base, |image_url| {
            if !options.embed_images {
                return None;
            }
            match self.fetch_data_uri(image_url, options) {
                Ok(data_uri) => Some(data_uri),
                Err(e) => {
                    error!("Failed to embed image {image_url}: {e}");
                    None
                }
            }
        });
        Ok(rewritten)
    }

    /// Fetch an image and encode it as a `data:` URI using the response's
    /// content type.
    pub fn fetch_data_uri(&self, image_url: &str, options: &ResolveOptions) -> Result<String> {
        let url = Url::parse(image_url)
            .map_err(|e| GmanError::Network(format!("Invalid image URL {image_url}: {e}")))?;

        let response = self
            .request(&url, options)
            .send()
            .map_err(|e| GmanError::Network(format!("Failed to fetch {url}: {e}")))?;

        let status = response.status();
        if !response.is_success() {
            return Err(GmanError::FetchFailure {
                url: url.to_string(),
                status: status.as_u16(),
                literal: image_url.to_string(),
            });
        }

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|value| value.to_str().ok())
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = response
            .bytes()
            .map_err(|e| GmanError::Network(format!("Failed to read {url}: {e}")))?;

        Ok(format!(
            "data:{content_type};base64,{}",
            STANDARD.encode(bytes)
        ))
    }
}

impl Default for ContentResolver {
    fn default() -> Self {
        Self::new()
    }
}
