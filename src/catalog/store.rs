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
use crate::error::{GmanError, Result};
use std::path::Path;
use std::sync::{Arc, RwLock};

/// Owner of the current catalog snapshot.
///
/// Readers take an `Arc` to a snapshot and keep using it while a reload
/// builds the next one. A failed reload leaves the current snapshot in place.
#[derive(Debug, Default)]
pub struct CatalogStore {
    current: RwLock<Arc<Catalog>>,
}

impl CatalogStore {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            current: RwLock::new(Arc::new(catalog)),
        }
    }

    pub fn snapshot(&self) -> Result<Arc<Catalog>> {
        let guard = self
            .current
            .read()
            .map_err(|_| GmanError::ThreadPanic("catalog lock poisoned".to_string()))?;
        Ok(Arc::clone(&guard))
    }

    pub fn replace(&self, catalog: Catalog) -> Result<Arc<Catalog>> {
        let next = Arc::new(catalog);
        let mut guard = self
            .current
            .write()
            .map_err(|_| GmanError::ThreadPanic("catalog lock poisoned".to_string()))?;
        *guard = Arc::clone(&next);
        Ok(next)
    }

    /// Re-index the mirror and swap the result in.
    pub fn reload(&self, mirror_root: &Path) -> Result<Arc<Catalog>> {
        let catalog = Catalog::load(mirror_root)?;
        self.replace(catalog)
    }
}
