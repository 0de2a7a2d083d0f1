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

//! Pointer-file resolution.
//!
//! A readme or short summary whose entire trimmed content is a single
//! absolute URL is a *pointer*: the displayed text lives remotely and is
//! fetched on every read, with relative links rewritten against the
//! pointer's directory.

mod credentials;
mod pointer;
mod resolver;
mod rewrite;


pub use credentials::{Credential, CredentialStore};
pub use pointer::{is_absolute_target, is_pointer, pointer_url};
pub use resolver::{ContentResolver, ResolveOptions, SystemOpener, UrlOpener};
pub use rewrite::{base_url, is_image, rewrite_relative_links};
