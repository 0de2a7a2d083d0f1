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

mod home;
mod shared;

pub use home::{
    SRC_DIR, WEB_BUILD_DIR, WEB_DIR, WEB_DOCS_DIR, default_config_dir, src_dir, web_build_dir,
    web_dir, web_docs_dir,
};
pub use shared::{copy_dir, ensure_directory, expand_tilde};
