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

use crate::error::{GmanError, Result};
use crate::platform;
use log::debug;
use std::io::{self, Write};

/// Convert Markdown to terminal text with `pandoc` and `groff`.
pub fn render_man(markdown: &str) -> Result<String> {
    let mut pandoc = platform::command("pandoc")?;
    pandoc.args(["-s", "-f", "markdown", "-t", "man"]);
    let man = platform::pipe(pandoc, markdown)?;

    let mut groff = platform::command("groff")?;
    groff.args(["-T", "utf8", "-man"]);
    platform::pipe(groff, &man)
}

/// Show a document, optionally rendered, through `pager` or on stdout.
///
/// `fetch_failed` marks `text` as an unresolved pointer, which is shown
/// as-is.
pub fn display(text: &str, render: bool, fetch_failed: bool, pager: Option<&str>) -> Result<()> {
    let text = if render && !fetch_failed {
        render_man(text)?
    } else {
        text.to_string()
    };

    let Some((program, args)) = pager.and_then(split_pager) else {
        let mut stdout = io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        if !text.ends_with('\n') {
            writeln!(stdout)?;
        }
        return Ok(());
    };

    debug!("Paging with {program}");
    let mut command = platform::command(program)?;
    command.args(args);
    platform::pipe_interactive(command, &text)
}

/// Split a pager setting such as `less -R` into program and arguments.
fn split_pager(pager: &str) -> Option<(&str, Vec<&str>)> {
    let mut words = pager.split_whitespace();
    let program = words.next()?;
    Some((program, words.collect()))
}

/// Display a resolved document, or the literal pointer text when the fetch
/// failed.
pub fn display_result(
    resolved: Result<String>,
    render: bool,
    pager: Option<&str>,
) -> Result<()> {
    match resolved {
        Ok(text) => display(&text, render, false, pager),
        Err(GmanError::FetchFailure { literal, .. }) => display(&literal, render, true, pager),
        Err(e) => Err(e),
    }
}
