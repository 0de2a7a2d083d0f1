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

//! Platform-specific process execution.

use crate::error::{GmanError, Result};
use crate::logging::stream_process_output;
use log::debug;
use std::ffi::OsStr;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread;

/// Locate an external program on `PATH`.
pub fn resolve_program(program: &str) -> Result<PathBuf> {
    which::which(program).map_err(|_| GmanError::CommandNotFound(program.to_string()))
}

/// Build a command for a program that must exist on `PATH`.
pub fn command(program: &str) -> Result<Command> {
    Ok(Command::new(resolve_program(program)?))
}

/// Human readable rendering of a command line, used in errors and logs.
pub fn describe(command: &Command) -> String {
    let program = PathBuf::from(command.get_program());
    let name = program
        .file_name()
        .unwrap_or_else(|| OsStr::new(""))
        .to_string_lossy()
        .into_owned();
    command
        .get_args()
        .fold(name, |line, arg| format!("{line} {}", arg.to_string_lossy()))
}

/// Run a command to completion.
///
/// With debug logging the child's output streams to the terminal; otherwise
/// it is captured and stderr becomes part of the error on failure.
pub fn run(mut command: Command) -> Result<()> {
    let description = describe(&command);
    debug!("Running: {description}");

    if stream_process_output() {
        let status = command
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| spawn_error(&description, e))?;
        if !status.success() {
            return Err(GmanError::ProcessFailed {
                command: description,
                message: status.to_string(),
            });
        }
        return Ok(());
    }

    let output = command
        .stdin(Stdio::null())
        .output()
        .map_err(|e| spawn_error(&description, e))?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let message = if stderr.is_empty() {
            output.status.to_string()
        } else {
            format!("{}: {stderr}", output.status)
        };
        return Err(GmanError::ProcessFailed {
            command: description,
            message,
        });
    }
    Ok(())
}

/// Feed `input` to a command's stdin and collect its stdout.
pub fn pipe(mut command: Command, input: &str) -> Result<String> {
    let description = describe(&command);
    debug!("Piping {} bytes through: {description}", input.len());

    let stderr = if stream_process_output() {
        Stdio::inherit()
    } else {
        Stdio::piped()
    };
    let mut child = command
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(stderr)
        .spawn()
        .map_err(|e| spawn_error(&description, e))?;

    let writer = feed_stdin(&mut child, input);
    let output = child
        .wait_with_output()
        .map_err(|e| spawn_error(&description, e))?;
    join_writer(writer, &description)?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(GmanError::ProcessFailed {
            command: description,
            message: if stderr.is_empty() {
                output.status.to_string()
            } else {
                format!("{}: {stderr}", output.status)
            },
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Feed `input` to an interactive program (a pager) that owns the terminal.
pub fn pipe_interactive(mut command: Command, input: &str) -> Result<()> {
    let description = describe(&command);
    debug!("Paging through: {description}");

    let mut child = command
        .stdin(Stdio::piped())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|e| spawn_error(&description, e))?;

    let writer = feed_stdin(&mut child, input);
    let status = child.wait().map_err(|e| spawn_error(&description, e))?;
    join_writer(writer, &description)?;

    if !status.success() {
        return Err(GmanError::ProcessFailed {
            command: description,
            message: status.to_string(),
        });
    }
    Ok(())
}

// Writing on a separate thread keeps large inputs from deadlocking against a
// child that fills its stdout pipe before draining stdin.
fn feed_stdin(
    child: &mut std::process::Child,
    input: &str,
) -> Option<thread::JoinHandle<std::io::Result<()>>> {
    let mut stdin = child.stdin.take()?;
    let data = input.as_bytes().to_vec();
    Some(thread::spawn(move || {
        match stdin.write_all(&data) {
            // Pagers may quit before reading everything
            Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => Ok(()),
            other => other,
        }
    }))
}

fn join_writer(
    writer: Option<thread::JoinHandle<std::io::Result<()>>>,
    description: &str,
) -> Result<()> {
    if let Some(handle) = writer {
        handle
            .join()
            .map_err(|_| GmanError::ThreadPanic(format!("stdin writer for {description}")))??;
    }
    Ok(())
}

fn spawn_error(description: &str, error: std::io::Error) -> GmanError {
    GmanError::ProcessFailed {
        command: description.to_string(),
        message: error.to_string(),
    }
}
