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

//! Listing output and document display.

mod pager;

pub use pager::{display, display_result, render_man};

use crate::error::Result;
use crate::models::{App, Release};
use comfy_table::{Cell, Table};
use serde::Serialize;
use std::io::{self, Write};

pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

#[derive(Serialize)]
struct NamespaceEntry<'a> {
    namespace: &'a str,
}

pub fn print_apps(apps: &[App], all_namespaces: bool, format: OutputFormat) -> Result<()> {
    write_apps(&mut io::stdout().lock(), apps, all_namespaces, format)
}

pub fn print_namespaces(namespaces: &[String], format: OutputFormat) -> Result<()> {
    write_namespaces(&mut io::stdout().lock(), namespaces, format)
}

pub fn print_releases(releases: &[Release], format: OutputFormat) -> Result<()> {
    write_releases(&mut io::stdout().lock(), releases, format)
}

/// Write apps as a table, with a namespace column when listing every
/// namespace.
pub fn write_apps<W: Write>(
    out: &mut W,
    apps: &[App],
    all_namespaces: bool,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json | OutputFormat::Yaml => write_structured(out, apps, format),
        OutputFormat::Text => {
            if apps.is_empty() {
                writeln!(out, "No apps found")?;
                return Ok(());
            }

            let mut table = new_table();
            if all_namespaces {
                table.set_header(vec![Cell::new("Namespace"), Cell::new("Name")]);
                for app in apps {
                    table.add_row(vec![Cell::new(&app.namespace), Cell::new(&app.name)]);
                }
            } else {
                table.set_header(vec![Cell::new("Name")]);
                for app in apps {
                    table.add_row(vec![Cell::new(&app.name)]);
                }
            }
            writeln!(out, "{table}")?;
            Ok(())
        }
    }
}

pub fn write_namespaces<W: Write>(
    out: &mut W,
    namespaces: &[String],
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json | OutputFormat::Yaml => {
            let entries: Vec<NamespaceEntry> = namespaces
                .iter()
                .map(|ns| NamespaceEntry { namespace: ns })
                .collect();
            write_structured(out, &entries, format)
        }
        OutputFormat::Text => {
            if namespaces.is_empty() {
                writeln!(out, "No apps found")?;
                return Ok(());
            }
            let mut table = new_table();
            table.set_header(vec![Cell::new("Namespace")]);
            for ns in namespaces {
                table.add_row(vec![Cell::new(ns)]);
            }
            writeln!(out, "{table}")?;
            Ok(())
        }
    }
}

pub fn write_releases<W: Write>(
    out: &mut W,
    releases: &[Release],
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json | OutputFormat::Yaml => write_structured(out, releases, format),
        OutputFormat::Text => {
            if releases.is_empty() {
                writeln!(out, "No releases found")?;
                return Ok(());
            }
            let mut table = new_table();
            table.set_header(vec![Cell::new("Name"), Cell::new("Date")]);
            for release in releases {
                table.add_row(vec![
                    Cell::new(&release.name),
                    Cell::new(release.date.format(DATE_FORMAT)),
                ]);
            }
            writeln!(out, "{table}")?;
            Ok(())
        }
    }
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_BORDERS_ONLY);
    table
}

fn write_structured<W: Write, T: Serialize + ?Sized>(
    out: &mut W,
    value: &T,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, value)?;
            writeln!(out)?;
        }
        _ => serde_yaml_ng::to_writer(&mut *out, value)?,
    }
    Ok(())
}
