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

use clap::{CommandFactory, Parser, Subcommand};
use gman::commands::list::ListCommand;
use gman::commands::namespaces::NamespacesCommand;
use gman::commands::releases::ReleasesCommand;
use gman::commands::search::SearchCommand;
use gman::commands::serve::ServeCommand;
use gman::commands::show::ShowCommand;
use gman::commands::update::UpdateCommand;
use gman::config::{ConfigOverrides, GmanConfig};
use gman::error::{Result, format_error_chain, get_exit_code};
use gman::logging;
use gman::output::OutputFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gman")]
#[command(author, version, about = "Per-application manuals from a git documentation repository", long_about = None)]
struct Cli {
    /// Configuration directory (defaults to $GMAN_HOME or ~/.gman)
    #[arg(long, value_name = "DIR", global = true)]
    config: Option<PathBuf>,

    /// Documentation repository URL, or the name of an entry in `repos`
    #[arg(long, global = true)]
    repo: Option<String>,

    /// Branch to track (default: main)
    #[arg(long, global = true)]
    branch: Option<String>,

    /// Minimum time between pulls, e.g. 24h, 1h30m, 90s (0 disables)
    #[arg(long, value_name = "DURATION", global = true)]
    interval: Option<String>,

    /// Pull the mirror now, ignoring the interval
    #[arg(long, global = true)]
    pull: bool,

    /// Namespace to use (default: default)
    #[arg(short, long, global = true)]
    namespace: Option<String>,

    /// Use every namespace
    #[arg(short = 'A', long, global = true, conflicts_with = "namespace")]
    all_namespaces: bool,

    /// Output format for lists
    #[arg(short, long, value_enum, global = true)]
    output: Option<OutputFormat>,

    /// Print Markdown instead of rendering it with pandoc and groff
    #[arg(long, global = true)]
    no_render: bool,

    /// Pager program; an empty value prints to stdout
    #[arg(long, global = true)]
    pager: Option<String>,

    /// Open pointer URLs in a browser when they cannot be fetched
    #[arg(long, global = true)]
    open: bool,

    /// Do not print notes for new releases
    #[arg(long, global = true)]
    no_notify: bool,

    /// Disable progress indicators
    #[arg(long, global = true)]
    no_progress: bool,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Clone, Debug, PartialEq)]
enum Commands {
    /// List documented apps
    #[command(visible_alias = "ls")]
    List,

    /// Show an app's documentation
    Show {
        /// App name
        app: String,

        /// Prefer the short TLDR summary when the app has one
        #[arg(long)]
        tldr: bool,

        /// Print the app's directory instead of its documentation
        #[arg(long)]
        dir: bool,
    },

    /// Search app names and documentation (substring or regex)
    #[command(visible_alias = "s")]
    Search {
        term: String,

        /// Search release notes instead of apps
        #[arg(long)]
        releases: bool,

        /// Print the directory of a single matching app instead of its documentation
        #[arg(long)]
        dir: bool,
    },

    /// List namespaces
    #[command(visible_alias = "ns")]
    Namespaces,

    /// List releases, or show one release's notes
    Releases {
        /// Release name
        name: Option<String>,
    },

    /// Pull the documentation repository and report new releases
    Update,

    /// Build the documentation web site and serve it, refreshing on the interval
    Serve {
        /// Listen address, e.g. :8080 or 127.0.0.1:9000
        #[arg(long)]
        addr: Option<String>,

        /// Web site project directory
        #[arg(long, value_name = "DIR")]
        web_dir: Option<PathBuf>,
    },
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        let (web_addr, web_dir, tldr) = match &self.command {
            Some(Commands::Serve { addr, web_dir }) => (addr.clone(), web_dir.clone(), None),
            Some(Commands::Show { tldr: true, .. }) => (None, None, Some(true)),
            _ => (None, None, None),
        };

        ConfigOverrides {
            config_dir: self.config.clone(),
            repo: self.repo.clone(),
            branch: self.branch.clone(),
            interval: self.interval.clone(),
            force_update: self.pull,
            namespace: self.namespace.clone(),
            all_namespaces: self.all_namespaces,
            output: self.output,
            render: self.no_render.then_some(false),
            pager: self.pager.clone(),
            open: self.open.then_some(true),
            notify: self.no_notify.then_some(false),
            tldr,
            no_progress: self.no_progress,
            web_addr,
            web_dir,
        }
    }

    /// The command to run. Without one, web mode selects `serve`.
    fn selected_command(&self, web: bool) -> Option<Commands> {
        self.command.clone().or_else(|| {
            web.then_some(Commands::Serve {
                addr: None,
                web_dir: None,
            })
        })
    }
}

fn main() {
    let cli = Cli::parse();

    logging::setup_logger(cli.verbose);

    let config = match GmanConfig::load(&cli.overrides()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", format_error_chain(&e));
            std::process::exit(get_exit_code(&e));
        }
    };

    let Some(command) = cli.selected_command(config.web) else {
        eprintln!("{}", Cli::command().render_help());
        std::process::exit(2);
    };

    let result: Result<()> = (|| match &command {
        Commands::List => ListCommand::new(&config)?.execute(),
        Commands::Show { app, dir, .. } => ShowCommand::new(&config)?.execute(app, *dir),
        Commands::Search {
            term,
            releases,
            dir,
        } => SearchCommand::new(&config)?.execute(term, *releases, *dir),
        Commands::Namespaces => NamespacesCommand::new(&config)?.execute(),
        Commands::Releases { name } => ReleasesCommand::new(&config)?.execute(name.as_deref()),
        Commands::Update => UpdateCommand::new(&config)?.execute(),
        Commands::Serve { .. } => ServeCommand::new(&config)?.execute(),
    })();

    if let Err(e) = result {
        eprintln!("{}", format_error_chain(&e));
        std::process::exit(get_exit_code(&e));
    }
}
