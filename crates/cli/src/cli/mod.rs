// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use crate::colors;
use crate::help;
use clap::{Parser, Subcommand, ValueEnum};

/// Output format for commands supporting structured output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Settings editable with `gitbell config`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ConfigKey {
    /// Minutes between scheduled checks
    Interval,
    /// GitHub token used for API requests
    Token,
    /// Desktop alerts on or off
    Notifications,
    /// Alert sound on or off
    Sound,
    /// Color theme (light or dark)
    Theme,
}

#[derive(Parser)]
#[command(name = "gitbell")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(disable_version_flag = true)]
#[command(about = "Desktop alerts for new GitHub issues in the repositories you follow")]
#[command(
    long_about = "Desktop alerts for new GitHub issues in the repositories you follow.\n\n\
    The gitbelld daemon polls every tracked repository on a schedule and raises an alert \
    for each issue opened since the previous check."
)]
#[command(help_template = help::template())]
#[command(before_help = help::commands())]
#[command(after_help = help::quickstart())]
#[command(styles = help::styles())]
#[allow(clippy::manual_non_exhaustive)]
pub struct Cli {
    /// Print version
    #[arg(short = 'v', short_alias = 'V', long = "version", action = clap::ArgAction::Version)]
    version: (),

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start monitoring a repository
    #[command(after_help = colors::examples("\
Examples:
  gitbell add rust-lang/rust               Track rust-lang/rust
  gitbell add octo/demo --no-verify        Track without asking GitHub first"))]
    Add {
        /// Repository as owner/name
        repo: String,

        /// Skip the existence check against GitHub
        #[arg(long)]
        no_verify: bool,
    },

    /// Stop monitoring a repository
    #[command(alias = "rm")]
    Remove {
        /// Repository as owner/name
        repo: String,
    },

    /// List monitored repositories
    #[command(alias = "ls")]
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Ask the daemon to check all repositories now
    Check,

    /// Show recent alerts
    #[command(after_help = colors::examples("\
Examples:
  gitbell history                 Show all recorded alerts
  gitbell history -n 10           Show the ten newest
  gitbell history clear           Forget recorded alerts"))]
    History {
        #[command(subcommand)]
        command: Option<HistoryCommand>,

        /// Show at most this many entries
        #[arg(long, short = 'n')]
        limit: Option<usize>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Show check statistics
    Stats,

    /// Manage the GitHub token
    #[command(subcommand)]
    Token(TokenCommand),

    /// Write repositories, settings and statistics as JSON
    #[command(after_help = colors::examples("\
Examples:
  gitbell export                  Print to stdout
  gitbell export backup.json      Write to a file"))]
    Export {
        /// Destination file (stdout when omitted)
        path: Option<String>,
    },

    /// Forget all repositories, history and statistics (settings are kept)
    Reset,

    /// View or change settings
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Manage the background daemon
    #[command(subcommand)]
    Daemon(DaemonCommand),
}

/// History subcommands.
#[derive(Subcommand)]
pub enum HistoryCommand {
    /// Delete all recorded alerts
    Clear,
}

/// Token subcommands.
#[derive(Subcommand)]
pub enum TokenCommand {
    /// Check a token against GitHub (defaults to the stored one)
    Validate {
        /// Token to check instead of the stored one
        token: Option<String>,
    },
}

/// Configuration management commands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current settings
    Show,
    /// Change a setting
    #[command(
        arg_required_else_help = true,
        after_help = colors::examples("\
Examples:
  gitbell config set interval 15         Check every 15 minutes
  gitbell config set token <TOKEN>       Authenticate API requests
  gitbell config set sound off           Silence alerts
  gitbell config set theme light         Switch theme")
    )]
    Set {
        #[arg(value_enum)]
        key: ConfigKey,
        value: String,
    },
    /// Restore a setting to its default (removes the token)
    Unset {
        #[arg(value_enum)]
        key: ConfigKey,
    },
}

/// Daemon management commands.
#[derive(Subcommand)]
pub enum DaemonCommand {
    /// Show daemon status
    Status,
    /// Stop the daemon
    Stop,
    /// Start the daemon
    Start,
    /// View daemon logs
    Logs {
        /// Follow log output (tail -f)
        #[arg(long, short)]
        follow: bool,
    },
}
