// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! gbrs - the library behind the `gitbell` CLI.
//!
//! gitbell follows GitHub repositories and raises a desktop alert for every
//! newly opened issue. Polling happens in the `gitbelld` daemon; this crate
//! edits the shared state store (repositories, settings, history) and talks
//! to the daemon over its Unix socket for on-demand checks and rescheduling.
//!
//! # Main Components
//!
//! - [`Cli`] / [`Command`] - the clap command-line surface
//! - [`run`] - dispatches a parsed [`Command`]
//! - [`Error`] - user-facing errors with hints

mod cli;
pub mod colors;
mod commands;
mod daemon;
mod display;
pub mod help;
#[cfg(test)]
mod test_support;

pub mod error;

pub use cli::{
    Cli, Command, ConfigCommand, ConfigKey, DaemonCommand, HistoryCommand, OutputFormat,
    TokenCommand,
};
pub use error::{Error, Result};

/// Execute a CLI command. This is the main entry point for library users
/// and provides a testable way to run commands without process execution.
pub fn run(command: Command) -> Result<()> {
    match command {
        Command::Add { repo, no_verify } => commands::repo::add(&repo, no_verify),
        Command::Remove { repo } => commands::repo::remove(&repo),
        Command::List { output } => commands::repo::list(output),
        Command::Check => commands::check::run(),
        Command::History {
            command: Some(HistoryCommand::Clear),
            ..
        } => commands::history::clear(),
        Command::History {
            command: None,
            limit,
            output,
        } => commands::history::run(limit, output),
        Command::Stats => commands::stats::run(),
        Command::Token(TokenCommand::Validate { token }) => commands::token::validate(token),
        Command::Export { path } => commands::export::run(path.as_deref()),
        Command::Reset => commands::reset::run(),
        Command::Config(cmd) => match cmd {
            ConfigCommand::Show => commands::config::show(),
            ConfigCommand::Set { key, value } => commands::config::set(key, &value),
            ConfigCommand::Unset { key } => commands::config::unset(key),
        },
        Command::Daemon(cmd) => match cmd {
            DaemonCommand::Status => commands::daemon::status(),
            DaemonCommand::Stop => commands::daemon::stop(),
            DaemonCommand::Start => commands::daemon::start(),
            DaemonCommand::Logs { follow } => commands::daemon::logs(follow),
        },
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
