// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Help text generation with colorization support.

use crate::colors;
use clap::builder::styling::Styles;

/// Clap styles matching the palette in [`colors::codes`].
pub fn styles() -> Styles {
    if !colors::should_colorize() {
        return Styles::plain();
    }

    use anstyle::{Ansi256Color, Color, Style};

    let paint = |code: u8| Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(code))));
    let header = paint(colors::codes::HEADER);
    let literal = paint(colors::codes::LITERAL);
    let context = paint(colors::codes::CONTEXT);

    Styles::styled()
        .header(header)
        .usage(header)
        .literal(literal)
        .placeholder(context)
        .valid(context)
}

/// Main help template with colorized Options header.
pub fn template() -> String {
    format!(
        "{{about-with-newline}}
{{usage-heading}} {{usage}}

{{before-help}}{}
{{options}}{{after-help}}",
        colors::header("Options:")
    )
}

/// Commands list shown before options in main help.
pub fn commands() -> String {
    format!(
        "\
{header_repos}
  {add}      Start monitoring a repository
  {remove}   Stop monitoring a repository
  {list}     List monitored repositories
  {check}    Check all repositories now
  {history}  Show recent alerts
  {stats}    Show check statistics

{header_setup}
  {config}   View or change settings
  {token}    Validate the GitHub token
  {daemon}   Manage the background daemon
  {export}   Export state as JSON
  {reset}    Forget repositories, history and statistics
",
        header_repos = colors::header("Repositories:"),
        header_setup = colors::header("Setup:"),
        add = colors::literal("add"),
        remove = colors::literal("remove"),
        list = colors::literal("list"),
        check = colors::literal("check"),
        history = colors::literal("history"),
        stats = colors::literal("stats"),
        config = colors::literal("config"),
        token = colors::literal("token"),
        daemon = colors::literal("daemon"),
        export = colors::literal("export"),
        reset = colors::literal("reset"),
    )
}

/// Quickstart help shown after options in main help.
pub fn quickstart() -> String {
    colors::examples(
        "\
Get started:
  gitbell daemon start         Start polling in the background
  gitbell add <owner/name>     Follow a repository
  gitbell check                Check right away
  gitbell history              See what was announced",
    )
}

#[cfg(test)]
#[path = "help_tests.rs"]
mod tests;
