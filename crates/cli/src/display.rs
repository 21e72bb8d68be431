// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::{DateTime, Utc};
use gb_core::{NotificationRecord, RateLimit, TrackedResource};

/// Human-readable age of `then` relative to `now`.
///
/// - under a minute: `just now`
/// - under an hour: `5m ago`
/// - under a day: `3h ago`
/// - otherwise: `2d ago`
///
/// Timestamps in the future count as `just now`.
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds();
    match seconds {
        s if s < 60 => "just now".to_string(),
        s if s < 3_600 => format!("{}m ago", s / 60),
        s if s < 86_400 => format!("{}h ago", s / 3_600),
        s => format!("{}d ago", s / 86_400),
    }
}

/// Like [`time_ago`] but for optional timestamps.
pub fn time_ago_or(then: Option<DateTime<Utc>>, now: DateTime<Utc>, missing: &str) -> String {
    then.map(|t| time_ago(t, now))
        .unwrap_or_else(|| missing.to_string())
}

/// Compact uptime such as `2h 5m` or `45s`.
pub fn format_uptime(secs: u64) -> String {
    let (h, m, s) = (secs / 3_600, (secs % 3_600) / 60, secs % 60);
    match (h, m) {
        (0, 0) => format!("{s}s"),
        (0, m) => format!("{m}m {s}s"),
        (h, m) => format!("{h}h {m}m"),
    }
}

/// One line of `gitbell list` output.
///
/// ```text
/// octo/demo  active  #42  checked 5m ago
/// octo/gone  error   -    checked 1h ago  (repository not found)
/// ```
pub fn format_resource_line(resource: &TrackedResource, now: DateTime<Utc>, name_width: usize) -> String {
    let watermark = resource
        .last_watermark
        .map(|n| format!("#{n}"))
        .unwrap_or_else(|| "-".to_string());
    let checked = time_ago_or(resource.last_checked, now, "not checked");
    let mut line = format!(
        "{:<name_width$}  {:<8}  {:<6}  {}",
        resource.full_name,
        resource.status.as_str(),
        watermark,
        if resource.last_checked.is_some() {
            format!("checked {checked}")
        } else {
            checked
        },
    );
    if let Some(err) = &resource.last_error {
        line.push_str(&format!("  ({})", first_line(err)));
    }
    line
}

/// Two lines of `gitbell history` output: heading, then the link.
pub fn format_history_entry(record: &NotificationRecord, now: DateTime<Utc>) -> Vec<String> {
    let mut heading = format!(
        "{}#{}  {}  ({})",
        record.resource,
        record.issue_number,
        record.issue_title,
        time_ago(record.timestamp, now)
    );
    if record.is_approachable() {
        heading.push_str("  [good first issue]");
    }
    vec![heading, format!("    {}", record.issue_url)]
}

/// Remaining quota, e.g. `4980 requests left (resets 14:05 UTC)`.
pub fn format_rate_limit(limit: &RateLimit) -> String {
    let remaining = limit
        .remaining
        .map(|r| format!("{r} requests left"))
        .unwrap_or_else(|| "unknown".to_string());
    match limit.reset_at {
        Some(at) => format!("{remaining} (resets {} UTC)", at.format("%H:%M")),
        None => remaining,
    }
}

fn first_line(s: &str) -> &str {
    s.lines().next().unwrap_or(s)
}

#[cfg(test)]
#[path = "display_tests.rs"]
mod tests;
