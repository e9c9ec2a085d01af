//! Text for the details panel.

use chrono::{DateTime, SecondsFormat, Utc};
use humansize::FormatSizeOptions;

use crate::catalog::Blob;
use crate::tree::{ContainerLocation, NodeKind, SubscriptionFilter};

pub const NO_SELECTION: &str = "No selection.";

/// 1024-based sizes with two decimals from `kB` up; plain bytes below that.
pub fn format_bytes(bytes: u64) -> String {
    let zeroes = if bytes < 1024 { 0 } else { 2 };
    humansize::format_size(
        bytes,
        FormatSizeOptions::from(humansize::WINDOWS).decimal_zeroes(zeroes),
    )
}

/// RFC 3339 in UTC, or `n/a` when the timestamp is unknown.
pub fn format_time(value: Option<DateTime<Utc>>) -> String {
    match value {
        Some(t) => t.to_rfc3339_opts(SecondsFormat::Secs, true),
        None => "n/a".to_string(),
    }
}

/// Right-aligned detail column of a content row.
pub fn blob_summary(blob: &Blob) -> String {
    format!(
        "{} | {} | {}",
        blob.content_type,
        format_bytes(blob.size_bytes),
        format_time(blob.modified)
    )
}

pub fn describe_node(kind: &NodeKind, filter: &SubscriptionFilter) -> String {
    match kind {
        NodeKind::Root => "Select a subscription to browse accounts.".to_string(),
        NodeKind::Placeholder { reason, .. } => reason.clone(),
        NodeKind::Subscription(s) => {
            let status = if filter.is_enabled(&s.id) {
                "enabled"
            } else {
                "disabled"
            };
            format!("Subscription: {}\nStatus: {}", s.name, status)
        }
        NodeKind::Account { location, region } => {
            let mut lines = vec![format!("Account: {}", location.account)];
            push_if_set(&mut lines, "Subscription", &location.subscription.name);
            push_if_set(&mut lines, "Region", region);
            lines.join("\n")
        }
        NodeKind::Container {
            location,
            public_access,
        } => {
            let mut lines = vec![
                format!("Container: {}", location.container),
                format!("Account: {}", location.account_name()),
            ];
            push_if_set(&mut lines, "Subscription", &location.subscription().name);
            push_if_set(&mut lines, "Public access", public_access);
            lines.join("\n")
        }
        NodeKind::Blob { container, blob } => describe_blob(container, blob),
    }
}

pub fn describe_blob(container: &ContainerLocation, blob: &Blob) -> String {
    let mut lines = vec![
        format!("Blob: {}", blob.name),
        format!("Account: {}", container.account_name()),
        format!("Container: {}", container.container),
    ];
    push_if_set(&mut lines, "Subscription", &container.subscription().name);
    lines.push(format!("Size: {}", format_bytes(blob.size_bytes)));
    lines.push(format!("Modified: {}", format_time(blob.modified)));
    push_if_set(&mut lines, "Content type", &blob.content_type);
    lines.join("\n")
}

fn push_if_set(lines: &mut Vec<String>, label: &str, value: &str) {
    if !value.is_empty() {
        lines.push(format!("{}: {}", label, value));
    }
}
