//! Built-in delivery actions

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::fs;
use std::path::Path;

use crate::config::ForumConfig;
use crate::domain::AnnouncementManifest;
use crate::error::{AnnounceError, Result};
use crate::send::{Interaction, SendConfig};
use crate::writer::{FORUM_ANNOUNCEMENT, MATRIX_ANNOUNCEMENT};

/// Replaced with the forum post URL in the matrix announcement
pub const FORUM_LINK_PLACEHOLDER: &str = "<FORUM LINK>";

/// Everything except RFC 3986 unreserved characters gets escaped.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Subject line of the announcement post
pub fn subject(manifest: &AnnouncementManifest, display_name: &str) -> String {
    let vars = &manifest.template_vars;
    let mut subject = format!("Release announcement: {} {}", display_name, vars.version);
    if vars.is_prerelease {
        subject.push_str(" (Pre-Release)");
    }
    subject
}

/// Link that opens the forum's new-topic composer with everything pre-filled
pub fn forum_new_topic_url(forum: &ForumConfig, title: &str, body: &str) -> String {
    let tags = forum.tags.join(",");
    let params = [
        ("category", forum.category.as_str()),
        ("tags", tags.as_str()),
        ("title", title),
        ("body", body),
    ];
    let query = params
        .iter()
        .map(|(key, value)| format!("{}={}", key, utf8_percent_encode(value, QUERY_VALUE)))
        .collect::<Vec<_>>()
        .join("&");
    format!("{}/new-topic?{}", forum.url.trim_end_matches('/'), query)
}

/// Read a generated announcement listed in the manifest
fn read_body(directory: &Path, manifest: &AnnouncementManifest, name: &str) -> Result<String> {
    if !manifest.outputs.iter().any(|output| output == name) {
        return Err(AnnounceError::action(format!(
            "{} is not listed in the announcement manifest",
            name
        )));
    }
    fs::read_to_string(directory.join(name))
        .map_err(|e| AnnounceError::action(format!("cannot read {}: {}", name, e)))
}

/// Open a pre-filled forum post in the browser.
pub fn forum_announcement(
    directory: &Path,
    manifest: &AnnouncementManifest,
    config: &SendConfig,
    interaction: &mut dyn Interaction,
) -> Result<()> {
    let title = subject(manifest, &config.display_name);
    let body = read_body(directory, manifest, FORUM_ANNOUNCEMENT)?;
    let url = forum_new_topic_url(&config.forum, &title, &body);
    interaction.open_browser(&url)
}

/// Ask for the forum post URL, then hand the matrix message to the operator.
pub fn matrix_announcement(
    directory: &Path,
    manifest: &AnnouncementManifest,
    config: &SendConfig,
    interaction: &mut dyn Interaction,
) -> Result<()> {
    let body = read_body(directory, manifest, MATRIX_ANNOUNCEMENT)?;
    let forum_url = interaction.prompt("Enter the URL to the forum post: ")?;
    let body = body.replace(FORUM_LINK_PLACEHOLDER, forum_url.trim());

    let mut message = String::from("\nPlease open your Matrix client and send the message to:\n");
    for room in &config.matrix.rooms {
        message.push_str(&format!("- {}\n", room));
    }
    if config.clipboard {
        interaction.copy_to_clipboard(&body)?;
        message.push_str("\nThe message has been copied to your clipboard");
    } else {
        message.push_str("---\n");
        message.push_str(&body);
    }
    interaction.show(&message);
    Ok(())
}
