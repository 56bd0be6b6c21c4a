//! Replaying a manifest through the delivery actions
//!
//! Actions run in catalog order, never in request order: the matrix
//! message links to the forum post, so the forum action has to finish
//! first whatever order the operator listed them in.

pub mod actions;
pub mod interaction;
pub mod mock;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::config::{Config, ForumConfig, MatrixConfig};
use crate::domain::AnnouncementManifest;
use crate::error::Result;

pub use interaction::{Interaction, SystemInteraction, CLIPBOARD_SUPPORTED};
pub use mock::{InteractionEvent, MockInteraction};

/// A delivery action: `(announcements directory, manifest, send configuration, interaction)`
pub type DeliveryAction =
    fn(&Path, &AnnouncementManifest, &SendConfig, &mut dyn Interaction) -> Result<()>;

/// Delivery actions in dispatch order
pub const ACTIONS: &[(&str, DeliveryAction)] = &[
    ("forum", actions::forum_announcement),
    ("matrix", actions::matrix_announcement),
];

/// Names of all catalog actions, in dispatch order
pub fn action_names() -> Vec<&'static str> {
    ACTIONS.iter().map(|(name, _)| *name).collect()
}

/// Options shared by every delivery action
#[derive(Debug, Clone, PartialEq)]
pub struct SendConfig {
    /// Whether actions may write to the clipboard
    pub clipboard: bool,
    pub display_name: String,
    pub forum: ForumConfig,
    pub matrix: MatrixConfig,
}

impl SendConfig {
    pub fn from_config(config: &Config, clipboard: bool) -> Self {
        SendConfig {
            clipboard,
            display_name: config.release.display_name.clone(),
            forum: config.forum.clone(),
            matrix: config.matrix.clone(),
        }
    }
}

/// Progress of a [`Sender`]. A failed run stays in the phase it failed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendPhase {
    Idle,
    Loading,
    Dispatching,
    Done,
}

/// Outcome of a send run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendReport {
    /// Actions that ran to completion, in order
    pub dispatched: Vec<&'static str>,
    /// Actions the operator cancelled
    pub skipped: Vec<&'static str>,
}

/// Drives the delivery actions for one announcements directory
pub struct Sender<'a> {
    directory: PathBuf,
    config: &'a SendConfig,
    phase: SendPhase,
}

impl<'a> Sender<'a> {
    pub fn new(directory: impl Into<PathBuf>, config: &'a SendConfig) -> Self {
        Sender {
            directory: directory.into(),
            config,
            phase: SendPhase::Idle,
        }
    }

    pub fn phase(&self) -> SendPhase {
        self.phase
    }

    /// Load the manifest and run every requested action in catalog order.
    ///
    /// A cancelled prompt skips that action only. Any other action error
    /// stops the run; actions already completed are not undone.
    pub fn run(
        &mut self,
        requested: &HashSet<String>,
        interaction: &mut dyn Interaction,
    ) -> Result<SendReport> {
        self.phase = SendPhase::Loading;
        let manifest = AnnouncementManifest::load(&AnnouncementManifest::path_in(&self.directory))?;
        tracing::debug!(
            version = %manifest.template_vars.version,
            outputs = manifest.outputs.len(),
            "loaded announcement manifest"
        );

        for name in requested {
            if !ACTIONS.iter().any(|(known, _)| *known == name.as_str()) {
                tracing::warn!(action = %name, "ignoring unknown delivery action");
            }
        }

        self.phase = SendPhase::Dispatching;
        let mut report = SendReport::default();
        for &(name, action) in ACTIONS {
            if !requested.contains(name) {
                continue;
            }
            interaction.show(&format!("Handling {}...", name));
            match action(&self.directory, &manifest, self.config, interaction) {
                Ok(()) => report.dispatched.push(name),
                Err(e) if e.is_cancelled() => {
                    tracing::info!(action = name, "delivery action cancelled");
                    interaction.show("Continuing...");
                    report.skipped.push(name);
                }
                Err(e) => {
                    tracing::warn!(action = name, error = %e, "delivery action failed");
                    return Err(e);
                }
            }
        }

        self.phase = SendPhase::Done;
        Ok(report)
    }
}
