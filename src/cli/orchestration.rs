//! Command workflows
//!
//! The two commands as plain functions over explicit collaborators, so they
//! can run against [`MockPackageIndex`](crate::index::MockPackageIndex) and
//! [`MockInteraction`](crate::send::MockInteraction) without clap or a network.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::deps;
use crate::domain::{AnnouncementContext, ReleaseVersion};
use crate::error::{AnnounceError, Result};
use crate::index::{self, PackageIndex};
use crate::send::{self, Interaction, SendConfig, SendReport, Sender, CLIPBOARD_SUPPORTED};
use crate::ui;
use crate::verify;
use crate::writer::{self, TemplateCatalog, TemplateRenderer, ANNOUNCEMENTS};

/// Arguments for the `announcements` command
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateArgs {
    /// Release to announce, as published on the package index
    pub version: String,

    /// Directory holding the dependency file
    pub data_dir: PathBuf,

    /// Dependency file name inside `data_dir`; `<package>-<version>.deps` if unset
    pub deps_file: Option<String>,

    /// Where announcements and the manifest are written
    pub output_dir: PathBuf,

    /// Verify local dist files in this directory before writing anything
    pub dist_dir: Option<PathBuf>,

    /// Last release of its major version
    pub end_of_life: bool,

    /// Run every delivery action right after generation
    pub send: bool,
}

/// Arguments for the `send-announcements` command
#[derive(Debug, Clone, PartialEq)]
pub struct SendArgs {
    /// Directory produced by the `announcements` command
    pub announcements_dir: PathBuf,

    /// Delivery actions to run; all of them if empty
    pub actions: Vec<String>,

    /// Whether actions may use the clipboard
    pub clipboard: bool,
}

/// Result of a successful `announcements` run
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateResult {
    pub context: AnnouncementContext,

    /// Announcement files, in catalog order
    pub written: Vec<PathBuf>,

    pub manifest: PathBuf,

    /// Present when `--send` was given
    pub sent: Option<SendReport>,
}

/// Generate announcements for a release.
///
/// 1. Validate the requested version
/// 2. Load the dependency file
/// 3. Fetch sdist and wheel metadata from the index
/// 4. Verify local dist files, if a dist directory was given
/// 5. Render every announcement, then the manifest
/// 6. Optionally send
///
/// Nothing is written to `output_dir` unless steps 1 to 4 succeed.
pub fn run_generate(
    args: &GenerateArgs,
    config: &Config,
    package_index: &dyn PackageIndex,
    interaction: &mut dyn Interaction,
) -> Result<GenerateResult> {
    let requested = ReleaseVersion::parse(&args.version)?;
    let package = &config.release.package_name;

    let deps_path = deps::deps_path(
        &args.data_dir,
        args.deps_file.as_deref(),
        package,
        requested.as_str(),
    );
    let dependency_data = deps::load_deps_file(&deps_path)?;
    let version = dependency_data.package_release()?;
    let core_version = dependency_data.core_release()?;
    if version.as_str() != requested.as_str() {
        tracing::warn!(
            requested = %requested,
            deps_file = %version,
            path = %deps_path.display(),
            "dependency file is for a different version"
        );
    }

    let artifacts = index::fetch(package_index, package, requested.as_str())?;
    if let Some(dist_dir) = &args.dist_dir {
        verify::verify_all(&artifacts, dist_dir)?;
        tracing::info!(dist_dir = %dist_dir.display(), "verified local dist files");
    }

    let context = AnnouncementContext::build(
        &version,
        &core_version,
        artifacts,
        args.end_of_life,
        &config.release.build_data_url,
    );

    let renderer = TemplateRenderer::builtin()?;
    fs::create_dir_all(&args.output_dir)?;
    let (written, manifest) = write_outputs(&renderer, ANNOUNCEMENTS, &context, &args.output_dir)?;

    let sent = if args.send {
        let send_args = SendArgs {
            announcements_dir: args.output_dir.clone(),
            actions: Vec::new(),
            clipboard: true,
        };
        Some(run_send(&send_args, config, interaction)?)
    } else {
        None
    };

    Ok(GenerateResult {
        context,
        written,
        manifest,
        sent,
    })
}

/// Render every announcement of `templates`, then record them in the manifest.
///
/// Stops at the first render or write error; the manifest is only written
/// once every announcement is on disk.
pub fn write_outputs(
    renderer: &TemplateRenderer,
    templates: &TemplateCatalog,
    context: &AnnouncementContext,
    output_dir: &Path,
) -> Result<(Vec<PathBuf>, PathBuf)> {
    let mut written = Vec::new();
    for path in writer::write_announcements(renderer, templates, context, output_dir) {
        let path = path?;
        ui::display_generated(&path);
        written.push(path);
    }
    let manifest = writer::write_manifest(context, templates, output_dir)?;
    ui::display_generated(&manifest);
    Ok((written, manifest))
}

/// Replay a generated announcements directory through the delivery actions.
pub fn run_send(
    args: &SendArgs,
    config: &Config,
    interaction: &mut dyn Interaction,
) -> Result<SendReport> {
    if args.clipboard && !CLIPBOARD_SUPPORTED {
        return Err(AnnounceError::action(
            "clipboard support is not available in this build; use '--no-clipboard'",
        ));
    }

    let requested: HashSet<String> = if args.actions.is_empty() {
        send::action_names().into_iter().map(String::from).collect()
    } else {
        args.actions.iter().cloned().collect()
    };

    let send_config = SendConfig::from_config(config, args.clipboard);
    let mut sender = Sender::new(&args.announcements_dir, &send_config);
    let report = sender.run(&requested, interaction)?;
    tracing::debug!(phase = ?sender.phase(), "send finished");
    Ok(report)
}
