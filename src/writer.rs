//! Announcement rendering and persistence
//!
//! Templates are rendered with strict undefined semantics: a template that
//! references a variable the context does not provide fails instead of
//! producing a blank.

use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use std::fs;
use std::path::{Path, PathBuf};
use std::slice;

use crate::domain::{AnnouncementContext, AnnouncementManifest};
use crate::error::Result;

/// Ordered mapping of output file name to template name
pub type TemplateCatalog = [(&'static str, &'static str)];

pub const FORUM_ANNOUNCEMENT: &str = "ansible-forum-announcement.md";
pub const MATRIX_ANNOUNCEMENT: &str = "ansible-matrix-announcement.md";

/// Announcements produced by the `announcements` command, in write order
pub const ANNOUNCEMENTS: &TemplateCatalog = &[
    (FORUM_ANNOUNCEMENT, "ansible-forum-announcement.j2"),
    (MATRIX_ANNOUNCEMENT, "ansible-matrix-announcement.j2"),
];

const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    (
        "ansible-forum-announcement.j2",
        include_str!("../templates/ansible-forum-announcement.j2"),
    ),
    (
        "ansible-matrix-announcement.j2",
        include_str!("../templates/ansible-matrix-announcement.j2"),
    ),
];

/// Underline `content` with dashes to form a forum heading.
pub fn forum_heading(content: String) -> String {
    let underline = "-".repeat(content.chars().count());
    format!("{}\n{}", content, underline)
}

/// Escape markup-bearing templates only; markdown and plain text pass through.
fn auto_escape_for(name: &str) -> AutoEscape {
    let name = name.strip_suffix(".j2").unwrap_or(name);
    match name.rsplit_once('.').map(|(_, ext)| ext) {
        Some("html" | "htm" | "xml") => AutoEscape::Html,
        _ => AutoEscape::None,
    }
}

/// Template environment used for announcements
pub struct TemplateRenderer {
    env: Environment<'static>,
}

impl TemplateRenderer {
    fn empty() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_trim_blocks(true);
        env.set_auto_escape_callback(auto_escape_for);
        env.add_filter("forum_heading", forum_heading);
        TemplateRenderer { env }
    }

    /// Renderer with the built-in announcement templates
    pub fn builtin() -> Result<Self> {
        let mut renderer = Self::empty();
        for &(name, source) in BUILTIN_TEMPLATES {
            renderer.env.add_template(name, source)?;
        }
        Ok(renderer)
    }

    /// Renderer with caller-supplied templates
    pub fn from_sources<I>(templates: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut renderer = Self::empty();
        for (name, source) in templates {
            renderer.env.add_template_owned(name, source)?;
        }
        Ok(renderer)
    }

    /// Render a named template against the announcement context
    pub fn render(&self, template: &str, context: &AnnouncementContext) -> Result<String> {
        Ok(self.env.get_template(template)?.render(context)?)
    }
}

/// Lazily renders and writes announcements, one file per `next()`.
///
/// Nothing touches the filesystem until the iterator is advanced.
pub struct WriteAnnouncements<'a> {
    renderer: &'a TemplateRenderer,
    context: &'a AnnouncementContext,
    output_dir: &'a Path,
    remaining: slice::Iter<'a, (&'static str, &'static str)>,
}

impl WriteAnnouncements<'_> {
    fn write_one(&self, output: &str, template: &str) -> Result<PathBuf> {
        let mut text = self.renderer.render(template, self.context)?;
        text.push('\n');
        let path = self.output_dir.join(output);
        fs::write(&path, text)?;
        tracing::debug!(path = %path.display(), template, "wrote announcement");
        Ok(path)
    }
}

impl Iterator for WriteAnnouncements<'_> {
    type Item = Result<PathBuf>;

    fn next(&mut self) -> Option<Self::Item> {
        let (output, template) = self.remaining.next()?;
        Some(self.write_one(output, template))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.remaining.size_hint()
    }
}

/// Render each template of `templates` into `output_dir/<output name>`,
/// overwriting existing files. Yields the written paths in catalog order.
pub fn write_announcements<'a>(
    renderer: &'a TemplateRenderer,
    templates: &'a TemplateCatalog,
    context: &'a AnnouncementContext,
    output_dir: &'a Path,
) -> WriteAnnouncements<'a> {
    WriteAnnouncements {
        renderer,
        context,
        output_dir,
        remaining: templates.iter(),
    }
}

/// Output file names of a template catalog, in order
pub fn output_names(templates: &TemplateCatalog) -> Vec<String> {
    templates
        .iter()
        .map(|(output, _)| output.to_string())
        .collect()
}

/// Record the run in `output_dir/announcements.json` and return its path.
pub fn write_manifest(
    context: &AnnouncementContext,
    templates: &TemplateCatalog,
    output_dir: &Path,
) -> Result<PathBuf> {
    let manifest = AnnouncementManifest::new(context.clone(), output_names(templates));
    let path = AnnouncementManifest::path_in(output_dir);
    manifest.write(&path)?;
    Ok(path)
}
