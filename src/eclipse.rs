//! Builders for the files eclipse reads when importing the workspace.
//!
//! Everything here is pure: inputs in, file contents out.

use miette::Diagnostic;
use quick_xml::escape::escape;
use std::{fmt, path::Path};
use tera::{Context, Tera};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum EclipseError {
    #[error("Error occurred attempting to render the .project template")]
    #[diagnostic(code(setup_eclipse::eclipse::render))]
    Render {
        project_name: String,
        #[source]
        source: tera::Error,
    },
}

const PROJECT_TEMPLATE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<projectDescription>
    <name>{{ project_name }}</name>
    <comment>
    </comment>
    <projects>
    </projects>
    <buildSpec>
        <buildCommand>
            <name>org.python.pydev.PyDevBuilder</name>
            <arguments>
            </arguments>
        </buildCommand>
        <buildCommand>
            <name>org.eclipse.jdt.core.javabuilder</name>
            <arguments>
            </arguments>
        </buildCommand>
    </buildSpec>
    <natures>
        <nature>org.eclipse.jdt.core.javanature</nature>
        <nature>org.python.pydev.pythonNature</nature>
    </natures>
</projectDescription>"#;

const JRE_CONTAINER: &str = "org.eclipse.jdt.launching.JRE_CONTAINER";
const ANNOTATIONS_PLUGIN: &str = "org.eclipse.jst.ws.annotations.core";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClasspathKind {
    Con,
    Src,
    Lib,
    Output,
}
impl ClasspathKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Con => "con",
            Self::Src => "src",
            Self::Lib => "lib",
            Self::Output => "output",
        }
    }
}
impl fmt::Display for ClasspathKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One source folder, library, container or output folder.
///
/// Relative paths are resolved by eclipse against the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClasspathEntry {
    pub kind: ClasspathKind,
    pub path: String,
}
impl ClasspathEntry {
    pub fn new(kind: ClasspathKind, path: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactorypathKind {
    Plugin,
    ExtJar,
    WkspJar,
}
impl FactorypathKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plugin => "PLUGIN",
            Self::ExtJar => "EXTJAR",
            Self::WkspJar => "WKSPJAR",
        }
    }
}
impl fmt::Display for FactorypathKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One annotation processor provider, either a plugin id or a jar path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactorypathEntry {
    pub kind: FactorypathKind,
    pub entry_id: String,
}
impl FactorypathEntry {
    pub fn new(kind: FactorypathKind, entry_id: impl Into<String>) -> Self {
        Self {
            kind,
            entry_id: entry_id.into(),
        }
    }
}

pub fn classpath_entry_xml(entry: &ClasspathEntry) -> String {
    format!(
        r#"<classpathentry kind="{}" path="{}"/>"#,
        entry.kind,
        escape(entry.path.as_str())
    )
}

pub fn factorypath_entry_xml(entry: &FactorypathEntry) -> String {
    format!(
        r#"<factorypathentry kind="{}" id="{}" enabled="true" runInBatchMode="false"/>"#,
        entry.kind,
        escape(entry.entry_id.as_str())
    )
}

/// Indents each rendered element by two spaces and joins them with newlines.
///
/// An empty iterator yields an empty body, so the envelope reads `<tag>\n\n</tag>`.
fn join_entries(rendered: impl Iterator<Item = String>) -> String {
    rendered
        .map(|element| format!("  {element}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Contents of the `.classpath` file.
pub fn classpath_xml(entries: &[ClasspathEntry]) -> String {
    let body = join_entries(entries.iter().map(classpath_entry_xml));

    format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<classpath>\n{body}\n</classpath>")
}

/// Contents of the `.factorypath` file.
pub fn factorypath_xml(entries: &[FactorypathEntry]) -> String {
    let body = join_entries(entries.iter().map(factorypath_entry_xml));

    format!("<factorypath>\n{body}\n</factorypath>")
}

/// Builds the `.classpath` for the registry: JRE, source folders, the generated sources
/// symlinked inside the project, and the dependency jar under `bazel_genfiles`.
pub fn build_classpath(bazel_genfiles: &str, deps_jar: &str) -> String {
    let entries = [
        ClasspathEntry::new(ClasspathKind::Con, JRE_CONTAINER),
        ClasspathEntry::new(ClasspathKind::Src, "java"),
        ClasspathEntry::new(ClasspathKind::Src, "javatests"),
        ClasspathEntry::new(ClasspathKind::Src, "bazel-genfiles/java"),
        ClasspathEntry::new(ClasspathKind::Lib, format!("{bazel_genfiles}/{deps_jar}")),
        ClasspathEntry::new(ClasspathKind::Output, "bin"),
    ];

    classpath_xml(&entries)
}

/// Renders the `.project` file. `project_name` is what eclipse shows after import.
///
/// # Errors
///
/// Returns [`EclipseError::Render`] if tera fails to render the template.
pub fn build_project(project_name: &str) -> Result<String, EclipseError> {
    let mut context = Context::new();
    context.insert("project_name", &*escape(project_name));

    Tera::one_off(PROJECT_TEMPLATE, &context, false).map_err(|source| EclipseError::Render {
        project_name: project_name.to_string(),
        source,
    })
}

/// Builds the `.factorypath` linking the jar with every annotation processor.
pub fn build_factorypath(annotations_jar: &Path) -> String {
    let entries = [
        FactorypathEntry::new(FactorypathKind::Plugin, ANNOTATIONS_PLUGIN),
        FactorypathEntry::new(
            FactorypathKind::ExtJar,
            annotations_jar.to_string_lossy(),
        ),
    ];

    factorypath_xml(&entries)
}

// TODO: merge into an existing org.eclipse.jdt.core.prefs instead of overwriting it.
pub fn jdt_core_prefs() -> String {
    [
        "eclipse.preferences.version=1",
        "org.eclipse.jdt.core.compiler.processAnnotations=enabled",
    ]
    .join("\n")
}

pub fn apt_core_prefs(gen_src_dir: &str) -> String {
    [
        "eclipse.preferences.version=1".to_string(),
        "org.eclipse.jdt.apt.aptEnabled=true".to_string(),
        format!("org.eclipse.jdt.apt.genSrcDir={gen_src_dir}"),
        "org.eclipse.jdt.apt.reconcileEnabled=true".to_string(),
    ]
    .join("\n")
}
