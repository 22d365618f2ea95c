use crate::{
    bazel::{self, Bazel, BazelError, CommandRunner},
    config::Config,
    eclipse::{self, EclipseError},
    errors::IoError,
    preview::preview_as_tree,
    workspace::Workspace,
};
use std::path::Path;

pub const CLASSPATH_FILE: &str = ".classpath";
pub const PROJECT_FILE: &str = ".project";
pub const FACTORYPATH_FILE: &str = ".factorypath";
pub const SETTINGS_DIR: &str = ".settings";
pub const JDT_CORE_PREFS_FILE: &str = "org.eclipse.jdt.core.prefs";
pub const APT_CORE_PREFS_FILE: &str = "org.eclipse.jdt.apt.core.prefs";

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum SetupError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Bazel(#[from] BazelError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Eclipse(#[from] EclipseError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Io(#[from] IoError),
}

/// Per-invocation choices coming from the command line.
#[derive(Debug, Clone, Default)]
pub struct SetupOptions {
    /// Overrides [`Config::default_project_name`].
    pub project_name: Option<String>,
    /// Query bazel but skip building and writing; print what would be written.
    pub dry_run: bool,
}

/// Builds the bazel dependencies and writes the eclipse project files into the
/// bazel workspace.
///
/// # Errors
///
/// Returns a [`SetupError`] if:
///
/// - A `bazel build` or `bazel info` invocation fails.
/// - The `.project` template fails to render.
/// - A file or the `.settings` directory cannot be written.
pub fn setup(config: &Config, options: &SetupOptions) -> Result<Workspace, SetupError> {
    let bazel = Bazel::new(config.bazel.clone());

    let workspace = setup_with(&bazel, config, options)?;

    if options.dry_run {
        preview_as_tree(workspace.staged(), workspace.root());
    }

    Ok(workspace)
}

/// Same as [`setup`] with a caller supplied [`Bazel`] handle and no preview output.
///
/// Files are written as soon as they are generated; a failure leaves earlier files in place.
pub fn setup_with<R: CommandRunner>(
    bazel: &Bazel<R>,
    config: &Config,
    options: &SetupOptions,
) -> Result<Workspace, SetupError> {
    if options.dry_run {
        log::debug!("dry run, skipping bazel build");
    } else {
        build_dependencies(bazel, config)?;
    }

    let root = bazel.info(bazel::WORKSPACE)?;
    let mut workspace = Workspace::new(&root, options.dry_run);

    log::debug!("writing eclipse files into {root}");

    let bazel_genfiles = bazel.info(bazel::BAZEL_GENFILES)?;
    workspace.write_file(
        CLASSPATH_FILE,
        eclipse::build_classpath(&bazel_genfiles, &config.deps_jar),
    )?;

    let project_name = options
        .project_name
        .as_deref()
        .unwrap_or(&config.default_project_name);
    workspace.write_file(PROJECT_FILE, eclipse::build_project(project_name)?)?;

    let bazel_bin = bazel.info(bazel::BAZEL_BIN)?;
    let annotations_jar = Path::new(&bazel_bin).join(&config.annotation_processors_jar);
    workspace.write_file(
        FACTORYPATH_FILE,
        eclipse::build_factorypath(&annotations_jar),
    )?;

    let settings = Path::new(SETTINGS_DIR);
    workspace.create_directory(settings)?;
    workspace.write_file(settings.join(JDT_CORE_PREFS_FILE), eclipse::jdt_core_prefs())?;
    workspace.write_file(
        settings.join(APT_CORE_PREFS_FILE),
        eclipse::apt_core_prefs(&config.apt_gen_src_dir),
    )?;

    Ok(workspace)
}

/// Runs every configured build step in order, e.g. the whole project, the jar with all
/// compile-time dependencies, and the jar with the annotation processors.
fn build_dependencies<R: CommandRunner>(
    bazel: &Bazel<R>,
    config: &Config,
) -> Result<(), BazelError> {
    for (step, targets) in &config.build {
        log::debug!("building {step}");

        bazel.build(targets.as_slice())?;
    }

    Ok(())
}
