use crate::errors::{IoError, ParseError};
use indexmap::IndexMap;
use miette::Diagnostic;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// File picked up from the current directory when `--config` is not given.
pub const CONFIG_FILE_NAME: &str = "setup-eclipse.toml";

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Io(#[from] IoError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),
}

/// Knobs for locating the build tool and the artifacts it produces.
///
/// Every key is optional in the TOML file; missing keys keep the values from
/// [`Config::default`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Executable used for `info` and `build`.
    pub bazel: String,
    /// Project name used when none is passed on the command line.
    pub default_project_name: String,
    /// Build steps run in file order, each one a separate `bazel build`.
    pub build: IndexMap<String, Vec<String>>,
    /// Dependency jar, relative to `bazel-genfiles`.
    pub deps_jar: String,
    /// Annotation processor jar, relative to `bazel-bin`.
    pub annotation_processors_jar: String,
    /// Directory eclipse writes generated sources into.
    pub apt_gen_src_dir: String,
}
impl Default for Config {
    fn default() -> Self {
        let mut build = IndexMap::new();
        build.insert(
            "project".to_string(),
            vec![
                "//java/google/registry/...".to_string(),
                "//javatests/google/registry/...".to_string(),
            ],
        );
        build.insert(
            "eclipse_deps".to_string(),
            vec!["//java/google/registry/eclipse:eclipse_deps".to_string()],
        );
        build.insert(
            "annotation_processors".to_string(),
            vec![
                "//java/google/registry/eclipse:annotation_processors_ide_deploy.jar".to_string(),
            ],
        );

        Self {
            bazel: "bazel".to_string(),
            default_project_name: "domain-registry".to_string(),
            build,
            deps_jar: "java/google/registry/eclipse/eclipse_deps.jar".to_string(),
            annotation_processors_jar:
                "java/google/registry/eclipse/annotation_processors_ide_deploy.jar".to_string(),
            apt_gen_src_dir: "autogenerated".to_string(),
        }
    }
}
impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        let content = fs::read_to_string(path).map_err(|error| IoError::read(path, error))?;

        let parsed: Config =
            toml::from_str(&content).map_err(|error| ParseError::toml(path, error))?;

        Ok(parsed)
    }

    /// Loads the configuration for a run.
    ///
    /// An explicit path must exist. Without one, [`CONFIG_FILE_NAME`] inside `dir` is read
    /// when present and the defaults are used otherwise.
    pub fn load(explicit: Option<&Path>, dir: &Path) -> Result<Self, ConfigError> {
        let path: PathBuf = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let candidate = dir.join(CONFIG_FILE_NAME);
                if !candidate.is_file() {
                    log::debug!("no {} found, using defaults", candidate.display());
                    return Ok(Self::default());
                }
                candidate
            }
        };

        log::debug!("loading configuration from {}", path.display());

        Self::from_file(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_registry_layout() {
        let config = Config::default();

        assert_eq!(config.bazel, "bazel");
        assert_eq!(config.default_project_name, "domain-registry");
        assert_eq!(
            config.build.keys().collect::<Vec<_>>(),
            vec!["project", "eclipse_deps", "annotation_processors"]
        );
        assert_eq!(config.apt_gen_src_dir, "autogenerated");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(
            &path,
            r#"
default_project_name = "nomulus"

[build]
everything = ["//..."]
"#,
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();

        assert_eq!(config.default_project_name, "nomulus");
        assert_eq!(config.bazel, "bazel");
        assert_eq!(config.build.len(), 1);
        assert_eq!(config.build["everything"], vec!["//...".to_string()]);
    }

    #[test]
    fn test_build_steps_keep_file_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "[build]\nzeta = [\"//z\"]\nalpha = [\"//a\"]\n").unwrap();

        let config = Config::from_file(&path).unwrap();

        assert_eq!(config.build.keys().collect::<Vec<_>>(), vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();

        let config = Config::load(None, dir.path()).unwrap();

        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_discovers_file_in_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "bazel = \"bazelisk\"\n").unwrap();

        let config = Config::load(None, dir.path()).unwrap();

        assert_eq!(config.bazel, "bazelisk");
    }

    #[test]
    fn test_missing_explicit_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");

        let result = Config::load(Some(&missing), dir.path());

        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_unknown_key_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "bazle = \"typo\"\n").unwrap();

        let result = Config::from_file(&path);

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
