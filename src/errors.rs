use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FileOperation {
    #[error("reading a file")]
    Read,
    #[error("writing a file")]
    Write,
    #[error("creating a directory")]
    Mkdir,
}
#[derive(Debug, Error, Diagnostic)]
#[error("I/O error: {operation} on path '{path}'")]
#[diagnostic(
    code(setup_eclipse::io),
    help("Check file permissions and that the bazel workspace is writable.")
)]
pub struct IoError {
    pub operation: FileOperation,
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}
impl IoError {
    pub fn new(operation: FileOperation, path: impl Into<PathBuf>, error: std::io::Error) -> Self {
        Self {
            operation,
            path: path.into(),
            source: error,
        }
    }

    pub fn read(path: impl Into<PathBuf>, error: std::io::Error) -> Self {
        Self::new(FileOperation::Read, path, error)
    }

    pub fn write(path: impl Into<PathBuf>, error: std::io::Error) -> Self {
        Self::new(FileOperation::Write, path, error)
    }

    pub fn mkdir(path: impl Into<PathBuf>, error: std::io::Error) -> Self {
        Self::new(FileOperation::Mkdir, path, error)
    }
}

#[derive(Debug, Error)]
pub enum FileFormat {
    #[error("toml")]
    Toml,
}
#[derive(Debug, Error, Diagnostic)]
#[error("Parsing error: {file_format} on '{path}'")]
#[diagnostic(
    code(setup_eclipse::parse),
    help("Review the configuration file, every key in it is optional")
)]
pub struct ParseError {
    pub file_format: FileFormat,
    pub path: PathBuf,
    #[source]
    pub source: toml::de::Error,
}
impl ParseError {
    pub fn toml(path: impl Into<PathBuf>, error: toml::de::Error) -> Self {
        Self {
            file_format: FileFormat::Toml,
            path: path.into(),
            source: error,
        }
    }
}
