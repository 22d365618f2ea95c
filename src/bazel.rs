use miette::Diagnostic;
use std::process::{Command, ExitStatus, Stdio};
use thiserror::Error;

/// `bazel info` key for the absolute workspace root.
pub const WORKSPACE: &str = "workspace";
/// `bazel info` key for the binary output root.
pub const BAZEL_BIN: &str = "bazel-bin";
/// `bazel info` key for the generated files output root.
pub const BAZEL_GENFILES: &str = "bazel-genfiles";

#[derive(Debug, Error, Diagnostic)]
pub enum BazelError {
    #[error("failed to spawn `{program}`")]
    #[diagnostic(
        code(setup_eclipse::bazel::spawn),
        help("Make sure bazel is installed and on your PATH, or set `bazel` in setup-eclipse.toml")
    )]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {status}")]
    #[diagnostic(
        code(setup_eclipse::bazel::exit_status),
        help("A working bazel build is required before generating eclipse files")
    )]
    ExitStatus { command: String, status: ExitStatus },

    #[error("`{command}` printed nothing")]
    #[diagnostic(
        code(setup_eclipse::bazel::empty_info),
        help("Check that the key is one `bazel info` understands")
    )]
    EmptyInfo { command: String },
}

/// Runs external programs. The seam lets tests answer without a real bazel.
pub trait CommandRunner {
    /// Runs `program` and returns its stdout; stderr goes to the terminal.
    fn capture(&self, program: &str, args: &[&str]) -> Result<String, BazelError>;

    /// Runs `program` with inherited stdio, waiting for it to finish.
    fn stream(&self, program: &str, args: &[&str]) -> Result<(), BazelError>;
}

#[derive(Debug, Default, Clone)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn capture(&self, program: &str, args: &[&str]) -> Result<String, BazelError> {
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stderr(Stdio::inherit())
            .output()
            .map_err(|source| BazelError::Spawn {
                program: program.to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(BazelError::ExitStatus {
                command: command_line(program, args),
                status: output.status,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn stream(&self, program: &str, args: &[&str]) -> Result<(), BazelError> {
        let status = Command::new(program)
            .args(args)
            .status()
            .map_err(|source| BazelError::Spawn {
                program: program.to_string(),
                source,
            })?;

        if !status.success() {
            return Err(BazelError::ExitStatus {
                command: command_line(program, args),
                status,
            });
        }

        Ok(())
    }
}

fn command_line(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Handle on the bazel executable.
#[derive(Debug, Clone)]
pub struct Bazel<R = SystemRunner> {
    program: String,
    runner: R,
}
impl Bazel<SystemRunner> {
    pub fn new(program: impl Into<String>) -> Self {
        Self::with_runner(program, SystemRunner)
    }
}
impl<R: CommandRunner> Bazel<R> {
    pub fn with_runner(program: impl Into<String>, runner: R) -> Self {
        Self {
            program: program.into(),
            runner,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Invokes `bazel info <key>` and returns the first non-empty line, trimmed.
    ///
    /// # Errors
    ///
    /// Returns a [`BazelError`] if bazel cannot be spawned, exits unsuccessfully, or prints
    /// only blank lines.
    pub fn info(&self, key: &str) -> Result<String, BazelError> {
        let args = ["info", key];

        let stdout = self.runner.capture(&self.program, &args)?;

        let value = stdout
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .ok_or_else(|| BazelError::EmptyInfo {
                command: command_line(&self.program, &args),
            })?;

        log::debug!("bazel info {key} = {value}");

        Ok(value.to_string())
    }

    /// Invokes `bazel build` for `targets`, streaming its output.
    pub fn build<S: AsRef<str>>(&self, targets: &[S]) -> Result<(), BazelError> {
        let mut args = vec!["build"];
        args.extend(targets.iter().map(|target| target.as_ref()));

        log::debug!("running {}", command_line(&self.program, &args));

        self.runner.stream(&self.program, &args)
    }
}
