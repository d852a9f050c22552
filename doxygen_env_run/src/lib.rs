#![deny(unsafe_code)]
#![warn(unused)]

//! Resolves the Dripline-Cpp documentation settings and runs `doxygen`.
//!
//! ```rust,no_run
//! use doxygen_env_run::{DoxygenInvocation, resolve_config};
//! use std::error::Error;
//!
//! fn main() -> Result<(), Box<dyn Error + Send + Sync + 'static>> {
//!     let config = resolve_config(".");
//!     DoxygenInvocation::new().run(&config)?;
//!     Ok(())
//! }
//! ```

use doxygen_env::{DEFAULT_DOXYFILE, DEFAULT_DOXYGEN, DocsConfig, PLACEHOLDER_VERSION};
use std::{
    error::Error as ErrorTrait,
    ffi::{OsStr, OsString},
    fmt, fs, io,
    path::{Path, PathBuf},
    process::{Command, ExitStatus},
    string::FromUtf8Error,
};
use tracing::{debug, info, warn};

pub use git::describe_latest_tag;
pub use overrides::DocsConfigOverrides;

mod git;
mod overrides;

/// Returns the most recent tag in `repo_dir`, or [`PLACEHOLDER_VERSION`].
///
/// Any failure to read the tag is logged and otherwise ignored. This
/// covers `git` not being installed, `repo_dir` not being a repository,
/// and a repository without tags.
pub fn resolve_project_number<P: ?Sized + AsRef<Path>>(repo_dir: &P) -> String {
    describe_latest_tag(repo_dir).unwrap_or_else(|error| {
        warn!(%error, fallback = PLACEHOLDER_VERSION, "could not determine the project version");
        PLACEHOLDER_VERSION.to_owned()
    })
}

/// The Dripline-Cpp configuration, versioned from the tags in `repo_dir`.
pub fn resolve_config<P: ?Sized + AsRef<Path>>(repo_dir: &P) -> DocsConfig {
    DocsConfig::dripline_cpp(resolve_project_number(repo_dir))
}

/// Describes how `doxygen` is launched.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DoxygenInvocation {
    program: OsString,
    doxyfile: PathBuf,
    working_dir: Option<PathBuf>,
}

impl DoxygenInvocation {
    /// `doxygen ./scarab/documentation/cpp/Doxyfile` in the current directory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            program: DEFAULT_DOXYGEN.into(),
            doxyfile: DEFAULT_DOXYFILE.into(),
            working_dir: None,
        }
    }

    /// Sets the executable to run in place of `doxygen`.
    #[must_use]
    pub fn program<S: AsRef<OsStr>>(mut self, program: S) -> Self {
        self.program = program.as_ref().to_owned();
        self
    }

    /// Sets the configuration file passed to the tool.
    #[must_use]
    pub fn doxyfile<P: AsRef<Path>>(mut self, doxyfile: P) -> Self {
        self.doxyfile = doxyfile.as_ref().to_owned();
        self
    }

    /// Sets the directory the tool runs in. Relative paths in the
    /// configuration are resolved against it.
    #[must_use]
    pub fn working_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.working_dir = Some(dir.as_ref().to_owned());
        self
    }

    /// The executable that will be run.
    #[inline]
    #[must_use]
    pub fn get_program(&self) -> &OsStr {
        &self.program
    }

    /// The configuration file passed to the tool.
    #[inline]
    #[must_use]
    pub fn get_doxyfile(&self) -> &Path {
        &self.doxyfile
    }

    /// Builds the command with every variable from `config` set on the
    /// child's environment. The current process environment is untouched.
    pub fn command(&self, config: &DocsConfig) -> Command {
        let mut cmnd = Command::new(&self.program);
        cmnd.arg(&self.doxyfile)
            .envs(config.env_vars().map(|(var, value)| (var.name(), value)));
        if let Some(ref dir) = self.working_dir {
            cmnd.current_dir(dir);
        }
        cmnd
    }

    /// Runs the tool once and waits for it to finish. Output is not captured.
    pub fn run(&self, config: &DocsConfig) -> Result<(), Error> {
        let program = self.program.to_string_lossy().into_owned();
        info!(
            %program,
            doxyfile = %self.doxyfile.display(),
            version = %config.project_number,
            "running documentation tool"
        );
        for (var, value) in config.env_vars() {
            debug!("{}={:?}", var, value);
        }

        if let Some(ref dir) = self.working_dir {
            match fs::metadata(dir) {
                Ok(meta) if meta.is_dir() => {}
                Ok(_) => {
                    return Err(Error::Inaccessible {
                        path: dir.clone(),
                        source: io::Error::new(io::ErrorKind::Other, "not a directory"),
                    });
                }
                Err(source) => {
                    return Err(Error::Inaccessible {
                        path: dir.clone(),
                        source,
                    });
                }
            }
        }

        let status = self
            .command(config)
            .status()
            .map_err(|source| Error::Spawn {
                program: program.clone(),
                source,
            })?;

        if !status.success() {
            return Err(Error::ToolFailed { program, status });
        }

        Ok(())
    }
}

impl Default for DoxygenInvocation {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Errors from looking up the version, reading overrides, or running a tool.
#[non_exhaustive]
pub enum Error {
    /// A program could not be started.
    Spawn {
        /// The program name.
        program: String,
        /// The error from the operating system.
        source: io::Error,
    },
    /// A helper command (such as `git`) exited unsuccessfully.
    CommandFailed {
        /// The program name.
        program: String,
        /// How the program exited.
        status: ExitStatus,
        /// Whatever the program wrote to stderr.
        stderr: String,
    },
    /// The documentation tool exited unsuccessfully.
    ToolFailed {
        /// The program name.
        program: String,
        /// How the program exited.
        status: ExitStatus,
    },
    /// Command output was not valid UTF-8.
    NotUtf8(FromUtf8Error),
    /// The repository has no tags reachable from `HEAD`.
    NoTags,
    /// An overrides file could not be parsed.
    Config {
        /// The file being read.
        path: PathBuf,
        /// The parse error.
        source: serde_json::Error,
    },
    /// A file or directory could not be accessed.
    Inaccessible {
        /// The file or directory.
        path: PathBuf,
        /// The error from the operating system.
        source: io::Error,
    },
    /// An I/O error occurred.
    Io(io::Error),
}

impl Error {
    /// The exit code the documentation tool finished with, if it ran and
    /// was not killed by a signal.
    #[inline]
    #[must_use]
    pub fn tool_exit_code(&self) -> Option<i32> {
        match *self {
            Self::ToolFailed { ref status, .. } => status.code(),
            _ => None,
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, fmtr: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Spawn {
                ref program,
                ref source,
            } => fmtr
                .debug_struct("Spawn")
                .field("program", program)
                .field("source", source)
                .finish(),
            Self::CommandFailed {
                ref program,
                ref status,
                ref stderr,
            } => fmtr
                .debug_struct("CommandFailed")
                .field("program", program)
                .field("status", status)
                .field("stderr", stderr)
                .finish(),
            Self::ToolFailed {
                ref program,
                ref status,
            } => fmtr
                .debug_struct("ToolFailed")
                .field("program", program)
                .field("status", status)
                .finish(),
            Self::NotUtf8(ref e) => fmtr.debug_tuple("NotUtf8").field(e).finish(),
            Self::NoTags => fmtr.debug_struct("NoTags").finish(),
            Self::Config {
                ref path,
                ref source,
            } => fmtr
                .debug_struct("Config")
                .field("path", path)
                .field("source", source)
                .finish(),
            Self::Inaccessible {
                ref path,
                ref source,
            } => fmtr
                .debug_struct("Inaccessible")
                .field("path", path)
                .field("source", source)
                .finish(),
            Self::Io(ref e) => fmtr.debug_tuple("Io").field(e).finish(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, fmtr: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Spawn {
                ref program,
                ref source,
            } => write!(fmtr, "could not run `{}`: {}", program, source),
            Self::CommandFailed {
                ref program,
                ref status,
                ref stderr,
            } => {
                write!(fmtr, "`{}` failed ({})", program, status)?;
                if !stderr.is_empty() {
                    write!(fmtr, ": {}", stderr)?;
                }
                Ok(())
            }
            Self::ToolFailed {
                ref program,
                ref status,
            } => write!(fmtr, "`{}` failed ({})", program, status),
            Self::NotUtf8(_) => fmtr.write_str("command output is not valid utf-8"),
            Self::NoTags => fmtr.write_str("no tags found"),
            Self::Config {
                ref path,
                ref source,
            } => write!(fmtr, "invalid overrides in {}: {}", path.display(), source),
            Self::Inaccessible {
                ref path,
                ref source,
            } => write!(fmtr, "cannot access {}: {}", path.display(), source),
            Self::Io(ref e) => fmt::Display::fmt(e, fmtr),
        }
    }
}

impl ErrorTrait for Error {
    fn source(&self) -> Option<&(dyn ErrorTrait + 'static)> {
        match *self {
            Self::Spawn { ref source, .. } => Some(source),
            Self::NotUtf8(ref e) => Some(e),
            Self::Config { ref source, .. } => Some(source),
            Self::Inaccessible { ref source, .. } => Some(source),
            Self::Io(ref e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    #[inline]
    fn from(error: io::Error) -> Self {
        Self::Io(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doxygen_env::EnvVar;

    #[test]
    fn command_sets_child_environment() {
        let config = DocsConfig::dripline_cpp("v1.2.3");
        let cmnd = DoxygenInvocation::new().command(&config);

        assert_eq!(cmnd.get_program(), "doxygen");
        assert_eq!(
            cmnd.get_args().collect::<Vec<_>>(),
            ["./scarab/documentation/cpp/Doxyfile"]
        );

        let envs: Vec<_> = cmnd.get_envs().collect();
        assert_eq!(envs.len(), EnvVar::ALL.len());
        for (var, value) in config.env_vars() {
            assert!(
                envs.contains(&(OsStr::new(var.name()), Some(OsStr::new(value)))),
                "{} missing",
                var
            );
        }
        assert!(std::env::var_os("PROJECT_NUMBER").is_none());
    }

    #[test]
    fn placeholder_outside_repository() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("not-a-checkout");
        assert_eq!(resolve_project_number(&missing), "v?.?.?");
        assert_eq!(resolve_config(&missing), DocsConfig::default());
    }

    #[test]
    fn placeholder_without_tags() {
        if !git::tests::git_available() {
            return;
        }

        let repo = git::tests::repo_with_commit();
        assert_eq!(resolve_project_number(repo.path()), PLACEHOLDER_VERSION);
    }

    #[test]
    fn version_from_tag() {
        if !git::tests::git_available() {
            return;
        }

        let repo = git::tests::repo_with_commit();
        git::tests::git_in(repo.path(), &["tag", "v1.2.3"]);
        assert_eq!(resolve_config(repo.path()).project_number, "v1.2.3");
    }

    #[test]
    fn missing_tool_is_spawn_error() {
        let error = DoxygenInvocation::new()
            .program("dripline-doxygen-that-does-not-exist")
            .run(&DocsConfig::default())
            .unwrap_err();
        assert!(matches!(error, Error::Spawn { .. }), "{:?}", error);
        assert_eq!(error.tool_exit_code(), None);
    }

    #[test]
    fn missing_working_dir_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("no-checkout-here");

        let error = DoxygenInvocation::new()
            .program("dripline-doxygen-that-does-not-exist")
            .working_dir(&missing)
            .run(&DocsConfig::default())
            .unwrap_err();
        match error {
            Error::Inaccessible { ref path, .. } => assert_eq!(path, &missing),
            ref other => panic!("unexpected error: {:?}", other),
        }
        assert!(error.to_string().contains("no-checkout-here"));
    }

    #[cfg(unix)]
    #[test]
    fn failing_tool_is_reported() {
        let error = DoxygenInvocation::new()
            .program("false")
            .run(&DocsConfig::default())
            .unwrap_err();
        assert!(matches!(error, Error::ToolFailed { .. }), "{:?}", error);
        assert_eq!(error.tool_exit_code(), Some(1));
    }

    #[cfg(unix)]
    #[test]
    fn tool_sees_every_variable_once() {
        use std::{collections::HashMap, fs};

        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("Doxyfile.sh"),
            "echo \"$0\" >> invocations\nenv > environment\n",
        )
        .unwrap();

        let config = DocsConfig::dripline_cpp("v1.2.3");
        DoxygenInvocation::new()
            .program("sh")
            .doxyfile("Doxyfile.sh")
            .working_dir(dir.path())
            .run(&config)
            .unwrap();

        let invocations = fs::read_to_string(dir.path().join("invocations")).unwrap();
        assert_eq!(invocations, "Doxyfile.sh\n");

        let environment = fs::read_to_string(dir.path().join("environment")).unwrap();
        let environment: HashMap<_, _> = environment
            .lines()
            .filter_map(|line| line.split_once('='))
            .collect();
        for (var, value) in config.env_vars() {
            assert_eq!(environment.get(var.name()), Some(&value), "{}", var);
        }
    }
}
