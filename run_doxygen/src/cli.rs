use clap::Parser;
use doxygen_env::{DEFAULT_DOXYFILE, DEFAULT_DOXYGEN};
use std::path::PathBuf;

/// Builds the Dripline-Cpp API documentation.
///
/// The project version is taken from the most recent git tag and passed to
/// doxygen together with the rest of the project settings as environment
/// variables.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Repository to read the version from. Doxygen also runs in this directory.
    #[arg(long, default_value = ".", value_name = "DIR")]
    pub repo_dir: PathBuf,

    /// The documentation tool to run.
    #[arg(long, default_value = DEFAULT_DOXYGEN, value_name = "PROGRAM")]
    pub doxygen: String,

    /// Configuration file passed to the documentation tool.
    #[arg(long, default_value = DEFAULT_DOXYFILE, value_name = "PATH")]
    pub doxyfile: PathBuf,

    /// JSON file whose fields replace the default project settings.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Use this version instead of asking git.
    #[arg(long, value_name = "VERSION")]
    pub project_number: Option<String>,

    /// Print the resolved settings as JSON and exit without running doxygen.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub dry_run: bool,

    /// Log at debug level (overridden by RUST_LOG).
    #[arg(short, long, action = clap::ArgAction::SetTrue)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Args::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let args = Args::parse_from(["run_doxygen"]);
        assert_eq!(args.repo_dir, PathBuf::from("."));
        assert_eq!(args.doxygen, "doxygen");
        assert_eq!(
            args.doxyfile,
            PathBuf::from("./scarab/documentation/cpp/Doxyfile")
        );
        assert!(args.config.is_none());
        assert!(args.project_number.is_none());
        assert!(!args.dry_run);
    }
}
