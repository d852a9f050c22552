use crate::Error;
use std::{
    path::Path,
    process::{Command, Output, Stdio},
};
use tracing::debug;

const GIT: &str = "git";

/// Returns the name of the most recent tag reachable from `HEAD`.
///
/// This runs `git describe --abbrev=0 --tags` in `repo_dir`, and trims
/// surrounding whitespace from its output.
#[inline]
pub fn describe_latest_tag<P: ?Sized + AsRef<Path>>(repo_dir: &P) -> Result<String, Error> {
    #[inline(never)]
    fn inner(repo_dir: &Path) -> Result<String, Error> {
        let output = run_git(repo_dir, &["describe", "--abbrev=0", "--tags"])?;
        let tag = String::from_utf8(output.stdout).map_err(Error::NotUtf8)?;
        let tag = tag.trim();
        if tag.is_empty() {
            return Err(Error::NoTags);
        }

        Ok(tag.to_owned())
    }

    inner(repo_dir.as_ref())
}

fn run_git(cwd: &Path, args: &[&str]) -> Result<Output, Error> {
    debug!(cwd = %cwd.display(), ?args, "running git");

    let output = git(cwd)
        .args(args)
        .output()
        .map_err(|source| Error::Spawn {
            program: GIT.into(),
            source,
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_owned();
        debug!(status = %output.status, %stderr, "git failed");
        return Err(Error::CommandFailed {
            program: GIT.into(),
            status: output.status,
            stderr,
        });
    }

    Ok(output)
}

#[inline]
fn git(cwd: &Path) -> Command {
    let mut cmnd = Command::new(GIT);
    cmnd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .current_dir(cwd);
    cmnd
}
