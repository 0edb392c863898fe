use crate::error::{MirrorError, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// Drives a working tree by spawning the `git` executable
pub struct GitCli {
    workdir: PathBuf,
}

impl GitCli {
    /// Create a runner for the working tree at `workdir`
    ///
    /// # Returns
    /// * `Ok(GitCli)` - The directory exists
    /// * `Err` - If `workdir` is not a directory
    pub fn new<P: AsRef<Path>>(workdir: P) -> Result<Self> {
        let workdir = workdir.as_ref();
        if !workdir.is_dir() {
            return Err(MirrorError::config(format!(
                "Working tree not found: {}",
                workdir.display()
            )));
        }
        Ok(GitCli {
            workdir: workdir.to_path_buf(),
        })
    }

    /// Run `git <args>` in the working tree and return its stdout.
    ///
    /// A non-zero exit status becomes [MirrorError::Command] carrying stderr.
    fn run(&self, args: &[&str]) -> Result<String> {
        let command = format!("git {}", args.join(" "));
        debug!(workdir = %self.workdir.display(), %command, "running");

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .output()?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = if stderr.trim().is_empty() {
                stdout.trim().to_string()
            } else {
                stderr.trim().to_string()
            };
            return Err(MirrorError::Command {
                command,
                status: output.status.to_string(),
                stderr,
            });
        }

        Ok(stdout)
    }
}

impl super::SourceControl for GitCli {
    fn list_tags(&self, limit: usize) -> Result<Vec<String>> {
        // git's version sort ranks `X-rc.1` above `X`, so order by semver here
        let stdout = self.run(&["for-each-ref", "refs/tags/", "--format=%(refname:short)"])?;

        super::newest_tags(
            stdout.lines().map(str::trim).filter(|line| !line.is_empty()),
            limit,
        )
    }

    fn checkout(&self, tag: &str) -> Result<()> {
        self.run(&["checkout", "--quiet", tag])?;
        Ok(())
    }

    fn stage_all(&self) -> Result<()> {
        self.run(&["add", "-A"])?;
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<()> {
        self.run(&["commit", "--quiet", "-m", message])?;
        Ok(())
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        self.run(&["tag", name])?;
        Ok(())
    }
}
