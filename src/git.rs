use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use tokio::process::Command;

/// Runs git subcommands against one working tree.
pub struct GitCli {
    workdir: PathBuf,
}

impl GitCli {
    /// Locate the enclosing working tree, erroring outside a repository.
    pub async fn discover(start: &Path) -> Result<Self> {
        let output = Command::new("git")
            .args(["rev-parse", "--show-toplevel"])
            .current_dir(start)
            .output()
            .await
            .context("Failed to run git rev-parse")?;

        if !output.status.success() {
            bail!("not a git repository (or any parent up to mount point /)");
        }

        let workdir = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(Self {
            workdir: PathBuf::from(workdir),
        })
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Raw unified-diff text: `git diff` or `git diff --cached`.
    pub async fn diff_text(&self, staged: bool) -> Result<String> {
        let mut args = vec!["diff"];
        if staged {
            args.push("--cached");
        }
        let output = Command::new("git")
            .args(&args)
            .current_dir(&self.workdir)
            .output()
            .await
            .context("Failed to run git diff")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!("git diff failed: {stderr}");
        }
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    pub async fn stage_all(&self) -> Result<()> {
        let output = Command::new("git")
            .args(["add", "-A"])
            .current_dir(&self.workdir)
            .output()
            .await
            .context("Failed to run git add -A")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!("git add failed: {stderr}");
        }
        Ok(())
    }

    /// Open the user's editor on a prepared message and commit with it.
    /// Must run with the terminal restored to cooked mode.
    pub async fn commit_with_file(&self, message_file: &Path) -> Result<()> {
        let status = Command::new("git")
            .args(["commit", "-eF"])
            .arg(message_file)
            .current_dir(&self.workdir)
            .status()
            .await
            .context("Failed to run git commit")?;

        if !status.success() {
            bail!("git commit exited with {status}");
        }
        Ok(())
    }
}
