use crate::ports::outbound::VersionControl;
use crate::shared::error::SyncError;
use crate::shared::Result;
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Output;
use tokio::process::Command;

/// GitCli adapter driving the `git` executable
///
/// This adapter implements the VersionControl port. Every command runs with
/// `git -C <repo>` so the process working directory never matters, and the
/// commit identity is passed per invocation instead of touching git config.
pub struct GitCli {
    repo: PathBuf,
    author_name: String,
    author_email: String,
}

impl GitCli {
    pub fn new(repo: PathBuf, author_name: String, author_email: String) -> Self {
        Self {
            repo,
            author_name,
            author_email,
        }
    }

    fn command(&self) -> Command {
        let mut command = Command::new("git");
        command.arg("-C").arg(&self.repo);
        command
    }

    async fn run(&self, name: &str, mut command: Command) -> Result<Output> {
        command.output().await.map_err(|e| {
            SyncError::VersionControlError {
                command: name.to_string(),
                details: format!("failed to execute git: {}", e),
            }
            .into()
        })
    }

    fn failure(name: &str, output: &Output) -> anyhow::Error {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let details = match (stderr.is_empty(), stdout.is_empty()) {
            (false, _) => stderr,
            (true, false) => stdout,
            (true, true) => format!("exited with {}", output.status),
        };
        SyncError::VersionControlError {
            command: name.to_string(),
            details,
        }
        .into()
    }

    /// Paths present in the working tree; git rejects pathspecs that match nothing
    fn existing_paths<'p>(&self, paths: &[&'p str]) -> Vec<&'p str> {
        paths
            .iter()
            .copied()
            .filter(|path| self.repo.join(path).exists())
            .collect()
    }

    async fn run_checked(&self, name: &str, command: Command) -> Result<()> {
        let output = self.run(name, command).await?;
        if output.status.success() {
            Ok(())
        } else {
            Err(Self::failure(name, &output))
        }
    }
}

#[async_trait]
impl VersionControl for GitCli {
    async fn stage(&self, paths: &[&str]) -> Result<()> {
        let existing = self.existing_paths(paths);
        if existing.is_empty() {
            return Ok(());
        }

        let mut command = self.command();
        command.arg("add").arg("-A").arg("--").args(&existing);
        self.run_checked("add", command).await
    }

    async fn has_staged_changes(&self, paths: &[&str]) -> Result<bool> {
        let mut command = self.command();
        command
            .arg("diff")
            .arg("--cached")
            .arg("--quiet")
            .arg("--")
            .args(paths);
        let output = self.run("diff", command).await?;

        match output.status.code() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(Self::failure("diff", &output)),
        }
    }

    async fn commit(&self, paths: &[&str], message: &str) -> Result<()> {
        let existing = self.existing_paths(paths);
        if existing.is_empty() {
            return Err(SyncError::VersionControlError {
                command: "commit".to_string(),
                details: "none of the mirror paths exist".to_string(),
            }
            .into());
        }

        let mut command = self.command();
        command
            .arg("-c")
            .arg(format!("user.name={}", self.author_name))
            .arg("-c")
            .arg(format!("user.email={}", self.author_email))
            .arg("commit")
            .arg("--quiet")
            .arg("-m")
            .arg(message)
            .arg("--")
            .args(&existing);
        self.run_checked("commit", command).await
    }

    async fn push(&self) -> Result<()> {
        let mut command = self.command();
        command.arg("push").arg("--quiet");
        self.run_checked("push", command).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn git_available() -> bool {
        std::process::Command::new("git")
            .arg("--version")
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    }

    fn init_repo() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        let status = std::process::Command::new("git")
            .arg("-C")
            .arg(temp_dir.path())
            .args(["init", "--quiet"])
            .status()
            .unwrap();
        assert!(status.success());
        temp_dir
    }

    fn git_cli(dir: &TempDir) -> GitCli {
        GitCli::new(
            dir.path().to_path_buf(),
            "nvd-sync".to_string(),
            "nvd-sync@users.noreply.github.com".to_string(),
        )
    }

    #[tokio::test]
    async fn test_stage_and_commit() {
        if !git_available() {
            eprintln!("Skipping: git not installed");
            return;
        }
        let dir = init_repo();
        fs::create_dir_all(dir.path().join("cve/2024")).unwrap();
        fs::write(dir.path().join("cve/2024/CVE-2024-0001.json"), "{}").unwrap();
        let git = git_cli(&dir);

        git.stage(&["cve", "cpematch", "syncdate.json"]).await.unwrap();
        assert!(git.has_staged_changes(&["cve"]).await.unwrap());

        git.commit(&["cve"], "Mirror update").await.unwrap();
        assert!(!git.has_staged_changes(&["cve"]).await.unwrap());
    }

    #[tokio::test]
    async fn test_stage_with_no_existing_paths_is_noop() {
        if !git_available() {
            eprintln!("Skipping: git not installed");
            return;
        }
        let dir = init_repo();
        let git = git_cli(&dir);

        git.stage(&["cve", "cpematch"]).await.unwrap();
        assert!(!git.has_staged_changes(&["cve", "cpematch"]).await.unwrap());
    }

    #[tokio::test]
    async fn test_commit_without_changes_fails() {
        if !git_available() {
            eprintln!("Skipping: git not installed");
            return;
        }
        let dir = init_repo();
        fs::create_dir(dir.path().join("cve")).unwrap();
        let git = git_cli(&dir);

        let err = git.commit(&["cve"], "empty").await.unwrap_err();
        assert!(err.to_string().contains("git commit failed"));
    }

    #[tokio::test]
    async fn test_commit_without_mirror_paths_fails() {
        let dir = TempDir::new().unwrap();
        let git = git_cli(&dir);

        let err = git.commit(&["cve", "cpematch"], "empty").await.unwrap_err();
        assert!(err.to_string().contains("none of the mirror paths exist"));
    }

    #[tokio::test]
    async fn test_commit_leaves_unrelated_staged_files() {
        if !git_available() {
            eprintln!("Skipping: git not installed");
            return;
        }
        let dir = init_repo();
        fs::create_dir_all(dir.path().join("cve/2024")).unwrap();
        fs::write(dir.path().join("cve/2024/CVE-2024-0001.json"), "{}").unwrap();
        fs::write(dir.path().join("notes.txt"), "work in progress").unwrap();
        let git = git_cli(&dir);
        git.stage(&["cve", "notes.txt"]).await.unwrap();

        git.commit(&["cve", "cpematch"], "Mirror update").await.unwrap();

        assert!(!git.has_staged_changes(&["cve"]).await.unwrap());
        assert!(git.has_staged_changes(&["notes.txt"]).await.unwrap());
    }

    #[tokio::test]
    async fn test_commands_outside_repository_fail() {
        if !git_available() {
            eprintln!("Skipping: git not installed");
            return;
        }
        let dir = TempDir::new().unwrap();
        let git = git_cli(&dir);

        assert!(git.has_staged_changes(&["cve"]).await.is_err());
    }
}
