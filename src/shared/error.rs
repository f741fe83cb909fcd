use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow the scheduling workflow to distinguish a remote
/// outage from a local problem with the mirror repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - the mirror is up to date
    Success = 0,
    /// The NVD API rejected a request or kept failing after retries
    FetchFailed = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (file I/O, config, malformed data, git, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Maps an error chain to the exit code it should produce.
    ///
    /// Only errors that originate at the NVD API map to `FetchFailed`;
    /// everything else is an application error.
    pub fn for_error(error: &anyhow::Error) -> Self {
        let is_fetch_failure = error.chain().any(|cause| {
            matches!(
                cause.downcast_ref::<SyncError>(),
                Some(SyncError::ApiError { .. })
                    | Some(SyncError::TransportError { .. })
                    | Some(SyncError::PaginationStalled { .. })
            )
        });

        if is_fetch_failure {
            ExitCode::FetchFailed
        } else {
            ExitCode::ApplicationError
        }
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::FetchFailed => write!(f, "Fetch Failed (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for mirror synchronization.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Invalid repository path: {path}\nReason: {reason}\n\n💡 Hint: Please specify the root directory of the NVD data repository")]
    InvalidRepositoryPath { path: PathBuf, reason: String },

    #[error("Sync state file not found: {path}\n\n💡 Hint: Run with --resync once to build the mirror and create the sync state")]
    SyncStateNotFound { path: PathBuf },

    #[error("Failed to parse sync state file: {path}\nDetails: {details}\n\n💡 Hint: The file must contain 'vulnerabilities' and 'matchStrings' sections with lastModStartDate/lastModEndDate")]
    SyncStateParseError { path: PathBuf, details: String },

    #[error("NVD API request failed with status {status}: {url}\nDetails: {details}\n\n💡 Hint: Check the requested ID, your API key, and https://nvd.nist.gov for service status")]
    ApiError {
        status: u16,
        url: String,
        details: String,
    },

    #[error("Failed to reach the NVD API: {url}\nDetails: {details}\n\n💡 Hint: Please check your internet connection")]
    TransportError { url: String, details: String },

    #[error("NVD API pagination stalled at index {start_index} of {total_results}: {url}\n\n💡 Hint: The API returned an empty page before reaching the reported total; retry later")]
    PaginationStalled {
        url: String,
        start_index: u64,
        total_results: u64,
    },

    #[error("Malformed {kind} record: {details}\n\n💡 Hint: The API response did not have the expected shape; the run was aborted before committing")]
    MalformedRecord { kind: String, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    /// Validation error for identifiers, timestamps and configuration values
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },

    #[error("git {command} failed\nDetails: {details}\n\n💡 Hint: Verify that PATH is a git work tree and that git is installed and configured")]
    VersionControlError { command: String, details: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::FetchFailed.as_i32(), 1);
        assert_eq!(ExitCode::InvalidArguments.as_i32(), 2);
        assert_eq!(ExitCode::ApplicationError.as_i32(), 3);
    }

    #[test]
    fn test_exit_code_display() {
        assert_eq!(format!("{}", ExitCode::Success), "Success (0)");
        assert_eq!(format!("{}", ExitCode::FetchFailed), "Fetch Failed (1)");
        assert_eq!(
            format!("{}", ExitCode::InvalidArguments),
            "Invalid Arguments (2)"
        );
        assert_eq!(
            format!("{}", ExitCode::ApplicationError),
            "Application Error (3)"
        );
    }

    #[test]
    fn test_exit_code_for_api_error() {
        let error: anyhow::Error = SyncError::ApiError {
            status: 503,
            url: "https://services.nvd.nist.gov/rest/json/cves/2.0".to_string(),
            details: "Service Unavailable".to_string(),
        }
        .into();
        assert_eq!(ExitCode::for_error(&error), ExitCode::FetchFailed);
    }

    #[test]
    fn test_exit_code_for_wrapped_api_error() {
        let error = anyhow::Error::from(SyncError::PaginationStalled {
            url: "https://example.test".to_string(),
            start_index: 2000,
            total_results: 4000,
        })
        .context("Failed to sync CVEs");
        assert_eq!(ExitCode::for_error(&error), ExitCode::FetchFailed);
    }

    #[test]
    fn test_exit_code_for_other_errors() {
        let error: anyhow::Error = SyncError::SyncStateNotFound {
            path: PathBuf::from("/mirror/syncdate.json"),
        }
        .into();
        assert_eq!(ExitCode::for_error(&error), ExitCode::ApplicationError);

        let error = anyhow::anyhow!("plain error");
        assert_eq!(ExitCode::for_error(&error), ExitCode::ApplicationError);
    }

    #[test]
    fn test_sync_state_not_found_display() {
        let error = SyncError::SyncStateNotFound {
            path: PathBuf::from("/mirror/syncdate.json"),
        };
        let display = format!("{}", error);
        assert!(display.contains("Sync state file not found"));
        assert!(display.contains("/mirror/syncdate.json"));
        assert!(display.contains("--resync"));
    }

    #[test]
    fn test_api_error_display() {
        let error = SyncError::ApiError {
            status: 404,
            url: "https://services.nvd.nist.gov/rest/json/cves/2.0?cveId=CVE-2099-0001"
                .to_string(),
            details: "Not Found".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("status 404"));
        assert!(display.contains("cveId=CVE-2099-0001"));
        assert!(display.contains("💡 Hint:"));
    }

    #[test]
    fn test_malformed_record_display() {
        let error = SyncError::MalformedRecord {
            kind: "CVE".to_string(),
            details: "missing field 'cve.id'".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Malformed CVE record"));
        assert!(display.contains("missing field 'cve.id'"));
    }

    #[test]
    fn test_file_write_error_display() {
        let error = SyncError::FileWriteError {
            path: PathBuf::from("/mirror/cve/2024/CVE-2024-1234.json"),
            details: "Permission denied".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Failed to write to file"));
        assert!(display.contains("CVE-2024-1234.json"));
        assert!(display.contains("Permission denied"));
    }

    #[test]
    fn test_security_error_display() {
        let error = SyncError::SecurityError {
            path: PathBuf::from("/mirror/cve"),
            reason: "Symbolic links are not allowed".to_string(),
            hint: "Replace the link with a directory".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Security violation"));
        assert!(display.contains("Symbolic links are not allowed"));
        assert!(display.contains("Replace the link with a directory"));
    }

    #[test]
    fn test_version_control_error_display() {
        let error = SyncError::VersionControlError {
            command: "commit".to_string(),
            details: "nothing to commit".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("git commit failed"));
        assert!(display.contains("nothing to commit"));
    }
}
