//! Error types for Terraform operations.
//!
//! Errors distinguish failures of the wrapper itself (binary missing,
//! malformed options, unparseable plan output) from failed runs of the
//! tool: a non-zero exit status is reported as data on the execution
//! outcome, never as an error. Stderr of a failed run can be classified
//! into a category for user feedback and retry decisions.

use thiserror::Error;

/// Categories of Terraform run failures.
///
/// Derived from stderr of a non-zero exit, these drive retry logic and
/// the advice shown to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Another process holds the state lock (transient, retryable)
    StateLock,
    /// Working directory has not been initialized
    InitRequired,
    /// Provider or backend credentials are missing or rejected
    Auth,
    /// Network-related failure reaching providers or backends
    Network,
    /// Other/unknown failures
    Other,
}

impl ErrorCategory {
    /// Whether a run that failed with this category is worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::StateLock | Self::Network)
    }

    /// User-facing description of this category.
    pub fn description(&self) -> &'static str {
        match self {
            Self::StateLock => "State is locked by another process",
            Self::InitRequired => "Working directory not initialized",
            Self::Auth => "Authentication failure",
            Self::Network => "Network connectivity issue",
            Self::Other => "Terraform run failed",
        }
    }

    /// Actionable advice for resolving failures in this category.
    pub fn advice(&self) -> &'static str {
        match self {
            Self::StateLock => "Wait for the other operation to finish, or force-unlock the state",
            Self::InitRequired => "Run `terraform init` in the working directory first",
            Self::Auth => "Check provider credentials and backend access",
            Self::Network => "Check your internet connection and try again",
            Self::Other => "Check the error details for more information",
        }
    }
}

/// Errors that can occur while building and running Terraform commands.
#[derive(Debug, Error)]
pub enum Error {
    /// Terraform binary not found on this system
    #[error("terraform not found. Install it from https://developer.hashicorp.com/terraform")]
    TerraformNotFound,

    /// The command could not be launched at all.
    ///
    /// Distinct from a run that started and exited non-zero: that is
    /// reported on the execution outcome, not as an error.
    #[error("failed to launch command: {message}")]
    Launch {
        /// What prevented the launch (missing shell, permission denied, ...)
        message: String,
    },

    /// An option value would render into a malformed token
    #[error("invalid option: {message}")]
    InvalidOption {
        /// Which option was rejected and why
        message: String,
    },

    /// Machine-readable plan output could not be parsed
    #[error("failed to parse plan: {message}")]
    PlanParse {
        /// Description of the parse failure
        message: String,
    },

    /// `terraform --version` output did not match the expected banner
    #[error("could not parse terraform version from {output:?}")]
    VersionParse {
        /// First line of the unexpected output
        output: String,
    },

    /// A checked command run exited non-zero
    #[error("command failed: {message}")]
    CommandFailed {
        /// Description of what command failed
        message: String,
        /// Standard error output from the failed command
        stderr: String,
    },
}

impl Error {
    /// Classify stderr of a failed run into a category.
    pub fn classify_run_output(stderr: &str) -> ErrorCategory {
        let stderr_lower = stderr.to_lowercase();

        if stderr_lower.contains("error acquiring the state lock")
            || stderr_lower.contains("state lock")
            || stderr_lower.contains("lock info")
        {
            return ErrorCategory::StateLock;
        }

        if stderr_lower.contains("terraform init")
            || stderr_lower.contains("module not installed")
            || stderr_lower.contains("backend initialization required")
            || stderr_lower.contains("provider requirements cannot be satisfied")
        {
            return ErrorCategory::InitRequired;
        }

        if stderr_lower.contains("no valid credential")
            || stderr_lower.contains("invalid credentials")
            || stderr_lower.contains("unauthorized")
            || stderr_lower.contains("access denied")
            || stderr_lower.contains("401")
            || stderr_lower.contains("403")
        {
            return ErrorCategory::Auth;
        }

        if stderr_lower.contains("could not resolve")
            || stderr_lower.contains("connection refused")
            || stderr_lower.contains("timeout")
            || stderr_lower.contains("timed out")
            || stderr_lower.contains("network")
            || stderr_lower.contains("tls")
        {
            return ErrorCategory::Network;
        }

        ErrorCategory::Other
    }
}

/// Result type for Terraform operations.
pub type Result<T> = std::result::Result<T, Error>;
