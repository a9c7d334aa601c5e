use thiserror::Error;

#[derive(Error, Debug)]
pub enum PeeringError {
    #[error("HTTP transport error: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required property: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Failed to resolve project '{project}': {message}")]
    ProjectResolutionError { project: String, message: String },

    #[error("Request to {endpoint} failed with status {status}: {message}")]
    RequestError {
        endpoint: String,
        status: u16,
        message: String,
    },

    #[error("Polling operation {name} failed with status {status}: {message}")]
    OperationPollError {
        name: String,
        status: u16,
        message: String,
    },

    #[error("The operation \"{name}\" resulted in a failure \"{message}\".\nDetails: \"{details}\".")]
    OperationFailed {
        name: String,
        code: i32,
        message: String,
        details: String,
    },

    #[error("Timed out after {waited_secs}s waiting for operation \"{name}\"")]
    OperationTimeout { name: String, waited_secs: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Resolution,
    Request,
    Operation,
    Transport,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Transient or remote-side problems; re-running may help.
    Medium,
    /// The invocation itself is wrong or the remote task failed.
    High,
    /// Local failures unrelated to the request.
    Critical,
}

impl ErrorSeverity {
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl PeeringError {
    pub fn config(message: impl Into<String>) -> Self {
        PeeringError::ConfigError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            PeeringError::ConfigError { .. }
            | PeeringError::MissingConfigError { .. }
            | PeeringError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            PeeringError::ProjectResolutionError { .. } => ErrorCategory::Resolution,
            PeeringError::RequestError { .. } => ErrorCategory::Request,
            PeeringError::OperationFailed { .. }
            | PeeringError::OperationPollError { .. }
            | PeeringError::OperationTimeout { .. } => ErrorCategory::Operation,
            PeeringError::TransportError(_) => ErrorCategory::Transport,
            PeeringError::IoError(_) | PeeringError::SerializationError(_) => {
                ErrorCategory::Internal
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            PeeringError::RequestError { .. }
            | PeeringError::OperationPollError { .. }
            | PeeringError::OperationTimeout { .. }
            | PeeringError::TransportError(_) => ErrorSeverity::Medium,
            PeeringError::IoError(_) | PeeringError::SerializationError(_) => {
                ErrorSeverity::Critical
            }
            _ => ErrorSeverity::High,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PeeringError::MissingConfigError { field } => format!(
                "The required property [{}] is not currently set.",
                field
            ),
            PeeringError::ProjectResolutionError { project, message } => format!(
                "Could not look up project [{}]: {}",
                project, message
            ),
            PeeringError::RequestError {
                status, message, ..
            } => format!("The API rejected the request ({}): {}", status, message),
            PeeringError::OperationPollError {
                name,
                status,
                message,
            } => format!(
                "Could not read the status of operation {} ({}): {}",
                name, status, message
            ),
            PeeringError::TransportError(e) => {
                format!("Could not reach the API: {}", e)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            PeeringError::MissingConfigError { field } if field == "core/project" => {
                "Pass --project, set CLOUDSDK_CORE_PROJECT, or add `project` under [core] in the settings file".to_string()
            }
            PeeringError::MissingConfigError { .. }
            | PeeringError::ConfigError { .. }
            | PeeringError::InvalidConfigValueError { .. } => {
                "Check the settings file and environment overrides".to_string()
            }
            PeeringError::ProjectResolutionError { .. } => {
                "Verify the project exists and that your credentials can read it".to_string()
            }
            PeeringError::RequestError { .. } => {
                "Check the --network, --service and --reserved-ranges values".to_string()
            }
            PeeringError::OperationFailed { .. } => {
                "Inspect the operation details above; the peering was not established".to_string()
            }
            PeeringError::OperationPollError { name, .. } => format!(
                "The operation may still be running. Check it again with: {}",
                crate::core::connect::wait_command(name)
            ),
            PeeringError::OperationTimeout { name, .. } => format!(
                "The operation is still running. Resume waiting with: {}",
                crate::core::connect::wait_command(name)
            ),
            PeeringError::TransportError(_) => {
                "Check network connectivity and the configured endpoints".to_string()
            }
            PeeringError::IoError(_) | PeeringError::SerializationError(_) => {
                "This is unexpected; re-run with --verbose for details".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, PeeringError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_follow_severity() {
        let missing = PeeringError::MissingConfigError {
            field: "core/project".to_string(),
        };
        assert_eq!(missing.category(), ErrorCategory::Configuration);
        assert_eq!(missing.severity().exit_code(), 1);

        let rejected = PeeringError::RequestError {
            endpoint: "https://example.com".to_string(),
            status: 400,
            message: "bad range".to_string(),
        };
        assert_eq!(rejected.category(), ErrorCategory::Request);
        assert_eq!(rejected.severity().exit_code(), 2);

        let io = PeeringError::IoError(std::io::Error::other("disk"));
        assert_eq!(io.severity().exit_code(), 3);
    }

    #[test]
    fn test_operation_failure_message() {
        let err = PeeringError::OperationFailed {
            name: "operations/pssn.1".to_string(),
            code: 9,
            message: "range overlaps".to_string(),
            details: "[]".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "The operation \"operations/pssn.1\" resulted in a failure \"range overlaps\".\nDetails: \"[]\"."
        );
        assert_eq!(err.category(), ErrorCategory::Operation);
    }

    #[test]
    fn test_poll_failure_suggests_wait_not_connect_flags() {
        let err = PeeringError::OperationPollError {
            name: "operations/pssn.3".to_string(),
            status: 500,
            message: "backend".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Operation);
        assert_eq!(err.severity().exit_code(), 2);

        let suggestion = err.recovery_suggestion();
        assert!(suggestion.contains("services vpc-peerings operations wait operations/pssn.3"));
        assert!(!suggestion.contains("--network"));
    }

    #[test]
    fn test_timeout_suggests_wait_command() {
        let err = PeeringError::OperationTimeout {
            name: "operations/pssn.2".to_string(),
            waited_secs: 1800,
        };
        assert!(err
            .recovery_suggestion()
            .contains("services vpc-peerings operations wait operations/pssn.2"));
    }
}
