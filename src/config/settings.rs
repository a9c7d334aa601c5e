use crate::core::poller::PollPolicy;
use crate::utils::error::{PeeringError, Result};
use crate::utils::validation::{invalid_value, validate_endpoint, Validate};
use regex::Regex;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

pub const PROJECT_ENV: &str = "CLOUDSDK_CORE_PROJECT";
pub const ACCESS_TOKEN_ENV: &str = "CLOUDSDK_AUTH_ACCESS_TOKEN";

pub const DEFAULT_RESOURCE_MANAGER_ENDPOINT: &str = "https://cloudresourcemanager.googleapis.com/";
pub const DEFAULT_SERVICE_NETWORKING_ENDPOINT: &str = "https://servicenetworking.googleapis.com/";

/// Ambient configuration for a single invocation. Loaded once in `main`
/// and handed to each command.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub core: CoreSettings,
    #[serde(default)]
    pub endpoints: EndpointSettings,
    #[serde(default)]
    pub operations: OperationSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CoreSettings {
    pub project: Option<String>,
    pub access_token: Option<String>,
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EndpointSettings {
    #[serde(default = "default_resource_manager")]
    pub cloudresourcemanager: String,
    #[serde(default = "default_service_networking")]
    pub servicenetworking: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OperationSettings {
    #[serde(default = "default_initial_poll_ms")]
    pub initial_poll_ms: u64,
    #[serde(default = "default_poll_multiplier")]
    pub poll_multiplier: f64,
    #[serde(default = "default_max_poll_ms")]
    pub max_poll_ms: u64,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_http_timeout_secs() -> u64 {
    60
}

fn default_resource_manager() -> String {
    DEFAULT_RESOURCE_MANAGER_ENDPOINT.to_string()
}

fn default_service_networking() -> String {
    DEFAULT_SERVICE_NETWORKING_ENDPOINT.to_string()
}

fn default_initial_poll_ms() -> u64 {
    1_000
}

fn default_poll_multiplier() -> f64 {
    1.1
}

fn default_max_poll_ms() -> u64 {
    10_000
}

fn default_timeout_secs() -> u64 {
    30 * 60
}

impl Default for CoreSettings {
    fn default() -> Self {
        Self {
            project: None,
            access_token: None,
            http_timeout_secs: default_http_timeout_secs(),
        }
    }
}

impl Default for EndpointSettings {
    fn default() -> Self {
        Self {
            cloudresourcemanager: default_resource_manager(),
            servicenetworking: default_service_networking(),
        }
    }
}

impl Default for OperationSettings {
    fn default() -> Self {
        Self {
            initial_poll_ms: default_initial_poll_ms(),
            poll_multiplier: default_poll_multiplier(),
            max_poll_ms: default_max_poll_ms(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Settings {
    /// Layers settings in increasing precedence: file, environment, flag.
    pub fn load(path: Option<&Path>, project_flag: Option<String>) -> Result<Self> {
        let settings = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        let settings = settings
            .with_env(|key| std::env::var(key).ok())
            .with_project_override(project_flag);

        tracing::debug!(
            "Loaded settings (project: {:?}, servicenetworking: {})",
            settings.core.project,
            settings.endpoints.servicenetworking
        );
        Ok(settings)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PeeringError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PeeringError::InvalidConfigValueError {
            field: "settings".to_string(),
            value: String::new(),
            reason: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` references; unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| PeeringError::config(format!("invalid substitution pattern: {}", e)))?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(project) = lookup(PROJECT_ENV).filter(|p| !p.is_empty()) {
            self.core.project = Some(project);
        }
        if let Some(token) = lookup(ACCESS_TOKEN_ENV).filter(|t| !t.is_empty()) {
            self.core.access_token = Some(token);
        }
        self
    }

    pub fn with_project_override(mut self, project: Option<String>) -> Self {
        if let Some(project) = project.filter(|p| !p.is_empty()) {
            self.core.project = Some(project);
        }
        self
    }

    /// The active project, or a configuration error when none is set.
    pub fn require_project(&self) -> Result<&str> {
        self.core
            .project
            .as_deref()
            .ok_or_else(|| PeeringError::MissingConfigError {
                field: "core/project".to_string(),
            })
    }

    pub fn poll_policy(&self) -> PollPolicy {
        PollPolicy {
            initial_delay: Duration::from_millis(self.operations.initial_poll_ms),
            multiplier: self.operations.poll_multiplier,
            max_delay: Duration::from_millis(self.operations.max_poll_ms),
            timeout: Duration::from_secs(self.operations.timeout_secs),
        }
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.core.http_timeout_secs)
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_endpoint(
            "endpoints.cloudresourcemanager",
            &self.endpoints.cloudresourcemanager,
        )?;
        validate_endpoint(
            "endpoints.servicenetworking",
            &self.endpoints.servicenetworking,
        )?;

        if let Some(project) = &self.core.project {
            if project.trim().is_empty() || project.contains('/') {
                return Err(invalid_value(
                    "core.project",
                    project,
                    "expected a project id or number",
                ));
            }
        }

        if self.core.http_timeout_secs == 0 {
            return Err(invalid_value(
                "core.http_timeout_secs",
                0,
                "a zero request timeout would fail every call",
            ));
        }

        self.poll_policy().validate()
    }
}
