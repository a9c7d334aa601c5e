use crate::config::Settings;
use crate::domain::model::{ConnectRequest, Operation, Project};
use crate::domain::ports::{PeeringService, ProjectResolver};
use crate::utils::error::{PeeringError, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use url::Url;

/// Shared plumbing for the Google-style JSON APIs: base URL, timeout and
/// optional bearer token.
#[derive(Debug, Clone)]
struct ApiClient {
    client: Client,
    base: Url,
    access_token: Option<String>,
}

impl ApiClient {
    fn new(field: &str, endpoint: &str, settings: &Settings) -> Result<Self> {
        let client = Client::builder().timeout(settings.http_timeout()).build()?;
        Ok(Self {
            client,
            base: parse_base_url(field, endpoint)?,
            access_token: settings.core.access_token.clone(),
        })
    }

    fn url(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .map_err(|e| PeeringError::InvalidConfigValueError {
                field: "request path".to_string(),
                value: path.to_string(),
                reason: e.to_string(),
            })
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.access_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

// Url::join drops the last path segment unless the base ends with '/'.
fn parse_base_url(field: &str, endpoint: &str) -> Result<Url> {
    let mut normalized = endpoint.to_string();
    if !normalized.ends_with('/') {
        normalized.push('/');
    }

    Url::parse(&normalized).map_err(|e| PeeringError::InvalidConfigValueError {
        field: field.to_string(),
        value: endpoint.to_string(),
        reason: format!("Invalid URL format: {}", e),
    })
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    message: String,
}

/// Pulls `error.message` out of an API error body, falling back to the
/// HTTP reason phrase.
async fn api_error_message(response: Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    serde_json::from_str::<ApiErrorBody>(&body)
        .ok()
        .map(|parsed| parsed.error.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string()
        })
}

#[derive(Debug, Clone)]
pub struct ResourceManagerClient {
    api: ApiClient,
}

impl ResourceManagerClient {
    pub fn new(settings: &Settings) -> Result<Self> {
        Ok(Self {
            api: ApiClient::new(
                "endpoints.cloudresourcemanager",
                &settings.endpoints.cloudresourcemanager,
                settings,
            )?,
        })
    }
}

#[async_trait]
impl ProjectResolver for ResourceManagerClient {
    async fn project_number(&self, project: &str) -> Result<u64> {
        let url = self.api.url(&format!("v1/projects/{}", project))?;
        tracing::debug!("Looking up project: {}", url);

        let response = self.api.authorize(self.api.client.get(url)).send().await?;
        let status = response.status();
        tracing::debug!("Project lookup status: {}", status);

        if !status.is_success() {
            let message = api_error_message(response).await;
            return Err(PeeringError::ProjectResolutionError {
                project: project.to_string(),
                message: format!("{} (HTTP {})", message, status.as_u16()),
            });
        }

        let text = response.text().await?;
        let body = serde_json::from_str::<Project>(&text).map_err(|e| {
            PeeringError::ProjectResolutionError {
                project: project.to_string(),
                message: format!("unreadable project response: {}", e),
            }
        })?;
        body.project_number
            .parse::<u64>()
            .map_err(|e| PeeringError::ProjectResolutionError {
                project: project.to_string(),
                message: format!("invalid project number '{}': {}", body.project_number, e),
            })
    }
}

#[derive(Debug, Clone)]
pub struct ServiceNetworkingClient {
    api: ApiClient,
}

impl ServiceNetworkingClient {
    pub fn new(settings: &Settings) -> Result<Self> {
        Ok(Self {
            api: ApiClient::new(
                "endpoints.servicenetworking",
                &settings.endpoints.servicenetworking,
                settings,
            )?,
        })
    }
}

#[async_trait]
impl PeeringService for ServiceNetworkingClient {
    async fn connect(&self, request: &ConnectRequest) -> Result<Operation> {
        let url = self
            .api
            .url(&format!("v1/services/{}/connections", request.service))?;
        let body = request.to_connection();
        tracing::debug!("POST {} network={}", url, body.network);

        let response = self
            .api
            .authorize(self.api.client.post(url.clone()).json(&body))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = api_error_message(response).await;
            return Err(PeeringError::RequestError {
                endpoint: url.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        let operation = response.json::<Operation>().await?;
        tracing::debug!("Connect accepted as {}", operation.name);
        Ok(operation)
    }

    async fn get_operation(&self, name: &str) -> Result<Operation> {
        let url = self.api.url(&format!("v1/{}", name))?;
        let response = self
            .api
            .authorize(self.api.client.get(url))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = api_error_message(response).await;
            return Err(PeeringError::OperationPollError {
                name: name.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<Operation>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_keeps_path_prefix() {
        let base = parse_base_url("endpoints.servicenetworking", "http://localhost:8080/proxy")
            .unwrap();
        assert_eq!(
            base.join("v1/operations/pssn.1").unwrap().as_str(),
            "http://localhost:8080/proxy/v1/operations/pssn.1"
        );
    }

    #[test]
    fn test_base_url_rejects_garbage() {
        assert!(matches!(
            parse_base_url("endpoints.servicenetworking", "::"),
            Err(PeeringError::InvalidConfigValueError { .. })
        ));
    }
}
