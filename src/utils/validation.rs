use crate::utils::error::{PeeringError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub(crate) fn invalid_value(field: &str, value: impl ToString, reason: impl Into<String>) -> PeeringError {
    PeeringError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// Request paths are joined onto the endpoint, so only scheme, host, port
/// and a path prefix are allowed.
pub fn validate_endpoint(field: &str, endpoint: &str) -> Result<()> {
    let url = Url::parse(endpoint)
        .map_err(|e| invalid_value(field, endpoint, format!("not an absolute URL: {}", e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid_value(
            field,
            endpoint,
            format!("API endpoints must use http or https, not {}", url.scheme()),
        ));
    }
    if url.host_str().is_none() {
        return Err(invalid_value(field, endpoint, "endpoint has no host"));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid_value(
            field,
            endpoint,
            "endpoint must not carry a query string or fragment",
        ));
    }
    if !url.username().is_empty() || url.password().is_some() {
        return Err(invalid_value(
            field,
            endpoint,
            "credentials belong in core.access_token, not in the endpoint",
        ));
    }

    Ok(())
}
