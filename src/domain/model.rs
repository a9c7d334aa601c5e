use serde::{Deserialize, Serialize};

/// A long-running remote task as returned by the Service Networking API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub name: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Status>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Status {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub details: Vec<serde_json::Value>,
}

/// Wire body of `POST v1/services/{service}/connections`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub network: String,
    pub reserved_peering_ranges: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub project_id: String,
    // int64 fields are serialized as decimal strings by the API
    pub project_number: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub lifecycle_state: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectRequest {
    pub project_number: u64,
    pub service: String,
    pub network: String,
    pub reserved_ranges: Vec<String>,
}

impl ConnectRequest {
    pub fn network_resource(&self) -> String {
        format!(
            "projects/{}/global/networks/{}",
            self.project_number, self.network
        )
    }

    pub fn to_connection(&self) -> Connection {
        Connection {
            network: self.network_resource(),
            reserved_peering_ranges: self.reserved_ranges.clone(),
        }
    }
}

/// Splits the `--reserved-ranges` value on commas. Entries are passed through
/// untouched; the remote API is the only validator.
pub fn split_reserved_ranges(raw: &str) -> Vec<String> {
    raw.split(',').map(str::to_string).collect()
}
