use serde::{Deserialize, Serialize};

/// Wire shape of the conversion endpoint's JSON reply, before validation.
/// `message` and `download_url` are each only meaningful for one value of
/// `status`; the client enforces that when turning this into an outcome.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConvertResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub download_url: Option<String>,
}

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    pub fn upload_url(&self) -> String {
        format!("{}/converter/upload/", self.base_url.trim_end_matches('/'))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_url_joins_cleanly() {
        let config = ApiConfig {
            base_url: "http://localhost:8000/".to_string(),
        };
        assert_eq!(config.upload_url(), "http://localhost:8000/converter/upload/");
    }
}
