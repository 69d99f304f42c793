use std::path::Path;

use futures::Stream;
use futures::TryStreamExt;
use reqwest::multipart;
use reqwest::Client;
use thiserror::Error;
use url::Url;

use crate::domain::{ConversionOutcome, TargetFormat};

use super::models::{ApiConfig, ConvertResponse};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Failed to read input file: {0}")]
    InputFile(String),
}

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Clone)]
pub struct ApiClient {
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    /// Upload the input file and ask the service to convert it.
    ///
    /// The request is flagged with `X-Requested-With: XMLHttpRequest` so the
    /// service answers with JSON instead of rendering its upload page.
    pub async fn convert(
        &self,
        input_file: &Path,
        target_format: TargetFormat,
    ) -> Result<ConversionOutcome> {
        let bytes = tokio::fs::read(input_file)
            .await
            .map_err(|e| ApiError::InputFile(e.to_string()))?;

        let filename = input_file
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("input")
            .to_string();

        // Field names are the service's form contract.
        let form = multipart::Form::new()
            .part("input_file", multipart::Part::bytes(bytes).file_name(filename))
            .text("target_format", target_format.extension());

        let client = Client::new();
        let response = client
            .post(self.config.upload_url())
            .header("X-Requested-With", "XMLHttpRequest")
            .multipart(form)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| ApiError::ApiError(format!("Upload request failed: {}", e)))?;

        let raw: ConvertResponse = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("JSON decode error: {}", e)))?;

        self.validate_response(raw)
    }

    /// Turn the wire reply into a validated outcome. A "success" status
    /// without a download URL is a malformed reply, not a success.
    fn validate_response(&self, raw: ConvertResponse) -> Result<ConversionOutcome> {
        if raw.status == "success" {
            let relative = raw
                .download_url
                .filter(|url| !url.is_empty())
                .ok_or_else(|| {
                    ApiError::InvalidResponse(
                        "status is \"success\" but download_url is missing".to_string(),
                    )
                })?;

            Ok(ConversionOutcome::Success {
                download_url: self.resolve_download_url(&relative)?,
            })
        } else {
            let message = raw
                .message
                .filter(|message| !message.is_empty())
                .unwrap_or_else(|| format!("Le serveur a répondu « {} »", raw.status));

            Ok(ConversionOutcome::Failure { message })
        }
    }

    /// The service hands back a path like `/converter/download/<token>/`;
    /// resolve it against the configured base. An absolute URL passes through.
    fn resolve_download_url(&self, raw_url: &str) -> Result<String> {
        let base = Url::parse(&self.config.base_url)
            .map_err(|e| ApiError::InvalidResponse(format!("Bad base URL: {}", e)))?;

        let resolved = base
            .join(raw_url)
            .map_err(|e| ApiError::InvalidResponse(format!("Bad download URL: {}", e)))?;

        Ok(resolved.to_string())
    }

    /// Fetch the converted artifact as a byte stream.
    /// Returns (total_size, stream)
    pub async fn download_file_stream(
        &self,
        download_url: &str,
    ) -> Result<(Option<u64>, impl Stream<Item = Result<bytes::Bytes>>)> {
        let client = Client::new();
        let response = client
            .get(download_url)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| ApiError::ApiError(format!("Download request failed: {}", e)))?;

        let total_size = response.content_length();
        let stream = response.bytes_stream().map_err(ApiError::RequestError);

        Ok((total_size, stream))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn client_for(base_url: &str) -> ApiClient {
        ApiClient::new(ApiConfig {
            base_url: base_url.to_string(),
        })
    }

    fn temp_input() -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".txt")
            .tempfile()
            .unwrap();
        file.write_all(b"bonjour").unwrap();
        file
    }

    #[tokio::test]
    async fn test_convert_success_resolves_relative_url() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/converter/upload/")
            .match_header("x-requested-with", "XMLHttpRequest")
            .with_header("content-type", "application/json")
            .with_body(
                json!({"status": "success", "download_url": "/converter/download/abc123/"})
                    .to_string(),
            )
            .create_async()
            .await;

        let input = temp_input();
        let outcome = client_for(&server.url())
            .convert(input.path(), TargetFormat::Pdf)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(
            outcome,
            ConversionOutcome::Success {
                download_url: format!("{}/converter/download/abc123/", server.url()),
            }
        );
    }

    #[tokio::test]
    async fn test_convert_backend_failure_carries_message() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/converter/upload/")
            .with_header("content-type", "application/json")
            .with_body(
                json!({"status": "error", "message": "Unsupported conversion: pdf to pdf"})
                    .to_string(),
            )
            .create_async()
            .await;

        let input = temp_input();
        let outcome = client_for(&server.url())
            .convert(input.path(), TargetFormat::Pdf)
            .await
            .unwrap();

        assert_eq!(
            outcome,
            ConversionOutcome::Failure {
                message: "Unsupported conversion: pdf to pdf".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_convert_rejects_success_without_url() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/converter/upload/")
            .with_header("content-type", "application/json")
            .with_body(json!({"status": "success"}).to_string())
            .create_async()
            .await;

        let input = temp_input();
        let result = client_for(&server.url())
            .convert(input.path(), TargetFormat::Png)
            .await;

        assert!(matches!(result, Err(ApiError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_convert_rejects_non_json_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/converter/upload/")
            .with_body("<html>oops</html>")
            .create_async()
            .await;

        let input = temp_input();
        let result = client_for(&server.url())
            .convert(input.path(), TargetFormat::Png)
            .await;

        assert!(matches!(result, Err(ApiError::InvalidResponse(_))));
    }

    #[test]
    fn test_validate_passes_absolute_url_through() {
        let client = client_for("http://localhost:8000");
        let outcome = client
            .validate_response(ConvertResponse {
                status: "success".to_string(),
                message: None,
                download_url: Some("https://example.com/out.pdf".to_string()),
            })
            .unwrap();

        assert_eq!(
            outcome,
            ConversionOutcome::Success {
                download_url: "https://example.com/out.pdf".to_string(),
            }
        );
    }

    #[test]
    fn test_validate_failure_without_message_gets_fallback() {
        let client = client_for("http://localhost:8000");
        let outcome = client
            .validate_response(ConvertResponse {
                status: "throttled".to_string(),
                message: None,
                download_url: None,
            })
            .unwrap();

        match outcome {
            ConversionOutcome::Failure { message } => assert!(message.contains("throttled")),
            other => panic!("expected failure, got {:?}", other),
        }
    }
}
