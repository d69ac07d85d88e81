//! Client for the document-compile collaborator.
//!
//! The collaborator accepts a declarative source document and returns a
//! base64-encoded artifact with a mime type suitable for PDF viewers. This
//! module is the only place that talks to it.

use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const COMPILE_PATH: &str = "/compile";
const COMPILE_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("compile service error (status {status}): {message}")]
    Status { status: u16, message: String },

    #[error("compile failed: {0}")]
    Compile(String),

    #[error("artifact decode failed: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("compile service returned no artifact")]
    MissingArtifact,
}

#[derive(Debug, Serialize)]
struct CompileRequest<'a> {
    source: &'a str,
    format: &'a str,
}

#[derive(Debug, Deserialize)]
struct CompileResponse {
    status: String,
    #[serde(default)]
    artifact: Option<CompileArtifact>,
    #[serde(default)]
    errors: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct CompileArtifact {
    data_base64: String,
    mime_type: String,
    #[serde(default)]
    page_count: usize,
}

/// A compiled, downloadable document.
#[derive(Debug, Clone)]
pub struct PdfArtifact {
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub page_count: usize,
}

#[derive(Clone)]
pub struct RenderClient {
    http: Client,
    base_url: String,
}

impl RenderClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url: String = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: Client::builder()
                .timeout(COMPILE_TIMEOUT)
                .build()
                .expect("failed to build HTTP client"),
            base_url,
        }
    }

    /// Submits LaTeX source and returns the decoded PDF artifact.
    pub async fn compile_pdf(&self, source: &str) -> Result<PdfArtifact, RenderError> {
        let response = self
            .http
            .post(format!("{}{}", self.base_url, COMPILE_PATH))
            .json(&CompileRequest {
                source,
                format: "pdf",
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(RenderError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let compiled: CompileResponse = response.json().await?;
        if compiled.status != "ok" {
            return Err(RenderError::Compile(compiled.errors.join("; ")));
        }
        let artifact = compiled.artifact.ok_or(RenderError::MissingArtifact)?;
        let bytes = BASE64.decode(artifact.data_base64.as_bytes())?;

        debug!(
            bytes = bytes.len(),
            pages = artifact.page_count,
            "compile service returned artifact"
        );

        Ok(PdfArtifact {
            bytes,
            mime_type: artifact.mime_type,
            page_count: artifact.page_count,
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_compile_decodes_artifact() {
        let mut server = mockito::Server::new_async().await;
        let pdf_bytes = b"%PDF-1.7 fake";
        server
            .mock("POST", "/compile")
            .match_body(mockito::Matcher::PartialJson(json!({"format": "pdf"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "status": "ok",
                    "artifact": {
                        "data_base64": BASE64.encode(pdf_bytes),
                        "mime_type": "application/pdf",
                        "page_count": 1,
                    }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = RenderClient::new(server.url());
        let artifact = client.compile_pdf("\\documentclass{article}").await.expect("compile");
        assert_eq!(artifact.bytes, pdf_bytes);
        assert_eq!(artifact.mime_type, "application/pdf");
        assert_eq!(artifact.page_count, 1);
    }

    #[tokio::test]
    async fn test_compile_failure_carries_service_errors() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/compile")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({"status": "error", "errors": ["undefined control sequence"]}).to_string(),
            )
            .create_async()
            .await;

        let client = RenderClient::new(server.url());
        let err = client.compile_pdf("broken").await.expect_err("compile error");
        match err {
            RenderError::Compile(message) => {
                assert!(message.contains("undefined control sequence"));
            }
            other => panic!("expected Compile error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_http_error_status_is_surfaced() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/compile")
            .with_status(503)
            .with_body("overloaded")
            .create_async()
            .await;

        let client = RenderClient::new(server.url());
        let err = client.compile_pdf("anything").await.expect_err("503");
        assert!(matches!(err, RenderError::Status { status: 503, .. }));
    }
}
