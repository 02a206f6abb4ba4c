use std::time::Duration;

use docuchat_logging::dc_debug;
use reqwest::multipart::{Form, Part};
use serde_json::{json, Value};
use url::Url;

use crate::{BackendGateway, FailureKind, GatewayError, GatewayStartError, UploadFile};

const UPLOAD_PATH: &str = "upload";
const URLS_PATH: &str = "urls";
const SEARCH_PATH: &str = "search";
const UPLOAD_FIELD: &str = "files";

#[derive(Debug, Clone)]
pub struct GatewaySettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    /// Upper bound for a whole call. Ingestion of large documents is slow on
    /// the backend side, so this is generous.
    pub request_timeout: Duration,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(120),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReqwestGateway {
    client: reqwest::Client,
    base_url: Url,
}

impl ReqwestGateway {
    pub fn new(settings: GatewaySettings) -> Result<Self, GatewayStartError> {
        let base_url = Url::parse(&settings.base_url).map_err(|err| {
            GatewayStartError::InvalidBaseUrl {
                url: settings.base_url.clone(),
                reason: err.to_string(),
            }
        })?;
        if base_url.cannot_be_a_base() {
            return Err(GatewayStartError::InvalidBaseUrl {
                url: settings.base_url,
                reason: "url cannot be a base".to_string(),
            });
        }

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| GatewayStartError::Client(err.to_string()))?;

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, name: &str) -> Url {
        let mut url = self.base_url.clone();
        // Checked in `new`: the base url always has path segments.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(name);
        }
        url
    }

    async fn build_form(files: &[UploadFile]) -> Result<Form, GatewayError> {
        let mut form = Form::new();
        for file in files {
            let bytes = file.load().await?;
            let mime = mime_guess::from_path(&file.file_name).first_or_octet_stream();
            let part = Part::bytes(bytes)
                .file_name(file.file_name.clone())
                .mime_str(mime.essence_str())
                .map_err(|err| GatewayError::new(FailureKind::Unknown, err.to_string()))?;
            form = form.part(UPLOAD_FIELD, part);
        }
        Ok(form)
    }
}

#[async_trait::async_trait]
impl BackendGateway for ReqwestGateway {
    async fn ingest_documents(&self, files: &[UploadFile]) -> Result<(), GatewayError> {
        let form = Self::build_form(files).await?;
        let url = self.endpoint(UPLOAD_PATH);
        dc_debug!("POST {} with {} files", url, files.len());

        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        ensure_success(&response)?;
        Ok(())
    }

    async fn ingest_url(&self, url: &str) -> Result<(), GatewayError> {
        let endpoint = self.endpoint(URLS_PATH);
        dc_debug!("POST {} url={}", endpoint, url);

        let response = self
            .client
            .post(endpoint)
            .json(&json!({ "data": { "url": url } }))
            .send()
            .await
            .map_err(map_reqwest_error)?;
        ensure_success(&response)?;
        Ok(())
    }

    async fn ask(&self, query: &str) -> Result<Value, GatewayError> {
        let mut endpoint = self.endpoint(SEARCH_PATH);
        endpoint.query_pairs_mut().append_pair("query", query);
        dc_debug!("GET {}", endpoint);

        let response = self
            .client
            .get(endpoint)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        ensure_success(&response)?;
        let body = response.text().await.map_err(map_reqwest_error)?;
        Ok(decode_answer(body))
    }
}

/// A body that is not JSON is still an answer; it is kept as a JSON string.
fn decode_answer(body: String) -> Value {
    serde_json::from_str(&body).unwrap_or(Value::String(body))
}

fn ensure_success(response: &reqwest::Response) -> Result<(), GatewayError> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(GatewayError::new(
            FailureKind::ServerError {
                status: status.as_u16(),
            },
            status.to_string(),
        ))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> GatewayError {
    if err.is_timeout() {
        return GatewayError::new(FailureKind::Timeout, err.to_string());
    }
    if let Some(status) = err.status() {
        return GatewayError::new(
            FailureKind::ServerError {
                status: status.as_u16(),
            },
            err.to_string(),
        );
    }
    if err.is_connect() || err.is_request() {
        return GatewayError::new(FailureKind::NetworkUnavailable, err.to_string());
    }
    GatewayError::new(FailureKind::Unknown, err.to_string())
}
