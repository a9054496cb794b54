use std::time::Duration;

use arcplan_blueprint::UploadResponse;
use arcplan_config::ClientConfig;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client};
use tracing::{info, instrument, warn};
use url::Url;

use crate::error::{ClientBuildError, UploadError};
use crate::gate::VideoFile;
use crate::response::interpret_response;

/// Multipart field the service reads the video from.
const FILE_FIELD: &str = "file";

/// Sends a validated video to the inference service.
///
/// One call is one request; implementations must not retry.
#[async_trait]
pub trait InferenceClient: Send + Sync {
  async fn upload(&self, file: &VideoFile) -> Result<UploadResponse, UploadError>;
}

/// HTTP implementation of [`InferenceClient`].
#[derive(Debug, Clone)]
pub struct HttpInferenceClient {
  client: Client,
  endpoint: Url,
}

impl HttpInferenceClient {
  pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, ClientBuildError> {
    let client = Client::builder().timeout(timeout).build()?;
    Ok(Self { client, endpoint })
  }

  pub fn from_config(config: &ClientConfig) -> Result<Self, ClientBuildError> {
    Self::new(config.endpoint_url()?, config.request_timeout())
  }

  pub fn endpoint(&self) -> &Url {
    &self.endpoint
  }
}

#[async_trait]
impl InferenceClient for HttpInferenceClient {
  #[instrument(
    name = "inference_upload",
    skip(self, file),
    fields(
      endpoint = %self.endpoint,
      file_name = %file.file_name(),
      bytes = file.len(),
    )
  )]
  async fn upload(&self, file: &VideoFile) -> Result<UploadResponse, UploadError> {
    if file.is_empty() {
      warn!("uploading_empty_file");
    }
    let part = Part::stream_with_length(Body::from(file.contents().clone()), file.len() as u64)
      .file_name(file.file_name().to_string())
      .mime_str(file.media_type())
      .map_err(|_| UploadError::InvalidMediaType {
        media_type: file.media_type().to_string(),
      })?;
    let form = Form::new().part(FILE_FIELD, part);

    let response = self
      .client
      .post(self.endpoint.clone())
      .multipart(form)
      .send()
      .await
      .inspect_err(|e| warn!(error = %e, "upload_request_failed"))?;

    let status = response.status().as_u16();
    let body = response.text().await?;

    let result = interpret_response(status, &body);
    match &result {
      Ok(reply) => info!(status, items = reply.blueprint.len(), "upload_completed"),
      Err(e) => warn!(status, error = %e, "upload_rejected"),
    }
    result
  }
}
