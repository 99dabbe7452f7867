//! HTTP dispatch of serialized submissions.

use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};
use tracing::{error, info};

/// Multipart field name the receiving service expects for the upload.
pub const SUBMISSION_FILE_FIELD: &str = "xml_submission_file";

/// Fixed filename for the uploaded document.
pub const SUBMISSION_FILE_NAME: &str = "data.xml";

/// Content type of the uploaded document.
pub const SUBMISSION_CONTENT_TYPE: &str = "text/xml";

/// Per-request timeout so one hung dispatch cannot hold a pool slot
/// indefinitely.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// What happened to one dispatched submission.
#[derive(Debug, Clone)]
pub enum DispatchStatus {
    /// The request reached the service; any status code lands here.
    Delivered { status: u16, body: String },
    /// The request could not be completed (connect, timeout, body read).
    Failed { error: String },
}

impl DispatchStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Delivered { status, .. } if (200..300).contains(status))
    }
}

/// Outcome of one dispatch, tied back to its parent row key.
#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    pub parent_key: String,
    pub status: DispatchStatus,
}

impl DispatchOutcome {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Build the shared HTTP client used by every dispatch in a run.
pub fn build_client(timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder().timeout(timeout).build()
}

/// Send one serialized document as a multipart file upload.
///
/// Every failure mode is recoverable at this granularity: the outcome
/// records it and the caller's sibling dispatches are unaffected. One
/// log line per dispatch carries the status code and response body, or
/// the transport error.
pub async fn dispatch(
    client: &reqwest::Client,
    endpoint: &str,
    token: &str,
    parent_key: String,
    xml: Vec<u8>,
) -> DispatchOutcome {
    let status = match send(client, endpoint, token, xml).await {
        Ok((status, body)) => {
            info!(
                parent_key = %parent_key,
                status,
                body = %body,
                "submission status"
            );
            DispatchStatus::Delivered { status, body }
        }
        Err(err) => {
            error!(
                parent_key = %parent_key,
                error = %err,
                "failed to post submission"
            );
            DispatchStatus::Failed { error: err }
        }
    };
    DispatchOutcome { parent_key, status }
}

async fn send(
    client: &reqwest::Client,
    endpoint: &str,
    token: &str,
    xml: Vec<u8>,
) -> Result<(u16, String), String> {
    let part = Part::bytes(xml)
        .file_name(SUBMISSION_FILE_NAME)
        .mime_str(SUBMISSION_CONTENT_TYPE)
        .map_err(|err| err.to_string())?;
    let form = Form::new().part(SUBMISSION_FILE_FIELD, part);
    let response = client
        .post(endpoint)
        .header(AUTHORIZATION, format!("Token {token}"))
        .multipart(form)
        .send()
        .await
        .map_err(|err| err.to_string())?;
    let status = response.status().as_u16();
    let body = response.text().await.map_err(|err| err.to_string())?;
    Ok((status, body))
}
