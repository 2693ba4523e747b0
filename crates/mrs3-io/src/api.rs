//! Multipart HTTP client for the MRS3 backend.
//!
//! Two endpoints: `POST <base>/compress` (image + polygon geometry +
//! scale factor, returns an opaque package binary) and `POST
//! <base>/restore` (package + mode selector, returns an image binary).
//! Non-2xx responses carry a JSON body with a `detail` message field;
//! when the body is not parseable a generic status message is used
//! instead. Success bodies are never inspected.

use mrs3_core::wire::{
    FIELD_IMAGE, FIELD_MODE, FIELD_PKG, FIELD_POLYGONS, FIELD_SCALER, polygons_form_value,
};
use mrs3_core::{ApiConfig, Polygon, RestoreMode, ScaleFactor};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

/// Errors from a backend request.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Geometry could not be serialized for the `polygons` field.
    #[error("failed to encode region geometry: {0}")]
    Encode(#[from] serde_json::Error),

    /// The request never produced a response (network failure, CORS,
    /// aborted connection). Details are logged by the browser; the user
    /// gets a generic message.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("{message}")]
    Backend {
        /// HTTP status code.
        status: u16,
        /// Human-readable message, from the JSON `detail` field when
        /// present.
        message: String,
    },
}

/// JSON error body convention used by the backend.
#[derive(Deserialize)]
struct ErrorBody {
    detail: String,
}

/// Extract a display message from an error response body.
///
/// Uses the `detail` field of a JSON body when one parses, otherwise a
/// generic message naming the status code.
#[must_use]
pub fn error_detail(status: u16, body: &[u8]) -> String {
    serde_json::from_slice::<ErrorBody>(body)
        .map_or_else(|_| format!("request failed with status {status}"), |e| e.detail)
}

/// Client for the MRS3 backend endpoints.
///
/// Create one at app startup and share it across pages; `reqwest::Client`
/// is internally reference-counted.
#[derive(Debug, Clone)]
pub struct BackendClient {
    config: ApiConfig,
    http: reqwest::Client,
}

impl BackendClient {
    /// Create a client for the configured backend.
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// The configured endpoints.
    #[must_use]
    pub const fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Submit an image plus region geometry for downscale/compression.
    ///
    /// Multipart fields: `image` (binary), `polygons` (JSON array of
    /// integer coordinate pairs), `scaler` (stringified factor). The
    /// response body is the package binary, returned opaque.
    ///
    /// # Errors
    ///
    /// [`ApiError::Encode`] if geometry serialization fails,
    /// [`ApiError::Request`] on transport failure, and
    /// [`ApiError::Backend`] for non-2xx responses.
    #[allow(clippy::future_not_send)] // WASM is single-threaded; Send is not needed
    pub async fn compress(
        &self,
        image_name: &str,
        image_bytes: Vec<u8>,
        polygons: &[Polygon],
        scaler: ScaleFactor,
    ) -> Result<Vec<u8>, ApiError> {
        let form = Form::new()
            .part(
                FIELD_IMAGE,
                Part::bytes(image_bytes).file_name(image_name.to_owned()),
            )
            .text(FIELD_POLYGONS, polygons_form_value(polygons)?)
            .text(FIELD_SCALER, scaler.form_value());

        let response = self
            .http
            .post(self.config.compress_url())
            .multipart(form)
            .send()
            .await?;
        Self::read_binary(response).await
    }

    /// Submit a package file for restoration.
    ///
    /// Multipart fields: `pkg` (binary), `mrs3_mode` (stringified integer,
    /// `-1` AI upscaling or `0` fast classical). The response body is the
    /// restored image binary, returned opaque.
    ///
    /// # Errors
    ///
    /// [`ApiError::Request`] on transport failure and
    /// [`ApiError::Backend`] for non-2xx responses.
    #[allow(clippy::future_not_send)] // WASM is single-threaded; Send is not needed
    pub async fn restore(
        &self,
        pkg_name: &str,
        pkg_bytes: Vec<u8>,
        mode: RestoreMode,
    ) -> Result<Vec<u8>, ApiError> {
        let form = Form::new()
            .part(
                FIELD_PKG,
                Part::bytes(pkg_bytes).file_name(pkg_name.to_owned()),
            )
            .text(FIELD_MODE, mode.form_value());

        let response = self
            .http
            .post(self.config.restore_url())
            .multipart(form)
            .send()
            .await?;
        Self::read_binary(response).await
    }

    /// Read a response as opaque bytes, mapping non-success statuses to
    /// [`ApiError::Backend`] via the `detail` convention.
    #[allow(clippy::future_not_send)]
    async fn read_binary(response: reqwest::Response) -> Result<Vec<u8>, ApiError> {
        let status = response.status();
        let body = response.bytes().await?;
        if status.is_success() {
            Ok(body.to_vec())
        } else {
            Err(ApiError::Backend {
                status: status.as_u16(),
                message: error_detail(status.as_u16(), &body),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_field_is_extracted() {
        let body = br#"{"detail":"model unavailable"}"#;
        assert_eq!(error_detail(500, body), "model unavailable");
    }

    #[test]
    fn non_json_body_falls_back_to_status_message() {
        assert_eq!(
            error_detail(502, b"<html>Bad Gateway</html>"),
            "request failed with status 502"
        );
        assert_eq!(error_detail(500, b""), "request failed with status 500");
    }

    #[test]
    fn json_without_detail_falls_back() {
        assert_eq!(
            error_detail(422, br#"{"error":"nope"}"#),
            "request failed with status 422"
        );
    }

    #[test]
    fn backend_error_displays_message_only() {
        let err = ApiError::Backend {
            status: 500,
            message: "model unavailable".to_owned(),
        };
        assert_eq!(err.to_string(), "model unavailable");
    }
}
