//! Blob object URL creation for previews and downloads.
//!
//! Turns in-memory bytes into object URLs usable as `<img src>` or anchor
//! targets. Every created URL must be revoked with [`revoke_blob_url`]
//! once the element no longer needs it, or the browser keeps the backing
//! bytes alive for the lifetime of the document.
//!
//! All functions require a browser environment
//! (`wasm32-unknown-unknown` target).

use wasm_bindgen::JsValue;
use web_sys::BlobPropertyBag;

/// Errors that can occur when creating a Blob URL.
#[derive(Debug, thiserror::Error)]
pub enum BlobError {
    /// A browser API call returned an error.
    #[error("browser API error: {0}")]
    JsError(String),
}

impl From<JsValue> for BlobError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

/// Create an object URL for `bytes` with the given MIME type.
///
/// # Errors
///
/// Returns [`BlobError::JsError`] if Blob or URL creation fails.
pub fn bytes_to_blob_url(bytes: &[u8], mime_type: &str) -> Result<String, BlobError> {
    let uint8_array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::new();
    parts.push(&uint8_array);

    let opts = BlobPropertyBag::new();
    opts.set_type(mime_type);
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &opts)?;

    let url = web_sys::Url::create_object_url_with_blob(&blob)?;
    Ok(url)
}

/// Revoke a previously created object URL.
///
/// Best-effort: failures are ignored since there is nothing a caller can
/// do about a URL that is already gone.
pub fn revoke_blob_url(url: &str) {
    let _ = web_sys::Url::revoke_object_url(url);
}
