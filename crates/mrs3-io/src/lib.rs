//! mrs3-io: Browser I/O and Dioxus component library.
//!
//! Handles file uploads, Blob URLs and downloads, the multipart HTTP
//! client for the MRS3 backend, and the reusable UI components (upload
//! zone, region selector, result panel) shared by the application pages.

pub mod api;
pub mod blob;
pub mod components;
pub mod download;

pub use api::{ApiError, BackendClient};
pub use components::{FileUpload, ProcessedBlob, RegionSelector, ResultPanel, SelectedFile};
