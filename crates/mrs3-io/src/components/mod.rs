//! Dioxus UI components for the MRS3 front end.
//!
//! Provides the policy-driven file upload zone, the polygon region
//! selector, and the processing result panel.

mod region_selector;
mod result_panel;
mod upload;

pub use region_selector::RegionSelector;
pub use result_panel::{ProcessedBlob, ResultPanel};
pub use upload::{FileUpload, SelectedFile};
