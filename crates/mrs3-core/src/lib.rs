//! mrs3-core: Pure logic for the MRS3 front end (sans-IO).
//!
//! Region-selection session state, display-to-image coordinate scaling,
//! upload validation policy, the multipart wire contract toward the MRS3
//! backend, and the page submission flow state machine.
//!
//! This crate has **no browser or network dependencies** -- it operates on
//! in-memory values and returns structured data. All Dioxus components,
//! Blob/URL handling, and HTTP live in `mrs3-io`.

pub mod config;
pub mod flow;
pub mod geometry;
pub mod session;
pub mod types;
pub mod upload;
pub mod wire;

pub use config::ApiConfig;
pub use flow::{FlowError, PageFlow, PagePhase};
pub use geometry::{CanvasScale, GeometryError, probe_dimensions};
pub use session::{PolygonSession, SessionError, SessionMode};
pub use types::{Dimensions, Point, Polygon};
pub use upload::{AcceptKind, UploadError, UploadPolicy};
pub use wire::{RestoreMode, ScaleFactor};
